use async_trait::async_trait;

/// Best-effort page title lookup. Failures of any kind yield an empty string.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn title_for(&self, url: &str) -> String;
}
