use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub owner_id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Field values written on create and update. Tag ids are expected to be
/// resolved against the owner already; group ids are validated upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkWrite {
    pub title: String,
    pub url: String,
    pub tag_ids: Vec<i64>,
    pub group_ids: Vec<i64>,
}
