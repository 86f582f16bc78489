use std::sync::Arc;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::title_lookup::TitleLookup;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    link_repo: Arc<dyn LinkRepository>,
    tag_repo: Arc<dyn TagRepository>,
    group_repo: Arc<dyn GroupRepository>,
    title_lookup: Arc<dyn TitleLookup>,
}

impl AppServices {
    pub fn new(
        link_repo: Arc<dyn LinkRepository>,
        tag_repo: Arc<dyn TagRepository>,
        group_repo: Arc<dyn GroupRepository>,
        title_lookup: Arc<dyn TitleLookup>,
    ) -> Self {
        Self {
            link_repo,
            tag_repo,
            group_repo,
            title_lookup,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn link_repo(&self) -> Arc<dyn LinkRepository> {
        self.services.link_repo.clone()
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn group_repo(&self) -> Arc<dyn GroupRepository> {
        self.services.group_repo.clone()
    }

    pub fn title_lookup(&self) -> Arc<dyn TitleLookup> {
        self.services.title_lookup.clone()
    }
}
