pub mod core;
pub mod system_config;
pub mod views;
pub mod widgets;

use std::sync::Arc;

use crate::core::{
    ActionDispatcher, ClientConfig, CurrentUserStore, FetchError, Notifier, RestClient,
};
use crate::system_config::SystemConfigurationClient;
use crate::views::{SearchParams, ViewManagementStore};

/// Everything a front end needs, wired to one API endpoint.
pub struct ViewsClient {
    pub config: ClientConfig,
    pub actions: ActionDispatcher,
    pub current_user: Arc<CurrentUserStore>,
    pub views: Arc<ViewManagementStore>,
    pub system_config: SystemConfigurationClient,
}

impl ViewsClient {
    pub fn new(config: ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, FetchError> {
        let rest = RestClient::new(&config)?;
        let actions = ActionDispatcher::default();
        let current_user = Arc::new(CurrentUserStore::new(rest.clone()));
        let views = Arc::new(ViewManagementStore::new(
            rest.clone(),
            notifier.clone(),
            actions.clone(),
            current_user.clone(),
        ));
        let system_config = SystemConfigurationClient::new(rest, notifier);

        Ok(Self {
            config,
            actions,
            current_user,
            views,
            system_config,
        })
    }

    /// Search parameters using the configured `default_per_page`.
    pub fn search_params(&self, query: impl Into<String>) -> SearchParams {
        SearchParams::new(query).per_page(self.config.default_per_page)
    }
}
