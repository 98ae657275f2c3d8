use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::core::rest::{FetchError, RestClient};
use crate::core::shared::StateStore;
use crate::core::urls::ApiUrls;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub grn_permissions: Vec<String>,
    #[serde(default)]
    pub read_only: bool,
}

impl CurrentUser {
    /// `*` grants everything; otherwise permissions match exactly.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == "*" || p == permission)
    }
}

/// Cached copy of the logged-in user. Reloaded after actions that change
/// what the user may access, such as creating a shared view.
#[derive(Debug)]
pub struct CurrentUserStore {
    rest: RestClient,
    state: StateStore<Option<CurrentUser>>,
}

impl CurrentUserStore {
    pub fn new(rest: RestClient) -> Self {
        Self {
            rest,
            state: StateStore::new(None, 16),
        }
    }

    pub fn current(&self) -> Option<CurrentUser> {
        self.state.state()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Option<CurrentUser>> {
        self.state.subscribe()
    }

    pub async fn reload(&self) -> Result<CurrentUser, FetchError> {
        debug!("Reloading current user");
        let user: CurrentUser = self.rest.get(ApiUrls::CURRENT_USER, &[]).await?;
        info!(
            "Current user {} has {} permissions",
            user.username,
            user.permissions.len()
        );
        self.state.replace(Some(user.clone()));
        Ok(user)
    }
}
