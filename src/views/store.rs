use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::core::actions::ActionDispatcher;
use crate::core::notifications::{Notification, Notifier};
use crate::core::rest::RestClient;
use crate::core::session::CurrentUserStore;
use crate::core::shared::StateStore;
use crate::core::urls::ApiUrls;

use super::error::ViewsError;
use super::types::{
    EntitySharePayload, PaginatedViews, SaveViewRequest, SearchParams, View,
    ViewManagementState, ViewSummary,
};

pub const STORE_NAME: &str = "views.ViewManagement";

/// CRUD façade over the `/views` REST resource.
///
/// Only `search` touches the cached state; `create`, `update` and `delete`
/// leave it alone and callers re-run `search` to observe their effect.
/// Concurrent searches are not sequenced: whichever response arrives last
/// is what the state holds.
pub struct ViewManagementStore {
    rest: RestClient,
    state: StateStore<ViewManagementState>,
    notifier: Arc<dyn Notifier>,
    actions: ActionDispatcher,
    current_user: Arc<CurrentUserStore>,
}

impl ViewManagementStore {
    pub fn new(
        rest: RestClient,
        notifier: Arc<dyn Notifier>,
        actions: ActionDispatcher,
        current_user: Arc<CurrentUserStore>,
    ) -> Self {
        Self {
            rest,
            state: StateStore::new(ViewManagementState::default(), 64),
            notifier,
            actions,
            current_user,
        }
    }

    pub fn state(&self) -> ViewManagementState {
        self.state.state()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewManagementState> {
        self.state.subscribe()
    }

    pub fn actions(&self) -> &ActionDispatcher {
        &self.actions
    }

    pub async fn get(&self, view_id: &str) -> Result<View, ViewsError> {
        self.actions
            .track(STORE_NAME, "get", async {
                let view: View = self.rest.get(&ApiUrls::view_by_id(view_id), &[]).await?;
                Ok::<_, ViewsError>(view)
            })
            .await
    }

    /// Creating a view may grant the current user new permissions, so the
    /// current user is reloaded afterwards.
    pub async fn create(
        &self,
        view: &View,
        share_request: Option<&EntitySharePayload>,
    ) -> Result<View, ViewsError> {
        let created = self
            .actions
            .track(STORE_NAME, "create", async {
                let body = serde_json::to_value(SaveViewRequest {
                    entity: view,
                    share_request,
                })?;
                let created: View = self.rest.post(ApiUrls::VIEWS, Some(body)).await?;
                info!("Created view {} ({})", created.title, created.id);
                Ok::<_, ViewsError>(created)
            })
            .await?;

        if let Err(e) = self.current_user.reload().await {
            warn!("Reloading current user after creating view failed: {e}");
        }

        Ok(created)
    }

    pub async fn update(
        &self,
        view: &View,
        share_request: Option<&EntitySharePayload>,
    ) -> Result<View, ViewsError> {
        self.actions
            .track(STORE_NAME, "update", async {
                if view.id.is_empty() {
                    return Err(ViewsError::MissingId);
                }
                let body = serde_json::to_value(SaveViewRequest {
                    entity: view,
                    share_request,
                })?;
                let updated: View = self.rest.put(&ApiUrls::view_by_id(&view.id), body).await?;
                debug!("Updated view {}", updated.id);
                Ok::<_, ViewsError>(updated)
            })
            .await
    }

    /// On success the list and pagination are replaced together and
    /// broadcast once. On failure the state is left as it was.
    pub async fn search(&self, params: &SearchParams) -> Result<PaginatedViews, ViewsError> {
        self.actions
            .track(STORE_NAME, "search", async {
                match self
                    .rest
                    .get::<PaginatedViews>(ApiUrls::VIEWS, &params.to_query())
                    .await
                {
                    Ok(response) => {
                        debug!(
                            "Search '{}' returned {} of {} views",
                            params.query, response.count, response.total
                        );
                        self.state.replace(ViewManagementState {
                            list: Some(response.views.clone()),
                            pagination: response.pagination(),
                        });
                        Ok::<_, ViewsError>(response)
                    }
                    Err(e) => {
                        self.notifier.notify(Notification::error(
                            format!("Fetching views failed with status: {e}"),
                            "Could not retrieve views",
                        ));
                        Err(e.into())
                    }
                }
            })
            .await
    }

    pub async fn delete(&self, view: &View) -> Result<(), ViewsError> {
        self.actions
            .track(STORE_NAME, "delete", async {
                if view.id.is_empty() {
                    return Err(ViewsError::MissingId);
                }
                if let Err(e) = self
                    .rest
                    .delete::<serde_json::Value>(&ApiUrls::view_by_id(&view.id))
                    .await
                {
                    self.notifier.notify(Notification::error(
                        format!("Deleting view {} failed with status: {e}", view.title),
                        "Could not delete view",
                    ));
                    return Err(e.into());
                }
                info!("Deleted view {} ({})", view.title, view.id);
                Ok::<_, ViewsError>(())
            })
            .await
    }

    pub async fn for_value(&self) -> Result<Vec<ViewSummary>, ViewsError> {
        self.actions
            .track(STORE_NAME, "forValue", async {
                self.rest
                    .post::<Vec<ViewSummary>>(ApiUrls::VIEWS_FOR_VALUE, None)
                    .await
                    .map_err(|e| {
                        self.notifier.notify(Notification::error(
                            format!("Finding matching views for value failed with status: {e}"),
                            "Could not find matching views",
                        ));
                        ViewsError::from(e)
                    })
            })
            .await
    }
}
