use log::debug;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::error::ViewsError;
use super::store::ViewManagementStore;
use super::types::{PaginatedViews, SearchParams};

/// Shared flag telling an in-flight request whether its result is still
/// wanted.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads pages of views for a single consumer. Starting a new load or
/// calling [`ViewListLoader::cancel`] marks earlier loads stale; their
/// results are dropped and resolve to `None`.
///
/// This only protects the consumer. The store itself still applies every
/// search response it receives.
pub struct ViewListLoader {
    store: Arc<ViewManagementStore>,
    current: Mutex<Liveness>,
}

impl ViewListLoader {
    pub fn new(store: Arc<ViewManagementStore>) -> Self {
        Self {
            store,
            current: Mutex::new(Liveness::new()),
        }
    }

    fn renew(&self) -> Liveness {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = Liveness::new();
        current.clone()
    }

    pub fn cancel(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// The liveness token is taken when `load` is called, not when the
    /// returned future is first polled.
    pub fn load(
        &self,
        params: SearchParams,
    ) -> impl Future<Output = Result<Option<PaginatedViews>, ViewsError>> + '_ {
        let liveness = self.renew();
        async move {
            let response = self.store.search(&params).await?;
            if liveness.is_alive() {
                Ok(Some(response))
            } else {
                debug!("Dropping stale view list for query '{}'", params.query);
                Ok(None)
            }
        }
    }
}
