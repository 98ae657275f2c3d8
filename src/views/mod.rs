pub mod error;
pub mod loader;
pub mod store;
pub mod types;

pub use error::ViewsError;
pub use loader::{Liveness, ViewListLoader};
pub use store::{ViewManagementStore, STORE_NAME};
pub use types::*;
