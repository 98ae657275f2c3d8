pub mod actions;
pub mod config;
pub mod notifications;
pub mod rest;
pub mod session;
pub mod shared;
pub mod urls;

pub use actions::{ActionDispatcher, ActionEvent, ActionPhase};
pub use config::{ClientConfig, ConfigError};
pub use notifications::{ChannelNotifier, LogNotifier, Notification, NotificationLevel, Notifier};
pub use rest::{FetchError, RestClient};
pub use session::{CurrentUser, CurrentUserStore};
pub use shared::StateStore;
pub use urls::ApiUrls;
