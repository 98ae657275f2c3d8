use log::debug;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::core::notifications::{Notification, Notifier};
use crate::core::rest::{FetchError, RestClient};
use crate::core::urls::ApiUrls;

#[derive(Debug, thiserror::Error)]
pub enum SystemConfigError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Invalid ISO-8601 duration: {0}")]
    InvalidDuration(String),
}

#[derive(Debug, Deserialize)]
struct ConfigurationValue {
    value: String,
}

/// Read access to single system configuration options.
pub struct SystemConfigurationClient {
    rest: RestClient,
    notifier: Arc<dyn Notifier>,
}

impl SystemConfigurationClient {
    pub fn new(rest: RestClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { rest, notifier }
    }

    /// Lower bound for dashboard auto-refresh, configured server side.
    pub async fn minimum_refresh_interval(&self) -> Result<Duration, SystemConfigError> {
        let option: ConfigurationValue = self
            .rest
            .get(ApiUrls::MINIMUM_REFRESH_INTERVAL, &[])
            .await
            .map_err(|e| {
                self.notifier.notify(Notification::error(
                    format!(
                        "Loading system configuration \"minimum_auto_refresh_interval\" failed with status: {e}"
                    ),
                    "Could not load configuration option",
                ));
                SystemConfigError::from(e)
            })?;

        debug!("minimum_auto_refresh_interval = {}", option.value);
        parse_iso8601_duration(&option.value)
    }
}

/// Parses the `PnWnDTnHnMnS` subset of ISO-8601 durations. Years and months
/// have no fixed length and are rejected.
pub fn parse_iso8601_duration(input: &str) -> Result<Duration, SystemConfigError> {
    let invalid = || SystemConfigError::InvalidDuration(input.to_string());

    let body = input.trim().strip_prefix('P').ok_or_else(invalid)?;
    let (date, time) = match body.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return Err(invalid());
            }
            (date, time)
        }
        None => (body, ""),
    };
    if date.is_empty() && time.is_empty() {
        return Err(invalid());
    }

    let date_seconds = sum_components(date, |unit| match unit {
        'W' => Some(604_800.0),
        'D' => Some(86_400.0),
        _ => None,
    })
    .ok_or_else(invalid)?;
    let time_seconds = sum_components(time, |unit| match unit {
        'H' => Some(3_600.0),
        'M' => Some(60.0),
        'S' => Some(1.0),
        _ => None,
    })
    .ok_or_else(invalid)?;

    Duration::try_from_secs_f64(date_seconds + time_seconds).map_err(|_| invalid())
}

fn sum_components(part: &str, factor: impl Fn(char) -> Option<f64>) -> Option<f64> {
    let mut total = 0.0;
    let mut number = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let value: f64 = number.parse().ok().filter(|v: &f64| v.is_finite())?;
        total += value * factor(c)?;
        number.clear();
    }
    number.is_empty().then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClientConfig;
    use crate::core::notifications::ChannelNotifier;

    #[test]
    fn test_parse_common_durations() {
        assert_eq!(parse_iso8601_duration("PT1S").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_iso8601_duration("PT5M").unwrap(), Duration::from_secs(300));
        assert_eq!(
            parse_iso8601_duration("P1DT2H").unwrap(),
            Duration::from_secs(86_400 + 7_200)
        );
        assert_eq!(
            parse_iso8601_duration("PT0.5S").unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "P", "PT", "1S", "PT5", "P1Y", "PTXS"] {
            assert!(parse_iso8601_duration(input).is_err(), "{input} should fail");
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            parse_iso8601_duration("P99999999999999W"),
            Err(SystemConfigError::InvalidDuration(_))
        ));
        let overflowing = format!("PT{}S", "9".repeat(400));
        assert!(matches!(
            parse_iso8601_duration(&overflowing),
            Err(SystemConfigError::InvalidDuration(_))
        ));
    }

    #[tokio::test]
    async fn test_minimum_refresh_interval() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/system/configuration/minimum_auto_refresh_interval")
            .with_status(200)
            .with_body(r#"{"value":"PT10S"}"#)
            .create_async()
            .await;

        let rest = RestClient::new(&ClientConfig {
            server_url: server.url(),
            ..Default::default()
        })
        .unwrap();
        let client = SystemConfigurationClient::new(rest, Arc::new(ChannelNotifier::default()));
        assert_eq!(
            client.minimum_refresh_interval().await.unwrap(),
            Duration::from_secs(10)
        );
    }

    #[tokio::test]
    async fn test_failure_notifies_once() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/system/configuration/minimum_auto_refresh_interval")
            .with_status(500)
            .create_async()
            .await;

        let rest = RestClient::new(&ClientConfig {
            server_url: server.url(),
            ..Default::default()
        })
        .unwrap();
        let notifier = Arc::new(ChannelNotifier::default());
        let mut rx = notifier.subscribe();
        let client = SystemConfigurationClient::new(rest, notifier.clone());

        assert!(client.minimum_refresh_interval().await.is_err());
        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.title, "Could not load configuration option");
        assert!(rx.try_recv().is_err());
    }
}
