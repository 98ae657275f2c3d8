#[derive(Debug)]
pub struct ApiUrls;

impl ApiUrls {
    // Views
    pub const VIEWS: &'static str = "/views";
    pub const VIEW_BY_ID: &'static str = "/views/:id";
    pub const VIEWS_FOR_VALUE: &'static str = "/views/forValue";

    // Users
    pub const CURRENT_USER: &'static str = "/users/me";

    // System configuration
    pub const MINIMUM_REFRESH_INTERVAL: &'static str =
        "/system/configuration/minimum_auto_refresh_interval";
}

impl ApiUrls {
    /// Replaces `:param` placeholders in `template`.
    pub fn with_params(template: &str, params: &[(&str, &str)]) -> String {
        let mut result = template.to_string();
        for (key, value) in params {
            result = result.replace(&format!(":{key}"), &urlencoding::encode(value));
        }
        result
    }

    pub fn view_by_id(id: &str) -> String {
        Self::with_params(Self::VIEW_BY_ID, &[("id", id)])
    }
}

/// Joins the API base URL and an absolute API path.
pub fn qualify_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_by_id_encodes_param() {
        assert_eq!(ApiUrls::view_by_id("abc123"), "/views/abc123");
        assert_eq!(ApiUrls::view_by_id("a/b"), "/views/a%2Fb");
    }

    #[test]
    fn test_qualify_url_handles_slashes() {
        assert_eq!(
            qualify_url("http://localhost:9000/api/", "/views"),
            "http://localhost:9000/api/views"
        );
        assert_eq!(
            qualify_url("http://localhost:9000/api", "views"),
            "http://localhost:9000/api/views"
        );
    }
}
