//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the interactive map.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route that applies a button press or state click to the dashboard.
pub const DASHBOARD_EVENTS: &str = "/api/dashboard/events";

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(endpoint: &str) {
        assert!(endpoint.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [ROOT, DASHBOARD_VIEW, STATIC, DASHBOARD_EVENTS] {
            assert_endpoint_is_valid_uri(endpoint);
            assert!(endpoint.starts_with('/'), "{endpoint}");
        }
    }
}
