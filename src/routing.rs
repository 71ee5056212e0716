//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_dashboard_page, post_dashboard_event},
    endpoints,
    not_found::get_404_not_found,
};

/// The directory static assets are served from.
pub const STATIC_DIR: &str = "static/";

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_EVENTS, post(post_dashboard_event))
        .nest_service(endpoints::STATIC, ServeDir::new(STATIC_DIR))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppState, aggregation::StateCounts, build_router, dashboard::DashboardSession, endpoints,
    };

    fn get_test_server() -> TestServer {
        let state = AppState::from_session(DashboardSession::new(&StateCounts::default()));

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Interactive US Contracts Map"));
    }

    #[tokio::test]
    async fn accepts_form_encoded_events() {
        let server = get_test_server();

        let response = server
            .post(endpoints::DASHBOARD_EVENTS)
            .form(&[("event", "state"), ("state", "TX")])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("State: TX"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
