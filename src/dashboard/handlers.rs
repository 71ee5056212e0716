//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and applying user events
//! - The page layout, including the script that drives the map
//! - State and form types used by the handlers

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        map::{GEOJSON_PATH, MAP_NAME},
        panels::{CONTENT_ID, MAP_ID, content_view, controls_view},
        session::{DashboardEvent, DashboardSession},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
};

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The session shared by every request.
    pub session: Arc<Mutex<DashboardSession>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// The kind of event sent by the dashboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Color the map by awarded contracts.
    Red,
    /// Color the map by offered contracts.
    Green,
    /// Color the map by offered minus awarded contracts.
    Combined,
    /// Make the map white again.
    Reset,
    /// Select the state given in the form.
    State,
}

impl EventKind {
    /// The form value for this kind of event.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Red => "red",
            EventKind::Green => "green",
            EventKind::Combined => "combined",
            EventKind::Reset => "reset",
            EventKind::State => "state",
        }
    }
}

/// Form data for a dashboard event.
#[derive(Debug, Deserialize)]
pub struct DashboardEventForm {
    /// What the user did.
    pub event: EventKind,
    /// The clicked state's code, only used for [EventKind::State].
    #[serde(default)]
    pub state: Option<String>,
}

impl TryFrom<DashboardEventForm> for DashboardEvent {
    type Error = Error;

    fn try_from(form: DashboardEventForm) -> Result<Self, Self::Error> {
        Ok(match form.event {
            EventKind::Red => DashboardEvent::ShowRed,
            EventKind::Green => DashboardEvent::ShowGreen,
            EventKind::Combined => DashboardEvent::ShowCombined,
            EventKind::Reset => DashboardEvent::Reset,
            EventKind::State => match form.state {
                Some(code) if !code.trim().is_empty() => {
                    DashboardEvent::SelectState(code.trim().to_owned())
                }
                _ => {
                    return Err(Error::InvalidEvent(
                        "a state click must include the state code".to_owned(),
                    ));
                }
            },
        })
    }
}

/// Display the dashboard with a white map and nothing selected.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let mut session = lock_session(&state)?;
    let render = session.handle(DashboardEvent::Initial)?;

    let content = content_view(&render, session.views());

    Ok(dashboard_view(&content).into_response())
}

/// Apply a button press or state click and return the updated dashboard content.
pub async fn post_dashboard_event(
    State(state): State<DashboardState>,
    Form(form): Form<DashboardEventForm>,
) -> Response {
    let event = match DashboardEvent::try_from(form) {
        Ok(event) => event,
        Err(error) => return error.into_alert_response(),
    };

    let mut session = match lock_session(&state) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    tracing::debug!("Handling dashboard event {event:?}");

    match session.handle(event) {
        Ok(render) => content_view(&render, session.views()).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn lock_session(state: &DashboardState) -> Result<MutexGuard<'_, DashboardSession>, Error> {
    state
        .session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)
}

/// Renders the full dashboard page around `content`.
fn dashboard_view(content: &Markup) -> Markup {
    let page = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="my-1 text-2xl font-bold" { "Interactive US Contracts Map" }

            (controls_view())

            div id=(CONTENT_ID) class="w-full"
            {
                (content)
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        map_script(),
    ];

    base("Dashboard", &scripts, &page)
}

/// Generates the JavaScript that draws the map from the `data-*` attributes
/// of the map container and sends state clicks back to the server.
///
/// The map is redrawn after every htmx swap of the dashboard content.
fn map_script() -> HeadElement {
    let script = format!(
        r##"(function() {{
            let geoJson = null;

            async function loadMap() {{
                if (geoJson === null) {{
                    const response = await fetch("{geojson_path}");
                    geoJson = await response.json();
                    echarts.registerMap("{map_name}", geoJson);
                }}
            }}

            async function renderMap() {{
                const chartDom = document.getElementById("{map_id}");
                if (!chartDom) {{
                    return;
                }}

                await loadMap();

                const option = JSON.parse(chartDom.dataset.option);
                option.series[0].center = [
                    Number(chartDom.dataset.centerLon),
                    Number(chartDom.dataset.centerLat),
                ];
                option.series[0].zoom = Number(chartDom.dataset.zoom);
                const stateCodes = JSON.parse(chartDom.dataset.stateCodes);

                const chart = echarts.getInstanceByDom(chartDom) || echarts.init(chartDom);
                chart.setOption(option, true);
                chart.on("click", function(params) {{
                    const code = stateCodes[params.name];
                    if (!code) {{
                        return;
                    }}

                    htmx.ajax("POST", "{events_endpoint}", {{
                        target: "#{content_id}",
                        swap: "innerHTML",
                        values: {{ event: "state", state: code }},
                    }});
                }});
            }}

            function currentChart() {{
                const chartDom = document.getElementById("{map_id}");
                return chartDom && echarts.getInstanceByDom(chartDom);
            }}

            document.addEventListener("DOMContentLoaded", renderMap);
            window.addEventListener("resize", function() {{
                const chart = currentChart();
                if (chart) {{
                    chart.resize();
                }}
            }});
            document.addEventListener("htmx:beforeSwap", function(event) {{
                if (event.detail.target.id !== "{content_id}") {{
                    return;
                }}

                const chart = currentChart();
                if (chart) {{
                    chart.dispose();
                }}
            }});
            document.addEventListener("htmx:afterSwap", function(event) {{
                if (event.detail.target.id === "{content_id}") {{
                    renderMap();
                }}
            }});
        }})();"##,
        geojson_path = GEOJSON_PATH,
        map_name = MAP_NAME,
        map_id = MAP_ID,
        content_id = CONTENT_ID,
        events_endpoint = endpoints::DASHBOARD_EVENTS,
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use axum_extra::extract::Form;
    use maud::html;
    use scraper::{Html, Selector};

    use crate::{
        dashboard::{
            handlers::{DashboardEventForm, DashboardState, EventKind},
            session::{DashboardEvent, DashboardSession},
        },
        endpoints,
        state_view::test_utils::views_with,
    };

    use super::{dashboard_view, get_dashboard_page, post_dashboard_event};

    fn get_test_state(values: &[(&str, u64, u64)]) -> DashboardState {
        DashboardState {
            session: Arc::new(Mutex::new(DashboardSession::from_views(views_with(values)))),
        }
    }

    fn form(event: EventKind, state: Option<&str>) -> Form<DashboardEventForm> {
        Form(DashboardEventForm {
            event,
            state: state.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state(&[("CA", 1, 2)]);

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_exists(&html, "#us-map[data-option]");
        assert_exists(&html, "#controls button[value='combined']");
        assert_text_contains(
            &html,
            "#top-states",
            "Click a gradient button or state to see rankings",
        );
    }

    #[tokio::test]
    async fn page_load_clears_the_selection() {
        let state = get_test_state(&[]);
        state
            .session
            .lock()
            .unwrap()
            .handle(DashboardEvent::SelectState("OH".to_owned()))
            .unwrap();

        get_dashboard_page(State(state.clone())).await.unwrap();

        assert_eq!(state.session.lock().unwrap().views().selected(), None);
    }

    #[tokio::test]
    async fn state_click_returns_details_fragment() {
        let state = get_test_state(&[("NY", 4, 6)]);

        post_dashboard_event(State(state.clone()), form(EventKind::Combined, None)).await;
        let response =
            post_dashboard_event(State(state.clone()), form(EventKind::State, Some("NY"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_fragment(response).await;
        assert_text_contains(&html, "#state-info", "State: NY");
        assert_text_contains(&html, "#state-info", "Combined: 2");
        assert_text_contains(&html, "#top-states", "Selected state: NY");
        assert_eq!(
            state
                .session
                .lock()
                .unwrap()
                .views()
                .selected()
                .map(|view| view.code()),
            Some("NY")
        );
    }

    #[tokio::test]
    async fn red_button_returns_rankings() {
        let state = get_test_state(&[("TX", 8, 0), ("CA", 3, 0)]);

        let response = post_dashboard_event(State(state), form(EventKind::Red, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_fragment(response).await;
        assert_text_contains(&html, "#top-states", "Top 5 Red States");
        assert_text_contains(&html, "#top-states", "TX: 8");
    }

    #[tokio::test]
    async fn reset_button_clears_rankings() {
        let state = get_test_state(&[("TX", 8, 0)]);

        let response = post_dashboard_event(State(state), form(EventKind::Reset, None)).await;

        let html = parse_fragment(response).await;
        assert_text_contains(&html, "#top-states", "No rankings (white map)");
        assert_exists(&html, "#state-info[hidden]");
    }

    #[tokio::test]
    async fn unknown_state_returns_bad_request_alert() {
        let state = get_test_state(&[]);

        let response =
            post_dashboard_event(State(state), form(EventKind::State, Some("XX"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_fragment(response).await;
        assert_text_contains(&html, "div[role='alert']", "Unknown state");
    }

    #[tokio::test]
    async fn state_click_without_code_returns_bad_request_alert() {
        let state = get_test_state(&[]);

        let response = post_dashboard_event(State(state), form(EventKind::State, None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn dashboard_page_includes_map_script() {
        let page = dashboard_view(&html!(p { "content" })).into_string();

        let html = Html::parse_document(&page);
        assert_valid_html(&html);
        let scripts: String = html
            .select(&Selector::parse("script:not([src])").unwrap())
            .flat_map(|element| element.text())
            .collect();
        assert!(scripts.contains(endpoints::DASHBOARD_EVENTS), "{scripts}");
        assert!(scripts.contains("\"#dashboard-content\""), "{scripts}");
        assert!(scripts.contains("echarts.registerMap(\"USA\""), "{scripts}");
        assert!(scripts.contains("htmx:afterSwap"), "{scripts}");
        assert_exists(&html, "script[src='/static/echarts.6.0.0.min.js']");
    }

    #[test]
    fn event_form_parses_all_event_kinds() {
        let form: DashboardEventForm = serde_html_form::from_str("event=state&state=NY").unwrap();
        assert_eq!(form.event, EventKind::State);
        assert_eq!(form.state.as_deref(), Some("NY"));

        for kind in [
            EventKind::Red,
            EventKind::Green,
            EventKind::Combined,
            EventKind::Reset,
        ] {
            let form: DashboardEventForm =
                serde_html_form::from_str(&format!("event={}", kind.as_str())).unwrap();
            assert_eq!(form.event, kind);
            assert_eq!(form.state, None);
        }

        assert!(serde_html_form::from_str::<DashboardEventForm>("event=purple").is_err());
    }

    async fn parse_html(response: Response<Body>) -> Html {
        Html::parse_document(&body_text(response).await)
    }

    async fn parse_fragment(response: Response<Body>) -> Html {
        Html::parse_fragment(&body_text(response).await)
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

        String::from_utf8_lossy(&body).to_string()
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_exists(html: &Html, selector: &str) {
        let parsed = Selector::parse(selector).unwrap();
        assert!(
            html.select(&parsed).next().is_some(),
            "'{selector}' not found in {}",
            html.html()
        );
    }

    #[track_caller]
    fn assert_text_contains(html: &Html, selector: &str, expected: &str) {
        let parsed = Selector::parse(selector).unwrap();
        let text: String = html
            .select(&parsed)
            .flat_map(|element| element.text())
            .collect();
        assert!(
            text.contains(expected),
            "expected '{expected}' in '{selector}', got '{text}'"
        );
    }
}
