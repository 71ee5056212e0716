//! The dashboard's markup: buttons, map container, rankings and state details.

use maud::{Markup, html};
use serde_json::Value;

use crate::{
    dashboard::{
        handlers::EventKind,
        map::{map_chart, map_viewport},
        ranking::{RankedState, Rankings},
        session::DashboardRender,
    },
    endpoints,
    html::{BUTTON_STYLE, PANEL_HEADING_STYLE, PANEL_STYLE, PANEL_SUBHEADING_STYLE},
    state_view::{StateView, StateViews},
};

/// The ID of the element whose content is replaced after each event.
pub(super) const CONTENT_ID: &str = "dashboard-content";

/// The ID of the map container.
pub(super) const MAP_ID: &str = "us-map";

const PROMPT_TEXT: &str = "Click a gradient button or state to see rankings";
const CLEARED_TEXT: &str = "No rankings (white map)";

/// The four buttons that choose how the map is colored.
pub(super) fn controls_view() -> Markup {
    let buttons = [
        (EventKind::Red, "Show Completed (Red)"),
        (EventKind::Green, "Show Offered (Green)"),
        (EventKind::Combined, "Show Combined"),
        (EventKind::Reset, "Reset White"),
    ];

    html!(
        div id="controls" class="flex flex-wrap gap-2 mb-2"
        {
            @for (event, label) in buttons {
                button
                    type="button"
                    name="event"
                    value=(event.as_str())
                    hx-post=(endpoints::DASHBOARD_EVENTS)
                    hx-target={ "#" (CONTENT_ID) }
                    hx-target-error="#alert-container"
                    hx-swap="innerHTML"
                    class=(BUTTON_STYLE)
                {
                    (label)
                }
            }
        }
    )
}

/// The map and the side panels for one render of the dashboard.
pub(super) fn content_view(render: &DashboardRender, views: &StateViews) -> Markup {
    let option = map_chart(views, render.coloring).to_string();
    let viewport = map_viewport(views);
    // The map reports clicks by state name, the server expects codes.
    let state_codes: serde_json::Map<String, Value> = views
        .iter()
        .map(|view| (view.name().to_owned(), Value::from(view.code())))
        .collect();

    html!(
        div class="flex flex-col lg:flex-row gap-4 w-full"
        {
            div
                id=(MAP_ID)
                data-option=(option)
                data-center-lon=(viewport.center.lon)
                data-center-lat=(viewport.center.lat)
                data-zoom=(viewport.zoom)
                data-state-codes=(Value::Object(state_codes).to_string())
                class="flex-1 min-h-[600px] h-[calc(100vh-120px)] rounded bg-white"
            {}

            aside class="flex flex-col gap-4 lg:w-[280px]"
            {
                (rankings_view(&render.rankings))
                (detail_view(render.detail.as_ref()))
            }
        }
    )
}

fn rankings_view(rankings: &Rankings) -> Markup {
    html!(
        div id="top-states" class=(PANEL_STYLE)
        {
            @match rankings {
                Rankings::Prompt => {
                    p { (PROMPT_TEXT) }
                }
                Rankings::Cleared => {
                    p { (CLEARED_TEXT) }
                }
                Rankings::Selected(code) => {
                    p { "Selected state: " (code) }
                }
                Rankings::TopRed(states) => {
                    h4 class=(PANEL_HEADING_STYLE) { "Top 5 Red States" }
                    (ranked_list(states, false))
                }
                Rankings::TopGreen(states) => {
                    h4 class=(PANEL_HEADING_STYLE) { "Top 5 Green States" }
                    (ranked_list(states, false))
                }
                Rankings::Extremes { most_offered, most_completed } => {
                    h4 class=(PANEL_HEADING_STYLE) { "Most Extreme" }

                    div class="mb-2"
                    {
                        h5 class=(PANEL_SUBHEADING_STYLE) { "More Offered" }
                        (ranked_list(most_offered, true))
                    }

                    div
                    {
                        h5 class=(PANEL_SUBHEADING_STYLE) { "More Completed" }
                        (ranked_list(most_completed, false))
                    }
                }
            }
        }
    )
}

fn ranked_list(states: &[RankedState], show_plus_sign: bool) -> Markup {
    html!(
        ol class="list-decimal list-inside"
        {
            @for state in states {
                li
                {
                    @if show_plus_sign && state.value > 0 {
                        (state.code) ": +" (state.value)
                    } @else {
                        (state.code) ": " (state.value)
                    }
                }
            }
        }
    )
}

fn detail_view(detail: Option<&StateView>) -> Markup {
    html!(
        @match detail {
            Some(view) => {
                div id="state-info" class=(PANEL_STYLE)
                {
                    h4 class=(PANEL_HEADING_STYLE) { "State: " (view.code()) }
                    p { "Awarded Contracts: " (view.red()) }
                    p { "Offered Contracts: " (view.green()) }
                    p { "Combined: " (view.combined()) }
                }
            }
            None => {
                div id="state-info" class={ (PANEL_STYLE) " hidden" } hidden {}
            }
        }
    )
}
