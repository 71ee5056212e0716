//! Dashboard module
//!
//! Provides the interactive map of defense contracts per state, with buttons
//! for choosing the coloring, a rankings panel and a detail panel for the
//! clicked state.

mod handlers;
mod map;
mod panels;
mod ranking;
mod session;

pub use handlers::{DashboardEventForm, DashboardState, EventKind, get_dashboard_page, post_dashboard_event};
pub use map::{GEOJSON_PATH, MAP_NAME, MapColoring, MapViewport, map_chart, map_viewport};
pub use ranking::{RANKING_SIZE, RankedState, Rankings};
pub use session::{DashboardEvent, DashboardRender, DashboardSession};
