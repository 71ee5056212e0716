//! The choropleth map as an ECharts chart.
//!
//! The chart is serialized to JSON and handed to the browser, which registers
//! the US states GeoJSON under [MAP_NAME] and calls `setOption` with it. The
//! view center and zoom travel next to the chart as [MapViewport].

use charming::{
    Chart,
    component::{VisualMap, VisualMapChannel},
    datatype::DataPointItem,
    element::{ItemStyle, Tooltip, Trigger},
    series::Map,
};

use crate::{
    state_view::{StateView, StateViews},
    states::{CONTINENTAL_CENTER, GeoPoint},
};

/// The name the US states GeoJSON is registered under in the browser.
pub const MAP_NAME: &str = "USA";

/// The path of the US states GeoJSON served as a static asset.
pub const GEOJSON_PATH: &str = "/static/us-states.json";

const SERIES_NAME: &str = "Contracts";
const NEUTRAL_COLOR: &str = "#ffffff";
const SELECTED_BORDER_COLOR: &str = "yellow";
const SELECTED_BORDER_WIDTH: f64 = 4.0;
const BORDER_COLOR: &str = "black";
const BORDER_WIDTH: f64 = 1.5;
const SELECTED_ZOOM: f64 = 2.5;
const DEFAULT_ZOOM: f64 = 0.8;

const WHITES: [&str; 2] = [NEUTRAL_COLOR, NEUTRAL_COLOR];
const REDS: [&str; 2] = ["#fff5f0", "#67000d"];
const GREENS: [&str; 2] = ["#f7fcf5", "#00441b"];
const RED_WHITE_GREEN: [&str; 3] = ["#d7191c", NEUTRAL_COLOR, "#1a9641"];

/// Which value the map is colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapColoring {
    /// Every state is white.
    Neutral,
    /// A white to red scale by awarded contracts.
    Red,
    /// A white to green scale by offered contracts.
    Green,
    /// A red-white-green scale by combined value, with zero in white.
    Combined,
}

impl MapColoring {
    fn value_of(self, view: &StateView) -> i64 {
        match self {
            MapColoring::Neutral => 0,
            MapColoring::Red => view.red() as i64,
            MapColoring::Green => view.green() as i64,
            MapColoring::Combined => view.combined(),
        }
    }

    /// The color scale, never empty so that ECharts always has a range.
    fn visual_map(self, views: &StateViews) -> VisualMap {
        let max_of = |metric: fn(&StateView) -> i64| {
            views.iter().map(metric).max().unwrap_or(0).max(1)
        };

        let (min, max, colors): (i64, i64, &[&str]) = match self {
            MapColoring::Neutral => (0, 1, &WHITES),
            MapColoring::Red => (0, max_of(|view| view.red() as i64), &REDS),
            MapColoring::Green => (0, max_of(|view| view.green() as i64), &GREENS),
            MapColoring::Combined => {
                let extent = max_of(|view| view.combined().abs());
                (-extent, extent, &RED_WHITE_GREEN)
            }
        };

        VisualMap::new()
            .show(false)
            .min(min as f64)
            .max(max as f64)
            .in_range(VisualMapChannel::new().color(colors.to_vec()))
    }
}

/// Where the map is centered and how far it is zoomed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    /// The point in the middle of the view.
    pub center: GeoPoint,
    /// The ECharts zoom factor.
    pub zoom: f64,
}

/// Zoom in on the selected state, or show the continental US.
pub fn map_viewport(views: &StateViews) -> MapViewport {
    match views.selected() {
        Some(view) => MapViewport {
            center: view.center(),
            zoom: SELECTED_ZOOM,
        },
        None => MapViewport {
            center: CONTINENTAL_CENTER,
            zoom: DEFAULT_ZOOM,
        },
    }
}

/// Build the map chart for `views` colored by `coloring`.
///
/// The selected state, if any, is outlined in yellow.
pub fn map_chart(views: &StateViews, coloring: MapColoring) -> Chart {
    let data: Vec<DataPointItem> = views
        .iter()
        .map(|view| {
            let (border_color, border_width) = if view.is_selected() {
                (SELECTED_BORDER_COLOR, SELECTED_BORDER_WIDTH)
            } else {
                (BORDER_COLOR, BORDER_WIDTH)
            };

            DataPointItem::new(coloring.value_of(view))
                .name(view.name())
                .item_style(
                    ItemStyle::new()
                        .border_color(border_color)
                        .border_width(border_width),
                )
        })
        .collect();

    let chart = Chart::new()
        .visual_map(coloring.visual_map(views))
        .series(
            Map::new()
                .name(SERIES_NAME)
                .map(MAP_NAME)
                .roam(true)
                .data(data),
        );

    match coloring {
        MapColoring::Neutral => chart,
        _ => chart.tooltip(Tooltip::new().trigger(Trigger::Item)),
    }
}
