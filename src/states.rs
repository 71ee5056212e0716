//! The fixed set of U.S. states shown on the map.
//!
//! Every per-state structure in the crate is keyed by this table, so a state
//! code that is not listed here is treated as foreign and ignored.

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Degrees north of the equator.
    pub lat: f64,
    /// Degrees east of the prime meridian (negative for the Americas).
    pub lon: f64,
}

/// A U.S. state and the point the map zooms to when it is selected.
#[derive(Debug, PartialEq)]
pub struct UsState {
    /// Two-letter USPS code, e.g. "CA".
    pub code: &'static str,
    /// The full name, which is how regions are named in the US states GeoJSON.
    pub name: &'static str,
    /// The approximate geographic center of the state.
    pub center: GeoPoint,
}

/// The number of states in [US_STATES].
pub const STATE_COUNT: usize = 50;

/// The map center used when no state is selected.
pub const CONTINENTAL_CENTER: GeoPoint = GeoPoint {
    lat: 36.0,
    lon: -96.0,
};

const fn state(code: &'static str, name: &'static str, lat: f64, lon: f64) -> UsState {
    UsState {
        code,
        name,
        center: GeoPoint { lat, lon },
    }
}

/// All 50 states in display order.
pub static US_STATES: [UsState; STATE_COUNT] = [
    state("AL", "Alabama", 32.8, -86.8),
    state("AK", "Alaska", 61.2, -149.9),
    state("AZ", "Arizona", 34.2, -111.7),
    state("AR", "Arkansas", 34.8, -92.3),
    state("CA", "California", 36.8, -119.4),
    state("CO", "Colorado", 39.0, -105.5),
    state("CT", "Connecticut", 41.6, -72.7),
    state("DE", "Delaware", 39.0, -75.5),
    state("FL", "Florida", 28.7, -82.6),
    state("GA", "Georgia", 32.5, -83.5),
    state("HI", "Hawaii", 20.7, -156.0),
    state("ID", "Idaho", 44.0, -114.0),
    state("IL", "Illinois", 40.0, -89.0),
    state("IN", "Indiana", 39.9, -86.3),
    state("IA", "Iowa", 42.0, -93.0),
    state("KS", "Kansas", 38.5, -98.0),
    state("KY", "Kentucky", 37.8, -85.0),
    state("LA", "Louisiana", 31.0, -92.0),
    state("ME", "Maine", 45.3, -69.0),
    state("MD", "Maryland", 39.0, -76.7),
    state("MA", "Massachusetts", 42.3, -71.8),
    state("MI", "Michigan", 44.3, -85.0),
    state("MN", "Minnesota", 46.0, -94.0),
    state("MS", "Mississippi", 33.0, -89.5),
    state("MO", "Missouri", 38.5, -92.0),
    state("MT", "Montana", 47.0, -109.5),
    state("NE", "Nebraska", 41.5, -99.5),
    state("NV", "Nevada", 39.5, -116.0),
    state("NH", "New Hampshire", 43.8, -71.5),
    state("NJ", "New Jersey", 40.1, -74.7),
    state("NM", "New Mexico", 34.5, -106.0),
    state("NY", "New York", 43.0, -75.0),
    state("NC", "North Carolina", 35.5, -79.0),
    state("ND", "North Dakota", 47.5, -100.5),
    state("OH", "Ohio", 40.0, -82.5),
    state("OK", "Oklahoma", 35.5, -97.5),
    state("OR", "Oregon", 44.0, -120.5),
    state("PA", "Pennsylvania", 41.0, -77.5),
    state("RI", "Rhode Island", 41.6, -71.5),
    state("SC", "South Carolina", 33.5, -80.5),
    state("SD", "South Dakota", 44.5, -100.0),
    state("TN", "Tennessee", 35.8, -86.5),
    state("TX", "Texas", 31.0, -100.0),
    state("UT", "Utah", 39.5, -111.5),
    state("VT", "Vermont", 44.0, -72.7),
    state("VA", "Virginia", 37.5, -78.5),
    state("WA", "Washington", 47.5, -120.5),
    state("WV", "West Virginia", 38.5, -80.5),
    state("WI", "Wisconsin", 44.5, -89.5),
    state("WY", "Wyoming", 43.0, -107.5),
];

/// Get the position of `code` in [US_STATES], or `None` for codes outside the
/// 50 states (territories, foreign codes, empty strings).
///
/// Codes are matched exactly, so "ca" is not "CA".
pub fn state_index(code: &str) -> Option<usize> {
    US_STATES.iter().position(|state| state.code == code)
}
