//! The constants that describe what is fetched and how politely.

use std::{path::PathBuf, time::Duration};

use time::{Date, macros::date};

use crate::fetch::SortOrder;

/// The USAspending transaction search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://api.usaspending.gov/api/v2/search/spending_by_transaction/";

/// Contract award types: BPA calls, purchase orders, delivery orders and definitive contracts.
pub const AWARD_TYPE_CODES: [&str; 4] = ["A", "B", "C", "D"];

/// Defense-related industry codes, one output file each.
pub const DEFENSE_NAICS: [&str; 18] = [
    // Aerospace & vehicles
    "336411", // Aircraft Manufacturing
    "336412", // Aircraft Engine & Engine Parts
    "336413", // Other Aircraft Parts
    "336414", // Guided Missile & Space Vehicle Manufacturing
    "336415", // Space Vehicle Propulsion
    "336419", // Other Guided Missile / Space Manufacturing
    // Weapons & ordnance
    "332992", // Small Arms Ammunition
    "332993", // Ammunition (except Small Arms)
    "332994", // Small Arms, Ordnance, Accessories
    "332995", // Other Ordnance & Accessories
    // Electronics & sensors
    "334511", // Search, Detection, Navigation, Guidance
    "334512", // Automatic Environmental Controls
    "334515", // Instrument Manufacturing
    "334419", // Other Electronic Component Manufacturing
    // Vehicles & shipbuilding
    "336992", // Military Armored Vehicle Manufacturing
    "336611", // Ship Building and Repairing
    // Precision & machining
    "332710", // Machine Shops
    "332721", // Precision Turned Products
];

/// The columns requested for every transaction.
pub const REQUESTED_FIELDS: [&str; 19] = [
    "Award ID",
    "Mod",
    "Recipient Name",
    "Recipient UEI",
    "Recipient Location",
    "Primary Place of Performance",
    "Action Date",
    "Transaction Amount",
    "Transaction Description",
    "Awarding Agency",
    "Awarding Sub Agency",
    "Award Type",
    "NAICS",
    "PSC",
    "pop_state_code",
    "recipient_location_state_code",
    "pop_city_name",
    "recipient_location_city_name",
    "Funding Agency",
];

const DEFAULT_OUTPUT_DIR: &str = "usa_spending_defense";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(300);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SORT_FIELD: &str = "Transaction Amount";

/// Everything the fetcher needs to know about a run, except how to retry.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// The URL that search requests are POSTed to.
    pub endpoint: String,
    /// Where the `naics_<code>.parquet` files are written.
    pub output_dir: PathBuf,
    /// The NAICS codes to fetch, in order.
    pub naics_codes: Vec<String>,
    /// The fields requested for each transaction.
    pub fields: Vec<String>,
    /// The award type codes to filter on.
    pub award_type_codes: Vec<String>,
    /// First award date (inclusive).
    pub start_date: Date,
    /// Last award date (inclusive).
    pub end_date: Date,
    /// Number of records per page.
    pub page_size: u32,
    /// The field results are sorted by.
    pub sort_field: String,
    /// The direction results are sorted in.
    pub sort_order: SortOrder,
    /// Pause after each successful page.
    pub page_delay: Duration,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: SEARCH_ENDPOINT.to_owned(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            naics_codes: DEFENSE_NAICS.iter().map(|&code| code.to_owned()).collect(),
            fields: REQUESTED_FIELDS.iter().map(|&field| field.to_owned()).collect(),
            award_type_codes: AWARD_TYPE_CODES.iter().map(|&code| code.to_owned()).collect(),
            start_date: date!(2023 - 01 - 01),
            end_date: date!(2025 - 12 - 31),
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.to_owned(),
            sort_order: SortOrder::Desc,
            page_delay: DEFAULT_PAGE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
