//! The JSON request and response bodies of the transaction search API.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use time::Date;

use crate::fetch::FetchConfig;

/// The body POSTed to the search endpoint for one page of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Which transactions to return.
    pub filters: SearchFilters,
    /// The columns returned for each transaction.
    pub fields: Vec<String>,
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
    /// The field to sort by.
    pub sort: String,
    /// The sort direction.
    pub order: SortOrder,
}

/// The filters of a search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFilters {
    /// Contract award types.
    pub award_type_codes: Vec<String>,
    /// Industry codes, a single code per request here.
    pub naics_codes: Vec<String>,
    /// The inclusive range of award dates.
    pub award_date_range: AwardDateRange,
}

/// An inclusive range of award dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardDateRange {
    /// The first day.
    #[serde(serialize_with = "serialize_date")]
    pub start_date: Date,
    /// The last day.
    #[serde(serialize_with = "serialize_date")]
    pub end_date: Date,
}

/// The direction results are sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Dates go over the wire as "YYYY-MM-DD".
fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

impl SearchRequest {
    /// Build the request for `page` of the category `naics_code`.
    pub fn for_page(config: &FetchConfig, naics_code: &str, page: u32) -> Self {
        Self {
            filters: SearchFilters {
                award_type_codes: config.award_type_codes.clone(),
                naics_codes: vec![naics_code.to_owned()],
                award_date_range: AwardDateRange {
                    start_date: config.start_date,
                    end_date: config.end_date,
                },
            },
            fields: config.fields.clone(),
            page,
            limit: config.page_size,
            sort: config.sort_field.clone(),
            order: config.sort_order,
        }
    }
}

/// One row returned by the API.
///
/// The row is kept as the raw JSON object so that it can be persisted
/// verbatim; only the state code columns are interpreted downstream.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TransactionRecord(pub Map<String, Value>);

impl TransactionRecord {
    /// The value of `field`, if the row has it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Every field of the row in the order the API sent them.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// A page of search results. An empty `results` array marks the end of pagination.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchPage {
    /// The rows of this page.
    #[serde(default)]
    pub results: Vec<TransactionRecord>,
}
