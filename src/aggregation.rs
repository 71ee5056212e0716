//! Counting how often each state appears in the persisted records.

use std::path::Path;

use crate::{
    Error,
    states::{STATE_COUNT, US_STATES, state_index},
    storage::{count_column_values, list_parquet_files},
};

/// The column holding the state where the work is performed.
pub const PLACE_OF_PERFORMANCE_COLUMN: &str = "pop_state_code";

/// The column holding the state of the recipient's location.
pub const RECIPIENT_LOCATION_COLUMN: &str = "recipient_location_state_code";

/// How many records mention a state in each of the two state columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Occurrences in [PLACE_OF_PERFORMANCE_COLUMN].
    pub place_of_performance: u64,
    /// Occurrences in [RECIPIENT_LOCATION_COLUMN].
    pub recipient_location: u64,
}

/// Counts for every one of the 50 states, zero if a state never appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCounts {
    counts: [Counts; STATE_COUNT],
}

impl Default for StateCounts {
    fn default() -> Self {
        Self {
            counts: [Counts::default(); STATE_COUNT],
        }
    }
}

impl StateCounts {
    /// The counts for `code`, or `None` if it is not one of the 50 states.
    pub fn get(&self, code: &str) -> Option<Counts> {
        state_index(code).map(|index| self.counts[index])
    }

    /// Iterate over (state code, counts) pairs in the order of [US_STATES].
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Counts)> + '_ {
        US_STATES
            .iter()
            .zip(self.counts.iter())
            .map(|(state, counts)| (state.code, *counts))
    }

    fn entry_mut(&mut self, code: &str) -> Option<&mut Counts> {
        state_index(code).map(|index| &mut self.counts[index])
    }
}

/// Scan every parquet file in `dir` and count the records per state.
///
/// Files without one or both of the state columns still contribute through
/// whichever column they do have. Codes that are not one of the 50 states,
/// such as territories, are ignored.
///
/// # Errors
/// Returns [Error::NoInputData] if `dir` has no parquet files, or an error if
/// a file cannot be read.
pub fn aggregate_state_counts(dir: &Path) -> Result<StateCounts, Error> {
    let files = list_parquet_files(dir)?;
    let mut state_counts = StateCounts::default();

    for file in &files {
        let mut columns = count_column_values(
            file,
            &[PLACE_OF_PERFORMANCE_COLUMN, RECIPIENT_LOCATION_COLUMN],
        )?
        .into_iter();

        if let Some(Some(place_of_performance)) = columns.next() {
            for (code, count) in place_of_performance {
                if let Some(counts) = state_counts.entry_mut(&code) {
                    counts.place_of_performance += count;
                }
            }
        }

        if let Some(Some(recipient_location)) = columns.next() {
            for (code, count) in recipient_location {
                if let Some(counts) = state_counts.entry_mut(&code) {
                    counts.recipient_location += count;
                }
            }
        }
    }

    tracing::info!("Aggregated state counts from {} files", files.len());

    Ok(state_counts)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use crate::{
        Error,
        aggregation::{Counts, StateCounts, aggregate_state_counts},
        fetch::test_utils::record,
        states::US_STATES,
        storage::write_records,
    };

    fn write_column(dir: &TempDir, file_name: &str, column: &str, codes: &[&str]) {
        let records: Vec<_> = codes
            .iter()
            .map(|code| record(json!({ "Award ID": "A", column: code })))
            .collect();
        write_records(&dir.path().join(file_name), &records).unwrap();
    }

    #[test]
    fn counts_each_column_separately_across_files() {
        let dir = TempDir::new().unwrap();
        write_column(&dir, "naics_1.parquet", "pop_state_code", &["CA", "CA", "TX"]);
        write_column(&dir, "naics_2.parquet", "recipient_location_state_code", &["TX"]);

        let counts = aggregate_state_counts(dir.path()).unwrap();

        assert_eq!(
            counts.get("CA"),
            Some(Counts {
                place_of_performance: 2,
                recipient_location: 0
            })
        );
        assert_eq!(
            counts.get("TX"),
            Some(Counts {
                place_of_performance: 1,
                recipient_location: 1
            })
        );
        for (code, state_counts) in counts.iter() {
            if code != "CA" && code != "TX" {
                assert_eq!(state_counts, Counts::default(), "{code}");
            }
        }
    }

    #[test]
    fn every_state_has_an_entry() {
        let dir = TempDir::new().unwrap();
        write_column(&dir, "naics_1.parquet", "pop_state_code", &["VA"]);

        let counts = aggregate_state_counts(dir.path()).unwrap();

        assert_eq!(counts.iter().count(), US_STATES.len());
        for state in &US_STATES {
            assert!(counts.get(state.code).is_some(), "{}", state.code);
        }
    }

    #[test]
    fn ignores_unknown_codes_and_nulls() {
        let dir = TempDir::new().unwrap();
        let records = vec![
            record(json!({ "pop_state_code": "PR", "recipient_location_state_code": "GU" })),
            record(json!({ "pop_state_code": null, "recipient_location_state_code": "ca" })),
            record(json!({ "pop_state_code": "NY", "recipient_location_state_code": "NY" })),
        ];
        write_records(&dir.path().join("naics_1.parquet"), &records).unwrap();

        let counts = aggregate_state_counts(dir.path()).unwrap();

        let mut expected = StateCounts::default();
        *expected.entry_mut("NY").unwrap() = Counts {
            place_of_performance: 1,
            recipient_location: 1,
        };
        assert_eq!(counts, expected);
    }

    #[test]
    fn file_without_state_columns_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        write_column(&dir, "naics_1.parquet", "Recipient Name", &["ACME"]);
        write_column(&dir, "naics_2.parquet", "pop_state_code", &["WA"]);

        let counts = aggregate_state_counts(dir.path()).unwrap();

        assert_eq!(counts.get("WA").unwrap().place_of_performance, 1);
    }

    #[test]
    fn aggregating_twice_gives_the_same_result() {
        let dir = TempDir::new().unwrap();
        write_column(&dir, "naics_1.parquet", "pop_state_code", &["CA", "OR", "CA"]);
        write_column(&dir, "naics_2.parquet", "recipient_location_state_code", &["OR"]);

        let first = aggregate_state_counts(dir.path()).unwrap();
        let second = aggregate_state_counts(dir.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_directory_is_no_input_data() {
        let dir = TempDir::new().unwrap();

        let result = aggregate_state_counts(dir.path());

        assert_eq!(result, Err(Error::NoInputData(dir.path().to_owned())));
    }
}
