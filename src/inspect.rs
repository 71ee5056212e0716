//! A quick look inside a fetched parquet file.

use std::{
    collections::HashMap,
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use arrow::{array::RecordBatch, util::pretty::pretty_format_batches};

use crate::{
    Error,
    aggregation::PLACE_OF_PERFORMANCE_COLUMN,
    storage::{count_column_values, read_batches},
};

/// The number of rows shown in the preview.
pub const PREVIEW_ROWS: usize = 5;

/// The number of most common values listed for a column.
pub const TOP_VALUES: usize = 10;

/// The column holding the industry code of a transaction, if it was requested.
pub const NAICS_COLUMN: &str = "naics_code";

/// The name, type and fill rate of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    /// The column name.
    pub name: String,
    /// The arrow data type, e.g. "Utf8".
    pub data_type: String,
    /// How many rows have a value in this column.
    pub non_null: usize,
}

/// What [inspect_file] found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The inspected file.
    pub path: PathBuf,
    /// The number of rows in the file.
    pub row_count: usize,
    /// Every column in schema order.
    pub columns: Vec<ColumnSummary>,
    /// The first [PREVIEW_ROWS] rows as a text table.
    pub preview: String,
    /// The most common place of performance states, `None` if the column is missing.
    pub top_states: Option<Vec<(String, u64)>>,
    /// The most common NAICS codes, `None` if the column is missing.
    pub top_naics: Option<Vec<(String, u64)>>,
}

/// Summarize the parquet file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn inspect_file(path: &Path) -> Result<FileReport, Error> {
    let (schema, batches) = read_batches(path)?;

    let columns = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| ColumnSummary {
            name: field.name().clone(),
            data_type: field.data_type().to_string(),
            non_null: batches
                .iter()
                .map(|batch| {
                    let column = batch.column(index);
                    column.len() - column.null_count()
                })
                .sum(),
        })
        .collect();

    let preview = pretty_format_batches(&head(&batches, PREVIEW_ROWS))
        .map_err(|error| Error::Parquet(path.to_owned(), error.to_string()))?
        .to_string();

    let mut counts =
        count_column_values(path, &[PLACE_OF_PERFORMANCE_COLUMN, NAICS_COLUMN])?.into_iter();
    let top_states = counts.next().flatten().map(|counts| top_values(counts, TOP_VALUES));
    let top_naics = counts.next().flatten().map(|counts| top_values(counts, TOP_VALUES));

    Ok(FileReport {
        path: path.to_owned(),
        row_count: batches.iter().map(RecordBatch::num_rows).sum(),
        columns,
        preview,
        top_states,
        top_naics,
    })
}

/// The first `rows` rows of `batches`.
fn head(batches: &[RecordBatch], rows: usize) -> Vec<RecordBatch> {
    let mut remaining = rows;
    let mut head = Vec::new();

    for batch in batches {
        if remaining == 0 {
            break;
        }

        let take = remaining.min(batch.num_rows());
        head.push(batch.slice(0, take));
        remaining -= take;
    }

    head
}

/// The `n` most common values, most common first, ties in value order.
pub fn top_values(counts: HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut values: Vec<_> = counts.into_iter().collect();
    values.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
    values.truncate(n);

    values
}

impl Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        writeln!(f, "Columns in {file_name}:")?;
        for column in &self.columns {
            writeln!(
                f,
                "  {:<32} {:<10} {} non-null",
                column.name, column.data_type, column.non_null
            )?;
        }
        writeln!(f, "{} rows", self.row_count)?;

        writeln!(f, "\nFirst {PREVIEW_ROWS} rows:")?;
        writeln!(f, "{}", self.preview)?;

        match &self.top_states {
            Some(states) => {
                writeln!(f, "\nTop {TOP_VALUES} states by number of contracts in {file_name}:")?;
                write_counts(f, states)?;
            }
            None => writeln!(
                f,
                "\nColumn '{PLACE_OF_PERFORMANCE_COLUMN}' not found in this file. Check your column names."
            )?,
        }

        if let Some(naics) = &self.top_naics {
            writeln!(f, "\nNAICS codes present in this file:")?;
            write_counts(f, naics)?;
        }

        Ok(())
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[(String, u64)]) -> fmt::Result {
    for (value, count) in counts {
        writeln!(f, "  {value:<10} {count}")?;
    }

    Ok(())
}
