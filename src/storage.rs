//! Persisting fetched records as parquet files and reading columns back.
//!
//! One file is written per category. Each file has exactly the columns that
//! appeared in its records, so different files may have different schemas.
//! Readers therefore look up the schema for the columns they want and treat a
//! missing column as empty instead of as an error.

use std::{
    collections::HashMap,
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};

use arrow::{
    array::{ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray},
    compute::{can_cast_types, cast},
    datatypes::{DataType, Field, Schema, SchemaRef},
};
use parquet::arrow::{
    ArrowWriter, ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder,
};
use serde_json::Value;

use crate::{Error, fetch::TransactionRecord};

/// The extension of category files.
pub const PARQUET_EXTENSION: &str = "parquet";

/// The file that holds the records for the category `naics_code`.
pub fn category_file_path(dir: &Path, naics_code: &str) -> PathBuf {
    dir.join(format!("naics_{naics_code}.{PARQUET_EXTENSION}"))
}

/// Get every parquet file directly inside `dir`, sorted by path.
///
/// # Errors
/// Returns [Error::NoInputData] if `dir` does not exist or holds no parquet
/// files, and [Error::Io] if it cannot be listed.
pub fn list_parquet_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::NoInputData(dir.to_owned()));
    }

    let entries = fs::read_dir(dir).map_err(io_error(dir))?;
    let mut files = Vec::new();

    for entry in entries {
        let path = entry.map_err(io_error(dir))?.path();

        if path.is_file()
            && path
                .extension()
                .is_some_and(|extension| extension == PARQUET_EXTENSION)
        {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Error::NoInputData(dir.to_owned()));
    }

    files.sort();
    Ok(files)
}

/// Write `records` to a parquet file at `path`, replacing any existing file.
///
/// The data is written to a temporary file next to `path` first and then
/// renamed over it, so a failed write never leaves a truncated file behind.
///
/// # Errors
/// Returns [Error::EmptyRecordSet] if `records` is empty, otherwise an error
/// if the file cannot be written.
pub fn write_records(path: &Path, records: &[TransactionRecord]) -> Result<(), Error> {
    if records.is_empty() {
        return Err(Error::EmptyRecordSet);
    }

    let batch = records_to_batch(records).map_err(parquet_error(path))?;
    let temp_path = path.with_extension(format!("{PARQUET_EXTENSION}.tmp"));

    let result = write_batch(&temp_path, &batch).and_then(|()| {
        fs::rename(&temp_path, path).map_err(io_error(path))
    });

    if result.is_err() {
        // Best effort, the write error is what gets reported.
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_batch(path: &Path, batch: &RecordBatch) -> Result<(), Error> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).map_err(parquet_error(path))?;
    writer.write(batch).map_err(parquet_error(path))?;
    writer.close().map_err(parquet_error(path))?;

    Ok(())
}

/// The storage type chosen for a column from the JSON values in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    /// Objects, arrays, or a mix of kinds, stored as JSON text.
    Json,
}

impl ColumnKind {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(_) => Some(ColumnKind::Text),
            Value::Number(number) if number.is_i64() => Some(ColumnKind::Integer),
            Value::Number(_) => Some(ColumnKind::Float),
            Value::Bool(_) => Some(ColumnKind::Boolean),
            Value::Array(_) | Value::Object(_) => Some(ColumnKind::Json),
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (ColumnKind::Integer, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Integer) => {
                ColumnKind::Float
            }
            _ => ColumnKind::Json,
        }
    }

    fn data_type(self) -> DataType {
        match self {
            ColumnKind::Text | ColumnKind::Json => DataType::Utf8,
            ColumnKind::Integer => DataType::Int64,
            ColumnKind::Float => DataType::Float64,
            ColumnKind::Boolean => DataType::Boolean,
        }
    }
}

/// Convert records to a single batch with one nullable column per field,
/// ordered by first appearance.
fn records_to_batch(records: &[TransactionRecord]) -> Result<RecordBatch, arrow::error::ArrowError> {
    let mut column_names: Vec<&str> = Vec::new();
    for record in records {
        for (name, _) in record.fields() {
            if !column_names.contains(&name.as_str()) {
                column_names.push(name);
            }
        }
    }

    let mut fields = Vec::with_capacity(column_names.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(column_names.len());

    for name in column_names {
        let values: Vec<Option<&Value>> = records.iter().map(|record| record.get(name)).collect();
        let kind = values
            .iter()
            .flatten()
            .filter_map(|value| ColumnKind::of(value))
            .reduce(ColumnKind::merge)
            .unwrap_or(ColumnKind::Text);

        fields.push(Field::new(name, kind.data_type(), true));
        columns.push(build_column(kind, &values));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn build_column(kind: ColumnKind, values: &[Option<&Value>]) -> ArrayRef {
    let non_null = values
        .iter()
        .map(|value| value.filter(|value| !value.is_null()));

    match kind {
        ColumnKind::Integer => Arc::new(Int64Array::from(
            non_null.map(|value| value.and_then(Value::as_i64)).collect::<Vec<_>>(),
        )),
        ColumnKind::Float => Arc::new(Float64Array::from(
            non_null.map(|value| value.and_then(Value::as_f64)).collect::<Vec<_>>(),
        )),
        ColumnKind::Boolean => Arc::new(BooleanArray::from(
            non_null.map(|value| value.and_then(Value::as_bool)).collect::<Vec<_>>(),
        )),
        ColumnKind::Text | ColumnKind::Json => Arc::new(StringArray::from(
            non_null
                .map(|value| {
                    value.map(|value| match value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                })
                .collect::<Vec<_>>(),
        )),
    }
}

/// A column that exists in a file and can be read as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
    /// Position of the column among the file's top-level columns.
    pub index: usize,
    /// How the column is stored.
    pub data_type: DataType,
}

/// Look for `name` in `schema`.
///
/// Returns `None` when the column is absent or holds values that cannot be
/// read as text, in which case the column contributes nothing.
pub fn find_text_column(schema: &Schema, name: &str) -> Option<TextColumn> {
    let (index, field) = schema.column_with_name(name)?;

    if !can_cast_types(field.data_type(), &DataType::Utf8) {
        tracing::debug!(
            "ignoring column \"{name}\" with non-text type {}",
            field.data_type()
        );
        return None;
    }

    Some(TextColumn {
        index,
        data_type: field.data_type().clone(),
    })
}

/// Count how often each distinct value occurs in each of `columns` in the file at `path`.
///
/// The result has one entry per requested column, in the same order. An
/// entry is `None` if the column is not in the file. Nulls are not counted.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid parquet.
pub fn count_column_values(
    path: &Path,
    columns: &[&str],
) -> Result<Vec<Option<HashMap<String, u64>>>, Error> {
    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_error(path))?;

    let found: Vec<Option<TextColumn>> = columns
        .iter()
        .map(|column| find_text_column(builder.schema(), column))
        .collect();
    let mut counts: Vec<Option<HashMap<String, u64>>> = found
        .iter()
        .map(|text_column| text_column.as_ref().map(|_| HashMap::new()))
        .collect();

    let indices: Vec<usize> = found
        .iter()
        .flatten()
        .map(|text_column| text_column.index)
        .collect();
    if indices.is_empty() {
        tracing::debug!("none of {columns:?} found in {}", path.display());
        return Ok(counts);
    }

    let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(parquet_error(path))?;

    for batch in reader {
        let batch = batch.map_err(parquet_error(path))?;

        for ((column, text_column), column_counts) in
            columns.iter().zip(&found).zip(counts.iter_mut())
        {
            let (Some(text_column), Some(column_counts), Some(array)) =
                (text_column, column_counts, batch.column_by_name(column))
            else {
                continue;
            };

            let text = if text_column.data_type == DataType::Utf8 {
                array.clone()
            } else {
                cast(array, &DataType::Utf8).map_err(parquet_error(path))?
            };
            for value in text.as_string::<i32>().iter().flatten() {
                *column_counts.entry(value.to_owned()).or_insert(0) += 1;
            }
        }
    }

    Ok(counts)
}

/// Read every batch of the file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid parquet.
pub fn read_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>), Error> {
    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_error(path))?;
    let schema = builder.schema().clone();

    let batches = builder
        .build()
        .map_err(parquet_error(path))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(parquet_error(path))?;

    Ok((schema, batches))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |error| Error::Io(path.to_owned(), error.to_string())
}

fn parquet_error<E: std::fmt::Display>(path: &Path) -> impl FnOnce(E) -> Error + '_ {
    move |error| Error::Parquet(path.to_owned(), error.to_string())
}
