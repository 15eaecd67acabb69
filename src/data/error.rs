use thiserror::Error;

/// Schema and value violations found while loading the accident table.
///
/// Any of these is fatal: the dashboard cannot start without a valid base
/// table. `row` counts data rows from 1, header excluded.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: '{value}' is not a valid value for '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {column} = {value} is out of range")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: i64,
    },

    #[error("row {row}: {year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        row: usize,
        year: i64,
        month: i64,
        day: i64,
    },
}
