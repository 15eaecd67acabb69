use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    required_columns, AccidentDataset, AccidentRecord, CategoricalField, Coordinates,
    NumericField, LATITUDE_COLUMN, LONGITUDE_COLUMN, MISSING_LABEL,
};

const MAX_AGE: i64 = 120;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the accident table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated, header row with the exact column names
/// * `.json`    – `[{ "gravite accident": "...", "age": 34, ... }, ...]`
/// * `.parquet` – one column per field (text, integer or float)
///
/// Every record is validated here so the rest of the program can rely on
/// typed, in-range values.
pub fn load_file(path: &Path) -> Result<AccidentDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut stats = LoadStats::default();
    let records = match ext.as_str() {
        "csv" => load_csv(path, &mut stats)?,
        "json" => load_json(path, &mut stats)?,
        "parquet" | "pq" => load_parquet(path, &mut stats)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    if stats.missing_ages > 0 {
        log::warn!(
            "{} records have no age; excluded from age statistics",
            stats.missing_ages
        );
    }
    if stats.discarded_coordinates > 0 {
        log::warn!(
            "{} records have coordinates outside France or incomplete; excluded from maps",
            stats.discarded_coordinates
        );
    }

    let dataset = AccidentDataset::from_records(records);
    log::info!(
        "Loaded {} records ({} located) from {}",
        dataset.len(),
        dataset.located_count(),
        path.display()
    );
    Ok(dataset)
}

#[derive(Debug, Default)]
struct LoadStats {
    discarded_coordinates: usize,
    missing_ages: usize,
}

// ---------------------------------------------------------------------------
// Cell – one raw value before validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl Cell {
    fn from_text(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            Cell::Null
        } else {
            Cell::Text(t.to_string())
        }
    }

    fn from_float(v: f64) -> Self {
        if v.is_nan() {
            Cell::Null
        } else {
            Cell::Float(v)
        }
    }

    fn into_text(self) -> Option<String> {
        // Pandas writes integer codes as floats once a column holds a NaN.
        fn integral(v: f64) -> Option<String> {
            (v.is_finite() && v.fract() == 0.0).then(|| format!("{v:.0}"))
        }
        match self {
            Cell::Text(s) if s.contains('.') => {
                Some(s.parse::<f64>().ok().and_then(integral).unwrap_or(s))
            }
            Cell::Text(s) => Some(s),
            Cell::Integer(i) => Some(i.to_string()),
            Cell::Float(v) => Some(integral(v).unwrap_or_else(|| v.to_string())),
            Cell::Null => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        fn integral(v: f64) -> Option<i64> {
            (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
        }
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Float(v) => integral(*v),
            Cell::Text(s) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral)),
            Cell::Null => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        let v = match self {
            Cell::Float(v) => *v,
            Cell::Integer(i) => *i as f64,
            Cell::Text(s) => s.replace(',', ".").parse::<f64>().ok()?,
            Cell::Null => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record validation
// ---------------------------------------------------------------------------

/// Build one validated record. `row` is the 1-based data row (the header
/// excluded); `cell` returns the raw value of a column for that row
/// ([`Cell::Null`] when absent).
fn build_record(
    row: usize,
    stats: &mut LoadStats,
    cell: impl Fn(&'static str) -> Cell,
) -> Result<AccidentRecord, LoadError> {
    let text = |field: CategoricalField| {
        cell(field.column())
            .into_text()
            .unwrap_or_else(|| MISSING_LABEL.to_string())
    };
    let integer = |field: NumericField,
                   range: RangeInclusive<i64>|
     -> Result<Option<i64>, LoadError> {
        let column = field.column();
        let raw = cell(column);
        if raw == Cell::Null {
            return Ok(None);
        }
        let value = raw.as_integer().ok_or_else(|| LoadError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
        })?;
        if !range.contains(&value) {
            return Err(LoadError::OutOfRange { row, column, value });
        }
        Ok(Some(value))
    };
    let required = |field: NumericField, range: RangeInclusive<i64>| -> Result<i64, LoadError> {
        integer(field, range)?.ok_or(LoadError::MissingValue {
            row,
            column: field.column(),
        })
    };

    // Age is optional: a row without it still counts everywhere else.
    let age = integer(NumericField::Age, 0..=MAX_AGE)?;
    if age.is_none() {
        stats.missing_ages += 1;
    }
    let hour = required(NumericField::Hour, 0..=23)?;
    let month = required(NumericField::Month, 1..=12)?;
    let year = required(NumericField::Year, 1900..=2100)?;
    let day = required(NumericField::Day, 1..=31)?;

    // Ranges above keep the casts lossless.
    if NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).is_none() {
        return Err(LoadError::InvalidDate {
            row,
            year,
            month,
            day,
        });
    }

    let lat = cell(LATITUDE_COLUMN).as_float();
    let lon = cell(LONGITUDE_COLUMN).as_float();
    let coordinates = match (lat, lon) {
        (None, None) => None,
        (Some(lat), Some(lon)) => {
            let c = Coordinates::within_france(lat, lon);
            if c.is_none() {
                stats.discarded_coordinates += 1;
            }
            c
        }
        _ => {
            stats.discarded_coordinates += 1;
            None
        }
    };

    Ok(AccidentRecord {
        severity: text(CategoricalField::Severity),
        motive: text(CategoricalField::Motive),
        age: age.map(|a| a as u32),
        sex: text(CategoricalField::Sex),
        hour: hour as u32,
        weekday: text(CategoricalField::Weekday),
        day: day as u32,
        month: month as u32,
        year: year as i32,
        department: text(CategoricalField::Department),
        coordinates,
        atmosphere: text(CategoricalField::Atmosphere),
        safety_equipment: text(CategoricalField::SafetyEquipment),
        maneuver: text(CategoricalField::Maneuver),
    })
}

/// Map each required column to its position, failing on the first one
/// that is absent.
fn column_index<'a>(
    names: impl Iterator<Item = &'a str>,
) -> Result<HashMap<&'static str, usize>, LoadError> {
    let names: Vec<&str> = names
        .map(|n| n.trim_start_matches('\u{feff}').trim())
        .collect();
    required_columns()
        .into_iter()
        .map(|col| {
            names
                .iter()
                .position(|n| *n == col)
                .map(|i| (col, i))
                .ok_or(LoadError::MissingColumn(col))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, stats: &mut LoadStats) -> Result<Vec<AccidentRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(BufReader::new(file), stats)
}

/// CSV layout: header row with the exact column names, extra columns
/// ignored.
fn read_csv<R: Read>(input: R, stats: &mut LoadStats) -> Result<Vec<AccidentRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index = column_index(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        let rec = build_record(row_no + 1, stats, |column| {
            index
                .get(column)
                .and_then(|&i| record.get(i))
                .map_or(Cell::Null, Cell::from_text)
        })?;
        records.push(rec);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path, stats: &mut LoadStats) -> Result<Vec<AccidentRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, stats)
}

/// Records-oriented layout, as written by `df.to_json(orient="records")`.
fn parse_json(text: &str, stats: &mut LoadStats) -> Result<Vec<AccidentRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        column_index(first.keys().map(String::as_str))?;
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        let rec = build_record(i + 1, stats, |column| {
            obj.get(column).map_or(Cell::Null, json_to_cell)
        })?;
        records.push(rec);
    }
    Ok(records)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::from_text(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::from_float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); categorical columns may be
/// dictionary-encoded.
fn load_parquet(path: &Path, stats: &mut LoadStats) -> Result<Vec<AccidentRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let index = column_index(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let columns: HashMap<&'static str, ArrayRef> = index
            .iter()
            .map(|(&name, &i)| -> Result<(&'static str, ArrayRef)> {
                Ok((name, normalize_column(batch.column(i))?))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let rec = build_record(row_no, stats, |column| {
                columns
                    .get(column)
                    .map_or(Cell::Null, |col| extract_cell(col, row))
            })?;
            records.push(rec);
        }
    }
    Ok(records)
}

/// Decode dictionary / view / boolean columns to plain UTF-8 once per batch.
fn normalize_column(col: &ArrayRef) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, _) | DataType::Utf8View | DataType::Boolean => {
            cast(col, &DataType::Utf8).context("decoding parquet column to text")
        }
        _ => Ok(Arc::clone(col)),
    }
}

/// Extract a single raw value from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::from_text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::from_text(col.as_string::<i64>().value(row)),
        DataType::Int8 => Cell::Integer(i64::from(col.as_primitive::<Int8Type>().value(row))),
        DataType::Int16 => Cell::Integer(i64::from(col.as_primitive::<Int16Type>().value(row))),
        DataType::Int32 => Cell::Integer(i64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Cell::Integer(i64::from(col.as_primitive::<UInt8Type>().value(row))),
        DataType::UInt16 => Cell::Integer(i64::from(col.as_primitive::<UInt16Type>().value(row))),
        DataType::UInt32 => Cell::Integer(i64::from(col.as_primitive::<UInt32Type>().value(row))),
        DataType::UInt64 => i64::try_from(col.as_primitive::<UInt64Type>().value(row))
            .map_or(Cell::Null, Cell::Integer),
        DataType::Float32 => {
            Cell::from_float(f64::from(col.as_primitive::<Float32Type>().value(row)))
        }
        DataType::Float64 => Cell::from_float(col.as_primitive::<Float64Type>().value(row)),
        other => Cell::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "gravite accident,motif deplacement,age,sexe,heure,jour,num_jour,num_mois,annee,departement,lat,lon,conditions atmosperiques,existence securite,manoeuvre avant accident";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text
    }

    fn parse(text: &str) -> Result<Vec<AccidentRecord>> {
        read_csv(text.as_bytes(), &mut LoadStats::default())
    }

    #[test]
    fn reads_typed_records() {
        let text = csv_with(&[
            "Blessé léger,Domicile – travail,47,M,8,lundi,3,5,2010,75,48.85,2.35,Normale,Oui,Tournant à gauche",
            "Tué,,19,F,23,samedi,29,2,2012,13,,,Pluie forte,Non,Changeant de file",
        ]);
        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.severity, "Blessé léger");
        assert_eq!(first.age, Some(47));
        assert_eq!(first.hour, 8);
        assert_eq!((first.day, first.month, first.year), (3, 5, 2010));
        assert_eq!(first.coordinates, Some(Coordinates::new(48.85, 2.35)));

        let second = &records[1];
        assert_eq!(second.motive, MISSING_LABEL);
        assert_eq!(second.coordinates, None);
        assert_eq!(second.department, "13");
    }

    #[test]
    fn extra_columns_and_reordering_are_accepted() {
        let text = "Num_Acc,lon,lat,manoeuvre avant accident,existence securite,conditions atmosperiques,departement,annee,num_mois,num_jour,jour,heure,sexe,age,motif deplacement,gravite accident\n\
                    201000001,2.35,48.85,Arrêté,Oui,Normale,75,2010,1,1,vendredi,0,M,5,Loisirs,Indemne";
        let records = parse(text).unwrap();
        assert_eq!(records[0].severity, "Indemne");
        assert_eq!(records[0].maneuver, "Arrêté");
        assert_eq!(records[0].age, Some(5));
    }

    #[test]
    fn coordinates_outside_france_become_absent() {
        let text = csv_with(&[
            "Indemne,Loisirs,30,M,10,lundi,1,1,2010,974,-21.1,55.5,Normale,Oui,Arrêté",
            "Indemne,Loisirs,30,M,10,lundi,1,1,2010,75,48.85,,Normale,Oui,Arrêté",
        ]);
        let mut stats = LoadStats::default();
        let records = read_csv(text.as_bytes(), &mut stats).unwrap();
        assert!(records.iter().all(|r| r.coordinates.is_none()));
        assert_eq!(stats.discarded_coordinates, 2);
    }

    #[test]
    fn missing_column_fails_fast() {
        let text = HEADER.replace(",heure", "");
        let err = parse(&text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::MissingColumn("heure"))
        );
    }

    #[test]
    fn invalid_calendar_day_is_rejected() {
        let text = csv_with(&[
            "Indemne,Loisirs,30,M,10,lundi,30,2,2011,75,48.85,2.35,Normale,Oui,Arrêté",
        ]);
        let err = parse(&text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::InvalidDate {
                row: 1,
                year: 2011,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn hour_out_of_range_is_rejected() {
        let text = csv_with(&[
            "Indemne,Loisirs,30,M,24,lundi,1,2,2011,75,48.85,2.35,Normale,Oui,Arrêté",
        ]);
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::OutOfRange {
                column: "heure",
                value: 24,
                ..
            })
        ));
    }

    #[test]
    fn empty_age_keeps_the_row() {
        let text = csv_with(&[
            "Indemne,Loisirs,30,M,2,lundi,1,2,2011,75,,,Normale,Oui,Arrêté",
            "Tué,Loisirs,,M,2,lundi,1,2,2011,75,,,Normale,Oui,Arrêté",
        ]);
        let mut stats = LoadStats::default();
        let records = read_csv(text.as_bytes(), &mut stats).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, Some(30));
        assert_eq!(records[1].age, None);
        assert_eq!(records[1].severity, "Tué");
        assert_eq!(stats.missing_ages, 1);
    }

    #[test]
    fn missing_hour_and_garbage_values_are_rejected() {
        let missing = csv_with(&[
            "Indemne,Loisirs,30,M,10,lundi,1,2,2011,75,,,Normale,Oui,Arrêté",
            "Indemne,Loisirs,30,M,,lundi,1,2,2011,75,,,Normale,Oui,Arrêté",
        ]);
        assert_eq!(
            parse(&missing).unwrap_err().downcast_ref::<LoadError>(),
            Some(&LoadError::MissingValue {
                row: 2,
                column: "heure"
            })
        );

        let garbage = csv_with(&["Indemne,Loisirs,abc,M,2,lundi,1,2,2011,75,,,Normale,Oui,Arrêté"]);
        assert!(matches!(
            parse(&garbage).unwrap_err().downcast_ref::<LoadError>(),
            Some(LoadError::InvalidValue { column: "age", .. })
        ));
    }

    #[test]
    fn json_records_accept_numeric_codes() {
        let text = r#"[
            {"gravite accident": "Tué", "motif deplacement": "Loisirs", "age": 61.0,
             "sexe": "M", "heure": 17, "jour": "dimanche", "num_jour": 4, "num_mois": 7,
             "annee": 2015, "departement": 75, "lat": 48.86, "lon": 2.34,
             "conditions atmosperiques": "Normale", "existence securite": null,
             "manoeuvre avant accident": "Arrêté"}
        ]"#;
        let records = parse_json(text, &mut LoadStats::default()).unwrap();
        assert_eq!(records[0].department, "75");
        assert_eq!(records[0].age, Some(61));
        assert_eq!(records[0].safety_equipment, MISSING_LABEL);
    }

    #[test]
    fn float_formatted_codes_in_csv_become_integers() {
        let text = csv_with(&[
            "Indemne,Loisirs,47.0,M,8.0,lundi,3,5,2010,75.0,48.85,2.35,Normale,Oui,Arrêté",
            "Indemne,Loisirs,47,M,8,lundi,3,5,2010,2A,48.85,2.35,Normale,Oui,Arrêté",
        ]);
        let records = parse(&text).unwrap();
        assert_eq!(records[0].department, "75");
        assert_eq!(records[0].age, Some(47));
        assert_eq!(records[1].department, "2A");

        let rows: Vec<&AccidentRecord> = records.iter().collect();
        let paris = crate::data::filter::apply(&rows, &crate::data::heat::paris_filter());
        assert_eq!(paris.len(), 1);
    }

    #[test]
    fn json_missing_column_fails_fast() {
        let text = r#"[{"gravite accident": "Tué"}]"#;
        let err = parse_json(text, &mut LoadStats::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(_))
        ));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let text = csv_with(&[
            "Indemne,Loisirs,30,M,10,lundi,1,1,2010,75,48.85,2.35,Normale,Oui,Arrêté",
        ]);
        file.write_all(text.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.located_count(), 1);

        let err = load_file(Path::new("clean.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::UnsupportedExtension("xlsx".into()))
        );
        assert!(load_file(Path::new("/nonexistent/clean.csv")).is_err());
    }

    #[test]
    fn reads_parquet_with_integer_columns() {
        let text_columns = [
            ("gravite accident", "Blessé hospitalisé"),
            ("motif deplacement", "Loisirs"),
            ("sexe", "F"),
            ("jour", "mardi"),
            ("departement", "92"),
            ("conditions atmosperiques", "Normale"),
            ("existence securite", "Oui"),
            ("manoeuvre avant accident", "Arrêté"),
        ];
        let int_columns = [
            ("age", 52_i64),
            ("heure", 18),
            ("num_jour", 9),
            ("num_mois", 3),
            ("annee", 2016),
        ];

        let mut fields = Vec::new();
        let mut arrays: Vec<ArrayRef> = Vec::new();
        for (name, value) in text_columns {
            fields.push(Field::new(name, DataType::Utf8, true));
            arrays.push(Arc::new(StringArray::from(vec![value])));
        }
        for (name, value) in int_columns {
            fields.push(Field::new(name, DataType::Int64, false));
            arrays.push(Arc::new(Int64Array::from(vec![value])));
        }
        fields.push(Field::new("lat", DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(vec![Some(48.89)])));
        fields.push(Field::new("lon", DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(vec![Some(2.24)])));

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.severity, "Blessé hospitalisé");
        assert_eq!(rec.department, "92");
        assert_eq!((rec.day, rec.month, rec.year), (9, 3, 2016));
        assert_eq!(rec.coordinates, Some(Coordinates::new(48.89, 2.24)));
    }
}
