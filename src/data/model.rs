use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Label stored in place of an empty categorical cell.
pub const MISSING_LABEL: &str = "(missing)";

pub const LATITUDE_COLUMN: &str = "lat";
pub const LONGITUDE_COLUMN: &str = "lon";

/// Bounding region of continental France, Corsica included.
pub const FRANCE_LAT_RANGE: (f64, f64) = (41.0, 51.5);
pub const FRANCE_LON_RANGE: (f64, f64) = (-5.5, 10.0);

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Text-valued columns of the accident table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CategoricalField {
    Severity,
    Motive,
    Sex,
    Weekday,
    Department,
    Atmosphere,
    SafetyEquipment,
    Maneuver,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 8] = [
        CategoricalField::Severity,
        CategoricalField::Motive,
        CategoricalField::Sex,
        CategoricalField::Weekday,
        CategoricalField::Department,
        CategoricalField::Atmosphere,
        CategoricalField::SafetyEquipment,
        CategoricalField::Maneuver,
    ];

    /// Header of the column in the cleaned source file.
    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::Severity => "gravite accident",
            CategoricalField::Motive => "motif deplacement",
            CategoricalField::Sex => "sexe",
            CategoricalField::Weekday => "jour",
            CategoricalField::Department => "departement",
            CategoricalField::Atmosphere => "conditions atmosperiques",
            CategoricalField::SafetyEquipment => "existence securite",
            CategoricalField::Maneuver => "manoeuvre avant accident",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Severity => "Severity",
            CategoricalField::Motive => "Usage",
            CategoricalField::Sex => "Sex",
            CategoricalField::Weekday => "Day",
            CategoricalField::Department => "Department",
            CategoricalField::Atmosphere => "Meteorological conditions",
            CategoricalField::SafetyEquipment => "Equipment",
            CategoricalField::Maneuver => "Maneuver",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Integer-valued columns of the accident table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NumericField {
    Age,
    Hour,
    Day,
    Month,
    Year,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Age,
        NumericField::Hour,
        NumericField::Day,
        NumericField::Month,
        NumericField::Year,
    ];

    pub fn column(self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::Hour => "heure",
            NumericField::Day => "num_jour",
            NumericField::Month => "num_mois",
            NumericField::Year => "annee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Age => "Age",
            NumericField::Hour => "Hour",
            NumericField::Day => "Day",
            NumericField::Month => "Month",
            NumericField::Year => "Year",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every column the loader requires, in file order of the cleaned export.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = CategoricalField::ALL
        .iter()
        .map(|f| f.column())
        .chain(NumericField::ALL.iter().map(|f| f.column()))
        .collect();
    columns.push(LATITUDE_COLUMN);
    columns.push(LONGITUDE_COLUMN);
    columns
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Coordinates { lat, lon }
    }

    /// Build a coordinate pair only if it lies inside continental France.
    pub fn within_france(lat: f64, lon: f64) -> Option<Self> {
        let c = Coordinates::new(lat, lon);
        c.in_france().then_some(c)
    }

    pub fn in_france(&self) -> bool {
        (FRANCE_LAT_RANGE.0..=FRANCE_LAT_RANGE.1).contains(&self.lat)
            && (FRANCE_LON_RANGE.0..=FRANCE_LON_RANGE.1).contains(&self.lon)
    }
}

// ---------------------------------------------------------------------------
// AccidentRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// One accident participant. Values are validated by the loader, so
/// `hour`, `month` and `day` always form a real calendar moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccidentRecord {
    pub severity: String,
    pub motive: String,
    /// `None` when the source cell is empty.
    pub age: Option<u32>,
    pub sex: String,
    pub hour: u32,
    pub weekday: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub department: String,
    /// `None` when absent in the source or outside France.
    pub coordinates: Option<Coordinates>,
    pub atmosphere: String,
    pub safety_equipment: String,
    pub maneuver: String,
}

impl AccidentRecord {
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Severity => &self.severity,
            CategoricalField::Motive => &self.motive,
            CategoricalField::Sex => &self.sex,
            CategoricalField::Weekday => &self.weekday,
            CategoricalField::Department => &self.department,
            CategoricalField::Atmosphere => &self.atmosphere,
            CategoricalField::SafetyEquipment => &self.safety_equipment,
            CategoricalField::Maneuver => &self.maneuver,
        }
    }

    /// Value of a numeric field; only the age can be absent.
    pub fn numeric(&self, field: NumericField) -> Option<i64> {
        match field {
            NumericField::Age => self.age.map(i64::from),
            NumericField::Hour => Some(i64::from(self.hour)),
            NumericField::Day => Some(i64::from(self.day)),
            NumericField::Month => Some(i64::from(self.month)),
            NumericField::Year => Some(i64::from(self.year)),
        }
    }
}

// ---------------------------------------------------------------------------
// AccidentDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed domains.
#[derive(Debug, Clone, Default)]
pub struct AccidentDataset {
    /// All records, in file order.
    pub records: Vec<AccidentRecord>,
    /// For each categorical field the sorted set of observed values.
    pub unique_values: BTreeMap<CategoricalField, BTreeSet<String>>,
    /// For each numeric field the observed `(min, max)`.
    pub bounds: BTreeMap<NumericField, (i64, i64)>,
}

impl AccidentDataset {
    /// Build domain indices from the loaded records.
    pub fn from_records(records: Vec<AccidentRecord>) -> Self {
        let mut unique_values: BTreeMap<CategoricalField, BTreeSet<String>> = BTreeMap::new();
        let mut bounds: BTreeMap<NumericField, (i64, i64)> = BTreeMap::new();

        for rec in &records {
            for field in CategoricalField::ALL {
                unique_values
                    .entry(field)
                    .or_default()
                    .insert(rec.category(field).to_string());
            }
            for field in NumericField::ALL {
                let Some(v) = rec.numeric(field) else {
                    continue;
                };
                bounds
                    .entry(field)
                    .and_modify(|(lo, hi)| {
                        *lo = (*lo).min(v);
                        *hi = (*hi).max(v);
                    })
                    .or_insert((v, v));
            }
        }

        AccidentDataset {
            records,
            unique_values,
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view over every record, the starting point of all filters.
    pub fn rows(&self) -> Vec<&AccidentRecord> {
        self.records.iter().collect()
    }

    /// Observed values of a categorical field (empty for an empty table).
    pub fn domain(&self, field: CategoricalField) -> BTreeSet<String> {
        self.unique_values.get(&field).cloned().unwrap_or_default()
    }

    pub fn bounds(&self, field: NumericField) -> Option<(i64, i64)> {
        self.bounds.get(&field).copied()
    }

    /// Number of records usable by geographic operations.
    pub fn located_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.coordinates.is_some())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn from_records_collects_domains_and_bounds() {
        let ds = AccidentDataset::from_records(ten_records());
        assert_eq!(ds.len(), 10);
        assert_eq!(
            ds.domain(CategoricalField::Motive),
            ["commute", "leisure", "shopping"]
                .into_iter()
                .map(String::from)
                .collect()
        );
        assert_eq!(ds.bounds(NumericField::Year), Some((2008, 2012)));
        assert_eq!(ds.bounds(NumericField::Hour), Some((7, 19)));
        assert_eq!(ds.located_count(), 9);
    }

    #[test]
    fn bounds_ignore_unknown_ages() {
        let ds = AccidentDataset::from_records(vec![
            AccidentRecord {
                age: Some(12),
                ..record()
            },
            AccidentRecord {
                age: None,
                ..record()
            },
            AccidentRecord {
                age: Some(70),
                ..record()
            },
        ]);
        assert_eq!(ds.bounds(NumericField::Age), Some((12, 70)));

        let unknown = AccidentDataset::from_records(vec![AccidentRecord {
            age: None,
            ..record()
        }]);
        assert_eq!(unknown.bounds(NumericField::Age), None);
        assert_eq!(unknown.bounds(NumericField::Year), Some((2012, 2012)));
    }

    #[test]
    fn empty_dataset_has_no_domain() {
        let ds = AccidentDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.domain(CategoricalField::Severity).is_empty());
        assert_eq!(ds.bounds(NumericField::Age), None);
    }

    #[test]
    fn coordinates_outside_france_are_rejected() {
        assert!(Coordinates::within_france(48.8566, 2.3522).is_some());
        assert!(Coordinates::within_france(41.9, 8.7).is_some());
        assert!(Coordinates::within_france(0.0, 0.0).is_none());
        assert!(Coordinates::within_france(-21.1, 55.5).is_none());
    }

    #[test]
    fn required_columns_cover_every_field() {
        let cols = required_columns();
        assert_eq!(cols.len(), 15);
        assert!(cols.contains(&"gravite accident"));
        assert!(cols.contains(&"num_mois"));
        assert!(cols.contains(&LATITUDE_COLUMN));
    }
}
