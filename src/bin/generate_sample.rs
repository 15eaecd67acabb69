//! Write a deterministic synthetic accident table.
//!
//! ```bash
//! generate_sample                      # data/clean.csv
//! generate_sample sample.parquet       # Parquet, same columns
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate, Weekday};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const ROWS: usize = 5_000;

const SEVERITIES: [(&str, u32); 4] = [
    ("Indemne", 20),
    ("Blessé léger", 45),
    ("Blessé hospitalisé", 30),
    ("Tué", 5),
];
const MOTIVES: [(&str, u32); 6] = [
    ("Promenade – loisirs", 40),
    ("Domicile – travail", 25),
    ("Utilisation professionnelle", 8),
    ("Courses – achats", 7),
    ("Domicile – école", 10),
    ("Autre", 10),
];
const ATMOSPHERES: [(&str, u32); 6] = [
    ("Normale", 80),
    ("Pluie légère", 10),
    ("Pluie forte", 2),
    ("Temps couvert", 5),
    ("Brouillard - fumée", 1),
    ("Temps éblouissant", 2),
];
const EQUIPMENT: [(&str, u32); 3] = [("Oui", 35), ("Non", 45), ("Non déterminable", 20)];
const MANEUVERS: [(&str, u32); 7] = [
    ("Sans changement de direction", 45),
    ("Même sens, même file", 10),
    ("Tournant à gauche", 10),
    ("Tournant à droite", 5),
    ("Dépassant à gauche", 8),
    ("Changeant de file", 7),
    ("Traversant la chaussée", 15),
];
/// Department code, approximate centre and weight.
const DEPARTMENTS: [(&str, f64, f64, u32); 12] = [
    ("75", 48.8566, 2.3522, 18),
    ("92", 48.8400, 2.2400, 5),
    ("93", 48.9100, 2.4800, 4),
    ("94", 48.7800, 2.4700, 4),
    ("77", 48.6000, 2.9000, 3),
    ("78", 48.8000, 1.9500, 3),
    ("91", 48.5500, 2.2500, 3),
    ("95", 49.0500, 2.1000, 3),
    ("13", 43.2965, 5.3698, 10),
    ("69", 45.7640, 4.8357, 9),
    ("33", 44.8378, -0.5792, 9),
    ("2A", 41.9192, 8.7386, 2),
];
/// Relative frequency of each hour, peaking at commute times.
const HOUR_WEIGHTS: [u32; 24] = [
    1, 1, 1, 1, 1, 2, 4, 8, 12, 8, 6, 7, 9, 8, 7, 8, 10, 13, 14, 10, 6, 4, 2, 1,
];

#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "gravite accident")]
    severity: &'static str,
    #[serde(rename = "motif deplacement")]
    motive: &'static str,
    age: i64,
    #[serde(rename = "sexe")]
    sex: &'static str,
    #[serde(rename = "heure")]
    hour: i64,
    #[serde(rename = "jour")]
    weekday: &'static str,
    num_jour: i64,
    num_mois: i64,
    #[serde(rename = "annee")]
    year: i64,
    #[serde(rename = "departement")]
    department: &'static str,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(rename = "conditions atmosperiques")]
    atmosphere: &'static str,
    #[serde(rename = "existence securite")]
    safety_equipment: &'static str,
    #[serde(rename = "manoeuvre avant accident")]
    maneuver: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    /// Index drawn proportionally to `weights`.
    fn weighted(&mut self, weights: impl Iterator<Item = u32> + Clone) -> usize {
        let total: u32 = weights.clone().sum();
        let mut target = (self.next_f64() * f64::from(total)) as u32;
        let mut last = 0;
        for (i, w) in weights.enumerate() {
            if target < w {
                return i;
            }
            target -= w;
            last = i;
        }
        last
    }

    fn pick<T: Copy>(&mut self, table: &[(T, u32)]) -> T {
        table[self.weighted(table.iter().map(|&(_, w)| w))].0
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn french_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lundi",
        Weekday::Tue => "mardi",
        Weekday::Wed => "mercredi",
        Weekday::Thu => "jeudi",
        Weekday::Fri => "vendredi",
        Weekday::Sat => "samedi",
        Weekday::Sun => "dimanche",
    }
}

fn generate(rng: &mut SimpleRng) -> Result<Vec<SampleRow>> {
    let mut rows = Vec::with_capacity(ROWS);
    for _ in 0..ROWS {
        let year = rng.range(2005, 2018);
        let month = rng.range(1, 12);
        let day = rng.range(1, 28);
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .with_context(|| format!("generated invalid date {year}-{month}-{day}"))?;

        let dept = DEPARTMENTS[rng.weighted(DEPARTMENTS.iter().map(|d| d.3))];
        // A few rows without coordinates, as in the real records.
        let (lat, lon) = if rng.next_f64() < 0.05 {
            (None, None)
        } else {
            (
                Some(rng.gauss(dept.1, 0.04)),
                Some(rng.gauss(dept.2, 0.05)),
            )
        };

        rows.push(SampleRow {
            severity: rng.pick(&SEVERITIES),
            motive: rng.pick(&MOTIVES),
            age: rng.gauss(38.0, 17.0).clamp(2.0, 99.0) as i64,
            sex: if rng.next_f64() < 0.77 { "M" } else { "F" },
            hour: rng.weighted(HOUR_WEIGHTS.iter().copied()) as i64,
            weekday: french_weekday(date.weekday()),
            num_jour: day,
            num_mois: month,
            year,
            department: dept.0,
            lat,
            lon,
            atmosphere: rng.pick(&ATMOSPHERES),
            safety_equipment: rng.pick(&EQUIPMENT),
            maneuver: rng.pick(&MANEUVERS),
        });
    }
    Ok(rows)
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let text = |name: &str, f: fn(&SampleRow) -> &'static str| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Utf8, false),
            Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>())),
        )
    };
    let int = |name: &str, f: fn(&SampleRow) -> i64| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Int64, false),
            Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>())),
        )
    };
    let float = |name: &str, f: fn(&SampleRow) -> Option<f64>| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Float64, true),
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>())),
        )
    };

    let (fields, columns): (Vec<Field>, Vec<ArrayRef>) = [
        text("gravite accident", |r| r.severity),
        text("motif deplacement", |r| r.motive),
        int("age", |r| r.age),
        text("sexe", |r| r.sex),
        int("heure", |r| r.hour),
        text("jour", |r| r.weekday),
        int("num_jour", |r| r.num_jour),
        int("num_mois", |r| r.num_mois),
        int("annee", |r| r.year),
        text("departement", |r| r.department),
        float("lat", |r| r.lat),
        float("lon", |r| r.lon),
        text("conditions atmosperiques", |r| r.atmosphere),
        text("existence securite", |r| r.safety_equipment),
        text("manoeuvre avant accident", |r| r.maneuver),
    ]
    .into_iter()
    .unzip();

    let schema = Arc::new(Schema::new(fields));
    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("Failed to create RecordBatch")?;

    let file = std::fs::File::create(path).context("Failed to create output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("Failed to create writer")?;
    writer.write(&batch).context("Failed to write batch")?;
    writer.close().context("Failed to close writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("data/clean.csv"), PathBuf::from);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng)?;

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let is_parquet = output_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    println!(
        "Wrote {} accident records to {}",
        rows.len(),
        output_path.display()
    );
    Ok(())
}
