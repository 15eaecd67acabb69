use serde::Serialize;

use super::filter::{apply, Filter};
use super::model::{AccidentRecord, CategoricalField, Coordinates};

/// Departments of Paris and its suburbs (Île-de-France).
pub const PARIS_DEPARTMENTS: [&str; 8] = ["75", "77", "78", "91", "92", "93", "94", "95"];

pub const PARIS_CENTER: Coordinates = Coordinates::new(48.8566, 2.3522);
pub const FRANCE_CENTER: Coordinates = Coordinates::new(46.2276, 2.2137);

/// Radius of one heat disk, in screen points.
pub const HEAT_RADIUS: f32 = 20.0;
pub const PARIS_ZOOM: u8 = 12;

/// Everything the map renderer needs to draw the heat overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatLayer {
    pub center: Coordinates,
    pub zoom: u8,
    pub radius: f32,
    /// `(latitude, longitude)` of every accident to accumulate.
    pub points: Vec<(f64, f64)>,
}

/// Coordinates of the located rows, in input order. Rows without
/// coordinates are skipped.
pub fn heat_points(rows: &[&AccidentRecord]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|r| r.coordinates)
        .map(|c| (c.lat, c.lon))
        .collect()
}

/// Restriction to the Paris department allow-list.
pub fn paris_filter() -> Filter {
    Filter::new().one_of(CategoricalField::Department, PARIS_DEPARTMENTS)
}

/// Apply the caller's selection plus the Paris restriction and build the
/// heat layer.
pub fn paris_heat_layer(rows: &[&AccidentRecord], selection: &Filter) -> HeatLayer {
    let filter = selection.clone().and(paris_filter());
    let subset = apply(rows, &filter);
    HeatLayer {
        center: PARIS_CENTER,
        zoom: PARIS_ZOOM,
        radius: HEAT_RADIUS,
        points: heat_points(&subset),
    }
}
