use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::aggregate::{
    by_count_desc, count_by_age_group, count_categorical, count_numeric, cross_count,
    cross_count_by, AgeGroup, CrossTab,
};
use crate::data::filter::{apply, Filter};
use crate::data::heat::{paris_heat_layer, HeatLayer};
use crate::data::model::{AccidentDataset, AccidentRecord, CategoricalField, NumericField};
use crate::state::{Page, UseCaseSelection, ViewState};

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// One located accident on the overview map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub severity: String,
}

/// "Basic Statistics": demographics and temporal patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    #[serde(skip)]
    pub map_points: Vec<MapPoint>,
    /// Every age bucket, zero-filled.
    pub age_groups: Vec<(AgeGroup, usize)>,
    /// Motives, most frequent first.
    pub usages: Vec<(String, usize)>,
    pub hours: BTreeMap<i64, usize>,
    pub weekdays: BTreeMap<String, usize>,
    pub years: CrossTab<i64, String>,
}

/// "Advanced Statistics": conditions against severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedStats {
    pub atmosphere: CrossTab<String, String>,
    pub equipment: CrossTab<String, String>,
    pub motive: CrossTab<String, String>,
    pub maneuver: CrossTab<String, String>,
}

/// "Use case": the Paris heat map for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseCaseView {
    /// Records matching the selection, anywhere in France.
    pub matched: usize,
    pub heat: HeatLayer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Basic(BasicStats),
    Advanced(AdvancedStats),
    UseCase(UseCaseView),
}

impl PageView {
    /// Number of records the page is built from.
    pub fn record_count(&self, dataset: &AccidentDataset) -> usize {
        match self {
            PageView::UseCase(uc) => uc.matched,
            PageView::Basic(_) | PageView::Advanced(_) => dataset.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Page computation
// ---------------------------------------------------------------------------

/// Compute the view model of the active page. Pure: same dataset and
/// state, same output.
pub fn render_page(dataset: &AccidentDataset, state: &ViewState) -> PageView {
    log::debug!("Computing page {:?}", state.page);
    let rows = dataset.rows();
    match state.page {
        Page::BasicStatistics => PageView::Basic(basic_stats(&rows)),
        Page::AdvancedStatistics => PageView::Advanced(advanced_stats(&rows)),
        Page::UseCase => PageView::UseCase(use_case(&rows, &state.use_case)),
    }
}

pub fn basic_stats(rows: &[&AccidentRecord]) -> BasicStats {
    let map_points = rows
        .iter()
        .filter_map(|r| {
            r.coordinates.map(|c| MapPoint {
                lat: c.lat,
                lon: c.lon,
                severity: r.severity.clone(),
            })
        })
        .collect();

    let observed = count_by_age_group(rows);
    let age_groups = AgeGroup::all()
        .map(|g| (g, observed.get(&g).copied().unwrap_or(0)))
        .collect();

    BasicStats {
        map_points,
        age_groups,
        usages: by_count_desc(&count_categorical(rows, CategoricalField::Motive)),
        hours: count_numeric(rows, NumericField::Hour),
        weekdays: count_categorical(rows, CategoricalField::Weekday),
        years: cross_count_by(rows, |r| i64::from(r.year), |r| r.severity.clone()),
    }
}

pub fn advanced_stats(rows: &[&AccidentRecord]) -> AdvancedStats {
    let by_severity = |field| cross_count(rows, field, CategoricalField::Severity);
    AdvancedStats {
        atmosphere: by_severity(CategoricalField::Atmosphere),
        equipment: by_severity(CategoricalField::SafetyEquipment),
        motive: by_severity(CategoricalField::Motive),
        maneuver: by_severity(CategoricalField::Maneuver),
    }
}

pub fn use_case(rows: &[&AccidentRecord], selection: &UseCaseSelection) -> UseCaseView {
    let filter = selection.to_filter();
    let matched = apply(rows, &filter);
    UseCaseView {
        matched: matched.len(),
        heat: paris_heat_layer(&matched, &Filter::new()),
    }
}

// ---------------------------------------------------------------------------
// Headless summary
// ---------------------------------------------------------------------------

/// Whole-table statistics printed by `--summary`.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub matched: usize,
    pub located: usize,
    pub basic: BasicStats,
    pub advanced: AdvancedStats,
}

/// Statistics over the rows matching `filter`; `records` is always the
/// whole table.
pub fn summarize(dataset: &AccidentDataset, filter: &Filter) -> DatasetSummary {
    let rows = apply(&dataset.rows(), filter);
    DatasetSummary {
        records: dataset.len(),
        matched: rows.len(),
        located: rows.iter().filter(|r| r.coordinates.is_some()).count(),
        basic: basic_stats(&rows),
        advanced: advanced_stats(&rows),
    }
}
