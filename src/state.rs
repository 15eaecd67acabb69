use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::Filter;
use crate::data::model::{AccidentDataset, CategoricalField, NumericField};
use crate::view::{render_page, PageView};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    BasicStatistics,
    AdvancedStatistics,
    UseCase,
}

impl Page {
    pub const ALL: [Page; 3] = [
        Page::BasicStatistics,
        Page::AdvancedStatistics,
        Page::UseCase,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::BasicStatistics => "Basic Statistics",
            Page::AdvancedStatistics => "Advanced Statistics",
            Page::UseCase => "Use case",
        }
    }
}

// ---------------------------------------------------------------------------
// Use case selections
// ---------------------------------------------------------------------------

/// Widget selections of the "Use case" page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UseCaseSelection {
    /// Multi-select fields → selected values.
    pub categories: BTreeMap<CategoricalField, BTreeSet<String>>,
    /// Slider fields → inclusive `(lo, hi)`.
    pub ranges: BTreeMap<NumericField, (i64, i64)>,
}

impl UseCaseSelection {
    pub const MULTI_SELECT: [CategoricalField; 2] =
        [CategoricalField::Severity, CategoricalField::Motive];
    pub const SLIDERS: [NumericField; 4] = [
        NumericField::Year,
        NumericField::Month,
        NumericField::Day,
        NumericField::Hour,
    ];

    /// Every observed value selected, every slider at its full extent.
    pub fn from_dataset(dataset: &AccidentDataset) -> Self {
        UseCaseSelection {
            categories: Self::MULTI_SELECT
                .iter()
                .map(|&f| (f, dataset.domain(f)))
                .collect(),
            ranges: Self::SLIDERS
                .iter()
                .map(|&f| (f, dataset.bounds(f).unwrap_or((0, 0))))
                .collect(),
        }
    }

    pub fn to_filter(&self) -> Filter {
        let filter = self
            .ranges
            .iter()
            .fold(Filter::new(), |f, (&field, &range)| f.range(field, range));
        self.categories
            .iter()
            .fold(filter, |f, (&field, values)| f.one_of(field, values.iter().cloned()))
    }
}

/// Everything `render_page` depends on besides the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub page: Page,
    pub use_case: UseCaseSelection,
}

impl ViewState {
    pub fn new(dataset: &AccidentDataset) -> Self {
        ViewState {
            page: Page::default(),
            use_case: UseCaseSelection::from_dataset(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

struct Rendered {
    state: ViewState,
    page: PageView,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Base table, shared with the process-wide cache.
    pub dataset: Arc<AccidentDataset>,

    /// Current page and widget selections.
    pub view: ViewState,

    /// One colour per severity, shared by every chart.
    pub severity_colors: ColorMap,

    /// Last computed page and the state it was computed for.
    rendered: Option<Rendered>,
}

impl AppState {
    pub fn new(dataset: Arc<AccidentDataset>) -> Self {
        let severity_colors = ColorMap::new(&dataset.domain(CategoricalField::Severity));
        let view = ViewState::new(&dataset);
        AppState {
            dataset,
            view,
            severity_colors,
            rendered: None,
        }
    }

    /// Recompute the page view if the state changed since the last call.
    pub fn refresh(&mut self) {
        if self
            .rendered
            .as_ref()
            .is_some_and(|r| r.state != self.view)
        {
            self.rendered = None;
        }
        let dataset = &self.dataset;
        let view = &self.view;
        self.rendered.get_or_insert_with(|| Rendered {
            state: view.clone(),
            page: render_page(dataset, view),
        });
    }

    /// The view computed by the last [`AppState::refresh`].
    pub fn page_view(&self) -> Option<&PageView> {
        self.rendered.as_ref().map(|r| &r.page)
    }

    pub fn visible_count(&self) -> Option<usize> {
        self.page_view().map(|p| p.record_count(&self.dataset))
    }

    pub fn set_page(&mut self, page: Page) {
        self.view.page = page;
    }

    /// Toggle a single value of a multi-select.
    pub fn toggle_value(&mut self, field: CategoricalField, value: &str) {
        let selected = self.view.use_case.categories.entry(field).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select all values of a multi-select.
    pub fn select_all(&mut self, field: CategoricalField) {
        self.view
            .use_case
            .categories
            .insert(field, self.dataset.domain(field));
    }

    /// Deselect all values of a multi-select.
    pub fn select_none(&mut self, field: CategoricalField) {
        self.view.use_case.categories.insert(field, BTreeSet::new());
    }

    /// Back to the full-domain defaults.
    pub fn reset_use_case(&mut self) {
        self.view.use_case = UseCaseSelection::from_dataset(&self.dataset);
    }
}
