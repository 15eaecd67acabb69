use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{CategoricalField, NumericField};
use crate::state::{AppState, Page, UseCaseSelection};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Go to");
    let mut page = state.view.page;
    for candidate in Page::ALL {
        ui.radio_value(&mut page, candidate, candidate.title());
    }
    state.set_page(page);

    ui.add_space(12.0);
    ui.strong("Severity");
    for (label, color) in state.severity_colors.legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    // Drawn before the central panel: bring the counts up to date first.
    state.refresh();
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Bike Accidents Dashboard");
        ui.separator();

        let total = state.dataset.len();
        match state.visible_count() {
            Some(visible) if visible != total => {
                ui.label(format!("{total} records loaded, {visible} visible"));
            }
            _ => {
                ui.label(format!("{total} records loaded"));
            }
        }

        if state.view.page == Page::UseCase {
            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_use_case();
            }
        }

        if state.dataset.is_empty() {
            ui.label(RichText::new("The input file has no records").color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Use case widgets
// ---------------------------------------------------------------------------

/// Multi-selects and range sliders feeding the Paris heat map.
pub fn use_case_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Use case");
    ui.label("This is the use case page. We are going to focus on the accidents in Paris.");

    for field in UseCaseSelection::MULTI_SELECT {
        multi_select(ui, state, field);
    }
    ui.separator();
    for field in UseCaseSelection::SLIDERS {
        range_slider(ui, state, field);
    }
    ui.separator();
}

fn multi_select(ui: &mut Ui, state: &mut AppState, field: CategoricalField) {
    let all_values = state.dataset.domain(field);
    let selected = state
        .view
        .use_case
        .categories
        .get(&field)
        .cloned()
        .unwrap_or_default();

    // Show count of selected / total in the header
    let header_text = format!(
        "Select the {}  ({}/{})",
        field.label().to_lowercase(),
        selected.len(),
        all_values.len()
    );

    let mut select_all = false;
    let mut select_none = false;
    let mut toggled: Vec<String> = Vec::new();

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field.column())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                select_all = ui.small_button("All").clicked();
                select_none = ui.small_button("None").clicked();
            });

            for val in &all_values {
                let mut text = RichText::new(val);
                if field == CategoricalField::Severity {
                    text = text.color(state.severity_colors.color_for(val));
                }
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, text).changed() {
                    toggled.push(val.clone());
                }
            }
        });

    if select_all {
        state.select_all(field);
    } else if select_none {
        state.select_none(field);
    }
    for val in &toggled {
        state.toggle_value(field, val);
    }
}

fn range_slider(ui: &mut Ui, state: &mut AppState, field: NumericField) {
    let Some((min, max)) = state.dataset.bounds(field) else {
        return;
    };
    let Some((lo, hi)) = state.view.use_case.ranges.get_mut(&field) else {
        return;
    };

    ui.label(RichText::new(format!("Select the {}", field.label().to_lowercase())).strong());
    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::Slider::new(&mut *lo, min..=max).text("from"));
        ui.add(egui::Slider::new(&mut *hi, min..=max).text("to"));
    });
    if *lo > *hi {
        *hi = *lo;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::fixtures::ten_records;
    use crate::data::model::AccidentDataset;

    fn draw_top_bar(state: &mut AppState) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| top_bar(ui, state));
        });
    }

    #[test]
    fn top_bar_counts_follow_the_latest_selection() {
        let mut state = AppState::new(Arc::new(AccidentDataset::from_records(ten_records())));
        state.set_page(Page::UseCase);
        draw_top_bar(&mut state);
        assert_eq!(state.visible_count(), Some(10));

        state.toggle_value(CategoricalField::Motive, "commute");
        draw_top_bar(&mut state);
        assert_eq!(state.visible_count(), Some(4));
    }
}
