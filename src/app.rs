use std::sync::Arc;

use eframe::egui::{self, ScrollArea};

use crate::data::model::AccidentDataset;
use crate::state::{AppState, Page};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VeloAccidentsApp {
    pub state: AppState,
}

impl VeloAccidentsApp {
    pub fn new(dataset: Arc<AccidentDataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for VeloAccidentsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: page selector ----
        egui::SidePanel::left("navigation_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: widgets, then the page's charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if self.state.view.page == Page::UseCase {
                        panels::use_case_controls(ui, &mut self.state);
                    }
                    // The widgets above may have changed the selections.
                    self.state.refresh();
                    if let Some(view) = self.state.page_view() {
                        charts::page_view(ui, view, &self.state.severity_colors);
                    }
                });
        });
    }
}
