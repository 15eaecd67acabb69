//! egui widgets: navigation / filter panels and the chart drawing.

pub mod charts;
pub mod panels;
