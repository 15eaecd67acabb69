use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Size, StripBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::CrossTab;
use crate::data::heat::FRANCE_CENTER;
use crate::data::model::{FRANCE_LAT_RANGE, FRANCE_LON_RANGE};
use crate::view::{AdvancedStats, BasicStats, MapPoint, PageView, UseCaseView};

const CHART_HEIGHT: f32 = 260.0;
const MAP_HEIGHT: f32 = 520.0;
const ACCIDENTS: &str = "Number of accidents";

// ---------------------------------------------------------------------------
// Pages (central panel)
// ---------------------------------------------------------------------------

/// Draw the view model of the active page.
pub fn page_view(ui: &mut Ui, view: &PageView, colors: &ColorMap) {
    match view {
        PageView::Basic(stats) => basic_page(ui, stats, colors),
        PageView::Advanced(stats) => advanced_page(ui, stats, colors),
        PageView::UseCase(uc) => heat_map(ui, uc),
    }
}

fn basic_page(ui: &mut Ui, stats: &BasicStats, colors: &ColorMap) {
    ui.heading("Basic Statistics");
    accident_map(ui, &stats.map_points, colors);

    let ages: Vec<(String, usize)> = stats
        .age_groups
        .iter()
        .map(|(g, n)| (g.to_string(), *n))
        .collect();
    chart_row(ui, 2, |i, ui| match i {
        0 => bar_chart(ui, "ages", "Number of accidents by age group", "Age group", &ages),
        _ => bar_chart(ui, "usages", "Number of accidents by usage", "Usage", &stats.usages),
    });

    chart_row(ui, 3, |i, ui| match i {
        0 => {
            let points: PlotPoints = stats
                .hours
                .iter()
                .map(|(&h, &n)| [h as f64, n as f64])
                .collect();
            line_chart(ui, "hours", "Number of accidents by hour", "Hour", points, None);
        }
        1 => {
            let points: PlotPoints = stats
                .weekdays
                .values()
                .enumerate()
                .map(|(i, &n)| [i as f64, n as f64])
                .collect();
            let labels = stats.weekdays.keys().cloned().collect();
            line_chart(ui, "days", "Number of accidents by day", "Day", points, Some(labels));
        }
        _ => year_area(ui, &stats.years, colors),
    });
}

fn advanced_page(ui: &mut Ui, stats: &AdvancedStats, colors: &ColorMap) {
    ui.heading("Advanced Statistics");

    chart_row(ui, 2, |i, ui| match i {
        0 => severity_bars(
            ui,
            "meteo",
            "Number of accidents by meteorological conditions and severity",
            "Meteorological conditions",
            &stats.atmosphere,
            colors,
            BarLayout::Stacked,
        ),
        _ => severity_bars(
            ui,
            "equipment",
            "Number of accidents by equipment and severity",
            "Equipment",
            &stats.equipment,
            colors,
            BarLayout::Grouped,
        ),
    });

    chart_row(ui, 2, |i, ui| match i {
        0 => severity_bars(
            ui,
            "usage_severity",
            "Number of accidents by usage and severity",
            "Usage",
            &stats.motive,
            colors,
            BarLayout::Horizontal,
        ),
        _ => severity_bars(
            ui,
            "maneuver_severity",
            "Number of accidents by maneuver and severity",
            "Maneuver",
            &stats.maneuver,
            colors,
            BarLayout::Horizontal,
        ),
    });
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

/// `columns` equal-width cells side by side, one chart each.
fn chart_row(ui: &mut Ui, columns: usize, mut cell: impl FnMut(usize, &mut Ui)) {
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT + 40.0);
    ui.allocate_ui(size, |ui: &mut Ui| {
        StripBuilder::new(ui)
            .sizes(Size::remainder(), columns)
            .horizontal(|mut strip| {
                for i in 0..columns {
                    strip.cell(|ui: &mut Ui| cell(i, ui));
                }
            });
    });
    ui.add_space(8.0);
}

/// Axis formatter printing `labels[i]` at integer positions.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if i < 0.0 || (mark.value - i).abs() > 1e-6 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

/// Width / height ratio of one degree so maps are not squashed.
fn map_aspect(lat: f64) -> f32 {
    (1.0 / lat.to_radians().cos()) as f32
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, id: &str, title: &str, x_label: &str, entries: &[(String, usize)]) {
    ui.strong(title);
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, n))| Bar::new(i as f64, *n as f64).name(label).width(0.7))
        .collect();
    let labels = entries.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(ACCIDENTS)
        .x_axis_formatter(category_axis(labels))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(40, 90, 200)));
        });
}

fn line_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    x_label: &str,
    points: PlotPoints,
    labels: Option<Vec<String>>,
) {
    ui.strong(title);
    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(ACCIDENTS)
        .include_y(0.0)
        .allow_scroll(false);
    if let Some(labels) = labels {
        plot = plot.x_axis_formatter(category_axis(labels));
    }
    plot.show(ui, |plot_ui| {
        plot_ui.line(Line::new(points).color(Color32::from_rgb(40, 90, 200)).width(2.0));
    });
}

/// Accidents per year, one stacked layer per severity.
fn year_area(ui: &mut Ui, tab: &CrossTab<i64, String>, colors: &ColorMap) {
    ui.strong("Number of accidents by year and severity");
    let years: Vec<i64> = tab.primaries().copied().collect();

    let mut cumulative = vec![0.0; years.len()];
    let mut layers: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for severity in tab.secondaries() {
        for (total, year) in cumulative.iter_mut().zip(&years) {
            *total += tab.get(year, severity) as f64;
        }
        let points = years
            .iter()
            .zip(&cumulative)
            .map(|(&y, &v)| [y as f64, v])
            .collect();
        layers.push((severity.clone(), points));
    }

    Plot::new("years")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label(ACCIDENTS)
        .legend(Legend::default())
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Highest layer first so each lower layer paints over it.
            for (severity, points) in layers.into_iter().rev() {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .name(&severity)
                        .color(colors.color_for(&severity))
                        .fill(0.0),
                );
            }
        });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarLayout {
    Stacked,
    Grouped,
    Horizontal,
}

/// One bar series per severity over the categories of `tab`.
fn severity_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    axis_label: &str,
    tab: &CrossTab<String, String>,
    colors: &ColorMap,
    layout: BarLayout,
) {
    ui.strong(format!("{title} ({} accidents)", tab.total()));
    if tab.is_empty() {
        ui.label("No data");
        return;
    }
    let categories: Vec<String> = tab.primaries().cloned().collect();
    let severities = tab.secondaries();
    let series = severities.len().max(1) as f64;
    let width = match layout {
        BarLayout::Grouped => 0.8 / series,
        BarLayout::Stacked | BarLayout::Horizontal => 0.7,
    };

    let mut charts: Vec<BarChart> = Vec::new();
    for (j, severity) in severities.iter().enumerate() {
        let offset = match layout {
            BarLayout::Grouped => (j as f64 - (series - 1.0) / 2.0) * width,
            BarLayout::Stacked | BarLayout::Horizontal => 0.0,
        };
        let bars: Vec<Bar> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                Bar::new(i as f64 + offset, tab.get(category, severity) as f64)
                    .name(format!("{category} / {severity}"))
            })
            .collect();

        let mut chart = BarChart::new(bars)
            .name(severity)
            .color(colors.color_for(severity))
            .width(width);
        if layout == BarLayout::Horizontal {
            chart = chart.horizontal();
        }
        if layout != BarLayout::Grouped {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false);
    plot = if layout == BarLayout::Horizontal {
        plot.x_axis_label(ACCIDENTS)
            .y_axis_label(axis_label)
            .y_axis_formatter(category_axis(categories))
            .include_x(0.0)
    } else {
        plot.x_axis_label(axis_label)
            .y_axis_label(ACCIDENTS)
            .x_axis_formatter(category_axis(categories))
            .include_y(0.0)
    };
    plot.show(ui, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

/// Every located accident over France, coloured by severity.
fn accident_map(ui: &mut Ui, points: &[MapPoint], colors: &ColorMap) {
    let mut by_severity: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        by_severity
            .entry(p.severity.as_str())
            .or_default()
            .push([p.lon, p.lat]);
    }

    Plot::new("accident_map")
        .height(MAP_HEIGHT)
        .data_aspect(map_aspect(FRANCE_CENTER.lat))
        .include_x(FRANCE_LON_RANGE.0)
        .include_x(FRANCE_LON_RANGE.1)
        .include_y(FRANCE_LAT_RANGE.0)
        .include_y(FRANCE_LAT_RANGE.1)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (severity, pts) in by_severity {
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(severity)
                        .color(colors.color_for(severity))
                        .radius(1.5),
                );
            }
        });
}

/// Heat overlay over Paris: translucent disks whose overlap builds up the
/// intensity.
fn heat_map(ui: &mut Ui, view: &UseCaseView) {
    let layer = &view.heat;
    ui.label(format!(
        "{} accidents match the selection, {} of them located in Île-de-France.",
        view.matched,
        layer.points.len()
    ));

    // Longitude span of the viewport at the layer's zoom level (256 px tiles).
    let half_span =
        360.0 / 2f64.powi(i32::from(layer.zoom)) * (f64::from(ui.available_width()) / 256.0) / 2.0;
    let points: PlotPoints = layer.points.iter().map(|&(lat, lon)| [lon, lat]).collect();

    Plot::new("paris_heatmap")
        .height(MAP_HEIGHT)
        .data_aspect(map_aspect(layer.center.lat))
        .include_x(layer.center.lon - half_span)
        .include_x(layer.center.lon + half_span)
        .include_y(layer.center.lat)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Accidents")
                    .color(Color32::from_rgba_unmultiplied(230, 60, 20, 28))
                    .radius(layer.radius),
            );
        });

    ui.label(
        RichText::new(
            "Accidents concentrate in the center of Paris, and are more frequent at \
             morning and evening peak hours.",
        )
        .italics(),
    );
}
