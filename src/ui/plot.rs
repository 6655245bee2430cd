use std::f64::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::analytics::overview::Metric;
use crate::analytics::satisfaction::CrossTab;
use crate::color::{contrast_text, sequential, ORANGE};
use crate::config::CHART_HEIGHT;

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Whether a positive delta is good news (green) or bad news (red).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaColor {
    Normal,
    Inverse,
}

/// A headline number with its delta against the full dataset.
pub fn metric_card(
    ui: &mut Ui,
    title: &str,
    metric: &Metric,
    format: impl Fn(f64) -> String,
    delta_color: DeltaColor,
) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title).weak());
        let value = metric.value.map(&format).unwrap_or_else(|| "–".to_string());
        ui.label(RichText::new(value).size(28.0).strong());

        match metric.delta() {
            Some(d) => {
                let good = match delta_color {
                    DeltaColor::Normal => d >= 0.0,
                    DeltaColor::Inverse => d <= 0.0,
                };
                let color = if d.abs() < 1e-9 {
                    Color32::GRAY
                } else if good {
                    Color32::from_rgb(0x2E, 0x9E, 0x4F)
                } else {
                    Color32::from_rgb(0xD6, 0x3C, 0x3C)
                };
                let arrow = if d >= 0.0 { "▲" } else { "▼" };
                ui.label(RichText::new(format!("{arrow} {}", format(d))).color(color));
            }
            None => {
                ui.label(RichText::new("–").weak());
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar per group, each in its own series so the legend names the groups.
pub fn grouped_bars(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    groups: &[(String, f64)],
    color_for: impl Fn(usize, &str) -> Color32,
    annotate: Option<(&str, &str)>,
) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .show_x(false)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (name, value)) in groups.iter().enumerate() {
                let color = color_for(i, name);
                let bar = Bar::new(i as f64, *value).name(name).width(0.7).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(name).color(color));

                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, *value),
                    RichText::new(format!("{value:.1}")).strong(),
                ).anchor(Align2::CENTER_BOTTOM));

                if let Some((target, label)) = annotate {
                    if name.as_str() == target {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(i as f64, *value * 1.12),
                                RichText::new(format!("▼ {label}")).color(ORANGE),
                            )
                            .anchor(Align2::CENTER_BOTTOM),
                        );
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Pie charts
// ---------------------------------------------------------------------------

/// Pie chart of group counts. Each slice is drawn as fan polygons of at
/// most a quarter turn, since plot polygons are only filled correctly when
/// convex.
pub fn pie_chart(ui: &mut Ui, id: &str, counts: &[(String, usize)], colors: &[Color32]) {
    let total: usize = counts.iter().map(|c| c.1).sum();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let mut start = TAU / 4.0;
            for (i, (name, count)) in counts.iter().enumerate() {
                let share = *count as f64 / total as f64;
                let sweep = share * TAU;
                let color = colors.get(i).copied().unwrap_or(Color32::GRAY);

                let pieces = (sweep / (TAU / 4.0)).ceil().max(1.0) as usize;
                for p in 0..pieces {
                    let a0 = start - sweep * p as f64 / pieces as f64;
                    let a1 = start - sweep * (p + 1) as f64 / pieces as f64;
                    let mut pts = vec![[0.0, 0.0]];
                    pts.extend((0..=16).map(|k| {
                        let a = a0 + (a1 - a0) * k as f64 / 16.0;
                        [a.cos(), a.sin()]
                    }));
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(pts))
                            .name(name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start - sweep / 2.0;
                if share >= 0.04 {
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!("{:.1}%", share * 100.0)).color(contrast_text(color)),
                    ));
                }
                start -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

/// Paint a cross-tabulation as a grid of coloured cells with counts.
pub fn heatmap(ui: &mut Ui, tab: &CrossTab, row_label: &str, column_label: &str) {
    if tab.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let max = tab.max_count().max(1) as f32;
    let label_w = 40.0;
    let label_h = 22.0;
    let width = ui.available_width().min(480.0);
    let cell = Vec2::new(
        (width - label_w) / tab.columns.len() as f32,
        ((CHART_HEIGHT - 2.0 * label_h) / tab.rows.len() as f32).min(70.0),
    );
    let size = Vec2::new(width, label_h * 2.0 + cell.y * tab.rows.len() as f32);
    let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(13.0);
    let text_color = ui.visuals().text_color();

    painter.text(
        rect.left_top() + Vec2::new(label_w + (width - label_w) / 2.0, 0.0),
        Align2::CENTER_TOP,
        column_label,
        font.clone(),
        text_color,
    );

    // Highest row value at the top, as in a matrix plot.
    for (r, row_value) in tab.rows.iter().enumerate() {
        let y = rect.top() + label_h + cell.y * (tab.rows.len() - 1 - r) as f32;
        painter.text(
            egui::pos2(rect.left() + label_w / 2.0, y + cell.y / 2.0),
            Align2::CENTER_CENTER,
            row_value.to_string(),
            font.clone(),
            text_color,
        );
        for (c, count) in tab.counts[r].iter().enumerate() {
            let x = rect.left() + label_w + cell.x * c as f32;
            let cell_rect = egui::Rect::from_min_size(egui::pos2(x, y), cell).shrink(1.0);
            let fill = sequential(*count as f32 / max);
            painter.rect_filled(cell_rect, 2.0, fill);
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                count.to_string(),
                font.clone(),
                contrast_text(fill),
            );
        }
    }

    let bottom = rect.top() + label_h + cell.y * tab.rows.len() as f32;
    for (c, column_value) in tab.columns.iter().enumerate() {
        painter.text(
            egui::pos2(rect.left() + label_w + cell.x * (c as f32 + 0.5), bottom + 4.0),
            Align2::CENTER_TOP,
            column_value.to_string(),
            font.clone(),
            text_color,
        );
    }

    ui.label(RichText::new(format!("rows: {row_label}")).weak());
}
