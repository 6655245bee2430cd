use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

use crate::analytics::compensation::CompensationSection;
use crate::analytics::demographics::DemographicsSection;
use crate::analytics::overview::OverviewSection;
use crate::analytics::satisfaction::{SatisfactionField, SatisfactionSection};
use crate::color::{series_colors, ColorMap, VIVID_BLUE};
use crate::config::{CHART_HEIGHT, SATISFACTION_SCALE_MAX};
use crate::state::AppState;

use super::plot::{grouped_bars, heatmap, metric_card, pie_chart, DeltaColor};

fn fallback_colors() -> ColorMap {
    ColorMap::new(std::iter::empty())
}

fn or_dash(v: Option<f64>, format: impl Fn(f64) -> String) -> String {
    v.map(format).unwrap_or_else(|| "–".to_string())
}

/// `12345.6` → `"12,346"`.
fn thousands(v: f64) -> String {
    let rounded = v.abs().round() as u64;
    let digits = rounded.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 && rounded > 0 {
        format!("-{out}")
    } else {
        out
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, section: &OverviewSection, state: &AppState) {
    ui.heading("Key Insights");
    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            "Overall Attrition Rate",
            &section.metrics.attrition_rate,
            |v| format!("{v:.1}%"),
            DeltaColor::Inverse,
        );
        metric_card(
            &mut cols[1],
            "Average Job Satisfaction",
            &section.metrics.job_satisfaction,
            |v| format!("{v:.2}/4"),
            DeltaColor::Normal,
        );
        metric_card(
            &mut cols[2],
            "Average Monthly Income",
            &section.metrics.monthly_income,
            |v| format!("${}", thousands(v)),
            DeltaColor::Normal,
        );
    });
    ui.separator();

    let fallback = fallback_colors();
    let departments = state.department_colors.as_ref().unwrap_or(&fallback);

    ui.columns(2, |cols| {
        cols[0].strong("Employee Distribution by Department");
        let colors: Vec<Color32> = section
            .department_counts
            .iter()
            .map(|(name, _)| departments.color_for(name))
            .collect();
        pie_chart(&mut cols[0], "department_pie", &section.department_counts, &colors);

        cols[1].strong("Attrition Rate by Department (%)");
        let rates: Vec<(String, f64)> = section
            .department_attrition
            .iter()
            .map(|g| (g.department.clone(), g.rate))
            .collect();
        let highest = section
            .highest_attrition()
            .filter(|g| g.rate > 0.0)
            .map(|g| (g.department.as_str(), "Highest Attrition"));
        grouped_bars(
            &mut cols[1],
            "department_attrition",
            "Attrition Rate (%)",
            &rates,
            |_, name| departments.color_for(name),
            highest,
        );
    });
}

// ---------------------------------------------------------------------------
// Workforce demographics
// ---------------------------------------------------------------------------

pub fn demographics(ui: &mut Ui, section: &DemographicsSection, state: &AppState) {
    let fallback = fallback_colors();
    let genders = state.gender_colors.as_ref().unwrap_or(&fallback);
    let departments = state.department_colors.as_ref().unwrap_or(&fallback);

    ui.columns(2, |cols| {
        cols[0].strong("Age Distribution");
        let hist = &section.age_histogram;
        Plot::new("age_histogram")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("Age")
            .y_axis_label("Count")
            .show(&mut cols[0], |plot_ui| {
                let mut stacked: Vec<BarChart> = Vec::new();
                for (gender, counts) in &hist.counts {
                    let bars = counts
                        .iter()
                        .enumerate()
                        .map(|(i, &n)| Bar::new(hist.bin_center(i), n as f64).width(hist.bin_width * 0.95))
                        .collect();
                    let below: Vec<&BarChart> = stacked.iter().collect();
                    let chart = BarChart::new(bars)
                        .name(gender)
                        .color(genders.color_for(gender))
                        .stack_on(&below);
                    stacked.push(chart);
                }
                for chart in stacked {
                    plot_ui.bar_chart(chart);
                }
            });

        cols[1].strong("Distribution by Education Field");
        pie_chart(
            &mut cols[1],
            "education_pie",
            &section.education_counts,
            &series_colors(section.education_counts.len()),
        );
    });

    ui.separator();
    ui.strong("Experience vs Performance Rating");
    let max_income = section
        .experience_performance
        .iter()
        .flat_map(|s| s.incomes.iter().copied())
        .fold(0.0, f64::max);

    Plot::new("experience_performance")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Total Working Years")
        .y_axis_label("Performance Rating")
        .show(ui, |plot_ui| {
            for series in &section.experience_performance {
                let color = departments.color_for(&series.department);
                for (point, income) in series.points.iter().zip(&series.incomes) {
                    // Marker area follows monthly income.
                    let radius = if max_income > 0.0 {
                        2.0 + 8.0 * (income / max_income).sqrt() as f32
                    } else {
                        3.0
                    };
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![*point]))
                            .name(&series.department)
                            .color(color.gamma_multiply(0.6))
                            .radius(radius),
                    );
                }
                if let Some(fit) = series.trend {
                    let (lo, hi) = series
                        .points
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[lo, fit.at(lo)], [hi, fit.at(hi)]]))
                            .name(&series.department)
                            .color(color)
                            .width(2.0),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Compensation
// ---------------------------------------------------------------------------

pub fn compensation(ui: &mut Ui, section: &CompensationSection, state: &AppState) {
    let fallback = fallback_colors();
    let departments = state.department_colors.as_ref().unwrap_or(&fallback);

    ui.heading("Salary Analysis");
    ui.columns(2, |cols| {
        cols[0].strong("Average Salary by Job Role");
        let means: Vec<(String, f64)> = section
            .salary_by_role
            .iter()
            .map(|s| (s.job_role.clone(), s.mean_income))
            .collect();
        let colors = series_colors(means.len());
        grouped_bars(
            &mut cols[0],
            "salary_by_role",
            "Monthly Income",
            &means,
            |i, _| colors.get(i).copied().unwrap_or(VIVID_BLUE),
            None,
        );

        cols[1].strong("Salary Distribution by Department");
        Plot::new("salary_box")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .y_axis_label("Monthly Income")
            .show(&mut cols[1], |plot_ui| {
                for (i, spread) in section.income_spread.iter().enumerate() {
                    let color = departments.color_for(&spread.department);
                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            spread.lower_whisker,
                            spread.q1,
                            spread.median,
                            spread.q3,
                            spread.upper_whisker,
                        ),
                    )
                    .name(&spread.department)
                    .box_width(0.5);
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&spread.department).color(color));

                    if !spread.outliers.is_empty() {
                        let outliers: Vec<[f64; 2]> = spread.outliers.iter().map(|&v| [i as f64, v]).collect();
                        plot_ui.points(
                            Points::new(PlotPoints::from(outliers))
                                .name(&spread.department)
                                .color(color)
                                .radius(2.5),
                        );
                    }
                }
            });
    });

    ui.separator();
    ui.strong("Detailed Salary Breakdown");
    salary_table(ui, section);
}

fn salary_table(ui: &mut Ui, section: &CompensationSection) {
    let headers = ["Job Role", "Headcount", "Avg Salary", "Min Salary", "Max Salary", "Std Dev", "Avg % Hike"];

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(80.0), headers.len() - 1)
        .header(22.0, |mut header| {
            for title in headers {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for stats in &section.salary_by_role {
                body.row(20.0, |mut row| {
                    let cells = [
                        stats.job_role.clone(),
                        stats.headcount.to_string(),
                        format!("{:.2}", stats.mean_income),
                        format!("{:.2}", stats.min_income),
                        format!("{:.2}", stats.max_income),
                        or_dash(stats.std_dev, |v| format!("{v:.2}")),
                        format!("{:.2}", stats.mean_hike),
                    ];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Employee satisfaction
// ---------------------------------------------------------------------------

pub fn satisfaction(ui: &mut Ui, section: &SatisfactionSection) {
    ui.columns(2, |cols| {
        cols[0].strong("Job Satisfaction vs Work-Life Balance");
        heatmap(
            &mut cols[0],
            &section.heatmap,
            section.heatmap.row_field.label(),
            section.heatmap.column_field.label(),
        );

        cols[1].strong("Average Satisfaction Metrics");
        radar(&mut cols[1], section);
    });

    ui.separator();
    ui.strong("Satisfaction Metrics by Department");
    department_scores(ui, section);
}

/// Point on the radar for axis `i` of `n` at distance `r`, first axis up.
fn radar_point(i: usize, n: usize, r: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * i as f64 / n as f64;
    [r * angle.cos(), r * angle.sin()]
}

fn radar(ui: &mut Ui, section: &SatisfactionSection) {
    let n = section.mean_scores.len();
    let max = SATISFACTION_SCALE_MAX;

    Plot::new("satisfaction_radar")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-max * 1.5)
        .include_x(max * 1.5)
        .include_y(-max * 1.2)
        .include_y(max * 1.2)
        .show(ui, |plot_ui| {
            if n == 0 {
                return;
            }
            let guide = Color32::from_gray(150);

            // Rings at every scale step and one spoke per metric.
            for step in 1..=max as usize {
                let ring: Vec<[f64; 2]> = (0..=n).map(|i| radar_point(i % n, n, step as f64)).collect();
                plot_ui.line(Line::new(PlotPoints::from(ring)).color(guide).width(0.5));
            }
            for (i, field) in section.mean_scores.keys().enumerate() {
                let tip = radar_point(i, n, max);
                plot_ui.line(Line::new(PlotPoints::from(vec![[0.0, 0.0], tip])).color(guide).width(0.5));
                let label = radar_point(i, n, max * 1.1);
                let anchor = if label[0].abs() < 1e-6 {
                    if label[1] > 0.0 { Align2::CENTER_BOTTOM } else { Align2::CENTER_TOP }
                } else if label[0] > 0.0 {
                    Align2::LEFT_CENTER
                } else {
                    Align2::RIGHT_CENTER
                };
                plot_ui.text(Text::new(PlotPoint::new(label[0], label[1]), field.label()).anchor(anchor));
            }

            if section.mean_scores.values().all(Option::is_some) {
                let shape: Vec<[f64; 2]> = section
                    .mean_scores
                    .values()
                    .enumerate()
                    .map(|(i, m)| radar_point(i, n, m.unwrap_or(0.0)))
                    .collect();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(shape))
                        .fill_color(VIVID_BLUE.gamma_multiply(0.35))
                        .stroke(Stroke::new(2.0, VIVID_BLUE)),
                );
                for (i, m) in section.mean_scores.values().enumerate() {
                    if let Some(m) = m {
                        let [x, y] = radar_point(i, n, *m);
                        plot_ui.text(
                            Text::new(PlotPoint::new(x, y), RichText::new(format!("{m:.2}")).strong())
                                .anchor(Align2::CENTER_BOTTOM),
                        );
                    }
                }
            }
        });
}

/// Grouped bars: one cluster per department, one bar per metric.
fn department_scores(ui: &mut Ui, section: &SatisfactionSection) {
    let mut departments: Vec<&str> = section.by_department.iter().map(|r| r.department.as_str()).collect();
    departments.dedup();
    let colors = series_colors(SatisfactionField::ALL.len());
    let width = 0.8 / SatisfactionField::ALL.len() as f64;

    Plot::new("satisfaction_by_department")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Satisfaction Score")
        .include_y(0.0)
        .include_y(SATISFACTION_SCALE_MAX)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (m, field) in SatisfactionField::ALL.into_iter().enumerate() {
                let offset = (m as f64 - (SatisfactionField::ALL.len() as f64 - 1.0) / 2.0) * width;
                let bars: Vec<Bar> = section
                    .by_department
                    .iter()
                    .filter(|r| r.metric == field)
                    .filter_map(|r| {
                        let d = departments.iter().position(|&d| d == r.department)?;
                        Some(
                            Bar::new(d as f64 + offset, r.score)
                                .width(width * 0.95)
                                .name(format!("{} – {}", r.department, field.label())),
                        )
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(field.label()).color(colors[m]));
            }
            for (d, department) in departments.iter().enumerate() {
                plot_ui.text(Text::new(PlotPoint::new(d as f64, -0.1), *department).anchor(Align2::CENTER_TOP));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(6502.9), "6,503");
        assert_eq!(thousands(1234567.0), "1,234,567");
        assert_eq!(thousands(-1500.0), "-1,500");
    }

    #[test]
    fn radar_axes_start_at_top_and_go_clockwise() {
        let [x, y] = radar_point(0, 4, 2.0);
        assert!(x.abs() < 1e-9 && (y - 2.0).abs() < 1e-9);
        let [x, y] = radar_point(1, 4, 2.0);
        assert!((x - 2.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(or_dash(None, |v| v.to_string()), "–");
        assert_eq!(or_dash(Some(1.5), |v| format!("{v:.2}")), "1.50");
    }
}
