use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::{rank_color, sex_color};
use crate::data::aggregate::{RankBreakdown, RecordCount, SalaryAverage};
use crate::data::crossfilter::GroupId;
use crate::data::model::{Key, Rank, Sex};
use crate::state::Dashboard;

// ---------------------------------------------------------------------------
// Central panel – all chart widgets
// ---------------------------------------------------------------------------

/// Render every chart.  All widgets read from the same crossfilter, so a
/// filter change applied anywhere is reflected here on the next frame.
pub fn dashboard_charts(ui: &mut Ui, dash: &Dashboard) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(3, |cols| {
                gender_balance(&mut cols[0], dash);
                average_salary(&mut cols[1], dash);
                rank_distribution(&mut cols[2], dash);
            });

            ui.add_space(8.0);
            scatter(
                ui,
                "service_salary",
                "Years of Service",
                dash,
                dash.service_points,
                dash.service_bounds,
            );
            ui.add_space(8.0);
            scatter(
                ui,
                "phd_salary",
                "Years Since PhD",
                dash,
                dash.phd_points,
                dash.phd_bounds,
            );
        });
}

// ---------------------------------------------------------------------------
// Bar charts keyed by sex
// ---------------------------------------------------------------------------

/// Ordinal x axis: one slot per key, labelled with the key text.
fn ordinal_formatter(labels: Vec<String>) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels
            .get(idx as usize)
            .cloned()
            .unwrap_or_default()
    }
}

fn gender_balance(ui: &mut Ui, dash: &Dashboard) {
    let Some(table) = dash.index.group_table::<RecordCount>(dash.gender_counts) else {
        return;
    };

    let labels: Vec<String> = table.keys().map(|k| k.to_string()).collect();
    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, (key, acc))| {
            Bar::new(i as f64, acc.count as f64)
                .width(0.6)
                .fill(sex_color(&Sex::parse(&key.to_string())))
                .name(key.to_string())
        })
        .collect();

    ui.label("Gender balance");
    Plot::new("gender_balance")
        .height(250.0)
        .x_axis_label("Gender")
        .y_axis_label("Records")
        .x_axis_formatter(ordinal_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn average_salary(ui: &mut Ui, dash: &Dashboard) {
    let Some(table) = dash.index.group_table::<SalaryAverage>(dash.average_salary) else {
        return;
    };

    let labels: Vec<String> = table.keys().map(|k| k.to_string()).collect();
    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, (key, acc))| {
            Bar::new(i as f64, acc.average)
                .width(0.6)
                .fill(sex_color(&Sex::parse(&key.to_string())))
                .name(format!("{key}: {:.2}", acc.average))
        })
        .collect();

    ui.label("Average salary");
    Plot::new("average_salary")
        .height(250.0)
        .x_axis_label("Gender")
        .y_axis_label("Salary")
        .x_axis_formatter(ordinal_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Stacked percent-per-rank bars.  Each sex slot stacks the share of its
/// records holding each rank; segments are percentages of that sex's total,
/// so the displayed values are projections and never touch the accumulators.
fn rank_distribution(ui: &mut Ui, dash: &Dashboard) {
    let Some(table) = dash.index.group_table::<RankBreakdown>(dash.rank_breakdown) else {
        return;
    };

    let labels: Vec<String> = table.keys().map(|k| k.to_string()).collect();

    let mut series: Vec<(Rank, &str)> = vec![
        (Rank::Prof, "Prof"),
        (Rank::AssocProf, "Assoc Prof"),
        (Rank::AsstProf, "Asst Prof"),
    ];
    // Only show the overflow bucket when the data actually has one.
    if table.values().any(|b| b.other > 0) {
        series.push((Rank::Other(String::new()), "Other"));
    }

    let mut offsets = vec![0.0f64; table.len()];
    let mut charts: Vec<BarChart> = Vec::with_capacity(series.len());
    for (rank, name) in &series {
        let bars: Vec<Bar> = table
            .values()
            .enumerate()
            .map(|(i, breakdown)| {
                let height = breakdown.percent(rank);
                let bar = Bar::new(i as f64, height)
                    .width(0.6)
                    .base_offset(offsets[i])
                    .fill(rank_color(rank));
                offsets[i] += height;
                bar
            })
            .collect();
        charts.push(BarChart::new(bars).name(*name).color(rank_color(rank)));
    }

    ui.label("Rank distribution (%)");
    Plot::new("rank_distribution")
        .height(250.0)
        .legend(Legend::default())
        .x_axis_label("Gender")
        .y_axis_label("Percent")
        .x_axis_formatter(ordinal_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plots
// ---------------------------------------------------------------------------

/// One scatter of `x_metric` vs salary.  Composite keys make each group a
/// singleton, so a point is drawn for every currently included record class.
fn scatter(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    dash: &Dashboard,
    group: GroupId,
    bounds: (i64, i64),
) {
    let Some(table) = dash.index.group_table::<RecordCount>(group) else {
        return;
    };

    // Bucket points by sex so each gets its own colour and legend entry.
    let mut by_sex: Vec<(Sex, Vec<[f64; 2]>)> = Vec::new();
    for (key, acc) in table {
        if acc.count == 0 {
            continue;
        }
        let Some(parts) = key.as_list() else { continue };
        let (Some(x), Some(salary)) = (
            parts.first().and_then(Key::as_int),
            parts.get(1).and_then(Key::as_int),
        ) else {
            continue;
        };
        let sex = parts
            .get(3)
            .and_then(Key::as_text)
            .map(Sex::parse)
            .unwrap_or(Sex::Other(String::new()));

        let point = [x as f64, salary as f64];
        match by_sex.iter_mut().find(|(s, _)| *s == sex) {
            Some((_, points)) => points.push(point),
            None => by_sex.push((sex, vec![point])),
        }
    }

    ui.label(format!("{x_label} vs salary"));
    Plot::new(id.to_string())
        .height(400.0)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Salary")
        .include_x(bounds.0 as f64)
        .include_x(bounds.1 as f64)
        .show(ui, |plot_ui| {
            for (sex, points) in by_sex {
                plot_ui.points(
                    Points::new(points)
                        .radius(4.0)
                        .color(sex_color(&sex))
                        .name(sex.to_string()),
                );
            }
        });
}
