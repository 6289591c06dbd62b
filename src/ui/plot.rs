use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use space_missions::data::ChartSeries;

use crate::color::{status_color, ColorMap};

const CHART_HEIGHT: f32 = 260.0;
const LINE_BLUE: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
const AREA_GREEN: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);

// ---------------------------------------------------------------------------
// Chart section (central panel)
// ---------------------------------------------------------------------------

/// Render the four report charts for the current view.
pub fn charts(ui: &mut Ui, charts: &ChartSeries, company_colors: Option<&ColorMap>) {
    ui.heading("1. Mission Success Rate Trends Over Time");
    success_rate_chart(ui, charts);
    ui.add_space(12.0);

    ui.heading(format!(
        "2. Top {} Space Organizations by Launch Volume",
        charts.top_companies.len()
    ));
    top_companies_chart(ui, charts, company_colors);
    ui.add_space(12.0);

    ui.heading("3. Mission Outcome Distribution");
    status_chart(ui, charts);
    ui.add_space(12.0);

    ui.heading("4. Global Launch Activity Over Time");
    launches_per_year_chart(ui, charts);
}

fn success_rate_chart(ui: &mut Ui, charts: &ChartSeries) {
    let series: Vec<[f64; 2]> = charts
        .success_rate_by_year
        .iter()
        .map(|(&year, &rate)| [f64::from(year), rate])
        .collect();

    Plot::new("success_rate_by_year")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Success Rate (%)")
        .include_y(0.0)
        .include_y(100.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .name("Success rate")
                    .color(LINE_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .color(LINE_BLUE)
                    .radius(3.0),
            );
        });
}

fn top_companies_chart(ui: &mut Ui, charts: &ChartSeries, company_colors: Option<&ColorMap>) {
    // busiest company on top: highest bar gets the highest y position
    let n = charts.top_companies.len();
    let bars: Vec<Bar> = charts
        .top_companies
        .iter()
        .enumerate()
        .map(|(rank, (company, count))| {
            let color = company_colors
                .map(|cm| cm.color_for(company))
                .unwrap_or(LINE_BLUE);
            Bar::new((n - rank) as f64, *count as f64)
                .name(company)
                .fill(color)
                .width(0.7)
        })
        .collect();

    Plot::new("top_companies")
        .height(CHART_HEIGHT)
        .x_axis_label("Number of Missions")
        .show_y(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (company, count) in &charts.top_companies {
            let color = company_colors
                .map(|cm| cm.color_for(company))
                .unwrap_or(LINE_BLUE);
            ui.label(RichText::new(format!("■ {company} ({count})")).color(color));
        }
    });
}

fn status_chart(ui: &mut Ui, charts: &ChartSeries) {
    let total: usize = charts.status_distribution.values().sum();
    let bars: Vec<Bar> = charts
        .status_distribution
        .iter()
        .enumerate()
        .map(|(i, (status, count))| {
            Bar::new(i as f64, *count as f64)
                .name(status.as_str())
                .fill(status_color(*status))
                .width(0.6)
        })
        .collect();

    Plot::new("status_distribution")
        .height(CHART_HEIGHT)
        .y_axis_label("Missions")
        .show_x(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (status, count) in &charts.status_distribution {
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64 * 100.0
            };
            ui.label(
                RichText::new(format!("■ {status}: {count} ({share:.1}%)"))
                    .color(status_color(*status)),
            );
        }
    });
}

fn launches_per_year_chart(ui: &mut Ui, charts: &ChartSeries) {
    let points: PlotPoints = charts
        .missions_by_year
        .iter()
        .map(|(&year, &count)| [f64::from(year), count as f64])
        .collect();

    Plot::new("missions_by_year")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Missions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Missions launched")
                    .color(AREA_GREEN)
                    .fill(0.0)
                    .width(2.0),
            );
        });
}
