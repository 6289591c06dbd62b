use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use space_missions::data::{MissionStatus, Summary};

use crate::color::status_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(selection) = state.selection.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date range");
            let mut start = selection.start;
            let mut end = selection.end;
            let mut dates_changed = false;
            egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("From");
                dates_changed |= ui
                    .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                    .changed();
                ui.end_row();
                ui.label("To");
                dates_changed |= ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed();
                ui.end_row();
            });
            if dates_changed {
                state.set_dates(start, end);
            }
            if ui.small_button("Full range").clicked() {
                state.reset_dates();
            }
            ui.separator();

            // ---- Companies (collapsible) ----
            let n_selected = selection.companies.len();
            let n_total = state.all_companies.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Companies  ({n_selected}/{n_total})")).strong(),
            )
            .id_salt("companies")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.set_all_companies(true);
                    }
                    if ui.small_button("None").clicked() {
                        state.set_all_companies(false);
                    }
                });

                let companies = state.all_companies.clone();
                for company in &companies {
                    let mut text = RichText::new(company);
                    if let Some(colors) = &state.company_colors {
                        text = text.color(colors.color_for(company));
                    }
                    let mut checked = selection.companies.contains(company);
                    if ui.checkbox(&mut checked, text).changed() {
                        state.set_company(company, checked);
                    }
                }
            });
            ui.separator();

            // ---- Mission status ----
            ui.strong("Mission status");
            for status in MissionStatus::ALL {
                let mut checked = selection.statuses.contains(&status);
                let text = RichText::new(status.as_str()).color(status_color(status));
                if ui.checkbox(&mut checked, text).changed() {
                    state.set_status(status, checked);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.derived.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(derived)) = (&state.table, &state.derived) {
            ui.label(format!(
                "{} missions loaded, {} visible",
                table.len(),
                derived.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

const METRIC_FILL: Color32 = Color32::from_rgb(0xFA, 0xDA, 0x5E);

/// Four headline metrics in a row.
pub fn summary_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Missions", group_thousands(summary.total_missions));
        metric(&mut cols[1], "Success Rate", success_rate_label(summary));
        metric(&mut cols[2], "Companies", summary.unique_company_count.to_string());
        metric(&mut cols[3], "Rocket Types", summary.unique_rocket_count.to_string());
    });
}

/// One decimal, rounded once from the raw counts.
fn success_rate_label(summary: &Summary) -> String {
    format!("{:.1}%", summary.exact_success_rate())
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style())
        .fill(METRIC_FILL)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(Color32::DARK_GRAY));
            ui.label(RichText::new(value).heading().strong().color(Color32::BLACK));
        });
}

/// `4630` → `"4,630"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open space mission data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered missions")
        .set_file_name("filtered_space_missions.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_filtered(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
