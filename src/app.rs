use eframe::egui::{self, ScrollArea, Ui};

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Build the app, opening the configured dataset if there is one.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config.top_companies());
        match config.dataset_path() {
            Some(path) => {
                if let Err(e) = state.load_path(&path) {
                    log::error!("Failed to load startup dataset: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
            None => log::info!("No dataset given; starting empty"),
        }
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            report(ui, &mut self.state);
        });
    }
}

fn report(ui: &mut Ui, state: &mut AppState) {
    let Some(derived) = state.derived.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a mission dataset to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Space Missions Dashboard");
            ui.label("Historical space mission analysis (1957 – present)");
            ui.separator();

            ui.heading("Summary Statistics");
            panels::summary_row(ui, &derived.summary);
            ui.separator();

            plot::charts(ui, &derived.charts, state.company_colors.as_ref());
            ui.separator();

            ui.heading("Mission Data Explorer");
            table::explorer(ui, state);
        });
}
