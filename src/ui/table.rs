use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, TableColumn};

const ROW_HEIGHT: f32 = 18.0;

/// Column toggles plus a scrollable table of the visible missions. Clicking
/// a header sorts by that column.
pub fn explorer(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Columns:");
        for column in TableColumn::ALL {
            let mut shown = state.visible_columns.contains(&column);
            if ui.checkbox(&mut shown, column.label()).changed() {
                state.set_column_visible(column, shown);
            }
        }
    });

    let Some(derived) = state.derived.clone() else {
        return;
    };
    let columns: Vec<TableColumn> = state.visible_columns.iter().copied().collect();
    if columns.is_empty() {
        ui.label("Select at least one column to display.");
        return;
    }

    let view = &derived.view;
    let rows = &state.row_order;
    let sort = state.sort;
    let mut clicked = None;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(70.0).clip(true), columns.len())
        .max_scroll_height(400.0)
        .header(20.0, |mut header| {
            for &column in &columns {
                header.col(|ui: &mut Ui| {
                    let text = match sort {
                        Some(s) if s.column == column => {
                            format!("{} {}", column.label(), if s.ascending { "⬆" } else { "⬇" })
                        }
                        _ => column.label().to_string(),
                    };
                    let button = egui::Button::new(RichText::new(text).strong()).frame(false);
                    if ui.add(button).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let Some(mission) = rows.get(row.index()).and_then(|&i| view.get(i)) else {
                    return;
                };
                for column in &columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(column.cell(mission));
                    });
                }
            });
        });

    if let Some(column) = clicked {
        state.toggle_sort(column);
    }
}
