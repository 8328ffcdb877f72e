use crate::app::QvizApp;
use crate::theme::*;
use eframe::egui;
use qviz_core::placement::{MAX_SPEED, MIN_SPEED};
use qviz_core::{DatabaseFamily, Operation, Region};

fn region_combo(ui: &mut egui::Ui, label: &str, value: &mut Region) {
    egui::ComboBox::from_label(label)
        .selected_text(value.to_string())
        .show_ui(ui, |ui| {
            for region in Region::ALL {
                ui.selectable_value(value, region, region.to_string());
            }
        });
}

pub fn render_controls(ui: &mut egui::Ui, app: &mut QvizApp) {
    ui.add_space(15.0);
    ui.heading("Scenario");
    ui.add_space(10.0);

    let enabled = app.engine.controls_enabled();
    let before = app.selection.clone();

    ui.add_enabled_ui(enabled, |ui| {
        let sel = &mut app.selection;
        egui::ComboBox::from_label("Database")
            .selected_text(sel.family.token())
            .show_ui(ui, |ui| {
                for family in DatabaseFamily::ALL {
                    ui.selectable_value(&mut sel.family, family, family.token());
                }
            });
        egui::ComboBox::from_label("Operation")
            .selected_text(sel.operation.token())
            .show_ui(ui, |ui| {
                for op in Operation::ALL {
                    ui.selectable_value(&mut sel.operation, op, op.token());
                }
            });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("PLACEMENT").small().color(COLOR_TEXT_DIM));
        region_combo(ui, "Client", &mut sel.client_region);
        region_combo(ui, "Control leader", &mut sel.control_leader);
        if sel.uses_range_leaders() {
            ui.label("Range leaders");
            ui.horizontal(|ui| {
                for region in Region::ALL {
                    let mut on = sel.range_leaders.contains(&region);
                    if ui.checkbox(&mut on, region.token()).changed() {
                        if on {
                            sel.range_leaders.insert(region);
                        } else {
                            sel.range_leaders.remove(&region);
                        }
                    }
                }
            });
        } else {
            region_combo(ui, "Data leader", &mut sel.data_leader);
        }
        if sel.uses_transaction_leader() {
            region_combo(ui, "Txn status leader", &mut sel.transaction_leader);
        }

        ui.add_space(10.0);
        ui.label("Animation speed:");
        ui.add(egui::Slider::new(&mut sel.speed, MIN_SPEED..=MAX_SPEED));
    });

    if app.selection != before {
        app.selection_changed();
    }

    if let Some(info) = app
        .engine
        .catalog()
        .lookup(app.selection.family, app.selection.operation)
    {
        ui.add_space(10.0);
        ui.label(egui::RichText::new(info.title).strong().color(COLOR_ACCENT));
        ui.label(egui::RichText::new(info.description).small().color(COLOR_TEXT_DIM));
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
        ui.add_space(15.0);
        let btn = if enabled { "▶ Start" } else { "⏳ Running" };
        let start = ui.add_enabled(
            enabled,
            egui::Button::new(btn)
                .fill(COLOR_ACCENT.gamma_multiply(0.2))
                .min_size(egui::vec2(ui.available_width(), 35.0)),
        );
        if start.clicked() {
            app.start();
        }
    });
}
