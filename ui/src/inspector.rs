use crate::app::QvizApp;
use crate::theme::*;
use eframe::egui;
use qviz_core::{HopOutcome, HopRecord};

fn render_network(ui: &mut egui::Ui, app: &mut QvizApp) {
    let mut config = app.engine.config().clone();
    let topology = &mut config.topology;
    let mut changed = false;

    ui.add_enabled_ui(app.engine.controls_enabled(), |ui| {
        ui.label("Cross-region round trip:");
        changed |= ui
            .add(egui::Slider::new(&mut topology.round_trip_us, 4_000..=300_000).suffix("us"))
            .changed();
        ui.label("Intra-region hop:");
        let mut intra = topology.intra_region_us;
        if ui
            .add(egui::Slider::new(&mut intra, 0..=1_999).suffix("us"))
            .changed()
        {
            topology.set_intra_region_us(intra);
            changed = true;
        }
        let mut count_local = topology.counts_local_hops();
        if ui.checkbox(&mut count_local, "Count local hops").changed() {
            topology.set_counting_local_hops(count_local);
            changed = true;
        }
    });

    if changed {
        if let Err(err) = app.engine.set_config(config) {
            log::warn!("rejected network settings: {}", err);
            app.notice = Some(err.to_string());
        }
    }
}

fn render_record(ui: &mut egui::Ui, record: &HopRecord) {
    let hop = &record.hop;
    let (status, color) = match record.outcome {
        HopOutcome::InFlight => ("…".to_string(), COLOR_ACCENT),
        HopOutcome::Accumulated { total_us } => (format!("+{} = {}", ms(hop.latency_us), ms(total_us)), COLOR_SUCCESS),
        HopOutcome::Suppressed if hop.background => ("async".to_string(), COLOR_BACKGROUND_HOP),
        HopOutcome::Suppressed => ("-".to_string(), COLOR_TEXT_DIM),
        HopOutcome::Skipped => ("skipped".to_string(), COLOR_WARN),
        HopOutcome::Aborted => ("aborted".to_string(), COLOR_CRITICAL),
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{} → {}", hop.from, hop.to)).small().color(COLOR_TEXT));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(status).small().color(color));
        });
    });
}

pub fn render_inspector(ui: &mut egui::Ui, app: &mut QvizApp) {
    ui.add_space(15.0);
    ui.heading("Network");
    ui.add_space(10.0);
    render_network(ui, app);

    ui.add_space(20.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("HOP TRACE").small().strong().color(COLOR_TEXT_DIM));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let result = app.engine.last_result().filter(|_| app.engine.controls_enabled());
            if ui
                .add_enabled(result.is_some(), egui::Button::new("Copy JSON"))
                .on_hover_text("Copy the last run as JSON")
                .clicked()
            {
                match result.map(|r| r.to_json()) {
                    Some(Ok(json)) => ui.ctx().copy_text(json),
                    Some(Err(err)) => log::warn!("could not serialize run: {}", err),
                    None => {}
                }
            }
        });
    });
    ui.add_space(6.0);

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.55)
        .show(ui, |ui| {
            if app.engine.trace().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(30.0);
                    ui.label(egui::RichText::new("Start a run\nto see its hops").color(COLOR_TEXT_DIM));
                });
            }
            for record in app.engine.trace() {
                render_record(ui, record);
            }
        });

    ui.add_space(10.0);
    ui.separator();
    app.sweep.render(ui, &app.engine);
}
