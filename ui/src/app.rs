use crate::analytics::SweepPanel;
use crate::controls::render_controls;
use crate::inspector::render_inspector;
use crate::markers::MarkerBoard;
use crate::theme::*;
use eframe::egui;
use qviz_core::placement::keys;
use qviz_core::{
    Animator, Engine, EngineConfig, Error, MemoryStore, Projection, Result, RolePlacement, RunOutcome, Selection, SelectionStore,
};

const CONFIG_KEY: &str = "qviz.engine";

/// Writes options straight into eframe's key/value storage.
struct EframeStore<'a>(&'a mut dyn eframe::Storage);

impl SelectionStore for EframeStore<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.set_string(key, value.to_string());
        Ok(())
    }
}

pub struct QvizApp {
    pub engine: Engine,
    pub selection: Selection,
    pub placement: RolePlacement,
    pub board: MarkerBoard,
    pub sweep: SweepPanel,
    /// One-line message for the operator, e.g. why a run did not start.
    pub notice: Option<String>,
    pub last_frame_time: f64,
    was_running: bool,
}

impl QvizApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        if let Some(storage) = cc.storage {
            let stored = MemoryStore::from_pairs(
                keys::ALL
                    .iter()
                    .filter_map(|key| storage.get_string(key).map(|value| (*key, value))),
            );
            app.selection = Selection::load(&stored);
            if let Some(config) = eframe::get_value::<EngineConfig>(storage, CONFIG_KEY) {
                if let Err(err) = app.engine.set_config(config) {
                    log::warn!("ignoring stored engine config: {}", err);
                }
            }
        }
        app.refresh_layout();
        app
    }

    pub fn refresh_layout(&mut self) {
        self.placement = RolePlacement::resolve(&self.selection);
        self.board.layout(&self.placement);
    }

    /// Called by the controls after the operator edited the selection.
    pub fn selection_changed(&mut self) {
        if self.engine.on_selection_changed(&self.selection) {
            self.notice = None;
            self.refresh_layout();
        }
    }

    pub fn start(&mut self) {
        self.refresh_layout();
        self.board.clear_markers();
        match self.engine.start_run(&self.selection) {
            Ok(key) => {
                log::info!("started {}", key);
                self.notice = None;
            }
            Err(err @ Error::Unsupported { .. }) => {
                log::warn!("{}", err);
                self.notice = Some("Selected scenario is not implemented yet".to_string());
            }
            Err(err) => {
                log::warn!("could not start: {}", err);
                self.notice = Some(err.to_string());
            }
        }
    }

    pub fn projected_us(&self) -> Option<u64> {
        self.engine
            .projected_latency_us(&self.selection, Projection::ClientVisible)
            .ok()
    }

    fn on_run_finished(&mut self) {
        let Some(result) = self.engine.last_result() else {
            return;
        };
        if let RunOutcome::Failed { message } = &result.outcome {
            log::error!("animation failed: {}", message);
            self.notice = Some("An error occurred during the animation".to_string());
        }
    }
}

impl Default for QvizApp {
    fn default() -> Self {
        let selection = Selection::default();
        Self {
            engine: Engine::default(),
            placement: RolePlacement::resolve(&selection),
            selection,
            board: MarkerBoard::default(),
            sweep: SweepPanel::default(),
            notice: None,
            last_frame_time: 0.0,
            was_running: false,
        }
    }
}

impl eframe::App for QvizApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self.engine.config());
        self.selection.save(&mut EframeStore(storage));
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_real_time = ctx.input(|i| i.time);
        let dt = (current_real_time - self.last_frame_time).max(0.0);
        self.last_frame_time = current_real_time;

        if self.engine.is_running() {
            // Cap the step so a stalled frame does not skip whole hops.
            let dt_us = (dt.min(0.1) * 1_000_000.0) as u64;
            self.engine.advance(dt_us, &mut self.board);
            ctx.request_repaint();
        }
        let running = self.engine.is_running();
        if self.was_running && !running {
            self.on_run_finished();
        }
        self.was_running = running;

        egui::TopBottomPanel::bottom("readout")
            .frame(egui::Frame::none().fill(COLOR_PANEL).inner_margin(12.0))
            .show(ctx, |ui| {
                self.render_readout(ui);
            });
        egui::SidePanel::left("controls")
            .default_width(220.0)
            .show(ctx, |ui| {
                render_controls(ui, self);
            });
        egui::SidePanel::right("inspector")
            .default_width(300.0)
            .show(ctx, |ui| {
                render_inspector(ui, self);
            });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(COLOR_BG))
            .show(ctx, |ui| {
                self.render_canvas(ui);
            });
    }
}

impl QvizApp {
    fn render_readout(&mut self, ui: &mut egui::Ui) {
        let readout = self.engine.readout();
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new("CLIENT LATENCY").small().color(COLOR_TEXT_DIM));
                let (text, color) = match readout.client_latency_us {
                    Some(us) => (ms(us), COLOR_SUCCESS),
                    None if self.engine.is_running() => (ms(readout.accumulated_us), COLOR_ACCENT),
                    None => ("-".to_string(), COLOR_TEXT_DIM),
                };
                ui.label(egui::RichText::new(text).heading().strong().color(color));
            });
            ui.add_space(20.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new("PROJECTED").small().color(COLOR_TEXT_DIM));
                let projected = self.projected_us().map_or("n/a".to_string(), ms);
                ui.label(egui::RichText::new(projected).color(COLOR_TEXT_DIM));
            });
            if readout.client_latency_us.is_some() && self.engine.is_running() {
                ui.add_space(20.0);
                ui.label(egui::RichText::new("client acknowledged, background work still running").color(COLOR_WARN));
            }
            if let Some(notice) = &self.notice {
                ui.add_space(20.0);
                ui.label(egui::RichText::new(notice).color(COLOR_CRITICAL));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.2}s", self.engine.time as f64 / 1_000_000.0))
                            .strong()
                            .color(COLOR_TEXT),
                    );
                    ui.label(egui::RichText::new("V-CLOCK").small().color(COLOR_TEXT_DIM));
                });
            });
        });
    }
}
