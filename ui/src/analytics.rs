use crate::theme::*;
use eframe::egui;
use qviz_core::{Engine, PlacementSweep, SweepSummary};

/// One scenario's latency spread across every placement, drawn as a range
/// bar with a median tick.
pub struct SweepBar<'a> {
    label: String,
    summary: &'a SweepSummary,
    scale_us: u64,
    color: egui::Color32,
    size: egui::Vec2,
}

impl<'a> SweepBar<'a> {
    pub fn new(label: &str, summary: &'a SweepSummary, scale_us: u64, color: egui::Color32) -> Self {
        Self {
            label: label.to_string(),
            summary,
            scale_us: scale_us.max(1),
            color,
            size: egui::vec2(260.0, 38.0),
        }
    }
}

impl egui::Widget for SweepBar<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.size, egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            painter.rect_filled(rect, 2.0, egui::Color32::from_black_alpha(40));
            painter.rect_stroke(rect, 2.0, egui::Stroke::new(1.0, egui::Color32::from_gray(60)));

            // Top 16 pixels hold the labels
            let bar_area = egui::Rect::from_min_max(
                rect.left_top() + egui::vec2(8.0, 18.0),
                rect.right_bottom() - egui::vec2(8.0, 6.0),
            );
            let x_of = |us: u64| bar_area.left() + (us as f32 / self.scale_us as f32).min(1.0) * bar_area.width();

            let range = egui::Rect::from_min_max(
                egui::pos2(x_of(self.summary.min_us), bar_area.top()),
                egui::pos2(x_of(self.summary.max_us).max(x_of(self.summary.min_us) + 2.0), bar_area.bottom()),
            );
            painter.rect_filled(range, 2.0, self.color.gamma_multiply(0.35));
            let median_x = x_of(self.summary.median_us);
            painter.line_segment(
                [egui::pos2(median_x, bar_area.top()), egui::pos2(median_x, bar_area.bottom())],
                egui::Stroke::new(2.0, self.color),
            );

            painter.text(
                rect.left_top() + egui::vec2(8.0, 3.0),
                egui::Align2::LEFT_TOP,
                &self.label,
                egui::FontId::proportional(10.0),
                COLOR_TEXT_DIM,
            );
            painter.text(
                rect.right_top() + egui::vec2(-8.0, 3.0),
                egui::Align2::RIGHT_TOP,
                format!("{} – {}", ms(self.summary.min_us), ms(self.summary.max_us)),
                egui::FontId::proportional(11.0),
                self.color,
            );
        }

        response.on_hover_text(format!(
            "{} placements, median {}, mean {:.1}ms",
            self.summary.samples,
            ms(self.summary.median_us),
            self.summary.mean_us / 1000.0
        ))
    }
}

/// Placement sweep over the whole catalog, recomputed on demand.
#[derive(Default)]
pub struct SweepPanel {
    summaries: Vec<SweepSummary>,
    error: Option<String>,
}

impl SweepPanel {
    pub fn render(&mut self, ui: &mut egui::Ui, engine: &Engine) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("PLACEMENT SWEEP").small().strong().color(COLOR_TEXT_DIM));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Compare").clicked() {
                    self.recompute(engine);
                }
            });
        });

        if let Some(err) = &self.error {
            ui.label(egui::RichText::new(err).color(COLOR_CRITICAL));
        }

        let scale_us = self.summaries.iter().map(|s| s.max_us).max().unwrap_or(1);
        egui::ScrollArea::vertical().id_salt("sweep").show(ui, |ui| {
            for summary in &self.summaries {
                let title = engine
                    .catalog()
                    .lookup(summary.key.family, summary.key.operation)
                    .map_or("", |info| info.title);
                let label = format!("{} · {}", summary.key, title);
                ui.add(SweepBar::new(&label, summary, scale_us, COLOR_ACCENT));
                ui.add_space(4.0);
            }
        });
    }

    fn recompute(&mut self, engine: &Engine) {
        let summaries = PlacementSweep::new(engine.config().clone())
            .map(|sweep| sweep.with_catalog(engine.catalog().clone()))
            .and_then(|mut sweep| sweep.run_all());
        match summaries {
            Ok(summaries) => {
                log::info!("swept {} scenarios", summaries.len());
                self.summaries = summaries;
                self.error = None;
            }
            Err(err) => {
                log::warn!("placement sweep failed: {}", err);
                self.error = Some(err.to_string());
            }
        }
    }
}
