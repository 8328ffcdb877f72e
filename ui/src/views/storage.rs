use crate::theme::*;
use crate::views::RoleView;
use eframe::egui;
use qviz_core::{DatabaseFamily, LogicalNode, RolePlacement};

#[derive(Default)]
pub struct StorageView;

impl RoleView for StorageView {
    fn name(&self, family: DatabaseFamily) -> &'static str {
        match family {
            DatabaseFamily::TwoTier => "KV",
            DatabaseFamily::SingleTier => "Tablet",
        }
    }

    fn description(&self, family: DatabaseFamily) -> &'static str {
        match family {
            DatabaseFamily::TwoTier => "Replicated key-value store",
            DatabaseFamily::SingleTier => "Tablet server, coordinator and storage in one",
        }
    }

    fn color(&self) -> egui::Color32 {
        egui::Color32::from_rgb(129, 161, 193) // Blue
    }

    fn render_canvas(&self, ui: &mut egui::Ui, rect: egui::Rect, node: LogicalNode, placement: &RolePlacement) {
        let painter = ui.painter();
        let font = egui::FontId::proportional(10.0);
        let anchor = rect.right_bottom() - egui::vec2(8.0, 6.0);

        if placement.is_data_leader(node) {
            painter.text(anchor, egui::Align2::RIGHT_BOTTOM, "★ LEADER", font, COLOR_WARN);
        } else if placement.transaction_leader == Some(node.region) {
            painter.text(anchor, egui::Align2::RIGHT_BOTTOM, "★ TXN STATUS", font, COLOR_ACCENT);
        } else {
            painter.text(anchor, egui::Align2::RIGHT_BOTTOM, "follower", font, COLOR_TEXT_DIM);
        }
    }
}
