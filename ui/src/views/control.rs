use crate::views::RoleView;
use eframe::egui;
use qviz_core::{DatabaseFamily, LogicalNode, RolePlacement};

#[derive(Default)]
pub struct ControlView;

impl RoleView for ControlView {
    fn name(&self, family: DatabaseFamily) -> &'static str {
        match family {
            DatabaseFamily::TwoTier => "PD",
            DatabaseFamily::SingleTier => "Master",
        }
    }

    fn description(&self, family: DatabaseFamily) -> &'static str {
        match family {
            DatabaseFamily::TwoTier => "Placement driver leader, hands out timestamps",
            DatabaseFamily::SingleTier => "Master leader, keeps tablet metadata",
        }
    }

    fn color(&self) -> egui::Color32 {
        egui::Color32::from_rgb(180, 142, 173) // Purple
    }

    fn render_canvas(&self, ui: &mut egui::Ui, rect: egui::Rect, _node: LogicalNode, placement: &RolePlacement) {
        if placement.family == DatabaseFamily::TwoTier {
            ui.painter().text(
                rect.right_bottom() - egui::vec2(8.0, 6.0),
                egui::Align2::RIGHT_BOTTOM,
                "TSO",
                egui::FontId::proportional(10.0),
                self.color(),
            );
        }
    }
}
