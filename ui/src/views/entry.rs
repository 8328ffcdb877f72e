use crate::views::RoleView;
use eframe::egui;
use qviz_core::DatabaseFamily;

#[derive(Default)]
pub struct ClientView;

impl RoleView for ClientView {
    fn name(&self, _family: DatabaseFamily) -> &'static str {
        "Client"
    }

    fn description(&self, _family: DatabaseFamily) -> &'static str {
        "Issues the request and waits for the acknowledgement"
    }

    fn color(&self) -> egui::Color32 {
        egui::Color32::from_rgb(163, 190, 140) // Green
    }
}

#[derive(Default)]
pub struct GatewayView;

impl RoleView for GatewayView {
    fn name(&self, _family: DatabaseFamily) -> &'static str {
        "SQL"
    }

    fn description(&self, _family: DatabaseFamily) -> &'static str {
        "Stateless SQL layer in front of the storage tier"
    }

    fn color(&self) -> egui::Color32 {
        egui::Color32::from_rgb(235, 203, 139) // Yellow
    }
}
