use eframe::egui;
use qviz_core::{DatabaseFamily, LogicalNode, Role, RolePlacement};

pub mod control;
pub mod entry;
pub mod storage;

/// The visual counterpart of a role.
pub trait RoleView {
    /// Short label shown in the node box, depends on the database family.
    fn name(&self, family: DatabaseFamily) -> &'static str;
    fn description(&self, family: DatabaseFamily) -> &'static str;
    fn color(&self) -> egui::Color32;
    /// Role specific decorations inside an already drawn node box.
    fn render_canvas(&self, _ui: &mut egui::Ui, _rect: egui::Rect, _node: LogicalNode, _placement: &RolePlacement) {}
}

macro_rules! register_views {
    ($($role:ident => $view_type:ty),* $(,)?) => {
        pub fn get_view(role: Role) -> &'static dyn RoleView {
            match role {
                $(
                    Role::$role => {
                        static INSTANCE: std::sync::OnceLock<$view_type> = std::sync::OnceLock::new();
                        INSTANCE.get_or_init(Default::default) as &dyn RoleView
                    }
                )*
            }
        }
    };
}

register_views!(
    Client => entry::ClientView,
    SqlGateway => entry::GatewayView,
    ControlLeader => control::ControlView,
    Storage => storage::StorageView,
);
