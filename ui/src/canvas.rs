use crate::app::QvizApp;
use crate::theme::*;
use crate::views::get_view;
use eframe::egui;
use qviz_core::{LogicalNode, Position, Region};

const NODE_SIZE: egui::Vec2 = egui::vec2(150.0, 44.0);

fn to_screen(rect: egui::Rect, pos: Position) -> egui::Pos2 {
    egui::pos2(
        rect.left() + pos.x * rect.width(),
        rect.top() + pos.y * rect.height(),
    )
}

impl QvizApp {
    pub fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let canvas_rect = ui.max_rect();
        let painter = ui.painter().clone();

        // region columns
        let column_width = canvas_rect.width() / Region::ALL.len() as f32;
        for (i, region) in Region::ALL.into_iter().enumerate() {
            let column = egui::Rect::from_min_size(
                canvas_rect.left_top() + egui::vec2(i as f32 * column_width, 0.0),
                egui::vec2(column_width, canvas_rect.height()),
            )
            .shrink(6.0);
            let tint = region_tint(region);
            painter.rect_filled(column, 8.0, tint.gamma_multiply(0.06));
            painter.rect_stroke(column, 8.0, egui::Stroke::new(1.0, tint.gamma_multiply(0.4)));
            painter.text(
                column.center_top() + egui::vec2(0.0, 10.0),
                egui::Align2::CENTER_TOP,
                region.to_string().to_uppercase(),
                egui::FontId::proportional(12.0),
                tint,
            );
        }

        let mut nodes: Vec<(LogicalNode, Position)> = self.board.nodes().collect();
        nodes.sort_by_key(|(node, _)| *node);
        for (node, pos) in nodes {
            let view = get_view(node.role);
            let center = to_screen(canvas_rect, pos);
            let node_rect = egui::Rect::from_center_size(center, NODE_SIZE);
            let color = view.color();

            painter.rect_filled(node_rect, 6.0, color.gamma_multiply(0.12));
            let border = if self.placement.is_data_leader(node) {
                COLOR_WARN
            } else {
                color.gamma_multiply(0.5)
            };
            painter.rect_stroke(node_rect, 6.0, egui::Stroke::new(1.5, border));
            painter.text(
                node_rect.left_top() + egui::vec2(10.0, 8.0),
                egui::Align2::LEFT_TOP,
                view.name(self.placement.family).to_uppercase(),
                egui::FontId::proportional(13.0),
                COLOR_TEXT,
            );
            painter.text(
                node_rect.left_bottom() + egui::vec2(10.0, -6.0),
                egui::Align2::LEFT_BOTTOM,
                node.to_string(),
                egui::FontId::proportional(10.0),
                COLOR_TEXT_DIM,
            );
            view.render_canvas(ui, node_rect, node, &self.placement);

            let hover = ui.interact(node_rect, egui::Id::new(("node", node)), egui::Sense::hover());
            hover.on_hover_text(view.description(self.placement.family));
        }

        let now = self.engine.time;
        for flight in self.board.flights() {
            let from = to_screen(canvas_rect, flight.from);
            let to = to_screen(canvas_rect, flight.to);
            painter.line_segment([from, to], egui::Stroke::new(1.0, COLOR_ACCENT.gamma_multiply(0.25)));
            let pos = to_screen(canvas_rect, flight.position_at(now));
            painter.circle_filled(pos, 6.0, COLOR_ACCENT);
        }
    }
}
