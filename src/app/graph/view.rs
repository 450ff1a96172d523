use eframe::egui::{self, Sense, Ui};

use crate::scene::MarkerRole;

use super::super::ViewModel;
use super::super::render_utils::{draw_background, draw_edge, draw_marker};

impl ViewModel {
    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui, now: f64) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.canvas_height = rect.height();
        self.navigator.set_screen_size(rect.size());
        if !self.centered_once {
            self.navigator.snap_to_center();
            self.centered_once = true;
        }

        if self.navigator.tick(now) {
            ui.ctx().request_repaint();
        }

        self.handle_map_pan(ui, &response, rect, now);

        let transform = self.navigator.viewport().displayed(now);
        draw_background(&painter, rect, transform);

        let hovered = self.hovered_marker(ui, &response, rect, transform);
        self.track_hover(hovered);
        if response.clicked_by(egui::PointerButton::Primary) {
            self.handle_map_click(&response, rect, transform);
        }

        let scene = self.navigator.scene();
        let state = self.navigator.state();
        let hovered_clickable = hovered
            .and_then(|handle| scene.marker(handle))
            .is_some_and(|marker| marker.role != MarkerRole::Center);
        if self.navigator.viewport().is_panning() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if hovered_clickable && !self.navigator.is_transitioning() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        for edge in scene.edges() {
            draw_edge(
                &painter,
                transform.to_screen(rect.min, edge.from),
                transform.to_screen(rect.min, edge.to),
                transform.scale,
            );
        }

        for marker in scene.markers() {
            let emphasized = hovered == Some(marker.handle)
                || (marker.role != MarkerRole::Center && marker.node == state.focused());
            let selected = state.highlighted() == Some(marker.handle);
            draw_marker(&painter, marker, rect.min, transform, emphasized, selected);
        }

        if self.navigator.is_transitioning() || self.navigator.viewport().is_animating(now) {
            ui.ctx().request_repaint();
        }
    }
}
