use eframe::egui::{Rect, Response, Ui};

use crate::navigation::Message;
use crate::scene::{MarkerHandle, MarkerRole};
use crate::viewport::ViewTransform;

use super::super::ViewModel;

impl ViewModel {
    /// Drags that start on empty map space pan the view. Pan messages go
    /// straight to the navigator so the map follows the pointer this frame.
    pub(in crate::app) fn handle_map_pan(
        &mut self,
        ui: &Ui,
        response: &Response,
        rect: Rect,
        now: f64,
    ) {
        if response.drag_started() {
            let transform = self.navigator.viewport().displayed(now);
            let origin = ui
                .input(|input| input.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());

            if let Some(origin) = origin
                && self
                    .navigator
                    .scene()
                    .hit_test(transform.to_world(rect.min, origin))
                    .is_none()
            {
                self.navigator.dispatch(Message::PanStart(origin), now);
            }
        }

        let panning = self.navigator.viewport().is_panning();
        if panning
            && response.dragged()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.navigator.dispatch(Message::PanMove(pointer), now);
        }

        if panning && !response.dragged() {
            self.navigator.dispatch(Message::PanEnd, now);
        }
    }

    pub(in crate::app) fn hovered_marker(
        &self,
        ui: &Ui,
        response: &Response,
        rect: Rect,
        transform: ViewTransform,
    ) -> Option<MarkerHandle> {
        if !response.contains_pointer() {
            return None;
        }

        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        self.navigator
            .scene()
            .hit_test(transform.to_world(rect.min, pointer))
    }

    /// Turns changes of the hovered marker into enter/leave messages. The
    /// center marker never takes part in hover.
    pub(in crate::app) fn track_hover(&mut self, hovered: Option<MarkerHandle>) {
        let scene = self.navigator.scene();
        if self.hover_scene_revision != scene.revision() {
            self.hover_scene_revision = scene.revision();
            self.hovered_marker = None;
        }

        if hovered == self.hovered_marker {
            return;
        }

        let leaving = self
            .hovered_marker
            .and_then(|handle| scene.marker(handle))
            .is_some_and(|marker| marker.role != MarkerRole::Center);
        let entering = hovered
            .and_then(|handle| scene.marker(handle))
            .filter(|marker| marker.role != MarkerRole::Center)
            .map(|marker| marker.node);

        if leaving {
            self.pending_messages.push(Message::Unhover);
        }
        if let Some(node) = entering {
            self.pending_messages.push(Message::Hover(node));
        }
        self.hovered_marker = hovered;
    }

    pub(in crate::app) fn handle_map_click(
        &mut self,
        response: &Response,
        rect: Rect,
        transform: ViewTransform,
    ) {
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        let scene = self.navigator.scene();
        let Some(marker) = scene
            .hit_test(transform.to_world(rect.min, pointer))
            .and_then(|handle| scene.marker(handle))
        else {
            return;
        };

        let message = match marker.role {
            MarkerRole::Center => return,
            MarkerRole::Ancestor => Message::AscendToParent,
            MarkerRole::Child if self.navigator.tree().node(marker.node).is_terminal() => {
                Message::SelectTerminal {
                    node: marker.node,
                    marker: marker.handle,
                }
            }
            MarkerRole::Child => Message::Descend {
                node: marker.node,
                marker: marker.handle,
            },
        };
        self.pending_messages.push(message);
    }
}
