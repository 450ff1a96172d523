use std::time::Duration;

use eframe::egui::{self, Align2, Context, Key, vec2};

use crate::navigation::{Dispatch, Message};

use super::super::ViewModel;
use super::details::draw_info_panel;
use super::search::draw_topic_search;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|input| input.time);

        if ctx.input(|input| input.key_pressed(Key::Escape)) && !ctx.wants_keyboard_input() {
            self.pending_messages.push(Message::AscendToParent);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_map(ui, now));

        self.draw_navigation_controls(ctx);
        self.draw_info_overlay(ctx);
        self.flush_messages(ctx, now);
    }

    fn flush_messages(&mut self, ctx: &Context, now: f64) {
        let mut applied = false;
        for message in self.pending_messages.drain(..) {
            applied |= self.navigator.dispatch(message, now) == Dispatch::Applied;
        }

        if applied {
            ctx.request_repaint();
        }

        if let Some(deadline) = self.navigator.next_deadline() {
            ctx.request_repaint_after(Duration::from_secs_f64((deadline - now).max(0.0)));
        }
    }

    fn draw_navigation_controls(&mut self, ctx: &Context) {
        let can_navigate = !self.navigator.is_transitioning();
        let has_parent = self.navigator.state().parent().is_some();

        egui::Area::new(egui::Id::new("navigation_controls"))
            .anchor(Align2::LEFT_TOP, vec2(12.0, 12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let back = ui
                        .add_enabled(can_navigate && has_parent, egui::Button::new("← Back"))
                        .on_hover_text("Return to the parent topic (Esc).");
                    if back.clicked() {
                        self.pending_messages.push(Message::AscendToParent);
                    }

                    let reset = ui
                        .add_enabled(can_navigate, egui::Button::new("Reset view"))
                        .on_hover_text("Center the current topic again.");
                    if reset.clicked() {
                        self.navigator.snap_to_center();
                    }
                });
            });
    }

    fn draw_info_overlay(&mut self, ctx: &Context) {
        let panel_width = self.navigator.config().reserved_width;
        if panel_width <= 0.0 {
            return;
        }

        let can_navigate = !self.navigator.is_transitioning();
        let min_height = self.canvas_height;

        egui::Area::new(egui::Id::new("info_panel"))
            .anchor(Align2::RIGHT_TOP, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::window(ui.style())
                    .corner_radius(0.0)
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.set_width((panel_width - 32.0).max(120.0));
                        ui.set_min_height((min_height - 32.0).max(0.0));

                        egui::ScrollArea::vertical()
                            .id_salt(("info_panel_scroll", self.navigator.panel().subject))
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                draw_info_panel(
                                    ui,
                                    self.navigator.panel(),
                                    &mut self.pending_messages,
                                );

                                ui.add_space(12.0);
                                ui.separator();
                                draw_topic_search(
                                    ui,
                                    self.navigator.tree(),
                                    &mut self.search,
                                    can_navigate,
                                    &mut self.pending_messages,
                                );
                            });
                    });
            });
    }
}
