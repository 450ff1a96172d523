use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, vec2};

use crate::content::{Tree, load_tree};
use crate::info_panel::InfoPanel;
use crate::navigation::{Message, Navigator, NavigatorConfig};
use crate::scene::MarkerHandle;

mod graph;
mod render_utils;
mod ui;

use ui::draw_info_panel;

pub struct MindMapApp {
    content_path: PathBuf,
    config: NavigatorConfig,
    state: AppState,
}

enum AppState {
    Loading { rx: Receiver<Result<Tree, String>> },
    Ready(Box<ViewModel>),
    Error(InfoPanel),
}

struct ViewModel {
    navigator: Navigator,
    /// Messages raised while drawing this frame, dispatched once the UI
    /// pass is done.
    pending_messages: Vec<Message>,
    hovered_marker: Option<MarkerHandle>,
    hover_scene_revision: u64,
    centered_once: bool,
    canvas_height: f32,
    search: String,
}

impl MindMapApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        content_path: PathBuf,
        config: NavigatorConfig,
    ) -> Self {
        let state = Self::start_load(content_path.clone());
        Self {
            content_path,
            config,
            state,
        }
    }

    fn start_load(content_path: PathBuf) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_tree(&content_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }

    fn load_failed(error: String) -> AppState {
        log::warn!("content load failed: {error}");
        AppState::Error(InfoPanel::error(error))
    }
}

impl eframe::App for MindMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(tree)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            tree,
                            self.config,
                        ))));
                    }
                    Ok(Err(error)) => transition = Some(Self::load_failed(error)),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Self::load_failed(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading content...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(panel) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.set_max_width(ui.available_width().min(560.0));
                    ui.add_space(24.0);
                    draw_info_panel(ui, panel, &mut Vec::new());
                    ui.add_space(10.0);
                    ui.label(format!("Content path: {}", self.content_path.display()));
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.content_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(tree: Tree, config: NavigatorConfig) -> Self {
        // Real canvas size arrives with the first frame; see `centered_once`.
        let navigator = Navigator::new(tree, config, vec2(1440.0, 920.0));
        let hover_scene_revision = navigator.scene().revision();

        Self {
            navigator,
            pending_messages: Vec::new(),
            hovered_marker: None,
            hover_scene_revision,
            centered_once: false,
            canvas_height: 0.0,
            search: String::new(),
        }
    }
}
