use eframe::egui::{Pos2, Vec2};

use crate::content::{NodeId, Tree};
use crate::info_panel::InfoPanel;
use crate::scene::{MarkerHandle, MarkerRole, Scene, render_level};
use crate::viewport::{ViewGeometry, ViewTransform, Viewport, WORLD_CENTER};

use super::state::NavigationState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorConfig {
    pub radius: f32,
    pub transition_secs: f64,
    pub target_scale: f32,
    /// Width of the info panel docked over the right edge of the map.
    pub reserved_width: f32,
    pub vertical_offset: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            radius: 300.0,
            transition_secs: 0.52,
            target_scale: 1.0,
            reserved_width: 350.0,
            vertical_offset: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Descend { node: NodeId, marker: MarkerHandle },
    AscendToParent,
    AscendToIndex(usize),
    SelectTerminal { node: NodeId, marker: MarkerHandle },
    JumpTo(NodeId),
    Hover(NodeId),
    Unhover,
    PanStart(Pos2),
    PanMove(Pos2),
    PanEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Continuation {
    /// Snap to the canonical transform, then redraw.
    SnapAndRender,
    Render,
}

#[derive(Clone, Copy, Debug)]
struct PendingStep {
    continuation: Continuation,
    settles_at: f64,
}

/// Runs the map: owns the tree, the navigation state, the viewport and the
/// current drawing, and sequences animated transitions between levels.
///
/// Navigation messages arriving while a transition is still settling are
/// dropped, never queued. Hover and pan messages always apply.
pub struct Navigator {
    tree: Tree,
    state: NavigationState,
    viewport: Viewport,
    geometry: ViewGeometry,
    scene: Scene,
    panel: InfoPanel,
    panel_revision: u64,
    pending: Option<PendingStep>,
    config: NavigatorConfig,
}

impl Navigator {
    pub fn new(tree: Tree, config: NavigatorConfig, screen: Vec2) -> Self {
        let geometry = ViewGeometry {
            screen,
            reserved_width: config.reserved_width,
            vertical_offset: config.vertical_offset,
        };
        let state = NavigationState::new(tree.root());
        let panel = InfoPanel::present(&tree, &state, tree.root());

        let mut navigator = Self {
            viewport: Viewport::new(geometry.canonical(config.target_scale)),
            tree,
            state,
            geometry,
            scene: Scene::default(),
            panel,
            panel_revision: 0,
            pending: None,
            config,
        };
        navigator.render();
        navigator
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// Bumped every time the info panel is re-presented.
    #[cfg(test)]
    pub fn panel_revision(&self) -> u64 {
        self.panel_revision
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.map(|pending| pending.settles_at)
    }

    pub fn set_screen_size(&mut self, screen: Vec2) {
        self.geometry.screen = screen;
    }

    /// Puts the canonical center back in the middle of the free screen
    /// area without animating. Refused mid-transition.
    pub fn snap_to_center(&mut self) -> Dispatch {
        let canonical = self.geometry.canonical(self.config.target_scale);
        if self.pending.is_some() || self.viewport.settled() == canonical {
            return Dispatch::Ignored;
        }

        self.viewport.snap_to(canonical);
        Dispatch::Applied
    }

    pub fn dispatch(&mut self, message: Message, now: f64) -> Dispatch {
        let outcome = match message {
            Message::Descend { node, marker } => self.descend(node, marker, now),
            Message::AscendToParent => self.ascend_to_parent(now),
            Message::AscendToIndex(index) => self.ascend_to_index(index, now),
            Message::SelectTerminal { node, marker } => {
                if self.navigation_locked("select") {
                    Dispatch::Ignored
                } else {
                    self.select_terminal(node, Some(marker))
                }
            }
            Message::JumpTo(node) => self.jump_to(node, now),
            Message::Hover(node) => {
                if self.state.hover(node) {
                    self.present(node);
                    Dispatch::Applied
                } else {
                    Dispatch::Ignored
                }
            }
            Message::Unhover => {
                if self.state.unhover() {
                    self.present(self.state.current());
                    Dispatch::Applied
                } else {
                    Dispatch::Ignored
                }
            }
            Message::PanStart(pointer) => {
                self.viewport.begin_pan(pointer);
                Dispatch::Applied
            }
            Message::PanMove(pointer) => {
                if self.viewport.pan_to(pointer) {
                    Dispatch::Applied
                } else {
                    Dispatch::Ignored
                }
            }
            Message::PanEnd => {
                self.viewport.end_pan();
                Dispatch::Applied
            }
        };

        self.debug_check_invariants();
        outcome
    }

    /// Advances a pending transition once its animation has had time to
    /// settle. Returns `true` when the map was redrawn.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.settles_at {
            return false;
        }

        self.pending = None;
        if pending.continuation == Continuation::SnapAndRender {
            self.viewport
                .snap_to(self.geometry.canonical(self.config.target_scale));
        }
        self.render();
        self.debug_check_invariants();
        true
    }

    fn navigation_locked(&self, action: &str) -> bool {
        if self.pending.is_some() {
            log::debug!("ignoring {action} while a transition is settling");
            return true;
        }
        false
    }

    fn descend(&mut self, node: NodeId, marker: MarkerHandle, now: f64) -> Dispatch {
        if self.navigation_locked("descend") || node == self.state.current() {
            return Dispatch::Ignored;
        }

        if self.tree.node(node).is_terminal() {
            return self.select_terminal(node, Some(marker));
        }

        let origin = self
            .scene
            .marker(marker)
            .filter(|marker| marker.node == node && marker.role == MarkerRole::Child)
            .map(|marker| marker.position)
            .unwrap_or(WORLD_CENTER);

        self.state.descend(&self.tree, node);
        log::info!("descending into {:?}", self.tree.node(node).name);

        let target = self
            .geometry
            .center_on(origin, self.config.target_scale, false);
        self.begin_transition(target, Continuation::SnapAndRender, now);
        Dispatch::Applied
    }

    fn ascend_to_parent(&mut self, now: f64) -> Dispatch {
        if self.navigation_locked("ascend") || !self.state.ascend_to_parent() {
            return Dispatch::Ignored;
        }

        log::info!(
            "ascending to {:?}",
            self.tree.node(self.state.current()).name
        );
        self.begin_recenter(now);
        Dispatch::Applied
    }

    fn ascend_to_index(&mut self, index: usize, now: f64) -> Dispatch {
        if self.navigation_locked("breadcrumb jump") || !self.state.ascend_to_index(index) {
            return Dispatch::Ignored;
        }

        log::info!(
            "jumping back to breadcrumb {index} ({:?})",
            self.tree.node(self.state.current()).name
        );
        self.begin_recenter(now);
        Dispatch::Applied
    }

    fn jump_to(&mut self, node: NodeId, now: f64) -> Dispatch {
        if self.navigation_locked("jump") || self.tree.get(node).is_none() {
            return Dispatch::Ignored;
        }

        let target = self.tree.node(node);
        if target.is_terminal()
            && let Some(parent) = target.parent
        {
            if parent == self.state.current() {
                let marker = self.scene.marker_for(node).map(|marker| marker.handle);
                return self.select_terminal(node, marker);
            }

            self.state.jump_to(&self.tree, parent);
            self.state.select_terminal(&self.tree, node, None);
        } else if !self.state.jump_to(&self.tree, node) {
            return Dispatch::Ignored;
        }

        log::info!("jumping to {:?}", self.tree.node(node).name);
        self.begin_recenter(now);
        Dispatch::Applied
    }

    fn select_terminal(&mut self, node: NodeId, marker: Option<MarkerHandle>) -> Dispatch {
        if !self.tree.node(node).is_terminal() {
            return Dispatch::Ignored;
        }

        let marker = marker.filter(|handle| {
            self.scene
                .marker(*handle)
                .is_some_and(|marker| marker.node == node)
        });
        self.state.select_terminal(&self.tree, node, marker);
        self.scene.set_highlight(marker);
        self.present(node);
        log::debug!("selected terminal {}", self.tree.node(node).identity_key());
        Dispatch::Applied
    }

    fn begin_recenter(&mut self, now: f64) {
        let target = self
            .geometry
            .center_on(WORLD_CENTER, self.config.target_scale, true);
        self.begin_transition(target, Continuation::Render, now);
    }

    fn begin_transition(&mut self, target: ViewTransform, continuation: Continuation, now: f64) {
        // The outgoing level keeps no highlight once navigation cleared it.
        self.scene.set_highlight(self.state.highlighted());
        let settles_at = self
            .viewport
            .animate_to(target, now, self.config.transition_secs);
        self.pending = Some(PendingStep {
            continuation,
            settles_at,
        });
    }

    fn render(&mut self) {
        render_level(&self.tree, &self.state, &mut self.scene, self.config.radius);
        self.state.set_highlighted(self.scene.highlighted());
        self.state.settle_focus();
        self.present(self.state.focus_target());
    }

    fn present(&mut self, node: NodeId) {
        self.panel = InfoPanel::present(&self.tree, &self.state, node);
        self.panel_revision = self.panel_revision.wrapping_add(1);
        log::trace!(
            "info panel revision {} shows {:?}",
            self.panel_revision,
            self.panel.title
        );
    }

    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(error) = self.state.check_invariants(&self.tree)
        {
            panic!("navigation invariant violated: {error:#}");
        }
    }
}
