mod render;

use eframe::egui::{Pos2, Rect, Vec2, vec2};

use crate::content::NodeId;

pub use render::render_level;

/// Handle to a marker in one particular drawing of the scene. Handles from
/// an earlier drawing never resolve after the scene is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle {
    revision: u64,
    index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerRole {
    Center,
    Ancestor,
    Child,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub handle: MarkerHandle,
    pub node: NodeId,
    pub role: MarkerRole,
    pub depth: usize,
    pub position: Pos2,
    pub label: String,
    pub highlighted: bool,
}

impl Marker {
    /// Pill size in world units, estimated from the label so hit-testing
    /// does not depend on a font backend.
    pub fn size(&self) -> Vec2 {
        let chars = self.label.chars().count() as f32;
        match self.role {
            MarkerRole::Center => vec2((chars * 10.0 + 56.0).clamp(120.0, 340.0), 56.0),
            MarkerRole::Ancestor | MarkerRole::Child => {
                vec2((chars * 7.5 + 36.0).clamp(84.0, 260.0), 38.0)
            }
        }
    }

    pub fn world_rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Pos2,
    pub to: Pos2,
}

/// Retained drawing of the active level: every marker and edge currently
/// on the map, in world coordinates.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    markers: Vec<Marker>,
    edges: Vec<Edge>,
    revision: u64,
}

impl Scene {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.edges.clear();
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn add_marker(
        &mut self,
        node: NodeId,
        role: MarkerRole,
        depth: usize,
        position: Pos2,
        label: impl Into<String>,
    ) -> MarkerHandle {
        let handle = MarkerHandle {
            revision: self.revision,
            index: self.markers.len(),
        };
        self.markers.push(Marker {
            handle,
            node,
            role,
            depth,
            position,
            label: label.into(),
            highlighted: false,
        });
        handle
    }

    pub fn add_edge(&mut self, from: Pos2, to: Pos2) {
        self.edges.push(Edge { from, to });
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&Marker> {
        if handle.revision != self.revision {
            return None;
        }
        self.markers.get(handle.index)
    }

    pub fn marker_for(&self, node: NodeId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.node == node)
    }

    pub fn highlighted(&self) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .find(|marker| marker.highlighted)
            .map(|marker| marker.handle)
    }

    /// Moves the highlighted style to `handle`, leaving at most one
    /// highlighted marker. Stale handles just clear the highlight.
    pub fn set_highlight(&mut self, handle: Option<MarkerHandle>) {
        for marker in &mut self.markers {
            marker.highlighted = false;
        }

        if let Some(handle) = handle
            && handle.revision == self.revision
            && let Some(marker) = self.markers.get_mut(handle.index)
        {
            marker.highlighted = true;
        }
    }

    /// Topmost marker under `world`. Markers drawn later sit on top.
    pub fn hit_test(&self, world: Pos2) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .rev()
            .find(|marker| marker.world_rect().contains(world))
            .map(|marker| marker.handle)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn cleared_scene_invalidates_old_handles() {
        let mut scene = Scene::default();
        let handle = scene.add_marker(NodeId(3), MarkerRole::Child, 1, pos2(0.0, 0.0), "A");
        assert!(scene.marker(handle).is_some());

        scene.clear();
        assert!(scene.markers().is_empty());
        assert!(scene.marker(handle).is_none());

        let fresh = scene.add_marker(NodeId(4), MarkerRole::Child, 1, pos2(0.0, 0.0), "B");
        assert_ne!(handle, fresh);
        scene.set_highlight(Some(handle));
        assert_eq!(scene.highlighted(), None);
    }

    #[test]
    fn highlight_is_exclusive() {
        let mut scene = Scene::default();
        let first = scene.add_marker(NodeId(1), MarkerRole::Child, 1, pos2(0.0, 0.0), "one");
        let second = scene.add_marker(NodeId(2), MarkerRole::Child, 1, pos2(400.0, 0.0), "two");

        scene.set_highlight(Some(first));
        scene.set_highlight(Some(second));
        let highlighted = scene.markers().iter().filter(|m| m.highlighted).count();

        assert_eq!(highlighted, 1);
        assert_eq!(scene.highlighted(), Some(second));

        scene.set_highlight(None);
        assert_eq!(scene.highlighted(), None);
    }

    #[test]
    fn hit_test_prefers_topmost_marker() {
        let mut scene = Scene::default();
        scene.add_marker(NodeId(0), MarkerRole::Center, 0, pos2(0.0, 0.0), "Center");
        let child = scene.add_marker(NodeId(1), MarkerRole::Child, 1, pos2(10.0, 0.0), "Child");

        assert_eq!(scene.hit_test(pos2(10.0, 5.0)), Some(child));
        assert_eq!(scene.hit_test(pos2(500.0, 500.0)), None);
        assert_eq!(scene.edges().len(), 0);
        scene.add_edge(pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(scene.edges().len(), 1);
    }
}
