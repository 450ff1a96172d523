use crate::content::{NodeId, Tree};
use crate::layout::layout_radial;
use crate::navigation::NavigationState;
use crate::util::display_name;
use crate::viewport::WORLD_CENTER;

use super::{MarkerRole, Scene};

/// Redraws the active level into `scene`: the current node at the world
/// center, its parent (if any) in the first slot of the ring, then its
/// children in document order.
pub fn render_level(tree: &Tree, state: &NavigationState, scene: &mut Scene, radius: f32) {
    scene.clear();

    let depth = state.depth();
    let current = tree.node(state.current());
    scene.add_marker(
        current.id,
        MarkerRole::Center,
        depth,
        WORLD_CENTER,
        display_name(&current.name),
    );

    let mut items: Vec<(NodeId, MarkerRole)> = Vec::with_capacity(current.children.len() + 1);
    if let Some(parent) = state.parent() {
        items.push((parent, MarkerRole::Ancestor));
    }
    items.extend(current.children.iter().map(|child| (*child, MarkerRole::Child)));

    for placement in layout_radial(WORLD_CENTER, &items, radius) {
        let (node_id, role) = placement.item;
        let node = tree.node(node_id);
        let marker_depth = match role {
            MarkerRole::Ancestor => depth.saturating_sub(1),
            MarkerRole::Center | MarkerRole::Child => depth + 1,
        };

        scene.add_edge(WORLD_CENTER, placement.position);
        let handle = scene.add_marker(
            node_id,
            role,
            marker_depth,
            placement.position,
            display_name(&node.name),
        );

        if role == MarkerRole::Child && state.selected_terminal() == Some(node_id) {
            scene.set_highlight(Some(handle));
        }
    }

    log::debug!(
        "rendered level {:?} at depth {depth}: {} markers",
        current.name,
        scene.markers().len()
    );
}
