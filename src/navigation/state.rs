use anyhow::{Result, bail};

use crate::content::{NodeId, Tree};
use crate::scene::MarkerHandle;

/// Where the map is centered, how it got there, and what the info panel is
/// looking at.
///
/// The `ancestors` stack always spells out the real path from the root to
/// the parent of `current`; it is empty exactly when `current` is the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    current: NodeId,
    ancestors: Vec<NodeId>,
    selected_terminal: Option<NodeId>,
    focused: NodeId,
    highlighted: Option<MarkerHandle>,
}

impl NavigationState {
    pub fn new(root: NodeId) -> Self {
        Self {
            current: root,
            ancestors: Vec::new(),
            selected_terminal: None,
            focused: root,
            highlighted: None,
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn ancestors(&self) -> &[NodeId] {
        &self.ancestors
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.ancestors.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn selected_terminal(&self) -> Option<NodeId> {
        self.selected_terminal
    }

    pub fn focused(&self) -> NodeId {
        self.focused
    }

    pub fn highlighted(&self) -> Option<MarkerHandle> {
        self.highlighted
    }

    /// Node the info panel should settle on: the selection if any, else
    /// the centered node.
    pub fn focus_target(&self) -> NodeId {
        self.selected_terminal.unwrap_or(self.current)
    }

    pub(super) fn descend(&mut self, tree: &Tree, child: NodeId) {
        assert!(
            tree.is_child_of(child, self.current),
            "cannot descend into {child:?}: not a child of {:?}",
            self.current
        );
        assert!(
            !tree.node(child).is_terminal(),
            "cannot descend into terminal node {child:?}"
        );

        self.clear_selection();
        self.ancestors.push(self.current);
        self.current = child;
    }

    pub(super) fn ascend_to_parent(&mut self) -> bool {
        let Some(parent) = self.ancestors.pop() else {
            return false;
        };

        self.clear_selection();
        self.current = parent;
        true
    }

    pub(super) fn ascend_to_index(&mut self, index: usize) -> bool {
        assert!(
            index < self.ancestors.len(),
            "breadcrumb index {index} out of range for {} ancestors",
            self.ancestors.len()
        );

        let target = self.ancestors[index];
        if target == self.current {
            return false;
        }

        self.ancestors.truncate(index);
        self.clear_selection();
        self.current = target;
        true
    }

    pub(super) fn jump_to(&mut self, tree: &Tree, node: NodeId) -> bool {
        let mut path = tree.path_to(node);
        path.pop();
        if node == self.current && path == self.ancestors {
            return false;
        }

        self.clear_selection();
        self.ancestors = path;
        self.current = node;
        true
    }

    pub(super) fn select_terminal(
        &mut self,
        tree: &Tree,
        node: NodeId,
        marker: Option<MarkerHandle>,
    ) {
        assert!(
            tree.node(node).is_terminal(),
            "only terminal nodes can be selected, got {node:?}"
        );

        self.selected_terminal = Some(node);
        self.focused = node;
        self.highlighted = marker;
    }

    /// Returns `true` when the info panel has to switch to `node`.
    pub(super) fn hover(&mut self, node: NodeId) -> bool {
        if self.selected_terminal.is_some() || self.focused == node {
            return false;
        }

        self.focused = node;
        true
    }

    pub(super) fn unhover(&mut self) -> bool {
        if self.selected_terminal.is_some() || self.focused == self.current {
            return false;
        }

        self.focused = self.current;
        true
    }

    pub(super) fn set_highlighted(&mut self, marker: Option<MarkerHandle>) {
        self.highlighted = marker;
    }

    pub(super) fn settle_focus(&mut self) {
        self.focused = self.focus_target();
    }

    fn clear_selection(&mut self) {
        self.selected_terminal = None;
        self.highlighted = None;
    }

    pub fn check_invariants(&self, tree: &Tree) -> Result<()> {
        let Some(&first) = self.ancestors.first() else {
            if self.current != tree.root() {
                bail!("empty ancestor stack but {:?} is not the root", self.current);
            }
            return self.check_selection(tree);
        };

        if first != tree.root() {
            bail!("ancestor stack starts at {first:?} instead of the root");
        }

        let chain = self.ancestors.iter().chain(std::iter::once(&self.current));
        for (parent, child) in self.ancestors.iter().zip(chain.skip(1)) {
            if !tree.node(*parent).children.contains(child) {
                bail!("{child:?} is not a child of {parent:?} in the ancestor stack");
            }
        }

        self.check_selection(tree)
    }

    fn check_selection(&self, tree: &Tree) -> Result<()> {
        if let Some(selected) = self.selected_terminal
            && !tree.node(selected).is_terminal()
        {
            bail!("selected node {selected:?} has children");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::content::parse_document;

    use super::*;

    const DOCUMENT: &str = r#"{
        "name": "AI Safety",
        "children": [
            {
                "name": "Alignment",
                "children": [
                    { "name": "RLHF" },
                    { "name": "Scalable Oversight", "children": [ { "name": "Debate" } ] }
                ]
            },
            { "name": "Interpretability" }
        ]
    }"#;

    fn id(tree: &Tree, name: &str) -> NodeId {
        tree.find_by_name(name).unwrap()
    }

    #[test]
    fn descend_pushes_and_ascend_pops() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        let before = state.clone();

        state.descend(&tree, id(&tree, "Alignment"));
        assert_eq!(state.current(), id(&tree, "Alignment"));
        assert_eq!(state.ancestors(), &[tree.root()]);
        state.check_invariants(&tree).unwrap();

        assert!(state.ascend_to_parent());
        assert_eq!(state.current(), before.current());
        assert_eq!(state.ancestors(), before.ancestors());
        assert!(!state.ascend_to_parent());
    }

    #[test]
    fn ascend_to_index_truncates_the_stack() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        state.descend(&tree, id(&tree, "Alignment"));
        state.descend(&tree, id(&tree, "Scalable Oversight"));
        assert_eq!(state.depth(), 2);

        assert!(state.ascend_to_index(1));
        assert_eq!(state.current(), id(&tree, "Alignment"));
        assert_eq!(state.ancestors(), &[tree.root()]);
        state.check_invariants(&tree).unwrap();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn ascend_to_missing_index_panics() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        state.descend(&tree, id(&tree, "Alignment"));
        state.ascend_to_index(1);
    }

    #[test]
    #[should_panic(expected = "not a child")]
    fn descend_to_grandchild_panics() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        state.descend(&tree, id(&tree, "Scalable Oversight"));
    }

    #[test]
    fn hover_respects_selection() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        let alignment = id(&tree, "Alignment");
        let interp = id(&tree, "Interpretability");

        assert!(state.hover(alignment));
        assert!(!state.hover(alignment));
        assert!(state.unhover());
        assert!(!state.unhover());

        state.select_terminal(&tree, interp, None);
        assert!(!state.hover(alignment));
        assert!(!state.unhover());
        assert_eq!(state.focused(), interp);
    }

    #[test]
    fn jump_rebuilds_the_path() {
        let tree = parse_document(DOCUMENT).unwrap();
        let mut state = NavigationState::new(tree.root());
        let oversight = id(&tree, "Scalable Oversight");

        assert!(state.jump_to(&tree, oversight));
        assert_eq!(state.ancestors(), &[tree.root(), id(&tree, "Alignment")]);
        state.check_invariants(&tree).unwrap();
        assert!(!state.jump_to(&tree, oversight));
    }

    #[test]
    fn invariant_check_spots_broken_paths() {
        let tree = parse_document(DOCUMENT).unwrap();
        let state = NavigationState {
            current: id(&tree, "Debate"),
            ancestors: vec![tree.root()],
            selected_terminal: None,
            focused: tree.root(),
            highlighted: None,
        };
        assert!(state.check_invariants(&tree).is_err());

        let state = NavigationState {
            current: tree.root(),
            ancestors: Vec::new(),
            selected_terminal: Some(id(&tree, "Alignment")),
            focused: tree.root(),
            highlighted: None,
        };
        assert!(state.check_invariants(&tree).is_err());
    }
}
