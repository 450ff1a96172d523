#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Sites,
    Papers,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sites => "Sites",
            Self::Papers => "Papers",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub title: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub authors: Option<String>,
    pub year: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordList {
    pub kind: RecordKind,
    pub records: Vec<Record>,
}

#[derive(Clone, Debug)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub key: Option<String>,
    pub description: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub records: Vec<RecordList>,
}

impl TreeNode {
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Key the document itself identifies this node by: its explicit `id`
    /// when present, otherwise its name. Not unique across the tree.
    pub fn identity_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }

    pub fn records(&self, kind: RecordKind) -> &[Record] {
        self.records
            .iter()
            .find(|list| list.kind == kind)
            .map(|list| list.records.as_slice())
            .unwrap_or(&[])
    }
}

/// Immutable topic tree stored as an arena. Node ids are assigned in
/// depth-first pre-order, so the root is always `NodeId(0)`.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(super) nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    pub fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.get(child).and_then(|node| node.parent) == Some(parent)
    }

    /// Root-to-node path, both ends included.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.node(id).depth + 1);
        let mut cursor = Some(id);
        while let Some(node_id) = cursor {
            path.push(node_id);
            cursor = self.node(node_id).parent;
        }

        path.reverse();
        path
    }

    /// Finds the first node in pre-order with the given name.
    #[cfg(test)]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.id)
    }
}

#[cfg(test)]
mod tests {
    use crate::content::parse_document;

    use super::*;

    const DOCUMENT: &str = r#"{
        "name": "AI Safety",
        "children": [
            { "name": "Alignment", "children": [ { "name": "RLHF" }, { "name": "Debate" } ] },
            { "name": "Interpretability", "id": "interp" }
        ]
    }"#;

    #[test]
    fn ids_follow_pre_order() {
        let tree = parse_document(DOCUMENT).unwrap();
        let names = tree.iter().map(|node| node.name.as_str()).collect::<Vec<_>>();

        assert_eq!(
            names,
            ["AI Safety", "Alignment", "RLHF", "Debate", "Interpretability"]
        );
        assert_eq!(tree.root(), NodeId(0));
        assert_eq!(tree.node(NodeId(2)).depth, 2);
    }

    #[test]
    fn path_to_walks_from_root() {
        let tree = parse_document(DOCUMENT).unwrap();
        let debate = tree.find_by_name("Debate").unwrap();

        let names = tree
            .path_to(debate)
            .into_iter()
            .map(|id| tree.node(id).name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, ["AI Safety", "Alignment", "Debate"]);
        assert_eq!(tree.path_to(tree.root()), vec![tree.root()]);
    }

    #[test]
    fn identity_key_prefers_explicit_id() {
        let tree = parse_document(DOCUMENT).unwrap();
        let interp = tree.node(tree.find_by_name("Interpretability").unwrap());
        let alignment = tree.node(tree.find_by_name("Alignment").unwrap());

        assert_eq!(interp.identity_key(), "interp");
        assert_eq!(alignment.identity_key(), "Alignment");
        assert!(interp.is_terminal());
        assert!(!alignment.is_terminal());
    }
}
