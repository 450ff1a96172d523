use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::parse::{RawNode, RawRecord, parse_raw_document, scalar_text};
use super::source::read_document;
use super::tree::{NodeId, Record, RecordKind, RecordList, Tree, TreeNode};

pub fn load_tree(path: &Path) -> Result<Tree> {
    let raw = read_document(path)?;
    let tree = parse_document(&raw)
        .with_context(|| format!("failed to load content document {}", path.display()))?;

    log::info!(
        "loaded {} topics from {} (root: {})",
        tree.len(),
        path.display(),
        tree.node(tree.root()).name
    );
    Ok(tree)
}

pub fn parse_document(raw: &str) -> Result<Tree> {
    let root = parse_raw_document(raw).context("failed to parse content document")?;

    if scalar_text(root.name.as_ref()).is_none() {
        return Err(anyhow!("Invalid content structure - missing name property"));
    }

    let mut nodes = Vec::new();
    push_node(&mut nodes, root, None, 0);
    Ok(Tree { nodes })
}

fn push_node(
    nodes: &mut Vec<TreeNode>,
    raw: RawNode,
    parent: Option<NodeId>,
    depth: usize,
) -> NodeId {
    let id = NodeId(nodes.len());

    let mut records = Vec::new();
    if let Some(sites) = raw.sites {
        records.push(record_list(RecordKind::Sites, sites));
    }
    if let Some(papers) = raw.papers {
        records.push(record_list(RecordKind::Papers, papers));
    }

    nodes.push(TreeNode {
        id,
        name: scalar_text(raw.name.as_ref()).unwrap_or_default(),
        key: scalar_text(raw.id.as_ref()),
        description: raw
            .description
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        children: Vec::new(),
        parent,
        depth,
        records,
    });

    let children = raw
        .children
        .unwrap_or_default()
        .into_iter()
        .map(|child| push_node(nodes, child, Some(id), depth + 1))
        .collect::<Vec<_>>();
    nodes[id.0].children = children;

    id
}

fn record_list(kind: RecordKind, raw_records: Vec<RawRecord>) -> RecordList {
    let records = raw_records
        .into_iter()
        .map(|raw| Record {
            title: scalar_text(raw.title.as_ref()),
            url: scalar_text(raw.url.as_ref()),
            summary: scalar_text(raw.summary.as_ref()),
            authors: scalar_text(raw.authors.as_ref()),
            year: scalar_text(raw.year.as_ref()),
        })
        .collect();

    RecordList { kind, records }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_root_name_is_structural_error() {
        let error = parse_document(r#"{"description": "nameless"}"#).unwrap_err();
        assert!(error.to_string().contains("missing name property"));

        let error = parse_document(r#"{"name": "   "}"#).unwrap_err();
        assert!(error.to_string().contains("missing name property"));
    }

    #[test]
    fn malformed_document_reports_parse_context() {
        let error = parse_document("{\"name\": ").unwrap_err();
        assert_eq!(error.to_string(), "failed to parse content document");
    }

    #[test]
    fn records_keep_optional_fields() {
        let tree = parse_document(
            r#"{
                "name": "Root",
                "papers": [
                    { "title": "Concrete Problems", "authors": "Amodei et al.", "year": 2016 },
                    { "url": "https://example.org/paper" }
                ],
                "sites": []
            }"#,
        )
        .unwrap();
        let root = tree.node(tree.root());

        let papers = root.records(RecordKind::Papers);
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].year.as_deref(), Some("2016"));
        assert_eq!(papers[1].title, None);
        assert!(root.records(RecordKind::Sites).is_empty());
        assert_eq!(root.records[0].kind, RecordKind::Sites);
    }

    #[test]
    fn nameless_children_are_kept() {
        let tree = parse_document(r#"{"name": "Root", "children": [{"description": "?"}]}"#)
            .unwrap();
        let child = tree.node(tree.node(tree.root()).children[0]);
        assert_eq!(child.name, "");
        assert_eq!(child.description, "?");
        assert_eq!(child.parent, Some(tree.root()));
    }

    #[test]
    fn load_tree_reads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "mindmap-radial-load-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"name": "From disk", "children": [{"name": "Leaf"}]}"#).unwrap();

        let tree = load_tree(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(tree.root()).name, "From disk");
    }

    #[test]
    fn missing_file_is_load_failure() {
        let error = load_tree(Path::new("/definitely/not/here/content.json")).unwrap_err();
        assert!(error.to_string().starts_with("failed to read content from"));
    }
}
