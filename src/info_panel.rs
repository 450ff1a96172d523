use crate::content::{NodeId, Record, RecordKind, Tree};
use crate::navigation::NavigationState;
use crate::util::{UNTITLED, display_description, display_name};

pub const BREADCRUMB_SEPARATOR: &str = " › ";

const SECTION_ORDER: [RecordKind; 2] = [RecordKind::Sites, RecordKind::Papers];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Ancestor-stack index to jump to; `None` for the current node.
    pub target: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    pub title: String,
    /// URL the title itself links to (sites).
    pub title_url: Option<String>,
    pub byline: Option<String>,
    pub summary: Option<String>,
    /// Separate trailing link (papers).
    pub link: Option<RecordLink>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSection {
    pub kind: RecordKind,
    pub entries: Vec<RecordEntry>,
}

/// Contents of the side panel, as last presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoPanel {
    pub subject: Option<NodeId>,
    pub title: String,
    pub description: String,
    pub breadcrumbs: Vec<Crumb>,
    pub sections: Vec<RecordSection>,
    pub is_error: bool,
}

impl InfoPanel {
    pub fn present(tree: &Tree, state: &NavigationState, node: NodeId) -> Self {
        let subject = tree.node(node);

        let mut breadcrumbs = state
            .ancestors()
            .iter()
            .enumerate()
            .map(|(index, ancestor)| Crumb {
                label: display_name(&tree.node(*ancestor).name).to_owned(),
                target: Some(index),
            })
            .collect::<Vec<_>>();
        breadcrumbs.push(Crumb {
            label: display_name(&tree.node(state.current()).name).to_owned(),
            target: None,
        });

        let sections = SECTION_ORDER
            .iter()
            .filter_map(|kind| {
                let records = subject.records(*kind);
                if records.is_empty() {
                    return None;
                }

                Some(RecordSection {
                    kind: *kind,
                    entries: records.iter().map(|record| entry(*kind, record)).collect(),
                })
            })
            .collect();

        Self {
            subject: Some(node),
            title: display_name(&subject.name).to_owned(),
            description: display_description(&subject.description).to_owned(),
            breadcrumbs,
            sections,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            subject: None,
            title: "Error loading content".to_owned(),
            description: message.into(),
            breadcrumbs: vec![Crumb {
                label: "Error".to_owned(),
                target: None,
            }],
            sections: Vec::new(),
            is_error: true,
        }
    }

    #[cfg(test)]
    pub fn breadcrumb_text(&self) -> String {
        self.breadcrumbs
            .iter()
            .map(|crumb| crumb.label.as_str())
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }

    #[cfg(test)]
    pub fn section(&self, kind: RecordKind) -> Option<&RecordSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

fn entry(kind: RecordKind, record: &Record) -> RecordEntry {
    let title = record.title.clone().unwrap_or_else(|| UNTITLED.to_owned());

    match kind {
        RecordKind::Sites => RecordEntry {
            title,
            title_url: record.url.clone(),
            byline: None,
            summary: record.summary.clone(),
            link: None,
        },
        RecordKind::Papers => {
            let byline = match (&record.authors, &record.year) {
                (Some(authors), Some(year)) => Some(format!("{authors} ({year})")),
                (Some(authors), None) => Some(authors.clone()),
                (None, Some(year)) => Some(format!("({year})")),
                (None, None) => None,
            };

            RecordEntry {
                title,
                title_url: None,
                byline,
                summary: record.summary.clone(),
                link: record.url.clone().map(|url| RecordLink {
                    label: "Open paper".to_owned(),
                    url,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::content::parse_document;

    use super::*;

    fn tree() -> Tree {
        parse_document(
            r#"{
                "name": "AI Safety",
                "description": "Keeping advanced AI beneficial.",
                "sites": [],
                "papers": [
                    {
                        "title": "Concrete Problems in AI Safety",
                        "authors": "Amodei et al.",
                        "year": 2016,
                        "url": "https://arxiv.org/abs/1606.06565"
                    },
                    { "summary": "untitled draft" }
                ],
                "children": [
                    {
                        "name": "Alignment",
                        "sites": [{ "title": "Alignment Forum", "url": "https://www.alignmentforum.org" }]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_record_lists_are_hidden() {
        let tree = tree();
        let state = NavigationState::new(tree.root());
        let panel = InfoPanel::present(&tree, &state, tree.root());

        assert!(panel.section(RecordKind::Sites).is_none());
        let papers = panel.section(RecordKind::Papers).unwrap();
        assert_eq!(papers.entries.len(), 2);
        assert_eq!(papers.entries[0].byline.as_deref(), Some("Amodei et al. (2016)"));
        assert_eq!(
            papers.entries[0].link.as_ref().map(|link| link.label.as_str()),
            Some("Open paper")
        );
        assert_eq!(papers.entries[1].title, "Untitled");
        assert_eq!(papers.entries[1].link, None);
        assert_eq!(papers.entries[1].byline, None);
    }

    #[test]
    fn node_without_lists_has_no_sections() {
        let tree = parse_document(r#"{"name": "Bare"}"#).unwrap();
        let state = NavigationState::new(tree.root());
        let panel = InfoPanel::present(&tree, &state, tree.root());

        assert!(panel.sections.is_empty());
        assert_eq!(panel.description, "No description provided.");
        assert_eq!(panel.breadcrumb_text(), "Bare");
    }

    #[test]
    fn hovered_child_keeps_breadcrumbs_of_current_level() {
        let tree = tree();
        let state = NavigationState::new(tree.root());
        let alignment = tree.find_by_name("Alignment").unwrap();
        let panel = InfoPanel::present(&tree, &state, alignment);

        assert_eq!(panel.title, "Alignment");
        assert_eq!(panel.breadcrumbs, vec![Crumb { label: "AI Safety".to_owned(), target: None }]);

        let sites = panel.section(RecordKind::Sites).unwrap();
        assert_eq!(
            sites.entries[0].title_url.as_deref(),
            Some("https://www.alignmentforum.org")
        );
        assert_eq!(sites.entries[0].summary, None);
    }

    #[test]
    fn error_panel_replaces_content() {
        let panel = InfoPanel::error("Failed to load content");

        assert!(panel.is_error);
        assert_eq!(panel.title, "Error loading content");
        assert_eq!(panel.breadcrumb_text(), "Error");
        assert_eq!(panel.subject, None);
    }
}
