use eframe::egui::{self, RichText, Ui};

use crate::content::{Tree, search_topics};
use crate::navigation::Message;
use crate::util::display_name;

const MAX_SEARCH_RESULTS: usize = 12;

pub(in crate::app) fn draw_topic_search(
    ui: &mut Ui,
    tree: &Tree,
    query: &mut String,
    enabled: bool,
    messages: &mut Vec<Message>,
) {
    ui.label(RichText::new("Find topic").strong());
    ui.add(
        egui::TextEdit::singleline(query)
            .hint_text("Search all topics...")
            .desired_width(f32::INFINITY),
    );

    if query.trim().is_empty() {
        return;
    }

    let matches = search_topics(tree, query, MAX_SEARCH_RESULTS);
    if matches.is_empty() {
        ui.weak("No matching topics.");
        return;
    }

    let mut chosen = None;
    for found in &matches {
        let node = tree.node(found.node);
        ui.horizontal_wrapped(|ui| {
            let link = ui.add_enabled(enabled, egui::Link::new(display_name(&node.name)));
            if link.clicked() {
                chosen = Some(node.id);
            }

            if let Some(parent) = node.parent {
                ui.weak(format!("in {}", display_name(&tree.node(parent).name)));
            }
        });
    }

    if let Some(node) = chosen {
        messages.push(Message::JumpTo(node));
        query.clear();
    }
}
