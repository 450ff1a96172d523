use eframe::egui::{self, Color32, RichText, Ui};

use crate::info_panel::{BREADCRUMB_SEPARATOR, InfoPanel, RecordEntry};
use crate::navigation::Message;

use super::super::render_utils::accent_color;

/// Draws the presented panel. Breadcrumb clicks are pushed onto `messages`.
pub(in crate::app) fn draw_info_panel(
    ui: &mut Ui,
    panel: &InfoPanel,
    messages: &mut Vec<Message>,
) {
    draw_breadcrumbs(ui, panel, messages);
    ui.add_space(10.0);

    let title = RichText::new(panel.title.as_str()).heading().strong();
    ui.label(if panel.is_error {
        title.color(Color32::from_rgb(240, 113, 103))
    } else {
        title
    });
    ui.add_space(6.0);
    ui.label(panel.description.as_str());

    for section in &panel.sections {
        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new(section.kind.label()).strong().size(15.0));
        ui.add_space(4.0);

        for entry in &section.entries {
            draw_record_entry(ui, entry);
            ui.add_space(8.0);
        }
    }
}

fn draw_breadcrumbs(ui: &mut Ui, panel: &InfoPanel, messages: &mut Vec<Message>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;

        for (index, crumb) in panel.breadcrumbs.iter().enumerate() {
            if index > 0 {
                ui.weak(BREADCRUMB_SEPARATOR);
            }

            match crumb.target {
                Some(target) => {
                    if ui.link(crumb.label.as_str()).clicked() {
                        messages.push(Message::AscendToIndex(target));
                    }
                }
                None => {
                    ui.label(RichText::new(crumb.label.as_str()).strong());
                }
            }
        }
    });
}

fn draw_record_entry(ui: &mut Ui, entry: &RecordEntry) {
    match &entry.title_url {
        Some(url) => {
            ui.hyperlink_to(
                RichText::new(entry.title.as_str()).strong().color(accent_color()),
                url,
            );
        }
        None => {
            ui.label(RichText::new(entry.title.as_str()).strong());
        }
    }

    if let Some(byline) = &entry.byline {
        ui.label(RichText::new(byline.as_str()).small().weak());
    }
    if let Some(summary) = &entry.summary {
        ui.label(RichText::new(summary.as_str()).size(13.0));
    }
    if let Some(link) = &entry.link {
        ui.add(egui::Hyperlink::from_label_and_url(link.label.as_str(), link.url.as_str()));
    }
}
