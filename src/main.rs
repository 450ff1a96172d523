mod app;
mod content;
mod info_panel;
mod layout;
mod navigation;
mod scene;
mod util;
mod viewport;

use std::path::PathBuf;

use clap::Parser;

use crate::navigation::NavigatorConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON document describing the topic tree.
    #[arg(long, default_value = "assets/content.json")]
    content: PathBuf,
    /// Width of the info panel docked on the right edge, in pixels.
    #[arg(long, default_value_t = 350.0)]
    panel_width: f32,
    /// Distance between the centered topic and its neighbours.
    #[arg(long, default_value_t = 300.0)]
    radius: f32,
    /// Length of the animated move between levels.
    #[arg(long, default_value_t = 520)]
    transition_ms: u64,
}

impl Args {
    fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            radius: self.radius.max(1.0),
            transition_secs: self.transition_ms as f64 / 1000.0,
            reserved_width: self.panel_width.max(0.0),
            ..NavigatorConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.navigator_config();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "mindmap-radial",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::MindMapApp::new(
                cc,
                args.content.clone(),
                config,
            )))
        }),
    )
}
