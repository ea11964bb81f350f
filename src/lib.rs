#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod family;
pub mod graph;
pub mod layout;
pub mod layout_dump;
pub mod orientation;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use dataset::{parse_tree, sample_tree};
pub use family::{DatasetError, FamilyMember, FamilyTree, Gender};
pub use graph::build_graph;
pub use layout::{Direction, Layout, compute_layout};
pub use orientation::select_orientation;
pub use render::render_svg;
pub use theme::Theme;

use anyhow::Result;

/// Options for the one-call embedding API used by hosts (e.g. the wasm
/// wrapper) that hand over a dataset and want SVG back.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    /// `None` selects the orientation with the smallest bounding area.
    pub direction: Option<Direction>,
}

impl RenderOptions {
    pub fn default_light() -> Self {
        Self {
            theme: Theme::default_light(),
            layout: LayoutConfig::default(),
            direction: None,
        }
    }

    pub fn print() -> Self {
        Self {
            theme: Theme::print(),
            ..Self::default_light()
        }
    }
}

/// Validates the tree, builds the graph, lays it out (auto-orienting unless a
/// direction is forced) and renders SVG.
pub fn render_with_options(tree: &FamilyTree, options: &RenderOptions) -> Result<String> {
    tree.validate()?;
    let graph = build_graph(tree, &options.theme, &options.layout);
    let layout = match options.direction {
        Some(direction) => compute_layout(&graph, direction, &options.layout),
        None => select_orientation(&graph, &options.layout).1,
    };
    Ok(render_svg(&layout, &options.theme))
}
