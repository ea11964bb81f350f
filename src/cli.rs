use crate::config::load_config;
use crate::dataset::{parse_tree, sample_tree};
use crate::graph::build_graph;
use crate::layout::{Direction, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::orientation::select_orientation;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "famtree", version, about = "Family tree diagram renderer in Rust")]
pub struct Args {
    /// Dataset JSON file or '-' for stdin. Omit to render the built-in sample.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme preset, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout direction; `auto` picks the orientation with the smallest area
    #[arg(short = 'd', long = "direction", value_enum, default_value = "auto")]
    pub direction: DirectionArg,

    /// Write the computed layout as pretty JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Raster width for PNG output
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Raster height for PNG output
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Auto,
    Tb,
    Bt,
    Lr,
    Rl,
}

impl DirectionArg {
    fn fixed(self) -> Option<Direction> {
        match self {
            Self::Auto => None,
            Self::Tb => Some(Direction::TopBottom),
            Self::Bt => Some(Direction::BottomTop),
            Self::Lr => Some(Direction::LeftRight),
            Self::Rl => Some(Direction::RightLeft),
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    let tree = read_dataset(args.input.as_deref())?;
    tree.validate().context("invalid family dataset")?;

    let graph = build_graph(&tree, &config.theme, &config.layout);
    let layout = match args.direction.fixed() {
        Some(direction) => compute_layout(&graph, direction, &config.layout),
        None => select_orientation(&graph, &config.layout).1,
    };

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = render_svg(&layout, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "this build has no PNG support; rebuild with the `png` feature"
    ))
}

fn read_dataset(path: Option<&Path>) -> Result<crate::family::FamilyTree> {
    let Some(path) = path else {
        return Ok(sample_tree());
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return parse_tree(&buf);
    }
    crate::dataset::load_tree(path)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_arg_resolution() {
        assert_eq!(DirectionArg::Auto.fixed(), None);
        assert_eq!(DirectionArg::Tb.fixed(), Some(Direction::TopBottom));
        assert_eq!(DirectionArg::Rl.fixed(), Some(Direction::RightLeft));
    }

    #[test]
    fn missing_output_path_for_png_is_an_error() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("tree.png")), "png").unwrap(),
            PathBuf::from("tree.png")
        );
    }
}
