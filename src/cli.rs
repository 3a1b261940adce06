use crate::config::{Config, PackingStrategy, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::LayoutDump;
use crate::parser::parse_risk_rows;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rmxr", version, about = "Risk matrix renderer in Rust (5x5 grid)")]
pub struct Args {
    /// Input rows (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme variables, packing, column roles)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Packing strategy override
    #[arg(short = 'p', long = "packing", value_enum)]
    pub packing: Option<PackingArg>,

    /// Drawing surface width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Drawing surface height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed layout as JSON for regression diffing
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PackingArg {
    Grid,
    Hex,
}

impl From<PackingArg> for PackingStrategy {
    fn from(value: PackingArg) -> Self {
        match value {
            PackingArg::Grid => PackingStrategy::Grid,
            PackingArg::Hex => PackingStrategy::Hex,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let parsed = parse_risk_rows(&input, &config.source);
    if parsed.dropped > 0 {
        eprintln!(
            "warning: excluded {} row(s) with missing or invalid ratings",
            parsed.dropped
        );
    }

    let layout = compute_layout(&parsed.set, &config.theme, &config.layout);
    if let Some(path) = args.dump_layout.as_deref() {
        LayoutDump::from_layout(&layout).write_json(path)?;
    }

    let svg = render_svg(&layout, &config.theme, &config.layout);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output)?;
            write_png(&svg, &output, &config)?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(strategy) = args.packing {
        config.layout.packing.strategy = strategy.into();
    }
    if let Some(width) = args.width {
        config.layout.matrix.width = width;
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.layout.matrix.height = height;
        config.render.height = height;
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("built without the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for png output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_override_wins_over_config() {
        let mut config = Config::default();
        let args = Args {
            input: None,
            output: None,
            output_format: OutputFormat::Svg,
            config: None,
            packing: Some(PackingArg::Hex),
            width: Some(640.0),
            height: None,
            dump_layout: None,
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.layout.packing.strategy, PackingStrategy::Hex);
        assert_eq!(config.layout.matrix.width, 640.0);
        assert_eq!(config.render.width, 640.0);
    }
}
