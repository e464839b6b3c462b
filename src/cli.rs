use crate::config::load_config;
use crate::parser::parse_document;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wdr", version, about = "WaveJSON timing diagram renderer in Rust")]
pub struct Args {
    /// Input WaveJSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output SVG file, or '-' for stdout
    #[arg(short = 's', long = "svg")]
    pub svg: Option<PathBuf>,

    /// Output PNG file
    #[arg(short = 'p', long = "png")]
    pub png: Option<PathBuf>,

    /// Skin name; overrides the document's config.skin
    #[arg(long = "skin")]
    pub skin: Option<String>,

    /// Config JSON file (camelCase keys)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(skin) = args.skin {
        config.skin = Some(skin);
    }

    if args.svg.is_none() && args.png.is_none() {
        return Err(anyhow::anyhow!(
            "no output file specified; use -s <svg> and/or -p <png>"
        ));
    }

    let input = read_input(args.input.as_deref())?;
    let doc = parse_document(&input)?;
    let svg = render_svg(&doc, &config);

    if let Some(path) = args.svg.as_deref() {
        if path == Path::new("-") {
            write_output_svg(&svg, None)?;
        } else {
            write_output_svg(&svg, Some(path))?;
        }
    }

    if let Some(path) = args.png.as_deref() {
        write_png(&svg, path, &config)?;
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, path: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, path, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _path: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the 'png' feature; rebuild with --features png"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
