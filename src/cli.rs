use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::geometry::SizeLimit;
use crate::layout::{LineLayoutOptions, layout_direction_segments};
use crate::layout_dump::{LineLayoutDump, NetworkLayoutDump};
use crate::model::{ALL_DIRECTIONS, Direction, Network};
use crate::text_metrics::{LabelMeasurer, LabelStyle};

#[derive(Parser, Debug)]
#[command(
    name = "rmap",
    version,
    about = "Schematic transit-map label layout engine"
)]
pub struct Args {
    /// Input network file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the JSON dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Lay out only the line with this id
    #[arg(short = 'l', long = "line")]
    pub line: Option<String>,

    /// Direction for segments without an override (n/ne/e/se/s/sw/w/nw)
    #[arg(short = 'd', long = "direction", default_value = "s")]
    pub direction: String,

    /// Maximum drawing width
    #[arg(long = "maxWidth")]
    pub max_width: Option<f32>,

    /// Maximum drawing height
    #[arg(long = "maxHeight")]
    pub max_height: Option<f32>,

    /// Keep inter-station spacing minimal instead of spreading evenly
    #[arg(long)]
    pub compact: bool,

    /// Pretty-print the JSON dump
    #[arg(long)]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let input = read_input(args.input.as_deref())?;
    let network = Network::from_json5(&input)?;

    let direction = parse_direction(&args.direction)?;
    let config = network.layout_config.complete();
    let style = LabelStyle::from_config(&config, network.font.as_ref());
    let mut measurer = LabelMeasurer::new(style, network.hyphenation.clone());

    let selected: Vec<_> = match &args.line {
        Some(id) => {
            let line = network
                .line(id)
                .with_context(|| format!("no line with id `{id}`"))?;
            vec![line]
        }
        None => network.lines.iter().collect(),
    };

    let mut lines = Vec::with_capacity(selected.len());
    for line in selected {
        let options = LineLayoutOptions {
            bounds: SizeLimit::new(
                args.max_width.unwrap_or(f32::INFINITY),
                args.max_height.unwrap_or(f32::INFINITY),
            ),
            compact: args.compact,
            description: line.id.clone(),
            ..LineLayoutOptions::default()
        };
        let positions = layout_direction_segments(
            line,
            direction,
            &config,
            &mut |station, hints| measurer.measure(station, hints),
            &options,
        )?;
        lines.push(LineLayoutDump::from_positions(line, &positions));
    }

    let dump = NetworkLayoutDump {
        network: network.name.clone(),
        lines,
    };
    match &args.output {
        Some(path) => dump
            .write_json(path, args.pretty)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", dump.to_json(args.pretty)?),
    }
    Ok(())
}

fn parse_direction(value: &str) -> Result<Direction> {
    match ALL_DIRECTIONS
        .into_iter()
        .find(|direction| direction.as_str() == value)
    {
        Some(direction) => Ok(direction),
        None => bail!("invalid direction `{value}` (expected one of n/ne/e/se/s/sw/w/nw)"),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        None => {
            // no input argument: read stdin, matching `-i -`
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
    }
}
