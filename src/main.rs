//! stl2world
//!
//! Turn an STL mesh into a wireframe `.world` scene, one cylinder per edge.
//!
//! ```text
//! stl2world part.stl                          # writes part.world
//! stl2world part.stl -o out.world --scale 10 --radius 0.02 --color '#ff8800'
//! RUST_LOG=debug stl2world part.stl
//! ```

use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;
use stl2world::float_types::{Real, DEFAULT_EPS, DEFAULT_RADIUS};
use stl2world::{convert, world_file_name, Color, ConvertOptions};

#[derive(Parser)]
#[command(name = "stl2world", version, about = "Convert an STL mesh into a wireframe .world scene")]
struct Cli {
    /// Input STL file (ASCII or binary)
    input: PathBuf,

    /// Output file [default: input name with a .world extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Vertex welding cell size, in model units
    #[arg(long, default_value_t = DEFAULT_EPS)]
    eps: Real,

    /// Cylinder radius, in model units
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: Real,

    /// Uniform scale applied to the whole model
    #[arg(long, default_value_t = 1.0)]
    scale: Real,

    /// Cylinder color as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    color: Color,

    /// Material identifier written on every cylinder
    #[arg(long, default_value = stl2world::world::DEFAULT_MATERIAL)]
    material: String,

    /// Spaces per indentation level (0 for single-line output)
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins when set
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let options = ConvertOptions::default()
        .with_eps(cli.eps)
        .with_radius(cli.radius)
        .with_scale(cli.scale)
        .with_color(cli.color)
        .with_material(cli.material)
        .with_indent(cli.indent);

    let data = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let conversion = convert(&data, &options)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    if conversion.triangle_count == 0 {
        log::warn!("no triangles found in {}; writing an empty scene", cli.input.display());
    }

    let output = cli.output.unwrap_or_else(|| cli.input.with_file_name(world_file_name(&cli.input)));
    std::fs::write(&output, &conversion.text)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} ({} STL, {} triangles) -> {}: {} edges, {} digits",
        cli.input.display(),
        conversion.encoding,
        conversion.triangle_count,
        output.display(),
        conversion.edges.len(),
        conversion.digits
    );
    Ok(())
}
