use clap::Parser;
use maichart::chart::RotationTable;
use maichart::compiler::{self, SongBundle};
use maichart::simai::GlyphTable;
use maichart::SimaiCompiler;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "maichart")]
#[command(version)]
#[command(about = "ma2 chart to Simai compiler", long_about = None)]
struct Args {
    /// Song bundle (JSON with metadata and parsed charts)
    input: PathBuf,

    /// Output folder for maidata.txt
    output: PathBuf,

    /// Print decimal levels when the metadata has them
    #[arg(short = 'd', long)]
    strict_decimal: bool,

    /// Compile the bundle's utage charts instead of the standard difficulties
    #[arg(short, long)]
    utage: bool,

    /// Rotation directives (JSON object of track id to method)
    #[arg(short, long)]
    rotations: Option<PathBuf>,

    /// Slide glyph overrides (JSON)
    #[arg(short, long)]
    glyphs: Option<PathBuf>,

    /// Replace an existing maidata.txt instead of appending to it
    #[arg(short, long)]
    overwrite: bool,

    /// Log per-chart details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), maichart::Error> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let bundle = SongBundle::load(&args.input)?;

    let mut compiler = SimaiCompiler::new(args.strict_decimal);
    if let Some(path) = &args.rotations {
        compiler = compiler.with_rotations(RotationTable::load(path)?);
    }
    if let Some(path) = &args.glyphs {
        compiler = compiler.with_glyphs(GlyphTable::load(path)?);
    }

    let document = match compiler.compile_bundle(&bundle, args.utage) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Failed to compile {}: {}", bundle.metadata.name, e);
            return Err(e);
        }
    };

    let path = compiler::write_out(&document, &args.output, args.overwrite)?;
    for chart in compiler.compiled_charts() {
        println!("{}", chart);
    }
    tracing::info!("Wrote {}", path.display());

    Ok(())
}
