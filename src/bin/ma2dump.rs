//! Dump the charts of a song bundle in raw ma2 field order

use clap::Parser;
use maichart::compiler::SongBundle;
use maichart::simai::Format;
use maichart::SimaiCompiler;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ma2dump")]
#[command(version)]
#[command(about = "Print bundle charts as raw ma2 lines", long_about = None)]
struct Args {
    /// Song bundle (JSON)
    input: PathBuf,

    /// Output file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parsed bundle as pretty JSON instead
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let bundle = SongBundle::load(&args.input)?;

    let text = if args.json {
        serde_json::to_string_pretty(&bundle)?
    } else {
        let compiler = SimaiCompiler::default();
        let mut text = String::new();
        for (difficulty, chart) in &bundle.charts {
            text.push_str(&format!("# {}\n", difficulty.label()));
            text.push_str(&compiler.compile_chart(chart, Format::Raw)?);
        }
        for (i, chart) in bundle.utage.iter().enumerate() {
            text.push_str(&format!("# Utage {}\n", i + 1));
            text.push_str(&compiler.compile_chart(chart, Format::Raw)?);
        }
        text
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}
