use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "solvetrace", version)]
struct Cli {
    /// Recorded solve session JSON.
    #[arg(long = "in", default_value = "solve.json")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long, default_value = "solve.svg")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let f = File::open(&cli.in_path)
        .with_context(|| format!("open session record '{}'", cli.in_path.display()))?;
    let record: solvetrace::SessionRecord =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse session JSON")?;
    record.validate()?;

    let scene = solvetrace::Scene::build(solvetrace::Style::default(), &record)?;
    let timeline = solvetrace::compile(&scene, &record.events)?;
    solvetrace::svg::write_svg(&cli.out, &scene, &timeline)?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
