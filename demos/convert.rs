//! Convert a DAFIF SUAS extract.
//!
//! cargo run --example convert -- <DAFIFT dir> <output.geojson|.drx> ["US JA"] ["50 -131 23 -66"]

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, WrapErr};
use suasgeo::{BoundingBox, ConvertOptions, CountryFilter, OutputFormat, SourceContext};

fn read(path: &Path) -> miette::Result<SourceContext> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(SourceContext::new(path.display().to_string(), text))
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(dafift), Some(output)) = (args.next(), args.next()) else {
        miette::bail!("usage: convert <DAFIFT dir> <output file> [countries] [\"N W S E\"]");
    };
    let countries = args.next().map(|c| CountryFilter::parse(&c)).unwrap_or_default();
    let bounds = match args.next() {
        Some(area) => area.parse::<BoundingBox>()?,
        None => BoundingBox::WORLD,
    };

    let dir = PathBuf::from(dafift).join("SUAS");
    let suas = read(&dir.join("SUAS.TXT"))?;
    let ctry = read(&dir.join("SUAS_CTRY.TXT"))?;

    let options = ConvertOptions {
        format: OutputFormat::from_path(&output),
        countries,
        bounds,
    };
    tracing::info!(?options, "converting");
    let document = suasgeo::convert(&suas, &ctry, &options)?;

    std::fs::write(&output, document)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;
    tracing::info!(%output, "written");
    Ok(())
}
