use anyhow::{Context, Result};
use clap::Parser;
use image_fixture_lib::{run_fixture, RedSquareFixture, OUTPUT_PATH};
use tracing_subscriber::EnvFilter;

/// Write a 300x300 red PNG to test-image.png and print its data URL summary
///
/// On success stdout carries exactly three lines: the created file, the length
/// of the `data:image/png;base64,` URL, and its first 100 characters. Set
/// RUST_LOG to see step diagnostics on stderr.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    // Diagnostics go to stderr so stdout stays the three-line summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = run_fixture(&RedSquareFixture)
        .with_context(|| format!("Failed to create {}", OUTPUT_PATH))?;

    println!("{}", report);

    Ok(())
}
