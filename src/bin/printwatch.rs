// src/bin/printwatch.rs
use printwatch::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
