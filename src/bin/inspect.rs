//! Debugging utility: parse an ASV log file and print what the viewer
//! would derive from it.

use anyhow::{Context, Result};

use mareelog::analysis::summarize;
use mareelog::parsers::{Asv, Parseable};
use mareelog::series::paginate_for_display;
use mareelog::settings::ChartSettings;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: maree_inspect <logfile>")?;
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;

    let log = Asv::new()
        .parse(&contents)
        .with_context(|| format!("failed to parse {}", path))?;

    let settings = ChartSettings::load();
    let summary = summarize(&log, &settings);
    let pages = paginate_for_display(&log.rows, &settings);

    println!("rows:    {}", log.rows.len());
    println!("pages:   {}", pages.len());
    println!("sensors: {}", summary.active_sensors.join(", "));
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
