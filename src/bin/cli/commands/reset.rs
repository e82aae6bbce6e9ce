use anyhow::{bail, Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, yes: bool, format: &OutputFormat) -> Result<()> {
    if !yes {
        bail!("This deletes all progress and player state. Re-run with --yes to confirm.");
    }

    let mut session = app.session()?;
    session.reset().context("Failed to reset progress")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reset": true,
                "dataDir": app.data_dir,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Progress and player state reset in {}", app.data_dir.display());
        }
    }

    Ok(())
}
