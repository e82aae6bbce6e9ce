use anyhow::{Context, Result};

use nihon_lib::dictionary::SEARCH_LIMIT;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, query: &str, limit: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let dictionary = app.load_dictionary()?;
    let results = dictionary
        .search(query, limit.min(SEARCH_LIMIT))
        .context("Dictionary search failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No results found for '{}'.", query);
                return Ok(());
            }

            let kanji_w = results
                .iter()
                .map(|e| terminal::display_width(&e.kanji))
                .max()
                .unwrap_or(5)
                .clamp(5, 20);
            let reading_w = results
                .iter()
                .map(|e| terminal::display_width(&e.reading))
                .max()
                .unwrap_or(7)
                .clamp(7, 24);

            println!(
                "{} {} {}",
                terminal::pad("Word", kanji_w),
                terminal::pad("Reading", reading_w),
                "Meaning"
            );
            println!(
                "{} {} {}",
                "\u{2500}".repeat(kanji_w),
                "\u{2500}".repeat(reading_w),
                "\u{2500}".repeat(30)
            );

            for entry in &results {
                let word = terminal::paint(&terminal::pad(&entry.kanji, kanji_w), Color::BOLD, use_color);
                println!(
                    "{} {} {}",
                    word,
                    terminal::pad(&entry.reading, reading_w),
                    entry.gloss.replace('|', "; ")
                );
            }

            println!("\n{} results", results.len());
        }
    }

    Ok(())
}
