use anyhow::Result;

use nihon_lib::catalog::{Answer, CatalogAnswer};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, category_name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.session()?;
    let player = session.player();
    let catalog = session.catalog();

    let Some(name) = category_name else {
        match format {
            OutputFormat::Json => {
                let output: Vec<serde_json::Value> = catalog
                    .categories()
                    .map(|category| {
                        serde_json::json!({
                            "category": category,
                            "tiers": catalog.tier_count(category),
                            "unlockedTier": player.tier(category),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain => {
                for category in catalog.categories() {
                    println!("{:<10} {} tiers", category, catalog.tier_count(category));
                }
            }
        }
        return Ok(());
    };

    let category = app.parse_category(name)?;
    let unlocked = player.tier(category);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .tiers(category)
                .iter()
                .enumerate()
                .map(|(index, tier)| {
                    let entries: Vec<Answer> = tier.set.values().map(Answer::from).collect();
                    serde_json::json!({
                        "tier": index,
                        "name": tier.name,
                        "unlocked": index <= unlocked,
                        "characters": tier.set.keys().collect::<Vec<_>>(),
                        "answers": entries,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (index, tier) in catalog.tiers(category).iter().enumerate() {
                let header = format!("{:>2}. {}", index + 1, tier.name);
                if index <= unlocked {
                    println!("{}", terminal::paint(&header, Color::BOLD, use_color));
                } else {
                    println!("{}", terminal::paint(&format!("{} (locked)", header), Color::GRAY, use_color));
                }

                let entries: Vec<String> = tier
                    .set
                    .iter()
                    .map(|(character, answer)| match answer {
                        CatalogAnswer::Text(text) => format!("{} {}", character, text),
                        CatalogAnswer::Number { romaji, latin } => {
                            format!("{} {} ({})", character, romaji, latin)
                        }
                    })
                    .collect();
                println!("    {}", entries.join("  "));
            }
        }
    }

    Ok(())
}
