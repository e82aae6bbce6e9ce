use anyhow::Result;

use nihon_lib::catalog::resolve_active_pool;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.session()?;
    let player = session.player();
    let catalog = session.catalog();

    match format {
        OutputFormat::Json => {
            let categories: Vec<serde_json::Value> = catalog
                .categories()
                .map(|category| {
                    let tier = player.tier(category);
                    serde_json::json!({
                        "category": category,
                        "tier": tier,
                        "tierCount": catalog.tier_count(category),
                        "tierName": catalog.tier(category, tier).map(|t| t.name.clone()),
                        "characters": resolve_active_pool(catalog, category, tier).len(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "level": player.level,
                "xp": player.xp,
                "xpToNextLevel": player.xp_to_next_level,
                "categories": categories,
                "unlockedAchievements": player.unlocked_achievements,
                "dataDir": app.data_dir,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}",
                terminal::paint(&format!("Level {}", player.level), Color::BOLD, use_color)
            );
            println!(
                "{} {}/{} XP",
                terminal::progress_bar(player.xp, player.xp_to_next_level, 30),
                player.xp,
                player.xp_to_next_level
            );
            println!();

            println!("{:<10} {:<7} {:<6} {}", "Category", "Tier", "Chars", "Current tier");
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(6),
                "\u{2500}".repeat(24)
            );
            for category in catalog.categories() {
                let tier = player.tier(category);
                let tier_count = catalog.tier_count(category);
                let name = catalog
                    .tier(category, tier)
                    .map(|t| t.name.as_str())
                    .unwrap_or("-");
                let chars = resolve_active_pool(catalog, category, tier).len();
                println!(
                    "{:<10} {:<7} {:<6} {}",
                    category,
                    format!("{}/{}", (tier + 1).min(tier_count), tier_count),
                    chars,
                    name
                );
            }

            println!();
            println!("{} achievements unlocked", player.unlocked_achievements.len());
        }
    }

    Ok(())
}
