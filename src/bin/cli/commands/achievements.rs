use anyhow::Result;

use nihon_lib::player::ACHIEVEMENTS;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.session()?;
    let player = session.player();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = ACHIEVEMENTS
                .iter()
                .map(|achievement| {
                    serde_json::json!({
                        "id": achievement.id,
                        "name": achievement.name,
                        "description": achievement.description,
                        "requires": achievement.requires,
                        "unlocked": player.has_achievement(achievement.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for achievement in ACHIEVEMENTS {
                if player.has_achievement(achievement.id) {
                    println!(
                        "[x] {}",
                        terminal::paint(achievement.name, Color::GREEN, use_color)
                    );
                } else {
                    println!("[ ] {}", terminal::paint(achievement.name, Color::GRAY, use_color));
                }
                println!("    {}", achievement.description);
            }

            println!(
                "\n{}/{} unlocked",
                player.unlocked_achievements.len(),
                ACHIEVEMENTS.len()
            );
        }
    }

    Ok(())
}
