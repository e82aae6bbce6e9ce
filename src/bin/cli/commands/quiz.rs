use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use nihon_lib::dictionary::ExampleLookup;
use nihon_lib::progress::schedule::{format_interval, review_interval};
use nihon_lib::selection::Selection;

use super::read_line;
use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category_name: &str,
    rounds: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let category = app.parse_category(category_name)?;
    let mut session = app.session()?;
    if let Some(dictionary) = app.spawn_dictionary() {
        let lookup: std::sync::Arc<dyn ExampleLookup> = std::sync::Arc::new(dictionary);
        session = session.with_dictionary(lookup);
    }

    let pool_size = session
        .start(category)
        .context("Failed to initialize progress")?
        .len();
    let delay = Duration::from_millis(app.config.feedback_delay_ms);
    let pause = matches!(format, OutputFormat::Plain) && crate::stdin_is_tty();

    if let OutputFormat::Plain = format {
        println!(
            "{} quiz: {} characters unlocked. Type the reading, or :q to stop.",
            category, pool_size
        );
    }

    let mut asked = 0;
    while rounds.map_or(true, |limit| asked < limit) {
        let character = match session.select_next() {
            Selection::Next { character } => character,
            Selection::Exhausted => {
                if let OutputFormat::Plain = format {
                    println!("Congratulations! You have reviewed every character in this set.");
                }
                break;
            }
        };

        let presentation = session.present(&character)?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&presentation)?),
            OutputFormat::Plain => {
                println!();
                println!("  {}", terminal::paint(&presentation.character, Color::BOLD, use_color));
                if presentation.show_hint {
                    let hint = match &presentation.gloss {
                        Some(gloss) => format!("Hint: {} ({})", presentation.answer, gloss),
                        None => format!("Hint: {}", presentation.answer),
                    };
                    println!("  {}", terminal::paint(&hint, Color::DIM, use_color));
                }
                if let Some(example) = &presentation.example {
                    println!(
                        "  Example: {} ({}) - {}",
                        example.word, example.reading, example.meaning
                    );
                }
            }
        }

        let Some(answer) = read_line("> ")? else {
            break;
        };
        asked += 1;

        let evaluation = session.submit(&character, &answer)?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&evaluation)?),
            OutputFormat::Plain => {
                if evaluation.is_correct {
                    let next = format_interval(review_interval(evaluation.record.streak));
                    println!(
                        "{} {}",
                        terminal::paint("Correct!", Color::GREEN, use_color),
                        terminal::paint(&format!("(next review in {})", next), Color::DIM, use_color)
                    );
                } else {
                    println!(
                        "{}",
                        terminal::paint(
                            &format!("Incorrect. The answer is {}.", evaluation.expected),
                            Color::RED,
                            use_color
                        )
                    );
                }
                for line in terminal::render_events(&evaluation.events, use_color) {
                    println!("{}", line);
                }
                if pause {
                    thread::sleep(delay);
                }
            }
        }
    }

    if let OutputFormat::Plain = format {
        let player = session.player();
        println!();
        println!(
            "Level {}  {} {}/{} XP",
            player.level,
            terminal::progress_bar(player.xp, player.xp_to_next_level, 20),
            player.xp,
            player.xp_to_next_level
        );
    }

    Ok(())
}
