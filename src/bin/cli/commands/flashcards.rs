use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

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
    session.start(category).context("Failed to initialize progress")?;

    let delay = Duration::from_millis(app.config.feedback_delay_ms);
    let pause = matches!(format, OutputFormat::Plain) && crate::stdin_is_tty();

    if let OutputFormat::Plain = format {
        println!("{} flashcards: answer y if the reading is right, n if not, :q to stop.", category);
    }

    let mut dealt = 0;
    while rounds.map_or(true, |limit| dealt < limit) {
        let character = match session.select_next() {
            Selection::Next { character } => character,
            Selection::Exhausted => {
                if let OutputFormat::Plain = format {
                    println!("Congratulations! You have reviewed every character in this set.");
                }
                break;
            }
        };

        let card = session.deal_flashcard(&character)?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&card)?),
            OutputFormat::Plain => {
                println!();
                println!("  {}", terminal::paint(&card.character, Color::BOLD, use_color));
                match &card.shown_meaning {
                    Some(meaning) => println!("  {} ({})", card.shown_reading, meaning),
                    None => println!("  {}", card.shown_reading),
                }
            }
        }

        let verdict = loop {
            let Some(line) = read_line("[y/n] ")? else {
                break None;
            };
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => break Some(true),
                "n" | "no" => break Some(false),
                _ => println!("Please answer y or n."),
            }
        };
        let Some(user_says_true) = verdict else {
            break;
        };
        dealt += 1;

        let evaluation = session.judge_flashcard(&card, user_says_true)?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&evaluation)?),
            OutputFormat::Plain => {
                if evaluation.is_correct {
                    println!("{}", terminal::paint("Correct!", Color::GREEN, use_color));
                } else {
                    println!(
                        "{}",
                        terminal::paint(
                            &format!("Incorrect. {} reads {}.", card.character, evaluation.expected),
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

    Ok(())
}
