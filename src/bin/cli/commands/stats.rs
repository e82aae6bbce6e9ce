use anyhow::Result;

use nihon_lib::progress::CharacterCount;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category_name: Option<&str>,
    limit: usize,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let category = category_name.map(|name| app.parse_category(name)).transpose()?;
    let session = app.session()?;
    let stats = session.stats(category, limit);

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(&stats)?;
            output["accuracy"] = serde_json::json!(stats.accuracy());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let scope = category.map_or("all categories".to_string(), |c| c.to_string());
            println!("{}", terminal::paint(&format!("Statistics for {}", scope), Color::BOLD, use_color));
            println!("  Tracked:   {}", stats.tracked);
            println!("  Seen:      {}", stats.seen);
            println!("  Mastered:  {}", stats.mastered);
            println!("  Correct:   {}", stats.total_correct);
            println!("  Incorrect: {}", stats.total_incorrect);
            match stats.accuracy() {
                Some(accuracy) => println!("  Accuracy:  {:.1}%", accuracy * 100.0),
                None => println!("  Accuracy:  -"),
            }

            print_ranking("Most missed", &stats.most_incorrect, Color::RED, use_color);
            print_ranking("Most correct", &stats.most_correct, Color::GREEN, use_color);
        }
    }

    Ok(())
}

fn print_ranking(title: &str, ranking: &[CharacterCount], color: &str, use_color: bool) {
    println!();
    println!("{}", terminal::paint(title, color, use_color));
    if ranking.is_empty() {
        println!("  (none yet)");
        return;
    }

    let width = ranking
        .iter()
        .map(|entry| terminal::display_width(&entry.character))
        .max()
        .unwrap_or(4)
        .clamp(4, 30);
    for entry in ranking {
        println!("  {} {:>4}", terminal::pad(&entry.character, width), entry.count);
    }
}
