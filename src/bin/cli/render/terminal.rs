use nihon_lib::events::SessionEvent;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Fixed-width bar such as `[######----]`
pub fn progress_bar(current: u32, total: u32, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((current.min(total) as f64 / total as f64) * width as f64).round() as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled.min(width)))
}

/// One line per notable event; graded answers are reported separately
pub fn render_events(events: &[SessionEvent], use_color: bool) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::AnswerGraded { .. } => None,
            SessionEvent::LevelUp { level, .. } => Some(paint(
                &format!("Level up! You are now level {}.", level),
                Color::YELLOW,
                use_color,
            )),
            SessionEvent::TierUnlocked { category, tier } => Some(paint(
                &format!("New {} tier unlocked (tier {}).", category, tier + 1),
                Color::CYAN,
                use_color,
            )),
            SessionEvent::AchievementUnlocked { name, .. } => Some(paint(
                &format!("Achievement unlocked: {}", name),
                Color::MAGENTA,
                use_color,
            )),
        })
        .collect()
}

/// Pad `text` to `width` display columns, counting wide characters as two
pub fn pad(text: &str, width: usize) -> String {
    let columns = display_width(text);
    if columns >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - columns))
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}
