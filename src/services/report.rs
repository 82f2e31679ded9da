use colored::{ColoredString, Colorize};

use crate::components::Component;
use crate::rating::PlayerRating;

const NAME_WIDTH: usize = 24;
const MATCH_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 10;

/// Terminal table of ratings, best first
pub fn render_summary(ratings: &[&PlayerRating], components: &[Component]) -> String {
    let mut sorted: Vec<&PlayerRating> = ratings.to_vec();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let mut lines = Vec::with_capacity(sorted.len() + 2);
    lines.push(header(components));
    lines.push("-".repeat(NAME_WIDTH + MATCH_WIDTH + VALUE_WIDTH * (components.len() + 1) + 2));

    for rating in sorted {
        let mut line = format!(
            "{:<name$} {:<id$}{}",
            truncate(&rating.display_name(), NAME_WIDTH),
            truncate(&rating.match_id, MATCH_WIDTH),
            signed(rating.rating, 3).bold(),
            name = NAME_WIDTH,
            id = MATCH_WIDTH,
        );
        for &component in components {
            match rating.components.get(component) {
                Some(value) => line.push_str(&signed(value, 3).to_string()),
                None => line.push_str(&format!("{:>width$}", "-", width = VALUE_WIDTH)),
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn print_summary(ratings: &[&PlayerRating], components: &[Component]) {
    println!("{}", render_summary(ratings, components));
}

fn header(components: &[Component]) -> String {
    let mut header = format!(
        "{:<name$} {:<id$}{:>value$}",
        "Player",
        "Match",
        "Rating",
        name = NAME_WIDTH,
        id = MATCH_WIDTH,
        value = VALUE_WIDTH,
    );
    for component in components {
        header.push_str(&format!("{:>width$}", component.name(), width = VALUE_WIDTH));
    }
    header.bold().to_string()
}

fn signed(value: f64, precision: usize) -> ColoredString {
    let text = format!("{:>width$.prec$}", value, width = VALUE_WIDTH, prec = precision);
    if value > 0.0 {
        text.green()
    } else if value < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
