//! Parsing of the numbered recommendation lists returned by the text generator
//!
//! Expected shape:
//!
//! ```text
//! 1. Inception (2010) - Ciencia ficción
//!    Descripción: Un ladrón que roba secretos a través de los sueños.
//! 2. Up (2009) - Animación
//! ```
//!
//! Each numbered header starts a record. A continuation line starting with a
//! description label sets the description; later continuation lines are
//! appended to it. Anything else is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ParsedRecommendation;

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.").expect("numbered line regex should compile"));

/// `<n>. <title> (<year>) - <genre>`, year optional. Without a year the dash
/// must follow whitespace so hyphenated titles ("Spider-Man") stay whole;
/// after `(<year>)` it may come right away.
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s*(.+?)(?:\s*\((\d{4})\)\s*|\s+)[-–—]\s*(.+)$")
        .expect("recommendation header regex should compile")
});

const DESCRIPTION_LABELS: [&str; 2] = ["Descripción:", "Description:"];

/// Parses AI text into structured recommendations, in input order.
///
/// Returns an empty vector when no line is numbered; callers then show the
/// raw text instead.
pub fn parse_recommendations(text: &str) -> Vec<ParsedRecommendation> {
    let mut parsed = Vec::new();
    let mut current: Option<ParsedRecommendation> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if NUMBERED_LINE.is_match(line) {
            parsed.extend(current.take());
            current = parse_header(line);
            continue;
        }

        let Some(rec) = current.as_mut() else {
            continue;
        };

        if let Some(description) = strip_description_label(line) {
            rec.description = description.trim().to_string();
        } else if !rec.description.is_empty() {
            rec.description.push(' ');
            rec.description.push_str(line);
        }
    }
    parsed.extend(current);

    parsed
}

fn parse_header(line: &str) -> Option<ParsedRecommendation> {
    let captures = HEADER.captures(line)?;

    let title = clean_title(captures.get(1)?.as_str());
    if title.is_empty() {
        return None;
    }

    Some(ParsedRecommendation {
        title,
        year: captures.get(2).map(|m| m.as_str().to_string()),
        genre: captures.get(3)?.as_str().trim().to_string(),
        description: String::new(),
    })
}

/// Drops markdown emphasis and brackets the model sometimes keeps from the
/// prompt template
fn clean_title(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '"')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .to_string()
}

fn strip_description_label(line: &str) -> Option<&str> {
    DESCRIPTION_LABELS
        .iter()
        .find_map(|label| line.strip_prefix(label))
}
