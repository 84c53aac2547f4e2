//! Answer sequence parsing for the CLI driver

use crate::types::{Result, StaircaseError};

/// Canonical demo sequence: ten hits, two misses, then mixed
pub const REFERENCE_SEQUENCE: &str = "TTTTTTTTTT FF TT F TTT F T";

/// Parse one answer character. `T/Y/1/+` are correct, `F/N/0/-` incorrect.
pub fn parse_answer(c: char) -> Result<bool> {
    match c.to_ascii_uppercase() {
        'T' | 'Y' | '1' | '+' => Ok(true),
        'F' | 'N' | '0' | '-' => Ok(false),
        other => Err(StaircaseError::InvalidAnswer(other)),
    }
}

/// Parse a compact answer string. Whitespace and commas are ignored.
pub fn parse_answers(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(parse_answer)
        .collect()
}

/// Parse one interactive line; accepts a single mark or a word like `yes`/`no`.
pub fn parse_answer_line(line: &str) -> Result<bool> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "yes" | "true" | "correct" => return Ok(true),
        "no" | "false" | "incorrect" | "wrong" => return Ok(false),
        _ => {}
    }
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => parse_answer(c),
        (Some(c), Some(_)) => Err(StaircaseError::InvalidAnswer(c)),
        (None, _) => Err(StaircaseError::InvalidAnswer(' ')),
    }
}
