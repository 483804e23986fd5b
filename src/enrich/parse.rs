// src/enrich/parse.rs
//! Ordered strategies for reading a batched highlight reply.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static RE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("fence regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// JSON array with exactly one entry per item.
    StructuredList,
    /// One highlight per non-empty line.
    LineSplit,
}

impl ParseStrategy {
    /// Tried first to last.
    pub const ORDERED: [ParseStrategy; 2] = [ParseStrategy::StructuredList, ParseStrategy::LineSplit];

    pub fn name(self) -> &'static str {
        match self {
            ParseStrategy::StructuredList => "structured_list",
            ParseStrategy::LineSplit => "line_split",
        }
    }

    /// `Some` only with exactly `expected` highlights, position i for item i.
    pub fn parse(self, content: &str, expected: usize) -> Option<Vec<String>> {
        match self {
            ParseStrategy::StructuredList => parse_structured(content, expected),
            ParseStrategy::LineSplit => parse_lines(content, expected),
        }
    }
}

/// First strategy that yields `expected` highlights.
pub fn parse_highlights(content: &str, expected: usize) -> Option<(ParseStrategy, Vec<String>)> {
    ParseStrategy::ORDERED
        .into_iter()
        .find_map(|s| s.parse(content, expected).map(|v| (s, v)))
}

fn strip_fence(content: &str) -> &str {
    let trimmed = content.trim();
    RE_FENCE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed)
}

fn parse_structured(content: &str, expected: usize) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(strip_fence(content)).ok()?;
    let arr = value.as_array()?;
    if arr.len() != expected {
        return None;
    }
    Some(
        arr.iter()
            .map(|v| match v {
                Value::Null | Value::Bool(false) => String::new(),
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn parse_lines(content: &str, expected: usize) -> Option<Vec<String>> {
    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("Article"))
        .map(str::to_string)
        .collect();
    if lines.len() < expected {
        return None;
    }
    Some(lines.into_iter().take(expected).collect())
}
