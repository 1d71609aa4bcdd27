// file: src/extractor/patterns.rs
// description: compiled regex patterns for heading and paragraph heuristics
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Lines that open a list item: "1. ", "• ", "* " or a leading dash
    pub static ref LIST_MARKER: Regex = Regex::new(
        r"^(\d+\.\s|•\s|\*\s|-)"
    ).expect("LIST_MARKER regex is valid");

    // Headings that are only a section number, e.g. "3" or "3."
    pub static ref PURE_NUMERAL: Regex = Regex::new(
        r"^\d+\.?$"
    ).expect("PURE_NUMERAL regex is valid");

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE_RUN regex is valid");
}

/// Bullet characters accepted in front of a heading.
pub const HEADING_MARKERS: [char; 3] = ['•', '-', '*'];
