//! Turns rhyming pairs into phrases like "the dispute in Beirut".
use std::io::Write;

use crate::error::Result;
use crate::rhymes::BipartiteRhymeMatcher;

/// Upper-cases the first character and lower-cases the rest, e.g. `nEW york` -> `New york`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Formats a single phrase from a battle word and a place name.
pub fn format_phrase(word: &str, place: &str) -> String {
    format!("the {} in {}", word, capitalize(place))
}

/// Writes one phrase per rhyming pair in `matcher` to `out`, returning the number written.
pub fn write_phrases<W: Write>(out: &mut W, matcher: &BipartiteRhymeMatcher) -> Result<usize> {
    let mut count = 0;
    for (word, place) in matcher.rhyming_pairs() {
        writeln!(out, "{}", format_phrase(word, place))?;
        count += 1;
    }
    Ok(count)
}
