//! A phonetic dictionary.
//!
//! This provides a wrapper around the `cmusphinx` phonetic dictionary, and is the
//! `PronunciationSource` the command line tool hands to the rhyme matcher.
//!
//! This dictionary uses most of the ARPABET 2-letter phonemes, which are described here:
//! <https://en.wikipedia.org/wiki/ARPABET>
//!
//! Entries in the dictionary have a term and pronunciation, with the option of having several
//! different pronunciations for a word:
//!
//! ```raw
//! aluminium AH0 L UW1 M IH0 N AH0 M
//! aluminium(2) AE2 L Y UW1 M IH0 N AH0 M
//! ```
//!
//! Vowel sounds include a stress notation as an integer, e.g. `AH0`. Zero indicates no stress,
//! one is primary stress and two is secondary. The rhyme matcher uses these to find the part of
//! each pronunciation that has to match for two words to rhyme.
//!
//! Both the current lowercase `cmudict.dict` format and the older uppercase `cmudict-0.7b`
//! format (with `;;;` comment lines) are accepted.
//!
//! Related references:
//!
//! * <https://github.com/cmusphinx/cmudict>
//! * <https://cmusphinx.github.io/wiki/tutorialdict/>
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, RumbleError};
use crate::rhymes::PronunciationSource;

/// An Entry represents a single word or variant with its associated pronunciation.
///
/// This corresponds to one line in the cmudict file.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The word without any variant suffix, lowercased, e.g. "flower", "aluminium", "a.m.".
    pub word: String,
    /// The individual phonemes as listed, in the original order e.g. `["SH", "R", "IH1", "M", "P"]`.
    pub phonemes: Vec<String>,
    /// The variant, e.g. 2 for the term `aluminium(2)`. Default 1.
    pub variant: i32,
}

impl Entry {
    /// Parses the given line, assumed to be in cmudict format.
    ///
    /// Returns `Ok(None)` for lines that hold no entry (blank lines and comments).
    ///
    /// Example inputs:
    /// ```raw
    /// 'twas T W AH1 Z
    /// a(2) EY1
    /// a.m. EY2 EH1 M
    /// achill AE1 K IH0 L # place, irish
    /// ```
    pub fn parse(line: &str) -> Result<Option<Entry>> {
        // Strip comments if present ('#' through the end of line).
        let trimmed_line = match line.find('#') {
            Some(comment_start) => &line[..comment_start],
            None => line,
        }
        .trim();
        if trimmed_line.is_empty() || trimmed_line.starts_with(";;;") {
            return Ok(None);
        }

        lazy_static! {
            // This matches the term and optional (N) suffix, e.g. from "aalborg(2)".
            // Capture group 1 has the term text and capture 3 has the integer, if any.
            // Terms may themselves contain parens, e.g. "(begin-parens" in cmudict-0.7b.
            static ref TERM_RE: Regex = Regex::new(r"^([^ #]+?)(\(([0-9]+)\))?$").unwrap();
            // This matches phonemes like "AA1", "N" and "AH0". If there is an integer
            // part, it's a vowel sound.
            static ref PHONEME_RE: Regex = Regex::new(r"^[A-Z]+[0-9]?$").unwrap();
        }

        let mut tokens = trimmed_line.split_whitespace();
        let term = tokens.next().unwrap_or_default();
        let term_cap = TERM_RE
            .captures(term)
            .ok_or_else(|| RumbleError::Parse(format!("bad dictionary term {:?}", term)))?;

        let mut result = Entry {
            word: term_cap[1].to_lowercase(),
            phonemes: vec![],
            variant: 1,
        };
        if let Some(variant) = term_cap.get(3) {
            result.variant = variant.as_str().parse().map_err(|_| {
                RumbleError::Parse(format!("bad variant number in {:?}", term))
            })?;
        }

        for ph in tokens {
            if !PHONEME_RE.is_match(ph) {
                return Err(RumbleError::Parse(format!(
                    "bad phoneme {:?} for term {:?}",
                    ph, term
                )));
            }
            result.phonemes.push(ph.to_string());
        }
        if result.phonemes.is_empty() {
            return Err(RumbleError::Parse(format!(
                "term {:?} has no phonemes",
                term
            )));
        }

        Ok(Some(result))
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.variant == 1 {
            write!(f, "{}: {}", self.word, self.phonemes.join(" "))
        } else {
            write!(
                f,
                "{}({}): {}",
                self.word,
                self.variant,
                self.phonemes.join(" ")
            )
        }
    }
}

/// A container for a collection of entries, grouped by word.
///
/// Either construct one and populate it with individual entries, or initialize one from
/// a text file in `cmudict.dict` format.
#[derive(Debug, Default)]
pub struct Dictionary {
    // All the pronunciations of each word, in file order.
    entries: HashMap<String, Vec<Entry>>,
}

impl Dictionary {
    /// Creates a new empty Dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            entries: HashMap::new(),
        }
    }

    /// Creates a new dictionary, populated from the given text file.
    pub fn new_from_cmudict_file<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
        let f = std::fs::File::open(path.as_ref())?;
        let dict = Dictionary::from_reader(std::io::BufReader::new(f))?;
        info!(
            "Read {} words from {}.",
            dict.len(),
            path.as_ref().display()
        );
        Ok(dict)
    }

    /// Creates a new dictionary from anything yielding cmudict-formatted lines.
    ///
    /// Bytes that aren't valid UTF-8 are replaced rather than failing the load.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        for (i, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let entry = Entry::parse(&String::from_utf8_lossy(&line)).map_err(|e| match e {
                RumbleError::Parse(msg) => RumbleError::Parse(format!("line {}: {}", i + 1, msg)),
                other => other,
            })?;
            if let Some(entry) = entry {
                dict.insert(entry);
            }
        }
        Ok(dict)
    }

    /// Inserts a single entry, alongside any other pronunciations of the same word.
    pub fn insert(&mut self, entry: Entry) {
        self.entries
            .entry(entry.word.clone())
            .or_insert_with(Vec::new)
            .push(entry);
    }

    /// Inserts all of the items in `lines` as though they were lines of the cmudict file.
    #[cfg(test)]
    pub fn insert_all(&mut self, lines: &[&str]) {
        for line in lines {
            if let Some(entry) = Entry::parse(line).unwrap() {
                self.insert(entry);
            }
        }
    }

    /// Returns all the pronunciations of the given (lowercase) word, or None.
    pub fn lookup(&self, word: &str) -> Option<&Vec<Entry>> {
        self.entries.get(word)
    }

    /// Returns the number of distinct words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PronunciationSource for Dictionary {
    fn phonemes_for(&self, word: &str) -> HashSet<Vec<String>> {
        match self.lookup(&word.to_lowercase()) {
            Some(entries) => entries.iter().map(|e| e.phonemes.clone()).collect(),
            None => HashSet::new(),
        }
    }
}

// mod tests
