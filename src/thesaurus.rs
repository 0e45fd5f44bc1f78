//! A flat-file thesaurus, read through a byte-offset index.
//!
//! The thesaurus comes as two files in the OpenOffice "MyThes" format, e.g. `th_en_US_v2.idx`
//! and `th_en_US_v2.dat`.
//!
//! The index file starts with a line naming the text encoding and a line with the number of
//! entries. Every line after that is `headword|byte_offset`, sorted by headword:
//!
//! ```raw
//! ISO8859-1
//! 145262
//! 'hood|10
//! 's gravenhage|88
//! ```
//!
//! The data file starts with the encoding line. At each byte offset named by the index there is
//! a record: a `headword|sense_count` line followed by `sense_count` sense lines, each with a
//! parenthesised part of speech and then the related terms:
//!
//! ```raw
//! junk|2
//! (noun)|debris|dust|rubble|detritus
//! (verb)|discard|fling|toss|keep (antonym)
//! ```
//!
//! Neither file is loaded into memory. `ThesaurusIndex` scans forward through the index only as
//! far as each lookup needs, and `Thesaurus` seeks straight to a record.
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, RumbleError};

/// A set of plain terms, with annotations stripped and antonyms removed.
pub type SynonymSet = HashSet<String>;

/// The parts of speech used to tag senses in the thesaurus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adj,
    Noun,
    Verb,
    Adv,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Adj,
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adv,
    ];

    /// Returns the set of every part of speech, the default filter for synonym queries.
    pub fn all() -> HashSet<PartOfSpeech> {
        PartOfSpeech::ALL.iter().copied().collect()
    }

    /// The tag as written in the data file, without the parentheses.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "adj",
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adv => "adv",
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = RumbleError;

    fn from_str(s: &str) -> Result<PartOfSpeech> {
        match s {
            "adj" => Ok(PartOfSpeech::Adj),
            "noun" => Ok(PartOfSpeech::Noun),
            "verb" => Ok(PartOfSpeech::Verb),
            "adv" => Ok(PartOfSpeech::Adv),
            _ => Err(RumbleError::Parse(format!("unknown part of speech {:?}", s))),
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parenthetical that may follow a related term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Annotation {
    Antonym,
    SimilarTerm,
    GenericTerm,
    RelatedTerm,
}

impl Annotation {
    // Stripped one after another, in this order, from the end of each term.
    const STRIPPED: [(&'static str, Annotation); 3] = [
        ("(similar term)", Annotation::SimilarTerm),
        ("(generic term)", Annotation::GenericTerm),
        ("(related term)", Annotation::RelatedTerm),
    ];
}

/// One term from a sense line, split into the bare text and its annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedTerm {
    pub text: String,
    /// The outermost annotation, if any.
    pub annotation: Option<Annotation>,
}

/// Drops the last character of `s`, normally the space in front of an annotation.
fn drop_last_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next_back();
    chars.as_str()
}

impl RelatedTerm {
    /// Splits a raw term such as `combat (similar term)` into text and annotation.
    ///
    /// Each annotation is removed with the one character in front of it, so
    /// `combat (similar term)` loses exactly 15 characters. The similar, generic and related
    /// annotations are tried once each in that order, so `x (generic term) (similar term)` comes
    /// out as `x`.
    pub fn parse(raw: &str) -> RelatedTerm {
        if let Some(rest) = raw.strip_suffix("(antonym)") {
            return RelatedTerm {
                text: drop_last_char(rest).to_string(),
                annotation: Some(Annotation::Antonym),
            };
        }
        let mut text = raw;
        let mut annotation = None;
        for (suffix, stripped) in Annotation::STRIPPED.iter() {
            if let Some(rest) = text.strip_suffix(*suffix) {
                text = drop_last_char(rest);
                annotation.get_or_insert(*stripped);
            }
        }
        RelatedTerm {
            text: text.to_string(),
            annotation,
        }
    }

    pub fn is_antonym(&self) -> bool {
        self.annotation == Some(Annotation::Antonym)
    }
}

/// One meaning of a headword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sense {
    /// The part of speech tag with the parentheses removed, e.g. `noun`.
    pub tag: String,
    /// All the terms after the tag. The first one is the gloss for this meaning.
    pub terms: Vec<RelatedTerm>,
}

impl Sense {
    /// Parses a sense line like `(noun)|debris|dust|rubble`.
    fn parse(line: &str) -> Result<Sense> {
        let mut fields = line.trim().split('|');
        let tag_field = fields.next().unwrap_or_default();
        let tag = tag_field
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| {
                RumbleError::Parse(format!("sense line without a (pos) tag: {:?}", line))
            })?;
        Ok(Sense {
            tag: tag.to_string(),
            terms: fields.map(RelatedTerm::parse).collect(),
        })
    }

    /// Returns the part of speech, or None if the tag isn't one of the four known ones.
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        self.tag.parse().ok()
    }
}

/// Everything the data file holds for one headword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThesaurusRecord {
    pub headword: String,
    pub senses: Vec<Sense>,
}

impl ThesaurusRecord {
    /// Collects the non-antonym terms of every sense tagged with one of `parts_of_speech`.
    ///
    /// The gloss (first term) of each sense is included.
    pub fn synonyms(&self, parts_of_speech: &HashSet<PartOfSpeech>) -> SynonymSet {
        let mut result = SynonymSet::new();
        for sense in &self.senses {
            match sense.part_of_speech() {
                Some(pos) if parts_of_speech.contains(&pos) => {}
                _ => continue,
            }
            if let Some(gloss) = sense.terms.first() {
                debug!("Meaning of {} ({}): {}", self.headword, sense.tag, gloss.text);
            }
            result.extend(
                sense
                    .terms
                    .iter()
                    .filter(|term| !term.is_antonym())
                    .map(|term| term.text.clone()),
            );
        }
        result
    }
}

/// Reads one line into `buf`, without its line ending. Returns false at end of file.
///
/// Lines that aren't valid UTF-8 are decoded as ISO8859-1, the encoding the published English
/// thesaurus uses.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<bool> {
    buf.clear();
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(false);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    match String::from_utf8(bytes) {
        Ok(line) => buf.push_str(&line),
        Err(e) => buf.extend(e.into_bytes().into_iter().map(char::from)),
    }
    Ok(true)
}

/// Splits an index line into headword and byte offset.
fn parse_index_line(line: &str) -> Result<(&str, u64)> {
    let (headword, offset) = line
        .split_once('|')
        .ok_or_else(|| RumbleError::Parse(format!("index line without '|': {:?}", line)))?;
    let offset = offset
        .trim()
        .parse()
        .map_err(|_| RumbleError::Parse(format!("bad byte offset in index line {:?}", line)))?;
    Ok((headword, offset))
}

/// The location of each headword in the thesaurus data file.
///
/// Lookups scan forward from wherever the previous lookup stopped, remembering every entry they
/// pass. Because the file is sorted, a scan stops as soon as it passes the target. This is cheap
/// when words are looked up in roughly ascending order, but it means a word that was skipped
/// over without being read is never found: the scan doesn't go back.
///
/// The underlying file is closed when the index is dropped.
#[derive(Debug)]
pub struct ThesaurusIndex<R = BufReader<File>> {
    reader: R,
    // Every entry read so far, from this and earlier lookups.
    offsets: HashMap<String, u64>,
}

impl ThesaurusIndex<BufReader<File>> {
    /// Opens the index file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        ThesaurusIndex::from_reader(BufReader::new(f))
    }
}

impl<R: BufRead> ThesaurusIndex<R> {
    /// Wraps an index stream, skipping the encoding and entry count lines.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let mut line = String::new();
        read_line(&mut reader, &mut line)?;
        debug!("Ignoring index encoding {:?}", line);
        // TODO: The entry count would allow a binary search instead of the forward scan.
        read_line(&mut reader, &mut line)?;
        debug!("Ignoring index entry count {:?}", line);
        Ok(ThesaurusIndex {
            reader,
            offsets: HashMap::new(),
        })
    }

    /// Returns the byte offset of `target`'s record in the data file, or None if it isn't found.
    pub fn byte_offset(&mut self, target: &str) -> Result<Option<u64>> {
        if let Some(&offset) = self.offsets.get(target) {
            return Ok(Some(offset));
        }

        let mut line = String::new();
        while read_line(&mut self.reader, &mut line)? {
            let (headword, offset) = parse_index_line(&line)?;
            self.offsets.insert(headword.to_string(), offset);
            // Past the target: it can't appear later in a sorted index.
            if headword > target {
                return Ok(None);
            }
            if headword == target {
                return Ok(Some(offset));
            }
        }
        Ok(None)
    }

    /// Returns the number of entries read from the file so far.
    pub fn num_cached(&self) -> usize {
        self.offsets.len()
    }
}

/// A thesaurus backed by a data file.
///
/// Records are located with a `ThesaurusIndex`. The underlying file is closed when the
/// thesaurus is dropped.
#[derive(Debug)]
pub struct Thesaurus<R = BufReader<File>> {
    reader: R,
}

impl Thesaurus<BufReader<File>> {
    /// Opens the data file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        Thesaurus::from_reader(BufReader::new(f))
    }
}

impl<R: BufRead + Seek> Thesaurus<R> {
    /// Wraps a data stream, skipping the encoding line.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let mut line = String::new();
        read_line(&mut reader, &mut line)?;
        debug!("Ignoring thesaurus encoding {:?}", line);
        Ok(Thesaurus { reader })
    }

    /// Reads the whole record starting at `offset`.
    ///
    /// Fails with `RumbleError::Parse` if the file ends before the declared number of senses.
    pub fn read_record(&mut self, offset: u64) -> Result<ThesaurusRecord> {
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut line = String::new();
        if !read_line(&mut self.reader, &mut line)? {
            return Err(RumbleError::Parse(format!(
                "no thesaurus record at offset {}",
                offset
            )));
        }
        let (headword, num_senses) = line.split_once('|').ok_or_else(|| {
            RumbleError::Parse(format!("record header without '|': {:?}", line))
        })?;
        let num_senses: usize = num_senses.trim().parse().map_err(|_| {
            RumbleError::Parse(format!("bad sense count in record header {:?}", line))
        })?;
        let headword = headword.to_string();

        let mut senses = Vec::with_capacity(num_senses);
        for _ in 0..num_senses {
            if !read_line(&mut self.reader, &mut line)? {
                return Err(RumbleError::Parse(format!(
                    "record for {:?} declares {} senses but the file ends after {}",
                    headword,
                    num_senses,
                    senses.len()
                )));
            }
            senses.push(Sense::parse(&line)?);
        }
        Ok(ThesaurusRecord { headword, senses })
    }

    /// Returns the synonyms in the record at `offset`.
    ///
    /// Only senses tagged with one of `parts_of_speech` contribute; None means all of them.
    pub fn synonyms_at(
        &mut self,
        offset: u64,
        parts_of_speech: Option<&HashSet<PartOfSpeech>>,
    ) -> Result<SynonymSet> {
        let record = self.read_record(offset)?;
        Ok(match parts_of_speech {
            Some(pos) => record.synonyms(pos),
            None => record.synonyms(&PartOfSpeech::all()),
        })
    }

    /// Looks `word` up in `index` and returns its synonyms, or None if the index doesn't have it.
    pub fn synonyms<I: BufRead>(
        &mut self,
        index: &mut ThesaurusIndex<I>,
        word: &str,
        parts_of_speech: Option<&HashSet<PartOfSpeech>>,
    ) -> Result<Option<SynonymSet>> {
        match index.byte_offset(word)? {
            Some(offset) => Ok(Some(self.synonyms_at(offset, parts_of_speech)?)),
            None => Ok(None),
        }
    }
}

/// Returns the union of the synonyms of all `words`.
///
/// Words missing from the index are logged and otherwise ignored.
pub fn collect_synonyms<I, R, W>(
    index: &mut ThesaurusIndex<I>,
    thesaurus: &mut Thesaurus<R>,
    words: W,
    parts_of_speech: &HashSet<PartOfSpeech>,
) -> Result<SynonymSet>
where
    I: BufRead,
    R: BufRead + Seek,
    W: IntoIterator,
    W::Item: AsRef<str>,
{
    let mut result = SynonymSet::new();
    for word in words {
        let word = word.as_ref();
        match thesaurus.synonyms(index, word, Some(parts_of_speech))? {
            Some(synonyms) => {
                debug!("Found {} synonyms for {:?}.", synonyms.len(), word);
                result.extend(synonyms);
            }
            None => warn!("{:?} is not in the thesaurus index.", word),
        }
    }
    Ok(result)
}

/// Opens the index and data files, collects the synonyms of all `words`, and closes the files.
pub fn all_synonyms<P, Q, W>(
    index_path: P,
    data_path: Q,
    words: W,
    parts_of_speech: &HashSet<PartOfSpeech>,
) -> Result<SynonymSet>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    W: IntoIterator,
    W::Item: AsRef<str>,
{
    let mut index = ThesaurusIndex::open(index_path)?;
    let mut thesaurus = Thesaurus::open(data_path)?;
    collect_synonyms(&mut index, &mut thesaurus, words, parts_of_speech)
}
