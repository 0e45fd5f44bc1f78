//! A rhyming dictionary over two word sets.
//!
//! The matcher is bipartite: words from the left set can only rhyme with words from the right
//! set. In the command line tool the left set holds synonyms of "battle" and the right set holds
//! place names.
//!
//! The work of finding the rhyming part of each pronunciation is done once, when the matcher is
//! built. Each rhyme query after that is a set intersection, which keeps the left x right cross
//! product cheap at the cost of holding every profile in memory.
use std::collections::{HashMap, HashSet};

use crate::error::{Result, RumbleError, Side};

/// Anything that can report the pronunciations of a word.
///
/// Each pronunciation is a sequence of ARPABET phonemes, with stress digits on the vowels, e.g.
/// `["B", "EY0", "R", "UW1", "T"]`. Unknown words have no pronunciations; implementations
/// should return an empty set rather than fail.
pub trait PronunciationSource {
    fn phonemes_for(&self, word: &str) -> HashSet<Vec<String>>;
}

/// The part of a pronunciation that must match for two words to rhyme.
///
/// This is the phoneme sequence from the last stressed vowel through the end of the word, e.g.
/// `UW1 T` for `B EY0 R UW1 T`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RhymeKey(String);

impl RhymeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RhymeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rhyme keys for every pronunciation of one word.
pub type WordRhymeProfile = HashSet<RhymeKey>;

/// Computes the rhyme key of a single pronunciation.
///
/// Primary (`1`) and secondary (`2`) stress both count. If no vowel is stressed, the whole
/// pronunciation is the key.
pub fn rhyme_key(phonemes: &[String]) -> RhymeKey {
    let start = phonemes
        .iter()
        .rposition(|ph| ph.ends_with('1') || ph.ends_with('2'))
        .unwrap_or(0);
    RhymeKey(phonemes[start..].join(" "))
}

/// Builds the profile of one word from all of its pronunciations.
fn rhyme_profile<S: PronunciationSource + ?Sized>(source: &S, word: &str) -> WordRhymeProfile {
    source
        .phonemes_for(word)
        .iter()
        .map(|phonemes| rhyme_key(phonemes))
        .collect()
}

/// One half of the matcher: the words in the order they were given, plus their profiles.
#[derive(Debug, Default)]
struct Vocabulary {
    words: Vec<String>,
    profiles: HashMap<String, WordRhymeProfile>,
}

impl Vocabulary {
    fn build<I, S>(words: I, source: &S) -> Vocabulary
    where
        I: IntoIterator,
        I::Item: Into<String>,
        S: PronunciationSource + ?Sized,
    {
        let mut vocab = Vocabulary::default();
        for word in words {
            let word: String = word.into();
            if vocab.profiles.contains_key(&word) {
                continue;
            }
            let profile = rhyme_profile(source, &word);
            if profile.is_empty() {
                debug!("No pronunciation known for {:?}.", word);
            }
            vocab.profiles.insert(word.clone(), profile);
            vocab.words.push(word);
        }
        vocab
    }
}

/// A rhyming dictionary with left and right word sets.
///
/// `is_rhyme(a, b)` is only defined when `a` came from the left set and `b` from the right set.
///
/// ```
/// use rumble::dictionary::{Dictionary, Entry};
/// use rumble::rhymes::BipartiteRhymeMatcher;
///
/// let mut dict = Dictionary::new();
/// for line in &["fool F UW1 L", "cool K UW1 L", "pool P UW1 L"] {
///     if let Some(entry) = Entry::parse(line)? {
///         dict.insert(entry);
///     }
/// }
/// let matcher = BipartiteRhymeMatcher::new(vec!["fool", "cool"], vec!["pool"], &dict);
/// assert!(matcher.is_rhyme("fool", "pool")?);
/// assert!(matcher.is_rhyme("fool", "cool").is_err()); // "cool" is not a right word.
/// # Ok::<(), rumble::error::RumbleError>(())
/// ```
#[derive(Debug)]
pub struct BipartiteRhymeMatcher {
    left: Vocabulary,
    right: Vocabulary,
}

impl BipartiteRhymeMatcher {
    /// Creates a matcher, looking up every word's pronunciations in `source`.
    ///
    /// Duplicate words are kept once. Words that `source` doesn't know get an empty profile and
    /// never rhyme.
    pub fn new<L, R, S>(left_words: L, right_words: R, source: &S) -> BipartiteRhymeMatcher
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        S: PronunciationSource + ?Sized,
    {
        let left = Vocabulary::build(left_words, source);
        let right = Vocabulary::build(right_words, source);
        info!(
            "Built rhyme profiles for {} left and {} right words.",
            left.words.len(),
            right.words.len()
        );
        BipartiteRhymeMatcher { left, right }
    }

    /// Returns the profile of `word` in the given half of the vocabulary.
    pub fn profile(&self, side: Side, word: &str) -> Option<&WordRhymeProfile> {
        match side {
            Side::Left => self.left.profiles.get(word),
            Side::Right => self.right.profiles.get(word),
        }
    }

    /// Decides whether the two words rhyme.
    ///
    /// The words rhyme if any pronunciation of `word1` shares a rhyme key with any pronunciation
    /// of `word2`.
    ///
    /// Returns `RumbleError::Vocabulary` if `word1` isn't a left word or `word2` isn't a right
    /// word.
    pub fn is_rhyme(&self, word1: &str, word2: &str) -> Result<bool> {
        let keys1 = self
            .profile(Side::Left, word1)
            .ok_or_else(|| RumbleError::Vocabulary {
                word: word1.to_string(),
                side: Side::Left,
            })?;
        let keys2 = self
            .profile(Side::Right, word2)
            .ok_or_else(|| RumbleError::Vocabulary {
                word: word2.to_string(),
                side: Side::Right,
            })?;
        Ok(!keys1.is_disjoint(keys2))
    }

    /// Returns every (left, right) pair that rhymes.
    ///
    /// Pairs come out in the order the words were given to `new`, left word major. Each call
    /// starts a fresh pass over the cross product.
    pub fn rhyming_pairs(&self) -> RhymingPairs<'_> {
        RhymingPairs {
            matcher: self,
            left_idx: 0,
            right_idx: 0,
        }
    }

    pub fn num_left(&self) -> usize {
        self.left.words.len()
    }

    pub fn num_right(&self) -> usize {
        self.right.words.len()
    }
}

/// Lazily walks the left x right cross product of a `BipartiteRhymeMatcher`.
pub struct RhymingPairs<'a> {
    matcher: &'a BipartiteRhymeMatcher,
    // Position of the next pair to check, like an odometer with right_idx as the fast digit.
    left_idx: usize,
    right_idx: usize,
}

impl<'a> Iterator for RhymingPairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        let matcher: &'a BipartiteRhymeMatcher = self.matcher;
        let left = &matcher.left;
        let right = &matcher.right;
        while self.left_idx < left.words.len() {
            let word1 = &left.words[self.left_idx];
            let keys1 = &left.profiles[word1];
            // Empty profiles can't intersect anything, so skip the whole row.
            if keys1.is_empty() || self.right_idx >= right.words.len() {
                self.left_idx += 1;
                self.right_idx = 0;
                continue;
            }
            let word2 = &right.words[self.right_idx];
            self.right_idx += 1;
            if !keys1.is_disjoint(&right.profiles[word2]) {
                return Some((word1.as_str(), word2.as_str()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_rows = self.matcher.left.words.len().saturating_sub(self.left_idx);
        let right_len = self.matcher.right.words.len();
        let upper = (remaining_rows * right_len).saturating_sub(self.right_idx);
        (0, Some(upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn phonemes(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn dictionary(lines: &[&str]) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert_all(lines);
        dict
    }

    /// A source with hand-made pronunciations, to control the rhyme keys exactly.
    struct FixedSource(HashMap<&'static str, Vec<&'static str>>);

    impl PronunciationSource for FixedSource {
        fn phonemes_for(&self, word: &str) -> HashSet<Vec<String>> {
            match self.0.get(word) {
                Some(prons) => prons.iter().map(|p| phonemes(p)).collect(),
                None => HashSet::new(),
            }
        }
    }

    #[test]
    fn test_rhyme_key_starts_at_last_stressed_vowel() {
        assert_eq!(rhyme_key(&phonemes("B EY0 R UW1 T")).as_str(), "UW1 T");
        assert_eq!(rhyme_key(&phonemes("D IH0 S P Y UW1 T")).as_str(), "UW1 T");
        assert_eq!(
            rhyme_key(&phonemes("B IH1 K ER0 IH0 NG")).as_str(),
            "IH1 K ER0 IH0 NG"
        );
        // Secondary stress later in the word wins over an earlier primary stress.
        assert_eq!(
            rhyme_key(&phonemes("D AY1 AH0 G R AE2 M")).as_str(),
            "AE2 M"
        );
    }

    #[test]
    fn test_rhyme_key_without_stress_is_whole_word() {
        assert_eq!(rhyme_key(&phonemes("AH0")).as_str(), "AH0");
        assert_eq!(rhyme_key(&phonemes("DH AH0")).as_str(), "DH AH0");
        assert_eq!(rhyme_key(&[]).as_str(), "");
    }

    #[test]
    fn test_shared_key_rhymes_and_disjoint_keys_do_not() {
        let mut prons = HashMap::new();
        prons.insert("spat", vec!["S P AE1 T", "S P AA1 T"]);
        prons.insert("ghat", vec!["G AA1 T"]);
        prons.insert("perth", vec!["P ER1 TH"]);
        let source = FixedSource(prons);
        let matcher = BipartiteRhymeMatcher::new(vec!["spat"], vec!["ghat", "perth"], &source);

        // Only the second pronunciation of "spat" matches.
        assert!(matcher.is_rhyme("spat", "ghat").unwrap());
        assert!(!matcher.is_rhyme("spat", "perth").unwrap());
        assert_eq!(matcher.profile(Side::Left, "spat").unwrap().len(), 2);
    }

    #[test]
    fn test_is_rhyme_is_scoped_to_vocabulary() {
        let dict = dictionary(&["fool F UW1 L", "cool K UW1 L", "pool P UW1 L"]);
        let matcher = BipartiteRhymeMatcher::new(vec!["fool", "cool"], vec!["pool"], &dict);
        assert!(matcher.is_rhyme("fool", "pool").unwrap());

        match matcher.is_rhyme("fool", "cool") {
            Err(RumbleError::Vocabulary { word, side }) => {
                assert_eq!(word, "cool");
                assert_eq!(side, Side::Right);
            }
            other => panic!("expected a vocabulary error, got {:?}", other),
        }
        match matcher.is_rhyme("pool", "pool") {
            Err(RumbleError::Vocabulary { word, side }) => {
                assert_eq!(word, "pool");
                assert_eq!(side, Side::Left);
            }
            other => panic!("expected a vocabulary error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_words_have_empty_profiles() {
        let dict = dictionary(&["fight F AY1 T"]);
        let matcher = BipartiteRhymeMatcher::new(vec!["fight"], vec!["xyzzy"], &dict);
        assert!(matcher.profile(Side::Right, "xyzzy").unwrap().is_empty());
        assert!(!matcher.is_rhyme("fight", "xyzzy").unwrap());
        assert_eq!(matcher.rhyming_pairs().count(), 0);
    }

    #[test]
    fn test_rhyming_pairs() {
        let dict = dictionary(&[
            "bickering B IH1 K ER0 IH0 NG",
            "pickering P IH1 K ER0 IH0 NG",
            "flickering F L IH1 K ER0 IH0 NG",
        ]);
        let matcher =
            BipartiteRhymeMatcher::new(vec!["bickering"], vec!["pickering", "flickering"], &dict);
        let actual: HashSet<(&str, &str)> = matcher.rhyming_pairs().collect();
        let expected: HashSet<(&str, &str)> =
            vec![("bickering", "pickering"), ("bickering", "flickering")]
                .into_iter()
                .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_rhyming_pairs_is_repeatable() {
        let dict = dictionary(&[
            "dispute D IH0 S P Y UW1 T",
            "fight F AY1 T",
            "beirut B EY0 R UW1 T",
            "beirut(2) B EY2 R UW1 T",
            "duluth D AH0 L UW1 TH",
            "white W AY1 T",
        ]);
        let matcher = BipartiteRhymeMatcher::new(
            vec!["dispute", "fight", "dispute"],
            vec!["Beirut", "duluth", "white"],
            &dict,
        );
        assert_eq!(matcher.num_left(), 2);
        let first: Vec<(&str, &str)> = matcher.rhyming_pairs().collect();
        let second: Vec<(&str, &str)> = matcher.rhyming_pairs().collect();
        assert_eq!(first, vec![("dispute", "Beirut"), ("fight", "white")]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_bounds_the_cross_product() {
        let dict = dictionary(&["a AH0"]);
        let matcher = BipartiteRhymeMatcher::new(vec!["a", "b"], vec!["c", "d", "e"], &dict);
        assert_eq!(matcher.rhyming_pairs().size_hint(), (0, Some(6)));
    }
}
