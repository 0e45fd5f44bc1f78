//! Command line configuration.
//!
//! Every setting has a default, so running with no arguments reads the data files from `./data`
//! and looks for rhymes of the usual "battle" words.
use std::collections::HashSet;
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};

use crate::error::Result;
use crate::thesaurus::PartOfSpeech;

/// The location of the thesaurus index file.
pub const THESAURUS_INDEX: &str = "data/th_en_US_v2.idx";

/// The location of the thesaurus data file.
pub const THESAURUS_DATA: &str = "data/th_en_US_v2.dat";

/// The location of the file containing the list of cities.
pub const CITIES_FILE: &str = "data/cities.dat";

/// The location of the CMU pronouncing dictionary.
pub const CMUDICT_FILE: &str = "data/cmudict.dict";

/// Nouns that roughly mean "fight".
pub const BATTLE_WORDS: [&str; 5] = ["fight", "battle", "struggle", "tiff", "dispute"];

/// Everything needed for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub thesaurus_index: PathBuf,
    pub thesaurus_data: PathBuf,
    pub places: PathBuf,
    pub pronunciations: PathBuf,
    /// The words whose synonyms are matched against the place names.
    pub battle_words: Vec<String>,
    /// Only senses with these parts of speech contribute synonyms.
    pub parts_of_speech: HashSet<PartOfSpeech>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            thesaurus_index: PathBuf::from(THESAURUS_INDEX),
            thesaurus_data: PathBuf::from(THESAURUS_DATA),
            places: PathBuf::from(CITIES_FILE),
            pronunciations: PathBuf::from(CMUDICT_FILE),
            battle_words: BATTLE_WORDS.iter().map(|w| w.to_string()).collect(),
            parts_of_speech: [PartOfSpeech::Noun].iter().copied().collect(),
            verbose: false,
        }
    }
}

/// Describes the command line arguments.
pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("rumble")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints rhyming phrases like \"the dispute in Beirut\".")
        .arg(
            Arg::with_name("index")
                .long("index")
                .value_name("FILE")
                .takes_value(true)
                .help("Thesaurus index file"),
        )
        .arg(
            Arg::with_name("data")
                .long("data")
                .value_name("FILE")
                .takes_value(true)
                .help("Thesaurus data file"),
        )
        .arg(
            Arg::with_name("places")
                .long("places")
                .value_name("FILE")
                .takes_value(true)
                .help("Place names, one per line"),
        )
        .arg(
            Arg::with_name("dict")
                .long("dict")
                .value_name("FILE")
                .takes_value(true)
                .help("Pronouncing dictionary in cmudict format"),
        )
        .arg(
            Arg::with_name("word")
                .short("w")
                .long("word")
                .value_name("WORD")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A word to find synonyms of; may be repeated"),
        )
        .arg(
            Arg::with_name("pos")
                .long("pos")
                .value_name("POS")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .possible_values(&["adj", "noun", "verb", "adv"])
                .help("Part of speech of the synonyms to use; may be repeated"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log progress to stderr"),
        )
}

impl Config {
    /// Builds a `Config` from parsed arguments, using defaults for anything not given.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let mut config = Config::default();
        if let Some(path) = matches.value_of("index") {
            config.thesaurus_index = PathBuf::from(path);
        }
        if let Some(path) = matches.value_of("data") {
            config.thesaurus_data = PathBuf::from(path);
        }
        if let Some(path) = matches.value_of("places") {
            config.places = PathBuf::from(path);
        }
        if let Some(path) = matches.value_of("dict") {
            config.pronunciations = PathBuf::from(path);
        }
        if let Some(words) = matches.values_of("word") {
            config.battle_words = words.map(String::from).collect();
        }
        if let Some(tags) = matches.values_of("pos") {
            config.parts_of_speech = tags
                .map(|t| t.parse::<PartOfSpeech>())
                .collect::<Result<HashSet<_>>>()?;
        }
        config.verbose = matches.is_present("verbose");
        Ok(config)
    }

    /// The default log filter; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = app().get_matches_from(args);
        Config::from_matches(&matches).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["rumble"]);
        assert_eq!(config, Config::default());
        assert_eq!(config.thesaurus_index, PathBuf::from("data/th_en_US_v2.idx"));
        assert_eq!(config.battle_words.len(), 5);
        assert!(config.parts_of_speech.contains(&PartOfSpeech::Noun));
        assert_eq!(config.parts_of_speech.len(), 1);
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "rumble", "--index", "a.idx", "--data", "a.dat", "--places", "towns.txt", "--dict",
            "my.dict", "-w", "brawl", "--word", "spat", "--pos", "noun", "--pos", "verb", "-v",
        ]);
        assert_eq!(config.thesaurus_index, PathBuf::from("a.idx"));
        assert_eq!(config.thesaurus_data, PathBuf::from("a.dat"));
        assert_eq!(config.places, PathBuf::from("towns.txt"));
        assert_eq!(config.pronunciations, PathBuf::from("my.dict"));
        assert_eq!(config.battle_words, vec!["brawl", "spat"]);
        assert_eq!(
            config.parts_of_speech,
            [PartOfSpeech::Noun, PartOfSpeech::Verb].iter().copied().collect()
        );
        assert!(config.verbose);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_rejects_unknown_part_of_speech() {
        assert!(app()
            .get_matches_from_safe(vec!["rumble", "--pos", "interj"])
            .is_err());
    }
}
