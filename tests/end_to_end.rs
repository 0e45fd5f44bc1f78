//! Runs the whole pipeline over small data files written to a temporary directory.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rumble::config::Config;
use rumble::dictionary::Dictionary;
use rumble::error::RumbleError;
use rumble::phrase::write_phrases;
use rumble::places::read_place_names;
use rumble::rhymes::BipartiteRhymeMatcher;
use rumble::thesaurus::{all_synonyms, PartOfSpeech, Thesaurus, ThesaurusIndex};

const RECORDS: [&str; 3] = [
    "battle|1\n(noun)|conflict|fight|combat (similar term)|truce (antonym)\n",
    "dispute|2\n(noun)|disagreement|row (related term)|spat\n(verb)|contest|refute\n",
    "fight|1\n(noun)|battle|scrap|brawl (generic term)\n",
];

const CMUDICT: &str = "\
;;; test dictionary
battle B AE1 T AH0 L
seattle S IY0 AE1 T AH0 L
dispute D IH0 S P Y UW1 T
disagreement D IH2 S AH0 G R IY1 M AH0 N T
beirut B EY0 R UW1 T
beirut(2) B EY2 R UW1 T
row R OW1
row(2) R AW1
bordeaux B AO0 R D OW1
spat S P AE1 T
rabat R AH0 B AA1 T
brawl B R AO1 L
montreal M AH2 N T R IY0 AO1 L
scrap S K R AE1 P
conflict K AA1 N F L IH0 K T
";

const CITIES: &str = "seattle\nbeirut\nbordeaux\nmontreal\nst. petersburg\n";

/// Writes the thesaurus, index, dictionary and city files into `dir`.
fn write_fixture(dir: &Path) -> Config {
    let mut data = String::from("UTF-8\n");
    let mut index = vec![];
    for record in RECORDS.iter() {
        let headword = record.split('|').next().unwrap();
        index.push(format!("{}|{}", headword, data.len()));
        data.push_str(record);
    }

    let config = Config {
        thesaurus_index: dir.join("th.idx"),
        thesaurus_data: dir.join("th.dat"),
        places: dir.join("cities.dat"),
        pronunciations: dir.join("cmudict.dict"),
        ..Config::default()
    };
    fs::write(
        &config.thesaurus_index,
        format!("UTF-8\n{}\n{}\n", index.len(), index.join("\n")),
    )
    .unwrap();
    fs::write(&config.thesaurus_data, data).unwrap();
    fs::write(&config.places, CITIES).unwrap();
    fs::write(&config.pronunciations, CMUDICT).unwrap();
    config
}

#[test]
fn prints_every_rhyming_phrase() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    let synonyms = all_synonyms(
        &config.thesaurus_index,
        &config.thesaurus_data,
        &["fight", "battle", "dispute"],
        &config.parts_of_speech,
    )
    .unwrap();
    let expected: HashSet<String> = [
        "battle", "scrap", "brawl", "conflict", "fight", "combat", "disagreement", "row", "spat",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(synonyms, expected);

    let places = read_place_names(&config.places).unwrap();
    let dict = Dictionary::new_from_cmudict_file(&config.pronunciations).unwrap();
    let matcher = BipartiteRhymeMatcher::new(synonyms, places, &dict);

    let mut out = Vec::new();
    let count = write_phrases(&mut out, &matcher).unwrap();
    let lines: HashSet<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    let expected: HashSet<String> = [
        "the battle in Seattle",
        "the row in Bordeaux",
        "the brawl in Montreal",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(count, 3);
    assert_eq!(lines, expected);

    // Enumerating again gives the same pairs.
    let first: Vec<(&str, &str)> = matcher.rhyming_pairs().collect();
    let second: Vec<(&str, &str)> = matcher.rhyming_pairs().collect();
    assert_eq!(first, second);
}

#[test]
fn offsets_in_index_point_at_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());
    let mut index = ThesaurusIndex::open(&config.thesaurus_index).unwrap();
    let mut thesaurus = Thesaurus::open(&config.thesaurus_data).unwrap();
    for word in &["battle", "dispute", "fight"] {
        let offset = index.byte_offset(word).unwrap().unwrap();
        assert_eq!(thesaurus.read_record(offset).unwrap().headword, *word);
    }
    assert_eq!(index.byte_offset("skirmish").unwrap(), None);

    let verbs = thesaurus
        .synonyms(
            &mut index,
            "dispute",
            Some(&[PartOfSpeech::Verb].iter().copied().collect()),
        )
        .unwrap()
        .unwrap();
    assert_eq!(verbs.len(), 2);
}

#[test]
fn missing_files_fail_with_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        all_synonyms(&missing, &missing, &["fight"], &PartOfSpeech::all()),
        Err(RumbleError::Io(_))
    ));
    assert!(matches!(read_place_names(&missing), Err(RumbleError::Io(_))));
    assert!(matches!(
        Dictionary::new_from_cmudict_file(&missing),
        Err(RumbleError::Io(_))
    ));
}
