//! Prints humorous rhyming phrases of the form "the dispute in Beirut".
//!
//! Synonyms of a few "battle" words come from the OpenOffice thesaurus, place names from a plain
//! list, and pronunciations from the CMU pronouncing dictionary. Every synonym that rhymes with a
//! place name becomes one line of output.
use std::io::Write;

use log::{error, info};
use rumble::config::{self, Config};
use rumble::dictionary::Dictionary;
use rumble::error::Result;
use rumble::rhymes::BipartiteRhymeMatcher;
use rumble::{phrase, places, thesaurus};

fn run(config: &Config) -> Result<()> {
    let synonyms = thesaurus::all_synonyms(
        &config.thesaurus_index,
        &config.thesaurus_data,
        &config.battle_words,
        &config.parts_of_speech,
    )?;
    info!(
        "Found {} synonyms of {}.",
        synonyms.len(),
        config.battle_words.join(", ")
    );

    let place_names = places::read_place_names(&config.places)?;
    let dict = Dictionary::new_from_cmudict_file(&config.pronunciations)?;
    let matcher = BipartiteRhymeMatcher::new(synonyms, place_names, &dict);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = phrase::write_phrases(&mut out, &matcher)?;
    out.flush()?;
    info!("Printed {} phrases.", count);
    Ok(())
}

fn main() {
    let matches = config::app().get_matches();
    let config = Config::from_matches(&matches);

    let level = match &config {
        Ok(config) => config.log_level(),
        Err(_) => Config::default().log_level(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = config.and_then(|config| run(&config)) {
        error!("{}", e);
        std::process::exit(1);
    }
}
