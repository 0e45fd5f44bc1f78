//! Finds rhyming phrases of the form "the dispute in Beirut".
//!
//! The pieces, leaf first:
//!
//! * `dictionary` - the CMU pronouncing dictionary, a `rhymes::PronunciationSource`.
//! * `rhymes` - rhyme keys and the bipartite rhyme matcher.
//! * `thesaurus` - the indexed flat-file thesaurus.
//! * `places` - the place name list.
//! * `phrase` - formatting of the output.
//! * `config` - command line configuration.
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod config;
pub mod dictionary;
pub mod error;
pub mod phrase;
pub mod places;
pub mod rhymes;
pub mod thesaurus;
