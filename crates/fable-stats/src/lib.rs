//! Loads the curated treebank statistics and lexicon files that drive
//! fable-core, turning prose-with-markup corpus reports into sampling
//! tables and a file-backed vocabulary.

pub mod config;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod parse;

pub use config::{DriverConfig, LoopConfig, TellLoopConfig};
pub use error::{Result, StatsError};
pub use lexicon::FileLexicon;
pub use loader::load_tables;
