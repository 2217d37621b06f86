//! Lexicon - Motor de léxico con corrección ortográfica
//!
//! Guarda el vocabulario de un idioma en un trie, responde si una palabra es
//! conocida y, si no lo es, propone correcciones ordenadas que aprenden de
//! los errores repetidos.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod languages;
pub mod spelling;

pub use config::{Config, Settings};
pub use dictionary::{DictionaryLoader, Node, NodeId, Trie, WordData, WordListEncoding};
pub use error::{LexiconError, Result};
pub use languages::{Language, LanguageRegistry};
pub use spelling::{similarity_score, Mistake, RankBy};
