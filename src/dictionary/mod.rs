//! Módulo de diccionario
//!
//! Proporciona estructuras para almacenamiento y búsqueda eficiente de palabras.

pub mod loader;
pub mod node;
pub mod trie;

pub use loader::{DictionaryLoader, WordListEncoding};
pub use node::{Node, NodeId, Weighted, WordData, ROOT_SYMBOL};
pub use trie::{NodeRef, SearchOutcome, Trie};
