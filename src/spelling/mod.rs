//! Módulo de corrección ortográfica
//!
//! Ordenación de candidatos, puntuación de similitud y errores aprendidos.

pub mod mistake;
pub mod ranking;
pub mod similarity;

pub use mistake::{Correction, Mistake, DEFAULT_MIN_CORRECTIONS};
pub use ranking::{rank, rank_present, RankBy, Rankable};
pub use similarity::{meets_threshold, similarity_score, DEFAULT_THRESHOLD};
