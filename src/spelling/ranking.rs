//! Ordenación descendente de nodos y correcciones

use crate::dictionary::{Node, Weighted};

/// Clave de ordenación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    /// Peso de uso
    #[default]
    Weight,
    /// Número de hijos en el trie
    Branching,
}

/// Algo que se puede ordenar por peso o por ramificación
pub trait Rankable {
    fn weight(&self) -> u64;
    fn branching(&self) -> usize;

    fn rank_key(&self, by: RankBy) -> u64 {
        match by {
            RankBy::Weight => self.weight(),
            RankBy::Branching => self.branching() as u64,
        }
    }
}

impl<R: Rankable + ?Sized> Rankable for &R {
    fn weight(&self) -> u64 {
        (**self).weight()
    }

    fn branching(&self) -> usize {
        (**self).branching()
    }
}

impl<T: Weighted> Rankable for Node<T> {
    fn weight(&self) -> u64 {
        self.data().weight()
    }

    fn branching(&self) -> usize {
        self.child_count()
    }
}

/// Ordena de mayor a menor; los empates conservan el orden de entrada
pub fn rank<I, R>(items: I, by: RankBy) -> Vec<R>
where
    I: IntoIterator<Item = R>,
    R: Rankable,
{
    let mut ranked: Vec<R> = items.into_iter().collect();
    ranked.sort_by(|a, b| b.rank_key(by).cmp(&a.rank_key(by)));
    ranked
}

/// Como [`rank`], descartando antes las entradas ausentes
pub fn rank_present<I, R>(items: I, by: RankBy) -> Vec<R>
where
    I: IntoIterator<Item = Option<R>>,
    R: Rankable,
{
    rank(items.into_iter().flatten(), by)
}
