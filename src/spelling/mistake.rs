//! Errores ortográficos aprendidos y sus correcciones candidatas

use log::{debug, trace};

use super::ranking::{rank, RankBy, Rankable};
use crate::dictionary::{Node, Weighted};
use crate::error::{LexiconError, Result};

/// Tamaño deseado del conjunto de correcciones
pub const DEFAULT_MIN_CORRECTIONS: usize = 5;

/// Palabra candidata para sustituir un error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    word: String,
    weight: u64,
    branching: usize,
}

impl Correction {
    pub fn new(word: impl Into<String>) -> Self {
        Self::with_weight(word, 0)
    }

    pub fn with_weight(word: impl Into<String>, weight: u64) -> Self {
        Self {
            word: word.into(),
            weight,
            branching: 0,
        }
    }

    /// Toma la palabra de un nodo; el nodo tiene que ser final de palabra
    pub fn from_node<T: Weighted>(node: &Node<T>) -> Result<Self> {
        if !node.is_word() {
            return Err(LexiconError::invalid(format!(
                "la corrección '{}' no es una palabra completa",
                node.prefix()
            )));
        }
        Ok(Self {
            word: node.prefix().to_string(),
            weight: node.data().weight(),
            branching: node.child_count(),
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

impl Rankable for Correction {
    fn weight(&self) -> u64 {
        self.weight
    }

    /// Hijos que tenía el nodo de origen (0 si vino como texto)
    fn branching(&self) -> usize {
        self.branching
    }
}

/// Extensión que convierte una palabra del trie de errores en un error
/// aprendido: correcciones candidatas con su peso de uso.
#[derive(Debug, Clone, PartialEq)]
pub struct Mistake {
    corrections: Vec<Correction>,
    min_corrections: usize,
}

impl Mistake {
    pub fn new(min_corrections: usize) -> Result<Self> {
        if min_corrections == 0 {
            return Err(LexiconError::invalid(
                "el mínimo de correcciones tiene que ser mayor que cero",
            ));
        }
        Ok(Self {
            corrections: Vec::new(),
            min_corrections,
        })
    }

    /// Crea el error con correcciones iniciales tomadas de nodos del trie;
    /// todos tienen que ser finales de palabra.
    pub fn with_corrections<'a, T, I>(corrections: I, min_corrections: usize) -> Result<Self>
    where
        T: Weighted + 'a,
        I: IntoIterator<Item = &'a Node<T>>,
    {
        let mut mistake = Self::new(min_corrections)?;
        for node in corrections {
            let correction = Correction::from_node(node)?;
            mistake.insert(correction);
        }
        Ok(mistake)
    }

    pub fn min_corrections(&self) -> usize {
        self.min_corrections
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.position(word).is_some()
    }

    fn position(&self, word: &str) -> Option<usize> {
        self.corrections.iter().position(|c| c.word == word)
    }

    fn insert(&mut self, correction: Correction) -> bool {
        if correction.word.is_empty() || self.contains(&correction.word) {
            return false;
        }
        self.corrections.push(correction);
        true
    }

    /// Correcciones ordenadas de mayor a menor según `by`, como mucho `limit`
    pub fn corrections(&self, limit: usize, by: RankBy) -> Vec<&Correction> {
        let mut ranked = rank(&self.corrections, by);
        ranked.truncate(limit);
        ranked
    }

    /// Igual que [`Mistake::corrections`] pero solo las palabras
    pub fn correction_words(&self, limit: usize, by: RankBy) -> Vec<String> {
        self.corrections(limit, by)
            .into_iter()
            .map(|c| c.word.clone())
            .collect()
    }

    /// Peso de una corrección concreta
    pub fn weight_of(&self, word: &str) -> Option<u64> {
        self.position(word).map(|i| self.corrections[i].weight)
    }

    /// Añade una corrección si no estaba ya
    pub fn add_correction(&mut self, word: &str) -> bool {
        self.insert(Correction::new(word))
    }

    /// Añade la palabra de un nodo; se ignora si el nodo no es final de palabra
    pub fn add_correction_node<T: Weighted>(&mut self, node: &Node<T>) -> bool {
        match Correction::from_node(node) {
            Ok(correction) => self.insert(correction),
            Err(_) => false,
        }
    }

    /// Devuelve cuántas correcciones eran nuevas
    pub fn add_corrections<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter(|word| self.add_correction(word.as_ref()))
            .count()
    }

    /// Anota que `word` se eligió como corrección: suma `delta` a su peso o
    /// la añade con ese peso si no estaba.
    pub fn record_usage(&mut self, word: &str, delta: u64) {
        match self.position(word) {
            Some(i) => self.corrections[i].weight += delta,
            None => {
                self.insert(Correction::with_weight(word, delta));
            }
        }
    }

    /// Pide candidatos a `discover` con un presupuesto creciente hasta
    /// reunir el mínimo de correcciones o hasta que no aparezca ninguno nuevo.
    ///
    /// Devuelve cuántas correcciones se añadieron.
    pub fn populate<F>(&mut self, mut discover: F) -> usize
    where
        F: FnMut(usize) -> Vec<String>,
    {
        let start = self.len();
        let mut budget = self.min_corrections;

        while self.len() < self.min_corrections {
            let added = self.add_corrections(discover(budget));
            trace!("presupuesto {}: {} correcciones nuevas", budget, added);
            if added == 0 {
                break;
            }
            budget += (self.min_corrections - self.len().min(self.min_corrections)).max(1);
        }

        let added = self.len() - start;
        debug!("{} correcciones reunidas ({} nuevas)", self.len(), added);
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordData;

    #[test]
    fn test_zero_minimum_is_rejected() {
        assert!(matches!(Mistake::new(0), Err(LexiconError::InvalidArgument(_))));
    }

    #[test]
    fn test_seed_corrections_must_be_words() {
        let word = Node::terminal('a', WordData::with_weight(2), "casa");
        let prefix = Node::new('s', WordData::default(), "cas");

        let mistake = Mistake::with_corrections([&word], 5).unwrap();
        assert_eq!(mistake.weight_of("casa"), Some(2));

        let err = Mistake::with_corrections([&word, &prefix], 5);
        assert!(matches!(err, Err(LexiconError::InvalidArgument(_))));
    }

    #[test]
    fn test_add_correction_is_deduplicated() {
        let mut mistake = Mistake::new(3).unwrap();
        assert!(mistake.add_correction("help"));
        assert!(!mistake.add_correction("help"));
        assert!(!mistake.add_correction(""));
        assert!(!mistake.add_correction_node(&Node::new('l', WordData::default(), "hel")));
        assert_eq!(mistake.add_corrections(["held", "help", "hello"]), 2);
        assert_eq!(mistake.len(), 3);
    }

    #[test]
    fn test_record_usage_orders_by_weight() {
        let mut mistake = Mistake::new(5).unwrap();
        mistake.add_corrections(["help", "held", "hello"]);

        mistake.record_usage("hello", 1);
        mistake.record_usage("held", 3);
        mistake.record_usage("hello", 1);
        mistake.record_usage("helm", 1);

        assert_eq!(
            mistake.correction_words(10, RankBy::Weight),
            vec!["held", "hello", "helm", "help"]
        );
        assert_eq!(mistake.correction_words(2, RankBy::Weight), vec!["held", "hello"]);
    }

    #[test]
    fn test_corrections_by_branching() {
        let mut parent = Node::terminal('l', WordData::default(), "hell");
        parent.children.insert('o', crate::dictionary::NodeId(1));
        let leaf = Node::terminal('p', WordData::default(), "help");

        let mut mistake = Mistake::new(5).unwrap();
        mistake.add_correction_node(&leaf);
        mistake.add_correction_node(&parent);

        assert_eq!(
            mistake.correction_words(5, RankBy::Branching),
            vec!["hell", "help"]
        );
    }

    #[test]
    fn test_populate_escalates_until_minimum() {
        let pool = ["a", "b", "c", "d", "e", "f"];
        let mut budgets = Vec::new();
        let mut mistake = Mistake::new(4).unwrap();

        let added = mistake.populate(|budget| {
            budgets.push(budget);
            pool.iter().take(budget.min(2 + budgets.len())).map(|s| s.to_string()).collect()
        });

        assert_eq!(added, 4);
        assert_eq!(mistake.len(), 4);
        assert_eq!(budgets[0], 4);
        assert!(budgets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_populate_stops_when_exhausted() {
        let mut mistake = Mistake::new(5).unwrap();
        let mut calls = 0;

        mistake.populate(|_| {
            calls += 1;
            vec!["solo".to_string()]
        });

        assert_eq!(mistake.len(), 1);
        assert_eq!(calls, 2);
    }
}
