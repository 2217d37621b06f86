//! Nodo del trie

use indexmap::IndexMap;

use crate::spelling::Mistake;

/// Símbolo del nodo raíz (no forma parte de ninguna clave)
pub const ROOT_SYMBOL: char = ' ';

/// Índice de un nodo dentro de la tabla del trie.
///
/// Solo es válido para el trie que lo devolvió y mientras el nodo siga
/// colgando del árbol: una poda puede liberar el hueco y reutilizarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Datos con peso de uso, usado para ordenar nodos y correcciones
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// Información asociada a una palabra
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordData {
    /// Contador de uso (0 por defecto)
    pub weight: u64,
}

impl WordData {
    pub fn with_weight(weight: u64) -> Self {
        Self { weight }
    }
}

impl Weighted for WordData {
    fn weight(&self) -> u64 {
        self.weight
    }
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}

/// Vértice del trie.
///
/// `prefix` es siempre la concatenación de los símbolos desde la raíz hasta
/// este nodo. Los hijos se guardan por índice y en orden de inserción.
#[derive(Debug, Clone)]
pub struct Node<T> {
    symbol: char,
    prefix: String,
    pub(crate) is_word: bool,
    pub(crate) data: T,
    pub(crate) children: IndexMap<char, NodeId>,
    pub(crate) mistake: Option<Mistake>,
}

impl<T> Node<T> {
    pub fn new(symbol: char, data: T, prefix: impl Into<String>) -> Self {
        Self {
            symbol,
            prefix: prefix.into(),
            is_word: false,
            data,
            children: IndexMap::new(),
            mistake: None,
        }
    }

    /// Crea un nodo que ya marca el final de una palabra
    pub fn terminal(symbol: char, data: T, prefix: impl Into<String>) -> Self {
        let mut node = Self::new(symbol, data, prefix);
        node.is_word = true;
        node
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn set_prefix(&mut self, prefix: String) {
        self.prefix = prefix;
    }

    /// Verdadero si `prefix` es una palabra almacenada
    pub fn is_word(&self) -> bool {
        self.is_word
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn find_child(&self, symbol: char) -> Option<NodeId> {
        self.children.get(&symbol).copied()
    }

    /// Índices de los hijos; se puede recorrer tantas veces como se quiera
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Extensión de error ortográfico, si el nodo la tiene
    pub fn mistake(&self) -> Option<&Mistake> {
        self.mistake.as_ref()
    }

    pub fn mistake_mut(&mut self) -> Option<&mut Mistake> {
        self.mistake.as_mut()
    }

    pub fn is_mistake(&self) -> bool {
        self.mistake.is_some()
    }
}

/// Dos nodos son "iguales" si llevan el mismo símbolo; solo tiene sentido
/// entre hermanos de un mismo mapa de hijos.
impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl<T> Eq for Node<T> {}
