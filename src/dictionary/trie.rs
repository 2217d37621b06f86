//! Estructura Trie para búsqueda eficiente de palabras
//!
//! Los nodos viven en una tabla indexada por [`NodeId`]; cada nodo guarda los
//! índices de sus hijos. Las podas liberan huecos que se reutilizan en
//! inserciones posteriores.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use log::trace;

use super::node::{Node, NodeId, Weighted, WordData, ROOT_SYMBOL};
use crate::error::{LexiconError, Result};
use crate::spelling::{Mistake, Rankable};

/// Nodo prestado junto con su índice
pub struct NodeRef<'a, T> {
    pub id: NodeId,
    pub node: &'a Node<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: Weighted> Rankable for NodeRef<'_, T> {
    fn weight(&self) -> u64 {
        self.node.data().weight()
    }

    fn branching(&self) -> usize {
        self.node.child_count()
    }
}

/// Resultado de una búsqueda que empieza en un nodo arbitrario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// La clave se recorrió entera y terminó en una palabra
    pub found: bool,
    /// Nodo más profundo alcanzado, haya éxito o no
    pub node: NodeId,
}

/// Estructura Trie para almacenamiento y búsqueda de palabras
#[derive(Debug, Clone)]
pub struct Trie<T = WordData> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    root: NodeId,
    word_count: usize,
}

impl<T: Default> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Trie<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("nodo {} liberado o fuera de rango", id.0),
        }
    }
}

impl<T> IndexMut<NodeId> for Trie<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("nodo {} liberado o fuera de rango", id.0),
        }
    }
}

impl<T: Default> Trie<T> {
    pub fn new() -> Self {
        Self::with_root_data(T::default())
    }

    /// Inserta una clave; si ya existía, sobrescribe su información sin
    /// contarla dos veces
    pub fn add(&mut self, key: &str, data: T) -> Result<()> {
        if key.is_empty() {
            return Err(LexiconError::invalid("la clave no puede estar vacía"));
        }

        let mut current = self.root;
        for ch in key.chars() {
            current = match self[current].find_child(ch) {
                Some(child) => child,
                None => {
                    let prefix = format!("{}{}", self[current].prefix(), ch);
                    let child = self.alloc(Node::new(ch, T::default(), prefix));
                    self[current].children.insert(ch, child);
                    child
                }
            };
        }

        let node = &mut self[current];
        node.data = data;
        if !node.is_word {
            node.is_word = true;
            self.word_count += 1;
        }
        Ok(())
    }

    /// Inserta una palabra con información por defecto
    pub fn add_word(&mut self, key: &str) -> Result<()> {
        self.add(key, T::default())
    }

    pub fn add_range<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add_word(key.as_ref())?;
        }
        Ok(())
    }
}

impl<T> Trie<T> {
    /// Crea un trie vacío cuya raíz lleva `data`
    pub fn with_root_data(data: T) -> Self {
        Self {
            nodes: vec![Some(Node::new(ROOT_SYMBOL, data, String::new()))],
            free: Vec::new(),
            root: NodeId(0),
            word_count: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.get(id).map(|node| NodeRef { id, node })
    }

    /// Hijos de un nodo, en orden de inserción
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = NodeRef<'_, T>> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(move |node| node.children().filter_map(move |child| self.node_ref(child)))
    }

    /// Número de palabras en el Trie
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Verifica si el Trie está vacío
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Nodos vivos, raíz incluida
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Libera un subárbol completo; descuenta las palabras que contenía
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
                if node.is_word {
                    self.word_count -= 1;
                }
                stack.extend(node.children.into_values());
                self.free.push(id.0);
            }
        }
    }

    /// Recorre `key` desde `start`; devuelve el último nodo alcanzado y si
    /// se consumió la clave entera
    fn walk(&self, start: NodeId, key: &str) -> (NodeId, bool) {
        let mut current = start;
        for ch in key.chars() {
            match self.get(current).and_then(|node| node.find_child(ch)) {
                Some(child) => current = child,
                None => return (current, false),
            }
        }
        (current, true)
    }

    /// Nodo exacto de `key`, sea o no final de palabra
    pub fn find_node(&self, key: &str) -> Option<NodeId> {
        match self.walk(self.root, key) {
            (id, true) => Some(id),
            _ => None,
        }
    }

    /// Verifica si una palabra existe en el Trie
    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Búsqueda exacta: información de la palabra si existe
    pub fn search(&self, key: &str) -> Option<&T> {
        let id = self.find_node(key)?;
        let node = &self[id];
        node.is_word.then_some(&node.data)
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut T> {
        let id = self.find_node(key)?;
        let node = &mut self[id];
        if node.is_word {
            Some(&mut node.data)
        } else {
            None
        }
    }

    /// Igual que [`Trie::search`] pero empezando en `start`
    pub fn search_from(&self, key: &str, start: NodeId) -> SearchOutcome {
        let (node, complete) = self.walk(start, key);
        SearchOutcome {
            found: complete && self.get(node).is_some_and(Node::is_word),
            node,
        }
    }

    /// Avanza todo lo posible y devuelve el último nodo visitado (la raíz
    /// si ya falta el primer carácter)
    pub fn search_until_mismatch(&self, key: &str) -> NodeId {
        self.walk(self.root, key).0
    }

    /// Elimina una palabra y poda la rama que queda sin uso.
    ///
    /// Devuelve `false` si la palabra no estaba.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        if key.is_empty() {
            return Err(LexiconError::invalid("la clave no puede estar vacía"));
        }

        let mut path = Vec::with_capacity(key.len() + 1);
        let mut current = self.root;
        path.push(current);
        for ch in key.chars() {
            match self[current].find_child(ch) {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => return Ok(false),
            }
        }

        let node = &mut self[current];
        if !node.is_word {
            return Ok(false);
        }
        node.is_word = false;
        node.mistake = None;
        self.word_count -= 1;

        self.prune(&path);
        Ok(true)
    }

    pub fn remove_range<I, S>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for key in keys {
            if self.remove(key.as_ref())? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Poda desde el final del camino hasta el último punto de bifurcación
    /// o palabra
    fn prune(&mut self, path: &[NodeId]) {
        for pair in path.windows(2).rev() {
            let (parent, id) = (pair[0], pair[1]);
            let node = &self[id];
            if node.is_word || !node.is_leaf() {
                break;
            }
            let symbol = node.symbol();
            trace!("podando '{}'", node.prefix());
            self[parent].children.shift_remove(&symbol);
            self.release(id);
        }
    }

    /// Nodos finales de palabra bajo `start`, en orden de inserción
    fn collect_words(&self, start: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if node.is_word {
                found.push(id);
            }
            stack.extend(node.children.values().rev().copied());
        }
        found
    }

    /// Todas las palabras almacenadas
    pub fn keys(&self) -> Vec<String> {
        self.collect_words(self.root)
            .into_iter()
            .map(|id| self[id].prefix().to_string())
            .collect()
    }

    /// Obtiene palabras que empiezan con un prefijo
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.find_node(prefix) {
            Some(start) => self
                .collect_words(start)
                .into_iter()
                .map(|id| self[id].prefix().to_string())
                .collect(),
            None => vec![],
        }
    }

    /// Quita de este trie todas las palabras de `other`.
    ///
    /// Devuelve cuántas palabras se eliminaron.
    pub fn subtract<U>(&mut self, other: &Trie<U>) -> usize {
        other
            .keys()
            .iter()
            .filter(|key| matches!(self.remove(key), Ok(true)))
            .count()
    }

    /// Sustituye un nodo en su sitio.
    ///
    /// Localiza el padre a partir del prefijo de `old`; falla si los símbolos
    /// no coinciden o el padre no existe. Con `copy_children` los hijos de
    /// `old` pasan al nuevo nodo; si no, se liberan.
    pub fn replace_node(&mut self, old: NodeId, replacement: Node<T>, copy_children: bool) -> bool {
        if old == self.root {
            return false;
        }
        let Some(current) = self.get(old) else {
            return false;
        };
        if current.symbol() != replacement.symbol() {
            return false;
        }

        let prefix = current.prefix().to_string();
        let mut chars = prefix.chars();
        chars.next_back();
        let Some(parent) = self.find_node(chars.as_str()) else {
            return false;
        };
        if self[parent].find_child(replacement.symbol()) != Some(old) {
            return false;
        }

        let Some(previous) = self.nodes[old.0].take() else {
            return false;
        };
        if previous.is_word {
            self.word_count -= 1;
        }

        let mut replacement = replacement;
        replacement.set_prefix(prefix);
        replacement.children.clear();
        if replacement.is_word {
            self.word_count += 1;
        }
        self.nodes[old.0] = Some(replacement);

        if copy_children {
            self[old].children = previous.children;
        } else {
            for child in previous.children.into_values() {
                self.release(child);
            }
        }
        true
    }

    /// Añade la extensión de error a una palabra ya almacenada
    pub fn attach_mistake(&mut self, key: &str, mistake: Mistake) -> bool {
        match self.find_node(key) {
            Some(id) if self[id].is_word => {
                self[id].mistake = Some(mistake);
                true
            }
            _ => false,
        }
    }

    pub fn mistake(&self, key: &str) -> Option<&Mistake> {
        let id = self.find_node(key)?;
        self[id].mistake()
    }

    pub fn mistake_mut(&mut self, key: &str) -> Option<&mut Mistake> {
        let id = self.find_node(key)?;
        self[id].mistake_mut()
    }
}

impl<T: Clone> Trie<T> {
    /// Obtiene todas las palabras del Trie con su información
    pub fn words(&self) -> Vec<(String, T)> {
        self.collect_words(self.root)
            .into_iter()
            .map(|id| {
                let node = &self[id];
                (node.prefix().to_string(), node.data.clone())
            })
            .collect()
    }

    /// Busca varias claves a la vez
    pub fn search_range<I, S>(&self, keys: I) -> IndexMap<String, Option<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), self.search(key).cloned())
            })
            .collect()
    }

    /// Une `other` a este trie nodo a nodo.
    ///
    /// Los subárboles que solo existen en `other` se copian enteros; una
    /// palabra que ya existía conserva su información. Devuelve cuántas
    /// palabras nuevas hay.
    pub fn merge(&mut self, other: &Trie<T>) -> usize {
        let before = self.word_count;
        self.merge_children(self.root, other, other.root);
        self.word_count - before
    }

    fn merge_children(&mut self, local: NodeId, other: &Trie<T>, other_id: NodeId) {
        for (&symbol, &other_child) in &other[other_id].children {
            match self[local].find_child(symbol) {
                Some(local_child) => {
                    let incoming = &other[other_child];
                    let node = &mut self[local_child];
                    if incoming.is_word && !node.is_word {
                        node.is_word = true;
                        node.data = incoming.data.clone();
                        self.word_count += 1;
                    }
                    self.merge_children(local_child, other, other_child);
                }
                None => {
                    let prefix = format!("{}{}", self[local].prefix(), symbol);
                    let copied = self.copy_subtree(other, other_child, prefix);
                    self[local].children.insert(symbol, copied);
                }
            }
        }
    }

    fn copy_subtree(&mut self, other: &Trie<T>, other_id: NodeId, prefix: String) -> NodeId {
        let source = &other[other_id];
        let mut node = Node::new(source.symbol(), source.data.clone(), prefix);
        node.is_word = source.is_word;
        node.mistake = source.mistake.clone();
        if node.is_word {
            self.word_count += 1;
        }
        let id = self.alloc(node);

        for (&symbol, &child) in &source.children {
            let child_prefix = format!("{}{}", self[id].prefix(), symbol);
            let copied = self.copy_subtree(other, child, child_prefix);
            self[id].children.insert(symbol, copied);
        }
        id
    }
}
