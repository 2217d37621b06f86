//! Idioma: vocabulario conocido, errores aprendidos y búsqueda de correcciones
//!
//! Una palabra nunca está a la vez en el vocabulario y en los errores:
//! confirmarla la quita de los errores y anotarla como error la quita del
//! vocabulario.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, trace};

use crate::config::Settings;
use crate::dictionary::{DictionaryLoader, NodeId, Trie, WordData};
use crate::error::{LexiconError, Result};
use crate::spelling::{meets_threshold, rank, Mistake, RankBy};

pub struct Language {
    name: String,
    known: Trie,
    mistakes: Trie,
    settings: Settings,
}

impl Language {
    /// Crea un idioma sin vocabulario
    pub fn new(name: &str) -> Result<Self> {
        Self::with_settings(name, Settings::default())
    }

    pub fn with_settings(name: &str, settings: Settings) -> Result<Self> {
        Self::from_trie(name, Trie::new(), settings)
    }

    /// Crea un idioma a partir de un vocabulario ya construido
    pub fn from_trie(name: &str, known: Trie, settings: Settings) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LexiconError::invalid("el nombre del idioma no puede estar vacío"));
        }
        settings.validate()?;
        Ok(Self {
            name: name.to_string(),
            known,
            mistakes: Trie::new(),
            settings,
        })
    }

    pub fn from_words<I, S>(name: &str, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Trie::new();
        known.add_range(words)?;
        Self::from_trie(name, known, Settings::default())
    }

    /// Carga el vocabulario de una lista de palabras (una por línea)
    pub fn load<P: AsRef<Path>>(name: &str, path: P, settings: Settings) -> Result<Self> {
        let known = DictionaryLoader::load_simple(path.as_ref(), settings.encoding)?;
        info!("Idioma '{}': {} palabras", name, known.len());
        Self::from_trie(name, known, settings)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Número de palabras conocidas
    pub fn count(&self) -> usize {
        self.known.len()
    }

    pub fn known_words(&self) -> &Trie {
        &self.known
    }

    pub fn mistakes(&self) -> &Trie {
        &self.mistakes
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    pub fn lookup(&self, word: &str) -> Option<&WordData> {
        self.known.search(word)
    }

    pub fn search_words<I, S>(&self, words: I) -> IndexMap<String, Option<WordData>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known.search_range(words)
    }

    /// Añade (o actualiza) una palabra y la retira de los errores
    pub fn add_word(&mut self, word: &str, data: WordData) -> Result<()> {
        self.known.add(word, data)?;
        self.mistakes.remove(word)?;
        Ok(())
    }

    /// Da una palabra por buena; si ya era conocida conserva su información
    pub fn confirm_word(&mut self, word: &str) -> Result<()> {
        if !self.known.contains(word) {
            self.known.add_word(word)?;
        }
        if self.mistakes.remove(word)? {
            debug!("'{}' confirmada, se olvida el error", word);
        }
        Ok(())
    }

    pub fn add_words<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.confirm_word(word.as_ref())?;
        }
        Ok(())
    }

    pub fn remove_word(&mut self, word: &str) -> Result<bool> {
        self.known.remove(word)
    }

    pub fn remove_words<I, S>(&mut self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known.remove_range(words)
    }

    /// Acepta todas las palabras de un archivo de texto.
    ///
    /// Cada línea se pasa a minúsculas y se separa por espacios. Devuelve
    /// cuántas palabras nuevas entraron en el vocabulario.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let mut words = Trie::new();
        for line in DictionaryLoader::read_lines(path, self.settings.encoding)? {
            for word in line.to_lowercase().split(' ').filter(|w| !w.is_empty()) {
                words.add_word(word)?;
            }
        }

        let added = self.known.merge(&words);
        let forgotten = self.mistakes.subtract(&words);
        info!(
            "'{}': {} palabras nuevas, {} errores olvidados",
            path.display(),
            added,
            forgotten
        );
        Ok(added)
    }

    /// Anota `word` como error. Si ya lo era solo aumenta su peso.
    pub fn record_mistake(&mut self, word: &str) -> Result<()> {
        self.record_mistake_with(word, std::iter::empty::<&str>())
    }

    /// Anota `word` como error con correcciones iniciales
    pub fn record_mistake_with<I, S>(&mut self, word: &str, corrections: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if word.is_empty() {
            return Err(LexiconError::invalid("la palabra no puede estar vacía"));
        }

        if let Some(mistake) = self.mistakes.mistake_mut(word) {
            mistake.add_corrections(corrections);
            self.bump_mistake_weight(word);
            return Ok(());
        }

        if self.known.remove(word)? {
            debug!("'{}' deja de ser conocida", word);
        }

        let mut mistake = Mistake::new(self.settings.min_corrections)?;
        mistake.add_corrections(corrections);
        let threshold = self.settings.threshold;
        mistake.populate(|budget| search_candidates(&self.known, word, budget, threshold, Vec::new()));

        self.mistakes.add_word(word)?;
        self.mistakes.attach_mistake(word, mistake);
        debug!("Nuevo error '{}'", word);
        Ok(())
    }

    pub fn record_mistakes<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.record_mistake(word.as_ref())?;
        }
        Ok(())
    }

    pub fn remove_mistake(&mut self, word: &str) -> Result<bool> {
        self.mistakes.remove(word)
    }

    pub fn mistake(&self, word: &str) -> Option<&Mistake> {
        self.mistakes.mistake(word)
    }

    /// Veces que el error se repitió tras anotarlo
    pub fn mistake_weight(&self, word: &str) -> Option<u64> {
        self.mistakes.search(word).map(|data| data.weight)
    }

    fn bump_mistake_weight(&mut self, word: &str) {
        if let Some(data) = self.mistakes.search_mut(word) {
            data.weight += 1;
        }
    }

    /// Anota que el usuario eligió `correction` para el error `word`.
    ///
    /// Devuelve `false` si `word` no es un error conocido.
    pub fn record_correction_usage(&mut self, word: &str, correction: &str, delta: u64) -> Result<bool> {
        if correction.is_empty() {
            return Err(LexiconError::invalid("la corrección no puede estar vacía"));
        }
        match self.mistakes.mistake_mut(word) {
            Some(mistake) => {
                mistake.record_usage(correction, delta);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Correcciones para `word` con el umbral de los ajustes.
    ///
    /// `None` si la palabra es conocida.
    pub fn corrections(&mut self, word: &str, amount: usize) -> Result<Option<Vec<String>>> {
        let threshold = self.settings.threshold;
        self.corrections_with_threshold(word, amount, threshold)
    }

    pub fn corrections_with_threshold(
        &mut self,
        word: &str,
        amount: usize,
        threshold: f64,
    ) -> Result<Option<Vec<String>>> {
        if word.is_empty() {
            return Err(LexiconError::invalid("la palabra no puede estar vacía"));
        }
        if amount == 0 {
            return Err(LexiconError::invalid("la cantidad tiene que ser mayor que cero"));
        }
        if threshold.is_nan() {
            return Err(LexiconError::invalid("umbral de similitud inválido"));
        }
        if self.known.contains(word) {
            return Ok(None);
        }

        let cached = match self.mistakes.mistake(word) {
            Some(mistake) => mistake.correction_words(amount, RankBy::Weight),
            None => Vec::new(),
        };
        if cached.len() >= amount {
            debug!("'{}': {} correcciones en caché", word, cached.len());
            self.bump_mistake_weight(word);
            return Ok(Some(cached));
        }

        let found = search_candidates(&self.known, word, amount, threshold, cached);
        self.record_mistake_with(word, &found)?;
        Ok(Some(found))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Busca correcciones para `word` expandiendo el trie nivel a nivel desde
/// el prefijo más largo que sí existe.
///
/// Parte de `collected` (correcciones ya conocidas) y se detiene al reunir
/// `amount`, al agotar el árbol o tras tantas rondas como palabras hay.
fn search_candidates(
    known: &Trie,
    word: &str,
    amount: usize,
    threshold: f64,
    mut collected: Vec<String>,
) -> Vec<String> {
    let anchor = known.search_until_mismatch(word);
    let matched = known[anchor].prefix().chars().count();
    let remainder: Vec<char> = word.chars().skip(matched).collect();
    // el primer carácter divergente se sustituye por el del hijo
    let tail: String = remainder.iter().skip(1).collect();

    let mut frontier = vec![anchor];
    let mut rounds = 0;
    while collected.len() < amount && rounds < known.len() && !frontier.is_empty() {
        rounds += 1;
        trace!("ronda {} con {} nodos", rounds, frontier.len());

        'frontier: for parent in rank(frontier.iter().filter_map(|&id| known.node_ref(id)), RankBy::Weight) {
            for child in rank(known.children_of(parent.id), RankBy::Weight) {
                let candidate = if remainder.len() <= 1 {
                    child.node.is_word().then(|| child.node.prefix())
                } else {
                    let outcome = known.search_from(&tail, child.id);
                    let prefix = known[outcome.node].prefix();
                    (outcome.found && meets_threshold(prefix, word, threshold)).then_some(prefix)
                };

                if let Some(candidate) = candidate {
                    if !collected.iter().any(|c| c == candidate) {
                        trace!("candidato '{}'", candidate);
                        collected.push(candidate.to_string());
                        if collected.len() >= amount {
                            break 'frontier;
                        }
                    }
                }
            }
        }

        frontier = next_level(known, &frontier);
    }

    debug!("'{}': {} correcciones en {} rondas", word, collected.len(), rounds);
    collected.truncate(amount);
    collected
}

fn next_level(known: &Trie, frontier: &[NodeId]) -> Vec<NodeId> {
    frontier
        .iter()
        .flat_map(|&id| known[id].children())
        .collect()
}
