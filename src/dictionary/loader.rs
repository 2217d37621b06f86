//! Cargador de diccionarios desde archivos

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::trie::Trie;
use crate::error::{LexiconError, Result};

/// Codificación de las listas de palabras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordListEncoding {
    /// Un byte por carácter (ISO-8859-1); nunca falla al decodificar
    #[default]
    Latin1,
    Utf8,
}

impl WordListEncoding {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "ascii" => Some(WordListEncoding::Latin1),
            "utf8" | "utf-8" => Some(WordListEncoding::Utf8),
            _ => None,
        }
    }
}

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Lee las líneas de un archivo con la codificación indicada, sin el
    /// salto de línea final
    pub fn read_lines<P: AsRef<Path>>(path: P, encoding: WordListEncoding) -> Result<Vec<String>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LexiconError::io(path, e))?;
        Self::lines_from_reader(BufReader::new(file), encoding).map_err(|e| LexiconError::io(path, e))
    }

    fn lines_from_reader<R: BufRead>(reader: R, encoding: WordListEncoding) -> std::io::Result<Vec<String>> {
        match encoding {
            WordListEncoding::Utf8 => reader.lines().collect(),
            WordListEncoding::Latin1 => reader
                .split(b'\n')
                .map(|line| {
                    line.map(|bytes| {
                        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes);
                        bytes.iter().map(|&b| b as char).collect()
                    })
                })
                .collect(),
        }
    }

    /// Carga un diccionario simple (una palabra por línea)
    pub fn load_simple<P: AsRef<Path>>(path: P, encoding: WordListEncoding) -> Result<Trie> {
        let mut trie = Trie::new();
        let count = Self::append_from_file(&mut trie, path.as_ref(), encoding)?;
        info!("{} palabras cargadas de '{}'", count, path.as_ref().display());
        Ok(trie)
    }

    /// Carga un diccionario desde cualquier lector
    pub fn load_from_reader<R: BufRead>(reader: R, encoding: WordListEncoding) -> Result<Trie> {
        let lines = Self::lines_from_reader(reader, encoding)
            .map_err(|e| LexiconError::io("<reader>", e))?;
        let mut trie = Trie::new();
        Self::insert_lines(&mut trie, lines)?;
        Ok(trie)
    }

    /// Añade palabras de un archivo a un trie existente
    pub fn append_from_file<P: AsRef<Path>>(
        trie: &mut Trie,
        path: P,
        encoding: WordListEncoding,
    ) -> Result<usize> {
        let lines = Self::read_lines(path, encoding)?;
        Self::insert_lines(trie, lines)
    }

    fn insert_lines(trie: &mut Trie, lines: Vec<String>) -> Result<usize> {
        let mut count = 0;
        for (line_num, line) in lines.iter().enumerate() {
            let word = line.trim();

            // Ignorar líneas vacías y comentarios
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if word.contains(char::is_whitespace) {
                warn!("Línea {}: '{}' contiene espacios, se ignora", line_num + 1, word);
                continue;
            }

            trie.add_word(word)?;
            count += 1;
        }
        Ok(count)
    }

    /// Combina múltiples tries en uno
    pub fn merge(tries: Vec<Trie>) -> Trie {
        let mut result = Trie::new();

        for trie in &tries {
            result.merge(trie);
        }

        result
    }
}
