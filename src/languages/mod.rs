//! Soporte para múltiples idiomas
//!
//! El registro es un valor normal que guarda el llamador; no hay idioma
//! global.

pub mod language;

use std::path::Path;

use indexmap::IndexMap;
use log::info;

use crate::config::Settings;
use crate::error::{LexiconError, Result};

pub use language::Language;

/// Idiomas cargados, indexados por nombre (sin distinguir mayúsculas)
#[derive(Default)]
pub struct LanguageRegistry {
    languages: IndexMap<String, Language>,
    current: Option<String>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Registra un idioma; devuelve el que tuviera el mismo nombre
    pub fn register(&mut self, language: Language) -> Option<Language> {
        let key = Self::key(language.name());
        info!("Idioma registrado: {}", language.name());
        self.languages.insert(key, language)
    }

    /// Carga un idioma desde su lista de palabras y lo registra
    pub fn load<P: AsRef<Path>>(&mut self, name: &str, path: P, settings: Settings) -> Result<&mut Language> {
        let language = Language::load(name, path, settings)?;
        let key = Self::key(name);
        self.languages.insert(key.clone(), language);
        self.get_mut(&key)
            .ok_or_else(|| LexiconError::UnknownLanguage(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.languages.get(&Self::key(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Language> {
        self.languages.get_mut(&Self::key(name))
    }

    /// Como [`LanguageRegistry::get`] pero falla si no existe
    pub fn require(&self, name: &str) -> Result<&Language> {
        self.get(name)
            .ok_or_else(|| LexiconError::UnknownLanguage(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Language> {
        let key = Self::key(name);
        if self.current.as_deref() == Some(key.as_str()) {
            self.current = None;
        }
        self.languages.shift_remove(&key)
    }

    pub fn names(&self) -> Vec<&str> {
        self.languages.values().map(Language::name).collect()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Selecciona el idioma por defecto para este registro
    pub fn set_current(&mut self, name: &str) -> Result<()> {
        let key = Self::key(name);
        if !self.languages.contains_key(&key) {
            return Err(LexiconError::UnknownLanguage(name.to_string()));
        }
        self.current = Some(key);
        Ok(())
    }

    /// Idioma seleccionado; si no se eligió ninguno, el primero registrado
    pub fn current(&self) -> Option<&Language> {
        match self.current {
            Some(ref key) => self.languages.get(key),
            None => self.languages.values().next(),
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut Language> {
        match self.current {
            Some(ref key) => self.languages.get_mut(key),
            None => self.languages.values_mut().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = LanguageRegistry::new();
        registry.register(Language::from_words("English", ["hello"]).unwrap());
        registry.register(Language::from_words("Russian", ["привет"]).unwrap());

        assert_eq!(registry.len(), 2);
        assert!(registry.get("english").is_some());
        assert!(registry.get(" RUSSIAN ").unwrap().is_known("привет"));
        assert_eq!(registry.names(), vec!["English", "Russian"]);
        assert!(matches!(registry.require("German"), Err(LexiconError::UnknownLanguage(_))));
    }

    #[test]
    fn test_current_language() {
        let mut registry = LanguageRegistry::new();
        assert!(registry.current().is_none());

        registry.register(Language::from_words("English", ["hello"]).unwrap());
        registry.register(Language::from_words("Russian", ["привет"]).unwrap());
        assert_eq!(registry.current().unwrap().name(), "English");

        registry.set_current("russian").unwrap();
        assert_eq!(registry.current().unwrap().name(), "Russian");
        assert!(registry.set_current("German").is_err());

        registry.current_mut().unwrap().confirm_word("мир").unwrap();
        assert!(registry.get("Russian").unwrap().is_known("мир"));

        registry.remove("Russian");
        assert_eq!(registry.current().unwrap().name(), "English");
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = LanguageRegistry::new();
        registry.register(Language::from_words("English", ["a"]).unwrap());
        let previous = registry.register(Language::from_words("english", ["b"]).unwrap());

        assert!(previous.unwrap().is_known("a"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("English").unwrap().is_known("b"));
    }
}
