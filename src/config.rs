//! Configuración y argumentos CLI

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dictionary::WordListEncoding;
use crate::error::{LexiconError, Result};
use crate::spelling::{DEFAULT_MIN_CORRECTIONS, DEFAULT_THRESHOLD};

/// Ajustes del motor de corrección
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Puntuación mínima de similitud para aceptar un candidato
    pub threshold: f64,
    /// Correcciones que se intentan reunir al aprender un error
    pub min_corrections: usize,
    /// Correcciones devueltas si no se pide otra cantidad
    pub default_amount: usize,
    /// Codificación de las listas de palabras
    pub encoding: WordListEncoding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_corrections: DEFAULT_MIN_CORRECTIONS,
            default_amount: 5,
            encoding: WordListEncoding::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| LexiconError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Lee los ajustes de un archivo TOML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| LexiconError::io(path, e))?;
        let settings = Self::from_toml_str(&contents)?;
        info!("Ajustes cargados de {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(LexiconError::invalid(format!(
                "umbral de similitud inválido: {}",
                self.threshold
            )));
        }
        if self.min_corrections == 0 {
            return Err(LexiconError::invalid("min_corrections tiene que ser mayor que cero"));
        }
        if self.default_amount == 0 {
            return Err(LexiconError::invalid("default_amount tiene que ser mayor que cero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Nombre del idioma (default: "en")
    pub language: String,
    /// Lista de palabras; si falta se usa `<data_dir>/<idioma>/words.txt`
    pub word_list: Option<PathBuf>,
    /// Archivos de texto adicionales cuyas palabras se aceptan
    pub extra_files: Vec<PathBuf>,
    /// Archivo TOML con los ajustes
    pub settings_file: Option<PathBuf>,
    /// Número de correcciones por palabra
    pub amount: Option<usize>,
    /// Umbral de similitud
    pub threshold: Option<f64>,
    /// Palabras a consultar (argumentos posicionales)
    pub words: Vec<String>,
    /// Mostrar ayuda
    pub show_help: bool,
    /// Directorio de datos
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            word_list: None,
            extra_files: Vec::new(),
            settings_file: None,
            amount: None,
            threshold: None,
            words: Vec::new(),
            show_help: false,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let mut config = Config::default();
        let mut args_iter = args.into_iter().skip(1); // Skip program name

        let value_for = |flag: &str, next: Option<String>| {
            next.ok_or_else(|| LexiconError::invalid(format!("{} requiere un valor", flag)))
        };

        while let Some(arg) = args_iter.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    config.show_help = true;
                    return Ok(config);
                }
                "-l" | "--lang" => {
                    config.language = value_for("--lang", args_iter.next())?;
                }
                "-w" | "--words" => {
                    config.word_list = Some(PathBuf::from(value_for("--words", args_iter.next())?));
                }
                "-a" | "--add-file" => {
                    config
                        .extra_files
                        .push(PathBuf::from(value_for("--add-file", args_iter.next())?));
                }
                "-s" | "--settings" => {
                    config.settings_file =
                        Some(PathBuf::from(value_for("--settings", args_iter.next())?));
                }
                "-n" | "--amount" => {
                    let value = value_for("--amount", args_iter.next())?;
                    let amount = value
                        .parse::<usize>()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(|| {
                            LexiconError::invalid(format!("--amount no válido: {}", value))
                        })?;
                    config.amount = Some(amount);
                }
                "-t" | "--threshold" => {
                    let value = value_for("--threshold", args_iter.next())?;
                    let threshold = value.parse::<f64>().map_err(|_| {
                        LexiconError::invalid(format!("--threshold no válido: {}", value))
                    })?;
                    config.threshold = Some(threshold);
                }
                "--data-dir" => {
                    config.data_dir = PathBuf::from(value_for("--data-dir", args_iter.next())?);
                }
                _ => {
                    if arg.starts_with('-') {
                        return Err(LexiconError::invalid(format!("Opción desconocida: {}", arg)));
                    }
                    // Argumento posicional = palabra a consultar
                    config.words.push(arg);
                }
            }
        }

        config.language = Self::canonicalize_language(&config.language);
        Ok(config)
    }

    fn canonicalize_language(language: &str) -> String {
        let normalized = language.trim().to_lowercase();
        match normalized.as_str() {
            "en" | "english" | "en-us" => "en".to_string(),
            "ru" | "russian" | "ru-ru" => "ru".to_string(),
            _ => normalized,
        }
    }

    /// Ruta de la lista de palabras principal
    pub fn word_list_path(&self) -> PathBuf {
        self.word_list
            .clone()
            .unwrap_or_else(|| self.data_dir.join(&self.language).join("words.txt"))
    }

    /// Ajustes efectivos: archivo (si hay) más lo indicado en la línea de
    /// comandos
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match self.settings_file {
            Some(ref path) => Settings::load(path)?,
            None => {
                debug!("Sin archivo de ajustes, usando valores por defecto");
                Settings::default()
            }
        };
        if let Some(amount) = self.amount {
            settings.default_amount = amount;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn print_help() {
        println!(
            r#"Lexicon - Consulta de palabras y corrección ortográfica

USO:
    lexicon [OPCIONES] [PALABRAS]...

ARGUMENTOS:
    [PALABRAS]    Palabras a consultar

OPCIONES:
    -h, --help                  Muestra esta ayuda
    -l, --lang <IDIOMA>         Idioma a usar (default: en)
    -w, --words <ARCHIVO>       Lista de palabras (una por línea)
    -a, --add-file <ARCHIVO>    Texto adicional cuyas palabras se aceptan
    -s, --settings <ARCHIVO>    Ajustes en TOML
    -n, --amount <N>            Correcciones por palabra (default: 5)
    -t, --threshold <PUNTOS>    Umbral de similitud (default: 80)
    --data-dir <DIR>            Directorio de datos (default: data)

EJEMPLOS:
    lexicon --words en-us.txt helo wrld
    lexicon -l ru -n 3 превет
    lexicon -s lexicon.toml --add-file notas.txt palabra"#
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("lexicon")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.word_list_path(), PathBuf::from("data/en/words.txt"));
        assert_eq!(config.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_flags_and_words() {
        let config = Config::from_args(args(&[
            "--lang", "Russian", "-n", "3", "-t", "50", "-w", "ru.txt", "превет", "мир",
        ]))
        .unwrap();

        assert_eq!(config.language, "ru");
        assert_eq!(config.word_list_path(), PathBuf::from("ru.txt"));
        assert_eq!(config.words, vec!["превет", "мир"]);

        let settings = config.settings().unwrap();
        assert_eq!(settings.default_amount, 3);
        assert_eq!(settings.threshold, 50.0);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(Config::from_args(args(&["--bogus"])).is_err());
        assert!(Config::from_args(args(&["--lang"])).is_err());
        assert!(Config::from_args(args(&["-n", "0"])).is_err());
        assert!(Config::from_args(args(&["-t", "mucho"])).is_err());
    }

    #[test]
    fn test_help_stops_parsing() {
        let config = Config::from_args(args(&["-h", "--bogus"])).unwrap();
        assert!(config.show_help);
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = Settings::from_toml_str(
            r#"
            threshold = 50.0
            encoding = "utf8"
            "#,
        )
        .unwrap();
        assert_eq!(settings.threshold, 50.0);
        assert_eq!(settings.encoding, WordListEncoding::Utf8);
        assert_eq!(settings.min_corrections, DEFAULT_MIN_CORRECTIONS);
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            Settings::from_toml_str("min_corrections = 0"),
            Err(LexiconError::InvalidArgument(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("threshold = -1.0"),
            Err(LexiconError::InvalidArgument(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("threshold = \"alto\""),
            Err(LexiconError::Config(_))
        ));
    }
}
