//! Errores del motor de léxico

use std::path::PathBuf;

use thiserror::Error;

/// Resultado con el error del crate
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errores que puede devolver el léxico.
///
/// La ausencia de una palabra nunca es un error: las búsquedas devuelven
/// `bool` u `Option`. Todo lo demás es validación de precondiciones en la
/// frontera de la API o fallos de E/S durante la carga.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Clave vacía, corrección no terminal, tamaños no positivos...
    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),

    /// Fallo de E/S al cargar una lista de palabras o un fichero de ajustes
    #[error("Error de E/S en '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fichero de ajustes con formato incorrecto
    #[error("Configuración inválida: {0}")]
    Config(String),

    /// Idioma no registrado
    #[error("Idioma no registrado: {0}")]
    UnknownLanguage(String),
}

impl LexiconError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LexiconError::InvalidArgument(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LexiconError::Io {
            path: path.into(),
            source,
        }
    }
}
