//! Puntuación de similitud entre palabras

/// Puntuación por defecto para aceptar un candidato
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Compara dos palabras posición a posición.
///
/// La más corta se rellena con espacios al final; la puntuación es
/// `100 / coincidencias`, redondeada a dos decimales. Cuantas menos
/// posiciones coinciden, mayor es el valor; sin coincidencias es infinito.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let len = a.len().max(b.len());

    let matches = (0..len)
        .filter(|&i| a.get(i).copied().unwrap_or(' ') == b.get(i).copied().unwrap_or(' '))
        .count();

    if matches == 0 {
        return f64::INFINITY;
    }
    (100.0 / matches as f64 * 100.0).round() / 100.0
}

/// `true` si la puntuación alcanza el umbral
pub fn meets_threshold(a: &str, b: &str, threshold: f64) -> bool {
    similarity_score(a, b) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_equal_length() {
        // c y a coinciden, t/r no
        assert_eq!(similarity_score("cat", "car"), 50.0);
    }

    #[test]
    fn test_score_is_inverse_of_matches() {
        assert_eq!(similarity_score("ab", "cb"), 100.0);
        assert_eq!(similarity_score("abcd", "abcd"), 25.0);
        assert_eq!(similarity_score("abc", "abc"), 33.33);
    }

    #[test]
    fn test_score_pads_shorter_word() {
        // "hel " frente a "help": h, e, l coinciden
        assert_eq!(similarity_score("hel", "help"), 33.33);
        // el relleno también puede coincidir con un espacio
        assert_eq!(similarity_score("a ", "b"), 100.0);
    }

    #[test]
    fn test_score_without_matches() {
        assert!(similarity_score("abc", "xyz").is_infinite());
        assert!(similarity_score("", "").is_infinite());
    }

    #[test]
    fn test_threshold_accepts_only_few_matches() {
        assert!(meets_threshold("ab", "cb", DEFAULT_THRESHOLD));
        assert!(!meets_threshold("cat", "car", DEFAULT_THRESHOLD));
        assert!(meets_threshold("cat", "car", 50.0));
    }
}
