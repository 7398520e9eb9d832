/// Format a column or parameter name as a TypeScript property key.
///
/// Names made only of digits, or of letters, digits and `_` that start with a
/// letter or `_`, are emitted bare. Anything else is wrapped in double quotes
/// as-is; quote characters inside the name are not escaped. Letters may be
/// any Unicode letter, digits must be ASCII so numeric keys stay valid.
///
/// An empty name is deliberately quoted (`""`) even though the digits-only
/// rule would leave it bare, since a bare empty key emits `: type`.
pub fn format_key(name: &str) -> String {
    if needs_quotes(name) {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn needs_quotes(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return true;
    };

    if name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let word_chars = name
        .chars()
        .all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == '_');
    !(word_chars && (first.is_alphabetic() || first == '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_keys() {
        for name in ["film_id", "film5", "_hidden", "FilmId", "x", "__"] {
            assert_eq!(format_key(name), name);
        }
    }

    #[test]
    fn test_digit_only_keys_are_bare() {
        assert_eq!(format_key("123"), "123");
        assert_eq!(format_key("0"), "0");
    }

    #[test]
    fn test_quoted_keys() {
        assert_eq!(format_key("5films"), "\"5films\"");
        assert_eq!(format_key("film id"), "\"film id\"");
        assert_eq!(format_key("film-id"), "\"film-id\"");
        assert_eq!(format_key("@id"), "\"@id\"");
        assert_eq!(format_key("$price"), "\"$price\"");
    }

    #[test]
    fn test_empty_key_is_quoted() {
        assert_eq!(format_key(""), "\"\"");
    }

    #[test]
    fn test_case_preserved_and_stable() {
        let once = format_key("FilmTitle");
        assert_eq!(once, "FilmTitle");
        assert_eq!(format_key(&once), once);
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(format_key("título"), "título");
        assert_eq!(format_key("ç_1"), "ç_1");
        assert_eq!(format_key("x½"), "\"x½\"");
    }
}
