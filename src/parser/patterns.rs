use regex::Regex;
use std::sync::OnceLock;

// Compiled once, shared by every stage.
fn re_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}/\d{2}").unwrap())
}

fn re_hour_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2}:\d{2})").unwrap())
}

fn re_time() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").unwrap())
}

fn re_quarter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(15|30|45)$").unwrap())
}

fn re_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// Premier jeton `DD/MM` contenu dans la cellule.
pub(crate) fn find_date(cell: &str) -> Option<&str> {
    re_date().find(cell).map(|m| m.as_str())
}

/// `HH:MM` en tête de cellule de marge.
pub(crate) fn hour_marker(cell: &str) -> Option<&str> {
    re_hour_prefix()
        .captures(cell)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub(crate) fn quarter_marker(cell: &str) -> Option<u32> {
    re_quarter()
        .captures(cell)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Vrai si la cellule porte un nom, et non un marqueur de structure.
pub(crate) fn is_content(cell: &str, spacer: &str) -> bool {
    !(cell.is_empty()
        || cell == spacer
        || re_numeric().is_match(cell)
        || re_time().is_match(cell)
        || re_quarter().is_match(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_searched_inside_cell() {
        assert_eq!(find_date("ma 03/06"), Some("03/06"));
        assert_eq!(find_date("99/99"), Some("99/99"));
        assert_eq!(find_date("3/6"), None);
    }

    #[test]
    fn hour_marker_is_anchored() {
        assert_eq!(hour_marker("09:00"), Some("09:00"));
        assert_eq!(hour_marker("09:00u"), Some("09:00"));
        assert_eq!(hour_marker("om 09:00"), None);
    }

    #[test]
    fn quarter_marker_is_exact() {
        assert_eq!(quarter_marker("15"), Some(15));
        assert_eq!(quarter_marker("45"), Some(45));
        assert_eq!(quarter_marker("00"), None);
        assert_eq!(quarter_marker("150"), None);
    }

    #[test]
    fn content_excludes_markers() {
        for cell in ["-", "", "42", "09:30", "30"] {
            assert!(!is_content(cell, "-"), "{cell:?} should not be content");
        }
        assert!(is_content("Jansen", "-"));
        assert!(is_content("K. de Vries 2", "-"));
    }
}
