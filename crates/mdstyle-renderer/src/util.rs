//! Conversions from pulldown-cmark types.

use pulldown_cmark::{Alignment, CodeBlockKind, HeadingLevel};

use crate::node::CellAlignment;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert a table column alignment.
#[must_use]
pub(crate) fn cell_alignment(alignment: Alignment) -> CellAlignment {
    match alignment {
        Alignment::None => CellAlignment::None,
        Alignment::Left => CellAlignment::Left,
        Alignment::Center => CellAlignment::Center,
        Alignment::Right => CellAlignment::Right,
    }
}

/// Extract the language from a code block kind.
///
/// Only the first word of a fenced info string is the language; anything
/// after it (`rust ignore`, `js {.numbered}`) is dropped.
#[must_use]
pub(crate) fn code_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_owned),
        CodeBlockKind::Indented => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::CowStr;

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }

    #[test]
    fn test_code_language_first_word() {
        let kind = CodeBlockKind::Fenced(CowStr::Borrowed("rust ignore"));
        assert_eq!(code_language(&kind), Some("rust".to_owned()));
    }

    #[test]
    fn test_code_language_empty_info() {
        let kind = CodeBlockKind::Fenced(CowStr::Borrowed(""));
        assert_eq!(code_language(&kind), None);
    }

    #[test]
    fn test_code_language_indented() {
        assert_eq!(code_language(&CodeBlockKind::Indented), None);
    }
}
