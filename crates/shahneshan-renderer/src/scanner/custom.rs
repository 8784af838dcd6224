//! Keyword resolution for `...keyword` custom blocks.

use crate::node::{AlertKind, CustomKind};

/// Persian keywords and the kinds they open.
const KEYWORDS: &[(&str, CustomKind)] = &[
    ("شعر", CustomKind::Poetry),
    ("شعرنو", CustomKind::Poetry),
    ("توجه", CustomKind::Alert(AlertKind::Note)),
    ("نکته", CustomKind::Alert(AlertKind::Tip)),
    ("مهم", CustomKind::Alert(AlertKind::Important)),
    ("هشدار", CustomKind::Alert(AlertKind::Warning)),
    ("احتیاط", CustomKind::Alert(AlertKind::Caution)),
];

/// Resolve a custom block keyword.
///
/// Persian keywords and their English names map to the same kind; any other
/// keyword is kept as [`CustomKind::Other`].
pub(crate) fn resolve(keyword: &str) -> CustomKind {
    if let Some((_, kind)) = KEYWORDS.iter().find(|(word, _)| *word == keyword) {
        return kind.clone();
    }
    if keyword == "poet" {
        return CustomKind::Poetry;
    }
    AlertKind::from_name(keyword).map_or_else(
        || CustomKind::Other(keyword.to_owned()),
        CustomKind::Alert,
    )
}

/// Split a poetry line into its non-empty, trimmed stanza cells.
pub(crate) fn poetry_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(" -- ").map(str::trim).filter(|cell| !cell.is_empty())
}
