use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Fold text into its searchable form: canonical decomposition (NFD), then
/// drop everything except ASCII letters, digits and the plain space.
///
/// Decomposing first splits `é` into `e` + U+0301, so the accent is dropped and
/// the base letter survives. Case is preserved; matchers compare
/// case-insensitively.
pub fn normalize_text(text: &str) -> String {
    text.nfd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

const ELLIPSIS: char = '\u{2026}';

/// Terminal cells taken by `s`, summed per grapheme; a tab counts as 4.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cell_width).sum()
}

/// Clip `s` to `max_cells`, ending in `…` when anything was cut. Graphemes are
/// never split, so a combining accent stays with its base letter.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    match max_cells {
        0 => String::new(),
        _ if display_width(s) <= max_cells => s.to_string(),
        1 => ELLIPSIS.to_string(),
        _ => {
            let mut used = 0;
            let mut clipped: String = s
                .graphemes(true)
                .take_while(|g| {
                    used += cell_width(g);
                    used < max_cells
                })
                .collect();
            clipped.push(ELLIPSIS);
            clipped
        }
    }
}

fn cell_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        4
    } else {
        UnicodeWidthStr::width(grapheme)
    }
}
