use super::LayoutOptions;
use crate::model::GridRow;

/// Découpe une ligne brute en `num_days + 2` cellules de largeur fixe.
///
/// Les lignes courtes sont complétées par des espaces avant découpage ; les
/// caractères au-delà de `total_width` sont ignorés. Une cellule vide devient
/// `spacer`. `opts` doit avoir passé [`LayoutOptions::validate`].
pub fn normalize_line(line: &str, opts: &LayoutOptions) -> GridRow {
    let mut chars: Vec<char> = line.chars().take(opts.total_width()).collect();
    chars.resize(opts.total_width(), ' ');

    let mut widths = Vec::with_capacity(opts.num_days + 2);
    widths.push(opts.left_width);
    widths.extend(std::iter::repeat(opts.day_width).take(opts.num_days));
    widths.push(opts.right_width);

    let mut cells = Vec::with_capacity(widths.len());
    let mut start = 0;
    for width in widths {
        let raw: String = chars[start..start + width].iter().collect();
        let trimmed = raw.trim();
        cells.push(if trimmed.is_empty() {
            opts.spacer.clone()
        } else {
            trimmed.to_string()
        });
        start += width;
    }
    GridRow::from_cells(cells)
}

/// Normalisation paresseuse d'une séquence de lignes.
pub fn normalize<I, S>(lines: I, opts: &LayoutOptions) -> impl Iterator<Item = GridRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let opts = opts.clone();
    lines
        .into_iter()
        .map(move |line| normalize_line(line.as_ref(), &opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LayoutOptions {
        LayoutOptions {
            left_width: 3,
            day_width: 4,
            num_days: 2,
            right_width: 3,
            ..LayoutOptions::default()
        }
    }

    #[test]
    fn short_lines_are_padded() {
        let opts = small();
        for line in ["", "x", "09 Ann", "09 Ann Bob 15 trailing junk"] {
            let row = normalize_line(line, &opts);
            assert_eq!(row.len(), opts.num_days + 2, "line {line:?}");
        }
    }

    #[test]
    fn empty_cells_become_spacer() {
        let row = normalize_line("   Ann", &small());
        assert_eq!(row.cells(), ["-", "Ann", "-", "-"]);
        assert!(row.cells().iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn slices_by_fixed_offsets() {
        let row = normalize_line("15 Ann Bob 30", &small());
        assert_eq!(row.cells(), ["15", "Ann", "Bob", "30"]);
    }

    #[test]
    fn slicing_counts_chars_not_bytes() {
        let row = normalize_line("   Zoë Léa", &small());
        assert_eq!(row.day(0), Some("Zoë"));
        assert_eq!(row.day(1), Some("Léa"));
    }

    #[test]
    fn custom_spacer() {
        let opts = LayoutOptions {
            spacer: "·".into(),
            ..small()
        };
        let row = normalize_line("", &opts);
        assert!(row.cells().iter().all(|c| c == "·"));
    }
}
