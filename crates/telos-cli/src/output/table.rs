//! Plain aligned tables for `--format table`.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Terminal width to fit into; `None` never truncates.
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 6;
const GAP: &str = "  ";

/// Render headers and rows as left-aligned text columns (numbers right-aligned).
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect::<Vec<_>>();
    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = vec![header_line, divider];
    lines.extend(rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, is_numeric(&cell));
                if options.color {
                    colorize(&cell, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP)
    }));
    lines.join("\n")
}

/// Narrow the widest column one character at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        match widest {
            Some(index) => widths[index] -= 1,
            None => break,
        }
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

/// Color balance outcomes; the ANSI codes wrap the already padded cell.
fn colorize(cell: &str, padded: String) -> String {
    let code = match cell {
        "passed" | "completed" => "32",
        "violated" | "rebalancing" => "33",
        "failed" | "true" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["t1".into(), "causal".into(), "0".into()],
            vec!["civic-associations".into(), "descriptive".into(), "12".into()],
        ]
    }

    #[test]
    fn columns_align_across_mixed_widths() {
        let table = render(&["theory_id", "primary", "attempts"], &rows(), PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let column = lines[0].find("primary").unwrap();
        assert_eq!(lines[2].find("causal"), Some(column));
        assert_eq!(lines[3].find("descriptive"), Some(column));
        // numbers are right-aligned
        assert!(lines[2].ends_with("       0"));
        assert!(lines[3].ends_with("      12"));
    }

    #[test]
    fn narrow_terminal_truncates_the_widest_column() {
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render(&["theory_id", "primary", "attempts"], &rows(), options);
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render(&["a", "b"], &[vec!["x".into()]], PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.trim_end().ends_with('-')));
    }

    #[test]
    fn color_wraps_balance_outcomes_only() {
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render(
            &["status", "id"],
            &[vec!["violated".into(), "t1".into()]],
            options,
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("\u{1b}[33mviolated"));
        assert!(row.ends_with("t1    "));
    }
}
