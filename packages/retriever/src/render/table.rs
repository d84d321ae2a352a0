//! Flattening of tables into fixed-width text grids.

use crate::render::markup::Table;

/// Render a table as pipe-delimited lines.
///
/// Each column is as wide as its longest cell (in characters) across all
/// rows, and cells are left-aligned within it. A dash row follows the first
/// (header) row. Short rows are padded with empty cells.
///
/// # Examples
/// ```
/// use slovlex_retriever::render::{render_table, Table};
///
/// let table = Table {
///     rows: vec![
///         vec!["A".into(), "BB".into()],
///         vec!["DDD".into(), "E".into()],
///     ],
/// };
/// assert_eq!(
///     render_table(&table, 0),
///     vec!["| A   | BB |", "| --- | -- |", "| DDD | E  |"]
/// );
/// ```
#[must_use]
pub fn render_table(table: &Table, indent: usize) -> Vec<String> {
    let widths = column_widths(table);
    if widths.is_empty() {
        return Vec::new();
    }

    let pad = " ".repeat(indent);
    let mut lines = Vec::with_capacity(table.rows.len() + 1);

    for (i, row) in table.rows.iter().enumerate() {
        lines.push(format!("{pad}{}", format_row(row, &widths)));
        if i == 0 {
            let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(format!("{pad}{}", format_row(&dashes, &widths)));
        }
    }

    lines
}

/// Width of each column: the longest cell in it across all rows.
#[must_use]
pub fn column_widths(table: &Table) -> Vec<usize> {
    let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(col, width)| {
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[&[&str]]) -> Table {
        Table {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_column_widths() {
        let t = table(&[&["A", "BB", "C"], &["DDD", "E", "F"]]);
        assert_eq!(column_widths(&t), vec![3, 2, 1]);
    }

    #[test]
    fn test_render_three_columns() {
        let t = table(&[&["A", "BB", "C"], &["DDD", "E", "F"]]);
        assert_eq!(
            render_table(&t, 0),
            vec![
                "| A   | BB | C |",
                "| --- | -- | - |",
                "| DDD | E  | F |",
            ]
        );
    }

    #[test]
    fn test_render_tolerates_short_rows() {
        let t = table(&[&["Pásmo", "Sadzba"], &["I."]]);
        assert_eq!(
            render_table(&t, 2),
            vec![
                "  | Pásmo | Sadzba |",
                "  | ----- | ------ |",
                "  | I.    |        |",
            ]
        );
    }

    #[test]
    fn test_render_empty_table() {
        assert!(render_table(&Table::default(), 0).is_empty());
    }

    #[test]
    fn test_widths_count_characters_not_bytes() {
        let t = table(&[&["ťž"], &["ab"]]);
        assert_eq!(column_widths(&t), vec![2]);
    }
}
