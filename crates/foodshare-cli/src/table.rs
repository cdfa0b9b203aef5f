//! Plain-text rendering of query results.

use console::{measure_text_width, pad_str, style, Alignment};
use foodshare::{ResultTable, Value};

/// Longest cell rendered before truncation.
const MAX_CELL_WIDTH: usize = 40;

/// Widest bar drawn by [`bars`].
const BAR_WIDTH: usize = 40;

/// Formats `table` as aligned columns with a bold header row.
pub(crate) fn render(table: &ResultTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .map(|row| row.values().iter().map(cell).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| measure_text_width(&row[i]))
                .chain([measure_text_width(name)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let numeric: Vec<bool> = (0..table.columns().len())
        .map(|i| {
            table.rows().all(|row| {
                matches!(
                    row.values()[i],
                    Value::Integer(_) | Value::Real(_) | Value::Null
                )
            })
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, &width)| {
            style(pad_str(name, width, Alignment::Left, None).into_owned())
                .bold()
                .to_string()
        })
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ")));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .zip(&numeric)
            .map(|((value, &width), &numeric)| {
                let align = if numeric {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                pad_str(value, width, align, None).into_owned()
            })
            .collect();
        out.push_str(&format!("  {}\n", line.join("  ").trim_end()));
    }

    out
}

/// Horizontal bar chart of `(label, count)` pairs, scaled to the largest count.
pub(crate) fn bars(items: &[(String, i64)]) -> String {
    let label_width = items
        .iter()
        .map(|(label, _)| measure_text_width(label))
        .max()
        .unwrap_or(0);
    let max = items.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

    let mut out = String::new();
    for (label, count) in items {
        let len = (*count as usize * BAR_WIDTH).div_ceil(max as usize);
        out.push_str(&format!(
            "  {}  {} {}\n",
            pad_str(label, label_width, Alignment::Left, None),
            style("█".repeat(len)).cyan(),
            count
        ));
    }
    out
}

fn cell(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::Real(v) => format!("{v:.2}"),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
        other => other.to_string(),
    };
    if text.chars().count() > MAX_CELL_WIDTH {
        let head: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{head}…")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_are_aligned() {
        console::set_colors_enabled(false);

        let mut table = ResultTable::new(vec!["city".into(), "n".into()]);
        table.push(vec!["Pune".into(), 12.into()]);
        table.push(vec!["Chennai".into(), 3.into()]);

        assert_eq!(
            render(&table),
            "  city     n \n  Pune     12\n  Chennai   3\n"
        );
    }

    #[test]
    fn bars_scale_to_the_largest() {
        console::set_colors_enabled(false);

        let out = bars(&[("Lunch".into(), 4), ("Tea".into(), 1)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("  Lunch  {} 4", "█".repeat(40)));
        assert_eq!(lines[1], format!("  Tea    {} 1", "█".repeat(10)));
    }
}
