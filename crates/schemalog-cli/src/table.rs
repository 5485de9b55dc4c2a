//! Plain-text table rendering
//!
//! Column widths are chosen automatically; an optional header row is
//! rendered above a line of dashes. Rows may have uneven lengths;
//! missing cells render as empty strings.

/// Render a 2-D table to a string
#[must_use]
pub fn render_table(rows: &[Vec<String>], headers: Option<&[&str]>) -> String {
    let cols = headers
        .map_or(0, <[&str]>::len)
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if cols == 0 {
        return "<empty table>\n".to_string();
    }

    let mut widths = vec![0usize; cols];
    if let Some(headers) = headers {
        for (i, h) in headers.iter().enumerate() {
            widths[i] = widths[i].max(h.len());
        }
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render_row = |cells: &[String]| -> String {
        (0..cols)
            .map(|i| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{cell:<width$}", width = widths[i])
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut out = String::new();
    if let Some(headers) = headers {
        let cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
        out.push_str(render_row(&cells).trim_end());
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
    }
    for row in rows {
        out.push_str(render_row(row).trim_end());
        out.push('\n');
    }
    out
}

/// Render a `(value, count)` grouping as a two-column table
#[must_use]
pub fn render_counts(header: &str, counts: &[(String, usize)]) -> String {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(value, count)| vec![value.clone(), count.to_string()])
        .collect();
    render_table(&rows, Some(&[header, "Count"]))
}
