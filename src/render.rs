//! Console rendering of frames and columns

use crate::model::{Column, DataFrame, RowIndex};

/// Render a frame as a box-drawn table, row labels in the leading column
pub fn render_frame(frame: &DataFrame) -> String {
    let index_header = match frame.index() {
        RowIndex::Positional => String::new(),
        RowIndex::Labels { name, .. } => name.clone(),
    };

    let mut data: Vec<Vec<String>> = Vec::with_capacity(frame.row_count() + 1);
    let mut header = vec![index_header];
    header.extend(frame.column_names().iter().map(|n| n.to_string()));
    data.push(header);

    for row in 0..frame.row_count() {
        let mut cells = vec![frame.index().label_at(row).to_string()];
        cells.extend(frame.columns().iter().map(|c| c.values()[row].to_string()));
        data.push(cells);
    }

    build_table(&data)
}

/// Render a single column with its row positions
pub fn render_column(column: &Column) -> String {
    let mut data = vec![vec![String::new(), column.name().to_string()]];
    for (pos, value) in column.iter().enumerate() {
        data.push(vec![pos.to_string(), value.to_string()]);
    }
    build_table(&data)
}

/// Render value counts as a two-column listing
pub fn render_value_counts(name: &str, counts: &[(crate::model::CellValue, usize)]) -> String {
    let mut data = vec![vec![name.to_string(), "count".to_string()]];
    for (value, count) in counts {
        data.push(vec![value.to_string(), count.to_string()]);
    }
    build_table(&data)
}

/// Build a formatted table from rows of cells, first row as header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();

    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();

    let border = |output: &mut String, left: char, mid: char, right: char| {
        output.push(left);
        for (i, width) in col_widths.iter().enumerate() {
            output.push_str(&"─".repeat(*width + 2));
            output.push(if i < col_widths.len() - 1 { mid } else { right });
        }
        output.push('\n');
    };

    let row_line = |output: &mut String, row: &[String]| {
        output.push('│');
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(cell.chars().count());
            output.push(' ');
            output.push_str(cell);
            output.push_str(&" ".repeat(pad + 1));
            output.push('│');
        }
        output.push('\n');
    };

    border(&mut output, '┌', '┬', '┐');
    row_line(&mut output, &data[0]);
    border(&mut output, '├', '┼', '┤');
    for row in data.iter().skip(1) {
        row_line(&mut output, row);
    }
    border(&mut output, '└', '┴', '┘');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataFrame;

    #[test]
    fn test_render_frame_has_header_and_rows() {
        let frame = DataFrame::new(vec![
            ("Name", vec!["ann".into(), "bo".into()]),
            ("Age", vec![22i64.into(), 35i64.into()]),
        ])
        .unwrap();
        let out = render_frame(&frame);
        assert!(out.contains("Name"));
        assert!(out.contains("ann"));
        // positional labels lead each row
        assert!(out.contains("│ 0 "));
        assert_eq!(out.lines().count(), 1 + 2 + 3); // header + rows + borders
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(build_table(&[]), "");
    }
}
