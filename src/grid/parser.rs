//! Delimited-text parsing and serialization
//!
//! One parser serves both matrix flavours; the [`ValuePolicy`] decides
//! whether value cells stay literal text or are coerced to numbers.

use std::collections::HashSet;
use std::io::Cursor;

use super::model::{CellValue, Literal, Matrix, Numeric, Row, Separator, ValuePolicy};
use crate::config::GridConfig;

/// Title given to header cells left empty
pub const DEFAULT_EMPTY_HEADER: &str = "Coluna";

/// Headers of the scaffold produced for an empty blob
pub const DEFAULT_SCAFFOLD_HEADERS: [&str; 2] = ["Categoria", "Valor"];

/// Parser settings sourced from [`GridConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    pub empty_header_title: String,
    pub scaffold_headers: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            empty_header_title: DEFAULT_EMPTY_HEADER.to_string(),
            scaffold_headers: DEFAULT_SCAFFOLD_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}

impl From<&GridConfig> for ParseOptions {
    fn from(config: &GridConfig) -> Self {
        let scaffold_headers = if config.scaffold_headers.is_empty() {
            Self::default().scaffold_headers
        } else {
            config.scaffold_headers.clone()
        };
        Self {
            empty_header_title: config.empty_header_title.clone(),
            scaffold_headers,
        }
    }
}

/// Infer the separator from the first line of a blob
///
/// Priority is tab, then semicolon, then comma, then runs of spaces.
/// Lines with none of these default to tab.
pub fn detect_separator(first_line: &str) -> Separator {
    if first_line.contains('\t') {
        Separator::Tab
    } else if first_line.contains(';') {
        Separator::Semicolon
    } else if first_line.contains(',') {
        Separator::Comma
    } else if first_line.trim().contains("  ") {
        Separator::MultiSpace
    } else {
        Separator::Tab
    }
}

/// Separator a whole blob would be parsed with
pub fn blob_separator(raw: &str) -> Separator {
    content_lines(raw)
        .next()
        .map(detect_separator)
        .unwrap_or_default()
}

/// Parse a blob into the string-preserving matrix used by the editable grid
pub fn parse(raw: &str) -> Matrix {
    parse_with::<Literal>(raw, &ParseOptions::default()).0
}

/// Parse a blob into a number-coerced matrix for computation (chart series)
pub fn parse_numeric(raw: &str) -> Matrix<f64> {
    parse_with::<Numeric>(raw, &ParseOptions::default()).0
}

/// Parse a blob, returning the matrix and the separator it was split on
pub fn parse_with<P: ValuePolicy>(raw: &str, options: &ParseOptions) -> (Matrix<P::Value>, Separator) {
    let mut lines = content_lines(raw);

    let Some(first) = lines.next() else {
        return (scaffold(options), Separator::default());
    };

    let separator = detect_separator(first);
    let headers = dedupe_headers(split_line(first, separator), &options.empty_header_title);
    let value_count = headers.len().saturating_sub(1);

    let rows = lines
        .map(|line| {
            let mut fields = split_line(line, separator).into_iter();
            let label = fields.next().unwrap_or_default().trim().to_string();
            let mut row = Row {
                label,
                values: fields.map(|field| P::coerce(&field)).collect(),
            };
            row.fit(value_count);
            row
        })
        .collect();

    (Matrix { headers, rows }, separator)
}

/// Join a matrix back into a blob with the given separator
///
/// Comma-separated fields are quoted when needed so the blob parses back
/// into the same matrix. For the other separators any separator text inside
/// a field is flattened to a single space.
pub fn serialize<V: CellValue>(matrix: &Matrix<V>, separator: Separator) -> String {
    let mut lines = Vec::with_capacity(matrix.rows.len() + 1);

    let single_column = matrix.headers.len() < 2;
    let headers = matrix
        .headers
        .iter()
        .map(|title| neutral_header(title, separator, single_column));
    lines.push(join_fields(headers, separator));

    for row in &matrix.rows {
        let fields =
            std::iter::once(row.label.clone()).chain(row.values.iter().map(CellValue::to_cell_text));
        let line = join_fields(fields, separator);
        // A lone empty label would read back as a blank line
        if line.is_empty() {
            lines.push(separator.as_str().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Separator a matrix should be written back with
///
/// The header line must detect as the separator it is written with, so a
/// single-column matrix, or a header holding a separator that detection
/// ranks higher, is written tab-separated. Space-run blobs cannot hold empty
/// fields either, so once a matrix has an empty cell it is written
/// tab-separated too.
pub fn storage_separator<V: CellValue>(matrix: &Matrix<V>, detected: Separator) -> Separator {
    if detected == Separator::Tab {
        return detected;
    }
    if matrix.column_count() < 2 {
        tracing::debug!("Single-column grid, storing {} blob with tabs", detected.name());
        return Separator::Tab;
    }

    let outranking = outranking_separators(detected);
    if matrix.headers.iter().any(|h| h.contains(outranking)) {
        tracing::debug!(
            "Header holds a separator outranking {}, switching to tabs",
            detected.name()
        );
        return Separator::Tab;
    }

    if detected != Separator::MultiSpace {
        return detected;
    }

    let has_empty = matrix.headers.iter().any(|h| h.trim().is_empty())
        || matrix.rows.iter().any(|row| {
            row.label.trim().is_empty()
                || row.values.iter().any(|v| v.to_cell_text().trim().is_empty())
        });

    if has_empty {
        tracing::debug!("Empty cell in space-separated grid, switching to tabs");
        Separator::Tab
    } else {
        detected
    }
}

/// Non-blank lines of a blob
///
/// Only lines made entirely of spaces count as blank: a line of bare tabs
/// is a row of empty cells.
fn content_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().filter(|line| !line.trim_matches(' ').is_empty())
}

fn scaffold<V: CellValue>(options: &ParseOptions) -> Matrix<V> {
    Matrix {
        headers: options.scaffold_headers.clone(),
        rows: Vec::new(),
    }
}

/// Trim titles, fill blanks and suffix repeats with ` (2)`, ` (3)`, …
fn dedupe_headers(raw: Vec<String>, empty_title: &str) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());

    for title in raw {
        let title = match title.trim() {
            "" => empty_title.to_string(),
            trimmed => trimmed.to_string(),
        };

        let unique = if used.contains(&title) {
            (2..)
                .map(|n| format!("{} ({})", title, n))
                .find(|candidate| !used.contains(candidate))
                .unwrap_or_default()
        } else {
            title
        };

        used.insert(unique.clone());
        headers.push(unique);
    }

    headers
}

/// Split one line on the separator
pub fn split_line(line: &str, separator: Separator) -> Vec<String> {
    match separator {
        Separator::Tab => line.split('\t').map(str::to_string).collect(),
        Separator::Semicolon => line.split(';').map(str::to_string).collect(),
        Separator::Comma => split_quoted(line),
        Separator::MultiSpace => split_space_runs(line),
    }
}

/// Comma split that keeps quoted commas inside their field
fn split_quoted(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(line.as_bytes()));

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            tracing::debug!("Quoted split failed ({}), falling back to plain split", e);
            line.split(',').map(str::to_string).collect()
        }
        None => vec![String::new()],
    }
}

/// Split on runs of two or more spaces
fn split_space_runs(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut pending_spaces = 0usize;

    for ch in line.trim().chars() {
        if ch == ' ' {
            pending_spaces += 1;
            continue;
        }
        match pending_spaces {
            0 => {}
            1 => current.push(' '),
            _ => fields.push(std::mem::take(&mut current)),
        }
        pending_spaces = 0;
        current.push(ch);
    }
    fields.push(current);

    fields
}

/// Separator characters [`detect_separator`] checks before `separator`
fn outranking_separators(separator: Separator) -> &'static [char] {
    match separator {
        Separator::Tab => &[],
        Separator::Semicolon => &['\t'],
        Separator::Comma => &['\t', ';'],
        Separator::MultiSpace => &['\t', ';', ','],
    }
}

/// Header title that cannot change how its line is detected
///
/// A lone header has no separator to anchor detection, so every separator
/// character and space run in it is flattened.
fn neutral_header(title: &str, separator: Separator, single_column: bool) -> String {
    if single_column {
        collapse_spaces(&title.replace(['\t', ';', ','], " "))
    } else {
        title.replace(outranking_separators(separator), " ")
    }
}

/// Trim and squeeze runs of spaces to one
fn collapse_spaces(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if !(ch == ' ' && collapsed.ends_with(' ')) {
            collapsed.push(ch);
        }
    }
    collapsed
}

fn join_fields(fields: impl Iterator<Item = String>, separator: Separator) -> String {
    fields
        .map(|field| escape_field(&field, separator))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Make a field safe to write with the given separator
fn escape_field(field: &str, separator: Separator) -> String {
    let single_line: String = field
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    match separator {
        Separator::Comma => {
            if single_line.contains(',') || single_line.contains('"') {
                format!("\"{}\"", single_line.replace('"', "\"\""))
            } else {
                single_line
            }
        }
        Separator::Tab => single_line.replace('\t', " "),
        Separator::Semicolon => single_line.replace(';', " "),
        Separator::MultiSpace => collapse_spaces(&single_line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_priority() {
        assert_eq!(detect_separator("a\tb;c,d"), Separator::Tab);
        assert_eq!(detect_separator("a;b,c"), Separator::Semicolon);
        assert_eq!(detect_separator("a,b"), Separator::Comma);
        assert_eq!(detect_separator("Mês  Real  Meta"), Separator::MultiSpace);
    }

    #[test]
    fn test_detect_defaults_to_tab() {
        assert_eq!(detect_separator(""), Separator::Tab);
        assert_eq!(detect_separator("single"), Separator::Tab);
        assert_eq!(detect_separator("two words"), Separator::Tab);
    }

    #[test]
    fn test_split_quoted_comma() {
        assert_eq!(
            split_line("\"São Paulo, SP\",10,20", Separator::Comma),
            vec!["São Paulo, SP", "10", "20"]
        );
    }

    #[test]
    fn test_split_space_runs() {
        assert_eq!(
            split_line("Janeiro de 2024   120  100", Separator::MultiSpace),
            vec!["Janeiro de 2024", "120", "100"]
        );
    }

    #[test]
    fn test_header_dedupe() {
        let m = parse("A\tA\tA\nx\t1\t2");
        assert_eq!(m.headers, vec!["A", "A (2)", "A (3)"]);
    }

    #[test]
    fn test_header_dedupe_skips_taken_suffix() {
        let m = parse("A\tA (2)\tA");
        assert_eq!(m.headers, vec!["A", "A (2)", "A (3)"]);
    }

    #[test]
    fn test_empty_header_gets_default_title() {
        let m = parse("\tValor\t\nx\t1\t2");
        assert_eq!(m.headers, vec!["Coluna", "Valor", "Coluna (2)"]);
    }

    #[test]
    fn test_empty_blob_scaffold() {
        for raw in ["", "   ", "\n\n  \n"] {
            let m = parse(raw);
            assert_eq!(m.headers, vec!["Categoria", "Valor"]);
            assert!(m.rows.is_empty());
        }
    }

    #[test]
    fn test_rows_padded_and_truncated() {
        let m = parse("L\tA\tB\nx\t1\ny\t1\t2\t3");
        assert_eq!(m.rows[0].values, vec!["1", ""]);
        assert_eq!(m.rows[1].values, vec!["1", "2"]);
    }

    #[test]
    fn test_blank_lines_skipped_but_tab_rows_kept() {
        let m = parse("L\tA\n\nx\t1\n   \n\t\n");
        assert_eq!(m.rows.len(), 2);
        assert_eq!(m.rows[1].label, "");
        assert_eq!(m.rows[1].values, vec![""]);
    }

    #[test]
    fn test_literal_values_trimmed_not_coerced() {
        let m = parse("L;A\nx; 1.234,56 ");
        assert_eq!(m.rows[0].values, vec!["1.234,56"]);
    }

    #[test]
    fn test_numeric_policy_coerces() {
        let m = parse_numeric("L;A;B\nx;1.234,56;abc");
        assert_eq!(m.rows[0].values, vec![1234.56, 0.0]);
    }

    #[test]
    fn test_serialize_round_trip_per_separator() {
        for raw in [
            "Mês\tReal\tMeta\nJan\t120\t100\nFev\t90\t",
            "Mês;Real\nJan;1.234,56",
            "City,Total\n\"São Paulo, SP\",10\n\"say \"\"hi\"\"\",2",
            "Mês  Real  Meta\nJan  120  100",
        ] {
            let (m, sep) = parse_with::<Literal>(raw, &ParseOptions::default());
            let again = parse_with::<Literal>(&serialize(&m, sep), &ParseOptions::default());
            assert_eq!(again, (m, sep), "round trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_serialize_flattens_separator_in_field() {
        let mut m = parse("L;A\nx;1");
        m.rows[0].label = "a;b".into();
        assert_eq!(serialize(&m, Separator::Semicolon), "L;A\na b;1");
    }

    #[test]
    fn test_storage_separator_leaves_space_runs_for_blank_cells() {
        let mut m = parse("Mês  Real\nJan  120");
        assert_eq!(storage_separator(&m, Separator::MultiSpace), Separator::MultiSpace);

        m.rows.push(m.blank_row());
        assert_eq!(storage_separator(&m, Separator::MultiSpace), Separator::Tab);
        assert_eq!(storage_separator(&m, Separator::Comma), Separator::Comma);
    }

    #[test]
    fn test_single_column_blank_row_survives() {
        let mut m = parse("Item\nA");
        m.rows.push(m.blank_row());

        let blob = serialize(&m, Separator::Tab);
        assert_eq!(blob, "Item\nA\n\t");
        assert_eq!(parse(&blob), m);
    }

    #[test]
    fn test_storage_separator_guards_header_detection() {
        let comma = parse("A,B\nx,1");
        let mut renamed = comma.clone();
        renamed.headers[1] = "B;C".into();
        assert_eq!(storage_separator(&renamed, Separator::Comma), Separator::Tab);
        assert_eq!(storage_separator(&comma, Separator::Comma), Separator::Comma);

        let narrow = parse("A;B\nx;1");
        let single = Matrix::new(vec!["A".into()], vec![narrow.rows[0].clone()]);
        assert_eq!(storage_separator(&single, Separator::Semicolon), Separator::Tab);
    }

    #[test]
    fn test_lone_header_is_flattened() {
        let mut m = parse("Item\nA");
        m.headers[0] = "Preço; total,  R$".into();
        let blob = serialize(&m, Separator::Tab);
        assert_eq!(blob, "Preço total R$\nA");
        assert_eq!(detect_separator("Preço total R$"), Separator::Tab);
    }

    #[test]
    fn test_blob_separator() {
        assert_eq!(blob_separator("\n\nA;B\n1;2"), Separator::Semicolon);
        assert_eq!(blob_separator(""), Separator::Tab);
    }
}
