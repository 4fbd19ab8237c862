//! Tolerant CSV record parser with encoding auto-detection.
//!
//! Lines are split on `,` with `"` acting as an in-quote toggle. Quote
//! characters are kept in the field text; they only switch the delimiter
//! off. Short rows read as empty strings, extra fields are never addressed.

use std::path::Path;

use crate::api::logs::log_warning;
use crate::error::{CsvError, CsvResult};

/// Field delimiter for catalog exports.
pub const DELIMITER: char = ',';

/// Quote toggle character.
pub const QUOTE: char = '"';

/// One parsed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or `""` past the end of a short row.
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Field at a resolved column, `""` when the column is absent.
    pub fn column(&self, index: Option<usize>) -> &str {
        index.map(|i| self.get(i)).unwrap_or("")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header plus data rows, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Position of a column by exact, case-sensitive name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Result of parsing raw bytes, with the encoding that was used.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: Table,
    pub encoding: String,
}

/// Split one line into trimmed fields.
///
/// # Example
/// ```
/// use menucheck::parse_line;
///
/// let fields = parse_line(r#"C1, "Lunch, Large" ,Combo"#);
/// assert_eq!(fields, vec!["C1", r#""Lunch, Large""#, "Combo"]);
/// ```
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == DELIMITER && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Parse a whole text blob; the first line is the header.
///
/// Blank lines in the middle are kept as single-field rows so row positions
/// stay aligned with the source.
pub fn parse_table(text: &str) -> Table {
    let text = text.trim();
    if text.is_empty() {
        return Table::default();
    }

    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(parse_line);

    let header = lines.next().unwrap_or_default();
    let rows = lines.map(Row::new).collect();

    Table { header, rows }
}

/// Strip one leading and one trailing quote character.
pub fn unquote(field: &str) -> &str {
    let field = field.strip_prefix(QUOTE).unwrap_or(field);
    field.strip_suffix(QUOTE).unwrap_or(field)
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Labels `encoding_rs` does not know fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // WHATWG maps the Latin-1 labels onto windows-1252.
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(label) => label.decode(bytes).0.into_owned(),
            None => {
                log_warning(format!("Unsupported encoding '{}', decoding as UTF-8", other));
                String::from_utf8_lossy(bytes).into_owned()
            }
        },
    };

    decoded
        .strip_prefix('\u{FEFF}')
        .map(String::from)
        .unwrap_or(decoded)
}

/// Parse CSV bytes with encoding auto-detection.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);

    let table = parse_table(&content);
    if table.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    Ok(ParseResult { table, encoding })
}

/// Parse a CSV file with encoding auto-detection.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("/path/to/catalog.csv")?;
/// println!("Encoding: {}, rows: {}", result.encoding, result.table.rows.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_line() {
        assert_eq!(parse_line("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quotes_toggle_but_are_kept() {
        let fields = parse_line(r#"S1,"Fish, Chips",Item"#);
        assert_eq!(fields, vec!["S1", r#""Fish, Chips""#, "Item"]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest() {
        let fields = parse_line(r#"S1,"open,still open"#);
        assert_eq!(fields, vec!["S1", r#""open,still open"#]);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse_line(",,"), vec!["", "", ""]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn test_parse_table_crlf_and_trailing_newline() {
        let table = parse_table("SKU,Name\r\nA1,Burger\r\nA2,Fries\r\n");
        assert_eq!(table.header, vec!["SKU", "Name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get(1), "Fries");
    }

    #[test]
    fn test_parse_table_empty() {
        let table = parse_table("  \n \n");
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_header_only() {
        let table = parse_table("SKU,Name");
        assert_eq!(table.header.len(), 2);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_short_row_reads_empty() {
        let table = parse_table("a,b,c\n1");
        let row = &table.rows[0];
        assert_eq!(row.get(0), "1");
        assert_eq!(row.get(2), "");
        assert_eq!(row.column(None), "");
    }

    #[test]
    fn test_extra_fields_kept_but_unaddressed() {
        let table = parse_table("a,b\n1,2,3,4");
        assert_eq!(table.rows[0].len(), 4);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("c"), None);
    }

    #[test]
    fn test_column_index_is_case_sensitive() {
        let table = parse_table("SKU,sku\n1,2");
        assert_eq!(table.column_index("sku"), Some(1));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""Burger""#), "Burger");
        assert_eq!(unquote(r#""Burger"#), "Burger");
        assert_eq!(unquote(r#""""#), "");
        assert_eq!(unquote("Burger"), "Burger");
    }

    #[test]
    fn test_auto_parse() {
        let csv = "SKU,Name\nA1,Burger";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.rows.len(), 1);
    }

    #[test]
    fn test_auto_parse_empty_is_error() {
        let result = parse_bytes_auto(b"\n\n");
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_bom_is_dropped() {
        let decoded = decode_content("\u{FEFF}SKU,Name".as_bytes(), "utf-8");
        assert_eq!(decoded, "SKU,Name");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_symbols_are_not_latin9() {
        // 0xA4 and 0xBC differ between ISO-8859-1 and ISO-8859-15.
        let decoded = decode_content(&[0xA4, 0xBC], "iso-8859-1");
        assert_eq!(decoded, "¤¼");
    }

    #[test]
    fn test_unknown_encoding_falls_back_to_utf8() {
        let decoded = decode_content("SKU,Name".as_bytes(), "MacCyrillic");
        assert_eq!(decoded, "SKU,Name");

        let decoded = decode_content(&[0x41, 0xFF], "x-euc-tw");
        assert_eq!(decoded, "A\u{FFFD}");
    }

    #[test]
    fn test_utf32_input_still_parses() {
        let mut bytes = vec![0xFF, 0xFE, 0x00, 0x00];
        for ch in "SKU,Name\nA1,Burger".chars() {
            bytes.extend_from_slice(&(ch as u32).to_le_bytes());
        }
        let result = parse_bytes_auto(&bytes);
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SKU,Name,Type").unwrap();
        writeln!(file, "C1,Lunch,Combo").unwrap();

        let result = parse_csv_file_auto(file.path()).unwrap();
        assert_eq!(result.table.header, vec!["SKU", "Name", "Type"]);
        assert_eq!(result.table.rows[0].get(2), "Combo");
    }

    #[test]
    fn test_missing_file() {
        let result = parse_csv_file_auto("/definitely/not/here.csv");
        assert!(matches!(result, Err(CsvError::IoError(_))));
    }
}
