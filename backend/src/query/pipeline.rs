//! High-level analysis API: raw input in, report out.
//!
//! Combines decoding, parsing, menu discovery and rendering, and logs each
//! step through the log broadcaster.
//!
//! # Example
//!
//! ```rust,ignore
//! use menucheck::{analyze_file, AnalyzeOptions};
//!
//! let report = analyze_file("catalog.csv".as_ref(), &AnalyzeOptions::default())?;
//! println!("{} menus, {} output rows", report.menus.len(), report.output.len());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{render, ColumnIndex, MenuFilter, Mode};
use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::error::{CsvError, PipelineResult};
use crate::menu::root_menus;
use crate::models::OutputRows;
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, parse_table, ParseResult, Table};

/// Options for one analysis pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    /// Root menu filter
    #[serde(default)]
    pub menu: MenuFilter,

    /// Display mode and its toggle
    #[serde(default)]
    pub mode: Mode,

    /// Fail when a required column is absent instead of degrading
    #[serde(default)]
    pub strict_columns: bool,
}

/// Result of one analysis pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Encoding used to decode the input
    pub encoding: String,

    /// Header as parsed
    pub columns: Vec<String>,

    /// Required columns absent from the header
    pub missing_columns: Vec<String>,

    /// Data rows in the input
    pub row_count: usize,

    /// Selectable root menus, sorted
    pub menus: Vec<String>,

    /// Output rows for the selected mode
    pub output: OutputRows,
}

impl AnalysisReport {
    /// Report for input with nothing in it: no columns, no menus and no
    /// rows in the requested mode.
    pub fn empty(mode: Mode) -> Self {
        Self {
            encoding: "utf-8".to_string(),
            columns: Vec::new(),
            missing_columns: Vec::new(),
            row_count: 0,
            menus: Vec::new(),
            output: render(&Table::default(), &MenuFilter::All, mode),
        }
    }

    /// True for a report built by [`AnalysisReport::empty`].
    pub fn is_empty_input(&self) -> bool {
        self.columns.is_empty() && self.row_count == 0
    }
}

/// Analyze an in-memory table.
pub fn analyze_table(
    table: &Table,
    encoding: &str,
    options: &AnalyzeOptions,
) -> PipelineResult<AnalysisReport> {
    log_info(format!(
        "Parsed {} rows, {} columns",
        table.rows.len(),
        table.header.len()
    ));

    let columns = ColumnIndex::resolve(&table.header);
    if options.strict_columns {
        columns.require_all()?;
    }
    let missing: Vec<String> = columns.missing().into_iter().map(String::from).collect();
    for column in &missing {
        log_warning(format!("Missing column '{}'", column));
    }

    let menus = root_menus(table);
    log_info(format!("Found {} root menus", menus.len()));

    log_info(format!("Rendering menu '{}'", options.menu));
    let output = render(table, &options.menu, options.mode);
    match &output {
        OutputRows::NameListing(rows) => {
            let invalid = rows.iter().filter(|r| !r.is_valid()).count();
            log_info_indent(format!("{} names, {} invalid", rows.len(), invalid), 1);
        }
        OutputRows::ComboSummary(rows) => {
            log_info_indent(format!("{} combos", rows.len()), 1);
        }
    }
    log_success(format!("Produced {} rows", output.len()));

    Ok(AnalysisReport {
        encoding: encoding.to_string(),
        columns: table.header.clone(),
        missing_columns: missing,
        row_count: table.rows.len(),
        menus,
        output,
    })
}

/// Analyze text that is already decoded.
pub fn analyze_text(text: &str, options: &AnalyzeOptions) -> PipelineResult<AnalysisReport> {
    let table = parse_table(text);
    if table.is_empty() {
        return Err(CsvError::EmptyFile.into());
    }
    analyze_table(&table, "utf-8", options)
}

/// Analyze raw bytes, detecting the encoding.
pub fn analyze_bytes(bytes: &[u8], options: &AnalyzeOptions) -> PipelineResult<AnalysisReport> {
    let ParseResult { table, encoding } = parse_bytes_auto(bytes)?;
    log_info(format!("Encoding: {}", encoding));
    analyze_table(&table, &encoding, options)
}

/// Analyze a CSV file on disk.
pub fn analyze_file(path: &Path, options: &AnalyzeOptions) -> PipelineResult<AnalysisReport> {
    log_info(format!("Reading {}", path.display()));
    let ParseResult { table, encoding } = parse_csv_file_auto(path)?;
    log_info(format!("Encoding: {}", encoding));
    analyze_table(&table, &encoding, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, QueryError};
    use std::io::Write;

    const CATALOG: &str = "SKU,Name,Parent SKU,Type,Menu/Screen\n\
        C1,Lunch Combo,,Combo,Lunch\n\
        I1,Burger,C1,Item,Lunch/Mains\n\
        C2,Dinner Combo,,Combo,Dinner";

    #[test]
    fn test_analyze_text_defaults() {
        let report = analyze_text(CATALOG, &AnalyzeOptions::default()).unwrap();
        assert_eq!(report.row_count, 3);
        assert_eq!(report.menus, vec!["Dinner", "Lunch"]);
        assert!(report.missing_columns.is_empty());
        assert_eq!(report.output.len(), 2);
    }

    #[test]
    fn test_analyze_text_empty() {
        let result = analyze_text("\n  \n", &AnalyzeOptions::default());
        assert!(matches!(result, Err(PipelineError::Csv(CsvError::EmptyFile))));
    }

    #[test]
    fn test_empty_report_keeps_mode() {
        let report = AnalysisReport::empty(Mode::NameListing { invalid_only: true });
        assert!(report.is_empty_input());
        assert!(matches!(report.output, OutputRows::NameListing(ref rows) if rows.is_empty()));

        let report = analyze_text(CATALOG, &AnalyzeOptions::default()).unwrap();
        assert!(!report.is_empty_input());
    }

    #[test]
    fn test_missing_columns_reported() {
        let report = analyze_text("SKU,Name\nA1,Burger", &AnalyzeOptions::default()).unwrap();
        assert_eq!(report.missing_columns, vec!["Parent SKU", "Type", "Menu/Screen"]);
        assert!(report.menus.is_empty());
    }

    #[test]
    fn test_strict_columns() {
        let options = AnalyzeOptions {
            strict_columns: true,
            ..Default::default()
        };
        let result = analyze_text("SKU,Name\nA1,Burger", &options);
        assert!(matches!(
            result,
            Err(PipelineError::Query(QueryError::MissingColumn(ref c))) if c == "Parent SKU"
        ));
    }

    #[test]
    fn test_analyze_bytes_with_mode() {
        let options = AnalyzeOptions {
            menu: MenuFilter::from("Lunch"),
            mode: Mode::ComboSummary { suppress_empty: true },
            strict_columns: false,
        };
        let report = analyze_bytes(CATALOG.as_bytes(), &options).unwrap();
        let OutputRows::ComboSummary(rows) = report.output else {
            panic!("expected combo rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sku, "C1");
    }

    #[test]
    fn test_analyze_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", CATALOG).unwrap();

        let options = AnalyzeOptions {
            mode: Mode::NameListing { invalid_only: false },
            ..Default::default()
        };
        let report = analyze_file(file.path(), &options).unwrap();
        assert_eq!(report.output.len(), 3);
    }

    #[test]
    fn test_options_deserialize() {
        let options: AnalyzeOptions = serde_json::from_str(
            r#"{"menu":"Lunch","mode":{"mode":"name-listing","invalidOnly":true}}"#,
        )
        .unwrap();
        assert_eq!(options.menu, MenuFilter::Root("Lunch".into()));
        assert_eq!(options.mode, Mode::NameListing { invalid_only: true });
    }
}
