//! # Menucheck - POS catalog CSV analysis
//!
//! Menucheck reads catalog exports (SKU, name, type, parent SKU, menu
//! placement) and answers two questions per root menu: which item names
//! break the naming policy, and what each combo contains.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌────────────────────┐
//! │ CSV text │──▶│  Parser  │──▶│ Menu decoder │──▶│ Query engine       │
//! │          │   │ (table)  │   │ (root menus) │   │ ├─ name validator  │
//! └──────────┘   └──────────┘   └──────────────┘   │ └─ combo summaries │
//!                                                  └────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use menucheck::{parse_table, render, MenuFilter, Mode, OutputRows};
//!
//! let table = parse_table("SKU,Name,Parent SKU,Type,Menu/Screen\n\
//!                          C1,Lunch,,Combo,Lunch\n\
//!                          I1,Burger,C1,Item,Lunch");
//! let rows = render(&table, &MenuFilter::All, Mode::ComboSummary { suppress_empty: true });
//!
//! let OutputRows::ComboSummary(rows) = rows else { unreachable!() };
//! assert_eq!(rows[0].summary.items, 1);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`models`] - Output rows, violations, combo summaries
//! - [`parser`] - Tolerant CSV parsing with encoding detection
//! - [`menu`] - `Menu/Screen` field decoding
//! - [`validation`] - Item name policy
//! - [`query`] - Rendering, combo aggregation, export, pipeline
//! - [`api`] - HTTP API server and log broadcasting

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod menu;
pub mod parser;

// Validation
pub mod validation;

// Querying
pub mod query;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, ExportError, PipelineError, QueryError, ServerError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    validity_text, ChildKind, ComboRow, ComboSummary, NameRow, OutputRows, Violation,
    REQUIRED_COLUMNS,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_encoding, parse_bytes_auto, parse_csv_file_auto, parse_line,
    parse_table, ParseResult, Row, Table,
};

pub use menu::{extract_root_menu, menu_roots, root_menus, split_escaped};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_name, validate_name};

// =============================================================================
// Re-exports - Query
// =============================================================================

pub use query::{
    build_sku_type_index, clean_name, render, summarize_combo, ColumnIndex, MenuFilter, Mode,
    SkuTypeIndex, ALL_MENUS,
};

pub use query::export::{export_csv, EXPORT_FILE_NAME};

pub use query::pipeline::{
    analyze_bytes, analyze_file, analyze_table, analyze_text, AnalysisReport, AnalyzeOptions,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::Config;

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
