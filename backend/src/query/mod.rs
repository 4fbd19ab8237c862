//! Query engine: filter rows by root menu, then list names or summarize combos.
//!
//! - [`combos`]: Parent/child aggregation
//! - [`export`]: CSV rendering of output rows
//! - [`pipeline`]: Bytes/file → report, with logging
//!
//! [`render`] is a pure function of its arguments; column positions, the
//! SKU index and menu roots are derived again on every call.

pub mod combos;
pub mod export;
pub mod pipeline;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};
use crate::menu::has_root;
use crate::models::{
    ComboRow, NameRow, OutputRows, COL_MENU, COL_NAME, COL_PARENT_SKU, COL_SKU, COL_TYPE,
    COMBO_TYPE,
};
use crate::parser::{unquote, Table};
use crate::validation::validate_name;

pub use combos::{build_sku_type_index, summarize_combo, SkuTypeIndex};

/// Sentinel menu value that disables filtering.
pub const ALL_MENUS: &str = "All";

// =============================================================================
// Column resolution
// =============================================================================

/// Positions of the required columns, resolved once per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub sku: Option<usize>,
    pub name: Option<usize>,
    pub parent_sku: Option<usize>,
    pub item_type: Option<usize>,
    pub menu: Option<usize>,
}

impl ColumnIndex {
    pub fn resolve(header: &[String]) -> Self {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        Self {
            sku: find(COL_SKU),
            name: find(COL_NAME),
            parent_sku: find(COL_PARENT_SKU),
            item_type: find(COL_TYPE),
            menu: find(COL_MENU),
        }
    }

    /// Absent required columns, in canonical order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (COL_SKU, self.sku),
            (COL_NAME, self.name),
            (COL_PARENT_SKU, self.parent_sku),
            (COL_TYPE, self.item_type),
            (COL_MENU, self.menu),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Strict check: fail on the first absent column.
    pub fn require_all(&self) -> QueryResult<()> {
        match self.missing().first() {
            Some(name) => Err(QueryError::MissingColumn(name.to_string())),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Which rows pass the menu filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuFilter {
    #[default]
    All,
    Root(String),
}

impl MenuFilter {
    /// Whether a row with this raw menu field passes.
    pub fn matches(&self, raw_menu: &str) -> bool {
        match self {
            MenuFilter::All => true,
            MenuFilter::Root(root) => has_root(raw_menu, root),
        }
    }
}

impl From<&str> for MenuFilter {
    fn from(value: &str) -> Self {
        if value == ALL_MENUS {
            MenuFilter::All
        } else {
            MenuFilter::Root(value.to_string())
        }
    }
}

impl From<String> for MenuFilter {
    fn from(value: String) -> Self {
        MenuFilter::from(value.as_str())
    }
}

impl From<MenuFilter> for String {
    fn from(value: MenuFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MenuFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuFilter::All => f.write_str(ALL_MENUS),
            MenuFilter::Root(root) => f.write_str(root),
        }
    }
}

/// Display mode, with the toggle that only applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Mode {
    NameListing {
        #[serde(default, rename = "invalidOnly")]
        invalid_only: bool,
    },
    ComboSummary {
        #[serde(default, rename = "suppressEmpty")]
        suppress_empty: bool,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::ComboSummary { suppress_empty: false }
    }
}

impl FromStr for Mode {
    type Err = QueryError;

    /// Parses the mode name with both toggles off.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "names" | "name-listing" => Ok(Mode::NameListing { invalid_only: false }),
            "combos" | "combo-summary" => Ok(Mode::ComboSummary { suppress_empty: false }),
            other => Err(QueryError::UnknownMode(other.to_string())),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Trim, then strip one leading and one trailing `"`.
pub fn clean_name(raw: &str) -> &str {
    unquote(raw.trim())
}

/// Produce the output rows for one filter/mode selection.
///
/// Output order is source order of the filtered rows.
pub fn render(table: &Table, menu: &MenuFilter, mode: Mode) -> OutputRows {
    let columns = ColumnIndex::resolve(&table.header);

    let filtered = table.rows.iter().filter(|row| match columns.menu {
        Some(idx) => menu.matches(row.get(idx)),
        None => true,
    });

    match mode {
        Mode::NameListing { invalid_only } => {
            let rows = filtered
                .filter_map(|row| {
                    let name = clean_name(row.column(columns.name));
                    if name.is_empty() {
                        return None;
                    }
                    let violations = validate_name(name);
                    if invalid_only && violations.is_empty() {
                        return None;
                    }
                    Some(NameRow {
                        sku: row.column(columns.sku).to_string(),
                        name: name.to_string(),
                        item_type: row.column(columns.item_type).to_string(),
                        violations,
                    })
                })
                .collect();
            OutputRows::NameListing(rows)
        }
        Mode::ComboSummary { suppress_empty } => {
            let index = build_sku_type_index(&table.rows, &columns);
            let rows = filtered
                .filter(|row| row.column(columns.item_type).to_lowercase() == COMBO_TYPE)
                .filter_map(|row| {
                    let sku = row.column(columns.sku).trim();
                    let summary = summarize_combo(sku, &table.rows, &columns, &index);
                    if suppress_empty && summary.is_empty() {
                        return None;
                    }
                    Some(ComboRow {
                        sku: sku.to_string(),
                        name: row.column(columns.name).to_string(),
                        item_type: row.column(columns.item_type).to_string(),
                        summary,
                    })
                })
                .collect();
            OutputRows::ComboSummary(rows)
        }
    }
}
