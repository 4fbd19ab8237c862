//! Domain models for catalog analysis.
//!
//! - [`ChildKind`] - How a combo child is counted
//! - [`ComboSummary`] - Child counts for one combo
//! - [`Violation`] - One failed name rule
//! - [`NameRow`] / [`ComboRow`] - Output rows for each display mode
//! - [`OutputRows`] - The two row shapes joined at the boundary

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Column names
// =============================================================================

pub const COL_SKU: &str = "SKU";
pub const COL_NAME: &str = "Name";
pub const COL_PARENT_SKU: &str = "Parent SKU";
pub const COL_TYPE: &str = "Type";
pub const COL_MENU: &str = "Menu/Screen";

/// Required columns in canonical order.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_SKU, COL_NAME, COL_PARENT_SKU, COL_TYPE, COL_MENU];

/// Type value marking a combo row (case-insensitive).
pub const COMBO_TYPE: &str = "combo";

// =============================================================================
// Combo children
// =============================================================================

/// Classification of a combo child by its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildKind {
    Group,
    Item,
    SubItem,
}

impl ChildKind {
    /// Classify an already-lowercased type string.
    pub fn from_type(lowercased: &str) -> Option<Self> {
        match lowercased {
            "group" => Some(ChildKind::Group),
            "item" => Some(ChildKind::Item),
            "sub-item" => Some(ChildKind::SubItem),
            _ => None,
        }
    }
}

/// Child counts for one combo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboSummary {
    pub groups: usize,
    pub items: usize,
    pub sub_items: usize,
}

impl ComboSummary {
    pub fn add(&mut self, kind: ChildKind) {
        match kind {
            ChildKind::Group => self.groups += 1,
            ChildKind::Item => self.items += 1,
            ChildKind::SubItem => self.sub_items += 1,
        }
    }

    /// No item or sub-item children; groups alone are not purchasable.
    pub fn is_empty(&self) -> bool {
        self.items + self.sub_items == 0
    }
}

// =============================================================================
// Name validation
// =============================================================================

/// A failed name rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Violation {
    /// Length outside the allowed range (in characters).
    Length { min: usize, max: usize },
    /// Leading or trailing whitespace.
    WhitespaceEdge,
    /// Characters outside the allowlist, deduplicated, first-occurrence order.
    InvalidCharacters { chars: Vec<char> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Length { min, max } => write!(f, "Length {}-{}", min, max),
            Violation::WhitespaceEdge => write!(f, "Whitespace edge"),
            Violation::InvalidCharacters { chars } => {
                let listed: Vec<String> = chars.iter().map(char::to_string).collect();
                write!(f, "Invalid characters: {}", listed.join(", "))
            }
        }
    }
}

/// Text shown in the validity column: `Valid` or the joined reasons.
pub fn validity_text(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "Valid".to_string();
    }
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Output rows
// =============================================================================

/// Name-listing output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRow {
    pub sku: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub violations: Vec<Violation>,
}

impl NameRow {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Combo-summary output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboRow {
    pub sku: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(flatten)]
    pub summary: ComboSummary,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rows", rename_all = "kebab-case")]
pub enum OutputRows {
    NameListing(Vec<NameRow>),
    ComboSummary(Vec<ComboRow>),
}

impl OutputRows {
    pub fn len(&self) -> usize {
        match self {
            OutputRows::NameListing(rows) => rows.len(),
            OutputRows::ComboSummary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column titles for display and export.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            OutputRows::NameListing(_) => &["SKU", "Item Name", "Type", "Validity Reason"],
            OutputRows::ComboSummary(_) => {
                &["SKU", "Combo Name", "Type", "Groups", "Items", "Sub-items"]
            }
        }
    }

    /// Rows flattened to display strings, in header order.
    pub fn records(&self) -> Vec<Vec<String>> {
        match self {
            OutputRows::NameListing(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.sku.clone(),
                        r.name.clone(),
                        r.item_type.clone(),
                        validity_text(&r.violations),
                    ]
                })
                .collect(),
            OutputRows::ComboSummary(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.sku.clone(),
                        r.name.clone(),
                        r.item_type.clone(),
                        r.summary.groups.to_string(),
                        r.summary.items.to_string(),
                        r.summary.sub_items.to_string(),
                    ]
                })
                .collect(),
        }
    }
}
