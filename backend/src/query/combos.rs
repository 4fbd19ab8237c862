//! Combo child aggregation.
//!
//! Children are found through `Parent SKU` over the full table, whatever
//! menu filter is active, and classified by their own type through a SKU
//! index built fresh on every pass.
//!
//! ```text
//! C1  Combo                     C1 → groups: 1
//! ├─ G1  Group   (parent C1)          items: 1
//! ├─ I1  Item    (parent C1)          sub-items: 1
//! └─ S1  Sub-Item (parent C1)
//! ```

use std::collections::HashMap;

use super::ColumnIndex;
use crate::models::{ChildKind, ComboSummary};
use crate::parser::Row;

/// Trimmed SKU → lowercased trimmed type.
pub type SkuTypeIndex = HashMap<String, String>;

/// Build the SKU index over every row. Rows missing a SKU or a type are
/// skipped; a later duplicate SKU overwrites an earlier one.
pub fn build_sku_type_index(rows: &[Row], columns: &ColumnIndex) -> SkuTypeIndex {
    let (Some(sku_idx), Some(type_idx)) = (columns.sku, columns.item_type) else {
        return SkuTypeIndex::new();
    };

    rows.iter()
        .filter(|row| !row.get(sku_idx).is_empty() && !row.get(type_idx).is_empty())
        .map(|row| {
            (
                row.get(sku_idx).trim().to_string(),
                row.get(type_idx).trim().to_lowercase(),
            )
        })
        .collect()
}

/// Count the children of `combo_sku` by kind.
///
/// A row is a child when its raw `Parent SKU` equals the trimmed combo SKU.
/// Children whose type is unknown or not group/item/sub-item are ignored.
pub fn summarize_combo(
    combo_sku: &str,
    rows: &[Row],
    columns: &ColumnIndex,
    index: &SkuTypeIndex,
) -> ComboSummary {
    let mut summary = ComboSummary::default();
    let Some(parent_idx) = columns.parent_sku else {
        return summary;
    };
    let combo_sku = combo_sku.trim();

    for child in rows.iter().filter(|row| row.get(parent_idx) == combo_sku) {
        let child_sku = child.column(columns.sku).trim();
        if let Some(kind) = index.get(child_sku).and_then(|t| ChildKind::from_type(t)) {
            summary.add(kind);
        }
    }

    summary
}
