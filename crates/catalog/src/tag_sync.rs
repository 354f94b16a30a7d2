//! Tag-set reconciliation for a single product.
//!
//! Given the join rows currently stored for a product and the tag ids a
//! request asks for, work out the minimal change:
//! - `added`   = requested − current, inserted as new join rows.
//! - `removed` = current − requested, whose join rows are deleted.
//!
//! Tags present on both sides are left untouched, so their join rows keep
//! their ids. Duplicate ids in the request collapse into one.

use std::collections::BTreeSet;

use db::models::ProductTagRow;

/// The join-row changes needed to bring a product's tags to a requested set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSyncPlan {
    /// Tag ids to pair with the product, ascending.
    pub added_tag_ids: Vec<i64>,
    /// Tag ids to detach from the product, ascending.
    pub removed_tag_ids: Vec<i64>,
    /// Primary keys of the `product_tag` rows to delete.
    pub stale_row_ids: Vec<i64>,
}

impl TagSyncPlan {
    /// Diff `current` join rows against the `requested` tag ids.
    pub fn compute(current: &[ProductTagRow], requested: &[i64]) -> Self {
        let requested: BTreeSet<i64> = requested.iter().copied().collect();
        let stored: BTreeSet<i64> = current.iter().map(|row| row.tag_id).collect();

        let stale: Vec<&ProductTagRow> = current
            .iter()
            .filter(|row| !requested.contains(&row.tag_id))
            .collect();

        Self {
            added_tag_ids: requested.difference(&stored).copied().collect(),
            removed_tag_ids: stale
                .iter()
                .map(|row| row.tag_id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            stale_row_ids: stale.iter().map(|row| row.id).collect(),
        }
    }

    /// True when the stored set already matches the request.
    pub fn is_noop(&self) -> bool {
        self.added_tag_ids.is_empty() && self.stale_row_ids.is_empty()
    }
}
