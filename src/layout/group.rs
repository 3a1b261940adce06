use std::collections::BTreeMap;

use crate::ir::RiskItem;

/// (consequence, likelihood) rating pair identifying one matrix cell.
pub type CellKey = (u8, u8);

/// Partition items into per-cell buckets. Bucket values are indices into the
/// input slice, in input order; the BTreeMap keeps bucket iteration order
/// stable across calls, so an unchanged item list always produces an
/// identical traversal.
pub fn group_by_cell(items: &[RiskItem]) -> BTreeMap<CellKey, Vec<usize>> {
    let mut buckets: BTreeMap<CellKey, Vec<usize>> = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        buckets
            .entry((item.consequence, item.likelihood))
            .or_default()
            .push(index);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, consequence: u8, likelihood: u8) -> RiskItem {
        RiskItem {
            id: label.to_string(),
            label: label.to_string(),
            consequence,
            likelihood,
        }
    }

    #[test]
    fn buckets_preserve_insertion_order() {
        let items = vec![
            item("a", 3, 2),
            item("b", 1, 1),
            item("c", 3, 2),
            item("d", 3, 2),
            item("e", 1, 1),
        ];
        let buckets = group_by_cell(&items);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&(3, 2)], vec![0, 2, 3]);
        assert_eq!(buckets[&(1, 1)], vec![1, 4]);
    }

    #[test]
    fn regrouping_unchanged_items_is_identical() {
        let items = vec![
            item("a", 2, 5),
            item("b", 2, 5),
            item("c", 4, 1),
            item("d", 2, 5),
            item("e", 5, 5),
        ];
        let first = group_by_cell(&items);
        let second = group_by_cell(&items);
        assert_eq!(first, second);
        let first_keys: Vec<_> = first.keys().collect();
        let second_keys: Vec<_> = second.keys().collect();
        assert_eq!(first_keys, second_keys);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(group_by_cell(&[]).is_empty());
    }
}
