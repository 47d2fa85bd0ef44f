use std::collections::HashSet;

use super::*;

#[test]
fn cell_ids_encode_position() {
    let registry = CellRegistry::new("t", &[2, 1], 0);
    assert_eq!(registry.cell(0, 1).map(CellId::as_str), Some("t-cell-0-1"));
    assert_eq!(registry.cell(1, 0).map(CellId::as_str), Some("t-cell-1-0"));
}

#[test]
fn out_of_range_cells_are_none() {
    let registry = CellRegistry::new("t", &[2, 1], 0);
    assert!(registry.cell(1, 1).is_none());
    assert!(registry.cell(2, 0).is_none());
    assert!(registry.inferred(0).is_none());
}

#[test]
fn ragged_shape_is_preserved() {
    let registry = CellRegistry::new("t", &[4, 2, 3], 5);
    assert_eq!(registry.shape(), vec![4, 2, 3]);
    assert_eq!(registry.inferred_len(), 5);
}

#[test]
fn inferred_ids() {
    let registry = CellRegistry::new("anelastic", &[1], 2);
    assert_eq!(registry.inferred(1).map(ToString::to_string), Some("anelastic-inferred-1".to_owned()));
}

#[test]
fn ids_are_unique_and_stable() {
    let a = CellRegistry::new("t", &[3, 3], 2);
    let b = CellRegistry::new("t", &[3, 3], 2);
    assert_eq!(a, b);
    let ids: HashSet<&str> = a.iter().map(CellId::as_str).collect();
    assert_eq!(ids.len(), 8);
}

#[test]
fn tables_do_not_share_ids() {
    let a = CellRegistry::new("left", &[2], 1);
    let b = CellRegistry::new("right", &[2], 1);
    let left: HashSet<&str> = a.iter().map(CellId::as_str).collect();
    assert!(b.iter().all(|id| !left.contains(id.as_str())));
}
