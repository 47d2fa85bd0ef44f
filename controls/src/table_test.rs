use super::*;
use crate::tree::{MemoryTree, NodeId};

fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| row.iter().map(|s| (*s).to_owned()).collect()).collect()
}

fn reference_table(tree: &mut MemoryTree) -> ScaleTable<NodeId> {
    build_table(
        tree,
        "scales",
        strings(&[&["a", "b"]]),
        vec![vec![Some(100.0), Some(0.001)]],
        strings(&[&["m", "s"]]),
    )
    .unwrap()
}

/// Label span of cell `(row, col)`: table > tbody > tr > td > span.scale-label.
fn label_node(tree: &MemoryTree, table: &ScaleTable<NodeId>, row: usize, col: usize) -> NodeId {
    let body = tree.children(*table.table())[0];
    let tr = tree.children(body)[row];
    let td = tree.children(tr)[col];
    tree.children(td)[0]
}

fn value_text(tree: &MemoryTree, table: &ScaleTable<NodeId>, row: usize, col: usize) -> String {
    let id = table.registry().cell(row, col).unwrap();
    let node = tree.find_by_id(table.table(), id.as_str()).unwrap();
    tree.text(&node)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn renders_reference_cells() {
    let mut tree = MemoryTree::new();
    let table = reference_table(&mut tree);
    assert_eq!(value_text(&tree, &table, 0, 0), "10^2.0 m");
    assert_eq!(value_text(&tree, &table, 0, 1), "10^-3.0 s");
    assert_eq!(table.cell_text(0, 1), Some("10^-3.0 s"));
}

#[test]
fn table_structure_and_classes() {
    let mut tree = MemoryTree::new();
    let table = reference_table(&mut tree);
    let root = *table.table();
    assert_eq!(tree.tag(root), Some("table"));
    assert_eq!(tree.attribute(root, "id").as_deref(), Some("scales"));
    assert!(tree.has_class(&root, "scale-table"));

    let label = label_node(&tree, &table, 0, 0);
    assert!(tree.has_class(&label, "scale-label"));
    assert_eq!(tree.text(&label), "\\(a\\)");
}

#[test]
fn null_and_zero_cells_render_empty() {
    let mut tree = MemoryTree::new();
    let table = build_table(
        &mut tree,
        "t",
        strings(&[&["x", "y", "z"]]),
        vec![vec![None, Some(0.0), Some(f64::NAN)]],
        Vec::new(),
    )
    .unwrap();
    for col in 0..3 {
        assert_eq!(value_text(&tree, &table, 0, col), "");
    }
}

#[test]
fn ragged_grid_supported() {
    let mut tree = MemoryTree::new();
    let table = build_table(
        &mut tree,
        "t",
        strings(&[&["a", "b", "c"], &["d"]]),
        vec![vec![Some(1.0), Some(10.0), Some(100.0)], vec![Some(1e3)]],
        Vec::new(),
    )
    .unwrap();
    assert_eq!(table.registry().shape(), vec![3, 1]);
    assert_eq!(value_text(&tree, &table, 1, 0), "10^3.0");
}

#[test]
fn single_unit_covers_whole_row() {
    let mut tree = MemoryTree::new();
    let table = build_table(
        &mut tree,
        "t",
        strings(&[&["a", "b"], &["c", "d"]]),
        vec![vec![Some(10.0), Some(100.0)], vec![Some(1.0), Some(1.0)]],
        strings(&[&["m s<sup>-2</sup>"]]),
    )
    .unwrap();
    assert_eq!(table.cell_text(0, 1), Some("10^2.0 m s<sup>-2</sup>"));
    assert_eq!(table.cell_text(1, 0), Some("10^0.0"));
}

#[test]
fn unit_markup_is_not_escaped() {
    let mut tree = MemoryTree::new();
    let mut table = build_table(
        &mut tree,
        "t",
        strings(&[&["a"]]),
        vec![vec![Some(10.0)]],
        strings(&[&["m s<sup>-2</sup>"]]),
    )
    .unwrap();
    let html = tree.to_html(*table.table());
    assert!(html.contains("10^1.0 m s<sup>-2</sup>"));
    assert!(!html.contains("&lt;sup&gt;"));

    assert_eq!(table.update(&mut tree, vec![vec![Some(1000.0)]]), Ok(1));
    let html = tree.to_html(*table.table());
    assert!(html.contains("10^3.0 m s<sup>-2</sup>"));
    assert!(!html.contains("&lt;sup&gt;"));
}

#[test]
fn labels_are_delimited_inline_math() {
    let mut tree = MemoryTree::new();
    let table = build_table(
        &mut tree,
        "t",
        strings(&[&["\\frac{D w}{D t}", "\\(R_4\\)"]]),
        vec![vec![None, None]],
        Vec::new(),
    )
    .unwrap();
    assert_eq!(tree.text(&label_node(&tree, &table, 0, 0)), "\\(\\frac{D w}{D t}\\)");
    assert_eq!(tree.text(&label_node(&tree, &table, 0, 1)), "\\(R_4\\)");
}

#[test]
fn mismatched_values_rejected_at_build() {
    let mut tree = MemoryTree::new();
    let result = build_table(&mut tree, "t", strings(&[&["a", "b"]]), vec![vec![Some(1.0)]], Vec::new());
    assert!(matches!(
        result,
        Err(Error::Configuration(ConfigurationError::TableShape { ref table_id, .. })) if table_id == "t"
    ));
}

#[test]
fn empty_table_id_rejected() {
    let mut tree = MemoryTree::new();
    let result = build_table(&mut tree, "", strings(&[&["a"]]), vec![vec![None]], Vec::new());
    assert!(matches!(
        result,
        Err(Error::Configuration(ConfigurationError::MissingId { kind: "table" }))
    ));
}

// =============================================================
// Update
// =============================================================

#[test]
fn update_rewrites_values_and_leaves_labels() {
    let mut tree = MemoryTree::new();
    let mut table = reference_table(&mut tree);
    let label_a = label_node(&tree, &table, 0, 0);
    let label_b = label_node(&tree, &table, 0, 1);

    table.update(&mut tree, vec![vec![None, Some(5000.0)]]).unwrap();

    assert_eq!(value_text(&tree, &table, 0, 0), "");
    assert_eq!(value_text(&tree, &table, 0, 1), "10^3.7 s");
    assert_eq!(tree.text(&label_a), "a");
    assert_eq!(tree.text(&label_b), "b");
    assert_eq!(tree.content_writes(label_a), 1);
    assert_eq!(tree.content_writes(label_b), 1);
}

#[test]
fn update_writes_only_changed_cells() {
    let mut tree = MemoryTree::new();
    let mut table = reference_table(&mut tree);
    assert_eq!(table.update(&mut tree, vec![vec![Some(100.0), Some(5000.0)]]), Ok(1));
    assert_eq!(table.update(&mut tree, vec![vec![Some(100.0), Some(5000.0)]]), Ok(0));
    // Same order of magnitude after rounding: text unchanged, nothing written.
    assert_eq!(table.update(&mut tree, vec![vec![Some(101.0), Some(5001.0)]]), Ok(0));
    assert_eq!(table.values(), &vec![vec![Some(101.0), Some(5001.0)]]);
}

#[test]
fn shape_mismatch_keeps_last_render() {
    let mut tree = MemoryTree::new();
    let mut table = reference_table(&mut tree);
    let result = table.update(&mut tree, vec![vec![Some(1.0)], vec![Some(2.0)]]);
    assert!(matches!(result, Err(Error::ShapeMismatch(ref e)) if e.expected == "rows [2]" && e.actual == "rows [1, 1]"));
    assert_eq!(value_text(&tree, &table, 0, 0), "10^2.0 m");
    assert_eq!(table.values(), &vec![vec![Some(100.0), Some(0.001)]]);
}

#[test]
fn update_finds_cells_after_attachment() {
    let mut tree = MemoryTree::new();
    let root = tree.root();
    let mut table = reference_table(&mut tree);
    tree.append_child(&root, table.table()).unwrap();
    table.update(&mut tree, vec![vec![Some(1e6), None]]).unwrap();
    let cell = tree.element_by_id("scales-cell-0-0").unwrap();
    assert_eq!(tree.text(&cell), "10^6.0 m");
}

// =============================================================
// Inferred strip
// =============================================================

fn with_strip(tree: &mut MemoryTree) -> ScaleTable<NodeId> {
    let spec = TableSpec {
        table_id: "an".into(),
        labels: strings(&[&["u"]]),
        values: vec![vec![Some(1.0)]],
        units: Vec::new(),
        inferred_labels: vec!["T".into(), "H".into()],
        inferred_values: vec![Some(1000.0), None],
    };
    ScaleTable::build(tree, spec).unwrap()
}

#[test]
fn strip_renders_slots_without_units() {
    let mut tree = MemoryTree::new();
    let table = with_strip(&mut tree);
    assert!(table.has_inferred());
    let strip = *table.strip();
    assert_eq!(tree.attribute(strip, "id").as_deref(), Some("an-inferred"));
    let slot = tree.find_by_id(&strip, "an-inferred-0").unwrap();
    assert_eq!(tree.text(&slot), "\\(T\\) = 10^3.0");
    let empty = tree.find_by_id(&strip, "an-inferred-1").unwrap();
    assert_eq!(tree.text(&empty), "");
}

#[test]
fn strip_updates_changed_slots() {
    let mut tree = MemoryTree::new();
    let mut table = with_strip(&mut tree);
    assert_eq!(table.update_inferred(&mut tree, vec![Some(1000.0), Some(10.0)]), Ok(1));
    let slot = tree.find_by_id(table.strip(), "an-inferred-1").unwrap();
    assert_eq!(tree.text(&slot), "\\(H\\) = 10^1.0");
    assert_eq!(table.inferred_values(), &[Some(1000.0), Some(10.0)]);
}

#[test]
fn strip_length_mismatch_is_an_error() {
    let mut tree = MemoryTree::new();
    let mut table = with_strip(&mut tree);
    let result = table.update_inferred(&mut tree, vec![None]);
    assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    assert_eq!(table.inferred_values(), &[Some(1000.0), None]);
}

#[test]
fn strip_label_count_must_match_values() {
    let mut tree = MemoryTree::new();
    let spec = TableSpec {
        table_id: "an".into(),
        labels: strings(&[&["u"]]),
        values: vec![vec![None]],
        inferred_labels: vec!["T".into()],
        ..TableSpec::default()
    };
    assert!(matches!(
        ScaleTable::build(&mut tree, spec),
        Err(Error::Configuration(ConfigurationError::TableShape { .. }))
    ));
}

#[test]
fn table_spec_from_json() {
    let json = r#"{ "tableId": "t", "labels": [["a"]], "values": [[null]],
                   "inferredLabels": ["T"], "inferredValues": [12.0] }"#;
    let spec: TableSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec.values, vec![vec![None]]);
    assert!(spec.units.is_empty());
    assert_eq!(spec.inferred_values, vec![Some(12.0)]);
}
