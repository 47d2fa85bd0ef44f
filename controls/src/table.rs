//! Scale/value table: a ragged grid of labelled order-of-magnitude cells.
//!
//! The grid is rendered once at construction. Afterwards only value cells
//! are rewritten, and only those whose formatted text actually changed;
//! label cells are never touched again. Cells are addressed through a
//! [`CellRegistry`] built at construction time.
//!
//! Labels are written as inline math. Value cells are written as markup so
//! units such as `s<sup>-2</sup>` display as superscripts.
//!
//! An optional inferred-scale strip renders next to the grid as
//! `label = 10^x` slots joined by commas, with no units.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    INFERRED_SEPARATOR_CLASS, INFERRED_STRIP_CLASS, SCALE_LABEL_CLASS, SCALE_TABLE_CLASS, SCALE_VALUE_CLASS,
};
use crate::error::{ConfigurationError, Error, ShapeMismatchError, TreeError};
use crate::format::{format_inferred, format_scale, inline_math};
use crate::registry::{CellId, CellRegistry};
use crate::tree::UiTree;

/// Row-major grid of cell values; `None` means "undefined here".
pub type ValueGrid = Vec<Vec<Option<f64>>>;

/// Everything needed to construct a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub table_id: String,
    /// Term labels; row lengths define the grid shape.
    pub labels: Vec<Vec<String>>,
    pub values: ValueGrid,
    /// Units per cell; a one-entry row applies to every cell of that row,
    /// missing entries render without a unit.
    #[serde(default)]
    pub units: Vec<Vec<String>>,
    #[serde(default)]
    pub inferred_labels: Vec<String>,
    #[serde(default)]
    pub inferred_values: Vec<Option<f64>>,
}

/// A rendered scale table bound to its nodes.
#[derive(Debug, Clone)]
pub struct ScaleTable<N> {
    registry: CellRegistry,
    labels: Vec<Vec<String>>,
    units: Vec<Vec<String>>,
    values: ValueGrid,
    rendered: Vec<Vec<String>>,
    inferred_labels: Vec<String>,
    inferred_values: Vec<Option<f64>>,
    rendered_inferred: Vec<String>,
    table: N,
    strip: N,
}

/// Construct a table without an inferred strip.
///
/// # Errors
///
/// See [`ScaleTable::build`].
pub fn build_table<T: UiTree>(
    tree: &mut T,
    table_id: &str,
    labels: Vec<Vec<String>>,
    values: ValueGrid,
    units: Vec<Vec<String>>,
) -> Result<ScaleTable<T::Node>, Error> {
    let spec = TableSpec { table_id: table_id.to_owned(), labels, values, units, ..TableSpec::default() };
    ScaleTable::build(tree, spec)
}

fn shape_of<T>(grid: &[Vec<T>]) -> Vec<usize> {
    grid.iter().map(Vec::len).collect()
}

impl<N: Clone> ScaleTable<N> {
    /// Render the full grid and strip (detached; append [`Self::table`] and
    /// [`Self::strip`] where they belong).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TableShape`] if values do not match the
    /// label grid, or inferred values do not match inferred labels.
    pub fn build<T: UiTree<Node = N>>(tree: &mut T, spec: TableSpec) -> Result<Self, Error> {
        if spec.table_id.is_empty() {
            return Err(ConfigurationError::MissingId { kind: "table" }.into());
        }
        let shape = shape_of(&spec.labels);
        if shape_of(&spec.values) != shape {
            return Err(ConfigurationError::TableShape {
                table_id: spec.table_id,
                detail: format!("labels have rows {shape:?} but values have rows {:?}", shape_of(&spec.values)),
            }
            .into());
        }
        if spec.inferred_labels.len() != spec.inferred_values.len() {
            return Err(ConfigurationError::TableShape {
                table_id: spec.table_id,
                detail: format!(
                    "{} inferred labels but {} inferred values",
                    spec.inferred_labels.len(),
                    spec.inferred_values.len()
                ),
            }
            .into());
        }

        let registry = CellRegistry::new(&spec.table_id, &shape, spec.inferred_labels.len());
        let table = tree.create_element("table")?;
        tree.set_attribute(&table, "id", &spec.table_id)?;
        tree.add_class(&table, SCALE_TABLE_CLASS)?;
        let body = tree.create_element("tbody")?;
        tree.append_child(&table, &body)?;

        let mut rendered = Vec::with_capacity(shape.len());
        for (r, label_row) in spec.labels.iter().enumerate() {
            let tr = tree.create_element("tr")?;
            let mut rendered_row = Vec::with_capacity(label_row.len());
            for (c, label) in label_row.iter().enumerate() {
                let text = format_scale(spec.values[r][c], unit_at(&spec.units, r, c));
                let id = registry.cell(r, c).ok_or_else(|| missing(&spec.table_id, r, c))?;
                let td = tree.create_element("td")?;
                let label_el = tree.create_element("span")?;
                tree.add_class(&label_el, SCALE_LABEL_CLASS)?;
                tree.set_inner_html(&label_el, &inline_math(label))?;
                let value_el = tree.create_element("span")?;
                tree.add_class(&value_el, SCALE_VALUE_CLASS)?;
                tree.set_attribute(&value_el, "id", id.as_str())?;
                tree.set_inner_html(&value_el, &text)?;
                tree.append_child(&td, &label_el)?;
                tree.append_child(&td, &value_el)?;
                tree.append_child(&tr, &td)?;
                rendered_row.push(text);
            }
            tree.append_child(&body, &tr)?;
            rendered.push(rendered_row);
        }

        let strip = tree.create_element("div")?;
        tree.set_attribute(&strip, "id", &format!("{}-inferred", spec.table_id))?;
        tree.add_class(&strip, INFERRED_STRIP_CLASS)?;
        let mut rendered_inferred = Vec::with_capacity(spec.inferred_labels.len());
        for (i, (label, value)) in spec.inferred_labels.iter().zip(&spec.inferred_values).enumerate() {
            if i > 0 {
                let sep = tree.create_element("span")?;
                tree.add_class(&sep, INFERRED_SEPARATOR_CLASS)?;
                tree.set_text(&sep, ", ")?;
                tree.append_child(&strip, &sep)?;
            }
            let id = registry.inferred(i).ok_or_else(|| missing(&spec.table_id, 0, i))?;
            let slot = tree.create_element("span")?;
            tree.set_attribute(&slot, "id", id.as_str())?;
            let text = format_inferred(&inline_math(label), *value);
            tree.set_inner_html(&slot, &text)?;
            tree.append_child(&strip, &slot)?;
            rendered_inferred.push(text);
        }

        log::debug!("built scale table `{}` with rows {shape:?}", spec.table_id);
        Ok(Self {
            registry,
            labels: spec.labels,
            units: spec.units,
            values: spec.values,
            rendered,
            inferred_labels: spec.inferred_labels,
            inferred_values: spec.inferred_values,
            rendered_inferred,
            table,
            strip,
        })
    }

    /// Replace the value model and re-render the cells whose text changed.
    ///
    /// Shape is checked before anything is written, so a mismatched result
    /// leaves the previous render intact. Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `values` does not match the grid,
    /// or a tree error if a registered cell cannot be found.
    pub fn update<T: UiTree<Node = N>>(&mut self, tree: &mut T, values: ValueGrid) -> Result<usize, Error> {
        let expected = self.registry.shape();
        let actual = shape_of(&values);
        if expected != actual {
            return Err(ShapeMismatchError {
                table_id: self.registry.table_id().to_owned(),
                expected: format!("rows {expected:?}"),
                actual: format!("rows {actual:?}"),
            }
            .into());
        }

        let mut written = 0;
        for (r, row) in values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let text = format_scale(*value, unit_at(&self.units, r, c));
                if self.rendered[r][c] == text {
                    continue;
                }
                let id = self.registry.cell(r, c).ok_or_else(|| missing(self.registry.table_id(), r, c))?;
                let node = self.lookup(tree, id)?;
                tree.set_inner_html(&node, &text)?;
                self.rendered[r][c] = text;
                written += 1;
            }
        }
        self.values = values;
        Ok(written)
    }

    /// Replace the inferred-scale values and re-render changed slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the length differs from the strip.
    pub fn update_inferred<T: UiTree<Node = N>>(&mut self, tree: &mut T, values: Vec<Option<f64>>) -> Result<usize, Error> {
        if values.len() != self.registry.inferred_len() {
            return Err(ShapeMismatchError {
                table_id: self.registry.table_id().to_owned(),
                expected: format!("{} inferred scales", self.registry.inferred_len()),
                actual: format!("{} inferred scales", values.len()),
            }
            .into());
        }

        let mut written = 0;
        for (i, value) in values.iter().enumerate() {
            let text = format_inferred(&inline_math(&self.inferred_labels[i]), *value);
            if self.rendered_inferred[i] == text {
                continue;
            }
            let id = self.registry.inferred(i).ok_or_else(|| missing(self.registry.table_id(), 0, i))?;
            let node = self.lookup_in(tree, &self.strip, id)?;
            tree.set_inner_html(&node, &text)?;
            self.rendered_inferred[i] = text;
            written += 1;
        }
        self.inferred_values = values;
        Ok(written)
    }

    fn lookup<T: UiTree<Node = N>>(&self, tree: &T, id: &CellId) -> Result<N, TreeError> {
        self.lookup_in(tree, &self.table, id)
    }

    fn lookup_in<T: UiTree<Node = N>>(&self, tree: &T, root: &N, id: &CellId) -> Result<N, TreeError> {
        tree.find_by_id(root, id.as_str())
            .ok_or_else(|| TreeError::UnknownNode(id.to_string()))
    }

    /// The `<table>` element.
    #[must_use]
    pub fn table(&self) -> &N {
        &self.table
    }

    /// The inferred-scale strip element.
    #[must_use]
    pub fn strip(&self) -> &N {
        &self.strip
    }

    #[must_use]
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    #[must_use]
    pub fn table_id(&self) -> &str {
        self.registry.table_id()
    }

    /// Current value model.
    #[must_use]
    pub fn values(&self) -> &ValueGrid {
        &self.values
    }

    #[must_use]
    pub fn labels(&self) -> &[Vec<String>] {
        &self.labels
    }

    /// Text currently displayed in value cell `(row, col)`.
    #[must_use]
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.rendered.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Displayed text of every value cell, row-major.
    #[must_use]
    pub fn rendered(&self) -> &[Vec<String>] {
        &self.rendered
    }

    #[must_use]
    pub fn inferred_values(&self) -> &[Option<f64>] {
        &self.inferred_values
    }

    #[must_use]
    pub fn inferred_labels(&self) -> &[String] {
        &self.inferred_labels
    }

    /// Whether this table has an inferred-scale strip.
    #[must_use]
    pub fn has_inferred(&self) -> bool {
        self.registry.inferred_len() > 0
    }
}

/// Unit of cell `(row, col)`. A unit row with a single entry covers the whole row.
fn unit_at(units: &[Vec<String>], row: usize, col: usize) -> &str {
    units
        .get(row)
        .and_then(|r| match r.as_slice() {
            [only] => Some(only),
            _ => r.get(col),
        })
        .map_or("", String::as_str)
}

fn missing(table_id: &str, row: usize, col: usize) -> TreeError {
    TreeError::UnknownNode(format!("{table_id}[{row}][{col}]"))
}
