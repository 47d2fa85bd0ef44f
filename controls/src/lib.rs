//! Reactive control panels and scale tables for interactive physics pages.
//!
//! Page authors describe sliders, checkbox groups, radio groups and text
//! inputs as data. This crate renders them into a host UI tree, keeps every
//! slider's displayed output in sync with its value, toggles between
//! dimensional and non-dimensional coordinates, and drives an
//! order-of-magnitude scale table from a pure calculation over the sliders.
//! It is compiled to WebAssembly for the browser ([`web`]) and used natively
//! by the static page renderer and the tests ([`tree::MemoryTree`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`descriptor`] | Control descriptors, overrides and validation |
//! | [`factory`] | Builds one rendered control row from a descriptor |
//! | [`panel`] | Panel assembler and the coordinate-mode toggle |
//! | [`table`] | Scale/value table and its inferred-scale strip |
//! | [`registry`] | Stable ids for table cells |
//! | [`binder`] | Recompute binder between sliders and a table |
//! | [`format`] | Output and scale formatting rules |
//! | [`presets`] | Ready-made gravity-wave descriptor sets |
//! | [`config`] | `PhysicalScaleConfig` and derived slider ranges |
//! | [`tree`] | Host UI-tree trait and the in-memory tree |
//! | [`dom`] | `web-sys` implementation of the UI tree |
//! | [`typeset`] | Math typesetting collaborator |
//! | [`web`] | `wasm-bindgen` entry points |
//! | [`error`] | Error types |
//! | [`consts`] | Class names, id suffixes and physical defaults |

pub mod binder;
pub mod config;
pub mod consts;
pub mod descriptor;
pub mod dom;
pub mod error;
pub mod factory;
pub mod format;
pub mod panel;
pub mod presets;
pub mod registry;
pub mod table;
pub mod tree;
pub mod typeset;
pub mod web;

pub use binder::{Binding, CalcFn, InferFn, bind};
pub use config::PhysicalScaleConfig;
pub use descriptor::{ControlDescriptor, Override, Overrides, SliderScale, SliderSpec};
pub use error::{ConfigurationError, Error, ShapeMismatchError, TreeError};
pub use panel::{CoordinateMode, Panel, PanelBuilder, build_panel};
pub use table::{ScaleTable, TableSpec, ValueGrid, build_table};
pub use tree::{MemoryTree, UiTree};
