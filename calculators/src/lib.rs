//! Scale-analysis calculators and the pages that present them.
//!
//! Each calculator is a pure function from physical slider values to a
//! [`controls::ValueGrid`]. A [`pages::Page`] pairs a calculator with the
//! log-scale sliders that feed it and the labels and units of its table.

pub mod anelastic;
pub mod buoyancy;
pub mod consts;
pub mod pages;

pub use pages::{Page, by_name};
