//! Chart specs and the SVG figure renderer.

pub mod render;
pub mod scene;
pub mod spec;

pub use render::{present, Figure};
pub use scene::ChartError;
pub use spec::{ChartKind, ChartSpec, Series};
