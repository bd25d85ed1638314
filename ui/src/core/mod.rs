//! Cross-platform core: the data pipeline behind every chart.

pub mod aggregate;
pub mod dataset;
pub mod export;
pub mod facts;
pub mod filters;
pub mod format;
pub mod theme;
