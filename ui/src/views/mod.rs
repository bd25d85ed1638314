//! One view per dashboard tab.

mod genres;
mod regions;
mod sales;
mod story;

pub use genres::GenreInsights;
pub use regions::GeographicSales;
pub use sales::SalesAnalysis;
pub use story::DataStorytelling;

use crate::charts::{ChartKind, ChartSpec};
use crate::core::aggregate::CrossTab;
use crate::core::theme::Theme;

/// Year cross-tab to chart spec: years along the x axis, one series per
/// leading category.
fn cross_spec(tab: &CrossTab, kind: ChartKind, title: &str, theme: Theme) -> ChartSpec {
    let mut spec = ChartSpec::new(kind, title, theme)
        .axis_labels("Year", "Global Sales (millions)")
        .categories(tab.years.iter().map(u16::to_string).collect());
    for (name, values) in &tab.series {
        spec = spec.series(name.clone(), values.clone());
    }
    spec
}
