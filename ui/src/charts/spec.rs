//! Chart specifications: plain value objects describing what to draw,
//! independent of how the SVG backend draws it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    MultiLine,
    Area,
    Bar,
    BarH,
    GroupedBar,
    StackedBar,
    Donut,
}

/// One named value column, aligned with the spec's categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(deserialize_with = "values_from_nullable")]
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// The textual form carries no non-finite numbers; anything that serialized
/// as `null` comes back as zero.
fn values_from_nullable<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|value| value.unwrap_or(0.0)).collect())
}

fn default_height() -> u32 {
    350
}

/// A complete, renderer-agnostic description of one chart. Built fresh from
/// a summary table on every recompute and consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    /// X-axis categories (or slice names for a donut).
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub theme: Theme,
    /// Optional per-category legend grouping for single-series bars
    /// (e.g. each top-10 game colored by its publisher).
    #[serde(default)]
    pub color_keys: Option<Vec<String>>,
    /// Color single-series bars by value along the theme's sequential ramp.
    #[serde(default)]
    pub value_colored: bool,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, theme: Theme) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            categories: Vec::new(),
            series: Vec::new(),
            theme,
            color_keys: None,
            value_colored: false,
            height: default_height(),
        }
    }

    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(Series::new(name, values));
        self
    }

    pub fn color_keys(mut self, keys: Vec<String>) -> Self {
        self.color_keys = Some(keys);
        self
    }

    pub fn value_colored(mut self) -> Self {
        self.value_colored = true;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Nothing to draw: no categories, no series, or only empty columns.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            || self.series.is_empty()
            || self.series.iter().all(|s| s.values.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_values_come_back_as_zero() {
        let json = r#"{"name":"Sales","values":[1.5,null,2.0]}"#;
        let series: Series = serde_json::from_str(json).unwrap();
        assert_eq!(series.values, vec![1.5, 0.0, 2.0]);
    }

    #[test]
    fn spec_round_trips_through_json() {
        let spec = ChartSpec::new(ChartKind::Line, "Trend", Theme::Dark)
            .axis_labels("Year", "Global Sales (millions)")
            .categories(vec!["2006".into(), "2007".into()])
            .series("Global Sales", vec![10.0, 12.5]);
        let text = serde_json::to_string(&spec).unwrap();
        let back: ChartSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn emptiness_checks_categories_and_series() {
        let empty = ChartSpec::new(ChartKind::Bar, "Nothing", Theme::Light);
        assert!(empty.is_empty());
        let full = ChartSpec::new(ChartKind::Bar, "Something", Theme::Light)
            .categories(vec!["A".into()])
            .series("Sales", vec![1.0]);
        assert!(!full.is_empty());
    }
}
