//! Composing a chart spec into SVG geometry.
//!
//! This is the backend's direct path: it consumes the typed spec as-is and
//! only accepts finite values. Specs that fail that precondition are
//! reported as [`ChartError::FastPathUnavailable`] so the adapter can decide
//! whether a re-encoded spec is worth retrying; structural problems are
//! plain render errors and are not retried.

use thiserror::Error;

use super::spec::{ChartKind, ChartSpec};
use crate::core::format;
use crate::core::theme::Palette;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The direct geometry pass cannot consume this spec. A textual
    /// round trip may yield an equivalent spec that it can.
    #[error("fast-path renderer unavailable: {0}")]
    FastPathUnavailable(String),
    /// The spec itself is unrenderable; retrying cannot help.
    #[error("chart cannot be rendered: {0}")]
    Render(String),
    #[error("chart spec re-encoding failed: {0}")]
    Reencode(String),
}

/// Fixed drawing width; charts scale to their container via the SVG viewBox.
pub const SCENE_WIDTH: f32 = 640.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn svg_value(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: String,
        width: f32,
    },
    Path {
        d: String,
        stroke: Option<String>,
        fill: Option<String>,
        width: f32,
        opacity: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: String,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        size: f32,
        anchor: Anchor,
        fill: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub value: Option<String>,
}

/// Resolved geometry for one chart, ready to be emitted as SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<Node>,
    pub legend: Vec<LegendEntry>,
    pub placeholder: bool,
}

pub fn compose(spec: &ChartSpec) -> Result<Scene, ChartError> {
    ensure_finite(spec)?;
    ensure_shape(spec)?;

    if spec.is_empty() {
        return Ok(placeholder(spec));
    }

    match spec.kind {
        ChartKind::Donut => donut(spec),
        ChartKind::BarH => horizontal_bars(spec),
        _ => xy_chart(spec),
    }
}

fn ensure_finite(spec: &ChartSpec) -> Result<(), ChartError> {
    for series in &spec.series {
        if series.values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::FastPathUnavailable(format!(
                "series '{}' carries a non-finite value",
                series.name
            )));
        }
    }
    Ok(())
}

fn ensure_shape(spec: &ChartSpec) -> Result<(), ChartError> {
    for series in &spec.series {
        if series.values.len() != spec.categories.len() {
            return Err(ChartError::Render(format!(
                "series '{}' has {} values for {} categories",
                series.name,
                series.values.len(),
                spec.categories.len()
            )));
        }
    }
    if let Some(keys) = &spec.color_keys {
        if keys.len() != spec.categories.len() {
            return Err(ChartError::Render(format!(
                "{} color keys for {} categories",
                keys.len(),
                spec.categories.len()
            )));
        }
    }
    if spec.kind == ChartKind::Donut && spec.series.len() > 1 {
        return Err(ChartError::Render(
            "a donut takes exactly one series".into(),
        ));
    }
    Ok(())
}

fn placeholder(spec: &ChartSpec) -> Scene {
    let palette = spec.theme.palette();
    let height = spec.height as f32;
    Scene {
        width: SCENE_WIDTH,
        height,
        nodes: vec![Node::Text {
            x: SCENE_WIDTH / 2.0,
            y: height / 2.0,
            content: "No data for the current filters".into(),
            size: 13.0,
            anchor: Anchor::Middle,
            fill: palette.muted.to_string(),
        }],
        legend: Vec::new(),
        placeholder: true,
    }
}

struct Frame {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Frame {
    fn span_x(&self) -> f32 {
        self.right - self.left
    }

    fn span_y(&self) -> f32 {
        self.bottom - self.top
    }
}

fn title_node(spec: &ChartSpec, palette: &Palette, x: f32) -> Node {
    Node::Text {
        x,
        y: 18.0,
        content: spec.title.clone(),
        size: 14.0,
        anchor: Anchor::Start,
        fill: palette.text.to_string(),
    }
}

/// Vertical-axis charts: lines, areas, and the three bar variants.
fn xy_chart(spec: &ChartSpec) -> Result<Scene, ChartError> {
    let palette = spec.theme.palette();
    let height = spec.height as f32;
    let frame = Frame {
        left: 56.0,
        right: SCENE_WIDTH - 16.0,
        top: 34.0,
        bottom: height - 44.0,
    };
    let n = spec.categories.len();
    let band = frame.span_x() / n as f32;

    let stacked = matches!(spec.kind, ChartKind::StackedBar | ChartKind::Area);
    let raw_max = if stacked {
        (0..n)
            .map(|i| spec.series.iter().map(|s| s.values[i]).sum::<f64>())
            .fold(0.0_f64, f64::max)
    } else {
        spec.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
    };
    let y_max = nice_ceil(raw_max * 1.05);

    let mut nodes = vec![title_node(spec, palette, frame.left)];
    let y_of = |value: f64| frame.bottom - (value / y_max) as f32 * frame.span_y();
    let x_mid = |index: usize| frame.left + (index as f32 + 0.5) * band;

    // Horizontal grid plus tick labels.
    for tick in 0..=4 {
        let value = y_max * f64::from(tick) / 4.0;
        let y = y_of(value);
        nodes.push(Node::Line {
            x1: frame.left,
            y1: y,
            x2: frame.right,
            y2: y,
            stroke: palette.grid.to_string(),
            width: 1.0,
        });
        nodes.push(Node::Text {
            x: frame.left - 8.0,
            y: y + 4.0,
            content: format::axis_tick(value),
            size: 11.0,
            anchor: Anchor::End,
            fill: palette.muted.to_string(),
        });
    }

    // Category labels, thinned so long year runs stay readable.
    let step = (n + 9) / 10;
    for (index, label) in spec.categories.iter().enumerate() {
        if index % step != 0 {
            continue;
        }
        nodes.push(Node::Text {
            x: x_mid(index),
            y: frame.bottom + 16.0,
            content: label.clone(),
            size: 11.0,
            anchor: Anchor::Middle,
            fill: palette.muted.to_string(),
        });
    }
    if !spec.x_label.is_empty() {
        nodes.push(Node::Text {
            x: frame.left + frame.span_x() / 2.0,
            y: frame.bottom + 34.0,
            content: spec.x_label.clone(),
            size: 12.0,
            anchor: Anchor::Middle,
            fill: palette.muted.to_string(),
        });
    }
    if !spec.y_label.is_empty() {
        nodes.push(Node::Text {
            x: frame.left,
            y: frame.top - 6.0,
            content: spec.y_label.clone(),
            size: 11.0,
            anchor: Anchor::Start,
            fill: palette.muted.to_string(),
        });
    }

    let mut legend = Vec::new();
    match spec.kind {
        ChartKind::Line | ChartKind::MultiLine => {
            for (s, series) in spec.series.iter().enumerate() {
                let color = palette.series_color(s).to_string();
                let points: Vec<(f32, f32)> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (x_mid(i), y_of(*v)))
                    .collect();
                nodes.push(Node::Path {
                    d: polyline(&points),
                    stroke: Some(color.clone()),
                    fill: None,
                    width: if spec.kind == ChartKind::Line { 3.0 } else { 2.0 },
                    opacity: 1.0,
                });
                if spec.kind == ChartKind::Line {
                    for (x, y) in &points {
                        nodes.push(Node::Circle {
                            cx: *x,
                            cy: *y,
                            r: 3.0,
                            fill: color.clone(),
                        });
                    }
                }
                if spec.series.len() > 1 {
                    legend.push(LegendEntry {
                        label: series.name.clone(),
                        color,
                        value: None,
                    });
                }
            }
        }
        ChartKind::Area => {
            // Stacked bands, bottom series first.
            let mut floor = vec![0.0_f64; n];
            for (s, series) in spec.series.iter().enumerate() {
                let color = palette.series_color(s).to_string();
                let ceiling: Vec<f64> = floor
                    .iter()
                    .zip(&series.values)
                    .map(|(base, v)| base + v)
                    .collect();
                let mut points: Vec<(f32, f32)> = ceiling
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (x_mid(i), y_of(*v)))
                    .collect();
                let upper = polyline(&points);
                let lower: Vec<(f32, f32)> = floor
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, v)| (x_mid(i), y_of(*v)))
                    .collect();
                points.extend(lower);
                nodes.push(Node::Path {
                    d: format!("{} Z", polyline(&points)),
                    stroke: None,
                    fill: Some(color.clone()),
                    width: 0.0,
                    opacity: 0.45,
                });
                nodes.push(Node::Path {
                    d: upper,
                    stroke: Some(color.clone()),
                    fill: None,
                    width: 1.5,
                    opacity: 1.0,
                });
                legend.push(LegendEntry {
                    label: series.name.clone(),
                    color,
                    value: None,
                });
                floor = ceiling;
            }
        }
        ChartKind::Bar => {
            let series = &spec.series[0];
            let bar_width = band * 0.7;
            let colors = category_colors(spec, palette, &series.values, raw_max, &mut legend);
            for (i, value) in series.values.iter().enumerate() {
                let y = y_of(*value);
                nodes.push(Node::Rect {
                    x: x_mid(i) - bar_width / 2.0,
                    y,
                    width: bar_width,
                    height: frame.bottom - y,
                    fill: colors[i].clone(),
                });
            }
        }
        ChartKind::GroupedBar => {
            let groups = spec.series.len() as f32;
            let slot = band * 0.8 / groups;
            for (s, series) in spec.series.iter().enumerate() {
                let color = palette.series_color(s).to_string();
                for (i, value) in series.values.iter().enumerate() {
                    let x = frame.left + i as f32 * band + band * 0.1 + s as f32 * slot;
                    let y = y_of(*value);
                    nodes.push(Node::Rect {
                        x,
                        y,
                        width: slot * 0.9,
                        height: frame.bottom - y,
                        fill: color.clone(),
                    });
                }
                legend.push(LegendEntry {
                    label: series.name.clone(),
                    color,
                    value: None,
                });
            }
        }
        ChartKind::StackedBar => {
            let bar_width = band * 0.7;
            let mut floor = vec![0.0_f64; n];
            for (s, series) in spec.series.iter().enumerate() {
                let color = palette.series_color(s).to_string();
                for (i, value) in series.values.iter().enumerate() {
                    let base = y_of(floor[i]);
                    let top = y_of(floor[i] + value);
                    nodes.push(Node::Rect {
                        x: x_mid(i) - bar_width / 2.0,
                        y: top,
                        width: bar_width,
                        height: base - top,
                        fill: color.clone(),
                    });
                    floor[i] += value;
                }
                legend.push(LegendEntry {
                    label: series.name.clone(),
                    color,
                    value: None,
                });
            }
        }
        ChartKind::BarH | ChartKind::Donut => unreachable!("dispatched before xy_chart"),
    }

    Ok(Scene {
        width: SCENE_WIDTH,
        height,
        nodes,
        legend,
        placeholder: false,
    })
}

/// Horizontal ranking bars: categories down the left, values to the right.
fn horizontal_bars(spec: &ChartSpec) -> Result<Scene, ChartError> {
    let palette = spec.theme.palette();
    let height = spec.height as f32;
    let frame = Frame {
        left: 150.0,
        right: SCENE_WIDTH - 70.0,
        top: 34.0,
        bottom: height - 30.0,
    };
    let series = &spec.series[0];
    let n = spec.categories.len();
    let row = frame.span_y() / n as f32;
    let bar_height = row * 0.68;

    let raw_max = series.values.iter().copied().fold(0.0_f64, f64::max);
    let x_max = nice_ceil(raw_max * 1.05);
    let x_of = |value: f64| frame.left + (value / x_max) as f32 * frame.span_x();

    let mut nodes = vec![title_node(spec, palette, 16.0)];
    for tick in 1..=4 {
        let value = x_max * f64::from(tick) / 4.0;
        let x = x_of(value);
        nodes.push(Node::Line {
            x1: x,
            y1: frame.top,
            x2: x,
            y2: frame.bottom,
            stroke: palette.grid.to_string(),
            width: 1.0,
        });
        nodes.push(Node::Text {
            x,
            y: frame.bottom + 14.0,
            content: format::axis_tick(value),
            size: 11.0,
            anchor: Anchor::Middle,
            fill: palette.muted.to_string(),
        });
    }

    let mut legend = Vec::new();
    let colors = category_colors(spec, palette, &series.values, raw_max, &mut legend);
    for (i, value) in series.values.iter().enumerate() {
        let y = frame.top + i as f32 * row + (row - bar_height) / 2.0;
        let end = x_of(*value);
        nodes.push(Node::Rect {
            x: frame.left,
            y,
            width: end - frame.left,
            height: bar_height,
            fill: colors[i].clone(),
        });
        nodes.push(Node::Text {
            x: frame.left - 8.0,
            y: y + bar_height / 2.0 + 4.0,
            content: ellipsize(&spec.categories[i], 24),
            size: 11.0,
            anchor: Anchor::End,
            fill: palette.text.to_string(),
        });
        nodes.push(Node::Text {
            x: end + 6.0,
            y: y + bar_height / 2.0 + 4.0,
            content: format::two_decimals(*value),
            size: 11.0,
            anchor: Anchor::Start,
            fill: palette.muted.to_string(),
        });
    }

    Ok(Scene {
        width: SCENE_WIDTH,
        height,
        nodes,
        legend,
        placeholder: false,
    })
}

fn donut(spec: &ChartSpec) -> Result<Scene, ChartError> {
    let palette = spec.theme.palette();
    let height = spec.height as f32;
    let series = &spec.series[0];
    let total: f64 = series.values.iter().sum();
    if total <= 0.0 {
        return Ok(placeholder(spec));
    }

    let cx = SCENE_WIDTH / 2.0;
    let cy = (height + 24.0) / 2.0;
    let outer = (height / 2.0 - 40.0).max(40.0);
    let inner = outer * 0.4;

    let mut nodes = vec![title_node(spec, palette, 16.0)];
    let mut legend = Vec::new();
    let mut angle = -std::f32::consts::FRAC_PI_2;
    for (i, value) in series.values.iter().enumerate() {
        let color = palette.series_color(i).to_string();
        let share = value / total;
        if *value > 0.0 {
            let sweep = (share * f64::from(std::f32::consts::TAU)) as f32;
            nodes.push(Node::Path {
                d: annular_slice(cx, cy, inner, outer, angle, angle + sweep),
                stroke: None,
                fill: Some(color.clone()),
                width: 0.0,
                opacity: 1.0,
            });
            angle += sweep;
        }
        legend.push(LegendEntry {
            label: spec.categories[i].clone(),
            color,
            value: Some(format!(
                "{} ({}%)",
                format::two_decimals(*value),
                format::one_decimal(share * 100.0)
            )),
        });
    }

    Ok(Scene {
        width: SCENE_WIDTH,
        height,
        nodes,
        legend,
        placeholder: false,
    })
}

/// Per-bar fills for single-series bar charts, along with any legend the
/// coloring implies.
fn category_colors(
    spec: &ChartSpec,
    palette: &Palette,
    values: &[f64],
    raw_max: f64,
    legend: &mut Vec<LegendEntry>,
) -> Vec<String> {
    if spec.value_colored {
        let max = if raw_max > 0.0 { raw_max } else { 1.0 };
        return values.iter().map(|v| palette.ramp_color(v / max)).collect();
    }
    if let Some(keys) = &spec.color_keys {
        let mut assigned: indexmap::IndexMap<&str, String> = indexmap::IndexMap::new();
        for key in keys {
            let next = assigned.len();
            assigned
                .entry(key.as_str())
                .or_insert_with(|| palette.series_color(next).to_string());
        }
        for (key, color) in &assigned {
            legend.push(LegendEntry {
                label: (*key).to_string(),
                color: color.clone(),
                value: None,
            });
        }
        return keys.iter().map(|key| assigned[key.as_str()].clone()).collect();
    }
    values
        .iter()
        .map(|_| palette.series_color(0).to_string())
        .collect()
}

fn ellipsize(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn polyline(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (index, (x, y)) in points.iter().enumerate() {
        let op = if index == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{op}{x:.1},{y:.1} "));
    }
    d.trim_end().to_string()
}

fn annular_slice(cx: f32, cy: f32, inner: f32, outer: f32, from: f32, to: f32) -> String {
    let large = if to - from > std::f32::consts::PI { 1 } else { 0 };
    let (x0, y0) = polar(cx, cy, outer, from);
    let (x1, y1) = polar(cx, cy, outer, to);
    let (x2, y2) = polar(cx, cy, inner, to);
    let (x3, y3) = polar(cx, cy, inner, from);
    format!(
        "M{x0:.1},{y0:.1} A{outer:.1},{outer:.1} 0 {large} 1 {x1:.1},{y1:.1} \
         L{x2:.1},{y2:.1} A{inner:.1},{inner:.1} 0 {large} 0 {x3:.1},{y3:.1} Z"
    )
}

fn polar(cx: f32, cy: f32, r: f32, angle: f32) -> (f32, f32) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Round up to a 1/2/2.5/5 multiple of a power of ten.
fn nice_ceil(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let exponent = value.log10().floor() as i32;
    let base = 10.0_f64.powi(exponent);
    for multiple in [1.0, 2.0, 2.5, 5.0, 10.0] {
        if multiple * base >= value {
            return multiple * base;
        }
    }
    10.0 * base
}
