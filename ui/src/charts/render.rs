//! The presentation adapter: hand a spec to the SVG backend, recovering
//! exactly once when the backend's direct path refuses the spec.

use dioxus::prelude::*;

use super::scene::{self, ChartError, Node, Scene};
use super::spec::ChartSpec;

/// Render a spec to geometry.
///
/// The direct typed path is tried first. If — and only if — it reports
/// [`ChartError::FastPathUnavailable`], the spec is re-encoded through a
/// textual JSON round trip and the same call retried once. Every other
/// error class propagates untouched.
pub fn present(spec: &ChartSpec) -> Result<Scene, ChartError> {
    match scene::compose(spec) {
        Err(ChartError::FastPathUnavailable(reason)) => {
            tracing::warn!(%reason, title = %spec.title, "falling back to re-encoded chart spec");
            let normalized = reserialize(spec)?;
            scene::compose(&normalized)
        }
        outcome => outcome,
    }
}

/// Serialize to text, parse back into a plain JSON tree, and rebuild an
/// equivalent spec from that tree. The text form cannot carry non-finite
/// numbers, which is exactly what makes the rebuilt spec acceptable to the
/// direct path.
fn reserialize(spec: &ChartSpec) -> Result<ChartSpec, ChartError> {
    let text =
        serde_json::to_string(spec).map_err(|err| ChartError::Reencode(err.to_string()))?;
    let tree: serde_json::Value =
        serde_json::from_str(&text).map_err(|err| ChartError::Reencode(err.to_string()))?;
    serde_json::from_value(tree).map_err(|err| ChartError::Reencode(err.to_string()))
}

/// One chart panel. A failed chart renders as an error card and leaves the
/// rest of the page alone.
#[component]
pub fn Figure(spec: ChartSpec) -> Element {
    match present(&spec) {
        Ok(scene) => rsx! {
            figure { class: "figure",
                {render_scene(&scene)}
                if !scene.legend.is_empty() {
                    figcaption { class: "figure__legend",
                        for entry in scene.legend.iter() {
                            span { class: "figure__legend-entry",
                                span {
                                    class: "figure__legend-swatch",
                                    style: "background:{entry.color}",
                                }
                                span { class: "figure__legend-label", "{entry.label}" }
                                if let Some(value) = entry.value.as_ref() {
                                    span { class: "figure__legend-value", "{value}" }
                                }
                            }
                        }
                    }
                }
            }
        },
        Err(err) => rsx! {
            figure { class: "figure figure--error",
                p { class: "figure__error", "Couldn't draw “{spec.title}”: {err}" }
            }
        },
    }
}

fn render_scene(scene: &Scene) -> Element {
    rsx! {
        svg {
            class: "figure__svg",
            view_box: "0 0 {scene.width} {scene.height}",
            preserve_aspect_ratio: "xMidYMid meet",
            role: "img",
            for node in scene.nodes.iter() {
                {render_node(node)}
            }
        }
    }
}

fn render_node(node: &Node) -> Element {
    match node {
        Node::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => rsx! {
            rect { x: "{x}", y: "{y}", width: "{width}", height: "{height}", fill: "{fill}" }
        },
        Node::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
        } => rsx! {
            line { x1: "{x1}", y1: "{y1}", x2: "{x2}", y2: "{y2}", stroke: "{stroke}", stroke_width: "{width}" }
        },
        Node::Path {
            d,
            stroke,
            fill,
            width,
            opacity,
        } => {
            let stroke = stroke.as_deref().unwrap_or("none");
            let fill = fill.as_deref().unwrap_or("none");
            rsx! {
                path {
                    d: "{d}",
                    stroke: "{stroke}",
                    fill: "{fill}",
                    stroke_width: "{width}",
                    opacity: "{opacity}",
                    stroke_linejoin: "round",
                    stroke_linecap: "round",
                }
            }
        }
        Node::Circle { cx, cy, r, fill } => rsx! {
            circle { cx: "{cx}", cy: "{cy}", r: "{r}", fill: "{fill}" }
        },
        Node::Text {
            x,
            y,
            content,
            size,
            anchor,
            fill,
        } => {
            let anchor = anchor.svg_value();
            rsx! {
                text {
                    x: "{x}",
                    y: "{y}",
                    font_size: "{size}",
                    text_anchor: "{anchor}",
                    fill: "{fill}",
                    "{content}"
                }
            }
        }
    }
}
