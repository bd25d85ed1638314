use std::collections::HashSet;

use dioxus::prelude::*;

use crate::core::{filters, format};
use crate::session::{use_dataset, use_filters};

/// The headline numbers above the tabs, recomputed from the filtered view on
/// every interaction, plus a one-line recap of any active narrowing.
#[component]
pub fn OverviewMetrics() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let snapshot = filters_signal();
    let view = filters::apply(data, &snapshot);

    let total_games = format::count(view.len());
    let global_sales: f64 = view.records().iter().map(|r| r.global_sales).sum();
    let global_sales = format::sales_millions(global_sales);
    let platform_count = view
        .records()
        .iter()
        .map(|r| r.platform.as_str())
        .collect::<HashSet<_>>()
        .len();
    let publisher_count = view
        .records()
        .iter()
        .map(|r| r.publisher.as_str())
        .collect::<HashSet<_>>()
        .len();

    let active = snapshot.summary(data);
    let active_line = active.join(" | ");

    rsx! {
        section { class: "overview",
            div { class: "overview__metrics",
                div { class: "metric-card",
                    span { class: "metric-card__value", "{total_games}" }
                    span { class: "metric-card__label", "Total Games" }
                }
                div { class: "metric-card",
                    span { class: "metric-card__value", "{global_sales}" }
                    span { class: "metric-card__label", "Global Sales" }
                }
                div { class: "metric-card",
                    span { class: "metric-card__value", "{platform_count}" }
                    span { class: "metric-card__label", "Platforms" }
                }
                div { class: "metric-card",
                    span { class: "metric-card__value", "{publisher_count}" }
                    span { class: "metric-card__label", "Publishers" }
                }
            }

            if !active.is_empty() {
                p { class: "overview__filters", "Current filters: {active_line}" }
            }
        }
    }
}
