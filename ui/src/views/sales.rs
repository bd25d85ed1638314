use dioxus::prelude::*;

use super::cross_spec;
use crate::charts::{ChartKind, ChartSpec, Figure};
use crate::core::aggregate::{self, CrossDim};
use crate::core::filters;
use crate::session::{use_dataset, use_filters, use_theme};

#[component]
pub fn SalesAnalysis() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();
    let theme = use_theme()();

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let view = filters::apply(data, &filters_signal());

    let yearly = aggregate::by_year(&view);
    let trend = ChartSpec::new(
        ChartKind::Line,
        "Global Game Sales Trend Over Time (in millions)",
        theme,
    )
    .axis_labels("Year", "Global Sales (millions)")
    .categories(yearly.iter().map(|(year, _)| year.to_string()).collect())
    .series(
        "Global Sales",
        yearly.iter().map(|(_, sales)| *sales).collect(),
    );

    let leaders = aggregate::top_n(&view, 10);
    let top10 = ChartSpec::new(
        ChartKind::BarH,
        "Top 10 Best-Selling Games (Global Sales in millions)",
        theme,
    )
    .axis_labels("Global Sales (millions)", "Game Title")
    .categories(leaders.iter().map(|r| r.name.clone()).collect())
    .series(
        "Global Sales",
        leaders.iter().map(|r| r.global_sales).collect(),
    )
    .color_keys(leaders.iter().map(|r| r.publisher.clone()).collect())
    .height(500);

    let platforms = aggregate::by_platform(&view, 10);
    let platform_chart = ChartSpec::new(ChartKind::BarH, "Top 10 Platforms by Global Sales", theme)
        .axis_labels("Global Sales (millions)", "Platform")
        .categories(platforms.iter().map(|(name, _)| name.clone()).collect())
        .series(
            "Global Sales",
            platforms.iter().map(|(_, sales)| *sales).collect(),
        )
        .value_colored()
        .height(500);

    let publishers = aggregate::cross(&view, CrossDim::Publisher, 5);
    let publisher_chart = cross_spec(
        &publishers,
        ChartKind::MultiLine,
        "Sales by Top Publishers Over Time",
        theme,
    )
    .height(450);

    rsx! {
        section { class: "page page-sales",
            h1 { "Sales Analysis" }
            p { class: "page__hint",
                "This section shows sales trends and comparisons. Use the sidebar filters to narrow the slice behind every chart."
            }

            h2 { "Sales Trend Over Time" }
            Figure { spec: trend }

            div { class: "chart-grid",
                div {
                    h2 { "Top 10 Bestselling Games" }
                    Figure { spec: top10 }
                }
                div {
                    h2 { "Platform Comparison" }
                    Figure { spec: platform_chart }
                }
            }

            h2 { "Publisher Performance Over Time" }
            p { class: "page__hint",
                "How the five biggest publishers in the current slice stack up, year by year."
            }
            Figure { spec: publisher_chart }
        }
    }
}
