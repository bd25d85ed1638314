use dioxus::prelude::*;

use crate::charts::{ChartKind, ChartSpec, Figure};
use crate::core::aggregate;
use crate::core::filters;
use crate::session::{use_dataset, use_filters, use_theme};

#[component]
pub fn GeographicSales() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();
    let theme = use_theme()();

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let view = filters::apply(data, &filters_signal());

    let regions = aggregate::by_region(&view);
    let labeled = regions.labeled();
    let donut = ChartSpec::new(
        ChartKind::Donut,
        "Global Sales Distribution by Region",
        theme,
    )
    .categories(labeled.iter().map(|(label, _)| label.to_string()).collect())
    .series("Sales", labeled.iter().map(|(_, sales)| *sales).collect())
    .height(380);

    let tastes = aggregate::genre_by_region_top(&view, 5);
    let mut tastes_chart = ChartSpec::new(ChartKind::GroupedBar, "Top Genres by Region", theme)
        .axis_labels("Genre", "Sales (millions)")
        .categories(tastes.genres.clone());
    for (label, values) in &tastes.regions {
        tastes_chart = tastes_chart.series(*label, values.clone());
    }

    let trend = aggregate::by_year_regional(&view);
    let mut trend_chart = ChartSpec::new(ChartKind::MultiLine, "Regional Sales Over Time", theme)
        .axis_labels("Year", "Sales (millions)")
        .categories(trend.years.iter().map(u16::to_string).collect());
    for (label, values) in &trend.regions {
        trend_chart = trend_chart.series(*label, values.clone());
    }

    let mut estimates = aggregate::country_estimates(&regions);
    estimates.sort_by(|a, b| b.sales.total_cmp(&a.sales));
    let map_chart = ChartSpec::new(
        ChartKind::BarH,
        "Estimated Video Game Sales Distribution Worldwide (millions)",
        theme,
    )
    .categories(estimates.iter().map(|e| e.country.to_string()).collect())
    .series("Sales", estimates.iter().map(|e| e.sales).collect())
    .value_colored()
    .height(420);

    rsx! {
        section { class: "page page-regions",
            h1 { "Geographic Sales" }

            h2 { "Regional Sales Comparison" }
            Figure { spec: donut }

            h2 { "Regional Gaming Preferences" }
            div { class: "chart-grid",
                div {
                    h3 { "Top Genres by Region" }
                    Figure { spec: tastes_chart }
                }
                div {
                    h3 { "Regional Sales Over Time" }
                    Figure { spec: trend_chart }
                }
            }

            h2 { "Global Sales Distribution" }
            Figure { spec: map_chart }
            p { class: "page__note",
                "Note: this ranking shows an approximate distribution based on the regional data. Individual country figures are estimated for visualization purposes."
            }
        }
    }
}
