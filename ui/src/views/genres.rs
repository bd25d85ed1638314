use dioxus::prelude::*;

use super::cross_spec;
use crate::charts::{ChartKind, ChartSpec, Figure};
use crate::core::aggregate::{self, CrossDim};
use crate::core::filters;
use crate::session::{use_dataset, use_filters, use_theme};

#[component]
pub fn GenreInsights() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();
    let theme = use_theme()();

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let view = filters::apply(data, &filters_signal());

    let sales = aggregate::by_genre(&view);
    let genre_names: Vec<String> = sales.iter().map(|(name, _)| name.clone()).collect();
    let sales_chart = ChartSpec::new(ChartKind::Bar, "Global Sales by Genre", theme)
        .axis_labels("Genre", "Global Sales (millions)")
        .categories(genre_names.clone())
        .series("Global Sales", sales.iter().map(|(_, s)| *s).collect())
        .color_keys(genre_names);

    let counts = aggregate::count_by_genre(&view);
    let count_names: Vec<String> = counts.iter().map(|(name, _)| name.clone()).collect();
    let count_chart = ChartSpec::new(ChartKind::Bar, "Number of Games by Genre", theme)
        .axis_labels("Genre", "Number of Games")
        .categories(count_names.clone())
        .series(
            "Games",
            counts.iter().map(|(_, count)| *count as f64).collect(),
        )
        .color_keys(count_names);

    let evolution = aggregate::cross(&view, CrossDim::Genre, 5);
    let evolution_chart = cross_spec(
        &evolution,
        ChartKind::MultiLine,
        "Top 5 Genres Sales Trend Over Time",
        theme,
    );

    rsx! {
        section { class: "page page-genres",
            h1 { "Genre Insights" }

            h2 { "Genre Performance Analysis" }
            div { class: "chart-grid",
                Figure { spec: sales_chart }
                Figure { spec: count_chart }
            }

            h2 { "Genre Popularity Over Time" }
            Figure { spec: evolution_chart }
        }
    }
}
