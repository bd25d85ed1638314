use dioxus::prelude::*;

use ui::components::{register_nav, AppNavbar, NavBuilder, OverviewMetrics, Sidebar};
use ui::session::{self, DatasetSource};
use ui::views::{DataStorytelling, GenreInsights, GeographicSales, SalesAnalysis};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    SalesAnalysis {},
    #[route("/regions")]
    GeographicSales {},
    #[route("/genres")]
    GenreInsights {},
    #[route("/story")]
    DataStorytelling {},
}

// Embedded shared theme (ui/assets/theme/main.css); keeps the web bundle
// free of a separate stylesheet asset.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_sales(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::SalesAnalysis {},
        "{label}"
    })
}
fn nav_regions(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::GeographicSales {},
        "{label}"
    })
}
fn nav_genres(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::GenreInsights {},
        "{label}"
    })
}
fn nav_story(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::DataStorytelling {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    session::provide_session(DatasetSource::Embedded);
    register_nav(NavBuilder {
        sales: nav_sales,
        regions: nav_regions,
        genres: nav_genres,
        story: nav_story,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> {}
    }
}

/// Web shell: navbar, filter sidebar, overview metrics, and the routed tab.
/// The dashboard only renders once the dataset is actually loaded.
#[component]
fn WebShell() -> Element {
    let dataset = ui::session::use_dataset();
    let theme = ui::session::use_theme()();
    let state = dataset();

    rsx! {
        div { class: "app", "data-theme": theme.css_value(),
            AppNavbar {}
            match &state.0 {
                Ok(_) => rsx! {
                    div { class: "dashboard",
                        Sidebar {}
                        main { class: "dashboard__main",
                            OverviewMetrics {}
                            Outlet::<Route> {}
                        }
                    }
                },
                Err(err) => rsx! {
                    main { class: "dashboard dashboard--error",
                        p { class: "dashboard__error", "{err}" }
                    }
                },
            }
        }
    }
}
