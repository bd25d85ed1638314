#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::components::{register_nav, AppNavbar, NavBuilder, OverviewMetrics, Sidebar};
use ui::session::{self, DatasetSource};
use ui::views::{DataStorytelling, GenreInsights, GeographicSales, SalesAnalysis};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
    #[route("/")]
    SalesAnalysis {},
    #[route("/regions")]
    GeographicSales {},
    #[route("/genres")]
    GenreInsights {},
    #[route("/story")]
    DataStorytelling {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

#[cfg(feature = "desktop")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Cartridge – v{}", env!("CARGO_PKG_VERSION")))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
}

fn nav_sales(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::SalesAnalysis {}, "{label}" })
}
fn nav_regions(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::GeographicSales {}, "{label}" })
}
fn nav_genres(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::GenreInsights {}, "{label}" })
}
fn nav_story(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::DataStorytelling {}, "{label}" })
}

#[component]
fn App() -> Element {
    session::provide_session(DatasetSource::Path(resolve_data_path()));
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

/// During `cargo run` / `dx serve` load the bundled sample straight from the
/// workspace; packaged builds expect `data/vgsales.csv` next to the
/// executable.
fn resolve_data_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../ui/data/vgsales.csv"
        ))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("data/vgsales.csv")))
            .unwrap_or_else(|| PathBuf::from("data/vgsales.csv"))
    }
}

/// Desktop shell: navbar, filter sidebar, overview metrics, and the routed
/// tab. A missing or unreadable data file renders the error banner alone.
#[component]
fn DesktopShell() -> Element {
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
