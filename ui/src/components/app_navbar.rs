use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platforms register fully constructed `Link` elements here so `ui` does
/// not need to know each platform's `Route` enum. Each closure receives the
/// tab label and returns a link that already contains it.
pub struct NavBuilder {
    pub sales: fn(label: &str) -> Element,
    pub regions: fn(label: &str) -> Element,
    pub genres: fn(label: &str) -> Element,
    pub story: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar() -> Element {
    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|b| {
        let sales = (b.sales)("Sales Analysis");
        let regions = (b.regions)("Geographic Sales");
        let genres = (b.genres)("Genre Insights");
        let story = (b.story)("Data Storytelling");

        rsx! {
            nav { class: "navbar__links",
                {sales}
                {regions}
                {genres}
                {story}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                // Brand
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Cartridge" }
                    }
                    span { class: "navbar__brand-subtitle",
                        "Interactive analytics for global video game sales, 1980–2020"
                    }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links" }
                }
            }
        }
    }
}
