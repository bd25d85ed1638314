use dioxus::prelude::*;

use super::cross_spec;
use crate::charts::{ChartKind, ChartSpec, Figure};
use crate::core::aggregate::{self, CrossDim};
use crate::core::{facts, filters};
use crate::session::{use_dataset, use_filters, use_theme};

#[component]
pub fn DataStorytelling() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();
    let theme = use_theme()();
    let fact = use_signal(|| Option::<String>::None);

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let view = filters::apply(data, &filters_signal());

    let platform_evolution = cross_spec(
        &aggregate::cross(&view, CrossDim::Platform, 6),
        ChartKind::MultiLine,
        "Evolution of Top Gaming Platforms",
        theme,
    );
    let genre_evolution = cross_spec(
        &aggregate::cross(&view, CrossDim::Genre, 5),
        ChartKind::Area,
        "Evolution of Game Genres",
        theme,
    );
    let publisher_battle = cross_spec(
        &aggregate::cross(&view, CrossDim::Publisher, 5),
        ChartKind::StackedBar,
        "Battle of the Publishers Over Time",
        theme,
    );

    let franchises = aggregate::franchise_totals(&view, 10);
    let franchise_chart = ChartSpec::new(
        ChartKind::Bar,
        "Top 10 Game Franchises by Global Sales",
        theme,
    )
    .axis_labels("Franchise", "Global Sales (millions)")
    .categories(franchises.iter().map(|(name, _)| name.clone()).collect())
    .series(
        "Global Sales",
        franchises.iter().map(|(_, sales)| *sales).collect(),
    )
    .value_colored();

    let fact_handler = {
        let mut fact_signal = fact;
        move |_| {
            let drawn = match &dataset().0 {
                Ok(data) => facts::random_fact(&filters::apply(data, &filters_signal())),
                Err(_) => None,
            };
            fact_signal.set(drawn);
        }
    };

    rsx! {
        section { class: "page page-story",
            h1 { "Data Storytelling" }

            h2 { class: "story__header", "The Evolution of Video Game Industry" }
            p { class: "story__text",
                "Let's explore the fascinating journey of video games through the years, highlighting key trends, shifts in consumer preferences, and the rise and fall of gaming platforms."
            }

            details { class: "story__chapter", open: true,
                summary { "Chapter 1: The Rise and Fall of Gaming Platforms" }
                Figure { spec: platform_evolution }
                p { class: "story__text",
                    "The gaming industry has witnessed dramatic shifts in platform dominance over the decades. From the rise of home consoles like the "
                    mark { "NES and PlayStation" }
                    " to the emergence of handheld gaming with the "
                    mark { "Game Boy and Nintendo DS" }
                    ", each platform has had its moment in the spotlight."
                }
                p { class: "story__text",
                    "As technology advanced, we saw a transition from 8-bit and 16-bit consoles to more sophisticated systems capable of 3D rendering and online connectivity. Each generation brought new capabilities and expanded the potential market for video games."
                }
            }

            details { class: "story__chapter", open: true,
                summary { "Chapter 2: Changing Genre Preferences" }
                Figure { spec: genre_evolution }
                p { class: "story__text",
                    "Consumer preferences have evolved substantially over time. In the early days, "
                    mark { "platformers and puzzles" }
                    " dominated the market. As gaming matured, we saw the rise of "
                    mark { "action, sports, and role-playing games" }
                    "."
                }
                p { class: "story__text",
                    "Different regions also developed distinct preferences. While North America embraced sports and action titles, Japan showed a stronger affinity for role-playing games and unique gaming experiences."
                }
            }

            details { class: "story__chapter", open: true,
                summary { "Chapter 3: The Publishers' Battle" }
                Figure { spec: publisher_battle }
                p { class: "story__text",
                    "Behind every successful game is a publisher with the vision and resources to bring it to market. The industry has seen fierce competition between publishing giants like "
                    mark { "Nintendo, Electronic Arts, and Activision" }
                    "."
                }
                p { class: "story__text",
                    "Nintendo has consistently dominated with its first-party titles and iconic franchises. Electronic Arts built its empire on sports titles and licensed games, while Activision found tremendous success with its Call of Duty franchise."
                }
            }

            details { class: "story__chapter", open: true,
                summary { "Chapter 4: Blockbuster Franchises" }
                Figure { spec: franchise_chart }
                p { class: "story__text",
                    "Franchises have become the backbone of the gaming industry. Iconic series like "
                    mark { "Mario, Pokémon, and Call of Duty" }
                    " have generated billions in revenue across multiple titles and platforms."
                }
                p { class: "story__text",
                    "These successful franchises often leverage nostalgia, established gameplay mechanics, and familiar characters to maintain player interest across generations."
                }
            }

            h2 { class: "story__header", "Random Fun Fact Generator" }
            button {
                r#type: "button",
                class: "button button--primary",
                onclick: fact_handler,
                "Generate Random Fun Fact"
            }
            match fact() {
                Some(text) => rsx! {
                    p { class: "story__fact", "{text}" }
                },
                None => rsx! {
                    p { class: "story__fact story__fact--hint",
                        "Click the button for a data-driven nugget about the current slice."
                    }
                },
            }

            h2 { class: "story__header", "The Future of Gaming" }
            p { class: "story__text",
                "As we look to the future, the video game industry continues to evolve at a rapid pace. New technologies like cloud gaming, virtual reality, and artificial intelligence are reshaping how games are developed and experienced."
            }
            p { class: "story__text",
                "While this dataset only covers up to recent years, the trends and patterns we've observed provide valuable insights into consumer preferences and market dynamics that will likely influence the industry for years to come."
            }
        }
    }
}
