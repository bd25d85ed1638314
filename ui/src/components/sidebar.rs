use dioxus::prelude::*;

use crate::components::ExportPanel;
use crate::core::filters::{self, Preset};
use crate::core::format;
use crate::core::theme::Theme;
use crate::session::{use_dataset, use_filters, use_theme};

/// The filter rail: presets, year window, platform/genre selection,
/// publisher choice, theme switch, current-selection recap, and the export
/// actions. Every control mutates the session's one `FilterState`.
#[component]
pub fn Sidebar() -> Element {
    let dataset = use_dataset();
    let mut filters_signal = use_filters();
    let mut theme_signal = use_theme();

    let state = dataset();
    let Ok(data) = &state.0 else {
        return rsx! {};
    };
    let snapshot = filters_signal();
    let matched = filters::apply(data, &snapshot).len();
    let matched = format::count(matched);
    let theme = theme_signal();

    let year_floor = data.year_min;
    let year_ceil = data.year_max;
    let platform_total = data.platforms.len();
    let genre_total = data.genres.len();

    rsx! {
        aside { class: "sidebar",
            section { class: "sidebar__section",
                h2 { class: "sidebar__heading", "Quick Filter Presets" }
                div { class: "sidebar__preset-grid",
                    for preset in Preset::ALL {
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| {
                                if let Ok(data) = &dataset().0 {
                                    filters_signal.with_mut(|f| f.apply_preset(preset, data));
                                }
                            },
                            "{preset.label()}"
                        }
                    }
                }
                div { class: "sidebar__preset-grid",
                    button {
                        r#type: "button",
                        class: "button",
                        onclick: move |_| {
                            if let Ok(data) = &dataset().0 {
                                filters_signal.with_mut(|f| f.clear(data));
                            }
                        },
                        "Clear All Filters"
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        onclick: move |_| {
                            if let Ok(data) = &dataset().0 {
                                filters_signal.with_mut(|f| f.select_all(data));
                            }
                        },
                        "All Games"
                    }
                }
            }

            section { class: "sidebar__section",
                h2 { class: "sidebar__heading", "Appearance" }
                div { class: "sidebar__theme",
                    for mode in [Theme::Dark, Theme::Light] {
                        label { class: "sidebar__theme-option",
                            input {
                                r#type: "radio",
                                name: "theme",
                                checked: theme == mode,
                                onchange: move |_| theme_signal.set(mode),
                            }
                            "{mode.label()}"
                        }
                    }
                }
            }

            section { class: "sidebar__section",
                h2 { class: "sidebar__heading", "Data Filters" }

                div { class: "sidebar__field",
                    span { class: "sidebar__label", "Year Range" }
                    div { class: "sidebar__year-inputs",
                        input {
                            r#type: "number",
                            min: "{year_floor}",
                            max: "{year_ceil}",
                            value: "{snapshot.year_lo}",
                            oninput: move |evt| {
                                if let Ok(year) = evt.value().parse::<u16>() {
                                    filters_signal.with_mut(|f| f.year_lo = year.min(f.year_hi));
                                }
                            },
                        }
                        span { class: "sidebar__year-dash", "–" }
                        input {
                            r#type: "number",
                            min: "{year_floor}",
                            max: "{year_ceil}",
                            value: "{snapshot.year_hi}",
                            oninput: move |evt| {
                                if let Ok(year) = evt.value().parse::<u16>() {
                                    filters_signal.with_mut(|f| f.year_hi = year.max(f.year_lo));
                                }
                            },
                        }
                    }
                }

                div { class: "sidebar__field",
                    span { class: "sidebar__label", "Platform" }
                    div { class: "sidebar__choices",
                        for platform in data.platforms.clone() {
                            label { class: "sidebar__choice",
                                input {
                                    r#type: "checkbox",
                                    checked: snapshot.platforms.contains(&platform),
                                    onchange: {
                                        let platform = platform.clone();
                                        move |evt: FormEvent| {
                                            let selected = evt.checked();
                                            let platform = platform.clone();
                                            filters_signal.with_mut(|f| {
                                                if selected {
                                                    f.platforms.insert(platform);
                                                } else {
                                                    f.platforms.remove(&platform);
                                                }
                                            });
                                        }
                                    },
                                }
                                "{platform}"
                            }
                        }
                    }
                }

                div { class: "sidebar__field",
                    span { class: "sidebar__label", "Genre" }
                    div { class: "sidebar__choices",
                        for genre in data.genres.clone() {
                            label { class: "sidebar__choice",
                                input {
                                    r#type: "checkbox",
                                    checked: snapshot.genres.contains(&genre),
                                    onchange: {
                                        let genre = genre.clone();
                                        move |evt: FormEvent| {
                                            let selected = evt.checked();
                                            let genre = genre.clone();
                                            filters_signal.with_mut(|f| {
                                                if selected {
                                                    f.genres.insert(genre);
                                                } else {
                                                    f.genres.remove(&genre);
                                                }
                                            });
                                        }
                                    },
                                }
                                "{genre}"
                            }
                        }
                    }
                }

                div { class: "sidebar__field",
                    span { class: "sidebar__label", "Publisher" }
                    select {
                        class: "sidebar__select",
                        value: "{snapshot.publisher}",
                        onchange: move |evt| {
                            filters_signal.with_mut(|f| f.publisher = evt.value());
                        },
                        for publisher in data.publisher_choices.clone() {
                            option {
                                value: "{publisher}",
                                selected: snapshot.publisher == publisher,
                                "{publisher}"
                            }
                        }
                    }
                }
            }

            section { class: "sidebar__section",
                h2 { class: "sidebar__heading", "Current Selection" }
                p { class: "sidebar__summary",
                    "Showing "
                    strong { "{matched}" }
                    " games from "
                    strong { "{snapshot.year_lo}" }
                    " to "
                    strong { "{snapshot.year_hi}" }
                }
                p { class: "sidebar__summary",
                    "Platforms: "
                    strong { "{snapshot.platforms.len()}" }
                    " of {platform_total} · Genres: "
                    strong { "{snapshot.genres.len()}" }
                    " of {genre_total}"
                }
                p { class: "sidebar__summary",
                    "Publisher: "
                    strong { "{snapshot.publisher}" }
                }
            }

            ExportPanel {}
        }
    }
}
