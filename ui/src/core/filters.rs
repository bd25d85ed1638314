//! Session filter state, quick presets, and the record filter itself.

use std::collections::BTreeSet;

use super::dataset::{Dataset, GameRecord, ALL_PUBLISHERS};

/// Everything the sidebar controls. One instance per session, created when
/// the dashboard mounts and discarded with it; never persisted.
///
/// An empty platform or genre set means "match nothing" — callers that want
/// "everything" must materialize the full vocabulary (see [`FilterState::select_all`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub year_lo: u16,
    pub year_hi: u16,
    pub platforms: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    /// A publisher name, or [`ALL_PUBLISHERS`].
    pub publisher: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            year_lo: super::dataset::YEAR_DOMAIN.0,
            year_hi: super::dataset::YEAR_DOMAIN.1,
            platforms: BTreeSet::new(),
            genres: BTreeSet::new(),
            publisher: ALL_PUBLISHERS.to_string(),
        }
    }
}

impl FilterState {
    /// Fresh-session state: full year window, the dataset's most frequent
    /// platforms/genres pre-selected, no publisher filter.
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            year_lo: dataset.year_min,
            year_hi: dataset.year_max,
            platforms: dataset.default_platforms.clone(),
            genres: dataset.default_genres.clone(),
            publisher: ALL_PUBLISHERS.to_string(),
        }
    }

    /// Reset every field to its all-data value: full year window, full
    /// platform and genre vocabularies, no publisher filter.
    pub fn clear(&mut self, dataset: &Dataset) {
        self.year_lo = dataset.year_min;
        self.year_hi = dataset.year_max;
        self.platforms = dataset.platforms.iter().cloned().collect();
        self.genres = dataset.genres.iter().cloned().collect();
        self.publisher = ALL_PUBLISHERS.to_string();
    }

    /// Explicitly select the full platform and genre vocabularies (and widen
    /// the rest) so a later partial preset narrows exactly one field instead
    /// of silently re-expanding the others from implicit defaults.
    pub fn select_all(&mut self, dataset: &Dataset) {
        self.clear(dataset);
    }

    /// Apply a named preset. Presets are partial: only the fields the preset
    /// defines change, current selections elsewhere stay put.
    pub fn apply_preset(&mut self, preset: Preset, dataset: &Dataset) {
        match preset {
            Preset::NintendoGames => {
                // A publisher missing from the dropdown domain falls back to
                // the `All` entry instead of producing a dead filter.
                self.publisher = if dataset.publisher_choices.iter().any(|p| p == "Nintendo") {
                    "Nintendo".to_string()
                } else {
                    ALL_PUBLISHERS.to_string()
                };
            }
            Preset::PlayStationGames => {
                self.platforms = if dataset.platforms.iter().any(|p| p == "PS3") {
                    BTreeSet::from(["PS3".to_string()])
                } else {
                    dataset.default_platforms.clone()
                };
            }
            Preset::Era2010To2015 => {
                self.year_lo = 2010;
                self.year_hi = 2015;
            }
            Preset::ActionGames => {
                self.genres = if dataset.genres.iter().any(|g| g == "Action") {
                    BTreeSet::from(["Action".to_string()])
                } else {
                    dataset.default_genres.clone()
                };
            }
        }
    }

    /// Human summary of the active narrowing, one fragment per constrained
    /// field; empty when the state matches all data.
    pub fn summary(&self, dataset: &Dataset) -> Vec<String> {
        let mut parts = Vec::new();
        if self.publisher != ALL_PUBLISHERS {
            parts.push(format!("Publisher: {}", self.publisher));
        }
        if self.platforms.len() < dataset.platforms.len() {
            if self.platforms.len() <= 3 {
                parts.push(format!(
                    "Platforms: {}",
                    self.platforms.iter().cloned().collect::<Vec<_>>().join(", ")
                ));
            } else {
                parts.push(format!("Platforms: {} selected", self.platforms.len()));
            }
        }
        if self.genres.len() < dataset.genres.len() {
            if self.genres.len() <= 3 {
                parts.push(format!(
                    "Genres: {}",
                    self.genres.iter().cloned().collect::<Vec<_>>().join(", ")
                ));
            } else {
                parts.push(format!("Genres: {} selected", self.genres.len()));
            }
        }
        if self.year_lo > dataset.year_min || self.year_hi < dataset.year_max {
            parts.push(format!("Years: {} to {}", self.year_lo, self.year_hi));
        }
        parts
    }
}

/// The sidebar's one-click filter shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    NintendoGames,
    PlayStationGames,
    Era2010To2015,
    ActionGames,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::NintendoGames,
        Preset::PlayStationGames,
        Preset::Era2010To2015,
        Preset::ActionGames,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preset::NintendoGames => "Nintendo Games",
            Preset::PlayStationGames => "PlayStation Games",
            Preset::Era2010To2015 => "2010-2015 Games",
            Preset::ActionGames => "Action Games",
        }
    }
}

/// The filtered slice every chart reads. Borrows the dataset; building one is
/// a single pass with no copying of records.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a GameRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply the state to the dataset. Pure; the same state always yields the
/// same view.
///
/// A record with no year cannot be year-tested, so it stays in the view and
/// is excluded later by the year-grouped recipes; everything else follows
/// the four predicates directly.
pub fn apply<'a>(dataset: &'a Dataset, state: &FilterState) -> FilteredView<'a> {
    let records = dataset
        .records()
        .iter()
        .filter(|record| {
            let year_ok = match record.year {
                Some(year) => year >= state.year_lo && year <= state.year_hi,
                None => true,
            };
            year_ok
                && state.platforms.contains(&record.platform)
                && state.genres.contains(&record.genre)
                && (state.publisher == ALL_PUBLISHERS || record.publisher == state.publisher)
        })
        .collect();
    FilteredView { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::GameRecord;

    fn sample_dataset() -> Dataset {
        let mk = |name: &str, platform: &str, year: Option<u16>, genre: &str, publisher: &str, sales: f64| GameRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: publisher.into(),
            na_sales: sales / 2.0,
            eu_sales: sales / 4.0,
            jp_sales: sales / 8.0,
            other_sales: sales / 8.0,
            global_sales: sales,
        };
        Dataset::from_records(vec![
            mk("Super Mario Bros.", "NES", Some(1985), "Platform", "Nintendo", 40.24),
            mk("Grand Theft Auto V", "PS3", Some(2013), "Action", "Rockstar", 21.40),
            mk("FIFA Street", "PS3", Some(2006), "Sports", "EA", 10.00),
            mk("Lost Cartridge", "PS3", None, "Action", "Rockstar", 1.25),
        ])
    }

    fn all_of(dataset: &Dataset) -> FilterState {
        let mut state = FilterState::initial(dataset);
        state.select_all(dataset);
        state
    }

    #[test]
    fn apply_is_deterministic_and_idempotent() {
        let dataset = sample_dataset();
        let state = all_of(&dataset);
        let once = apply(&dataset, &state);
        let twice = apply(&dataset, &state);
        assert_eq!(once.records().len(), twice.records().len());
        for (a, b) in once.records().iter().zip(twice.records()) {
            assert!(std::ptr::eq(*a, *b));
        }
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let dataset = sample_dataset();
        let mut state = all_of(&dataset);
        state.year_lo = 1985;
        state.year_hi = 2013;
        let view = apply(&dataset, &state);
        let names: Vec<&str> = view.records().iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"Super Mario Bros."));
        assert!(names.contains(&"Grand Theft Auto V"));
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let dataset = sample_dataset();
        let mut state = all_of(&dataset);
        state.platforms.clear();
        assert!(apply(&dataset, &state).is_empty());
    }

    #[test]
    fn missing_year_survives_the_year_window() {
        let dataset = sample_dataset();
        let mut state = all_of(&dataset);
        state.year_lo = 1990;
        state.year_hi = 2020;
        let view = apply(&dataset, &state);
        assert!(view
            .records()
            .iter()
            .any(|r| r.name == "Lost Cartridge" && r.year.is_none()));
    }

    #[test]
    fn presets_override_only_their_fields() {
        let dataset = sample_dataset();
        let mut state = all_of(&dataset);
        state.year_lo = 2000;
        state.apply_preset(Preset::NintendoGames, &dataset);
        assert_eq!(state.publisher, "Nintendo");
        // Untouched fields keep the user's narrowing.
        assert_eq!(state.year_lo, 2000);
        assert_eq!(state.platforms.len(), dataset.platforms.len());

        state.apply_preset(Preset::Era2010To2015, &dataset);
        assert_eq!((state.year_lo, state.year_hi), (2010, 2015));
        assert_eq!(state.publisher, "Nintendo");
    }

    #[test]
    fn preset_with_absent_value_falls_back() {
        let dataset = Dataset::from_records(vec![GameRecord {
            name: "Indie Gem".into(),
            platform: "PC".into(),
            year: Some(2015),
            genre: "Puzzle".into(),
            publisher: "Tiny Studio".into(),
            na_sales: 0.1,
            eu_sales: 0.1,
            jp_sales: 0.0,
            other_sales: 0.0,
            global_sales: 0.2,
        }]);
        let mut state = FilterState::initial(&dataset);
        state.apply_preset(Preset::NintendoGames, &dataset);
        assert_eq!(state.publisher, ALL_PUBLISHERS);
        state.apply_preset(Preset::PlayStationGames, &dataset);
        assert_eq!(state.platforms, dataset.default_platforms);
    }

    #[test]
    fn clear_then_select_all_yields_full_view() {
        let dataset = sample_dataset();
        let mut state = FilterState::initial(&dataset);
        state.apply_preset(Preset::ActionGames, &dataset);
        state.clear(&dataset);
        state.select_all(&dataset);
        assert_eq!(apply(&dataset, &state).len(), dataset.len());
    }

    #[test]
    fn scenario_ps3_window() {
        let dataset = sample_dataset();
        let mut state = all_of(&dataset);
        state.year_lo = 1990;
        state.year_hi = 2020;
        state.platforms = BTreeSet::from(["PS3".to_string()]);
        let view = apply(&dataset, &state);
        let names: Vec<&str> = view.records().iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"Grand Theft Auto V"));
        assert!(names.contains(&"FIFA Street"));
        assert!(!names.contains(&"Super Mario Bros."));
    }
}
