//! Grouping and aggregation recipes over a filtered view.
//!
//! Every recipe is a pure pass over the slice: accumulate, rank, return a
//! small table the charts can consume directly. Sums are plain f64
//! accumulation; rounding happens only when a value is formatted for display.
//! An empty view yields empty tables, never an error.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexMap;

use super::dataset::GameRecord;
use super::filters::FilteredView;

/// Total global sales per year, ascending. Records without a year are not
/// part of any year-grouped output.
pub fn by_year(view: &FilteredView<'_>) -> Vec<(u16, f64)> {
    let mut totals: BTreeMap<u16, f64> = BTreeMap::new();
    for record in view.records() {
        if let Some(year) = record.year {
            *totals.entry(year).or_insert(0.0) += record.global_sales;
        }
    }
    totals.into_iter().collect()
}

/// Games released per year, ascending.
pub fn count_by_year(view: &FilteredView<'_>) -> Vec<(u16, usize)> {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for record in view.records() {
        if let Some(year) = record.year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// The `n` records with the largest global sales, descending. The sort is
/// stable, so ties keep their original file order.
pub fn top_n<'a>(view: &FilteredView<'a>, n: usize) -> Vec<&'a GameRecord> {
    let mut ranked: Vec<&GameRecord> = view.records().to_vec();
    ranked.sort_by(|a, b| b.global_sales.total_cmp(&a.global_sales));
    ranked.truncate(n);
    ranked
}

/// Total global sales for the top `n` platforms, descending.
pub fn by_platform(view: &FilteredView<'_>, n: usize) -> Vec<(String, f64)> {
    let mut ranked = sum_by(view, |r| r.platform.as_str(), |r| r.global_sales);
    ranked.truncate(n);
    ranked
}

/// Total global sales per genre, all genres, descending.
pub fn by_genre(view: &FilteredView<'_>) -> Vec<(String, f64)> {
    sum_by(view, |r| r.genre.as_str(), |r| r.global_sales)
}

/// Number of games per genre, descending.
pub fn count_by_genre(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in view.records() {
        *counts.entry(record.genre.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Average global sales per game by platform, descending.
pub fn mean_by_platform(view: &FilteredView<'_>) -> Vec<(String, f64)> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in view.records() {
        let entry = sums.entry(record.platform.as_str()).or_insert((0.0, 0));
        entry.0 += record.global_sales;
        entry.1 += 1;
    }
    let mut ranked: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(platform, (sum, count))| (platform.to_string(), sum / count as f64))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Franchise totals, keyed by the title prefix before the first `:` (the
/// whole title when there is none), top `n` descending.
pub fn franchise_totals(view: &FilteredView<'_>, n: usize) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in view.records() {
        let franchise = record.name.split(':').next().unwrap_or(&record.name);
        *totals.entry(franchise).or_insert(0.0) += record.global_sales;
    }
    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, sum)| (name.to_string(), sum))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Sales totals for the four reporting regions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionTotals {
    pub na: f64,
    pub eu: f64,
    pub jp: f64,
    pub other: f64,
}

pub const REGION_LABELS: [&str; 4] = ["North America", "Europe", "Japan", "Rest of World"];

impl RegionTotals {
    /// Label/value pairs in the fixed reporting order.
    pub fn labeled(&self) -> [(&'static str, f64); 4] {
        [
            (REGION_LABELS[0], self.na),
            (REGION_LABELS[1], self.eu),
            (REGION_LABELS[2], self.jp),
            (REGION_LABELS[3], self.other),
        ]
    }

    pub fn total(&self) -> f64 {
        self.na + self.eu + self.jp + self.other
    }
}

pub fn by_region(view: &FilteredView<'_>) -> RegionTotals {
    let mut totals = RegionTotals::default();
    for record in view.records() {
        totals.na += record.na_sales;
        totals.eu += record.eu_sales;
        totals.jp += record.jp_sales;
        totals.other += record.other_sales;
    }
    totals
}

/// Which category column a year cross-tab groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossDim {
    Platform,
    Genre,
    Publisher,
}

impl CrossDim {
    fn key<'a>(&self, record: &'a GameRecord) -> &'a str {
        match self {
            CrossDim::Platform => &record.platform,
            CrossDim::Genre => &record.genre,
            CrossDim::Publisher => &record.publisher,
        }
    }
}

/// Per-year totals for the top `k` categories of one dimension. One aligned
/// value column per category; years ascending; categories in rank order.
///
/// The top-k cut keeps the chart legible — an unrestricted cross-tab over
/// dozens of categories is unreadable, not slow.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub years: Vec<u16>,
    pub series: Vec<(String, Vec<f64>)>,
}

pub fn cross(view: &FilteredView<'_>, dim: CrossDim, k: usize) -> CrossTab {
    let leaders: Vec<String> = sum_by(view, |r| dim.key(r), |r| r.global_sales)
        .into_iter()
        .take(k)
        .map(|(name, _)| name)
        .collect();
    let rank: IndexMap<&str, usize> = leaders
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();

    let years: Vec<u16> = view
        .records()
        .iter()
        .filter(|r| rank.contains_key(dim.key(r)))
        .filter_map(|r| r.year)
        .collect::<BTreeSet<u16>>()
        .into_iter()
        .collect();
    let year_index: HashMap<u16, usize> = years
        .iter()
        .enumerate()
        .map(|(index, year)| (*year, index))
        .collect();

    let mut columns = vec![vec![0.0; years.len()]; leaders.len()];
    for record in view.records() {
        let (Some(year), Some(series)) = (record.year, rank.get(dim.key(record))) else {
            continue;
        };
        columns[*series][year_index[&year]] += record.global_sales;
    }

    CrossTab {
        years,
        series: leaders.into_iter().zip(columns).collect(),
    }
}

/// Per-year totals of the four regional columns, years ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalTrend {
    pub years: Vec<u16>,
    /// One aligned column per region, in [`REGION_LABELS`] order.
    pub regions: Vec<(&'static str, Vec<f64>)>,
}

pub fn by_year_regional(view: &FilteredView<'_>) -> RegionalTrend {
    let mut totals: BTreeMap<u16, [f64; 4]> = BTreeMap::new();
    for record in view.records() {
        if let Some(year) = record.year {
            let entry = totals.entry(year).or_insert([0.0; 4]);
            entry[0] += record.na_sales;
            entry[1] += record.eu_sales;
            entry[2] += record.jp_sales;
            entry[3] += record.other_sales;
        }
    }

    let years: Vec<u16> = totals.keys().copied().collect();
    let mut regions: Vec<(&'static str, Vec<f64>)> = REGION_LABELS
        .iter()
        .map(|label| (*label, Vec::with_capacity(years.len())))
        .collect();
    for sums in totals.values() {
        for (index, (_, column)) in regions.iter_mut().enumerate() {
            column.push(sums[index]);
        }
    }

    RegionalTrend { years, regions }
}

/// The favorite genres of NA, EU, and JP side by side: each region's top
/// `per_region` genres, one aligned column per region over the union of
/// those genres. A genre outside a region's top list reads as zero there.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGenreTable {
    pub genres: Vec<String>,
    pub regions: Vec<(&'static str, Vec<f64>)>,
}

pub fn genre_by_region_top(view: &FilteredView<'_>, per_region: usize) -> RegionGenreTable {
    let picks: [(&'static str, fn(&GameRecord) -> f64); 3] = [
        (REGION_LABELS[0], |r| r.na_sales),
        (REGION_LABELS[1], |r| r.eu_sales),
        (REGION_LABELS[2], |r| r.jp_sales),
    ];

    let mut tops: Vec<(&'static str, Vec<(String, f64)>)> = Vec::with_capacity(picks.len());
    for (label, sales) in picks {
        let mut ranked = sum_by(view, |r| r.genre.as_str(), sales);
        ranked.truncate(per_region);
        tops.push((label, ranked));
    }

    // Union of every region's leaders, ordered by combined sales.
    let mut combined: IndexMap<&str, f64> = IndexMap::new();
    for (_, ranked) in &tops {
        for (genre, sales) in ranked {
            *combined.entry(genre.as_str()).or_insert(0.0) += sales;
        }
    }
    combined.sort_by(|_, a, _, b| b.total_cmp(a));
    let genres: Vec<String> = combined.keys().map(|genre| genre.to_string()).collect();

    let regions = tops
        .into_iter()
        .map(|(label, ranked)| {
            let lookup: HashMap<&str, f64> = ranked
                .iter()
                .map(|(genre, sales)| (genre.as_str(), *sales))
                .collect();
            let column = genres
                .iter()
                .map(|genre| lookup.get(genre.as_str()).copied().unwrap_or(0.0))
                .collect();
            (label, column)
        })
        .collect();

    RegionGenreTable { genres, regions }
}

/// One row of the estimated worldwide distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryEstimate {
    pub country: &'static str,
    pub iso_alpha: &'static str,
    pub sales: f64,
}

/// Fixed share of a reporting region attributed to each country. These are
/// presentation estimates, not measurements; the dashboard labels them as
/// such.
const COUNTRY_WEIGHTS: [(&str, &str, Region, f64); 14] = [
    ("United States", "USA", Region::Na, 0.9),
    ("Canada", "CAN", Region::Na, 0.1),
    ("United Kingdom", "GBR", Region::Eu, 0.3),
    ("France", "FRA", Region::Eu, 0.2),
    ("Germany", "DEU", Region::Eu, 0.25),
    ("Italy", "ITA", Region::Eu, 0.15),
    ("Spain", "ESP", Region::Eu, 0.1),
    ("Japan", "JPN", Region::Jp, 1.0),
    ("Australia", "AUS", Region::Other, 0.15),
    ("Brazil", "BRA", Region::Other, 0.15),
    ("Mexico", "MEX", Region::Other, 0.1),
    ("China", "CHN", Region::Other, 0.3),
    ("Russia", "RUS", Region::Other, 0.15),
    ("South Korea", "KOR", Region::Other, 0.15),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Na,
    Eu,
    Jp,
    Other,
}

pub fn country_estimates(totals: &RegionTotals) -> Vec<CountryEstimate> {
    COUNTRY_WEIGHTS
        .iter()
        .map(|(country, iso_alpha, region, weight)| {
            let base = match region {
                Region::Na => totals.na,
                Region::Eu => totals.eu,
                Region::Jp => totals.jp,
                Region::Other => totals.other,
            };
            CountryEstimate {
                country,
                iso_alpha,
                sales: base * weight,
            }
        })
        .collect()
}

/// Sum `value` per `key`, descending by total with the key as tie-break.
fn sum_by<'a, K, V>(view: &FilteredView<'a>, key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&'a GameRecord) -> &'a str,
    V: Fn(&'a GameRecord) -> f64,
{
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in view.records() {
        *totals.entry(key(record)).or_insert(0.0) += value(record);
    }
    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, sum)| (name.to_string(), sum))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::core::filters::{self, FilterState};

    fn mk(
        name: &str,
        platform: &str,
        year: Option<u16>,
        genre: &str,
        publisher: &str,
        sales: [f64; 5],
    ) -> GameRecord {
        GameRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: publisher.into(),
            na_sales: sales[0],
            eu_sales: sales[1],
            jp_sales: sales[2],
            other_sales: sales[3],
            global_sales: sales[4],
        }
    }

    fn full_view(dataset: &Dataset) -> filters::FilteredView<'_> {
        let mut state = FilterState::initial(dataset);
        state.select_all(dataset);
        filters::apply(dataset, &state)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            mk("Super Mario Bros.", "NES", Some(1985), "Platform", "Nintendo", [29.08, 3.58, 6.81, 0.77, 40.24]),
            mk("Grand Theft Auto V", "PS3", Some(2013), "Action", "Rockstar", [7.01, 9.27, 0.97, 4.14, 21.40]),
            mk("FIFA Street", "PS3", Some(2006), "Sports", "EA", [4.0, 4.0, 1.0, 1.0, 10.00]),
            mk("Zelda: Lost Era", "NES", None, "Adventure", "Nintendo", [1.0, 0.5, 1.5, 0.2, 3.20]),
        ])
    }

    #[test]
    fn by_year_drops_missing_years_and_ascends() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let yearly = by_year(&view);
        assert_eq!(
            yearly.iter().map(|(year, _)| *year).collect::<Vec<_>>(),
            vec![1985, 2006, 2013]
        );
        // The missing-year record contributes to no bucket.
        let total: f64 = yearly.iter().map(|(_, sales)| sales).sum();
        assert!((total - (40.24 + 21.40 + 10.00)).abs() < 1e-9);
    }

    #[test]
    fn missing_year_still_counts_outside_year_grouping() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let genres = by_genre(&view);
        assert!(genres.iter().any(|(genre, _)| genre == "Adventure"));
        let regions = by_region(&view);
        assert!((regions.jp - (6.81 + 0.97 + 1.0 + 1.5)).abs() < 1e-9);
    }

    #[test]
    fn genre_totals_conserve_global_sales() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let per_genre: f64 = by_genre(&view).iter().map(|(_, sales)| sales).sum();
        let direct: f64 = view.records().iter().map(|r| r.global_sales).sum();
        assert!((per_genre - direct).abs() < 1e-9);
    }

    #[test]
    fn top_n_is_a_sorted_subset() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let top = top_n(&view, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Super Mario Bros.");
        assert_eq!(top[1].name, "Grand Theft Auto V");
        assert!(top_n(&view, 10).len() <= view.len());
    }

    #[test]
    fn top_n_breaks_ties_by_file_order() {
        let dataset = Dataset::from_records(vec![
            mk("First", "Wii", Some(2006), "Sports", "Nintendo", [1.0, 1.0, 1.0, 1.0, 5.0]),
            mk("Second", "Wii", Some(2007), "Sports", "Nintendo", [1.0, 1.0, 1.0, 1.0, 5.0]),
        ]);
        let view = full_view(&dataset);
        let top = top_n(&view, 2);
        assert_eq!(top[0].name, "First");
        assert_eq!(top[1].name, "Second");
    }

    #[test]
    fn platform_totals_match_scenario() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.select_all(&dataset);
        state.year_lo = 1990;
        state.year_hi = 2020;
        state.platforms = std::collections::BTreeSet::from(["PS3".to_string()]);
        let view = filters::apply(&dataset, &state);
        let platforms = by_platform(&view, 10);
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].0, "PS3");
        assert!((platforms[0].1 - 31.40).abs() < 1e-9);
    }

    #[test]
    fn cross_restricts_to_top_k_and_aligns_columns() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let tab = cross(&view, CrossDim::Platform, 1);
        assert_eq!(tab.series.len(), 1);
        assert_eq!(tab.series[0].0, "NES");
        // Only NES years appear, and the missing-year NES record is dropped.
        assert_eq!(tab.years, vec![1985]);
        assert_eq!(tab.series[0].1, vec![40.24]);

        let wide = cross(&view, CrossDim::Publisher, 3);
        for (_, column) in &wide.series {
            assert_eq!(column.len(), wide.years.len());
        }
    }

    #[test]
    fn regional_trend_aligns_all_four_regions() {
        let dataset = dataset();
        let view = full_view(&dataset);
        let trend = by_year_regional(&view);
        assert_eq!(trend.regions.len(), 4);
        for (_, column) in &trend.regions {
            assert_eq!(column.len(), trend.years.len());
        }
    }

    #[test]
    fn franchise_prefix_groups_titles() {
        let dataset = Dataset::from_records(vec![
            mk("Zelda: Ocarina", "N64", Some(1998), "Adventure", "Nintendo", [1.0, 1.0, 1.0, 1.0, 7.6]),
            mk("Zelda: Majora", "N64", Some(2000), "Adventure", "Nintendo", [1.0, 1.0, 1.0, 1.0, 3.36]),
            mk("Tetris", "GB", Some(1989), "Puzzle", "Nintendo", [1.0, 1.0, 1.0, 1.0, 30.26]),
        ]);
        let view = full_view(&dataset);
        let franchises = franchise_totals(&view, 10);
        assert_eq!(franchises[0].0, "Tetris");
        let zelda = franchises.iter().find(|(name, _)| name == "Zelda").unwrap();
        assert!((zelda.1 - 10.96).abs() < 1e-9);
    }

    #[test]
    fn empty_view_yields_empty_tables() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.platforms.clear();
        let view = filters::apply(&dataset, &state);
        assert!(by_year(&view).is_empty());
        assert!(by_genre(&view).is_empty());
        assert!(top_n(&view, 10).is_empty());
        assert_eq!(by_region(&view), RegionTotals::default());
        assert!(cross(&view, CrossDim::Genre, 5).series.is_empty());
    }

    #[test]
    fn country_estimates_spread_regional_totals() {
        let totals = RegionTotals {
            na: 10.0,
            eu: 4.0,
            jp: 2.0,
            other: 1.0,
        };
        let estimates = country_estimates(&totals);
        let usa = estimates.iter().find(|e| e.iso_alpha == "USA").unwrap();
        assert!((usa.sales - 9.0).abs() < 1e-9);
        let japan = estimates.iter().find(|e| e.iso_alpha == "JPN").unwrap();
        assert!((japan.sales - 2.0).abs() < 1e-9);
    }
}
