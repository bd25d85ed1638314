//! Sales dataset loading, cleaning, and the process-lifetime cache.

use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year span the dataset is expected to cover; used as the fallback window
/// when a loaded file contains no parseable years at all.
pub const YEAR_DOMAIN: (u16, u16) = (1980, 2020);

/// Publisher value standing in for "no publisher filter".
pub const ALL_PUBLISHERS: &str = "All";

/// Placeholder publisher for rows that ship without one.
pub const UNKNOWN_PUBLISHER: &str = "Unknown";

/// How many publishers the dropdown offers (besides the `All` entry).
const PUBLISHER_CHOICE_COUNT: usize = 20;

/// How many platforms/genres are pre-selected for a fresh session.
const DEFAULT_SELECTION_COUNT: usize = 5;

/// The source file could not be read or does not look like sales data.
/// Callers surface this to the user instead of rendering a partial dashboard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sales data unavailable: {reason}")]
pub struct DataUnavailable {
    pub reason: String,
}

impl DataUnavailable {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One game release. `global_sales` is taken from the file as-is and is not
/// reconciled against the four regional columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    pub year: Option<u16>,
    pub genre: String,
    pub publisher: String,
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub global_sales: f64,
}

/// The loaded table plus the vocabularies every control and default is built
/// from. Immutable after load; shared via `Arc`.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<GameRecord>,
    /// Distinct platforms, sorted.
    pub platforms: Vec<String>,
    /// Distinct genres, sorted.
    pub genres: Vec<String>,
    /// Publisher dropdown domain: `All` followed by the most prolific
    /// publishers (by row count), alphabetized.
    pub publisher_choices: Vec<String>,
    /// Fresh-session multiselect defaults: most frequent platforms.
    pub default_platforms: BTreeSet<String>,
    /// Fresh-session multiselect defaults: most frequent genres.
    pub default_genres: BTreeSet<String>,
    pub year_min: u16,
    pub year_max: u16,
}

impl Dataset {
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let platforms = sorted_distinct(records.iter().map(|r| r.platform.as_str()));
        let genres = sorted_distinct(records.iter().map(|r| r.genre.as_str()));

        let mut publisher_choices: Vec<String> =
            top_by_frequency(records.iter().map(|r| r.publisher.as_str()), PUBLISHER_CHOICE_COUNT);
        publisher_choices.sort();
        publisher_choices.insert(0, ALL_PUBLISHERS.to_string());

        let default_platforms = top_by_frequency(
            records.iter().map(|r| r.platform.as_str()),
            DEFAULT_SELECTION_COUNT,
        )
        .into_iter()
        .collect();
        let default_genres = top_by_frequency(
            records.iter().map(|r| r.genre.as_str()),
            DEFAULT_SELECTION_COUNT,
        )
        .into_iter()
        .collect();

        let years: Vec<u16> = records.iter().filter_map(|r| r.year).collect();
        let year_min = years.iter().min().copied().unwrap_or(YEAR_DOMAIN.0);
        let year_max = years.iter().max().copied().unwrap_or(YEAR_DOMAIN.1);

        Self {
            records,
            platforms,
            genres,
            publisher_choices,
            default_platforms,
            default_genres,
            year_min,
            year_max,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.collect();
    set.into_iter().map(String::from).collect()
}

/// Most frequent values, count descending with name as the tie-break so the
/// result is stable across loads.
fn top_by_frequency<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(value, _)| value.to_string())
        .collect()
}

/// Row shape as it appears in the file. Only `Year` and `Publisher` get any
/// cleanup; everything else is taken verbatim.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Platform")]
    platform: String,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Publisher", default)]
    publisher: Option<String>,
    #[serde(rename = "NA_Sales")]
    na_sales: f64,
    #[serde(rename = "EU_Sales")]
    eu_sales: f64,
    #[serde(rename = "JP_Sales")]
    jp_sales: f64,
    #[serde(rename = "Other_Sales")]
    other_sales: f64,
    #[serde(rename = "Global_Sales")]
    global_sales: f64,
}

impl From<RawRow> for GameRecord {
    fn from(raw: RawRow) -> Self {
        Self {
            name: raw.name,
            platform: raw.platform,
            year: raw.year.as_deref().and_then(parse_year),
            genre: raw.genre,
            publisher: clean_publisher(raw.publisher),
            na_sales: raw.na_sales,
            eu_sales: raw.eu_sales,
            jp_sales: raw.jp_sales,
            other_sales: raw.other_sales,
            global_sales: raw.global_sales,
        }
    }
}

/// Integer parse with a float fallback ("2006.0" style values appear once the
/// column has ever held a missing marker). Anything else is missing.
fn parse_year(raw: &str) -> Option<u16> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<u16>() {
        return Some(year);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && y.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(y))
        .map(|y| y as u16)
}

// The source file marks absent publishers either with an empty field or a
// literal "N/A".
fn clean_publisher(raw: Option<String>) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() && value.trim() != "N/A" => value,
        _ => UNKNOWN_PUBLISHER.to_string(),
    }
}

/// Parse a whole CSV stream into clean records. Any structural problem fails
/// the load; there is no row-level salvage for a file this small.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<GameRecord>, DataUnavailable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|err| DataUnavailable::new(format!("unreadable header row: {err}")))?
        .clone();

    let mut records = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row.map_err(|err| DataUnavailable::new(format!("row {}: {err}", index + 2)))?;
        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|err| DataUnavailable::new(format!("row {}: {err}", index + 2)))?;
        records.push(GameRecord::from(raw));
    }

    let missing_years = records.iter().filter(|r| r.year.is_none()).count();
    tracing::debug!(rows = records.len(), missing_years, "parsed sales dataset");

    Ok(records)
}

struct CacheEntry {
    key: String,
    fingerprint: u64,
    dataset: Arc<Dataset>,
}

static CACHE: Lazy<Mutex<Option<CacheEntry>>> = Lazy::new(|| Mutex::new(None));

fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

fn load_from_bytes(key: &str, bytes: &[u8]) -> Result<Arc<Dataset>, DataUnavailable> {
    let print = fingerprint(bytes);
    let mut cache = CACHE.lock().expect("dataset cache poisoned");
    if let Some(entry) = cache.as_ref() {
        if entry.key == key && entry.fingerprint == print {
            return Ok(Arc::clone(&entry.dataset));
        }
    }

    let dataset = Arc::new(Dataset::from_records(parse_records(bytes)?));
    *cache = Some(CacheEntry {
        key: key.to_string(),
        fingerprint: print,
        dataset: Arc::clone(&dataset),
    });
    Ok(dataset)
}

/// Drop the cached dataset; the next `load_*` call re-reads its source.
pub fn invalidate() {
    *CACHE.lock().expect("dataset cache poisoned") = None;
}

/// Load from a file on disk, reusing the cached parse while the content is
/// unchanged. Missing or unreadable file reports `DataUnavailable`.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_path(path: &std::path::Path) -> Result<Arc<Dataset>, DataUnavailable> {
    let bytes = std::fs::read(path)
        .map_err(|err| DataUnavailable::new(format!("{}: {err}", path.display())))?;
    load_from_bytes(&path.display().to_string(), &bytes)
}

/// The sample dataset bundled into the binary; the only source available in
/// the browser, where there is no filesystem to read from.
pub fn load_embedded() -> Result<Arc<Dataset>, DataUnavailable> {
    load_from_bytes("<embedded>", EMBEDDED_CSV.as_bytes())
}

const EMBEDDED_CSV: &str = include_str!("../../data/vgsales.csv");

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, platform: &str, genre: &str, publisher: &str, sales: f64) -> GameRecord {
        GameRecord {
            name: name.into(),
            platform: platform.into(),
            year: Some(2000),
            genre: genre.into(),
            publisher: publisher.into(),
            na_sales: sales / 2.0,
            eu_sales: sales / 4.0,
            jp_sales: sales / 8.0,
            other_sales: sales / 8.0,
            global_sales: sales,
        }
    }

    #[test]
    fn year_parse_failure_becomes_missing() {
        assert_eq!(parse_year("1985"), Some(1985));
        assert_eq!(parse_year("2006.0"), Some(2006));
        assert_eq!(parse_year(" 2013 "), Some(2013));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("soon"), None);
        assert_eq!(parse_year("2006.5"), None);
    }

    #[test]
    fn absent_publisher_becomes_unknown() {
        assert_eq!(clean_publisher(None), "Unknown");
        assert_eq!(clean_publisher(Some("".into())), "Unknown");
        assert_eq!(clean_publisher(Some("  ".into())), "Unknown");
        assert_eq!(clean_publisher(Some("N/A".into())), "Unknown");
        assert_eq!(clean_publisher(Some("Nintendo".into())), "Nintendo");
    }

    #[test]
    fn parse_applies_cleaning_and_nothing_else() {
        let csv = "\
Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
1,Wii Sports,Wii,2006,Sports,Nintendo,41.49,29.02,3.77,8.46,82.74
2,Mystery Title,PS2,N/A,Action,,1.0,1.0,1.0,1.0,4.25
";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, Some(2006));
        assert_eq!(records[0].publisher, "Nintendo");
        assert_eq!(records[1].year, None);
        assert_eq!(records[1].publisher, "Unknown");
        // Global sales is trusted, not recomputed from the regional columns.
        assert_eq!(records[1].global_sales, 4.25);
    }

    #[test]
    fn parse_rejects_missing_columns() {
        let csv = "Name,Platform\nWii Sports,Wii\n";
        assert!(parse_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn vocabularies_rank_by_frequency_with_stable_ties() {
        let records = vec![
            record("a", "Wii", "Sports", "Nintendo", 1.0),
            record("b", "Wii", "Sports", "Nintendo", 1.0),
            record("c", "PS3", "Action", "Sony", 1.0),
            record("d", "PS3", "Racing", "Sony", 1.0),
            record("e", "X360", "Action", "Microsoft", 1.0),
        ];
        let dataset = Dataset::from_records(records);

        assert_eq!(dataset.platforms, vec!["PS3", "Wii", "X360"]);
        assert_eq!(dataset.genres, vec!["Action", "Racing", "Sports"]);
        // `All` leads, remaining choices alphabetized.
        assert_eq!(dataset.publisher_choices[0], "All");
        assert!(dataset.publisher_choices.contains(&"Nintendo".to_string()));
        // Frequency defaults keep every platform here (fewer than five exist).
        assert!(dataset.default_platforms.contains("Wii"));
        assert!(dataset.default_platforms.contains("PS3"));
    }

    #[test]
    fn year_span_falls_back_to_domain_when_unknown() {
        let mut no_years = vec![record("a", "Wii", "Sports", "Nintendo", 1.0)];
        no_years[0].year = None;
        let dataset = Dataset::from_records(no_years);
        assert_eq!((dataset.year_min, dataset.year_max), YEAR_DOMAIN);
    }

    #[test]
    fn embedded_sample_loads_and_is_cached() {
        invalidate();
        let first = load_embedded().unwrap();
        let second = load_embedded().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!first.is_empty());
        invalidate();
    }
}
