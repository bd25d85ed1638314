//! Serializing the current filtered view for download.

use super::filters::FilteredView;

/// Download column order, matching the source file.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
];

/// CSV snapshot of the view: UTF-8, comma-separated, header always present.
/// The same filter state always produces the same bytes; zero matching rows
/// produce the header line alone.
pub fn view_to_csv(view: &FilteredView<'_>) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_COLUMNS)
        .expect("writing to an in-memory buffer cannot fail");

    for record in view.records() {
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        writer
            .write_record([
                record.name.as_str(),
                record.platform.as_str(),
                year.as_str(),
                record.genre.as_str(),
                record.publisher.as_str(),
                record.na_sales.to_string().as_str(),
                record.eu_sales.to_string().as_str(),
                record.jp_sales.to_string().as_str(),
                record.other_sales.to_string().as_str(),
                record.global_sales.to_string().as_str(),
            ])
            .expect("writing to an in-memory buffer cannot fail");
    }

    let bytes = writer
        .into_inner()
        .expect("flushing an in-memory buffer cannot fail");
    String::from_utf8(bytes).expect("csv output is valid UTF-8")
}

/// Pretty JSON snapshot of the same rows.
pub fn view_to_json(view: &FilteredView<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view.records())
}

/// `cartridge-filtered-20260807_141501.csv` style download name.
pub fn export_filename(extension: &str) -> String {
    use time::{macros::format_description, OffsetDateTime};

    let slug = OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into());
    format!("cartridge-filtered-{slug}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::{Dataset, GameRecord};
    use crate::core::filters::{self, FilterState};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            GameRecord {
                name: "Theme Park: World Tour".into(),
                platform: "PS3".into(),
                year: Some(2006),
                genre: "Simulation".into(),
                publisher: "EA".into(),
                na_sales: 1.5,
                eu_sales: 2.25,
                jp_sales: 0.1,
                other_sales: 0.15,
                global_sales: 4.0,
            },
            GameRecord {
                name: "Undated, Unlabeled".into(),
                platform: "PS3".into(),
                year: None,
                genre: "Misc".into(),
                publisher: "Unknown".into(),
                na_sales: 0.5,
                eu_sales: 0.25,
                jp_sales: 0.0,
                other_sales: 0.05,
                global_sales: 0.8,
            },
        ])
    }

    #[test]
    fn csv_round_trips_header_order_and_quoting() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.select_all(&dataset);
        let csv = view_to_csv(&filters::apply(&dataset, &state));

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales"
        );
        // Embedded commas are quoted, missing years stay empty.
        assert_eq!(
            lines.next().unwrap(),
            "Theme Park: World Tour,PS3,2006,Simulation,EA,1.5,2.25,0.1,0.15,4"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Undated, Unlabeled\",PS3,,Misc,Unknown,0.5,0.25,0,0.05,0.8"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_is_reproducible_for_a_given_state() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.select_all(&dataset);
        let first = view_to_csv(&filters::apply(&dataset, &state));
        let second = view_to_csv(&filters::apply(&dataset, &state));
        assert_eq!(first, second);
    }

    #[test]
    fn zero_rows_export_header_only() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.platforms.clear();
        let csv = view_to_csv(&filters::apply(&dataset, &state));
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Name,Platform,Year,"));
    }

    #[test]
    fn json_export_carries_every_field() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.select_all(&dataset);
        let json = view_to_json(&filters::apply(&dataset, &state)).unwrap();
        assert!(json.contains("\"global_sales\": 4.0"));
        assert!(json.contains("\"publisher\": \"EA\""));
    }
}
