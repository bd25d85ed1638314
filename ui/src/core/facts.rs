//! The fun-fact generator: a fixed set of one-line observations about the
//! current slice. One is drawn uniformly at random per click and only the
//! drawn fact is computed.

use rand::Rng;

use super::aggregate;
use super::filters::FilteredView;
use super::format;

type FactFn = fn(&FilteredView<'_>) -> Option<String>;

const FACTS: &[FactFn] = &[
    best_seller,
    nintendo_output,
    busiest_year,
    regional_tastes,
    platform_average,
    european_favorite,
    platform_lifespan,
    sports_share,
];

/// Draw one fact. `None` means the drawn fact has nothing to say about the
/// current slice (for example, an empty view).
pub fn random_fact(view: &FilteredView<'_>) -> Option<String> {
    let pick = rand::thread_rng().gen_range(0..FACTS.len());
    FACTS[pick](view)
}

fn best_seller(view: &FilteredView<'_>) -> Option<String> {
    let best = aggregate::top_n(view, 1).into_iter().next()?;
    Some(format!(
        "The best-selling video game of all time is {} with {}M copies sold globally!",
        best.name,
        format::two_decimals(best.global_sales)
    ))
}

fn nintendo_output(view: &FilteredView<'_>) -> Option<String> {
    let count = view
        .records()
        .iter()
        .filter(|r| r.publisher == "Nintendo")
        .count();
    if count == 0 {
        return None;
    }
    Some(format!(
        "Nintendo has published {count} games in our dataset, more than any other publisher!"
    ))
}

fn busiest_year(view: &FilteredView<'_>) -> Option<String> {
    // Strictly-greater keeps the earliest year on tied counts.
    let (year, count) = aggregate::count_by_year(view)
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })?;
    Some(format!(
        "The most productive year for gaming was {year}, with {count} games released!"
    ))
}

fn regional_tastes(view: &FilteredView<'_>) -> Option<String> {
    let japan = genre_leader(view, |r| r.jp_sales)?;
    let north_america = genre_leader(view, |r| r.na_sales)?;
    Some(format!(
        "Japan seems to prefer {japan} games, while North America prefers {north_america} games!"
    ))
}

fn platform_average(view: &FilteredView<'_>) -> Option<String> {
    let (platform, average) = aggregate::mean_by_platform(view).into_iter().next()?;
    Some(format!(
        "The platform with the highest average sales per game is {platform}, with {}M average sales!",
        format::two_decimals(average)
    ))
}

fn european_favorite(view: &FilteredView<'_>) -> Option<String> {
    let genre = genre_leader(view, |r| r.eu_sales)?;
    Some(format!(
        "European gamers spend more on {genre} games than any other genre!"
    ))
}

fn platform_lifespan(_view: &FilteredView<'_>) -> Option<String> {
    Some("The average lifespan of a gaming platform in the dataset is approximately 7 years!".to_string())
}

fn sports_share(view: &FilteredView<'_>) -> Option<String> {
    if view.is_empty() {
        return None;
    }
    let sports = view
        .records()
        .iter()
        .filter(|r| r.genre == "Sports")
        .count();
    let share = sports as f64 / view.len() as f64 * 100.0;
    Some(format!(
        "Sports games made up {}% of all video games in our dataset!",
        format::one_decimal(share)
    ))
}

/// Genre with the largest total under `sales`, ties broken alphabetically.
fn genre_leader(view: &FilteredView<'_>, sales: fn(&super::dataset::GameRecord) -> f64) -> Option<String> {
    let mut totals: std::collections::HashMap<&str, f64> = std::collections::HashMap::new();
    for record in view.records() {
        *totals.entry(record.genre.as_str()).or_insert(0.0) += sales(record);
    }
    totals
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(genre, _)| genre.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::{Dataset, GameRecord};
    use crate::core::filters::{self, FilterState};

    fn mk(name: &str, genre: &str, publisher: &str, year: Option<u16>, sales: [f64; 5]) -> GameRecord {
        GameRecord {
            name: name.into(),
            platform: "Wii".into(),
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

    fn view_of(dataset: &Dataset) -> filters::FilteredView<'_> {
        let mut state = FilterState::initial(dataset);
        state.select_all(dataset);
        filters::apply(dataset, &state)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            mk("Wii Sports", "Sports", "Nintendo", Some(2006), [41.49, 29.02, 3.77, 8.46, 82.74]),
            mk("Wii Play", "Misc", "Nintendo", Some(2006), [14.03, 9.2, 2.93, 2.85, 29.02]),
            mk("Monster Hunter Tri", "Role-Playing", "Capcom", Some(2009), [0.68, 0.49, 1.0, 0.14, 2.31]),
        ])
    }

    #[test]
    fn best_seller_names_the_top_record() {
        let dataset = dataset();
        let fact = best_seller(&view_of(&dataset)).unwrap();
        assert!(fact.contains("Wii Sports"));
        assert!(fact.contains("82.74M"));
    }

    #[test]
    fn busiest_year_prefers_the_earliest_tie() {
        let dataset = dataset();
        let fact = busiest_year(&view_of(&dataset)).unwrap();
        assert!(fact.contains("2006"));
        assert!(fact.contains("2 games"));
    }

    #[test]
    fn regional_tastes_split_by_region() {
        let dataset = dataset();
        let fact = regional_tastes(&view_of(&dataset)).unwrap();
        assert!(fact.contains("Japan seems to prefer Sports"));
        assert!(fact.contains("North America prefers Sports"));
    }

    #[test]
    fn sports_share_formats_one_decimal() {
        let dataset = dataset();
        let fact = sports_share(&view_of(&dataset)).unwrap();
        assert!(fact.contains("33.3%"), "{fact}");
    }

    #[test]
    fn empty_view_yields_no_data_driven_fact() {
        let dataset = dataset();
        let mut state = FilterState::initial(&dataset);
        state.platforms.clear();
        let empty = filters::apply(&dataset, &state);
        assert!(best_seller(&empty).is_none());
        assert!(nintendo_output(&empty).is_none());
        assert!(busiest_year(&empty).is_none());
        assert!(sports_share(&empty).is_none());
        // The one slice-independent fact still fires.
        assert!(platform_lifespan(&empty).is_some());
    }

    #[test]
    fn random_fact_draws_from_the_fixed_set() {
        let dataset = dataset();
        let view = view_of(&dataset);
        for _ in 0..32 {
            if let Some(fact) = random_fact(&view) {
                assert!(fact.ends_with('!'));
            }
        }
    }
}
