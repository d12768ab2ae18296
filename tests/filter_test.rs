mod common;

use avocado_dashboard::filter::{filter, filter_as_dataset};
use avocado_dashboard::record::{AvocadoType, Record};
use avocado_dashboard::selection::Selection;
use common::{REGIONS, date, scenario_dataset, selection, synthetic_dataset, Lcg};

fn brute_force<'a>(records: &'a [Record], selection: &Selection) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| {
            r.region == selection.region
                && r.kind == selection.kind
                && r.date >= selection.start_date
                && r.date <= selection.end_date
        })
        .collect()
}

#[test]
fn test_scenario_albany_organic_first_two_days() {
    let dataset = scenario_dataset();
    let sel = selection("Albany", AvocadoType::Organic, "2015-01-01", "2015-01-02");

    let result = filter(&dataset, &sel);

    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.region == "Albany" && r.kind == AvocadoType::Organic));
    assert_eq!(result[0].date, date("2015-01-01"));
    assert_eq!(result[1].date, date("2015-01-02"));
}

#[test]
fn test_bounds_are_inclusive() {
    let dataset = scenario_dataset();
    let single_day = selection("Chicago", AvocadoType::Conventional, "2015-01-03", "2015-01-03");

    let result = filter(&dataset, &single_day);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].date, date("2015-01-03"));
}

#[test]
fn test_no_match_returns_empty() {
    let dataset = scenario_dataset();
    let outside = selection("Albany", AvocadoType::Organic, "2016-01-01", "2016-12-31");
    assert!(filter(&dataset, &outside).is_empty());

    let unknown = selection("Boston", AvocadoType::Organic, "2015-01-01", "2015-01-03");
    assert!(filter(&dataset, &unknown).is_empty());
}

#[test]
fn test_inverted_range_returns_empty() {
    let dataset = scenario_dataset();
    let inverted = selection("Albany", AvocadoType::Organic, "2015-01-03", "2015-01-01");
    assert!(filter(&dataset, &inverted).is_empty());
}

#[test]
fn test_matches_brute_force_on_synthetic_data() {
    let mut rng = Lcg(7);
    for seed in 0..20u64 {
        let dataset = synthetic_dataset(seed, 300);
        for _ in 0..25 {
            let start = date("2016-02-25") + chrono::Duration::days(rng.below(70) as i64);
            let end = start + chrono::Duration::days(rng.below(30) as i64);
            let kind = if rng.below(2) == 0 {
                AvocadoType::Conventional
            } else {
                AvocadoType::Organic
            };
            let sel = Selection {
                region: REGIONS[rng.below(REGIONS.len() as u64) as usize].to_string(),
                kind,
                start_date: start,
                end_date: end,
            };

            let fast = filter(&dataset, &sel);
            let slow = brute_force(&dataset, &sel);
            assert_eq!(fast, slow, "seed {} selection {:?}", seed, sel);
        }
    }
}

#[test]
fn test_output_preserves_dataset_order() {
    let dataset = synthetic_dataset(42, 500);
    let sel = Selection {
        region: "Boise".to_string(),
        kind: AvocadoType::Organic,
        start_date: date("2016-03-01"),
        end_date: date("2016-04-29"),
    };

    let result = filter(&dataset, &sel);
    let positions: Vec<usize> = result
        .iter()
        .map(|r| dataset.iter().position(|d| std::ptr::eq(d, *r)).expect("record from dataset"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_filter_is_idempotent() {
    let dataset = synthetic_dataset(3, 400);
    let sel = selection("Chicago", AvocadoType::Conventional, "2016-03-10", "2016-04-10");

    let once: Vec<Record> = filter(&dataset, &sel).into_iter().cloned().collect();
    let narrowed = filter_as_dataset(&dataset, &sel);
    let twice: Vec<Record> = filter(&narrowed, &sel).into_iter().cloned().collect();

    assert!(!once.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn test_full_span_reproduces_every_region_type_pair() {
    let dataset = synthetic_dataset(11, 250);
    let catalog = dataset.catalog();
    let (min, max) = catalog.date_span.expect("non-empty dataset");

    let mut total = 0;
    for region in &catalog.regions {
        for kind in &catalog.types {
            let sel = Selection {
                region: region.clone(),
                kind: *kind,
                start_date: min,
                end_date: max,
            };
            let expected: Vec<&Record> = dataset
                .iter()
                .filter(|r| &r.region == region && r.kind == *kind)
                .collect();
            let result = filter(&dataset, &sel);
            assert_eq!(result, expected);
            total += result.len();
        }
    }
    assert_eq!(total, dataset.len());
}
