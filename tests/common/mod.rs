#![allow(dead_code)]

use avocado_dashboard::dataset::Dataset;
use avocado_dashboard::record::{AvocadoType, Record};
use avocado_dashboard::selection::Selection;
use chrono::NaiveDate;

pub const HEADER: &str = "Date,AveragePrice,Total Volume,type,region";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(day: &str, region: &str, kind: AvocadoType, price: f64, volume: f64) -> Record {
    Record::new(date(day), region, kind, price, volume)
}

pub fn selection(region: &str, kind: AvocadoType, start: &str, end: &str) -> Selection {
    Selection {
        region: region.to_string(),
        kind,
        start_date: date(start),
        end_date: date(end),
    }
}

/// Albany and Chicago, both types, 2015-01-01..=2015-01-03, one row each
///
/// Prices encode the row: region digit (1 Albany, 2 Chicago), type digit
/// (1 conventional, 2 organic), day.
pub fn scenario_dataset() -> Dataset {
    let mut records = Vec::new();
    for (r, region) in [(1.0, "Albany"), (2.0, "Chicago")] {
        for (t, kind) in [(1.0, AvocadoType::Conventional), (2.0, AvocadoType::Organic)] {
            for day in 1..=3 {
                let price = r + t / 10.0 + day as f64 / 100.0;
                records.push(Record::new(
                    NaiveDate::from_ymd_opt(2015, 1, day).unwrap(),
                    region,
                    kind,
                    price,
                    price * 1000.0,
                ));
            }
        }
    }
    Dataset::from_records(records)
}

/// Minimal linear congruential generator for repeatable synthetic data
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

pub const REGIONS: [&str; 4] = ["Albany", "Boise", "Chicago", "Denver"];

/// Shuffled synthetic records over 60 days from 2016-03-01
pub fn synthetic_dataset(seed: u64, count: usize) -> Dataset {
    let mut rng = Lcg(seed);
    let origin = date("2016-03-01");
    let records = (0..count)
        .map(|i| {
            let kind = if rng.below(2) == 0 {
                AvocadoType::Conventional
            } else {
                AvocadoType::Organic
            };
            Record::new(
                origin + chrono::Duration::days(rng.below(60) as i64),
                REGIONS[rng.below(REGIONS.len() as u64) as usize],
                kind,
                0.5 + rng.below(200) as f64 / 100.0,
                i as f64,
            )
        })
        .collect();
    Dataset::from_records(records)
}
