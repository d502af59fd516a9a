use chrono::{Duration, NaiveDate};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use tracing::trace;

use super::model::{SalesRecord, CATALOG, UNCATEGORIZED_PRODUCT};

/// Row count and the rates of the data-quality defects injected on purpose
/// for the warehouse cleansing rules to catch.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub rows: usize,
    pub first_trans_id: u64,
    pub null_category_rate: f64,
    pub negative_price_rate: f64,
    pub future_date_rate: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            rows: 1000,
            first_trans_id: 1000,
            null_category_rate: 0.05,
            negative_price_rate: 0.02,
            future_date_rate: 0.05,
        }
    }
}

pub struct SalesGenerator<R: Rng> {
    rng: R,
    options: GeneratorOptions,
    today: NaiveDate,
    produced: usize,
}

impl<R: Rng> SalesGenerator<R> {
    pub fn new(rng: R, options: GeneratorOptions, today: NaiveDate) -> Self {
        Self {
            rng,
            options,
            today,
            produced: 0,
        }
    }

    pub fn next_record(&mut self) -> SalesRecord {
        let trans_id = self.options.first_trans_id + self.produced as u64;
        self.produced += 1;

        let (category, prod_name) = if self.rng.random::<f64>() < self.options.null_category_rate {
            (None, UNCATEGORIZED_PRODUCT.to_string())
        } else {
            let (category, products) = CATALOG[self.rng.random_range(0..CATALOG.len())];
            let product = products[self.rng.random_range(0..products.len())];
            (Some(category.to_string()), product.to_string())
        };

        let mut price = round_cents(self.rng.random_range(5.0..=500.0));
        if self.rng.random::<f64>() < self.options.negative_price_rate {
            price = -price;
        }

        let txn_date = if self.rng.random::<f64>() < self.options.future_date_rate {
            self.today + Duration::days(self.rng.random_range(1..=30))
        } else {
            self.today - Duration::days(self.rng.random_range(0..=365))
        };

        let record = SalesRecord {
            trans_id,
            cust_id: format!("C{:03}", self.rng.random_range(1..=100)),
            cust_name: Name().fake_with_rng(&mut self.rng),
            prod_id: format!("P{:03}", self.rng.random_range(1..=50)),
            prod_name,
            category,
            price,
            quantity: self.rng.random_range(1..=10),
            txn_date,
        };
        trace!(trans_id, "generated sales record");
        record
    }
}

impl<R: Rng> Iterator for SalesGenerator<R> {
    type Item = SalesRecord;

    fn next(&mut self) -> Option<SalesRecord> {
        if self.produced >= self.options.rows {
            return None;
        }
        Some(self.next_record())
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
