use super::*;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn generator(seed: u64, options: GeneratorOptions) -> SalesGenerator<ChaCha8Rng> {
    SalesGenerator::new(ChaCha8Rng::seed_from_u64(seed), options, today())
}

#[test]
fn produces_requested_rows_with_sequential_ids() {
    let options = GeneratorOptions {
        rows: 25,
        ..GeneratorOptions::default()
    };
    let records: Vec<SalesRecord> = generator(7, options).collect();
    assert_eq!(records.len(), 25);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.trans_id, 1000 + i as u64);
    }
}

#[test]
fn field_ranges_hold() {
    let options = GeneratorOptions {
        rows: 500,
        ..GeneratorOptions::default()
    };
    for record in generator(11, options) {
        assert!(record.cust_id.starts_with('C') && record.cust_id.len() == 4);
        let cust: u32 = record.cust_id[1..].parse().unwrap();
        assert!((1..=100).contains(&cust));

        let prod: u32 = record.prod_id[1..].parse().unwrap();
        assert!((1..=50).contains(&prod), "prod id {}", record.prod_id);

        assert!((1..=10).contains(&record.quantity));
        assert!((5.0..=500.0).contains(&record.price.abs()));
        assert_eq!((record.price * 100.0).round() / 100.0, record.price);
        assert!(!record.cust_name.is_empty());

        match &record.category {
            Some(category) => {
                let (_, products) = CATALOG
                    .iter()
                    .find(|(name, _)| *name == category.as_str())
                    .expect("known category");
                assert!(products.contains(&record.prod_name.as_str()));
            }
            None => assert_eq!(record.prod_name, UNCATEGORIZED_PRODUCT),
        }

        let lower = today() - chrono::Duration::days(365);
        let upper = today() + chrono::Duration::days(30);
        assert!(record.txn_date >= lower && record.txn_date <= upper);
    }
}

#[test]
fn zero_rates_inject_no_defects() {
    let options = GeneratorOptions {
        rows: 300,
        null_category_rate: 0.0,
        negative_price_rate: 0.0,
        future_date_rate: 0.0,
        ..GeneratorOptions::default()
    };
    for record in generator(3, options) {
        assert!(record.category.is_some());
        assert!(record.price > 0.0);
        assert!(record.txn_date <= today());
    }
}

#[test]
fn full_rates_inject_every_defect() {
    let options = GeneratorOptions {
        rows: 50,
        null_category_rate: 1.0,
        negative_price_rate: 1.0,
        future_date_rate: 1.0,
        ..GeneratorOptions::default()
    };
    for record in generator(5, options) {
        assert_eq!(record.category, None);
        assert_eq!(record.prod_name, UNCATEGORIZED_PRODUCT);
        assert!(record.price < 0.0);
        assert!(record.txn_date > today());
    }
}

#[test]
fn same_seed_same_rows() {
    let options = GeneratorOptions {
        rows: 20,
        ..GeneratorOptions::default()
    };
    let first: Vec<SalesRecord> = generator(42, options.clone()).collect();
    let second: Vec<SalesRecord> = generator(42, options).collect();
    assert_eq!(first, second);
}

#[test]
fn csv_has_fixed_header_and_empty_missing_category() {
    let record = SalesRecord {
        trans_id: 1000,
        cust_id: "C007".to_string(),
        cust_name: "Ada Lovelace".to_string(),
        prod_id: "P012".to_string(),
        prod_name: UNCATEGORIZED_PRODUCT.to_string(),
        category: None,
        price: -12.5,
        quantity: 3,
        txn_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    };

    let mut buffer = Vec::new();
    let rows = write_sales_csv(&mut buffer, vec![record]).unwrap();
    assert_eq!(rows, 1);

    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("TRANS_ID,CUST_ID,CUST_NAME,PROD_ID,PROD_NAME,CATEGORY,PRICE,QUANTITY,TXN_DATE")
    );
    assert_eq!(
        lines.next(),
        Some("1000,C007,Ada Lovelace,P012,Generic Item,,-12.5,3,2024-07-01")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn csv_header_written_without_rows() {
    let mut buffer = Vec::new();
    let rows = write_sales_csv(&mut buffer, Vec::new()).unwrap();
    assert_eq!(rows, 0);
    assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
}

#[test]
fn file_output_creates_parent_directory() {
    let dir = std::env::temp_dir().join(format!("retail_dw_sales_{}", std::process::id()));
    let path = dir.join("nested").join("sales_data.csv");
    let options = GeneratorOptions {
        rows: 10,
        ..GeneratorOptions::default()
    };

    let rows = write_sales_file(&path, generator(9, options)).unwrap();
    assert_eq!(rows, 10);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 11);
    std::fs::remove_dir_all(&dir).unwrap();
}
