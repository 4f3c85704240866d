//! Synthetic sales data for demos and smoke tests.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::types::{Dataset, Record, Value, record};
use crate::utils::round_to;

/// Products with their base unit price.
const PRODUCTS: [(&str, f64); 6] = [
    ("Laptop", 35000.0),
    ("Smartphone", 25000.0),
    ("Tablet", 12000.0),
    ("Headphones", 3000.0),
    ("Monitor", 10000.0),
    ("Smartwatch", 8000.0),
];

const REGIONS: [&str; 5] = ["Taipei", "Taichung", "Kaohsiung", "Hsinchu", "Tainan"];

/// Column order of [`sales_dataset`].
pub const SALES_HEADERS: [&str; 7] = [
    "Date",
    "Product",
    "Region",
    "Sales",
    "Cost",
    "Profit",
    "Satisfaction",
];

/// One year (2023) of sales records, 5 to 8 per month, sorted by date.
///
/// Sales vary ±20% around the product's base price, cost is 65-80% of
/// sales and satisfaction is a 3.5-5.0 score with one decimal. The same
/// seed always yields the same dataset.
pub fn sales_dataset(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records: Vec<Record> = Vec::new();

    for month in 1..=12 {
        let rows = rng.gen_range(5..=8);
        for _ in 0..rows {
            let day = rng.gen_range(1..=28);
            let (product, base_price) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
            let region = REGIONS[rng.gen_range(0..REGIONS.len())];

            let sales = (base_price * (0.8 + rng.r#gen::<f64>() * 0.4)).floor();
            let cost = (sales * (0.65 + rng.r#gen::<f64>() * 0.15)).floor();
            let satisfaction = round_to(3.5 + rng.r#gen::<f64>() * 1.5, 1);

            records.push(record([
                ("Date", Value::from(format!("2023-{month:02}-{day:02}"))),
                ("Product", Value::from(product)),
                ("Region", Value::from(region)),
                ("Sales", Value::from(sales)),
                ("Cost", Value::from(cost)),
                ("Profit", Value::from(sales - cost)),
                ("Satisfaction", Value::from(satisfaction)),
            ]));
        }
    }

    records.sort_by(|a, b| {
        let date = |r: &Record| r.get("Date").map(|v| v.to_text().into_owned()).unwrap_or_default();
        date(a).cmp(&date(b))
    });

    Dataset::new(
        SALES_HEADERS.iter().map(|h| h.to_string()).collect(),
        records,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(sales_dataset(7), sales_dataset(7));
    }

    #[test]
    fn test_row_count_and_order() {
        let ds = sales_dataset(42);
        assert!((60..=96).contains(&ds.len()));

        let dates: Vec<String> = ds
            .column_values("Date")
            .map(|v| v.to_text().into_owned())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert!(dates[0].starts_with("2023-01-"));
        assert!(dates[dates.len() - 1].starts_with("2023-12-"));
    }

    #[test]
    fn test_value_ranges() {
        let ds = sales_dataset(1);
        for row in 0..ds.len() {
            let sales = ds.value(row, "Sales").as_number().unwrap();
            let cost = ds.value(row, "Cost").as_number().unwrap();
            let profit = ds.value(row, "Profit").as_number().unwrap();
            let satisfaction = ds.value(row, "Satisfaction").as_number().unwrap();

            assert!(sales >= 2400.0 && sales <= 42000.0);
            assert!(cost <= sales);
            assert_eq!(profit, sales - cost);
            assert!((3.5..=5.0).contains(&satisfaction));
        }
    }

    #[test]
    fn test_demo_profiles_as_expected() {
        let result = crate::profiler::analyze(&sales_dataset(3)).unwrap();
        assert_eq!(result.column_type("Date"), Some(ColumnType::Date));
        assert_eq!(result.column_type("Product"), Some(ColumnType::Text));
        assert_eq!(result.column_type("Sales"), Some(ColumnType::Number));
        assert_eq!(result.numeric_columns().len(), 4);
        assert_eq!(result.recommendations.len(), 4);
    }
}
