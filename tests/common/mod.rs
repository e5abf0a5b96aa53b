#![allow(dead_code)]

use kubun_valuation::domain::input::ValuationInput;
use std::io::Write;

/// Unit from the reference valuation worksheet.
pub fn reference_input() -> ValuationInput {
    ValuationInput {
        inheritance_date: "2025-12-01".into(),
        construction_date: "2012-02-16".into(),
        total_floors: 10,
        floor: 7,
        exclusive_area: 63.26,
        land_area: 1306.0,
        land_share_numerator: 6608.0,
        land_share_denominator: 369_648.0,
        building_price: 6_148_686.0,
        road_price: 68_000.0,
        road_price_rate: 1.0,
        leasehold_rate: 0.5,
        rental_rate: 100.0,
    }
}

pub fn sample_input() -> ValuationInput {
    ValuationInput {
        inheritance_date: "2025-01-01".into(),
        construction_date: "2010-01-01".into(),
        total_floors: 10,
        floor: 5,
        exclusive_area: 80.5,
        land_area: 1000.0,
        land_share_numerator: 1.0,
        land_share_denominator: 100.0,
        building_price: 5_000_000.0,
        road_price: 50_000.0,
        road_price_rate: 1.0,
        leasehold_rate: 0.5,
        rental_rate: 100.0,
    }
}

pub const REFERENCE_INI: &str = r#"
[valuation]
inheritance_date = 2025-12-01
construction_date = 2012-02-16
total_floors = 10
floor = 7
exclusive_area = 63.26
land_area = 1,306.00
land_share_numerator = 6608
land_share_denominator = 369648
building_price = 6,148,686
road_price = 68000
road_price_rate = 1.0
leasehold_rate = 0.5
rental_rate = 100
"#;

pub const REFERENCE_JSON: &str = r#"{
  "inheritanceDate": "2025-12-01",
  "constructionDate": "2012-02-16",
  "totalFloors": 10,
  "floor": 7,
  "exclusiveArea": 63.26,
  "landArea": 1306.0,
  "landShareNumerator": 6608,
  "landShareDenominator": 369648,
  "buildingPrice": 6148686,
  "roadPrice": 68000,
  "roadPriceRate": 1.0,
  "leaseholdRate": 0.5,
  "rentalRate": 100
}"#;

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
