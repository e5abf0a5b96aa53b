//! Input validation: the precondition gate in front of the valuation engine.
//!
//! Each field has its own ordered rule list and no rule looks at another
//! field. The first failing rule of a field is the only one reported for it.

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use super::input::{Field, ValuationInput};

/// Field-keyed validation failures, ordered by field declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        if let Entry::Vacant(slot) = self.errors.entry(field) {
            slot.insert(message.into());
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy)]
enum Check {
    NonEmpty,
    IsNumber,
    AtLeast(f64),
    GreaterThan(f64),
    AtMost(f64),
}

struct Rule {
    field: Field,
    check: Check,
    message: &'static str,
}

const fn rule(field: Field, check: Check, message: &'static str) -> Rule {
    Rule {
        field,
        check,
        message,
    }
}

const RULES: &[Rule] = &[
    rule(Field::InheritanceDate, Check::NonEmpty, "inheritance date is required"),
    rule(Field::ConstructionDate, Check::NonEmpty, "construction date is required"),
    rule(Field::TotalFloors, Check::AtLeast(1.0), "total floors must be at least 1"),
    rule(Field::Floor, Check::AtLeast(0.0), "floor must be 0 or greater"),
    rule(Field::ExclusiveArea, Check::IsNumber, "exclusive area must be a number"),
    rule(Field::ExclusiveArea, Check::GreaterThan(0.0), "exclusive area must be greater than 0"),
    rule(Field::LandArea, Check::IsNumber, "land area must be a number"),
    rule(Field::LandArea, Check::GreaterThan(0.0), "land area must be greater than 0"),
    rule(Field::LandShareNumerator, Check::IsNumber, "land share numerator must be a number"),
    rule(Field::LandShareNumerator, Check::AtLeast(1.0), "land share numerator must be at least 1"),
    rule(Field::LandShareDenominator, Check::IsNumber, "land share denominator must be a number"),
    rule(
        Field::LandShareDenominator,
        Check::AtLeast(1.0),
        "land share denominator must be at least 1",
    ),
    rule(Field::BuildingPrice, Check::IsNumber, "building price must be a number"),
    rule(Field::BuildingPrice, Check::AtLeast(0.0), "building price must be 0 or greater"),
    rule(Field::RoadPrice, Check::IsNumber, "road price must be a number"),
    rule(Field::RoadPrice, Check::AtLeast(0.0), "road price must be 0 or greater"),
    rule(Field::RoadPriceRate, Check::IsNumber, "road price rate must be a number"),
    rule(Field::RoadPriceRate, Check::AtLeast(0.0), "road price rate must be 0 or greater"),
    rule(Field::LeaseholdRate, Check::IsNumber, "leasehold rate must be a number"),
    rule(Field::LeaseholdRate, Check::AtLeast(0.0), "leasehold rate must be 0 or greater"),
    rule(Field::LeaseholdRate, Check::AtMost(1.0), "leasehold rate must be between 0 and 1"),
    rule(Field::RentalRate, Check::IsNumber, "rental rate must be a number"),
    rule(Field::RentalRate, Check::AtLeast(0.0), "rental rate must be 0 or greater"),
    rule(Field::RentalRate, Check::AtMost(100.0), "rental rate must be between 0 and 100"),
];

enum Value<'a> {
    Text(&'a str),
    Number(f64),
}

fn value_of(input: &ValuationInput, field: Field) -> Value<'_> {
    match field {
        Field::InheritanceDate => Value::Text(&input.inheritance_date),
        Field::ConstructionDate => Value::Text(&input.construction_date),
        Field::TotalFloors => Value::Number(input.total_floors as f64),
        Field::Floor => Value::Number(input.floor as f64),
        Field::ExclusiveArea => Value::Number(input.exclusive_area),
        Field::LandArea => Value::Number(input.land_area),
        Field::LandShareNumerator => Value::Number(input.land_share_numerator),
        Field::LandShareDenominator => Value::Number(input.land_share_denominator),
        Field::BuildingPrice => Value::Number(input.building_price),
        Field::RoadPrice => Value::Number(input.road_price),
        Field::RoadPriceRate => Value::Number(input.road_price_rate),
        Field::LeaseholdRate => Value::Number(input.leasehold_rate),
        Field::RentalRate => Value::Number(input.rental_rate),
    }
}

fn passes(check: Check, value: &Value<'_>) -> bool {
    match (check, value) {
        (Check::NonEmpty, Value::Text(s)) => !s.is_empty(),
        (Check::IsNumber, Value::Number(n)) => !n.is_nan(),
        (Check::AtLeast(min), Value::Number(n)) => *n >= min,
        (Check::GreaterThan(min), Value::Number(n)) => *n > min,
        (Check::AtMost(max), Value::Number(n)) => *n <= max,
        _ => true,
    }
}

/// Check `input` against every field rule.
///
/// Returns the input unchanged when it passes, otherwise the first failing
/// message for each offending field.
pub fn validate(input: ValuationInput) -> Result<ValuationInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for rule in RULES {
        if errors.contains(rule.field) {
            continue;
        }
        if !passes(rule.check, &value_of(&input, rule.field)) {
            errors.insert(rule.field, rule.message);
        }
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}
