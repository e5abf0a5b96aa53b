//! Valuation input record and its field catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes of one condominium unit, as supplied by the caller.
///
/// Dates are `YYYY-MM-DD` strings; only their calendar year is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub inheritance_date: String,
    pub construction_date: String,
    pub total_floors: i64,
    /// 0 means a basement or ground-level unit.
    pub floor: i64,
    /// Exclusive (private) floor area in m².
    pub exclusive_area: f64,
    /// Area of the whole site in m².
    pub land_area: f64,
    pub land_share_numerator: f64,
    pub land_share_denominator: f64,
    pub building_price: f64,
    /// Road price per m².
    pub road_price: f64,
    pub road_price_rate: f64,
    pub leasehold_rate: f64,
    /// Percentage of floor area under lease, 0 to 100.
    pub rental_rate: f64,
}

/// Input fields in declaration order. The derived `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    InheritanceDate,
    ConstructionDate,
    TotalFloors,
    Floor,
    ExclusiveArea,
    LandArea,
    LandShareNumerator,
    LandShareDenominator,
    BuildingPrice,
    RoadPrice,
    RoadPriceRate,
    LeaseholdRate,
    RentalRate,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::InheritanceDate,
        Field::ConstructionDate,
        Field::TotalFloors,
        Field::Floor,
        Field::ExclusiveArea,
        Field::LandArea,
        Field::LandShareNumerator,
        Field::LandShareDenominator,
        Field::BuildingPrice,
        Field::RoadPrice,
        Field::RoadPriceRate,
        Field::LeaseholdRate,
        Field::RentalRate,
    ];

    /// Wire name used in JSON documents and error maps.
    pub fn name(self) -> &'static str {
        match self {
            Field::InheritanceDate => "inheritanceDate",
            Field::ConstructionDate => "constructionDate",
            Field::TotalFloors => "totalFloors",
            Field::Floor => "floor",
            Field::ExclusiveArea => "exclusiveArea",
            Field::LandArea => "landArea",
            Field::LandShareNumerator => "landShareNumerator",
            Field::LandShareDenominator => "landShareDenominator",
            Field::BuildingPrice => "buildingPrice",
            Field::RoadPrice => "roadPrice",
            Field::RoadPriceRate => "roadPriceRate",
            Field::LeaseholdRate => "leaseholdRate",
            Field::RentalRate => "rentalRate",
        }
    }

    /// Key used in the `[valuation]` section of an INI file.
    pub fn ini_key(self) -> &'static str {
        match self {
            Field::InheritanceDate => "inheritance_date",
            Field::ConstructionDate => "construction_date",
            Field::TotalFloors => "total_floors",
            Field::Floor => "floor",
            Field::ExclusiveArea => "exclusive_area",
            Field::LandArea => "land_area",
            Field::LandShareNumerator => "land_share_numerator",
            Field::LandShareDenominator => "land_share_denominator",
            Field::BuildingPrice => "building_price",
            Field::RoadPrice => "road_price",
            Field::RoadPriceRate => "road_price_rate",
            Field::LeaseholdRate => "leasehold_rate",
            Field::RentalRate => "rental_rate",
        }
    }

    /// Human-readable label used in messages and reports.
    pub fn label(self) -> &'static str {
        match self {
            Field::InheritanceDate => "inheritance date",
            Field::ConstructionDate => "construction date",
            Field::TotalFloors => "total floors",
            Field::Floor => "floor",
            Field::ExclusiveArea => "exclusive area",
            Field::LandArea => "land area",
            Field::LandShareNumerator => "land share numerator",
            Field::LandShareDenominator => "land share denominator",
            Field::BuildingPrice => "building price",
            Field::RoadPrice => "road price",
            Field::RoadPriceRate => "road price rate",
            Field::LeaseholdRate => "leasehold rate",
            Field::RentalRate => "rental rate",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::InheritanceDate | Field::ConstructionDate)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Field::TotalFloors | Field::Floor)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
