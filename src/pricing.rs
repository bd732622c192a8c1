//! Weight and cost estimation
//!
//! Mesh volume is scaled by an infill fraction and a safety multiplier, converted
//! to grams with the material density and clamped to a business floor/ceiling.
//! Cost is grams × material multiplier × per-gram rate × quantity.

use crate::error::ValidationError;
use crate::material::{Material, MaterialProfile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Assumed share of solid material inside the printed shell
pub const INFILL_FRACTION: f64 = 0.30;

/// Deliberate overestimate applied to the effective volume
pub const SAFETY_MULTIPLIER: f64 = 1.5;

/// Currency per gram before the material multiplier
pub const RATE_PER_GRAM: f64 = 9.0;

/// Lightest weight ever quoted (g)
pub const MIN_WEIGHT_G: f64 = 2.0;

/// Heaviest weight ever quoted (g)
pub const MAX_WEIGHT_G: f64 = 200.0;

/// mm³ × g/cm³ → g
const MM3_PER_CM3: f64 = 1000.0;

/// Tunable pricing constants
///
/// `Default` carries the production values; every field can be overridden
/// without touching the geometry code.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PricingPolicy {
    pub infill_fraction: f64,
    pub safety_multiplier: f64,
    pub rate_per_gram: f64,
    pub min_weight_g: f64,
    pub max_weight_g: f64,
    /// Replaces the table multipliers, indexed by [`Material::index`]
    pub cost_multipliers: Option<[f64; 4]>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            infill_fraction: INFILL_FRACTION,
            safety_multiplier: SAFETY_MULTIPLIER,
            rate_per_gram: RATE_PER_GRAM,
            min_weight_g: MIN_WEIGHT_G,
            max_weight_g: MAX_WEIGHT_G,
            cost_multipliers: None,
        }
    }
}

impl PricingPolicy {
    /// Printed-material volume for a raw mesh volume; the sign of `raw_volume_mm3` is dropped
    pub fn effective_volume(&self, raw_volume_mm3: f64) -> f64 {
        raw_volume_mm3.abs() * self.infill_fraction * self.safety_multiplier
    }

    /// Clamped printed weight in grams for a resolved material
    ///
    /// A NaN volume (NaN coordinates in the file) lands on the ceiling.
    pub fn weight_for(&self, raw_volume_mm3: f64, profile: &MaterialProfile) -> f64 {
        let grams = self.effective_volume(raw_volume_mm3) * profile.density / MM3_PER_CM3;
        grams.min(self.max_weight_g).max(self.min_weight_g)
    }

    /// Clamped printed weight in grams
    pub fn weight(&self, raw_volume_mm3: f64, material_id: &str) -> Result<f64, ValidationError> {
        let material: Material = material_id.parse()?;
        Ok(self.weight_for(raw_volume_mm3, material.profile()))
    }

    /// Multiplier in effect for a material under this policy
    pub fn cost_multiplier_for(&self, profile: &MaterialProfile) -> f64 {
        self.cost_multipliers
            .map_or(profile.cost_multiplier, |multipliers| {
                multipliers[profile.material.index()]
            })
    }

    /// Price of one printed unit for a resolved material
    pub fn unit_cost_for(&self, weight_g: f64, profile: &MaterialProfile) -> f64 {
        weight_g * self.cost_multiplier_for(profile) * self.rate_per_gram
    }

    /// Total price for `quantity` units; quantity is not validated here
    pub fn cost(
        &self,
        weight_g: f64,
        material_id: &str,
        quantity: u32,
    ) -> Result<f64, ValidationError> {
        Ok(self.quote(weight_g, material_id, quantity)?.total)
    }

    pub fn quote(
        &self,
        weight_g: f64,
        material_id: &str,
        quantity: u32,
    ) -> Result<Quote, ValidationError> {
        let material: Material = material_id.parse()?;
        Ok(Quote::new(
            self.unit_cost_for(weight_g, material.profile()),
            quantity,
        ))
    }
}

/// Clamped printed weight in grams using the default policy
///
/// ```rust
/// assert_eq!(stl_quote::weight(1.0, "pla").unwrap(), 2.0);
/// ```
pub fn weight(raw_volume_mm3: f64, material_id: &str) -> Result<f64, ValidationError> {
    PricingPolicy::default().weight(raw_volume_mm3, material_id)
}

/// Total price using the default policy
///
/// ```rust
/// assert_eq!(stl_quote::cost(2.0, "pla", 1).unwrap(), 18.0);
/// ```
pub fn cost(weight_g: f64, material_id: &str, quantity: u32) -> Result<f64, ValidationError> {
    PricingPolicy::default().cost(weight_g, material_id, quantity)
}

/// Unit and total price for an order line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quote {
    pub unit_cost: f64,
    pub quantity: u32,
    pub total: f64,
}

impl Quote {
    pub fn new(unit_cost: f64, quantity: u32) -> Self {
        Self {
            unit_cost,
            quantity,
            total: unit_cost * f64::from(quantity),
        }
    }
}

/// Who prints the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ManufacturingType {
    /// Buyer orders prints at manufacturer cost
    AtHome,
    /// Seller lists the part at their own price and keeps the margin
    OnDemand,
}

/// Order-level totals derived from the manufacturer cost
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingBreakdown {
    pub manufacturing_type: ManufacturingType,
    pub manufacturer_cost: f64,
    pub selling_price: Option<f64>,
    pub profit_per_unit: Option<f64>,
    pub quantity: u32,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Amount recorded on the order
    pub order_total: f64,
}

impl PricingBreakdown {
    pub fn new(
        manufacturer_cost: f64,
        quantity: u32,
        manufacturing_type: ManufacturingType,
        selling_price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let units = f64::from(quantity);
        let total_cost = manufacturer_cost * units;

        match manufacturing_type {
            ManufacturingType::AtHome => Ok(Self {
                manufacturing_type,
                manufacturer_cost,
                selling_price: None,
                profit_per_unit: None,
                quantity,
                total_cost,
                total_revenue: 0.0,
                total_profit: 0.0,
                order_total: total_cost,
            }),
            ManufacturingType::OnDemand => {
                let selling_price = selling_price
                    .filter(|price| *price > 0.0)
                    .ok_or(ValidationError::MissingSellingPrice)?;
                let profit_per_unit = selling_price - manufacturer_cost;

                Ok(Self {
                    manufacturing_type,
                    manufacturer_cost,
                    selling_price: Some(selling_price),
                    profit_per_unit: Some(profit_per_unit),
                    quantity,
                    total_cost,
                    total_revenue: selling_price * units,
                    total_profit: profit_per_unit * units,
                    order_total: selling_price,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weight_formula() {
        // 100 cm³ of PLA: 100000 × 0.3 × 1.5 × 1.24 / 1000 = 55.8 g
        assert_relative_eq!(weight(100_000.0, "pla").unwrap(), 55.8, epsilon = 1e-9);
        assert_relative_eq!(weight(100_000.0, "abs").unwrap(), 46.8, epsilon = 1e-9);
    }

    #[test]
    fn test_weight_uses_absolute_volume() {
        assert_eq!(
            weight(-100_000.0, "petg").unwrap(),
            weight(100_000.0, "petg").unwrap()
        );
    }

    #[test]
    fn test_weight_clamped() {
        assert_eq!(weight(0.0, "pla").unwrap(), MIN_WEIGHT_G);
        assert_eq!(weight(1.0e9, "tpu").unwrap(), MAX_WEIGHT_G);
    }

    #[test]
    fn test_nan_volume_hits_ceiling() {
        assert_eq!(weight(f64::NAN, "pla").unwrap(), MAX_WEIGHT_G);
    }

    #[test]
    fn test_cost() {
        assert_relative_eq!(cost(2.0, "pla", 1).unwrap(), 18.0);
        assert_relative_eq!(cost(10.0, "abs", 1).unwrap(), 126.0, epsilon = 1e-9);
        assert_relative_eq!(cost(10.0, "petg", 3).unwrap(), 324.0, epsilon = 1e-9);
        assert_eq!(cost(10.0, "tpu", 0).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_material_fails_both_stages() {
        let expected = ValidationError::UnknownMaterial("wood".to_string());
        assert_eq!(weight(1.0, "wood"), Err(expected.clone()));
        assert_eq!(cost(2.0, "wood", 1), Err(expected));
    }

    #[test]
    fn test_policy_override() {
        let policy = PricingPolicy {
            infill_fraction: 1.0,
            safety_multiplier: 1.0,
            min_weight_g: 0.0,
            ..PricingPolicy::default()
        };
        assert_relative_eq!(policy.weight(1000.0, "pla").unwrap(), 1.24, epsilon = 1e-12);

        let policy = PricingPolicy {
            rate_per_gram: 4.0,
            ..PricingPolicy::default()
        };
        assert_relative_eq!(policy.cost(2.0, "abs", 2).unwrap(), 22.4, epsilon = 1e-12);
    }

    #[test]
    fn test_multiplier_override() {
        let policy = PricingPolicy {
            cost_multipliers: Some([2.0, 1.0, 1.0, 3.0]),
            ..PricingPolicy::default()
        };
        assert_relative_eq!(policy.cost(2.0, "pla", 1).unwrap(), 36.0, epsilon = 1e-12);
        assert_relative_eq!(policy.cost(2.0, "abs", 1).unwrap(), 18.0, epsilon = 1e-12);
        assert_relative_eq!(policy.cost(2.0, "tpu", 2).unwrap(), 108.0, epsilon = 1e-12);

        // Table values untouched for the default policy
        assert_relative_eq!(cost(2.0, "abs", 1).unwrap(), 25.2, epsilon = 1e-12);
    }

    #[test]
    fn test_quote() {
        let quote = PricingPolicy::default().quote(5.0, "petg", 4).unwrap();
        assert_relative_eq!(quote.unit_cost, 54.0, epsilon = 1e-12);
        assert_eq!(quote.quantity, 4);
        assert_relative_eq!(quote.total, 216.0, epsilon = 1e-12);
    }

    #[test]
    fn test_breakdown_at_home() {
        let breakdown = PricingBreakdown::new(18.0, 3, ManufacturingType::AtHome, None).unwrap();
        assert_eq!(breakdown.order_total, 54.0);
        assert_eq!(breakdown.total_cost, 54.0);
        assert_eq!(breakdown.profit_per_unit, None);
    }

    #[test]
    fn test_breakdown_on_demand() {
        let breakdown =
            PricingBreakdown::new(18.0, 2, ManufacturingType::OnDemand, Some(30.0)).unwrap();
        assert_eq!(breakdown.profit_per_unit, Some(12.0));
        assert_eq!(breakdown.total_profit, 24.0);
        assert_eq!(breakdown.total_revenue, 60.0);
        assert_eq!(breakdown.order_total, 30.0);

        assert_eq!(
            PricingBreakdown::new(18.0, 2, ManufacturingType::OnDemand, Some(0.0)),
            Err(ValidationError::MissingSellingPrice)
        );
        assert_eq!(
            PricingBreakdown::new(18.0, 2, ManufacturingType::OnDemand, None),
            Err(ValidationError::MissingSellingPrice)
        );
    }
}
