//! Printing material table

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical and pricing properties of one filament
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProfile {
    pub material: Material,
    /// Display name
    pub name: &'static str,
    /// Density in g/cm³
    pub density: f64,
    /// Multiplier applied to the per-gram rate
    pub cost_multiplier: f64,
}

impl MaterialProfile {
    pub fn id(&self) -> &'static str {
        self.material.as_str()
    }
}

/// Supported filaments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Material {
    Pla,
    Abs,
    Petg,
    Tpu,
}

/// Reference table. Adding a material means adding a row here and a variant above.
pub static MATERIALS: [MaterialProfile; 4] = [
    MaterialProfile {
        material: Material::Pla,
        name: "PLA",
        density: 1.24,
        cost_multiplier: 1.0,
    },
    MaterialProfile {
        material: Material::Abs,
        name: "ABS",
        density: 1.04,
        cost_multiplier: 1.4,
    },
    MaterialProfile {
        material: Material::Petg,
        name: "PETG",
        density: 1.27,
        cost_multiplier: 1.2,
    },
    MaterialProfile {
        material: Material::Tpu,
        name: "TPU",
        density: 1.20,
        cost_multiplier: 1.2,
    },
];

impl Material {
    pub const ALL: [Material; 4] = [Material::Pla, Material::Abs, Material::Petg, Material::Tpu];

    /// Position in [`Material::ALL`] and [`MATERIALS`]
    pub fn index(self) -> usize {
        match self {
            Material::Pla => 0,
            Material::Abs => 1,
            Material::Petg => 2,
            Material::Tpu => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Pla => "pla",
            Material::Abs => "abs",
            Material::Petg => "petg",
            Material::Tpu => "tpu",
        }
    }

    pub fn profile(self) -> &'static MaterialProfile {
        match self {
            Material::Pla => &MATERIALS[0],
            Material::Abs => &MATERIALS[1],
            Material::Petg => &MATERIALS[2],
            Material::Tpu => &MATERIALS[3],
        }
    }

    pub fn density(self) -> f64 {
        self.profile().density
    }

    pub fn cost_multiplier(self) -> f64 {
        self.profile().cost_multiplier
    }
}

impl FromStr for Material {
    type Err = ValidationError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|material| material.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownMaterial(id.to_string()))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a material by id (`pla`, `abs`, `petg`, `tpu`)
pub fn lookup(id: &str) -> Result<&'static MaterialProfile, ValidationError> {
    id.parse::<Material>().map(Material::profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        let pla = lookup("pla").unwrap();
        assert_eq!(pla.density, 1.24);
        assert_eq!(pla.cost_multiplier, 1.0);
        assert_eq!(pla.name, "PLA");

        let abs = lookup("abs").unwrap();
        assert_eq!((abs.density, abs.cost_multiplier), (1.04, 1.4));

        let petg = lookup("petg").unwrap();
        assert_eq!((petg.density, petg.cost_multiplier), (1.27, 1.2));

        let tpu = lookup("tpu").unwrap();
        assert_eq!((tpu.density, tpu.cost_multiplier), (1.20, 1.2));
    }

    #[test]
    fn test_profiles_line_up_with_variants() {
        for material in Material::ALL {
            assert_eq!(material.profile().material, material);
            assert_eq!(material.profile().id(), material.as_str());
            assert_eq!(material.to_string().parse::<Material>(), Ok(material));
            assert_eq!(Material::ALL[material.index()], material);
            assert_eq!(MATERIALS[material.index()].material, material);
        }
    }

    #[test]
    fn test_unknown_material() {
        assert_eq!(
            lookup("nylon"),
            Err(ValidationError::UnknownMaterial("nylon".to_string()))
        );
        assert!(lookup("PLA").is_err());
        assert!(lookup("").is_err());
    }
}
