//! Simulation type; selects which migration factory family is used.

use std::str::FromStr;

use crate::CoreError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimType {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "GENERIC_SIM"))]
    Generic,
    #[cfg_attr(feature = "serde", serde(rename = "VECTOR_SIM"))]
    Vector,
    #[cfg_attr(feature = "serde", serde(rename = "MALARIA_SIM"))]
    Malaria,
    #[cfg_attr(feature = "serde", serde(rename = "DENGUE_SIM"))]
    Dengue,
    #[cfg_attr(feature = "serde", serde(rename = "ENVIRONMENTAL_SIM"))]
    Environmental,
    #[cfg_attr(feature = "serde", serde(rename = "TYPHOID_SIM"))]
    Typhoid,
    #[cfg_attr(feature = "serde", serde(rename = "POLIO_SIM"))]
    Polio,
    #[cfg_attr(feature = "serde", serde(rename = "AIRBORNE_SIM"))]
    Airborne,
    #[cfg_attr(feature = "serde", serde(rename = "TBHIV_SIM"))]
    TbHiv,
    #[cfg_attr(feature = "serde", serde(rename = "STI_SIM"))]
    Sti,
    #[cfg_attr(feature = "serde", serde(rename = "HIV_SIM"))]
    Hiv,
}

impl SimType {
    const ALL: [SimType; 11] = [
        SimType::Generic,
        SimType::Vector,
        SimType::Malaria,
        SimType::Dengue,
        SimType::Environmental,
        SimType::Typhoid,
        SimType::Polio,
        SimType::Airborne,
        SimType::TbHiv,
        SimType::Sti,
        SimType::Hiv,
    ];

    /// `true` for simulations that also migrate vectors (mosquitoes).
    #[inline]
    pub fn is_vector_based(self) -> bool {
        matches!(self, SimType::Vector | SimType::Malaria | SimType::Dengue)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimType::Generic       => "GENERIC_SIM",
            SimType::Vector        => "VECTOR_SIM",
            SimType::Malaria       => "MALARIA_SIM",
            SimType::Dengue        => "DENGUE_SIM",
            SimType::Environmental => "ENVIRONMENTAL_SIM",
            SimType::Typhoid       => "TYPHOID_SIM",
            SimType::Polio         => "POLIO_SIM",
            SimType::Airborne      => "AIRBORNE_SIM",
            SimType::TbHiv         => "TBHIV_SIM",
            SimType::Sti           => "STI_SIM",
            SimType::Hiv           => "HIV_SIM",
        }
    }
}

impl FromStr for SimType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownSimType(s.to_string()))
    }
}

impl std::fmt::Display for SimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
