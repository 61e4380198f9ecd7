//! Configuration types for the incentive engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML master-data files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the site this configuration snapshot belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteMetadata {
    /// The site code (e.g., "SITE-KPR").
    pub code: String,
    /// The human-readable name of the site.
    pub name: String,
    /// The version of this configuration snapshot.
    pub version: String,
}

/// A building on the site.
///
/// Buildings scope production natures: selecting a building narrows the
/// natures an entry can be made against.
#[derive(Debug, Clone, Deserialize)]
pub struct Building {
    /// The human-readable name of the building.
    pub name: String,
    /// A description of what the building produces.
    pub description: String,
}

/// Buildings configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingsConfig {
    /// Map of building code to building details.
    pub buildings: HashMap<String, Building>,
}

/// Whether a nature's quota is measured per worker or shared by a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionType {
    /// Quota and incentive are computed per worker independently.
    Individual,
    /// Quota and incentive are shared across a team and then allocated.
    Group,
}

impl ProductionType {
    /// Returns the snake_case label used in results and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionType::Individual => "individual",
            ProductionType::Group => "group",
        }
    }
}

/// An exact-match bonus override.
///
/// When enabled, a worker in individual mode whose produced quantity equals
/// the computed target exactly is paid this flat value instead of any tier
/// payout.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetBonus {
    /// Whether the bonus is active for this nature.
    pub enabled: bool,
    /// The flat bonus value paid on an exact match.
    pub value: Decimal,
}

/// One incentive band of a nature's tier schedule.
///
/// Bands cover `[min, max]` inclusive; a missing `max` marks the open-ended
/// top band. The payout rate is `amount` per `each` units.
#[derive(Debug, Clone, Deserialize)]
pub struct IncentiveTier {
    /// The lower bound of the band.
    pub min: Decimal,
    /// The upper bound of the band, or `None` for the open-ended top band.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// The unit denominator; the payout is per `each` units.
    pub each: Decimal,
    /// The payout per `each` units.
    pub amount: Decimal,
    /// When true, a surplus matching this band is paid at this band's rate
    /// alone instead of cascading across the lower bands.
    #[serde(default)]
    pub additional_values: bool,
}

/// A production nature: one quota configuration for a building.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionNature {
    /// The human-readable name of the nature.
    pub name: String,
    /// The building code this nature belongs to.
    pub building: String,
    /// Whether quota/incentive are per worker or shared by the team.
    pub production_type: ProductionType,
    /// The design headcount this nature's norms were set for.
    pub manpower: u32,
    /// The baseline quantity the design headcount is expected to produce
    /// in one reference shift.
    pub norms: Decimal,
    /// Optional exact-match bonus (individual mode only).
    #[serde(default)]
    pub target_bonus: Option<TargetBonus>,
    /// The incentive bands for this nature, any order; consumers sort by
    /// `min` ascending.
    pub incentives: Vec<IncentiveTier>,
}

/// Natures configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct NaturesConfig {
    /// Map of nature code to nature details.
    pub natures: HashMap<String, ProductionNature>,
}

/// A shift the site runs.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftConfig {
    /// The human-readable name of the shift.
    pub name: String,
    /// The reference number of hours a full shift represents.
    pub shift_hrs: Decimal,
}

/// Shifts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// Map of shift code to shift details.
    pub shifts: HashMap<String, ShiftConfig>,
}

/// The complete site configuration loaded from YAML files.
///
/// This struct aggregates all master data the engine consumes: buildings,
/// production natures (with their tier schedules), and shifts.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site metadata.
    metadata: SiteMetadata,
    /// Buildings on the site.
    buildings: HashMap<String, Building>,
    /// Production natures, keyed by nature code.
    natures: HashMap<String, ProductionNature>,
    /// Shifts, keyed by shift code.
    shifts: HashMap<String, ShiftConfig>,
}

impl SiteConfig {
    /// Creates a new SiteConfig from its component parts.
    pub fn new(
        metadata: SiteMetadata,
        buildings: HashMap<String, Building>,
        natures: HashMap<String, ProductionNature>,
        shifts: HashMap<String, ShiftConfig>,
    ) -> Self {
        Self {
            metadata,
            buildings,
            natures,
            shifts,
        }
    }

    /// Returns the site metadata.
    pub fn site(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Returns all buildings.
    pub fn buildings(&self) -> &HashMap<String, Building> {
        &self.buildings
    }

    /// Returns all production natures.
    pub fn natures(&self) -> &HashMap<String, ProductionNature> {
        &self.natures
    }

    /// Returns all shifts.
    pub fn shifts(&self) -> &HashMap<String, ShiftConfig> {
        &self.shifts
    }

    /// Returns the codes of the natures configured for a building.
    pub fn natures_for_building(&self, building_code: &str) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .natures
            .iter()
            .filter(|(_, nature)| nature.building == building_code)
            .map(|(code, _)| code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }
}
