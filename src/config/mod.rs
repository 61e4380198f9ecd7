//! Configuration loading and management for the Production Incentive Engine.
//!
//! This module provides functionality to load site master data from YAML
//! files, including buildings, production natures with their tier schedules,
//! and shift definitions.
//!
//! # Example
//!
//! ```no_run
//! use incentive_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/site_alpha").unwrap();
//! println!("Loaded site: {}", config.site().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Building, BuildingsConfig, IncentiveTier, NaturesConfig, ProductionNature, ProductionType,
    ShiftConfig, ShiftsConfig, SiteConfig, SiteMetadata, TargetBonus,
};
