//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading site
//! master data from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    Building, BuildingsConfig, NaturesConfig, ProductionNature, ShiftConfig, ShiftsConfig,
    SiteConfig, SiteMetadata,
};

/// Loads and provides access to site configuration.
///
/// The `ConfigLoader` reads YAML master-data files from a directory and
/// provides methods to query buildings, production natures, and shifts.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/site_alpha/
/// ├── site.yaml       # Site metadata
/// ├── buildings.yaml  # Buildings on the site
/// ├── natures.yaml    # Production natures with tier schedules
/// └── shifts.yaml     # Shift definitions
/// ```
///
/// # Example
///
/// ```no_run
/// use incentive_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/site_alpha").unwrap();
///
/// // Get a nature
/// let nature = loader.get_nature("stitching_line_2").unwrap();
/// println!("Nature: {}", nature.name);
///
/// // Get a shift
/// let shift = loader.get_shift("general").unwrap();
/// println!("Shift hours: {}", shift.shift_hrs);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SiteConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/site_alpha")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use incentive_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/site_alpha")?;
    /// # Ok::<(), incentive_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load site.yaml
        let site_path = path.join("site.yaml");
        let metadata = Self::load_yaml::<SiteMetadata>(&site_path)?;

        // Load buildings.yaml
        let buildings_path = path.join("buildings.yaml");
        let buildings_config = Self::load_yaml::<BuildingsConfig>(&buildings_path)?;

        // Load natures.yaml
        let natures_path = path.join("natures.yaml");
        let natures_config = Self::load_yaml::<NaturesConfig>(&natures_path)?;

        // Load shifts.yaml
        let shifts_path = path.join("shifts.yaml");
        let shifts_config = Self::load_yaml::<ShiftsConfig>(&shifts_path)?;

        let config = SiteConfig::new(
            metadata,
            buildings_config.buildings,
            natures_config.natures,
            shifts_config.shifts,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns the site metadata.
    pub fn site(&self) -> &SiteMetadata {
        self.config.site()
    }

    /// Gets a building by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The building code (e.g., "unit_b")
    ///
    /// # Returns
    ///
    /// Returns the building if found, or `BuildingNotFound` error.
    pub fn get_building(&self, code: &str) -> EngineResult<&Building> {
        self.config
            .buildings()
            .get(code)
            .ok_or_else(|| EngineError::BuildingNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a production nature by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The nature code (e.g., "stitching_line_2")
    ///
    /// # Returns
    ///
    /// Returns the nature if found, or `NatureNotFound` error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use incentive_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/site_alpha")?;
    /// let nature = loader.get_nature("stitching_line_2")?;
    /// println!("Norms: {}", nature.norms);
    /// # Ok::<(), incentive_engine::error::EngineError>(())
    /// ```
    pub fn get_nature(&self, code: &str) -> EngineResult<&ProductionNature> {
        self.config
            .natures()
            .get(code)
            .ok_or_else(|| EngineError::NatureNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a shift by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The shift code (e.g., "general")
    ///
    /// # Returns
    ///
    /// Returns the shift if found, or `ShiftNotFound` error.
    pub fn get_shift(&self, code: &str) -> EngineResult<&ShiftConfig> {
        self.config
            .shifts()
            .get(code)
            .ok_or_else(|| EngineError::ShiftNotFound {
                code: code.to_string(),
            })
    }
}
