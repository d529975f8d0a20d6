//! Park-wide configuration.
//!
//! Everything that used to be a process-wide constant (map size, tile size,
//! entry lanes, visitor tunables) lives in one [`ParkConfig`] resource that is
//! inserted before [`crate::SimulationPlugin`] builds. Components receive it by
//! reference, so several independent parks can coexist in tests.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Atlas pixels per tile edge. Tile geometry is authored in this unit and
/// scaled to `tile_dimension` world units.
pub const ATLAS_TILE_SIZE: u32 = 64;

/// Width and height of the tile atlas texture, in pixels.
pub const ATLAS_TEXTURE_SIZE: u32 = 256;

// ---------------------------------------------------------------------------
// Visitor tunables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitorParams {
    /// World units per second, for straight and arc motion alike.
    pub walking_speed: f32,
    /// Upper bound for the radius of a 90 degree turn, in world units.
    pub max_turn_radius: f32,
    /// Lateral lane offset as a fraction of the tile dimension.
    pub lane_side_distance: f32,
    /// Seconds between two visitors entering the park.
    pub spawn_interval: f32,
    /// Hard cap on live visitors.
    pub max_visitors: u32,
}

impl Default for VisitorParams {
    fn default() -> Self {
        Self {
            walking_speed: 100.0,
            max_turn_radius: 50.0,
            lane_side_distance: 0.25,
            spawn_interval: 4.0,
            max_visitors: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// ParkConfig
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkConfig {
    pub map_width: i32,
    pub map_height: i32,
    /// Edge length of one tile in world units.
    pub tile_dimension: f32,
    /// Columns on the bottom edge (`y == 0`) where the park opens to the street.
    pub entry_tiles: Vec<i32>,
    /// How many tiles below the map visitors start walking from.
    pub entry_grid_distance: i32,
    pub visitor: VisitorParams,
}

impl Default for ParkConfig {
    fn default() -> Self {
        Self {
            map_width: 16,
            map_height: 16,
            tile_dimension: 200.0,
            entry_tiles: vec![7, 8],
            entry_grid_distance: 2,
            visitor: VisitorParams::default(),
        }
    }
}

impl ParkConfig {
    pub fn map_size(&self) -> IVec2 {
        IVec2::new(self.map_width, self.map_height)
    }

    /// Parses a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParkConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width <= 0 || self.map_height <= 0 {
            return Err(ConfigError::InvalidMapSize(self.map_size()));
        }
        if self.tile_dimension <= 0.0 {
            return Err(ConfigError::InvalidTileDimension(self.tile_dimension));
        }
        if let Some(&x) = self
            .entry_tiles
            .iter()
            .find(|&&x| x < 0 || x >= self.map_width)
        {
            return Err(ConfigError::EntryOutOfBounds(x));
        }
        if self.visitor.walking_speed <= 0.0 {
            return Err(ConfigError::InvalidWalkingSpeed(self.visitor.walking_speed));
        }
        if self.visitor.spawn_interval <= 0.0 {
            return Err(ConfigError::InvalidSpawnInterval(self.visitor.spawn_interval));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidMapSize(IVec2),
    InvalidTileDimension(f32),
    EntryOutOfBounds(i32),
    InvalidWalkingSpeed(f32),
    InvalidSpawnInterval(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid park config: {e}"),
            ConfigError::InvalidMapSize(size) => {
                write!(f, "map size must be positive, got {}x{}", size.x, size.y)
            }
            ConfigError::InvalidTileDimension(d) => {
                write!(f, "tile dimension must be positive, got {d}")
            }
            ConfigError::EntryOutOfBounds(x) => write!(f, "entry column {x} is outside the map"),
            ConfigError::InvalidWalkingSpeed(s) => {
                write!(f, "walking speed must be positive, got {s}")
            }
            ConfigError::InvalidSpawnInterval(s) => {
                write!(f, "visitor spawn interval must be positive, got {s}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Replaces an invalid [`ParkConfig`] in `world` with the defaults, so the
/// resources built from it never start from nonsense. Inserts the defaults
/// when no config is present.
pub fn validate_park_config(world: &mut World) {
    let Some(config) = world.get_resource::<ParkConfig>() else {
        world.insert_resource(ParkConfig::default());
        return;
    };
    if let Err(e) = config.validate() {
        warn!("ParkConfig rejected ({}), falling back to defaults", e);
        world.insert_resource(ParkConfig::default());
    }
}
