//! Physics tuning for the platformer controller

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::physics::CollisionLayers;

/// Grid-snapping parameters for horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Width of one tile cell in world units
    pub cell_width: i32,
    /// Distance from a cell edge inside which the body is snapped
    pub cell_alignment: i32,
    /// Largest correction applied by teleporting; larger ones are walked
    pub max_adjust: i32,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            cell_width: 16,
            cell_alignment: 2,
            max_adjust: 2,
        }
    }
}

/// Per-tick physics parameters for platformer bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformingConfig {
    /// Horizontal acceleration added every tick
    pub x_gravity: f32,
    /// Vertical acceleration added every tick (+Y is down)
    pub y_gravity: f32,
    /// Horizontal speed limit, `None` for unbounded
    pub max_x_speed: Option<f32>,
    /// Vertical speed limit, `None` for unbounded
    pub max_y_speed: Option<f32>,
    /// Reflect vertical speed on ceiling hits instead of pinning it to 1
    pub bounce: bool,
    /// Layers that count as solid for movement and contact queries
    pub ground_mask: CollisionLayers,
    /// Optional tile alignment applied while grounded and idle
    pub alignment: Option<AlignmentConfig>,
}

impl Default for PlatformingConfig {
    fn default() -> Self {
        Self {
            x_gravity: 0.0,
            y_gravity: 0.5,
            max_x_speed: Some(4.0),
            max_y_speed: Some(8.0),
            bounce: false,
            ground_mask: CollisionLayers::SOLID | CollisionLayers::PLATFORM,
            alignment: None,
        }
    }
}

impl PlatformingConfig {
    /// Builder pattern: Set gravity
    pub fn with_gravity(mut self, x_gravity: f32, y_gravity: f32) -> Self {
        self.x_gravity = x_gravity;
        self.y_gravity = y_gravity;
        self
    }

    /// Builder pattern: Set speed limits
    pub fn with_max_speed(mut self, max_x_speed: Option<f32>, max_y_speed: Option<f32>) -> Self {
        self.max_x_speed = max_x_speed;
        self.max_y_speed = max_y_speed;
        self
    }

    /// Builder pattern: Enable tile alignment
    pub fn with_alignment(mut self, alignment: AlignmentConfig) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Builder pattern: Set bounce behaviour
    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    /// Builder pattern: Set the solid layer mask
    pub fn with_ground_mask(mut self, ground_mask: CollisionLayers) -> Self {
        self.ground_mask = ground_mask;
        self
    }
}

/// Reject NaN and infinite values
fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

impl Config for PlatformingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_finite("x_gravity", self.x_gravity)?;
        require_finite("y_gravity", self.y_gravity)?;
        if let Some(max) = self.max_x_speed {
            require_finite("max_x_speed", max)?;
        }
        if let Some(max) = self.max_y_speed {
            require_finite("max_y_speed", max)?;
        }

        let Some(alignment) = self.alignment else {
            return Ok(());
        };

        if alignment.cell_width <= 0 {
            return Err(ConfigError::Invalid {
                field: "alignment.cell_width",
                reason: format!("must be positive, got {}", alignment.cell_width),
            });
        }
        if alignment.cell_alignment < 0 {
            return Err(ConfigError::Invalid {
                field: "alignment.cell_alignment",
                reason: format!("must not be negative, got {}", alignment.cell_alignment),
            });
        }
        if alignment.max_adjust < 0 {
            return Err(ConfigError::Invalid {
                field: "alignment.max_adjust",
                reason: format!("must not be negative, got {}", alignment.max_adjust),
            });
        }
        Ok(())
    }
}
