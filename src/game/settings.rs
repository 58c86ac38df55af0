use serde::{Deserialize, Serialize};

use crate::config::Validate;

fn default_food_density_threshold() -> f32 {
    0.8
}

/// Tuning parameters of the simulation. These deliberately live in config
/// rather than as constants: deployed variants of this game disagree on the
/// exact values (speed increments of 0.3 and 0.4 both exist in the wild).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub field_width: usize,
    pub field_height: usize,
    /// Starting pace in ticks (snake steps) per second.
    pub base_speed: f32,
    /// Added to the pace for every food eaten.
    pub speed_increment: f32,
    /// Difficulty ceiling for the pace.
    pub max_speed: f32,
    /// Occupancy fraction above which food placement stops rejection
    /// sampling and draws from the free cells directly.
    #[serde(default = "default_food_density_threshold")]
    pub food_density_threshold: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
            base_speed: 6.0,
            speed_increment: 0.4,
            max_speed: 30.0,
            food_density_threshold: default_food_density_threshold(),
        }
    }
}

impl Validate for SimulationSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 10 || self.field_width > 100 {
            return Err("field_width must be between 10 and 100".to_string());
        }
        if self.field_height < 10 || self.field_height > 100 {
            return Err("field_height must be between 10 and 100".to_string());
        }
        if self.base_speed < 1.0 {
            return Err("base_speed must be at least 1 tick per second".to_string());
        }
        if !(0.0..=5.0).contains(&self.speed_increment) {
            return Err("speed_increment must be between 0.0 and 5.0".to_string());
        }
        if self.max_speed < self.base_speed {
            return Err("max_speed must not be below base_speed".to_string());
        }
        if self.max_speed > 240.0 {
            return Err("max_speed must not exceed 240".to_string());
        }
        if self.food_density_threshold <= 0.0 || self.food_density_threshold > 1.0 {
            return Err("food_density_threshold must be greater than 0 and at most 1".to_string());
        }
        Ok(())
    }
}
