// src/config.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};
use crate::drivers::{ActionMap, ActivityError, ClassDecider, CHANNELS};
use crate::types::{Colour, IndicatorAction};

/// One activity class as it appears in the JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub class_name: String,
    /// Position of the single `1` is the class index in the score vector.
    pub one_hot: Vec<u8>,
    /// Colour shown when this class wins. Classes without one are reported as unknown.
    #[serde(default)]
    pub indicator: Option<Colour>,
    /// Expected window motion energy, used by the reference engine.
    #[serde(default)]
    pub energy_prototype: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub num_features: usize,
    pub look_back_window_size: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub sample_interval_ms: u64,
    #[serde(default = "default_startup_cycles")]
    pub startup_cycles: usize,
}

fn default_startup_cycles() -> usize {
    12
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub classes: Vec<ClassConfig>,
    pub model: ModelConfig,
    pub predictor: PredictorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let class = |name: &str, index: usize, colour, energy| {
            let mut one_hot = vec![0; 3];
            one_hot[index] = 1;
            ClassConfig {
                class_name: name.to_owned(),
                one_hot,
                indicator: Some(colour),
                energy_prototype: Some(energy),
            }
        };
        Self {
            classes: vec![
                class("circle", 0, Colour::Red, -0.4),
                class("up-down", 1, Colour::Blue, -0.9),
                class("stationary", 2, Colour::Green, -7.5),
            ],
            model: ModelConfig {
                num_features: 3,
                look_back_window_size: 20,
            },
            predictor: PredictorConfig {
                sample_interval_ms: 100,
                startup_cycles: default_startup_cycles(),
            },
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ActivityError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ActivityError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let conf = Self::from_json(&text)?;
        info!("loaded {} classes from {}", conf.classes.len(), path.display());
        Ok(conf)
    }

    pub fn from_json(text: &str) -> Result<Self, ActivityError> {
        let mut conf: AppConfig = serde_json::from_str(text)?;
        conf.validate()?;
        conf.classes.sort_by_key(|c| one_hot_index(&c.one_hot));
        Ok(conf)
    }

    /// Class table in score-vector order.
    pub fn class_names(&self) -> Vec<String> {
        self.classes.iter().map(|c| c.class_name.clone()).collect()
    }

    pub fn action_map(&self) -> ActionMap {
        ActionMap::new(
            self.classes
                .iter()
                .map(|c| c.indicator.map(IndicatorAction::SetColour))
                .collect(),
        )
    }

    pub fn decider(&self) -> Result<ClassDecider, ActivityError> {
        ClassDecider::new(self.class_names(), self.action_map())
    }

    /// Energy prototypes in class order, `None` if any class lacks one.
    pub fn energy_prototypes(&self) -> Option<Vec<f32>> {
        self.classes.iter().map(|c| c.energy_prototype).collect()
    }

    pub fn validate(&self) -> Result<(), ActivityError> {
        let n = self.classes.len();
        if n == 0 {
            return Err(invalid("no classes configured"));
        }
        if self.model.num_features != CHANNELS {
            return Err(invalid(format!(
                "num_features must be {CHANNELS} (x, y, z), got {}",
                self.model.num_features
            )));
        }
        let mut names = HashSet::new();
        let mut positions = HashSet::new();
        for class in &self.classes {
            if class.class_name.trim().is_empty() {
                return Err(invalid("empty class name"));
            }
            if !names.insert(class.class_name.as_str()) {
                return Err(invalid(format!("duplicate class name {}", class.class_name)));
            }
            if class.one_hot.len() != n {
                return Err(invalid(format!(
                    "class {} one_hot has length {}, expected {n}",
                    class.class_name,
                    class.one_hot.len()
                )));
            }
            let ones = class.one_hot.iter().filter(|&&v| v == 1).count();
            let zeros = class.one_hot.iter().filter(|&&v| v == 0).count();
            if ones != 1 || ones + zeros != n {
                return Err(invalid(format!(
                    "class {} one_hot must contain a single 1",
                    class.class_name
                )));
            }
            if !positions.insert(one_hot_index(&class.one_hot)) {
                return Err(invalid(format!(
                    "class {} shares its one_hot position with another class",
                    class.class_name
                )));
            }
        }
        Ok(())
    }
}

fn one_hot_index(one_hot: &[u8]) -> usize {
    one_hot.iter().position(|&v| v == 1).unwrap_or(usize::MAX)
}

fn invalid(msg: impl Into<String>) -> ActivityError {
    ActivityError::InvalidConfig(msg.into())
}
