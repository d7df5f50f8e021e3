// src/types.rs
use serde::{Deserialize, Serialize};

/// One tri-axial accelerometer reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample {
    pub const ZERO: Sample = Sample { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<(f32, f32, f32)> for Sample {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

// 指示灯颜色
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Green,
    Blue,
}

/// Discrete action the indicator device understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorAction {
    SetColour(Colour),
    Off,
}

// 传感器状态 (取代全局 "已初始化" 标志)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    Uninitialised,
    Ready,
    Failed,
}

impl SourceState {
    pub fn is_ready(self) -> bool {
        self == SourceState::Ready
    }
}
