// src/drivers/mod.rs
// 声明同级目录下的子模块文件
pub mod decision;
pub mod error;
pub mod indicator;
pub mod inference;
pub mod pipeline;
pub mod source;
pub mod window;
// 公开导出这些模块里的结构体，方便外部调用
pub use decision::{argmax, ActionMap, ClassDecider, ClassLabel, SCORE_FLOOR};
pub use error::ActivityError;
pub use indicator::{Indicator, RgbIndicator};
pub use inference::{motion_energy, InferenceEngine, MotionEnergyEngine};
pub use pipeline::{ActivityPipeline, TickOutcome};
pub use source::{ManualSource, SampleSource, SimulatedMotion, SimulatedSource};
pub use window::{RollingWindow, CHANNELS};
