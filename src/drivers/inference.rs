//! Inference boundary.
//!
//! The real classifier is a neural network that lives outside this crate. It
//! only needs the flat window tensor and must fill one score per class.
//! [`MotionEnergyEngine`] is a small stand-in used by the demo runner and the
//! tests: it scores a window by how much it moves.
use log::debug;
use ndarray::{ArrayView2, Axis};
use crate::drivers::window::CHANNELS;
use crate::drivers::ActivityError;
pub trait InferenceEngine {
    /// Number of floats the engine expects as input.
    fn input_len(&self) -> usize;
    /// Number of scores the engine writes.
    fn num_classes(&self) -> usize;
    fn is_ready(&self) -> bool {
        true
    }
    fn infer(&mut self, input: &[f32], scores: &mut [f32]) -> Result<(), ActivityError>;
}
/// Log-power of a window: `ln(sum of per-axis variance + 1e-6)`.
pub fn motion_energy(window: ArrayView2<'_, f32>) -> f32 {
    if window.nrows() == 0 {
        return 1.0e-6_f32.ln();
    }
    let variance: f32 = window.var_axis(Axis(0), 0.0).sum();
    (variance + 1.0e-6).ln()
}
/// Scores each class by distance between the window's motion energy and a
/// per-class energy prototype, softmax-normalised.
pub struct MotionEnergyEngine {
    window_len: usize,
    prototypes: Vec<f32>,
}
impl MotionEnergyEngine {
    pub fn new(window_len: usize, prototypes: Vec<f32>) -> Result<Self, ActivityError> {
        if prototypes.is_empty() {
            return Err(ActivityError::InvalidConfig(
                "motion energy engine needs at least one prototype".into(),
            ));
        }
        Ok(Self {
            window_len: window_len.max(1),
            prototypes,
        })
    }
}
impl InferenceEngine for MotionEnergyEngine {
    fn input_len(&self) -> usize {
        self.window_len * CHANNELS
    }
    fn num_classes(&self) -> usize {
        self.prototypes.len()
    }
    fn infer(&mut self, input: &[f32], scores: &mut [f32]) -> Result<(), ActivityError> {
        if input.len() != self.input_len() {
            return Err(ActivityError::TensorLengthMismatch {
                expected: self.input_len(),
                actual: input.len(),
            });
        }
        if scores.len() != self.num_classes() {
            return Err(ActivityError::ClassCountMismatch {
                expected: self.num_classes(),
                actual: scores.len(),
            });
        }
        let view = ArrayView2::from_shape((self.window_len, CHANNELS), input).map_err(|e| {
            ActivityError::InvalidConfig(format!("cannot view tensor as window: {e}"))
        })?;
        let energy = motion_energy(view);
        debug!("window motion energy {energy:.3}");
        // softmax over negative squared distance, shifted by the max for stability
        let logits = self
            .prototypes
            .iter()
            .map(|p| -(energy - p).powi(2));
        let max = logits.clone().fold(f32::MIN, f32::max);
        let mut total = 0.0;
        for (score, logit) in scores.iter_mut().zip(logits) {
            *score = (logit - max).exp();
            total += *score;
        }
        for score in scores.iter_mut() {
            *score /= total;
        }
        Ok(())
    }
}
