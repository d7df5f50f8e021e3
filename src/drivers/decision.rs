use std::fmt;
use log::{debug, info, warn};
use crate::drivers::indicator::Indicator;
use crate::drivers::ActivityError;
use crate::types::IndicatorAction;
/// Scores at or below this value never win the argmax.
pub const SCORE_FLOOR: f32 = 1.0e-12;
/// Index of the largest of the first `count` scores.
///
/// The running maximum starts at [`SCORE_FLOOR`] and only a strictly greater
/// score replaces it, so ties keep the earlier index and a vector with nothing
/// above the floor yields 0.
pub fn argmax(scores: &[f32], count: usize) -> usize {
    let mut best = 0;
    let mut max = SCORE_FLOOR;
    for (idx, &score) in scores.iter().enumerate().take(count) {
        if score > max {
            max = score;
            best = idx;
        }
    }
    best
}
/// Outcome of a single decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassLabel<'a> {
    Known { index: usize, name: &'a str },
    /// The winning index has no configured action.
    Unknown { index: usize },
}
impl<'a> ClassLabel<'a> {
    pub const UNKNOWN_NAME: &'static str = "unknown";
    pub fn index(&self) -> usize {
        match *self {
            ClassLabel::Known { index, .. } | ClassLabel::Unknown { index } => index,
        }
    }
    pub fn name(&self) -> &'a str {
        match *self {
            ClassLabel::Known { name, .. } => name,
            ClassLabel::Unknown { .. } => Self::UNKNOWN_NAME,
        }
    }
    pub fn is_known(&self) -> bool {
        matches!(self, ClassLabel::Known { .. })
    }
}
impl fmt::Display for ClassLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
/// Class index -> indicator action. Indices without an entry are unknown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionMap {
    actions: Vec<Option<IndicatorAction>>,
}
impl ActionMap {
    pub fn new(actions: Vec<Option<IndicatorAction>>) -> Self {
        Self { actions }
    }
    pub fn len(&self) -> usize {
        self.actions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<IndicatorAction> {
        self.actions.get(index).copied().flatten()
    }
}
/// Turns a score vector into a class label and drives the indicator.
#[derive(Clone, Debug)]
pub struct ClassDecider {
    class_names: Vec<String>,
    actions: ActionMap,
}
impl ClassDecider {
    pub fn new(class_names: Vec<String>, actions: ActionMap) -> Result<Self, ActivityError> {
        if class_names.is_empty() {
            return Err(ActivityError::InvalidConfig(
                "at least one class name is required".into(),
            ));
        }
        if actions.len() > class_names.len() {
            return Err(ActivityError::TooManyActions {
                actions: actions.len(),
                classes: class_names.len(),
            });
        }
        Ok(Self {
            class_names,
            actions,
        })
    }
    pub fn num_classes(&self) -> usize {
        self.class_names.len()
    }
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
    pub fn decide<I: Indicator + ?Sized>(
        &self,
        scores: &[f32],
        indicator: &mut I,
    ) -> ClassLabel<'_> {
        for (name, score) in self.class_names.iter().zip(scores) {
            debug!("{name} - {score}");
        }
        let index = argmax(scores, self.num_classes());
        match self.actions.get(index) {
            Some(action) => {
                let name = self.class_names[index].as_str();
                indicator.apply(action);
                info!("prediction: {name}");
                ClassLabel::Known { index, name }
            }
            None => {
                indicator.apply(IndicatorAction::Off);
                warn!("unknown prediction class {index}, indicator off");
                ClassLabel::Unknown { index }
            }
        }
    }
}
