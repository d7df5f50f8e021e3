use log::warn;
use crate::drivers::decision::{ClassDecider, ClassLabel};
use crate::drivers::error::ActivityError;
use crate::drivers::indicator::Indicator;
use crate::drivers::inference::InferenceEngine;
use crate::drivers::source::SampleSource;
use crate::drivers::window::RollingWindow;
/// What a single tick of the pipeline did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome<'a> {
    /// Source not initialised; nothing was pushed.
    SourceNotReady,
    /// Source had no sample this tick.
    NoSample,
    /// Sample pushed, window still warming up.
    Warming { filled: usize, capacity: usize },
    /// Window full but the engine was not ready.
    InferenceSkipped,
    Decided(ClassLabel<'a>),
}
/// Sample -> window -> tensor -> scores -> label, one step per call.
pub struct ActivityPipeline<S, E, I> {
    source: S,
    engine: E,
    indicator: I,
    window: RollingWindow,
    decider: ClassDecider,
    tensor: Vec<f32>,
    scores: Vec<f32>,
}
impl<S: SampleSource, E: InferenceEngine, I: Indicator> ActivityPipeline<S, E, I> {
    /// Fails if the engine's input or output shape disagrees with the window
    /// or the class table.
    pub fn new(
        window: RollingWindow,
        source: S,
        engine: E,
        decider: ClassDecider,
        indicator: I,
    ) -> Result<Self, ActivityError> {
        if engine.input_len() != window.tensor_len() {
            return Err(ActivityError::TensorLengthMismatch {
                expected: engine.input_len(),
                actual: window.tensor_len(),
            });
        }
        if engine.num_classes() != decider.num_classes() {
            return Err(ActivityError::ClassCountMismatch {
                expected: decider.num_classes(),
                actual: engine.num_classes(),
            });
        }
        let tensor = vec![0.0; window.tensor_len()];
        let scores = vec![0.0; decider.num_classes()];
        Ok(Self {
            source,
            engine,
            indicator,
            window,
            decider,
            tensor,
            scores,
        })
    }
    pub fn tick(&mut self) -> Result<TickOutcome<'_>, ActivityError> {
        if !self.source.state().is_ready() {
            warn!("accelerometer not initialised, tick skipped");
            return Ok(TickOutcome::SourceNotReady);
        }
        let Some(sample) = self.source.read()? else {
            return Ok(TickOutcome::NoSample);
        };
        self.window.push(sample);
        if !self.window.materialize_tensor(&mut self.tensor) {
            return Ok(TickOutcome::Warming {
                filled: self.window.len(),
                capacity: self.window.capacity(),
            });
        }
        if !self.engine.is_ready() {
            warn!("inference engine not ready, tick skipped");
            return Ok(TickOutcome::InferenceSkipped);
        }
        self.engine.infer(&self.tensor, &mut self.scores)?;
        let label = self.decider.decide(&self.scores, &mut self.indicator);
        Ok(TickOutcome::Decided(label))
    }
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}
