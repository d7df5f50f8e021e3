use std::collections::VecDeque;
use std::f32::consts::TAU;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::ActivityError;
use crate::types::{Sample, SourceState};
/// Trait representing an accelerometer that yields one sample per tick.
///
/// The source owns its own initialisation state; callers check
/// [`state`](SampleSource::state) and skip the tick when it is not ready.
pub trait SampleSource {
    fn initialise(&mut self) -> Result<(), ActivityError>;
    fn state(&self) -> SourceState;
    fn read(&mut self) -> Result<Option<Sample>, ActivityError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Sample>,
    state: SourceState,
    fail_init: bool,
}
impl ManualSource {
    /// Already initialised and ready to read.
    pub fn new(samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            state: SourceState::Ready,
            fail_init: false,
        }
    }
    /// Needs [`initialise`](SampleSource::initialise) before it yields anything.
    pub fn uninitialised(samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            state: SourceState::Uninitialised,
            ..Self::new(samples)
        }
    }
    /// Initialisation always fails, like an absent sensor.
    pub fn failing_init() -> Self {
        Self {
            state: SourceState::Uninitialised,
            fail_init: true,
            ..Self::new([])
        }
    }
}
impl SampleSource for ManualSource {
    fn initialise(&mut self) -> Result<(), ActivityError> {
        if self.fail_init {
            self.state = SourceState::Failed;
            return Err(ActivityError::SourceInit("manual source set to fail".into()));
        }
        self.state = SourceState::Ready;
        Ok(())
    }
    fn state(&self) -> SourceState {
        self.state
    }
    fn read(&mut self) -> Result<Option<Sample>, ActivityError> {
        if !self.state.is_ready() {
            return Err(ActivityError::SourceNotReady);
        }
        Ok(self.queue.pop_front())
    }
}
/// Motion pattern produced by [`SimulatedSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulatedMotion {
    Circle,
    UpDown,
    Stationary,
}
/// Synthetic accelerometer: gravity on z plus a motion pattern and noise (in g).
pub struct SimulatedSource {
    motion: SimulatedMotion,
    phase: f32,
    phase_step: f32,
    noise: f32,
    rng: StdRng,
    state: SourceState,
}
impl SimulatedSource {
    pub fn new(motion: SimulatedMotion, sample_rate_hz: f32) -> Self {
        // one movement per second
        let phase_step = if sample_rate_hz > 0.0 { TAU / sample_rate_hz } else { 0.1 };
        Self {
            motion,
            phase: 0.0,
            phase_step,
            noise: 0.02,
            rng: StdRng::from_entropy(),
            state: SourceState::Uninitialised,
        }
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise.abs();
        self
    }
    pub fn set_motion(&mut self, motion: SimulatedMotion) {
        if motion != self.motion {
            info!("simulated motion -> {motion:?}");
            self.motion = motion;
        }
    }
    fn jitter(&mut self) -> f32 {
        if self.noise == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-self.noise..=self.noise)
        }
    }
}
impl SampleSource for SimulatedSource {
    fn initialise(&mut self) -> Result<(), ActivityError> {
        self.state = SourceState::Ready;
        info!("simulated accelerometer ready ({:?})", self.motion);
        Ok(())
    }
    fn state(&self) -> SourceState {
        self.state
    }
    fn read(&mut self) -> Result<Option<Sample>, ActivityError> {
        if !self.state.is_ready() {
            warn!("simulated accelerometer read before initialise");
            return Err(ActivityError::SourceNotReady);
        }
        self.phase = (self.phase + self.phase_step) % TAU;
        let (s, c) = self.phase.sin_cos();
        let (x, y, z) = match self.motion {
            SimulatedMotion::Circle => (0.8 * c, 0.8 * s, 1.0),
            SimulatedMotion::UpDown => (0.0, 0.0, 1.0 + 0.9 * s),
            SimulatedMotion::Stationary => (0.0, 0.0, 1.0),
        };
        let sample = (x + self.jitter(), y + self.jitter(), z + self.jitter());
        Ok(Some(sample.into()))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn manual_source_replays_in_order() {
        let mut source =
            ManualSource::new([Sample::new(1.0, 0.0, 0.0), Sample::new(2.0, 0.0, 0.0)]);
        assert_eq!(source.read().unwrap(), Some(Sample::new(1.0, 0.0, 0.0)));
        assert_eq!(source.read().unwrap(), Some(Sample::new(2.0, 0.0, 0.0)));
        assert_eq!(source.read().unwrap(), None);
    }
    #[test]
    fn uninitialised_source_refuses_reads() {
        let mut source = ManualSource::uninitialised([Sample::ZERO]);
        assert_eq!(source.state(), SourceState::Uninitialised);
        assert!(matches!(source.read(), Err(ActivityError::SourceNotReady)));
        source.initialise().unwrap();
        assert_eq!(source.read().unwrap(), Some(Sample::ZERO));
    }
    #[test]
    fn failed_init_is_reported() {
        let mut source = ManualSource::failing_init();
        assert!(source.initialise().is_err());
        assert_eq!(source.state(), SourceState::Failed);
    }
    #[test]
    fn stationary_simulation_without_noise_is_gravity_only() {
        let mut source = SimulatedSource::new(SimulatedMotion::Stationary, 50.0).with_noise(0.0);
        source.initialise().unwrap();
        for _ in 0..10 {
            assert_eq!(source.read().unwrap(), Some(Sample::new(0.0, 0.0, 1.0)));
        }
    }
    #[test]
    fn up_down_simulation_moves_on_z() {
        let mut source = SimulatedSource::new(SimulatedMotion::UpDown, 20.0).with_seed(7);
        source.initialise().unwrap();
        let zs: Vec<f32> = (0..20).map(|_| source.read().unwrap().unwrap().z).collect();
        let max = zs.iter().cloned().fold(f32::MIN, f32::max);
        let min = zs.iter().cloned().fold(f32::MAX, f32::min);
        assert!(max - min > 1.0);
    }
}
