// src/engine.rs
use std::thread;
use std::time::Duration;
use log::{info, warn};
use crate::config::AppConfig;
use crate::drivers::{
    ActivityError, ActivityPipeline, MotionEnergyEngine, RgbIndicator, RollingWindow,
    SampleSource, SimulatedMotion, SimulatedSource, TickOutcome,
};

const CYCLE_ON: Duration = Duration::from_millis(100);
const CYCLE_OFF: Duration = Duration::from_millis(50);

pub type DemoPipeline = ActivityPipeline<SimulatedSource, MotionEnergyEngine, RgbIndicator>;

/// Build the demo pipeline: simulated accelerometer, motion-energy scoring, RGB indicator.
pub fn build(conf: &AppConfig, motion: SimulatedMotion) -> Result<DemoPipeline, ActivityError> {
    let window = RollingWindow::new(conf.model.look_back_window_size);
    let prototypes = conf.energy_prototypes().ok_or_else(|| {
        ActivityError::InvalidConfig(
            "every class needs an energy_prototype for the demo engine".into(),
        )
    })?;
    let engine = MotionEnergyEngine::new(window.capacity(), prototypes)?;
    let sample_rate_hz = 1000.0 / conf.predictor.sample_interval_ms.max(1) as f32;
    let mut source = SimulatedSource::new(motion, sample_rate_hz);
    // 初始化失败不是致命错误: tick 会跳过
    if let Err(e) = source.initialise() {
        warn!("accelerometer init failed: {e}");
    }
    let mut indicator = RgbIndicator::new();
    indicator.cycle(conf.predictor.startup_cycles, CYCLE_ON, CYCLE_OFF);
    ActivityPipeline::new(window, source, engine, conf.decider()?, indicator)
}

/// Run `ticks` control-loop iterations, switching simulated motion every `switch_every` ticks.
pub fn run(conf: &AppConfig, ticks: usize, switch_every: usize) -> Result<(), ActivityError> {
    let motions = [
        SimulatedMotion::Circle,
        SimulatedMotion::UpDown,
        SimulatedMotion::Stationary,
    ];
    let mut pipeline = build(conf, motions[0])?;
    let interval = Duration::from_millis(conf.predictor.sample_interval_ms);
    info!(
        "⚙️ predictor ready: window {} samples, {} classes",
        pipeline.window().capacity(),
        conf.classes.len()
    );
    for tick in 0..ticks {
        if switch_every > 0 {
            let motion = motions[(tick / switch_every) % motions.len()];
            pipeline.source_mut().set_motion(motion);
        }
        match pipeline.tick() {
            Ok(TickOutcome::Decided(label)) => info!("tick {tick}: {label}"),
            Ok(TickOutcome::Warming { filled, capacity }) => {
                info!("tick {tick}: waiting for data {filled} of {capacity}")
            }
            Ok(_) => {}
            // 运行时错误只记录, 不中断循环
            Err(e) => warn!("tick {tick}: {e}"),
        }
        if log::log_enabled!(log::Level::Trace) {
            pipeline.window().show();
        }
        thread::sleep(interval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ClassLabel;

    fn fast_conf() -> AppConfig {
        let mut conf = AppConfig::default();
        conf.predictor.sample_interval_ms = 100;
        conf.predictor.startup_cycles = 0;
        conf
    }

    #[test]
    fn demo_pipeline_warms_up_then_classifies() {
        let conf = fast_conf();
        let mut pipeline = build(&conf, SimulatedMotion::Stationary).unwrap();
        for _ in 1..conf.model.look_back_window_size {
            assert!(matches!(pipeline.tick().unwrap(), TickOutcome::Warming { .. }));
        }
        match pipeline.tick().unwrap() {
            TickOutcome::Decided(ClassLabel::Known { name, .. }) => assert_eq!(name, "stationary"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn missing_prototypes_are_a_config_error() {
        let mut conf = fast_conf();
        conf.classes[1].energy_prototype = None;
        assert!(matches!(
            build(&conf, SimulatedMotion::Circle).err(),
            Some(ActivityError::InvalidConfig(_))
        ));
    }
}
