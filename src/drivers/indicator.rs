use std::thread;
use std::time::Duration;
use log::debug;
use crate::types::{Colour, IndicatorAction};
/// Something that can show the current classification.
pub trait Indicator {
    fn apply(&mut self, action: IndicatorAction);
}
/// Start-up colour sequence, `None` is a dark step.
const CYCLE_PATTERN: [Option<Colour>; 6] = [
    Some(Colour::Blue),
    None,
    Some(Colour::Red),
    None,
    Some(Colour::Green),
    None,
];
/// Model of the board's RGB LED. Only one colour is lit at a time.
#[derive(Debug, Default)]
pub struct RgbIndicator {
    last_colour: Option<Colour>,
    transitions: Vec<IndicatorAction>,
}
impl RgbIndicator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn last_colour(&self) -> Option<Colour> {
        self.last_colour
    }
    /// Every state change applied so far, oldest first.
    pub fn transitions(&self) -> &[IndicatorAction] {
        &self.transitions
    }
    /// Run the blue/off/red/off/green/off pattern `count` steps and finish dark.
    pub fn cycle(&mut self, count: usize, on: Duration, off: Duration) {
        for step in CYCLE_PATTERN.iter().cycle().take(count) {
            self.off();
            match step {
                Some(colour) => {
                    self.set_colour(*colour);
                    thread::sleep(on);
                }
                None => thread::sleep(off),
            }
        }
        self.off();
    }
    fn set_colour(&mut self, colour: Colour) {
        self.off();
        debug!("indicator -> {colour:?}");
        self.last_colour = Some(colour);
        self.transitions.push(IndicatorAction::SetColour(colour));
    }
    fn off(&mut self) {
        if self.last_colour.take().is_some() {
            debug!("indicator -> off");
            self.transitions.push(IndicatorAction::Off);
        }
    }
}
impl Indicator for RgbIndicator {
    fn apply(&mut self, action: IndicatorAction) {
        match action {
            IndicatorAction::SetColour(colour) => self.set_colour(colour),
            IndicatorAction::Off => self.off(),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn switching_colour_turns_previous_off() {
        let mut led = RgbIndicator::new();
        led.apply(IndicatorAction::SetColour(Colour::Red));
        led.apply(IndicatorAction::SetColour(Colour::Blue));
        assert_eq!(led.last_colour(), Some(Colour::Blue));
        assert_eq!(
            led.transitions(),
            &[
                IndicatorAction::SetColour(Colour::Red),
                IndicatorAction::Off,
                IndicatorAction::SetColour(Colour::Blue),
            ]
        );
    }
    #[test]
    fn off_when_dark_is_a_no_op() {
        let mut led = RgbIndicator::new();
        led.apply(IndicatorAction::Off);
        assert!(led.transitions().is_empty());
        assert_eq!(led.last_colour(), None);
    }
    #[test]
    fn cycle_visits_every_colour_and_ends_dark() {
        let mut led = RgbIndicator::new();
        led.cycle(6, Duration::ZERO, Duration::ZERO);
        assert_eq!(led.last_colour(), None);
        let lit: Vec<_> = led
            .transitions()
            .iter()
            .filter_map(|a| match a {
                IndicatorAction::SetColour(c) => Some(*c),
                IndicatorAction::Off => None,
            })
            .collect();
        assert_eq!(lit, vec![Colour::Blue, Colour::Red, Colour::Green]);
    }
}
