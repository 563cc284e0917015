//! Guided-breathing countdown state machine.
//!
//! A session is a fixed sequence of steps, each a phase with a whole-second
//! duration. The UI drives the machine with one [`BreathingTimer::tick`] per
//! second; the machine advances through the sequence and lands in a terminal
//! complete state, after which further ticks are no-ops.

use serde::{Deserialize, Serialize};

/// Breathing phase within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

/// One step of the configured sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub phase: Phase,
    /// Duration in seconds; zero-length steps are skipped on entry
    pub seconds: u32,
}

impl Step {
    pub fn new(phase: Phase, seconds: u32) -> Self {
        Self { phase, seconds }
    }
}

/// Build a sequence by repeating one cycle a number of times
pub fn repeat_cycle(cycle: &[Step], times: u32) -> Vec<Step> {
    let mut steps = Vec::with_capacity(cycle.len() * times as usize);
    for _ in 0..times {
        steps.extend_from_slice(cycle);
    }
    steps
}

/// The classic box-breathing cycle: 4s each of inhale, hold, exhale, rest
pub fn box_cycle() -> Vec<Step> {
    vec![
        Step::new(Phase::Inhale, 4),
        Step::new(Phase::Hold, 4),
        Step::new(Phase::Exhale, 4),
        Step::new(Phase::Rest, 4),
    ]
}

/// Countdown state machine over a configured step sequence
#[derive(Debug, Clone)]
pub struct BreathingTimer {
    steps: Vec<Step>,
    step_index: usize,
    remaining: u32,
    running: bool,
    complete: bool,
}

impl BreathingTimer {
    /// Create a paused timer positioned at the first step.
    ///
    /// An empty sequence starts out complete.
    pub fn new(steps: Vec<Step>) -> Self {
        let complete = steps.is_empty();
        let remaining = steps.first().map(|s| s.seconds).unwrap_or(0);
        let mut timer = Self {
            steps,
            step_index: 0,
            remaining,
            running: false,
            complete,
        };
        // A leading zero-length step completes immediately on entry
        timer.skip_empty_steps();
        timer
    }

    /// Phase of the current step, None once complete
    pub fn current_phase(&self) -> Option<Phase> {
        if self.complete {
            return None;
        }
        self.steps.get(self.step_index).map(|s| s.phase)
    }

    /// Index of the current step; equals the step count once complete
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Seconds left in the current step
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Begin or resume ticking
    pub fn start(&mut self) {
        if !self.complete {
            self.running = true;
        }
    }

    /// Suspend ticking; position is retained
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Return to the first step with full duration, paused
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.remaining = self.steps.first().map(|s| s.seconds).unwrap_or(0);
        self.running = false;
        self.complete = self.steps.is_empty();
        self.skip_empty_steps();
    }

    /// Advance one second.
    ///
    /// No-op while paused or after completion. When the current step's
    /// countdown reaches zero the machine moves to the next step, or to the
    /// terminal complete state at the end of the sequence (which also clears
    /// the running flag).
    pub fn tick(&mut self) {
        if !self.running || self.complete {
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.step_index += 1;
        match self.steps.get(self.step_index) {
            Some(step) => {
                self.remaining = step.seconds;
                self.skip_empty_steps();
            }
            None => self.finish(),
        }
    }

    /// Steps configured with zero seconds are passed through without a tick
    fn skip_empty_steps(&mut self) {
        while !self.complete {
            match self.steps.get(self.step_index) {
                Some(step) if step.seconds == 0 => {
                    self.step_index += 1;
                    if let Some(next) = self.steps.get(self.step_index) {
                        self.remaining = next.seconds;
                    } else {
                        self.finish();
                    }
                }
                _ => break,
            }
        }
    }

    fn finish(&mut self) {
        self.complete = true;
        self.running = false;
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_phase() -> BreathingTimer {
        BreathingTimer::new(vec![
            Step::new(Phase::Inhale, 4),
            Step::new(Phase::Hold, 4),
            Step::new(Phase::Exhale, 4),
        ])
    }

    #[test]
    fn completes_after_total_duration() {
        let mut timer = three_phase();
        timer.start();

        for i in 0..11 {
            timer.tick();
            assert!(!timer.is_complete(), "complete early at tick {}", i + 1);
        }
        timer.tick();

        assert!(timer.is_complete());
        assert!(!timer.is_running());
        assert_eq!(timer.step_index(), 3);
        assert_eq!(timer.current_phase(), None);
    }

    #[test]
    fn ticks_after_complete_are_noops() {
        let mut timer = three_phase();
        timer.start();
        for _ in 0..12 {
            timer.tick();
        }
        assert!(timer.is_complete());

        for _ in 0..10 {
            timer.tick();
        }
        assert!(timer.is_complete());
        assert_eq!(timer.step_index(), 3);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn advances_phases_in_order() {
        let mut timer = three_phase();
        timer.start();
        assert_eq!(timer.current_phase(), Some(Phase::Inhale));

        for _ in 0..4 {
            timer.tick();
        }
        assert_eq!(timer.current_phase(), Some(Phase::Hold));
        assert_eq!(timer.remaining(), 4);

        for _ in 0..4 {
            timer.tick();
        }
        assert_eq!(timer.current_phase(), Some(Phase::Exhale));
    }

    #[test]
    fn does_not_tick_while_paused() {
        let mut timer = three_phase();
        timer.tick();
        assert_eq!(timer.remaining(), 4);

        timer.start();
        timer.tick();
        assert_eq!(timer.remaining(), 3);

        timer.pause();
        timer.tick();
        assert_eq!(timer.remaining(), 3);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut timer = three_phase();
        timer.start();
        for _ in 0..6 {
            timer.tick();
        }
        assert_eq!(timer.current_phase(), Some(Phase::Hold));

        timer.reset();
        assert_eq!(timer.current_phase(), Some(Phase::Inhale));
        assert_eq!(timer.remaining(), 4);
        assert!(!timer.is_running());
        assert!(!timer.is_complete());
    }

    #[test]
    fn reset_clears_completion() {
        let mut timer = three_phase();
        timer.start();
        for _ in 0..12 {
            timer.tick();
        }
        assert!(timer.is_complete());

        timer.reset();
        assert!(!timer.is_complete());
        timer.start();
        timer.tick();
        assert_eq!(timer.remaining(), 3);
    }

    #[test]
    fn start_after_complete_does_nothing() {
        let mut timer = BreathingTimer::new(vec![Step::new(Phase::Inhale, 1)]);
        timer.start();
        timer.tick();
        assert!(timer.is_complete());

        timer.start();
        assert!(!timer.is_running());
    }

    #[test]
    fn empty_sequence_starts_complete() {
        let timer = BreathingTimer::new(vec![]);
        assert!(timer.is_complete());
        assert_eq!(timer.current_phase(), None);
    }

    #[test]
    fn zero_length_steps_are_skipped() {
        let mut timer = BreathingTimer::new(vec![
            Step::new(Phase::Inhale, 0),
            Step::new(Phase::Hold, 2),
            Step::new(Phase::Exhale, 0),
        ]);
        assert_eq!(timer.current_phase(), Some(Phase::Hold));

        timer.start();
        timer.tick();
        timer.tick();
        // Trailing zero step falls straight through to complete
        assert!(timer.is_complete());
    }

    #[test]
    fn repeated_cycles_run_back_to_back() {
        let cycle = [Step::new(Phase::Inhale, 2), Step::new(Phase::Exhale, 2)];
        let mut timer = BreathingTimer::new(repeat_cycle(&cycle, 3));
        timer.start();

        for _ in 0..12 {
            assert!(!timer.is_complete());
            timer.tick();
        }
        assert!(timer.is_complete());
        assert_eq!(timer.step_index(), 6);
    }

    #[test]
    fn box_cycle_shape() {
        let steps = box_cycle();
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.seconds == 4));
        assert_eq!(steps[3].phase, Phase::Rest);
    }
}
