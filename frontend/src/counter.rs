use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    RampUp,
    SteadyDrift,
}

/// Vanity counter: a fast ramp from zero to the target, then a slow random
/// drift upwards. The displayed value never decreases.
#[derive(Debug, Clone)]
pub struct VanityCounter {
    current: f64,
    target: u64,
    increment: f64,
    phase: CounterPhase,
}

impl VanityCounter {
    pub fn new(target: u64, ramp_steps: u32) -> Self {
        Self {
            current: 0.0,
            target,
            increment: target as f64 / ramp_steps.max(1) as f64,
            phase: CounterPhase::RampUp,
        }
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn displayed(&self) -> u64 {
        match self.phase {
            CounterPhase::RampUp => self.current.floor() as u64,
            CounterPhase::SteadyDrift => self.target,
        }
    }

    /// One ramp step. Returns the value to display, or `None` once the
    /// ramp is over. The step that reaches the target switches to drift.
    pub fn tick(&mut self) -> Option<u64> {
        if self.phase != CounterPhase::RampUp {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.phase = CounterPhase::SteadyDrift;
        }
        Some(self.displayed())
    }

    /// Grows the target by a random amount in `step`. No-op during the ramp.
    pub fn drift(&mut self, rng: &mut fastrand::Rng, step: RangeInclusive<u64>) -> Option<u64> {
        if self.phase != CounterPhase::SteadyDrift {
            return None;
        }
        self.target += rng.u64(step);
        Some(self.target)
    }
}

/// Thousands grouping with commas, as en-US renders it. Used where no
/// browser locale is available.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn ramp_lands_exactly_on_target() {
        let mut counter = VanityCounter::new(259_654, 75);
        let mut last = 0;
        let mut ticks = 0;
        while let Some(value) = counter.tick() {
            assert!(value >= last);
            assert!(value <= 259_654);
            last = value;
            ticks += 1;
        }
        assert_eq!(last, 259_654);
        assert!((75..=76).contains(&ticks));
        assert_eq!(counter.phase(), CounterPhase::SteadyDrift);
    }

    #[test]
    fn drift_waits_for_ramp() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut counter = VanityCounter::new(100, 4);
        assert_eq!(counter.drift(&mut rng, 2..=6), None);
        while counter.tick().is_some() {}
        let next = counter.drift(&mut rng, 2..=6).unwrap();
        assert!((102..=106).contains(&next));
        assert_eq!(counter.displayed(), next);
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let mut counter = VanityCounter::new(0, 75);
        assert_eq!(counter.tick(), Some(0));
        assert_eq!(counter.tick(), None);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1_000, "1,000")]
    #[case(259_654, "259,654")]
    #[case(1_234_567, "1,234,567")]
    fn grouping(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_grouped(value), expected);
    }

    proptest! {
        #[test]
        fn displayed_value_never_decreases(target in 0u64..5_000_000, steps in 1u32..200, seed in any::<u64>()) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut counter = VanityCounter::new(target, steps);
            let mut last = counter.displayed();
            while let Some(value) = counter.tick() {
                prop_assert!(value >= last && value <= target);
                last = value;
            }
            prop_assert_eq!(last, target);
            for _ in 0..20 {
                let value = counter.drift(&mut rng, 2..=6).unwrap();
                prop_assert!(value >= last + 2 && value <= last + 6);
                last = value;
            }
        }
    }
}
