//! Receive-multiplier throttle.
//!
//! The session exchanges one frame per physical cycle; the logical command is
//! recomputed only every `multiplier` cycles. `tick()` is called once per
//! transmitted frame and reports whether this is a recompute cycle.

use fri_common::consts::DEFAULT_RECEIVE_MULTIPLIER;
use fri_common::hardware::interface::HardwareError;

/// Cycle counter gating command synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveThrottle {
    counter: u32,
    multiplier: u32,
}

impl Default for ReceiveThrottle {
    fn default() -> Self {
        Self {
            counter: 0,
            multiplier: DEFAULT_RECEIVE_MULTIPLIER,
        }
    }
}

impl ReceiveThrottle {
    /// Throttle recomputing every `multiplier` cycles.
    ///
    /// # Errors
    /// `HardwareError::ConfigError` if `multiplier` is zero.
    pub fn new(multiplier: u32) -> Result<Self, HardwareError> {
        let mut throttle = Self::default();
        throttle.set_multiplier(multiplier)?;
        Ok(throttle)
    }

    /// Cycles since the last recompute, `0..multiplier`.
    #[inline]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Cycles per recompute.
    #[inline]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Change the multiplier; applies from the next tick. A counter already
    /// past the new multiplier is clamped to `multiplier - 1`, so that tick
    /// recomputes.
    pub fn set_multiplier(&mut self, multiplier: u32) -> Result<(), HardwareError> {
        if multiplier == 0 {
            return Err(HardwareError::ConfigError(
                "receive_multiplier must be at least 1".to_string(),
            ));
        }
        self.multiplier = multiplier;
        self.counter = self.counter.min(multiplier - 1);
        Ok(())
    }

    /// Restart counting, e.g. on activation.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Advance one cycle; `true` when the command must be recomputed.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.multiplier {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_one_fires_every_cycle() {
        let mut throttle = ReceiveThrottle::default();
        for _ in 0..10 {
            assert!(throttle.tick());
            assert_eq!(throttle.counter(), 0);
        }
    }

    #[test]
    fn fires_exactly_once_per_multiplier_cycles() {
        for m in 1..=8u32 {
            let mut throttle = ReceiveThrottle::new(m).unwrap();
            let fired: Vec<bool> = (0..m * 3).map(|_| throttle.tick()).collect();
            for (i, f) in fired.iter().enumerate() {
                assert_eq!(*f, (i as u32 + 1) % m == 0, "m={m} cycle={i}");
            }
            assert_eq!(throttle.counter(), 0);
        }
    }

    #[test]
    fn counter_stays_below_multiplier() {
        let mut throttle = ReceiveThrottle::new(4).unwrap();
        for expected in [1, 2, 3, 0, 1, 2, 3, 0] {
            throttle.tick();
            assert_eq!(throttle.counter(), expected);
        }
    }

    #[test]
    fn zero_multiplier_rejected() {
        assert!(matches!(
            ReceiveThrottle::new(0),
            Err(HardwareError::ConfigError(_))
        ));
        let mut throttle = ReceiveThrottle::new(3).unwrap();
        assert!(throttle.set_multiplier(0).is_err());
        assert_eq!(throttle.multiplier(), 3);
    }

    #[test]
    fn lowering_multiplier_fires_on_next_tick() {
        let mut throttle = ReceiveThrottle::new(5).unwrap();
        throttle.tick();
        throttle.tick();
        throttle.tick();
        throttle.set_multiplier(2).unwrap();
        assert_eq!(throttle.counter(), 1);
        assert!(throttle.tick());
        assert_eq!(throttle.counter(), 0);
        assert!(!throttle.tick());
        assert!(throttle.tick());
    }

    #[test]
    fn raising_multiplier_keeps_counter() {
        let mut throttle = ReceiveThrottle::new(3).unwrap();
        throttle.tick();
        throttle.tick();
        throttle.set_multiplier(6).unwrap();
        assert_eq!(throttle.counter(), 2);
        assert!(!throttle.tick());
        assert!(!throttle.tick());
        assert!(!throttle.tick());
        assert!(throttle.tick());
    }

    #[test]
    fn reset_restarts_count() {
        let mut throttle = ReceiveThrottle::new(3).unwrap();
        throttle.tick();
        throttle.tick();
        throttle.reset();
        assert!(!throttle.tick());
        assert!(!throttle.tick());
        assert!(throttle.tick());
    }
}
