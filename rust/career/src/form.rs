use serde::{Deserialize, Serialize};

pub const FORM_MAX: u8 = 100;

/// Bounded measure of recent competitive performance, in `0..=100`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormMeter(u8);

impl FormMeter {
    pub fn new(value: u8) -> Self {
        Self(value.min(FORM_MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Applies the change for a finished competitive round and returns the
    /// signed delta that was requested (before clamping).
    ///
    /// ```
    /// use quartet_career::form::FormMeter;
    ///
    /// let mut meter = FormMeter::new(50);
    /// assert_eq!(meter.apply_change(1, 16, true), 30);
    /// assert_eq!(meter.value(), 80);
    /// assert_eq!(meter.apply_change(16, 16, false), -10);
    /// assert_eq!(meter.value(), 70);
    /// ```
    pub fn apply_change(&mut self, placement: usize, total_players: usize, won: bool) -> i32 {
        let delta = form_delta(placement, total_players, won);
        let next = (i32::from(self.0) + delta).clamp(0, i32::from(FORM_MAX));
        self.0 = next as u8;
        delta
    }

    /// Deck luckiness for the next round: 1.0 at zero form, 1.15 at full form.
    pub fn luckiness(self) -> f64 {
        1.0 + (f64::from(self.0) / 100.0) * 0.15
    }
}

/// `round((placementFactor × 0.25 + (won ? 0.15 : 0) − 0.1) × 100)`.
pub fn form_delta(placement: usize, total_players: usize, won: bool) -> i32 {
    let placement_factor = if total_players <= 1 {
        1.0
    } else {
        let placement = placement.clamp(1, total_players);
        (total_players - placement) as f64 / (total_players - 1) as f64
    };
    let win_bonus = if won { 0.15 } else { 0.0 };
    ((placement_factor * 0.25 + win_bonus - 0.1) * 100.0).round() as i32
}
