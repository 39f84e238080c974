//! Countdown state for the cooking timer on a recipe page.
//!
//! This type only tracks state. Driving it once per second is the job of
//! [`crate::application::CookingTimer`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed.
    Ignored,
    Counting { remaining_seconds: u32 },
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub active: bool,
    pub paused: bool,
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        match (self.active, self.paused) {
            (false, _) => TimerPhase::Idle,
            (true, false) => TimerPhase::Running,
            (true, true) => TimerPhase::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == TimerPhase::Running
    }

    /// Seeds a fresh countdown from `minutes`. Returns false (and leaves the
    /// state alone) when `minutes` is not positive.
    pub fn start(&mut self, minutes: i64) -> bool {
        let Some(seconds) = u32::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .and_then(|m| m.checked_mul(60))
        else {
            return false;
        };

        *self = Self {
            remaining_seconds: seconds,
            active: true,
            paused: false,
        };
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.active = false;
            self.paused = false;
            return TickOutcome::Completed;
        }

        TickOutcome::Counting {
            remaining_seconds: self.remaining_seconds,
        }
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase() != TimerPhase::Paused {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `M:SS`, minutes unpadded.
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
