//! Contest stopwatch with an optional countdown.
//!
//! Display aid only. It is driven by one [`ContestTimer::tick`] per second from
//! the event loop and never decides whether a contest is open.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    CountdownFinished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestTimer {
    elapsed_secs: u64,
    countdown_secs: Option<u64>,
    running: bool,
}

impl ContestTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn countdown_secs(&self) -> Option<u64> {
        self.countdown_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and zero everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Arm a countdown of `minutes` and start running.
    pub fn start_countdown(&mut self, minutes: u64) {
        self.countdown_secs = Some(minutes.saturating_mul(60));
        self.running = true;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.elapsed_secs += 1;

        match self.countdown_secs {
            Some(remaining) if remaining > 0 => {
                let remaining = remaining - 1;
                self.countdown_secs = Some(remaining);
                if remaining == 0 {
                    self.running = false;
                    return Some(TimerEvent::CountdownFinished);
                }
                None
            }
            _ => None,
        }
    }

    /// Countdown if armed, otherwise the stopwatch.
    pub fn display(&self) -> String {
        format_mm_ss(self.countdown_secs.unwrap_or(self.elapsed_secs))
    }
}

/// `MM:SS`; minutes grow past 99 rather than wrapping.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_timer_does_not_advance() {
        let mut timer = ContestTimer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.elapsed_secs(), 0);
        timer.toggle();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);
        assert_eq!(timer.display(), "00:02");
    }

    #[test]
    fn test_countdown_finishes_once_and_stops() {
        let mut timer = ContestTimer::new();
        timer.start_countdown(1);
        assert!(timer.is_running());
        assert_eq!(timer.display(), "01:00");

        let events: Vec<_> = (0..60).filter_map(|_| timer.tick()).collect();
        assert_eq!(events, vec![TimerEvent::CountdownFinished]);
        assert!(!timer.is_running());
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_reset_clears_countdown() {
        let mut timer = ContestTimer::new();
        timer.start_countdown(5);
        timer.tick();
        timer.reset();
        assert_eq!(timer, ContestTimer::default());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(125), "02:05");
        assert_eq!(format_mm_ss(6000), "100:00");
    }
}
