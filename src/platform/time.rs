//! Frame timing

/// Longest gap fed to the spawners in one step (background tabs, debugger)
pub const MAX_FRAME_GAP_MS: f64 = 1000.0;

/// Converts absolute frame timestamps into elapsed milliseconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous call (0 on the first call or a bad timestamp)
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (after a restart or resume)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.5), 16.5);
        // Timestamps going backwards never yield negative time
        assert_eq!(clock.delta(1010.0), 0.0);
        assert_eq!(clock.delta(9000.0), MAX_FRAME_GAP_MS);
        // Garbage timestamps are skipped without moving the anchor
        assert_eq!(clock.delta(f64::NAN), 0.0);
        assert_eq!(clock.delta(9010.0), 10.0);
        clock.reset();
        assert_eq!(clock.delta(9500.0), 0.0);
    }
}
