//! Device switch fade
//!
//! Keyed on the device name: a new key fades the old picture out, then the
//! new one in. The very first key only fades in.

/// Fade-out duration in seconds
pub const EXIT_SECONDS: f32 = 0.2;
/// Fade-in duration in seconds
pub const ENTER_SECONDS: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Exit(f32),
    Enter(f32),
}

#[derive(Debug, Clone)]
pub struct ViewportTransition {
    key: Option<&'static str>,
    phase: Phase,
}

impl ViewportTransition {
    pub fn new() -> Self {
        Self { key: None, phase: Phase::Idle }
    }

    /// Advance by `dt` seconds with `key` as the current content
    pub fn update(&mut self, key: &'static str, dt: f32) {
        match self.key {
            None => {
                self.key = Some(key);
                self.phase = Phase::Enter(0.0);
            }
            Some(current) if current != key => {
                self.key = Some(key);
                // Switching again mid-exit keeps the fade going
                if !matches!(self.phase, Phase::Exit(_)) {
                    self.phase = Phase::Exit(0.0);
                }
                return;
            }
            Some(_) => {}
        }

        self.phase = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::Exit(t) if t + dt >= EXIT_SECONDS => Phase::Enter(0.0),
            Phase::Exit(t) => Phase::Exit(t + dt),
            Phase::Enter(t) if t + dt >= ENTER_SECONDS => Phase::Idle,
            Phase::Enter(t) => Phase::Enter(t + dt),
        };
    }

    /// Opacity of the viewport content
    pub fn alpha(&self) -> f32 {
        match self.phase {
            Phase::Idle => 1.0,
            Phase::Exit(t) => 1.0 - (t / EXIT_SECONDS).clamp(0.0, 1.0),
            Phase::Enter(t) => (t / ENTER_SECONDS).clamp(0.0, 1.0),
        }
    }

    /// While exiting, the old picture stays on screen
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, Phase::Exit(_))
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}

impl Default for ViewportTransition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(t: &mut ViewportTransition, key: &'static str, seconds: f32) {
        let steps = (seconds / 0.01).round() as usize;
        for _ in 0..steps {
            t.update(key, 0.01);
        }
    }

    #[test]
    fn test_first_device_fades_in() {
        let mut t = ViewportTransition::new();
        t.update("Phone", 0.0);
        assert_eq!(t.alpha(), 0.0);
        run(&mut t, "Phone", 0.2);
        assert!((t.alpha() - 0.5).abs() < 0.05);
        run(&mut t, "Phone", 0.3);
        assert!(t.is_idle());
        assert_eq!(t.alpha(), 1.0);
    }

    #[test]
    fn test_switch_fades_out_then_in() {
        let mut t = ViewportTransition::new();
        run(&mut t, "Phone", 1.0);
        assert!(t.is_idle());

        t.update("Tablet", 0.01);
        assert!(t.is_exiting());
        assert_eq!(t.alpha(), 1.0);

        run(&mut t, "Tablet", 0.1);
        assert!(t.is_exiting());
        assert!(t.alpha() < 1.0);

        run(&mut t, "Tablet", 0.15);
        assert!(!t.is_exiting());
        run(&mut t, "Tablet", 0.45);
        assert!(t.is_idle());
    }

    #[test]
    fn test_same_key_does_not_restart() {
        let mut t = ViewportTransition::new();
        run(&mut t, "Phone", 1.0);
        t.update("Phone", 0.01);
        assert!(t.is_idle());
    }
}
