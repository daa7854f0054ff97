//! Resend cooldown counter.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    #[must_use]
    pub fn remaining(self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_ready(self) -> bool {
        self.remaining == 0
    }

    pub fn restart(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    pub fn stop(&mut self) {
        self.remaining = 0;
    }

    /// One-second tick. Returns the seconds left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ready() {
        assert!(Cooldown::default().is_ready());
    }

    #[test]
    fn counts_down_to_zero_and_stays() {
        let mut cooldown = Cooldown::default();
        cooldown.restart(2);
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.tick(), 1);
        assert_eq!(cooldown.tick(), 0);
        assert_eq!(cooldown.tick(), 0);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn stop_clears_remaining() {
        let mut cooldown = Cooldown::default();
        cooldown.restart(60);
        cooldown.stop();
        assert_eq!(cooldown.remaining(), 0);
    }
}
