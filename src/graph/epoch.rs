// Tue Jan 13 2026 - Alex

/// Run-scoped counter compared against per-vertex stamps. Advancing it
/// invalidates every stamp at once, so nothing is cleared between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch {
    value: u32,
}

impl Epoch {
    pub fn new() -> Self {
        Self { value: 0 }
    }

    pub fn current(&self) -> u32 {
        self.value
    }

    /// Moves to a fresh value. Returns `true` when the counter wrapped and
    /// stored stamps must be reset by the owner.
    pub fn advance(&mut self) -> bool {
        match self.value.checked_add(1) {
            Some(next) => {
                self.value = next;
                false
            }
            None => {
                self.value = 1;
                true
            }
        }
    }

    pub fn is_current(&self, stamp: u32) -> bool {
        self.value != 0 && stamp == self.value
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_epoch_matches_nothing() {
        let epoch = Epoch::new();
        assert!(!epoch.is_current(0));
    }

    #[test]
    fn test_advance_invalidates_old_stamps() {
        let mut epoch = Epoch::new();
        epoch.advance();
        let stamp = epoch.current();
        assert!(epoch.is_current(stamp));

        epoch.advance();
        assert!(!epoch.is_current(stamp));
    }

    #[test]
    fn test_wrap_reports_reset() {
        let mut epoch = Epoch { value: u32::MAX };
        assert!(epoch.advance());
        assert_eq!(epoch.current(), 1);
    }
}
