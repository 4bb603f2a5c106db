//! Discount code hints hidden around the storefront.
//!
//! None of this touches the cart or pricing.

/// Logged once when a storefront starts.
pub const STARTUP_HINT: &str =
    "You found the first secret code: GONCY10. Now look for the other two to get a bigger discount.";

/// Logged on the fifth title click.
pub const CLICK_HINT: &str = "You found a new secret code: AGUANTEWALLBIT";

/// Shown as a banner on the third title click.
pub const BANNER_HINT: &str = "You found the third secret code: RAZER. Now you can apply the discount.";

/// Where a hint should surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// Show a transient banner.
    Banner(&'static str),

    /// Write to the log/console only.
    Console(&'static str),
}

const BANNER_CLICK: u8 = 3;
const CONSOLE_CLICK: u8 = 5;

/// Counts clicks on the storefront title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleClicks {
    count: u8,
}

impl TitleClicks {
    /// Register a click, returning any hint it unlocks.
    ///
    /// The counter resets after the console hint, so the cycle repeats.
    pub fn click(&mut self) -> Option<Hint> {
        self.count = self.count.saturating_add(1);

        match self.count {
            BANNER_CLICK => Some(Hint::Banner(BANNER_HINT)),
            CONSOLE_CLICK => {
                self.count = 0;
                Some(Hint::Console(CLICK_HINT))
            }
            _ => None,
        }
    }

    /// Clicks since the last reset.
    pub fn count(self) -> u8 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_click_shows_banner_fifth_logs_and_resets() {
        let mut clicks = TitleClicks::default();

        let hints: Vec<Option<Hint>> = (0..5).map(|_| clicks.click()).collect();

        assert_eq!(
            hints,
            vec![
                None,
                None,
                Some(Hint::Banner(BANNER_HINT)),
                None,
                Some(Hint::Console(CLICK_HINT)),
            ]
        );
        assert_eq!(clicks.count(), 0);
    }

    #[test]
    fn cycle_repeats_after_reset() {
        let mut clicks = TitleClicks::default();

        for _ in 0..5 {
            clicks.click();
        }

        let hints: Vec<Option<Hint>> = (0..3).map(|_| clicks.click()).collect();

        assert_eq!(hints.last(), Some(&Some(Hint::Banner(BANNER_HINT))));
    }
}
