#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Okay,
    Bad,
    Awful,
}

impl Verdict {
    /// Rates a finished round by its score relative to the range it was
    /// played against. Lower is better; a give-up scores the full range and
    /// always lands in Awful.
    pub fn rate(score: u32, range_max: u32) -> Verdict {
        // guard the denominator when the range is unavailable
        let denominator = if range_max > 0 {
            range_max
        } else if score > 0 {
            score
        } else {
            1
        };
        let pct = f64::from(score) / f64::from(denominator);
        if pct <= 0.2 {
            Verdict::Good
        } else if pct <= 0.4 {
            Verdict::Okay
        } else if pct <= 0.7 {
            Verdict::Bad
        } else {
            Verdict::Awful
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::Good => "Good",
            Verdict::Okay => "Okay",
            Verdict::Bad => "Bad",
            Verdict::Awful => "Awful",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(Verdict::rate(20, 100), Verdict::Good);
        assert_eq!(Verdict::rate(21, 100), Verdict::Okay);
        assert_eq!(Verdict::rate(40, 100), Verdict::Okay);
        assert_eq!(Verdict::rate(41, 100), Verdict::Bad);
        assert_eq!(Verdict::rate(70, 100), Verdict::Bad);
        assert_eq!(Verdict::rate(71, 100), Verdict::Awful);
    }

    #[test]
    fn test_boundaries_hold_on_other_ranges() {
        assert_eq!(Verdict::rate(2, 10), Verdict::Good);
        assert_eq!(Verdict::rate(10, 50), Verdict::Good);
        assert_eq!(Verdict::rate(20, 50), Verdict::Okay);
        assert_eq!(Verdict::rate(35, 50), Verdict::Bad);
        assert_eq!(Verdict::rate(36, 50), Verdict::Awful);
    }

    #[test]
    fn test_give_up_penalty_is_awful() {
        // full-range score, e.g. giving up on a 1-10 round
        assert_eq!(Verdict::rate(10, 10), Verdict::Awful);
    }

    #[test]
    fn test_zero_range_falls_back_to_score() {
        assert_eq!(Verdict::rate(5, 0), Verdict::Awful);
        assert_eq!(Verdict::rate(0, 0), Verdict::Good);
    }
}
