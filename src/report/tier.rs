use serde::Deserialize;

/// Minimum percentage for good standing; university policy, also the
/// end-semester examination eligibility cutoff.
pub const GOOD_STANDING_MIN: f64 = 75.0;

/// Below this, standing is critical and academic penalties apply.
pub const LOW_STANDING_MIN: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    Low,
    Critical,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Good => "Good",
            Tier::Low => "Low",
            Tier::Critical => "Critical",
        }
    }

    pub fn standing(self) -> &'static str {
        match self {
            Tier::Good => "Good Standing",
            Tier::Low => "Below Average",
            Tier::Critical => "Critical - Requires Attention",
        }
    }
}

/// Tiering thresholds. Policy constants, not derived; overridable through the
/// `[policy]` settings section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TierPolicy {
    #[serde(default = "default_good_at")]
    pub good_at: f64,
    #[serde(default = "default_low_at")]
    pub low_at: f64,
}

fn default_good_at() -> f64 {
    GOOD_STANDING_MIN
}

fn default_low_at() -> f64 {
    LOW_STANDING_MIN
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            good_at: GOOD_STANDING_MIN,
            low_at: LOW_STANDING_MIN,
        }
    }
}

impl TierPolicy {
    /// Boundary-exact: `good_at` itself is Good, `low_at` itself is Low.
    pub fn classify(&self, percentage: f64) -> Tier {
        if percentage >= self.good_at {
            Tier::Good
        } else if percentage >= self.low_at {
            Tier::Low
        } else {
            Tier::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        let policy = TierPolicy::default();
        assert_eq!(policy.classify(75.0), Tier::Good);
        assert_eq!(policy.classify(74.9), Tier::Low);
        assert_eq!(policy.classify(65.0), Tier::Low);
        assert_eq!(policy.classify(64.9), Tier::Critical);
        assert_eq!(policy.classify(0.0), Tier::Critical);
        assert_eq!(policy.classify(100.0), Tier::Good);
    }

    #[test]
    fn thresholds_are_overridable() {
        let policy = TierPolicy {
            good_at: 80.0,
            low_at: 70.0,
        };
        assert_eq!(policy.classify(79.9), Tier::Low);
        assert_eq!(policy.classify(69.9), Tier::Critical);
    }

    #[test]
    fn labels_match_portal_wording() {
        assert_eq!(Tier::Good.label(), "Good");
        assert_eq!(Tier::Low.label(), "Low");
        assert_eq!(Tier::Critical.label(), "Critical");
        assert_eq!(Tier::Good.standing(), "Good Standing");
    }
}
