use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competitive bracket. Ordered from easiest to hardest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Tier {
    Local,
    Provincial,
    National,
    Global,
}

/// Score distribution for synthetic opponents in a tier.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DifficultyCurve {
    pub range_min: f64,
    pub range_max: f64,
    /// 0.0 = scattered field, 1.0 = every rival scores near the same mean
    pub bias: f64,
}

impl DifficultyCurve {
    pub fn spread(&self) -> f64 {
        self.range_max - self.range_min
    }
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Local, Tier::Provincial, Tier::National, Tier::Global];

    /// Entrants including the player. Every tier runs a field of 16.
    pub fn player_count(self) -> usize {
        16
    }

    pub fn curve(self) -> DifficultyCurve {
        let (range_min, range_max, bias) = match self {
            Tier::Local => (-10.0, 25.0, 0.4),
            Tier::Provincial => (-8.0, 18.0, 0.4),
            Tier::National => (-6.0, 14.0, 0.7),
            Tier::Global => (-5.0, 10.0, 0.8),
        };
        DifficultyCurve {
            range_min,
            range_max,
            bias,
        }
    }

    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Local => Some(Tier::Provincial),
            Tier::Provincial => Some(Tier::National),
            Tier::National => Some(Tier::Global),
            Tier::Global => None,
        }
    }

    pub fn previous(self) -> Option<Tier> {
        match self {
            Tier::Local => None,
            Tier::Provincial => Some(Tier::Local),
            Tier::National => Some(Tier::Provincial),
            Tier::Global => Some(Tier::National),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Local => "local",
            Tier::Provincial => "provincial",
            Tier::National => "national",
            Tier::Global => "global",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Tier::Local),
            "provincial" => Ok(Tier::Provincial),
            "national" => Ok(Tier::National),
            "global" => Ok(Tier::Global),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_progression() {
        assert!(Tier::Local < Tier::Provincial);
        assert!(Tier::National < Tier::Global);
        for pair in Tier::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
        assert_eq!(Tier::Global.next(), None);
    }

    #[test]
    fn higher_tiers_are_tighter_and_no_less_biased() {
        for pair in Tier::ALL.windows(2) {
            let (lo, hi) = (pair[0].curve(), pair[1].curve());
            assert!(hi.spread() < lo.spread());
            assert!(hi.bias >= lo.bias);
            assert!(hi.range_min > lo.range_min);
        }
    }

    #[test]
    fn curve_table() {
        let local = Tier::Local.curve();
        assert_eq!((local.range_min, local.range_max, local.bias), (-10.0, 25.0, 0.4));
        let global = Tier::Global.curve();
        assert_eq!((global.range_min, global.range_max, global.bias), (-5.0, 10.0, 0.8));
        for tier in Tier::ALL {
            assert_eq!(tier.player_count(), 16);
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!("Global".parse::<Tier>(), Ok(Tier::Global));
        assert!("galactic".parse::<Tier>().is_err());
    }
}
