use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming who operates a route.
///
/// Several carriers may serve the same pair of nodes with different
/// capacities and prices; the carrier is what tells those parallel
/// routes apart in the results.
///
/// The reserved tag [`Carrier::UNRESTRICTED_SOURCE`] marks routes whose
/// origin is exempt from balance checks. The search core never interprets
/// it; it travels with the route so downstream planners can.
///
/// # Examples
///
/// ```
/// use transfer_planner::core::carrier::Carrier;
///
/// let rail = Carrier::new("RAIL-1");
/// assert!(!rail.is_unrestricted_source());
/// assert!(Carrier::unrestricted_source().is_unrestricted_source());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Carrier(String);

impl Carrier {
    pub const UNRESTRICTED_SOURCE: &'static str = "unrestricted-source";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn unrestricted_source() -> Self {
        Self::new(Self::UNRESTRICTED_SOURCE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for routes that may draw from their origin regardless of its balance.
    pub fn is_unrestricted_source(&self) -> bool {
        self.0 == Self::UNRESTRICTED_SOURCE
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Carrier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_equality() {
        assert_eq!(Carrier::new("T1"), Carrier::from("T1"));
        assert_ne!(Carrier::new("T1"), Carrier::new("T2"));
    }

    #[test]
    fn test_unrestricted_source_tag() {
        assert!(Carrier::from("unrestricted-source").is_unrestricted_source());
        assert!(!Carrier::from("Unrestricted-Source").is_unrestricted_source());
    }
}
