//! Delivery service class shared across all dispatch-related crates.
//!
//! The class fixes two things at package creation: the flat price surcharge
//! and the movement cadence (how many ticks a package sits at a city before
//! its next hop).  Both are closed over here so scheduler and pricing can
//! never disagree.

/// The speed tier a package was paid for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceClass {
    /// Moves every tick.
    Overnight,
    /// Moves every 2nd tick.
    TwoDay,
    /// Moves every 3rd tick (default tier).
    #[default]
    Normal,
}

impl ServiceClass {
    /// Ticks a package must accumulate at a city before it hops.
    #[inline]
    pub fn cadence_ticks(self) -> u8 {
        match self {
            ServiceClass::Overnight => 1,
            ServiceClass::TwoDay    => 2,
            ServiceClass::Normal    => 3,
        }
    }

    /// Flat surcharge added to the base price at creation.
    #[inline]
    pub fn surcharge(self) -> f64 {
        match self {
            ServiceClass::Overnight => 20.0,
            ServiceClass::TwoDay    => 10.0,
            ServiceClass::Normal    => 0.0,
        }
    }

    /// Stable label, useful for persistence column values.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceClass::Overnight => "overnight",
            ServiceClass::TwoDay    => "twoday",
            ServiceClass::Normal    => "normal",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); `None` for unknown labels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "overnight" => Some(ServiceClass::Overnight),
            "twoday"    => Some(ServiceClass::TwoDay),
            "normal"    => Some(ServiceClass::Normal),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
