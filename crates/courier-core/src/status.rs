//! Package lifecycle states.
//!
//! # Design
//!
//! The lifecycle is a closed state machine; every transition is performed by
//! a scheduler operation, never by field assignment scattered around the
//! codebase:
//!
//! ```text
//! Created → Loaded → InTransit ⇄(hop) → Arrived ─┐
//!                                      AtHub    ─┼→ OutForDelivery → Delivered
//!                                                │         │
//!                                                │         └→ (3 failures) Returned
//! ```
//!
//! `Delivered` and `Returned` are terminal: nothing moves a package out of
//! them.

/// Where a package currently is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageStatus {
    /// Registered and priced, not yet on a vehicle.
    #[default]
    Created,
    /// On a vehicle at its source city, waiting for its first hop.
    Loaded,
    /// Between cities, advancing one hop per cadence interval.
    InTransit,
    /// At its destination city, waiting for a rider.
    Arrived,
    /// Parked at a destination hub, waiting for a rider.
    AtHub,
    /// Handed to a rider for the last mile.
    OutForDelivery,
    /// Terminal success.
    Delivered,
    /// Terminal failure: sent back after repeated delivery failures.
    Returned,
}

impl PackageStatus {
    /// `true` once no further transition is permitted.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PackageStatus::Delivered | PackageStatus::Returned)
    }

    /// `true` for states the tick scheduler moves along the route.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, PackageStatus::Loaded | PackageStatus::InTransit)
    }

    /// `true` for states a rider may be assigned from.
    #[inline]
    pub fn is_assignable(self) -> bool {
        matches!(self, PackageStatus::Arrived | PackageStatus::AtHub)
    }

    /// Stable label, useful for persistence column values.
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Created        => "created",
            PackageStatus::Loaded         => "loaded",
            PackageStatus::InTransit      => "in_transit",
            PackageStatus::Arrived        => "arrived",
            PackageStatus::AtHub          => "at_hub",
            PackageStatus::OutForDelivery => "out_for_delivery",
            PackageStatus::Delivered      => "delivered",
            PackageStatus::Returned       => "returned",
        }
    }

    /// Human-readable label for status columns in a UI.
    pub fn display_name(self) -> &'static str {
        match self {
            PackageStatus::Created        => "Created",
            PackageStatus::Loaded         => "Loaded",
            PackageStatus::InTransit      => "In Transit",
            PackageStatus::Arrived        => "Arrived",
            PackageStatus::AtHub          => "At Hub",
            PackageStatus::OutForDelivery => "Out for Delivery",
            PackageStatus::Delivered      => "Delivered",
            PackageStatus::Returned       => "Returned",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); `None` for unknown labels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "created"          => Some(PackageStatus::Created),
            "loaded"           => Some(PackageStatus::Loaded),
            "in_transit"       => Some(PackageStatus::InTransit),
            "arrived"          => Some(PackageStatus::Arrived),
            "at_hub"           => Some(PackageStatus::AtHub),
            "out_for_delivery" => Some(PackageStatus::OutForDelivery),
            "delivered"        => Some(PackageStatus::Delivered),
            "returned"         => Some(PackageStatus::Returned),
            _ => None,
        }
    }
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
