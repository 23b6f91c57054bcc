//! Per-tick movement events emitted by `advance_step`.

use std::fmt;

use courier_core::PackageId;

/// What happened to one package during a tick.
///
/// Events are returned in package-id order, one per package that reached its
/// cadence threshold this tick.  Packages still accumulating ticks emit
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickEvent {
    /// The package advanced one hop along its route.
    Moved { package: PackageId, to: String },
    /// The package was already at its destination and switched to `Arrived`.
    Arrived { package: PackageId, city: String },
    /// No open route to the destination existed this tick; the package stays
    /// put and retries next time its cadence comes around.
    Waiting { package: PackageId, city: String },
}

impl TickEvent {
    pub fn package_id(&self) -> PackageId {
        match self {
            TickEvent::Moved { package, .. }
            | TickEvent::Arrived { package, .. }
            | TickEvent::Waiting { package, .. } => *package,
        }
    }

    /// The city named by the event (hop target, or where the package sits).
    pub fn city(&self) -> &str {
        match self {
            TickEvent::Moved { to, .. } => to,
            TickEvent::Arrived { city, .. } | TickEvent::Waiting { city, .. } => city,
        }
    }

    /// Stable label, useful for log columns.
    pub fn label(&self) -> &'static str {
        match self {
            TickEvent::Moved { .. }   => "moved",
            TickEvent::Arrived { .. } => "arrived",
            TickEvent::Waiting { .. } => "waiting",
        }
    }
}

impl fmt::Display for TickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickEvent::Moved { package, to } => {
                write!(f, "{package} moved to {to}")
            }
            TickEvent::Arrived { package, city } => {
                write!(f, "{package} ARRIVED at {city}")
            }
            TickEvent::Waiting { package, city } => {
                write!(f, "{package} WAITING at {city}: no route")
            }
        }
    }
}
