//! The `Package` entity and its pricing rule.

use courier_core::{PackageId, PackageStatus, RiderId, ServiceClass};

/// Flat fee charged for every shipment.
pub const PRICE_BASE: f64 = 5.0;
/// Per-kilogram component of the price.
pub const PRICE_PER_KG: f64 = 1.2;
/// Failed delivery attempts after which a package is returned to sender.
pub const MAX_DELIVERY_ATTEMPTS: u32 = 3;

/// History marker appended when a rider hands the package over.
pub const TRACE_DELIVERED: &str = "DELIVERED";
/// History marker appended on a manual return-to-sender.
pub const TRACE_RETURNED: &str = "RETURNED TO SENDER";
/// History marker appended when the attempt limit is reached.
pub const TRACE_THIRD_FAILURE: &str = "RETURNED (3 Failures)";

/// Quote the shipping price for a package before creating it.
///
/// `price = 5.0 + weight_kg × 1.2 + service surcharge`
/// (Overnight 20, TwoDay 10, Normal 0).
#[inline]
pub fn quote_price(service: ServiceClass, weight_kg: f64) -> f64 {
    PRICE_BASE + weight_kg * PRICE_PER_KG + service.surcharge()
}

/// One entry in a package's movement history.
///
/// Most entries record a city the package passed through; terminal events
/// append a marker segment instead ([`TRACE_DELIVERED`], [`TRACE_RETURNED`],
/// [`TRACE_THIRD_FAILURE`]).  The history is append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    /// City name, or an event marker.
    pub label: String,
    /// Unix timestamp (seconds) of the simulation tick that appended this.
    pub at: i64,
}

impl TraceEntry {
    pub fn new(label: impl Into<String>, at: i64) -> Self {
        Self { label: label.into(), at }
    }
}

/// Everything the intake desk collects before a package exists.
///
/// Bundled into one struct so `create_package` stays readable; the scheduler
/// fills in id, price, status, and traces.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageIntake {
    pub sender:      String,
    pub receiver:    String,
    pub address:     String,
    pub source_city: String,
    pub dest_city:   String,
    pub service:     ServiceClass,
    pub weight_kg:   f64,
}

/// One shipment and all of its mutable lifecycle state.
///
/// Packages are created once and then mutated only by scheduler operations;
/// they are never deleted, only parked in a terminal status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id:          PackageId,
    pub sender:      String,
    pub receiver:    String,
    pub address:     String,
    pub source_city: String,
    pub dest_city:   String,
    /// Where the package is right now; starts equal to `source_city`.
    pub current_city: String,
    pub service:      ServiceClass,
    pub weight_kg:    f64,
    pub status:       PackageStatus,
    /// Ticks accumulated toward the next hop.  Reset to zero whenever the
    /// package moves (or waits on a missing route).
    pub ticks_waited: u32,
    /// Failed last-mile attempts so far (capped by [`MAX_DELIVERY_ATTEMPTS`]).
    pub attempts: u32,
    /// Rider handling the last mile, once assigned.
    pub rider: Option<RiderId>,
    pub price: f64,
    /// Append-only movement history, oldest first.
    pub history: Vec<TraceEntry>,
    /// Remaining planned route (current city first), recomputed after every
    /// hop.  Empty when the destination is unreachable or already reached.
    pub plan: Vec<String>,
}

impl Package {
    /// `true` while the tick scheduler is responsible for moving this package.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.status.is_moving()
    }

    /// Whether this package shows up in `city`'s manager view: it originated
    /// there, is currently there, or is headed there.
    pub fn touches_city(&self, city: &str) -> bool {
        self.source_city == city || self.current_city == city || self.dest_city == city
    }
}
