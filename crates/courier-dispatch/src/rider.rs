//! Last-mile riders and the roster that tracks them.

use courier_core::RiderId;

/// How a rider gets around their city.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vehicle {
    #[default]
    Bike,
    Bus,
}

impl Vehicle {
    /// Stable label, useful for persistence column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Vehicle::Bike => "bike",
            Vehicle::Bus  => "bus",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); `None` for unknown labels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bike" => Some(Vehicle::Bike),
            "bus"  => Some(Vehicle::Bus),
            _ => None,
        }
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome a rider reports after a delivery attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiderAction {
    /// Handed over to the receiver.
    Delivered,
    /// Nobody home (or refused); the package stays out for another attempt.
    Failed,
}

impl RiderAction {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            RiderAction::Delivered => "deliver",
            RiderAction::Failed    => "fail delivery of",
        }
    }
}

/// One last-mile rider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rider {
    pub id:       RiderId,
    pub username: String,
    /// Login credential consumed by the (out-of-scope) operator shell.
    pub secret:  String,
    pub vehicle: Vehicle,
    /// The city whose arrived packages this rider can take.
    pub city: String,
}

/// All registered riders, indexed by [`RiderId`].
///
/// Ids are dense (the id is the roster position at registration time) and,
/// unlike cities, riders are never removed.
#[derive(Default)]
pub struct RiderRoster {
    riders: Vec<Rider>,
}

impl RiderRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rider and return the assigned id.
    pub fn add(&mut self, username: &str, secret: &str, vehicle: Vehicle, city: &str) -> RiderId {
        let id = RiderId(self.next_id());
        self.riders.push(Rider {
            id,
            username: username.to_owned(),
            secret:   secret.to_owned(),
            vehicle,
            city: city.to_owned(),
        });
        id
    }

    /// Insert or replace a record wholesale, keeping the roster id-sorted.
    /// The store-hydration path.
    pub fn hydrate(&mut self, rider: Rider) {
        match self.riders.binary_search_by_key(&rider.id, |r| r.id) {
            Ok(i)  => self.riders[i] = rider,
            Err(i) => self.riders.insert(i, rider),
        }
    }

    pub fn get(&self, id: RiderId) -> Option<&Rider> {
        self.riders
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.riders[i])
    }

    /// Credential lookup for the operator shell.
    pub fn by_username(&self, username: &str) -> Option<&Rider> {
        self.riders.iter().find(|r| r.username == username)
    }

    pub fn contains(&self, id: RiderId) -> bool {
        self.get(id).is_some()
    }

    /// Riders stationed in `city`.
    pub fn for_city(&self, city: &str) -> Vec<&Rider> {
        self.riders.iter().filter(|r| r.city == city).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rider> + '_ {
        self.riders.iter()
    }

    /// Clone of every rider, for snapshot saves.
    pub fn snapshot(&self) -> Vec<Rider> {
        self.riders.clone()
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    /// Next id `add` would assign; used to keep hydrated and fresh ids apart.
    pub(crate) fn next_id(&self) -> u32 {
        self.riders.last().map_or(0, |r| r.id.0 + 1)
    }
}
