//! Domain DTOs for the car API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined
//! independently; integration tests catch schema drift. The client treats a
//! `Car` as an opaque record apart from its `id`.

use serde::{Deserialize, Serialize};

/// A single car record exchanged with the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Car {
    pub id: u64,
    pub name: String,
}

/// Payload for creating a car. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCar {
    pub name: String,
}

/// A car designated either by its full record or by a bare id.
///
/// Normalizes the two accepted shapes of `CarService::delete_car` into a
/// numeric id before any request is built.
#[derive(Debug, Clone)]
pub enum CarRef {
    Id(u64),
    Record(Car),
}

impl CarRef {
    pub fn id(&self) -> u64 {
        match self {
            CarRef::Id(id) => *id,
            CarRef::Record(car) => car.id,
        }
    }
}

impl From<u64> for CarRef {
    fn from(id: u64) -> Self {
        CarRef::Id(id)
    }
}

impl From<Car> for CarRef {
    fn from(car: Car) -> Self {
        CarRef::Record(car)
    }
}

impl From<&Car> for CarRef {
    fn from(car: &Car) -> Self {
        CarRef::Id(car.id)
    }
}
