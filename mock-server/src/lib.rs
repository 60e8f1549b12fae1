use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Car {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewCar {
    pub name: String,
}

/// Optional filters for collection reads: exact id match and
/// case-insensitive name substring match.
#[derive(Deserialize, Default)]
pub struct CarQuery {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// In-memory collection with a monotonically increasing id counter.
#[derive(Default)]
pub struct Store {
    cars: HashMap<u64, Car>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/cars", get(list_cars).post(create_car).put(update_car))
        .route("/cars/{id}", get(get_car).delete(delete_car))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_cars(State(db): State<Db>, Query(filter): Query<CarQuery>) -> Json<Vec<Car>> {
    let store = db.read().await;
    let mut cars: Vec<Car> = store
        .cars
        .values()
        .filter(|car| filter.id.is_none_or(|id| car.id == id))
        .filter(|car| {
            filter
                .name
                .as_deref()
                .is_none_or(|term| car.name.to_lowercase().contains(&term.to_lowercase()))
        })
        .cloned()
        .collect();
    cars.sort_by_key(|car| car.id);
    Json(cars)
}

async fn create_car(
    State(db): State<Db>,
    Json(input): Json<NewCar>,
) -> (StatusCode, Json<Car>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let car = Car {
        id: store.next_id,
        name: input.name,
    };
    store.cars.insert(car.id, car.clone());
    (StatusCode::CREATED, Json(car))
}

async fn get_car(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Car>, StatusCode> {
    let store = db.read().await;
    store.cars.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// PUT targets the collection URL with the full record as body; the id to
/// update comes from the record itself.
async fn update_car(
    State(db): State<Db>,
    Json(input): Json<Car>,
) -> Result<Json<Car>, StatusCode> {
    let mut store = db.write().await;
    let car = store.cars.get_mut(&input.id).ok_or(StatusCode::NOT_FOUND)?;
    car.name = input.name;
    Ok(Json(car.clone()))
}

async fn delete_car(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.cars.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
