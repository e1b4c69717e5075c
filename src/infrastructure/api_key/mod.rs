//! API Key infrastructure implementations
//!
//! Key generation, record stores, the lifecycle service and the stateful
//! manager driving the settings screen.

mod generator;
pub mod in_memory;
mod manager;
mod postgres_repository;
mod service;
mod single_flight;

pub use generator::KeyGenerator;
pub use in_memory::InMemoryRecordStore;
pub use manager::{ActionOutcome, KeyLifecycleManager, KeyRow, COPY_SUCCESS_WINDOW};
pub use postgres_repository::PostgresRecordStore;
pub use service::{ApiKeyService, GeneratedKey};
pub use single_flight::{FlightGuard, SingleFlight};
