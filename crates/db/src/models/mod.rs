//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts (deserializable when it crosses the API
//!   boundary)

pub mod device;
pub mod reading;
pub mod sensor;
pub mod sensor_health;
pub mod sensor_type;
