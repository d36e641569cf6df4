//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_repo;
pub mod reading_repo;
pub mod sensor_health_repo;
pub mod sensor_repo;
pub mod sensor_type_repo;

pub use device_repo::DeviceRepo;
pub use reading_repo::ReadingRepo;
pub use sensor_health_repo::SensorHealthRepo;
pub use sensor_repo::SensorRepo;
pub use sensor_type_repo::SensorTypeRepo;
