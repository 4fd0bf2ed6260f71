//! people-sensor: presence sensor backed by a vision service
//!
//! Provides:
//! - A sensor component reporting `<label>_detected` as 1 or 0
//! - Detection from a camera frame, or from a camera the vision service reads itself
//! - Typed dependency roles for cameras and vision services
//! - In-memory capabilities for wiring without hardware

pub mod error;
pub mod capability;
pub mod resource;
pub mod component;
pub mod config;
pub mod sensor;
pub mod memory;

pub use error::SensorError;
pub use capability::{BoundingBox, Camera, Detection, Image, VisionService};
pub use resource::{
    Api, ComponentConfig, Dependencies, Dependency, Model, ModelFamily, ResourceName,
};
pub use component::{Extra, Geometry, Readings, Reconfigurable, Sensor};
pub use config::{DetectionSource, PeopleSensorConfig};
pub use sensor::{contains_label, PeopleSensor};
