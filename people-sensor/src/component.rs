//! Contract between the host and sensor components

use crate::error::SensorError;
use crate::resource::{ComponentConfig, Dependencies, ResourceName};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;

/// Readings reported by a sensor, keyed by reading name
pub type Readings = HashMap<String, JsonValue>;

/// Free-form extra parameters passed along with a request
pub type Extra = HashMap<String, JsonValue>;

/// Geometry of a component, relative to its frame (millimetres)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub label: String,
    pub center: (f64, f64, f64),
    pub dimensions: (f64, f64, f64),
}

/// A resource whose configuration and dependencies can be replaced at runtime
pub trait Reconfigurable: Send + Sync {
    /// Replace configuration and dependency bindings wholesale.
    /// On error the previous bindings stay in effect.
    fn reconfigure(
        &self,
        config: &ComponentConfig,
        dependencies: &Dependencies,
    ) -> Result<(), SensorError>;
}

/// Sensor component API
#[async_trait]
pub trait Sensor: Reconfigurable {
    /// Name this component was created with
    fn name(&self) -> &ResourceName;

    /// Produce a fresh set of readings
    async fn get_readings(
        &self,
        extra: Option<&Extra>,
        timeout: Option<Duration>,
    ) -> Result<Readings, SensorError>;

    /// Generic command channel
    async fn do_command(
        &self,
        command: &HashMap<String, JsonValue>,
        timeout: Option<Duration>,
    ) -> Result<HashMap<String, JsonValue>, SensorError>;

    /// Geometries describing the component's physical extent
    async fn get_geometries(
        &self,
        extra: Option<&Extra>,
        timeout: Option<Duration>,
    ) -> Result<Vec<Geometry>, SensorError>;
}
