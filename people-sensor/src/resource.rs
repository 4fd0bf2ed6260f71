//! Resource identity, configuration and dependency handles supplied by the host

use crate::capability::{Camera, VisionService};
use crate::error::SensorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Namespace and family a model belongs to (e.g. `cwb:people_sensor`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelFamily {
    pub namespace: String,
    pub family: String,
}

/// Fully qualified model triple (`namespace:family:name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Model {
    pub family: ModelFamily,
    pub name: String,
}

impl Model {
    pub fn new(namespace: &str, family: &str, name: &str) -> Self {
        Self {
            family: ModelFamily {
                namespace: namespace.to_string(),
                family: family.to_string(),
            },
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.family.namespace, self.family.family, self.name)
    }
}

/// API a resource implements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Api {
    /// `rdk:component:camera`
    Camera,
    /// `rdk:component:sensor`
    Sensor,
    /// `rdk:service:vision`
    Vision,
    /// Any other API, kept verbatim
    Other(String),
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Api::Camera => f.write_str("rdk:component:camera"),
            Api::Sensor => f.write_str("rdk:component:sensor"),
            Api::Vision => f.write_str("rdk:service:vision"),
            Api::Other(api) => f.write_str(api),
        }
    }
}

/// Name of a resource as the host knows it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceName {
    pub api: Api,
    pub name: String,
}

impl ResourceName {
    pub fn new(api: Api, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(Api::Camera, name)
    }

    pub fn vision(name: impl Into<String>) -> Self {
        Self::new(Api::Vision, name)
    }

    pub fn sensor(name: impl Into<String>) -> Self {
        Self::new(Api::Sensor, name)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api, self.name)
    }
}

/// Component configuration as delivered by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Name of this component instance
    pub name: String,
    /// Free-form attributes interpreted by the component
    #[serde(default)]
    pub attributes: Map<String, JsonValue>,
}

impl ComponentConfig {
    /// Build a config from a JSON object of attributes
    pub fn new(name: impl Into<String>, attributes: JsonValue) -> Result<Self, SensorError> {
        let attributes = match attributes {
            JsonValue::Object(map) => map,
            other => {
                return Err(SensorError::Config(format!(
                    "Attributes must be an object, got {}",
                    other
                )))
            }
        };
        Ok(Self {
            name: name.into(),
            attributes,
        })
    }
}

/// A resolved dependency handle, tagged with the role it can fill
#[derive(Clone)]
pub enum Dependency {
    Camera(Arc<dyn Camera>),
    Vision(Arc<dyn VisionService>),
    /// A resource with no role this component understands
    Other,
}

impl Dependency {
    pub fn kind(&self) -> &'static str {
        match self {
            Dependency::Camera(_) => "camera",
            Dependency::Vision(_) => "vision",
            Dependency::Other => "other",
        }
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency::{}", self.kind())
    }
}

/// Dependencies resolved by the host, keyed by resource name
pub type Dependencies = HashMap<ResourceName, Dependency>;
