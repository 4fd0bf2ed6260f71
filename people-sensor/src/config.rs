//! Configuration for people-sensor

use crate::error::SensorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Where detections come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Fetch a frame from the camera dependency and hand it to the vision service
    #[default]
    LocalImage,
    /// Ask the vision service to read `camera_name` itself
    VisionCamera,
}

/// Attributes understood by the sensor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleSensorConfig {
    /// Class name to watch for; matched case-sensitively
    #[serde(default)]
    pub label: String,
    /// Camera the vision service should query (vision_camera only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_name: Option<String>,
    /// Detection source
    #[serde(default)]
    pub source: DetectionSource,
}

impl PeopleSensorConfig {
    /// Decode and validate raw component attributes. Unknown keys are ignored.
    pub fn from_attributes(attributes: &Map<String, JsonValue>) -> Result<Self, SensorError> {
        let config: Self = serde_json::from_value(JsonValue::Object(attributes.clone()))
            .map_err(|e| SensorError::Config(format!("Invalid attributes: {}", e)))?;
        config.validate().map_err(SensorError::Config)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.label.is_empty() {
            return Err("Config must specify 'label' field for sensor to detect".to_string());
        }

        if self.source == DetectionSource::VisionCamera {
            match self.camera_name.as_deref() {
                Some(name) if !name.is_empty() => {}
                _ => {
                    return Err(
                        "Config must specify 'camera_name' when source is 'vision_camera'"
                            .to_string(),
                    )
                }
            }
        }

        Ok(())
    }

    /// Key of the single reading entry, e.g. `person_detected`
    pub fn reading_key(&self) -> String {
        format!("{}_detected", self.label.to_lowercase())
    }
}
