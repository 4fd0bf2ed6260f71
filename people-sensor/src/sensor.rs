//! Presence sensor backed by a vision service

use crate::capability::{Camera, Detection, VisionService};
use crate::component::{Extra, Geometry, Readings, Reconfigurable, Sensor};
use crate::config::{DetectionSource, PeopleSensorConfig};
use crate::error::SensorError;
use crate::resource::{ComponentConfig, Dependencies, Dependency, Model, ResourceName};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

pub const MODEL_NAMESPACE: &str = "cwb";
pub const MODEL_FAMILY: &str = "people_sensor";
pub const MODEL_NAME: &str = "people_sensor";

/// How detections are obtained for the current binding
enum Binding {
    LocalImage {
        camera: Arc<dyn Camera>,
        camera_resource: ResourceName,
        vision: Arc<dyn VisionService>,
    },
    VisionCamera {
        vision: Arc<dyn VisionService>,
        camera_name: String,
    },
}

/// Everything a reading needs; replaced as a whole on reconfigure
struct BoundState {
    label: String,
    reading_key: String,
    binding: Binding,
}

impl BoundState {
    fn bind(config: &ComponentConfig, dependencies: &Dependencies) -> Result<Self, SensorError> {
        let attributes = PeopleSensorConfig::from_attributes(&config.attributes)?;
        let binding = match attributes.source {
            DetectionSource::LocalImage => bind_local_image(dependencies)?,
            DetectionSource::VisionCamera => {
                let camera_name = attributes.camera_name.clone().ok_or_else(|| {
                    SensorError::Config("Config must specify 'camera_name'".to_string())
                })?;
                bind_vision_camera(dependencies, camera_name)?
            }
        };

        Ok(Self {
            reading_key: attributes.reading_key(),
            label: attributes.label,
            binding,
        })
    }

    fn camera_description(&self) -> String {
        match &self.binding {
            Binding::LocalImage { camera_resource, .. } => camera_resource.to_string(),
            Binding::VisionCamera { camera_name, .. } => camera_name.clone(),
        }
    }
}

fn bind_local_image(dependencies: &Dependencies) -> Result<Binding, SensorError> {
    if dependencies.len() != 2 {
        return Err(SensorError::Config(format!(
            "This component requires a camera component and a vision service as dependencies, got {} dependencies",
            dependencies.len()
        )));
    }

    let mut camera = None;
    let mut vision = None;
    for (name, dependency) in dependencies {
        match dependency {
            Dependency::Camera(handle) => camera = Some((handle.clone(), name.clone())),
            Dependency::Vision(handle) => vision = Some(handle.clone()),
            Dependency::Other => {
                return Err(SensorError::Config(format!(
                    "Found dependency '{}', which is neither a camera nor a vision service",
                    name
                )))
            }
        }
    }

    let vision = vision.ok_or_else(|| {
        SensorError::Config("Did not find vision service in dependencies".to_string())
    })?;
    let (camera, camera_resource) = camera
        .ok_or_else(|| SensorError::Config("Did not find camera in dependencies".to_string()))?;

    Ok(Binding::LocalImage {
        camera,
        camera_resource,
        vision,
    })
}

fn bind_vision_camera(
    dependencies: &Dependencies,
    camera_name: String,
) -> Result<Binding, SensorError> {
    let mut entries = dependencies.iter();
    let (name, dependency) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(SensorError::Config(format!(
                "This component requires exactly one vision service as dependency, got {} dependencies",
                dependencies.len()
            )))
        }
    };

    match dependency {
        Dependency::Vision(vision) => Ok(Binding::VisionCamera {
            vision: vision.clone(),
            camera_name,
        }),
        other => Err(SensorError::Config(format!(
            "Dependency '{}' is a {} resource, expected a vision service",
            name,
            other.kind()
        ))),
    }
}

/// Whether any detection carries exactly `label`
pub fn contains_label(detections: &[Detection], label: &str) -> bool {
    detections.iter().any(|d| d.class_name == label)
}

/// Sensor reporting `<label>_detected = 1` while the vision service sees `label`
pub struct PeopleSensor {
    name: ResourceName,
    state: RwLock<Arc<BoundState>>,
}

impl PeopleSensor {
    /// Model this component registers under
    pub fn model() -> Model {
        Model::new(MODEL_NAMESPACE, MODEL_FAMILY, MODEL_NAME)
    }

    /// Create a configured sensor
    pub fn new(config: &ComponentConfig, dependencies: &Dependencies) -> Result<Self, SensorError> {
        Self::validate_config(config)?;
        let state = BoundState::bind(config, dependencies)?;
        info!(
            "People sensor '{}' created: label={:?}, camera={}",
            config.name,
            state.label,
            state.camera_description()
        );

        Ok(Self {
            name: ResourceName::sensor(config.name.clone()),
            state: RwLock::new(Arc::new(state)),
        })
    }

    /// Validate attributes and return implicit dependencies (always none)
    pub fn validate_config(config: &ComponentConfig) -> Result<Vec<String>, SensorError> {
        PeopleSensorConfig::from_attributes(&config.attributes)?;
        Ok(Vec::new())
    }

    /// Label currently watched for
    pub fn label(&self) -> String {
        self.current().label.clone()
    }

    /// Detection source currently in use
    pub fn source(&self) -> DetectionSource {
        match self.current().binding {
            Binding::LocalImage { .. } => DetectionSource::LocalImage,
            Binding::VisionCamera { .. } => DetectionSource::VisionCamera,
        }
    }

    fn current(&self) -> Arc<BoundState> {
        self.state.read().clone()
    }
}

impl fmt::Debug for PeopleSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.current();
        f.debug_struct("PeopleSensor")
            .field("name", &self.name)
            .field("label", &state.label)
            .field("camera", &state.camera_description())
            .finish()
    }
}

impl Reconfigurable for PeopleSensor {
    fn reconfigure(
        &self,
        config: &ComponentConfig,
        dependencies: &Dependencies,
    ) -> Result<(), SensorError> {
        let state = BoundState::bind(config, dependencies)?;
        debug!("Detecting label {:?}", state.label);
        info!(
            "People sensor '{}' reconfigured: label={:?}, camera={}",
            self.name.name,
            state.label,
            state.camera_description()
        );

        *self.state.write() = Arc::new(state);
        Ok(())
    }
}

#[async_trait]
impl Sensor for PeopleSensor {
    fn name(&self) -> &ResourceName {
        &self.name
    }

    async fn get_readings(
        &self,
        _extra: Option<&Extra>,
        _timeout: Option<Duration>,
    ) -> Result<Readings, SensorError> {
        let state = self.current();

        let detections = match &state.binding {
            Binding::LocalImage { camera, vision, .. } => {
                let image = camera.get_image().await?;
                vision.get_detections(&image).await?
            }
            Binding::VisionCamera {
                vision,
                camera_name,
            } => vision.get_detections_from_camera(camera_name).await?,
        };
        debug!("Received {} detections", detections.len());

        let detected = contains_label(&detections, &state.label);
        let mut readings = Readings::new();
        readings.insert(state.reading_key.clone(), json!(if detected { 1 } else { 0 }));
        Ok(readings)
    }

    async fn do_command(
        &self,
        _command: &HashMap<String, JsonValue>,
        _timeout: Option<Duration>,
    ) -> Result<HashMap<String, JsonValue>, SensorError> {
        error!("`do_command` is not implemented");
        Err(SensorError::Unimplemented("do_command"))
    }

    async fn get_geometries(
        &self,
        _extra: Option<&Extra>,
        _timeout: Option<Duration>,
    ) -> Result<Vec<Geometry>, SensorError> {
        error!("`get_geometries` is not implemented");
        Err(SensorError::Unimplemented("get_geometries"))
    }
}
