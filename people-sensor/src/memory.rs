//! In-memory camera and vision service, for wiring the sensor without real hardware

use crate::capability::{Camera, Detection, Image, VisionService};
use crate::error::SensorError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Camera that always returns the same frame
pub struct StaticCamera {
    image: Image,
    captures: AtomicUsize,
}

impl StaticCamera {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            captures: AtomicUsize::new(0),
        }
    }

    /// Number of frames handed out so far
    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Camera for StaticCamera {
    async fn get_image(&self) -> Result<Image, SensorError> {
        self.captures.fetch_add(1, Ordering::Relaxed);
        Ok(self.image.clone())
    }
}

/// Vision service that reports a scripted set of detections.
///
/// Detections for frames are shared; detections for named cameras are kept
/// per camera, and an unknown camera name is an error.
pub struct ScriptedVision {
    detections: RwLock<Vec<Detection>>,
    cameras: RwLock<HashMap<String, Vec<Detection>>>,
}

impl ScriptedVision {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections: RwLock::new(detections),
            cameras: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the detections returned for supplied frames
    pub fn set_detections(&self, detections: Vec<Detection>) {
        *self.detections.write() = detections;
    }

    /// Set the detections returned for a named camera
    pub fn set_camera_detections(&self, camera_name: &str, detections: Vec<Detection>) {
        self.cameras.write().insert(camera_name.to_string(), detections);
    }
}

#[async_trait]
impl VisionService for ScriptedVision {
    async fn get_detections(&self, image: &Image) -> Result<Vec<Detection>, SensorError> {
        if image.data.is_empty() {
            return Err(SensorError::Vision("Empty image".to_string()));
        }
        Ok(self.detections.read().clone())
    }

    async fn get_detections_from_camera(
        &self,
        camera_name: &str,
    ) -> Result<Vec<Detection>, SensorError> {
        self.cameras
            .read()
            .get(camera_name)
            .cloned()
            .ok_or_else(|| SensorError::Vision(format!("Unknown camera '{}'", camera_name)))
    }
}
