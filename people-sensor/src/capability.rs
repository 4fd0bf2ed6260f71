//! Capabilities consumed from other resources: cameras and vision services

use crate::error::SensorError;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Encoded frame returned by a camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// MIME type of `data` (e.g. "image/jpeg")
    pub mime_type: String,
    /// Width in pixels, if the camera reports it
    pub width: Option<u32>,
    /// Height in pixels, if the camera reports it
    pub height: Option<u32>,
    /// Encoded image bytes
    pub data: Bytes,
}

impl Image {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            width: None,
            height: None,
            data: Bytes::from(data),
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Pixel bounding box of a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

/// One labeled object reported by a vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Label associated with the detected object
    pub class_name: String,
    /// Confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox: None,
        }
    }
}

/// Camera component: source of current frames
#[async_trait]
pub trait Camera: Send + Sync {
    /// Fetch the current frame
    async fn get_image(&self) -> Result<Image, SensorError>;
}

/// Vision service: detects labeled objects
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Run detection on a frame supplied by the caller
    async fn get_detections(&self, image: &Image) -> Result<Vec<Detection>, SensorError>;

    /// Run detection on the current frame of a camera the service resolves by name
    async fn get_detections_from_camera(
        &self,
        camera_name: &str,
    ) -> Result<Vec<Detection>, SensorError>;
}
