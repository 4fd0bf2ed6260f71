//! Tests for configuration and dependency binding

use people_sensor::memory::{ScriptedVision, StaticCamera};
use people_sensor::{
    Api, ComponentConfig, Dependencies, Dependency, Detection, DetectionSource, Image,
    PeopleSensor, Reconfigurable, ResourceName, Sensor,
};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

fn camera_dep() -> Dependency {
    Dependency::Camera(Arc::new(StaticCamera::new(Image::new("image/jpeg", vec![1, 2, 3]))))
}

fn vision_dep(labels: &[&str]) -> Dependency {
    let detections = labels.iter().map(|label| Detection::new(*label, 0.9)).collect();
    Dependency::Vision(Arc::new(ScriptedVision::new(detections)))
}

fn deps(entries: Vec<(ResourceName, Dependency)>) -> Dependencies {
    entries.into_iter().collect()
}

fn local_config(label: &str) -> ComponentConfig {
    ComponentConfig::new("sensor", json!({ "label": label })).unwrap()
}

fn vision_camera_config(attributes: JsonValue) -> ComponentConfig {
    ComponentConfig::new("sensor", attributes).unwrap()
}

#[test]
fn test_empty_config_rejected() {
    let config = ComponentConfig::new("sensor", json!({})).unwrap();
    assert!(PeopleSensor::validate_config(&config).unwrap_err().is_config());

    let result = PeopleSensor::new(
        &config,
        &deps(vec![
            (ResourceName::camera("cam"), camera_dep()),
            (ResourceName::vision("detector"), vision_dep(&[])),
        ]),
    );
    assert!(result.unwrap_err().is_config());
}

#[test]
fn test_local_image_rejects_wrong_counts() {
    let config = local_config("dog");

    assert!(PeopleSensor::new(&config, &Dependencies::new()).is_err());
    assert!(PeopleSensor::new(
        &config,
        &deps(vec![(ResourceName::camera("cam"), camera_dep())])
    )
    .is_err());
    assert!(PeopleSensor::new(
        &config,
        &deps(vec![(ResourceName::vision("detector"), vision_dep(&[]))])
    )
    .is_err());

    let three = deps(vec![
        (ResourceName::camera("cam"), camera_dep()),
        (ResourceName::camera("cam2"), camera_dep()),
        (ResourceName::vision("detector"), vision_dep(&[])),
    ]);
    assert!(PeopleSensor::new(&config, &three).unwrap_err().is_config());
}

#[test]
fn test_local_image_accepts_either_order() {
    let config = local_config("dog");

    let camera_first = deps(vec![
        (ResourceName::camera("a_cam"), camera_dep()),
        (ResourceName::vision("z_detector"), vision_dep(&[])),
    ]);
    assert!(PeopleSensor::new(&config, &camera_first).is_ok());

    let vision_first = deps(vec![
        (ResourceName::vision("a_detector"), vision_dep(&[])),
        (ResourceName::camera("z_cam"), camera_dep()),
    ]);
    assert!(PeopleSensor::new(&config, &vision_first).is_ok());
}

#[test]
fn test_local_image_requires_both_roles() {
    let config = local_config("dog");

    let two_cameras = deps(vec![
        (ResourceName::camera("cam1"), camera_dep()),
        (ResourceName::camera("cam2"), camera_dep()),
    ]);
    let err = PeopleSensor::new(&config, &two_cameras).unwrap_err();
    assert!(err.to_string().contains("vision"));

    let two_visions = deps(vec![
        (ResourceName::vision("v1"), vision_dep(&[])),
        (ResourceName::vision("v2"), vision_dep(&[])),
    ]);
    let err = PeopleSensor::new(&config, &two_visions).unwrap_err();
    assert!(err.to_string().contains("camera"));
}

#[test]
fn test_local_image_rejects_unknown_role() {
    let arm = ResourceName::new(Api::Other("rdk:component:arm".to_string()), "arm1");
    let with_arm = deps(vec![
        (arm, Dependency::Other),
        (ResourceName::vision("detector"), vision_dep(&[])),
    ]);
    let err = PeopleSensor::new(&local_config("dog"), &with_arm).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("arm1"));
}

#[test]
fn test_vision_camera_dependency_counts() {
    let config = vision_camera_config(json!({
        "label": "dog",
        "source": "vision_camera",
        "camera_name": "porch"
    }));

    assert!(PeopleSensor::new(&config, &Dependencies::new()).is_err());

    let one = deps(vec![(ResourceName::vision("detector"), vision_dep(&[]))]);
    let sensor = PeopleSensor::new(&config, &one).unwrap();
    assert_eq!(sensor.source(), DetectionSource::VisionCamera);

    let two = deps(vec![
        (ResourceName::vision("detector"), vision_dep(&[])),
        (ResourceName::camera("porch"), camera_dep()),
    ]);
    assert!(PeopleSensor::new(&config, &two).unwrap_err().is_config());
}

#[test]
fn test_vision_camera_rejects_camera_only() {
    let config = vision_camera_config(json!({
        "label": "dog",
        "source": "vision_camera",
        "camera_name": "porch"
    }));
    let only_camera = deps(vec![(ResourceName::camera("porch"), camera_dep())]);
    let err = PeopleSensor::new(&config, &only_camera).unwrap_err();
    assert!(err.to_string().contains("vision service"));
}

#[test]
fn test_vision_camera_requires_camera_name() {
    let config = vision_camera_config(json!({ "label": "dog", "source": "vision_camera" }));
    assert!(PeopleSensor::validate_config(&config).is_err());

    let one = deps(vec![(ResourceName::vision("detector"), vision_dep(&[]))]);
    assert!(PeopleSensor::new(&config, &one).is_err());
}

#[test]
fn test_sensor_name() {
    let sensor = PeopleSensor::new(
        &local_config("dog"),
        &deps(vec![
            (ResourceName::camera("cam"), camera_dep()),
            (ResourceName::vision("detector"), vision_dep(&[])),
        ]),
    )
    .unwrap();
    assert_eq!(sensor.name(), &ResourceName::sensor("sensor"));
}

#[tokio::test]
async fn test_reconfigure_is_idempotent() {
    let dependencies = deps(vec![
        (ResourceName::camera("cam"), camera_dep()),
        (ResourceName::vision("detector"), vision_dep(&["dog", "cat"])),
    ]);
    let config = local_config("dog");
    let sensor = PeopleSensor::new(&config, &dependencies).unwrap();
    let before = sensor.get_readings(None, None).await.unwrap();

    sensor.reconfigure(&config, &dependencies).unwrap();
    sensor.reconfigure(&config, &dependencies).unwrap();

    let after = sensor.get_readings(None, None).await.unwrap();
    assert_eq!(before, after);
    assert_eq!(after.len(), 1);
}

#[tokio::test]
async fn test_reconfigure_replaces_label_and_source() {
    let dependencies = deps(vec![
        (ResourceName::camera("cam"), camera_dep()),
        (ResourceName::vision("detector"), vision_dep(&["dog"])),
    ]);
    let sensor = PeopleSensor::new(&local_config("dog"), &dependencies).unwrap();

    sensor.reconfigure(&local_config("Cat"), &dependencies).unwrap();
    let readings = sensor.get_readings(None, None).await.unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings.get("cat_detected"), Some(&json!(0)));

    let vision = Arc::new(ScriptedVision::new(Vec::new()));
    vision.set_camera_detections("porch", vec![Detection::new("Cat", 0.9)]);
    let vision_only = deps(vec![(
        ResourceName::vision("detector"),
        Dependency::Vision(vision),
    )]);
    sensor
        .reconfigure(
            &vision_camera_config(json!({
                "label": "Cat",
                "source": "vision_camera",
                "camera_name": "porch"
            })),
            &vision_only,
        )
        .unwrap();

    assert_eq!(sensor.source(), DetectionSource::VisionCamera);
    let readings = sensor.get_readings(None, None).await.unwrap();
    assert_eq!(readings.get("cat_detected"), Some(&json!(1)));
}
