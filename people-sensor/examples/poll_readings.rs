//! Poll a people sensor wired to in-memory camera and vision services

use people_sensor::memory::{ScriptedVision, StaticCamera};
use people_sensor::{
    ComponentConfig, Dependencies, Dependency, Detection, Image, PeopleSensor, Reconfigurable,
    ResourceName, Sensor,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let camera = Arc::new(StaticCamera::new(
        Image::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]).with_dimensions(640, 480),
    ));
    let vision = Arc::new(ScriptedVision::new(vec![Detection::new("Person", 0.91)]));

    let mut dependencies = Dependencies::new();
    dependencies.insert(ResourceName::camera("front_door"), Dependency::Camera(camera.clone()));
    dependencies.insert(
        ResourceName::vision("people_detector"),
        Dependency::Vision(vision.clone()),
    );

    let config = ComponentConfig::new("front_door_people", json!({ "label": "Person" }))?;
    let sensor = PeopleSensor::new(&config, &dependencies)?;
    println!("Created {} ({})", sensor.name(), PeopleSensor::model());

    // Someone walks away after the second poll
    for tick in 0..4 {
        if tick == 2 {
            vision.set_detections(vec![Detection::new("cat", 0.64)]);
        }
        let readings = sensor.get_readings(None, Some(Duration::from_secs(1))).await?;
        println!("tick {}: {:?}", tick, readings);
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    println!("Camera served {} frames", camera.captures());

    // Switch to letting the vision service read the camera itself
    vision.set_camera_detections("backyard", vec![Detection::new("dog", 0.88)]);
    let mut vision_only = Dependencies::new();
    vision_only.insert(ResourceName::vision("people_detector"), Dependency::Vision(vision));

    sensor.reconfigure(
        &ComponentConfig::new(
            "front_door_people",
            json!({ "label": "dog", "source": "vision_camera", "camera_name": "backyard" }),
        )?,
        &vision_only,
    )?;
    let readings = sensor.get_readings(None, None).await?;
    println!("backyard: {:?}", readings);

    if let Err(e) = sensor.do_command(&Default::default(), None).await {
        println!("do_command: {}", e);
    }

    Ok(())
}
