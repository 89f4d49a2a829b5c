//! A dolly zoom couples the camera-to-target distance with the focal length, so the target keeps
//! its apparent size on screen while the perspective changes.
//!
//! With a pinhole camera, a subject at distance `d` seen through a lens of focal length `f` on a
//! sensor of width `s` fills the frame the same way as long as
//!
//! ```text
//! constant_height = d * s / (2 * f)
//! ```
//!
//! stays fixed. Changing the distance therefore dictates a focal length, and vice versa.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

use super::{lens::CameraLens, mode::active_target, TargetCameraSettings};
use crate::{
    error::TargetCameraError,
    transform::{decompose, direction, recompose, set_world_transform, world_transform},
};

/// See the [module](self) docs.
pub struct DollyZoomPlugin;

impl Plugin for DollyZoomPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sets(app);
        app.init_resource::<TargetCameraSettings>()
            .add_event::<DollyZoomTrigger>()
            .add_systems(
                PostUpdate,
                DollyZoomTrigger::receive.in_set(crate::TargetCameraSystems::DollyZoom),
            )
            .register_type::<TargetCameraSettings>();
    }
}

/// The quantity a dolly zoom is driven by. The other one follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DollyZoom {
    /// Move the camera to this distance from its target and adjust the focal length.
    Distance(f32),
    /// Set this focal length, in millimeters, and move the camera to compensate.
    FocalLength(f32),
}

/// Send this event to dolly zoom a camera relative to its target. Values are clamped to the
/// minimums in [`TargetCameraSettings`].
#[derive(Debug, Clone, Copy, Event)]
pub struct DollyZoomTrigger {
    /// The camera to move.
    pub camera: Entity,
    /// What to change.
    pub adjust: DollyZoom,
}

impl DollyZoomTrigger {
    fn receive(world: &mut World) {
        let triggers: Vec<Self> = world.resource_mut::<Events<Self>>().drain().collect();
        if triggers.is_empty() {
            return;
        }
        let settings = TargetCameraSettings::current(world);

        for DollyZoomTrigger { camera, adjust } in triggers {
            let adjust = match adjust {
                DollyZoom::Distance(d) => DollyZoom::Distance(settings.clamp_distance(d)),
                DollyZoom::FocalLength(f) => DollyZoom::FocalLength(settings.clamp_focal_length(f)),
            };
            let result = active_target(world, camera)
                .and_then(|target| apply_dolly_zoom(world, camera, target, adjust));
            if let Err(err) = result {
                debug!("Ignoring dolly zoom: {err}");
            }
        }
    }
}

/// The apparent subject height that a dolly zoom holds constant.
pub fn constant_height(distance: f32, lens: &CameraLens) -> f32 {
    (distance * lens.sensor_width) / (2.0 * lens.focal_length)
}

/// Focal length that keeps `constant_height` at the given distance.
pub fn lens_from_distance(sensor_width: f32, distance: f32, constant_height: f32) -> f32 {
    (sensor_width * distance) / (2.0 * constant_height)
}

/// Distance that keeps `constant_height` with the given focal length.
pub fn distance_from_lens(sensor_width: f32, focal_length: f32, constant_height: f32) -> f32 {
    (2.0 * constant_height * focal_length) / sensor_width
}

/// Dolly zoom `camera` relative to `target`.
///
/// The camera moves along the current target-to-camera bearing; its rotation and the sensor width
/// are left alone. Inputs are not validated: the distance must be positive, and the camera must not
/// sit on the target.
pub fn apply_dolly_zoom(
    world: &mut World,
    camera: Entity,
    target: Entity,
    adjust: DollyZoom,
) -> Result<(), TargetCameraError> {
    let lens = *world
        .get::<CameraLens>(camera)
        .ok_or(TargetCameraError::NotACamera(camera))?;
    let camera_pose =
        world_transform(world, camera).ok_or(TargetCameraError::MissingTransform(camera))?;
    let target_pose =
        world_transform(world, target).ok_or(TargetCameraError::MissingTransform(target))?;

    let (camera_position, rotation, scale) = decompose(&camera_pose);
    let target_position = target_pose.translation();
    let current_distance = camera_position.distance(target_position);
    let height = constant_height(current_distance, &lens);
    let bearing = direction(camera_position, target_position);

    let (distance, focal_length) = match adjust {
        DollyZoom::Distance(distance) => (
            distance,
            lens_from_distance(lens.sensor_width, distance, height),
        ),
        DollyZoom::FocalLength(focal_length) => (
            distance_from_lens(lens.sensor_width, focal_length, height),
            focal_length,
        ),
    };

    set_world_transform(
        world,
        camera,
        recompose(target_position + bearing * distance, rotation, scale),
    );
    if let Some(mut lens) = world.get_mut::<CameraLens>(camera) {
        lens.focal_length = focal_length;
    }
    debug!(
        "Dolly zoom on {camera}: distance {current_distance} -> {distance}, focal length {} -> {focal_length}",
        lens.focal_length
    );
    Ok(())
}
