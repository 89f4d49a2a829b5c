//! Target cameras: lens model, track-to constraint, target resolution, mode switching and dolly
//! zoom.

pub mod constraint;
pub mod dolly_zoom;
pub mod lens;
pub mod mode;
pub mod target;

use bevy_ecs::prelude::*;
use bevy_reflect::prelude::*;

/// Settings shared by the target camera and dolly zoom operations.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct TargetCameraSettings {
    /// How far in front of the camera a newly created target is placed.
    pub new_target_distance: f32,
    /// Size of the plain axes drawn for a newly created target.
    pub marker_display_size: f32,
    /// Distance reported for a camera that has no target.
    pub default_distance: f32,
    /// Focal length in millimeters reported for an entity that is not a camera.
    pub default_focal_length: f32,
    /// Requested distances are clamped to at least this value.
    ///
    /// Must be positive: the dolly zoom divides by distances and normalizes the camera-to-target
    /// bearing.
    pub min_distance: f32,
    /// Requested focal lengths, in millimeters, are clamped to at least this value.
    pub min_focal_length: f32,
}

impl Default for TargetCameraSettings {
    fn default() -> Self {
        Self {
            new_target_distance: 5.0,
            marker_display_size: 0.1,
            default_distance: 5.0,
            default_focal_length: 50.0,
            min_distance: 0.01,
            min_focal_length: 1.0,
        }
    }
}

impl TargetCameraSettings {
    /// Clamp a requested camera-to-target distance.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.max(self.min_distance)
    }

    /// Clamp a requested focal length.
    pub fn clamp_focal_length(&self, focal_length: f32) -> f32 {
        focal_length.max(self.min_focal_length)
    }

    pub(crate) fn current(world: &World) -> Self {
        world.get_resource::<Self>().cloned().unwrap_or_default()
    }
}
