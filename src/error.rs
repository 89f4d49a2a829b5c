//! Errors returned by target camera operations.
//!
//! None of these are fatal. The trigger receivers log them and leave the world untouched.

use bevy_ecs::entity::Entity;
use thiserror::Error;

/// Why a target camera operation could not run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TargetCameraError {
    /// The entity has no [`CameraLens`](crate::camera::lens::CameraLens).
    #[error("entity {0} is not a camera")]
    NotACamera(Entity),
    /// The camera is not currently tracking a target, so target and dolly controls do not apply.
    #[error("camera {0} is not a target camera")]
    NotATargetCamera(Entity),
    /// No target could be resolved for the camera.
    #[error("camera {0} has no target")]
    MissingTarget(Entity),
    /// The entity is missing a `Transform`, or no longer exists.
    #[error("entity {0} has no transform")]
    MissingTransform(Entity),
}
