//! Target cameras and dolly zoom for Bevy.
//!
//! A *target camera* orients itself toward a separate point-of-interest entity through a
//! [`TrackTo`](crate::camera::constraint::TrackTo) constraint instead of using its own rotation.
//! Switching a camera back to a *standard* camera bakes the tracked rotation into its
//! [`Transform`](bevy_transform::prelude::Transform) and tucks the target away as a hidden child,
//! so switching again restores the exact same setup.
//!
//! The *dolly zoom* couples the distance between a camera and its target with the camera's focal
//! length, so the subject keeps its apparent size on screen while the perspective changes.
//!
//! ## Usage
//!
//! Add [`DefaultTargetCameraPlugins`], give your camera a
//! [`CameraLens`](crate::camera::lens::CameraLens), then send
//! [`TargetCameraTrigger`](crate::camera::mode::TargetCameraTrigger) and
//! [`DollyZoomTrigger`](crate::camera::dolly_zoom::DollyZoomTrigger) events. All of the operations
//! are also exposed as plain functions over a [`World`](bevy_ecs::world::World) for use in
//! exclusive systems and tests.

pub mod camera;
pub mod error;
pub mod extensions;
pub mod transform;

/// Common imports.
pub mod prelude {
    pub use crate::{
        camera::{
            constraint::{TrackAxis, TrackTo},
            dolly_zoom::{apply_dolly_zoom, DollyZoom, DollyZoomTrigger},
            lens::CameraLens,
            mode::{
                active_target, camera_mode, focal_length_or_default, match_target_rotation,
                set_target_camera, set_target_distance, target_distance,
                target_distance_or_default, toggle_camera_mode, CameraMode, TargetCameraAction,
                TargetCameraTrigger,
            },
            target::{get_target, is_target_camera, is_target_shared, CameraTarget, EmptyMarker},
            TargetCameraSettings,
        },
        error::TargetCameraError,
        DefaultTargetCameraPlugins, TargetCameraSystems,
    };
}

use bevy_app::{prelude::*, PluginGroupBuilder};
use bevy_ecs::prelude::*;

/// Adds the target camera, dolly zoom, constraint and lens plugins, plus any extensions enabled
/// through cargo features.
pub struct DefaultTargetCameraPlugins;

impl PluginGroup for DefaultTargetCameraPlugins {
    #[allow(clippy::let_and_return)]
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(camera::lens::LensPlugin)
            .add(camera::constraint::TrackToPlugin)
            .add(camera::mode::TargetCameraPlugin)
            .add(camera::dolly_zoom::DollyZoomPlugin);

        #[cfg(feature = "extension_marker_indicator")]
        let group = group.add(extensions::marker_indicator::MarkerIndicatorPlugin);

        group
    }
}

/// System sets used by this crate. All of them run in `PostUpdate`, in order, before transform
/// propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum TargetCameraSystems {
    /// Target camera trigger events are received and applied to the world.
    Trigger,
    /// Dolly zoom trigger events are applied, after any mode switch from the same frame.
    DollyZoom,
    /// Enabled [`TrackTo`](camera::constraint::TrackTo) constraints are evaluated.
    Constrain,
}

pub(crate) fn configure_sets(app: &mut App) {
    app.configure_sets(
        PostUpdate,
        (
            TargetCameraSystems::Trigger,
            TargetCameraSystems::DollyZoom,
            TargetCameraSystems::Constrain,
        )
            .chain()
            .before(bevy_transform::TransformSystem::TransformPropagate),
    );
}
