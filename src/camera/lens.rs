//! Provides the physical [`CameraLens`] model, and keeps the camera's [`Projection`] in sync
//! with it.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::{
    camera::CameraUpdateSystem,
    prelude::*,
};
use bevy_transform::prelude::*;

/// See the [module](self) docs.
pub struct LensPlugin;

impl Plugin for LensPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            CameraLens::sync_projection
                .after(crate::TargetCameraSystems::DollyZoom)
                .before(CameraUpdateSystem),
        )
        .register_type::<CameraLens>();
    }
}

/// A physical camera lens. Any entity with this component is treated as a camera by the target
/// camera operations.
///
/// Field of view follows the usual pinhole model: the sensor width spans whichever image
/// dimension is larger.
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct CameraLens {
    /// Focal length in millimeters.
    pub focal_length: f32,
    /// Sensor width in millimeters.
    pub sensor_width: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            focal_length: 50.0,
            sensor_width: 36.0,
        }
    }
}

impl CameraLens {
    /// Create a lens with the given focal length and the default 36mm sensor.
    pub fn from_focal_length(focal_length: f32) -> Self {
        Self {
            focal_length,
            ..Default::default()
        }
    }

    /// Angle of view across the sensor width, in radians.
    pub fn horizontal_fov(&self) -> f32 {
        2.0 * (self.sensor_width / (2.0 * self.focal_length)).atan()
    }

    /// Vertical angle of view, in radians, for an image with the given width / height ratio.
    pub fn vertical_fov(&self, aspect_ratio: f32) -> f32 {
        let half_sensor = self.sensor_width / (2.0 * self.focal_length);
        if aspect_ratio >= 1.0 {
            2.0 * (half_sensor / aspect_ratio).atan()
        } else {
            2.0 * half_sensor.atan()
        }
    }

    /// Copy the lens' field of view into perspective projections. Only writes when the value
    /// actually changes, so change detection on [`Projection`] stays meaningful.
    pub fn sync_projection(mut cameras: Query<(&CameraLens, &mut Projection)>) {
        for (lens, mut projection) in &mut cameras {
            let Projection::Perspective(perspective) = &*projection else {
                continue;
            };
            let fov = lens.vertical_fov(perspective.aspect_ratio);
            if !fov.is_finite() || (perspective.fov - fov).abs() <= f32::EPSILON {
                continue;
            }
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.fov = fov;
            }
        }
    }
}
