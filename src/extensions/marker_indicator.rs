//! A `bevy_target_cam` extension that draws [`EmptyMarker`]s as plain axes, and a line from every
//! target camera to its target. Targets are not rendered otherwise, which makes them hard to find
//! in the scene.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::{prelude::*, view::VisibilitySystems};
use bevy_transform::{prelude::*, TransformSystem};

use crate::prelude::*;

/// See the [module](self) docs.
pub struct MarkerIndicatorPlugin;

impl Plugin for MarkerIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (
                draw_markers.after(VisibilitySystems::VisibilityPropagate),
                draw_target_lines,
            )
                .after(TransformSystem::TransformPropagate),
        )
        .register_type::<MarkerIndicator>();
    }
}

/// Optional. Configures whether or not a camera's target line is drawn. The line is drawn if this
/// component is not present.
#[derive(Debug, Component, Reflect)]
pub struct MarkerIndicator {
    /// Should the line to this camera's target be visible?
    pub enabled: bool,
}

impl Default for MarkerIndicator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Use gizmos to draw visible markers as three crossed lines.
pub fn draw_markers(
    markers: Query<(&EmptyMarker, &GlobalTransform, &InheritedVisibility)>,
    mut gizmos: Gizmos,
) {
    for (start, end) in marker_lines(&markers) {
        gizmos.line(start, end, Color::WHITE);
    }
}

/// The line segments of every marker that is visible in the hierarchy. A marker stashed under a
/// hidden parent is skipped even if its own [`Visibility`] is `Inherited`.
fn marker_lines<'a, I>(markers: I) -> impl Iterator<Item = (Vec3, Vec3)> + use<'a, I>
where
    I: IntoIterator<Item = (&'a EmptyMarker, &'a GlobalTransform, &'a InheritedVisibility)>,
{
    markers
        .into_iter()
        .filter(|(.., visibility)| visibility.get())
        .flat_map(|(marker, transform, _)| {
            let center = transform.translation();
            [Vec3::X, Vec3::Y, Vec3::Z].map(|axis| {
                let arm = transform.affine().transform_vector3(axis) * marker.display_size;
                (center - arm, center + arm)
            })
        })
}

/// Draw a line from each camera with an enabled [`TrackTo`] to its target.
pub fn draw_target_lines(
    cameras: Query<(&TrackTo, &GlobalTransform, Option<&MarkerIndicator>), With<CameraLens>>,
    targets: Query<&GlobalTransform>,
    mut gizmos: Gizmos,
) {
    for (track, camera_transform, _) in cameras
        .iter()
        .filter(|(track, ..)| track.enabled)
        .filter(|(.., indicator)| indicator.map(|i| i.enabled).unwrap_or(true))
    {
        let Ok(target_transform) = targets.get(track.target) else {
            continue;
        };
        gizmos.line(
            camera_transform.translation(),
            target_transform.translation(),
            Color::srgb(0.4, 0.4, 0.4),
        );
    }
}
