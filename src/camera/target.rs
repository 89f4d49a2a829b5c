//! Resolves which entity a camera is tracking.
//!
//! Nothing here is cached. Whether a camera is a target camera, and which entity is its target, is
//! recomputed from the constraint and role components every time it is asked.

use bevy_ecs::prelude::*;
use bevy_hierarchy::Children;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;

use super::{constraint::TrackTo, lens::CameraLens};

/// Role tag for entities that serve as the point of interest of a target camera.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Component, Reflect)]
#[reflect(Component)]
pub struct CameraTarget;

/// A lightweight, non-rendered reference point, drawn as plain axes by the
/// [marker indicator](crate::extensions) extension.
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct EmptyMarker {
    /// Length of each drawn axis.
    pub display_size: f32,
}

impl Default for EmptyMarker {
    fn default() -> Self {
        Self { display_size: 0.1 }
    }
}

/// Is `entity` a camera, i.e. does it have a [`CameraLens`]?
pub fn is_camera(world: &World, entity: Entity) -> bool {
    world.get::<CameraLens>(entity).is_some()
}

/// Is `camera` currently a target camera?
///
/// True when `camera` is a camera with an enabled [`TrackTo`] whose target exists and is either an
/// [`EmptyMarker`] or tagged [`CameraTarget`].
pub fn is_target_camera(world: &World, camera: Entity) -> bool {
    if !is_camera(world, camera) {
        return false;
    }
    let Some(track) = world.get::<TrackTo>(camera).filter(|track| track.enabled) else {
        return false;
    };
    world.get::<EmptyMarker>(track.target).is_some() || is_tagged(world, track.target)
}

/// Find the target of `camera`.
///
/// The [`TrackTo`] target is preferred when it carries [`CameraTarget`]. Otherwise, the first
/// direct child carrying [`CameraTarget`] is returned; this is where a standard camera keeps its
/// previous target.
pub fn get_target(world: &World, camera: Entity) -> Option<Entity> {
    let from_constraint = world
        .get::<TrackTo>(camera)
        .map(|track| track.target)
        .filter(|&target| is_tagged(world, target));
    if from_constraint.is_some() {
        return from_constraint;
    }

    world
        .get::<Children>(camera)?
        .iter()
        .copied()
        .find(|&child| is_tagged(world, child))
}

/// Is `target` also tracked by a camera other than `owner`?
///
/// Disabled constraints count, since they can be re-enabled at any time.
pub fn is_target_shared(world: &World, target: Entity, owner: Entity) -> bool {
    world.iter_entities().any(|entity| {
        entity.id() != owner
            && entity.contains::<CameraLens>()
            && entity
                .get::<TrackTo>()
                .is_some_and(|track| track.target == target)
    })
}

fn is_tagged(world: &World, entity: Entity) -> bool {
    world.get::<CameraTarget>(entity).is_some()
}
