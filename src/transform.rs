//! World space transform helpers.
//!
//! Camera mode switches and dolly moves run in the middle of a frame, before transform
//! propagation, so [`GlobalTransform`] components may be stale. Everything here composes the
//! local [`Transform`]s up the hierarchy instead.

use bevy_ecs::prelude::*;
use bevy_hierarchy::Parent;
use bevy_math::prelude::*;
use bevy_transform::prelude::*;

/// The world pose of `entity`, built from its own and its ancestors' [`Transform`]s.
///
/// Ancestors without a [`Transform`] contribute nothing. Returns `None` if `entity` itself has
/// no [`Transform`].
pub fn world_transform(world: &World, entity: Entity) -> Option<GlobalTransform> {
    let local = *world.get::<Transform>(entity)?;
    let parent_world = world
        .get::<Parent>(entity)
        .and_then(|parent| world_transform(world, parent.get()))
        .unwrap_or(GlobalTransform::IDENTITY);
    Some(parent_world * local)
}

/// Write the local [`Transform`] that places `entity` at `global` under its current parent.
///
/// Returns `false` if the entity has no [`Transform`] to write to.
pub fn set_world_transform(world: &mut World, entity: Entity, global: GlobalTransform) -> bool {
    let local = match world
        .get::<Parent>(entity)
        .and_then(|parent| world_transform(world, parent.get()))
    {
        Some(parent_world) => global.reparented_to(&parent_world),
        None => global.compute_transform(),
    };
    let Some(mut transform) = world.get_mut::<Transform>(entity) else {
        return false;
    };
    *transform = local;
    true
}

/// Distance between the world space translations of two entities.
pub fn distance(world: &World, a: Entity, b: Entity) -> Option<f32> {
    let a = world_transform(world, a)?.translation();
    let b = world_transform(world, b)?.translation();
    Some(a.distance(b))
}

/// Unit vector pointing from `to` toward `from`.
///
/// The caller must make sure the points differ; coincident points produce a non-finite vector.
pub fn direction(from: Vec3, to: Vec3) -> Vec3 {
    (from - to).normalize()
}

/// Split a world pose into translation, rotation and scale.
pub fn decompose(pose: &GlobalTransform) -> (Vec3, Quat, Vec3) {
    let (scale, rotation, translation) = pose.to_scale_rotation_translation();
    (translation, rotation, scale)
}

/// Inverse of [`decompose`].
pub fn recompose(translation: Vec3, rotation: Quat, scale: Vec3) -> GlobalTransform {
    GlobalTransform::from(Transform {
        translation,
        rotation,
        scale,
    })
}
