//! The [`TrackTo`] constraint, which keeps an entity pointed at a target entity.
//!
//! The constraint is evaluated in `PostUpdate` and written into the owner's [`Transform`]. The
//! same evaluation is available through [`evaluated_world_transform`] so that operations running
//! mid-frame see the pose the constraint will produce.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use crate::transform::{decompose, recompose, set_world_transform, world_transform};

/// See the [module](self) docs.
pub struct TrackToPlugin;

impl Plugin for TrackToPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sets(app);
        app.add_systems(
            PostUpdate,
            TrackTo::apply.in_set(crate::TargetCameraSystems::Constrain),
        )
        .register_type::<TrackTo>()
        .register_type::<TrackAxis>();
    }
}

/// The local axis of the owner that is pointed at the target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TrackAxis {
    /// Local +X.
    PositiveX,
    /// Local +Y.
    PositiveY,
    /// Local +Z.
    PositiveZ,
    /// Local -X.
    NegativeX,
    /// Local -Y.
    NegativeY,
    /// Local -Z, the direction a camera looks.
    #[default]
    NegativeZ,
}

impl TrackAxis {
    /// The axis as a local space vector.
    pub fn local_vector(self) -> Vec3 {
        match self {
            TrackAxis::PositiveX => Vec3::X,
            TrackAxis::PositiveY => Vec3::Y,
            TrackAxis::PositiveZ => Vec3::Z,
            TrackAxis::NegativeX => Vec3::NEG_X,
            TrackAxis::NegativeY => Vec3::NEG_Y,
            TrackAxis::NegativeZ => Vec3::NEG_Z,
        }
    }
}

/// Rotates the owning entity so its [`TrackTo::track_axis`] points at [`TrackTo::target`].
///
/// A camera carrying an enabled constraint whose target is a camera target is a *target camera*,
/// see [`is_target_camera`](crate::camera::target::is_target_camera).
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct TrackTo {
    /// The entity to point at.
    pub target: Entity,
    /// A disabled constraint keeps its settings but leaves the owner alone.
    pub enabled: bool,
    /// Which local axis points at the target.
    pub track_axis: TrackAxis,
    /// World space direction the owner's local +Y leans toward.
    pub up: Dir3,
}

impl TrackTo {
    /// Name under which target cameras know this constraint.
    pub const NAME: &'static str = "Target_Camera";

    /// An enabled constraint pointing the owner's local -Z at `target`, with +Y up.
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            enabled: true,
            track_axis: TrackAxis::NegativeZ,
            up: Dir3::Y,
        }
    }

    /// The world rotation that points the track axis from `from` toward `to`, or `None` when the
    /// two points coincide.
    pub fn rotation(&self, from: Vec3, to: Vec3) -> Option<Quat> {
        let direction = to - from;
        if direction.length_squared() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        let look = Transform::IDENTITY.looking_to(direction, self.up).rotation;
        let axis_to_forward = Quat::from_rotation_arc(self.track_axis.local_vector(), Vec3::NEG_Z);
        Some((look * axis_to_forward).normalize())
    }

    fn apply(world: &mut World) {
        let mut owners = world.query::<(Entity, &TrackTo)>();
        let owners: Vec<Entity> = owners
            .iter(world)
            .filter(|(_, track)| track.enabled)
            .map(|(entity, _)| entity)
            .collect();

        for owner in owners {
            if let Some(pose) = evaluated_world_transform(world, owner) {
                set_world_transform(world, owner, pose);
            }
        }
    }
}

/// The world pose of `entity` after its [`TrackTo`] constraint, if enabled, has been applied.
///
/// Translation and scale are unaffected by the constraint. If the target is missing or sits
/// exactly on the owner, the owner's own rotation is kept.
pub fn evaluated_world_transform(world: &World, entity: Entity) -> Option<GlobalTransform> {
    let pose = world_transform(world, entity)?;
    let Some(track) = world.get::<TrackTo>(entity).filter(|track| track.enabled) else {
        return Some(pose);
    };
    let Some(target) = world_transform(world, track.target) else {
        return Some(pose);
    };
    let (translation, rotation, scale) = decompose(&pose);
    let rotation = track
        .rotation(translation, target.translation())
        .unwrap_or(rotation);
    Some(recompose(translation, rotation, scale))
}

/// Apply the [`TrackTo`] constraint on `entity` as its own transform, then remove the constraint.
///
/// The world pose of the entity is the same before and after. Returns `false` if the entity had
/// no constraint.
pub fn bake_track_to(world: &mut World, entity: Entity) -> bool {
    if world.get::<TrackTo>(entity).is_none() {
        return false;
    }
    // Write the rotation while the constraint still owns it, then drop the constraint.
    if let Some(pose) = evaluated_world_transform(world, entity) {
        set_world_transform(world, entity, pose);
    }
    world.entity_mut(entity).remove::<TrackTo>();
    debug!("Baked {} constraint on {entity}", TrackTo::NAME);
    true
}
