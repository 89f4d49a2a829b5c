//! Switches cameras between standard and target camera modes.
//!
//! A *standard* camera uses its own rotation. A *target* camera is rotated by a [`TrackTo`]
//! constraint toward a target entity. Leaving target mode bakes the tracked rotation into the
//! camera and keeps the target as a hidden child, so it can be restored exactly when target mode is
//! entered again. Every reparenting step keeps world space poses unchanged.

use bevy_app::prelude::*;
use bevy_core::Name;
use bevy_ecs::prelude::*;
use bevy_hierarchy::{BuildChildren, Parent};
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_render::{prelude::*, view::RenderLayers};
use bevy_transform::prelude::*;

use super::{
    constraint::{bake_track_to, evaluated_world_transform, TrackTo},
    lens::CameraLens,
    target::{get_target, is_camera, is_target_camera, is_target_shared, CameraTarget, EmptyMarker},
    TargetCameraSettings,
};
use crate::{
    error::TargetCameraError,
    transform::{decompose, distance, recompose, set_world_transform, world_transform},
};

/// See the [module](self) docs.
pub struct TargetCameraPlugin;

impl Plugin for TargetCameraPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sets(app);
        app.init_resource::<TargetCameraSettings>()
            .add_event::<TargetCameraTrigger>()
            .add_systems(
                PostUpdate,
                TargetCameraTrigger::receive.in_set(crate::TargetCameraSystems::Trigger),
            )
            .register_type::<CameraTarget>()
            .register_type::<EmptyMarker>()
            .register_type::<TargetCameraSettings>();
    }
}

/// What a [`TargetCameraTrigger`] should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetCameraAction {
    /// Switch between standard and target mode, see [`toggle_camera_mode`].
    Toggle,
    /// Switch only if the camera is not already in the requested mode, see [`set_target_camera`].
    Set(bool),
    /// Move the target in front of the camera, see [`set_target_distance`].
    SetTargetDistance(f32),
    /// Align the target with the camera, see [`match_target_rotation`].
    MatchTargetRotation,
}

/// Send this event to change the target camera setup of a camera.
#[derive(Debug, Clone, Copy, Event)]
pub struct TargetCameraTrigger {
    /// The camera to update.
    pub camera: Entity,
    /// The change to make.
    pub action: TargetCameraAction,
}

impl TargetCameraTrigger {
    fn receive(world: &mut World) {
        let triggers: Vec<Self> = world.resource_mut::<Events<Self>>().drain().collect();
        if triggers.is_empty() {
            return;
        }
        let settings = TargetCameraSettings::current(world);

        for TargetCameraTrigger { camera, action } in triggers {
            let result = match action {
                TargetCameraAction::Toggle => toggle_camera_mode(world, camera).map(|_| ()),
                TargetCameraAction::Set(enabled) => {
                    set_target_camera(world, camera, enabled).map(|_| ())
                }
                TargetCameraAction::SetTargetDistance(distance) => active_target(world, camera)
                    .and_then(|_| {
                        set_target_distance(world, camera, settings.clamp_distance(distance))
                    }),
                TargetCameraAction::MatchTargetRotation => active_target(world, camera)
                    .and_then(|_| match_target_rotation(world, camera)),
            };
            if let Err(err) = result {
                debug!("Ignoring {action:?}: {err}");
            }
        }
    }
}

/// The mode of a camera, derived from its constraint and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// The camera uses its own rotation.
    Standard,
    /// The camera has a target, but its constraint is switched off.
    TargetConstraintDisabled,
    /// The camera tracks its target.
    TargetActive,
}

/// The current mode of `camera`, or `None` if it is not a camera.
pub fn camera_mode(world: &World, camera: Entity) -> Option<CameraMode> {
    if !is_camera(world, camera) {
        return None;
    }
    if is_target_camera(world, camera) {
        return Some(CameraMode::TargetActive);
    }
    let paused = world
        .get::<TrackTo>(camera)
        .is_some_and(|track| !track.enabled)
        && get_target(world, camera).is_some();
    Some(if paused {
        CameraMode::TargetConstraintDisabled
    } else {
        CameraMode::Standard
    })
}

/// Switch `camera` between standard and target mode, and return the resulting mode.
///
/// - Without a constraint, the camera enters target mode. Its stashed target is restored, or a new
///   one is created in front of the camera.
/// - With a disabled constraint and a resolvable target, the constraint is enabled again.
/// - Otherwise the constraint is baked and removed. Unless another camera also tracks the target,
///   the target is parented to the camera and hidden.
pub fn toggle_camera_mode(
    world: &mut World,
    camera: Entity,
) -> Result<CameraMode, TargetCameraError> {
    if !is_camera(world, camera) {
        return Err(TargetCameraError::NotACamera(camera));
    }

    match world.get::<TrackTo>(camera).copied() {
        None => enter_target_mode(world, camera)?,
        Some(track) if !track.enabled => match get_target(world, camera) {
            Some(target) => resume_target_mode(world, camera, target),
            None => exit_target_mode(world, camera, track),
        },
        Some(track) => exit_target_mode(world, camera, track),
    }

    let mode = camera_mode(world, camera).unwrap_or(CameraMode::Standard);
    debug!("Camera {camera} is now in {mode:?} mode");
    Ok(mode)
}

/// Put `camera` in target mode if `enabled`, or standard mode otherwise. Does nothing if the camera
/// is already a target camera, respectively isn't one.
pub fn set_target_camera(
    world: &mut World,
    camera: Entity,
    enabled: bool,
) -> Result<CameraMode, TargetCameraError> {
    if is_target_camera(world, camera) != enabled {
        return toggle_camera_mode(world, camera);
    }
    camera_mode(world, camera).ok_or(TargetCameraError::NotACamera(camera))
}

/// Distance from `camera` to its target.
pub fn target_distance(world: &World, camera: Entity) -> Option<f32> {
    distance(world, camera, get_target(world, camera)?)
}

/// Distance from `camera` to its target, or [`TargetCameraSettings::default_distance`] when there
/// is no target to measure.
pub fn target_distance_or_default(world: &World, camera: Entity) -> f32 {
    target_distance(world, camera)
        .unwrap_or_else(|| TargetCameraSettings::current(world).default_distance)
}

/// Focal length of `camera` in millimeters, or [`TargetCameraSettings::default_focal_length`] when
/// the entity is not a camera.
pub fn focal_length_or_default(world: &World, camera: Entity) -> f32 {
    match world.get::<CameraLens>(camera) {
        Some(lens) => lens.focal_length,
        None => TargetCameraSettings::current(world).default_focal_length,
    }
}

/// The target of `camera` if it is currently a target camera.
///
/// Target distance, target rotation and dolly zoom controls only apply to target cameras. A
/// standard camera still finds its stashed child target, but moving the camera would drag that
/// child along.
pub fn active_target(world: &World, camera: Entity) -> Result<Entity, TargetCameraError> {
    if !is_camera(world, camera) {
        return Err(TargetCameraError::NotACamera(camera));
    }
    if !is_target_camera(world, camera) {
        return Err(TargetCameraError::NotATargetCamera(camera));
    }
    get_target(world, camera).ok_or(TargetCameraError::MissingTarget(camera))
}

/// Move the target of `camera` straight in front of the camera, `distance` away.
///
/// The target keeps its rotation and scale. The distance is not validated.
pub fn set_target_distance(
    world: &mut World,
    camera: Entity,
    distance: f32,
) -> Result<(), TargetCameraError> {
    let target = get_target(world, camera).ok_or(TargetCameraError::MissingTarget(camera))?;
    let camera_pose = evaluated_world_transform(world, camera)
        .ok_or(TargetCameraError::MissingTransform(camera))?;
    let target_pose =
        world_transform(world, target).ok_or(TargetCameraError::MissingTransform(target))?;

    let (_, rotation, scale) = decompose(&target_pose);
    let translation = camera_pose.transform_point(Vec3::NEG_Z * distance);
    set_world_transform(world, target, recompose(translation, rotation, scale));
    Ok(())
}

/// Rotate the target of `camera` so it is oriented like the camera.
pub fn match_target_rotation(world: &mut World, camera: Entity) -> Result<(), TargetCameraError> {
    let target = get_target(world, camera).ok_or(TargetCameraError::MissingTarget(camera))?;
    let camera_pose = evaluated_world_transform(world, camera)
        .ok_or(TargetCameraError::MissingTransform(camera))?;
    let target_pose =
        world_transform(world, target).ok_or(TargetCameraError::MissingTransform(target))?;

    let (translation, _, scale) = decompose(&target_pose);
    set_world_transform(
        world,
        target,
        recompose(translation, camera_pose.rotation(), scale),
    );
    Ok(())
}

fn enter_target_mode(world: &mut World, camera: Entity) -> Result<(), TargetCameraError> {
    let target = match get_target(world, camera) {
        Some(target) => {
            detach_in_place(world, target);
            world.entity_mut(target).insert(Visibility::Inherited);
            target
        }
        None => spawn_target(world, camera)?,
    };
    world.entity_mut(camera).insert(TrackTo::new(target));
    rename_target(world, camera, target);
    Ok(())
}

fn resume_target_mode(world: &mut World, camera: Entity, target: Entity) {
    let stashed = world.get::<Parent>(target).map(Parent::get) == Some(camera);
    if stashed {
        detach_in_place(world, target);
        world.entity_mut(target).insert(Visibility::Inherited);
    }
    if let Some(mut track) = world.get_mut::<TrackTo>(camera) {
        track.target = target;
        track.enabled = true;
    }
}

fn exit_target_mode(world: &mut World, camera: Entity, track: TrackTo) {
    bake_track_to(world, camera);

    let target = track.target;
    if world.get::<CameraTarget>(target).is_none() {
        return;
    }
    if is_target_shared(world, target, camera) {
        debug!("Leaving target {target} in place, another camera tracks it");
        return;
    }
    attach_in_place(world, target, camera);
    world.entity_mut(target).insert(Visibility::Hidden);
    rename_target(world, camera, target);
}

fn spawn_target(world: &mut World, camera: Entity) -> Result<Entity, TargetCameraError> {
    let settings = TargetCameraSettings::current(world);
    let camera_pose = evaluated_world_transform(world, camera)
        .ok_or(TargetCameraError::MissingTransform(camera))?;
    let translation = camera_pose.transform_point(Vec3::NEG_Z * settings.new_target_distance);
    let render_layers = world.get::<RenderLayers>(camera).cloned();

    let mut target = world.spawn((
        Transform::from_translation(translation),
        Visibility::Inherited,
        CameraTarget,
        EmptyMarker {
            display_size: settings.marker_display_size,
        },
    ));
    if let Some(render_layers) = render_layers {
        target.insert(render_layers);
    }
    let target = target.id();
    debug!("Created target {target} for camera {camera}");
    Ok(target)
}

/// Unparent `entity` without moving it.
fn detach_in_place(world: &mut World, entity: Entity) {
    if world.get::<Parent>(entity).is_none() {
        return;
    }
    let pose = world_transform(world, entity);
    world.entity_mut(entity).remove_parent();
    if let Some(pose) = pose {
        set_world_transform(world, entity, pose);
    }
}

/// Parent `entity` to `parent` without moving it.
fn attach_in_place(world: &mut World, entity: Entity, parent: Entity) {
    let pose = world_transform(world, entity);
    world.entity_mut(entity).set_parent(parent);
    if let Some(pose) = pose {
        set_world_transform(world, entity, pose);
    }
}

fn rename_target(world: &mut World, camera: Entity, target: Entity) {
    let name = match world.get::<Name>(camera) {
        Some(name) => format!("{}_Target", name.as_str()),
        None => "Camera_Target".to_owned(),
    };
    world.entity_mut(target).insert(Name::new(name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_hierarchy::Children;

    fn spawn_camera(world: &mut World, name: &str, transform: Transform) -> Entity {
        world
            .spawn((Name::new(name.to_owned()), CameraLens::default(), transform))
            .id()
    }

    fn assert_pose_eq(a: GlobalTransform, b: GlobalTransform) {
        assert!(
            a.compute_matrix().abs_diff_eq(b.compute_matrix(), 1e-4),
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn entering_target_mode_creates_target() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(1.0, 2.0, 3.0));
        assert_eq!(camera_mode(&world, camera), Some(CameraMode::Standard));

        let mode = toggle_camera_mode(&mut world, camera).unwrap();
        assert_eq!(mode, CameraMode::TargetActive);

        let target = get_target(&world, camera).unwrap();
        assert_eq!(world.get::<TrackTo>(camera).unwrap().target, target);
        assert!(world.get::<EmptyMarker>(target).is_some());
        assert_eq!(world.get::<Name>(target).unwrap().as_str(), "Cam_Target");
        assert!(world.get::<Parent>(target).is_none());
        let position = world_transform(&world, target).unwrap().translation();
        assert!(position.abs_diff_eq(Vec3::new(1.0, 2.0, -2.0), 1e-5));
    }

    #[test]
    fn new_target_follows_camera_orientation_and_layers() {
        let mut world = World::new();
        let camera = spawn_camera(
            &mut world,
            "Cam",
            Transform::from_xyz(0.0, 0.0, 0.0).looking_to(Vec3::X, Vec3::Y),
        );
        world.entity_mut(camera).insert(RenderLayers::layer(3));
        world.insert_resource(TargetCameraSettings {
            new_target_distance: 2.0,
            ..Default::default()
        });

        toggle_camera_mode(&mut world, camera).unwrap();

        let target = get_target(&world, camera).unwrap();
        let position = world_transform(&world, target).unwrap().translation();
        assert!(position.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
        assert_eq!(world.get::<RenderLayers>(target), Some(&RenderLayers::layer(3)));
    }

    #[test]
    fn round_trip_preserves_poses() {
        let mut world = World::new();
        let camera = spawn_camera(
            &mut world,
            "Cam",
            Transform::from_xyz(4.0, 3.0, 6.0).with_rotation(Quat::from_rotation_z(0.2)),
        );
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();
        world
            .get_mut::<Transform>(target)
            .unwrap()
            .translation = Vec3::new(-2.0, 1.0, 0.5);

        let camera_before = evaluated_world_transform(&world, camera).unwrap();
        let target_before = world_transform(&world, target).unwrap();

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::Standard)
        );
        assert!(world.get::<TrackTo>(camera).is_none());
        assert_eq!(world.get::<Parent>(target).map(Parent::get), Some(camera));
        assert_eq!(world.get::<Visibility>(target), Some(&Visibility::Hidden));
        assert_pose_eq(world_transform(&world, camera).unwrap(), camera_before);
        assert_pose_eq(world_transform(&world, target).unwrap(), target_before);

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::TargetActive)
        );
        assert_eq!(get_target(&world, camera), Some(target));
        assert!(world.get::<Parent>(target).is_none());
        assert_eq!(world.get::<Visibility>(target), Some(&Visibility::Inherited));
        assert_pose_eq(evaluated_world_transform(&world, camera).unwrap(), camera_before);
        assert_pose_eq(world_transform(&world, target).unwrap(), target_before);
    }

    #[test]
    fn stashed_target_follows_camera() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::default());
        toggle_camera_mode(&mut world, camera).unwrap();
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();

        world.get_mut::<Transform>(camera).unwrap().translation = Vec3::new(10.0, 0.0, 0.0);
        let position = world_transform(&world, target).unwrap().translation();
        assert!(position.abs_diff_eq(Vec3::new(10.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn shared_target_is_left_alone() {
        let mut world = World::new();
        let a = spawn_camera(&mut world, "A", Transform::from_xyz(0.0, 0.0, 5.0));
        let b = spawn_camera(&mut world, "B", Transform::from_xyz(5.0, 0.0, 0.0));
        toggle_camera_mode(&mut world, a).unwrap();
        let target = get_target(&world, a).unwrap();
        world.entity_mut(b).insert(TrackTo::new(target));
        let target_before = world_transform(&world, target).unwrap();

        assert_eq!(toggle_camera_mode(&mut world, a), Ok(CameraMode::Standard));

        assert!(world.get::<Parent>(target).is_none());
        assert_eq!(world.get::<Visibility>(target), Some(&Visibility::Inherited));
        assert_pose_eq(world_transform(&world, target).unwrap(), target_before);
        assert!(is_target_camera(&world, b));
        assert_eq!(get_target(&world, b), Some(target));
        assert_eq!(get_target(&world, a), None);
    }

    #[test]
    fn disabled_constraint_is_resumed() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::default());
        toggle_camera_mode(&mut world, camera).unwrap();
        world.get_mut::<TrackTo>(camera).unwrap().enabled = false;
        assert_eq!(
            camera_mode(&world, camera),
            Some(CameraMode::TargetConstraintDisabled)
        );

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::TargetActive)
        );
        assert!(world.get::<TrackTo>(camera).unwrap().enabled);
    }

    #[test]
    fn disabled_constraint_with_stashed_target_is_resumed() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(0.0, 1.0, 0.0));
        toggle_camera_mode(&mut world, camera).unwrap();
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();
        let target_before = world_transform(&world, target).unwrap();
        world.entity_mut(camera).insert(TrackTo {
            enabled: false,
            ..TrackTo::new(target)
        });

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::TargetActive)
        );
        assert!(world.get::<Parent>(target).is_none());
        assert_eq!(world.get::<Visibility>(target), Some(&Visibility::Inherited));
        assert_pose_eq(world_transform(&world, target).unwrap(), target_before);
    }

    #[test]
    fn set_target_camera_only_toggles_on_change() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::default());
        let mut targets = world.query_filtered::<Entity, With<CameraTarget>>();

        assert_eq!(
            set_target_camera(&mut world, camera, true),
            Ok(CameraMode::TargetActive)
        );
        assert_eq!(
            set_target_camera(&mut world, camera, true),
            Ok(CameraMode::TargetActive)
        );
        assert_eq!(targets.iter(&world).count(), 1);

        assert_eq!(
            set_target_camera(&mut world, camera, false),
            Ok(CameraMode::Standard)
        );
        assert_eq!(
            set_target_camera(&mut world, camera, false),
            Ok(CameraMode::Standard)
        );
        assert_eq!(targets.iter(&world).count(), 1);
    }

    #[test]
    fn target_is_renamed_after_camera() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::default());
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();

        world.entity_mut(camera).insert(Name::new("Hero"));
        toggle_camera_mode(&mut world, camera).unwrap();
        assert_eq!(world.get::<Name>(target).unwrap().as_str(), "Hero_Target");
    }

    #[test]
    fn non_camera_is_rejected() {
        let mut world = World::new();
        let entity = world.spawn(Transform::default()).id();
        assert_eq!(
            toggle_camera_mode(&mut world, entity),
            Err(TargetCameraError::NotACamera(entity))
        );
        assert_eq!(
            set_target_camera(&mut world, entity, false),
            Err(TargetCameraError::NotACamera(entity))
        );
        assert_eq!(camera_mode(&world, entity), None);
        assert!(world.get::<TrackTo>(entity).is_none());
    }

    #[test]
    fn target_distance_moves_target_in_front() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(0.0, 0.0, 10.0));
        assert_eq!(target_distance(&world, camera), None);
        assert_eq!(
            set_target_distance(&mut world, camera, 3.0),
            Err(TargetCameraError::MissingTarget(camera))
        );

        toggle_camera_mode(&mut world, camera).unwrap();
        assert!((target_distance(&world, camera).unwrap() - 5.0).abs() < 1e-5);

        let target = get_target(&world, camera).unwrap();
        world.get_mut::<Transform>(target).unwrap().rotation = Quat::from_rotation_x(1.0);
        set_target_distance(&mut world, camera, 8.0).unwrap();

        assert!((target_distance(&world, camera).unwrap() - 8.0).abs() < 1e-5);
        let transform = world.get::<Transform>(target).unwrap();
        assert!(transform
            .translation
            .abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
        assert!((transform.rotation * Vec3::Y)
            .abs_diff_eq(Quat::from_rotation_x(1.0) * Vec3::Y, 1e-5));
    }

    #[test]
    fn target_rotation_matches_camera() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(3.0, 3.0, 3.0));
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();
        world.get_mut::<Transform>(target).unwrap().translation = Vec3::ZERO;

        match_target_rotation(&mut world, camera).unwrap();

        let camera_rotation = evaluated_world_transform(&world, camera).unwrap().rotation();
        let target_pose = world_transform(&world, target).unwrap();
        assert_eq!(target_pose.translation(), Vec3::ZERO);
        assert!((target_pose.rotation() * Vec3::NEG_Z)
            .abs_diff_eq(camera_rotation * Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn disabled_constraint_without_target_is_removed() {
        let mut world = World::new();
        let elsewhere = world.spawn(Transform::from_xyz(5.0, 0.0, 0.0)).id();
        let camera = spawn_camera(
            &mut world,
            "Cam",
            Transform::from_xyz(0.0, 1.0, 2.0).with_rotation(Quat::from_rotation_y(0.4)),
        );
        world.entity_mut(camera).insert(TrackTo {
            enabled: false,
            ..TrackTo::new(elsewhere)
        });
        assert_eq!(camera_mode(&world, camera), Some(CameraMode::Standard));
        let before = world_transform(&world, camera).unwrap();

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::Standard)
        );
        assert!(world.get::<TrackTo>(camera).is_none());
        assert_pose_eq(world_transform(&world, camera).unwrap(), before);
        assert!(world.get::<Parent>(elsewhere).is_none());
        assert!(world.get::<Children>(camera).is_none());
    }

    #[test]
    fn untagged_marker_is_not_stashed() {
        let mut world = World::new();
        let marker = world
            .spawn((Transform::from_xyz(3.0, 0.0, 0.0), EmptyMarker::default()))
            .id();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(0.0, 0.0, 5.0));
        world.entity_mut(camera).insert(TrackTo::new(marker));
        assert_eq!(camera_mode(&world, camera), Some(CameraMode::TargetActive));
        let before = evaluated_world_transform(&world, camera).unwrap();
        let marker_before = world_transform(&world, marker).unwrap();

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::Standard)
        );
        assert!(world.get::<TrackTo>(camera).is_none());
        assert_pose_eq(world_transform(&world, camera).unwrap(), before);
        assert!(world.get::<Parent>(marker).is_none());
        assert_ne!(world.get::<Visibility>(marker), Some(&Visibility::Hidden));
        assert!(world.get::<Name>(marker).is_none());
        assert_pose_eq(world_transform(&world, marker).unwrap(), marker_before);
    }

    #[test]
    fn despawned_target_leaves_camera_in_place() {
        let mut world = World::new();
        let camera = spawn_camera(
            &mut world,
            "Cam",
            Transform::from_xyz(1.0, 2.0, 3.0).with_rotation(Quat::from_rotation_x(-0.3)),
        );
        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();
        world.despawn(target);
        let before = evaluated_world_transform(&world, camera).unwrap();

        assert_eq!(
            toggle_camera_mode(&mut world, camera),
            Ok(CameraMode::Standard)
        );
        assert!(world.get::<TrackTo>(camera).is_none());
        assert_pose_eq(world_transform(&world, camera).unwrap(), before);
        assert!(world.get::<Children>(camera).is_none());
        assert_eq!(get_target(&world, camera), None);
    }

    #[test]
    fn readouts_fall_back_to_settings() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::from_xyz(0.0, 0.0, 10.0));
        let not_camera = world.spawn(Transform::default()).id();
        assert_eq!(target_distance_or_default(&world, camera), 5.0);
        assert_eq!(focal_length_or_default(&world, not_camera), 50.0);

        world.insert_resource(TargetCameraSettings {
            default_distance: 7.5,
            default_focal_length: 35.0,
            new_target_distance: 2.0,
            ..Default::default()
        });
        assert_eq!(target_distance_or_default(&world, camera), 7.5);
        assert_eq!(focal_length_or_default(&world, not_camera), 35.0);
        assert_eq!(focal_length_or_default(&world, camera), 50.0);

        toggle_camera_mode(&mut world, camera).unwrap();
        assert!((target_distance_or_default(&world, camera) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn only_target_cameras_have_an_active_target() {
        let mut world = World::new();
        let camera = spawn_camera(&mut world, "Cam", Transform::default());
        let not_camera = world.spawn(Transform::default()).id();
        assert_eq!(
            active_target(&world, not_camera),
            Err(TargetCameraError::NotACamera(not_camera))
        );
        assert_eq!(
            active_target(&world, camera),
            Err(TargetCameraError::NotATargetCamera(camera))
        );

        toggle_camera_mode(&mut world, camera).unwrap();
        let target = get_target(&world, camera).unwrap();
        assert_eq!(active_target(&world, camera), Ok(target));

        // A stashed child target is still found, but is no longer active.
        toggle_camera_mode(&mut world, camera).unwrap();
        assert_eq!(get_target(&world, camera), Some(target));
        assert_eq!(
            active_target(&world, camera),
            Err(TargetCameraError::NotATargetCamera(camera))
        );
    }
}
