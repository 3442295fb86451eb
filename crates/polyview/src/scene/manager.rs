//! Scene container and object commands.
//!
//! [`Scene`] owns every [`RenderObject`] in a slotmap arena and hands out
//! [`ObjectKey`] handles instead of references. A removed object's key is
//! never reused for a different object, so a stale key held by a caller
//! misses cleanly instead of aliasing. The scene also tracks the single
//! "moving" object that interactive drags act on; removal always clears
//! that slot before the object goes away.

use crate::assets::ImageData;
use crate::config::ViewerConfig;
use crate::foundation::math::{utils, Mat4, Vec3};
use crate::render::TextureKind;
use crate::scene::{Camera, Light, RenderObject};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to an object stored in a [`Scene`]
    pub struct ObjectKey;
}

/// Matrices derived once per frame at the scene level
///
/// The scene-level model matrix is identity; objects carry their own
/// transforms, composed in by the renderer. The normal matrix is the
/// inverse-transpose of `model_view`, computed with the rigid-only
/// inverse, which holds exactly because the scene-level model-view is a
/// camera pose with no scale or shear.
#[derive(Debug, Clone, Copy)]
pub struct FrameMatrices {
    /// Perspective projection
    pub projection: Mat4,
    /// World-to-view transform
    pub view: Mat4,
    /// View composed with the identity scene model matrix
    pub model_view: Mat4,
    /// Inverse-transpose of `model_view` for normal vectors
    pub normal: Mat4,
}

/// Everything the renderer needs for one viewer instance
#[derive(Debug, Clone)]
pub struct Scene {
    objects: SlotMap<ObjectKey, RenderObject>,
    draw_order: Vec<ObjectKey>,
    moving: Option<ObjectKey>,
    /// Viewpoint for this scene
    pub camera: Camera,
    /// The single scene light
    pub light: Light,
    /// RGBA clear color in 0..=1
    pub background: [f32; 4],
}

impl Scene {
    /// Create an empty scene with default camera, light and a dark
    /// gray background.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            draw_order: Vec::new(),
            moving: None,
            camera: Camera::default(),
            light: Light::default(),
            background: [0.1, 0.1, 0.1, 1.0],
        }
    }

    /// Add an object, returning its handle.
    ///
    /// Objects draw in insertion order.
    pub fn add_object(&mut self, object: RenderObject) -> ObjectKey {
        log::debug!("Scene: adding object '{}'", object.name);
        let key = self.objects.insert(object);
        self.draw_order.push(key);
        key
    }

    /// Remove an object and get it back, or `None` for a stale key.
    ///
    /// The mover slot is cleared first whenever it names the removed
    /// object, so no dangling mover can survive a removal.
    pub fn remove_object(&mut self, key: ObjectKey) -> Option<RenderObject> {
        if self.moving == Some(key) {
            self.moving = None;
        }
        let removed = self.objects.remove(key)?;
        self.draw_order.retain(|k| *k != key);
        log::debug!("Scene: removed object '{}'", removed.name);
        Some(removed)
    }

    /// Borrow an object.
    pub fn object(&self, key: ObjectKey) -> Option<&RenderObject> {
        self.objects.get(key)
    }

    /// Mutably borrow an object.
    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut RenderObject> {
        self.objects.get_mut(key)
    }

    /// Objects with their keys, in draw order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &RenderObject)> {
        self.draw_order
            .iter()
            .filter_map(move |&key| self.objects.get(key).map(|object| (key, object)))
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Mark an object as the one interactive drags move.
    ///
    /// At most one object moves at a time; a second call simply replaces
    /// the previous mover. Returns false when the key is stale.
    pub fn begin_move(&mut self, key: ObjectKey) -> bool {
        if !self.objects.contains_key(key) {
            return false;
        }
        self.moving = Some(key);
        true
    }

    /// Clear the mover slot, returning the key that was moving.
    pub fn end_move(&mut self) -> Option<ObjectKey> {
        self.moving.take()
    }

    /// The object currently marked as moving, if any.
    pub fn moving_object(&self) -> Option<ObjectKey> {
        self.moving
    }

    /// Translate an object along its local axes. False for a stale key.
    pub fn translate_object(&mut self, key: ObjectKey, delta: Vec3) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Rotate an object about its local axes. False for a stale key.
    pub fn rotate_object(&mut self, key: ObjectKey, rx: f32, ry: f32, rz: f32) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.rotate(rx, ry, rz);
                true
            }
            None => false,
        }
    }

    /// Place an object at an absolute position. False for a stale key.
    pub fn set_object_position(&mut self, key: ObjectKey, position: Vec3) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Return an object's transform to identity. False for a stale key.
    pub fn reset_object(&mut self, key: ObjectKey) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.reset_transform();
                true
            }
            None => false,
        }
    }

    /// Bind a whole-object texture slot. False for a stale key.
    pub fn set_object_texture(
        &mut self,
        key: ObjectKey,
        kind: TextureKind,
        image: ImageData,
    ) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.set_texture(kind, image);
                true
            }
            None => false,
        }
    }

    /// Move the light to the current camera position.
    pub fn pin_light_to_camera(&mut self) {
        self.light.position = self.camera.position;
        log::debug!("Light pinned to camera at {:?}", self.light.position);
    }

    /// Overwrite background, camera and light state from a configuration.
    pub fn apply_config(&mut self, config: &ViewerConfig) {
        self.background = config.background;

        self.camera.position = Vec3::from(config.camera.position);
        self.camera.target = Vec3::from(config.camera.target);
        self.camera.fov_y = utils::deg_to_rad(config.camera.fov_y_deg);
        self.camera.near = config.camera.near;
        self.camera.far = config.camera.far;
        self.camera.orbit_step = config.orbit_step;
        self.camera.pan_step = config.pan_step;
        self.camera.zoom_step = config.zoom_step;

        self.light.position = Vec3::from(config.light.position);
        self.light.color = Vec3::from(config.light.color);
        self.light.ambient_color = Vec3::from(config.light.ambient_color);
        self.light.ambient_strength = config.light.ambient_strength;
    }

    /// Derive the per-frame matrix set from the current camera pose.
    pub fn frame_matrices(&self) -> FrameMatrices {
        let projection = self.camera.projection_matrix();
        let view = self.camera.view_matrix();
        let model_view = view;
        let normal = model_view.rigid_inverse().transpose();
        FrameMatrices {
            projection,
            view,
            model_view,
            normal,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::load_model;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    const TRIANGLE_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    fn triangle_object(name: &str) -> RenderObject {
        let loaded = load_model(TRIANGLE_OBJ, None, &[]).unwrap();
        RenderObject::from_model(name, &loaded.model, loaded.materials)
    }

    #[test]
    fn test_add_and_remove_objects() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_object("a"));
        let b = scene.add_object(triangle_object("b"));
        assert_eq!(scene.len(), 2);

        let removed = scene.remove_object(a).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(scene.len(), 1);
        assert!(scene.object(a).is_none());
        assert!(scene.object(b).is_some());

        // A second removal through the same key misses.
        assert!(scene.remove_object(a).is_none());
    }

    #[test]
    fn test_draw_order_follows_insertion() {
        let mut scene = Scene::new();
        scene.add_object(triangle_object("first"));
        let second = scene.add_object(triangle_object("second"));
        scene.add_object(triangle_object("third"));

        let names: Vec<&str> = scene.objects().map(|(_, o)| o.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);

        // Removing from the middle keeps the remaining order intact.
        scene.remove_object(second);
        let names: Vec<&str> = scene.objects().map(|(_, o)| o.name.as_str()).collect();
        assert_eq!(names, ["first", "third"]);
    }

    #[test]
    fn test_mover_slot_is_exclusive() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_object("a"));
        let b = scene.add_object(triangle_object("b"));

        assert!(scene.begin_move(a));
        assert!(scene.begin_move(b));
        assert_eq!(scene.moving_object(), Some(b));

        assert_eq!(scene.end_move(), Some(b));
        assert_eq!(scene.moving_object(), None);
    }

    #[test]
    fn test_removing_the_mover_clears_the_slot() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_object("a"));

        scene.begin_move(a);
        scene.remove_object(a);

        assert_eq!(scene.moving_object(), None);
        assert!(!scene.begin_move(a));
    }

    #[test]
    fn test_commands_miss_on_stale_keys() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_object("a"));
        scene.remove_object(a);

        assert!(!scene.translate_object(a, Vec3::new(1.0, 0.0, 0.0)));
        assert!(!scene.rotate_object(a, 0.1, 0.0, 0.0));
        assert!(!scene.set_object_position(a, Vec3::zero()));
        assert!(!scene.reset_object(a));
    }

    #[test]
    fn test_translate_command_moves_world_positions() {
        let mut scene = Scene::new();
        let key = scene.add_object(triangle_object("a"));

        assert!(scene.translate_object(key, Vec3::new(0.0, 2.0, 0.0)));
        let object = scene.object(key).unwrap();
        assert_eq!(object.world_positions()[0], [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_pin_light_to_camera() {
        let mut scene = Scene::new();
        scene.camera.position = Vec3::new(7.0, 8.0, 9.0);
        scene.pin_light_to_camera();
        assert_relative_eq!(scene.light.position, Vec3::new(7.0, 8.0, 9.0), epsilon = EPSILON);
    }

    #[test]
    fn test_frame_matrices_normal_matches_view_rotation() {
        let mut scene = Scene::new();
        scene.camera.position = Vec3::new(1.0, 2.0, 5.0);
        scene.camera.target = Vec3::zero();

        let frame = scene.frame_matrices();

        // For a rigid model-view the inverse-transpose shares its rotation block.
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(
                    frame.normal.m[row][col],
                    frame.view.m[row][col],
                    epsilon = EPSILON
                );
            }
        }
    }

    #[test]
    fn test_apply_config_updates_camera_and_light() {
        let mut scene = Scene::new();
        let mut config = ViewerConfig::default();
        config.background = [0.0, 0.5, 0.0, 1.0];
        config.camera.position = [0.0, 0.0, 10.0];
        config.camera.fov_y_deg = 90.0;
        config.light.ambient_strength = 0.25;
        config.zoom_step = 2.5;

        scene.apply_config(&config);

        assert_eq!(scene.background, [0.0, 0.5, 0.0, 1.0]);
        assert_relative_eq!(scene.camera.position.z, 10.0, epsilon = EPSILON);
        assert_relative_eq!(scene.camera.fov_y, std::f32::consts::FRAC_PI_2, epsilon = EPSILON);
        assert_relative_eq!(scene.light.ambient_strength, 0.25, epsilon = EPSILON);
        assert_relative_eq!(scene.camera.zoom_step, 2.5, epsilon = EPSILON);
    }
}
