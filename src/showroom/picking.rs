//! Hover and click handling for the interactive objects.

use winit::window::CursorIcon;

use crate::gfx::{
    picking::{screen_to_ray, ObjectPicker, PickResult},
    scene::{ObjectId, Scene},
};

/// Emissive tint of the hovered object.
pub const HOVER_EMISSIVE: u32 = 0x333333;
const NO_EMISSIVE: u32 = 0x000000;

/// Tracks which interactive object is under the pointer.
///
/// At most one object is highlighted at a time; its material's emissive
/// colour carries the highlight.
pub struct PickingController {
    interactive: Vec<ObjectId>,
    picker: ObjectPicker,
    hovered: Option<ObjectId>,
    cursor: CursorIcon,
}

impl Default for PickingController {
    fn default() -> Self {
        Self {
            interactive: Vec::new(),
            picker: ObjectPicker::new(),
            hovered: None,
            cursor: CursorIcon::Default,
        }
    }
}

impl PickingController {
    /// Adds an object to the clickable set.
    pub fn register(&mut self, object: ObjectId) {
        if !self.interactive.contains(&object) {
            self.interactive.push(object);
        }
    }

    pub fn interactive(&self) -> &[ObjectId] {
        &self.interactive
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Pointer cursor over an interactive object, default elsewhere.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Nearest interactive object under a pixel position.
    pub fn hit_test(
        &mut self,
        position: (f32, f32),
        viewport: (f32, f32),
        scene: &Scene,
    ) -> Option<PickResult> {
        let ray = screen_to_ray(position, viewport, &scene.camera_manager.camera);
        self.picker.pick(&ray, &self.interactive, scene)
    }

    /// Updates the highlight for a pointer move. Returns `true` when the
    /// hovered object changed.
    pub fn on_pointer_move(
        &mut self,
        position: (f32, f32),
        viewport: (f32, f32),
        scene: &mut Scene,
    ) -> bool {
        let hit = self.hit_test(position, viewport, scene).map(|hit| hit.object_id);
        self.cursor = if hit.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        };

        if hit == self.hovered {
            return false;
        }

        if let Some(previous) = self.hovered {
            set_emissive(scene, previous, NO_EMISSIVE);
        }
        if let Some(current) = hit {
            set_emissive(scene, current, HOVER_EMISSIVE);
        }
        log::debug!("Hover {:?} -> {:?}", self.hovered, hit);
        self.hovered = hit;
        true
    }

    /// Object under a click, if any.
    pub fn on_click(
        &mut self,
        position: (f32, f32),
        viewport: (f32, f32),
        scene: &Scene,
    ) -> Option<ObjectId> {
        self.hit_test(position, viewport, scene).map(|hit| hit.object_id)
    }

    /// Drops the highlight, e.g. when the pointer leaves the window.
    pub fn clear_hover(&mut self, scene: &mut Scene) {
        if let Some(previous) = self.hovered.take() {
            set_emissive(scene, previous, NO_EMISSIVE);
        }
        self.cursor = CursorIcon::Default;
    }
}

fn set_emissive(scene: &mut Scene, object: ObjectId, hex: u32) {
    let Some(material_id) = scene
        .get_object(object)
        .and_then(|object| object.get_material_id().cloned())
    else {
        return;
    };
    if let Some(material) = scene.material_manager.get_material_mut(&material_id) {
        material.set_emissive_hex(hex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::geometry::generate_box;
    use crate::gfx::picking::world_to_screen;
    use crate::gfx::resources::Material;
    use crate::gfx::scene::{object::Mesh, Object, Transform};
    use cgmath::Vector3;

    const VIEWPORT: (f32, f32) = (800.0, 600.0);

    fn scene_with_box() -> (Scene, ObjectId) {
        let mut camera = OrbitCamera::new(Default::default(), VIEWPORT.0 / VIEWPORT.1);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(1.0, 1.0)));
        scene.material_manager.add_material(Material::from_hex("crate", 0xcd853f, 0.6, 0.1));
        let id = scene.add_object(
            Object::new("crate", vec![Mesh::from_geometry(&generate_box(1.0, 1.0, 1.0))])
                .with_material("crate")
                .with_transform(Transform::from_position(0.0, 0.5, 0.0)),
        );
        (scene, id)
    }

    fn emissive(scene: &Scene, id: ObjectId) -> [f32; 3] {
        scene
            .get_material_for_object(&scene.objects[id])
            .emissive
    }

    #[test]
    fn hover_tints_and_clears() {
        let (mut scene, id) = scene_with_box();
        let mut picking = PickingController::default();
        picking.register(id);

        let over = world_to_screen(Vector3::new(0.0, 0.5, 0.0), VIEWPORT, &scene.camera_manager.camera)
            .expect("in front of the camera");
        assert!(picking.on_pointer_move(over, VIEWPORT, &mut scene));
        assert_eq!(picking.hovered(), Some(id));
        assert_eq!(picking.cursor(), CursorIcon::Pointer);
        assert!(emissive(&scene, id)[0] > 0.19);

        // staying on the same object changes nothing
        assert!(!picking.on_pointer_move(over, VIEWPORT, &mut scene));

        assert!(picking.on_pointer_move((5.0, 5.0), VIEWPORT, &mut scene));
        assert_eq!(picking.hovered(), None);
        assert_eq!(picking.cursor(), CursorIcon::Default);
        assert_eq!(emissive(&scene, id), [0.0; 3]);
    }

    #[test]
    fn unregistered_objects_are_ignored() {
        let (mut scene, id) = scene_with_box();
        let mut picking = PickingController::default();
        let over = world_to_screen(Vector3::new(0.0, 0.5, 0.0), VIEWPORT, &scene.camera_manager.camera)
            .expect("in front of the camera");
        assert!(!picking.on_pointer_move(over, VIEWPORT, &mut scene));
        assert_eq!(picking.on_click(over, VIEWPORT, &scene), None);

        picking.register(id);
        picking.register(id);
        assert_eq!(picking.interactive(), &[id]);
        assert_eq!(picking.on_click(over, VIEWPORT, &scene), Some(id));
    }

    #[test]
    fn clear_hover_resets_tint() {
        let (mut scene, id) = scene_with_box();
        let mut picking = PickingController::default();
        picking.register(id);
        let over = world_to_screen(Vector3::new(0.0, 0.5, 0.0), VIEWPORT, &scene.camera_manager.camera)
            .expect("in front of the camera");
        picking.on_pointer_move(over, VIEWPORT, &mut scene);
        picking.clear_hover(&mut scene);
        assert_eq!(picking.hovered(), None);
        assert_eq!(emissive(&scene, id), [0.0; 3]);
    }
}
