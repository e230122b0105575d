use cgmath::{Matrix4, SquareMatrix};
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};
use crate::wgpu_utils::BindGroupLayoutWithDesc;

use super::object::{MeshTopology, Object, ObjectId};

/// Main scene containing objects, materials, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager, // Centralized material storage
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds an object and returns its id.
    ///
    /// A parent must already be in the scene; an unknown parent is dropped
    /// with a warning and the object is placed in world space instead.
    pub fn add_object(&mut self, mut object: Object) -> ObjectId {
        if let Some(parent) = object.parent {
            if parent >= self.objects.len() {
                log::warn!(
                    "'{}' refers to missing parent {parent}; attaching to the world",
                    object.name
                );
                object.parent = None;
            }
        }
        object.name = self.ensure_unique_name(&object.name);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Gets immutable reference to an object by id
    pub fn get_object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Gets mutable reference to an object by id
    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|obj| obj.name == name)
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, obj)| obj.parent == Some(id))
            .map(|(child, _)| child)
    }

    /// Object-to-world matrix, composing every ancestor's transform.
    pub fn world_transform(&self, id: ObjectId) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        let mut current = Some(id);
        while let Some(index) = current {
            let Some(object) = self.objects.get(index) else {
                break;
            };
            matrix = object.transform.matrix() * matrix;
            current = object.parent;
        }
        matrix
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, transform_layout);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
        self.update_all_transforms(queue);
    }

    /// Writes every object's world transform to the GPU
    pub fn update_all_transforms(&self, queue: &wgpu::Queue) {
        for (id, object) in self.objects.iter().enumerate() {
            if object.gpu_resources.is_some() {
                object.upload_transform(queue, self.world_transform(id));
            }
        }
    }

    /// Syncs material changes (hover tints) to the GPU.
    pub fn update_materials(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Gets the total number of objects
    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let meshes = || self.objects.iter().flat_map(|obj| obj.meshes.iter());

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles: meshes()
                .filter(|m| m.topology() == MeshTopology::Triangles)
                .map(|m| m.index_count() / 3)
                .sum(),
            total_line_segments: meshes()
                .filter(|m| m.topology() == MeshTopology::Lines)
                .map(|m| m.index_count() / 2)
                .sum(),
            total_vertices: meshes().map(|m| m.vertex_count()).sum(),
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_line_segments: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, OrbitCamera};
    use crate::gfx::geometry::generate_box;
    use crate::gfx::scene::object::{Mesh, Transform};
    use cgmath::Vector4;

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(Default::default(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(1.0, 1.0)))
    }

    #[test]
    fn child_follows_parent() {
        let mut scene = empty_scene();
        let parent = scene.add_object(
            Object::new("drawer", vec![Mesh::from_geometry(&generate_box(1.0, 1.0, 1.0))])
                .with_transform(Transform::from_position(0.0, 0.2, -0.5)),
        );
        let child = scene.add_object(
            Object::new("handle", Vec::new())
                .with_transform(Transform::from_position(0.0, 0.0, 0.48))
                .with_parent(parent),
        );

        scene.objects[parent].transform.position.z = 1.0;

        let origin = scene.world_transform(child) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.y - 0.2).abs() < 1e-6);
        assert!((origin.z - 1.48).abs() < 1e-6);
        assert_eq!(scene.children(parent).collect::<Vec<_>>(), vec![child]);
    }

    #[test]
    fn missing_parent_is_dropped() {
        let mut scene = empty_scene();
        let id = scene.add_object(Object::new("orphan", Vec::new()).with_parent(7));
        assert_eq!(scene.objects[id].parent, None);
    }

    #[test]
    fn names_are_made_unique() {
        let mut scene = empty_scene();
        scene.add_object(Object::new("leg", Vec::new()));
        let second = scene.add_object(Object::new("leg", Vec::new()));
        assert_eq!(scene.objects[second].name, "leg (1)");
        assert_eq!(scene.find_object("leg (1)"), Some(second));
    }
}
