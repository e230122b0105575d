use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::Device;

use super::vertex::Vertex3D;
use crate::gfx::geometry::GeometryData;
use crate::gfx::resources::material::MaterialId;

/// Index of an object inside its [`Scene`](super::Scene).
pub type ObjectId = usize;

/// How a mesh's index buffer is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshTopology {
    /// Shaded, lit triangles.
    Triangles,
    /// Unlit line segments, two indices per segment.
    Lines,
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    topology: MeshTopology,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::with_topology(vertices, indices, MeshTopology::Triangles)
    }

    /// Builds a line mesh from consecutive point pairs.
    pub fn lines(points: &[[f32; 3]]) -> Self {
        let vertices = points
            .iter()
            .map(|&position| Vertex3D {
                position,
                normal: [0.0; 3],
            })
            .collect();
        let indices = (0..points.len() as u32).collect();
        Self::with_topology(vertices, indices, MeshTopology::Lines)
    }

    fn with_topology(vertices: Vec<Vertex3D>, indices: Vec<u32>, topology: MeshTopology) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            topology,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn topology(&self) -> MeshTopology {
        self.topology
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Local placement of an object relative to its parent (or the world).
///
/// Rotation is Euler angles in radians applied X, then Y, then Z, so the
/// composed matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

/// Per-object uniform data. MUST match `ObjectUniform` in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// 1.0 when the object samples the shadow map.
    pub receive_shadow: f32,
    _padding: [f32; 3],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, receive_shadow: bool) -> Self {
        Self {
            model: model.into(),
            receive_shadow: if receive_shadow { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }
}

// GPU resources struct to hold the per-object uniform buffer and bind group
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    /// Parent whose world transform this object's transform is relative to.
    pub parent: Option<ObjectId>,
    pub material_id: Option<MaterialId>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    /// Create a new Object at the origin with no material
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            transform: Transform::default(),
            parent: None,
            material_id: None,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            gpu_resources: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    pub fn get_material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    pub fn has_topology(&self, topology: MeshTopology) -> bool {
        self.meshes.iter().any(|mesh| mesh.topology == topology)
    }

    /// Writes the object's world matrix to its uniform buffer
    pub fn upload_transform(&self, queue: &wgpu::Queue, world: Matrix4<f32>) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let uniform = ObjectUniform::new(world, self.receive_shadow);
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::bytes_of(&uniform),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let uniform = ObjectUniform::new(Matrix4::identity(), self.receive_shadow);
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Transform", self.name)),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    /// Draws the object's meshes of one topology; others are skipped.
    fn draw_object(&mut self, object: &'a Object, topology: MeshTopology);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object, topology: MeshTopology) {
        let Some(bind_group) = object.get_transform_bind_group() else {
            return;
        };
        self.set_bind_group(1, bind_group, &[]);
        for mesh in object.meshes.iter().filter(|m| m.topology == topology) {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(actual: Vector4<f32>, expected: Vector4<f32>) {
        let diff = actual - expected;
        let error = diff.x.abs() + diff.y.abs() + diff.z.abs() + diff.w.abs();
        assert!(error < 1e-5, "{actual:?} != {expected:?}");
    }

    #[test]
    fn rotated_plane_faces_up() {
        let floor = Transform::default().with_rotation(-FRAC_PI_2, 0.0, 0.0);
        let normal = floor.matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_close(normal, Vector4::new(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn translation_applies_after_rotation() {
        let wall = Transform::from_position(-4.0, 4.0, 0.0).with_rotation(0.0, FRAC_PI_2, 0.0);
        let corner = wall.matrix() * Vector4::new(4.0, 0.0, 0.0, 1.0);
        assert_close(corner, Vector4::new(-4.0, 4.0, -4.0, 1.0));
    }

    #[test]
    fn line_mesh_indexes_every_point() {
        let mesh = Mesh::lines(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0; 3], [0.0, 1.0, 0.0]]);
        assert_eq!(mesh.topology(), MeshTopology::Lines);
        assert_eq!(mesh.index_count(), 4);
        assert_eq!(mesh.vertex_count(), 4);
    }
}
