//! # Object Picking
//!
//! Mouse ray-casting against object bounding boxes.
//!
//! 1. **Mouse to Ray**: unproject the pointer through the camera
//! 2. **Ray-Object Intersection**: slab test against world-space boxes
//! 3. **Selection**: the closest hit wins
//!
//! An object is tested against one box for its own triangle meshes and one
//! per direct child, so a hit on a drawer's handle counts as a hit on the
//! drawer. Line meshes (outlines) never contribute.
//!
//! ```no_run
//! use trundle::gfx::picking::{screen_to_ray, ObjectPicker};
//!
//! // let ray = screen_to_ray((x, y), (width, height), &camera);
//! // let hit = picker.pick(&ray, &interactive, &scene);
//! ```

use cgmath::{
    ElementWise, EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Transform as _,
    Vector3, Vector4,
};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{MeshTopology, Object, ObjectId, Scene},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of a set of points; `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| aabb.including(p)))
    }

    fn including(self, p: Vector3<f32>) -> Self {
        Self {
            min: Vector3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z)),
            max: Vector3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z)),
        }
    }

    /// Distance along the ray to the first intersection, or `None`.
    ///
    /// A ray starting inside the box reports the exit distance.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of the eight transformed corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = (0..8).map(|i| {
            let corner = Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            matrix.transform_point(corner).to_vec()
        });

        // Eight corners always produce a box
        Self::from_points(corners).unwrap_or(*self)
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub object_id: ObjectId,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Converts a pointer position in physical pixels to a world-space ray.
pub fn screen_to_ray(screen_pos: (f32, f32), screen_size: (f32, f32), camera: &OrbitCamera) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = (screen_size.0.max(1.0), screen_size.1.max(1.0));

    // Normalized device coordinates, Y up
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

    let view_proj = camera.projection_gl() * camera.view_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::identity());

    let unproject = |z: f32| {
        let world = inv_view_proj * Vector4::new(ndc_x, ndc_y, z, 1.0);
        world.truncate() / world.w
    };
    let near = unproject(-1.0);
    let far = unproject(1.0);

    Ray::new(near, far - near)
}

/// Projects a world point to pixel coordinates; `None` if it is behind the
/// camera.
pub fn world_to_screen(
    point: Vector3<f32>,
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Option<(f32, f32)> {
    let clip = camera.projection_gl() * camera.view_matrix() * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let (ndc_x, ndc_y) = (clip.x / clip.w, clip.y / clip.w);
    Some((
        (ndc_x + 1.0) * 0.5 * screen_size.0,
        (1.0 - ndc_y) * 0.5 * screen_size.1,
    ))
}

/// Ray-casts against a set of candidate objects
#[derive(Default)]
pub struct ObjectPicker {
    /// Local-space boxes per object id, filled on first use
    cached_aabbs: Vec<Option<Vec<Aabb>>>,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nearest candidate hit by `ray`.
    pub fn pick(&mut self, ray: &Ray, candidates: &[ObjectId], scene: &Scene) -> Option<PickResult> {
        let mut closest: Option<PickResult> = None;

        for &id in candidates {
            let world = scene.world_transform(id);
            let distance = self
                .local_bounds(id, scene)
                .iter()
                .filter_map(|aabb| aabb.transform(&world).intersect_ray(ray))
                .reduce(f32::min);

            if let Some(distance) = distance {
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(PickResult {
                        object_id: id,
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }

        closest
    }

    /// Local boxes of an object and each of its children, cached per id.
    ///
    /// The boxes are kept apart so the air between a body and a protruding
    /// child is not pickable.
    pub fn local_bounds(&mut self, id: ObjectId, scene: &Scene) -> &[Aabb] {
        if id >= self.cached_aabbs.len() {
            self.cached_aabbs.resize(id + 1, None);
        }

        self.cached_aabbs[id].get_or_insert_with(|| {
            let own = scene.get_object(id).and_then(triangle_bounds);
            let children = scene.children(id).filter_map(|child| {
                let child = scene.get_object(child)?;
                triangle_bounds(child).map(|aabb| aabb.transform(&child.transform.matrix()))
            });
            own.into_iter().chain(children).collect()
        })
    }
}

fn triangle_bounds(object: &Object) -> Option<Aabb> {
    Aabb::from_points(
        object
            .meshes
            .iter()
            .filter(|mesh| mesh.topology() == MeshTopology::Triangles)
            .flat_map(|mesh| mesh.vertices())
            .map(|vertex| Vector3::from(vertex.position)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrbitLimits;
    use crate::gfx::{
        camera::{Camera, CameraController, CameraManager},
        geometry::{generate_box, generate_edges},
        scene::{object::Mesh, Transform},
    };

    fn scene() -> Scene {
        let camera = OrbitCamera::new(OrbitLimits::default(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(1.0, 1.0)))
    }

    fn unit_box() -> Vec<Mesh> {
        vec![Mesh::from_geometry(&generate_box(1.0, 1.0, 1.0))]
    }

    #[test]
    fn aabb_from_points() {
        let aabb = Aabb::from_points([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
        ])
        .unwrap();

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        let behind = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn center_pixel_ray_points_at_target() {
        let mut camera = OrbitCamera::new(OrbitLimits::default(), 1.0);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();

        let ray = screen_to_ray((400.0, 400.0), (800.0, 800.0), &camera);
        let to_target = (camera.target - camera.eye).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn projection_round_trips_through_the_ray() {
        let mut camera = OrbitCamera::new(OrbitLimits::default(), 1.6);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();

        let point = Vector3::new(0.5, 0.2, -0.3);
        let pixel = world_to_screen(point, (1280.0, 800.0), &camera).unwrap();
        let ray = screen_to_ray(pixel, (1280.0, 800.0), &camera);

        let to_point = (point - ray.origin).normalize();
        assert!(ray.direction.dot(to_point) > 0.99999);
    }

    #[test]
    fn gpu_projection_matches_picking_projection() {
        let mut camera = OrbitCamera::new(OrbitLimits::default(), 1.6).with_projection(45.0, 0.1, 1000.0);
        camera.set_eye(Vector3::new(8.0, 8.0, 8.0));
        camera.update();
        let view_proj = camera.build_view_projection_matrix();
        let size = (1280.0, 800.0);

        for point in [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.9, 0.2, -0.03),
            Vector3::new(-2.0, 0.0, -2.0),
            Vector3::new(2.0, 2.4, 2.0),
            Vector3::new(-1.2, 1.1, 0.4),
        ] {
            let clip = view_proj * point.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            let gpu_pixel = ((ndc.x + 1.0) * 0.5 * size.0, (1.0 - ndc.y) * 0.5 * size.1);
            let pick_pixel = world_to_screen(point, size, &camera).unwrap();

            assert!((gpu_pixel.0 - pick_pixel.0).abs() < 1e-2, "{point:?}: {gpu_pixel:?} vs {pick_pixel:?}");
            assert!((gpu_pixel.1 - pick_pixel.1).abs() < 1e-2, "{point:?}: {gpu_pixel:?} vs {pick_pixel:?}");
            assert!((0.0..=1.0).contains(&ndc.z), "{point:?} depth {}", ndc.z);
        }
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut scene = scene();
        let near = scene.add_object(
            Object::new("near", unit_box()).with_transform(Transform::from_position(0.0, 0.0, 2.0)),
        );
        let far = scene.add_object(Object::new("far", unit_box()));

        let mut picker = ObjectPicker::new();
        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = picker.pick(&ray, &[far, near], &scene).unwrap();
        assert_eq!(hit.object_id, near);
        assert!((hit.distance - 7.5).abs() < 1e-5);

        // Only candidates are considered
        let hit = picker.pick(&ray, &[far], &scene).unwrap();
        assert_eq!(hit.object_id, far);
    }

    #[test]
    fn child_handles_extend_the_parent_and_outlines_do_not() {
        let mut scene = scene();
        let geometry = generate_box(1.0, 1.0, 1.0);
        let parent = scene.add_object(Object::new("drawer", vec![Mesh::from_geometry(&geometry)]));
        scene.add_object(
            Object::new("handle", unit_box())
                .with_transform(Transform::from_position(0.0, 0.0, 1.0))
                .with_parent(parent),
        );
        scene.add_object(
            Object::new("outline", vec![Mesh::lines(&generate_edges(&generate_box(9.0, 9.0, 9.0), 1.0))])
                .with_parent(parent),
        );

        let bounds = ObjectPicker::new().local_bounds(parent, &scene).to_vec();
        assert_eq!(
            bounds,
            vec![
                Aabb::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5)),
                Aabb::new(Vector3::new(-0.5, -0.5, 0.5), Vector3::new(0.5, 0.5, 1.5)),
            ]
        );
    }

    #[test]
    fn air_in_front_of_a_face_beside_the_handle_is_not_pickable() {
        let mut scene = scene();
        let body = scene.add_object(Object::new("drawer", unit_box()));
        scene.add_object(
            Object::new("handle", vec![Mesh::from_geometry(&generate_box(0.2, 0.1, 0.1))])
                .with_transform(Transform::from_position(0.0, 0.0, 0.55))
                .with_parent(body),
        );
        let mut picker = ObjectPicker::new();

        // Grazes the face 0.05 in front of it, above the handle
        let grazing = Ray::new(Vector3::new(-5.0, 0.3, 0.55), Vector3::new(1.0, 0.0, 0.0));
        assert!(picker.pick(&grazing, &[body], &scene).is_none());

        // Through the handle still resolves to the drawer
        let through_handle = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = picker.pick(&through_handle, &[body], &scene).unwrap();
        assert_eq!(hit.object_id, body);
        assert!((hit.distance - 4.4).abs() < 1e-5);
    }
}
