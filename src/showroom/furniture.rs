//! The static part of the room: bunk frame, mattress, table, floor and walls.

use std::f32::consts::FRAC_PI_2;

use crate::gfx::{
    geometry::{generate_box, generate_cylinder, generate_edges, generate_plane, GeometryData},
    resources::{Material, MaterialManager},
    scene::{object::Mesh, Object, ObjectId, Scene, Transform},
};

pub const WOOD: &str = "wood";
pub const MATTRESS: &str = "mattress";
pub const WALL: &str = "wall";
pub const DRAWER: &str = "drawer";
pub const HANDLE: &str = "handle";

/// Faces meeting at more than this many degrees get an outline.
pub const OUTLINE_THRESHOLD_DEGREES: f32 = 1.0;

const LEG_RADIUS: f32 = 0.1;
const LEG_SEGMENTS: u32 = 16;

/// Registers the shared furniture materials.
pub fn register_materials(materials: &mut MaterialManager) {
    materials.add_material(Material::from_hex(WOOD, 0x8b4513, 0.7, 0.1));
    materials.add_material(Material::from_hex(MATTRESS, 0xffffff, 0.5, 0.0));
    materials.add_material(Material::from_hex(WALL, 0x808080, 0.9, 0.0));
    materials.add_material(Material::from_hex(DRAWER, 0xcd853f, 0.6, 0.1).with_emission_hex(0x000000));
    materials.add_material(Material::from_hex(HANDLE, 0x444444, 0.5, 0.0));
}

/// Black edge overlay for `geometry`, placed at the origin.
pub fn outline(name: &str, geometry: &GeometryData) -> Object {
    Object::new(
        name,
        vec![Mesh::lines(&generate_edges(geometry, OUTLINE_THRESHOLD_DEGREES))],
    )
}

/// Adds a shaded mesh and, when `outlined`, a black edge overlay that copies
/// its placement.
pub fn add_outlined(
    scene: &mut Scene,
    object: Object,
    geometry: &GeometryData,
    outlined: bool,
) -> ObjectId {
    let transform = object.transform;
    let parent = object.parent;
    let id = scene.add_object(object);

    if outlined {
        let name = format!("{} Outline", scene.objects[id].name);
        let mut overlay = outline(&name, geometry).with_transform(transform);
        overlay.parent = parent;
        scene.add_object(overlay);
    }

    id
}

/// Builds every static piece of the room.
pub fn build_room(scene: &mut Scene, outlined: bool) {
    let slab = generate_box(2.0, 0.25, 4.0);
    add_outlined(
        scene,
        Object::new("Bed Frame", vec![Mesh::from_geometry(&slab)])
            .with_material(WOOD)
            .with_transform(Transform::from_position(0.0, 2.0, 0.0))
            .with_shadows(true, true),
        &slab,
        outlined,
    );

    let bed_leg = generate_cylinder(LEG_RADIUS, 2.0, LEG_SEGMENTS);
    for (x, z) in [(-0.95, -1.95), (0.95, -1.95), (-0.95, 1.95), (0.95, 1.95)] {
        add_outlined(
            scene,
            Object::new("Bed Leg", vec![Mesh::from_geometry(&bed_leg)])
                .with_material(WOOD)
                .with_transform(Transform::from_position(x, 1.0, z))
                .with_shadows(true, true),
            &bed_leg,
            outlined,
        );
    }

    add_outlined(
        scene,
        Object::new("Mattress", vec![Mesh::from_geometry(&slab)])
            .with_material(MATTRESS)
            .with_transform(Transform::from_position(0.0, 2.25, 0.0))
            .with_shadows(true, true),
        &slab,
        outlined,
    );

    let table_top = generate_box(2.0, 0.25, 2.0);
    add_outlined(
        scene,
        Object::new("Table", vec![Mesh::from_geometry(&table_top)])
            .with_material(WOOD)
            .with_transform(Transform::from_position(0.0, 1.0, 0.0))
            .with_shadows(true, true),
        &table_top,
        outlined,
    );

    let table_leg = generate_cylinder(LEG_RADIUS, 1.0, LEG_SEGMENTS);
    for (x, z) in [(-0.95, -0.95), (0.95, -0.95), (-0.95, 0.95), (0.95, 0.95)] {
        add_outlined(
            scene,
            Object::new("Table Leg", vec![Mesh::from_geometry(&table_leg)])
                .with_material(WOOD)
                .with_transform(Transform::from_position(x, 0.5, z))
                .with_shadows(true, true),
            &table_leg,
            outlined,
        );
    }

    let panel = generate_plane(8.0, 8.0);
    let surfaces = [
        ("Floor", Transform::default().with_rotation(-FRAC_PI_2, 0.0, 0.0)),
        ("Left Wall", Transform::from_position(-4.0, 4.0, 0.0).with_rotation(0.0, FRAC_PI_2, 0.0)),
        ("Right Wall", Transform::from_position(0.0, 4.0, -4.0)),
    ];
    for (name, transform) in surfaces {
        add_outlined(
            scene,
            Object::new(name, vec![Mesh::from_geometry(&panel)])
                .with_material(WALL)
                .with_transform(transform)
                .with_shadows(false, true),
            &panel,
            outlined,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::scene::MeshTopology;

    fn scene() -> Scene {
        let camera = OrbitCamera::new(Default::default(), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(1.0, 1.0)));
        register_materials(&mut scene.material_manager);
        scene
    }

    #[test]
    fn room_has_every_piece() {
        let mut scene = scene();
        build_room(&mut scene, false);
        // frame, 4 legs, mattress, table, 4 legs, floor, 2 walls
        assert_eq!(scene.get_object_count(), 14);
        assert!(scene.find_object("Mattress").is_some());
        assert!(scene.find_object("Bed Leg (3)").is_some());
        assert!(scene.find_object("Right Wall").is_some());
    }

    #[test]
    fn outlines_double_the_objects() {
        let mut scene = scene();
        build_room(&mut scene, true);
        assert_eq!(scene.get_object_count(), 28);

        let frame = scene.find_object("Bed Frame").expect("frame");
        let outline = scene.find_object("Bed Frame Outline").expect("outline");
        assert_eq!(scene.objects[frame].transform, scene.objects[outline].transform);
        assert!(scene.objects[outline].has_topology(MeshTopology::Lines));
        // a box has 12 hard edges
        assert_eq!(scene.objects[outline].meshes[0].index_count(), 24);
    }

    #[test]
    fn floor_only_receives_shadows() {
        let mut scene = scene();
        build_room(&mut scene, false);
        let floor = &scene.objects[scene.find_object("Floor").expect("floor")];
        assert!(!floor.cast_shadow);
        assert!(floor.receive_shadow);
        assert_eq!(floor.get_material_id().map(String::as_str), Some(WALL));
    }

    #[test]
    fn materials_are_registered() {
        let scene = scene();
        for name in [WOOD, MATTRESS, WALL, DRAWER, HANDLE] {
            assert!(scene.material_manager.get_material(name).is_some(), "{name}");
        }
    }
}
