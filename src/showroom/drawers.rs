//! The four trundle drawers and their bookkeeping.
//!
//! A drawer's state lives in the [`DrawerTable`], not on the renderable
//! object. The table is the single source of truth for which drawer is
//! open and how far out each one currently sits; [`DrawerTable::apply_to_scene`]
//! copies the depths onto the scene objects each frame.

use std::fmt;

use cgmath::Vector3;

use super::furniture::{self, outline};
use super::picking::PickingController;
use crate::gfx::{
    geometry::generate_box,
    resources::MaterialId,
    scene::{object::Mesh, Object, ObjectId, Scene, Transform},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawerId {
    Drawer1,
    Drawer2,
    Drawer3,
    Drawer4,
}

impl DrawerId {
    /// Bottom to top.
    pub const ALL: [DrawerId; 4] = [
        DrawerId::Drawer1,
        DrawerId::Drawer2,
        DrawerId::Drawer3,
        DrawerId::Drawer4,
    ];

    /// Identity string, also the key of the drawer's portfolio entry.
    pub fn name(self) -> &'static str {
        match self {
            DrawerId::Drawer1 => "drawer1",
            DrawerId::Drawer2 => "drawer2",
            DrawerId::Drawer3 => "drawer3",
            DrawerId::Drawer4 => "drawer4",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for DrawerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerState {
    pub id: DrawerId,
    /// Body object; the handle and outline are its children.
    pub object: ObjectId,
    /// Per-drawer clone of the drawer material.
    pub material: MaterialId,
    pub is_open: bool,
    /// Z when fully closed.
    pub rest_depth: f32,
    /// Current, possibly animating, Z.
    pub depth: f32,
    pub x: f32,
    pub y: f32,
}

impl DrawerState {
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.depth)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawerTable {
    drawers: Vec<DrawerState>,
}

impl DrawerTable {
    pub fn get(&self, id: DrawerId) -> Option<&DrawerState> {
        self.drawers.iter().find(|drawer| drawer.id == id)
    }

    pub fn get_mut(&mut self, id: DrawerId) -> Option<&mut DrawerState> {
        self.drawers.iter_mut().find(|drawer| drawer.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawerState> {
        self.drawers.iter()
    }

    pub fn len(&self) -> usize {
        self.drawers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawers.is_empty()
    }

    /// The open drawer, if any.
    pub fn open_identity(&self) -> Option<DrawerId> {
        self.drawers
            .iter()
            .find(|drawer| drawer.is_open)
            .map(|drawer| drawer.id)
    }

    pub fn is_open(&self, id: DrawerId) -> bool {
        self.get(id).is_some_and(|drawer| drawer.is_open)
    }

    pub fn find_by_object(&self, object: ObjectId) -> Option<DrawerId> {
        self.drawers
            .iter()
            .find(|drawer| drawer.object == object)
            .map(|drawer| drawer.id)
    }

    /// Moves each drawer body to its current depth.
    pub fn apply_to_scene(&self, scene: &mut Scene) {
        for drawer in &self.drawers {
            if let Some(object) = scene.get_object_mut(drawer.object) {
                object.transform.position = drawer.position();
            }
        }
    }
}

/// Layout of the drawer stack under the bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerRegistry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Vertical gap between drawers.
    pub spacing: f32,
    /// Y of the bottom drawer.
    pub start_y: f32,
    pub rest_z: f32,
}

impl Default for DrawerRegistry {
    fn default() -> Self {
        Self {
            width: 1.8,
            height: 0.35,
            depth: 0.9,
            spacing: 0.05,
            start_y: 0.2,
            rest_z: -0.5,
        }
    }
}

impl DrawerRegistry {
    /// Rest position of the drawer at `index`, counted from the bottom.
    pub fn rest_position(&self, index: usize) -> Vector3<f32> {
        let y = self.start_y + index as f32 * (self.height + self.spacing);
        Vector3::new(0.0, y, self.rest_z)
    }

    /// Adds the drawers to the scene and registers them as clickable.
    pub fn build(
        &self,
        scene: &mut Scene,
        picking: &mut PickingController,
        outlined: bool,
    ) -> DrawerTable {
        let body = generate_box(self.width, self.height, self.depth);
        let handle = generate_box(0.3, 0.05, 0.05);
        let handle_z = self.depth / 2.0 + 0.03;
        let mut table = DrawerTable::default();

        for id in DrawerId::ALL {
            let rest = self.rest_position(id.index());
            let material = scene
                .material_manager
                .clone_material(furniture::DRAWER, &format!("{id} material"))
                .unwrap_or_else(|| furniture::DRAWER.to_string());

            let object = scene.add_object(
                Object::new(id.name(), vec![Mesh::from_geometry(&body)])
                    .with_material(&material)
                    .with_transform(Transform::from_position(rest.x, rest.y, rest.z))
                    .with_shadows(true, true),
            );

            scene.add_object(
                Object::new(&format!("{id} handle"), vec![Mesh::from_geometry(&handle)])
                    .with_material(furniture::HANDLE)
                    .with_transform(Transform::from_position(0.0, 0.0, handle_z))
                    .with_parent(object)
                    .with_shadows(true, true),
            );

            if outlined {
                scene.add_object(outline(&format!("{id} outline"), &body).with_parent(object));
            }

            picking.register(object);
            table.drawers.push(DrawerState {
                id,
                object,
                material,
                is_open: false,
                rest_depth: rest.z,
                depth: rest.z,
                x: rest.x,
                y: rest.y,
            });
            log::debug!("Registered {id} at y = {:.2}", rest.y);
        }

        table
    }
}
