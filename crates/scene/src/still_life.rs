//! The built-in desk still life: laptop, coffee cup, lamp, pen and book.

use glam::Vec3;
use stilllife_assets::Material;
use stilllife_common::{PrimitiveKind, Transform, WHITE};
use stilllife_render::LightRig;

use crate::descriptor::{SceneObject, Surface};
use crate::document::{MaterialSpec, SCENE_SCHEMA_VERSION, SceneDocument, TextureSource};

const TEXTURES: [(&str, &str); 10] = [
    ("glasscup", "textures/glasscup.jpg"),
    ("wood", "textures/wood.jpg"),
    ("coffee", "textures/vinous-liquid-with-foam-blobs.jpg"),
    ("lamp", "textures/lamp.jpg"),
    ("gold", "textures/gold.jpg"),
    ("keyboard", "textures/keyboard.png"),
    ("aluminum", "textures/aluminum.png"),
    ("login", "textures/login.jpg"),
    ("leather", "textures/leather.jpg"),
    ("pen", "textures/pen.jpg"),
];

fn xf(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(
        Vec3::from_array(scale),
        Vec3::from_array(rotation),
        Vec3::from_array(position),
    )
}

fn object(
    name: &str,
    transform: Transform,
    surface: Surface,
    material: Option<&str>,
    primitive: PrimitiveKind,
) -> SceneObject {
    SceneObject::new(name, transform, surface, material, primitive)
}

impl SceneDocument {
    /// The desk scene with its ten textures, five materials, two lights and
    /// fifteen draws.
    pub fn still_life() -> Self {
        use PrimitiveKind::*;

        let textures = TEXTURES
            .iter()
            .map(|(tag, path)| TextureSource::new(*tag, *path))
            .collect();
        let materials = Material::presets()
            .into_iter()
            .map(|(tag, m)| MaterialSpec::new(tag, m))
            .collect();

        let zero = [0.0; 3];
        let lying_pen = [270.0, 130.0, 0.0];
        #[rustfmt::skip]
        let objects = vec![
            object("desk", xf([20.0, 1.0, 10.0], zero, zero), Surface::texture("wood"), Some("wood"), Plane),
            object("desk underlay", xf([20.0, 1.0, 10.0], zero, zero), Surface::Color(WHITE), None, Plane),
            object("cup", xf([1.0, 2.0, 1.0], zero, [5.0, 0.0, 3.0]), Surface::texture("glasscup"), Some("glass"), Cylinder),
            object("cup handle", xf([0.8, 0.8, 1.0], zero, [6.0, 1.0, 3.5]), Surface::tiled("glasscup", 5.0, 1.0), Some("glass"), Torus),
            object("coffee", xf([0.95, 0.05, 0.95], zero, [5.0, 2.0, 3.0]), Surface::texture("coffee"), Some("glass"), Cylinder),
            object("laptop screen", xf([4.0, 0.0, 2.5], [90.0, 0.0, 0.0], [-1.0, 2.0, -5.5]), Surface::texture("login"), Some("glass"), Plane),
            object("keyboard", xf([8.1, 0.5, 6.0], zero, [-1.0, 0.0, -2.5]), Surface::texture("keyboard"), Some("metal"), Box),
            object("laptop base", xf([8.1, 0.49, 6.1], zero, [-1.0, 0.0, -2.5]), Surface::texture("gold"), Some("metal"), Box),
            object("lamp base", xf([3.0, 1.0, 2.0], zero, [-10.0, 0.0, -3.0]), Surface::texture("gold"), Some("metal"), Box),
            object("lamp stand", xf([0.5, 7.0, 0.5], [0.0, 90.0, 0.0], [-10.0, 0.0, -3.0]), Surface::texture("gold"), Some("metal"), Cylinder),
            object("lamp shade", xf([3.0, 3.0, 1.0], zero, [-10.0, 6.0, -3.0]), Surface::texture("lamp"), Some("canvas"), Cone),
            object("pen", xf([0.2, 1.0, 0.2], [90.0, 130.0, 0.0], [-6.0, 0.5, 4.0]), Surface::texture("pen"), Some("metal"), Cylinder),
            object("pen tip", xf([0.16, 0.2, 0.16], lying_pen, [-6.0, 0.5, 4.0]), Surface::texture("aluminum"), Some("metal"), TaperedCylinder),
            object("book cover", xf([4.0, 2.0, 0.3], lying_pen, [-8.0, 0.5, 4.0]), Surface::texture("leather"), Some("leather"), Box),
            object("book pages", xf([4.0, 1.98, 0.2], lying_pen, [-7.93, 0.5, 4.0]), Surface::Color(WHITE), Some("canvas"), Box),
        ];

        Self {
            version: SCENE_SCHEMA_VERSION,
            textures,
            materials,
            lights: LightRig::still_life(),
            objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_life_inventory() {
        let doc = SceneDocument::still_life();
        assert_eq!(doc.textures.len(), 10);
        assert_eq!(doc.materials.len(), 5);
        assert_eq!(doc.objects.len(), 15);
        assert_eq!(doc.lights.point_lights.len(), 1);
    }

    #[test]
    fn draw_order_is_fixed() {
        let doc = SceneDocument::still_life();
        let names: Vec<_> = doc.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"desk"));
        assert_eq!(names.last(), Some(&"book pages"));
        assert_eq!(doc.objects[3].surface, Surface::tiled("glasscup", 5.0, 1.0));
    }

    #[test]
    fn texture_tags_are_unique() {
        let doc = SceneDocument::still_life();
        let mut tags: Vec<_> = doc.textures.iter().map(|t| t.tag.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), doc.textures.len());
    }

    #[test]
    fn sphere_is_never_drawn() {
        let doc = SceneDocument::still_life();
        assert!(doc.objects.iter().all(|o| o.primitive != PrimitiveKind::Sphere));
    }
}
