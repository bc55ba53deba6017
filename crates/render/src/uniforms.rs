//! Names of the uniform slots in the shading contract.

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

pub const DIRECTIONAL_DIRECTION: &str = "directionalLight.direction";
pub const DIRECTIONAL_AMBIENT: &str = "directionalLight.ambient";
pub const DIRECTIONAL_DIFFUSE: &str = "directionalLight.diffuse";
pub const DIRECTIONAL_SPECULAR: &str = "directionalLight.specular";
pub const DIRECTIONAL_ACTIVE: &str = "directionalLight.bActive";

/// Slot name of one field of the point light at `index`, e.g. `pointLights[0].position`.
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_slot_names() {
        assert_eq!(point_light(0, "position"), "pointLights[0].position");
        assert_eq!(point_light(4, "bActive"), "pointLights[4].bActive");
    }
}
