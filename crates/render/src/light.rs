use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::backend::{RenderError, ShaderState};
use crate::uniforms;

/// Number of point-light blocks declared by the fragment shader.
pub const MAX_POINT_LIGHTS: usize = 5;

/// A light with a direction and no position, like sunlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

/// A light radiating from a position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

/// The fixed set of lights for a scene: one directional light plus point lights.
///
/// Emitted once during scene preparation. There is no add/remove/move at
/// runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    pub directional: DirectionalLight,
    #[serde(default)]
    pub point_lights: Vec<PointLight>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::still_life()
    }
}

impl LightRig {
    /// Soft grey key light from above plus a warm point light near the desk.
    pub fn still_life() -> Self {
        Self {
            directional: DirectionalLight {
                direction: Vec3::new(-0.3, -1.0, -0.2),
                ambient: Vec3::splat(0.4),
                diffuse: Vec3::splat(0.6),
                specular: Vec3::splat(0.3),
                active: true,
            },
            point_lights: vec![PointLight {
                position: Vec3::new(2.0, 3.0, 2.0),
                ambient: Vec3::splat(0.2),
                diffuse: Vec3::new(1.0, 0.8, 0.7),
                specular: Vec3::new(0.9, 0.8, 0.7),
                active: true,
            }],
        }
    }

    /// Check the rig fits the shader's point-light blocks.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.point_lights.len() > MAX_POINT_LIGHTS {
            return Err(RenderError::TooManyPointLights {
                count: self.point_lights.len(),
                max: MAX_POINT_LIGHTS,
            });
        }
        Ok(())
    }

    /// Enable lighting and write every light block into the shader.
    ///
    /// Fails without writing anything if the rig has more point lights than
    /// the shader declares.
    pub fn apply<S: ShaderState + ?Sized>(&self, shader: &mut S) -> Result<(), RenderError> {
        self.validate()?;

        shader.set_bool(uniforms::USE_LIGHTING, true);

        let d = &self.directional;
        shader.set_vec3(uniforms::DIRECTIONAL_DIRECTION, d.direction);
        shader.set_vec3(uniforms::DIRECTIONAL_AMBIENT, d.ambient);
        shader.set_vec3(uniforms::DIRECTIONAL_DIFFUSE, d.diffuse);
        shader.set_vec3(uniforms::DIRECTIONAL_SPECULAR, d.specular);
        shader.set_bool(uniforms::DIRECTIONAL_ACTIVE, d.active);

        for (i, p) in self.point_lights.iter().enumerate() {
            shader.set_vec3(&uniforms::point_light(i, "position"), p.position);
            shader.set_vec3(&uniforms::point_light(i, "ambient"), p.ambient);
            shader.set_vec3(&uniforms::point_light(i, "diffuse"), p.diffuse);
            shader.set_vec3(&uniforms::point_light(i, "specular"), p.specular);
            shader.set_bool(&uniforms::point_light(i, "bActive"), p.active);
        }

        tracing::debug!(
            point_lights = self.point_lights.len(),
            "light rig applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UniformValue;
    use crate::recorder::RecordingBackend;

    #[test]
    fn still_life_rig_emits_both_lights() {
        let mut rec = RecordingBackend::new();
        LightRig::still_life().apply(&mut rec).unwrap();

        assert_eq!(
            rec.uniform(uniforms::USE_LIGHTING),
            Some(&UniformValue::Bool(true))
        );
        assert_eq!(
            rec.uniform(uniforms::DIRECTIONAL_DIRECTION),
            Some(&UniformValue::Vec3(Vec3::new(-0.3, -1.0, -0.2)))
        );
        assert_eq!(
            rec.uniform("pointLights[0].position"),
            Some(&UniformValue::Vec3(Vec3::new(2.0, 3.0, 2.0)))
        );
        assert_eq!(
            rec.uniform("pointLights[0].bActive"),
            Some(&UniformValue::Bool(true))
        );
        assert!(rec.uniform("pointLights[1].position").is_none());
        // 1 flag + 5 directional + 5 point
        assert_eq!(rec.commands().len(), 11);
    }

    #[test]
    fn too_many_point_lights_writes_nothing() {
        let mut rig = LightRig::still_life();
        let extra = rig.point_lights[0];
        rig.point_lights = vec![extra; MAX_POINT_LIGHTS + 1];

        let mut rec = RecordingBackend::new();
        let err = rig.apply(&mut rec).unwrap_err();
        assert!(matches!(err, RenderError::TooManyPointLights { count: 6, max: 5 }));
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn validate_accepts_the_shader_limit() {
        let mut rig = LightRig::still_life();
        let light = rig.point_lights[0];
        rig.point_lights = vec![light; MAX_POINT_LIGHTS];
        assert!(rig.validate().is_ok());
        rig.point_lights.push(light);
        assert!(rig.validate().is_err());
    }

    #[test]
    fn default_rig_is_still_life() {
        assert_eq!(LightRig::default(), LightRig::still_life());
    }
}
