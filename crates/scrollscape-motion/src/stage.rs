//! Scene values the update mutates and the renderer reads.

use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

use crate::viewport::Viewport;

/// Uniform values for one shader program.
///
/// `pointer` is `None` for programs that do not declare a mouse input; those
/// bundles never receive pointer data.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaderUniforms {
    pub time: f32,
    pub resolution: Vec3,
    pub pointer: Option<Vec4>,
}

impl ShaderUniforms {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            time: 0.0,
            resolution: viewport.resolution(),
            pointer: None,
        }
    }

    /// Opts the bundle into the pointer uniform.
    pub fn with_pointer(mut self) -> Self {
        self.pointer = Some(Vec4::ZERO);
        self
    }

    #[inline]
    pub fn accepts_pointer(&self) -> bool {
        self.pointer.is_some()
    }
}

/// One visual section: a transform plus its shader inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub label: String,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub uniforms: ShaderUniforms,
}

impl SceneObject {
    pub fn new(label: impl Into<String>, position: Vec3, uniforms: ShaderUniforms) -> Self {
        Self {
            label: label.into(),
            position,
            rotation: Vec3::ZERO,
            uniforms,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation;
        let orientation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        Mat4::from_rotation_translation(orientation, self.position)
    }
}

/// Perspective camera looking down -Z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraRig {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov_y_degrees: 75.0,
            aspect: viewport.aspect(),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Everything the renderer draws in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub camera: CameraRig,
    pub objects: Vec<SceneObject>,
}

impl Stage {
    pub fn new(camera: CameraRig, objects: Vec<SceneObject>) -> Self {
        Self { camera, objects }
    }
}
