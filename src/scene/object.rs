use std::fmt::Debug;

use crate::foundation::core::Vec3;

/// A GPU-side resource that must be released explicitly once replaced.
pub trait Disposable {
    /// Release the resource. Called exactly once, after it is detached.
    fn dispose(self);
}

/// An object the carousel can clone, position, and re-skin.
///
/// `replace_*` swap the attached resource and hand back the previous one so
/// the caller decides when it is disposed.
pub trait SlideObject: Clone + Debug {
    /// Shape resource type.
    type Geometry: Disposable + Debug;
    /// Surface resource type.
    type Material: Disposable + Debug;

    /// Current world-space position.
    fn position(&self) -> Vec3;
    /// Move the object.
    fn set_position(&mut self, position: Vec3);
    /// Attach `geometry`, returning the previously attached one.
    fn replace_geometry(&mut self, geometry: Self::Geometry) -> Self::Geometry;
    /// Attach `material`, returning the previously attached one.
    fn replace_material(&mut self, material: Self::Material) -> Self::Material;
}
