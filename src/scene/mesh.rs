use crate::{
    foundation::core::Vec3,
    foundation::error::{SlideError, SlideResult},
    scene::object::{Disposable, SlideObject},
};

/// Parametric shapes the installation cycles through.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box.
    Box {
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        height: f64,
        /// Extent along Z.
        depth: f64,
    },
    /// UV sphere.
    Sphere {
        /// Sphere radius.
        radius: f64,
    },
    /// Torus around the Z axis.
    Torus {
        /// Distance from the center to the tube center.
        radius: f64,
        /// Tube radius.
        tube: f64,
    },
    /// Subdivided icosahedron.
    Icosahedron {
        /// Circumscribed radius.
        radius: f64,
        /// Subdivision level (0 = plain icosahedron).
        #[serde(default)]
        detail: u32,
    },
    /// Flat quad facing +Z.
    Plane {
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        height: f64,
    },
}

impl Shape {
    /// Short name for logs and frame snapshots.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
            Self::Icosahedron { .. } => "icosahedron",
            Self::Plane { .. } => "plane",
        }
    }

    /// Reject non-positive or non-finite dimensions.
    pub fn validate(&self) -> SlideResult<()> {
        let dims = match *self {
            Self::Box {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            Self::Sphere { radius } => vec![radius],
            Self::Torus { radius, tube } => vec![radius, tube],
            Self::Icosahedron { radius, .. } => vec![radius],
            Self::Plane { width, height } => vec![width, height],
        };
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(SlideError::validation(format!(
                "{} dimensions must be finite and > 0",
                self.kind()
            )));
        }
        Ok(())
    }
}

/// Geometry resource: a shape description standing in for uploaded vertex data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Geometry {
    /// Shape this geometry was built from.
    pub shape: Shape,
}

impl Geometry {
    /// Build a geometry after checking the shape.
    pub fn new(shape: Shape) -> SlideResult<Self> {
        shape.validate()?;
        Ok(Self { shape })
    }
}

impl Disposable for Geometry {
    fn dispose(self) {
        tracing::trace!(kind = self.shape.kind(), "release geometry");
    }
}

/// Material resource.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    /// Straight (non-premultiplied) RGB color.
    pub color: [u8; 3],
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Draw edges only.
    #[serde(default)]
    pub wireframe: bool,
}

fn default_opacity() -> f64 {
    1.0
}

impl Material {
    /// Opaque solid material.
    pub fn solid(color: [u8; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    /// Opaque wireframe material.
    pub fn wireframe(color: [u8; 3]) -> Self {
        Self {
            wireframe: true,
            ..Self::solid(color)
        }
    }

    /// Reject opacities outside `[0, 1]`.
    pub fn validate(&self) -> SlideResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SlideError::validation("material opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

impl Disposable for Material {
    fn dispose(self) {
        tracing::trace!(color = ?self.color, "release material");
    }
}

/// A positioned mesh: the concrete object type scenes are configured with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    /// Label used in logs and frame snapshots.
    pub name: String,
    /// World-space position; carousels overwrite it on insertion.
    #[serde(default = "origin")]
    pub position: Vec3,
    /// Attached geometry.
    pub geometry: Geometry,
    /// Attached material.
    pub material: Material,
}

fn origin() -> Vec3 {
    Vec3::zeros()
}

impl Mesh {
    /// Mesh at the origin.
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            position: Vec3::zeros(),
            geometry,
            material,
        }
    }

    /// Check geometry, material and position.
    pub fn validate(&self) -> SlideResult<()> {
        self.geometry.shape.validate()?;
        self.material.validate()?;
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(SlideError::validation(format!(
                "mesh '{}' position must be finite",
                self.name
            )));
        }
        Ok(())
    }
}

impl SlideObject for Mesh {
    type Geometry = Geometry;
    type Material = Material;

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn replace_geometry(&mut self, geometry: Geometry) -> Geometry {
        std::mem::replace(&mut self.geometry, geometry)
    }

    fn replace_material(&mut self, material: Material) -> Material {
        std::mem::replace(&mut self.material, material)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mesh.rs"]
mod tests;
