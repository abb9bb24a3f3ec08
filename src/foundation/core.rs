use crate::foundation::error::{SlideError, SlideResult};

/// 3D vector used for positions and offsets (right-handed, Y up, camera looks down −Z).
pub type Vec3 = nalgebra::Vector3<f64>;

/// Wall-clock time in milliseconds, as handed to the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct ClockMs(pub f64);

impl ClockMs {
    /// Milliseconds elapsed since `earlier` (negative when `earlier` is in the future).
    pub fn since(self, earlier: ClockMs) -> f64 {
        self.0 - earlier.0
    }

    /// This instant shifted by `ms`.
    pub fn after(self, ms: f64) -> ClockMs {
        ClockMs(self.0 + ms)
    }
}

/// Axis along which carousel objects enter and leave the viewing slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideAxis {
    /// Enter from +X, leave toward −X.
    #[default]
    Horizontal,
    /// Enter from −Y, leave toward +Y.
    Vertical,
}

/// Perspective camera description; only the parts slot geometry depends on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerspectiveCamera {
    /// World-space camera position.
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Viewport width / height.
    pub aspect: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov_deg: 75.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl PerspectiveCamera {
    /// Camera at `position` with the given vertical field of view and aspect.
    pub fn new(position: Vec3, fov_deg: f64, aspect: f64) -> SlideResult<Self> {
        let cam = Self {
            position,
            fov_deg,
            aspect,
        };
        cam.validate()?;
        Ok(cam)
    }

    /// Reject fields of view outside `(0, 180)` and non-positive aspects.
    pub fn validate(&self) -> SlideResult<()> {
        if !self.fov_deg.is_finite() || self.fov_deg <= 0.0 || self.fov_deg >= 180.0 {
            return Err(SlideError::validation(
                "camera fov_deg must be in the open range (0, 180)",
            ));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(SlideError::validation("camera aspect must be > 0"));
        }
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(SlideError::validation("camera position must be finite"));
        }
        Ok(())
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// Height of the visible frustum slice `distance` units in front of the camera.
    pub fn visible_height_at(&self, distance: f64) -> f64 {
        (self.fov_deg.to_radians() / 2.0).tan() * distance * 2.0
    }

    /// Width of the visible frustum slice `distance` units in front of the camera.
    pub fn visible_width_at(&self, distance: f64) -> f64 {
        self.visible_height_at(distance) * self.aspect
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
