use crate::{
    foundation::core::{PerspectiveCamera, SlideAxis, Vec3},
    foundation::error::{SlideError, SlideResult},
};

/// The three fixed points a carousel moves objects between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlotPositions {
    /// Hidden holding point for objects waiting their turn.
    pub staging: Vec3,
    /// Where the displayed object sits.
    pub viewing: Vec3,
    /// Hidden point an outgoing object slides to.
    pub exit: Vec3,
}

impl SlotPositions {
    /// Viewing sits `distance` in front of the camera. Staging and exit are
    /// one full frustum extent away on either side along `axis`, so an object
    /// in either is entirely off screen.
    pub fn from_camera(
        camera: &PerspectiveCamera,
        distance: f64,
        axis: SlideAxis,
    ) -> SlideResult<Self> {
        camera.validate()?;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(SlideError::validation(format!(
                "carousel distance must be finite and > 0, got {distance}"
            )));
        }

        let viewing = camera.position + camera.forward() * distance;
        let offset = match axis {
            SlideAxis::Horizontal => Vec3::new(camera.visible_width_at(distance), 0.0, 0.0),
            SlideAxis::Vertical => Vec3::new(0.0, -camera.visible_height_at(distance), 0.0),
        };

        Ok(Self {
            staging: viewing + offset,
            viewing,
            exit: viewing - offset,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/slots.rs"]
mod tests;
