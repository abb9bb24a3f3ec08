use std::{collections::BTreeSet, io::Read};

use kurbo::Size;

use crate::{
    animation::ease::Ease,
    carousel::slide::SlideOptions,
    compositor::viewport::ViewportGrid,
    foundation::core::PerspectiveCamera,
    foundation::error::{SlideError, SlideResult},
    layout::instances::InstanceLayout,
    scene::mesh::Mesh,
    signal::timing::SpanKind,
    signal::trigger::TriggerMode,
};

/// Top-level stage configuration, usually read from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    /// Output canvas in pixels.
    #[serde(default = "default_canvas")]
    pub canvas: Size,
    /// How the canvas is split between scenes.
    #[serde(default)]
    pub viewports: ViewportGrid,
    /// Clock time at which song position 0 plays.
    #[serde(default)]
    pub playback_offset_ms: f64,
    /// Scenes, drawn into viewports in order.
    pub scenes: Vec<SceneConfig>,
}

/// One scene: a carousel driven by one timing signal, plus optional particles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Unique scene name.
    pub name: String,
    /// Camera; its aspect is replaced by the aspect of the scene's viewport.
    #[serde(default)]
    pub camera: PerspectiveCamera,
    /// Distance from camera to the viewing slot.
    #[serde(default = "default_distance")]
    pub distance: f64,
    /// Objects cloned into the carousel.
    pub templates: Vec<Mesh>,
    /// Length of one carousel transition.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,
    /// Pick the next object at random instead of in order.
    #[serde(default)]
    pub random_pick: bool,
    /// Slide axis, ease and seed.
    #[serde(default)]
    pub slide: SlideOptions,
    /// Which span list drives transitions.
    #[serde(default)]
    pub signal: SpanKind,
    /// How consecutive samples are compared.
    #[serde(default)]
    pub trigger: TriggerMode,
    /// Particle field morphing on every transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleConfig>,
}

/// Particle field cycling through layouts, one morph per carousel transition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleConfig {
    /// Layouts to cycle through; all must place the same number of instances.
    pub layouts: Vec<InstanceLayout>,
    /// Morph duration.
    #[serde(default = "default_morph_ms")]
    pub morph_ms: f64,
    /// Morph ease.
    #[serde(default = "default_morph_ease")]
    pub ease: Ease,
    /// Seed for random layouts.
    #[serde(default)]
    pub seed: u64,
}

fn default_canvas() -> Size {
    Size::new(1920.0, 1080.0)
}

fn default_distance() -> f64 {
    5.0
}

fn default_transition_ms() -> f64 {
    600.0
}

fn default_morph_ms() -> f64 {
    1_200.0
}

fn default_morph_ease() -> Ease {
    Ease::InOutCubic
}

fn check_duration(what: &str, ms: f64) -> SlideResult<()> {
    if !ms.is_finite() || ms < 0.0 {
        return Err(SlideError::validation(format!(
            "{what} must be finite and >= 0, got {ms}"
        )));
    }
    Ok(())
}

impl StageConfig {
    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader<R: Read>(reader: R) -> SlideResult<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SlideResult<()> {
        if self.scenes.is_empty() {
            return Err(SlideError::validation("stage needs at least one scene"));
        }
        let cells = self.viewports.cells(self.canvas)?;
        if self.scenes.len() > cells.len() {
            return Err(SlideError::validation(format!(
                "{} scenes do not fit {} viewports",
                self.scenes.len(),
                cells.len()
            )));
        }
        if !self.playback_offset_ms.is_finite() {
            return Err(SlideError::validation("playback_offset_ms must be finite"));
        }

        let mut names = BTreeSet::new();
        for scene in &self.scenes {
            if !names.insert(scene.name.as_str()) {
                return Err(SlideError::validation(format!(
                    "duplicate scene name '{}'",
                    scene.name
                )));
            }
            scene.validate()?;
        }
        Ok(())
    }
}

impl SceneConfig {
    pub fn validate(&self) -> SlideResult<()> {
        if self.name.trim().is_empty() {
            return Err(SlideError::validation("scene name must be non-empty"));
        }
        self.camera.validate()?;
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(SlideError::validation(format!(
                "scene '{}' distance must be finite and > 0",
                self.name
            )));
        }
        if self.templates.is_empty() {
            return Err(SlideError::validation(format!(
                "scene '{}' needs at least one template",
                self.name
            )));
        }
        for mesh in &self.templates {
            mesh.validate()?;
        }
        check_duration("transition_ms", self.transition_ms)?;
        self.trigger.validate()?;
        if let Some(particles) = &self.particles {
            particles.validate()?;
        }
        Ok(())
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> SlideResult<()> {
        let Some(first) = self.layouts.first() else {
            return Err(SlideError::validation("particles need at least one layout"));
        };
        for layout in &self.layouts {
            layout.validate()?;
            if layout.count() != first.count() {
                return Err(SlideError::validation(
                    "all particle layouts must place the same number of instances",
                ));
            }
        }
        check_duration("morph_ms", self.morph_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/config.rs"]
mod tests;
