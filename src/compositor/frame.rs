use crate::foundation::core::Vec3;

/// One object as it should be drawn this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectSnapshot {
    /// Object label.
    pub name: String,
    /// Geometry kind, e.g. `"torus"`.
    pub shape: String,
    /// World-space position.
    pub position: Vec3,
}

/// Drawable state of one scene for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSnapshot {
    /// Scene name from the config.
    pub scene: String,
    /// Carousel index in the viewing slot.
    pub current: usize,
    /// Whether a carousel transition is in flight.
    pub transitioning: bool,
    /// Label of the span driving this scene, if any (chord name, lyric).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Carousel objects on screen.
    pub objects: Vec<ObjectSnapshot>,
    /// Particle positions, empty without a particle field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub particles: Vec<Vec3>,
}

/// Everything the compositor needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    /// Frame counter since the stage started.
    pub frame: u64,
    /// Clock time of the frame.
    pub time_ms: f64,
    /// One entry per scene, in config order.
    pub scenes: Vec<SceneSnapshot>,
}
