use std::rc::Rc;

use crate::{
    animation::ease::Ease,
    carousel::slide::{AdvanceOutcome, MeshSlide},
    compositor::frame::{FrameSnapshot, ObjectSnapshot, SceneSnapshot},
    compositor::target::RenderTarget,
    compositor::viewport::Compositor,
    foundation::core::{ClockMs, PerspectiveCamera},
    foundation::error::{SlideError, SlideResult},
    layout::instances::{InstanceField, InstanceLayout},
    scene::mesh::Mesh,
    signal::timing::{TimingTrack, TrackSignal},
    signal::trigger::{ProgressTrigger, SignalSource},
    stage::config::{ParticleConfig, SceneConfig, StageConfig},
};

/// Counters accumulated over the life of a [`Stage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StageStats {
    /// Frames ticked.
    pub frames: u64,
    /// Transitions started.
    pub transitions: u64,
    /// Triggers that arrived while a transition was still running.
    pub busy: u64,
    /// Triggers dropped because `advance` failed.
    pub skipped: u64,
}

#[derive(Debug)]
struct Particles {
    field: InstanceField,
    layouts: Vec<InstanceLayout>,
    next: usize,
    morph_ms: f64,
    ease: Ease,
}

impl Particles {
    fn new(config: &ParticleConfig) -> SlideResult<Self> {
        let first = config
            .layouts
            .first()
            .cloned()
            .ok_or_else(|| SlideError::validation("particles need at least one layout"))?;
        Ok(Self {
            field: InstanceField::new(first, config.seed)?,
            layouts: config.layouts.clone(),
            next: 1 % config.layouts.len(),
            morph_ms: config.morph_ms,
            ease: config.ease,
        })
    }

    fn morph_next(&mut self) -> SlideResult<()> {
        if self.layouts.len() < 2 {
            return Ok(());
        }
        let layout = self.layouts[self.next].clone();
        self.next = (self.next + 1) % self.layouts.len();
        self.field.morph_to(layout, self.morph_ms, self.ease)
    }
}

#[derive(Debug)]
struct SceneRuntime {
    name: String,
    carousel: MeshSlide<Mesh>,
    signal: TrackSignal,
    trigger: ProgressTrigger,
    transition_ms: f64,
    random_pick: bool,
    particles: Option<Particles>,
}

impl SceneRuntime {
    fn new(
        config: &SceneConfig,
        aspect: f64,
        track: Rc<TimingTrack>,
        origin: ClockMs,
    ) -> SlideResult<Self> {
        let camera = PerspectiveCamera {
            aspect,
            ..config.camera
        };
        let carousel =
            MeshSlide::with_options(&camera, config.distance, &config.templates, config.slide)?;
        let particles = config.particles.as_ref().map(Particles::new).transpose()?;
        Ok(Self {
            name: config.name.clone(),
            carousel,
            signal: TrackSignal::new(track, config.signal, origin),
            trigger: ProgressTrigger::new(config.trigger),
            transition_ms: config.transition_ms,
            random_pick: config.random_pick,
            particles,
        })
    }

    fn tick(&mut self, now: ClockMs, track: &TimingTrack, stats: &mut StageStats) -> SceneSnapshot {
        self.carousel.sync(now);
        if let Some(p) = &mut self.particles {
            p.field.sync(now);
        }

        let sample = self.signal.poll(now);
        if self.trigger.observe(sample) {
            match self.carousel.advance(self.transition_ms, self.random_pick) {
                Ok(AdvanceOutcome::Started { from, to }) => {
                    tracing::debug!(scene = %self.name, from, to, "transition started");
                    stats.transitions += 1;
                    if let Some(p) = &mut self.particles {
                        if let Err(err) = p.morph_next() {
                            tracing::warn!(scene = %self.name, %err, "particle morph skipped");
                        }
                    }
                }
                Ok(AdvanceOutcome::Busy) => stats.busy += 1,
                Err(err) => {
                    tracing::debug!(scene = %self.name, %err, "advance skipped");
                    stats.skipped += 1;
                }
            }
        }

        self.carousel.update(now);
        if let Some(p) = &mut self.particles {
            p.field.update(now);
        }

        let position = self.signal.position_ms(now);
        SceneSnapshot {
            scene: self.name.clone(),
            current: self.carousel.current_index(),
            transitioning: self.carousel.is_transitioning(),
            label: track
                .label_at(self.signal.kind(), position)
                .map(str::to_string),
            objects: self
                .carousel
                .visible_objects()
                .map(|m| ObjectSnapshot {
                    name: m.name.clone(),
                    shape: m.geometry.shape.kind().to_string(),
                    position: m.position,
                })
                .collect(),
            particles: self
                .particles
                .as_ref()
                .map(|p| p.field.positions().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Per-frame driver: polls each scene's signal, advances carousels on
/// triggers, steps all tweens, and produces a frame for the compositor.
#[derive(Debug)]
pub struct Stage {
    scenes: Vec<SceneRuntime>,
    compositor: Compositor,
    track: Rc<TimingTrack>,
    stats: StageStats,
}

impl Stage {
    /// Validate `config` and `track` and build one runtime per scene.
    pub fn new(config: &StageConfig, track: TimingTrack) -> SlideResult<Self> {
        config.validate()?;
        track.validate()?;

        let compositor = Compositor::new(config.viewports, config.canvas)?;
        let track = Rc::new(track);
        let origin = ClockMs(config.playback_offset_ms);
        let scenes = config
            .scenes
            .iter()
            .zip(compositor.viewports())
            .map(|(scene, cell)| {
                SceneRuntime::new(scene, cell.width() / cell.height(), track.clone(), origin)
            })
            .collect::<SlideResult<Vec<_>>>()?;

        tracing::info!(
            scenes = scenes.len(),
            song_ms = track.end_ms(),
            "stage ready"
        );
        Ok(Self {
            scenes,
            compositor,
            track,
            stats: StageStats::default(),
        })
    }

    /// Counters so far.
    pub fn stats(&self) -> StageStats {
        self.stats
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn track(&self) -> &TimingTrack {
        &self.track
    }

    /// Scene names in viewport order.
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.name.as_str())
    }

    /// Carousel of the named scene.
    pub fn carousel(&self, scene: &str) -> Option<&MeshSlide<Mesh>> {
        self.scenes
            .iter()
            .find(|s| s.name == scene)
            .map(|s| &s.carousel)
    }

    /// Mutable carousel of the named scene, e.g. to swap geometry mid-show.
    pub fn carousel_mut(&mut self, scene: &str) -> Option<&mut MeshSlide<Mesh>> {
        self.scenes
            .iter_mut()
            .find(|s| s.name == scene)
            .map(|s| &mut s.carousel)
    }

    /// Run one frame at clock time `now`.
    #[tracing::instrument(level = "trace", skip(self), fields(frame = self.stats.frames))]
    pub fn tick(&mut self, now: ClockMs) -> FrameSnapshot {
        let frame = self.stats.frames;
        let scenes = self
            .scenes
            .iter_mut()
            .map(|scene| scene.tick(now, &self.track, &mut self.stats))
            .collect();
        self.stats.frames += 1;
        FrameSnapshot {
            frame,
            time_ms: now.0,
            scenes,
        }
    }

    /// Hand `frame` to the compositor.
    pub fn render<T>(&self, frame: &FrameSnapshot, target: &mut T) -> SlideResult<()>
    where
        T: RenderTarget + ?Sized,
    {
        self.compositor.render(frame, target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/driver.rs"]
mod tests;
