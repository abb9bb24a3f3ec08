use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    animation::ease::Ease,
    animation::tween::TweenGroup,
    carousel::pool::{Change, ChangeOutcome, MeshPool, PoolEntry, SlotState},
    carousel::slots::SlotPositions,
    foundation::core::{ClockMs, PerspectiveCamera, SlideAxis, Vec3},
    foundation::error::{SlideError, SlideResult},
    scene::object::SlideObject,
};

/// Construction knobs for [`MeshSlide`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlideOptions {
    /// Axis objects slide along.
    pub axis: SlideAxis,
    /// Ease used by [`MeshSlide::advance`].
    pub ease: Ease,
    /// Seed for random picks; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            axis: SlideAxis::Horizontal,
            ease: Ease::InOutElastic,
            seed: None,
        }
    }
}

/// Result of an [`MeshSlide::advance`] call that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A transition from `from` to `to` is now in flight.
    Started {
        /// Index leaving the viewing slot.
        from: usize,
        /// Index entering the viewing slot.
        to: usize,
    },
    /// A transition was already running; nothing changed.
    Busy,
}

/// Emitted by [`MeshSlide::update`] on the frame a transition finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionDone {
    /// Index that left and was parked at staging.
    pub from: usize,
    /// Index now in the viewing slot.
    pub to: usize,
    /// Buffered resource changes applied on completion.
    pub applied_changes: usize,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    outgoing: usize,
    incoming: usize,
    // completion barrier over the exit and enter tweens
    remaining: usize,
}

/// Mesh carousel: shows one pooled object at a time in the viewing slot and
/// swaps it out with a synchronized exit/enter tween pair.
///
/// At most one transition runs at a time. Resource changes aimed at an object
/// that is on screen are held back until it is parked at staging again.
#[derive(Debug)]
pub struct MeshSlide<O: SlideObject> {
    pool: MeshPool<O>,
    slots: SlotPositions,
    current: usize,
    transition: Option<Transition>,
    tweens: TweenGroup<usize, Vec3>,
    ease: Ease,
    rng: StdRng,
}

impl<O: SlideObject> MeshSlide<O> {
    /// Carousel with default options (horizontal slide, elastic in-out).
    pub fn new(camera: &PerspectiveCamera, distance: f64, templates: &[O]) -> SlideResult<Self> {
        Self::with_options(camera, distance, templates, SlideOptions::default())
    }

    /// Clone every template into the pool at staging, then move the first to viewing.
    pub fn with_options(
        camera: &PerspectiveCamera,
        distance: f64,
        templates: &[O],
        options: SlideOptions,
    ) -> SlideResult<Self> {
        if templates.is_empty() {
            return Err(SlideError::validation(
                "carousel needs at least one template object",
            ));
        }
        let slots = SlotPositions::from_camera(camera, distance, options.axis)?;

        let mut pool = MeshPool::new();
        for template in templates {
            let mut object = template.clone();
            object.set_position(slots.staging);
            pool.push(object, SlotState::Staging);
        }
        let first = pool.get_mut(0)?;
        first.object.set_position(slots.viewing);
        first.state = SlotState::Viewing;

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            pool,
            slots,
            current: 0,
            transition: None,
            tweens: TweenGroup::new(),
            ease: options.ease,
            rng,
        })
    }

    pub fn count(&self) -> usize {
        self.pool.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn viewing_position(&self) -> Vec3 {
        self.slots.viewing
    }

    pub fn staging_position(&self) -> Vec3 {
        self.slots.staging
    }

    pub fn exit_position(&self) -> Vec3 {
        self.slots.exit
    }

    pub fn slots(&self) -> SlotPositions {
        self.slots
    }

    pub fn object_at(&self, index: usize) -> SlideResult<&O> {
        Ok(&self.pool.get(index)?.object)
    }

    pub fn entry_at(&self, index: usize) -> SlideResult<&PoolEntry<O>> {
        self.pool.get(index)
    }

    /// Every pooled object, including parked ones.
    pub fn objects(&self) -> impl Iterator<Item = &O> {
        self.pool.iter().map(|e| &e.object)
    }

    /// Objects in the viewing slot or mid-transition.
    pub fn visible_objects(&self) -> impl Iterator<Item = &O> {
        self.pool
            .iter()
            .filter(|e| e.state.is_on_screen())
            .map(|e| &e.object)
    }

    /// Clone `object` into the pool at staging. Returns its index.
    pub fn push(&mut self, object: &O) -> usize {
        let mut object = object.clone();
        object.set_position(self.slots.staging);
        let index = self.pool.push(object, SlotState::Staging);
        tracing::debug!(index, "carousel object added");
        index
    }

    pub fn set_geometry_at(
        &mut self,
        index: usize,
        geometry: O::Geometry,
    ) -> SlideResult<ChangeOutcome> {
        self.pool.apply_or_defer(index, Change::Geometry(geometry))
    }

    pub fn set_material_at(
        &mut self,
        index: usize,
        material: O::Material,
    ) -> SlideResult<ChangeOutcome> {
        self.pool.apply_or_defer(index, Change::Material(material))
    }

    /// Move the tween clock forward so a following `advance` starts at `now`.
    pub fn sync(&mut self, now: ClockMs) {
        self.tweens.sync(now);
    }

    /// Start a transition using the configured ease.
    pub fn advance(&mut self, duration_ms: f64, random_pick: bool) -> SlideResult<AdvanceOutcome> {
        self.advance_with(duration_ms, random_pick, self.ease)
    }

    /// Start a transition: the current object slides viewing → exit while the
    /// next one slides staging → viewing, both over `duration_ms`.
    ///
    /// `ease` shapes both tweens. Curves come from the closed [`Ease`] set so
    /// they stay serializable in scene configs; arbitrary closures are not
    /// accepted.
    ///
    /// With fewer than two objects this logs an error and returns
    /// [`SlideError::Usage`]. While a transition runs it returns
    /// [`AdvanceOutcome::Busy`] and changes nothing.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn advance_with(
        &mut self,
        duration_ms: f64,
        random_pick: bool,
        ease: Ease,
    ) -> SlideResult<AdvanceOutcome> {
        let n = self.pool.len();
        if n < 2 {
            tracing::error!(count = n, "carousel needs at least two objects to advance");
            return Err(SlideError::usage(format!(
                "carousel needs at least two objects to advance, has {n}"
            )));
        }
        if self.transition.is_some() {
            return Ok(AdvanceOutcome::Busy);
        }
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(SlideError::animation(format!(
                "transition duration must be finite and >= 0, got {duration_ms}"
            )));
        }

        let from = self.current;
        let to = self.pick_next(random_pick);

        self.transition = Some(Transition {
            outgoing: from,
            incoming: to,
            remaining: 2,
        });
        self.pool.set_state(from, SlotState::Exiting)?;
        self.pool.set_state(to, SlotState::Entering)?;

        self.tweens
            .start(from, self.slots.viewing, self.slots.exit, duration_ms, ease)?;
        self.tweens
            .start(to, self.slots.staging, self.slots.viewing, duration_ms, ease)?;

        Ok(AdvanceOutcome::Started { from, to })
    }

    /// Advance tweens to `now`, writing positions into the pooled objects.
    /// Returns the finished transition on the frame both tweens complete.
    pub fn update(&mut self, now: ClockMs) -> Option<TransitionDone> {
        let pool = &mut self.pool;
        let finished = self.tweens.update(now, |_, index, position, _status| {
            if let Ok(entry) = pool.get_mut(*index) {
                entry.object.set_position(position);
            }
        });

        let t = self.transition.as_mut()?;
        t.remaining = t.remaining.saturating_sub(finished);
        if t.remaining > 0 {
            return None;
        }
        let t = self.transition.take()?;
        Some(self.finish(t))
    }

    fn finish(&mut self, t: Transition) -> TransitionDone {
        if let Ok(outgoing) = self.pool.get_mut(t.outgoing) {
            outgoing.object.set_position(self.slots.staging);
            outgoing.state = SlotState::Staging;
        }
        if let Ok(incoming) = self.pool.get_mut(t.incoming) {
            incoming.object.set_position(self.slots.viewing);
            incoming.state = SlotState::Viewing;
        }
        self.current = t.incoming;

        let applied_changes = self.pool.flush_pending();
        tracing::debug!(
            from = t.outgoing,
            to = t.incoming,
            applied_changes,
            "carousel transition finished"
        );
        TransitionDone {
            from: t.outgoing,
            to: t.incoming,
            applied_changes,
        }
    }

    fn pick_next(&mut self, random_pick: bool) -> usize {
        let n = self.pool.len();
        if !random_pick {
            return (self.current + 1) % n;
        }
        // uniform over the n - 1 indices other than current
        let r = self.rng.random_range(0..n - 1);
        if r >= self.current { r + 1 } else { r }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/slide.rs"]
mod tests;
