use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::ease::Ease,
    animation::tween::TweenGroup,
    foundation::core::{ClockMs, Vec3},
    foundation::error::{SlideError, SlideResult},
    layout::points,
};

/// Arrangement of the instances of an instanced mesh.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstanceLayout {
    /// Random points on a sphere surface.
    SphereSurface {
        /// Instance count.
        count: usize,
        /// Sphere radius.
        radius: f64,
    },
    /// Random points inside a ball.
    SphereVolume {
        /// Instance count.
        count: usize,
        /// Ball radius.
        radius: f64,
    },
    /// Centered lattice.
    Grid {
        /// Points along X.
        cols: usize,
        /// Points along Y.
        rows: usize,
        /// Points along Z.
        #[serde(default = "one")]
        layers: usize,
        /// Distance between neighbours.
        spacing: f64,
    },
    /// Evenly spaced circle in the XY plane.
    Ring {
        /// Instance count.
        count: usize,
        /// Circle radius.
        radius: f64,
    },
}

fn one() -> usize {
    1
}

impl InstanceLayout {
    /// Largest instance count a layout may place.
    pub const MAX_INSTANCES: usize = 1 << 20;

    /// Number of instances this layout places. Grid products saturate at
    /// `usize::MAX`.
    pub fn count(&self) -> usize {
        match *self {
            Self::SphereSurface { count, .. }
            | Self::SphereVolume { count, .. }
            | Self::Ring { count, .. } => count,
            Self::Grid {
                cols, rows, layers, ..
            } => cols.saturating_mul(rows).saturating_mul(layers),
        }
    }

    pub fn validate(&self) -> SlideResult<()> {
        let scale = match *self {
            Self::SphereSurface { radius, .. }
            | Self::SphereVolume { radius, .. }
            | Self::Ring { radius, .. } => radius,
            Self::Grid { spacing, .. } => spacing,
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SlideError::validation(
                "instance layout radius/spacing must be finite and > 0",
            ));
        }
        let count = self.count();
        if count == 0 {
            return Err(SlideError::validation(
                "instance layout must place at least one instance",
            ));
        }
        if count > Self::MAX_INSTANCES {
            return Err(SlideError::validation(format!(
                "instance layout places {count} instances, limit is {}",
                Self::MAX_INSTANCES
            )));
        }
        Ok(())
    }

    pub fn positions(&self, rng: &mut StdRng) -> SlideResult<Vec<Vec3>> {
        self.validate()?;
        Ok(match *self {
            Self::SphereSurface { count, radius } => points::sphere_surface(rng, count, radius),
            Self::SphereVolume { count, radius } => points::sphere_volume(rng, count, radius),
            Self::Grid {
                cols,
                rows,
                layers,
                spacing,
            } => points::grid(cols, rows, layers, spacing),
            Self::Ring { count, radius } => points::ring(count, radius),
        })
    }
}

/// Instance positions of a particle field, morphing between layouts with
/// one tween per instance.
#[derive(Debug)]
pub struct InstanceField {
    layout: InstanceLayout,
    positions: Vec<Vec3>,
    tweens: TweenGroup<usize, Vec3>,
    rng: StdRng,
}

impl InstanceField {
    pub fn new(layout: InstanceLayout, seed: u64) -> SlideResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = layout.positions(&mut rng)?;
        Ok(Self {
            layout,
            positions,
            tweens: TweenGroup::new(),
            rng,
        })
    }

    pub fn layout(&self) -> &InstanceLayout {
        &self.layout
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_morphing(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn sync(&mut self, now: ClockMs) {
        self.tweens.sync(now);
    }

    /// Start tweening every instance toward `layout`. A morph already in
    /// flight is replaced, starting from the current positions.
    pub fn morph_to(
        &mut self,
        layout: InstanceLayout,
        duration_ms: f64,
        ease: Ease,
    ) -> SlideResult<()> {
        if layout.count() != self.positions.len() {
            return Err(SlideError::validation(format!(
                "instance count is fixed at {}, layout places {}",
                self.positions.len(),
                layout.count()
            )));
        }
        let targets = layout.positions(&mut self.rng)?;

        self.tweens.clear();
        for (i, (from, to)) in self.positions.iter().zip(targets).enumerate() {
            self.tweens.start(i, *from, to, duration_ms, ease)?;
        }
        tracing::debug!(count = self.positions.len(), ?layout, "instance morph started");
        self.layout = layout;
        Ok(())
    }

    /// Advance the morph. Returns `true` on the frame it completes.
    pub fn update(&mut self, now: ClockMs) -> bool {
        let was_morphing = self.is_morphing();
        let positions = &mut self.positions;
        self.tweens.update(now, |_, i, p, _| {
            if let Some(slot) = positions.get_mut(*i) {
                *slot = p;
            }
        });
        was_morphing && !self.is_morphing()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/instances.rs"]
mod tests;
