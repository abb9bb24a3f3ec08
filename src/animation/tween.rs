use crate::{
    animation::ease::Ease,
    foundation::core::{ClockMs, Vec3},
    foundation::error::{SlideError, SlideResult},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (t = 0) and `b` (t = 1). `t` may overshoot.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// One time-based interpolation from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: ClockMs,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, start: ClockMs, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration_ms,
            ease,
        }
    }

    /// Linear progress in `[0, 1]`. Zero-length tweens are complete from their start.
    pub fn progress(&self, now: ClockMs) -> f64 {
        let elapsed = now.since(self.start);
        if elapsed <= 0.0 {
            return if self.duration_ms <= 0.0 { 1.0 } else { 0.0 };
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration_ms).min(1.0)
    }

    pub fn sample(&self, now: ClockMs) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(p))
    }

    pub fn is_finished(&self, now: ClockMs) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Handle to a tween scheduled on a [`TweenGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

/// Whether a tween reported by [`TweenGroup::update`] is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    /// More updates will follow.
    Running,
    /// This was the final update; the tween has been dropped from the group.
    Finished,
}

#[derive(Clone, Debug)]
struct ActiveTween<K, T> {
    id: TweenId,
    key: K,
    tween: Tween<T>,
}

/// A clocked set of tweens advanced by one `update` call per frame.
///
/// Each tween carries a caller-defined key (pool index, instance index, ...)
/// identifying what it animates. The group never touches the animated values
/// itself: `update` hands each sampled value to the caller, who writes it
/// wherever it belongs.
#[derive(Clone, Debug)]
pub struct TweenGroup<K, T> {
    now: ClockMs,
    next_id: u64,
    active: Vec<ActiveTween<K, T>>,
}

impl<K, T> Default for TweenGroup<K, T> {
    fn default() -> Self {
        Self {
            now: ClockMs::default(),
            next_id: 0,
            active: Vec::new(),
        }
    }
}

impl<K, T> TweenGroup<K, T>
where
    T: Lerp + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Group clock: the latest `now` seen by [`TweenGroup::update`] or [`TweenGroup::sync`].
    pub fn now(&self) -> ClockMs {
        self.now
    }

    /// Move the group clock forward without sampling. Earlier times are ignored.
    pub fn sync(&mut self, now: ClockMs) {
        if now.0 > self.now.0 {
            self.now = now;
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.active.iter().any(|a| a.id == id)
    }

    /// Schedule a tween starting at the group clock.
    pub fn start(
        &mut self,
        key: K,
        from: T,
        to: T,
        duration_ms: f64,
        ease: Ease,
    ) -> SlideResult<TweenId> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(SlideError::animation(format!(
                "tween duration must be finite and >= 0, got {duration_ms}"
            )));
        }
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(ActiveTween {
            id,
            key,
            tween: Tween::new(from, to, self.now, duration_ms, ease),
        });
        Ok(id)
    }

    /// Drop every scheduled tween without reporting it.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Advance the clock to `now` and report every tween's value in scheduling
    /// order. Finished tweens are reported once with [`TweenStatus::Finished`]
    /// and removed. Returns the number of tweens that finished.
    pub fn update<F>(&mut self, now: ClockMs, mut apply: F) -> usize
    where
        F: FnMut(TweenId, &K, T, TweenStatus),
    {
        self.sync(now);
        let now = self.now;
        let mut finished = 0;
        self.active.retain(|a| {
            let value = a.tween.sample(now);
            if a.tween.is_finished(now) {
                apply(a.id, &a.key, value, TweenStatus::Finished);
                finished += 1;
                false
            } else {
                apply(a.id, &a.key, value, TweenStatus::Running);
                true
            }
        });
        finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
