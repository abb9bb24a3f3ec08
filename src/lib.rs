//! beatslide choreographs music-synchronized 3D scenes.
//!
//! Each scene owns a mesh carousel that keeps one object in a viewing slot
//! and swaps it out with a synchronized exit/enter tween pair whenever the
//! scene's timing signal (beats, chords or lyric phrases) says so. Scenes may
//! also carry a particle field that morphs between instanced layouts.
//!
//! # Frame loop
//!
//! 1. **Poll**: every scene samples its [`SignalSource`] for a progress value.
//! 2. **Trigger**: a [`ProgressTrigger`] compares it with the previous sample
//!    and decides whether to call [`MeshSlide::advance`].
//! 3. **Tween**: carousels and particle fields advance their tweens to the
//!    frame clock.
//! 4. **Composite**: the [`Compositor`] hands each scene snapshot to a
//!    [`RenderTarget`] inside its own viewport.
//!
//! [`Stage::tick`] runs steps 1–3 for every scene; [`Stage::render`] runs step 4.
//!
//! The crate does not draw pixels. Render backends implement [`RenderTarget`];
//! [`JsonLinesTarget`] is the headless one used by the `beatslide` CLI.
#![forbid(unsafe_code)]

mod animation;
mod carousel;
mod compositor;
mod foundation;
mod layout;
mod scene;
mod signal;
mod stage;

pub use animation::ease::Ease;
pub use animation::tween::{Lerp, Tween, TweenGroup, TweenId, TweenStatus};
pub use carousel::pool::{
    Change, ChangeOutcome, MeshPool, PendingChanges, PoolEntry, SlotState,
};
pub use carousel::slide::{AdvanceOutcome, MeshSlide, SlideOptions, TransitionDone};
pub use carousel::slots::SlotPositions;
pub use compositor::frame::{FrameSnapshot, ObjectSnapshot, SceneSnapshot};
pub use compositor::target::{JsonLinesTarget, RenderTarget};
pub use compositor::viewport::{Compositor, ViewportGrid};
pub use foundation::core::{ClockMs, PerspectiveCamera, SlideAxis, Vec3};
pub use foundation::error::{SlideError, SlideResult};
pub use layout::instances::{InstanceField, InstanceLayout};
pub use layout::points::{grid, ring, sphere_surface, sphere_volume};
pub use scene::mesh::{Geometry, Material, Mesh, Shape};
pub use scene::object::{Disposable, SlideObject};
pub use signal::timing::{SpanKind, TimedSpan, TimingTrack, TrackSignal};
pub use signal::trigger::{ProgressTrigger, SignalSource, TriggerMode};
pub use stage::config::{ParticleConfig, SceneConfig, StageConfig};
pub use stage::driver::{Stage, StageStats};

pub use kurbo::{Rect, Size};
