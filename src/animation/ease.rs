use std::f64::consts::PI;

/// Easing curves for tweens. Input is clamped to `[0, 1]`; elastic and back
/// curves overshoot the output range on purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InOutSine,
    OutBack,
    InElastic,
    OutElastic,
    InOutElastic,
}

impl Ease {
    /// Map linear progress `t` through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => 0.5 * (1.0 - (PI * t).cos()),
            Self::OutBack => {
                const S: f64 = 1.70158;
                let k = t - 1.0;
                k * k * ((S + 1.0) * k + S) + 1.0
            }
            Self::InElastic | Self::OutElastic | Self::InOutElastic if t == 0.0 || t == 1.0 => t,
            Self::InElastic => -(2f64.powf(10.0 * (t - 1.0))) * ((t - 1.1) * 5.0 * PI).sin(),
            Self::OutElastic => 2f64.powf(-10.0 * t) * ((t - 0.1) * 5.0 * PI).sin() + 1.0,
            Self::InOutElastic => {
                let k = t * 2.0;
                if k < 1.0 {
                    -0.5 * 2f64.powf(10.0 * (k - 1.0)) * ((k - 1.1) * 5.0 * PI).sin()
                } else {
                    0.5 * 2f64.powf(-10.0 * (k - 1.0)) * ((k - 1.1) * 5.0 * PI).sin() + 1.0
                }
            }
        }
    }

    /// Whether the curve leaves `[0, 1]` between its endpoints.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Self::OutBack | Self::InElastic | Self::OutElastic | Self::InOutElastic
        )
    }

    /// Every curve, in declaration order.
    pub const ALL: [Ease; 12] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InOutSine,
        Ease::OutBack,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
