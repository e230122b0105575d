/// Easing curves for tweens.
///
/// The `Power2` family is cubic: `Power2In` is `t³`, `Power2Out` mirrors it,
/// and `Power2InOut` joins the two halves at `t = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start
    Power2In,
    /// Slow end
    Power2Out,
    /// Slow start and end
    Power2InOut,
}

impl Easing {
    /// Maps linear progress in `0..=1` to eased progress in `0..=1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Power2Out.apply(-3.0), 0.0);
        assert!((Easing::Power2In.apply(7.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn curves_bend_the_right_way() {
        assert!(Easing::Power2In.apply(0.5) < 0.5);
        assert!(Easing::Power2Out.apply(0.5) > 0.5);
        assert!((Easing::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::Power2InOut.apply(0.25) < 0.25);
        assert!(Easing::Power2InOut.apply(0.75) > 0.75);
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(value >= previous, "{easing:?} dipped at step {step}");
                previous = value;
            }
        }
    }
}
