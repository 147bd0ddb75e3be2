/// Easing curves mapping normalized tween time to normalized progress.
///
/// Names follow the GSAP power family: `powerN` raises to the `N + 1`th power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    #[default]
    Power2Out,
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ease;

    #[test]
    fn endpoints_are_fixed() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out, Ease::Power3Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(7.0), 1.0);
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        let t = 0.3;
        assert!(Ease::Power1Out.apply(t) > Ease::Linear.apply(t));
        assert!(Ease::Power2Out.apply(t) > Ease::Power1Out.apply(t));
        assert!(Ease::Power3Out.apply(t) > Ease::Power2Out.apply(t));
    }
}
