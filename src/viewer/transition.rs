//! Transitions between artwork pages.
//!
//! A transition is either an in-flight change between two adjacent pages or
//! a resistance tilt shown when dragging past the first or last page.
use super::page::PageIndex;

/// Largest tilt, in degrees, shown when dragging past an edge.
pub const MAX_RESISTANCE_DEG: f64 = 18.0;

/// Visual style used between two pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind
{
    /// Rotation about the Y axis, like turning a sleeve over
    Flip,
    /// Horizontal slide, the two lyrics faces read as one sheet
    Slide,
}

/// Returns the visual style for a pair of pages, in either order.
///
/// Any pair containing both lyrics faces slides; every other pair flips.
#[must_use]
pub fn kind_of(first: PageIndex, second: PageIndex) -> TransitionKind
{
    let pair = [first, second];

    if pair.contains(&PageIndex::LYRICS) && pair.contains(&PageIndex::LYRICS_BACK)
    {
        TransitionKind::Slide
    }
    else
    {
        TransitionKind::Flip
    }
}

/// An unsettled viewer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition
{
    /// Moving between two adjacent pages.
    ///
    /// `progress` is 0 when fully at `from` and 1 when fully at `to`.
    Between
    {
        /// Page being left
        from: PageIndex,
        /// Page being approached
        to: PageIndex,
        /// Fraction of the way to `to`, in `[0, 1]`
        progress: f64,
    },
    /// Damped tilt in degrees while dragging past an edge, sign is the drag
    /// direction.
    Resistance
    {
        /// Tilt angle in degrees, magnitude at most [`MAX_RESISTANCE_DEG`]
        angle: f64,
    },
}

impl Transition
{
    /// Visual style of the transition, `None` for resistance.
    #[must_use]
    pub fn kind(&self) -> Option<TransitionKind>
    {
        match *self
        {
            Self::Between { from, to, .. } => Some(kind_of(from, to)),
            Self::Resistance { .. } => None,
        }
    }

    /// Builds the transition produced by a horizontal drag.
    ///
    /// # Arguments
    ///
    /// * `from` - Page the drag started on
    /// * `dx` - Horizontal distance from the drag anchor, negative is leftward
    /// * `width` - Width of the viewer in the same units as `dx`
    ///
    /// # Returns
    ///
    /// A forward move for leftward drags, a backward move for rightward
    /// drags, or resistance when there is no page in that direction.
    #[must_use]
    pub fn from_drag(from: PageIndex, dx: f64, width: f64) -> Self
    {
        let width = width.max(1.0);
        let target = if dx < 0.0
        {
            from.forward()
        }
        else if dx > 0.0
        {
            from.backward()
        }
        else
        {
            None
        };

        match target
        {
            Some(to) => Self::Between {
                from,
                to,
                progress: (dx.abs() / width).min(1.0),
            },
            None => Self::Resistance {
                angle: resistance_angle(dx, width),
            },
        }
    }
}

/// Tilt for a blocked drag.
///
/// Square-root damping makes the tilt decelerate as the drag grows, and it
/// never exceeds [`MAX_RESISTANCE_DEG`].
#[must_use]
pub fn resistance_angle(dx: f64, width: f64) -> f64
{
    let direction = if dx > 0.0
    {
        1.0
    }
    else if dx < 0.0
    {
        -1.0
    }
    else
    {
        0.0
    };

    (dx.abs() / width.max(1.0)).min(1.0).sqrt() * MAX_RESISTANCE_DEG * direction
}

/// Easing curves used by the animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing
{
    /// `1 - (1 - t)^3`
    OutCubic,
    /// Quadratic ease-in-out
    InOutQuad,
}

impl Easing
{
    /// Maps linear time `time` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, time: f64) -> f64
    {
        let time = time.clamp(0.0, 1.0);

        match self
        {
            Self::OutCubic => 1.0 - (1.0 - time).powi(3),
            Self::InOutQuad =>
            {
                if time < 0.5
                {
                    2.0 * time * time
                }
                else
                {
                    -1.0 + (4.0 - 2.0 * time) * time
                }
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use rstest::rstest;

    use super::*;

    fn assert_close(actual: f64, expected: f64)
    {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(PageIndex::LYRICS, PageIndex::LYRICS_BACK, TransitionKind::Slide)]
    #[case(PageIndex::LYRICS_BACK, PageIndex::LYRICS, TransitionKind::Slide)]
    #[case(PageIndex::FRONT, PageIndex::LYRICS, TransitionKind::Flip)]
    #[case(PageIndex::LYRICS, PageIndex::FRONT, TransitionKind::Flip)]
    #[case(PageIndex::LYRICS_BACK, PageIndex::BACK, TransitionKind::Flip)]
    #[case(PageIndex::BACK, PageIndex::LYRICS_BACK, TransitionKind::Flip)]
    fn kind_follows_pair_rule(
        #[case] first: PageIndex,
        #[case] second: PageIndex,
        #[case] expected: TransitionKind,
    )
    {
        assert_eq!(kind_of(first, second), expected);
    }

    #[test]
    fn leftward_drag_moves_forward()
    {
        let transition = Transition::from_drag(PageIndex::FRONT, -100.0, 400.0);

        assert_eq!(
            transition,
            Transition::Between {
                from: PageIndex::FRONT,
                to: PageIndex::LYRICS,
                progress: 0.25,
            }
        );
    }

    #[test]
    fn rightward_drag_moves_backward_and_caps_progress()
    {
        let transition = Transition::from_drag(PageIndex::BACK, 900.0, 400.0);

        assert_eq!(
            transition,
            Transition::Between {
                from: PageIndex::BACK,
                to: PageIndex::LYRICS_BACK,
                progress: 1.0,
            }
        );
    }

    #[test]
    fn blocked_drag_resists_with_sign_of_drag()
    {
        let Transition::Resistance { angle } =
            Transition::from_drag(PageIndex::FRONT, 100.0, 400.0)
        else
        {
            panic!("expected resistance at the front cover");
        };
        assert_close(angle, 0.5 * MAX_RESISTANCE_DEG);

        let Transition::Resistance { angle } =
            Transition::from_drag(PageIndex::BACK, -400.0, 400.0)
        else
        {
            panic!("expected resistance at the back cover");
        };
        assert_close(angle, -MAX_RESISTANCE_DEG);
    }

    #[test]
    fn resistance_is_monotonic_and_capped()
    {
        let mut previous = 0.0;

        for step in 0..100
        {
            let angle = resistance_angle(f64::from(step) * 10.0, 400.0);
            assert!(angle >= previous);
            assert!(angle <= MAX_RESISTANCE_DEG);
            previous = angle;
        }

        assert_close(previous, MAX_RESISTANCE_DEG);
    }

    #[test]
    fn zero_width_does_not_divide_by_zero()
    {
        let angle = resistance_angle(-3.0, 0.0);
        assert!(angle.is_finite());
        assert!(angle < 0.0);
    }

    #[test]
    fn easing_endpoints_and_midpoint()
    {
        for easing in [Easing::OutCubic, Easing::InOutQuad]
        {
            assert_close(easing.apply(0.0), 0.0);
            assert_close(easing.apply(1.0), 1.0);
        }

        assert_close(Easing::InOutQuad.apply(0.5), 0.5);
        assert_close(Easing::InOutQuad.apply(0.25), 0.125);
        assert_close(Easing::OutCubic.apply(0.5), 0.875);
    }
}
