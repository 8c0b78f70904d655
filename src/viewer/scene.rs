//! Pure derivation of what to paint from the viewer state.
use super::page::PageIndex;
use super::transition::{Transition, TransitionKind, kind_of};

/// What the rendering layer should paint for the artwork.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scene
{
    /// One image, optionally tilted about the Y axis (resistance).
    Single
    {
        /// Page to show
        image: PageIndex,
        /// Y-axis rotation in degrees
        rotate_y: f64,
    },
    /// Two images on the faces of a card rotating about the Y axis.
    Flip
    {
        /// Lower page of the pair, on the face visible at 0°
        front: PageIndex,
        /// Higher page of the pair, on the face visible at ±180°
        back: PageIndex,
        /// Y-axis rotation in degrees, between -180 and 0
        rotate_y: f64,
    },
    /// Two images side by side, offset horizontally.
    Slide
    {
        /// Page being left
        outgoing: PageIndex,
        /// Page being approached
        incoming: PageIndex,
        /// Horizontal offset of the outgoing image, percent of the width
        outgoing_offset: f64,
        /// Horizontal offset of the incoming image, percent of the width
        incoming_offset: f64,
    },
}

impl Scene
{
    /// For a flip, the face currently turned towards the viewer and its
    /// apparent width as a fraction of the full width.
    ///
    /// A face is hidden while it points away from the viewer.
    #[must_use]
    pub fn visible_face(&self) -> Option<(PageIndex, f64)>
    {
        match *self
        {
            Self::Single { image, rotate_y } =>
            {
                Some((image, rotate_y.to_radians().cos().abs()))
            }
            Self::Flip {
                front,
                back,
                rotate_y,
            } =>
            {
                let face = if rotate_y.abs() < 90.0 { front } else { back };
                Some((face, rotate_y.to_radians().cos().abs()))
            }
            Self::Slide { .. } => None,
        }
    }
}

/// Derives the scene for a settled page and an optional transition.
///
/// # Arguments
///
/// * `page` - Settled page
/// * `transition` - In-flight transition, if any
///
/// # Returns
///
/// The scene to paint. This has no side effects.
#[must_use]
pub fn scene(page: PageIndex, transition: Option<Transition>) -> Scene
{
    match transition
    {
        None => Scene::Single {
            image: page,
            rotate_y: 0.0,
        },
        Some(Transition::Resistance { angle }) => Scene::Single {
            image: page,
            rotate_y: angle,
        },
        Some(Transition::Between { from, to, progress }) =>
        {
            let is_forward = to > from;

            match kind_of(from, to)
            {
                TransitionKind::Flip =>
                {
                    let rotate_y = if is_forward
                    {
                        progress * -180.0
                    }
                    else
                    {
                        -(1.0 - progress) * 180.0
                    };

                    Scene::Flip {
                        front: from.min(to),
                        back: from.max(to),
                        rotate_y,
                    }
                }
                TransitionKind::Slide =>
                {
                    let sign = if is_forward { -1.0 } else { 1.0 };

                    Scene::Slide {
                        outgoing: from,
                        incoming: to,
                        outgoing_offset: sign * progress * 100.0,
                        incoming_offset: -sign * (1.0 - progress) * 100.0,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn settled_shows_one_flat_image()
    {
        assert_eq!(
            scene(PageIndex::BACK, None),
            Scene::Single {
                image: PageIndex::BACK,
                rotate_y: 0.0,
            }
        );
    }

    #[test]
    fn resistance_tilts_the_settled_page()
    {
        let tilted = scene(
            PageIndex::FRONT,
            Some(Transition::Resistance { angle: 9.0 }),
        );

        assert_eq!(
            tilted,
            Scene::Single {
                image: PageIndex::FRONT,
                rotate_y: 9.0,
            }
        );
    }

    #[test]
    fn forward_flip_turns_from_front_to_back()
    {
        let halfway = scene(
            PageIndex::FRONT,
            Some(Transition::Between {
                from: PageIndex::FRONT,
                to: PageIndex::LYRICS,
                progress: 0.25,
            }),
        );

        assert_eq!(
            halfway,
            Scene::Flip {
                front: PageIndex::FRONT,
                back: PageIndex::LYRICS,
                rotate_y: -45.0,
            }
        );
        assert_eq!(halfway.visible_face().map(|(face, _)| face), Some(PageIndex::FRONT));
    }

    #[test]
    fn backward_flip_starts_showing_the_back_face()
    {
        let start = scene(
            PageIndex::BACK,
            Some(Transition::Between {
                from: PageIndex::BACK,
                to: PageIndex::LYRICS_BACK,
                progress: 0.0,
            }),
        );

        assert_eq!(
            start,
            Scene::Flip {
                front: PageIndex::LYRICS_BACK,
                back: PageIndex::BACK,
                rotate_y: -180.0,
            }
        );
        assert_eq!(start.visible_face().map(|(face, _)| face), Some(PageIndex::BACK));
    }

    #[test]
    fn slide_offsets_follow_direction()
    {
        let forward = scene(
            PageIndex::LYRICS,
            Some(Transition::Between {
                from: PageIndex::LYRICS,
                to: PageIndex::LYRICS_BACK,
                progress: 0.25,
            }),
        );
        assert_eq!(
            forward,
            Scene::Slide {
                outgoing: PageIndex::LYRICS,
                incoming: PageIndex::LYRICS_BACK,
                outgoing_offset: -25.0,
                incoming_offset: 75.0,
            }
        );

        let backward = scene(
            PageIndex::LYRICS_BACK,
            Some(Transition::Between {
                from: PageIndex::LYRICS_BACK,
                to: PageIndex::LYRICS,
                progress: 0.25,
            }),
        );
        assert_eq!(
            backward,
            Scene::Slide {
                outgoing: PageIndex::LYRICS_BACK,
                incoming: PageIndex::LYRICS,
                outgoing_offset: 25.0,
                incoming_offset: -75.0,
            }
        );
    }
}
