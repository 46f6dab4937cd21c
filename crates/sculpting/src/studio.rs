//! Two-handed sculpting studio.
//!
//! Each hand drives its own [`DrawingSession`]; the sessions share nothing
//! but the gallery their finished strokes land in.

use smart_mesh::IndexedMesh;
use tubebrush_config::SculptConfig;

use crate::compositor::Compositor;
use crate::gallery::Gallery;
use crate::navigate::{GrabInput, WorldGrab};
use crate::session::{DrawingSession, SessionEvent};
use crate::types::{ControllerSample, Hand, SculptError};

#[derive(Debug)]
pub struct Studio {
    left: DrawingSession,
    right: DrawingSession,
    gallery: Gallery,
    grab: WorldGrab,
    compositor: Compositor,
}

impl Studio {
    pub fn new(config: &SculptConfig) -> Result<Self, SculptError> {
        Ok(Self {
            left: DrawingSession::new(config)?,
            right: DrawingSession::new(config)?,
            gallery: Gallery::new(),
            grab: WorldGrab::new(),
            compositor: Compositor::from_config(config),
        })
    }

    pub fn session(&self, hand: Hand) -> &DrawingSession {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    fn session_mut(&mut self, hand: Hand) -> &mut DrawingSession {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Feed one sample to the session owned by `hand`.
    ///
    /// Finished strokes are moved into layer space and stored in the
    /// gallery, so they stay put under the current layer transform. The
    /// event is returned with the stroke still in world space.
    pub fn update_hand(
        &mut self,
        hand: Hand,
        sample: ControllerSample,
    ) -> Result<Option<SessionEvent>, SculptError> {
        let event = self.session_mut(hand).update(sample)?;

        if let Some(SessionEvent::GestureFinished { stroke }) = &event {
            let mut local = stroke.clone();
            local.mesh.transform(&self.gallery.transform().to_local());
            if self.gallery.add(local) {
                tracing::debug!(
                    ?hand,
                    strokes = self.gallery.len(),
                    triangles = self.gallery.total_triangles(),
                    "Stroke added to gallery"
                );
            }
        }
        Ok(event)
    }

    /// Apply the two-hand grab. Returns whether the layer moved.
    pub fn update_grab(&mut self, input: &GrabInput) -> bool {
        match self.grab.update(input, self.gallery.transform()) {
            Some(transform) => {
                self.gallery.set_transform(transform);
                true
            }
            None => false,
        }
    }

    /// The gallery plus live previews of any gestures in progress.
    pub fn render(&self) -> Result<IndexedMesh, SculptError> {
        let mut out = self.compositor.render_gallery(&self.gallery)?;
        for session in [&self.left, &self.right] {
            if let Some(preview) = session.preview(&self.compositor) {
                out.append(&preview);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use glam::Vec3;

    fn draw_line(studio: &mut Studio, hand: Hand, from: Vec3, to: Vec3, steps: usize) {
        studio
            .update_hand(hand, ControllerSample::held(from))
            .unwrap();
        for k in 1..=steps {
            let p = from.lerp(to, k as f32 / steps as f32);
            studio.update_hand(hand, ControllerSample::held(p)).unwrap();
        }
    }

    #[test]
    fn test_hands_are_independent() {
        let mut studio = Studio::new(&SculptConfig::default()).unwrap();
        draw_line(&mut studio, Hand::Left, Vec3::ZERO, Vec3::new(0.0, 0.0, 0.5), 10);
        assert_eq!(studio.session(Hand::Left).state(), SessionState::Drawing);
        assert_eq!(studio.session(Hand::Right).state(), SessionState::Idle);

        draw_line(
            &mut studio,
            Hand::Right,
            Vec3::X,
            Vec3::new(1.0, 0.5, 0.0),
            10,
        );
        studio
            .update_hand(Hand::Left, ControllerSample::released(Vec3::new(0.0, 0.0, 0.5)))
            .unwrap();
        assert_eq!(studio.gallery().len(), 1);
        assert_eq!(studio.session(Hand::Right).state(), SessionState::Drawing);

        studio
            .update_hand(Hand::Right, ControllerSample::released(Vec3::new(1.0, 0.5, 0.0)))
            .unwrap();
        assert_eq!(studio.gallery().len(), 2);
    }

    #[test]
    fn test_render_includes_previews() {
        let mut studio = Studio::new(&SculptConfig::default()).unwrap();
        draw_line(&mut studio, Hand::Left, Vec3::ZERO, Vec3::new(0.0, 0.0, 0.5), 10);
        let in_progress = studio.session(Hand::Left).accumulator().unwrap().triangle_count();
        assert_eq!(studio.render().unwrap().triangle_count(), in_progress);

        studio
            .update_hand(Hand::Left, ControllerSample::released(Vec3::new(0.0, 0.0, 0.5)))
            .unwrap();
        let rendered = studio.render().unwrap();
        assert_eq!(rendered.triangle_count(), in_progress);
        assert_eq!(rendered.colors.len(), rendered.vertex_count());
    }

    #[test]
    fn test_strokes_stay_put_under_layer_transform() {
        let mut studio = Studio::new(&SculptConfig::default()).unwrap();
        let offset = Vec3::new(0.0, 3.0, 0.0);
        studio.update_grab(&GrabInput {
            left: Vec3::NEG_X,
            right: Vec3::X,
            left_grip: true,
            right_grip: true,
        });
        assert!(studio.update_grab(&GrabInput {
            left: Vec3::NEG_X + offset,
            right: Vec3::X + offset,
            left_grip: true,
            right_grip: true,
        }));
        assert_eq!(studio.gallery().transform().translation, offset);

        draw_line(&mut studio, Hand::Right, Vec3::ZERO, Vec3::new(0.0, 0.0, 0.5), 10);
        studio
            .update_hand(Hand::Right, ControllerSample::released(Vec3::new(0.0, 0.0, 0.5)))
            .unwrap();

        // Stored in layer space, rendered back where it was drawn
        let (stored_min, _) = studio.gallery().strokes()[0].mesh.to_indexed().bounds().unwrap();
        assert!(stored_min.y < -2.0);
        let (min, max) = studio.render().unwrap().bounds().unwrap();
        assert!(min.y > -0.2 && max.y < 0.2);
    }
}
