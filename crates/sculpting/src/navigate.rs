//! Two-handed world grab.
//!
//! Holding both grips lets the user rotate, scale, and move the whole layer.
//! While at most one grip is held the current layer transform and the pose
//! of the hand pair are snapshotted; once both are held, the layer follows
//! the change of heading, spread, and midpoint relative to that snapshot.

use glam::{Quat, Vec3};

use crate::gallery::LayerTransform;

/// Smallest layer scale the grab will produce.
pub const MIN_LAYER_SCALE: f32 = 1e-3;

/// Controller state consumed by [`WorldGrab::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabInput {
    pub left: Vec3,
    pub right: Vec3,
    pub left_grip: bool,
    pub right_grip: bool,
}

impl GrabInput {
    fn both(&self) -> bool {
        self.left_grip && self.right_grip
    }

    fn heading(&self) -> Vec3 {
        (self.right - self.left).normalize_or_zero()
    }

    fn spread(&self) -> f32 {
        self.left.distance(self.right)
    }

    fn midpoint(&self) -> Vec3 {
        (self.left + self.right) * 0.5
    }
}

#[derive(Debug, Clone, Copy)]
struct GrabSnapshot {
    layer: LayerTransform,
    heading: Vec3,
    spread: f32,
    midpoint: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct WorldGrab {
    snapshot: Option<GrabSnapshot>,
    grabbing: bool,
}

impl WorldGrab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    /// Advance one frame. Returns the new layer transform while both grips
    /// are held, `None` otherwise.
    pub fn update(&mut self, input: &GrabInput, layer: &LayerTransform) -> Option<LayerTransform> {
        let snapshot = match (input.both(), self.snapshot) {
            (true, Some(snapshot)) if self.grabbing => snapshot,
            _ => {
                // Re-anchor on every frame that is not a continued grab, so
                // the grab starts from the pose at the moment both grips close
                let snapshot = GrabSnapshot {
                    layer: *layer,
                    heading: input.heading(),
                    spread: input.spread(),
                    midpoint: input.midpoint(),
                };
                self.snapshot = Some(snapshot);
                if !input.both() {
                    if self.grabbing {
                        tracing::debug!("World grab released");
                    }
                    self.grabbing = false;
                    return None;
                }
                tracing::debug!("World grab started");
                self.grabbing = true;
                snapshot
            }
        };

        let heading = input.heading();
        let turn = if snapshot.heading == Vec3::ZERO || heading == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(snapshot.heading, heading)
        };

        Some(LayerTransform {
            scale: (snapshot.layer.scale + (input.spread() - snapshot.spread))
                .max(MIN_LAYER_SCALE),
            rotation: (turn * snapshot.layer.rotation).normalize(),
            translation: snapshot.layer.translation + (input.midpoint() - snapshot.midpoint),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(left: Vec3, right: Vec3, grip: bool) -> GrabInput {
        GrabInput {
            left,
            right,
            left_grip: grip,
            right_grip: grip,
        }
    }

    #[test]
    fn test_single_grip_does_nothing() {
        let mut grab = WorldGrab::new();
        let layer = LayerTransform::default();
        let mut one = input(Vec3::NEG_X, Vec3::X, true);
        one.right_grip = false;
        assert!(grab.update(&one, &layer).is_none());
        assert!(!grab.is_grabbing());
    }

    #[test]
    fn test_first_grab_frame_is_identity_change() {
        let mut grab = WorldGrab::new();
        let layer = LayerTransform {
            scale: 1.5,
            ..Default::default()
        };
        let result = grab
            .update(&input(Vec3::NEG_X, Vec3::X, true), &layer)
            .unwrap();
        assert_eq!(result.scale, 1.5);
        assert_eq!(result.translation, Vec3::ZERO);
        assert!(grab.is_grabbing());
    }

    #[test]
    fn test_spread_midpoint_and_heading() {
        let mut grab = WorldGrab::new();
        let layer = LayerTransform::default();
        grab.update(&input(Vec3::NEG_X, Vec3::X, true), &layer);

        // Hands move apart by 1, shift up by 1, and turn a quarter about Y
        let moved = input(Vec3::new(0.0, 1.0, 1.5), Vec3::new(0.0, 1.0, -1.5), true);
        let result = grab.update(&moved, &layer).unwrap();

        assert_relative_eq!(result.scale, 2.0, epsilon = 1e-5);
        assert_relative_eq!(result.translation.y, 1.0, epsilon = 1e-5);
        let turned = result.rotation * Vec3::X;
        assert_relative_eq!(turned.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut grab = WorldGrab::new();
        let layer = LayerTransform::default();
        grab.update(&input(Vec3::NEG_X * 5.0, Vec3::X * 5.0, true), &layer);
        let result = grab.update(&input(Vec3::ZERO, Vec3::X * 0.1, true), &layer).unwrap();
        assert_eq!(result.scale, MIN_LAYER_SCALE);
    }

    #[test]
    fn test_release_reanchors() {
        let mut grab = WorldGrab::new();
        let layer = LayerTransform::default();
        grab.update(&input(Vec3::NEG_X, Vec3::X, true), &layer);
        let moved = grab
            .update(&input(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, 2.0, 0.0), true), &layer)
            .unwrap();
        assert!(grab.update(&input(Vec3::ZERO, Vec3::X, false), &moved).is_none());

        // New grab from a different pose starts from the updated layer
        let result = grab
            .update(&input(Vec3::new(5.0, 0.0, 0.0), Vec3::new(7.0, 0.0, 0.0), true), &moved)
            .unwrap();
        assert_relative_eq!(result.translation.y, 2.0, epsilon = 1e-5);
    }
}
