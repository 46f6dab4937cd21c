//! Drawing session state machine.
//!
//! A [`DrawingSession`] turns one controller's stream of
//! [`ControllerSample`]s into tube geometry. Pressing the trigger records an
//! anchor; once the tip leaves the anchor a hemisphere cap is placed, and
//! every further `extrusion_threshold` of travel adds a ring stitched onto the
//! open end. Releasing the trigger finalizes the gesture.

use glam::Vec3;
use smart_mesh::{IndexedMesh, SmartMesh, StitchError, hemisphere_cap, placement, ring};
use tubebrush_config::{BrushConfig, SculptConfig};

use crate::accumulator::StrokeAccumulator;
use crate::compositor::Compositor;
use crate::types::{ControllerSample, FinishedStroke, SculptError};

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drawing,
}

/// What a single sample caused.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Trigger pressed; no geometry yet
    GestureStarted { anchor: Vec3 },
    /// The starting cap became the first segment
    CapPlaced {
        triangles: usize,
        boundary: usize,
    },
    /// A ring was generated and stitched to the open end
    RingStitched {
        segment: usize,
        triangles_added: usize,
        consistent_rotation: bool,
    },
    /// A ring could not be stitched and was discarded
    SegmentDropped { error: StitchError },
    /// Trigger released; the merged mesh is ready for composition
    GestureFinished { stroke: FinishedStroke },
}

/// State kept between press and release.
#[derive(Debug)]
struct ActiveGesture {
    stroke_id: u64,
    anchor: Vec3,
    /// Position of the most recently placed segment
    last_sample: Vec3,
    accumulator: StrokeAccumulator,
}

impl ActiveGesture {
    fn cap_placed(&self) -> bool {
        !self.accumulator.is_empty()
    }
}

/// One drawing tool, fed by exactly one controller.
#[derive(Debug)]
pub struct DrawingSession {
    brush: BrushConfig,
    recompute_normals: bool,
    active: Option<ActiveGesture>,
    trigger_was_down: bool,
    next_stroke_id: u64,
}

impl DrawingSession {
    /// Create an idle session. The configuration is validated up front so
    /// generators cannot fail mid-gesture.
    pub fn new(config: &SculptConfig) -> Result<Self, SculptError> {
        config.validate()?;
        Ok(Self {
            brush: config.brush.clone(),
            recompute_normals: config.recompute_normals,
            active: None,
            trigger_was_down: false,
            next_stroke_id: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Drawing
        } else {
            SessionState::Idle
        }
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// The gesture under construction, if any.
    pub fn accumulator(&self) -> Option<&StrokeAccumulator> {
        self.active.as_ref().map(|gesture| &gesture.accumulator)
    }

    /// Render the gesture under construction.
    ///
    /// Returns `None` while idle or before the cap is placed.
    pub fn preview(&self, compositor: &Compositor) -> Option<IndexedMesh> {
        self.accumulator()
            .filter(|acc| !acc.is_empty())
            .map(|acc| compositor.render_accumulator(acc))
    }

    /// Feed one input sample.
    ///
    /// Each sample produces at most one event. Geometry errors from the
    /// generators are returned; stitch failures are reported as
    /// [`SessionEvent::SegmentDropped`] and the gesture continues. Caps and
    /// rings share `longitude_segments`, so a drop only happens if a ring's
    /// open set ever disagrees with the frontier.
    pub fn update(
        &mut self,
        sample: ControllerSample,
    ) -> Result<Option<SessionEvent>, SculptError> {
        let pressed = sample.trigger && !self.trigger_was_down;
        let released = !sample.trigger && self.trigger_was_down;
        self.trigger_was_down = sample.trigger;

        if pressed {
            // A press without a release in between restarts the gesture
            if self.active.is_some() {
                tracing::warn!("Trigger pressed during an active gesture, discarding it");
            }
            self.active = Some(ActiveGesture {
                stroke_id: self.next_stroke_id,
                anchor: sample.position,
                last_sample: sample.position,
                accumulator: StrokeAccumulator::begin(),
            });
            self.next_stroke_id += 1;
            tracing::debug!(anchor = ?sample.position, "Gesture started");
            return Ok(Some(SessionEvent::GestureStarted {
                anchor: sample.position,
            }));
        }

        if released {
            return Ok(self
                .finish()
                .map(|stroke| SessionEvent::GestureFinished { stroke }));
        }

        if !sample.trigger {
            return Ok(None);
        }

        // Take the gesture out while stepping so a failed generator leaves
        // the session idle instead of half-updated.
        let Some(mut gesture) = self.active.take() else {
            return Ok(None);
        };
        let event = self.step(&mut gesture, sample.position)?;
        self.active = Some(gesture);
        Ok(event)
    }

    /// Discard the active gesture without producing a stroke.
    ///
    /// The trigger must be released and pressed again to start drawing.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(gesture) => {
                tracing::debug!(
                    stroke = gesture.stroke_id,
                    segments = gesture.accumulator.segment_count(),
                    "Gesture cancelled"
                );
                true
            }
            None => false,
        }
    }

    fn step(
        &self,
        gesture: &mut ActiveGesture,
        position: Vec3,
    ) -> Result<Option<SessionEvent>, SculptError> {
        if !gesture.cap_placed() {
            let offset = position - gesture.anchor;
            if offset.length() <= self.brush.start_threshold {
                return Ok(None);
            }

            let mut cap = hemisphere_cap(
                self.brush.cap_radius,
                self.brush.longitude_segments,
                self.brush.latitude_segments,
            )?;
            cap.transform(&placement(position, offset));
            let triangles = cap.triangle_count();
            gesture.accumulator.extend(cap)?;
            gesture.last_sample = position;

            let boundary = gesture.accumulator.open_boundary().len();
            tracing::debug!(stroke = gesture.stroke_id, triangles, boundary, "Cap placed");
            return Ok(Some(SessionEvent::CapPlaced {
                triangles,
                boundary,
            }));
        }

        let offset = position - gesture.last_sample;
        if offset.length() <= self.brush.extrusion_threshold {
            return Ok(None);
        }

        let mut segment = ring(self.brush.ring_radius, self.brush.longitude_segments)?;
        segment.transform(&placement(position, offset));
        Ok(Some(Self::attach_ring(gesture, position, segment)))
    }

    /// Stitch a placed ring onto the open end. On failure the ring is
    /// dropped and `last_sample` is left where it was, so the next sample
    /// past the threshold retries.
    fn attach_ring(
        gesture: &mut ActiveGesture,
        position: Vec3,
        segment: SmartMesh,
    ) -> SessionEvent {
        match gesture.accumulator.extend(segment) {
            Ok(extension) => {
                gesture.last_sample = position;
                let (triangles_added, consistent_rotation) = extension
                    .stitch
                    .map(|report| (report.triangles_added, report.consistent_rotation))
                    .unwrap_or((0, true));
                if !consistent_rotation {
                    tracing::debug!(
                        stroke = gesture.stroke_id,
                        segment = extension.segment,
                        "Ring matched with an inconsistent rotation"
                    );
                }
                SessionEvent::RingStitched {
                    segment: extension.segment,
                    triangles_added,
                    consistent_rotation,
                }
            }
            Err(error) => {
                tracing::warn!(stroke = gesture.stroke_id, %error, "Dropping ring");
                SessionEvent::SegmentDropped { error }
            }
        }
    }

    fn finish(&mut self) -> Option<FinishedStroke> {
        let gesture = self.active.take()?;
        let segment_count = gesture.accumulator.segment_count();
        let mut mesh = gesture.accumulator.finalize();
        if self.recompute_normals {
            mesh.recompute_normals();
        }

        tracing::info!(
            stroke = gesture.stroke_id,
            segments = segment_count,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Gesture finished"
        );

        Some(FinishedStroke {
            id: gesture.stroke_id,
            mesh,
            segment_count,
        })
    }
}
