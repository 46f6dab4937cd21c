//! Scripted controller input standing in for a tracked device.

use std::f32::consts::TAU;

use glam::Vec3;
use sculpting::{ControllerSample, GrabInput, Hand};

/// One frame of input for the whole studio.
#[derive(Debug, Clone, Copy)]
pub enum Frame {
    Hand(Hand, ControllerSample),
    Grab(GrabInput),
}

fn stroke(hand: Hand, points: impl Iterator<Item = Vec3>, out: &mut Vec<Frame>) {
    let mut last = None;
    for p in points {
        out.push(Frame::Hand(hand, ControllerSample::held(p)));
        last = Some(p);
    }
    if let Some(p) = last {
        out.push(Frame::Hand(hand, ControllerSample::released(p)));
    }
}

fn helix(center: Vec3, radius: f32, rise: f32, turns: f32, samples: usize) -> impl Iterator<Item = Vec3> {
    (0..=samples).map(move |k| {
        let t = k as f32 / samples as f32;
        let angle = t * turns * TAU;
        center + Vec3::new(radius * angle.cos(), rise * t, radius * angle.sin())
    })
}

pub fn helix_script() -> Vec<Frame> {
    let mut frames = Vec::new();
    stroke(Hand::Right, helix(Vec3::ZERO, 0.5, 1.5, 2.0, 240), &mut frames);
    frames
}

pub fn two_hand_script() -> Vec<Frame> {
    let mut frames = Vec::new();
    stroke(
        Hand::Left,
        helix(Vec3::new(-1.0, 0.0, 0.0), 0.3, 1.0, 1.0, 90),
        &mut frames,
    );
    stroke(
        Hand::Right,
        (0..=60).map(|k| Vec3::new(1.0, k as f32 * 0.02, 0.0)),
        &mut frames,
    );

    // Spread the hands and swing them a quarter turn
    for k in 0..=30 {
        let t = k as f32 / 30.0;
        let angle = t * TAU * 0.25;
        let half = 0.4 + 0.2 * t;
        let heading = Vec3::new(angle.cos(), 0.0, -angle.sin());
        frames.push(Frame::Grab(GrabInput {
            left: Vec3::Y - heading * half,
            right: Vec3::Y + heading * half,
            left_grip: true,
            right_grip: true,
        }));
    }
    frames.push(Frame::Grab(GrabInput {
        left: Vec3::ZERO,
        right: Vec3::X,
        left_grip: false,
        right_grip: false,
    }));
    frames
}
