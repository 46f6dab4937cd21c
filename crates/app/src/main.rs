//! Tubebrush - replays controller paths through a sculpting studio

use std::path::PathBuf;

use sculpting::{SculptError, SessionEvent, Studio};
use smart_mesh::RenderVertex;
use tracing_subscriber::EnvFilter;
use tubebrush_config::ConfigError;

mod config;
mod script;

use config::{AppConfig, Script};
use script::Frame;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sculpt(#[from] SculptError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    tracing::info!(
        "Starting Tubebrush with {:?} script, {} segments per ring",
        config.script,
        config.sculpt.brush.longitude_segments
    );

    let frames = match config.script {
        Script::Helix => script::helix_script(),
        Script::TwoHands => script::two_hand_script(),
    };

    let mut studio = Studio::new(&config.sculpt)?;
    let mut rings = 0usize;
    let mut dropped = 0usize;
    let mut peak_preview = 0usize;

    for frame in frames {
        match frame {
            Frame::Hand(hand, sample) => match studio.update_hand(hand, sample)? {
                Some(SessionEvent::RingStitched { .. }) => rings += 1,
                Some(SessionEvent::SegmentDropped { .. }) => dropped += 1,
                _ => {}
            },
            Frame::Grab(input) => {
                studio.update_grab(&input);
            }
        }

        // Render every frame, as the headset loop would
        let mesh = studio.render()?;
        peak_preview = peak_preview.max(mesh.triangle_count());
    }

    let mesh = studio.render()?;
    let vertices = mesh.interleaved();
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);

    tracing::info!(
        strokes = studio.gallery().len(),
        rings,
        dropped,
        peak_triangles = peak_preview,
        "Replay finished"
    );
    tracing::info!(
        "Final mesh: {} vertices, {} triangles, {} bytes of {}-byte vertices",
        mesh.vertex_count(),
        mesh.triangle_count(),
        bytes.len(),
        std::mem::size_of::<RenderVertex>()
    );
    if let Some((min, max)) = mesh.bounds() {
        tracing::info!("Bounds {min} .. {max}");
    }
    tracing::info!(transform = ?studio.gallery().transform(), "Layer transform");

    #[cfg(feature = "bevy")]
    {
        let bevy_mesh = mesh.to_bevy_mesh();
        tracing::info!("Bevy mesh with {} vertices", bevy_mesh.count_vertices());
    }

    Ok(())
}
