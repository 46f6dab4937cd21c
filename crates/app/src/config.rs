//! Command-line and environment configuration for the demo

use std::path::PathBuf;

use tubebrush_config::SculptConfig;

use crate::AppError;

/// Which scripted input to replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    /// One hand draws a rising helix
    #[default]
    Helix,
    /// Both hands draw, then the layer is grabbed and turned
    TwoHands,
}

impl Script {
    /// Parse from environment variable TUBEBRUSH_SCRIPT
    pub fn from_env() -> Self {
        match std::env::var("TUBEBRUSH_SCRIPT").as_deref() {
            Ok("two-hands") => Self::TwoHands,
            Ok("helix") | _ => Self::Helix,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub script: Script,
    pub sculpt: SculptConfig,
}

impl AppConfig {
    /// The first argument, if any, is a JSON file with sculpt settings.
    pub fn load() -> Result<Self, AppError> {
        let sculpt = match std::env::args_os().nth(1).map(PathBuf::from) {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| AppError::Read { path, source })?;
                SculptConfig::from_json_str(&json)?
            }
            None => SculptConfig::default(),
        };

        Ok(Self {
            script: Script::from_env(),
            sculpt,
        })
    }
}
