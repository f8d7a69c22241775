//! Loader for the movement tuning RON file.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use ron::Options;
use thiserror::Error;

use super::resources::{MovementTuning, TUNING_SCHEMA_VERSION};

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/movement_tuning.ron";

#[derive(Debug, Error)]
pub enum TuningLoadError {
    #[error("Failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("{file} has schema version {found}, expected {expected}")]
    SchemaVersion {
        file: String,
        found: u32,
        expected: u32,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Missing fields keep their defaults.
pub fn parse_tuning(contents: &str, file: &str) -> Result<MovementTuning, TuningLoadError> {
    let tuning: MovementTuning = ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    if tuning.schema_version != TUNING_SCHEMA_VERSION {
        return Err(TuningLoadError::SchemaVersion {
            file: file.to_string(),
            found: tuning.schema_version,
            expected: TUNING_SCHEMA_VERSION,
        });
    }
    Ok(tuning)
}

pub fn load_tuning(path: &Path) -> Result<MovementTuning, TuningLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| TuningLoadError::Io {
        file: file.clone(),
        source,
    })?;
    parse_tuning(&contents, &file)
}

/// Startup system: replace the default tuning with the file's contents.
pub fn load_movement_tuning(mut tuning: ResMut<MovementTuning>) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded movement tuning: walk_velocity={}, jump_force={}",
                loaded.walk_velocity, loaded.jump_force
            );
            *tuning = loaded;
        }
        Err(err) => warn!("{}; keeping default movement tuning", err),
    }
}
