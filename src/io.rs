use crate::profile_scope;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::particle::ParticleSpec;
use crate::simulation::ParticleSystem;

/// Everything needed to resume a particle system where it stopped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub particles: Vec<ParticleSpec>,
    pub config: SimConfig,
    /// Elapsed time is `frame * config.dt`, so it is not stored separately.
    #[serde(default)]
    pub frame: u64,
}

impl SimulationState {
    pub fn from_system(system: &ParticleSystem) -> Self {
        Self {
            particles: system.specs(),
            config: system.config().clone(),
            frame: system.frame(),
        }
    }

    pub fn into_system(self) -> Result<ParticleSystem> {
        ParticleSystem::from_state(self)
    }
}

impl ParticleSystem {
    /// Rebuild a system, running the same validation as a fresh start.
    pub fn from_state(state: SimulationState) -> Result<Self> {
        ParticleSystem::with_frame(&state.particles, state.config, state.frame)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Json,
    /// gzip-compressed bincode
    BinaryGz,
}

impl SaveFormat {
    /// `.json` saves as JSON, anything else as compressed binary.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SaveFormat::Json,
            _ => SaveFormat::BinaryGz,
        }
    }
}

fn encode_err<E: std::fmt::Display>(e: E) -> SimError {
    SimError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}

pub fn save_state<P: AsRef<Path>>(path: P, system: &ParticleSystem) -> Result<()> {
    profile_scope!("save_state");
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let state = SimulationState::from_system(system);

    // Write to a temporary file first to avoid truncation on crash/interruption
    let tmp_path = path.with_extension({
        let mut os = path.extension().map(|e| e.to_os_string()).unwrap_or_default();
        os.push(".tmp");
        os
    });
    {
        let file = std::fs::File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        match SaveFormat::for_path(path) {
            SaveFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &state).map_err(encode_err)?;
            }
            SaveFormat::BinaryGz => {
                let mut encoder = GzEncoder::new(&mut writer, Compression::fast());
                bincode::serialize_into(&mut encoder, &state).map_err(encode_err)?;
                encoder.finish()?;
            }
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn load_state<P: AsRef<Path>>(path: P) -> Result<SimulationState> {
    profile_scope!("load_state");
    let data = std::fs::read(path.as_ref())?;
    match maybe_decompress_gzip(&data)? {
        Some(decoded) => parse_state_bytes(&decoded),
        None => parse_state_bytes(&data),
    }
}

fn parse_state_bytes(bytes: &[u8]) -> Result<SimulationState> {
    if let Ok(state) = serde_json::from_slice::<SimulationState>(bytes) {
        return Ok(state);
    }
    bincode::deserialize::<SimulationState>(bytes).map_err(|_| {
        encode_err("failed to parse simulation state: not valid JSON or binary format")
    })
}

fn maybe_decompress_gzip(data: &[u8]) -> std::io::Result<Option<Vec<u8>>> {
    if data.len() < 2 || data[0] != 0x1f || data[1] != 0x8b {
        return Ok(None);
    }

    let mut decoder = GzDecoder::new(Cursor::new(data));
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Some(decoded))
}
