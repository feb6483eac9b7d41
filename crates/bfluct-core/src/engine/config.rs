use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Inputs of the fluctuation pipeline.
///
/// The frames directory holds one structure snapshot per simulated time frame,
/// all with identical atom ordering and count. The optional reference PDB is an
/// experimentally annotated structure whose embedded B-factor column is
/// extracted for comparison against the computed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluctuationConfig {
    pub frames_dir: PathBuf,
    pub reference_pdb: Option<PathBuf>,
}

impl FluctuationConfig {
    pub fn builder() -> FluctuationConfigBuilder {
        FluctuationConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct FluctuationConfigBuilder {
    frames_dir: Option<PathBuf>,
    reference_pdb: Option<PathBuf>,
}

impl FluctuationConfigBuilder {
    pub fn frames_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.frames_dir = Some(path.into());
        self
    }

    pub fn reference_pdb(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_pdb = Some(path.into());
        self
    }

    pub fn build(self) -> Result<FluctuationConfig, ConfigError> {
        Ok(FluctuationConfig {
            frames_dir: self
                .frames_dir
                .ok_or(ConfigError::MissingParameter("frames_dir"))?,
            reference_pdb: self.reference_pdb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_frames_dir_succeeds() {
        let config = FluctuationConfig::builder()
            .frames_dir("/tmp/frames")
            .build()
            .unwrap();
        assert_eq!(config.frames_dir, PathBuf::from("/tmp/frames"));
        assert!(config.reference_pdb.is_none());
    }

    #[test]
    fn builder_without_frames_dir_fails() {
        let result = FluctuationConfig::builder()
            .reference_pdb("/tmp/ref.pdb")
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("frames_dir")));
    }
}
