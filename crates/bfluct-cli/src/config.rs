use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default extraction collaborator: GROMACS trjconv via the `gmx` wrapper.
const DEFAULT_EXTRACTION_COMMAND: &str = "gmx trjconv";
/// Default index group piped to the collaborator (3 = C-alpha).
const DEFAULT_EXTRACTION_GROUP: &str = "3";

/// Optional TOML configuration file.
///
/// Every field has a working default; the file exists so that sites with a
/// different GROMACS installation (e.g. a bare `trjconv` binary) or different
/// output habits do not need to repeat flags on every invocation. Values given
/// on the command line win over the file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ExtractionSection {
    /// The trajectory-extraction command, split on whitespace into program
    /// and leading arguments.
    pub command: Option<String>,
    /// The index group answer piped to the extraction tool's prompt.
    pub group: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputSection {
    /// Whether to render SVG figures next to the xvg tables.
    pub figures: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&text)
            .map_err(|e| CliError::Config(format!("invalid '{}': {}", path.display(), e)))?;
        debug!("Loaded configuration file {:?}: {:?}", path, config);
        Ok(config)
    }
}

/// Fully resolved CLI-side settings after merging file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub extraction_command: String,
    pub extraction_group: String,
    pub figures: bool,
}

impl AppSettings {
    /// Merges the optional configuration file with the command line;
    /// command-line flags override file values, which override defaults.
    pub fn resolve(no_figures: bool, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();
        let figures_from_file = file.output.figures.unwrap_or(true);
        Self {
            extraction_command: file
                .extraction
                .command
                .unwrap_or_else(|| DEFAULT_EXTRACTION_COMMAND.to_string()),
            extraction_group: file
                .extraction
                .group
                .unwrap_or_else(|| DEFAULT_EXTRACTION_GROUP.to_string()),
            figures: !no_figures && figures_from_file,
        }
    }
}
