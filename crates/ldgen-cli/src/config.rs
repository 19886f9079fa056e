//! # Configuration
//!
//! Optional YAML defaults for the CLI. The file is taken from `--config`,
//! or from `ldgen.yaml` in the working directory when present. Command-line
//! flags override file values.
//!
//! ```yaml
//! output_dir: dist/schemas
//! pretty: true
//! extensions: drop          # preserve | drop
//! archive_member: html      # json | html
//! archive_naming: name      # index | name
//! template:
//!   tiers: [required, common]
//!   examples: true
//!   id_column: false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use ldgen_core::{ExtensionPolicy, FieldTier};
use ldgen_export::{ArchiveMember, ArchiveNaming};

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ldgen.yaml";

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LdgenConfig {
    pub output_dir: Option<PathBuf>,
    pub pretty: bool,
    pub extensions: ExtensionPolicy,
    pub archive_member: ArchiveMember,
    pub archive_naming: ArchiveNaming,
    pub template: TemplateConfig,
}

/// Defaults for `ldgen template`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    pub tiers: Option<Vec<FieldTier>>,
    pub examples: bool,
    pub id_column: bool,
}

impl LdgenConfig {
    /// Parse a configuration document. An empty document is the default
    /// configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the configuration for this invocation.
    ///
    /// An explicit path must exist. Without one, `ldgen.yaml` in `cwd` is
    /// used when present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found; using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Settings shared by every subcommand of one invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: LdgenConfig,
    /// Where artifacts are written: `--output-dir`, else the config's
    /// `output_dir`, else the working directory.
    pub output_dir: PathBuf,
}

impl RunContext {
    /// Resolve configuration and output directory from global flags.
    pub fn resolve(
        config_path: Option<&Path>,
        output_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<Self> {
        let config = LdgenConfig::load(config_path, cwd)?;
        let output_dir = output_dir
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| cwd.to_path_buf());
        Ok(Self { config, output_dir })
    }

    /// Defaults with output into `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: LdgenConfig::default(),
            output_dir: output_dir.into(),
        }
    }
}
