//! Converter configuration (`convert.toml`).
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "mcfg-convert"
//!
//! [convert]
//! profile = "bench"
//! verify_checksum = true
//! output_suffix = "_converted"
//! ```

use std::path::{Path, PathBuf};

use mcfg_common::config::{ConfigError, ConfigLoader, SharedConfig};
use mcfg_common::profile::ProfileId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub convert: ConvertSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertSection {
    /// Target profile; the command line may override it.
    #[serde(default)]
    pub profile: Option<ProfileId>,

    /// Warn when the stored checksum does not match on load.
    #[serde(default = "default_verify_checksum")]
    pub verify_checksum: bool,

    /// Appended to the input file stem when no output path is given.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

fn default_verify_checksum() -> bool {
    true
}

fn default_output_suffix() -> String {
    "_converted".to_string()
}

impl Default for ConvertSection {
    fn default() -> Self {
        Self {
            profile: None,
            verify_checksum: default_verify_checksum(),
            output_suffix: default_output_suffix(),
        }
    }
}

impl ConvertConfig {
    /// Load and validate a configuration file.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        let suffix = &self.convert.output_suffix;
        if suffix.is_empty() {
            return Err(ConfigError::ValidationError(
                "output_suffix cannot be empty".to_string(),
            ));
        }
        if suffix.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(format!(
                "output_suffix {suffix:?} must not contain a path separator"
            )));
        }
        Ok(())
    }
}

impl ConvertSection {
    /// `<stem><suffix>.<ext>` next to `input`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match input.extension() {
            Some(ext) => format!("{stem}{}.{}", self.output_suffix, ext.to_string_lossy()),
            None => format!("{stem}{}", self.output_suffix),
        };
        input.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_apply_to_empty_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let config = ConvertConfig::load_validated(file.path()).unwrap();
        assert_eq!(config.convert.profile, None);
        assert!(config.convert.verify_checksum);
        assert_eq!(config.convert.output_suffix, "_converted");
        assert_eq!(config.shared.service_name, "mcfg-convert");
    }

    #[test]
    fn parses_convert_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[shared]
service_name = "bench-rig"
log_level = "debug"

[convert]
profile = "edge-pro-ti"
verify_checksum = false
output_suffix = "_bench"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConvertConfig::load_validated(file.path()).unwrap();
        assert_eq!(config.convert.profile, Some(ProfileId::EdgeProTi));
        assert!(!config.convert.verify_checksum);
        assert_eq!(config.convert.output_suffix, "_bench");
    }

    #[test]
    fn rejects_bad_suffix() {
        let mut config = ConvertConfig::default();
        config.convert.output_suffix = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
        config.convert.output_suffix = "../x".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn unknown_profile_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nprofile = \"plasma\"").unwrap();
        assert!(matches!(
            ConvertConfig::load(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn serialized_defaults_load_back() {
        let mut config = ConvertConfig::default();
        config.convert.profile = Some(ProfileId::DiagnosticBoards);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("profile = \"diagnostic-boards\""), "{text}");

        let parsed: ConvertConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.convert.profile, Some(ProfileId::DiagnosticBoards));
        assert_eq!(parsed.convert.output_suffix, "_converted");
    }

    #[test]
    fn output_path_keeps_extension() {
        let section = ConvertSection::default();
        assert_eq!(
            section.output_path(Path::new("/cfg/machine.ini")),
            PathBuf::from("/cfg/machine_converted.ini")
        );
        assert_eq!(
            section.output_path(Path::new("machine")),
            PathBuf::from("machine_converted")
        );
    }
}
