use crate::cli::{ReadPolicyArgs, WritePolicyArgs};
use crate::error::{CliError, Result};
use pdbkit::core::io::options::{
    NamingPolicy, ReadOptions, SecondaryRecords, UnrecognizedLines, WriteOptions,
};
use pdbkit::core::models::document::Section;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Built-in values used when neither a flag nor the config file sets an option.
#[derive(Default)]
struct DefaultsConfig {
    read: ReadOptions,
    write: WriteOptions,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialReadConfig {
    unrecognized_lines: Option<UnrecognizedLines>,
    secondary_records: Option<SecondaryRecords>,
    naming: Option<NamingPolicy>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialWriteConfig {
    preserve_sections: Option<Vec<Section>>,
    keep_models: Option<bool>,
}

/// The optional TOML configuration file, with every key optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    read: Option<PartialReadConfig>,
    write: Option<PartialWriteConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty configuration.
    pub fn load(args: &ReadPolicyArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves read policies: flag, then config file, then built-in default.
    pub fn read_options(&self, args: &ReadPolicyArgs) -> ReadOptions {
        let defaults = DefaultsConfig::default().read;
        let file = self.read.clone().unwrap_or_default();

        let unrecognized_lines = if args.strict {
            UnrecognizedLines::Reject
        } else {
            file.unrecognized_lines
                .unwrap_or(defaults.unrecognized_lines)
        };
        let secondary_records = if args.full_secondary {
            SecondaryRecords::Full
        } else {
            file.secondary_records
                .unwrap_or(defaults.secondary_records)
        };
        let naming = if args.strict || args.strict_names {
            NamingPolicy::Reject
        } else {
            file.naming.unwrap_or(defaults.naming)
        };

        ReadOptions {
            unrecognized_lines,
            secondary_records,
            naming,
        }
    }

    /// Resolves write policies. The writer applies the same naming policy as the
    /// reader.
    pub fn write_options(&self, args: &WritePolicyArgs, naming: NamingPolicy) -> WriteOptions {
        let defaults = DefaultsConfig::default().write;
        let file = self.write.clone().unwrap_or_default();

        let preserve_sections = if !args.keep.is_empty() {
            args.keep.clone()
        } else {
            file.preserve_sections
                .unwrap_or(defaults.preserve_sections)
        };
        let keep_models = args.keep_models || file.keep_models.unwrap_or(defaults.keep_models);

        WriteOptions {
            preserve_sections,
            keep_models,
            naming,
        }
    }
}
