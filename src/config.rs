use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RECENT_CAPACITY: usize = 10;
pub const DEFAULT_MAX_FIELD_ROWS: u32 = 500;
const DEFAULT_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];
const DEFAULT_SESSION: &str = "default";

/// Resolved session configuration: CLI/env arguments merged over an optional
/// YAML or JSON config file, with defaults filling the rest.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory scanned for workbooks.
    pub workspace_root: PathBuf,
    /// Backing file for the session property store.
    pub store_path: PathBuf,
    /// Session token scoping persisted recency state.
    pub session: String,
    pub recent_capacity: usize,
    pub max_field_rows: u32,
    pub supported_extensions: Vec<String>,
}

impl SessionConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            workspace_root: cli_workspace_root,
            store_path: cli_store_path,
            session: cli_session,
            recent_capacity: cli_recent_capacity,
            max_field_rows: cli_max_field_rows,
            extensions: cli_extensions,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            workspace_root: file_workspace_root,
            store_path: file_store_path,
            session: file_session,
            recent_capacity: file_recent_capacity,
            max_field_rows: file_max_field_rows,
            extensions: file_extensions,
        } = file_config;

        let workspace_root = cli_workspace_root
            .or(file_workspace_root)
            .unwrap_or_else(|| PathBuf::from("."));

        let store_path = cli_store_path
            .or(file_store_path)
            .map(|p| {
                if p.is_absolute() {
                    p
                } else {
                    workspace_root.join(p)
                }
            })
            .unwrap_or_else(|| workspace_root.join(".sheetlink").join("properties.json"));

        let session = cli_session
            .or(file_session)
            .unwrap_or_else(|| DEFAULT_SESSION.to_string());

        let recent_capacity = cli_recent_capacity
            .or(file_recent_capacity)
            .unwrap_or(DEFAULT_RECENT_CAPACITY)
            .max(1);

        let max_field_rows = cli_max_field_rows
            .or(file_max_field_rows)
            .unwrap_or(DEFAULT_MAX_FIELD_ROWS)
            .max(1);

        let mut supported_extensions = cli_extensions
            .or(file_extensions)
            .unwrap_or_else(|| {
                DEFAULT_EXTENSIONS
                    .iter()
                    .map(|ext| (*ext).to_string())
                    .collect()
            })
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect::<Vec<_>>();

        supported_extensions.sort();
        supported_extensions.dedup();

        anyhow::ensure!(
            !supported_extensions.is_empty(),
            "at least one file extension must be provided"
        );

        Ok(Self {
            workspace_root,
            store_path,
            session,
            recent_capacity,
            max_field_rows,
            supported_extensions,
        })
    }

    pub fn ensure_workspace_root(&self) -> Result<()> {
        anyhow::ensure!(
            self.workspace_root.exists(),
            "workspace root {:?} does not exist",
            self.workspace_root
        );
        anyhow::ensure!(
            self.workspace_root.is_dir(),
            "workspace root {:?} is not a directory",
            self.workspace_root
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "SHEETLINK_WORKSPACE",
        value_name = "DIR",
        help = "Workspace root containing spreadsheet files",
        global = true
    )]
    pub workspace_root: Option<PathBuf>,

    #[arg(
        long,
        env = "SHEETLINK_STORE",
        value_name = "FILE",
        help = "Property store file (default: <workspace_root>/.sheetlink/properties.json)",
        global = true
    )]
    pub store_path: Option<PathBuf>,

    #[arg(
        long,
        env = "SHEETLINK_SESSION",
        value_name = "TOKEN",
        help = "Session token scoping recency state",
        global = true
    )]
    pub session: Option<String>,

    #[arg(
        long,
        env = "SHEETLINK_RECENT_CAPACITY",
        value_name = "N",
        help = "Maximum number of remembered spreadsheets",
        value_parser = clap::value_parser!(usize),
        global = true
    )]
    pub recent_capacity: Option<usize>,

    #[arg(
        long,
        env = "SHEETLINK_MAX_FIELD_ROWS",
        value_name = "N",
        help = "Maximum rows scanned per tab when listing fields",
        value_parser = clap::value_parser!(u32),
        global = true
    )]
    pub max_field_rows: Option<u32>,

    #[arg(
        long,
        env = "SHEETLINK_EXTENSIONS",
        value_name = "EXT",
        value_delimiter = ',',
        help = "Comma-separated list of allowed workbook extensions",
        global = true
    )]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    workspace_root: Option<PathBuf>,
    store_path: Option<PathBuf>,
    session: Option<String>,
    recent_capacity: Option<usize>,
    max_field_rows: Option<u32>,
    extensions: Option<Vec<String>>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_values() {
        let config = SessionConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config.recent_capacity, DEFAULT_RECENT_CAPACITY);
        assert_eq!(config.max_field_rows, DEFAULT_MAX_FIELD_ROWS);
        assert_eq!(config.session, DEFAULT_SESSION);
        assert_eq!(config.supported_extensions, vec!["xlsm", "xlsx"]);
        assert!(config.store_path.ends_with(".sheetlink/properties.json"));
    }

    #[test]
    fn extensions_are_normalized() {
        let args = CliArgs {
            extensions: Some(vec![".XLSX".to_string(), "xlsx ".to_string(), String::new()]),
            ..CliArgs::default()
        };
        let config = SessionConfig::from_args(args).unwrap();
        assert_eq!(config.supported_extensions, vec!["xlsx"]);
    }

    #[test]
    fn capacity_floor_is_one() {
        let args = CliArgs {
            recent_capacity: Some(0),
            ..CliArgs::default()
        };
        let config = SessionConfig::from_args(args).unwrap();
        assert_eq!(config.recent_capacity, 1);
    }
}
