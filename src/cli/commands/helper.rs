use std::{
    collections::BTreeSet,
    env, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary};
use crate::{
    config::{Config, ConfigLoadResult, load_config},
    core::{Schema, SharedSchema},
    issues::{Issue, Severity},
};

/// Configuration, schema and locale a command runs against.
pub struct ProjectContext {
    pub config: Config,
    /// Directory config-relative paths are resolved against.
    pub root: PathBuf,
    pub schema: Arc<Schema>,
    pub locale: String,
}

impl ProjectContext {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let ConfigLoadResult {
            config,
            root,
            from_file,
        } = load_config(&cwd)?;
        debug!(from_file, root = %root.display(), "configuration loaded");

        let schema_path = match &common.schema {
            Some(path) => cwd.join(path),
            None => root.join(&config.schema),
        };
        let schema = load_schema(&schema_path)?;
        debug!(keys = schema.len(), path = %schema_path.display(), "schema loaded");

        let locale = common
            .locale
            .clone()
            .unwrap_or_else(|| config.locale.clone());

        Ok(Self {
            config,
            root,
            schema: Arc::new(schema),
            locale,
        })
    }

    pub fn shared_schema(&self) -> SharedSchema {
        self.schema.clone()
    }

    /// Files matching the config `includes`, minus `ignores`, sorted.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();
        for pattern in &self.config.includes {
            let full = self.root.join(pattern);
            let entries = glob::glob(&full.to_string_lossy())
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
            for path in entries.flatten() {
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                if path.is_file() && !self.config.is_ignored(relative) {
                    files.insert(path);
                }
            }
        }
        Ok(files.into_iter().collect())
    }

    /// Path as shown in reports: relative to the root when beneath it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {:?}", path))?;
    Schema::from_json(&content).with_context(|| format!("Failed to parse schema file: {:?}", path))
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::Syntax(_) | Issue::ReadError(_)))
        .count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    match &summary {
        CommandSummary::Init(init) if init.error.is_some() => error_count += 1,
        CommandSummary::Get(get) if get.value.is_none() => error_count += 1,
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        parse_error_count,
        files_checked,
    }
}
