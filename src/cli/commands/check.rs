use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::Path,
    sync::Arc,
};

use anyhow::Result;
use rayon::prelude::*;
use tracing::debug;

use super::super::args::CheckCommand;
use super::{
    helper::{ProjectContext, finish},
    {CommandResult, CommandSummary},
};
use crate::{
    core::{
        CollectingSink, MessagePattern, ResolutionProxy, TypedPropertyTable, Value,
        parsers::properties::parse_properties,
    },
    issues::{InvalidPatternIssue, Issue, ReadErrorIssue, UnresolvedKeyIssue},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::load(&cmd.common)?;

    let files = if cmd.files.is_empty() {
        ctx.discover_files()?
    } else {
        cmd.files
    };
    debug!(count = files.len(), "checking property files");

    let issues: Vec<Issue> = files
        .par_iter()
        .flat_map_iter(|path| check_file(&ctx, path))
        .collect();

    Ok(finish(CommandSummary::Check, issues, files.len(), true))
}

/// Load one file into its own table and collect everything wrong with it.
fn check_file(ctx: &ProjectContext, path: &Path) -> Vec<Issue> {
    let file_path = ctx.display_path(path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            return vec![Issue::ReadError(ReadErrorIssue {
                file_path,
                error: err.to_string(),
            })];
        }
    };

    let entries = match parse_properties(&content) {
        Ok(entries) => entries,
        Err(err) => return vec![Issue::from_load_error(&file_path, err)],
    };

    // Last occurrence wins, as in the table.
    let lines: HashMap<String, usize> = entries
        .iter()
        .filter_map(|e| e.line.map(|line| (e.key.clone(), line)))
        .collect();

    let mut table = TypedPropertyTable::new(ctx.shared_schema());
    if let Err(err) = table.load(entries) {
        return vec![Issue::from_load_error(&file_path, err)];
    }

    let sink = Arc::new(CollectingSink::new());
    let proxy = ResolutionProxy::new(ctx.shared_schema(), Arc::new(table), ctx.locale.as_str())
        .with_sink(sink.clone());

    let keys: BTreeSet<&str> = ctx
        .schema
        .keys()
        .into_iter()
        .chain(proxy.table().keys())
        .collect();

    let mut issues = Vec::new();
    for key in keys {
        let Ok(Some(Value::String(text))) = proxy.resolve(key, &[]) else {
            continue;
        };
        if !proxy.descriptor(key).formattable {
            continue;
        }
        if let Err(err) = MessagePattern::parse(&text) {
            issues.push(Issue::InvalidPattern(InvalidPatternIssue {
                file_path: file_path.clone(),
                line: lines.get(key).copied(),
                key: key.to_string(),
                error: err.to_string(),
            }));
        }
    }

    issues.extend(sink.take().into_iter().map(|unresolved| {
        Issue::UnresolvedKey(UnresolvedKeyIssue {
            file_path: file_path.clone(),
            key: unresolved.key,
            locale: unresolved.locale,
        })
    }));

    issues
}
