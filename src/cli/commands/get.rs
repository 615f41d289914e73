use std::{fmt::Display, sync::Arc};

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::GetCommand;
use super::{
    helper::{ProjectContext, finish},
    {CommandResult, CommandSummary, GetSummary},
};
use crate::core::{
    CollectingSink, ResolutionProxy, TypedPropertyTable, parsers::properties::parse_properties_file,
};

pub fn get(cmd: GetCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::load(&cmd.common)?;

    let mut table = TypedPropertyTable::new(ctx.shared_schema());
    for path in &cmd.files {
        let entries = parse_properties_file(path)?;
        let count = table
            .load(entries)
            .with_context(|| format!("Failed to load {:?}", path))?;
        debug!(path = %path.display(), count, "loaded property file");
    }

    let sink = Arc::new(CollectingSink::new());
    let proxy = ResolutionProxy::new(ctx.shared_schema(), Arc::new(table), ctx.locale.as_str())
        .with_sink(sink.clone());

    let args: Vec<&dyn Display> = cmd.args.iter().map(|a| a as &dyn Display).collect();
    let value = proxy.resolve(&cmd.key, &args)?;
    let unresolved = sink.take();

    Ok(finish(
        CommandSummary::Get(GetSummary {
            key: cmd.key,
            locale: ctx.locale,
            value,
            unresolved,
        }),
        Vec::new(),
        cmd.files.len(),
        true,
    ))
}
