use anyhow::{anyhow, bail, Result};
use refdiff_core::{resolve_subtasks, DomainId, Plan, PlanEntry, RefdiffOptions, REFDIFF_PLUGIN};

use super::StageArgs;

fn repo_id(args: &StageArgs) -> Result<String> {
    if let Some(id) = &args.repo_id {
        return Ok(id.clone());
    }
    match (&args.plugin, args.connection, &args.source) {
        (Some(plugin), Some(connection), Some(source)) => {
            Ok(DomainId::repo(plugin, connection, source.as_str())?.to_string())
        }
        _ => bail!("either --repo-id or --plugin/--connection/--source is required"),
    }
}

/// Git forbids ':' in ref names, so it is safe as the NEW:OLD separator.
fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    raw.split_once(':')
        .ok_or_else(|| anyhow!("invalid pair '{raw}' (expected NEW:OLD)"))
}

pub fn build(args: &StageArgs) -> Result<RefdiffOptions> {
    let mut options = RefdiffOptions::new(repo_id(args)?);

    for raw in &args.pairs {
        let (new_ref, old_ref) = parse_pair(raw)?;
        options.add_pair(new_ref, old_ref)?;
    }

    if !args.tasks.is_empty() {
        let resolved = resolve_subtasks(Some(args.tasks.as_slice()))?;
        options.tasks = Some(resolved.iter().map(|s| s.name.to_string()).collect());
    }

    options.tags_pattern.clone_from(&args.tags_pattern);
    options.tags_limit = args.tags_limit;
    options.tags_order.clone_from(&args.tags_order);
    options.project_name.clone_from(&args.project_name);
    options.validate()?;

    tracing::debug!(repo_id = %options.repo_id, pairs = options.pairs.len(), "built refdiff stage");
    Ok(options)
}

pub fn run(args: &StageArgs) -> Result<()> {
    let options = build(args)?;
    let mut plan = Plan::new();
    plan.push_stage(vec![PlanEntry::new(REFDIFF_PLUGIN, options)]);

    let out = if args.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{out}");
    Ok(())
}
