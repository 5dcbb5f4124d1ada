//! Ps command implementation.
//!
//! Loads a pod snapshot, compiles every `--filter family=value` argument and
//! prints the pods that match. Values given for the same family are ORed by
//! the family's predicate; predicates of different families are ANDed.

use std::path::PathBuf;

use pod_filter_rs::filter::{Clock, CtrNamesMatch, FilterCompiler, FilterOptions, Predicate};
use pod_filter_rs::snapshot::{PodSnapshot, SnapshotStore};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_pods_json, format_pods_table};

/// Options for the ps command.
#[derive(Debug, Default)]
pub struct PsOptions {
    /// Snapshot file; falls back to the configured one.
    pub file: Option<PathBuf>,
    /// Raw `family=value` filter arguments, in command-line order.
    pub filters: Vec<String>,
    /// `ctr-names` mode override.
    pub ctr_names: Option<CtrNamesMatch>,
    /// Worker thread override.
    pub workers: Option<usize>,
}

/// A filter family and the values requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub family: String,
    pub values: Vec<String>,
}

/// Executes the ps command.
///
/// # Errors
///
/// Returns an error if no snapshot file is configured, a filter argument is
/// malformed, the snapshot cannot be loaded, or a filter fails to compile.
pub fn execute(ctx: &CommandContext, opts: &PsOptions, config: &Config) -> Result<()> {
    let path = opts
        .file
        .clone()
        .or_else(|| config.snapshot.clone())
        .ok_or_else(|| {
            CommandError::Usage(
                "no snapshot file: pass --file or run 'pf config set snapshot <path>'".to_string(),
            )
        })?;

    let requests = parse_filter_args(&opts.filters)?;

    let store = SnapshotStore::new(path);
    debug!(path = %store.path().display(), "loading snapshot");
    let snapshot = store.load()?;

    let compiler = FilterCompiler::with_options(FilterOptions {
        ctr_names: opts
            .ctr_names
            .or(config.filters.ctr_names)
            .unwrap_or_default(),
        clock: Clock::system(),
    });

    let predicates = requests
        .iter()
        .map(|request| compiler.compile(&request.family, &request.values, &snapshot))
        .collect::<std::result::Result<Vec<Predicate<PodSnapshot>>, _>>()?;

    let workers = opts.workers.or(config.filters.workers).unwrap_or(1);
    let matched = select_pods(&snapshot.pods, &predicates, workers)?;
    debug!(
        total = snapshot.pods.len(),
        matched = matched.len(),
        filters = predicates.len(),
        workers,
        "evaluated snapshot"
    );

    if ctx.json_output {
        let output = format_pods_json(&matched)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_pods_table(&matched, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Groups `family=value` arguments by family.
///
/// Families keep the order of their first appearance and values keep
/// argument order. The value is everything after the first `=`, so
/// `label=app=web` requests the `label` family with value `app=web`.
pub fn parse_filter_args(args: &[String]) -> Result<Vec<FilterRequest>> {
    let mut requests: Vec<FilterRequest> = Vec::new();

    for arg in args {
        let Some((family, value)) = arg.split_once('=') else {
            return Err(CommandError::Usage(format!(
                "invalid filter '{arg}': expected FAMILY=VALUE"
            )));
        };
        if family.is_empty() {
            return Err(CommandError::Usage(format!(
                "invalid filter '{arg}': missing filter family"
            )));
        }

        match requests.iter_mut().find(|r| r.family == family) {
            Some(request) => request.values.push(value.to_string()),
            None => requests.push(FilterRequest {
                family: family.to_string(),
                values: vec![value.to_string()],
            }),
        }
    }

    Ok(requests)
}

/// Returns the pods that satisfy every predicate, in snapshot order.
///
/// With more than one worker the pods are evaluated on a dedicated rayon
/// pool of that many threads.
pub fn select_pods<'a>(
    pods: &'a [PodSnapshot],
    predicates: &[Predicate<PodSnapshot>],
    workers: usize,
) -> Result<Vec<&'a PodSnapshot>> {
    let matches_all = |pod: &PodSnapshot| predicates.iter().all(|p| p.matches(pod));

    if workers <= 1 || pods.len() <= 1 {
        return Ok(pods.iter().filter(|pod| matches_all(*pod)).collect());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.min(pods.len()))
        .thread_name(|i| format!("pf-eval-{i}"))
        .build()?;
    Ok(pool.install(|| pods.par_iter().filter(|pod| matches_all(*pod)).collect()))
}
