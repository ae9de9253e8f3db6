//! CLI smoke entry point.
//!
//! # Responsibility
//! - Read one JSON vault snapshot from stdin and print its overview as JSON.
//! - Keep output deterministic so projections can be diffed between runs.
//! - Start file logging when the request names a `log_dir`; stay silent
//!   otherwise so stdout carries only the projection.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::process::ExitCode;
use vaultgraph_core::{
    default_log_level, init_logging, Clock, ContextProjector, ProjectionOptions, ReferenceEntry,
    VaultOverview, VaultSnapshot,
};

/// Stdin payload: clock inputs plus the snapshot records.
#[derive(Deserialize)]
struct ProjectionRequest {
    today: String,
    #[serde(default)]
    now: Option<String>,
    #[serde(default)]
    options: ProjectionOptions,
    /// Absolute directory for the rolling log file.
    #[serde(default)]
    log_dir: Option<String>,
    #[serde(flatten)]
    vault: VaultSnapshot,
}

#[derive(Serialize)]
struct ProjectionResponse<'a> {
    version: &'static str,
    overview: VaultOverview<'a>,
    references: Vec<ReferenceEntry>,
}

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("vaultgraph: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| format!("failed to read stdin: {err}"))?;
    project(&input)
}

fn project(input: &str) -> Result<String, String> {
    let request: ProjectionRequest =
        serde_json::from_str(input).map_err(|err| format!("invalid snapshot: {err}"))?;

    if let Some(log_dir) = request.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir).map_err(|err| err.to_string())?;
    }
    request.options.validate().map_err(|err| err.to_string())?;
    let clock =
        Clock::parse(&request.today, request.now.as_deref()).map_err(|err| err.to_string())?;

    let projector = ContextProjector::new(request.options.clone());
    let overview = projector.build_vault_overview(&request.vault, clock);
    let references = overview.reference_table();
    let response = ProjectionResponse {
        version: vaultgraph_core::core_version(),
        overview,
        references,
    };
    serde_json::to_string_pretty(&response).map_err(|err| format!("failed to encode output: {err}"))
}
