use serde::Serialize;
use snafu::ResultExt;

use crate::analysis::MoveAnalysis;
use crate::cli::util::{apply_overrides, build_service, read_json};
use crate::config::CommentaryConfig;
use crate::error::commentary_error::JsonSnafu;
use crate::error::Result;

#[derive(Serialize)]
struct BatchEntry {
    move_number: u32,
    comment: Option<String>,
}

pub fn run(
    mut config: CommentaryConfig,
    input: String,
    language: Option<String>,
    threshold: Option<f64>,
) -> Result<()> {
    apply_overrides(&mut config, language, threshold)?;
    let moves: Vec<MoveAnalysis> = read_json(&input)?;

    if !config.is_enabled() {
        eprintln!(
            "commentary is disabled (set `enabled = true` and export {})",
            config.provider.api_key_env
        );
    }

    let service = build_service(&config);
    let comments = service.comment_batch(&config, &moves);

    let entries: Vec<BatchEntry> = moves
        .iter()
        .zip(comments)
        .map(|(analysis, comment)| BatchEntry {
            move_number: analysis.move_number,
            comment,
        })
        .collect();

    let commented = entries.iter().filter(|e| e.comment.is_some()).count();
    tracing::info!(moves = entries.len(), commented, "batch complete");

    let json = serde_json::to_string_pretty(&entries).context(JsonSnafu)?;
    println!("{json}");

    Ok(())
}
