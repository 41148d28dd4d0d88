use crate::analysis::MoveAnalysis;
use crate::cli::util::{apply_overrides, build_service, read_json};
use crate::config::CommentaryConfig;
use crate::error::Result;

pub fn run(
    mut config: CommentaryConfig,
    input: String,
    language: Option<String>,
    threshold: Option<f64>,
    force: bool,
) -> Result<()> {
    apply_overrides(&mut config, language, threshold)?;
    let analysis: MoveAnalysis = read_json(&input)?;

    if !config.is_enabled() {
        eprintln!(
            "commentary is disabled (set `enabled = true` and export {})",
            config.provider.api_key_env
        );
        return Ok(());
    }

    let service = build_service(&config);
    if let Some(annotation) = service.comment_with(&config, &analysis, force) {
        println!("{annotation}");
    }

    Ok(())
}
