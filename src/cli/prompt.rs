use snafu::ResultExt;

use crate::analysis::MoveAnalysis;
use crate::annotate::filter;
use crate::annotate::gather::build_context;
use crate::cli::util::{apply_overrides, read_json};
use crate::config::CommentaryConfig;
use crate::error::commentary_error::AnalysisSnafu;
use crate::error::Result;
use crate::prompt::render;

/// Dry run: show what the model would be asked, and whether the move would trigger.
pub fn run(mut config: CommentaryConfig, input: String, language: Option<String>) -> Result<()> {
    apply_overrides(&mut config, language, None)?;
    let analysis: MoveAnalysis = read_json(&input)?;
    let context = build_context(&analysis).context(AnalysisSnafu)?;

    let decision = filter::pre_llm_filter(&context, config.trigger, config.score_threshold);
    let request = render(&context, &config.language);

    println!("language: {}", request.language_code);
    match decision {
        filter::FilterDecision::Comment { delta } => {
            println!("trigger:  key move ({} swing {delta:.2})", config.trigger);
        }
        filter::FilterDecision::Skip(reason) => println!("trigger:  skipped ({reason})"),
    }
    println!();
    println!("[system]");
    println!("{}", request.system_instruction);
    println!();
    println!("[user]");
    println!("{}", request.user_prompt);

    Ok(())
}
