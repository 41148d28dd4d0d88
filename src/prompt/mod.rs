pub mod templates;

use serde::Serialize;

use crate::analysis::Player;
use crate::annotate::gather::MoveContext;

pub use templates::{supported_languages, template_for, LanguageTemplate, DEFAULT_LANGUAGE};

/// Placeholder for values the engine did not report.
pub const UNKNOWN: &str = "?";

/// A rendered prompt, ready for the provider. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentaryRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    /// Code of the template actually used, after fallback.
    pub language_code: String,
}

/// Render the system instruction and user prompt for one move.
pub fn render(context: &MoveContext, language_code: &str) -> CommentaryRequest {
    let template = template_for(language_code);
    let player = match context.player {
        Player::Black => template.black,
        Player::White => template.white,
    };

    let mut prompt = String::new();

    prompt.push_str(&fill(
        template.header,
        &[
            ("move", context.move_number.to_string()),
            ("player", player.to_string()),
            ("coord", context.played_coordinate.clone()),
        ],
    ));

    prompt.push(' ');
    prompt.push_str(&fill(
        template.winrate,
        &[
            ("player", player.to_string()),
            (
                "direction",
                direction(template, Some(context.winrate_before), Some(context.winrate_after))
                    .to_string(),
            ),
            ("before", percent(context.winrate_before)),
            ("after", percent(context.winrate_after)),
            ("swing", percent(context.winrate_swing())),
        ],
    ));

    prompt.push(' ');
    prompt.push_str(&fill(
        template.score,
        &[
            ("player", player.to_string()),
            (
                "direction",
                direction(template, context.score_mean_before, context.score_mean_after)
                    .to_string(),
            ),
            ("delta", optional(context.score_swing(), points)),
            ("prev", optional(context.score_mean_before, points)),
            ("cur", optional(context.score_mean_after, points)),
        ],
    ));

    prompt.push(' ');
    prompt.push_str(&fill(
        template.alternative,
        &[
            (
                "alt",
                context
                    .alternative_coordinate
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            ),
            ("alt_winrate", optional(context.alternative_winrate, percent)),
            (
                "visits",
                context
                    .visit_count
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            ),
        ],
    ));

    prompt.push(' ');
    prompt.push_str(template.request);

    CommentaryRequest {
        system_instruction: template.system.to_string(),
        user_prompt: prompt,
        language_code: template.code.to_string(),
    }
}

/// A probability as a percentage with one decimal: 0.5420 -> "54.2".
pub fn percent(value: f64) -> String {
    one_decimal(value * 100.0)
}

/// A point value with one decimal.
pub fn points(value: f64) -> String {
    one_decimal(value)
}

fn one_decimal(value: f64) -> String {
    let s = format!("{value:.1}");
    if s == "-0.0" {
        "0.0".to_string()
    } else {
        s
    }
}

fn optional(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| UNKNOWN.to_string())
}

fn direction(template: &LanguageTemplate, before: Option<f64>, after: Option<f64>) -> &'static str {
    match (before, after) {
        (Some(b), Some(a)) if a > b => template.increased,
        (Some(b), Some(a)) if a < b => template.decreased,
        _ => template.changed,
    }
}

fn fill(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> MoveContext {
        MoveContext {
            move_number: 5,
            player: Player::Black,
            played_coordinate: "D4".to_string(),
            winrate_before: 0.4810,
            winrate_after: 0.5420,
            score_mean_before: Some(0.2),
            score_mean_after: Some(1.8),
            alternative_coordinate: Some("Q16".to_string()),
            alternative_winrate: Some(0.55),
            visit_count: Some(1600),
        }
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(0.5420), "54.2");
        assert_eq!(percent(0.0), "0.0");
        assert_eq!(percent(1.0), "100.0");
        assert_eq!(percent(0.016), "1.6");
    }

    #[test]
    fn test_points_formatting() {
        assert_eq!(points(1.6), "1.6");
        assert_eq!(points(-2.26), "-2.3");
        assert_eq!(points(-0.01), "0.0");
    }

    #[test]
    fn test_english_prompt() {
        let request = render(&make_context(), "en");
        assert_eq!(request.language_code, "en");
        assert_eq!(
            request.user_prompt,
            "Move 5: Black played D4. \
             Black's winrate increased from 48.1% to 54.2% (swing: 6.1%). \
             Black's score lead increased by 1.6 points (from 0.2 to 1.8). \
             The engine preferred Q16 (55.0% winrate) after 1600 visits. \
             Explain briefly why this move matters and the strategic idea behind it."
        );
        assert!(request.system_instruction.contains("1-3 short sentences"));
        assert!(request.system_instruction.contains("no markdown"));
    }

    #[test]
    fn test_score_delta_is_absolute() {
        let mut ctx = make_context();
        ctx.player = Player::White;
        ctx.score_mean_before = Some(3.0);
        ctx.score_mean_after = Some(-0.5);
        let request = render(&ctx, "en");
        assert!(request
            .user_prompt
            .contains("White's score lead decreased by 3.5 points (from 3.0 to -0.5)."));
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let mut ctx = make_context();
        ctx.score_mean_after = None;
        ctx.alternative_coordinate = None;
        ctx.alternative_winrate = None;
        ctx.visit_count = None;
        let request = render(&ctx, "en");
        assert!(request
            .user_prompt
            .contains("score lead changed by ? points (from 0.2 to ?)."));
        assert!(request
            .user_prompt
            .contains("The engine preferred ? (?% winrate) after ? visits."));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let ctx = make_context();
        let fallback = render(&ctx, "xx");
        assert_eq!(fallback, render(&ctx, "en"));
        assert_eq!(fallback.language_code, "en");
    }

    #[test]
    fn test_localized_prompts() {
        let ctx = make_context();

        let ru = render(&ctx, "ru");
        assert!(ru.system_instruction.starts_with("Вы"));
        assert!(ru.user_prompt.starts_with("Ход 5: Чёрные, D4."));
        assert!(ru.user_prompt.contains("рост на 1.6 очка"));

        let uk = render(&ctx, "uk");
        assert!(uk.system_instruction.starts_with("Ви"));
        assert!(uk.user_prompt.contains("Чорні"));

        let zh = render(&ctx, "zh");
        assert!(zh.user_prompt.starts_with("第5手：黑棋 D4。"));
        assert!(zh.user_prompt.contains("54.2%"));

        let ja = render(&ctx, "ja");
        assert!(ja.user_prompt.contains("黒の勝率が48.1%から54.2%に変化"));
    }

    #[test]
    fn test_no_placeholder_left_unfilled() {
        let ctx = make_context();
        for code in supported_languages() {
            let request = render(&ctx, code);
            assert!(
                !request.user_prompt.contains('{'),
                "{code}: {}",
                request.user_prompt
            );
        }
    }
}
