use serde::{Deserialize, Serialize};

use crate::annotate::gather::MoveContext;

/// Which evaluation swing decides whether a move is a key move.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMetric {
    /// Winrate swing in percentage points.
    Winrate,
    /// Score-mean swing in board points.
    #[default]
    ScoreMean,
}

impl std::fmt::Display for TriggerMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerMetric::Winrate => write!(f, "winrate"),
            TriggerMetric::ScoreMean => write!(f, "score-mean"),
        }
    }
}

/// Decision from pre-LLM filtering.
#[derive(Debug, PartialEq)]
pub enum FilterDecision {
    /// Key move: request commentary.
    Comment { delta: f64 },
    /// Not worth a remote call.
    Skip(String),
}

/// A move is key when its swing reaches the threshold. The boundary is inclusive.
pub fn should_comment(delta: f64, threshold: f64) -> bool {
    delta >= threshold
}

/// Swing of `context` measured in the unit of `metric`.
pub fn swing(context: &MoveContext, metric: TriggerMetric) -> Option<f64> {
    match metric {
        TriggerMetric::Winrate => Some(context.winrate_swing() * 100.0),
        TriggerMetric::ScoreMean => context.score_swing(),
    }
}

/// Check whether this move should get commentary.
pub fn pre_llm_filter(
    context: &MoveContext,
    metric: TriggerMetric,
    threshold: f64,
) -> FilterDecision {
    let Some(delta) = swing(context, metric) else {
        return FilterDecision::Skip(format!("no {metric} data for move {}", context.move_number));
    };

    if should_comment(delta, threshold) {
        FilterDecision::Comment { delta }
    } else {
        FilterDecision::Skip(format!(
            "{metric} swing {delta:.2} below threshold {threshold:.2}"
        ))
    }
}
