use crate::analysis::{MoveAnalysis, Player};
use crate::annotate::coord;
use crate::error::analysis_error::InvalidAnalysisSnafu;
use crate::error::AnalysisError;

/// Provider-independent description of one candidate key move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveContext {
    pub move_number: u32,
    pub player: Player,
    pub played_coordinate: String,
    pub winrate_before: f64,
    pub winrate_after: f64,
    pub score_mean_before: Option<f64>,
    pub score_mean_after: Option<f64>,
    pub alternative_coordinate: Option<String>,
    pub alternative_winrate: Option<f64>,
    pub visit_count: Option<u64>,
}

impl MoveContext {
    pub fn winrate_swing(&self) -> f64 {
        (self.winrate_after - self.winrate_before).abs()
    }

    /// Absolute score-mean change, when both sides of the move report one.
    pub fn score_swing(&self) -> Option<f64> {
        match (self.score_mean_before, self.score_mean_after) {
            (Some(before), Some(after)) => Some((after - before).abs()),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.played_coordinate == coord::PASS
    }
}

/// Build the move context from the collaborator's analysis record.
pub fn build_context(analysis: &MoveAnalysis) -> Result<MoveContext, AnalysisError> {
    let move_number = analysis.move_number;
    snafu::ensure!(
        move_number >= 1,
        InvalidAnalysisSnafu {
            move_number,
            message: "move numbers start at 1",
        }
    );

    let winrate_before = checked_winrate(move_number, "before", analysis.before.winrate)?;
    let winrate_after = checked_winrate(move_number, "after", analysis.after.winrate)?;

    let played_coordinate = coord::format_point(analysis.played, analysis.board_size)
        .ok_or_else(|| {
            InvalidAnalysisSnafu {
                move_number,
                message: format!(
                    "played point {:?} is outside a {}x{} board",
                    analysis.played, analysis.board_size, analysis.board_size
                ),
            }
            .build()
        })?;

    // Best candidate the player did not choose.
    let alternative = analysis
        .candidates
        .iter()
        .find(|c| c.point != analysis.played)
        .and_then(|c| {
            let coordinate = coord::format_point(c.point, analysis.board_size)?;
            Some((coordinate, finite(c.winrate)))
        });
    let (alternative_coordinate, alternative_winrate) = match alternative {
        Some((coordinate, winrate)) => (Some(coordinate), winrate),
        None => (None, None),
    };

    let visit_count = analysis.before.visits.or_else(|| {
        if analysis.candidates.is_empty() {
            None
        } else {
            Some(analysis.candidates.iter().map(|c| c.visits).sum())
        }
    });

    Ok(MoveContext {
        move_number,
        player: analysis.player,
        played_coordinate,
        winrate_before,
        winrate_after,
        score_mean_before: analysis.before.score_mean.and_then(finite),
        score_mean_after: analysis.after.score_mean.and_then(finite),
        alternative_coordinate,
        alternative_winrate,
        visit_count,
    })
}

fn checked_winrate(move_number: u32, which: &str, value: f64) -> Result<f64, AnalysisError> {
    snafu::ensure!(
        value.is_finite() && (0.0..=1.0).contains(&value),
        InvalidAnalysisSnafu {
            move_number,
            message: format!("winrate {which} the move is {value}, expected a value in [0, 1]"),
        }
    );
    Ok(value)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
