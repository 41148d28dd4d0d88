use crate::analysis::Point;

/// Token used for a pass move.
pub const PASS: &str = "pass";

/// Largest board the letter-number notation can address (A..Z without I).
pub const MAX_BOARD_SIZE: u8 = 25;

/// Column letter in Go notation, which skips `I`.
pub fn column_letter(column: u8) -> Option<char> {
    if column >= MAX_BOARD_SIZE {
        return None;
    }
    let offset = if column >= 8 { column + 1 } else { column };
    Some(char::from(b'A' + offset))
}

/// Render a played point as e.g. `D4`, or `pass` for `None`.
///
/// Row 0 is the top edge, so the printed number counts up from the bottom.
/// Returns `None` when the point lies outside the board.
pub fn format_point(point: Option<Point>, board_size: u8) -> Option<String> {
    let Some(point) = point else {
        return Some(PASS.to_string());
    };
    if board_size == 0 || board_size > MAX_BOARD_SIZE {
        return None;
    }
    if point.column() >= board_size || point.row() >= board_size {
        return None;
    }
    let letter = column_letter(point.column())?;
    let number = u32::from(board_size) - u32::from(point.row());
    Some(format!("{letter}{number}"))
}
