/// Points for an answer the referee accepts.
pub const CORRECT_POINTS: i32 = 10;
/// Points for an answer the referee rejects.
pub const WRONG_POINTS: i32 = -5;

/// Score change for a refereed claim.
pub fn verdict_points(correct: bool) -> i32 {
    if correct { CORRECT_POINTS } else { WRONG_POINTS }
}
