use crate::jump::JumpState;
use crate::world::Cell;

/// Result of checking the player's cell at the end of a tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Ran into an obstacle on the ground
    Collision,
    /// Passed over an obstacle in the air, worth one point
    Cleared,
    Nothing,
}

pub fn judge(under_player: Cell, jump: JumpState) -> Verdict {
    match (under_player, jump) {
        (Cell::Obstacle, JumpState::Grounded) => Verdict::Collision,
        (Cell::Obstacle, JumpState::Airborne(_)) => Verdict::Cleared,
        (Cell::Empty, _) => Verdict::Nothing,
    }
}
