//! Pure mapping from game state to display frames.

use crate::config::Layout;
use crate::frame::{Frame, COLUMNS};
use crate::glyph::{Glyph, Pose};
use crate::state::GameState;

const BANNER: &str = "   GAME  OVER   ";
/// Columns reserved for the score at the end of the sky lane
const LANE_SCORE_WIDTH: usize = 4;
const LANE_SCORE_MAX: u32 = 9999;
const SUMMARY_SCORE_MAX: u32 = 999;
const SUMMARY_SECONDS_MAX: u32 = 999;

/// Frame of a running game
pub fn render(state: &GameState, layout: Layout) -> Frame {
    let mut frame = Frame::blank();
    let airborne = state.jump().is_airborne();
    let runner = if airborne {
        Glyph::Runner(Pose::Airborne)
    } else if state.stride() {
        Glyph::Runner(Pose::RightStride)
    } else {
        Glyph::Runner(Pose::LeftStride)
    };

    for (col, cell) in state.world().cells().enumerate().take(COLUMNS) {
        frame.put(1, col, Glyph::from(cell));
    }

    match layout {
        Layout::ScoreBar => {
            frame.write_str(0, 0, "SCORE");
            frame.write_number(0, COLUMNS - 5, state.score() as u32, 5, b' ');
            frame.put(1, 0, runner);
        }
        Layout::SkyLane => {
            let score = (state.score() as u32).min(LANE_SCORE_MAX);
            let col = COLUMNS - LANE_SCORE_WIDTH;
            frame.write_number(0, col, score, LANE_SCORE_WIDTH, b' ');
            if airborne {
                frame.put(0, 0, runner);
            } else {
                frame.put(1, 0, runner);
            }
        }
    }
    frame
}

/// First game-over screen
pub fn game_over_banner() -> Frame {
    let mut frame = Frame::blank();
    frame.write_str(0, 0, BANNER);
    frame
}

/// Second game-over screen, score and survived seconds under the banner
pub fn summary(score: u16, seconds: u32) -> Frame {
    let mut frame = game_over_banner();
    frame.write_str(1, 0, "SCORE:");
    frame.write_number(1, 6, (score as u32).min(SUMMARY_SCORE_MAX), 3, b' ');
    frame.write_str(1, 10, "T:");
    frame.write_number(1, 12, seconds.min(SUMMARY_SECONDS_MAX), 3, b' ');
    frame.write_str(1, 15, "s");
    frame
}
