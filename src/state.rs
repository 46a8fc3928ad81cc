use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::jump::JumpState;
use crate::world::World;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    GameOver,
}

/// Everything the game loop mutates
///
/// The elapsed clock is not part of it, it belongs to the interrupt side
/// (see [`Signals`](crate::signals::Signals)).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) world: World,
    pub(crate) jump: JumpState,
    pub(crate) score: u16,
    pub(crate) difficulty: Difficulty,
    pub(crate) run: RunState,
    pub(crate) stride: bool,
}

impl GameState {
    /// Power-on state for a `Config` already checked by `Config::validate`
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            world: World::new(config.world_len),
            jump: JumpState::Grounded,
            score: 0,
            difficulty: Difficulty::new(config.pace),
            run: RunState::Running,
            stride: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn jump(&self) -> JumpState {
        self.jump
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    pub fn wait_ms(&self) -> u32 {
        self.difficulty.wait_ms()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    /// Step parity, flips every tick to animate the legs
    pub fn stride(&self) -> bool {
        self.stride
    }

    pub(crate) fn reset(&mut self) {
        self.world.clear();
        self.jump = JumpState::Grounded;
        self.score = 0;
        self.difficulty.reset();
        self.run = RunState::Running;
        self.stride = false;
    }
}
