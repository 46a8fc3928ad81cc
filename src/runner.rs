use log::{debug, info, trace};

use crate::collision::{judge, Verdict};
use crate::config::Config;
use crate::context::Context;
use crate::frame::Frame;
use crate::render;
use crate::signals::Signals;
use crate::state::{GameState, RunState};

/// Silence between the two game-over chirps
const CHIRP_GAP_MS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Collision,
}

/// Result of a finished run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: u16,
    pub seconds: u32,
}

pub struct Runner<'a, C: Context> {
    pub ctx: C,
    signals: &'a Signals,
    config: Config,
    state: GameState,
}

impl<'a, C: Context> Runner<'a, C> {
    /// `config` is expected to be validated, see `Builder`
    pub(crate) fn new(ctx: C, signals: &'a Signals, config: Config) -> Self {
        Self {
            ctx,
            signals,
            state: GameState::new(&config),
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn signals(&self) -> &'a Signals {
        self.signals
    }

    /// Play forever, restarting after each game over
    pub fn run(&mut self) -> ! {
        loop {
            if self.tick() == Outcome::Collision {
                self.game_over();
            }
        }
    }

    /// One frame: scroll, jump, draw, judge, then wait
    ///
    /// Once a collision was reported the game stays frozen until `game_over`
    /// or `restart` is called.
    pub fn tick(&mut self) -> Outcome {
        if self.state.run == RunState::GameOver {
            return Outcome::Collision;
        }

        let trial = !self.state.world.last_was_obstacle()
            && self.config.obstacle_chance.hits(self.ctx.gen_random());
        self.state.world.scroll(trial);
        self.update_jump();
        self.state.stride = !self.state.stride;

        let frame = render::render(&self.state, self.config.layout);
        trace!("tick\n{}", frame);
        self.ctx.on_frame(&frame);

        match judge(self.state.world.at_player(), self.state.jump) {
            Verdict::Collision => {
                self.state.run = RunState::GameOver;
                return Outcome::Collision;
            }
            Verdict::Cleared => self.state.score = self.state.score.saturating_add(1),
            Verdict::Nothing => {}
        }

        let wait = self.state.difficulty.update(self.signals.elapsed_ms());
        self.ctx.delay_ms(wait);
        Outcome::Running
    }

    /// Land or keep falling, then take off if the button was pressed on the ground
    ///
    /// The latch is drained every tick, so a press made in the air is dropped
    /// rather than starting a new jump on landing.
    fn update_jump(&mut self) {
        let was_airborne = self.state.jump.is_airborne();
        self.state.jump.advance();
        let pressed = self.signals.take_jump_request();
        if pressed && !was_airborne && self.state.jump.request(self.config.jump_ticks) {
            debug!("jump accepted at {}ms", self.signals.elapsed_ms());
        }
    }

    /// Announce the end of a run, wait for the restart button and start over
    pub fn game_over(&mut self) -> Summary {
        self.state.run = RunState::GameOver;
        let summary = Summary {
            score: self.state.score,
            seconds: self.signals.elapsed_ms() / 1000,
        };
        info!(
            "game over: score {}, survived {}s",
            summary.score, summary.seconds
        );

        self.chirp(&render::game_over_banner());
        self.ctx.delay_ms(CHIRP_GAP_MS);
        self.chirp(&render::summary(summary.score, summary.seconds));

        self.await_restart();
        self.restart();
        summary
    }

    /// Show a frame while the game-over tone sounds
    fn chirp(&mut self, frame: &Frame) {
        self.signals.set_tone_request(true);
        self.ctx.on_frame(frame);
        self.ctx.delay_ms(self.config.game_over_tone_ms);
        self.signals.set_tone_request(false);
    }

    fn await_restart(&mut self) {
        loop {
            match self.ctx.poll_restart() {
                Ok(()) => return,
                Err(nb::Error::WouldBlock) => self.ctx.wait_for_event(),
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }

    /// Put every piece of state back to its power-on value
    ///
    /// Runs in a critical section, interrupts see either the old or the new state.
    pub fn restart(&mut self) {
        let signals = self.signals;
        let state = &mut self.state;
        critical_section::with(|_| {
            signals.reset();
            state.reset();
        });
        info!("restart");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use crate::assert_rows;
    use crate::config::{Chance, Layout};
    use crate::context::testing::TestingContext;
    use crate::jump::JumpState;
    use crate::world::Cell;

    fn runner(signals: &Signals, config: Config) -> Runner<'_, TestingContext> {
        Runner::new(TestingContext::new(0), signals, config)
    }

    fn quiet() -> Config {
        let mut config = Config::classic();
        config.obstacle_chance = Chance::never();
        config
    }

    #[test]
    fn empty_world_stays_empty() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        for _ in 0..16 {
            assert_eq!(runner.tick(), Outcome::Running);
        }
        assert!(runner.state().world().cells().all(|c| c == Cell::Empty));
        assert_eq!(runner.state().world().len(), 16);
        assert_eq!(runner.state().score(), 0);
        assert_eq!(runner.ctx.frames().len(), 16);
        assert_eq!(runner.ctx.delays(), &[300; 16][..]);
    }

    #[test]
    fn always_succeeding_trials_alternate() {
        let signals = Signals::new();
        let mut config = Config::classic();
        config.obstacle_chance = Chance::always();
        let mut runner = runner(&signals, config);
        for _ in 0..15 {
            assert_eq!(runner.tick(), Outcome::Running);
        }
        let expected = (0..16).map(|i| {
            if i % 2 == 1 {
                Cell::Obstacle
            } else {
                Cell::Empty
            }
        });
        assert!(runner.state().world().cells().eq(expected));
        // the first obstacle reaches the player on the next tick
        assert_eq!(runner.tick(), Outcome::Collision);
        assert_eq!(runner.state().run_state(), RunState::GameOver);
    }

    #[test]
    fn jump_clears_obstacle_and_scores() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        runner.state.world.place(2, Cell::Obstacle);

        assert_eq!(runner.tick(), Outcome::Running);
        assert_eq!(runner.state().world().cell(1), Some(Cell::Obstacle));
        signals.on_jump_edge();

        assert_eq!(runner.tick(), Outcome::Running);
        assert_eq!(runner.state().world().at_player(), Cell::Obstacle);
        assert_eq!(runner.state().jump(), JumpState::Airborne(2));
        assert_eq!(runner.state().score(), 1);

        assert_eq!(runner.tick(), Outcome::Running);
        assert_eq!(runner.state().jump(), JumpState::Airborne(1));
        assert_eq!(runner.state().score(), 1);

        assert_eq!(runner.tick(), Outcome::Running);
        assert_eq!(runner.state().jump(), JumpState::Grounded);
    }

    #[test]
    fn grounded_on_obstacle_collides() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        runner.state.world.place(1, Cell::Obstacle);
        assert_eq!(runner.tick(), Outcome::Collision);
        assert_eq!(runner.state().score(), 0);
        // frozen until restarted
        assert_eq!(runner.tick(), Outcome::Collision);
        assert_eq!(runner.ctx.frames().len(), 1);
        assert!(runner.ctx.delays().is_empty());
    }

    #[test]
    fn jump_request_while_airborne_ignored() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        signals.on_jump_edge();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Airborne(2));
        signals.on_jump_edge();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Airborne(1));
        assert!(!signals.jump_pending());
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Grounded);
    }

    #[test]
    fn press_on_last_airborne_tick_does_not_relaunch() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        signals.on_jump_edge();
        runner.tick();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Airborne(1));

        signals.on_jump_edge();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Grounded);
        assert!(!signals.jump_pending());

        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Grounded);
    }

    #[test]
    fn press_after_landing_jumps_again() {
        let signals = Signals::new();
        let mut config = quiet();
        config.jump_ticks = 1;
        let mut runner = runner(&signals, config);
        signals.on_jump_edge();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Airborne(1));
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Grounded);
        signals.on_jump_edge();
        runner.tick();
        assert_eq!(runner.state().jump(), JumpState::Airborne(1));
    }

    #[test]
    fn stride_alternates() {
        let signals = Signals::new();
        let mut config = quiet();
        config.layout = Layout::ScoreBar;
        let mut runner = runner(&signals, config);
        runner.tick();
        runner.tick();
        let frames = runner.ctx.frames();
        assert_eq!(frames[0].glyph(1, 0).map(|g| g.to_char()), Some('b'));
        assert_eq!(frames[1].glyph(1, 0).map(|g| g.to_char()), Some('d'));
    }

    #[test]
    fn wait_shrinks_with_elapsed_time() {
        let signals = Signals::new();
        let mut runner = runner(&signals, quiet());
        runner.tick();
        for _ in 0..3000 {
            signals.on_millisecond();
        }
        runner.tick();
        runner.tick();
        assert_eq!(runner.ctx.delays(), &[300, 290, 290]);
        assert_eq!(runner.state().wait_ms(), 290);
    }

    #[test]
    fn game_over_sequence_and_restart() {
        let signals = Signals::new();
        let mut runner = Runner::new(TestingContext::new(1).restart_after(3), &signals, quiet());
        let fresh = *runner.state();

        runner.state.world.place(3, Cell::Obstacle);
        runner.state.score = 4;
        signals.on_jump_edge();
        for _ in 0..3000 {
            signals.on_millisecond();
        }
        runner.tick();
        runner.tick();
        assert_eq!(runner.tick(), Outcome::Collision);

        for _ in 0..2500 {
            signals.on_millisecond();
        }
        signals.on_jump_edge();
        let summary = runner.game_over();
        assert_eq!(
            summary,
            Summary {
                score: 4,
                seconds: 5
            }
        );

        let frames = runner.ctx.frames();
        let n = frames.len();
        assert_rows!(frames[n - 2], "   GAME  OVER   ", "                ");
        assert_rows!(frames[n - 1], "   GAME  OVER   ", "SCORE:  4 T:  5s");
        assert_eq!(runner.ctx.events(), 3);
        assert_eq!(runner.ctx.polls(), 4);

        assert_eq!(runner.state(), &fresh);
        assert_eq!(signals.elapsed_ms(), 0);
        assert!(!signals.tone_requested());
        assert!(!signals.jump_pending());
    }

    #[test]
    fn chirps_hold_tone_request() {
        struct Probe<'s> {
            signals: &'s Signals,
            toned_frames: usize,
            toned_delays: usize,
        }

        impl Context for Probe<'_> {
            fn on_frame(&mut self, _: &Frame) {
                if self.signals.tone_requested() {
                    self.toned_frames += 1;
                }
            }
            fn delay_ms(&mut self, _: u32) {
                if self.signals.tone_requested() {
                    self.toned_delays += 1;
                }
            }
            fn poll_restart(&mut self) -> nb::Result<(), Infallible> {
                Ok(())
            }
            fn wait_for_event(&mut self) {}
            fn gen_random(&mut self) -> u8 {
                0
            }
        }

        let signals = Signals::new();
        let probe = Probe {
            signals: &signals,
            toned_frames: 0,
            toned_delays: 0,
        };
        let mut runner = Runner::new(probe, &signals, quiet());
        runner.game_over();
        assert_eq!(runner.ctx.toned_frames, 2);
        assert_eq!(runner.ctx.toned_delays, 2);
        assert!(!signals.tone_requested());
    }
}
