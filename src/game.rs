//! Frame driver
//!
//! Owns the simulation state, the live input and the high score, and runs
//! one frame per host animation callback. This is the only place that
//! performs side effects on phase transitions (persisting a new best).

use crate::config::GameConfig;
use crate::highscore::HighScore;
use crate::input::InputState;
use crate::persistence::Storage;
use crate::sim::{GameState, Snapshot, Transition, Viewport, tick};

pub struct Game {
    pub state: GameState,
    pub input: InputState,
    high_score: HighScore,
    storage: Box<dyn Storage>,
}

impl Game {
    /// High score is read from `storage` once, here
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64, storage: Box<dyn Storage>) -> Self {
        let high_score = HighScore::load(storage.as_ref());
        Self {
            state: GameState::new(config, viewport, seed),
            input: InputState::new(),
            high_score,
            storage,
        }
    }

    /// Run one frame at time `now` (seconds)
    pub fn frame(&mut self, now: f64) -> Vec<Transition> {
        let input = self.input.frame();
        let transitions = tick(&mut self.state, &input, now);

        for transition in &transitions {
            if let Transition::Ended { score, .. } = *transition {
                if self.high_score.record(score) {
                    log::info!("New high score: {score:.1}");
                    self.high_score.save(self.storage.as_mut());
                }
            }
        }

        transitions
    }

    pub fn snapshot(&self, now: f64) -> Snapshot {
        Snapshot::capture(&self.state, now, self.high_score.best())
    }

    pub fn high_score(&self) -> Option<f64> {
        self.high_score.best()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Retry from the game-over screen (applied on the next frame)
    pub fn retry(&mut self) {
        self.input.request_reset();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::persistence::MemoryStorage;
    use crate::sim::{EndReason, GamePhase};

    fn game(storage: MemoryStorage) -> Game {
        Game::new(
            GameConfig::default(),
            Viewport::new(800.0, 600.0),
            77,
            Box::new(storage),
        )
    }

    #[test]
    fn test_loads_existing_high_score() {
        let mut storage = MemoryStorage::new();
        HighScore::new(Some(42.0)).save(&mut storage);
        assert_eq!(game(storage).high_score(), Some(42.0));
    }

    #[test]
    fn test_key_starts_and_time_runs_out() {
        let mut game = game(MemoryStorage::new());
        game.state.entities.clear();

        game.input.key_down(Key::ArrowRight);
        game.frame(0.0);
        assert_eq!(game.state.phase, GamePhase::Running);
        game.input.key_up(Key::ArrowRight);

        game.frame(10.0);
        assert_eq!(game.state.phase, GamePhase::Running);
        let transitions = game.frame(30.0);
        assert!(matches!(
            transitions.as_slice(),
            [Transition::Ended {
                reason: EndReason::TimeUp,
                ..
            }]
        ));

        // First finished game always sets a high score, even at zero
        assert_eq!(game.high_score(), Some(0.0));
        assert_eq!(HighScore::load(game.storage()).best(), Some(0.0));
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut storage = MemoryStorage::new();
        HighScore::new(Some(5.0)).save(&mut storage);
        let mut game = game(storage);
        game.state.entities.clear();

        game.input.key_down(Key::Space);
        game.frame(0.0);
        game.state.score = 3.0;
        game.frame(31.0);
        assert_eq!(game.state.phase, GamePhase::PostGame);
        assert_eq!(game.high_score(), Some(5.0));
        assert_eq!(HighScore::load(game.storage()).best(), Some(5.0));
    }

    #[test]
    fn test_retry_returns_to_idle() {
        let mut game = game(MemoryStorage::new());
        game.state.entities.clear();
        game.input.key_down(Key::S);
        game.frame(0.0);
        game.frame(30.0);
        assert_eq!(game.state.phase, GamePhase::PostGame);

        // Keys during the game-over screen do not start a run
        game.input.key_up(Key::S);
        game.input.key_down(Key::S);
        game.frame(31.0);
        assert_eq!(game.state.phase, GamePhase::PostGame);

        game.retry();
        game.frame(32.0);
        assert_eq!(game.state.phase, GamePhase::Idle);
        assert_eq!(game.state.entities.len(), 10);
    }

    #[test]
    fn test_snapshot_carries_high_score() {
        let mut storage = MemoryStorage::new();
        HighScore::new(Some(8.0)).save(&mut storage);
        let game = game(storage);
        assert_eq!(game.snapshot(0.0).high_score, Some(8.0));
    }
}
