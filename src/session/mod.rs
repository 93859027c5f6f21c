//! Game session - the single owner of world and player state
//!
//! Commands and clock ticks both go through the session, one at a time.
//! Once a game ends the session computes the final report exactly once and
//! rejects everything until `reset`.

pub mod state;

pub use state::{GameState, TerminalCause};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::command::{parse_command, CommandExecutor, CommandResult, Rejection};
use crate::core::config::GameConfig;
use crate::core::types::Timestamp;
use crate::scoring::FinalReport;
use crate::simulation::tick::{apply_tick, TickOutcome};
use crate::world::graph::LocationGraph;

pub struct Session {
    config: GameConfig,
    graph: LocationGraph,
    state: GameState,
    report: Option<FinalReport>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Start a fresh game
    pub fn new(config: GameConfig, seed: u64, now: Timestamp) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let graph = LocationGraph::generate(&config, &mut rng);
        let state = GameState::new(&config, now);
        tracing::info!("New game started (seed {})", seed);
        Self {
            config,
            graph,
            state,
            report: None,
            rng,
        }
    }

    /// Rebuild a session from loaded parts
    ///
    /// A state that is already terminal gets its report immediately.
    pub fn from_parts(
        config: GameConfig,
        graph: LocationGraph,
        state: GameState,
        seed: u64,
    ) -> Self {
        let report = FinalReport::compute(&state, &graph, &config);
        Self {
            config,
            graph,
            state,
            report,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Statistics of the finished game, if it has finished
    pub fn report(&self) -> Option<&FinalReport> {
        self.report.as_ref()
    }

    /// Advance the clocks to `now`
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        let outcome = apply_tick(&mut self.state, &self.graph, &self.config, now);
        if outcome == TickOutcome::Expired {
            self.finish();
        }
        outcome
    }

    /// Parse and run one line of player input
    ///
    /// The clock is settled first so time already spent is charged to the
    /// current location. If that settles the game, the command is rejected.
    pub fn submit(&mut self, input: &str, now: Timestamp) -> CommandResult {
        if !self.state.active {
            return CommandResult::Rejected(Rejection::GameOver);
        }
        if self.tick(now) == TickOutcome::Expired {
            return CommandResult::Rejected(Rejection::GameOver);
        }

        let command = parse_command(input);
        let result =
            CommandExecutor::execute(&mut self.graph, &mut self.state, &self.config, &command, now);

        if !self.state.active {
            self.finish();
        }
        result
    }

    /// Throw the current game away and start a new one
    pub fn reset(&mut self, now: Timestamp) {
        self.graph = LocationGraph::generate(&self.config, &mut self.rng);
        self.state = GameState::new(&self.config, now);
        self.report = None;
        tracing::info!("Game reset");
    }

    fn finish(&mut self) {
        if self.report.is_some() {
            return;
        }
        self.report = FinalReport::compute(&self.state, &self.graph, &self.config);
        if let Some(report) = &self.report {
            tracing::info!(
                "Game over: {:?}, score {}, rank {:?}",
                report.cause,
                report.score,
                report.rank
            );
        }
    }
}
