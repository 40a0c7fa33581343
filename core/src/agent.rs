use alloc::vec::Vec;

use ndarray::Array3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Move an automated player can make on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal,
    Flag,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Reveal, Action::Flag];

    const fn index(self) -> usize {
        match self {
            Self::Reveal => 0,
            Self::Flag => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Probability of picking a random action instead of the best known one.
    pub epsilon: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.9,
        }
    }
}

/// Action values indexed by `(row, col, action)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Array3<f64>,
}

impl QTable {
    pub fn new(size: Coord) -> Self {
        let size = usize::from(size);
        Self {
            values: Array3::zeros((size, size, Action::ALL.len())),
        }
    }

    pub fn get(&self, (row, col): Coord2, action: Action) -> f64 {
        self.values[[row.into(), col.into(), action.index()]]
    }

    fn get_mut(&mut self, (row, col): Coord2, action: Action) -> &mut f64 {
        &mut self.values[[row.into(), col.into(), action.index()]]
    }

    /// Highest-valued action for `state`, ties go to [`Action::Reveal`].
    pub fn best_action(&self, state: Coord2) -> Action {
        if self.get(state, Action::Flag) > self.get(state, Action::Reveal) {
            Action::Flag
        } else {
            Action::Reveal
        }
    }

    pub fn best_value(&self, state: Coord2) -> f64 {
        self.get(state, Action::Reveal)
            .max(self.get(state, Action::Flag))
    }
}

/// Tabular Q-learning over tile positions. Exploration draws from its own seeded generator.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    q_table: QTable,
    rng: SmallRng,
}

impl QLearningAgent {
    pub fn new(size: Coord, config: AgentConfig, seed: u64) -> Self {
        Self {
            config,
            q_table: QTable::new(size),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> AgentConfig {
        self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn choose_action(&mut self, state: Coord2) -> Action {
        if self.rng.random::<f64>() < self.config.epsilon {
            if self.rng.random_bool(0.5) {
                Action::Reveal
            } else {
                Action::Flag
            }
        } else {
            self.q_table.best_action(state)
        }
    }

    pub fn update(&mut self, state: Coord2, action: Action, reward: f64, next_state: Coord2) {
        let AgentConfig { alpha, gamma, .. } = self.config;
        let target = reward + gamma * self.q_table.best_value(next_state);
        let value = self.q_table.get_mut(state, action);
        *value += alpha * (target - *value);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The game was already over, nothing was played.
    Finished(GameState),
    /// Opening move on a fresh board, made without consulting the agent.
    Opened {
        coords: Coord2,
        outcome: RevealOutcome,
    },
    /// The agent picked `action` for `coords`, which revealed `revealed` tiles.
    Acted {
        coords: Coord2,
        action: Action,
        revealed: CellCount,
    },
    /// Every remaining tile carried a flag, so one was lifted to keep play going.
    Unflagged(Coord2),
}

/// Plays a game one move at a time through the controller's reveal and flag operations.
#[derive(Clone, Debug)]
pub struct Autoplayer {
    agent: QLearningAgent,
    opening: Coord2,
}

impl Autoplayer {
    pub fn new(agent: QLearningAgent) -> Self {
        Self {
            agent,
            opening: (0, 0),
        }
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn step(&mut self, game: &mut Game) -> Result<StepOutcome> {
        if game.is_finished() {
            return Ok(StepOutcome::Finished(game.state()));
        }

        if !game.has_started() && !game.grid()[self.opening].is_flagged() {
            let outcome = game.reveal(self.opening)?;
            log::debug!("Opening move at {:?}: {:?}", self.opening, outcome);
            return Ok(StepOutcome::Opened {
                coords: self.opening,
                outcome,
            });
        }

        let candidates: Vec<Coord2> = game
            .grid()
            .iter()
            .filter(|(_, tile)| !tile.is_revealed() && !tile.is_flagged())
            .map(|(coords, _)| coords)
            .take(2)
            .collect();

        let Some(&state) = candidates.first() else {
            // an unfinished game always has a hidden tile left, here every one of them is flagged
            let flagged = game
                .grid()
                .iter()
                .find(|(_, tile)| !tile.is_revealed() && tile.is_flagged())
                .map(|(coords, _)| coords);
            debug_assert!(flagged.is_some(), "unfinished game without hidden tiles");
            let Some(coords) = flagged else {
                return Ok(StepOutcome::Finished(game.state()));
            };
            game.toggle_flag(coords)?;
            log::debug!("All hidden tiles flagged, lifted flag at {:?}", coords);
            return Ok(StepOutcome::Unflagged(coords));
        };
        let next_state = candidates.get(1).copied().unwrap_or(state);

        let before = game.tiles_to_reveal();
        let action = self.agent.choose_action(state);
        match action {
            Action::Reveal => {
                if game.reveal(state)? == RevealOutcome::HitBomb {
                    log::debug!("Agent revealed a bomb at {:?}", state);
                    return Ok(StepOutcome::Acted {
                        coords: state,
                        action,
                        revealed: 0,
                    });
                }
            }
            Action::Flag => {
                game.toggle_flag(state)?;
            }
        }

        let revealed = before - game.tiles_to_reveal();
        self.agent
            .update(state, action, f64::from(revealed), next_state);
        log::debug!(
            "Agent chose {:?} at {:?}, revealed {} tiles",
            action,
            state,
            revealed
        );
        Ok(StepOutcome::Acted {
            coords: state,
            action,
            revealed,
        })
    }
}
