//! Game state machine (or handler) of the squares pool: the core of this lib.

use log::debug;
use rand::RngCore;

use crate::config::{ConfigRecord, SquaresConfig};
use crate::errors::{HandleError, HandleResult};
use crate::essential::{GameEvent, GridState, ParticipantLedger, PayoutSplit, GRID_BOXES};
use crate::grid;
use crate::pool::PoolBreakdown;
use crate::storage::PersistenceGateway;

/// The starter roster seeded on a first run with nothing in storage.
const STARTER_ROSTER: [(&str, u32); 4] =
    [("Alice", 25), ("Bob", 25), ("Charlie", 25), ("Dan", 25)];

/// Side-effect ports handed to the handler per event: the wall clock,
/// the random source and the persistence gateway.  Everything else in
/// event handling is a pure state transition.
pub struct Effect<'a> {
    pub timestamp: u64,
    pub rng: &'a mut dyn RngCore,
    pub gateway: &'a mut PersistenceGateway,
}

// Squares: the application state
#[derive(Debug, PartialEq, Clone)]
pub struct Squares {
    pub ledger: ParticipantLedger,
    pub team_top: String,
    pub team_left: String,
    pub box_price: String,
    pub payout_split: PayoutSplit,
    pub use_vig: bool,
    pub vig_percent: String,
    pub custom_split_inputs: [String; 4],
    pub grid: Option<GridState>,
}

impl Default for Squares {
    fn default() -> Self {
        Self::from_config(SquaresConfig::default())
    }
}

// Methods that mutate or query the state
impl Squares {
    pub fn from_config(config: SquaresConfig) -> Self {
        let SquaresConfig {
            participants,
            team_top,
            team_left,
            box_price,
            payout_split,
            use_vig,
            vig_percent,
            custom_split_inputs,
        } = config;
        Self {
            ledger: ParticipantLedger::new(participants),
            team_top,
            team_left,
            box_price,
            payout_split,
            use_vig,
            vig_percent,
            custom_split_inputs,
            grid: None,
        }
    }

    /// Restore from storage, or start with the demo roster.  Re-saves
    /// immediately so the gateway fingerprint is primed for the session.
    pub fn init_state(gateway: &mut PersistenceGateway) -> Self {
        let mut state = match gateway.load_config() {
            Some(record) => Self::from_config(SquaresConfig::from(&record)),
            None => {
                let mut state = Self::default();
                for (name, count) in STARTER_ROSTER {
                    state.ledger.add_row(name, count);
                }
                state
            }
        };
        // Always keep at least one row on screen for editing.
        if state.ledger.rows.is_empty() {
            state.ledger.add_row("", 0);
        }
        gateway.save_config(&state.config_record());
        state
    }

    /// The configuration as the form would save it.
    pub fn config_for_save(&self) -> SquaresConfig {
        SquaresConfig {
            participants: self.ledger.rows_for_save(),
            team_top: self.team_top.clone(),
            team_left: self.team_left.clone(),
            box_price: self.box_price.clone(),
            payout_split: self.payout_split,
            use_vig: self.use_vig,
            vig_percent: self.vig_percent.clone(),
            custom_split_inputs: self.custom_split_inputs.clone(),
        }
    }

    pub fn config_record(&self) -> ConfigRecord {
        ConfigRecord::from(&self.config_for_save())
    }

    /// Current derived totals, recomputed from scratch.
    pub fn breakdown(&self) -> PoolBreakdown {
        PoolBreakdown::compute(
            &self.ledger.list_active(),
            &self.box_price,
            self.use_vig,
            &self.vig_percent,
            &self.payout_split,
        )
    }

    /// Re-attach the stored grid when it still matches the current
    /// configuration.
    pub fn restore_grid(&mut self, gateway: &PersistenceGateway) {
        self.grid = gateway.load_grid_if_matching(&self.config_record());
    }

    /// Explicit event dispatch.  Every configuration-changing arm
    /// persists the configuration before returning, so the generation
    /// precondition is always checked against saved state.
    pub fn handle_event(&mut self, effect: &mut Effect, event: GameEvent) -> HandleResult<()> {
        match event {
            GameEvent::AddRow => self.ledger.add_row("", 0),
            GameEvent::RemoveRow(index) => self.ledger.remove_row(index),
            GameEvent::EditRow { index, name, count } => {
                self.ledger.edit_row(index, &name, &count)
            }
            GameEvent::FillRemaining => self.ledger.fill_remaining()?,
            GameEvent::SetTeamTop(name) => self.team_top = name,
            GameEvent::SetTeamLeft(name) => self.team_left = name,
            GameEvent::SetBoxPrice(price) => self.box_price = price,
            GameEvent::SelectSplit(split) => self.payout_split = split,
            GameEvent::ApplyCustomSplit { q1, q2, q3, q4 } => {
                let inputs = [q1, q2, q3, q4];
                self.payout_split = PayoutSplit::from_custom_inputs(&inputs)?;
                self.custom_split_inputs = inputs;
            }
            GameEvent::SetVig(enabled) => self.use_vig = enabled,
            GameEvent::SetVigPercent(percent) => self.vig_percent = percent,
            GameEvent::Generate => return self.generate(effect),
        }
        effect.gateway.save_config(&self.config_record());
        Ok(())
    }

    // Precondition checks run against a fresh breakdown; no grid state
    // is touched unless generation fully succeeds.
    fn generate(&mut self, effect: &mut Effect) -> HandleResult<()> {
        let breakdown = self.breakdown();
        if breakdown.total_boxes != GRID_BOXES {
            return Err(HandleError::InvalidBoxCount {
                total: breakdown.total_boxes,
            });
        }
        if breakdown.payout_pool <= 0.0 {
            return Err(HandleError::EmptyPayoutPool);
        }

        let grid = grid::generate(
            &self.ledger.list_active(),
            &self.team_top,
            &self.team_left,
            effect.rng,
        )?;
        effect.gateway.save_grid(&grid, effect.timestamp);
        debug!("grid generated at {}", effect.timestamp);
        self.grid = Some(grid);
        Ok(())
    }
}
