use crate::errors::RaffleError;
use crate::oracle::{RandomnessOracle, RandomnessRequest};
use crate::state::events::{RequestedRaffleWinner, WinnerPicked};
use crate::{MAX_PLAYERS, NUM_WORDS};
use anchor_lang::prelude::*;

#[account]
pub struct RaffleInfo {
    pub bump: u8,
    pub vrf: Pubkey,
    pub oracle_queue: Pubkey,
    pub entrance_fee: u64,
    /// Minimum seconds between two draws.
    pub interval: i64,
    pub state: u8,
    pub last_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    /// Correlation id of the outstanding VRF request, 0 when none.
    pub pending_request_id: u128,
    pub round: u64,
    pub players: Vec<Pubkey>,
}

#[derive(Clone, AnchorSerialize, AnchorDeserialize)]
pub struct InitializeRaffleParams {
    pub entrance_fee: u64,
    pub interval: i64,
}

impl InitializeRaffleParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.interval >= 0, RaffleError::InvalidInterval);
        Ok(())
    }
}

/// Why a draw may or may not be triggered right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub time_passed: bool,
    pub is_open: bool,
    pub has_balance: bool,
    pub has_players: bool,
    pub balance: u64,
    pub num_players: u64,
    pub raffle_state: u8,
}

impl UpkeepCheck {
    pub fn upkeep_needed(&self) -> bool {
        self.time_passed && self.is_open && self.has_balance && self.has_players
    }
}

impl RaffleInfo {
    pub const MAX_SIZE: usize = 1 // bump
    + 32 // vrf
    + 32 // oracle_queue
    + 8 // entrance_fee
    + 8 // interval
    + 1 // state
    + 8 // last_timestamp
    + 1 + 32 // recent_winner
    + 16 // pending_request_id
    + 8 // round
    + 4 + (32 * MAX_PLAYERS);

    pub fn init(
        &mut self,
        params: &InitializeRaffleParams,
        vrf: Pubkey,
        oracle_queue: Pubkey,
        bump: u8,
        now: i64,
    ) {
        self.bump = bump;
        self.vrf = vrf;
        self.oracle_queue = oracle_queue;
        self.entrance_fee = params.entrance_fee;
        self.interval = params.interval;
        self.state = RaffleState::Open.to_code();
        self.last_timestamp = now;
        self.recent_winner = None;
        self.pending_request_id = 0;
        self.round = 0;
        self.players = Vec::new();
    }

    pub fn raffle_state(&self) -> Result<RaffleState> {
        Ok(RaffleState::from(self.state)?)
    }

    pub fn add_player(&mut self, player: Pubkey, payment: u64) -> Result<()> {
        require!(
            payment >= self.entrance_fee,
            RaffleError::NotEnoughPaymentSent
        );
        require!(
            self.raffle_state()? == RaffleState::Open,
            RaffleError::RaffleNotOpen
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.players.push(player);
        Ok(())
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        let index = usize::try_from(index).map_err(|_| RaffleError::PlayerIndexOutOfBounds)?;
        self.players
            .get(index)
            .copied()
            .ok_or_else(|| error!(RaffleError::PlayerIndexOutOfBounds))
    }

    pub fn check_upkeep(&self, now: i64, balance: u64) -> UpkeepCheck {
        let elapsed = now.saturating_sub(self.last_timestamp);
        UpkeepCheck {
            time_passed: elapsed >= self.interval,
            is_open: self.state == RaffleState::Open.to_code(),
            has_balance: balance > 0,
            has_players: !self.players.is_empty(),
            balance,
            num_players: self.players.len() as u64,
            raffle_state: self.state,
        }
    }

    /// Re-checks eligibility, closes the round and asks the oracle for randomness.
    pub fn request_draw<O: RandomnessOracle>(
        &mut self,
        oracle: &O,
        now: i64,
        balance: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u128> {
        let check = self.check_upkeep(now, balance);
        if !check.upkeep_needed() {
            msg!(
                "UpkeepNotNeeded: balance {} players {} state {}",
                check.balance,
                check.num_players,
                check.raffle_state
            );
            return err!(RaffleError::UpkeepNotNeeded);
        }

        self.state = RaffleState::Calculating.to_code();
        let request_id = oracle.request_random_words(
            &RandomnessRequest {
                num_words: NUM_WORDS,
            },
            signer_seeds,
        )?;
        self.pending_request_id = request_id;
        Ok(request_id)
    }

    /// Picks the winner for the outstanding request and opens the next round.
    /// Lamports are not moved here; the caller pays out after this returns.
    pub fn resolve(&mut self, request_id: u128, random_words: &[u128], now: i64) -> Result<Pubkey> {
        require!(
            self.raffle_state()? == RaffleState::Calculating,
            RaffleError::RaffleNotCalculating
        );
        require!(
            request_id == self.pending_request_id,
            RaffleError::UnknownRequestId
        );
        require!(!self.players.is_empty(), RaffleError::NoPlayers);
        let random_word = *random_words
            .first()
            .ok_or(RaffleError::RandomnessNotResolved)?;

        let index_of_winner = (random_word % self.players.len() as u128) as usize;
        let winner = self.players[index_of_winner];
        msg!("Winner index {} of {}", index_of_winner, self.players.len());

        self.recent_winner = Some(winner);
        self.state = RaffleState::Open.to_code();
        self.players.clear();
        self.last_timestamp = now;
        self.pending_request_id = 0;
        self.round = self.round.checked_add(1).ok_or(RaffleError::Overflow)?;
        Ok(winner)
    }

    pub fn draw_requested(&self, raffle: Pubkey, now: i64) -> RequestedRaffleWinner {
        RequestedRaffleWinner {
            raffle,
            request_id: self.pending_request_id,
            timestamp: now,
        }
    }

    /// Event for the round that `resolve` just closed.
    pub fn winner_picked(&self, raffle: Pubkey, amount: u64, now: i64) -> Result<WinnerPicked> {
        let winner = self.recent_winner.ok_or(RaffleError::NoPlayers)?;
        Ok(WinnerPicked {
            raffle,
            winner,
            amount,
            round: self.round,
            timestamp: now,
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RaffleState {
    Open,
    // waiting on the oracle
    Calculating,
}

impl RaffleState {
    pub fn to_code(&self) -> u8 {
        match self {
            RaffleState::Open => 0,
            RaffleState::Calculating => 1,
        }
    }

    pub fn from(val: u8) -> std::result::Result<RaffleState, RaffleError> {
        match val {
            0 => Ok(RaffleState::Open),
            1 => Ok(RaffleState::Calculating),
            _ => Err(RaffleError::InvalidRaffleState),
        }
    }
}
