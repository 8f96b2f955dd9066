pub mod errors;
pub mod instructions;
pub mod oracle;
pub mod payout;
pub mod state;

pub use instructions::*;
pub use state::*;

use anchor_lang::prelude::*;

declare_id!("G3XMp36wcMbgVcU1kbAJSSMZbByrgiN9ADqQX6gWz4ij");

pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Upper bound on entries per round; sizes the raffle account.
pub const MAX_PLAYERS: usize = 100;

/// Random words requested per draw.
pub const NUM_WORDS: u32 = 1;

#[program]
pub mod vrf_raffle {

    use super::*;

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        params: InitializeRaffleParams,
    ) -> Result<()> {
        instructions::raffle::initialize_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::raffle::enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
        instructions::raffle::check_upkeep(ctx)
    }

    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        instructions::raffle::get_player(ctx, index)
    }

    pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
        instructions::raffle::get_number_of_players(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, params: PerformUpkeepParams) -> Result<()> {
        instructions::randomness::perform_upkeep(ctx, params)
    }

    pub fn fulfill_random_words(ctx: Context<FulfillRandomWords>, request_id: u128) -> Result<()> {
        instructions::randomness::fulfill_random_words(ctx, request_id)
    }
}
