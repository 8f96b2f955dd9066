use crate::errors::RaffleError;
use crate::payout::current_pool;
use crate::{InitializeRaffleParams, RaffleEnter, RaffleInfo, RAFFLE_SEED};

use anchor_lang::solana_program::{program::invoke, system_instruction};
use anchor_lang::{prelude::*, solana_program};
use switchboard_v2::{OracleQueueAccountData, VrfAccountData, SWITCHBOARD_PROGRAM_ID};

#[access_control(ctx.accounts.validate(&ctx, &params))]
pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    params: InitializeRaffleParams,
) -> Result<()> {
    InitializeRaffle::actuate(ctx, &params)
}

pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle_info.add_player(player, amount)?;

    invoke(
        &system_instruction::transfer(&player, &ctx.accounts.raffle_info.key(), amount),
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.raffle_info.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    msg!(
        "{} entered with {} lamports, {} players",
        player,
        amount,
        ctx.accounts.raffle_info.players.len()
    );
    emit!(RaffleEnter {
        raffle: ctx.accounts.raffle_info.key(),
        player,
        amount,
    });
    Ok(())
}

pub fn check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
    let clock = Clock::get()?;
    let balance = current_pool(&ctx.accounts.raffle_info.to_account_info())?;
    let check = ctx
        .accounts
        .raffle_info
        .check_upkeep(clock.unix_timestamp, balance);

    msg!(
        "time passed {}, open {}, balance {}, players {}",
        check.time_passed,
        check.is_open,
        check.balance,
        check.num_players
    );
    Ok(check.upkeep_needed())
}

pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle_info.player(index)
}

pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle_info.players.len() as u64)
}

#[derive(Accounts)]
#[instruction(params: InitializeRaffleParams)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        space = 8 + RaffleInfo::MAX_SIZE,
        payer = payer,
        seeds = [RAFFLE_SEED, vrf.key().as_ref()],
        bump,
    )]
    pub raffle_info: Box<Account<'info, RaffleInfo>>,
    #[account(
        constraint =
            *vrf.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub vrf: AccountLoader<'info, VrfAccountData>,
    #[account(
        constraint =
            *oracle_queue.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub oracle_queue: AccountLoader<'info, OracleQueueAccountData>,
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(address = solana_program::system_program::ID)]
    pub system_program: Program<'info, System>,
}

impl InitializeRaffle<'_> {
    pub fn validate(&self, _ctx: &Context<Self>, params: &InitializeRaffleParams) -> Result<()> {
        msg!("Validate init");
        params.validate()?;

        let vrf = self.vrf.load()?;
        // the raffle PDA signs every randomness request
        if vrf.authority != self.raffle_info.key() {
            return Err(error!(RaffleError::InvalidAuthorityError));
        }
        if vrf.oracle_queue != self.oracle_queue.key() {
            return Err(error!(RaffleError::InvalidSwitchboardAccount));
        }
        Ok(())
    }

    pub fn actuate(ctx: Context<Self>, params: &InitializeRaffleParams) -> Result<()> {
        msg!("Actuate init");
        let clock = Clock::get()?;
        let bump = *ctx
            .bumps
            .get("raffle_info")
            .ok_or(ProgramError::InvalidSeeds)?;

        let vrf = ctx.accounts.vrf.key();
        let oracle_queue = ctx.accounts.oracle_queue.key();
        ctx.accounts
            .raffle_info
            .init(params, vrf, oracle_queue, bump, clock.unix_timestamp);

        msg!(
            "Raffle open: fee {} lamports, interval {}s",
            params.entrance_fee,
            params.interval
        );
        Ok(())
    }
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED, raffle_info.vrf.as_ref()],
        bump = raffle_info.bump,
    )]
    pub raffle_info: Box<Account<'info, RaffleInfo>>,
    #[account(mut)]
    pub player: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    #[account(
        seeds = [RAFFLE_SEED, raffle_info.vrf.as_ref()],
        bump = raffle_info.bump,
    )]
    pub raffle_info: Box<Account<'info, RaffleInfo>>,
}
