use crate::errors::RaffleError;
use crate::oracle::{fulfilled_words, SwitchboardVrf};
use crate::payout::{current_pool, pay_winner};
use crate::{RaffleInfo, NUM_WORDS, RAFFLE_SEED};

use anchor_lang::{prelude::*, solana_program};
use anchor_spl::token::{Token, TokenAccount};
use switchboard_v2::{
    OracleQueueAccountData, PermissionAccountData, SbState, VrfAccountData, VrfRequestRandomness,
    SWITCHBOARD_PROGRAM_ID,
};

pub fn perform_upkeep(ctx: Context<PerformUpkeep>, params: PerformUpkeepParams) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_key = ctx.accounts.raffle_info.key();
    let balance = current_pool(&ctx.accounts.raffle_info.to_account_info())?;

    let vrf_key = ctx.accounts.vrf.key();
    let bump = ctx.accounts.raffle_info.bump;
    msg!("bump: {}", bump);
    msg!("vrf: {}", vrf_key);
    let raffle_seeds: &[&[&[u8]]] = &[&[RAFFLE_SEED, vrf_key.as_ref(), &[bump]]];

    let oracle = SwitchboardVrf {
        request: VrfRequestRandomness {
            authority: ctx.accounts.raffle_info.to_account_info(),
            vrf: ctx.accounts.vrf.to_account_info(),
            oracle_queue: ctx.accounts.oracle_queue.to_account_info(),
            queue_authority: ctx.accounts.queue_authority.to_account_info(),
            data_buffer: ctx.accounts.data_buffer.to_account_info(),
            permission: ctx.accounts.permission.to_account_info(),
            escrow: ctx.accounts.escrow.clone(),
            payer_wallet: ctx.accounts.payer_wallet.clone(),
            payer_authority: ctx.accounts.payer_authority.to_account_info(),
            recent_blockhashes: ctx.accounts.recent_blockhashes.to_account_info(),
            program_state: ctx.accounts.program_state.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        vrf: &ctx.accounts.vrf,
        switchboard_program: ctx.accounts.switchboard_program.to_account_info(),
        state_bump: params.switchboard_state_bump,
        permission_bump: params.permission_bump,
    };

    let request_id = ctx.accounts.raffle_info.request_draw(
        &oracle,
        clock.unix_timestamp,
        balance,
        raffle_seeds,
    )?;

    let requested = ctx
        .accounts
        .raffle_info
        .draw_requested(raffle_key, clock.unix_timestamp);
    emit!(requested);
    msg!("draw requested, request id {}", request_id);
    Ok(())
}

pub fn fulfill_random_words(ctx: Context<FulfillRandomWords>, request_id: u128) -> Result<()> {
    let clock = Clock::get()?;

    let random_words = {
        let vrf = ctx.accounts.vrf.load()?;
        fulfilled_words(&vrf, request_id, NUM_WORDS)?
    };

    let raffle_account = ctx.accounts.raffle_info.to_account_info();
    let prize = current_pool(&raffle_account)?;

    // bookkeeping first, lamports last
    let winner = ctx
        .accounts
        .raffle_info
        .resolve(request_id, &random_words, clock.unix_timestamp)?;
    pay_winner(
        &raffle_account,
        &ctx.accounts.winner.to_account_info(),
        winner,
        prize,
    )?;

    let picked = ctx
        .accounts
        .raffle_info
        .winner_picked(raffle_account.key(), prize, clock.unix_timestamp)?;
    emit!(picked);
    msg!("Winner {} paid {} lamports", winner, prize);
    Ok(())
}

#[derive(Clone, AnchorSerialize, AnchorDeserialize)]
pub struct PerformUpkeepParams {
    pub permission_bump: u8,
    pub switchboard_state_bump: u8,
}

#[derive(Accounts)]
#[instruction(params: PerformUpkeepParams)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED, vrf.key().as_ref()],
        bump = raffle_info.bump,
        has_one = vrf @ RaffleError::InvalidVrfAccount,
        has_one = oracle_queue @ RaffleError::InvalidSwitchboardAccount,
    )]
    pub raffle_info: Box<Account<'info, RaffleInfo>>,

    // SWITCHBOARD ACCOUNTS
    #[account(mut,
        has_one = escrow,
        constraint =
            *vrf.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub vrf: AccountLoader<'info, VrfAccountData>,
    #[account(mut,
        has_one = data_buffer,
        constraint =
            oracle_queue.load()?.authority == queue_authority.key()
            && *oracle_queue.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub oracle_queue: AccountLoader<'info, OracleQueueAccountData>,
    /// CHECK: Will be checked in the CPI instruction
    pub queue_authority: UncheckedAccount<'info>,
    /// CHECK: owner checked, contents read by Switchboard
    #[account(mut,
        constraint =
            *data_buffer.owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub data_buffer: AccountInfo<'info>,
    #[account(mut,
        constraint =
            *permission.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub permission: AccountLoader<'info, PermissionAccountData>,
    #[account(mut,
        constraint =
            escrow.owner == program_state.key()
            && escrow.mint == program_state.load()?.token_mint
    )]
    pub escrow: Account<'info, TokenAccount>,
    #[account(mut,
        constraint =
            *program_state.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub program_state: AccountLoader<'info, SbState>,
    /// CHECK: executable Switchboard program
    #[account(
        constraint =
            switchboard_program.executable
            && *switchboard_program.key == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub switchboard_program: AccountInfo<'info>,

    // PAYER ACCOUNTS
    #[account(mut,
        constraint =
            payer_wallet.owner == payer_authority.key()
            && payer_wallet.mint == program_state.load()?.token_mint
    )]
    pub payer_wallet: Account<'info, TokenAccount>,
    pub payer_authority: Signer<'info>,

    // SYSTEM ACCOUNTS
    /// CHECK: sysvar address constraint
    #[account(address = solana_program::sysvar::recent_blockhashes::ID)]
    pub recent_blockhashes: AccountInfo<'info>,
    #[account(address = anchor_spl::token::ID)]
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED, vrf.key().as_ref()],
        bump = raffle_info.bump,
        has_one = vrf @ RaffleError::InvalidVrfAccount,
    )]
    pub raffle_info: Box<Account<'info, RaffleInfo>>,
    #[account(
        constraint =
            *vrf.to_account_info().owner == SWITCHBOARD_PROGRAM_ID @ RaffleError::InvalidSwitchboardAccount
    )]
    pub vrf: AccountLoader<'info, VrfAccountData>,
    /// CHECK: must be the drawn player; checked in the handler
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}
