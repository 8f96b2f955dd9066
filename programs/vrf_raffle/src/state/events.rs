use anchor_lang::prelude::*;

#[event]
pub struct RaffleEnter {
    pub raffle: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RequestedRaffleWinner {
    pub raffle: Pubkey,
    pub request_id: u128,
    pub timestamp: i64,
}

#[event]
pub struct WinnerPicked {
    pub raffle: Pubkey,
    pub winner: Pubkey,
    pub amount: u64,
    pub round: u64,
    pub timestamp: i64,
}
