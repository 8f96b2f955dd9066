use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    // 6000
    #[msg("Payment is below the raffle entrance fee")]
    NotEnoughPaymentSent,
    #[msg("Raffle is not open for entries")]
    RaffleNotOpen,
    #[msg("Upkeep not needed: interval, state, balance or players check failed")]
    UpkeepNotNeeded,
    #[msg("Failed to transfer the prize pool to the winner")]
    PayoutTransferFailed,
    #[msg("Raffle has reached the maximum number of players")]
    RaffleFull,
    #[msg("Interval must not be negative")]
    InvalidInterval,
    // 6006
    #[msg("Not a valid Switchboard account")]
    InvalidSwitchboardAccount,
    #[msg("Invalid VRF account provided.")]
    InvalidVrfAccount,
    #[msg("Invalid authority account provided.")]
    InvalidAuthorityError,
    #[msg("Raffle is not waiting for randomness")]
    RaffleNotCalculating,
    #[msg("Request id does not match the outstanding randomness request")]
    UnknownRequestId,
    #[msg("VRF result has not been verified yet")]
    RandomnessNotResolved,
    // 6012
    #[msg("Requested more random words than one VRF result holds")]
    TooManyWords,
    #[msg("Raffle has no players")]
    NoPlayers,
    #[msg("Winner account does not match the selected player")]
    WinnerAccountMismatch,
    #[msg("Player index out of bounds")]
    PlayerIndexOutOfBounds,
    #[msg("Invalid raffle state")]
    InvalidRaffleState,
    #[msg("Arithmetic overflow")]
    Overflow,
}
