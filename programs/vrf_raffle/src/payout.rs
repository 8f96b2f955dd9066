use crate::errors::RaffleError;

use anchor_lang::prelude::*;

/// Lamports held above the rent-exempt reserve, i.e. the prize pool.
pub fn pool_balance(lamports: u64, rent_exempt_minimum: u64) -> u64 {
    lamports.saturating_sub(rent_exempt_minimum)
}

pub fn current_pool(raffle: &AccountInfo) -> Result<u64> {
    let rent = Rent::get()?;
    Ok(pool_balance(
        raffle.lamports(),
        rent.minimum_balance(raffle.data_len()),
    ))
}

/// Moves `amount` lamports out of the program-owned raffle account.
/// Every failure surfaces as `PayoutTransferFailed` so the whole
/// resolution is rolled back.
pub fn transfer_pool(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if !to.is_writable {
        msg!("winner account {} is not writable", to.key);
        return err!(RaffleError::PayoutTransferFailed);
    }

    let mut from_lamports = from
        .try_borrow_mut_lamports()
        .map_err(|_| error!(RaffleError::PayoutTransferFailed))?;
    let mut to_lamports = to
        .try_borrow_mut_lamports()
        .map_err(|_| error!(RaffleError::PayoutTransferFailed))?;

    let debited = from_lamports
        .checked_sub(amount)
        .ok_or(RaffleError::PayoutTransferFailed)?;
    let credited = to_lamports
        .checked_add(amount)
        .ok_or(RaffleError::PayoutTransferFailed)?;

    **from_lamports = debited;
    **to_lamports = credited;
    Ok(())
}

/// Pays the pool to the drawn player; `to` must be that player's account.
pub fn pay_winner(from: &AccountInfo, to: &AccountInfo, winner: Pubkey, amount: u64) -> Result<()> {
    require_keys_eq!(*to.key, winner, RaffleError::WinnerAccountMismatch);
    transfer_pool(from, to, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn error_code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error {:?}", e),
        }
    }

    #[test]
    fn pool_excludes_rent_reserve() {
        assert_eq!(pool_balance(1_500, 1_000), 500);
        assert_eq!(pool_balance(1_000, 1_000), 0);
        assert_eq!(pool_balance(10, 1_000), 0);
    }

    #[test]
    fn moves_whole_pool_to_winner() {
        let program_id = Pubkey::new_unique();
        let raffle_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut raffle_lamports = 1_000 + 600;
        let mut winner_lamports = 50;
        let mut raffle_data = [0u8; 8];
        let mut winner_data = [0u8; 0];
        let raffle = AccountInfo::new(
            &raffle_key, false, true, &mut raffle_lamports, &mut raffle_data, &program_id, false, 0,
        );
        let winner = AccountInfo::new(
            &winner_key, false, true, &mut winner_lamports, &mut winner_data, &program_id, false, 0,
        );

        transfer_pool(&raffle, &winner, 600).unwrap();

        assert_eq!(raffle.lamports(), 1_000);
        assert_eq!(winner.lamports(), 650);
    }

    #[test]
    fn read_only_winner_fails_payout() {
        let program_id = Pubkey::new_unique();
        let raffle_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut raffle_lamports = 1_600;
        let mut winner_lamports = 50;
        let mut raffle_data = [0u8; 8];
        let mut winner_data = [0u8; 0];
        let raffle = AccountInfo::new(
            &raffle_key, false, true, &mut raffle_lamports, &mut raffle_data, &program_id, false, 0,
        );
        let winner = AccountInfo::new(
            &winner_key, false, false, &mut winner_lamports, &mut winner_data, &program_id, false, 0,
        );

        let err = transfer_pool(&raffle, &winner, 600).unwrap_err();
        assert_eq!(error_code(err), u32::from(RaffleError::PayoutTransferFailed));
        assert_eq!(raffle.lamports(), 1_600);
        assert_eq!(winner.lamports(), 50);
    }

    #[test]
    fn payout_only_to_drawn_player() {
        let program_id = Pubkey::new_unique();
        let raffle_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let other_key = Pubkey::new_unique();
        let mut raffle_lamports = 1_600;
        let mut other_lamports = 50;
        let mut winner_lamports = 50;
        let mut raffle_data = [0u8; 8];
        let mut other_data = [0u8; 0];
        let mut winner_data = [0u8; 0];
        let raffle = AccountInfo::new(
            &raffle_key, false, true, &mut raffle_lamports, &mut raffle_data, &program_id, false, 0,
        );
        let other = AccountInfo::new(
            &other_key, false, true, &mut other_lamports, &mut other_data, &program_id, false, 0,
        );
        let winner = AccountInfo::new(
            &winner_key, false, true, &mut winner_lamports, &mut winner_data, &program_id, false, 0,
        );

        let err = pay_winner(&raffle, &other, winner_key, 600).unwrap_err();
        assert_eq!(error_code(err), u32::from(RaffleError::WinnerAccountMismatch));
        assert_eq!(raffle.lamports(), 1_600);
        assert_eq!(other.lamports(), 50);

        pay_winner(&raffle, &winner, winner_key, 600).unwrap();
        assert_eq!(raffle.lamports(), 1_000);
        assert_eq!(winner.lamports(), 650);
    }

    #[test]
    fn overdrawn_pool_fails_payout() {
        let program_id = Pubkey::new_unique();
        let raffle_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut raffle_lamports = 100;
        let mut winner_lamports = 0;
        let mut raffle_data = [0u8; 8];
        let mut winner_data = [0u8; 0];
        let raffle = AccountInfo::new(
            &raffle_key, false, true, &mut raffle_lamports, &mut raffle_data, &program_id, false, 0,
        );
        let winner = AccountInfo::new(
            &winner_key, false, true, &mut winner_lamports, &mut winner_data, &program_id, false, 0,
        );

        let err = transfer_pool(&raffle, &winner, 101).unwrap_err();
        assert_eq!(error_code(err), u32::from(RaffleError::PayoutTransferFailed));
        assert_eq!(raffle.lamports(), 100);
    }
}
