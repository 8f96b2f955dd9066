use crate::errors::RaffleError;

use anchor_lang::prelude::*;
use switchboard_v2::{VrfAccountData, VrfRequestRandomness};

/// Bytes of entropy produced by one VRF round.
pub const VRF_RESULT_LEN: usize = 32;

/// Number of `u128` words that fit in one VRF result.
pub const MAX_WORDS: u32 = (VRF_RESULT_LEN / 16) as u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomnessRequest {
    pub num_words: u32,
}

impl RandomnessRequest {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.num_words > 0 && self.num_words <= MAX_WORDS,
            RaffleError::TooManyWords
        );
        Ok(())
    }
}

/// Source of verifiable randomness the raffle depends on.
///
/// Implementations submit the request on behalf of the raffle PDA (hence the
/// signer seeds) and return the id that the fulfilled result will carry.
pub trait RandomnessOracle {
    fn request_random_words(
        &self,
        request: &RandomnessRequest,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u128>;
}

/// Switchboard V2 VRF. The oracle queue plays the role of the gas lane and
/// the VRF account with its escrow is the funded subscription.
pub struct SwitchboardVrf<'a, 'info> {
    pub request: VrfRequestRandomness<'info>,
    pub vrf: &'a AccountLoader<'info, VrfAccountData>,
    pub switchboard_program: AccountInfo<'info>,
    pub state_bump: u8,
    pub permission_bump: u8,
}

impl RandomnessOracle for SwitchboardVrf<'_, '_> {
    fn request_random_words(
        &self,
        request: &RandomnessRequest,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u128> {
        request.validate()?;

        msg!("requesting randomness");
        self.request.invoke_signed(
            self.switchboard_program.clone(),
            self.state_bump,
            self.permission_bump,
            signer_seeds,
        )?;

        // the request opens a new VRF round; its counter is the correlation id
        let vrf = self.vrf.load()?;
        let counter = vrf.counter;
        msg!("randomness requested, vrf counter {}", counter);
        Ok(counter)
    }
}

/// Reads the verified result for `request_id` out of a VRF account.
pub fn fulfilled_words(
    vrf: &VrfAccountData,
    request_id: u128,
    num_words: u32,
) -> Result<Vec<u128>> {
    let counter = vrf.counter;
    require!(counter == request_id, RaffleError::UnknownRequestId);

    let result_buffer = vrf
        .get_result()
        .map_err(|_| error!(RaffleError::RandomnessNotResolved))?;
    if result_buffer == [0u8; VRF_RESULT_LEN] {
        msg!("vrf buffer empty");
        return err!(RaffleError::RandomnessNotResolved);
    }
    msg!("Result buffer is {:?}", result_buffer);

    words_from_result(result_buffer, num_words)
}

/// Splits a VRF result into little-endian `u128` words.
pub fn words_from_result(result_buffer: [u8; VRF_RESULT_LEN], num_words: u32) -> Result<Vec<u128>> {
    RandomnessRequest { num_words }.validate()?;
    let words: [u128; MAX_WORDS as usize] = bytemuck::cast(result_buffer);
    Ok(words[..num_words as usize].to_vec())
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

    fn vrf_round(counter: u128, result: [u8; VRF_RESULT_LEN]) -> VrfAccountData {
        let mut vrf = VrfAccountData::default();
        vrf.counter = counter;
        vrf.current_round.result = result;
        vrf
    }

    #[test]
    fn fulfilled_round_yields_words() {
        let mut result = [0u8; VRF_RESULT_LEN];
        result[..16].copy_from_slice(&1_234u128.to_le_bytes());
        let vrf = vrf_round(3, result);

        assert_eq!(fulfilled_words(&vrf, 3, 1).unwrap(), vec![1_234]);
    }

    #[test]
    fn stale_or_future_round_is_rejected() {
        let vrf = vrf_round(3, [5u8; VRF_RESULT_LEN]);
        for request_id in [2, 4, 0] {
            let err = fulfilled_words(&vrf, request_id, 1).unwrap_err();
            assert_eq!(error_code(err), u32::from(RaffleError::UnknownRequestId));
        }
    }

    #[test]
    fn unverified_round_is_rejected() {
        let vrf = vrf_round(3, [0u8; VRF_RESULT_LEN]);
        let err = fulfilled_words(&vrf, 3, 1).unwrap_err();
        assert_eq!(error_code(err), u32::from(RaffleError::RandomnessNotResolved));
    }

    #[test]
    fn single_word_is_low_half_of_result() {
        let mut buffer = [0u8; VRF_RESULT_LEN];
        buffer[0] = 7;
        buffer[16] = 9;

        let words = words_from_result(buffer, 1).unwrap();
        assert_eq!(words, vec![7]);
    }

    #[test]
    fn two_words_cover_whole_result() {
        let mut buffer = [0u8; VRF_RESULT_LEN];
        buffer[..16].copy_from_slice(&42u128.to_le_bytes());
        buffer[16..].copy_from_slice(&u128::MAX.to_le_bytes());

        let words = words_from_result(buffer, 2).unwrap();
        assert_eq!(words, vec![42, u128::MAX]);
    }

    #[test]
    fn rejects_word_counts_outside_one_result() {
        let buffer = [1u8; VRF_RESULT_LEN];
        for num_words in [0, MAX_WORDS + 1] {
            let err = words_from_result(buffer, num_words).unwrap_err();
            assert_eq!(error_code(err), u32::from(RaffleError::TooManyWords));
        }
    }
}
