//! Decimals conversion between the home token and a remote token.
//!
//! Amounts are scaled up toward the chain with more decimals and scaled down
//! with truncation toward the chain with fewer decimals, so a conversion can
//! lose dust but never creates value. The one exception is
//! [`TokenScale::to_home_round_up`], used when sizing collateral.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Uint128};

/// Largest supported difference in decimals between home and remote
pub const MAX_DECIMALS_SHIFT: u8 = 18;

/// Fixed per-destination conversion between home and remote units
#[cw_serde]
#[derive(Copy, Eq)]
pub struct TokenScale {
    /// 10^|home decimals - remote decimals|, never zero
    pub multiplier: Uint128,
    /// True if the remote token has more decimals than the home token
    pub multiply_on_remote: bool,
}

impl TokenScale {
    /// One-to-one conversion
    pub fn identity() -> Self {
        Self {
            multiplier: Uint128::one(),
            multiply_on_remote: true,
        }
    }

    /// Build a scale from an explicit multiplier. Returns `None` for zero.
    pub fn new(multiplier: Uint128, multiply_on_remote: bool) -> Option<Self> {
        if multiplier.is_zero() {
            return None;
        }
        Some(Self {
            multiplier,
            multiply_on_remote,
        })
    }

    /// Derive the scale from both tokens' decimals.
    ///
    /// Returns `None` if the decimals differ by more than [`MAX_DECIMALS_SHIFT`].
    pub fn from_decimals(home_decimals: u8, remote_decimals: u8) -> Option<Self> {
        let shift = home_decimals.abs_diff(remote_decimals);
        if shift > MAX_DECIMALS_SHIFT {
            return None;
        }
        Self::new(
            Uint128::new(10u128.pow(shift as u32)),
            remote_decimals >= home_decimals,
        )
    }

    /// Convert a home-token amount into remote-token units.
    pub fn to_remote(&self, home_amount: Uint128) -> StdResult<Uint128> {
        if self.multiply_on_remote {
            Ok(home_amount.checked_mul(self.multiplier)?)
        } else {
            Ok(home_amount.checked_div(self.multiplier)?)
        }
    }

    /// Convert a remote-token amount into home-token units, truncating.
    pub fn to_home(&self, remote_amount: Uint128) -> StdResult<Uint128> {
        if self.multiply_on_remote {
            Ok(remote_amount.checked_div(self.multiplier)?)
        } else {
            Ok(remote_amount.checked_mul(self.multiplier)?)
        }
    }

    /// Convert a remote-token amount into home-token units, rounding up.
    pub fn to_home_round_up(&self, remote_amount: Uint128) -> StdResult<Uint128> {
        let truncated = self.to_home(remote_amount)?;
        if self.multiply_on_remote && !remote_amount.checked_rem(self.multiplier)?.is_zero() {
            return Ok(truncated.checked_add(Uint128::one())?);
        }
        Ok(truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_decimals_picks_direction() {
        let up = TokenScale::from_decimals(6, 18).unwrap();
        assert_eq!(up.multiplier, Uint128::new(1_000_000_000_000));
        assert!(up.multiply_on_remote);

        let down = TokenScale::from_decimals(18, 6).unwrap();
        assert_eq!(down.multiplier, Uint128::new(1_000_000_000_000));
        assert!(!down.multiply_on_remote);

        assert_eq!(TokenScale::from_decimals(6, 6).unwrap(), TokenScale::identity());
        assert!(TokenScale::from_decimals(0, 19).is_none());
        assert!(TokenScale::new(Uint128::zero(), true).is_none());
    }

    #[test]
    fn round_trip_never_increases_value() {
        let scale = TokenScale::from_decimals(6, 18).unwrap();
        let remote = Uint128::new(1_500_000_000_000_123);
        let home = scale.to_home(remote).unwrap();
        assert_eq!(home, Uint128::new(1_500));
        assert!(scale.to_remote(home).unwrap() <= remote);

        let scale = TokenScale::from_decimals(18, 6).unwrap();
        let home = Uint128::new(2_000_000_000_000_999);
        let remote = scale.to_remote(home).unwrap();
        assert_eq!(remote, Uint128::new(2_000));
        assert!(scale.to_home(remote).unwrap() <= home);
    }

    #[test]
    fn round_up_only_on_remainder() {
        let scale = TokenScale::from_decimals(6, 8).unwrap();
        assert_eq!(scale.to_home_round_up(Uint128::new(101)).unwrap(), Uint128::new(2));
        assert_eq!(scale.to_home_round_up(Uint128::new(100)).unwrap(), Uint128::new(1));
        assert_eq!(scale.to_home(Uint128::new(101)).unwrap(), Uint128::new(1));

        let scale = TokenScale::from_decimals(8, 6).unwrap();
        assert_eq!(scale.to_home_round_up(Uint128::new(3)).unwrap(), Uint128::new(300));
    }
}
