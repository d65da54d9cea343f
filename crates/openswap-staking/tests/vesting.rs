//! Vesting scenarios against the default staking schedule.

use openswap_ingress::{TokenBank, TokenLedger};
use openswap_staking::StakingLedger;
use openswap_types::constants::{DEFAULT_STAKING_CLIFF, DEFAULT_STAKING_DURATION};
use openswap_types::*;
use rand::Rng;

const START: Timestamp = 1_700_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Setup {
    staking: StakingLedger<ManualClock>,
    bank: TokenBank,
    clock: ManualClock,
    token: Address,
    staker: Address,
}

impl Setup {
    fn new() -> Self {
        init_tracing();
        let clock = ManualClock::new(START);
        let token = Address::repeat_byte(0xa5);
        let staker = Address::repeat_byte(0x01);
        let config = StakingConfig::new(
            token,
            Address::repeat_byte(0x5c),
            Address::repeat_byte(0x0a),
        );
        let staking = StakingLedger::new(config, clock.clone()).unwrap();
        let mut bank = TokenBank::new();
        bank.mint(token, staker, U256::from(5_000_000));
        bank.approve(token, staker, staking.address(), U256::MAX);
        Self {
            staking,
            bank,
            clock,
            token,
            staker,
        }
    }

    fn stake(&mut self, amount: u64) -> usize {
        self.staking
            .stake(&mut self.bank, self.staker, U256::from(amount))
            .unwrap()
    }

    fn unstake(&mut self, index: usize, amount: U256) -> Result<()> {
        self.staking.unstake(&mut self.bank, self.staker, index, amount)
    }
}

#[test]
fn partial_vesting_limits_withdrawal() {
    let mut s = Setup::new();
    s.stake(1_000_000);

    // Past the cliff, a quarter of the way through the schedule.
    let elapsed = DEFAULT_STAKING_DURATION / 4;
    assert!(elapsed > DEFAULT_STAKING_CLIFF);
    s.clock.advance(elapsed);

    let vested = U256::from(1_000_000u64 * elapsed / DEFAULT_STAKING_DURATION);
    assert_eq!(s.staking.available_to_unstake(&s.staker, 0).unwrap(), vested);

    let err = s.unstake(0, vested + U256::from(1)).unwrap_err();
    assert_eq!(err.reason(), "AMOUNT_EXCEEDS_AVAILABLE");
    assert_eq!(s.staking.balance_of(&s.staker), U256::from(1_000_000));

    s.unstake(0, vested).unwrap();
    let remaining = U256::from(1_000_000) - vested;
    assert_eq!(s.staking.balance_of(&s.staker), remaining);
    assert_eq!(s.staking.total_supply(), remaining);
    assert_eq!(
        s.bank.balance_of(&s.token, &s.staker),
        U256::from(4_000_000) + vested
    );
    assert_eq!(s.staking.available_to_unstake(&s.staker, 0).unwrap(), U256::ZERO);
    s.bank.verify_all_supply().unwrap();
}

#[test]
fn everything_unlocks_after_duration() {
    let mut s = Setup::new();
    s.stake(1_000_000);
    s.clock.advance(DEFAULT_STAKING_DURATION);
    s.unstake(0, U256::from(1_000_000)).unwrap();
    assert_eq!(s.staking.total_supply(), U256::ZERO);
    assert_eq!(s.bank.balance_of(&s.token, &s.staker), U256::from(5_000_000));
}

#[test]
fn extend_relocks_vested_funds() {
    let mut s = Setup::new();
    s.stake(1_000_000);
    s.clock.advance(DEFAULT_STAKING_DURATION);
    assert_eq!(
        s.staking.available_to_unstake(&s.staker, 0).unwrap(),
        U256::from(1_000_000)
    );

    s.staking
        .extend(&mut s.bank, s.staker, 0, U256::from(1))
        .unwrap();
    assert_eq!(
        s.unstake(0, U256::from(1)).unwrap_err(),
        OpenswapError::CliffNotReached
    );

    s.clock.advance(DEFAULT_STAKING_CLIFF);
    let expected = U256::from(1_000_001u64 * DEFAULT_STAKING_CLIFF / DEFAULT_STAKING_DURATION);
    assert_eq!(s.staking.available_to_unstake(&s.staker, 0).unwrap(), expected);
    assert!(s.unstake(0, U256::from(1_000_000)).is_err());
}

#[test]
fn plain_stake_also_restarts_clock() {
    let mut s = Setup::new();
    s.stake(1_000);
    s.clock.advance(DEFAULT_STAKING_DURATION);
    assert_eq!(s.stake(1_000), 0);
    assert_eq!(
        s.staking.available_to_unstake(&s.staker, 0).unwrap(),
        U256::ZERO
    );
}

#[test]
fn shortened_schedule_applies_to_existing_positions() {
    let mut s = Setup::new();
    s.stake(10_000);
    s.clock.advance(100);
    assert_eq!(
        s.unstake(0, U256::from(1)).unwrap_err(),
        OpenswapError::CliffNotReached
    );
    let owner = s.staking.owner();
    s.staking.set_vesting(owner, 100, 0).unwrap();
    s.unstake(0, U256::from(10_000)).unwrap();
    assert_eq!(s.staking.balance_of(&s.staker), U256::ZERO);
}

#[test]
fn random_withdrawals_never_exceed_vested() {
    let mut s = Setup::new();
    s.stake(1_000_000);
    let mut rng = rand::thread_rng();
    let mut withdrawn = U256::ZERO;
    s.clock.advance(DEFAULT_STAKING_CLIFF);
    for _ in 0..20 {
        s.clock.advance(rng.gen_range(0..DEFAULT_STAKING_DURATION / 20));
        let available = s.staking.available_to_unstake(&s.staker, 0).unwrap();
        if available.is_zero() {
            continue;
        }
        let take = available / U256::from(2) + U256::from(1);
        s.unstake(0, take).unwrap();
        withdrawn += take;
        assert!(s.unstake(0, available).is_err());
    }
    assert_eq!(
        s.staking.balance_of(&s.staker),
        U256::from(1_000_000) - withdrawn
    );
    assert_eq!(s.staking.total_supply(), s.staking.balance_of(&s.staker));
    s.bank.verify_all_supply().unwrap();
}
