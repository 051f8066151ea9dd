//! Integration tests: multi-step issuance and redemption flows.
//!
//! The unit tests pin down single operations; these suites walk whole
//! lifecycles and randomized operation sequences, checking conservation
//! and the bid/ask ordering along the way.

use curvemint_token::{AuctionOverlay, Beneficiary, ContinuousToken, PriceSupplyCurve};
use curvemint_types::{AccountId, CurvemintError, TokenConfig, almost_eq, default_tolerance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

/// Canonical curve (factor 0.0001, base price 5) with no beneficiary cut
/// and no auction.
fn make_plain_token() -> ContinuousToken {
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    ContinuousToken::new(
        curve,
        Beneficiary::none(AccountId(0)),
        AuctionOverlay::disabled(),
    )
}

fn make_seigniorage_token(fraction: Decimal) -> ContinuousToken {
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    ContinuousToken::new(
        curve,
        Beneficiary::new(AccountId(0), fraction).unwrap(),
        AuctionOverlay::disabled(),
    )
}

#[test]
fn full_lifecycle_returns_the_reserve() {
    let mut token = make_plain_token();
    let holder = AccountId(1);

    // 5050 is the exact reserve for the first 1000 tokens.
    let sold = token.create(dec(5050), holder).unwrap();
    assert_eq!(sold, dec(1000));
    assert_eq!(token.ledger().supply(), dec(1000));
    assert_eq!(token.reserve_value(), dec(5050));

    let payout = token.destroy(dec(1000), holder).unwrap();
    assert_eq!(payout, dec(5050));
    assert_eq!(token.ledger().supply(), Decimal::ZERO);
    assert_eq!(token.reserve_value(), Decimal::ZERO);
    assert_eq!(token.bid().unwrap(), Decimal::ZERO);
}

#[test]
fn creates_conserve_reserve_and_supply() {
    let mut token = make_seigniorage_token(Decimal::new(3, 1));
    let alice = AccountId(1);
    let bob = AccountId(2);

    let mut sold_total = Decimal::ZERO;
    sold_total += token.create(dec(1000), alice).unwrap();
    sold_total += token.create(dec(2000), bob).unwrap();
    sold_total += token.create(dec(500), alice).unwrap();

    // The reserve is the exact sum of the values paid in.
    assert_eq!(token.reserve_value(), dec(3500));

    // Every issued token is on the ledger: the holders got what create
    // returned, the beneficiary the rest.
    let ledger = token.ledger();
    let holders = ledger.balance_of(alice) + ledger.balance_of(bob);
    assert_eq!(holders, sold_total);
    let seigniorage = ledger.balance_of(AccountId(0));
    assert_eq!(ledger.supply(), sold_total + seigniorage);

    // 30% of the full issuance accrued to the beneficiary.
    assert!(almost_eq(seigniorage, ledger.supply() * Decimal::new(3, 1)));

    // Without an auction the ledger tracks the notional supply to dust.
    let skipped = token.skipped_supply().unwrap();
    assert!(skipped < default_tolerance(), "skipped {skipped}");
    assert!(almost_eq(
        token.notional_supply().unwrap(),
        ledger.supply()
    ));
}

#[test]
fn linear_redemption_is_asymmetric() {
    let mut token = make_plain_token();
    let holder = AccountId(1);
    token.create(dec(5050), holder).unwrap();

    // Linear redemption pays the average reserve per token, below the
    // marginal curve price.
    let payout = token.destroy(dec(400), holder).unwrap();
    assert_eq!(payout, dec(2020)); // 5050 * 400 / 1000
    assert_eq!(token.reserve_value(), dec(3030));

    // Paying the same 2020 back in buys along the curve from the notional
    // supply (about 602.4 tokens for a 3030 reserve), which sits above the
    // average: about 397.6 tokens come back, not 400.
    let sold = token.create(dec(2020), holder).unwrap();
    assert!(sold < dec(398), "sold {sold}");
    assert!(sold > dec(397), "sold {sold}");
    assert_eq!(token.reserve_value(), dec(5050));

    let supply = token.ledger().supply();
    assert!(supply < dec(998) && supply > dec(997), "supply {supply}");
    assert!(token.bid().unwrap() <= token.ask().unwrap());
}

#[test]
fn curve_redemption_round_trips_exactly() {
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    let mut token = ContinuousToken::with_policy(
        curve,
        Beneficiary::none(AccountId(0)),
        AuctionOverlay::disabled(),
        curvemint_types::RedemptionPolicy::Curve,
    );
    let holder = AccountId(1);
    token.create(dec(5050), holder).unwrap();

    // Curve redemption walks the curve down: reserve(1000) - reserve(600).
    let payout = token.destroy(dec(400), holder).unwrap();
    assert_eq!(payout, dec(2032));
    assert_eq!(token.reserve_value(), dec(3018));
    assert_eq!(token.notional_supply().unwrap(), dec(600));

    // Buying back with the same value lands exactly on the old position.
    let sold = token.create(dec(2032), holder).unwrap();
    assert_eq!(sold, dec(400));
    assert_eq!(token.ledger().supply(), dec(1000));
    assert_eq!(token.reserve_value(), dec(5050));
}

#[test]
fn auction_premium_decays_to_the_curve() {
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    let auction = AuctionOverlay::new(dec(100_000), dec(1000)).unwrap();
    let mut token = ContinuousToken::new(curve, Beneficiary::none(AccountId(0)), auction);
    let holder = AccountId(1);

    // At elapsed 0 the surcharge is 100000/1000 = 100, far above the base
    // price, so purchases pay roughly the surcharge per token.
    assert!(token.is_auction().unwrap());
    let ask_before = token.ask().unwrap();
    assert!(ask_before > dec(90), "ask {ask_before}");

    token.create(dec(1000), holder).unwrap();
    assert!(token.skipped_supply().unwrap() > dec(100));

    // Long after launch the premium is gone and the ask falls back to the
    // curve around the (small) notional supply.
    token.advance_time(10_000_000);
    assert!(!token.is_auction().unwrap());
    let ask_after = token.ask().unwrap();
    assert!(ask_after < dec(10), "ask {ask_after}");
    assert!(ask_after < ask_before);
    assert_eq!(
        token.curve_price_auction().unwrap(),
        token.curve_price().unwrap()
    );
}

#[test]
fn bid_never_exceeds_ask_in_premium_free_runs() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut token = make_seigniorage_token(Decimal::new(3, 1));
    let holder = AccountId(1);

    for step in 0..300 {
        let balance = token.ledger().balance_of(holder);
        if balance.is_zero() || rng.gen_bool(0.7) {
            let value = dec(rng.gen_range(10..10_000));
            token.create(value, holder).unwrap();
        } else {
            // Redeem up to half of the holding.
            let num = balance * Decimal::new(rng.gen_range(1..=50), 2);
            token.destroy(num, holder).unwrap();
        }

        if token.ledger().supply() >= Decimal::ONE {
            let bid = token.bid().unwrap();
            let ask = token.ask().unwrap();
            assert!(bid <= ask, "step {step}: bid {bid} > ask {ask}");
        }
    }
}

#[test]
fn bid_never_exceeds_ask_during_live_auction() {
    let mut rng = StdRng::seed_from_u64(42);
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    let auction = AuctionOverlay::new(dec(100_000), dec(1000)).unwrap();
    let mut token = ContinuousToken::new(
        curve,
        Beneficiary::new(AccountId(0), Decimal::new(3, 1)).unwrap(),
        auction,
    );
    let holder = AccountId(1);

    for step in 0..20 {
        token.create(dec(rng.gen_range(100..10_000)), holder).unwrap();
        assert!(token.is_auction().unwrap(), "step {step}: auction over");

        let bid = token.bid().unwrap();
        let ask = token.ask().unwrap();
        assert!(bid <= ask, "step {step}: bid {bid} > ask {ask}");
    }
}

#[test]
fn config_round_trip_preserves_behavior() {
    let config = TokenConfig::default();
    config.validate().unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: TokenConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);

    let mut original = ContinuousToken::from_config(&config).unwrap();
    let mut restored = ContinuousToken::from_config(&back).unwrap();
    let holder = AccountId(1);

    let sold_a = original.create(dec(1000), holder).unwrap();
    let sold_b = restored.create(dec(1000), holder).unwrap();
    assert_eq!(sold_a, sold_b);
    assert_eq!(original.ask().unwrap(), restored.ask().unwrap());
    assert_eq!(original.bid().unwrap(), restored.bid().unwrap());
}

#[test]
fn transfers_rearrange_holdings() {
    let mut token = make_plain_token();
    let alice = AccountId(1);
    let bob = AccountId(2);
    token.create(dec(5050), alice).unwrap();

    token.transfer(alice, bob, dec(400)).unwrap();
    assert_eq!(token.ledger().balance_of(alice), dec(600));
    assert_eq!(token.ledger().balance_of(bob), dec(400));

    // Bob can redeem what he received.
    let payout = token.destroy(dec(400), bob).unwrap();
    assert_eq!(payout, dec(2020));
    assert_eq!(token.ledger().balance_of(bob), Decimal::ZERO);

    // Alice cannot redeem more than she holds; nothing moves on failure.
    let err = token.destroy(dec(700), alice).unwrap_err();
    assert!(matches!(err, CurvemintError::InsufficientFunds { .. }));
    assert_eq!(token.ledger().balance_of(alice), dec(600));
    assert_eq!(token.reserve_value(), dec(3030));
    assert_eq!(token.ledger().supply(), dec(600));
}
