//! Integration test: both engines in one scenario.
//!
//! A driver quotes the continuous token's bid/ask and arbitrages a book
//! against them: buying book liquidity priced below the token's bid and
//! redeeming it, then minting at the token's ask into book bids above it.
//! Afterwards the book cannot quote better than the token on either side.

use curvemint_exchange::OrderBook;
use curvemint_token::{AuctionOverlay, Beneficiary, ContinuousToken, PriceSupplyCurve};
use curvemint_types::{AccountId, NewOrder};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn make_token() -> ContinuousToken {
    let curve = PriceSupplyCurve::new(Decimal::new(1, 4), dec(5)).unwrap();
    ContinuousToken::new(
        curve,
        Beneficiary::none(AccountId(0)),
        AuctionOverlay::disabled(),
    )
}

#[test]
fn arbitrage_pins_the_book_to_the_token_quotes() {
    let driver = AccountId(1);
    let mut token = make_token();
    token.create(dec(5050), driver).unwrap(); // 1000 tokens, bid 5.05

    let mut book = OrderBook::new();
    book.place(NewOrder::sell(dec(4), dec(50))).unwrap(); // below the token bid
    book.place(NewOrder::sell(dec(7), dec(50))).unwrap(); // above the token ask
    assert!(book.ask().unwrap() < token.bid().unwrap());

    // Phase 1: book asks under the token bid are free money. Buy one
    // token at a time off the book and redeem it against the reserve.
    let mut paid = Decimal::ZERO;
    let mut received = Decimal::ZERO;
    while let Ok(book_ask) = book.ask() {
        if book_ask >= token.bid().unwrap() {
            break;
        }
        let sweep = book.buy_market(Decimal::ONE).unwrap();
        assert_eq!(sweep.filled, Decimal::ONE);
        paid += sweep.cost;
        received += token.destroy(Decimal::ONE, driver).unwrap();
    }

    // Linear redemption pays the average reserve per token, which the
    // redemptions themselves do not move: 50 * (5.05 - 4) exactly.
    assert_eq!(received - paid, Decimal::new(525, 1));
    assert!(book.ask().unwrap() >= token.bid().unwrap());

    // Phase 2: a book bid over the token ask funds minting. Mint one
    // net token at the ask and sell it into the bid until the edge is
    // gone.
    book.place(NewOrder::buy(dec(6), dec(50))).unwrap();
    let mut paid = Decimal::ZERO;
    let mut received = Decimal::ZERO;
    while let Ok(book_bid) = book.bid() {
        let token_ask = token.ask().unwrap();
        if book_bid <= token_ask {
            break;
        }
        let cost = token.sale_cost(Decimal::ONE).unwrap();
        let sold = token.create(cost, driver).unwrap();
        paid += cost;
        received += book.sell_market(sold).unwrap().cost;
    }
    assert!(received > paid, "minting into the rich bid must profit");

    // The rich bid is consumed; what quotes remain straddle the token.
    assert!(book.bid().is_err());
    assert!(book.ask().unwrap() >= token.bid().unwrap());
}
