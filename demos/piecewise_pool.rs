//! Piecewise constant-product pool walkthrough.
//!
//! Shows the flat middle band against the steeper tails, and how a deposit
//! off the pool ratio is trimmed to it.
//!
//! # Run
//!
//! ```bash
//! cargo run --example piecewise_pool
//! ```

use dualcurve_amm::config::{PiecewiseConfig, PoolConfig};
use dualcurve_amm::domain::{
    AccountId, Amount, BasisPoints, Decimals, FeeSchedule, Liquidity, Side, Token, TokenAddress,
};
use dualcurve_amm::factory::PoolRegistry;
use dualcurve_amm::platform::{ManualClock, MemoryLedger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();
    println!("=== Piecewise pool ===\n");

    let base = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6)?);
    let quote = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(6)?);
    let admin = AccountId::from_bytes([0xAD; 32]);
    let lp = AccountId::from_bytes([0xA1; 32]);
    let trader = AccountId::from_bytes([0xB0; 32]);

    let mut ledger = MemoryLedger::new();
    ledger.credit(&lp, &base.address(), Amount::new(2_000_000_000))?;
    ledger.credit(&lp, &quote.address(), Amount::new(3_000_000_000))?;
    ledger.credit(&trader, &base.address(), Amount::new(2_000_000_000))?;

    // ── 1. Middle band between 0.5·√k and 2·√k, 0.3% fee ────────────────
    let config = PoolConfig::Piecewise(PiecewiseConfig::new(
        FeeSchedule::new(3_000, 0)?,
        1_000_000_000_000_000_000,
        BasisPoints::new(5_000),
        BasisPoints::new(20_000),
    )?);
    let clock = ManualClock::new(1_700_000_000);
    let mut registry = PoolRegistry::new();
    let key = registry.create_pool(&clock, admin, base, quote, &config)?;
    let pool = registry.get_mut(&key)?;

    // ── 2. Bootstrap, then a deposit off the ratio ──────────────────────
    let boot = pool.add_liquidity(
        &mut ledger,
        &clock,
        &lp,
        Amount::new(1_000_000_000),
        Amount::new(1_000_000_000),
        Liquidity::ZERO,
    )?;
    println!("Bootstrap minted {} shares", boot.shares);

    let second = pool.add_liquidity(
        &mut ledger,
        &clock,
        &lp,
        Amount::new(500_000_000),
        Amount::new(2_000_000_000),
        Liquidity::ZERO,
    )?;
    println!(
        "Second deposit accepted {} / {}, refunded {} / {}, minted {}",
        second.amount_x, second.amount_y, second.refund_x, second.refund_y, second.shares
    );

    // ── 3. Walk the price down through the band into the tail ───────────
    for _ in 0..6 {
        let q = pool.swap(
            &mut ledger,
            &clock,
            &trader,
            Side::X,
            Amount::new(300_000_000),
            Amount::ZERO,
        )?;
        println!(
            "  sell {} -> {} (reserves {} / {})",
            q.amount_in(),
            q.amount_out(),
            pool.reserve(Side::X),
            pool.reserve(Side::Y)
        );
    }
    Ok(())
}
