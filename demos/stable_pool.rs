//! StableSwap pool walkthrough.
//!
//! Bootstraps a USDC/USDT pool, trades across the peg, ramps the
//! amplification coefficient and collects admin fees.
//!
//! # Run
//!
//! ```bash
//! cargo run --example stable_pool
//! ```

use dualcurve_amm::config::{PoolConfig, StableConfig};
use dualcurve_amm::domain::{
    AccountId, Amount, Decimals, FeeSchedule, Liquidity, Side, Token, TokenAddress,
};
use dualcurve_amm::factory::PoolRegistry;
use dualcurve_amm::platform::{Clock, Ledger, ManualClock, MemoryLedger};
use dualcurve_amm::pools::MIN_RAMP_TIME;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();
    println!("=== StableSwap pool ===\n");

    // ── 1. Tokens and accounts ──────────────────────────────────────────
    let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6)?);
    let usdt = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(6)?);
    let admin = AccountId::from_bytes([0xAD; 32]);
    let lp = AccountId::from_bytes([0xA1; 32]);
    let trader = AccountId::from_bytes([0xB0; 32]);

    let mut ledger = MemoryLedger::new();
    ledger.credit(&lp, &usdc.address(), Amount::new(10_000_000_000))?;
    ledger.credit(&lp, &usdt.address(), Amount::new(10_000_000_000))?;
    ledger.credit(&trader, &usdc.address(), Amount::new(2_000_000_000))?;

    // ── 2. Create the pool ──────────────────────────────────────────────
    //    A = 100, 0.04% fee, half of every fee to the admin
    let fees = FeeSchedule::new(400, 500_000)?;
    let config = PoolConfig::Stable(StableConfig::new(fees, 100)?);
    let mut clock = ManualClock::new(1_700_000_000);
    let mut registry = PoolRegistry::new();
    let key = registry.create_pool(&clock, admin, usdc, usdt, &config)?;
    let pool = registry.get_mut(&key)?;
    println!("Pool created: {} ({})", key.curve, pool.fees());

    // ── 3. Bootstrap liquidity ──────────────────────────────────────────
    let deposit = pool.add_liquidity(
        &mut ledger,
        &clock,
        &lp,
        Amount::new(10_000_000_000),
        Amount::new(10_000_000_000),
        Liquidity::ZERO,
    )?;
    println!("Minted {} shares", deposit.shares);

    // ── 4. Trade across the peg ─────────────────────────────────────────
    for size in [1_000_000u128, 100_000_000, 1_000_000_000] {
        let quote = pool.swap(
            &mut ledger,
            &clock,
            &trader,
            Side::X,
            Amount::new(size),
            Amount::ZERO,
        )?;
        println!(
            "  sell {:>13} USDC -> {:>13} USDT (fee {})",
            quote.amount_in(),
            quote.amount_out(),
            quote.fee()
        );
    }

    // ── 5. Ramp A from 100 to 1 000 over a week ─────────────────────────
    clock.advance(MIN_RAMP_TIME);
    let end = clock.now() + 7 * MIN_RAMP_TIME;
    pool.ramp_amplification(&clock, &admin, 1_000, end)?;
    for _ in 0..7 {
        clock.advance(MIN_RAMP_TIME);
        println!("  A = {}", pool.amplification(clock.now())?);
    }

    // ── 6. Collect admin fees and exit ──────────────────────────────────
    let (fee_x, fee_y) = pool.withdraw_admin_fees(&mut ledger, &admin)?;
    println!("\nAdmin collected {fee_x} USDC and {fee_y} USDT");

    let exit = pool.remove_liquidity(
        &mut ledger,
        &lp,
        deposit.shares,
        Amount::ZERO,
        Amount::ZERO,
    )?;
    println!("LP withdrew {} USDC and {} USDT", exit.amount_x, exit.amount_y);
    println!(
        "Trader now holds {} USDT",
        ledger.balance_of(&trader, &usdt.address())
    );
    Ok(())
}
