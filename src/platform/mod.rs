//! Collaborators a pool needs from its host: custody and time.
//!
//! | Item | Role |
//! |------|------|
//! | [`Ledger`] | withdraw / deposit / mint / burn / balance-of |
//! | [`MintAuthority`], [`BurnAuthority`] | share-token capabilities held by a pool |
//! | [`Clock`] | current time in seconds |
//! | [`MemoryLedger`], [`ManualClock`] | in-memory implementations |
//! | [`SystemClock`] | wall-clock time |

mod clock;
mod ledger;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{BurnAuthority, Ledger, MintAuthority};
pub use memory::MemoryLedger;
