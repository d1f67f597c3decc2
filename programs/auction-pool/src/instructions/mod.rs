pub mod initialize_pool;
pub mod deposit;
pub mod withdraw;
pub mod bid;
pub mod vote;
pub mod refund;
pub mod proposal_admin;
pub mod claim_reward;
pub mod withdraw_fees;
pub mod multicall;
pub mod admin;
pub mod views;

// Glob re-exports for Anchor compatibility
// Note: "ambiguous glob re-exports" warning for `handler` is benign -
// lib.rs uses fully qualified paths (e.g., instructions::deposit::handler)
#[allow(ambiguous_glob_reexports)]
pub use initialize_pool::*;
pub use deposit::*;
pub use withdraw::*;
pub use bid::*;
pub use vote::*;
pub use refund::*;
pub use proposal_admin::*;
pub use claim_reward::*;
pub use withdraw_fees::*;
pub use multicall::*;
pub use admin::*;
pub use views::*;
