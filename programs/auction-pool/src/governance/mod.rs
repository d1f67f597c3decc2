//! External Governance Integration Module
//!
//! The pool never owns proposals. It reads them from accounts owned by the
//! governance program configured on the pool, and votes on them by CPI with
//! the pool PDA as voter.
//!
//! ## Key Components
//!
//! - **accounts**: Proposal account layout and the derived bid window
//! - **instructions**: `cast_vote` instruction data
//! - **cpi**: Signed `cast_vote` invocation
//!
//! ## Proposal States
//!
//! | Value | Governance state | Pool view |
//! |-------|------------------|-----------|
//! | 0 | Pending | Other |
//! | 1 | Cancelled | Cancelled |
//! | 2 | Active | Active |
//! | 3 | Defeated | Other |
//! | 4 | Succeeded | Other |
//! | 5 | Queued | Other |
//! | 6 | Expired | Other |
//! | 7 | Executed | Other |

pub mod accounts;
pub mod instructions;
pub mod cpi;

pub use accounts::*;
pub use instructions::*;
pub use cpi::*;
