pub mod pool_state;
pub mod user_position;
pub mod proposal_bid;
pub mod reward_index;

pub use pool_state::*;
pub use user_position::*;
pub use proposal_bid::*;
pub use reward_index::*;
