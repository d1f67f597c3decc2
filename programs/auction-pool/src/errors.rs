use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    // ============================================================
    // STATE ERRORS (6000-6019)
    // ============================================================

    #[msg("Pool is paused")]
    Paused,

    #[msg("Pool is already paused")]
    AlreadyPaused,

    #[msg("Pool is not paused")]
    NotPaused,

    #[msg("Withdrawal blocked while holding the highest bid on an open proposal")]
    ActiveBid,

    #[msg("Withdrawal blocked until the post-vote delay period has elapsed")]
    ActiveDelayPeriod,

    // ============================================================
    // DEPOSIT / WITHDRAW ERRORS (6020-6039)
    // ============================================================

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Amount exceeds deposited balance")]
    InvalidBalance,

    #[msg("Token account does not match the expected mint or owner")]
    InvalidTokenAccount,

    #[msg("Position does not belong to this pool or user")]
    InvalidPosition,

    // ============================================================
    // AUCTION ERRORS (6040-6069)
    // ============================================================

    #[msg("Proposal does not exist in the governance program")]
    InvalidProposal,

    #[msg("Proposal is not in a state that allows this action")]
    InvalidProposalState,

    #[msg("Proposal is blocked")]
    ProposalBlocked,

    #[msg("Proposal is already blocked")]
    ProposalInactive,

    #[msg("Proposal is still active")]
    ProposalActive,

    #[msg("Bidding period has ended")]
    BidEnded,

    #[msg("Bidding period is still active")]
    BidActive,

    #[msg("Bid must exceed the current highest bid")]
    LowBid,

    #[msg("Proposal has no bid to vote with")]
    NoBid,

    #[msg("Pool already voted on this proposal")]
    AlreadyVoted,

    #[msg("Previous highest bidder accounts are missing or do not match")]
    InvalidPreviousBidder,

    // ============================================================
    // CONFIGURATION ERRORS (6070-6099)
    // ============================================================

    #[msg("Delay period must be greater than zero")]
    InvalidPeriod,

    #[msg("Delay period is unchanged")]
    SamePeriod,

    #[msg("Delay period exceeds the maximum")]
    ExceedsMaxDelay,

    #[msg("Invalid fee recipient")]
    InvalidRecipient,

    #[msg("Invalid governance program")]
    InvalidGovernance,

    #[msg("Fee cut exceeds the maximum")]
    FeeTooHigh,

    #[msg("Start timestamp is in the past")]
    InvalidStartTimestamp,

    #[msg("Start timestamp must be before the end timestamp")]
    HighTimestamp,

    #[msg("End timestamp is in the past or not after the start timestamp")]
    InvalidEndTimestamp,

    #[msg("Bribe reward rate exceeds the maximum emission")]
    RewardRateTooHigh,

    #[msg("Bribe reward grace period has not elapsed")]
    GracePeriod,

    #[msg("Invalid forwarder program")]
    InvalidForwarder,

    // ============================================================
    // AUTHORIZATION ERRORS (6100-6109)
    // ============================================================

    #[msg("Unauthorized")]
    Unauthorized,

    // ============================================================
    // ARITHMETIC ERRORS (6110-6129)
    // ============================================================

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Arithmetic underflow")]
    Underflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Deposit totals out of sync with positions")]
    LedgerDesync,
}
