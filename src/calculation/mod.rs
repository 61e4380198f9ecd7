//! Calculation logic for the Production Incentive Engine.
//!
//! This module contains the pure calculation core: quota/target derivation
//! for individual and group production, the tier schedule with surplus
//! matching and cascading accrual, and the incentive calculator that turns
//! a (target, produced quantity) pair into a signed monetary amount.

mod incentive;
mod quota;
mod tiers;

pub use incentive::{
    GroupContext, IncentiveInput, IncentiveResult, calculate_incentive, round_currency,
};
pub use quota::{TargetResult, group_target, individual_target, per_head_hour};
pub use tiers::{BandPortion, TierSchedule};
