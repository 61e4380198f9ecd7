//! Quota model: target-quantity derivation.
//!
//! This module derives the target quantity a worker or group is measured
//! against, from the configured norms, manpower, and hours. All divisions
//! guard against zero denominators; incomplete configuration degrades to a
//! zero target rather than an error.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of a target derivation, including the audit step.
#[derive(Debug, Clone)]
pub struct TargetResult {
    /// The derived target quantity.
    pub target: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Computes the per-head-hour production rate for a group nature.
///
/// `per_head_hour = norms / manpower / shift_hrs`, where `manpower` is the
/// nature's ORIGINAL configured headcount and `shift_hrs` the reference
/// shift length. The rate is fixed at nature/shift selection; later edits
/// to the entry's live manpower or production hours do not change it.
///
/// Returns zero if either denominator is zero.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::per_head_hour;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = per_head_hour(
///     Decimal::from_str("400").unwrap(),
///     Decimal::from_str("10").unwrap(),
///     Decimal::from_str("8").unwrap(),
/// );
/// assert_eq!(rate, Decimal::from_str("5").unwrap());
/// ```
pub fn per_head_hour(norms: Decimal, manpower: Decimal, shift_hrs: Decimal) -> Decimal {
    if manpower.is_zero() || shift_hrs.is_zero() {
        return Decimal::ZERO;
    }
    norms / manpower / shift_hrs
}

/// Derives an individual worker's target quantity.
///
/// `target = (norms / shift_hrs) * worked_hrs`: the nature's baseline norms
/// scaled linearly by the worker's own hours. Returns zero if `shift_hrs`
/// is zero.
///
/// # Arguments
///
/// * `norms` - The nature's baseline quantity for one reference shift
/// * `shift_hrs` - The reference shift length in hours
/// * `worked_hrs` - The hours this worker actually worked
/// * `step_number` - The audit trail step number for this derivation
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::individual_target;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = individual_target(
///     Decimal::from_str("40").unwrap(),
///     Decimal::from_str("8").unwrap(),
///     Decimal::from_str("4").unwrap(),
///     1,
/// );
/// assert_eq!(result.target, Decimal::from_str("20").unwrap());
/// ```
pub fn individual_target(
    norms: Decimal,
    shift_hrs: Decimal,
    worked_hrs: Decimal,
    step_number: u32,
) -> TargetResult {
    let target = if shift_hrs.is_zero() {
        Decimal::ZERO
    } else {
        (norms / shift_hrs) * worked_hrs
    };

    let reasoning = if shift_hrs.is_zero() {
        "Shift hours not configured; target defaults to 0".to_string()
    } else {
        format!(
            "Individual target: ({} norms / {} shift hrs) × {} worked hrs = {}",
            norms.normalize(),
            shift_hrs.normalize(),
            worked_hrs.normalize(),
            target.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "individual_target".to_string(),
        rule_name: "Individual Target Derivation".to_string(),
        input: serde_json::json!({
            "norms": norms.normalize().to_string(),
            "shift_hrs": shift_hrs.normalize().to_string(),
            "worked_hrs": worked_hrs.normalize().to_string()
        }),
        output: serde_json::json!({
            "target": target.normalize().to_string()
        }),
        reasoning,
    };

    TargetResult { target, audit_step }
}

/// Derives the shared target quantity for a group entry.
///
/// `target = per_head_hour * manpower * production_hrs`, where `manpower`
/// and `production_hrs` are the live, editable entry-context values. Edits
/// to either retrigger this derivation; the cached `per_head_hour` rate
/// does not change.
///
/// # Arguments
///
/// * `per_head_hour` - The cached per-head-hour rate from nature selection
/// * `manpower` - The live manpower value on the entry
/// * `production_hrs` - The live production hours on the entry
/// * `step_number` - The audit trail step number for this derivation
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::group_target;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = group_target(
///     Decimal::from_str("5").unwrap(),
///     Decimal::from_str("10").unwrap(),
///     Decimal::from_str("8").unwrap(),
///     1,
/// );
/// assert_eq!(result.target, Decimal::from_str("400").unwrap());
/// ```
pub fn group_target(
    per_head_hour: Decimal,
    manpower: Decimal,
    production_hrs: Decimal,
    step_number: u32,
) -> TargetResult {
    let target = per_head_hour * manpower * production_hrs;

    let audit_step = AuditStep {
        step_number,
        rule_id: "group_target".to_string(),
        rule_name: "Group Target Derivation".to_string(),
        input: serde_json::json!({
            "per_head_hour": per_head_hour.normalize().to_string(),
            "manpower": manpower.normalize().to_string(),
            "production_hrs": production_hrs.normalize().to_string()
        }),
        output: serde_json::json!({
            "target": target.normalize().to_string()
        }),
        reasoning: format!(
            "Group target: {} per head-hour × {} heads × {} production hrs = {}",
            per_head_hour.normalize(),
            manpower.normalize(),
            production_hrs.normalize(),
            target.normalize()
        ),
    };

    TargetResult { target, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_per_head_hour_basic() {
        // 400 norms / 10 heads / 8 hrs = 5 per head-hour
        assert_eq!(per_head_hour(dec("400"), dec("10"), dec("8")), dec("5"));
    }

    #[test]
    fn test_per_head_hour_zero_manpower_is_zero() {
        assert_eq!(per_head_hour(dec("400"), dec("0"), dec("8")), Decimal::ZERO);
    }

    #[test]
    fn test_per_head_hour_zero_shift_hrs_is_zero() {
        assert_eq!(per_head_hour(dec("400"), dec("10"), dec("0")), Decimal::ZERO);
    }

    #[test]
    fn test_individual_target_full_shift() {
        let result = individual_target(dec("40"), dec("8"), dec("8"), 1);
        assert_eq!(result.target, dec("40"));
        assert_eq!(result.audit_step.rule_id, "individual_target");
    }

    #[test]
    fn test_individual_target_half_shift() {
        let result = individual_target(dec("40"), dec("8"), dec("4"), 1);
        assert_eq!(result.target, dec("20"));
    }

    #[test]
    fn test_individual_target_zero_shift_hrs_is_zero() {
        let result = individual_target(dec("40"), dec("0"), dec("8"), 1);
        assert_eq!(result.target, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("defaults to 0"));
    }

    #[test]
    fn test_individual_target_linear_in_worked_hrs() {
        let single = individual_target(dec("40"), dec("8"), dec("3"), 1);
        let double = individual_target(dec("40"), dec("8"), dec("6"), 1);
        assert_eq!(double.target, single.target * dec("2"));
    }

    #[test]
    fn test_group_target_basic() {
        let result = group_target(dec("5"), dec("10"), dec("8"), 1);
        assert_eq!(result.target, dec("400"));
        assert_eq!(result.audit_step.rule_id, "group_target");
    }

    #[test]
    fn test_group_target_tracks_live_manpower() {
        // Same cached rate, fewer live heads
        let result = group_target(dec("5"), dec("8"), dec("8"), 1);
        assert_eq!(result.target, dec("320"));
    }

    #[test]
    fn test_group_target_zero_production_hrs_is_zero() {
        let result = group_target(dec("5"), dec("10"), dec("0"), 1);
        assert_eq!(result.target, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_number_preserved() {
        let result = individual_target(dec("40"), dec("8"), dec("8"), 7);
        assert_eq!(result.audit_step.step_number, 7);
    }

    proptest! {
        /// Doubling worked hours doubles the individual target.
        #[test]
        fn prop_individual_target_linear(worked in 0u32..1000) {
            let worked = Decimal::from(worked);
            let single = individual_target(dec("40"), dec("8"), worked, 1);
            let double = individual_target(dec("40"), dec("8"), worked * dec("2"), 1);
            prop_assert_eq!(double.target, single.target * dec("2"));
        }

        /// Target derivation is a pure function: same inputs, same output.
        #[test]
        fn prop_individual_target_idempotent(norms in 1u32..10_000, worked in 0u32..24) {
            let norms = Decimal::from(norms);
            let worked = Decimal::from(worked);
            let first = individual_target(norms, dec("8"), worked, 1);
            let second = individual_target(norms, dec("8"), worked, 1);
            prop_assert_eq!(first.target, second.target);
        }
    }
}
