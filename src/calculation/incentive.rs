//! Incentive calculator.
//!
//! This module converts a `(target, produced quantity, worked hours)` triple
//! into a signed monetary incentive for one worker (individual mode) or one
//! worker's share of a group payout (group mode).
//!
//! ## Computation order
//!
//! 1. A zero target short-circuits to a zero incentive.
//! 2. An enabled exact-match bonus (individual mode, produced == target)
//!    overrides tier computation entirely.
//! 3. The comparison target is the stored target in individual mode; in
//!    group mode it is recomputed from the live group context, which may
//!    diverge from the stored per-worker target if manpower or hours were
//!    edited after the target was cached.
//! 4. Shortfalls are priced linearly against the first band; surpluses are
//!    banded and cascade across lower bands unless the matched band opts
//!    out via `additional_values`.
//! 5. Group amounts are scaled by the worker's share of production hours,
//!    the sign is reapplied, and the result rounds to currency precision.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{ProductionNature, ProductionType};
use crate::models::{AuditStep, IncentiveCategory, IncentiveLine};

use super::tiers::TierSchedule;

/// Rounds a monetary amount to 2 decimal places, away from zero on ties.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The live group-entry context the comparison target is recomputed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupContext {
    /// The per-head-hour rate cached at nature selection.
    pub per_head_hour: Decimal,
    /// The live manpower value on the entry.
    pub manpower: Decimal,
    /// The live production hours on the entry.
    pub production_hrs: Decimal,
}

impl GroupContext {
    /// Recomputes the group comparison target from the live context.
    pub fn comparison_target(&self) -> Decimal {
        self.per_head_hour * self.manpower * self.production_hrs
    }
}

/// The inputs to one incentive evaluation.
#[derive(Debug, Clone)]
pub struct IncentiveInput<'a> {
    /// The active production nature (tier schedule, type, bonus).
    pub nature: &'a ProductionNature,
    /// The stored target for this worker (or group, in group mode).
    pub target: Decimal,
    /// The produced quantity being evaluated.
    pub produced_qty: Decimal,
    /// The worker's own worked hours.
    pub worked_hrs: Decimal,
    /// The live group context; required for group natures.
    pub group: Option<GroupContext>,
}

/// The result of one incentive evaluation.
#[derive(Debug, Clone)]
pub struct IncentiveResult {
    /// The signed incentive, rounded to currency precision.
    pub incentive: Decimal,
    /// Band-level breakdown (unsigned, unscaled group-level amounts).
    pub lines: Vec<IncentiveLine>,
    /// Audit steps recording each decision.
    pub audit_steps: Vec<AuditStep>,
}

impl IncentiveResult {
    fn zero(audit_steps: Vec<AuditStep>) -> Self {
        Self {
            incentive: Decimal::ZERO,
            lines: Vec::new(),
            audit_steps,
        }
    }
}

/// Calculates the incentive for one worker.
///
/// In individual mode the returned amount is the worker's own incentive; in
/// group mode it is the worker's proportional share of the group-level
/// banded payout (see the module docs for the full computation order).
///
/// Incomplete configuration (zero targets, zero denominators, unmatched
/// surpluses, missing bands) degrades to a zero incentive with the gap
/// recorded in the audit trail; it is never an error.
///
/// # Arguments
///
/// * `input` - The nature, target, quantities, and group context
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::{IncentiveInput, calculate_incentive};
/// use incentive_engine::config::{IncentiveTier, ProductionNature, ProductionType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let nature = ProductionNature {
///     name: "Stitching line 2".to_string(),
///     building: "unit_b".to_string(),
///     production_type: ProductionType::Individual,
///     manpower: 1,
///     norms: dec("40"),
///     target_bonus: None,
///     incentives: vec![
///         IncentiveTier { min: dec("0"), max: Some(dec("10")), each: dec("1"), amount: dec("1"), additional_values: false },
///         IncentiveTier { min: dec("11"), max: None, each: dec("1"), amount: dec("2"), additional_values: false },
///     ],
/// };
///
/// let result = calculate_incentive(
///     &IncentiveInput {
///         nature: &nature,
///         target: dec("40"),
///         produced_qty: dec("55"),
///         worked_hrs: dec("8"),
///         group: None,
///     },
///     1,
/// );
/// // 15 surplus units cascade: 10 × 1 + 5 × 2 = 20
/// assert_eq!(result.incentive, dec("20.00"));
/// ```
pub fn calculate_incentive(input: &IncentiveInput<'_>, step_number_start: u32) -> IncentiveResult {
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;
    let is_group = input.nature.production_type == ProductionType::Group;

    // A zero target means there is nothing to compare against.
    if input.target.is_zero() {
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "no_target".to_string(),
            rule_name: "Target Check".to_string(),
            input: serde_json::json!({
                "target": "0",
                "produced_qty": input.produced_qty.normalize().to_string()
            }),
            output: serde_json::json!({ "incentive": "0" }),
            reasoning: "Target is zero; nothing to compare production against".to_string(),
        });
        return IncentiveResult::zero(audit_steps);
    }

    // Exact-match bonus overrides tier computation entirely.
    if !is_group {
        if let Some(bonus) = &input.nature.target_bonus {
            if bonus.enabled && input.produced_qty == input.target {
                let value = round_currency(bonus.value);
                audit_steps.push(AuditStep {
                    step_number,
                    rule_id: "exact_match_bonus".to_string(),
                    rule_name: "Exact-Match Bonus".to_string(),
                    input: serde_json::json!({
                        "target": input.target.normalize().to_string(),
                        "produced_qty": input.produced_qty.normalize().to_string()
                    }),
                    output: serde_json::json!({ "incentive": value.normalize().to_string() }),
                    reasoning: format!(
                        "Produced quantity equals target exactly; flat bonus {} overrides tiers",
                        value.normalize()
                    ),
                });
                return IncentiveResult {
                    incentive: value,
                    lines: vec![IncentiveLine {
                        category: IncentiveCategory::ExactBonus,
                        band_min: Decimal::ZERO,
                        band_max: None,
                        units: input.produced_qty,
                        each: Decimal::ONE,
                        rate: bonus.value,
                        amount: value,
                    }],
                    audit_steps,
                };
            }
        }
    }

    // The comparison target: group mode recomputes from the live context,
    // which may diverge from the stored target.
    let comparison_target = if is_group {
        let Some(group) = input.group else {
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "comparison_target".to_string(),
                rule_name: "Comparison Target".to_string(),
                input: serde_json::json!({ "stored_target": input.target.normalize().to_string() }),
                output: serde_json::json!({ "incentive": "0" }),
                reasoning: "Group nature without group context; incentive defaults to 0"
                    .to_string(),
            });
            return IncentiveResult::zero(audit_steps);
        };
        let comparison = group.comparison_target();
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "comparison_target".to_string(),
            rule_name: "Comparison Target".to_string(),
            input: serde_json::json!({
                "stored_target": input.target.normalize().to_string(),
                "per_head_hour": group.per_head_hour.normalize().to_string(),
                "manpower": group.manpower.normalize().to_string(),
                "production_hrs": group.production_hrs.normalize().to_string()
            }),
            output: serde_json::json!({
                "comparison_target": comparison.normalize().to_string()
            }),
            reasoning: format!(
                "Group comparison target recomputed from live context: {} × {} × {} = {}",
                group.per_head_hour.normalize(),
                group.manpower.normalize(),
                group.production_hrs.normalize(),
                comparison.normalize()
            ),
        });
        step_number += 1;
        comparison
    } else {
        input.target
    };

    let extra = input.produced_qty - comparison_target;
    if extra.is_zero() {
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "on_target".to_string(),
            rule_name: "Production Delta".to_string(),
            input: serde_json::json!({
                "comparison_target": comparison_target.normalize().to_string(),
                "produced_qty": input.produced_qty.normalize().to_string()
            }),
            output: serde_json::json!({ "incentive": "0" }),
            reasoning: "Production met the target exactly; no surplus or shortfall".to_string(),
        });
        return IncentiveResult::zero(audit_steps);
    }

    let shortfall = extra < Decimal::ZERO;
    let abs = extra.abs();
    let schedule = TierSchedule::new(&input.nature.incentives);

    let mut lines: Vec<IncentiveLine> = Vec::new();
    let mut amount = Decimal::ZERO;

    if shortfall {
        // Shortfalls always price against the first band, in or out of range.
        match schedule.first() {
            Some(tier) if tier.each > Decimal::ZERO => {
                amount = (abs / tier.each) * tier.amount;
                lines.push(IncentiveLine {
                    category: IncentiveCategory::Shortfall,
                    band_min: tier.min,
                    band_max: tier.max,
                    units: abs,
                    each: tier.each,
                    rate: tier.amount,
                    amount,
                });
                audit_steps.push(AuditStep {
                    step_number,
                    rule_id: "shortfall_band".to_string(),
                    rule_name: "Shortfall Pricing".to_string(),
                    input: serde_json::json!({
                        "shortfall_units": abs.normalize().to_string(),
                        "each": tier.each.normalize().to_string(),
                        "rate": tier.amount.normalize().to_string()
                    }),
                    output: serde_json::json!({ "amount": amount.normalize().to_string() }),
                    reasoning: format!(
                        "Shortfall of {} priced against the first band: {} / {} × {} = {}",
                        abs.normalize(),
                        abs.normalize(),
                        tier.each.normalize(),
                        tier.amount.normalize(),
                        amount.normalize()
                    ),
                });
                step_number += 1;
            }
            _ => {
                audit_steps.push(AuditStep {
                    step_number,
                    rule_id: "shortfall_band".to_string(),
                    rule_name: "Shortfall Pricing".to_string(),
                    input: serde_json::json!({ "shortfall_units": abs.normalize().to_string() }),
                    output: serde_json::json!({ "incentive": "0" }),
                    reasoning: "No usable first band to price the shortfall against".to_string(),
                });
                return IncentiveResult::zero(audit_steps);
            }
        }
    } else {
        let Some(matched) = schedule.match_surplus(abs) else {
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "surplus_band".to_string(),
                rule_name: "Surplus Band Match".to_string(),
                input: serde_json::json!({ "surplus_units": abs.normalize().to_string() }),
                output: serde_json::json!({ "incentive": "0" }),
                reasoning: format!(
                    "No band covers a surplus of {}; incentive defaults to 0",
                    abs.normalize()
                ),
            });
            return IncentiveResult::zero(audit_steps);
        };

        if matched.additional_values {
            // The matched band prices the whole surplus alone.
            if matched.each > Decimal::ZERO {
                amount = (abs / matched.each) * matched.amount;
                lines.push(IncentiveLine {
                    category: IncentiveCategory::Surplus,
                    band_min: matched.min,
                    band_max: matched.max,
                    units: abs,
                    each: matched.each,
                    rate: matched.amount,
                    amount,
                });
            }
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "surplus_band".to_string(),
                rule_name: "Surplus Band (No Cascade)".to_string(),
                input: serde_json::json!({
                    "surplus_units": abs.normalize().to_string(),
                    "band_min": matched.min.normalize().to_string(),
                    "each": matched.each.normalize().to_string(),
                    "rate": matched.amount.normalize().to_string()
                }),
                output: serde_json::json!({ "amount": amount.normalize().to_string() }),
                reasoning: format!(
                    "Matched band pays the full surplus alone: {} / {} × {} = {}",
                    abs.normalize(),
                    matched.each.normalize(),
                    matched.amount.normalize(),
                    amount.normalize()
                ),
            });
            step_number += 1;
        } else {
            // Cascading accrual: each band up to the matched one contributes
            // the units it covers.
            for portion in schedule.cascade(matched, abs) {
                let band_amount = (portion.units / portion.tier.each) * portion.tier.amount;
                amount += band_amount;
                lines.push(IncentiveLine {
                    category: IncentiveCategory::Surplus,
                    band_min: portion.tier.min,
                    band_max: portion.tier.max,
                    units: portion.units,
                    each: portion.tier.each,
                    rate: portion.tier.amount,
                    amount: band_amount,
                });
                audit_steps.push(AuditStep {
                    step_number,
                    rule_id: "surplus_cascade".to_string(),
                    rule_name: "Surplus Cascade Band".to_string(),
                    input: serde_json::json!({
                        "band_min": portion.tier.min.normalize().to_string(),
                        "units": portion.units.normalize().to_string(),
                        "each": portion.tier.each.normalize().to_string(),
                        "rate": portion.tier.amount.normalize().to_string()
                    }),
                    output: serde_json::json!({ "amount": band_amount.normalize().to_string() }),
                    reasoning: format!(
                        "Band from {} contributes {} units: {} / {} × {} = {}",
                        portion.tier.min.normalize(),
                        portion.units.normalize(),
                        portion.units.normalize(),
                        portion.tier.each.normalize(),
                        portion.tier.amount.normalize(),
                        band_amount.normalize()
                    ),
                });
                step_number += 1;
            }
        }
    }

    // Group mode distributes the group-level amount by the worker's share
    // of the entry's production hours.
    if let Some(group) = input.group.filter(|_| is_group) {
        let share = if group.production_hrs > Decimal::ZERO {
            input.worked_hrs / group.production_hrs
        } else {
            Decimal::ZERO
        };
        let scaled = amount * share;
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "group_allocation".to_string(),
            rule_name: "Group Allocation".to_string(),
            input: serde_json::json!({
                "group_amount": amount.normalize().to_string(),
                "worked_hrs": input.worked_hrs.normalize().to_string(),
                "production_hrs": group.production_hrs.normalize().to_string()
            }),
            output: serde_json::json!({ "amount": scaled.normalize().to_string() }),
            reasoning: format!(
                "Worker share of group amount: {} × ({} / {}) = {}",
                amount.normalize(),
                input.worked_hrs.normalize(),
                group.production_hrs.normalize(),
                scaled.normalize()
            ),
        });
        amount = scaled;
    }

    let incentive = round_currency(if shortfall { -amount } else { amount });

    IncentiveResult {
        incentive,
        lines,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IncentiveTier, TargetBonus};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(min: &str, max: Option<&str>, each: &str, amount: &str, additional: bool) -> IncentiveTier {
        IncentiveTier {
            min: dec(min),
            max: max.map(dec),
            each: dec(each),
            amount: dec(amount),
            additional_values: additional,
        }
    }

    fn individual_nature(tiers: Vec<IncentiveTier>, bonus: Option<TargetBonus>) -> ProductionNature {
        ProductionNature {
            name: "Stitching line 2".to_string(),
            building: "unit_b".to_string(),
            production_type: ProductionType::Individual,
            manpower: 1,
            norms: dec("40"),
            target_bonus: bonus,
            incentives: tiers,
        }
    }

    fn group_nature(tiers: Vec<IncentiveTier>) -> ProductionNature {
        ProductionNature {
            name: "Assembly cell 3".to_string(),
            building: "unit_c".to_string(),
            production_type: ProductionType::Group,
            manpower: 10,
            norms: dec("400"),
            target_bonus: None,
            incentives: tiers,
        }
    }

    fn cascade_tiers() -> Vec<IncentiveTier> {
        vec![
            tier("0", Some("10"), "1", "1", false),
            tier("11", None, "1", "2", false),
        ]
    }

    #[test]
    fn test_zero_target_yields_zero_incentive() {
        let nature = individual_nature(cascade_tiers(), None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("0"),
                produced_qty: dec("50"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, Decimal::ZERO);
        assert!(result.lines.is_empty());
        assert_eq!(result.audit_steps[0].rule_id, "no_target");
    }

    #[test]
    fn test_exact_match_bonus_overrides_tiers() {
        let nature = individual_nature(
            cascade_tiers(),
            Some(TargetBonus {
                enabled: true,
                value: dec("500"),
            }),
        );
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("100"),
                produced_qty: dec("100"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, dec("500.00"));
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].category, IncentiveCategory::ExactBonus);
        assert_eq!(result.audit_steps[0].rule_id, "exact_match_bonus");
    }

    #[test]
    fn test_disabled_bonus_falls_through_to_on_target_zero() {
        let nature = individual_nature(
            cascade_tiers(),
            Some(TargetBonus {
                enabled: false,
                value: dec("500"),
            }),
        );
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("100"),
                produced_qty: dec("100"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        // No bonus, and produced == target means no surplus or shortfall.
        assert_eq!(result.incentive, Decimal::ZERO);
        assert_eq!(result.audit_steps[0].rule_id, "on_target");
    }

    #[test]
    fn test_shortfall_always_uses_first_band() {
        // abs = 80 is outside the first band's 0-50 range; it still prices
        // the shortfall.
        let nature = individual_nature(
            vec![
                tier("0", Some("50"), "1", "2", false),
                tier("51", None, "1", "5", false),
            ],
            None,
        );
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("100"),
                produced_qty: dec("20"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, dec("-160.00"));
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].category, IncentiveCategory::Shortfall);
        assert_eq!(result.lines[0].units, dec("80"));
    }

    #[test]
    fn test_cascading_surplus_accrues_across_bands() {
        let nature = individual_nature(cascade_tiers(), None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("40"),
                produced_qty: dec("55"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        // 15 surplus: band 0-10 pays 10 × 1, open band pays 5 × 2.
        assert_eq!(result.incentive, dec("20.00"));
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].amount, dec("10"));
        assert_eq!(result.lines[1].amount, dec("10"));
    }

    #[test]
    fn test_non_cascading_surplus_uses_matched_band_alone() {
        let nature = individual_nature(
            vec![
                tier("0", Some("10"), "1", "1", true),
                tier("11", None, "1", "2", true),
            ],
            None,
        );
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("40"),
                produced_qty: dec("55"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        // 15 surplus matches the open band alone: 15 × 2 = 30.
        assert_eq!(result.incentive, dec("30.00"));
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].units, dec("15"));
    }

    #[test]
    fn test_unmatched_surplus_yields_zero() {
        let nature = individual_nature(
            vec![
                tier("0", Some("10"), "1", "1", false),
                tier("20", Some("30"), "1", "2", false),
            ],
            None,
        );
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("40"),
                produced_qty: dec("55"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, Decimal::ZERO);
        assert_eq!(result.audit_steps.last().unwrap().rule_id, "surplus_band");
    }

    #[test]
    fn test_empty_schedule_shortfall_yields_zero() {
        let nature = individual_nature(vec![], None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("100"),
                produced_qty: dec("60"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_zero_each_first_band_shortfall_yields_zero() {
        let nature = individual_nature(vec![tier("0", Some("50"), "0", "2", false)], None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("100"),
                produced_qty: dec("60"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_group_allocation_scales_by_hours_share() {
        // Group amount 100 over 8 production hours; worker with 4 hours
        // receives half.
        let nature = group_nature(vec![tier("0", None, "1", "1", false)]);
        let group = GroupContext {
            per_head_hour: dec("5"),
            manpower: dec("10"),
            production_hrs: dec("8"),
        };
        // comparison target = 5 × 10 × 8 = 400; produced 500 → surplus 100
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("500"),
                worked_hrs: dec("4"),
                group: Some(group),
            },
            1,
        );
        assert_eq!(result.incentive, dec("50.00"));
    }

    #[test]
    fn test_group_comparison_target_recomputed_from_live_context() {
        // Stored target is stale (400); live manpower dropped to 8, so the
        // comparison target is 320 and produced 500 is a 180 surplus.
        let nature = group_nature(vec![tier("0", None, "1", "1", false)]);
        let group = GroupContext {
            per_head_hour: dec("5"),
            manpower: dec("8"),
            production_hrs: dec("8"),
        };
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("500"),
                worked_hrs: dec("8"),
                group: Some(group),
            },
            1,
        );
        // 180 surplus × 1, full share (8/8) = 180
        assert_eq!(result.incentive, dec("180.00"));
        assert_eq!(result.audit_steps[0].rule_id, "comparison_target");
        assert_eq!(result.audit_steps[0].output["comparison_target"], "320");
    }

    #[test]
    fn test_group_shortfall_scales_and_keeps_sign() {
        let nature = group_nature(vec![tier("0", Some("25"), "1", "2", false)]);
        let group = GroupContext {
            per_head_hour: dec("5"),
            manpower: dec("10"),
            production_hrs: dec("8"),
        };
        // comparison 400, produced 380 → shortfall 20 × 2 = 40 group-level;
        // worker with 2 of 8 hours owes a quarter.
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("380"),
                worked_hrs: dec("2"),
                group: Some(group),
            },
            1,
        );
        assert_eq!(result.incentive, dec("-10.00"));
    }

    #[test]
    fn test_group_zero_production_hrs_yields_zero_share() {
        let nature = group_nature(vec![tier("0", None, "1", "1", false)]);
        let group = GroupContext {
            per_head_hour: dec("5"),
            manpower: dec("10"),
            production_hrs: dec("0"),
        };
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("500"),
                worked_hrs: dec("8"),
                group: Some(group),
            },
            1,
        );
        // Comparison target recomputes to 0, so produced is all surplus, but
        // the zero-hour share zeroes the payout.
        assert_eq!(result.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_group_nature_without_context_yields_zero() {
        let nature = group_nature(vec![tier("0", None, "1", "1", false)]);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("500"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_bonus_ignored_in_group_mode() {
        let mut nature = group_nature(vec![tier("0", None, "1", "1", false)]);
        nature.target_bonus = Some(TargetBonus {
            enabled: true,
            value: dec("500"),
        });
        let group = GroupContext {
            per_head_hour: dec("5"),
            manpower: dec("10"),
            production_hrs: dec("8"),
        };
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("400"),
                produced_qty: dec("400"),
                worked_hrs: dec("8"),
                group: Some(group),
            },
            1,
        );
        // produced == target but group mode never pays the exact bonus
        assert_eq!(result.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_to_currency_precision() {
        // 1 surplus unit at each=3, amount=1 → 0.333... rounds to 0.33
        let nature = individual_nature(vec![tier("0", None, "3", "1", false)], None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("40"),
                produced_qty: dec("41"),
                worked_hrs: dec("8"),
                group: None,
            },
            1,
        );
        assert_eq!(result.incentive, dec("0.33"));
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let nature = individual_nature(cascade_tiers(), None);
        let input = IncentiveInput {
            nature: &nature,
            target: dec("40"),
            produced_qty: dec("55"),
            worked_hrs: dec("8"),
            group: None,
        };
        let first = calculate_incentive(&input, 1);
        let second = calculate_incentive(&input, 1);
        assert_eq!(first.incentive, second.incentive);
        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn test_step_numbers_sequential_across_cascade() {
        let nature = individual_nature(cascade_tiers(), None);
        let result = calculate_incentive(
            &IncentiveInput {
                nature: &nature,
                target: dec("40"),
                produced_qty: dec("55"),
                worked_hrs: dec("8"),
                group: None,
            },
            5,
        );
        assert_eq!(result.audit_steps[0].step_number, 5);
        assert_eq!(result.audit_steps[1].step_number, 6);
    }

    #[test]
    fn test_round_currency_midpoint_away_from_zero() {
        assert_eq!(round_currency(dec("1.005")), dec("1.01"));
        assert_eq!(round_currency(dec("-1.005")), dec("-1.01"));
        assert_eq!(round_currency(dec("2.344")), dec("2.34"));
    }
}
