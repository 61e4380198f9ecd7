//! Tier schedule: ordered incentive bands with surplus matching and
//! cascading accrual.
//!
//! A nature's bands may arrive in any order; the schedule sorts them by
//! `min` ascending and treats `[min, max]` as inclusive, with a missing
//! `max` marking the open-ended top band. Tier counts per nature are small
//! (well under 20), so lookups are linear scans.

use rust_decimal::Decimal;

use crate::config::IncentiveTier;

/// The units one band contributes during a cascading accrual.
#[derive(Debug, Clone)]
pub struct BandPortion<'a> {
    /// The band the units fall into.
    pub tier: &'a IncentiveTier,
    /// The number of surplus units attributed to this band.
    pub units: Decimal,
}

/// An ordered view over a nature's incentive bands.
#[derive(Debug, Clone)]
pub struct TierSchedule {
    tiers: Vec<IncentiveTier>,
}

impl TierSchedule {
    /// Builds a schedule from a nature's configured bands, sorted by `min`
    /// ascending.
    pub fn new(tiers: &[IncentiveTier]) -> Self {
        let mut sorted: Vec<IncentiveTier> = tiers.to_vec();
        sorted.sort_by(|a, b| a.min.cmp(&b.min));
        Self { tiers: sorted }
    }

    /// Returns true when the schedule has no bands.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Returns the number of bands in the schedule.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns the first band in min-ascending order.
    ///
    /// Shortfalls are always priced against this band, regardless of
    /// whether the shortfall magnitude falls inside its range.
    pub fn first(&self) -> Option<&IncentiveTier> {
        self.tiers.first()
    }

    /// Finds the band whose `[min, max]` range contains a surplus magnitude.
    ///
    /// A missing `max` is treated as infinity. Returns `None` when no band
    /// matches (a configuration gap, reported as a zero incentive upstream).
    ///
    /// # Examples
    ///
    /// ```
    /// use incentive_engine::calculation::TierSchedule;
    /// use incentive_engine::config::IncentiveTier;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let dec = |s: &str| Decimal::from_str(s).unwrap();
    /// let schedule = TierSchedule::new(&[
    ///     IncentiveTier { min: dec("0"), max: Some(dec("10")), each: dec("1"), amount: dec("1"), additional_values: false },
    ///     IncentiveTier { min: dec("11"), max: None, each: dec("1"), amount: dec("2"), additional_values: false },
    /// ]);
    /// assert_eq!(schedule.match_surplus(dec("15")).unwrap().min, dec("11"));
    /// assert!(schedule.match_surplus(dec("15")).unwrap().max.is_none());
    /// ```
    pub fn match_surplus(&self, abs: Decimal) -> Option<&IncentiveTier> {
        self.tiers
            .iter()
            .find(|tier| abs >= tier.min && tier.max.is_none_or(|max| abs <= max))
    }

    /// Splits a surplus magnitude across every band up to and including the
    /// matched one, in min-ascending order.
    ///
    /// Bands contribute contiguously: a bounded band covers units up to its
    /// `max`, the open-ended band covers whatever remains, and the walk
    /// stops once the full magnitude is covered. Bands with a zero or
    /// negative `each` cannot price units and are skipped.
    pub fn cascade(&self, matched: &IncentiveTier, abs: Decimal) -> Vec<BandPortion<'_>> {
        let mut portions = Vec::new();
        let mut covered = Decimal::ZERO;

        for tier in self.tiers.iter().filter(|t| t.min <= matched.min) {
            if covered >= abs {
                break;
            }
            if tier.each <= Decimal::ZERO {
                continue;
            }

            let band_upper = match tier.max {
                Some(max) => abs.min(max),
                None => abs,
            };
            let units = band_upper - covered;
            if units <= Decimal::ZERO {
                continue;
            }

            portions.push(BandPortion { tier, units });
            covered = band_upper;
        }

        portions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(min: &str, max: Option<&str>, each: &str, amount: &str) -> IncentiveTier {
        IncentiveTier {
            min: dec(min),
            max: max.map(dec),
            each: dec(each),
            amount: dec(amount),
            additional_values: false,
        }
    }

    fn two_band_schedule() -> TierSchedule {
        TierSchedule::new(&[tier("0", Some("10"), "1", "1"), tier("11", None, "1", "2")])
    }

    #[test]
    fn test_schedule_sorts_by_min_ascending() {
        let schedule = TierSchedule::new(&[tier("51", None, "1", "5"), tier("0", Some("50"), "1", "2")]);
        assert_eq!(schedule.first().unwrap().min, dec("0"));
    }

    #[test]
    fn test_first_band_on_empty_schedule_is_none() {
        let schedule = TierSchedule::new(&[]);
        assert!(schedule.is_empty());
        assert!(schedule.first().is_none());
    }

    #[test]
    fn test_match_surplus_inclusive_bounds() {
        let schedule = two_band_schedule();
        assert_eq!(schedule.match_surplus(dec("0")).unwrap().min, dec("0"));
        assert_eq!(schedule.match_surplus(dec("10")).unwrap().min, dec("0"));
        assert_eq!(schedule.match_surplus(dec("11")).unwrap().min, dec("11"));
    }

    #[test]
    fn test_match_surplus_open_ended_top_band() {
        let schedule = two_band_schedule();
        assert_eq!(schedule.match_surplus(dec("10000")).unwrap().min, dec("11"));
    }

    #[test]
    fn test_match_surplus_gap_returns_none() {
        // Bands 0-10 and 20-30 leave 10 < abs < 20 unmatched
        let schedule = TierSchedule::new(&[
            tier("0", Some("10"), "1", "1"),
            tier("20", Some("30"), "1", "2"),
        ]);
        assert!(schedule.match_surplus(dec("15")).is_none());
    }

    #[test]
    fn test_cascade_splits_across_bands() {
        let schedule = two_band_schedule();
        let matched = schedule.match_surplus(dec("15")).unwrap();

        let portions = schedule.cascade(matched, dec("15"));
        assert_eq!(portions.len(), 2);
        assert_eq!(portions[0].units, dec("10"));
        assert_eq!(portions[0].tier.amount, dec("1"));
        assert_eq!(portions[1].units, dec("5"));
        assert_eq!(portions[1].tier.amount, dec("2"));
    }

    #[test]
    fn test_cascade_within_first_band_only() {
        let schedule = two_band_schedule();
        let matched = schedule.match_surplus(dec("7")).unwrap();

        let portions = schedule.cascade(matched, dec("7"));
        assert_eq!(portions.len(), 1);
        assert_eq!(portions[0].units, dec("7"));
    }

    #[test]
    fn test_cascade_three_bands() {
        let schedule = TierSchedule::new(&[
            tier("0", Some("25"), "1", "2"),
            tier("26", Some("75"), "1", "3"),
            tier("76", None, "1", "4"),
        ]);
        let matched = schedule.match_surplus(dec("100")).unwrap();

        let portions = schedule.cascade(matched, dec("100"));
        assert_eq!(portions.len(), 3);
        assert_eq!(portions[0].units, dec("25"));
        assert_eq!(portions[1].units, dec("50"));
        assert_eq!(portions[2].units, dec("25"));
    }

    #[test]
    fn test_cascade_skips_zero_each_band() {
        let schedule = TierSchedule::new(&[
            tier("0", Some("10"), "0", "1"),
            tier("11", None, "1", "2"),
        ]);
        let matched = schedule.match_surplus(dec("15")).unwrap();

        let portions = schedule.cascade(matched, dec("15"));
        // The zero-each band can't price units; the open band covers all 15.
        assert_eq!(portions.len(), 1);
        assert_eq!(portions[0].units, dec("15"));
        assert_eq!(portions[0].tier.amount, dec("2"));
    }

    #[test]
    fn test_cascade_excludes_bands_above_matched() {
        let schedule = TierSchedule::new(&[
            tier("0", Some("25"), "1", "2"),
            tier("26", Some("75"), "1", "3"),
            tier("76", None, "1", "4"),
        ]);
        let matched = schedule.match_surplus(dec("30")).unwrap();
        assert_eq!(matched.min, dec("26"));

        let portions = schedule.cascade(matched, dec("30"));
        assert_eq!(portions.len(), 2);
        assert_eq!(portions[0].units, dec("25"));
        assert_eq!(portions[1].units, dec("5"));
    }
}
