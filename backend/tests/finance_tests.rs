//! Financial report tests
//!
//! Tests for the pure folds behind receivables, P&L and cashflow:
//! - Outstanding amounts never go negative
//! - Overdue days are floored at zero
//! - Date-range filtering lets undated rows through
//! - Cashflow splits by payment method with a default bucket

use chrono::NaiveDate;
use proptest::prelude::*;

use shared::finance::{
    days_overdue, newest_first, outstanding, receivable_line, within_range, CashflowReport,
    PnlReport,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_outstanding_basic() {
        assert_eq!(outstanding(1000.0, 300.0), 700.0);
        assert_eq!(outstanding(1000.0, 1000.0), 0.0);
    }

    /// Overpayment clamps to zero instead of going negative
    #[test]
    fn test_outstanding_overpaid() {
        assert_eq!(outstanding(500.0, 600.0), 0.0);
    }

    #[test]
    fn test_days_overdue() {
        let due = date(2025, 6, 1);
        assert_eq!(days_overdue(due, date(2025, 6, 11)), 10);
        assert_eq!(days_overdue(due, date(2025, 6, 1)), 0);
        // Not yet due.
        assert_eq!(days_overdue(due, date(2025, 5, 20)), 0);
    }

    #[test]
    fn test_within_range_bounds_inclusive() {
        let from = Some(date(2025, 1, 1));
        let to = Some(date(2025, 1, 31));

        assert!(within_range(Some(date(2025, 1, 1)), from, to));
        assert!(within_range(Some(date(2025, 1, 31)), from, to));
        assert!(!within_range(Some(date(2025, 2, 1)), from, to));
        assert!(!within_range(Some(date(2024, 12, 31)), from, to));
    }

    /// Undated rows pass every filter
    #[test]
    fn test_within_range_undated_passes() {
        assert!(within_range(None, Some(date(2025, 1, 1)), Some(date(2025, 1, 2))));
        assert!(within_range(None, None, None));
    }

    #[test]
    fn test_receivable_line_unpaid() {
        let today = date(2025, 7, 1);
        let line = receivable_line(1000.0, 400.0, Some(date(2025, 6, 21)), today);
        assert_eq!(line, Some((600.0, 10)));
    }

    /// Fully paid invoices drop out of the receivables list
    #[test]
    fn test_receivable_line_paid_is_none() {
        let today = date(2025, 7, 1);
        assert_eq!(receivable_line(1000.0, 1000.0, Some(date(2025, 6, 1)), today), None);
        assert_eq!(receivable_line(1000.0, 1200.0, None, today), None);
    }

    /// No due date means zero overdue days
    #[test]
    fn test_receivable_line_no_due_date() {
        let today = date(2025, 7, 1);
        assert_eq!(receivable_line(500.0, 0.0, None, today), Some((500.0, 0)));
    }

    #[test]
    fn test_pnl_rollup() {
        let report = PnlReport::new(100_000.0, 40_000.0, 25_000.0, 5_000.0);
        assert_eq!(report.income, 100_000.0);
        assert_eq!(report.expenses.purchases, 40_000.0);
        assert_eq!(report.expenses.salaries, 25_000.0);
        assert_eq!(report.expenses.other, 5_000.0);
        assert_eq!(report.profit, 30_000.0);
    }

    #[test]
    fn test_cashflow_cash_transactions() {
        let mut report = CashflowReport::default();
        report.record_cash("income", 1000.0, Some("card"));
        report.record_cash("expense", 300.0, Some("card"));
        report.record_cash("expense", 200.0, Some("cash"));

        assert_eq!(report.inflow, 1000.0);
        assert_eq!(report.outflow, 500.0);
        assert_eq!(report.net, 500.0);
        assert_eq!(report.by_method["card"].income, 1000.0);
        assert_eq!(report.by_method["card"].expense, 300.0);
        assert_eq!(report.by_method["cash"].expense, 200.0);
    }

    /// Payment sign determines direction; negative flows out
    #[test]
    fn test_cashflow_payment_sign() {
        let mut report = CashflowReport::default();
        report.record_payment(800.0, Some("bank"));
        report.record_payment(-250.0, Some("bank"));

        assert_eq!(report.inflow, 800.0);
        assert_eq!(report.outflow, 250.0);
        assert_eq!(report.net, 550.0);
        assert_eq!(report.by_method["bank"].income, 800.0);
        assert_eq!(report.by_method["bank"].expense, 250.0);
    }

    /// Journal ordering: newest date first, undated rows at the tail
    #[test]
    fn test_newest_first_puts_undated_last() {
        let mut dates = vec![
            None,
            Some(date(2025, 3, 1)),
            None,
            Some(date(2025, 6, 15)),
            Some(date(2025, 1, 10)),
        ];
        dates.sort_by(|a, b| newest_first(*a, *b));

        assert_eq!(
            dates,
            vec![
                Some(date(2025, 6, 15)),
                Some(date(2025, 3, 1)),
                Some(date(2025, 1, 10)),
                None,
                None,
            ]
        );
    }

    /// Missing or empty method lands in the "other" bucket
    #[test]
    fn test_cashflow_default_method() {
        let mut report = CashflowReport::default();
        report.record_cash("income", 100.0, None);
        report.record_payment(-50.0, Some(""));

        assert_eq!(report.by_method["other"].income, 100.0);
        assert_eq!(report.by_method["other"].expense, 50.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = f64> {
        (0u32..=1_000_000).prop_map(|n| n as f64 / 100.0)
    }

    fn signed_amount_strategy() -> impl Strategy<Value = f64> {
        (-500_000i64..=500_000).prop_map(|n| n as f64 / 100.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Outstanding is never negative and never exceeds the total
        #[test]
        fn prop_outstanding_bounded(total in amount_strategy(), paid in amount_strategy()) {
            let rest = outstanding(total, paid);
            prop_assert!(rest >= 0.0);
            prop_assert!(rest <= total);
        }

        /// Overdue days are never negative
        #[test]
        fn prop_days_overdue_non_negative(offset in -365i64..=365) {
            let due = date(2025, 6, 1);
            let today = due + chrono::Duration::days(offset);
            prop_assert!(days_overdue(due, today) >= 0);
        }

        /// Profit always equals income minus the three expense groups
        #[test]
        fn prop_pnl_profit_consistent(
            income in amount_strategy(),
            purchases in amount_strategy(),
            salaries in amount_strategy(),
            other in amount_strategy()
        ) {
            let report = PnlReport::new(income, purchases, salaries, other);
            let expected = income - purchases - salaries - other;
            prop_assert!((report.profit - expected).abs() < 1e-6);
        }

        /// Net always equals inflow minus outflow after any fold sequence
        #[test]
        fn prop_cashflow_net_consistent(
            payments in prop::collection::vec(signed_amount_strategy(), 0..20)
        ) {
            let mut report = CashflowReport::default();
            for amount in &payments {
                report.record_payment(*amount, Some("bank"));
            }
            prop_assert!((report.net - (report.inflow - report.outflow)).abs() < 1e-6);
            prop_assert!(report.inflow >= 0.0);
            prop_assert!(report.outflow >= 0.0);
        }

        /// Sorting by newest_first yields a non-increasing dated prefix with
        /// every undated row after it.
        #[test]
        fn prop_newest_first_ordering(
            offsets in prop::collection::vec(prop::option::of(0i64..=3650), 1..30)
        ) {
            let base = date(2020, 1, 1);
            let mut dates: Vec<Option<NaiveDate>> = offsets
                .iter()
                .map(|o| o.map(|d| base + chrono::Duration::days(d)))
                .collect();
            dates.sort_by(|a, b| newest_first(*a, *b));

            if let Some(idx) = dates.iter().position(|d| d.is_none()) {
                prop_assert!(dates[idx..].iter().all(|d| d.is_none()));
            }
            for pair in dates.windows(2) {
                if let (Some(x), Some(y)) = (pair[0], pair[1]) {
                    prop_assert!(x >= y);
                }
            }
        }

        /// Per-method totals sum to the report totals
        #[test]
        fn prop_cashflow_methods_sum_to_totals(
            rows in prop::collection::vec(
                (prop_oneof![Just("cash"), Just("card"), Just("bank")], signed_amount_strategy()),
                0..20
            )
        ) {
            let mut report = CashflowReport::default();
            for (method, amount) in &rows {
                report.record_payment(*amount, Some(method));
            }

            let income_sum: f64 = report.by_method.values().map(|m| m.income).sum();
            let expense_sum: f64 = report.by_method.values().map(|m| m.expense).sum();
            prop_assert!((income_sum - report.inflow).abs() < 1e-6);
            prop_assert!((expense_sum - report.outflow).abs() < 1e-6);
        }
    }
}
