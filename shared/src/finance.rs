//! Pure folds behind the derived financial reports.
//!
//! The backend loads rows and feeds them through these helpers; nothing here
//! touches the database. The only invariant the views carry is
//! outstanding = max(0, total − paid).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Amount still owed on a document after applying payments.
pub fn outstanding(total: f64, paid: f64) -> f64 {
    (total - paid).max(0.0)
}

/// Whole days past the due date, floored at zero.
pub fn days_overdue(due: NaiveDate, today: NaiveDate) -> i64 {
    (today - due).num_days().max(0)
}

/// Inclusive date-range filter. Undated rows always pass, matching the
/// journal's treatment of records without a document date.
pub fn within_range(date: Option<NaiveDate>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match date {
        None => true,
        Some(d) => from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t),
    }
}

/// Chronological ordering for report rows: newest date first, undated rows
/// after every dated one.
pub fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Profit-and-loss rollup: invoice income minus purchases, salaries and
/// other expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlReport {
    pub income: f64,
    pub expenses: PnlExpenses,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlExpenses {
    pub purchases: f64,
    pub salaries: f64,
    pub other: f64,
}

impl PnlReport {
    pub fn new(income: f64, purchases: f64, salaries: f64, other: f64) -> Self {
        Self {
            income,
            profit: income - purchases - salaries - other,
            expenses: PnlExpenses {
                purchases,
                salaries,
                other,
            },
        }
    }
}

/// Inflow/outflow totals for one payment method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodFlow {
    pub income: f64,
    pub expense: f64,
}

/// Cashflow rollup combining cash-desk transactions and payments, split by
/// payment method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CashflowReport {
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
    pub by_method: BTreeMap<String, MethodFlow>,
}

impl CashflowReport {
    /// Fold in a cash-desk transaction; `kind` is `income` or anything else
    /// (treated as expense).
    pub fn record_cash(&mut self, kind: &str, amount: f64, method: Option<&str>) {
        let method = method.filter(|m| !m.is_empty()).unwrap_or("other");
        let entry = self.by_method.entry(method.to_string()).or_default();
        if kind == "income" {
            self.inflow += amount;
            entry.income += amount;
        } else {
            self.outflow += amount;
            entry.expense += amount;
        }
        self.net = self.inflow - self.outflow;
    }

    /// Fold in a payment; its sign determines the direction.
    pub fn record_payment(&mut self, amount: f64, method: Option<&str>) {
        let method = method.filter(|m| !m.is_empty()).unwrap_or("other");
        let entry = self.by_method.entry(method.to_string()).or_default();
        if amount >= 0.0 {
            self.inflow += amount;
            entry.income += amount;
        } else {
            self.outflow += amount.abs();
            entry.expense += amount.abs();
        }
        self.net = self.inflow - self.outflow;
    }
}

/// Open receivable line for an invoice: outstanding amount plus overdue
/// days. Returns `None` when the invoice is fully paid.
pub fn receivable_line(
    total: f64,
    paid: f64,
    due: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<(f64, i64)> {
    let rest = outstanding(total, paid);
    if rest <= 0.0 {
        return None;
    }
    let overdue = due.map_or(0, |d| days_overdue(d, today));
    Some((rest, overdue))
}
