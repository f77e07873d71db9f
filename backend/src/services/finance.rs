//! Derived financial views: journal, receivables, payables, P&L, cashflow.
//!
//! These are read models over the operational tables; the folds live in
//! `shared::finance`.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppResult;
use shared::finance::{newest_first, receivable_line, within_range, CashflowReport, PnlReport};

/// Finance reporting service
#[derive(Clone)]
pub struct FinanceService {
    db: PgPool,
}

/// One line of the unified chronological journal
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct JournalEntry {
    pub date: Option<NaiveDate>,
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub object_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub counterparty: Option<String>,
    pub description: Option<String>,
    pub source: String,
    pub source_id: i64,
    pub status: Option<String>,
}

/// An invoice with money still outstanding
#[derive(Debug, Serialize)]
pub struct ReceivableEntry {
    pub id: i64,
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer: Option<String>,
    pub object_id: Option<i64>,
    pub amount: f64,
    pub status: Option<String>,
    pub days_overdue: i64,
}

/// Outstanding debts grouped by counterparty and by employee.
///
/// Keys are the counterparty/employee id rendered as a string; records
/// without one land under the empty key, as in the source system.
#[derive(Debug, Serialize)]
pub struct PayablesReport {
    pub suppliers: BTreeMap<String, f64>,
    pub employees: BTreeMap<String, f64>,
}

/// Date-range and object filter for P&L and cashflow
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub object_id: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct AmountRow {
    date: Option<NaiveDate>,
    amount: Option<f64>,
    object_id: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    number: Option<String>,
    date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    customer: Option<String>,
    object_id: Option<i64>,
    amount: Option<f64>,
    status: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct OwedRow {
    id: i64,
    party_id: Option<i64>,
    amount: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct CashRow {
    kind: String,
    amount: Option<f64>,
    date: Option<NaiveDate>,
    payment_method: Option<String>,
    object_id: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    amount: f64,
    date: Option<NaiveDate>,
    method: Option<String>,
    object_id: Option<i64>,
}

impl FinanceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Unified journal: income and expenses from every source table merged
    /// into one chronological list.
    pub async fn journal(&self) -> AppResult<Vec<JournalEntry>> {
        let mut entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT COALESCE(i.date, i.created_at::date) AS date,
                   'income'::text AS kind,
                   'Счёт'::text AS category,
                   COALESCE(i.amount, 0) AS amount,
                   i.object_id AS object_id,
                   NULL::bigint AS employee_id,
                   i.customer AS counterparty,
                   i.comment AS description,
                   'invoice'::text AS source,
                   i.id AS source_id,
                   i.status AS status
            FROM invoices i
            UNION ALL
            SELECT COALESCE(p.date, p.created_at::date) AS date,
                   'expense'::text AS kind,
                   'Материалы'::text AS category,
                   COALESCE(p.amount, 0) AS amount,
                   p.object_id AS object_id,
                   p.assignee_id AS employee_id,
                   NULL::text AS counterparty,
                   p.notes AS description,
                   'purchase'::text AS source,
                   p.id AS source_id,
                   p.status AS status
            FROM purchases p
            UNION ALL
            SELECT s.date AS date,
                   'expense'::text AS kind,
                   'Зарплата'::text AS category,
                   COALESCE(s.amount, 0) AS amount,
                   s.object_id AS object_id,
                   s.employee_id AS employee_id,
                   NULL::text AS counterparty,
                   s.reason AS description,
                   'salary'::text AS source,
                   s.id AS source_id,
                   NULL::text AS status
            FROM salaries s
            UNION ALL
            SELECT a.date AS date,
                   'expense'::text AS kind,
                   'Удержания'::text AS category,
                   COALESCE(a.amount, 0) AS amount,
                   a.object_id AS object_id,
                   a.employee_id AS employee_id,
                   NULL::text AS counterparty,
                   a.comment AS description,
                   'absence'::text AS source,
                   a.id AS source_id,
                   a.kind AS status
            FROM absences a
            UNION ALL
            SELECT COALESCE(c.date, c.created_at::date) AS date,
                   c.kind AS kind,
                   COALESCE(c.category,
                            CASE WHEN c.kind = 'income' THEN 'Прочие доходы'
                                 ELSE 'Прочие расходы' END) AS category,
                   COALESCE(c.amount, 0) AS amount,
                   c.object_id AS object_id,
                   c.employee_id AS employee_id,
                   NULL::text AS counterparty,
                   c.description AS description,
                   'cash'::text AS source,
                   c.id AS source_id,
                   c.payment_method AS status
            FROM cash_transactions c
            UNION ALL
            SELECT COALESCE(y.date, y.created_at::date) AS date,
                   CASE WHEN COALESCE(y.amount, 0) >= 0 THEN 'income' ELSE 'expense' END AS kind,
                   'Оплата'::text AS category,
                   COALESCE(y.amount, 0) AS amount,
                   y.object_id AS object_id,
                   NULL::bigint AS employee_id,
                   y.counterparty AS counterparty,
                   y.notes AS description,
                   'payment'::text AS source,
                   y.id AS source_id,
                   y.method AS status
            FROM payments y
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        // Newest first; undated rows go to the tail instead of heading the
        // journal the way a bare ORDER BY date DESC would put NULLs.
        entries.sort_by(|a, b| newest_first(a.date, b.date));
        Ok(entries)
    }

    /// Receivables: unpaid invoices with outstanding amount and overdue days
    pub async fn receivables(&self) -> AppResult<Vec<ReceivableEntry>> {
        let invoices = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, number, date, due_date, customer, object_id, amount, status FROM invoices",
        )
        .fetch_all(&self.db)
        .await?;

        let paid = self.paid_by_source("invoice").await?;
        let today = Utc::now().date_naive();

        let mut entries: Vec<ReceivableEntry> = invoices
            .into_iter()
            .filter_map(|inv| {
                let total = inv.amount.unwrap_or(0.0);
                let paid = paid.get(&inv.id).copied().unwrap_or(0.0);
                let (outstanding, days_overdue) =
                    receivable_line(total, paid, inv.due_date, today)?;
                Some(ReceivableEntry {
                    id: inv.id,
                    number: inv.number,
                    date: inv.date,
                    due_date: inv.due_date,
                    customer: inv.customer,
                    object_id: inv.object_id,
                    amount: outstanding,
                    status: inv.status,
                    days_overdue,
                })
            })
            .collect();

        entries.sort_by_key(|e| e.due_date.or(e.date));
        Ok(entries)
    }

    /// Payables: supplier debts (purchases + other expenses minus payments)
    /// and employee debts (salaries minus payments).
    pub async fn payables(&self) -> AppResult<PayablesReport> {
        let mut suppliers: BTreeMap<String, f64> = BTreeMap::new();

        let purchases = sqlx::query_as::<_, OwedRow>(
            "SELECT id, supplier_id AS party_id, amount FROM purchases",
        )
        .fetch_all(&self.db)
        .await?;
        Self::accumulate(&mut suppliers, purchases, &self.paid_by_source("purchase").await?);

        let others = sqlx::query_as::<_, OwedRow>(
            "SELECT id, supplier_id AS party_id, amount FROM other_expenses",
        )
        .fetch_all(&self.db)
        .await?;
        Self::accumulate(&mut suppliers, others, &self.paid_by_source("other").await?);

        let mut employees: BTreeMap<String, f64> = BTreeMap::new();
        let salaries = sqlx::query_as::<_, OwedRow>(
            "SELECT id, employee_id AS party_id, amount FROM salaries",
        )
        .fetch_all(&self.db)
        .await?;
        Self::accumulate(&mut employees, salaries, &self.paid_by_source("salary").await?);

        Ok(PayablesReport {
            suppliers,
            employees,
        })
    }

    /// Profit and loss: invoice income minus purchases, salaries and other
    /// expenses, optionally filtered by date range and object.
    pub async fn pnl(&self, filter: &ReportFilter) -> AppResult<PnlReport> {
        let income = self.sum_filtered("invoices", filter).await?;
        let purchases = self.sum_filtered("purchases", filter).await?;
        let salaries = self.sum_filtered("salaries", filter).await?;
        let other = self.sum_filtered("other_expenses", filter).await?;
        Ok(PnlReport::new(income, purchases, salaries, other))
    }

    /// Cashflow: cash-desk transactions plus payments, split by method
    pub async fn cashflow(&self, filter: &ReportFilter) -> AppResult<CashflowReport> {
        let cash = sqlx::query_as::<_, CashRow>(
            "SELECT kind, amount, date, payment_method, object_id FROM cash_transactions",
        )
        .fetch_all(&self.db)
        .await?;
        let payments = sqlx::query_as::<_, PaymentRow>(
            "SELECT amount, date, method, object_id FROM payments",
        )
        .fetch_all(&self.db)
        .await?;

        let mut report = CashflowReport::default();
        for row in cash {
            if !Self::passes(filter, row.date, row.object_id) {
                continue;
            }
            report.record_cash(
                &row.kind,
                row.amount.unwrap_or(0.0),
                row.payment_method.as_deref(),
            );
        }
        for row in payments {
            if !Self::passes(filter, row.date, row.object_id) {
                continue;
            }
            report.record_payment(row.amount, row.method.as_deref());
        }
        Ok(report)
    }

    /// Payments applied per source document id for one source type
    async fn paid_by_source(&self, source_type: &str) -> AppResult<HashMap<i64, f64>> {
        let rows = sqlx::query_as::<_, (i64, f64)>(
            r#"
            SELECT source_id, COALESCE(SUM(amount), 0)
            FROM payments
            WHERE source_type = $1
            GROUP BY source_id
            "#,
        )
        .bind(source_type)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().collect())
    }

    fn accumulate(
        owed: &mut BTreeMap<String, f64>,
        rows: Vec<OwedRow>,
        paid: &HashMap<i64, f64>,
    ) {
        for row in rows {
            let key = row.party_id.map(|id| id.to_string()).unwrap_or_default();
            let total = row.amount.unwrap_or(0.0);
            let paid = paid.get(&row.id).copied().unwrap_or(0.0);
            *owed.entry(key).or_insert(0.0) += shared::finance::outstanding(total, paid);
        }
    }

    async fn sum_filtered(&self, table: &str, filter: &ReportFilter) -> AppResult<f64> {
        // Table names come from a fixed internal set, never from input.
        let rows = sqlx::query_as::<_, AmountRow>(&format!(
            "SELECT date, amount, object_id FROM {table}"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .filter(|r| Self::passes(filter, r.date, r.object_id))
            .map(|r| r.amount.unwrap_or(0.0))
            .sum())
    }

    fn passes(filter: &ReportFilter, date: Option<NaiveDate>, object_id: Option<i64>) -> bool {
        within_range(date, filter.from, filter.to)
            && filter.object_id.map_or(true, |o| object_id == Some(o))
    }
}
