use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

use crate::common::{EventId, PeriodId, ProjectId, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            _ => Err(anyhow!("Invalid transaction type: {}", s)),
        }
    }
}

/// A single ledger entry. `project_id`/`event_id` point at the cost center
/// when the money moved for a specific activity; both stay NULL for
/// general lab funds.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FinanceTransaction {
    pub id: TransactionId,
    pub transaction_type: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
    pub project_id: Option<ProjectId>,
    pub event_id: Option<EventId>,
    pub period_id: Option<PeriodId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl FinanceTransaction {
    pub async fn find_by_id(
        id: TransactionId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, FinanceTransaction>("SELECT * FROM finance_transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, FinanceTransaction>(
            "SELECT * FROM finance_transactions WHERE period_id = $1 ORDER BY transaction_date",
        )
        .bind(period_id)
        .fetch_all(pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        transaction_type: TransactionType,
        amount: Decimal,
        transaction_date: NaiveDate,
        description: &str,
        project_id: Option<ProjectId>,
        event_id: Option<EventId>,
        period_id: Option<PeriodId>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, FinanceTransaction>(
            r#"
            INSERT INTO finance_transactions
                (id, transaction_type, amount, transaction_date, description,
                 project_id, event_id, period_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(TransactionId::new())
        .bind(transaction_type.as_str())
        .bind(amount)
        .bind(transaction_date)
        .bind(description)
        .bind(project_id)
        .bind(event_id)
        .bind(period_id)
        .fetch_one(pool)
        .await
    }
}
