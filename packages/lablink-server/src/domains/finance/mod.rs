//! Lab finances: income and expense transactions, optionally tied to a
//! project or event as a cost center.

pub mod models;

pub use models::{FinanceTransaction, TransactionType};
