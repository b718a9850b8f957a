//! One decoder per record kind, each with its static layout table.

pub mod initial;
pub mod old_balance;
pub mod transaction;
pub mod transaction_purpose;

pub use initial::InitialRecord;
pub use old_balance::OldBalanceRecord;
pub use transaction::TransactionRecord;
pub use transaction_purpose::TransactionPurposeRecord;
