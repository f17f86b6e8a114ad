pub mod catalog;
pub mod curriculum;
pub mod evaluation;
mod guards;
pub mod reference;
pub mod report;
pub mod section;

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, DbErr, IsolationLevel, TransactionTrait};

/// Transaction for check-then-write mutations; dropping it without commit rolls back
async fn begin_serializable(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(Some(IsolationLevel::Serializable), None)
        .await
}

/// Consistent read view for reports made of several queries
async fn begin_snapshot(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(
        Some(IsolationLevel::RepeatableRead),
        Some(AccessMode::ReadOnly),
    )
    .await
}
