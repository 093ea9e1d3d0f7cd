//! Entry repository: the ledger's only writer.
//!
//! Every mutation runs under the process-wide write lock and inside a store
//! transaction (plus a transaction-scoped advisory lock on PostgreSQL), and
//! re-reads the totals inside that transaction before writing. Income and
//! expense totals never exceed `i64::MAX`, so the SQL sums cannot overflow.
//! Reads take no lock.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use kas_core::ledger::{
    DateRange, EntryDraft, EntryKind, EntryRecord, HistoryFilter, LedgerError, LedgerService,
    LedgerTotals,
};
use kas_shared::types::{CategoryId, EntryId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, JoinType, NotSet, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set, Statement, TransactionTrait,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::entities::{categories, entries, sea_orm_active_enums, users};

/// Key for `pg_advisory_xact_lock`, shared by every server process.
const LEDGER_ADVISORY_LOCK_KEY: i64 = 0x4B41_535F_4C45_4447;

const SIGNED_SUM: &str =
    "CAST(COALESCE(SUM(CASE WHEN kind = 'INCOME' THEN amount ELSE -amount END), 0) AS BIGINT)";
const INCOME_SUM: &str =
    "CAST(COALESCE(SUM(CASE WHEN kind = 'INCOME' THEN amount ELSE 0 END), 0) AS BIGINT)";
const EXPENSE_SUM: &str =
    "CAST(COALESCE(SUM(CASE WHEN kind = 'EXPENSE' THEN amount ELSE 0 END), 0) AS BIGINT)";

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Rejected by a ledger rule.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, FromQueryResult)]
struct EntryRow {
    id: i32,
    transaction_date: NaiveDate,
    kind: sea_orm_active_enums::EntryKind,
    amount: i64,
    note: Option<String>,
    category_id: i32,
    category_name: Option<String>,
    recorded_by: i32,
    recorded_by_name: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl From<EntryRow> for EntryRecord {
    fn from(row: EntryRow) -> Self {
        Self {
            id: EntryId(row.id),
            transaction_date: row.transaction_date,
            kind: row.kind.into(),
            amount: row.amount,
            note: row.note,
            category_id: CategoryId(row.category_id),
            category_name: row.category_name,
            recorded_by: UserId(row.recorded_by),
            recorded_by_name: row.recorded_by_name,
            recorded_at: row.recorded_at,
        }
    }
}

/// Entry repository.
///
/// Clones share the same write lock, so one repository built at startup and
/// cloned into every handler serializes all ledger writes of the process.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
    write_lock: Arc<Mutex<()>>,
}

impl EntryRepository {
    /// Creates a new entry repository with its own write lock.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current running balance, optionally excluding one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn compute_balance(&self, exclude: Option<EntryId>) -> Result<i64, DbErr> {
        balance_on(&self.db, exclude).await
    }

    /// Income and expense totals for `startDate <= transactionDate <= endDate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn period_totals(&self, range: DateRange) -> Result<LedgerTotals, DbErr> {
        let query = totals_query()
            .filter(entries::Column::TransactionDate.gte(range.start()))
            .filter(entries::Column::TransactionDate.lte(range.end()));
        fetch_totals(query, &self.db).await
    }

    /// Income and expense totals over every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn overall_totals(&self) -> Result<LedgerTotals, DbErr> {
        totals_on(&self.db, None).await
    }

    /// Finds one entry with its joined names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: EntryId) -> Result<Option<EntryRecord>, DbErr> {
        find_record(&self.db, id).await
    }

    /// Filtered history, newest first (`transaction_date` desc, `id` desc).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_history(&self, filter: &HistoryFilter) -> Result<Vec<EntryRecord>, DbErr> {
        let mut query = joined_query();

        if let Some(start) = filter.start_date {
            query = query.filter(entries::Column::TransactionDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(entries::Column::TransactionDate.lte(end));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(
                entries::Column::Kind.eq(sea_orm_active_enums::EntryKind::from(kind)),
            );
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(entries::Column::CategoryId.eq(category_id.into_inner()));
        }

        let rows = query
            .order_by_desc(entries::Column::TransactionDate)
            .order_by_desc(entries::Column::Id)
            .into_model::<EntryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(EntryRecord::from).collect())
    }

    /// Entries inside a period, oldest first (`transaction_date` asc, `id` asc).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_period(&self, range: DateRange) -> Result<Vec<EntryRecord>, DbErr> {
        let rows = joined_query()
            .filter(entries::Column::TransactionDate.gte(range.start()))
            .filter(entries::Column::TransactionDate.lte(range.end()))
            .order_by_asc(entries::Column::TransactionDate)
            .order_by_asc(entries::Column::Id)
            .into_model::<EntryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(EntryRecord::from).collect())
    }

    /// Records a new entry for `recorded_by`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::RecorderNotFound` if `recorded_by` no longer exists
    /// - `LedgerError::CategoryNotFound` if the category does not exist
    /// - `LedgerError::TotalOverflow` if the kind's total would leave `i64`
    /// - `LedgerError::InsufficientBalance` if an expense exceeds the balance
    /// - `EntryError::Database` on store failure
    pub async fn create(
        &self,
        draft: &EntryDraft,
        recorded_by: UserId,
    ) -> Result<EntryRecord, EntryError> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        lock_ledger(&txn).await?;

        ensure_recorder(&txn, recorded_by).await?;
        ensure_category(&txn, draft.category_id).await?;

        let totals = totals_on(&txn, None).await?;
        check_capacity(draft, totals)?;

        if draft.kind == EntryKind::Expense {
            let balance = totals.balance();
            if let Err(e) = LedgerService::check_creation(draft, balance) {
                warn!(amount = draft.amount, balance, "Expense rejected: insufficient balance");
                return Err(e.into());
            }
        }

        let model = entries::ActiveModel {
            id: NotSet,
            transaction_date: Set(draft.transaction_date),
            kind: Set(draft.kind.into()),
            amount: Set(draft.amount),
            note: Set(draft.note.clone()),
            category_id: Set(draft.category_id.into_inner()),
            recorded_by: Set(recorded_by.into_inner()),
            recorded_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let record = find_record(&txn, EntryId(model.id))
            .await?
            .ok_or_else(|| LedgerError::Internal("inserted entry not readable".to_string()))?;

        txn.commit().await?;

        info!(
            entry_id = model.id,
            kind = %draft.kind,
            amount = draft.amount,
            recorded_by = %recorded_by,
            "Entry recorded"
        );
        Ok(record)
    }

    /// Amends an entry's date, kind, amount, note and category. The recorder
    /// and recording time never change.
    ///
    /// # Errors
    ///
    /// - `LedgerError::EntryNotFound` if the entry does not exist
    /// - `LedgerError::CategoryNotFound` if the category does not exist
    /// - `LedgerError::TotalOverflow` if the kind's total would leave `i64`
    /// - `LedgerError::InsufficientBalance` if the new contribution would
    ///   make the balance negative
    /// - `EntryError::Database` on store failure
    pub async fn amend(&self, id: EntryId, draft: &EntryDraft) -> Result<EntryRecord, EntryError> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        lock_ledger(&txn).await?;

        let existing = entries::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(id.into_inner()))?;

        ensure_category(&txn, draft.category_id).await?;

        let totals = totals_on(&txn, Some(id)).await?;
        check_capacity(draft, totals)?;

        let balance = totals.balance();
        if let Err(e) = LedgerService::check_amendment(draft, balance) {
            warn!(entry_id = %id, balance, "Amendment rejected: balance would go negative");
            return Err(e.into());
        }

        let mut active: entries::ActiveModel = existing.into();
        active.transaction_date = Set(draft.transaction_date);
        active.kind = Set(draft.kind.into());
        active.amount = Set(draft.amount);
        active.note = Set(draft.note.clone());
        active.category_id = Set(draft.category_id.into_inner());
        active.update(&txn).await?;

        let record = find_record(&txn, id)
            .await?
            .ok_or(LedgerError::EntryNotFound(id.into_inner()))?;

        txn.commit().await?;

        info!(entry_id = %id, kind = %draft.kind, amount = draft.amount, "Entry amended");
        Ok(record)
    }

    /// Deletes an entry if the balance without it stays non-negative.
    ///
    /// # Errors
    ///
    /// - `LedgerError::EntryNotFound` if the entry does not exist
    /// - `LedgerError::InsufficientBalance` if removing it would make the
    ///   balance negative
    /// - `EntryError::Database` on store failure
    pub async fn delete(&self, id: EntryId) -> Result<(), EntryError> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        lock_ledger(&txn).await?;

        entries::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(id.into_inner()))?;

        let balance = balance_on(&txn, Some(id)).await?;
        if let Err(e) = LedgerService::check_deletion(balance) {
            warn!(entry_id = %id, balance, "Deletion rejected: balance would go negative");
            return Err(e.into());
        }

        entries::Entity::delete_by_id(id.into_inner()).exec(&txn).await?;
        txn.commit().await?;

        info!(entry_id = %id, "Entry deleted");
        Ok(())
    }
}

/// Serializes writers across server processes sharing one PostgreSQL
/// database. Released automatically at commit or rollback.
async fn lock_ledger<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    if conn.get_database_backend() == DbBackend::Postgres {
        conn.execute(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT pg_advisory_xact_lock($1)",
            [LEDGER_ADVISORY_LOCK_KEY.into()],
        ))
        .await?;
    }
    Ok(())
}

async fn ensure_category<C: ConnectionTrait>(conn: &C, id: CategoryId) -> Result<(), EntryError> {
    categories::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| LedgerError::CategoryNotFound(id.into_inner()).into())
}

async fn ensure_recorder<C: ConnectionTrait>(conn: &C, id: UserId) -> Result<(), EntryError> {
    users::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            warn!(user_id = %id, "Entry rejected: recording user no longer exists");
            LedgerError::RecorderNotFound(id.into_inner()).into()
        })
}

fn check_capacity(draft: &EntryDraft, totals: LedgerTotals) -> Result<(), LedgerError> {
    LedgerService::check_total_capacity(draft, totals).inspect_err(|_| {
        warn!(
            kind = %draft.kind,
            amount = draft.amount,
            income_total = totals.income_total,
            expense_total = totals.expense_total,
            "Entry rejected: total would overflow"
        );
    })
}

async fn balance_on<C: ConnectionTrait>(conn: &C, exclude: Option<EntryId>) -> Result<i64, DbErr> {
    let mut query = entries::Entity::find()
        .select_only()
        .column_as(Expr::cust(SIGNED_SUM), "balance");

    if let Some(id) = exclude {
        query = query.filter(entries::Column::Id.ne(id.into_inner()));
    }

    Ok(query.into_tuple::<i64>().one(conn).await?.unwrap_or(0))
}

async fn find_record<C: ConnectionTrait>(
    conn: &C,
    id: EntryId,
) -> Result<Option<EntryRecord>, DbErr> {
    joined_query()
        .filter(entries::Column::Id.eq(id.into_inner()))
        .into_model::<EntryRow>()
        .one(conn)
        .await
        .map(|row| row.map(EntryRecord::from))
}

async fn totals_on<C: ConnectionTrait>(
    conn: &C,
    exclude: Option<EntryId>,
) -> Result<LedgerTotals, DbErr> {
    let mut query = totals_query();
    if let Some(id) = exclude {
        query = query.filter(entries::Column::Id.ne(id.into_inner()));
    }
    fetch_totals(query, conn).await
}

async fn fetch_totals<C: ConnectionTrait>(
    query: Select<entries::Entity>,
    conn: &C,
) -> Result<LedgerTotals, DbErr> {
    query
        .into_tuple::<(i64, i64)>()
        .one(conn)
        .await
        .map(|row| row.map_or_else(LedgerTotals::default, |(i, e)| LedgerTotals::new(i, e)))
}

fn totals_query() -> Select<entries::Entity> {
    entries::Entity::find()
        .select_only()
        .column_as(Expr::cust(INCOME_SUM), "income_total")
        .column_as(Expr::cust(EXPENSE_SUM), "expense_total")
}

fn joined_query() -> Select<entries::Entity> {
    entries::Entity::find()
        .select_only()
        .columns([
            entries::Column::Id,
            entries::Column::TransactionDate,
            entries::Column::Kind,
            entries::Column::Amount,
            entries::Column::Note,
            entries::Column::CategoryId,
            entries::Column::RecordedBy,
            entries::Column::RecordedAt,
        ])
        .column_as(categories::Column::Name, "category_name")
        .column_as(users::Column::Username, "recorded_by_name")
        .join(JoinType::InnerJoin, entries::Relation::Categories.def())
        .join(JoinType::InnerJoin, entries::Relation::Users.def())
}
