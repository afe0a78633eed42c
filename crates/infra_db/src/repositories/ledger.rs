//! PostgreSQL ledger store
//!
//! Implements the domain's persistence port on PostgreSQL. Posting and void
//! commits run in a single transaction whose status update is conditional on
//! the current stored status; a zero-row update means the caller lost the
//! race and the whole transaction rolls back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{
    AccountId, CompanyId, Currency, DocumentId, EntryId, Money, PartyId, ReportingPeriod, UserId,
};
use domain_ledger::{
    AccountCode, AccountType, ChartOfAccount, Company, Document, DocumentKind, DocumentStatus,
    EntrySide, LedgerEntry, LedgerStore, LineAccount, LineItem, PostingRole, PostingRule,
    PostingRules, StoreError,
};

use crate::error::{classify_sqlx_error, DatabaseError};

/// SQLx-backed implementation of the ledger store
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_lines(&self, document_id: DocumentId) -> Result<Vec<LineItem>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT line_id, account_code, posting_role, side, amount, currency, description
            FROM document_lines
            WHERE document_id = $1
            ORDER BY position
            "#,
        )
        .bind(document_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        rows.into_iter().map(line_from_row).collect()
    }

    async fn insert_lines<'t>(
        tx: &mut sqlx::Transaction<'t, sqlx::Postgres>,
        document: &Document,
    ) -> Result<(), DatabaseError> {
        for (position, line) in document.lines.iter().enumerate() {
            let (account_code, posting_role) = match &line.account {
                LineAccount::Code(code) => (Some(code.as_str().to_string()), None),
                LineAccount::Role(role) => (None, Some(role.as_str().to_string())),
            };
            sqlx::query(
                r#"
                INSERT INTO document_lines (
                    line_id, document_id, position, account_code, posting_role,
                    side, amount, currency, description
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(line.id)
            .bind(document.id.as_uuid())
            .bind(position as i32)
            .bind(account_code)
            .bind(posting_role)
            .bind(line.side.as_str())
            .bind(line.amount.amount())
            .bind(line.amount.currency().code())
            .bind(line.description.as_deref())
            .execute(&mut **tx)
            .await
            .map_err(classify_sqlx_error)?;
        }
        Ok(())
    }

    async fn insert_entries<'t>(
        tx: &mut sqlx::Transaction<'t, sqlx::Postgres>,
        entries: &[LedgerEntry],
    ) -> Result<(), DatabaseError> {
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO ledger_entries (
                    entry_id, company_id, document_id, document_kind, account_code,
                    side, amount, currency, entry_date, created_at,
                    is_reversal, reverses_entry_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(entry.company_id.as_uuid())
            .bind(entry.document_id.as_uuid())
            .bind(entry.document_kind.as_str())
            .bind(entry.account_code.as_str())
            .bind(entry.side.as_str())
            .bind(entry.amount.amount())
            .bind(entry.amount.currency().code())
            .bind(entry.entry_date)
            .bind(entry.created_at)
            .bind(entry.is_reversal)
            .bind(entry.reverses.map(|id| *id.as_uuid()))
            .execute(&mut **tx)
            .await
            .map_err(classify_sqlx_error)?;
        }
        Ok(())
    }

    /// Conditionally stamps a document's status inside a transaction
    ///
    /// Returns a conflict when the stored status no longer matches
    /// `expected`, distinguishing a missing row as not-found.
    async fn cas_status<'t>(
        tx: &mut sqlx::Transaction<'t, sqlx::Postgres>,
        document: &Document,
        expected: DocumentStatus,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET status = $2,
                posted_by = $3, posted_at = $4,
                voided_by = $5, voided_at = $6, void_reason = $7
            WHERE document_id = $1 AND status = $8
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(document.status.as_str())
        .bind(document.posted_by.map(|u| *u.as_uuid()))
        .bind(document.posted_at)
        .bind(document.voided_by.map(|u| *u.as_uuid()))
        .bind(document.voided_at)
        .bind(document.void_reason.as_deref())
        .bind(expected.as_str())
        .execute(&mut **tx)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        if result.rows_affected() == 0 {
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM documents WHERE document_id = $1")
                    .bind(document.id.as_uuid())
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

            return Err(match current {
                None => StoreError::not_found("document", document.id),
                Some(status) => StoreError::conflict(format!(
                    "document {} is {}, expected {}",
                    document.id, status, expected
                )),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn fetch_company(&self, company_id: CompanyId) -> Result<Company, StoreError> {
        let row = sqlx::query(
            "SELECT company_id, name, currency, created_at FROM companies WHERE company_id = $1",
        )
        .bind(company_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?
        .ok_or_else(|| StoreError::not_found("company", company_id))?;

        Ok(company_from_row(row)?)
    }

    async fn insert_company(&self, company: &Company) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO companies (company_id, name, currency, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(company.id.as_uuid())
        .bind(&company.name)
        .bind(company.currency.code())
        .bind(company.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn fetch_account(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> Result<ChartOfAccount, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT account_id, company_id, code, name, account_type, normal_side, is_active
            FROM chart_of_accounts
            WHERE company_id = $1 AND code = $2
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?
        .ok_or_else(|| StoreError::not_found("account", code))?;

        Ok(account_from_row(row)?)
    }

    async fn fetch_chart(&self, company_id: CompanyId) -> Result<Vec<ChartOfAccount>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT account_id, company_id, code, name, account_type, normal_side, is_active
            FROM chart_of_accounts
            WHERE company_id = $1
            ORDER BY code
            "#,
        )
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        let chart = rows
            .into_iter()
            .map(account_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chart)
    }

    async fn insert_account(&self, account: &ChartOfAccount) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO chart_of_accounts (
                account_id, company_id, code, name, account_type, normal_side, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.company_id.as_uuid())
        .bind(account.code.as_str())
        .bind(&account.name)
        .bind(account.account_type.as_str())
        .bind(account.normal_side.as_str())
        .bind(account.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn fetch_rules(&self, company_id: CompanyId) -> Result<PostingRules, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT document_kind, role, account_code
            FROM posting_rules
            WHERE company_id = $1
            "#,
        )
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        let rules = rows
            .into_iter()
            .map(rule_from_row)
            .collect::<Result<Vec<_>, DatabaseError>>()?;
        Ok(PostingRules::new(rules))
    }

    async fn upsert_rule(
        &self,
        company_id: CompanyId,
        rule: PostingRule,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO posting_rules (company_id, document_kind, role, account_code)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id, document_kind, role)
            DO UPDATE SET account_code = EXCLUDED.account_code
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(rule.document_kind.as_str())
        .bind(rule.role.as_str())
        .bind(rule.account_code.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn fetch_document(&self, document_id: DocumentId) -> Result<Document, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT document_id, company_id, kind, status, document_date, counterparty_id,
                   currency, total, created_by, created_at,
                   posted_by, posted_at, voided_by, voided_at, void_reason
            FROM documents
            WHERE document_id = $1
            "#,
        )
        .bind(document_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?
        .ok_or_else(|| StoreError::not_found("document", document_id))?;

        let mut document = document_from_row(row)?;
        document.lines = self.fetch_lines(document_id).await.map_err(StoreError::from)?;
        Ok(document)
    }

    async fn insert_document(&self, document: &Document) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        sqlx::query(
            r#"
            INSERT INTO documents (
                document_id, company_id, kind, status, document_date, counterparty_id,
                currency, total, created_by, created_at,
                posted_by, posted_at, voided_by, voided_at, void_reason
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(document.company_id.as_uuid())
        .bind(document.kind.as_str())
        .bind(document.status.as_str())
        .bind(document.document_date)
        .bind(document.counterparty_id.map(|p| *p.as_uuid()))
        .bind(document.currency.code())
        .bind(document.total.amount())
        .bind(document.created_by.as_uuid())
        .bind(document.created_at)
        .bind(document.posted_by.map(|u| *u.as_uuid()))
        .bind(document.posted_at)
        .bind(document.voided_by.map(|u| *u.as_uuid()))
        .bind(document.voided_at)
        .bind(document.void_reason.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        Self::insert_lines(&mut tx, document).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn update_draft(&self, document: &Document) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET document_date = $2, counterparty_id = $3, currency = $4, total = $5
            WHERE document_id = $1 AND status = 'draft'
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(document.document_date)
        .bind(document.counterparty_id.map(|p| *p.as_uuid()))
        .bind(document.currency.code())
        .bind(document.total.amount())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::conflict(format!(
                "document {} is not an editable draft",
                document.id
            )));
        }

        sqlx::query("DELETE FROM document_lines WHERE document_id = $1")
            .bind(document.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Self::insert_lines(&mut tx, document).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn commit_posting(
        &self,
        document: &Document,
        entries: &[LedgerEntry],
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        Self::cas_status(&mut tx, document, DocumentStatus::Draft).await?;
        Self::insert_entries(&mut tx, entries).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn commit_void(
        &self,
        document: &Document,
        reversals: &[LedgerEntry],
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        Self::cas_status(&mut tx, document, DocumentStatus::Posted).await?;
        Self::insert_entries(&mut tx, reversals).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }

    async fn entries_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT entry_id, company_id, document_id, document_kind, account_code,
                   side, amount, currency, entry_date, created_at,
                   is_reversal, reverses_entry_id
            FROM ledger_entries
            WHERE document_id = $1
            ORDER BY created_at, entry_id
            "#,
        )
        .bind(document_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        let entries = rows
            .into_iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn entries_in_period(
        &self,
        company_id: CompanyId,
        period: ReportingPeriod,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT entry_id, company_id, document_id, document_kind, account_code,
                   side, amount, currency, entry_date, created_at,
                   is_reversal, reverses_entry_id
            FROM ledger_entries
            WHERE company_id = $1
              AND entry_date <= $2
              AND ($3::date IS NULL OR entry_date >= $3)
            ORDER BY entry_date, created_at
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(period.end)
        .bind(period.start)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;

        let entries = rows
            .into_iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from(classify_sqlx_error(e)))?;
        Ok(())
    }
}

// Row mapping

fn parse_currency(code: &str) -> Result<Currency, DatabaseError> {
    code.parse()
        .map_err(|_| DatabaseError::RowMapping(format!("unknown currency '{code}'")))
}

fn parse_side(side: &str) -> Result<EntrySide, DatabaseError> {
    match side {
        "debit" => Ok(EntrySide::Debit),
        "credit" => Ok(EntrySide::Credit),
        other => Err(DatabaseError::RowMapping(format!("unknown side '{other}'"))),
    }
}

fn parse_kind(kind: &str) -> Result<DocumentKind, DatabaseError> {
    match kind {
        "invoice" => Ok(DocumentKind::Invoice),
        "journal" => Ok(DocumentKind::Journal),
        other => Err(DatabaseError::RowMapping(format!("unknown kind '{other}'"))),
    }
}

fn parse_status(status: &str) -> Result<DocumentStatus, DatabaseError> {
    match status {
        "draft" => Ok(DocumentStatus::Draft),
        "posted" => Ok(DocumentStatus::Posted),
        "voided" => Ok(DocumentStatus::Voided),
        other => Err(DatabaseError::RowMapping(format!(
            "unknown status '{other}'"
        ))),
    }
}

fn parse_account_type(account_type: &str) -> Result<AccountType, DatabaseError> {
    match account_type {
        "asset" => Ok(AccountType::Asset),
        "liability" => Ok(AccountType::Liability),
        "equity" => Ok(AccountType::Equity),
        "revenue" => Ok(AccountType::Revenue),
        "expense" => Ok(AccountType::Expense),
        other => Err(DatabaseError::RowMapping(format!(
            "unknown account type '{other}'"
        ))),
    }
}

fn parse_role(role: &str) -> Result<PostingRole, DatabaseError> {
    match role {
        "receivable" => Ok(PostingRole::Receivable),
        "payable" => Ok(PostingRole::Payable),
        "revenue" => Ok(PostingRole::Revenue),
        "tax" => Ok(PostingRole::Tax),
        "discount" => Ok(PostingRole::Discount),
        other => Err(DatabaseError::RowMapping(format!("unknown role '{other}'"))),
    }
}

fn company_from_row(row: sqlx::postgres::PgRow) -> Result<Company, DatabaseError> {
    let currency: String = row.try_get("currency").map_err(classify_sqlx_error)?;
    Ok(Company {
        id: CompanyId::from(row.try_get::<Uuid, _>("company_id").map_err(classify_sqlx_error)?),
        name: row.try_get("name").map_err(classify_sqlx_error)?,
        currency: parse_currency(&currency)?,
        created_at: row.try_get("created_at").map_err(classify_sqlx_error)?,
    })
}

fn account_from_row(row: sqlx::postgres::PgRow) -> Result<ChartOfAccount, DatabaseError> {
    let account_type: String = row.try_get("account_type").map_err(classify_sqlx_error)?;
    let normal_side: String = row.try_get("normal_side").map_err(classify_sqlx_error)?;
    let code: String = row.try_get("code").map_err(classify_sqlx_error)?;
    Ok(ChartOfAccount {
        id: AccountId::from(row.try_get::<Uuid, _>("account_id").map_err(classify_sqlx_error)?),
        company_id: CompanyId::from(
            row.try_get::<Uuid, _>("company_id").map_err(classify_sqlx_error)?,
        ),
        code: AccountCode::from(code),
        name: row.try_get("name").map_err(classify_sqlx_error)?,
        account_type: parse_account_type(&account_type)?,
        normal_side: parse_side(&normal_side)?,
        is_active: row.try_get("is_active").map_err(classify_sqlx_error)?,
    })
}

fn rule_from_row(row: sqlx::postgres::PgRow) -> Result<PostingRule, DatabaseError> {
    let kind: String = row.try_get("document_kind").map_err(classify_sqlx_error)?;
    let role: String = row.try_get("role").map_err(classify_sqlx_error)?;
    let code: String = row.try_get("account_code").map_err(classify_sqlx_error)?;
    Ok(PostingRule {
        document_kind: parse_kind(&kind)?,
        role: parse_role(&role)?,
        account_code: AccountCode::from(code),
    })
}

fn line_from_row(row: sqlx::postgres::PgRow) -> Result<LineItem, DatabaseError> {
    let account_code: Option<String> = row.try_get("account_code").map_err(classify_sqlx_error)?;
    let posting_role: Option<String> = row.try_get("posting_role").map_err(classify_sqlx_error)?;
    let side: String = row.try_get("side").map_err(classify_sqlx_error)?;
    let amount: Decimal = row.try_get("amount").map_err(classify_sqlx_error)?;
    let currency: String = row.try_get("currency").map_err(classify_sqlx_error)?;

    let account = match (account_code, posting_role) {
        (Some(code), _) => LineAccount::Code(AccountCode::from(code)),
        (None, Some(role)) => LineAccount::Role(parse_role(&role)?),
        (None, None) => {
            return Err(DatabaseError::RowMapping(
                "line has neither account code nor posting role".to_string(),
            ))
        }
    };

    Ok(LineItem {
        id: row.try_get("line_id").map_err(classify_sqlx_error)?,
        account,
        side: parse_side(&side)?,
        amount: Money::new(amount, parse_currency(&currency)?),
        description: row.try_get("description").map_err(classify_sqlx_error)?,
    })
}

fn document_from_row(row: sqlx::postgres::PgRow) -> Result<Document, DatabaseError> {
    let kind: String = row.try_get("kind").map_err(classify_sqlx_error)?;
    let status: String = row.try_get("status").map_err(classify_sqlx_error)?;
    let currency: String = row.try_get("currency").map_err(classify_sqlx_error)?;
    let total: Decimal = row.try_get("total").map_err(classify_sqlx_error)?;
    let currency = parse_currency(&currency)?;

    Ok(Document {
        id: DocumentId::from(
            row.try_get::<Uuid, _>("document_id").map_err(classify_sqlx_error)?,
        ),
        company_id: CompanyId::from(
            row.try_get::<Uuid, _>("company_id").map_err(classify_sqlx_error)?,
        ),
        kind: parse_kind(&kind)?,
        status: parse_status(&status)?,
        document_date: row
            .try_get::<NaiveDate, _>("document_date")
            .map_err(classify_sqlx_error)?,
        counterparty_id: row
            .try_get::<Option<Uuid>, _>("counterparty_id")
            .map_err(classify_sqlx_error)?
            .map(PartyId::from),
        lines: Vec::new(),
        currency,
        total: Money::new(total, currency),
        created_by: UserId::from(
            row.try_get::<Uuid, _>("created_by").map_err(classify_sqlx_error)?,
        ),
        created_at: row.try_get("created_at").map_err(classify_sqlx_error)?,
        posted_by: row
            .try_get::<Option<Uuid>, _>("posted_by")
            .map_err(classify_sqlx_error)?
            .map(UserId::from),
        posted_at: row
            .try_get::<Option<DateTime<Utc>>, _>("posted_at")
            .map_err(classify_sqlx_error)?,
        voided_by: row
            .try_get::<Option<Uuid>, _>("voided_by")
            .map_err(classify_sqlx_error)?
            .map(UserId::from),
        voided_at: row
            .try_get::<Option<DateTime<Utc>>, _>("voided_at")
            .map_err(classify_sqlx_error)?,
        void_reason: row.try_get("void_reason").map_err(classify_sqlx_error)?,
    })
}

fn entry_from_row(row: sqlx::postgres::PgRow) -> Result<LedgerEntry, StoreError> {
    let inner = || -> Result<LedgerEntry, DatabaseError> {
        let kind: String = row.try_get("document_kind").map_err(classify_sqlx_error)?;
        let side: String = row.try_get("side").map_err(classify_sqlx_error)?;
        let amount: Decimal = row.try_get("amount").map_err(classify_sqlx_error)?;
        let currency: String = row.try_get("currency").map_err(classify_sqlx_error)?;
        let code: String = row.try_get("account_code").map_err(classify_sqlx_error)?;

        Ok(LedgerEntry {
            id: EntryId::from(row.try_get::<Uuid, _>("entry_id").map_err(classify_sqlx_error)?),
            company_id: CompanyId::from(
                row.try_get::<Uuid, _>("company_id").map_err(classify_sqlx_error)?,
            ),
            document_id: DocumentId::from(
                row.try_get::<Uuid, _>("document_id").map_err(classify_sqlx_error)?,
            ),
            document_kind: parse_kind(&kind)?,
            account_code: AccountCode::from(code),
            side: parse_side(&side)?,
            amount: Money::new(amount, parse_currency(&currency)?),
            entry_date: row.try_get("entry_date").map_err(classify_sqlx_error)?,
            created_at: row.try_get("created_at").map_err(classify_sqlx_error)?,
            is_reversal: row.try_get("is_reversal").map_err(classify_sqlx_error)?,
            reverses: row
                .try_get::<Option<Uuid>, _>("reverses_entry_id")
                .map_err(classify_sqlx_error)?
                .map(EntryId::from),
        })
    };
    inner().map_err(StoreError::from)
}
