//! # Intake Controller
//!
//! Orchestrates one customer's trip through the form.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Intake Request Flow                              │
//! │                                                                         │
//! │  open(?t=a8Xk2mQ4)                                                      │
//! │       │                                                                 │
//! │       ├── no token ──────────────────────► Admin view                  │
//! │       ├── token gate: Used / NotFound ───► blocked view                │
//! │       └── token gate: Active ────────────► form, amount locked         │
//! │                                                                         │
//! │  prefill(tax id)     ← known customer? fill the form                   │
//! │  postal_lookup(code) ← cached reference directory                      │
//! │                                                                         │
//! │  submit(session, token, form)                                           │
//! │       │                                                                 │
//! │       ├── 1. validate fields          ── fail → Rejected(Invalid)      │
//! │       ├── 2. re-check token gate      ── fail → Rejected(Used/NotFound)│
//! │       ├── 3. duplicate guard          ── fail → Rejected(Duplicate)    │
//! │       ├── 4. append queue row         ── fail → Err (authoritative)    │
//! │       ├── 5. save unseen customer     ── fail → warning                │
//! │       ├── 6. mark token used          ── fail → warning                │
//! │       ├── 7. push notification        ── fail → warning                │
//! │       └── 8. remember signature ───────► Accepted { warnings }         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 4 is the only authoritative write: once the queue row lands the
//! submission is accepted, and every later failure rides along as a
//! warning instead of unwinding it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::IntakeConfig;
use crate::error::IntakeResult;
use crate::notify::Notifier;
use invoq_core::validation::{validate_name, validate_tax_id};
use invoq_core::{
    find_customer, normalize_phone, normalize_tax_id, split_address, submission_signature,
    CustomerRecord, Money, PostalDirectory, PostalEntry, QueueEntry, QueueStatus, SessionState,
    TokenGate, ValidationError,
};
use invoq_db::Database;

/// What the entry point shows for a given (possibly absent) token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryView {
    /// No token presented: the shopkeeper's token-creation view.
    Admin,

    /// Active token: the customer form, with the lock amount displayed.
    Form {
        /// The presented token id, carried through to submit.
        token_id: String,
        /// The payment amount the token unlocks.
        amount: Money,
    },

    /// Token already consumed. The form stays blocked.
    TokenUsed,

    /// No such token. The form stays blocked.
    TokenNotFound,
}

/// Form values pre-filled from a known customer's stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    pub name: String,
    pub tax_id: String,
    pub street: String,
    pub district: String,
    pub province: String,
    pub phone: String,
}

/// The customer-entered form as submitted.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub name: String,
    pub tax_id: String,
    pub street: String,
    pub district: String,
    pub province: String,
    pub phone: String,
}

/// Soft failures that ride along on an accepted submission.
///
/// Each marks a follow-up write that failed AFTER the authoritative queue
/// append succeeded. None of them unwinds the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The token could not be marked used; it remains redeemable.
    TokenMarkFailed,
    /// The customer record could not be saved for next time.
    CustomerSaveFailed,
    /// The push notification did not go out.
    NotifyFailed,
}

/// Why a submission was turned away before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TokenNotFound,
    TokenUsed,
    Duplicate,
    Invalid(Vec<ValidationError>),
}

/// The result of a submission attempt. Domain outcomes, not errors:
/// `Err` is reserved for the store being unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Queue row written; warnings list any failed follow-up writes.
    Accepted { warnings: Vec<Warning> },

    /// Turned away; zero store writes happened.
    Rejected(RejectReason),
}

/// Orchestrates the invoice-request intake flow.
pub struct IntakeController {
    db: Database,
    postal: PostalDirectory,
    notifier: Arc<dyn Notifier>,
    config: IntakeConfig,
}

impl IntakeController {
    /// Creates the controller, loading the postal reference directory once.
    pub async fn new(
        db: Database,
        notifier: Arc<dyn Notifier>,
        config: IntakeConfig,
    ) -> IntakeResult<Self> {
        let entries = db.postal().load_all().await?;
        let postal = PostalDirectory::from_entries(entries);
        debug!(codes = postal.len(), "Postal directory loaded");

        Ok(IntakeController {
            db,
            postal,
            notifier,
            config,
        })
    }

    /// Classifies an entry-point visit.
    ///
    /// No token means the shopkeeper opened the page; a token is gated
    /// against the store before the form unlocks.
    pub async fn open(&self, token_id: Option<&str>) -> IntakeResult<EntryView> {
        let Some(token_id) = token_id else {
            return Ok(EntryView::Admin);
        };

        let record = self.db.tokens().get_by_id(token_id).await?;
        let view = match TokenGate::from_record(record.as_ref()) {
            TokenGate::Active { amount } => EntryView::Form {
                token_id: token_id.to_string(),
                amount,
            },
            TokenGate::Used => EntryView::TokenUsed,
            TokenGate::NotFound => EntryView::TokenNotFound,
        };

        debug!(token_id = %token_id, ?view, "Entry classified");
        Ok(view)
    }

    /// Looks up a returning customer and pre-fills the form from their
    /// stored record. `None` when the tax id has not been seen before.
    pub async fn prefill(&self, tax_id: &str) -> IntakeResult<Option<Prefill>> {
        let snapshot = self.db.customers().find_all().await?;

        let Some(record) = find_customer(tax_id, &snapshot) else {
            return Ok(None);
        };

        let split = split_address(&record.address_line_1, &record.address_line_2);

        Ok(Some(Prefill {
            name: record.name.clone(),
            tax_id: normalize_tax_id(&record.tax_id),
            street: split.street,
            district: split.district,
            province: split.province,
            phone: normalize_phone(&record.phone),
        }))
    }

    /// Postal-code reference lookup against the cached directory.
    pub fn postal_lookup(&self, code: &str) -> &[PostalEntry] {
        self.postal.lookup(code)
    }

    /// Processes a submitted form.
    ///
    /// Returns `Err` only when the store is unreachable for the gate check
    /// or the queue append; every domain outcome is a value.
    pub async fn submit(
        &self,
        session: &mut SessionState,
        token_id: &str,
        form: &SubmissionForm,
    ) -> IntakeResult<SubmissionOutcome> {
        // 1. Field validation - nothing is written on failure
        let mut errors = Vec::new();
        if let Err(e) = validate_name(&form.name) {
            errors.push(e);
        }
        if let Err(e) = validate_tax_id(&form.tax_id) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Ok(SubmissionOutcome::Rejected(RejectReason::Invalid(errors)));
        }

        // 2. Re-check the gate: the token may have been consumed since open()
        let record = self.db.tokens().get_by_id(token_id).await?;
        let amount = match TokenGate::from_record(record.as_ref()) {
            TokenGate::Active { amount } => amount,
            TokenGate::Used => {
                return Ok(SubmissionOutcome::Rejected(RejectReason::TokenUsed));
            }
            TokenGate::NotFound => {
                return Ok(SubmissionOutcome::Rejected(RejectReason::TokenNotFound));
            }
        };

        // 3. Duplicate guard - same session re-posting the same submission
        let signature = submission_signature(&form.tax_id, amount, token_id);
        if session.is_duplicate(&signature) {
            info!(signature = %signature, "Duplicate submission suppressed");
            return Ok(SubmissionOutcome::Rejected(RejectReason::Duplicate));
        }

        let tax_id = normalize_tax_id(&form.tax_id);
        let phone = normalize_phone(&form.phone);
        let (address_line_1, address_line_2) = compose_address_lines(form);

        // 4. Authoritative write: the queue row IS the accepted submission
        let entry = QueueEntry {
            created_at: Utc::now(),
            name: form.name.trim().to_string(),
            tax_id: tax_id.clone(),
            address_line_1: address_line_1.clone(),
            address_line_2: address_line_2.clone(),
            phone: phone.clone(),
            item_description: self.config.item_description.clone(),
            quantity: 1,
            price_cents: amount.satang(),
            status: QueueStatus::Pending,
        };
        self.db.queue().append(&entry).await?;

        let mut warnings = Vec::new();

        // 5. Save the customer for next time, unless already known
        if let Err(w) = self.save_unseen_customer(&entry).await {
            warnings.push(w);
        }

        // 6. Consume the token
        if let Err(e) = self.db.tokens().mark_used(token_id).await {
            warn!(token_id = %token_id, error = %e, "Token mark-used failed; token stays redeemable");
            warnings.push(Warning::TokenMarkFailed);
        }

        // 7. Tell the shopkeeper
        let message = format!("มีคำขอใบกำกับภาษีใหม่: {} ยอด {}", entry.name, amount);
        if let Err(e) = self.notifier.push(&message).await {
            warn!(error = %e, "Push notification failed");
            warnings.push(Warning::NotifyFailed);
        }

        // 8. Arm the duplicate guard only now that the submission stands
        session.remember(signature);

        info!(
            tax_id = %tax_id,
            amount = %amount,
            warnings = warnings.len(),
            "Submission accepted"
        );
        Ok(SubmissionOutcome::Accepted { warnings })
    }

    /// Appends a customer record when the tax id is unseen. Best-effort:
    /// any failure (snapshot read or append) becomes a warning.
    async fn save_unseen_customer(&self, entry: &QueueEntry) -> Result<(), Warning> {
        let snapshot = self.db.customers().find_all().await.map_err(|e| {
            warn!(error = %e, "Customer snapshot read failed");
            Warning::CustomerSaveFailed
        })?;

        if find_customer(&entry.tax_id, &snapshot).is_some() {
            return Ok(());
        }

        let record = CustomerRecord {
            name: entry.name.clone(),
            tax_id: entry.tax_id.clone(),
            address_line_1: entry.address_line_1.clone(),
            address_line_2: entry.address_line_2.clone(),
            phone: entry.phone.clone(),
        };
        self.db.customers().append(&record).await.map_err(|e| {
            warn!(error = %e, "Customer append failed");
            Warning::CustomerSaveFailed
        })
    }
}

/// Joins the form's address fields back into the two stored lines:
/// street and district on line 1, province / postal text on line 2.
fn compose_address_lines(form: &SubmissionForm) -> (String, String) {
    let line_1 = [form.street.trim(), form.district.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    (line_1, form.province.trim().to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ITEM_DESCRIPTION;
    use crate::notify::{NotifyError, NoopNotifier};
    use async_trait::async_trait;
    use invoq_core::{PostalEntry, Token, TokenStatus};
    use invoq_db::DbConfig;
    use secrecy::SecretString;
    use std::sync::Mutex;

    /// Notifier that records every delivered message.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn push(&self, message: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    /// Notifier whose endpoint is always down.
    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn push(&self, _message: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Request("connection refused".to_string()))
        }
    }

    fn config() -> IntakeConfig {
        IntakeConfig {
            admin_secret: SecretString::from("correct-password"),
            public_base_url: "https://invoice.example.com".to_string(),
            item_description: DEFAULT_ITEM_DESCRIPTION.to_string(),
            db_path: ":memory:".to_string(),
            push: None,
        }
    }

    fn form() -> SubmissionForm {
        SubmissionForm {
            name: "บริษัท ตัวอย่าง จำกัด".to_string(),
            tax_id: "1-2345-67890-12-3".to_string(),
            street: "99/9 หมู่ 1".to_string(),
            district: "ตำบลบางพูด อำเภอปากเกร็ด".to_string(),
            province: "นนทบุรี 11120".to_string(),
            phone: "812345678".to_string(),
        }
    }

    async fn db_with_token(id: &str, amount_cents: i64) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.tokens()
            .insert(&Token {
                id: id.to_string(),
                amount_cents,
                status: TokenStatus::Active,
                created_at: Utc::now(),
                used_at: None,
            })
            .await
            .unwrap();
        db
    }

    async fn controller(db: Database, notifier: Arc<dyn Notifier>) -> IntakeController {
        IntakeController::new(db, notifier, config()).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_without_token_is_admin_view() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        assert_eq!(ctrl.open(None).await.unwrap(), EntryView::Admin);
    }

    #[tokio::test]
    async fn test_open_active_token_unlocks_form() {
        let db = db_with_token("T1", 50000).await;
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        let view = ctrl.open(Some("T1")).await.unwrap();
        assert_eq!(
            view,
            EntryView::Form {
                token_id: "T1".to_string(),
                amount: Money::from_baht(500),
            }
        );
    }

    #[tokio::test]
    async fn test_open_terminal_tokens_block_form() {
        let db = db_with_token("T1", 50000).await;
        db.tokens().mark_used("T1").await.unwrap();
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        assert_eq!(ctrl.open(Some("T1")).await.unwrap(), EntryView::TokenUsed);
        assert_eq!(
            ctrl.open(Some("NOPE")).await.unwrap(),
            EntryView::TokenNotFound
        );
    }

    #[tokio::test]
    async fn test_prefill_returning_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers()
            .append(&CustomerRecord {
                name: "บริษัท ตัวอย่าง จำกัด".to_string(),
                // Stored un-normalized, as legacy rows are
                tax_id: "12345678901.0".to_string(),
                address_line_1: "99/9 หมู่ 1 ตำบลบางพูด".to_string(),
                address_line_2: "อำเภอปากเกร็ด นนทบุรี 11120".to_string(),
                phone: "812345678".to_string(),
            })
            .await
            .unwrap();
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        let prefill = ctrl.prefill("0012345678901").await.unwrap().unwrap();
        assert_eq!(prefill.name, "บริษัท ตัวอย่าง จำกัด");
        assert_eq!(prefill.tax_id, "0012345678901");
        assert_eq!(prefill.street, "99/9 หมู่ 1");
        assert!(prefill.district.contains("ตำบลบางพูด"));
        assert!(prefill.district.contains("อำเภอปากเกร็ด"));
        assert_eq!(prefill.province, "นนทบุรี 11120");
        assert_eq!(prefill.phone, "0812345678");
    }

    #[tokio::test]
    async fn test_prefill_unknown_tax_id_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        assert!(ctrl.prefill("1234567890123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_postal_lookup_uses_cached_directory() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.postal()
            .append_batch(&[PostalEntry {
                postal_code: "11120".to_string(),
                sub_district: "บางพูด".to_string(),
                district: "ปากเกร็ด".to_string(),
                province: "นนทบุรี".to_string(),
            }])
            .await
            .unwrap();
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        let hits = ctrl.postal_lookup("11120");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].province, "นนทบุรี");
        assert!(ctrl.postal_lookup("99999").is_empty());
    }

    #[tokio::test]
    async fn test_submit_end_to_end() {
        let db = db_with_token("T1", 50000).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let ctrl = controller(db.clone(), notifier.clone()).await;
        let mut session = SessionState::new();

        let outcome = ctrl.submit(&mut session, "T1", &form()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Accepted { warnings: vec![] });

        // Queue row written with normalized fields and the locked amount
        let rows = db.queue().list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tax_id, "1234567890123");
        assert_eq!(rows[0].phone, "0812345678");
        assert_eq!(rows[0].price_cents, 50000);
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(rows[0].item_description, DEFAULT_ITEM_DESCRIPTION);
        assert_eq!(rows[0].address_line_1, "99/9 หมู่ 1 ตำบลบางพูด อำเภอปากเกร็ด");
        assert_eq!(rows[0].address_line_2, "นนทบุรี 11120");

        // Customer saved for next time
        assert_eq!(db.customers().count().await.unwrap(), 1);

        // Token consumed
        let token = db.tokens().get_by_id("T1").await.unwrap().unwrap();
        assert_eq!(token.status, TokenStatus::Used);

        // Shopkeeper notified
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("บริษัท ตัวอย่าง จำกัด"));

        // Duplicate guard armed
        assert_eq!(
            session.last_signature(),
            Some("1234567890123_500_T1")
        );
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected_with_zero_writes() {
        let db = db_with_token("T1", 50000).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let ctrl = controller(db.clone(), notifier.clone()).await;
        let mut session = SessionState::new();

        ctrl.submit(&mut session, "T1", &form()).await.unwrap();

        // Simulate a failed mark-used (the known inconsistency window): the
        // token is Active again, so only the duplicate guard stands between
        // a re-posted form and a second queue row.
        sqlx::query("UPDATE tokens SET status = 'active', used_at = NULL WHERE id = 'T1'")
            .execute(db.pool())
            .await
            .unwrap();

        let outcome = ctrl.submit(&mut session, "T1", &form()).await.unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(RejectReason::Duplicate)
        );

        // No additional writes of any kind
        assert_eq!(db.queue().count().await.unwrap(), 1);
        assert_eq!(db.customers().count().await.unwrap(), 1);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reused_token_rejected_across_sessions() {
        let db = db_with_token("T1", 50000).await;
        let ctrl = controller(db, Arc::new(NoopNotifier)).await;

        let mut first = SessionState::new();
        ctrl.submit(&mut first, "T1", &form()).await.unwrap();

        // A different session presenting the consumed token is gated out
        let mut second = SessionState::new();
        let outcome = ctrl.submit(&mut second, "T1", &form()).await.unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(RejectReason::TokenUsed)
        );
    }

    #[tokio::test]
    async fn test_invalid_form_rejected_before_any_write() {
        let db = db_with_token("T1", 50000).await;
        let ctrl = controller(db.clone(), Arc::new(NoopNotifier)).await;
        let mut session = SessionState::new();

        let mut bad = form();
        bad.name = "".to_string();
        bad.tax_id = "12345abc67890".to_string();

        let outcome = ctrl.submit(&mut session, "T1", &bad).await.unwrap();
        match outcome {
            SubmissionOutcome::Rejected(RejectReason::Invalid(errors)) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }

        assert_eq!(db.queue().count().await.unwrap(), 0);
        assert!(session.last_signature().is_none());
    }

    #[tokio::test]
    async fn test_known_customer_not_appended_again() {
        let db = db_with_token("T1", 50000).await;
        db.customers()
            .append(&CustomerRecord {
                name: "บริษัท ตัวอย่าง จำกัด".to_string(),
                tax_id: "1234567890123".to_string(),
                address_line_1: "99/9".to_string(),
                address_line_2: "นนทบุรี".to_string(),
                phone: "0812345678".to_string(),
            })
            .await
            .unwrap();
        let ctrl = controller(db.clone(), Arc::new(NoopNotifier)).await;
        let mut session = SessionState::new();

        ctrl.submit(&mut session, "T1", &form()).await.unwrap();

        assert_eq!(db.customers().count().await.unwrap(), 1);
        assert_eq!(db.queue().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_notify_failure_is_a_warning_not_an_error() {
        let db = db_with_token("T1", 50000).await;
        let ctrl = controller(db.clone(), Arc::new(FailingNotifier)).await;
        let mut session = SessionState::new();

        let outcome = ctrl.submit(&mut session, "T1", &form()).await.unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Accepted {
                warnings: vec![Warning::NotifyFailed]
            }
        );

        // The submission stands: queue row written, token consumed
        assert_eq!(db.queue().count().await.unwrap(), 1);
        let token = db.tokens().get_by_id("T1").await.unwrap().unwrap();
        assert_eq!(token.status, TokenStatus::Used);
    }
}
