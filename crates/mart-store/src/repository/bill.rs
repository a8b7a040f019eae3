//! # Bill Store
//!
//! Append-only sales history.

use std::path::PathBuf;

use chrono::Local;
use mart_core::validation::validate_bill_total;
use mart_core::{format_bill_number, Bill, Money, PaymentMethod};
use tracing::info;

use crate::document::JsonDocument;
use crate::error::StoreResult;

/// Timestamp format written to `date`.
pub const BILL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Store for completed bills.
#[derive(Debug)]
pub struct BillStore {
    doc: JsonDocument<Vec<Bill>>,
}

impl BillStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BillStore {
            doc: JsonDocument::new(path),
        }
    }

    /// Records a bill with no payment method.
    pub fn append(&self, total: Money) -> StoreResult<Bill> {
        self.record(total, None)
    }

    /// Records a bill for a known payment method.
    pub fn append_with_method(&self, total: Money, method: PaymentMethod) -> StoreResult<Bill> {
        self.record(total, Some(method))
    }

    /// Returns every bill, oldest first.
    pub fn list_all(&self) -> StoreResult<Vec<Bill>> {
        self.doc.load()
    }

    fn record(&self, total: Money, payment_method: Option<PaymentMethod>) -> StoreResult<Bill> {
        validate_bill_total(total)?;

        let bill = self.doc.update(|bills| {
            let bill = Bill {
                bill_number: format_bill_number(bills.len() + 1),
                total,
                date: Local::now().format(BILL_DATE_FORMAT).to_string(),
                payment_method,
            };
            bills.push(bill.clone());
            Ok(bill)
        })?;

        info!(
            bill_number = %bill.bill_number,
            total = %bill.total,
            method = ?bill.payment_method,
            "Bill recorded"
        );
        Ok(bill)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn store() -> (TempDir, BillStore) {
        let dir = TempDir::new().unwrap();
        let store = BillStore::new(dir.path().join("bills.txt"));
        (dir, store)
    }

    #[test]
    fn test_append_numbers_sequentially() {
        let (_dir, store) = store();
        let numbers: Vec<String> = (1..=3)
            .map(|i| store.append(Money::from_cents(i * 100)).unwrap().bill_number)
            .collect();
        assert_eq!(numbers, vec!["0001", "0002", "0003"]);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].total, Money::from_cents(300));
    }

    #[test]
    fn test_append_records_parseable_local_time() {
        let (_dir, store) = store();
        let bill = store.append(Money::from_cents(199998)).unwrap();
        assert!(NaiveDateTime::parse_from_str(&bill.date, BILL_DATE_FORMAT).is_ok());
        assert_eq!(bill.payment_method, None);
    }

    #[test]
    fn test_append_rejects_non_positive_totals() {
        let (_dir, store) = store();
        assert!(store.append(Money::zero()).is_err());
        assert!(store.append(Money::from_cents(-100)).is_err());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_payment_method_written_only_when_known() {
        let (dir, store) = store();
        store.append(Money::from_cents(500)).unwrap();
        store
            .append_with_method(Money::from_cents(900), PaymentMethod::Card)
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("bills.txt")).unwrap())
                .unwrap();
        assert!(raw[0].get("payment_method").is_none());
        assert_eq!(raw[1]["payment_method"], "card");
        assert_eq!(raw[1]["total"], 9.0);
    }

    #[test]
    fn test_reads_legacy_bill_file() {
        let (dir, store) = store();
        std::fs::write(
            dir.path().join("bills.txt"),
            r#"[{"bill_number": "0001", "total": 1999.98, "date": "2024-05-01 14:03:11"}]"#,
        )
        .unwrap();

        let next = store.append(Money::from_cents(250)).unwrap();
        assert_eq!(next.bill_number, "0002");
        assert_eq!(store.list_all().unwrap()[0].total, Money::from_cents(199998));
    }
}
