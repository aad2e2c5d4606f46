//! Business logic helpers for recording and selecting receipts.

use chrono::NaiveDate;

use crate::core::record_manager::RecordManager;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Amount, Displayable, PaymentMethod, PriceList, Receipt, ServiceType};

/// Operator input of the payment form, before the price is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDraft {
    pub client: String,
    pub service: ServiceType,
    pub paid: Amount,
    pub method: PaymentMethod,
}

pub struct ReceiptService;

impl ReceiptService {
    /// Freezes the current price of the draft's service into a new receipt.
    pub fn build(draft: ReceiptDraft, prices: &PriceList, date: NaiveDate) -> ServiceResult<Receipt> {
        let client = draft.client.trim();
        if client.is_empty() {
            return Err(ServiceError::Invalid("Client name is required".into()));
        }
        if draft.paid < 0 {
            return Err(ServiceError::Invalid("Amount paid cannot be negative".into()));
        }
        let total_due = prices.price_of(draft.service).ok_or_else(|| {
            ServiceError::Invalid(format!("No price configured for {}", draft.service))
        })?;
        Ok(Receipt::new(
            date,
            client,
            draft.service,
            total_due,
            draft.paid,
            draft.method,
        ))
    }

    /// Builds and appends the receipt, then refreshes the manager's tables.
    pub fn record(
        manager: &mut RecordManager,
        draft: ReceiptDraft,
        prices: &PriceList,
        date: NaiveDate,
    ) -> ServiceResult<Receipt> {
        let receipt = Self::build(draft, prices, date)?;
        manager.record_receipt(receipt.clone())?;
        tracing::info!(receipt = %receipt.display_label(), paid = receipt.paid, "payment recorded");
        Ok(receipt)
    }

    /// Distinct client names in order of first appearance.
    pub fn client_names(receipts: &[Receipt]) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for receipt in receipts {
            if !names.contains(&receipt.client.as_str()) {
                names.push(&receipt.client);
            }
        }
        names
    }

    /// Last-appended receipt whose client name matches `name` exactly.
    pub fn latest_for_client<'a>(receipts: &'a [Receipt], name: &str) -> Option<&'a Receipt> {
        let name = name.trim();
        receipts.iter().rev().find(|receipt| receipt.client == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::storage::CsvRecordStore;
    use tempfile::tempdir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn draft(client: &str, service: ServiceType, paid: Amount) -> ReceiptDraft {
        ReceiptDraft {
            client: client.into(),
            service,
            paid,
            method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn build_copies_price_from_list() {
        let receipt = ReceiptService::build(
            draft("  Awa ", ServiceType::ProjectStudies, 250_000),
            &PriceList::default(),
            day(),
        )
        .unwrap();
        assert_eq!(receipt.client, "Awa");
        assert_eq!(receipt.total_due, 1_000_000);
    }

    #[test]
    fn build_rejects_blank_client() {
        let err = ReceiptService::build(
            draft(" ", ServiceType::ProjectStudies, 0),
            &PriceList::default(),
            day(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn stored_total_ignores_later_price_changes() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path().to_path_buf()).unwrap();
        let mut manager = RecordManager::open(Box::new(store)).unwrap();
        ReceiptService::record(
            &mut manager,
            draft("Awa", ServiceType::SchoolTraining, 0),
            &PriceList::default(),
            day(),
        )
        .unwrap();

        let discounted = PriceList::new(vec![(ServiceType::SchoolTraining, 50_000)]);
        ReceiptService::record(
            &mut manager,
            draft("Issa", ServiceType::SchoolTraining, 0),
            &discounted,
            day(),
        )
        .unwrap();
        manager.refresh().unwrap();
        let totals: Vec<Amount> = manager.receipts().iter().map(|r| r.total_due).collect();
        assert_eq!(totals, vec![75_000, 50_000]);
    }

    #[test]
    fn full_payment_leaves_nothing_outstanding() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path().to_path_buf()).unwrap();
        let mut manager = RecordManager::open(Box::new(store)).unwrap();
        ReceiptService::record(
            &mut manager,
            draft("Awa", ServiceType::IndividualCoaching, 100_000),
            &PriceList::default(),
            day(),
        )
        .unwrap();
        let outstanding = SummaryService::outstanding(manager.receipts());
        assert!(outstanding.iter().all(|entry| entry.client != "Awa"));
    }

    #[test]
    fn latest_for_client_picks_last_row() {
        let prices = PriceList::default();
        let receipts = vec![
            ReceiptService::build(draft("Awa", ServiceType::SchoolTraining, 10), &prices, day())
                .unwrap(),
            ReceiptService::build(draft("Issa", ServiceType::SchoolTraining, 20), &prices, day())
                .unwrap(),
            ReceiptService::build(draft("Awa", ServiceType::ProjectStudies, 30), &prices, day())
                .unwrap(),
        ];
        let latest = ReceiptService::latest_for_client(&receipts, "Awa").unwrap();
        assert_eq!(latest.paid, 30);
        assert!(ReceiptService::latest_for_client(&receipts, "Mariam").is_none());
        assert_eq!(ReceiptService::client_names(&receipts), vec!["Awa", "Issa"]);
    }
}
