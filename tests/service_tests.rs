mod common;

use nexus_manager::{
    core::services::{
        ExpenseDraft, ExpenseService, FollowUpService, ReceiptDraft, ReceiptService,
        SummaryService,
    },
    documents::{render_receipt, ReceiptStatement, RenderOptions},
    domain::{CabinetProfile, ExpenseCategory, PaymentMethod, PriceList, ServiceType},
};

use common::{day, receipt, setup_test_env};

#[test]
fn dashboard_figures_follow_recorded_rows() {
    let (mut records, _config) = setup_test_env();
    let prices = PriceList::default();

    ReceiptService::record(
        &mut records,
        ReceiptDraft {
            client: "Awa".into(),
            service: ServiceType::SchoolTraining,
            paid: 25_000,
            method: PaymentMethod::OrangeMoney,
        },
        &prices,
        day(3),
    )
    .unwrap();
    ReceiptService::record(
        &mut records,
        ReceiptDraft {
            client: "Commune de Koudougou".into(),
            service: ServiceType::MunicipalPartnership,
            paid: 300_000,
            method: PaymentMethod::BankTransfer,
        },
        &prices,
        day(4),
    )
    .unwrap();
    ExpenseService::record(
        &mut records,
        ExpenseDraft {
            category: ExpenseCategory::Marketing,
            description: "Flyers".into(),
            amount: 25_000,
        },
        day(5),
    )
    .unwrap();

    let summary = SummaryService::financial_summary(
        records.receipts(),
        records.expenses(),
        1_000_000,
        100_000,
    )
    .unwrap();
    assert_eq!(summary.collected, 325_000);
    assert_eq!(summary.spent, 25_000);
    assert_eq!(summary.net_balance, 300_000);
    assert!((summary.progress_pct.unwrap() - 32.5).abs() < 1e-9);
    assert!((summary.budget_consumption_pct.unwrap() - 25.0).abs() < 1e-9);

    let by_service = SummaryService::revenue_by_service(records.receipts()).unwrap();
    assert_eq!(by_service.get(&ServiceType::SchoolTraining), Some(25_000));
    assert_eq!(
        by_service.keys().copied().collect::<Vec<_>>(),
        vec![ServiceType::SchoolTraining, ServiceType::MunicipalPartnership]
    );

    let reminders =
        FollowUpService::reminders(records.receipts(), &CabinetProfile::default(), "Bonjour");
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].balance.client, "Awa");
    assert_eq!(reminders[0].balance.remaining, 50_000);
}

#[test]
fn receipt_document_reflects_partial_payment() {
    let row = receipt("Awa", ServiceType::SchoolTraining, 1000, 250);
    let statement = ReceiptStatement::from_record(&row).unwrap();
    assert_eq!(statement.percent_label(), "25.0%");
    assert_eq!(statement.remaining, 750);

    let bytes = render_receipt(
        &row,
        &CabinetProfile::default(),
        &RenderOptions {
            currency_label: "CFA".into(),
            logo_path: None,
        },
    )
    .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
