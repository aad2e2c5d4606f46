//! Aggregation helpers for the dashboard and follow-up views.
//!
//! Everything here is a pure function of the loaded tables; nothing is cached.
//! Sums are checked so an oversized row surfaces as `AmountOverflow`.

use chrono::NaiveDate;

use crate::core::utils::{checked_total, percent_of};
use crate::domain::{Amount, Expense, ExpenseCategory, Receipt, ServiceType};
use crate::errors::NexusError;

use super::ServiceResult;

/// Tag carried by a `DegenerateArithmetic` error from [`SummaryService::progress_pct`].
pub const PROGRESS_TAG: &str = "progress against the annual target";
/// Tag carried by a `DegenerateArithmetic` error from [`SummaryService::budget_consumption_pct`].
pub const BUDGET_TAG: &str = "budget consumption";

/// Group → summed value, keyed in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown<K> {
    entries: Vec<(K, Amount)>,
}

impl<K: PartialEq> Breakdown<K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: K, value: Amount) -> Option<()> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, total)) => *total = total.checked_add(value)?,
            None => self.entries.push((key, value)),
        }
        Some(())
    }

    pub fn get(&self, key: &K) -> Option<Amount> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, Amount)> {
        self.entries.iter().map(|(key, total)| (key, *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unpaid remainder of a single receipt row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutstandingBalance {
    pub client: String,
    pub service: ServiceType,
    pub date: NaiveDate,
    pub remaining: Amount,
}

/// Headline figures of the dashboard.
///
/// A percentage is `None` when its reference amount is zero; the totals are
/// always present.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub collected: Amount,
    pub spent: Amount,
    pub net_balance: Amount,
    pub progress_pct: Option<f64>,
    pub budget_consumption_pct: Option<f64>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of amounts paid across all receipts.
    pub fn total_collected(receipts: &[Receipt]) -> ServiceResult<Amount> {
        Ok(checked_total(
            receipts.iter().map(|receipt| receipt.paid),
            "total collected",
        )?)
    }

    /// Sum of all expense amounts.
    pub fn total_spent(expenses: &[Expense]) -> ServiceResult<Amount> {
        Ok(checked_total(
            expenses.iter().map(|expense| expense.amount),
            "total spent",
        )?)
    }

    pub fn net_balance(receipts: &[Receipt], expenses: &[Expense]) -> ServiceResult<Amount> {
        let collected = Self::total_collected(receipts)?;
        let spent = Self::total_spent(expenses)?;
        difference(collected, spent)
    }

    /// Share of the annual target already collected.
    pub fn progress_pct(receipts: &[Receipt], annual_target: Amount) -> ServiceResult<f64> {
        Ok(percent_of(
            Self::total_collected(receipts)?,
            annual_target,
            PROGRESS_TAG,
        )?)
    }

    /// Share of the planned operating budget already spent.
    pub fn budget_consumption_pct(
        expenses: &[Expense],
        planned_budget: Amount,
    ) -> ServiceResult<f64> {
        Ok(percent_of(
            Self::total_spent(expenses)?,
            planned_budget,
            BUDGET_TAG,
        )?)
    }

    /// Groups `rows` by `group` and sums `value` per group.
    pub fn breakdown_by<R, K, G, V>(rows: &[R], group: G, value: V) -> ServiceResult<Breakdown<K>>
    where
        K: PartialEq,
        G: Fn(&R) -> K,
        V: Fn(&R) -> Amount,
    {
        let mut breakdown = Breakdown::new();
        for row in rows {
            breakdown
                .add(group(row), value(row))
                .ok_or(NexusError::AmountOverflow("group total"))?;
        }
        Ok(breakdown)
    }

    pub fn revenue_by_service(receipts: &[Receipt]) -> ServiceResult<Breakdown<ServiceType>> {
        Self::breakdown_by(receipts, |receipt| receipt.service, |receipt| receipt.paid)
    }

    pub fn spending_by_category(
        expenses: &[Expense],
    ) -> ServiceResult<Breakdown<ExpenseCategory>> {
        Self::breakdown_by(expenses, |expense| expense.category, |expense| expense.amount)
    }

    /// One entry per receipt row with `paid < total`, in row order. A client
    /// with several unpaid rows appears several times.
    pub fn outstanding(receipts: &[Receipt]) -> Vec<OutstandingBalance> {
        receipts
            .iter()
            .filter(|receipt| receipt.paid < receipt.total_due)
            .map(|receipt| OutstandingBalance {
                client: receipt.client.clone(),
                service: receipt.service,
                date: receipt.date,
                remaining: receipt.remaining(),
            })
            .collect()
    }

    /// Totals fail only on overflow. A zero target or budget leaves the
    /// matching percentage empty instead of failing the whole summary.
    pub fn financial_summary(
        receipts: &[Receipt],
        expenses: &[Expense],
        annual_target: Amount,
        planned_budget: Amount,
    ) -> ServiceResult<FinancialSummary> {
        let collected = Self::total_collected(receipts)?;
        let spent = Self::total_spent(expenses)?;
        Ok(FinancialSummary {
            collected,
            spent,
            net_balance: difference(collected, spent)?,
            progress_pct: optional_percent(collected, annual_target, PROGRESS_TAG)?,
            budget_consumption_pct: optional_percent(spent, planned_budget, BUDGET_TAG)?,
        })
    }
}

fn difference(collected: Amount, spent: Amount) -> ServiceResult<Amount> {
    Ok(collected
        .checked_sub(spent)
        .ok_or(NexusError::AmountOverflow("net balance"))?)
}

fn optional_percent(part: Amount, whole: Amount, tag: &'static str) -> ServiceResult<Option<f64>> {
    match percent_of(part, whole, tag) {
        Ok(pct) => Ok(Some(pct)),
        Err(NexusError::DegenerateArithmetic(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::domain::PaymentMethod;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn receipt(client: &str, total: Amount, paid: Amount) -> Receipt {
        Receipt::new(
            day(),
            client,
            ServiceType::CapacityBuilding,
            total,
            paid,
            PaymentMethod::Cash,
        )
    }

    fn expense(amount: Amount) -> Expense {
        Expense::new(day(), ExpenseCategory::Marketing, "Posters", amount)
    }

    #[test]
    fn empty_tables_sum_to_zero() {
        assert_eq!(SummaryService::total_collected(&[]).unwrap(), 0);
        assert_eq!(SummaryService::total_spent(&[]).unwrap(), 0);
        assert_eq!(SummaryService::net_balance(&[], &[]).unwrap(), 0);
        assert!(SummaryService::revenue_by_service(&[]).unwrap().is_empty());
    }

    #[test]
    fn breakdown_sums_in_first_appearance_order() {
        let rows = [("A", 10), ("B", 5), ("A", 3)];
        let breakdown = SummaryService::breakdown_by(&rows, |row| row.0, |row| row.1).unwrap();
        assert_eq!(breakdown.get(&"A"), Some(13));
        assert_eq!(breakdown.get(&"B"), Some(5));
        assert_eq!(breakdown.keys().copied().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn outstanding_lists_only_unpaid_rows() {
        let receipts = [receipt("Issa", 1000, 400), receipt("Mariam", 500, 500)];
        let outstanding = SummaryService::outstanding(&receipts);
        assert_eq!(outstanding.len(), 1);
        assert_eq!(outstanding[0].client, "Issa");
        assert_eq!(outstanding[0].remaining, 600);
    }

    #[test]
    fn outstanding_keeps_repeat_clients_per_row() {
        let receipts = [
            receipt("Issa", 1000, 400),
            receipt("Issa", 1000, 900),
            receipt("Issa", 1000, 1000),
        ];
        let remaining: Vec<Amount> = SummaryService::outstanding(&receipts)
            .into_iter()
            .map(|entry| entry.remaining)
            .collect();
        assert_eq!(remaining, vec![600, 100]);
    }

    #[test]
    fn progress_against_zero_target_is_rejected() {
        let receipts = [receipt("Issa", 1000, 400)];
        let err = SummaryService::progress_pct(&receipts, 0).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(NexusError::DegenerateArithmetic(PROGRESS_TAG))
        ));
    }

    #[test]
    fn financial_summary_combines_all_metrics() {
        let receipts = [receipt("Issa", 100_000, 50_000)];
        let expenses = [expense(20_000)];
        let summary =
            SummaryService::financial_summary(&receipts, &expenses, 1_000_000, 200_000).unwrap();
        assert_eq!(summary.collected, 50_000);
        assert_eq!(summary.spent, 20_000);
        assert_eq!(summary.net_balance, 30_000);
        assert!((summary.progress_pct.unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((summary.budget_consumption_pct.unwrap() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_references_keep_the_totals() {
        let receipts = [receipt("Issa", 100_000, 40_000)];
        let expenses = [expense(15_000)];
        let summary = SummaryService::financial_summary(&receipts, &expenses, 0, 0).unwrap();
        assert_eq!(summary.collected, 40_000);
        assert_eq!(summary.net_balance, 25_000);
        assert_eq!(summary.progress_pct, None);
        assert_eq!(summary.budget_consumption_pct, None);
    }

    #[test]
    fn huge_rows_report_overflow_instead_of_panicking() {
        let receipts = [receipt("Awa", i64::MAX, i64::MAX), receipt("Bob", 10, 1)];
        let err = SummaryService::total_collected(&receipts).unwrap_err();
        assert!(matches!(err, ServiceError::Core(NexusError::AmountOverflow(_))));
        assert!(SummaryService::revenue_by_service(&receipts).is_err());
        assert!(
            SummaryService::financial_summary(&receipts, &[], 1_000, 1_000).is_err()
        );

        let expenses = [expense(i64::MAX - 1), expense(2)];
        assert!(SummaryService::total_spent(&expenses).is_err());
        assert!(SummaryService::spending_by_category(&expenses).is_err());
    }
}
