//! Client payment records and the fixed service catalog they are priced from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    amount_format, date_format, format_date, labelled_enum, Amount, Displayable,
};

labelled_enum! {
    /// Offerings of the cabinet, each billed at a fixed price.
    ServiceType {
        MunicipalPartnership => "Partenariat Collectivités",
        SchoolPartnership => "Partenariat Écoles",
        SchoolTraining => "Formations Écoles (Élèves/Profs)",
        CapacityBuilding => "Renforcement de capacités",
        IndividualCoaching => "Accompagnement Particulier",
        ProjectStudies => "Études de projets",
    }
}

labelled_enum! {
    /// Accepted payment channels.
    PaymentMethod {
        Cash => "Espèces",
        BankTransfer => "Virement",
        OrangeMoney => "Orange Money",
        MoovMoney => "Moov Money",
    }
}

/// Maps every service type to its price for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceList {
    entries: Vec<(ServiceType, Amount)>,
}

impl PriceList {
    pub fn new(entries: Vec<(ServiceType, Amount)>) -> Self {
        Self { entries }
    }

    pub fn price_of(&self, service: ServiceType) -> Option<Amount> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == service)
            .map(|(_, price)| *price)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceType, Amount)> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for PriceList {
    fn default() -> Self {
        Self::new(vec![
            (ServiceType::MunicipalPartnership, 300_000),
            (ServiceType::SchoolPartnership, 200_000),
            (ServiceType::SchoolTraining, 75_000),
            (ServiceType::CapacityBuilding, 100_000),
            (ServiceType::IndividualCoaching, 100_000),
            (ServiceType::ProjectStudies, 1_000_000),
        ])
    }
}

/// One payment received from a client. The total due is frozen at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Name")]
    pub client: String,
    #[serde(rename = "Service")]
    pub service: ServiceType,
    #[serde(rename = "Total", with = "amount_format")]
    pub total_due: Amount,
    #[serde(rename = "Paid", with = "amount_format")]
    pub paid: Amount,
    #[serde(rename = "Method")]
    pub method: PaymentMethod,
}

impl Receipt {
    pub fn new(
        date: NaiveDate,
        client: impl Into<String>,
        service: ServiceType,
        total_due: Amount,
        paid: Amount,
        method: PaymentMethod,
    ) -> Self {
        Self {
            date,
            client: client.into(),
            service,
            total_due,
            paid,
            method,
        }
    }

    /// Amount still owed on this row; negative when the client overpaid.
    pub fn remaining(&self) -> Amount {
        self.total_due - self.paid
    }

    pub fn is_settled(&self) -> bool {
        self.paid >= self.total_due
    }
}

impl Displayable for Receipt {
    fn display_label(&self) -> String {
        format!(
            "{} · {} · {} ({})",
            format_date(self.date),
            self.client,
            self.service,
            self.method
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_price_list_covers_every_service() {
        let prices = PriceList::default();
        for service in ServiceType::ALL {
            assert!(prices.price_of(*service).is_some(), "{service} has no price");
        }
        assert_eq!(
            prices.price_of(ServiceType::IndividualCoaching),
            Some(100_000)
        );
    }

    #[test]
    fn service_labels_parse_case_insensitively() {
        let parsed: ServiceType = "accompagnement particulier".parse().unwrap();
        assert_eq!(parsed, ServiceType::IndividualCoaching);
        let err = "Consulting".parse::<ServiceType>().unwrap_err();
        assert!(err.contains("Études de projets"));
    }

    #[test]
    fn remaining_is_total_minus_paid() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let receipt = Receipt::new(
            date,
            "Awa",
            ServiceType::SchoolTraining,
            75_000,
            25_000,
            PaymentMethod::OrangeMoney,
        );
        assert_eq!(receipt.remaining(), 50_000);
        assert!(!receipt.is_settled());
    }
}
