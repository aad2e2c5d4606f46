//! Messaging deep-links for clients with an unpaid balance.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::core::services::{OutstandingBalance, SummaryService};
use crate::domain::{CabinetProfile, Receipt};

const WHATSAPP_BASE: &str = "https://wa.me/";

/// An outstanding balance paired with the link used to chase it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpReminder {
    pub balance: OutstandingBalance,
    pub link: String,
}

pub struct FollowUpService;

impl FollowUpService {
    /// `https://wa.me/<digits>?text=<message>`; non-digits are dropped from
    /// the contact number.
    pub fn whatsapp_link(contact: &str, message: &str) -> String {
        let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
        format!(
            "{WHATSAPP_BASE}{digits}?text={}",
            utf8_percent_encode(message, NON_ALPHANUMERIC)
        )
    }

    /// One reminder per outstanding row, all pointing at the cabinet contact.
    pub fn reminders(
        receipts: &[Receipt],
        profile: &CabinetProfile,
        message: &str,
    ) -> Vec<FollowUpReminder> {
        let link = Self::whatsapp_link(&profile.contact, message);
        SummaryService::outstanding(receipts)
            .into_iter()
            .map(|balance| FollowUpReminder {
                balance,
                link: link.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, ServiceType};
    use chrono::NaiveDate;

    #[test]
    fn link_encodes_message_and_strips_contact() {
        let link = FollowUpService::whatsapp_link("+226 74 04", "Solde: 600 CFA");
        assert_eq!(link, "https://wa.me/2267404?text=Solde%3A%20600%20CFA");
    }

    #[test]
    fn reminders_follow_outstanding_rows() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let receipts = vec![
            Receipt::new(date, "Awa", ServiceType::SchoolTraining, 75_000, 25_000, PaymentMethod::Cash),
            Receipt::new(date, "Issa", ServiceType::SchoolTraining, 75_000, 75_000, PaymentMethod::Cash),
        ];
        let reminders =
            FollowUpService::reminders(&receipts, &CabinetProfile::default(), "Bonjour");
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].balance.remaining, 50_000);
        assert!(reminders[0].link.starts_with("https://wa.me/22674042686?text=Bonjour"));
    }
}
