use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceStatus {
    #[serde(rename = "pagada")]
    Paid,
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "vencida")]
    Overdue,
}

impl InvoiceStatus {
    pub fn parse(s: &str) -> Option<InvoiceStatus> {
        match s {
            "pagada" => Some(InvoiceStatus::Paid),
            "pendiente" => Some(InvoiceStatus::Pending),
            "vencida" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "fecha")]
    pub issued_on: NaiveDate,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "importe")]
    pub amount: f64,
    #[serde(rename = "estado")]
    pub status: InvoiceStatus,
    #[serde(rename = "vencimiento")]
    pub due_on: NaiveDate,
}

impl Invoice {
    fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.client, &self.id, &self.origin, &self.destination]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceTotals {
    #[serde(rename = "pagadas")]
    pub paid: f64,
    #[serde(rename = "pendientes")]
    pub pending: f64,
    #[serde(rename = "vencidas")]
    pub overdue: f64,
}

/// Totals are computed over the whole ledger, not the filtered view.
pub fn totals(invoices: &[Invoice]) -> InvoiceTotals {
    invoices
        .iter()
        .fold(InvoiceTotals::default(), |mut acc, invoice| {
            match invoice.status {
                InvoiceStatus::Paid => acc.paid += invoice.amount,
                InvoiceStatus::Pending => acc.pending += invoice.amount,
                InvoiceStatus::Overdue => acc.overdue += invoice.amount,
            }
            acc
        })
}

pub fn filter_invoices<'a>(
    invoices: &'a [Invoice],
    status: Option<InvoiceStatus>,
    search: &str,
) -> Vec<&'a Invoice> {
    let needle = search.trim().to_lowercase();
    invoices
        .iter()
        .filter(|invoice| status.is_none_or(|s| invoice.status == s))
        .filter(|invoice| needle.is_empty() || invoice.matches_search(&needle))
        .collect()
}
