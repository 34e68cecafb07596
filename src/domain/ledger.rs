use serde::Serialize;

use super::{Cents, Customer};

/// Read-side totals over the customer collection.
/// Always recomputed from the live collection, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub total_owed: Cents,
    pub customers_in_debt: usize,
}

/// Compute the summary totals for a customer collection.
pub fn summarize(customers: &[Customer]) -> LedgerSummary {
    LedgerSummary {
        total_owed: customers.iter().map(|c| c.owed).sum(),
        customers_in_debt: customers.iter().filter(|c| c.is_in_debt()).count(),
    }
}

/// Validate that a purchase keeps the customer's tab within their limit and
/// return the resulting tab. The limit is inclusive: a purchase that lands
/// exactly on it succeeds. An amount large enough to overflow i64 cents is
/// past any limit, so it rejects like any other over-limit purchase.
pub fn check_purchase(customer: &Customer, amount: Cents) -> Result<Cents, PurchaseError> {
    match customer.owed.checked_add(amount) {
        Some(new_owed) if new_owed <= customer.limit => Ok(new_owed),
        _ => Err(PurchaseError::LimitExceeded {
            // Headroom at rejection time, before any mutation
            available: customer.headroom(),
            requested: amount,
        }),
    }
}

/// Validate that a payment does not exceed the customer's outstanding tab.
/// A payment can never overpay or leave a credit balance.
pub fn check_payment(customer: &Customer, amount: Cents) -> Result<(), PaymentError> {
    if amount > customer.owed {
        return Err(PaymentError::Overpayment {
            owed: customer.owed,
            requested: amount,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    LimitExceeded { available: Cents, requested: Cents },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::LimitExceeded {
                available,
                requested,
            } => {
                write!(
                    f,
                    "Purchase of {} cents would exceed the credit limit ({} cents available)",
                    requested, available
                )
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    Overpayment { owed: Cents, requested: Cents },
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::Overpayment { owed, requested } => {
                write!(
                    f,
                    "Payment of {} cents exceeds the outstanding tab of {} cents",
                    requested, owed
                )
            }
        }
    }
}

impl std::error::Error for PaymentError {}
