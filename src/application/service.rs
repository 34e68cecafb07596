use tracing::{debug, info};

use crate::domain::{
    check_payment, check_purchase, summarize, Cents, Customer, CustomerId, LedgerSummary,
    PaymentError, PurchaseError, DEFAULT_CREDIT_LIMIT,
};

use super::AppError;

/// Application service holding the authoritative customer collection.
/// This is the primary interface for any client (CLI, TUI, API, etc.):
/// clients never mutate a `Customer` directly, only through these operations.
///
/// The collection lives for the application session only; there is no
/// persistence layer behind it.
#[derive(Default)]
pub struct LedgerService {
    customers: Vec<Customer>,
}

/// Result of recording a purchase
pub struct PurchaseResult {
    /// Snapshot of the customer after the mutation
    pub customer: Customer,
}

/// Result of recording a payment
pub struct PaymentResult {
    /// Snapshot of the customer after the mutation
    pub customer: Customer,
    pub outcome: PaymentOutcome,
}

/// Whether a payment cleared the tab entirely or left a balance.
/// Informational only: the state mutation is identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Settled,
    Partial,
}

impl LedgerService {
    /// Create a ledger service with an empty customer collection.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Customer operations
    // ========================

    /// Register a new customer with a zero tab.
    ///
    /// The name is trimmed and must not end up empty. A missing or
    /// non-positive limit falls back to [`DEFAULT_CREDIT_LIMIT`].
    pub fn add_customer(
        &mut self,
        name: &str,
        phone: Option<String>,
        limit: Option<Cents>,
    ) -> Result<Customer, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidName);
        }

        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_CREDIT_LIMIT);

        let mut customer = Customer::new(name.to_string(), limit);
        if let Some(phone) = phone {
            customer = customer.with_phone(phone);
        }

        info!(id = %customer.id, name = %customer.name, limit, "registered customer");
        self.customers.push(customer.clone());
        Ok(customer)
    }

    /// Add a purchase to a customer's tab. All-or-nothing: a purchase that
    /// would push the tab past the limit is rejected without any mutation,
    /// never clamped to the available headroom.
    pub fn record_purchase(
        &mut self,
        id: CustomerId,
        amount: Cents,
    ) -> Result<PurchaseResult, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(
                "Purchase amount must be positive".to_string(),
            ));
        }

        let customer = self.get_customer_mut(id)?;
        match check_purchase(customer, amount) {
            Ok(new_owed) => {
                customer.owed = new_owed;
                debug!(id = %customer.id, amount, owed = customer.owed, "recorded purchase");
                Ok(PurchaseResult {
                    customer: customer.clone(),
                })
            }
            Err(PurchaseError::LimitExceeded {
                available,
                requested,
            }) => Err(AppError::LimitExceeded {
                customer_name: customer.name.clone(),
                available,
                requested,
            }),
        }
    }

    /// Record a payment against a customer's tab. Rejected without any
    /// mutation if the amount exceeds what is owed.
    pub fn record_payment(
        &mut self,
        id: CustomerId,
        amount: Cents,
    ) -> Result<PaymentResult, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(
                "Payment amount must be positive".to_string(),
            ));
        }

        let customer = self.get_customer_mut(id)?;
        match check_payment(customer, amount) {
            Ok(()) => {
                customer.owed -= amount;
                debug!(id = %customer.id, amount, owed = customer.owed, "recorded payment");

                let outcome = if customer.is_settled() {
                    PaymentOutcome::Settled
                } else {
                    PaymentOutcome::Partial
                };
                Ok(PaymentResult {
                    customer: customer.clone(),
                    outcome,
                })
            }
            Err(PaymentError::Overpayment { owed, requested }) => {
                Err(AppError::OverpaymentRejected {
                    customer_name: customer.name.clone(),
                    owed,
                    requested,
                })
            }
        }
    }

    /// Remove a customer permanently. Idempotent: removing an id that is not
    /// present is a no-op, not an error. Returns the removed record, if any.
    pub fn delete_customer(&mut self, id: CustomerId) -> Option<Customer> {
        let pos = self.customers.iter().position(|c| c.id == id)?;
        let removed = self.customers.remove(pos);
        info!(id = %removed.id, name = %removed.name, "deleted customer");
        Some(removed)
    }

    // ========================
    // Read-side operations
    // ========================

    /// Get a customer by id.
    pub fn get_customer(&self, id: CustomerId) -> Result<&Customer, AppError> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::CustomerNotFound(id.to_string()))
    }

    /// Resolve a customer by full id or by name (case-insensitive; first
    /// match in insertion order wins). This is the lookup clients use to turn
    /// user input into a live record before targeting a mutation.
    pub fn resolve_customer(&self, query: &str) -> Result<&Customer, AppError> {
        if let Ok(id) = query.parse::<CustomerId>() {
            return self.get_customer(id);
        }

        let needle = query.trim().to_lowercase();
        self.customers
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
            .ok_or_else(|| AppError::CustomerNotFound(query.to_string()))
    }

    /// All customers, in insertion order.
    pub fn list_customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Ledger totals, recomputed from the live collection on every call.
    pub fn summary(&self) -> LedgerSummary {
        summarize(&self.customers)
    }

    fn get_customer_mut(&mut self, id: CustomerId) -> Result<&mut Customer, AppError> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::CustomerNotFound(id.to_string()))
    }
}
