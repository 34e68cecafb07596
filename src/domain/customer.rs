use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type CustomerId = Uuid;

/// Credit limit applied when none (or an invalid one) is given at registration: 500.00.
pub const DEFAULT_CREDIT_LIMIT: Cents = 50_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
    /// Outstanding tab in cents. Held within `0..=limit` at all times.
    pub owed: Cents,
    /// Maximum tab this customer may run up.
    pub limit: Cents,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, limit: Cents) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            phone: None,
            owed: 0,
            limit,
            created_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Credit still available before a purchase would be rejected.
    pub fn headroom(&self) -> Cents {
        self.limit - self.owed
    }

    pub fn is_settled(&self) -> bool {
        self.owed == 0
    }

    pub fn is_in_debt(&self) -> bool {
        self.owed > 0
    }
}
