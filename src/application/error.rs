use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Customer name must not be empty")]
    InvalidName,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(
        "Credit limit exceeded for {customer_name}: requested {requested} cents, {available} cents available"
    )]
    LimitExceeded {
        customer_name: String,
        available: Cents,
        requested: Cents,
    },

    #[error(
        "Payment of {requested} cents exceeds the outstanding tab of {owed} cents for {customer_name}"
    )]
    OverpaymentRejected {
        customer_name: String,
        owed: Cents,
        requested: Cents,
    },

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}
