use anyhow::Result;
use fiado::application::{AppError, LedgerService, PaymentOutcome};
use fiado::domain::{Customer, CustomerId, DEFAULT_CREDIT_LIMIT};
use uuid::Uuid;

/// Helper to create a service with one customer carrying the given tab.
fn service_with_customer(owed: i64, limit: i64) -> Result<(LedgerService, CustomerId)> {
    let mut service = LedgerService::new();
    let customer = service.add_customer("Maria Santos", None, Some(limit))?;
    let id = customer.id;
    if owed > 0 {
        service.record_purchase(id, owed)?;
    }
    Ok((service, id))
}

fn assert_invariant(customer: &Customer) {
    assert!(
        customer.owed >= 0 && customer.owed <= customer.limit,
        "invariant violated: owed {} outside 0..={}",
        customer.owed,
        customer.limit
    );
}

#[test]
fn test_add_customer_starts_settled_with_default_limit() -> Result<()> {
    let mut service = LedgerService::new();
    let customer = service.add_customer("Maria Santos", None, None)?;

    assert_eq!(customer.owed, 0);
    assert_eq!(customer.limit, DEFAULT_CREDIT_LIMIT);
    assert!(customer.is_settled());
    Ok(())
}

#[test]
fn test_add_customer_trims_name_and_keeps_phone() -> Result<()> {
    let mut service = LedgerService::new();
    let customer =
        service.add_customer("  José Oliveira  ", Some("(11) 97777-6666".into()), None)?;

    assert_eq!(customer.name, "José Oliveira");
    assert_eq!(customer.phone.as_deref(), Some("(11) 97777-6666"));
    Ok(())
}

// Scenario E: blank name is rejected and nothing is created
#[test]
fn test_add_customer_rejects_whitespace_name() {
    let mut service = LedgerService::new();
    let result = service.add_customer("  ", None, None);

    assert!(matches!(result, Err(AppError::InvalidName)));
    assert!(service.list_customers().is_empty());
}

#[test]
fn test_add_customer_non_positive_limit_falls_back_to_default() -> Result<()> {
    let mut service = LedgerService::new();

    let zero = service.add_customer("Ana", None, Some(0))?;
    assert_eq!(zero.limit, DEFAULT_CREDIT_LIMIT);

    let negative = service.add_customer("Bruno", None, Some(-100))?;
    assert_eq!(negative.limit, DEFAULT_CREDIT_LIMIT);
    Ok(())
}

#[test]
fn test_customers_keep_insertion_order() -> Result<()> {
    let mut service = LedgerService::new();
    service.add_customer("Maria Santos", None, None)?;
    service.add_customer("José Oliveira", None, None)?;
    service.add_customer("Ana Costa", None, None)?;

    let names: Vec<&str> = service
        .list_customers()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Maria Santos", "José Oliveira", "Ana Costa"]);
    Ok(())
}

// Scenario B: a purchase landing exactly on the limit succeeds
#[test]
fn test_purchase_up_to_limit_is_inclusive() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    let result = service.record_purchase(id, 65_000)?;
    assert_eq!(result.customer.owed, 100_000);
    assert_eq!(result.customer.headroom(), 0);
    assert_invariant(&result.customer);
    Ok(())
}

// Scenario A: an over-limit purchase is rejected with the headroom, tab untouched
#[test]
fn test_purchase_over_limit_rejected_with_headroom() -> Result<()> {
    let (mut service, id) = service_with_customer(0, 100_000)?;

    let result = service.record_purchase(id, 120_000);
    match result {
        Err(AppError::LimitExceeded {
            available,
            requested,
            ..
        }) => {
            assert_eq!(available, 100_000);
            assert_eq!(requested, 120_000);
        }
        other => panic!("expected LimitExceeded, got {:?}", other.map(|r| r.customer)),
    }

    assert_eq!(service.get_customer(id)?.owed, 0);
    Ok(())
}

#[test]
fn test_rejected_purchase_never_mutates() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    assert!(service.record_purchase(id, 65_001).is_err());
    assert!(service.record_purchase(id, 1_000_000).is_err());

    let customer = service.get_customer(id)?;
    assert_eq!(customer.owed, 35_000);
    assert_invariant(customer);
    Ok(())
}

#[test]
fn test_huge_purchase_rejected_without_overflow() -> Result<()> {
    let (mut service, id) = service_with_customer(500, 100_000)?;

    // An amount near the cents ceiling must reject like any other
    // over-limit purchase, not wrap the tab negative
    let result = service.record_purchase(id, i64::MAX);
    match result {
        Err(AppError::LimitExceeded { available, .. }) => assert_eq!(available, 99_500),
        other => panic!("expected LimitExceeded, got {:?}", other.map(|r| r.customer)),
    }

    let customer = service.get_customer(id)?;
    assert_eq!(customer.owed, 500);
    assert_invariant(customer);
    Ok(())
}

#[test]
fn test_purchase_rejects_non_positive_amount() -> Result<()> {
    let (mut service, id) = service_with_customer(0, 100_000)?;

    assert!(matches!(
        service.record_purchase(id, 0),
        Err(AppError::InvalidAmount(_))
    ));
    assert!(matches!(
        service.record_purchase(id, -500),
        Err(AppError::InvalidAmount(_))
    ));
    assert_eq!(service.get_customer(id)?.owed, 0);
    Ok(())
}

// Scenario D: paying exactly the tab settles it
#[test]
fn test_full_payment_reports_settled() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    let result = service.record_payment(id, 35_000)?;
    assert_eq!(result.customer.owed, 0);
    assert_eq!(result.outcome, PaymentOutcome::Settled);
    Ok(())
}

#[test]
fn test_partial_payment_reports_balance_remains() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    let result = service.record_payment(id, 10_000)?;
    assert_eq!(result.customer.owed, 25_000);
    assert_eq!(result.outcome, PaymentOutcome::Partial);
    Ok(())
}

// Scenario C: overpayment is rejected with the current tab, untouched
#[test]
fn test_overpayment_rejected_without_mutation() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    let result = service.record_payment(id, 40_000);
    match result {
        Err(AppError::OverpaymentRejected {
            owed, requested, ..
        }) => {
            assert_eq!(owed, 35_000);
            assert_eq!(requested, 40_000);
        }
        other => panic!(
            "expected OverpaymentRejected, got {:?}",
            other.map(|r| r.customer)
        ),
    }

    assert_eq!(service.get_customer(id)?.owed, 35_000);
    Ok(())
}

#[test]
fn test_payment_rejects_non_positive_amount() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    assert!(matches!(
        service.record_payment(id, 0),
        Err(AppError::InvalidAmount(_))
    ));
    assert_eq!(service.get_customer(id)?.owed, 35_000);
    Ok(())
}

#[test]
fn test_purchase_then_payment_round_trip() -> Result<()> {
    let (mut service, id) = service_with_customer(20_000, 100_000)?;

    service.record_purchase(id, 12_345)?;
    service.record_payment(id, 12_345)?;

    assert_eq!(service.get_customer(id)?.owed, 20_000);
    Ok(())
}

#[test]
fn test_invariant_holds_across_operation_sequence() -> Result<()> {
    let (mut service, id) = service_with_customer(0, 50_000)?;

    // Mix of accepted and rejected operations
    let _ = service.record_purchase(id, 30_000);
    let _ = service.record_purchase(id, 30_000); // rejected, over limit
    let _ = service.record_payment(id, 10_000);
    let _ = service.record_payment(id, 50_000); // rejected, overpayment
    let _ = service.record_purchase(id, 30_000); // lands exactly on the limit

    let customer = service.get_customer(id)?;
    assert_invariant(customer);
    assert_eq!(customer.owed, 50_000);
    Ok(())
}

#[test]
fn test_delete_customer_is_idempotent() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;

    let removed = service.delete_customer(id);
    assert_eq!(removed.map(|c| c.name), Some("Maria Santos".to_string()));
    assert!(service.list_customers().is_empty());

    // Second delete of the same id is a no-op, not an error
    assert!(service.delete_customer(id).is_none());
    assert!(service.delete_customer(Uuid::new_v4()).is_none());
    Ok(())
}

#[test]
fn test_purchase_on_unknown_customer() {
    let mut service = LedgerService::new();
    let result = service.record_purchase(Uuid::new_v4(), 1_000);

    assert!(matches!(result, Err(AppError::CustomerNotFound(_))));
}

#[test]
fn test_resolve_customer_by_name_and_id() -> Result<()> {
    let mut service = LedgerService::new();
    let maria = service.add_customer("Maria Santos", None, None)?;
    service.add_customer("José Oliveira", None, None)?;

    assert_eq!(service.resolve_customer("maria santos")?.id, maria.id);
    assert_eq!(service.resolve_customer(&maria.id.to_string())?.id, maria.id);
    assert!(matches!(
        service.resolve_customer("unknown"),
        Err(AppError::CustomerNotFound(_))
    ));
    Ok(())
}

// Scenario F: summary over a debtor and a settled customer
#[test]
fn test_summary_counts_debtors_and_total() -> Result<()> {
    let mut service = LedgerService::new();
    let maria = service.add_customer("Maria Santos", None, Some(100_000))?;
    service.record_purchase(maria.id, 35_000)?;
    service.add_customer("José Oliveira", None, Some(80_000))?;

    let summary = service.summary();
    assert_eq!(summary.total_owed, 35_000);
    assert_eq!(summary.customers_in_debt, 1);
    Ok(())
}

#[test]
fn test_summary_is_recomputed_live() -> Result<()> {
    let (mut service, id) = service_with_customer(35_000, 100_000)?;
    assert_eq!(service.summary().total_owed, 35_000);

    service.record_payment(id, 35_000)?;
    let summary = service.summary();
    assert_eq!(summary.total_owed, 0);
    assert_eq!(summary.customers_in_debt, 0);

    service.delete_customer(id);
    assert_eq!(service.summary().total_owed, 0);
    Ok(())
}
