use super::*;

#[test]
fn test_partial_then_final_payment() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);

    assert!(pay(&manager, &order_id, 30.0).success);
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total_paid, 30.0);
    assert_eq!(snapshot.remaining_balance, 26.98);
    assert_eq!(snapshot.status, OrderStatus::Pending);
    assert_eq!(table_status(&manager, "T1"), TableStatus::Occupied);

    assert!(pay(&manager, &order_id, 26.98).success);
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.remaining_balance, 0.0);
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert!(snapshot.closed_at.is_some());
    assert_eq!(snapshot.payments.len(), 2);

    assert_eq!(table_status(&manager, "T1"), TableStatus::Available);
    assert!(manager.get_active_orders().unwrap().is_empty());
}

#[test]
fn test_overpayment_has_no_side_effect() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);
    let before = manager.get_snapshot(&order_id).unwrap().unwrap();

    let resp = pay(&manager, &order_id, 57.00);
    assert!(!resp.success);
    assert_eq!(resp.error_code(), Some(CommandErrorCode::Overpayment));

    let after = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_non_positive_payment_rejected() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);

    assert_eq!(pay(&manager, &order_id, 0.0).error_code(), Some(CommandErrorCode::InvalidAmount));
    assert_eq!(pay(&manager, &order_id, -3.0).error_code(), Some(CommandErrorCode::InvalidAmount));
    assert!(manager.get_snapshot(&order_id).unwrap().unwrap().payments.is_empty());
}

#[test]
fn test_mutations_on_paid_tab_rejected() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);
    assert!(pay(&manager, &order_id, 56.98).success);

    assert_eq!(pay(&manager, &order_id, 1.0).error_code(), Some(CommandErrorCode::OrderClosed));
    assert_eq!(
        add_item(&manager, &order_id, "Café", 5.0, 1).error_code(),
        Some(CommandErrorCode::OrderClosed)
    );
    let resp = manager.execute_command(command(OrderCommandPayload::ToggleService {
        order_id: order_id.clone(),
    }));
    assert_eq!(resp.error_code(), Some(CommandErrorCode::OrderClosed));
}

#[test]
fn test_payment_on_empty_tab_is_overpayment() {
    let manager = create_test_manager();
    let order_id = open_table(&manager, "T1");

    assert_eq!(pay(&manager, &order_id, 1.0).error_code(), Some(CommandErrorCode::Overpayment));
}

#[test]
fn test_removing_paid_items_rejected() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);
    assert!(pay(&manager, &order_id, 50.0).success);

    let item_id = manager.get_snapshot(&order_id).unwrap().unwrap().items[0].id.clone();
    let resp = manager.execute_command(command(OrderCommandPayload::RemoveItem {
        order_id: order_id.clone(),
        item_id,
    }));
    assert_eq!(resp.error_code(), Some(CommandErrorCode::InvalidOperation));

    let resp = manager.execute_command(command(OrderCommandPayload::ToggleService {
        order_id: order_id.clone(),
    }));
    // 51.80 without service is still above 50.00 paid
    assert!(resp.success);
}

#[test]
fn test_removing_item_down_to_paid_amount_settles_tab() {
    let manager = create_test_manager();
    let order_id = open_table(&manager, "T1");
    assert!(add_item(&manager, &order_id, "Pastel", 10.0, 1).success);
    assert!(add_item(&manager, &order_id, "Picanha", 40.0, 1).success);
    // 50.00 + 5.00 service
    assert!(pay(&manager, &order_id, 44.0).success);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    let pastel = snapshot
        .items
        .iter()
        .find(|i| i.product_name == "Pastel")
        .unwrap()
        .id
        .clone();
    let resp = manager.execute_command(command(OrderCommandPayload::RemoveItem {
        order_id: order_id.clone(),
        item_id: pastel,
    }));
    assert!(resp.success);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total, 44.0);
    assert_eq!(snapshot.remaining_balance, 0.0);
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert!(snapshot.closed_at.is_some());
    assert_eq!(table_status(&manager, "T1"), TableStatus::Available);
    assert!(manager.get_active_orders().unwrap().is_empty());
    assert_eq!(manager.rebuild_snapshot(&order_id).unwrap(), snapshot);
}

#[test]
fn test_dropping_service_down_to_paid_amount_settles_tab() {
    let manager = create_test_manager();
    let order_id = open_table(&manager, "T1");
    assert!(add_item(&manager, &order_id, "Picanha", 40.0, 1).success);
    assert!(pay(&manager, &order_id, 40.0).success);
    assert_eq!(table_status(&manager, "T1"), TableStatus::Occupied);

    let resp = manager.execute_command(command(OrderCommandPayload::ToggleService {
        order_id: order_id.clone(),
    }));
    assert!(resp.success);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert!(!snapshot.include_service);
    assert_eq!(snapshot.remaining_balance, 0.0);
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert_eq!(table_status(&manager, "T1"), TableStatus::Available);

    // Settled tab is closed
    assert_eq!(pay(&manager, &order_id, 0.01).error_code(), Some(CommandErrorCode::OrderClosed));
}

#[test]
fn test_sub_cent_payment_rejected() {
    let manager = create_test_manager();
    let order_id = open_tab_with_moqueca(&manager);

    assert_eq!(pay(&manager, &order_id, 0.004).error_code(), Some(CommandErrorCode::InvalidAmount));
    assert!(manager.get_snapshot(&order_id).unwrap().unwrap().payments.is_empty());

    assert!(pay(&manager, &order_id, 0.006).success);
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.payments[0].amount, 0.01);
}
