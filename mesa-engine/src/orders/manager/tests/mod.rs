use super::*;
use shared::models::ProductRef;
use shared::order::{
    CommandErrorCode, OrderCommandPayload, OrderEventType, PaymentInput, PaymentMethod,
};

mod test_payments;

fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    let manager = OrdersManager::with_storage(storage);
    for number in 1..=3 {
        manager
            .upsert_table(DiningTable::new(format!("T{number}"), number))
            .unwrap();
    }
    manager
}

fn command(payload: OrderCommandPayload) -> OrderCommand {
    OrderCommand::new("op-1", "Test Operator", payload)
}

fn open_table(manager: &OrdersManager, table_id: &str) -> String {
    let resp = manager.execute_command(command(OrderCommandPayload::OpenTable {
        table_id: table_id.to_string(),
        include_service: true,
        notes: None,
    }));
    assert!(resp.success, "Failed to open table: {:?}", resp.error);
    resp.order_id.unwrap()
}

fn add_item(manager: &OrdersManager, order_id: &str, name: &str, price: f64, quantity: i32) -> CommandResponse {
    manager.execute_command(command(OrderCommandPayload::AddItem {
        order_id: order_id.to_string(),
        product: ProductRef::new(format!("p-{name}"), name, price),
        quantity,
        notes: None,
    }))
}

fn pay(manager: &OrdersManager, order_id: &str, amount: f64) -> CommandResponse {
    manager.execute_command(command(OrderCommandPayload::AddPayment {
        order_id: order_id.to_string(),
        payment: PaymentInput::new(amount, PaymentMethod::Cash),
    }))
}

fn set_status(manager: &OrdersManager, order_id: &str, status: OrderStatus) -> CommandResponse {
    manager.execute_command(command(OrderCommandPayload::UpdateStatus {
        order_id: order_id.to_string(),
        status,
    }))
}

fn table_status(manager: &OrdersManager, table_id: &str) -> TableStatus {
    manager.get_table(table_id).unwrap().unwrap().status
}

/// Open T1 and add 2 × 25.90
fn open_tab_with_moqueca(manager: &OrdersManager) -> String {
    let order_id = open_table(manager, "T1");
    assert!(add_item(manager, &order_id, "Moqueca", 25.90, 2).success);
    order_id
}
