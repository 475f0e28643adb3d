//! File-backed ledger: state survives reopening the database

use mesa_engine::cart::{CartProvider, CartStore};
use mesa_engine::core::Config;
use mesa_engine::orders::{OrderStorage, OrdersManager};
use shared::models::{DiningTable, ProductRef, TableStatus};
use shared::order::{
    OrderCommand, OrderCommandPayload, OrderStatus, PaymentInput, PaymentMethod,
};

fn command(payload: OrderCommandPayload) -> OrderCommand {
    OrderCommand::new("op-1", "Caixa", payload)
}

#[test]
fn test_tab_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string());
    let db_path = config.database_path();

    let order_id = {
        let manager = OrdersManager::new(&db_path, &config).unwrap();
        manager.upsert_table(DiningTable::new("T7", 7)).unwrap();

        let resp = manager.execute_command(command(OrderCommandPayload::OpenTable {
            table_id: "T7".to_string(),
            include_service: true,
            notes: None,
        }));
        let order_id = resp.order_id.unwrap();

        let resp = manager.execute_command(command(OrderCommandPayload::AddItem {
            order_id: order_id.clone(),
            product: ProductRef::new("p1", "Moqueca", 25.90),
            quantity: 2,
            notes: None,
        }));
        assert!(resp.success);

        let resp = manager.execute_command(command(OrderCommandPayload::AddPayment {
            order_id: order_id.clone(),
            payment: PaymentInput::new(30.0, PaymentMethod::Pix),
        }));
        assert!(resp.success);
        order_id
    };

    let manager = OrdersManager::new(&db_path, &config).unwrap();
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.total, 56.98);
    assert_eq!(snapshot.remaining_balance, 26.98);
    assert_eq!(snapshot.status, OrderStatus::Pending);
    assert_eq!(manager.get_active_orders().unwrap().len(), 1);
    assert_eq!(
        manager.get_table("T7").unwrap().unwrap().status,
        TableStatus::Occupied
    );
    assert_eq!(manager.rebuild_snapshot(&order_id).unwrap(), snapshot);

    // Sequence continues where it left off
    let remaining = snapshot.remaining_balance;
    let resp = manager.execute_command(command(OrderCommandPayload::AddPayment {
        order_id: order_id.clone(),
        payment: PaymentInput::new(remaining, PaymentMethod::Cash),
    }));
    assert!(resp.success);
    assert_eq!(manager.get_current_sequence().unwrap(), 4);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert_eq!(
        manager.get_table("T7").unwrap().unwrap().status,
        TableStatus::Available
    );
}

#[test]
fn test_cart_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carts.redb");

    {
        let storage = OrderStorage::open(&path).unwrap();
        let mut provider = CartProvider::new(storage, "session-42");
        provider.init().unwrap();
        let mut cart = provider.use_cart().unwrap();
        cart.add_item(ProductRef::new("A", "Coxinha", 10.0), 2).unwrap();
        cart.add_item(ProductRef::new("B", "Guaraná", 20.0), 3).unwrap();
    }

    let storage = OrderStorage::open(&path).unwrap();
    let lines = storage.load_cart("session-42").unwrap().unwrap();
    assert_eq!(lines.len(), 2);

    let mut provider = CartProvider::new(storage, "session-42");
    provider.init().unwrap();
    assert_eq!(provider.use_cart().unwrap().total_price(), 80.0);
}
