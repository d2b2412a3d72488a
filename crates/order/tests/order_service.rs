//! Integration tests for the order service over the in-memory store.

use common::{AccountId, Money};
use order::{InMemoryOrderStore, LineItem, OrderError, OrderService, OrderStore};

fn item(product_id: &str, price_cents: i64, quantity: u32) -> LineItem {
    LineItem::new(
        product_id,
        "Widget",
        "A widget",
        Money::from_cents(price_cents),
        quantity,
    )
}

async fn seeded_store() -> InMemoryOrderStore {
    let store = InMemoryOrderStore::new();
    store.insert_account("acc_1").await;
    store.insert_product("p1").await;
    store.insert_product("p2").await;
    store
}

#[tokio::test]
async fn test_reread_returns_written_total() {
    let store = seeded_store().await;
    let service = OrderService::new(store.clone());
    let account = AccountId::new("acc_1");

    let written = service
        .post_order(account.clone(), vec![item("p1", 999, 3), item("p2", 250, 2)])
        .await
        .unwrap();

    let read = service.orders_for_account(&account).await.unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0], written);
    assert_eq!(
        read[0].total_price,
        read[0].items.iter().map(LineItem::total_price).sum()
    );
}

#[tokio::test]
async fn test_unknown_account_persists_nothing() {
    let store = seeded_store().await;
    let service = OrderService::new(store.clone());

    let result = service
        .post_order(AccountId::new("acc_missing"), vec![item("p1", 999, 1)])
        .await;

    assert!(matches!(result, Err(OrderError::AccountNotFound(_))));
    assert_eq!(store.order_count().await, 0);
    assert_eq!(store.item_count().await, 0);
}

#[tokio::test]
async fn test_unknown_product_persists_nothing() {
    let store = seeded_store().await;
    let service = OrderService::new(store.clone());

    // One known and one unknown product: the whole aggregate must fail.
    let result = service
        .post_order(
            AccountId::new("acc_1"),
            vec![item("p1", 999, 1), item("p_missing", 100, 1)],
        )
        .await;

    assert!(matches!(result, Err(OrderError::ProductNotFound)));
    assert_eq!(store.order_count().await, 0);
    assert_eq!(store.item_count().await, 0);
}

#[tokio::test]
async fn test_account_with_no_orders_yields_empty_list() {
    let store = seeded_store().await;
    store.insert_account("acc_2").await;
    let service = OrderService::new(store);

    let orders = service
        .orders_for_account(&AccountId::new("acc_2"))
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_orders_sorted_by_id_with_items_in_order() {
    let store = seeded_store().await;
    let service = OrderService::new(store.clone());
    let account = AccountId::new("acc_1");

    for _ in 0..3 {
        service
            .post_order(account.clone(), vec![item("p1", 100, 1), item("p2", 200, 2)])
            .await
            .unwrap();
    }

    let orders = service.orders_for_account(&account).await.unwrap();
    assert_eq!(orders.len(), 3);
    for window in orders.windows(2) {
        assert!(window[0].id < window[1].id);
    }
    for order in &orders {
        assert_eq!(order.items[0].product_id.as_str(), "p1");
        assert_eq!(order.items[1].product_id.as_str(), "p2");
    }
}

#[tokio::test]
async fn test_duplicate_order_id_rejected_by_store() {
    let store = seeded_store().await;
    let service = OrderService::new(store.clone());

    let order = service
        .post_order(AccountId::new("acc_1"), vec![item("p1", 100, 1)])
        .await
        .unwrap();

    let result = store.put_order(&order).await;
    assert!(matches!(result, Err(OrderError::AlreadyExists(_))));
    assert_eq!(store.order_count().await, 1);
    assert_eq!(store.item_count().await, 1);
}

#[tokio::test]
async fn test_orders_are_scoped_to_their_account() {
    let store = seeded_store().await;
    store.insert_account("acc_2").await;
    let service = OrderService::new(store);

    service
        .post_order(AccountId::new("acc_1"), vec![item("p1", 100, 1)])
        .await
        .unwrap();
    service
        .post_order(AccountId::new("acc_2"), vec![item("p2", 200, 1)])
        .await
        .unwrap();

    let first = service
        .orders_for_account(&AccountId::new("acc_1"))
        .await
        .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].items[0].product_id.as_str(), "p1");

    let second = service
        .orders_for_account(&AccountId::new("acc_2"))
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].items[0].product_id.as_str(), "p2");
}
