use kabu_core::store::error::StoreError;
use kabu_core::store::port::{NewHolding, NewOrder, NewPosition, SystemStore};
use kabu_store::system::SqliteSystemStore;
use tempfile::tempdir;

#[tokio::test]
async fn test_store_full_integration() {
    // 1. 初始化临时测试环境
    let tmp_dir = tempdir().expect("Failed to create temp dir");

    let store = SqliteSystemStore::new(tmp_dir.path())
        .await
        .expect("Failed to create system store");

    // 账户创建与查询
    let alice = store.create_account("alice", "$2b$10$fakehash").await.unwrap();
    assert!(!alice.id.is_empty());
    assert_eq!(alice.username, "alice");

    let found = store
        .find_account_by_username("alice")
        .await
        .unwrap()
        .expect("Account should exist");
    assert_eq!(found.id, alice.id);
    assert_eq!(found.password_hash, "$2b$10$fakehash");

    let by_id = store.get_account(&alice.id).await.unwrap().expect("By id");
    assert_eq!(by_id.username, "alice");

    assert!(store.find_account_by_username("nobody").await.unwrap().is_none());

    // 用户名唯一约束兜底：重复注册返回 Conflict
    let dup = store.create_account("alice", "$2b$10$otherhash").await;
    assert!(matches!(dup, Err(StoreError::Conflict(_))));

    // 持仓快照
    let holding = store
        .add_holding(
            &alice.id,
            NewHolding {
                name: "INFY".to_string(),
                qty: 10.0,
                avg: 1500.0,
                price: 1520.0,
                net: 200.0,
                day: "+0.5%".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(holding.user_id, alice.id);

    let holdings = store.list_holdings(&alice.id).await.unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].name, "INFY");
    assert_eq!(holdings[0].qty, 10.0);

    // 持仓明细
    store
        .add_position(
            &alice.id,
            NewPosition {
                product: "CNC".to_string(),
                name: "TCS".to_string(),
                qty: 5.0,
                avg: 3200.0,
                price: 3100.0,
                net: "-1.2%".to_string(),
                day: "-0.4%".to_string(),
                is_loss: true,
            },
        )
        .await
        .unwrap();

    let positions = store.list_positions(&alice.id).await.unwrap();
    assert_eq!(positions.len(), 1);
    assert!(positions[0].is_loss);
    assert_eq!(positions[0].net, "-1.2%");

    // 订单流水
    store
        .add_order(
            &alice.id,
            NewOrder {
                name: "NVDA".to_string(),
                qty: 2.0,
                price: 120.5,
                mode: "BUY".to_string(),
            },
        )
        .await
        .unwrap();

    let orders = store.list_orders(&alice.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].mode, "BUY");

    // 资源按账户隔离：bob 看不到 alice 的记录
    let bob = store.create_account("bob", "$2b$10$bobhash").await.unwrap();
    assert!(store.list_holdings(&bob.id).await.unwrap().is_empty());
    assert!(store.list_positions(&bob.id).await.unwrap().is_empty());
    assert!(store.list_orders(&bob.id).await.unwrap().is_empty());
}
