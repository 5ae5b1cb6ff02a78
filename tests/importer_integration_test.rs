// ==========================================
// SeedImporter 集成测试
// ==========================================
// 测试目标: 验证完整的种子数据导入流程与幂等性
// ==========================================


use pizza_dashboard::importer::ImportError;
use pizza_dashboard::logging;
use pizza_dashboard::{AppState, SeedImporter};
use test_helpers::{copy_fixtures_to_temp, create_test_db, fixtures_dir, overwrite_fixture};

#[test]
fn test_import_basic() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    let importer = SeedImporter::new(state.conn.clone(), fixtures_dir());
    let summary = importer.import_if_empty().expect("Import should succeed");

    assert!(!summary.skipped);
    assert_eq!(summary.pizza_types, 3);
    assert_eq!(summary.pizzas, 5);
    assert_eq!(summary.orders, 4);
    assert_eq!(summary.order_details, 5);
}

#[test]
fn test_import_idempotent() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    let importer = SeedImporter::new(state.conn.clone(), fixtures_dir());
    importer.import_if_empty().expect("First import should succeed");

    let before = state
        .catalog_api
        .list_pizzas(None, None)
        .expect("Failed to list pizzas");

    // 第二次调用应为空操作
    let summary = importer
        .import_if_empty()
        .expect("Second import should succeed");
    assert!(summary.skipped);
    assert_eq!(summary.pizzas, 0);

    let after = state
        .catalog_api
        .list_pizzas(None, None)
        .expect("Failed to list pizzas");
    assert_eq!(before, after);
}

#[test]
fn test_import_round_trip() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    SeedImporter::new(state.conn.clone(), fixtures_dir())
        .import_if_empty()
        .expect("Import should succeed");

    // 源文件每行对应一个可查询实体，字段值一致
    let pizzas = state
        .catalog_api
        .list_pizzas(None, None)
        .expect("Failed to list pizzas");
    assert_eq!(pizzas.len(), 5);

    let bbq_s = pizzas
        .iter()
        .find(|p| p.pizza_id == "bbq_ckn_s")
        .expect("bbq_ckn_s should exist");
    assert_eq!(bbq_s.pizza_type_id, "bbq_ckn");
    assert_eq!(bbq_s.size, "S");
    assert_eq!(bbq_s.price, 12.75);

    // 订单时间戳由 date + time 拼接而来
    let orders = state
        .order_api
        .list_orders(None, None)
        .expect("Failed to list orders");
    let first = orders
        .iter()
        .find(|o| o.order_id == 1)
        .expect("Order 1 should exist");
    assert_eq!(first.date.to_string(), "2015-01-01 11:38:36");
}

#[test]
fn test_import_missing_file_is_fatal() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    let temp_dir = copy_fixtures_to_temp().expect("Failed to copy fixtures");
    std::fs::remove_file(temp_dir.path().join("orders.csv")).expect("Failed to remove file");

    let importer = SeedImporter::new(state.conn.clone(), temp_dir.path());
    let result = importer.import_if_empty();
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));

    // 整体失败，不应留下部分数据
    let pizzas = state
        .catalog_api
        .list_pizzas(None, None)
        .expect("Failed to list pizzas");
    assert!(pizzas.is_empty());
}

#[test]
fn test_import_bad_timestamp_is_fatal() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    let temp_dir = copy_fixtures_to_temp().expect("Failed to copy fixtures");
    overwrite_fixture(
        &temp_dir,
        "orders.csv",
        "order_id,date,time\n1,2015-01-01,11:38:36\n2,2015-01-01,not-a-time\n",
    )
    .expect("Failed to overwrite fixture");

    let importer = SeedImporter::new(state.conn.clone(), temp_dir.path());
    let result = importer.import_if_empty();
    assert!(matches!(
        result,
        Err(ImportError::TimestampFormatError { row: 2, .. })
    ));

    // 事务未提交，订单集合为空
    let orders = state
        .order_api
        .list_orders(None, None)
        .expect("Failed to list orders");
    assert!(orders.is_empty());
}

#[test]
fn test_import_bad_price_is_fatal() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(&db_path).expect("Failed to create AppState");

    let temp_dir = copy_fixtures_to_temp().expect("Failed to copy fixtures");
    overwrite_fixture(
        &temp_dir,
        "pizzas.csv",
        "pizza_id,pizza_type_id,size,price\nbbq_ckn_s,bbq_ckn,S,cheap\n",
    )
    .expect("Failed to overwrite fixture");

    let importer = SeedImporter::new(state.conn.clone(), temp_dir.path());
    let result = importer.import_if_empty();
    assert!(matches!(
        result,
        Err(ImportError::TypeConversionError { row: 1, .. })
    ));
}
