//! Integration tests for devices


use test_helpers::*;
use viking_storage::{devices, StorageError};

#[tokio::test]
async fn test_insert_and_get_device() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let device = devices::insert(pool, "SN-001", "Samsung", "A52").await.unwrap();
    assert!(device.id > 0);

    let by_id = devices::get_by_id(pool, device.id).await.unwrap().unwrap();
    assert_eq!(by_id, device);

    let by_serial = devices::get_by_serial_number(pool, "SN-001").await.unwrap().unwrap();
    assert_eq!(by_serial.id, device.id);

    assert!(devices::get_by_id(pool, 9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_serial_number_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    devices::insert(pool, "SN-001", "Samsung", "A52").await.unwrap();
    let err = devices::insert(pool, "SN-001", "Motorola", "G8").await.unwrap_err();

    assert!(matches!(err, StorageError::Duplicate(_)));
}

#[tokio::test]
async fn test_get_by_brand() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    devices::insert(pool, "SN-001", "Samsung", "A52").await.unwrap();
    devices::insert(pool, "SN-002", "Motorola", "G8").await.unwrap();
    devices::insert(pool, "SN-003", "Samsung", "S21").await.unwrap();

    let samsung = devices::get_by_brand(pool, "Samsung").await.unwrap();
    let serials: Vec<&str> = samsung.iter().map(|d| d.serial_number.as_str()).collect();
    assert_eq!(serials, vec!["SN-001", "SN-003"]);

    assert!(devices::get_by_brand(pool, "Nokia").await.unwrap().is_empty());
    assert_eq!(devices::get_all(pool).await.unwrap().len(), 3);
}
