//! Integration tests for roles and the user-role link
//!
//! Covers:
//! - Role creation and lookup
//! - One link per user (unique constraint)
//! - Rewriting a link in place
//! - Cascade on user deletion
//! - Rollback of a multi-step transaction


use test_helpers::*;
use viking_core::types::*;
use viking_storage::{roles, user_roles, users, StorageError};

#[tokio::test]
async fn test_create_and_get_role() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let role = create_test_role(pool, "admin").await;

    let by_id = roles::get_by_id(pool, &role.id).await.unwrap().unwrap();
    assert_eq!(by_id, role);
    assert_eq!(by_id.permission, "ADMIN");

    let by_name = roles::get_by_name(pool, "admin").await.unwrap().unwrap();
    assert_eq!(by_name.id, role.id);

    assert!(roles::get_by_id(pool, &RoleId::generate()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_role_name_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_role(pool, "admin").await;
    let err = roles::insert(
        pool,
        &CreateRole {
            name: "admin".to_string(),
            permission: "OTHER".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, StorageError::Duplicate(_)));
}

#[tokio::test]
async fn test_link_user_to_role() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let role = create_test_role(pool, "admin").await;
    let user = create_test_user(pool, 111, "a@x.com").await;

    let link = user_roles::insert(pool, &user.id, &role.id).await.unwrap();

    let found = user_roles::find_by_user(pool, &user.id).await.unwrap().unwrap();
    assert_eq!(found, link);
    assert_eq!(found.role_id, role.id);
}

#[tokio::test]
async fn test_second_link_for_same_user_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let admin = create_test_role(pool, "admin").await;
    let tech = create_test_role(pool, "technician").await;
    let user = create_test_user(pool, 111, "a@x.com").await;

    user_roles::insert(pool, &user.id, &admin.id).await.unwrap();
    let err = user_roles::insert(pool, &user.id, &tech.id).await.unwrap_err();

    assert!(matches!(err, StorageError::Duplicate(_)));
}

#[tokio::test]
async fn test_set_role_rewrites_existing_link() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let admin = create_test_role(pool, "admin").await;
    let tech = create_test_role(pool, "technician").await;
    let user = create_test_user(pool, 111, "a@x.com").await;

    let link = user_roles::insert(pool, &user.id, &admin.id).await.unwrap();
    assert!(user_roles::set_role(pool, &link.id, &tech.id).await.unwrap());

    let all = user_roles::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, link.id);
    assert_eq!(all[0].role_id, tech.id);
}

#[tokio::test]
async fn test_link_to_unknown_role_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, 111, "a@x.com").await;

    let result = user_roles::insert(pool, &user.id, &RoleId::generate()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_find_by_role() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let admin = create_test_role(pool, "admin").await;
    let tech = create_test_role(pool, "technician").await;
    let a = create_test_user(pool, 1, "a@x.com").await;
    let b = create_test_user(pool, 2, "b@x.com").await;
    let c = create_test_user(pool, 3, "c@x.com").await;

    user_roles::insert(pool, &a.id, &admin.id).await.unwrap();
    user_roles::insert(pool, &b.id, &tech.id).await.unwrap();
    user_roles::insert(pool, &c.id, &tech.id).await.unwrap();

    let mut linked: Vec<UserId> = user_roles::find_by_role(pool, &tech.id)
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.user_id)
        .collect();
    linked.sort_by(|x, y| x.as_str().cmp(y.as_str()));

    let mut expected = vec![b.id, c.id];
    expected.sort_by(|x, y| x.as_str().cmp(y.as_str()));
    assert_eq!(linked, expected);
}

#[tokio::test]
async fn test_deleting_user_cascades_to_link() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let role = create_test_role(pool, "admin").await;
    let user = create_test_user(pool, 111, "a@x.com").await;
    user_roles::insert(pool, &user.id, &role.id).await.unwrap();

    users::delete(pool, &user.id).await.unwrap();

    assert!(user_roles::find_by_user(pool, &user.id).await.unwrap().is_none());
    assert!(user_roles::find_by_role(pool, &role.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_by_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let role = create_test_role(pool, "admin").await;
    let user = create_test_user(pool, 111, "a@x.com").await;
    user_roles::insert(pool, &user.id, &role.id).await.unwrap();

    assert_eq!(user_roles::delete_by_user(pool, &user.id).await.unwrap(), 1);
    assert_eq!(user_roles::delete_by_user(pool, &user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_link_rolls_back_user_insert() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = UserId::generate();
    let mut tx = pool.begin().await.unwrap();
    users::insert(&mut *tx, &user_id, &sample_user(111, "a@x.com"))
        .await
        .unwrap();
    let link = user_roles::insert(&mut *tx, &user_id, &RoleId::generate()).await;
    assert!(link.is_err());
    tx.rollback().await.unwrap();

    assert!(users::get_by_id(pool, &user_id).await.unwrap().is_none());
}
