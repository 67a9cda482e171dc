//! Tests for SqliteUserRepository.

use uuid::Uuid;

use crate::db::{
    Database, DbError, Gender, NewUser, Page, SortField, SortOrder, SqliteDatabase, UniqueField,
    UserQuery, UserRepository,
};

async fn setup_db() -> SqliteDatabase {
    SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database")
}

fn new_user(app_id: &str, name: &str, email: &str) -> NewUser {
    NewUser {
        aadhaar_application_id: app_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        address: "1 Main St".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        gender: Gender::Female,
    }
}

fn query(number: u32, limit: u32) -> UserQuery {
    UserQuery {
        page: Page { number, limit },
        sort_by: SortField::Name,
        order: SortOrder::Asc,
        search: None,
    }
}

async fn seed(db: &SqliteDatabase) {
    let users = db.users();
    for (app_id, name, email) in [
        ("10000000000001", "Charlie Brown", "charlie@example.com"),
        ("10000000000002", "Alice Smith", "alice@example.com"),
        ("10000000000003", "Bob Jones", "bob@EXAMPLE.org"),
        ("20000000000004", "Dana White", "dana@example.com"),
    ] {
        users
            .create(&new_user(app_id, name, email))
            .await
            .expect("Create should succeed");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_id_and_timestamps() {
    let db = setup_db().await;

    let created = db
        .users()
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .expect("Create should succeed");

    assert!(!created.id.is_nil());
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.name, "Jane Doe");
    assert_eq!(created.gender, Gender::Female);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_returns_stored_user() {
    let db = setup_db().await;
    let created = db
        .users()
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .unwrap();

    let fetched = db.users().get(created.id).await.expect("Get should succeed");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.email, "jane@x.com");
    assert_eq!(fetched.aadhaar_application_id, "12345678901234");
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_user_is_not_found() {
    let db = setup_db().await;

    let result = db.users().get(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_by_field_finds_email_and_application_id() {
    let db = setup_db().await;
    let created = db
        .users()
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .unwrap();

    let by_email = db
        .users()
        .get_by_field(UniqueField::Email, "jane@x.com")
        .await
        .expect("Lookup by email should succeed");
    assert_eq!(by_email.id, created.id);

    let by_app_id = db
        .users()
        .get_by_field(UniqueField::ApplicationId, "12345678901234")
        .await
        .expect("Lookup by application ID should succeed");
    assert_eq!(by_app_id.id, created.id);

    let missing = db
        .users()
        .get_by_field(UniqueField::Email, "nobody@x.com")
        .await;
    assert!(matches!(missing, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_unique_violation() {
    let db = setup_db().await;
    let users = db.users();
    users
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .unwrap();

    let err = users
        .create(&new_user("99999999999999", "Jane Two", "jane@x.com"))
        .await
        .expect_err("Duplicate email must be rejected");

    assert!(matches!(err, DbError::UniqueViolation { .. }));
    assert_eq!(err.violated_column(), Some("email"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_application_id_is_unique_violation() {
    let db = setup_db().await;
    let users = db.users();
    users
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .unwrap();

    let err = users
        .create(&new_user("12345678901234", "John Doe", "john@x.com"))
        .await
        .expect_err("Duplicate application ID must be rejected");

    assert_eq!(err.violated_column(), Some("aadhaar_application_id"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_paginates_and_counts_total() {
    let db = setup_db().await;
    seed(&db).await;

    let first = db.users().list(&query(1, 3)).await.unwrap();
    assert_eq!(first.total, 4);
    let names: Vec<_> = first.items.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Alice Smith", "Bob Jones", "Charlie Brown"]);

    let second = db.users().list(&query(2, 3)).await.unwrap();
    assert_eq!(second.total, 4);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].name, "Dana White");

    let beyond = db.users().list(&query(5, 3)).await.unwrap();
    assert_eq!(beyond.total, 4);
    assert!(beyond.items.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_sorts_descending() {
    let db = setup_db().await;
    seed(&db).await;

    let mut q = query(1, 10);
    q.sort_by = SortField::Email;
    q.order = SortOrder::Desc;
    let result = db.users().list(&q).await.unwrap();

    let emails: Vec<_> = result.items.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "dana@example.com",
            "charlie@example.com",
            "bob@EXAMPLE.org",
            "alice@example.com"
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_search_is_case_insensitive_across_columns() {
    let db = setup_db().await;
    seed(&db).await;

    // name
    let mut q = query(1, 10);
    q.search = Some("aLiCe".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Alice Smith");

    // email
    q.search = Some("example.ORG".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Bob Jones");

    // application id
    q.search = Some("2000000".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Dana White");

    // OR across columns: "example.com" hits three emails
    q.search = Some("EXAMPLE.COM".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_total_counts_filtered_set_before_paging() {
    let db = setup_db().await;
    seed(&db).await;

    let mut q = query(1, 1);
    q.search = Some("example.com".to_string());
    let result = db.users().list(&q).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.items.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_search_treats_wildcards_literally() {
    let db = setup_db().await;
    seed(&db).await;

    let mut q = query(1, 10);
    q.search = Some("%".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 0);

    q.search = Some("_".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_empty_table() {
    let db = setup_db().await;

    let result = db.users().list(&UserQuery::default()).await.unwrap();

    assert_eq!(result.total, 0);
    assert!(result.items.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_user() {
    let db = setup_db().await;
    let created = db
        .users()
        .create(&new_user("12345678901234", "Jane Doe", "jane@x.com"))
        .await
        .unwrap();

    db.users().delete(created.id).await.expect("Delete should succeed");

    let result = db.users().get(created.id).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_missing_user_is_not_found() {
    let db = setup_db().await;

    let result = db.users().delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn corrupt_row_is_invalid_data() {
    let db = setup_db().await;
    sqlx::query(
        "INSERT INTO users (id, aadhaar_application_id, name, email, phone, address, \
         date_of_birth, gender, created_at, updated_at) \
         VALUES ('not-a-uuid', '12345678901234', 'Jane Doe', 'jane@x.com', '9876543210', \
         '1 Main St', '1990-01-01', 'female', '2025-01-01T00:00:00+00:00', '2025-01-01T00:00:00+00:00')",
    )
    .execute(db.pool())
    .await
    .expect("Raw insert should succeed");

    let result = db
        .users()
        .get_by_field(UniqueField::Email, "jane@x.com")
        .await;

    assert!(matches!(result, Err(DbError::InvalidData { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_search_folds_non_ascii_case() {
    let db = setup_db().await;
    seed(&db).await;
    db.users()
        .create(&new_user("30000000000005", "ÉLISE Dupont", "elise@example.fr"))
        .await
        .unwrap();

    let mut q = query(1, 10);
    q.search = Some("élise".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "ÉLISE Dupont");

    q.search = Some("DUPONT".to_string());
    let result = db.users().list(&q).await.unwrap();
    assert_eq!(result.total, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_values_with_embedded_nul() {
    let db = setup_db().await;

    let created = db
        .users()
        .create(&new_user("12345678901234", "A\u{0}B", "jane@x.com"))
        .await
        .expect("Create should succeed");

    assert_eq!(created.name, "A\u{0}B");
    let result = db.users().list(&UserQuery::default()).await.unwrap();
    assert_eq!(result.total, 1);
}
