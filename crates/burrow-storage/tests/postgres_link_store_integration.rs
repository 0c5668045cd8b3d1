//! These tests start a PostgreSQL container and need a Docker daemon.
//! Run them with `cargo test -p burrow-storage -- --ignored`.

use std::time::Duration;

use burrow_core::{AdminPassword, LinkId, NewLink};
use burrow_storage::{LinkStore, PostgresLinkStore, ReadLinkStore, StorageError};
use burrow_test_infra::postgres::{PostgresConfig, PostgresServer};
use sqlx::postgres::PgPoolOptions;

struct Fixture {
    _postgres: PostgresServer,
    store: PostgresLinkStore,
}

impl Fixture {
    async fn start() -> Self {
        let postgres = PostgresServer::new(PostgresConfig::builder().build())
            .await
            .expect("start postgres");
        let url = postgres.database_url().await.expect("postgres url");
        let pool = connect_with_retry(&url).await;

        let store = PostgresLinkStore::new(pool);
        store.bootstrap_schema().await.expect("create schema");

        Self {
            _postgres: postgres,
            store,
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::PgPool {
    let mut last_error = None;

    for _ in 0..20 {
        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect postgres: {last_error:?}");
}

fn id(value: &str) -> LinkId {
    LinkId::new_unchecked(value)
}

fn password(value: &str) -> AdminPassword {
    AdminPassword::new(value)
}

fn link(code: &str, url: &str, secret: &str) -> NewLink {
    NewLink {
        id: id(code),
        target_url: url.to_string(),
        admin_password: password(secret),
        needs_captcha: false,
        needs_password: false,
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn insert_and_get_record() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&link("ABCD", "https://example.com/a", "secret"))
        .await
        .unwrap();

    let got = fixture.store.get(&id("ABCD")).await.unwrap().unwrap();
    assert_eq!(got.target_url, "https://example.com/a");
    assert!(!got.needs_captcha);
    assert!(!got.needs_password);
    assert!(got.created_at.is_some());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn insert_conflicts_when_id_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&link("ABCD", "https://one.example", "secret"))
        .await
        .unwrap();

    let err = fixture
        .store
        .insert(&link("ABCD", "https://two.example", "other"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn get_returns_none_for_unknown_id() {
    let fixture = Fixture::start().await;

    assert!(fixture.store.get(&id("NOPE")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn delete_requires_matching_password() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&link("ABCD", "https://example.com", "secret"))
        .await
        .unwrap();

    assert!(!fixture.store.delete(&id("ABCD"), &password("wrong")).await.unwrap());
    assert!(fixture.store.get(&id("ABCD")).await.unwrap().is_some());

    assert!(fixture.store.delete(&id("ABCD"), &password("secret")).await.unwrap());
    assert!(fixture.store.get(&id("ABCD")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn get_with_password_filters_on_secret() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&link("ABCD", "https://example.com", "secret"))
        .await
        .unwrap();

    assert!(fixture
        .store
        .get_with_password(&id("ABCD"), &password("wrong"))
        .await
        .unwrap()
        .is_none());

    let got = fixture
        .store
        .get_with_password(&id("ABCD"), &password("secret"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.target_url, "https://example.com");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn bootstrap_upgrades_legacy_table() {
    let fixture = Fixture::start().await;
    let pool = fixture.store.pool();

    sqlx::raw_sql(
        r#"
        DROP TABLE urls;
        CREATE TABLE urls (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            created_at TIMESTAMP WITHOUT TIME ZONE DEFAULT (now() AT TIME ZONE 'UTC')
        );
        INSERT INTO urls (id, url) VALUES ('OLD1', 'https://legacy.example');
        "#,
    )
    .execute(pool)
    .await
    .unwrap();

    fixture.store.bootstrap_schema().await.unwrap();
    fixture.store.bootstrap_schema().await.unwrap();

    let legacy = fixture.store.get(&id("OLD1")).await.unwrap().unwrap();
    assert_eq!(legacy.target_url, "https://legacy.example");
    assert!(!legacy.needs_captcha);

    // Legacy rows have no admin password and can never be deleted.
    assert!(!fixture.store.delete(&id("OLD1"), &password("")).await.unwrap());
}
