use uuid::Uuid;

use weather_alerts::directory::{
    PostgresDirectory,
    SubscriberDirectory,
};

use crate::helpers::setup_test_database;

async fn insert_subscribers(pool: &sqlx::PgPool, count: usize) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for i in 0..count {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO subscribers (id, notifications_enabled, device_token, watched_locations)
            VALUES ($1, TRUE, $2, $3)
            "#,
        )
        .bind(id)
        .bind(format!("device-{}", i))
        .bind(vec![format!("City {}", i)])
        .execute(pool)
        .await
        .expect("error inserting subscriber");
        ids.push(id);
    }
    ids.sort();
    ids
}

#[actix_rt::test]
async fn every_subscriber_is_read_across_pages() {
    let pool = setup_test_database().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let id = Uuid::new_v4();
        let token = if i % 2 == 0 {
            Some(format!("device-{}", i))
        } else {
            None
        };
        sqlx::query(
            r#"
            INSERT INTO subscribers (id, notifications_enabled, device_token, watched_locations)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(i != 3)
        .bind(token)
        .bind(vec![format!("City {}", i)])
        .execute(&pool)
        .await
        .expect("error inserting subscriber");
        ids.push(id);
    }

    let directory = PostgresDirectory::new(pool, 2);
    let subscribers = directory.list_subscribers().await.unwrap();

    let mut read: Vec<Uuid> = subscribers.iter().map(|s| s.id.0).collect();
    read.sort();
    ids.sort();
    assert_eq!(read, ids);
    assert_eq!(
        subscribers.iter().filter(|s| !s.notifications_enabled).count(),
        1
    );
    assert_eq!(
        subscribers.iter().filter(|s| s.device_token.is_none()).count(),
        2
    );
}

#[actix_rt::test]
async fn empty_directory_yields_no_subscribers() {
    let pool = setup_test_database().await;
    let directory = PostgresDirectory::new(pool, 10);

    let subscribers = directory.list_subscribers().await.unwrap();

    assert!(subscribers.is_empty());
}

#[actix_rt::test]
async fn a_last_page_exactly_full_is_followed_by_an_empty_one() {
    let pool = setup_test_database().await;
    let ids = insert_subscribers(&pool, 4).await;
    let directory = PostgresDirectory::new(pool, 2);

    let subscribers = directory.list_subscribers().await.unwrap();

    let read: Vec<Uuid> = subscribers.iter().map(|s| s.id.0).collect();
    assert_eq!(read, ids);
}

#[actix_rt::test]
async fn a_single_short_page_is_read_whole() {
    let pool = setup_test_database().await;
    let ids = insert_subscribers(&pool, 3).await;
    let directory = PostgresDirectory::new(pool, 10);

    let subscribers = directory.list_subscribers().await.unwrap();

    let read: Vec<Uuid> = subscribers.iter().map(|s| s.id.0).collect();
    assert_eq!(read, ids);
    assert_eq!(subscribers[0].watched_locations.len(), 1);
}
