//! Repository tests against a mock database connection.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use edublog_core::domain::{
    PageRequest, Post, PostSort, PostUpdate, Professor, Role, SortOrder, User,
};
use edublog_core::error::RepoError;
use edublog_core::ports::{PostRepository, ProfessorRepository, UserRepository};

use super::entity::user::{self, DbRole};
use super::entity::{post, professor};
use super::{PostgresPostRepository, PostgresProfessorRepository, PostgresUserRepository};

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

fn user_model(email: &str, role: DbRole) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        name: "Ada Lovelace".to_owned(),
        role,
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn find_user_by_email_maps_model() {
    let model = user_model("ada@example.com", DbRole::Professor);
    let expected_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let found = repo.find_by_email("ada@example.com").await.unwrap();

    let found = found.expect("user should be found");
    assert_eq!(found.id, expected_id);
    assert_eq!(found.email, "ada@example.com");
    assert_eq!(found.role, Role::Professor);
}

#[tokio::test]
async fn delete_user_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn professor_list_pages_profiles_with_post_counts() {
    let prof_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(11)))]);
    let profile_row = BTreeMap::from([
        ("id", Value::from(prof_id)),
        ("user_id", Value::from(user_id)),
        ("name", Value::from("Grace Hopper")),
        ("email", Value::from("grace@example.com")),
        ("bio", Value::String(None)),
        ("subject", Value::from("Compilers")),
        ("posts_count", Value::BigInt(Some(3))),
        ("created_at", Value::from(now())),
        ("updated_at", Value::from(now())),
    ]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row]])
        .append_query_results(vec![vec![profile_row]])
        .into_connection();

    let repo = PostgresProfessorRepository::new(db);
    let page = repo.list(PageRequest::new(1, 10)).await.unwrap();

    assert_eq!(page.total, 11);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);

    let profile = &page.items[0];
    assert_eq!(profile.id, prof_id);
    assert_eq!(profile.name, "Grace Hopper");
    assert_eq!(profile.email, "grace@example.com");
    assert_eq!(profile.posts_count, 3);
    assert_eq!(profile.bio, None);
}

#[tokio::test]
async fn professor_insert_with_user_commits_both_rows() {
    let account = User::new(
        "alan@example.com".to_owned(),
        "$argon2id$stub".to_owned(),
        "Alan Turing".to_owned(),
        Role::Professor,
    );
    let profile = Professor::new(account.id, None, Some("Computability".to_owned()));

    let user_row = user::Model {
        id: account.id,
        email: account.email.clone(),
        password_hash: account.password_hash.clone(),
        name: account.name.clone(),
        role: DbRole::Professor,
        created_at: account.created_at.into(),
        updated_at: account.updated_at.into(),
    };
    let prof_row = professor::Model {
        id: profile.id,
        user_id: profile.user_id,
        bio: None,
        subject: profile.subject.clone(),
        created_at: profile.created_at.into(),
        updated_at: profile.updated_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_row]])
        .append_query_results(vec![vec![prof_row]])
        .into_connection();

    let repo = PostgresProfessorRepository::new(db);
    assert!(repo.insert_with_user(&account, &profile).await.is_ok());
}

#[tokio::test]
async fn published_listing_maps_author_columns() {
    let author_id = Uuid::new_v4();

    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(1)))]);
    let preview_row = BTreeMap::from([
        ("id", Value::from(Uuid::new_v4())),
        ("title", Value::from("On Computable Numbers")),
        ("description", Value::String(None)),
        ("created_at", Value::from(now())),
        ("author_id", Value::from(author_id)),
        ("author_name", Value::from("Alan Turing")),
    ]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row]])
        .append_query_results(vec![vec![preview_row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let page = repo
        .list_published(PageRequest::new(1, 10), PostSort::CreatedAt, SortOrder::Desc)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "On Computable Numbers");
    assert_eq!(page.items[0].author_id, author_id);
    assert_eq!(page.items[0].author_name, "Alan Turing");
}

#[tokio::test]
async fn post_insert_returns_stored_row() {
    let draft = Post::new(
        Uuid::new_v4(),
        "Borrow Checker Notes".to_owned(),
        None,
        "The borrow checker enforces aliasing rules at compile time.".to_owned(),
        true,
    );
    let stored = post::Model {
        id: draft.id,
        author_id: draft.author_id,
        title: draft.title.clone(),
        description: None,
        content: draft.content.clone(),
        published: true,
        created_at: draft.created_at.into(),
        updated_at: draft.updated_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![stored]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let inserted = repo.insert(&draft).await.unwrap();

    assert_eq!(inserted.id, draft.id);
    assert_eq!(inserted.title, "Borrow Checker Notes");
    assert!(inserted.published);
}

#[tokio::test]
async fn post_update_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let changes = PostUpdate {
        title: Some("New Title".to_owned()),
        ..Default::default()
    };
    let result = repo.update(Uuid::new_v4(), &changes).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn post_delete_reports_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.delete(Uuid::new_v4()).await.is_ok());
    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn count_by_author_reads_aggregate() {
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(4)))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let count = repo.count_by_author(Uuid::new_v4()).await.unwrap();

    assert_eq!(count, 4);
}
