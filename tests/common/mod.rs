//! Shared fixtures: a migrated in-memory store and the services on top of it
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use library_catalog::{
    api, db,
    models::{
        author::{Author, CreateAuthor},
        book::{Book, CreateBook},
        borrow::{Borrow, CreateBorrow},
    },
    repository::Repository,
    services::Services,
    AppState,
};

pub struct TestContext {
    pub repository: Repository,
    pub services: Services,
}

pub async fn setup() -> TestContext {
    let pool = db::connect_in_memory().await.expect("Failed to open in-memory store");
    db::migrate(&pool).await.expect("Failed to run migrations");

    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());
    TestContext { repository, services }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("Invalid test date")
}

impl TestContext {
    pub fn app(&self) -> axum::Router {
        api::router(AppState {
            services: Arc::new(self.services.clone()),
        })
    }

    pub async fn author(&self, first_name: &str, last_name: &str) -> Author {
        self.services
            .catalog
            .create_author(CreateAuthor {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                birth_date: date("1828-09-09"),
            })
            .await
            .expect("Failed to create author")
    }

    pub async fn book(&self, title: &str, author_id: Option<i64>, copies: i64) -> Book {
        self.services
            .catalog
            .create_book(CreateBook {
                title: title.to_string(),
                description: Some(format!("About {}", title)),
                author_id,
                available_copies: copies,
            })
            .await
            .expect("Failed to create book")
    }

    pub async fn borrow(&self, book_id: i64, reader: &str) -> Borrow {
        self.services
            .borrows
            .create_borrow(CreateBorrow {
                book_id,
                reader_name: reader.to_string(),
                borrow_date: date("2023-01-01"),
            })
            .await
            .expect("Failed to borrow book")
    }

    pub async fn copies(&self, book_id: i64) -> i64 {
        self.services
            .catalog
            .get_book(book_id)
            .await
            .expect("Book should exist")
            .available_copies
    }
}
