//! Author and book repositories: lookups, pagination, partial updates, cascades

mod common;

use common::{date, setup};
use library_catalog::{
    models::{
        author::UpdateAuthor,
        book::{CreateBook, UpdateBook},
        ListParams,
    },
    seed, AppError,
};

#[tokio::test]
async fn test_get_author_on_empty_store() {
    let ctx = setup().await;

    let result = ctx.services.catalog.get_author(999).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_books_in_id_order() {
    let ctx = setup().await;
    let titles = [
        "War and Peace",
        "Crime and Punishment",
        "The Cherry Orchard",
        "Mrs. Dalloway",
        "One Hundred Years of Solitude",
    ];
    for (copies, title) in titles.iter().enumerate() {
        ctx.book(title, None, copies as i64).await;
    }

    let books = ctx.services.catalog.list_books(&ListParams::new(0, 10)).await.unwrap();
    assert_eq!(books.len(), 5);
    assert_eq!(books.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(), titles);
    assert!(books.windows(2).all(|w| w[0].id < w[1].id));

    let again = ctx.services.catalog.list_books(&ListParams::default()).await.unwrap();
    assert_eq!(again, books);
}

#[tokio::test]
async fn test_list_pagination() {
    let ctx = setup().await;
    for i in 0..12 {
        ctx.author(&format!("First{i}"), &format!("Last{i}")).await;
    }

    let first_page = ctx.services.catalog.list_authors(&ListParams::default()).await.unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].first_name, "First0");

    let rest = ctx.services.catalog.list_authors(&ListParams::new(10, 10)).await.unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].first_name, "First10");

    let window = ctx.services.catalog.list_authors(&ListParams::new(3, 2)).await.unwrap();
    assert_eq!(
        window.iter().map(|a| a.first_name.as_str()).collect::<Vec<_>>(),
        ["First3", "First4"]
    );

    let beyond = ctx.services.catalog.list_authors(&ListParams::new(50, 10)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_negative_pagination_rejected() {
    let ctx = setup().await;

    let result = ctx.services.catalog.list_books(&ListParams::new(-1, 10)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    let result = ctx.services.catalog.list_authors(&ListParams::new(0, -5)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_delete_author_detaches_books() {
    let ctx = setup().await;
    let tolstoy = ctx.author("Leo", "Tolstoy").await;
    let chekhov = ctx.author("Anton", "Chekhov").await;
    let war = ctx.book("War and Peace", Some(tolstoy.id), 3).await;
    let anna = ctx.book("Anna Karenina", Some(tolstoy.id), 1).await;
    let orchard = ctx.book("The Cherry Orchard", Some(chekhov.id), 5).await;

    let deleted = ctx.services.catalog.delete_author(tolstoy.id).await.unwrap();
    assert_eq!(deleted, tolstoy);

    for id in [war.id, anna.id] {
        let book = ctx.services.catalog.get_book(id).await.unwrap();
        assert_eq!(book.author_id, None);
    }
    let untouched = ctx.services.catalog.get_book(orchard.id).await.unwrap();
    assert_eq!(untouched.author_id, Some(chekhov.id));

    let books = ctx.services.catalog.list_books(&ListParams::default()).await.unwrap();
    assert_eq!(books.len(), 3);

    let missing = ctx.services.catalog.get_author(tolstoy.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_book_removes_its_borrows() {
    let ctx = setup().await;
    let war = ctx.book("War and Peace", None, 3).await;
    let orchard = ctx.book("The Cherry Orchard", None, 2).await;
    let first = ctx.borrow(war.id, "Alice").await;
    ctx.borrow(war.id, "Bob").await;
    ctx.services.borrows.return_borrow(first.id, "2023-01-10").await.unwrap();
    let kept = ctx.borrow(orchard.id, "Charlie").await;

    let deleted = ctx.services.catalog.delete_book(war.id).await.unwrap();
    assert_eq!(deleted.id, war.id);
    assert_eq!(deleted.available_copies, 2);

    let borrows = ctx.services.borrows.list_borrows(&ListParams::default()).await.unwrap();
    assert_eq!(borrows, vec![kept]);

    let missing = ctx.services.catalog.list_book_borrows(war.id, &ListParams::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_partial_author_update() {
    let ctx = setup().await;
    let author = ctx.author("Anton", "Pavlov").await;

    let updated = ctx
        .services
        .catalog
        .update_author(
            author.id,
            UpdateAuthor {
                first_name: Some("Updated".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Updated");
    assert_eq!(updated.last_name, "Pavlov");
    assert_eq!(updated.birth_date, author.birth_date);

    let updated = ctx
        .services
        .catalog
        .update_author(
            author.id,
            UpdateAuthor {
                birth_date: Some(date("2024-09-10")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Updated");
    assert_eq!(updated.birth_date, date("2024-09-10"));

    let unchanged = ctx
        .services
        .catalog
        .update_author(author.id, UpdateAuthor::default())
        .await
        .unwrap();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn test_partial_book_update() {
    let ctx = setup().await;
    let author = ctx.author("Virginia", "Woolf").await;
    let book = ctx.book("Mrs. Dalloway", Some(author.id), 4).await;

    let retitled = ctx
        .services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                title: Some("To the Lighthouse".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retitled.title, "To the Lighthouse");
    assert_eq!(retitled.description, book.description);
    assert_eq!(retitled.author_id, Some(author.id));
    assert_eq!(retitled.available_copies, 4);

    let cleared = ctx
        .services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                description: Some(None),
                author_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.title, "To the Lighthouse");
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.author_id, None);
    assert_eq!(cleared.available_copies, 4);

    let restocked = ctx
        .services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                available_copies: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restocked.available_copies, 7);
    assert_eq!(restocked.description, None);
}

#[tokio::test]
async fn test_update_and_delete_missing_entities() {
    let ctx = setup().await;

    let result = ctx
        .services
        .catalog
        .update_author(
            5,
            UpdateAuthor {
                last_name: Some("Nobody".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = ctx
        .services
        .catalog
        .update_book(
            5,
            UpdateBook {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(matches!(ctx.services.catalog.delete_author(5).await, Err(AppError::NotFound(_))));
    assert!(matches!(ctx.services.catalog.delete_book(5).await, Err(AppError::NotFound(_))));

    // Updates never create
    assert!(ctx.services.catalog.list_authors(&ListParams::default()).await.unwrap().is_empty());
    assert!(ctx.services.catalog.list_books(&ListParams::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let ctx = setup().await;
    ctx.book("First", None, 1).await;
    let second = ctx.book("Second", None, 1).await;
    ctx.services.catalog.delete_book(second.id).await.unwrap();

    let third = ctx.book("Third", None, 1).await;
    assert!(third.id > second.id);
}

#[tokio::test]
async fn test_book_author_must_exist() {
    let ctx = setup().await;

    let result = ctx
        .services
        .catalog
        .create_book(CreateBook {
            title: "Orphan".to_string(),
            description: None,
            author_id: Some(12),
            available_copies: 1,
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let book = ctx.book("Orphan", None, 1).await;
    let result = ctx
        .services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                author_id: Some(Some(12)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_payloads_rejected() {
    let ctx = setup().await;

    let result = ctx
        .services
        .catalog
        .create_book(CreateBook {
            title: String::new(),
            description: None,
            author_id: None,
            available_copies: 1,
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let book = ctx.book("War and Peace", None, 1).await;
    let result = ctx
        .services
        .catalog
        .update_book(
            book.id,
            UpdateBook {
                available_copies: Some(-1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(ctx.copies(book.id).await, 1);
}

#[tokio::test]
async fn test_books_and_borrows_by_parent() {
    let ctx = setup().await;
    let tolstoy = ctx.author("Leo", "Tolstoy").await;
    let other = ctx.author("Anton", "Chekhov").await;
    let war = ctx.book("War and Peace", Some(tolstoy.id), 3).await;
    let anna = ctx.book("Anna Karenina", Some(tolstoy.id), 2).await;
    ctx.book("The Cherry Orchard", Some(other.id), 1).await;

    let books = ctx
        .services
        .catalog
        .list_author_books(tolstoy.id, &ListParams::default())
        .await
        .unwrap();
    assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), [war.id, anna.id]);

    let alice = ctx.borrow(war.id, "Alice").await;
    ctx.borrow(anna.id, "Bob").await;
    let borrows = ctx
        .services
        .catalog
        .list_book_borrows(war.id, &ListParams::default())
        .await
        .unwrap();
    assert_eq!(borrows, vec![alice]);

    let missing = ctx.services.catalog.list_author_books(404, &ListParams::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_seed_sample_catalog_once() {
    let ctx = setup().await;

    assert!(seed::seed_if_empty(&ctx.repository).await.unwrap());
    assert!(!seed::seed_if_empty(&ctx.repository).await.unwrap());

    let authors = ctx.services.catalog.list_authors(&ListParams::default()).await.unwrap();
    assert_eq!(authors.len(), 5);
    assert_eq!(authors[0].last_name, "Tolstoy");

    // Every sample book has one copy out
    let books = ctx.services.catalog.list_books(&ListParams::default()).await.unwrap();
    let copies: Vec<i64> = books.iter().map(|b| b.available_copies).collect();
    assert_eq!(copies, [2, 1, 4, 3, 0]);
    assert_eq!(ctx.repository.borrows.count_active().await.unwrap(), 5);
}

#[tokio::test]
async fn test_failed_seed_leaves_store_empty() {
    let ctx = setup().await;
    sqlx::query("DROP TABLE borrows")
        .execute(&ctx.repository.pool)
        .await
        .unwrap();

    assert!(seed::seed_if_empty(&ctx.repository).await.is_err());
    assert_eq!(ctx.repository.authors.count().await.unwrap(), 0);
    assert!(ctx.services.catalog.list_books(&ListParams::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_write_against_missing_author_is_not_found() {
    let ctx = setup().await;

    // Straight to the store, as when the author disappears after the service check
    let result = ctx
        .repository
        .books
        .create(&CreateBook {
            title: "Orphan".to_string(),
            description: None,
            author_id: Some(31),
            available_copies: 1,
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg.contains("Author")));

    let book = ctx.book("Orphan", None, 1).await;
    let result = ctx
        .repository
        .books
        .update(
            book.id,
            &UpdateBook {
                author_id: Some(Some(31)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg.contains("Author")));

    let stored = ctx.services.catalog.get_book(book.id).await.unwrap();
    assert_eq!(stored, book);
}
