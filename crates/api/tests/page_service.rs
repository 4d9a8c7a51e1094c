//! Page service behaviour against the in-memory store: check order,
//! authorization, scheduling, content validation and atomicity.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::memory_store::MemoryPageStore;
use folio_api::services::{PageInput, PageService};
use folio_core::blocks::{editing, BlockDraft, BlockType, BlockViolation};
use folio_core::error::CoreError;
use folio_core::page_status::PageStatus;
use folio_core::pages::Actor;
use folio_core::roles::{ROLE_ADMIN, ROLE_AUTHOR};
use folio_core::types::{Date, DbId};
use folio_db::models::block::Block;

const CAT: &str = "/static/images/cat.jpg";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    store: Arc<MemoryPageStore>,
    service: PageService,
    alice: Actor,
    bob: Actor,
    admin: Actor,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryPageStore::new(&[CAT]));
    let alice = Actor::new(store.add_user("Alice"), ROLE_AUTHOR);
    let bob = Actor::new(store.add_user("Bob"), ROLE_AUTHOR);
    let admin = Actor::new(store.add_user("Admin"), ROLE_ADMIN);
    Fixture {
        service: PageService::new(store.clone()),
        store,
        alice,
        bob,
        admin,
    }
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn valid_blocks() -> Vec<BlockDraft> {
    vec![
        BlockDraft::new(BlockType::Header, "Hello", 0),
        BlockDraft::new(BlockType::Paragraph, "World", 1),
    ]
}

fn input(author_id: DbId, publication_date: Option<Date>) -> PageInput {
    PageInput {
        title: "My page".to_string(),
        author_id,
        publication_date,
        blocks: valid_blocks(),
    }
}

async fn create_for(f: &Fixture, actor: &Actor) -> DbId {
    f.service
        .create_page(actor, input(actor.user_id, None), date(2024, 1, 10))
        .await
        .unwrap()
}

fn drafts(blocks: &[Block]) -> Vec<BlockDraft> {
    blocks
        .iter()
        .map(|b| BlockDraft::new(b.block_type.parse().unwrap(), b.content.clone(), b.position))
        .collect()
}

async fn status_on(f: &Fixture, id: DbId, today: Date) -> PageStatus {
    f.service
        .get_page(Some(&f.alice), id, today)
        .await
        .unwrap()
        .status
}

// ---------------------------------------------------------------------------
// Scheduling scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn draft_then_scheduled_then_published() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    assert_eq!(status_on(&f, id, date(2024, 1, 10)).await, PageStatus::Draft);

    let err = f
        .service
        .update_page(&f.alice, id, input(f.alice.user_id, Some(date(2024, 1, 5))))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidScheduling(_));
    let page = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(page.page.publication_date, None, "rejected update changed nothing");

    f.service
        .update_page(&f.alice, id, input(f.alice.user_id, Some(date(2024, 1, 20))))
        .await
        .unwrap();
    assert_eq!(status_on(&f, id, date(2024, 1, 15)).await, PageStatus::Scheduled);
    assert_eq!(status_on(&f, id, date(2024, 1, 20)).await, PageStatus::Published);
    assert_eq!(status_on(&f, id, date(2024, 1, 25)).await, PageStatus::Published);
}

#[tokio::test]
async fn create_rejects_publication_before_today() {
    let f = fixture();
    let err = f
        .service
        .create_page(&f.alice, input(f.alice.user_id, Some(date(2024, 1, 9))), date(2024, 1, 10))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidScheduling(_));
    assert_eq!(f.store.page_count(), 0);
}

#[tokio::test]
async fn create_sets_creation_date_to_today() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    let page = f.service.get_page(Some(&f.alice), id, date(2024, 2, 1)).await.unwrap();
    assert_eq!(page.page.creation_date, date(2024, 1, 10));
    assert_eq!(page.page.author_name, "Alice");
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn author_edits_own_page_but_not_others() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    let err = f
        .service
        .update_page(&f.bob, id, input(f.bob.user_id, None))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Forbidden(_));

    f.service
        .update_page(&f.alice, id, input(f.alice.user_id, None))
        .await
        .unwrap();
}

#[tokio::test]
async fn author_cannot_create_for_someone_else() {
    let f = fixture();
    let err = f
        .service
        .create_page(&f.alice, input(f.bob.user_id, None), date(2024, 1, 10))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Forbidden(_));
}

#[tokio::test]
async fn author_cannot_hand_page_over() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    let err = f
        .service
        .update_page(&f.alice, id, input(f.bob.user_id, None))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Forbidden(_));
}

#[tokio::test]
async fn admin_reassigns_only_to_existing_users() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    let err = f
        .service
        .update_page(&f.admin, id, input(9999, None))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidAuthor(9999));

    f.service
        .update_page(&f.admin, id, input(f.bob.user_id, None))
        .await
        .unwrap();
    let page = f.service.get_page(Some(&f.admin), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(page.page.author_id, f.bob.user_id);
    assert_eq!(page.page.author_name, "Bob");
}

#[tokio::test]
async fn admin_creates_for_unknown_author_is_invalid_author() {
    let f = fixture();
    let err = f
        .service
        .create_page(&f.admin, input(424242, None), date(2024, 1, 10))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidAuthor(424242));
}

#[tokio::test]
async fn delete_checks_existence_then_ownership() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    assert_matches!(
        f.service.delete_page(&f.alice, 777).await,
        Err(CoreError::NotFound { id: 777, .. })
    );
    assert_matches!(
        f.service.delete_page(&f.bob, id).await,
        Err(CoreError::Forbidden(_))
    );
    assert_eq!(f.service.delete_page(&f.alice, id).await.unwrap(), 1);
    assert_eq!(f.store.page_count(), 0);
}

#[tokio::test]
async fn admin_deletes_any_page() {
    let f = fixture();
    let id = create_for(&f, &f.bob).await;
    assert_eq!(f.service.delete_page(&f.admin, id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Check order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn existence_is_checked_before_anything_else() {
    let f = fixture();
    let mut bad = input(f.bob.user_id, Some(date(2000, 1, 1)));
    bad.blocks.clear();
    let err = f.service.update_page(&f.bob, 31337, bad).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { .. });
}

#[tokio::test]
async fn authorization_is_checked_before_scheduling_and_content() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    let mut bad = input(f.bob.user_id, Some(date(2000, 1, 1)));
    bad.blocks.clear();
    let err = f.service.update_page(&f.bob, id, bad).await.unwrap_err();
    assert_matches!(err, CoreError::Forbidden(_));
}

#[tokio::test]
async fn scheduling_is_checked_before_content() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    let mut bad = input(f.alice.user_id, Some(date(2000, 1, 1)));
    bad.blocks.clear();
    let err = f.service.update_page(&f.alice, id, bad).await.unwrap_err();
    assert_matches!(err, CoreError::InvalidScheduling(_));
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_content_reports_every_violation_and_writes_nothing() {
    let f = fixture();
    let mut page = input(f.alice.user_id, None);
    page.blocks = vec![
        BlockDraft::new(BlockType::Paragraph, "  ", 0),
        BlockDraft::new(BlockType::Image, "/nowhere.png", 2),
    ];

    let err = f
        .service
        .create_page(&f.alice, page, date(2024, 1, 10))
        .await
        .unwrap_err();
    match err {
        CoreError::InvalidContent(reasons) => assert_eq!(
            reasons,
            vec![
                BlockViolation::MissingHeader,
                BlockViolation::InvalidPosition,
                BlockViolation::EmptyContent { position: 0 },
                BlockViolation::UnknownImage {
                    position: 2,
                    path: "/nowhere.png".to_string()
                },
            ]
        ),
        other => panic!("expected InvalidContent, got {other:?}"),
    }
    assert_eq!(f.store.page_count(), 0);
}

#[tokio::test]
async fn known_image_is_accepted() {
    let f = fixture();
    let mut page = input(f.alice.user_id, None);
    page.blocks = vec![
        BlockDraft::new(BlockType::Header, "Gallery", 0),
        BlockDraft::new(BlockType::Image, CAT, 1),
    ];
    let id = f
        .service
        .create_page(&f.alice, page, date(2024, 1, 10))
        .await
        .unwrap();
    let view = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(view.blocks[1].block_type, "image");
    assert_eq!(view.blocks[1].content, CAT);
}

#[tokio::test]
async fn image_path_is_stored_trimmed() {
    let f = fixture();
    let mut page = input(f.alice.user_id, None);
    page.blocks = vec![
        BlockDraft::new(BlockType::Header, "Gallery", 0),
        BlockDraft::new(BlockType::Image, format!("  {CAT}\n"), 1),
    ];
    let id = f
        .service
        .create_page(&f.alice, page, date(2024, 1, 10))
        .await
        .unwrap();

    let view = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(view.blocks[1].content, CAT);

    let mut page = input(f.alice.user_id, None);
    page.blocks = vec![
        BlockDraft::new(BlockType::Header, "Gallery", 0),
        BlockDraft::new(BlockType::Image, format!("\t{CAT} "), 1),
    ];
    f.service.update_page(&f.alice, id, page).await.unwrap();
    let view = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(view.blocks[1].content, CAT);
}

#[tokio::test]
async fn blank_title_is_a_validation_error() {
    let f = fixture();
    let mut page = input(f.alice.user_id, None);
    page.title = "   ".to_string();
    let err = f
        .service
        .create_page(&f.alice, page, date(2024, 1, 10))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(_));
}

#[tokio::test]
async fn edited_blocks_round_trip_in_position_order() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    let current = drafts(
        &f.service
            .get_page(Some(&f.alice), id, date(2024, 1, 10))
            .await
            .unwrap()
            .blocks,
    );
    let edited = editing::append_block(&current, BlockType::Paragraph);
    let edited = editing::set_content(&edited, 2, "Appended").unwrap();
    let edited = editing::move_up(&edited, 2).unwrap();

    let mut page = input(f.alice.user_id, None);
    page.blocks = edited.clone();
    f.service.update_page(&f.alice, id, page).await.unwrap();

    let stored = drafts(
        &f.service
            .get_page(Some(&f.alice), id, date(2024, 1, 10))
            .await
            .unwrap()
            .blocks,
    );
    assert_eq!(stored, edited);
    assert_eq!(stored[1].content, "Appended");
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_replace_leaves_page_untouched() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;
    let before = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();

    f.store.fail_replaces(true);
    let mut page = input(f.alice.user_id, Some(date(2024, 2, 1)));
    page.title = "Changed".to_string();
    let err = f.service.update_page(&f.alice, id, page).await.unwrap_err();
    assert_matches!(err, CoreError::StorageFault(_));

    let after = f.service.get_page(Some(&f.alice), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(after.page, before.page);
    assert_eq!(after.blocks, before.blocks);
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_readers_only_see_published_pages() {
    let f = fixture();
    let draft = create_for(&f, &f.alice).await;
    let published = f
        .service
        .create_page(&f.alice, input(f.alice.user_id, Some(date(2024, 1, 10))), date(2024, 1, 10))
        .await
        .unwrap();
    let today = date(2024, 1, 12);

    let public: Vec<DbId> = f
        .service
        .list_pages(None, today)
        .await
        .unwrap()
        .iter()
        .map(|p| p.page.id)
        .collect();
    assert_eq!(public, vec![published]);

    let all = f.service.list_pages(Some(&f.bob), today).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].status, PageStatus::Draft);
    assert_eq!(all[1].status, PageStatus::Published);

    assert_matches!(
        f.service.get_page(None, draft, today).await,
        Err(CoreError::NotFound { .. })
    );
    assert!(f.service.get_page(None, published, today).await.is_ok());
}

// ---------------------------------------------------------------------------
// Reassignment between read and write
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_is_refused_when_page_was_reassigned_meanwhile() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    f.store.reassign_after_next_read(f.bob.user_id);
    let mut page = input(f.alice.user_id, None);
    page.title = "Mine again".to_string();
    let err = f.service.update_page(&f.alice, id, page).await.unwrap_err();
    assert_matches!(err, CoreError::Conflict(_));

    let view = f.service.get_page(Some(&f.bob), id, date(2024, 1, 10)).await.unwrap();
    assert_eq!(view.page.author_id, f.bob.user_id);
    assert_eq!(view.page.title, "My page");
}

#[tokio::test]
async fn delete_is_refused_when_page_was_reassigned_meanwhile() {
    let f = fixture();
    let id = create_for(&f, &f.alice).await;

    f.store.reassign_after_next_read(f.bob.user_id);
    let err = f.service.delete_page(&f.alice, id).await.unwrap_err();
    assert_matches!(err, CoreError::Conflict(_));
    assert_eq!(f.store.page_count(), 1);
}
