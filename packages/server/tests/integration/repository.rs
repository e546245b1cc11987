use folio_server::repository::post::{self as posts, RenameOutcome};
use folio_server::repository::profile::{self as profiles, ProfileFields};

use crate::common::TestApp;

#[tokio::test]
async fn create_then_find_round_trips() {
    let app = TestApp::spawn().await;

    let created = posts::create_or_replace(&app.db, "intro", None, "# My Title\nbody")
        .await
        .unwrap();
    let found = posts::find_by_slug(&app.db, "intro")
        .await
        .unwrap()
        .expect("post should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.title, "My Title");
    assert_eq!(found.content, "# My Title\nbody");
}

#[tokio::test]
async fn replace_keeps_existing_title_when_nothing_better_is_given() {
    let app = TestApp::spawn().await;
    posts::create_or_replace(&app.db, "intro", Some("Kept"), "body")
        .await
        .unwrap();

    let updated = posts::create_or_replace(&app.db, "intro", None, "new body")
        .await
        .unwrap();

    assert_eq!(updated.title, "Kept");
    assert_eq!(updated.content, "new body");
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn rename_reports_conflict_and_missing_source() {
    let app = TestApp::spawn().await;
    app.insert_post("a", "# A").await;
    app.insert_post("b", "# B").await;

    assert!(matches!(
        posts::rename_slug(&app.db, "a", "b").await.unwrap(),
        RenameOutcome::Conflict
    ));
    assert!(matches!(
        posts::rename_slug(&app.db, "ghost", "c").await.unwrap(),
        RenameOutcome::NotFound
    ));
    match posts::rename_slug(&app.db, "a", "c").await.unwrap() {
        RenameOutcome::Renamed(post) => assert_eq!(post.slug, "c"),
        other => panic!("expected rename, got {other:?}"),
    }
    assert!(posts::find_by_slug(&app.db, "a").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_reports_whether_a_post_existed() {
    let app = TestApp::spawn().await;
    let post = app.insert_post("intro", "# Intro").await;
    posts::set_logo(&app.db, post.id, "logos/intro.png")
        .await
        .unwrap();

    assert!(posts::delete(&app.db, "intro").await.unwrap());
    assert!(!posts::delete(&app.db, "intro").await.unwrap());
    assert!(posts::find_meta(&app.db, post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn set_logo_updates_the_single_sidecar_row() {
    let app = TestApp::spawn().await;
    let post = app.insert_post("intro", "# Intro").await;

    let first = posts::set_logo(&app.db, post.id, "logos/one.png")
        .await
        .unwrap();
    let second = posts::set_logo(&app.db, post.id, "logos/two.png")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.logo.as_deref(), Some("logos/two.png"));
}

#[tokio::test]
async fn default_logo_is_not_attached_when_missing_or_already_set() {
    let app = TestApp::spawn().await;
    let post = app.insert_post("intro", "# Intro").await;

    let none = posts::attach_default_logo(&app.db, &post, &[]).await.unwrap();
    assert!(none.is_none());

    posts::set_logo(&app.db, post.id, "logos/custom.png")
        .await
        .unwrap();
    let listing = vec!["intro.png".to_string()];
    let kept = posts::attach_default_logo(&app.db, &post, &listing)
        .await
        .unwrap();
    assert!(kept.is_none());
}

#[tokio::test]
async fn profile_is_absent_until_first_upsert() {
    let app = TestApp::spawn().await;
    assert!(profiles::get(&app.db).await.unwrap().is_none());

    let saved = profiles::upsert(
        &app.db,
        ProfileFields {
            name: Some("Ada".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(saved.name.as_deref(), Some("Ada"));
    assert_eq!(saved.direction, None);
    assert_eq!(profiles::get(&app.db).await.unwrap(), Some(saved));
}

#[tokio::test]
async fn legacy_markdown_files_are_imported_once() {
    let app = TestApp::spawn().await;
    app.put_asset("blog/posts/hello.md", b"# Hello\nworld").await;
    app.put_asset("blog/posts/skip.txt", b"ignored").await;
    app.put_asset("blog/logos/hello.png", b"png").await;

    let imported = folio_server::seed::import_legacy_posts(&app.db, &app.assets).await;
    assert_eq!(imported, 1);

    let (post, meta) = posts::find_with_meta(&app.db, "hello")
        .await
        .unwrap()
        .expect("post should be imported");
    assert_eq!(post.title, "Hello");
    assert_eq!(
        meta.and_then(|m| m.logo).as_deref(),
        Some("logos/hello.png")
    );

    let again = folio_server::seed::import_legacy_posts(&app.db, &app.assets).await;
    assert_eq!(again, 0);
}
