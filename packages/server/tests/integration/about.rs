use reqwest::multipart::Form;
use sea_orm::{EntityTrait, PaginatorTrait};

use folio_server::entity::profile;

use crate::common::{OWNER_NAME, TestApp, file_part, routes};

#[tokio::test]
async fn profile_defaults_to_the_site_owner() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ABOUT).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["nav_active"], "about");
    assert_eq!(res.body["name"], OWNER_NAME);
    assert!(res.body["direction"].is_null());
    assert!(res.body["resume"].is_null());
    assert!(res.body["resume_download"].is_null());
}

#[tokio::test]
async fn edit_saves_fields_and_blank_ones_stay_absent() {
    let app = TestApp::spawn().await;
    app.login().await;

    let form = Form::new()
        .text("name", "Ada")
        .text("direction", "   ")
        .text("message", "Hello there")
        .text("experience", "")
        .text("awards", "Prize");
    let res = app.post_multipart(routes::ABOUT_EDIT, form).await;
    assert_eq!(res.redirect_target(), routes::ABOUT);

    let view = app.get(routes::ABOUT).await;
    assert_eq!(view.body["name"], "Ada");
    assert!(view.body["direction"].is_null());
    assert_eq!(view.body["message"], "Hello there");
    assert!(view.body["experience"].is_null());
    assert_eq!(view.body["awards"], "Prize");
}

#[tokio::test]
async fn second_edit_updates_the_single_profile() {
    let app = TestApp::spawn().await;
    app.login().await;

    app.post_multipart(routes::ABOUT_EDIT, Form::new().text("name", "First"))
        .await;
    app.post_multipart(routes::ABOUT_EDIT, Form::new().text("name", "Second"))
        .await;

    let edit = app.get(routes::ABOUT_EDIT).await;
    assert_eq!(edit.status, 200);
    assert_eq!(edit.body["name"], "Second");
    assert_eq!(edit.body["direction"], "");

    let count = profile::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn latest_resume_is_lexicographically_last_document() {
    let app = TestApp::spawn().await;
    app.put_asset("about/resume/a.pdf", b"a").await;
    app.put_asset("about/resume/b.doc", b"b").await;
    app.put_asset("about/resume/z.txt", b"z").await;

    let res = app.get(routes::ABOUT).await;

    assert_eq!(res.body["resume"], "/assets/about/resume/b.doc");
    assert_eq!(res.body["resume_download"], routes::ABOUT_RESUME);

    let download = app.get(routes::ABOUT_RESUME).await;
    assert_eq!(download.status, 200);
    assert_eq!(download.text, "b");
    assert!(
        download
            .content_disposition
            .unwrap_or_default()
            .starts_with("attachment;")
    );
}

#[tokio::test]
async fn resume_upload_is_stored_as_resume_with_its_extension() {
    let app = TestApp::spawn().await;
    app.login().await;

    let form = Form::new()
        .text("name", "Ada")
        .part("resume", file_part("My CV.docx", b"docx"));
    let res = app.post_multipart(routes::ABOUT_EDIT, form).await;
    assert_eq!(res.redirect_target(), routes::ABOUT);

    assert_eq!(app.list_assets("about/resume").await, vec!["resume.docx"]);
    let view = app.get(routes::ABOUT).await;
    assert_eq!(view.body["resume"], "/assets/about/resume/resume.docx");
}

#[tokio::test]
async fn disallowed_resume_redirects_back_to_the_form() {
    let app = TestApp::spawn().await;
    app.login().await;

    let form = Form::new()
        .text("name", "Ada")
        .part("resume", file_part("cv.png", b"png"));
    let res = app.post_multipart(routes::ABOUT_EDIT, form).await;

    assert_eq!(res.redirect_target(), routes::ABOUT_EDIT);
    assert_eq!(app.get(routes::ABOUT).await.body["name"], OWNER_NAME);
}

#[tokio::test]
async fn resume_download_without_document_is_not_found() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get(routes::ABOUT_RESUME).await.status, 404);
}

#[tokio::test]
async fn profile_page_lists_gallery_and_intro() {
    let app = TestApp::spawn().await;
    app.put_asset("about/index.md", b"About me").await;
    app.put_asset("about/fig/me.png", b"png").await;

    let res = app.get(routes::ABOUT).await;

    assert_eq!(res.body["intro"], "About me");
    assert_eq!(res.body["images"], serde_json::json!(["/media/about/me.png"]));
}
