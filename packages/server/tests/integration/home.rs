use crate::common::{TestApp, routes};

#[tokio::test]
async fn home_shows_the_five_newest_of_eight_posts() {
    let app = TestApp::spawn().await;
    for i in 1..=8 {
        app.insert_post(&format!("post-{i}"), &format!("# Post {i}"))
            .await;
    }

    let res = app.get(routes::HOME).await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.slugs("latest_posts"),
        vec!["post-8", "post-7", "post-6", "post-5", "post-4"]
    );
    assert_eq!(res.body["latest_posts"][0]["title"], "Post 8");
}

#[tokio::test]
async fn home_with_no_content_renders_absent_fields() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HOME).await;

    assert_eq!(res.status, 200);
    assert!(res.body["logo"].is_null());
    assert!(res.body["background"].is_null());
    assert!(res.body["intro"].is_null());
    assert_eq!(res.body["images"], serde_json::json!([]));
    assert_eq!(res.body["latest_posts"], serde_json::json!([]));
}

#[tokio::test]
async fn home_resolves_fixed_images_gallery_and_intro() {
    let app = TestApp::spawn().await;
    app.put_asset("home/logo.png", b"logo").await;
    app.put_asset("home/background.png", b"bg").await;
    app.put_asset("home/index.txt", b"Hello from txt").await;
    app.put_asset("home/fig/b.JPG", b"b").await;
    app.put_asset("home/fig/a.png", b"a").await;
    app.put_asset("home/fig/notes.pdf", b"pdf").await;

    let res = app.get(routes::HOME).await;

    assert_eq!(res.body["logo"], "/assets/home/logo.png");
    assert_eq!(res.body["background"], "/assets/home/background.png");
    assert_eq!(res.body["intro"], "Hello from txt");
    assert_eq!(
        res.body["images"],
        serde_json::json!(["/media/home/a.png", "/media/home/b.JPG"])
    );
}

#[tokio::test]
async fn index_md_takes_precedence_over_index_txt() {
    let app = TestApp::spawn().await;
    app.put_asset("home/index.txt", b"txt").await;
    app.put_asset("home/index.md", b"# md").await;

    let res = app.get(routes::HOME).await;

    assert_eq!(res.body["intro"], "# md");
}

mod assets {
    use super::*;

    #[tokio::test]
    async fn asset_route_serves_files_with_guessed_type() {
        let app = TestApp::spawn().await;
        app.put_asset("blog/logos/intro.png", b"png bytes").await;

        let res = app.get("/assets/blog/logos/intro.png").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "png bytes");
        assert_eq!(res.content_type.as_deref(), Some("image/png"));
        assert!(res.content_disposition.is_none());
    }

    #[tokio::test]
    async fn media_route_serves_fig_images() {
        let app = TestApp::spawn().await;
        app.put_asset("about/fig/me.webp", b"webp").await;

        let res = app.get("/media/about/me.webp").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "webp");
    }

    #[tokio::test]
    async fn unknown_pages_and_hidden_paths_are_not_found() {
        let app = TestApp::spawn().await;
        app.put_asset("home/logo.png", b"logo").await;

        assert_eq!(app.get("/assets/admin/logo.png").await.status, 404);
        assert_eq!(app.get("/assets/home/.tmp").await.status, 404);
        assert_eq!(app.get("/assets/home/missing.png").await.status, 404);
        assert_eq!(app.get("/media/home/.hidden").await.status, 404);
    }
}
