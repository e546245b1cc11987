use crate::common::{OWNER_SECRET, TestApp, routes};

mod access {
    use super::*;

    #[tokio::test]
    async fn anonymous_editor_request_redirects_to_login_with_next() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::edit("intro")).await;

        assert_eq!(res.redirect_target(), "/login?next=/blog/edit/intro");
    }

    #[tokio::test]
    async fn anonymous_writes_are_redirected_without_mutation() {
        let app = TestApp::spawn().await;
        app.insert_post("intro", "# Intro").await;

        let res = app.post_form(&routes::delete("intro"), &[]).await;

        assert_eq!(res.redirect_target(), "/login?next=/blog/delete/intro");
        assert_eq!(app.get(&routes::post("intro")).await.status, 200);
    }

    #[tokio::test]
    async fn public_pages_report_anonymous_viewer() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HOME).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["is_owner"], false);
        assert_eq!(res.body["nav_active"], "home");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn correct_secret_grants_owner_and_follows_next() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                &routes::login_next("/blog/edit/intro"),
                &[("password", OWNER_SECRET)],
            )
            .await;
        assert_eq!(res.redirect_target(), "/blog/edit/intro");

        let editor = app.get(&routes::edit("intro")).await;
        assert_eq!(editor.status, 200, "Editor failed: {}", editor.text);
        assert_eq!(editor.body["is_owner"], true);
        assert_eq!(app.get(routes::HOME).await.body["is_owner"], true);
    }

    #[tokio::test]
    async fn correct_secret_without_next_lands_home() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(routes::LOGIN, &[("password", OWNER_SECRET)])
            .await;

        assert_eq!(res.redirect_target(), "/");
    }

    #[tokio::test]
    async fn offsite_next_is_ignored() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                &routes::login_next("https://evil.example/"),
                &[("password", OWNER_SECRET)],
            )
            .await;

        assert_eq!(res.redirect_target(), "/");
    }

    #[tokio::test]
    async fn wrong_secret_stays_anonymous_with_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(&routes::login_next("/about/edit"), &[("password", "guess")])
            .await;

        assert_eq!(res.status, 401);
        let error = res.body["error"].as_str().unwrap_or_default();
        assert!(!error.is_empty());
        assert_eq!(res.body["next"], "/about/edit");

        let gated = app.get(routes::ABOUT_EDIT).await;
        assert_eq!(gated.redirect_target(), "/login?next=/about/edit");
    }

    #[tokio::test]
    async fn login_form_echoes_next() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::login_next("/blog/upload")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["next"], "/blog/upload");
        assert!(res.body["error"].is_null());
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_clears_the_owner_session() {
        let app = TestApp::spawn().await;
        app.login().await;
        assert_eq!(app.get(routes::ABOUT_EDIT).await.status, 200);

        let res = app.get(routes::LOGOUT).await;
        assert_eq!(res.redirect_target(), "/");

        let gated = app.get(routes::ABOUT_EDIT).await;
        assert_eq!(gated.status, 303);
    }

    #[tokio::test]
    async fn logout_without_session_still_redirects_home() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::LOGOUT).await;

        assert_eq!(res.redirect_target(), "/");
    }
}
