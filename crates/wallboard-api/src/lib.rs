pub mod error;
pub mod models;
pub mod templates;
pub mod walls;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use wallboard_db::Database;

use crate::templates::Templates;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub templates: Templates,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(walls::index))
        .route("/walls", post(walls::create))
        .route("/walls/new", get(walls::new_form))
        .route("/walls/{id}", get(walls::show).delete(walls::destroy))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        Arc::new(AppStateInner {
            db: Database::open_in_memory().unwrap(),
            templates: Templates::load().unwrap(),
        })
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_list_delete_scenario() {
        let app = router(test_state());

        // Create a wall as alice
        let response = app
            .clone()
            .oneshot(form_request(
                Method::POST,
                "/walls",
                "wall[created_by]=alice&wall[title]=Test&wall[description]=desc&wall[likes]=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        // It shows up in the list
        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Test"));

        // Wrong creator name: wall stays, error message rendered
        let response = app
            .clone()
            .oneshot(form_request(Method::DELETE, "/walls/1", "created_by=bob"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(walls::DELETE_MISMATCH_MESSAGE));

        let response = app.clone().oneshot(get_request("/walls/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Matching creator name: wall removed, redirect to the list
        let response = app
            .clone()
            .oneshot(form_request(Method::DELETE, "/walls/1", "created_by=alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = app.clone().oneshot(get_request("/walls/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get_request("/")).await.unwrap();
        assert!(!body_text(response).await.contains("Test"));
    }

    #[tokio::test]
    async fn create_stamps_created_at_server_side() {
        let state = test_state();
        let app = router(state.clone());

        let before = Utc::now();
        let response = app
            .oneshot(form_request(
                Method::POST,
                "/walls",
                "wall[created_by]=alice&wall[title]=Test&wall[description]=desc&wall[likes]=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let row = state.db.get_wall(1).unwrap().unwrap();
        assert_eq!(row.likes, 0);

        let created_at: DateTime<Utc> = row.created_at.parse().unwrap();
        assert!(created_at >= before);
        assert!(created_at <= Utc::now());
    }

    #[tokio::test]
    async fn show_missing_wall_returns_404() {
        let response = router(test_state())
            .oneshot(get_request("/walls/9999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_missing_wall_returns_404() {
        let response = router(test_state())
            .oneshot(form_request(Method::DELETE, "/walls/9999", "created_by=alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn new_form_renders_blank_draft() {
        let response = router(test_state())
            .oneshot(get_request("/walls/new"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("wall[created_by]"));
        assert!(body.contains("wall[title]"));
    }

    #[tokio::test]
    async fn create_without_title_rerenders_form() {
        let app = router(test_state());

        let response = app
            .clone()
            .oneshot(form_request(
                Method::POST,
                "/walls",
                "wall[created_by]=alice&wall[description]=desc",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Entered values are redisplayed in the form
        let body = body_text(response).await;
        assert!(body.contains("alice"));
        assert!(body.contains("action=\"/walls\""));

        // Nothing was persisted
        let response = app.oneshot(get_request("/walls/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_with_non_numeric_likes_rerenders_form() {
        let app = router(test_state());

        let response = app
            .clone()
            .oneshot(form_request(
                Method::POST,
                "/walls",
                "wall[created_by]=alice&wall[title]=Test&wall[description]=&wall[likes]=lots",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("whole number"));

        let response = app.oneshot(get_request("/walls/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_with_no_walls_renders_empty_list() {
        let response = router(test_state()).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No walls yet"));
    }
}
