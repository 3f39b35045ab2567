//! Integration tests for the task lists API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, test_app, token_mock, user_mock};

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Tests creating a task list
    #[tokio::test]
    #[serial]
    async fn it_creates_a_list() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        let create = server
            .mock("POST", "/users/u-1/todo/lists")
            .match_body(mockito::Matcher::Json(json!({ "displayName": "Groceries" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "l-1", "displayName": "Groceries"}"#)
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(json_request(
                "POST",
                "/api/todo/lists/create",
                json!({ "email": "u@x.com", "listName": "Groceries" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"id\":\"l-1\""));
        create.assert_async().await;
    }

    /// Tests fetching all lists for a user
    #[tokio::test]
    #[serial]
    async fn it_gets_all_lists() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value": [
                    {"id": "l-1", "displayName": "Groceries"},
                    {"id": "l-2", "displayName": "Work"}
                ]}"#,
            )
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(
                Request::builder()
                    .uri("/api/todo/lists?email=u@x.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"lists\""));
        assert!(body.contains("Groceries"));
        assert!(body.contains("Work"));
    }

    /// Tests renaming a list by name
    #[tokio::test]
    #[serial]
    async fn it_renames_a_list() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": [{"id": "l-1", "displayName": "Groceries"}]}"#)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/users/u-1/todo/lists/l-1")
            .match_body(mockito::Matcher::Json(json!({ "displayName": "Food" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "l-1", "displayName": "Food"}"#)
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(json_request(
                "PATCH",
                "/api/todo/lists/edit",
                json!({ "email": "u@x.com", "listName": "Groceries", "newName": "Food" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        patch.assert_async().await;
    }

    /// Tests renaming a list that does not exist
    #[tokio::test]
    #[serial]
    async fn it_returns_404_when_renaming_an_unknown_list() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": []}"#)
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(json_request(
                "PATCH",
                "/api/todo/lists/edit",
                json!({ "email": "u@x.com", "listName": "Groceries", "newName": "Food" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests two lists with the same name make the delete ambiguous
    #[tokio::test]
    #[serial]
    async fn it_returns_409_for_duplicate_list_names() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value": [
                    {"id": "l-1", "displayName": "Groceries"},
                    {"id": "l-2", "displayName": "groceries"}
                ]}"#,
            )
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(json_request(
                "DELETE",
                "/api/todo/lists/delete",
                json!({ "email": "u@x.com", "listName": "Groceries" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    /// Tests deleting a list by name
    #[tokio::test]
    #[serial]
    async fn it_deletes_a_list() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        user_mock(&mut server).await;
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": [{"id": "l-1", "displayName": "Groceries"}]}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/users/u-1/todo/lists/l-1")
            .with_status(204)
            .create_async()
            .await;

        let response = test_app(&server.url())
            .oneshot(json_request(
                "DELETE",
                "/api/todo/lists/delete",
                json!({ "email": "u@x.com", "listName": "Groceries" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        delete.assert_async().await;
    }
}
