//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn signup(server: &TestServer) -> (SignupRequest, String) {
    let request = SignupRequest::unique();
    let response = server.post("/users/signup", &request).await.unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, token.token)
}

async fn create_post(server: &TestServer, token: &str) -> (String, String) {
    let (tag, request) = ContentRequest::tagged();
    let response = server.post_auth("/posts", token, &request).await.unwrap();
    let created: PostCreatedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.message, "Post created");
    (created.id, tag)
}

async fn find_post(server: &TestServer, token: &str, tag: &str) -> Option<PostResponse> {
    let response = server
        .get_auth(&format!("/posts?q={tag}"), token)
        .await
        .unwrap();
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    posts.into_iter().next()
}

async fn like(server: &TestServer, token: &str, post_id: &str, like: bool) -> String {
    let response = server
        .put_auth(&format!("/posts/{post_id}/like"), token, &LikeRequest { like })
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    body.message
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_signup_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, token) = signup(&server).await;
    assert!(!token.is_empty());

    let response = server
        .post("/users/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let login: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!login.token.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signup(&server).await;

    let response = server.post("/users/signup", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signup(&server).await;

    let login = LoginRequest {
        email: request.email,
        password: "not-the-password".to_string(),
    };
    let response = server.post("/users/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_unknown_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: format!("ghost{}@email.com", unique_suffix()),
        password: "whatever".to_string(),
    };

    let response = server.post("/users/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_posts_require_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/posts").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_and_list_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, token) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &token).await;

    let post = find_post(&server, &token, &tag).await.expect("post listed");
    assert_eq!(post.id, post_id);
    assert!(post.content.contains(&tag));
    assert_eq!(post.likes, 0);
    assert_eq!(post.dislikes, 0);
    assert_eq!(post.creator.name, request.name);
    assert!(!post.creator.id.is_empty());
    assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn test_list_filter_is_case_insensitive() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &token).await;

    let post = find_post(&server, &token, &tag.to_uppercase())
        .await
        .expect("post listed");
    assert_eq!(post.id, post_id);

    let missing = find_post(&server, &token, &format!("absent{}", unique_suffix())).await;
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_create_post_empty_content() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signup(&server).await;

    let response = server
        .post_auth("/posts", &token, &ContentRequest::new(""))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_edit_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signup(&server).await;
    let (post_id, _) = create_post(&server, &token).await;

    let (new_tag, edit) = ContentRequest::tagged();
    let response = server
        .put_auth(&format!("/posts/{post_id}"), &token, &edit)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Post updated");

    let post = find_post(&server, &token, &new_tag).await.expect("post listed");
    assert_eq!(post.id, post_id);
    assert!(post.updated_at > post.created_at);
}

#[tokio::test]
async fn test_edit_post_by_other_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signup(&server).await;
    let (_, other) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &owner).await;

    let response = server
        .put_auth(&format!("/posts/{post_id}"), &other, &ContentRequest::new("hijack"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "NOT_POST_CREATOR");

    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert!(post.content.contains(&tag));
}

#[tokio::test]
async fn test_edit_unknown_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signup(&server).await;

    let response = server
        .put_auth("/posts/does-not-exist", &token, &ContentRequest::new("x"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_delete_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signup(&server).await;
    let (_, other) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &owner).await;

    let response = server
        .delete_auth(&format!("/posts/{post_id}"), &other)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .delete_auth(&format!("/posts/{post_id}"), &owner)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Post deleted");

    assert!(find_post(&server, &owner, &tag).await.is_none());

    let response = server
        .delete_auth(&format!("/posts/{post_id}"), &owner)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_transitions() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signup(&server).await;
    let (_, reader) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &owner).await;

    let counts = |post: PostResponse| (post.likes, post.dislikes);

    assert_eq!(like(&server, &reader, &post_id, true).await, "Like sent");
    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert_eq!(counts(post), (1, 0));

    assert_eq!(
        like(&server, &reader, &post_id, false).await,
        "Like changed to dislike"
    );
    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert_eq!(counts(post), (0, 1));

    assert_eq!(like(&server, &reader, &post_id, false).await, "Dislike removed");
    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert_eq!(counts(post), (0, 0));
}

#[tokio::test]
async fn test_cannot_react_to_own_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &owner).await;

    let response = server
        .put_auth(
            &format!("/posts/{post_id}/like"),
            &owner,
            &LikeRequest { like: true },
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "SELF_REACTION");

    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert_eq!(post.likes, 0);
}

#[tokio::test]
async fn test_like_unknown_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signup(&server).await;

    let response = server
        .put_auth("/posts/does-not-exist/like", &token, &LikeRequest { like: true })
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_likes_are_all_counted() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signup(&server).await;
    let (post_id, tag) = create_post(&server, &owner).await;

    let mut readers = Vec::new();
    for _ in 0..5 {
        readers.push(signup(&server).await.1);
    }

    let results = spawn_likes(&server, &readers, &post_id).await;
    assert!(results.iter().all(|m| m == "Like sent"));

    let post = find_post(&server, &owner, &tag).await.expect("post listed");
    assert_eq!(post.likes, 5);
    assert_eq!(post.dislikes, 0);
}

async fn spawn_likes(server: &TestServer, tokens: &[String], post_id: &str) -> Vec<String> {
    let mut handles = Vec::new();
    for token in tokens {
        let client = server.client.clone();
        let url = format!("{}/posts/{post_id}/like", server.base_url());
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let response = client
                .put(url)
                .header("Authorization", format!("Bearer {token}"))
                .json(&LikeRequest { like: true })
                .send()
                .await
                .unwrap();
            let body: MessageResponse = response.json().await.unwrap();
            body.message
        }));
    }

    let mut messages = Vec::new();
    for handle in handles {
        messages.push(handle.await.unwrap());
    }
    messages
}
