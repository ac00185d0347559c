use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use bank_engine::{
    db_types::{Account, MAX_ACCOUNT_NUMBER},
    traits::AccountApiError,
    AccountApi,
};
use chrono::{Duration, Utc};

use super::{
    helpers::{issue_token, send_request},
    mocks::{sample_account, MockAccountManager},
};
use crate::{auth::AUTH_TOKEN_HEADER, routes};

fn configure_with(store: MockAccountManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AccountApi::new(store);
        cfg.app_data(web::Data::new(api));
        routes::configure::<MockAccountManager>(cfg);
    }
}

// ------------------------------------------   Collection routes  ---------------------------------------------

#[actix_web::test]
async fn list_accounts_returns_every_account() {
    let mut store = MockAccountManager::new();
    store.expect_fetch_accounts().times(1).returning(|| Ok(vec![sample_account(1, 111), sample_account(2, 222)]));
    let req = TestRequest::get().uri("/account");
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::OK);
    let accounts: Vec<Account> = serde_json::from_str(&body).expect("body was not a JSON array of accounts");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].number, 111);
    assert_eq!(accounts[1].number, 222);
}

#[actix_web::test]
async fn create_account_assigns_fresh_details() {
    let start = Utc::now();
    let mut store = MockAccountManager::new();
    // Echo the generated fields back the way the real store does.
    store.expect_create_account().times(1).returning(|acc| {
        Ok(Account {
            id: 1,
            first_name: acc.first_name.clone(),
            last_name: acc.last_name.clone(),
            number: acc.number,
            balance: acc.balance,
            created_at: acc.created_at,
        })
    });
    let req = TestRequest::post().uri("/account").set_json(serde_json::json!({
        "firstName": "Alice",
        "lastName": "Aardvark"
    }));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    let account: Account = serde_json::from_str(&body).expect("body was not a JSON account");
    assert_eq!(account.first_name, "Alice");
    assert_eq!(account.last_name, "Aardvark");
    assert!((0..MAX_ACCOUNT_NUMBER).contains(&account.number));
    assert!(account.balance >= 0.0);
    assert!(account.created_at >= start);
}

#[actix_web::test]
async fn create_account_with_malformed_body_is_a_bad_request() {
    let store = MockAccountManager::new();
    let req = TestRequest::post().uri("/account").set_json(serde_json::json!({ "firstName": 5 }));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Could not read request body"), "was: {body}");
}

#[actix_web::test]
async fn store_failures_render_the_error_envelope() {
    let mut store = MockAccountManager::new();
    store
        .expect_fetch_accounts()
        .returning(|| Err(AccountApiError::DatabaseError("connection reset".to_string())));
    let req = TestRequest::get().uri("/account");
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        r#"{"error":"An error occurred on the backend of the server. Database error: connection reset"}"#
    );
}

#[actix_web::test]
async fn unsupported_verbs_on_the_collection_are_rejected() {
    let store = MockAccountManager::new();
    let req = TestRequest::put().uri("/account");
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"method not allowed PUT"}"#);
}

// ------------------------------------------   Protected routes  ----------------------------------------------

#[actix_web::test]
async fn fetch_account_without_token_is_forbidden() {
    let store = MockAccountManager::new();
    let req = TestRequest::get().uri("/account/1");
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Auth token not provided"}"#);
}

#[actix_web::test]
async fn fetch_account_with_matching_token_succeeds() {
    let mut store = MockAccountManager::new();
    // Once for the middleware's authorization check, once for the handler.
    store.expect_fetch_account_by_id().times(2).returning(|id| Ok(Some(sample_account(id, 555))));
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::get().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    let account: Account = serde_json::from_str(&body).expect("body was not a JSON account");
    assert_eq!(account.id, 1);
    assert_eq!(account.number, 555);
}

#[actix_web::test]
async fn token_for_a_different_account_is_rejected() {
    let mut store = MockAccountManager::new();
    store.expect_fetch_account_by_id().times(1).returning(|id| Ok(Some(sample_account(id, 555))));
    let token = issue_token(777, Duration::hours(1));
    let req = TestRequest::get().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Invalid JWT"}"#);
}

#[actix_web::test]
async fn tampered_token_is_rejected() {
    let store = MockAccountManager::new();
    let token = issue_token(555, Duration::hours(1));
    let (payload, _sig) = token.rsplit_once('.').unwrap();
    let tampered = format!("{payload}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    let req = TestRequest::get().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, tampered));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Access token signature is invalid"), "was: {body}");
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let store = MockAccountManager::new();
    let token = issue_token(555, Duration::seconds(-60));
    let req = TestRequest::get().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Access token signature is invalid"), "was: {body}");
}

#[actix_web::test]
async fn unparsable_id_is_rejected() {
    let store = MockAccountManager::new();
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::get().uri("/account/not-a-number").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Could not read account id from path"), "was: {body}");
}

#[actix_web::test]
async fn unknown_account_is_rejected() {
    let mut store = MockAccountManager::new();
    store.expect_fetch_account_by_id().times(1).returning(|_| Ok(None));
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::get().uri("/account/99").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Account not found."}"#);
}

#[actix_web::test]
async fn store_errors_during_authorization_are_forbidden_too() {
    let mut store = MockAccountManager::new();
    store
        .expect_fetch_account_by_id()
        .times(1)
        .returning(|_| Err(AccountApiError::DatabaseError("connection reset".to_string())));
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::get().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Account not found."}"#);
}

#[actix_web::test]
async fn delete_account_with_matching_token_succeeds() {
    let mut store = MockAccountManager::new();
    store.expect_fetch_account_by_id().times(1).returning(|id| Ok(Some(sample_account(id, 555))));
    store.expect_delete_account().times(1).returning(|_| Ok(()));
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::delete().uri("/account/1").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"Account with id 1 deleted"}"#);
}

#[actix_web::test]
async fn delete_missing_account_is_rejected_by_the_middleware() {
    let mut store = MockAccountManager::new();
    store.expect_fetch_account_by_id().times(1).returning(|_| Ok(None));
    let token = issue_token(555, Duration::hours(1));
    let req = TestRequest::delete().uri("/account/42").insert_header((AUTH_TOKEN_HEADER, token));
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Account not found."}"#);
}

#[actix_web::test]
async fn unsupported_verbs_on_the_item_path_still_require_a_token() {
    // The whole resource is wrapped, so even a bad verb is challenged for auth first.
    let store = MockAccountManager::new();
    let req = TestRequest::post().uri("/account/1");
    let (status, body) = send_request(req, configure_with(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. Auth token not provided"}"#);
}
