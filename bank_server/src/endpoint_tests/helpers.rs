use actix_web::{body, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App, HttpResponse};
use bank_common::Secret;
use chrono::Duration;

use crate::{auth::TokenIssuer, config::AuthConfig};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-secret-5d41402abc4b2a76b9719d91".to_string()) }
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&get_auth_config())
}

pub fn issue_token(account_number: i64, validity: Duration) -> String {
    test_issuer().issue_token(account_number, Some(validity)).expect("Failed to sign token")
}

/// Builds an app from the given route configuration, fires the request at it, and returns the response
/// status and body. Middleware failures surface as service errors rather than responses, so both arms
/// are rendered through the error-envelope machinery the real server uses.
pub async fn send_request(
    req: TestRequest,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let app = App::new().app_data(web::Data::new(test_issuer())).configure(configure);
    let service = test::init_service(app).await;
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => {
            let res = res.into_parts().1;
            let status = res.status();
            let bytes = body::to_bytes(res.into_body()).await.unwrap_or_default();
            (status, String::from_utf8_lossy(&bytes).into_owned())
        },
        Err(e) => {
            let res: HttpResponse = HttpResponse::from_error(e);
            let status = res.status();
            let bytes = body::to_bytes(res.into_body()).await.unwrap_or_default();
            (status, String::from_utf8_lossy(&bytes).into_owned())
        },
    }
}
