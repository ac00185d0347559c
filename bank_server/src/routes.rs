//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a
//! separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the store so that the endpoint tests can swap in a mock backend. Actix
//! cannot register generic handlers through the attribute macros, so the routes are wired up explicitly
//! in [`configure`], which the server and the tests share.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use bank_engine::{AccountApi, AccountManagement};
use log::*;

use crate::{
    auth::TokenIssuer,
    data_objects::{CreateAccountRequest, MessageResponse, TransferRequest},
    errors::ServerError,
    middleware::AccountAuthMiddlewareFactory,
};

/// Registers every route of the service against the given store backend.
///
/// `/account/{id}` is wrapped in the account-auth middleware; everything else is public. Each defined
/// path carries a default route so that unsupported verbs produce the uniform
/// `method not allowed <VERB>` envelope rather than a bare 404.
pub fn configure<B>(cfg: &mut web::ServiceConfig)
where B: AccountManagement + 'static {
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
    cfg.app_data(json_config)
        .service(health)
        .service(
            web::resource("/account")
                .route(web::get().to(get_accounts::<B>))
                .route(web::post().to(create_account::<B>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/account/{id}")
                .route(web::get().to(get_account_by_id::<B>))
                .route(web::delete().to(delete_account::<B>))
                .default_service(web::to(method_not_allowed))
                .wrap(AccountAuthMiddlewareFactory::<B>::new()),
        )
        .service(
            web::resource("/transfer").route(web::post().to(transfer)).default_service(web::to(method_not_allowed)),
        );
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Accounts  --------------------------------------------------

/// Route handler for listing every account.
pub async fn get_accounts<B>(api: web::Data<AccountApi<B>>) -> Result<HttpResponse, ServerError>
where B: AccountManagement {
    trace!("💻️ Received request to list accounts");
    let accounts = api.fetch_accounts().await?;
    Ok(HttpResponse::Ok().json(accounts))
}

/// Route handler for creating a new account.
///
/// The store assigns the id; the engine assigns the account number, opening balance and timestamp. An
/// access token bound to the new account number is issued and logged. It is deliberately not part of
/// the response body.
pub async fn create_account<B>(
    body: web::Json<CreateAccountRequest>,
    api: web::Data<AccountApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError>
where
    B: AccountManagement,
{
    let request = body.into_inner();
    trace!("💻️ Received request to create an account for {} {}", request.first_name, request.last_name);
    let account = api.create_account(&request.first_name, &request.last_name).await?;
    let token = signer
        .issue_token(account.number, None)
        .map_err(|e| ServerError::CouldNotSerializeAccessToken(e.to_string()))?;
    info!("💻️ Created account {} with number {}. Access token: {token}", account.id, account.number);
    Ok(HttpResponse::Ok().json(account))
}

/// Route handler for fetching a single account by id. The auth middleware has already established that
/// the caller's token is bound to this account, and that the id parses and resolves.
pub async fn get_account_by_id<B>(
    path: web::Path<i64>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: AccountManagement,
{
    let id = path.into_inner();
    trace!("💻️ Received request for account [{id}]");
    let account = api
        .account_by_id(id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Account id:{id} not found")))?;
    Ok(HttpResponse::Ok().json(account))
}

/// Route handler for deleting an account by id. Protected by the same middleware as the fetch route.
pub async fn delete_account<B>(path: web::Path<i64>, api: web::Data<AccountApi<B>>) -> Result<HttpResponse, ServerError>
where B: AccountManagement {
    let id = path.into_inner();
    trace!("💻️ Received request to delete account [{id}]");
    api.delete_account(id).await?;
    info!("💻️ Deleted account [{id}]");
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("Account with id {id} deleted"))))
}

// ----------------------------------------------   Transfer  --------------------------------------------------

/// Route handler for the transfer endpoint.
///
/// Transfers are not implemented. The request body is validated for shape and echoed back without any
/// balance changing anywhere.
pub async fn transfer(body: web::Json<TransferRequest>) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    trace!("💻️ Received transfer request: {request:?}");
    Ok(HttpResponse::Ok().json(request))
}

// ----------------------------------------------   Fallback  --------------------------------------------------

/// Default route for defined paths. The 400 status (rather than 405) matches the service's documented
/// behavior.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    Err(ServerError::MethodNotAllowed(req.method().to_string()))
}
