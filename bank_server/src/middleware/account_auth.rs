//! Account authorization middleware for the protected `/account/{id}` routes.
//!
//! The middleware gates the wrapped handlers behind token validation plus a second authorization check
//! against the account store: the bearer's token must have been issued for the very account the path
//! refers to. Every failure mode (missing or invalid token, unparsable id, unknown account, number
//! mismatch) short-circuits with a 403 response carrying the `{"error": ...}` envelope, and the wrapped
//! handler never runs.
//!
//! Nothing is cached: every request re-validates the signature and re-fetches the account. That trades
//! latency for simplicity, which is acceptable at this service's size.

use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    web,
    Error,
};
use bank_engine::{AccountApi, AccountManagement};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::debug;

use crate::{
    auth::{JwtClaims, TokenIssuer, AUTH_TOKEN_HEADER},
    errors::{AuthError, ServerError},
};

pub struct AccountAuthMiddlewareFactory<B> {
    _store: PhantomData<fn() -> B>,
}

impl<B> AccountAuthMiddlewareFactory<B> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _store: PhantomData }
    }
}

impl<S, B, Body> Transform<S, ServiceRequest> for AccountAuthMiddlewareFactory<B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    B: AccountManagement + 'static,
    Body: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<Body>;
    type Transform = AccountAuthMiddlewareService<S, B>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AccountAuthMiddlewareService { service: Rc::new(service), _store: PhantomData })
    }
}

pub struct AccountAuthMiddlewareService<S, B> {
    service: Rc<S>,
    _store: PhantomData<fn() -> B>,
}

impl<S, B, Body> Service<ServiceRequest> for AccountAuthMiddlewareService<S, B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    B: AccountManagement + 'static,
    Body: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<Body>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let issuer = req.app_data::<web::Data<TokenIssuer>>().cloned().ok_or_else(|| {
                log::warn!("No token issuer found in app data");
                ErrorInternalServerError("No token issuer found in app data")
            })?;
            let api = req.app_data::<web::Data<AccountApi<B>>>().cloned().ok_or_else(|| {
                log::warn!("No account api found in app data");
                ErrorInternalServerError("No account api found in app data")
            })?;
            let claims = claims_from_request(&req, issuer.get_ref()).map_err(ServerError::AuthenticationError)?;
            let id = account_id_from_path(&req).map_err(ServerError::AuthenticationError)?;
            let account = api
                .account_by_id(id)
                .await
                .map_err(|e| {
                    debug!("🔐️ Store lookup failed while authorizing account {id}. {e}");
                    ServerError::AuthenticationError(AuthError::AccountNotFound)
                })?
                .ok_or(ServerError::AuthenticationError(AuthError::AccountNotFound))?;
            if account.number != claims.account_number {
                debug!("🔐️ Token for account number {} presented against account {id}", claims.account_number);
                return Err(ServerError::AuthenticationError(AuthError::TokenMismatch).into());
            }
            service.call(req).await
        })
    }
}

fn claims_from_request(req: &ServiceRequest, issuer: &TokenIssuer) -> Result<JwtClaims, AuthError> {
    let header = req.headers().get(AUTH_TOKEN_HEADER).ok_or(AuthError::MissingToken)?;
    let token = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    issuer.validate_token(token)
}

fn account_id_from_path(req: &ServiceRequest) -> Result<i64, AuthError> {
    req.match_info().query("id").parse::<i64>().map_err(|e| AuthError::InvalidId(e.to_string()))
}
