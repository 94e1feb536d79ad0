use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    web, Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::config::AppConfig;
use crate::services::auth_service::{self, Session};

/// Materializes the session from a presented bearer token into the request
/// extensions. Never rejects a request by itself: an absent or invalid token
/// simply means no session, and each workflow decides what that implies.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService { service }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = req
            .app_data::<web::Data<AppConfig>>()
            .and_then(|config| {
                let token = bearer_token(req.headers())?;
                match auth_service::verify_session_token(config.get_ref(), token) {
                    Ok(claims) => Some(claims),
                    Err(e) => {
                        log::debug!("Ignoring invalid session token: {}", e);
                        None
                    }
                }
            })
            .map(|claims| auth_service::materialize_session(&claims));

        if let Some(session) = session {
            req.extensions_mut().insert(session);
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

/// The session materialized for this request, if any.
pub fn current_session(req: &HttpRequest) -> Option<Session> {
    req.extensions().get::<Session>().cloned()
}
