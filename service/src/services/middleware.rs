//! Bearer-token gate for protected routes.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error as ActixError, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::services::security::SecurityService;

#[derive(Clone)]
pub struct AuthMiddlewareFactory {
    security: Arc<SecurityService>,
}

impl AuthMiddlewareFactory {
    pub fn new(security: Arc<SecurityService>) -> Self {
        Self { security }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            security: Arc::clone(&self.security),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    security: Arc<SecurityService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let security = Arc::clone(&self.security);

        Box::pin(async move {
            if let Some(header) = req.headers().get("authorization") {
                if let Ok(raw) = header.to_str() {
                    // Clients send the bare token; a conventional Bearer
                    // prefix is tolerated.
                    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

                    return match security.verify_token(token) {
                        Ok(claims) => {
                            // Decoded claims are available to downstream
                            // handlers via request extensions.
                            req.extensions_mut().insert(claims);
                            let res = service.call(req).await?;
                            Ok(res.map_into_left_body())
                        }
                        Err(e) => {
                            tracing::warn!("Token verification failed: {}", e);
                            Ok(req
                                .into_response(HttpResponse::Unauthorized().json(json!({
                                    "msg": "Please login first",
                                    "error": e.to_string()
                                })))
                                .map_into_right_body())
                        }
                    };
                }
            }

            Ok(req
                .into_response(
                    HttpResponse::Unauthorized().json(json!({ "msg": "Authorization failed" })),
                )
                .map_into_right_body())
        })
    }
}
