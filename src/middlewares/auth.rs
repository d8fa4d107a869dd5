use actix_web::body::EitherBody;
use actix_web::http::{Method, header};
use actix_web::{
    Error, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::sync::Arc;

use crate::dashboard::{LOGIN_ROUTE, SessionStore};

struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                LOGIN_ROUTE,
                "/session",
                "/swagger-ui",
                "/api-docs/openapi.json",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// Sends every request without a stored admin token to the login route.
pub struct AuthGateMiddleware {
    store: Arc<dyn SessionStore>,
}

impl AuthGateMiddleware {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGateMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            store: self.store.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    store: Arc<dyn SessionStore>,
    public_paths: PublicPaths,
}

impl<S> AuthGateService<S> {
    fn is_authenticated(&self) -> bool {
        match self.store.load() {
            Ok(session) => session.is_authenticated(),
            Err(e) => {
                log::error!("Failed to read session store: {e}");
                false
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials.
        let pass = req.method() == Method::OPTIONS
            || self.public_paths.is_public_path(req.path())
            || self.is_authenticated();

        if pass {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        log::debug!("Unauthenticated request to {}, redirecting", req.path());
        let (req, _payload) = req.into_parts();
        let response = HttpResponse::Found()
            .insert_header((header::LOCATION, LOGIN_ROUTE))
            .finish()
            .map_into_right_body();
        Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
    }
}
