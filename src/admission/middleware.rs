use super::*;
use crate::*;
use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::body::EitherBody;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::dev::forward_ready;
use actix_web::http::header::HeaderMap;
use actix_web::http::header::HeaderName;
use actix_web::http::header::HeaderValue;
use futures::future::LocalBoxFuture;
use std::future::Ready;
use std::future::ready;
use std::sync::Arc;

/// Middleware gating `/api` requests on the caller's token bucket.
///
/// Admitted and rejected responses both carry the quota headers. Rejections
/// short-circuit with 429 before reaching the handler. Paths outside the API
/// namespace, and the health probe, pass through untouched.
#[derive(Clone)]
pub struct Admission {
    buckets: Arc<Buckets>,
}

impl Admission {
    pub fn new(buckets: Arc<Buckets>) -> Self {
        Self { buckets }
    }
    pub fn gated(path: &str) -> bool {
        path != HEALTH_PATH
            && path
                .strip_prefix(API_PREFIX)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
    fn stamp(headers: &mut HeaderMap, verdict: &Verdict) {
        for (name, value) in verdict.headers() {
            headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Admission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdmissionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdmissionService {
            service,
            buckets: self.buckets.clone(),
        }))
    }
}

pub struct AdmissionService<S> {
    service: S,
    buckets: Arc<Buckets>,
}

impl<S, B> Service<ServiceRequest> for AdmissionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !Admission::gated(req.path()) {
            let future = self.service.call(req);
            return Box::pin(async move { Ok(future.await?.map_into_left_body()) });
        }
        let key = ClientKey::from(&req);
        let verdict = self.buckets.check(key.as_str());
        match verdict {
            Verdict::Allow(_) => {
                let future = self.service.call(req);
                Box::pin(async move {
                    let mut response = future.await?;
                    Admission::stamp(response.headers_mut(), &verdict);
                    Ok(response.map_into_left_body())
                })
            }
            Verdict::Reject { retry, .. } => {
                log::debug!("[admission] rejected {} {} retry in {}s", key, req.path(), retry);
                let mut response = HttpResponse::TooManyRequests().body("Too Many Requests");
                Admission::stamp(response.headers_mut(), &verdict);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::test::call_service;
    use actix_web::test::init_service;
    use actix_web::test::read_body;
    use actix_web::web;

    fn tiny() -> Arc<Buckets> {
        Arc::new(Buckets::new(AdmissionConfig {
            capacity: 2.0,
            ..AdmissionConfig::default()
        }))
    }

    #[test]
    fn gating_covers_api_namespace_only() {
        assert!(Admission::gated("/api"));
        assert!(Admission::gated("/api/stream"));
        assert!(!Admission::gated("/api/health"));
        assert!(!Admission::gated("/apis"));
        assert!(!Admission::gated("/"));
    }

    #[actix_web::test]
    async fn throttles_with_headers() {
        let app = init_service(
            App::new()
                .wrap(Admission::new(tiny()))
                .route("/api/ping", web::get().to(|| async { "pong" })),
        )
        .await;
        let request = || {
            TestRequest::get()
                .uri("/api/ping")
                .insert_header((ClientKey::FORWARDED_FOR, "198.51.100.4"))
                .to_request()
        };
        let first = call_service(&app, request()).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get(Verdict::LIMIT).unwrap(), "2");
        assert_eq!(first.headers().get(Verdict::REMAINING).unwrap(), "1");
        assert!(first.headers().get(Verdict::RESET).is_some());
        assert!(first.headers().get(Verdict::RETRY_AFTER).is_none());
        let second = call_service(&app, request()).await;
        assert_eq!(second.status(), StatusCode::OK);
        let third = call_service(&app, request()).await;
        assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(third.headers().get(Verdict::REMAINING).unwrap(), "0");
        assert_eq!(third.headers().get(Verdict::RETRY_AFTER).unwrap(), "1");
        assert_eq!(read_body(third).await, "Too Many Requests");
    }

    #[actix_web::test]
    async fn health_and_outside_paths_bypass() {
        let buckets = tiny();
        let app = init_service(
            App::new()
                .wrap(Admission::new(buckets.clone()))
                .route("/api/health", web::get().to(|| async { "ok" }))
                .route("/index", web::get().to(|| async { "home" })),
        )
        .await;
        for uri in ["/api/health", "/index"].into_iter().cycle().take(10) {
            let response =
                call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(Verdict::LIMIT).is_none());
        }
        assert!(buckets.is_empty());
    }
}
