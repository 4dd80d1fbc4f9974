//! Rate limiting middleware for wall writes.
//!
//! Only mutating requests are throttled; reads always pass through.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
};
use wall_core::ports::RateLimiter;
use wall_shared::ErrorResponse;

/// Rate limiting middleware factory. Without a limiter it is a pass-through.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let limiter = match &self.limiter {
            Some(limiter) if is_write(req.method()) => limiter,
            _ => return self.pass(req),
        };

        let key = client_key(&req);

        match limiter.check(&key) {
            Ok(result) if !result.allowed => {
                let retry_after = result.reset_after.as_secs().max(1);
                tracing::warn!(client = %key, retry_after, "Rate limit exceeded");

                let response = HttpResponse::TooManyRequests()
                    .insert_header(("Retry-After", retry_after.to_string()))
                    .json(ErrorResponse::too_many_requests(retry_after));

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
            Ok(_) => self.pass(req),
            Err(e) => {
                // Fail open: a broken limiter must not take the wall down.
                tracing::error!(error = %e, "Rate limiter error, failing open");
                self.pass(req)
            }
        }
    }
}

type PassFuture<B> = Pin<Box<dyn Future<Output = Result<ServiceResponse<EitherBody<B>>, Error>>>>;

impl<S, B> RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn pass(&self, req: ServiceRequest) -> PassFuture<B> {
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Throttling key: the IP of the socket peer. Forwarding headers are
/// client-controlled and ignored, so behind a reverse proxy every client
/// shares the proxy's budget.
fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_write(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test, web};
    use wall_core::ports::{RateLimitError, RateLimitResult};

    /// Allows the first `budget` checks, then refuses.
    struct CountingLimiter {
        budget: u32,
        seen: AtomicU32,
    }

    impl RateLimiter for CountingLimiter {
        fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            let seen = self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(RateLimitResult {
                allowed: seen < self.budget,
                reset_after: Duration::from_secs(30),
            })
        }
    }

    #[actix_web::test]
    async fn test_writes_are_throttled_reads_are_not() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(CountingLimiter {
            budget: 1,
            seen: AtomicU32::new(0),
        });
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(limiter)))
                .route("/w", web::post().to(|| async { "ok" }))
                .route("/w", web::get().to(|| async { "ok" })),
        )
        .await;

        let first = test::call_service(&app, test::TestRequest::post().uri("/w").to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(&app, test::TestRequest::post().uri("/w").to_request()).await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            second.headers().get("Retry-After").unwrap().to_str().unwrap(),
            "30"
        );

        let read = test::call_service(&app, test::TestRequest::get().uri("/w").to_request()).await;
        assert_eq!(read.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_key_ignores_forwarding_headers() {
        let peer = "10.0.0.7:40312".parse().unwrap();

        for spoofed in ["1.1.1.1", "2.2.2.2"] {
            let req = test::TestRequest::post()
                .uri("/w")
                .peer_addr(peer)
                .insert_header(("x-forwarded-for", spoofed))
                .insert_header(("forwarded", format!("for={spoofed}")))
                .to_srv_request();
            assert_eq!(client_key(&req), "10.0.0.7");
        }

        let req = test::TestRequest::post().uri("/w").to_srv_request();
        assert_eq!(client_key(&req), "unknown");
    }

    #[actix_web::test]
    async fn test_without_limiter_everything_passes() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(None))
                .route("/w", web::post().to(|| async { "ok" })),
        )
        .await;

        for _ in 0..3 {
            let res = test::call_service(&app, test::TestRequest::post().uri("/w").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }
}
