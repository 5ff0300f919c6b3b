//! Static files from the web root.
//!
//! A GET or HEAD whose path names an existing file under the root is served
//! from disk. Everything else, including a miss, continues down the
//! pipeline.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use actix_files::NamedFile;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

pub struct StaticFiles {
    root: Rc<PathBuf>,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Rc::new(root.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StaticFiles
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = StaticFilesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StaticFilesMiddleware {
            service: Rc::new(service),
            root: Rc::clone(&self.root),
        }))
    }
}

pub struct StaticFilesMiddleware<S> {
    service: Rc<S>,
    root: Rc<PathBuf>,
}

/// File path under `root` for a request path, or `None` when the path is
/// empty or tries to leave the root. Percent-encoded paths are not served.
pub fn resolve_under(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut segments = 0;
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains(['\\', '%']) {
            return None;
        }
        path.push(segment);
        segments += 1;
    }
    (segments > 0).then_some(path)
}

impl<S, B> Service<ServiceRequest> for StaticFilesMiddleware<S>
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
        let candidate = match *req.method() {
            Method::GET | Method::HEAD => resolve_under(&self.root, req.path()),
            _ => None,
        };
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if let Some(path) = candidate {
                let is_file = tokio::fs::metadata(&path)
                    .await
                    .map(|meta| meta.is_file())
                    .unwrap_or(false);
                if is_file {
                    match NamedFile::open_async(&path).await {
                        Ok(file) => {
                            debug!(path = %path.display(), "static_file_served");
                            let response = file.into_response(req.request());
                            return Ok(req.into_response(response).map_into_right_body());
                        }
                        Err(e) => warn!(path = %path.display(), error = %e, "static_file_open_failed"),
                    }
                }
            }
            Ok(service.call(req).await?.map_into_left_body())
        })
    }
}
