//! Request pipeline stages, outermost first:
//! `RequestTrace`, `TraceSpan`, `StructuredLogger`, `ErrorPage`, `Hsts`,
//! then (inside the application scope) `StaticFiles`, `RouteResolution`,
//! `Authentication`, `Authorization`, `CookiePolicy`, `DomainRedirect`.

pub mod authentication;
pub mod authorization;
pub mod cookie_policy;
pub mod domain_redirect;
pub mod error_page;
pub mod hsts;
pub mod request_trace;
pub mod route_resolution;
pub mod static_files;
pub mod structured_logger;
pub mod trace_span;

pub use authentication::Authentication;
pub use authorization::{AccessDecision, Authorization};
pub use cookie_policy::CookiePolicy;
pub use domain_redirect::DomainRedirect;
pub use error_page::ErrorPage;
pub use hsts::Hsts;
pub use request_trace::{RequestTrace, TraceId};
pub use route_resolution::RouteResolution;
pub use static_files::StaticFiles;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
