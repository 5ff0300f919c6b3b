//! Application assembly.
//!
//! Effective stage order for a request:
//!
//! 1. `RequestTrace`, `TraceSpan`, `StructuredLogger`
//! 2. `ErrorPage`, `Hsts` (production only)
//! 3. `StaticFiles` (existing files under the web root; misses fall through)
//! 4. `RouteResolution`
//! 5. `Authentication`
//! 6. `Authorization`
//! 7. `CookiePolicy`
//! 8. `DomainRedirect` (may short-circuit)
//! 9. route dispatch
//!
//! actix applies `.wrap()` last-outermost, hence the reversed calls below.

use actix_web::body::MessageBody;
use actix_web::dev::{fn_service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Condition;
use actix_web::{web, App, Error};

use crate::config::AppConfig;
use crate::middleware::{
    Authentication, Authorization, CookiePolicy, DomainRedirect, ErrorPage, Hsts, RequestTrace,
    RouteResolution, StaticFiles, StructuredLogger, TraceSpan,
};
use crate::routing::dispatch::dispatch;
use crate::state::app_state::AppState;

pub fn build_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let production = !config.env.is_development();

    App::new()
        .app_data(state)
        .wrap(Condition::new(production, Hsts))
        .wrap(Condition::new(production, ErrorPage))
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
        .service(
            web::scope("")
                .wrap(DomainRedirect::new(config.redirect.clone()))
                .wrap(CookiePolicy::new(config.cookie_policy))
                .wrap(Authorization)
                .wrap(Authentication)
                .wrap(RouteResolution)
                .wrap(StaticFiles::new(config.wwwroot.clone()))
                .default_service(fn_service(dispatch)),
        )
}
