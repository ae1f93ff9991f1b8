//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{DefaultAccountService, DefaultJournalService};
use crate::inbound::http::accounts::{login, logout, profile, register};
use crate::inbound::http::entries::{
    add_entry, delete_entry, edit_entry, export_entries, list_entries, view_entry,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestId;
use crate::outbound::persistence::{
    DieselEntryRepository, DieselUserRepository, run_migrations,
};
use crate::outbound::security::Argon2PasswordHasher;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // The journal scope matches every remaining path, so probes and docs are
    // registered ahead of it and stay outside the session middleware.
    let journal = web::scope("")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(profile)
        .service(list_entries)
        .service(add_entry)
        .service(view_entry)
        .service(edit_entry)
        .service(delete_entry)
        .service(export_entries);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestId)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(journal)
}

/// Construct an Actix HTTP server over the configured database.
///
/// Builds the pool, applies pending migrations, wires the service stack, and
/// binds the listener. Readiness is marked only after all of that succeeds.
///
/// # Errors
/// Propagates [`std::io::Error`] when the database cannot be opened, a
/// migration fails, or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let pool = config.build_pool().map_err(std::io::Error::other)?;
    let mut conn = pool.get().map_err(std::io::Error::other)?;
    run_migrations(&mut conn).map_err(std::io::Error::other)?;
    drop(conn);

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let entries = Arc::new(DieselEntryRepository::new(pool));
    let accounts = DefaultAccountService::new(
        users,
        entries.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let journal = DefaultJournalService::new(entries, Arc::new(DefaultClock));
    let http_state = web::Data::new(HttpState::new(Arc::new(accounts), Arc::new(journal)));

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        pool_config: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
