//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification covering the account,
//! entry, and health endpoints plus the session cookie security scheme. The
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{EntryId, Error, ErrorCode, UserId, Username};
use crate::inbound::http::accounts::{CredentialsForm, ProfileResponse, UserResponse};
use crate::inbound::http::entries::{EntryForm, EntryResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the journal API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Journal backend API",
        description = "HTTP interface for session-authenticated journaling: \
                       accounts, entries, CSV export, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::profile,
        crate::inbound::http::entries::list_entries,
        crate::inbound::http::entries::add_entry,
        crate::inbound::http::entries::view_entry,
        crate::inbound::http::entries::edit_entry,
        crate::inbound::http::entries::delete_entry,
        crate::inbound::http::entries::export_entries,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserId,
        Username,
        EntryId,
        CredentialsForm,
        UserResponse,
        ProfileResponse,
        EntryForm,
        EntryResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and profile"),
        (name = "entries", description = "Journal entries and CSV export"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
