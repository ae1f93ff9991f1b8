//! Journal entry handlers: listing, CRUD, and CSV export.

use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, Entry, EntryId, entries_to_csv,
};

use super::auth::acting_user;
use super::error::ApiResult;
use super::forms::validate_entry_form;
use super::session::SessionContext;
use super::state::HttpState;

/// Payload for the add and edit entry forms.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EntryForm {
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub content: String,
    /// Optional comma-separated tags.
    pub tags: Option<String>,
}

/// Public view of a journal entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub content: String,
    /// Raw comma-separated tags string as stored.
    pub tags: String,
    /// Parsed tag tokens, trimmed and de-blanked.
    pub tag_list: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent mutation.
    pub updated_at: DateTime<Utc>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        let tag_list = entry.tag_list().iter().map(|tag| (*tag).to_owned()).collect();
        Self {
            id: entry.id(),
            title: entry.title().to_owned(),
            content: entry.content().to_owned(),
            tags: entry.tags().to_owned(),
            tag_list,
            created_at: entry.created_at(),
            updated_at: entry.updated_at(),
        }
    }
}

/// List the logged-in user's entries, newest first.
#[utoipa::path(
    get,
    path = "/",
    tag = "entries",
    responses(
        (status = 200, description = "Entries owned by the user, newest first", body = [EntryResponse]),
        (status = 401, description = "Login required"),
    ),
    security(("session" = []))
)]
#[get("/")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let entries = state.journal().list_entries(user.id()).await?;
    let body: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Create a new entry.
#[utoipa::path(
    post,
    path = "/add",
    tag = "entries",
    request_body = EntryForm,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Login required"),
    ),
    security(("session" = []))
)]
#[post("/add")]
pub async fn add_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Json<EntryForm>,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let draft = validate_entry_form(&form.title, &form.content, form.tags.as_deref())?;
    let entry = state.journal().create_entry(user.id(), draft).await?;
    Ok(HttpResponse::Created().json(EntryResponse::from(entry)))
}

/// View a single entry.
#[utoipa::path(
    get,
    path = "/entry/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "The requested entry", body = EntryResponse),
        (status = 401, description = "Login required"),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "No such entry"),
    ),
    security(("session" = []))
)]
#[get("/entry/{id}")]
pub async fn view_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let entry = state
        .journal()
        .view_entry(user.id(), EntryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(EntryResponse::from(entry)))
}

/// Overwrite an entry's mutable fields.
#[utoipa::path(
    post,
    path = "/edit/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry identifier")),
    request_body = EntryForm,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "No such entry"),
    ),
    security(("session" = []))
)]
#[post("/edit/{id}")]
pub async fn edit_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    form: web::Json<EntryForm>,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let draft = validate_entry_form(&form.title, &form.content, form.tags.as_deref())?;
    let entry = state
        .journal()
        .edit_entry(user.id(), EntryId::new(path.into_inner()), draft)
        .await?;
    Ok(HttpResponse::Ok().json(EntryResponse::from(entry)))
}

/// Delete an entry.
#[utoipa::path(
    post,
    path = "/delete/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "No such entry"),
    ),
    security(("session" = []))
)]
#[post("/delete/{id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    state
        .journal()
        .delete_entry(user.id(), EntryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Download the logged-in user's entries as a CSV attachment.
#[utoipa::path(
    get,
    path = "/export",
    tag = "entries",
    responses(
        (status = 200, description = "CSV export of the user's entries", content_type = "text/csv"),
        (status = 401, description = "Login required"),
    ),
    security(("session" = []))
)]
#[get("/export")]
pub async fn export_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let entries = state.journal().list_entries(user.id()).await?;
    let csv = entries_to_csv(&entries)?;
    Ok(HttpResponse::Ok()
        .content_type(EXPORT_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(EXPORT_FILE_NAME))
        .body(csv))
}

#[cfg(test)]
mod tests {
    //! Endpoint coverage for the entry routes.
    use super::*;
    use crate::inbound::http::accounts::{login, register};
    use crate::inbound::http::test_utils::{test_backend, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn entry_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .service(register)
            .service(login)
            .service(list_entries)
            .service(add_entry)
            .service(view_entry)
            .service(edit_entry)
            .service(delete_entry)
            .service(export_entries)
    }

    async fn signed_in_user(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
    ) -> Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({"username": username, "password": "secret123"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({"username": username, "password": "secret123"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn create_entry(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &Cookie<'static>,
        title: &str,
    ) -> i64 {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/add")
                .cookie(cookie.clone())
                .set_json(json!({"title": title, "content": "Went hiking", "tags": "outdoors, hiking"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        body.get("id").and_then(Value::as_i64).expect("entry id")
    }

    #[actix_web::test]
    async fn every_entry_route_requires_a_session() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;

        for request in [
            test::TestRequest::get().uri("/"),
            test::TestRequest::post()
                .uri("/add")
                .set_json(json!({"title": "t", "content": "c"})),
            test::TestRequest::get().uri("/entry/1"),
            test::TestRequest::post()
                .uri("/edit/1")
                .set_json(json!({"title": "t", "content": "c"})),
            test::TestRequest::post().uri("/delete/1"),
            test::TestRequest::get().uri("/export"),
        ] {
            let res = test::call_service(&app, request.to_request()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn add_then_view_round_trips_the_entry() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;
        let id = create_entry(&app, &cookie, "Day 1").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/entry/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("title").and_then(Value::as_str), Some("Day 1"));
        assert_eq!(
            body.get("tagList").and_then(Value::as_array).map(Vec::len),
            Some(2)
        );
        assert!(
            body.get("createdAt")
                .and_then(Value::as_str)
                .is_some_and(|ts| ts.starts_with("2026-03-01T09:00:00"))
        );
    }

    #[actix_web::test]
    async fn invalid_entry_form_is_rejected() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add")
                .cookie(cookie)
                .set_json(json!({"title": "", "content": ""}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn list_is_newest_first() {
        let backend = test_backend();
        let clock = backend.clock.clone();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;

        create_entry(&app, &cookie, "First").await;
        clock.advance(chrono::Duration::minutes(5));
        create_entry(&app, &cookie, "Second").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let titles: Vec<&str> = body
            .as_array()
            .expect("entry array")
            .iter()
            .filter_map(|entry| entry.get("title").and_then(Value::as_str))
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[actix_web::test]
    async fn foreign_entries_are_forbidden_with_an_action_message() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let alice = signed_in_user(&app, "alice").await;
        let bob = signed_in_user(&app, "bob").await;
        let id = create_entry(&app, &alice, "Private").await;

        let attempts = [
            (test::TestRequest::get().uri(&format!("/entry/{id}")), "view"),
            (
                test::TestRequest::post()
                    .uri(&format!("/edit/{id}"))
                    .set_json(json!({"title": "Hacked", "content": "Bob was here"})),
                "edit",
            ),
            (
                test::TestRequest::post().uri(&format!("/delete/{id}")),
                "delete",
            ),
        ];
        for (request, action) in attempts {
            let res = test::call_service(&app, request.cookie(bob.clone()).to_request()).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(
                body.get("message").and_then(Value::as_str),
                Some(format!("You don't have permission to {action} this entry.").as_str())
            );
        }
    }

    #[actix_web::test]
    async fn missing_entries_are_not_found() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/entry/42")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Entry not found.")
        );
    }

    #[actix_web::test]
    async fn edit_updates_fields_and_timestamp() {
        let backend = test_backend();
        let clock = backend.clock.clone();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;
        let id = create_entry(&app, &cookie, "Day 1").await;

        clock.advance(chrono::Duration::hours(2));
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/edit/{id}"))
                .cookie(cookie)
                .set_json(json!({"title": "Day 1", "content": "Saw a deer", "tags": "wildlife"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("content").and_then(Value::as_str), Some("Saw a deer"));
        let created = body.get("createdAt").and_then(Value::as_str).expect("createdAt");
        let updated = body.get("updatedAt").and_then(Value::as_str).expect("updatedAt");
        assert!(updated > created);
    }

    #[actix_web::test]
    async fn delete_then_view_is_not_found() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let cookie = signed_in_user(&app, "alice").await;
        let id = create_entry(&app, &cookie, "Day 1").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/delete/{id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/entry/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn export_streams_only_the_users_entries_as_csv() {
        let backend = test_backend();
        let app = test::init_service(entry_app(backend.state)).await;
        let alice = signed_in_user(&app, "alice").await;
        let bob = signed_in_user(&app, "bob").await;
        create_entry(&app, &alice, "Mine").await;
        create_entry(&app, &bob, "Theirs").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/export")
                .cookie(alice)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers().clone();
        assert_eq!(
            headers
                .get(actix_web::http::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/csv")
        );
        let disposition = headers
            .get(actix_web::http::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("content disposition");
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("journal_entries.csv"));

        let body = test::read_body(res).await;
        let text = String::from_utf8(body.to_vec()).expect("utf8 csv");
        assert!(text.starts_with("ID,Title,Content,Tags,Created At,Updated At"));
        assert!(text.contains("Mine"));
        assert!(!text.contains("Theirs"));
    }
}
