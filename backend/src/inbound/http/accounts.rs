//! Account handlers: registration, login, logout, and profile.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, UserId, UserProfile, Username};

use super::auth::acting_user;
use super::error::ApiResult;
use super::forms::validate_credentials_form;
use super::session::SessionContext;
use super::state::HttpState;

/// Registration and login payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsForm {
    /// Desired or registered username.
    pub username: String,
    /// Plaintext password; hashed before storage, never logged.
    pub password: String,
}

/// Public view of a user, excluding the stored verifier.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            username: user.username().clone(),
        }
    }
}

/// Profile view of the logged-in user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// Number of journal entries owned by the user.
    pub entry_count: u64,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.user.id(),
            username: value.user.username().clone(),
            entry_count: value.entry_count,
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    tag = "accounts",
    request_body = CredentialsForm,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username already taken"),
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Json<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = validate_credentials_form(&form.username, &form.password)?;
    let user = state.accounts().register(&credentials).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Log in and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    tag = "accounts",
    request_body = CredentialsForm,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Invalid username or password"),
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Json<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = validate_credentials_form(&form.username, &form.password)?;
    let user = state.accounts().authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// End the current session.
///
/// Idempotent: logging out without a session is still a success.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "accounts",
    responses((status = 204, description = "Session ended")),
    security(("session" = []))
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Fetch the logged-in user's profile.
#[utoipa::path(
    get,
    path = "/profile",
    tag = "accounts",
    responses(
        (status = 200, description = "Profile of the logged-in user", body = ProfileResponse),
        (status = 401, description = "Login required"),
    ),
    security(("session" = []))
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = acting_user(&state, &session).await?;
    let profile = state.accounts().profile(user.id()).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests {
    //! Endpoint coverage for the account routes.
    use super::*;
    use crate::inbound::http::test_utils::{test_backend, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn account_app(
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
            .service(logout)
            .service(profile)
    }

    async fn register_alice(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({"username": "alice", "password": "secret123"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    async fn login_alice(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({"username": "alice", "password": "secret123"}))
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

    // `use actix_web::test` shadows the built-in `#[test]` attribute, so
    // spell out the prelude path for this synchronous test.
    #[::core::prelude::v1::test]
    fn profile_response_maps_user_and_entry_count() {
        let user = User::from_parts(
            UserId::new(7),
            Username::new("alice").expect("valid username"),
            "$argon2id$stub".to_owned(),
        );
        let response = ProfileResponse::from(UserProfile {
            user,
            entry_count: 3,
        });
        assert_eq!(response.id, UserId::new(7));
        assert_eq!(response.username.as_str(), "alice");
        assert_eq!(response.entry_count, 3);
    }

    #[actix_web::test]
    async fn register_returns_created_user_without_password() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({"username": "alice", "password": "secret123"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("username").and_then(Value::as_str), Some("alice"));
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn duplicate_username_conflicts() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;
        register_alice(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({"username": "alice", "password": "other"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Username already taken. Try another.")
        );
        assert_eq!(backend.users.len(), 1);
    }

    #[actix_web::test]
    async fn invalid_registration_reports_violations() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({"username": "ab", "password": ""}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        let violations = body
            .get("details")
            .and_then(|details| details.get("violations"))
            .and_then(Value::as_array)
            .expect("violation details");
        assert_eq!(violations.len(), 2);
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;
        register_alice(&app).await;
        let cookie = login_alice(&app).await;
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized_with_uniform_message() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;
        register_alice(&app).await;

        for payload in [
            json!({"username": "alice", "password": "wrong"}),
            json!({"username": "nobody", "password": "secret123"}),
        ] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/login")
                    .set_json(payload)
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(
                body.get("message").and_then(Value::as_str),
                Some("Invalid username or password.")
            );
        }
    }

    #[actix_web::test]
    async fn profile_requires_a_session() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/profile").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_reports_the_entry_count() {
        let backend = test_backend();
        let entries = backend.entries.clone();
        let app = test::init_service(account_app(backend.state)).await;
        register_alice(&app).await;
        let cookie = login_alice(&app).await;
        entries.seed_entry(crate::domain::UserId::new(1), "Day 1", "Went hiking", "");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("username").and_then(Value::as_str), Some("alice"));
        assert_eq!(body.get("entryCount").and_then(Value::as_u64), Some(1));
    }

    #[actix_web::test]
    async fn logout_is_idempotent_and_clears_the_session() {
        let backend = test_backend();
        let app = test::init_service(account_app(backend.state)).await;
        register_alice(&app).await;
        let cookie = login_alice(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        // Without a session cookie, logout still succeeds.
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
