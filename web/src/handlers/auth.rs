//! Registration, login, logout, and current-user handlers.

use crate::error::AppError;
use crate::extractors::{AppJson, SessionToken, SESSION_COOKIE};
use crate::handlers::require_user;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::AppendHeaders,
    Json,
};
use hostly_concierge::Concierge;
use hostly_core::password::{hash_password, verify_password};
use hostly_core::session::SESSION_TTL_HOURS;
use hostly_core::user::validate_email;
use hostly_core::{
    BookingRepository, Error, EventPublisher, FavoriteRepository, NewUser, PropertyRepository,
    Role, Session, SessionId, SessionStore, User, UserId, UserRepository,
};
use serde::{Deserialize, Serialize};

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Clear-text password; hashed before storage.
    #[serde(default)]
    pub password: String,
    /// Marketplace role, defaults to traveler.
    pub role: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Clear-text password.
    #[serde(default)]
    pub password: String,
}

/// The slice of a user echoed back on register/login.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Marketplace role.
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Body wrapping a session user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: SessionUser,
}

/// Body for `GET /auth/me`: `user` is null when unauthenticated.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// The current user, if any.
    pub user: Option<User>,
}

/// Body for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true.
    pub ok: bool,
}

type SetCookie = AppendHeaders<[(axum::http::HeaderName, String); 1]>;

fn set_session_cookie(session_id: SessionId) -> SetCookie {
    AppendHeaders([(
        SET_COOKIE,
        format!(
            "{SESSION_COOKIE}={session_id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            SESSION_TTL_HOURS * 3600
        ),
    )])
}

fn clear_session_cookie() -> SetCookie {
    AppendHeaders([(
        SET_COOKIE,
        format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0"),
    )])
}

async fn open_session<S: SessionStore>(
    sessions: &S,
    user_id: UserId,
) -> Result<Session, AppError> {
    let session = Session::start(user_id, chrono::Utc::now());
    sessions.create_session(&session).await?;
    Ok(session)
}

/// `POST /auth/register`
pub async fn register<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, SetCookie, Json<AuthResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request("Missing required fields"));
    }
    validate_email(&request.email)?;
    let role = match request.role.as_deref() {
        None | Some("") => Role::Traveler,
        Some(raw) => Role::parse(raw)?,
    };

    if state.users.email_exists(&request.email).await? {
        return Err(AppError::conflict("Email already exists"));
    }

    let user = state
        .users
        .create_user(NewUser {
            name: request.name,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            role,
        })
        .await?;

    let session = open_session(&state.sessions, user.id).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        set_session_cookie(session.id),
        Json(AuthResponse {
            user: SessionUser::from(&user),
        }),
    ))
}

/// `POST /auth/login`
pub async fn login<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<(SetCookie, Json<AuthResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request("Missing credentials"));
    }

    let user = match state.users.get_user_by_email(&request.email).await {
        Ok(user) => user,
        Err(Error::NotFound { .. }) => return Err(Error::InvalidCredentials.into()),
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&request.password, &user.password_hash) {
        return Err(Error::InvalidCredentials.into());
    }

    let session = open_session(&state.sessions, user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        set_session_cookie(session.id),
        Json(AuthResponse {
            user: SessionUser::from(&user),
        }),
    ))
}

/// `POST /auth/logout`
pub async fn logout<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
) -> Result<(SetCookie, Json<LogoutResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    if let Some(session_id) = token.0 {
        state.sessions.delete_session(session_id).await?;
    }
    Ok((clear_session_cookie(), Json(LogoutResponse { ok: true })))
}

/// `GET /auth/me`
///
/// Never a 401: an anonymous or stale session answers `{ "user": null }` so
/// the frontend can render the logged-out state without special-casing.
pub async fn me<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
) -> Result<Json<MeResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    match require_user(&state.users, &state.sessions, token).await {
        Ok(user) => Ok(Json(MeResponse { user: Some(user) })),
        Err(err) if err.status() == StatusCode::UNAUTHORIZED => {
            Ok(Json(MeResponse { user: None }))
        }
        Err(err) => Err(err),
    }
}
