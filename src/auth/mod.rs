/*!
 * # Authentication and Authorization Module
 *
 * Users sign up and log in with an exact email + password + profile match. No
 * session or token is issued: callers name the acting user in the
 * `x-actor-email` header and every protected route re-loads that user and
 * checks the permissions granted to the stored profile.
 */

use axum::{
    extract::{DefaultBodyLimit, FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::entities::user::Profile;
use crate::errors::ServiceError;
use crate::handlers::JsonBody;
use crate::models::{Credentials, User};
use crate::repositories::UserRepository;

mod permissions;
mod rbac;

pub use permissions::consts;
pub use rbac::{permissions_for, profile_has_permission, PROFILE_PERMISSIONS};

/// Header naming the user on whose behalf a call is made
pub const ACTOR_HEADER: &str = "x-actor-email";

const INVALID_CREDENTIALS: &str = "Incorrect email or password";

/// The resolved acting user, inserted into request extensions by [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub email: String,
    pub profile: Profile,
}

impl Actor {
    pub fn has_permission(&self, permission: &str) -> bool {
        profile_has_permission(self.profile, permission)
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or_else(|| ServiceError::AuthError("Missing acting user".to_string()))
    }
}

/// Signup, login and actor resolution over the user table
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Creates a user. A taken email is a `Conflict` and leaves the existing user untouched.
    #[instrument(skip(self, credentials), fields(email = %credentials.email, profile = %credentials.profile))]
    pub async fn signup(&self, credentials: Credentials) -> Result<User, ServiceError> {
        credentials.validate()?;

        if self.users.find_by_email(&credentials.email).await?.is_some() {
            warn!("Signup rejected: email already registered");
            return Err(ServiceError::Conflict(format!(
                "Email {} is already registered",
                credentials.email
            )));
        }

        let user = self
            .users
            .insert(&credentials.email, &credentials.password, credentials.profile)
            .await?;

        counter!("stockroom.auth.signups", 1);
        info!("User registered");
        Ok(user.into())
    }

    /// Returns the user only when email, password and profile all match.
    #[instrument(skip(self, credentials), fields(email = %credentials.email, profile = %credentials.profile))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, ServiceError> {
        let user = self
            .users
            .find_by_credentials(&credentials.email, &credentials.password, credentials.profile)
            .await?;

        match user {
            Some(user) => {
                counter!("stockroom.auth.logins", 1, "outcome" => "success");
                info!("Login succeeded");
                Ok(user.into())
            }
            None => {
                counter!("stockroom.auth.logins", 1, "outcome" => "failure");
                warn!("Login failed");
                Err(ServiceError::AuthError(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    /// Loads the stored user named by the actor header.
    pub async fn resolve_actor(&self, email: &str) -> Result<Actor, ServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::AuthError("Unknown acting user".to_string()))?;

        Ok(Actor {
            email: user.email,
            profile: user.profile,
        })
    }
}

fn actor_email(headers: &HeaderMap) -> Result<String, ServiceError> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ServiceError::AuthError(format!("Missing {} header", ACTOR_HEADER)))
}

/// Resolves the acting user and stores it in the request extensions.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return ServiceError::InternalError("Authentication service not available".into())
                .into_response();
        }
    };

    let actor = match actor_email(request.headers()) {
        Ok(email) => auth_service.resolve_actor(&email).await,
        Err(e) => Err(e),
    };

    match actor {
        Ok(actor) => {
            debug!(actor = %actor.email, profile = %actor.profile, "Actor resolved");
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Rejects the request with 403 unless the actor's profile grants `required_permission`.
pub async fn permission_middleware(
    State(required_permission): State<String>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let actor = request
        .extensions()
        .get::<Actor>()
        .cloned()
        .ok_or_else(|| ServiceError::AuthError("Missing acting user".to_string()))?;

    if !actor.has_permission(&required_permission) {
        counter!("stockroom.auth.forbidden", 1, "permission" => required_permission.clone());
        warn!(actor = %actor.email, profile = %actor.profile, permission = %required_permission, "Permission denied");
        return Err(ServiceError::Forbidden(format!(
            "Profile {} is not allowed to perform {}",
            actor.profile, required_permission
        )));
    }

    Ok(next.run(request).await)
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
    fn with_permission(self, permission: &str) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }

    fn with_permission(self, permission: &str) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            permission.to_string(),
            permission_middleware,
        ))
        .with_auth()
    }
}

/// Authentication routes
pub fn auth_routes() -> axum::Router<Arc<AuthService>> {
    axum::Router::new()
        .route("/signup", axum::routing::post(signup_handler))
        .route("/login", axum::routing::post(login_handler))
        .layer(DefaultBodyLimit::max(1024 * 64))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = Credentials,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email already registered or invalid input", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(auth_service): State<Arc<AuthService>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<(StatusCode, Json<User>), ServiceError> {
    let user = auth_service.signup(credentials).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email, password and profile
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials matched", body = User),
        (status = 401, description = "Credentials did not match", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(auth_service): State<Arc<AuthService>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<User>, ServiceError> {
    let user = auth_service.login(credentials).await?;
    Ok(Json(user))
}
