//! Back-office sign-in route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::gate::{ADMIN_HOME_PATH, SIGN_IN_PATH};
use crate::models::SessionToken;
use crate::routes::layout::PageLayout;
use crate::services::auth::{AuthError, AuthService, clear_session, set_session_token};
use crate::state::AppState;

/// Sign-in form data.
#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl std::fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("next", &self.next)
            .finish()
    }
}

/// Query parameters of the sign-in page.
#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    pub next: Option<String>,
    pub error: Option<String>,
}

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signin.html")]
pub struct SignInTemplate {
    pub layout: PageLayout,
    pub next: String,
    pub error: Option<&'static str>,
}

/// Display the sign-in page.
#[instrument(skip(state))]
pub async fn signin_page(
    State(state): State<AppState>,
    Query(query): Query<SignInQuery>,
) -> Result<impl IntoResponse> {
    let layout =
        PageLayout::build(&state, SIGN_IN_PATH, Some("Sign in".to_string()), None).await?;

    Ok(SignInTemplate {
        layout,
        next: safe_next(query.next.as_deref()).to_owned(),
        error: query.error.as_deref().map(error_message),
    })
}

/// Handle the sign-in form.
///
/// On success the session id is cycled and the user is sent to `next`.
#[instrument(skip(state, session))]
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Result<Response> {
    let next = safe_next(form.next.as_deref());

    let user = match AuthService::new(state.pool())
        .sign_in(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            warn!("Sign-in rejected");
            let location = format!(
                "{SIGN_IN_PATH}?error=credentials&next={}",
                urlencoding::encode(next)
            );
            return Ok(Redirect::to(&location).into_response());
        }
        Err(e) => return Err(AppError::Auth(e)),
    };

    set_session_token(&session, &SessionToken::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    info!(user_id = %user.id, role = %user.role, "Signed in");

    Ok(Redirect::to(next).into_response())
}

/// Sign out and return to the home page.
#[instrument(skip(session))]
pub async fn signout(session: Session) -> Result<Response> {
    clear_session(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/").into_response())
}

/// Only same-site absolute paths are followed after sign-in.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.starts_with(SIGN_IN_PATH) =>
        {
            path
        }
        _ => ADMIN_HOME_PATH,
    }
}

fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        _ => "Sign-in failed, please try again.",
    }
}

/// Create the auth routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", get(signin_page).post(signin))
        .route("/signout", post(signout))
}
