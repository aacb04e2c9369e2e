use actix_web::{http::StatusCode, web, HttpResponse};
use log::error;

use super::pages::{self, Flash};
use super::types::{CredentialsForm, FlashQuery};
use crate::guard::LOGIN_PATH;
use crate::models::{NewUser, Role};
use crate::state::AppState;
use crate::utils::{LoggingHelper, ResponseBuilder};

const SIGNUP_SUCCESS: &str = "User created successfully. Please login.";

/// GET /login
pub async fn login_page(query: web::Query<FlashQuery>) -> HttpResponse {
    let notice = if query.signup.as_deref() == Some("success") {
        Some(SIGNUP_SUCCESS)
    } else {
        query.notice.as_deref()
    };
    let flash = Flash {
        notice,
        error: query.error.as_deref(),
    };
    ResponseBuilder::page(StatusCode::OK, pages::login_page(flash))
}

/// POST /login
///
/// Exchanges the credentials for a token, looks up the role it carries and
/// stores the token in the session cookie. Admins land on the dashboard,
/// everyone else goes through the entry route.
pub async fn login_submit(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    let form = form.into_inner();

    let credential = match state.api.login(&form.username, &form.password).await {
        Ok(credential) => credential,
        Err(err) => return login_failed(&form.username, &err.user_message()),
    };

    let role = match state.api.session_info(&credential).await {
        Ok(session) => match session.role.parse::<Role>() {
            Ok(role) => role,
            Err(err) => return login_failed(&form.username, &err.to_string()),
        },
        Err(err) => return login_failed(&form.username, &err.user_message()),
    };

    let cookie = match state.cookies.create_credential_cookie(&credential) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to seal session cookie: {err}");
            return login_failed(&form.username, "could not start session");
        }
    };

    LoggingHelper::log_login_success(&form.username);
    let target = match role {
        Role::Admin => role.home_path(),
        Role::Customer => "/",
    };
    ResponseBuilder::redirect(target).with_cookie(cookie).build()
}

fn login_failed(username: &str, reason: &str) -> HttpResponse {
    LoggingHelper::log_auth_failure("Login", username, reason);
    ResponseBuilder::redirect(LOGIN_PATH)
        .with_error(&format!("Invalid credentials or server error: {reason}"))
        .build()
}

/// GET /signup
pub async fn signup_page(query: web::Query<FlashQuery>) -> HttpResponse {
    let flash = Flash {
        notice: None,
        error: query.error.as_deref(),
    };
    ResponseBuilder::page(StatusCode::OK, pages::signup_page(flash))
}

/// POST /signup
pub async fn signup_submit(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let user = NewUser {
        username: form.username,
        password: form.password,
    };

    match state.api.signup(&user).await {
        Ok(created) => {
            log::info!("Registered user {}", created.username);
            ResponseBuilder::redirect(LOGIN_PATH)
                .with_param("signup", "success")
                .build()
        }
        Err(err) => {
            let reason = err.user_message();
            LoggingHelper::log_auth_failure("Signup", &user.username, &reason);
            ResponseBuilder::redirect("/signup")
                .with_error(&format!("Signup failed. Try a different username. {reason}"))
                .build()
        }
    }
}
