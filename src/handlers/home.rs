use actix_web::{web, HttpRequest, HttpResponse};

use super::helpers::outcome_response;
use crate::guard::{GuardPolicy, GuardState, LOGIN_PATH};
use crate::session::DenialKind;
use crate::state::AppState;
use crate::utils::cookie_utils::COOKIE_NAME;
use crate::utils::ResponseBuilder;

/// Entry route: send the visitor to their role's home page, or to login
pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let mut activation = state.guard(GuardPolicy::Root, &req).activate();
    let settled = activation.settled().await;

    // A cookie that is present but yields no credential is stale; drop it.
    let has_cookie = req.cookie(COOKIE_NAME).is_some();
    if has_cookie && settled == Some(GuardState::Denied(DenialKind::NoCredential)) {
        return ResponseBuilder::redirect(LOGIN_PATH)
            .with_cookie(state.cookies.create_expired_cookie())
            .build();
    }

    outcome_response(activation.render())
}
