use actix_web::{http::StatusCode, HttpRequest, HttpResponse};

use super::pages;
use crate::guard::{GuardPolicy, GuardState, RenderOutcome};
use crate::models::Role;
use crate::session::Credential;
use crate::state::AppState;
use crate::utils::ResponseBuilder;

/// Turn a guard's render outcome into an HTTP response
#[must_use]
pub fn outcome_response(outcome: RenderOutcome) -> HttpResponse {
    match outcome {
        RenderOutcome::Redirect { target } => ResponseBuilder::redirect(target).build(),
        RenderOutcome::Denied { message, .. } => {
            ResponseBuilder::page(StatusCode::FORBIDDEN, pages::denial_page(message))
        }
        RenderOutcome::Loading | RenderOutcome::Content => {
            ResponseBuilder::page(StatusCode::OK, pages::loading_page())
        }
    }
}

/// Run a fresh guard activation for this request and wait for it to settle
///
/// Returns the authorized role together with the credential it was resolved
/// from, or the response to send instead of the page's content. The session
/// cookie is opened once here. If the request is abandoned the activation is
/// dropped and its resolution cancelled.
///
/// # Errors
///
/// Returns the redirect, denial or loading response when the guard does not
/// authorize content.
pub async fn require(
    state: &AppState,
    policy: GuardPolicy,
    req: &HttpRequest,
) -> Result<(Role, Credential), HttpResponse> {
    let credential = state.cookies.read_credential(req);
    let mut activation = state.guard_for(policy, credential.clone()).activate();
    let settled = activation.settled().await;

    match (settled, activation.render(), credential) {
        (Some(GuardState::Authorized(role)), RenderOutcome::Content, Some(credential)) => {
            Ok((role, credential))
        }
        (_, outcome, _) => Err(outcome_response(outcome)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::constants::TEST_TOKEN;
    use crate::testing::{MockSessionSource, RequestBuilder, TestFixtures};
    use std::sync::Arc;

    const UNUSED_API: &str = "http://127.0.0.1:9";

    #[actix_web::test]
    async fn test_require_returns_role_and_credential() {
        let source = Arc::new(MockSessionSource::with_role("admin"));
        let state = TestFixtures::app_state_with_source(UNUSED_API, source.clone());
        let req = RequestBuilder::get("/admin")
            .signed_in_as(TEST_TOKEN)
            .build()
            .to_http_request();

        let (role, credential) = require(&state, GuardPolicy::Admin, &req).await.unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(credential.as_str(), TEST_TOKEN);
        assert_eq!(source.last_token().as_deref(), Some(TEST_TOKEN));
        assert_eq!(source.calls(), 1);
    }

    #[actix_web::test]
    async fn test_require_denies_without_cookie() {
        let source = Arc::new(MockSessionSource::with_role("admin"));
        let state = TestFixtures::app_state_with_source(UNUSED_API, source.clone());
        let req = RequestBuilder::get("/customer").build().to_http_request();

        let response = require(&state, GuardPolicy::Customer, &req).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(source.calls(), 0);
    }
}
