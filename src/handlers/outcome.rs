use actix_web::{web, HttpRequest, HttpResponse};

use crate::guard::GuardPolicy;
use crate::state::AppState;
use crate::utils::ResponseBuilder;

/// GET /auth/outcome/{guard}
///
/// Runs the named guard for this request's session and returns its render
/// outcome as JSON, for view layers that draw the page themselves.
pub async fn guard_outcome(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let name = path.into_inner();
    let Ok(policy) = name.parse::<GuardPolicy>() else {
        return ResponseBuilder::unknown_resource("guard", &name);
    };

    let mut activation = state.guard(policy, &req).activate();
    activation.settled().await;

    ResponseBuilder::ok()
        .with_header("Cache-Control", "no-store")
        .json(&activation.render())
}
