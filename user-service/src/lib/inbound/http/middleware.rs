use auth::AuthorizationContext;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::router::AppState;

/// Header carrying the bearer token. Not `Authorization: Bearer`; existing
/// clients send the raw token under this name.
pub const TOKEN_HEADER: &str = "token";

/// Middleware that resolves the request identity and stores it in the request
/// extensions as an [`AuthorizationContext`].
///
/// Never rejects: a missing or invalid token yields `Unauthenticated` and each
/// handler decides what that means for its operation.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = resolve_context(&state, &req);

    if let Some(claims) = context.subject() {
        tracing::debug!(user_id = %claims.id, "Request authenticated");
    }

    req.extensions_mut().insert(context);

    next.run(req).await
}

fn resolve_context(state: &AppState, req: &Request) -> AuthorizationContext {
    match req.headers().get(TOKEN_HEADER) {
        None => state.gate.resolve(None),
        Some(value) => match value.to_str() {
            Ok(token) => state.gate.resolve(Some(token.trim())),
            Err(_) => {
                tracing::warn!("Token header is not valid ASCII, resolving as unauthenticated");
                AuthorizationContext::Unauthenticated
            }
        },
    }
}
