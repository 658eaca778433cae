use crate::startup::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

/// Allow-list gate on the `Origin` and `Referer` headers.
///
/// A request passes when `Origin` equals the configured origin exactly, or
/// when `Referer` starts with it. Both headers are client-supplied, so this
/// only steers well-behaved browser traffic to the configured site; it is
/// not a security boundary against spoofed headers.
pub async fn require_allowed_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let allowed = state.config.upload.allowed_origin.as_str();
    let headers = request.headers();

    let origin_ok = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|origin| origin == allowed);
    let referer_ok = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|referer| referer.starts_with(allowed));

    if !origin_ok && !referer_ok {
        return Err(AppError::Forbidden(anyhow::anyhow!("Invalid origin")));
    }

    Ok(next.run(request).await)
}
