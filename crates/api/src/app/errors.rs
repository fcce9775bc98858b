use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gatehouse_auth::MembershipError;

/// Map a membership mutation failure to its HTTP convention:
/// 409 = caller not a registered user, 403 = caller not a member of the
/// named tenant, 500 = unexpected failure. Messages stay generic so a tenant
/// id's validity is never revealed.
pub fn membership_error_to_response(err: MembershipError) -> axum::response::Response {
    match err {
        MembershipError::NotRegistered | MembershipError::RecordMissing => json_error(
            StatusCode::CONFLICT,
            "not_registered",
            "You are not a registered user.",
        ),
        MembershipError::UnknownTenant => json_error(
            StatusCode::FORBIDDEN,
            "not_a_member",
            "You are not a member of the provided customer id.",
        ),
        MembershipError::Store(e) => {
            tracing::error!(error = %e, "membership mutation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Something went wrong.",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
