use crate::common::MemberId;
use axum::{middleware::Next, response::Response};
use tracing::debug;

/// Header carrying the authenticated member id, set by the auth proxy in
/// front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The member making the request.
#[derive(Clone, Copy, Debug)]
pub struct Caller {
    pub member_id: MemberId,
}

/// Caller identity middleware
///
/// Reads `x-user-id` and adds `Caller` to request extensions. Missing or
/// malformed headers leave the request anonymous.
pub async fn caller_identity_middleware(
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_caller(&request) {
        Some(caller) => {
            debug!(member_id = %caller.member_id, "identified caller");
            request.extensions_mut().insert(caller);
        }
        None => debug!("anonymous request"),
    }

    next.run(request).await
}

fn extract_caller(request: &axum::http::Request<axum::body::Body>) -> Option<Caller> {
    let header = request.headers().get(USER_ID_HEADER)?.to_str().ok()?;
    let member_id = MemberId::parse(header).ok()?;
    Some(Caller { member_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(value: Option<&str>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(value) = value {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn reads_member_id_from_header() {
        let id = MemberId::new();
        let caller = extract_caller(&request_with(Some(&id.to_string()))).unwrap();
        assert_eq!(caller.member_id, id);
    }

    #[test]
    fn missing_or_malformed_header_is_anonymous() {
        assert!(extract_caller(&request_with(None)).is_none());
        assert!(extract_caller(&request_with(Some("admin"))).is_none());
    }
}
