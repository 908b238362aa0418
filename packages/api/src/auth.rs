// ABOUTME: Identity context extraction from gateway-injected request headers
// ABOUTME: The upstream identity service resolves the session; handlers only see the result

use axum::{extract::FromRequestParts, http::request::Parts};

use scrumline_core::{Actor, OrgRole};

use crate::response::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ORGANIZATION_ID_HEADER: &str = "x-organization-id";
pub const ORG_ROLE_HEADER: &str = "x-org-role";

/// The calling user, resolved per request by the identity gateway in front
/// of this service. Missing or malformed identity headers reject the
/// request before any handler logic runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Actor);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(ApiError::unauthorized)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)?;
        let organization_id = header(parts, ORGANIZATION_ID_HEADER)?;
        let role = OrgRole::parse(header(parts, ORG_ROLE_HEADER)?)
            .ok_or_else(ApiError::unauthorized)?;

        Ok(CurrentUser(Actor {
            user_id: user_id.to_string(),
            organization_id: organization_id.to_string(),
            role,
        }))
    }
}
