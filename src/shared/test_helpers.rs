#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::shared::constants::ROLE_STAFF;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use rust_decimal::Decimal;

/// Whole-unit price, e.g. `price(3200)` for 3200.00
#[cfg(test)]
pub fn price(units: i64) -> Decimal {
    Decimal::from(units)
}

#[cfg(test)]
pub fn create_staff_user() -> AuthenticatedUser {
    AuthenticatedUser {
        username: "test-staff".to_string(),
        roles: vec![ROLE_STAFF.to_string()],
    }
}

#[cfg(test)]
pub fn create_plain_user() -> AuthenticatedUser {
    AuthenticatedUser {
        username: "test-user".to_string(),
        roles: Vec::new(),
    }
}

#[cfg(test)]
async fn inject_staff_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_staff_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_plain_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_plain_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_staff_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_staff_middleware))
}

#[cfg(test)]
pub fn with_plain_user_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_plain_user_middleware))
}
