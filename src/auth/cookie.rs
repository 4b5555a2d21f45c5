use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the HTTP-only cookie holding the session token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Build the session cookie set on login.
///
/// No `Max-Age` is set: the token's own `exp` bounds the session.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Expired, empty session cookie sent on logout. Path must match the one set on login.
///
/// Added to the jar rather than removed from it, so the browser is told to drop the
/// cookie even when the request arrived without one.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(AUTH_COOKIE_NAME)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
