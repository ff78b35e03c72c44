use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

/// Name of the cookie carrying the refresh token.
pub const SESSION_COOKIE: &str = "jwt";

fn base(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Cookie holding a refresh token, living exactly as long as the token.
pub fn session_cookie(refresh_token: String, lifetime: chrono::Duration) -> Cookie<'static> {
    let mut cookie = base(refresh_token);
    cookie.set_max_age(time::Duration::seconds(lifetime.num_seconds()));
    cookie
}

/// Cookie instructing the client to drop the session cookie.
///
/// Carries the same attributes as [`session_cookie`]; browsers only replace a
/// cookie whose attributes match.
pub fn cleared_session_cookie() -> Cookie<'static> {
    let mut cookie = base(String::new());
    cookie.make_removal();
    cookie
}

/// Refresh token presented by the client, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
