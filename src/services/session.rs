use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::environment::RunMode;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Builds a session cookie with the flag set the browser expects for the
/// current runtime mode. HttpOnly always; production adds Secure and
/// SameSite=None so the cookie survives the cross-site storefront origin,
/// local development stays on Lax without Secure.
///
/// Clearing MUST reuse the same flag set or the browser will not match the
/// cookie; use [`removal_cookie`].
pub fn session_cookie(name: &'static str, value: String, mode: RunMode) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    match mode {
        RunMode::Production => {
            cookie.set_secure(true);
            cookie.set_same_site(SameSite::None);
        }
        RunMode::Development => {
            cookie.set_same_site(SameSite::Lax);
        }
    }
    cookie
}

/// The matching removal cookie: identical flags, empty value, expiry in the
/// past.
pub fn removal_cookie(name: &'static str, mode: RunMode) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), mode);
    cookie.make_removal();
    cookie
}
