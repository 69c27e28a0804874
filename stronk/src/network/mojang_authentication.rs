//! The blocking point of the login flow: the session-service `hasJoined`
//! query.

use reqwest::StatusCode;
use thiserror::Error;

use crate::player::GameProfile;

const MOJANG_AUTH_URL: &str =
    "https://sessionserver.mojang.com/session/minecraft/hasJoined?username=";
const SERVER_ID_ARG: &str = "&serverId=";

/// Why a session could not be verified.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The request never got an answer.
    #[error("Authentication servers are down")]
    FailedResponse,
    /// HTTP 204: the session service does not know this login.
    #[error("Failed to verify username")]
    UnverifiedUsername,
    /// The 200 body did not parse as a game profile.
    #[error("Failed to parse the session response")]
    FailedParse,
    /// Any other status code.
    #[error("Unknown status code {0}")]
    UnknownStatusCode(StatusCode),
}

/// Asks the session service whether `username` initiated a login with this
/// server's id hash.
///
/// # Errors
/// - If the service is unreachable, answers 204, or answers anything that
///   is not a parsable profile.
pub async fn mojang_authenticate(
    username: &str,
    server_hash: &str,
) -> Result<GameProfile, AuthError> {
    let cap = MOJANG_AUTH_URL.len() + SERVER_ID_ARG.len() + username.len() + server_hash.len();
    let mut auth_url = String::with_capacity(cap);
    auth_url += MOJANG_AUTH_URL;
    auth_url += username;
    auth_url += SERVER_ID_ARG;
    auth_url += server_hash;

    let response = reqwest::get(auth_url)
        .await
        .map_err(|_| AuthError::FailedResponse)?;

    match response.status() {
        StatusCode::OK => {}
        StatusCode::NO_CONTENT => Err(AuthError::UnverifiedUsername)?,
        other => Err(AuthError::UnknownStatusCode(other))?,
    }

    response.json().await.map_err(|_| AuthError::FailedParse)
}
