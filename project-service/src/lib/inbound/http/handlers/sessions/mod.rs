use serde::Serialize;

pub mod login;
pub mod logout;
pub mod refresh;
pub mod signup;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use signup::signup;

/// Body returned by signup, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResponseData {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
