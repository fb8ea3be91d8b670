use thiserror::Error;

/// Transport-level failures talking to the Sankhya gateway.
#[derive(Error, Debug)]
pub enum Error {
    /// Login failed, or the login response carried no token.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The gateway answered 401/403 on an authenticated call. The cached
    /// token has been cleared; re-invoking the operation logs in again.
    #[error("session expired")]
    SessionExpired,

    /// Any other transport failure, non-2xx status or malformed body.
    #[error("communication failure: {message}")]
    Communication { message: String },
}

impl Error {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn communication(message: impl Into<String>) -> Self {
        Self::Communication {
            message: message.into(),
        }
    }
}
