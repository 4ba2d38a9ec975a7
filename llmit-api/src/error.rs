use http::StatusCode;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("The server took too long to answer")]
    TimedOut,

    #[error("Server answered {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Could not understand the server's answer: {0}")]
    Parse(String),

    #[error("Comment is empty")]
    EmptyContent,

    #[error("This reply is already being submitted")]
    AlreadySubmitting,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    /// Build the error for a non-successful response, given its raw body
    ///
    /// The server answers `{"message": ..., "error": ...}` on failure, but
    /// proxies in front of it may not.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Error {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|data| {
                let message = data.get("message")?.as_str()?.to_string();
                Some(match data.get("error").and_then(|e| e.as_str()) {
                    Some(detail) => format!("{message} ({detail})"),
                    None => message,
                })
            })
            .unwrap_or_else(|| {
                String::from(status.canonical_reason().unwrap_or("unknown error"))
            });
        Error::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// Whether this error was raised before anything got sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::EmptyContent | Error::AlreadySubmitting | Error::NullByteInString(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_uses_server_message() {
        let e = Error::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"message": "Subllmit does not exist."}"#,
        );
        assert_eq!(
            e,
            Error::Server {
                status: 400,
                message: String::from("Subllmit does not exist."),
            }
        );
    }

    #[test]
    fn from_response_appends_detail() {
        let e = Error::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"message": "Error creating post", "error": "db locked"}"#,
        );
        assert_eq!(e.to_string(), "Server answered 500: Error creating post (db locked)");
    }

    #[test]
    fn from_response_falls_back_to_reason() {
        let e = Error::from_response(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(
            e,
            Error::Server {
                status: 502,
                message: String::from("Bad Gateway"),
            }
        );
    }

    #[test]
    fn local_errors() {
        assert!(Error::EmptyContent.is_local());
        assert!(Error::AlreadySubmitting.is_local());
        assert!(!Error::TimedOut.is_local());
        assert!(!Error::Transport(String::from("refused")).is_local());
    }
}
