use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<reqwest::Response, QuoteError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(QuoteError::Network(format!("{} returned {}", label, status)));
        }
        Ok(resp)
    }
}

pub(super) fn send_error(label: &str, err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        QuoteError::Network(format!("{} timed out", label))
    } else {
        QuoteError::Network(format!("{}: {}", label, err))
    }
}
