pub mod poster;

use std::io;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::Message;
use poster::{PostResponse, Poster};

/// Client for Slack's Incoming WebHook API.
///
/// Holds nothing but the hook URL and the [`Poster`]. Every send is a single
/// independent request; nothing is retried. The client is `Sync` whenever its
/// poster is, which holds for the default [`reqwest::blocking::Client`].
#[derive(Debug, Clone)]
pub struct WebhookClient<P = Client> {
    url: String,
    poster: P,
}

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("could not encode message as JSON")]
    Serialize(#[from] serde_json::Error),
    #[error("could not deliver message")]
    Transport(#[source] E),
    #[error("unexpected status code: {0}")]
    Status(u16),
}

impl<E> Error<E> {
    /// The status code of a non-200 response
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl WebhookClient {
    /// Creates a client backed by a default [`reqwest::blocking::Client`].
    ///
    /// The URL is used as-is and only checked when a request is sent.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_poster(url, Client::new())
    }

    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    /// If the TLS backend cannot be initialized.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_poster(url, http_client))
    }
}

impl<P: Poster> WebhookClient<P> {
    #[must_use]
    pub fn with_poster(url: impl Into<String>, poster: P) -> Self {
        Self {
            url: url.into(),
            poster,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a message consisting of `text` only.
    ///
    /// # Errors
    /// See [`Self::send`].
    pub fn simple(&self, text: impl Into<String>) -> Result<(), Error<P::Error>> {
        self.send(&Message::new(text))
    }

    /// Posts the message as JSON and requires a `200 OK` in return.
    ///
    /// The response body is read to the end and thrown away so that
    /// keep-alive connections can be reused.
    ///
    /// # Errors
    /// * [`Error::Serialize`] if the message cannot be encoded
    /// * [`Error::Transport`] with the poster's error if no response arrived
    /// * [`Error::Status`] for any status other than 200
    pub fn send(&self, message: &Message) -> Result<(), Error<P::Error>> {
        let body: Vec<u8> = message.to_json()?;
        log::debug!(
            "Posting message with {} attachment(s) ({} bytes) to webhook",
            message.attachments.len(),
            body.len(),
        );

        let PostResponse { status, mut body } = self
            .poster
            .post(&self.url, "application/json", body)
            .map_err(Error::Transport)?;

        if let Err(e) = io::copy(&mut body, &mut io::sink()) {
            log::debug!("Could not drain webhook response body: {e}");
        }

        if status != 200 {
            log::warn!("Webhook responded with status {status}");
            return Err(Error::Status(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_set_for_status_errors() {
        let err: Error<io::Error> = Error::Status(404);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "unexpected status code: 404");

        let err: Error<io::Error> = Error::Transport(io::ErrorKind::ConnectionRefused.into());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_is_exposed_as_source() {
        let err: Error<io::Error> = Error::Transport(io::ErrorKind::TimedOut.into());
        let source = std::error::Error::source(&err).unwrap();
        let io_err = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn new_keeps_url_verbatim() {
        let client = WebhookClient::new("https://hooks.slack.com/services/T000/B000/XXXX");
        assert_eq!(client.url(), "https://hooks.slack.com/services/T000/B000/XXXX");
    }
}
