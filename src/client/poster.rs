use std::io::Read;

use reqwest::blocking::{Client, Response};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

/// The single HTTP call a [`WebhookClient`](crate::WebhookClient) needs.
///
/// Implemented for [`reqwest::blocking::Client`]; substitute your own to
/// route requests elsewhere or to stub them out in tests.
pub trait Poster {
    /// Transport failure, handed to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;
    type Body: Read;

    /// Issues one POST request.
    ///
    /// # Errors
    /// When no response could be obtained at all (DNS, connect, TLS, timeout).
    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<PostResponse<Self::Body>, Self::Error>;
}

/// Status line and unread body of a response.
#[derive(Debug)]
pub struct PostResponse<R> {
    pub status: u16,
    pub body: R,
}

impl Poster for Client {
    type Error = reqwest::Error;
    type Body = Response;

    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<PostResponse<Response>, reqwest::Error> {
        let resp: Response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()?;
        Ok(PostResponse {
            status: resp.status().as_u16(),
            body: resp,
        })
    }
}
