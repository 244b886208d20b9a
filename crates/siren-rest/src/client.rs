//! REST HTTP client implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use siren_core::error::{ApiError, AuthError, Error, TransportError};
use siren_core::{ApiUrl, AuthHeader};

/// HTTP client for the dispatch API.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given API base URL.
    pub fn new(api: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("siren/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, api }
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Make a GET request and parse the JSON response.
    #[instrument(skip(self, auth), fields(api = %self.api))]
    pub(crate) async fn get_json<R>(&self, url: &str, auth: Option<&AuthHeader>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters and parse the JSON response.
    #[instrument(skip(self, auth), fields(api = %self.api))]
    pub(crate) async fn get_json_query<Q, R>(
        &self,
        url: &str,
        params: &Q,
        auth: Option<&AuthHeader>,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(url)
            .query(params)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body and parse the JSON response.
    #[instrument(skip(self, body, auth), fields(api = %self.api))]
    pub(crate) async fn post_json<B, R>(
        &self,
        url: &str,
        body: &B,
        auth: Option<&AuthHeader>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body, expecting no response content.
    #[instrument(skip(self, body, auth), fields(api = %self.api))]
    pub(crate) async fn post_no_content<B>(
        &self,
        url: &str,
        body: &B,
        auth: Option<&AuthHeader>,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        debug!(%url, "POST (no response body)");

        let response = self
            .client
            .post(url)
            .json(body)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response).await
    }

    /// Make a PUT request with a JSON body and parse the JSON response.
    #[instrument(skip(self, body, auth), fields(api = %self.api))]
    pub(crate) async fn put_json<B, R>(
        &self,
        url: &str,
        body: &B,
        auth: Option<&AuthHeader>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(%url, "PUT");

        let response = self
            .client
            .put(url)
            .json(body)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a DELETE request, expecting no response content.
    #[instrument(skip(self, auth), fields(api = %self.api))]
    pub(crate) async fn delete_no_content(
        &self,
        url: &str,
        auth: Option<&AuthHeader>,
    ) -> Result<(), Error> {
        debug!(%url, "DELETE");

        let response = self
            .client
            .delete(url)
            .headers(self.headers(auth)?)
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response).await
    }

    /// Create request headers, carrying the credential when one is present.
    ///
    /// A request issued without a credential goes out with no Authorization
    /// header at all; the server answers it with 401.
    fn headers(&self, auth: Option<&AuthHeader>) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(header) = auth {
            let value = HeaderValue::from_str(header.as_str())
                .map_err(|_| AuthError::MalformedCredential)?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Handle a response, parsing the JSON body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Check a response for success, discarding any body.
    async fn expect_success(&self, response: reqwest::Response) -> Result<(), Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            Ok(())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Parse an error response body.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        // Try to parse as the API's error body format
        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.message, body.errors),
            Err(_) => ApiError::new(status, None, Vec::new()),
        }
    }
}

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Classify a reqwest error into the transport taxonomy.
fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}
