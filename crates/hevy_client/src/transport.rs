//! Request decorator that stamps every outgoing request with the API key and
//! client identification headers.
//!
//! [`ApiHeadersLayer`] is composed around the underlying `reqwest::Client`
//! when a client is constructed, so individual accessors never deal with
//! authentication.

use std::task::{Context, Poll};

use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use tower::{Layer, Service};

use crate::HevyError;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

#[derive(Clone, Debug)]
pub struct ApiHeadersLayer {
    api_key: HeaderValue,
    user_agent: HeaderValue,
}

impl ApiHeadersLayer {
    pub fn new(api_key: &SecretString, user_agent: &str) -> Result<Self, HevyError> {
        let mut api_key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| HevyError::Config("api key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| HevyError::Config(format!("invalid user agent: {user_agent:?}")))?;
        Ok(Self {
            api_key,
            user_agent,
        })
    }
}

impl<S> Layer<S> for ApiHeadersLayer {
    type Service = ApiHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiHeaders {
            inner,
            api_key: self.api_key.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiHeaders<S> {
    inner: S,
    api_key: HeaderValue,
    user_agent: HeaderValue,
}

impl<S> Service<reqwest::Request> for ApiHeaders<S>
where
    S: Service<reqwest::Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: reqwest::Request) -> Self::Future {
        let headers = req.headers_mut();
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        headers.insert(USER_AGENT, self.user_agent.clone());
        self.inner.call(req)
    }
}
