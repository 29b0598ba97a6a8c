use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    NotFound,
    Conflict,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub(crate) struct BaseClient {
    client: Client,
    address: String,
    token: Option<String>,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        let address = address.trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            address,
            token: None,
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{}", self.address, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Result<reqwest::Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })?;

        let status = res.status();
        if status != expected_status_code {
            let message = match res.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("Unexpected status code: {}", status),
            };
            let variant = match status {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    APIErrorVariant::BadClientData
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => APIErrorVariant::Unauthorized,
                StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
                StatusCode::CONFLICT => APIErrorVariant::Conflict,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            debug!("Request failed with {}: {}", status, message);
            return Err(APIError { variant, message });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::GET, &path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::DELETE, &path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::POST, &path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::PUT, &path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn patch<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::PATCH, &path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }
}
