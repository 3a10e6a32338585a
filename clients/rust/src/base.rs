use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    /// Response body or transport error message
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    inner: Client,
    address: String,
    id_token: Option<String>,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            inner: Client::new(),
            address,
            id_token: None,
        }
    }

    pub fn set_id_token(&mut self, id_token: String) {
        self.id_token = if id_token.is_empty() {
            None
        } else {
            Some(id_token)
        };
    }

    fn get_client(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .inner
            .request(method, &format!("{}/{}", self.address, path));
        match &self.id_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Result<Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })?;

        let status = res.status();
        if status != expected_status_code {
            return Err(APIError {
                variant: APIErrorVariant::UnexpectedStatusCode(status),
                message: res.text().await.unwrap_or_default(),
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::GET, path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: &S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::POST, path).json(body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }
}
