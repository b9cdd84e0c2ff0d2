//! Gophermart API client.

use super::converter::{CredentialsBody, DataConverter, WithdrawBody};
use super::transport::{Body, HttpRequest, HttpResponse, Transport};
use crate::session::Credential;
use crate::state::{Balance, Order, Withdrawal};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

const LOGIN_PATH: &str = "/api/user/login";
const REGISTER_PATH: &str = "/api/user/register";
const ORDERS_PATH: &str = "/api/user/orders";
const BALANCE_PATH: &str = "/api/user/balance";
const WITHDRAW_PATH: &str = "/api/user/balance/withdraw";
const WITHDRAWALS_PATH: &str = "/api/user/withdrawals";

/// Uniform result of every API operation.
///
/// Failures are values, so callers can render them inline.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }

    /// `Ok(data)` to continue, `Err(message)` to stop and show the message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.message),
        }
    }
}

/// Which account endpoint to authenticate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEndpoint {
    Login,
    Register,
}

impl AuthEndpoint {
    fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Register => REGISTER_PATH,
        }
    }
}

/// Typed client for the Gophermart HTTP API.
#[derive(Debug, Clone)]
pub struct GophermartApi {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl GophermartApi {
    /// Create a client for `base_url` using the given transport.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a new account; the response carries the session credential.
    pub async fn register(&self, login: &str, password: &str) -> ApiResponse<Credential> {
        self.authenticate(AuthEndpoint::Register, login, password)
            .await
    }

    /// Log in; the response carries the session credential.
    pub async fn login(&self, login: &str, password: &str) -> ApiResponse<Credential> {
        self.authenticate(AuthEndpoint::Login, login, password).await
    }

    /// Log in or register, depending on `endpoint`.
    pub async fn authenticate(
        &self,
        endpoint: AuthEndpoint,
        login: &str,
        password: &str,
    ) -> ApiResponse<Credential> {
        let body = match serde_json::to_value(CredentialsBody { login, password }) {
            Ok(body) => body,
            Err(e) => return ApiResponse::fail(e.to_string()),
        };
        let request = HttpRequest::post(endpoint.path(), Body::Json(body));

        let response = match self.send(request).await {
            Ok(response) => response,
            Err(message) => return ApiResponse::fail(message),
        };
        if response.status != 200 {
            return ApiResponse::fail(response.body);
        }
        match response.header("Authorization") {
            Some(value) => ApiResponse::ok(Credential::new(value), response.body),
            None => ApiResponse::fail("authorization header missing from response"),
        }
    }

    /// Upload an order number for accrual. Accepted orders are processed
    /// asynchronously by the backend.
    pub async fn submit_order(&self, order_id: &str, credential: &Credential) -> ApiResponse<()> {
        let request = HttpRequest::post(ORDERS_PATH, Body::Text(order_id.to_string()))
            .authorized(credential.as_str());
        self.expect_status(request, 202).await
    }

    /// Spend `amount` points against `order_id`.
    pub async fn withdraw(
        &self,
        order_id: &str,
        amount: Decimal,
        credential: &Credential,
    ) -> ApiResponse<()> {
        let body = match serde_json::to_value(WithdrawBody {
            order: order_id,
            sum: amount,
        }) {
            Ok(body) => body,
            Err(e) => return ApiResponse::fail(e.to_string()),
        };
        let request =
            HttpRequest::post(WITHDRAW_PATH, Body::Json(body)).authorized(credential.as_str());
        self.expect_status(request, 200).await
    }

    /// Fetch the current points balance.
    pub async fn fetch_balance(&self, credential: &Credential) -> ApiResponse<Balance> {
        let request = HttpRequest::get(BALANCE_PATH).authorized(credential.as_str());
        match self.send(request).await {
            Ok(response) if response.status == 200 => {
                parsed(DataConverter::parse_balance(&response.body), response.body)
            }
            Ok(response) => ApiResponse::fail(response.body),
            Err(message) => ApiResponse::fail(message),
        }
    }

    /// Fetch uploaded orders. No content means no orders yet, not an error.
    pub async fn fetch_orders(&self, credential: &Credential) -> ApiResponse<Vec<Order>> {
        let request = HttpRequest::get(ORDERS_PATH).authorized(credential.as_str());
        self.fetch_list(request, DataConverter::parse_orders).await
    }

    /// Fetch the withdrawal history. No content means no withdrawals yet.
    pub async fn fetch_withdrawals(
        &self,
        credential: &Credential,
    ) -> ApiResponse<Vec<Withdrawal>> {
        let request = HttpRequest::get(WITHDRAWALS_PATH).authorized(credential.as_str());
        self.fetch_list(request, DataConverter::parse_withdrawals)
            .await
    }

    async fn fetch_list<T>(
        &self,
        request: HttpRequest,
        parse: fn(&str) -> serde_json::Result<Vec<T>>,
    ) -> ApiResponse<Vec<T>> {
        match self.send(request).await {
            Ok(response) => match response.status {
                200 => parsed(parse(&response.body), response.body),
                204 => ApiResponse::ok(Vec::new(), response.body),
                _ => ApiResponse::fail(response.body),
            },
            Err(message) => ApiResponse::fail(message),
        }
    }

    async fn expect_status(&self, request: HttpRequest, expected: u16) -> ApiResponse<()> {
        match self.send(request).await {
            Ok(response) if response.status == expected => ApiResponse::ok((), response.body),
            Ok(response) => ApiResponse::fail(response.body),
            Err(message) => ApiResponse::fail(message),
        }
    }

    /// Single attempt; transport errors come back as their message.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = request.method;
        let path = request.path.clone();

        match self.transport.send(&self.base_url, request).await {
            Ok(response) => {
                debug!(%method, %path, status = response.status, "HTTP exchange");
                Ok(response)
            }
            Err(e) => {
                warn!(%method, %path, error = %e, "HTTP request failed");
                Err(e.detail())
            }
        }
    }
}

fn parsed<T>(result: serde_json::Result<T>, body: String) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data, body),
        Err(e) => {
            warn!(error = %e, "Malformed response body");
            ApiResponse::fail(format!("malformed response: {}", e))
        }
    }
}
