//! Daraja (Safaricom M-Pesa) Client
//!
//! OAuth token exchange and STK push. One attempt per call, no retries.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::config::{GatewayCredentials, PaymentsConfig};
use crate::domain::repository::{PaymentGateway, StkPushOutcome, StkPushRequest};
use crate::error::{PaymentsError, PaymentsResult};

const OAUTH_PATH: &str = "/oauth/v1/generate?grant_type=client_credentials";
const STK_PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";
const TRANSACTION_TYPE: &str = "CustomerPayBillOnline";

#[derive(Clone)]
pub struct DarajaClient {
    http_client: reqwest::Client,
    base_url: String,
    credentials: GatewayCredentials,
    oauth_timeout: std::time::Duration,
    stk_timeout: std::time::Duration,
}

impl DarajaClient {
    pub fn new(config: &PaymentsConfig) -> PaymentsResult<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| PaymentsError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            oauth_timeout: config.oauth_timeout,
            stk_timeout: config.stk_timeout,
        })
    }

    async fn exchange_token(&self, request: reqwest::RequestBuilder) -> PaymentsResult<String> {
        let response = request
            .timeout(self.oauth_timeout)
            .send()
            .await
            .map_err(|e| PaymentsError::GatewayUnavailable(format!("OAuth request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentsError::GatewayUnavailable(format!(
                "OAuth token request returned HTTP {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PaymentsError::GatewayUnavailable(format!("Invalid OAuth response: {e}")))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                PaymentsError::GatewayUnavailable("OAuth response has no access_token".to_string())
            })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl PaymentGateway for DarajaClient {
    async fn access_token(&self) -> PaymentsResult<String> {
        let url = format!("{}{}", self.base_url, OAUTH_PATH);

        match &self.credentials {
            GatewayCredentials::BearerToken(token) => Ok(token.clone()),
            GatewayCredentials::BasicAuth(basic) => {
                let request = self
                    .http_client
                    .get(&url)
                    .header(AUTHORIZATION, format!("Basic {basic}"));
                self.exchange_token(request).await
            }
            GatewayCredentials::ConsumerKey { key, secret } => {
                let request = self.http_client.get(&url).basic_auth(key, Some(secret));
                self.exchange_token(request).await
            }
            GatewayCredentials::None => Err(PaymentsError::Config(
                "MPESA credentials missing. Provide MPESA_BEARER_TOKEN or MPESA_BASIC_AUTH \
                 or MPESA_CONSUMER_KEY/MPESA_CONSUMER_SECRET"
                    .to_string(),
            )),
        }
    }

    async fn stk_push(
        &self,
        access_token: &str,
        request: &StkPushRequest,
    ) -> PaymentsResult<StkPushOutcome> {
        let payload = stk_payload(request)?;

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, STK_PUSH_PATH))
            .bearer_auth(access_token)
            .timeout(self.stk_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PaymentsError::GatewayUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentsError::GatewayUnavailable(e.to_string()))?;

        Ok(interpret_stk_response(status, &body))
    }
}

/// Daraja STK push body. Short code and phone go out as integers.
fn stk_payload(request: &StkPushRequest) -> PaymentsResult<Value> {
    let short_code: u64 = request.business_short_code.trim().parse().map_err(|_| {
        PaymentsError::Config(format!(
            "MPESA_SHORT_CODE must be numeric, got {:?}",
            request.business_short_code
        ))
    })?;
    let phone: u64 = request
        .phone
        .as_str()
        .parse()
        .map_err(|_| PaymentsError::InvalidPhone)?;

    Ok(json!({
        "BusinessShortCode": short_code,
        "Password": request.password,
        "Timestamp": request.timestamp,
        "TransactionType": TRANSACTION_TYPE,
        "Amount": request.amount,
        "PartyA": phone,
        "PartyB": short_code,
        "PhoneNumber": phone,
        "CallBackURL": request.callback_url,
        "AccountReference": request.account_reference,
        "TransactionDesc": request.description,
    }))
}

fn interpret_stk_response(status: StatusCode, body: &str) -> StkPushOutcome {
    let data: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let field = |name: &str| {
        data.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    };

    if status != StatusCode::OK {
        return StkPushOutcome::Rejected {
            status_code: status.as_u16(),
            detail: field("errorMessage").unwrap_or_else(|| body.to_string()),
        };
    }

    match field("CheckoutRequestID") {
        Some(checkout_request_id) => StkPushOutcome::Accepted {
            checkout_request_id,
            merchant_request_id: field("MerchantRequestID"),
            response_description: field("ResponseDescription"),
        },
        // Without a checkout id the callback can never be matched
        None => StkPushOutcome::Rejected {
            status_code: status.as_u16(),
            detail: field("ResponseDescription")
                .or_else(|| field("errorMessage"))
                .unwrap_or_else(|| body.to_string()),
        },
    }
}
