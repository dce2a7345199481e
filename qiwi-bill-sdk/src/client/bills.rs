//! Bills API client (merchant backend → QIWI).
//!
//! All requests carry `Authorization: Bearer <secret key>`.

use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::ClientError;
use super::transport::{HttpTransport, TransportRequest};
use crate::objects::{
    Bill, CreateBillInfo, ErrorResponse, MoneyAmount, PaymentInfo, Refund, RefundBillRequest,
    payment_form_url,
};
use crate::{BILLS_URL, PAYMENT_URL};

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
const NO_BODY: Option<&()> = None;

/// Typed HTTP client for the QIWI **bills API**.
///
/// Every call is a single request/response exchange: no retries, no
/// caching. Wrap calls yourself if you need resilience.
#[derive(Clone)]
pub struct BillPaymentsClient {
    transport: Arc<dyn HttpTransport>,
    bills_url: String,
    payment_url: String,
    authorization: String,
}

impl BillPaymentsClient {
    /// Create a new `BillPaymentsClient` using a default `reqwest::Client`.
    ///
    /// * `secret_key` – the merchant secret key from the QIWI p2p dashboard.
    pub fn new(secret_key: impl AsRef<str>) -> Self {
        Self::with_transport(secret_key, Arc::new(reqwest::Client::new()))
    }

    /// Create a new `BillPaymentsClient` sending requests through `transport`.
    pub fn with_transport(secret_key: impl AsRef<str>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            bills_url: BILLS_URL.to_owned(),
            payment_url: PAYMENT_URL.to_owned(),
            authorization: bearer(secret_key.as_ref()),
        }
    }

    /// Replace the transport with a custom `reqwest::Client` (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.transport = Arc::new(client);
        self
    }

    /// Override the bills API base URL.
    pub fn with_bills_url(mut self, url: Url) -> Self {
        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.bills_url = url;
        self
    }

    /// Override the checkout form base URL.
    pub fn with_payment_url(mut self, url: Url) -> Self {
        self.payment_url = url.to_string();
        self
    }

    /// Replace the secret key used for subsequent calls.
    pub fn set_secret_key(&mut self, secret_key: impl AsRef<str>) {
        self.authorization = bearer(secret_key.as_ref());
    }

    /// Build the hosted checkout form link for `info`. No request is made.
    pub fn create_payment_form(&self, info: &PaymentInfo) -> String {
        payment_form_url(&self.payment_url, info)
    }

    /// `GET {billId}` – fetch a bill.
    pub async fn get_bill_info(&self, bill_id: &str) -> Result<Bill, ClientError> {
        self.execute(Method::GET, &encode_segment(bill_id)?, NO_BODY)
            .await
    }

    /// `PUT {billId}` – create a bill.
    ///
    /// The API has no success-redirect field, so a `success_url` is appended
    /// to the returned pay form link as a `successUrl` query parameter.
    pub async fn create_bill(&self, info: &CreateBillInfo) -> Result<Bill, ClientError> {
        let request = info.to_request();
        let mut bill: Bill = self
            .execute(Method::PUT, &encode_segment(&info.bill_id)?, Some(&request))
            .await?;

        if let Some(success_url) = &info.success_url {
            bill.pay_url = append_success_url(&bill.pay_url, success_url);
        }
        Ok(bill)
    }

    /// `POST {billId}/reject` – cancel an unpaid bill.
    pub async fn cancel_bill(&self, bill_id: &str) -> Result<Bill, ClientError> {
        let path = format!("{}/reject", encode_segment(bill_id)?);
        self.execute(Method::POST, &path, NO_BODY).await
    }

    /// `GET {billId}/refunds/{refundId}` – fetch a refund.
    pub async fn get_refund_info(
        &self,
        bill_id: &str,
        refund_id: &str,
    ) -> Result<Refund, ClientError> {
        self.execute(Method::GET, &refund_path(bill_id, refund_id)?, NO_BODY)
            .await
    }

    /// `PUT {billId}/refunds/{refundId}` – refund part or all of a paid bill.
    ///
    /// `refund_id` is chosen by the caller and acts as an idempotency key on
    /// the server side.
    pub async fn refund(
        &self,
        bill_id: &str,
        refund_id: &str,
        amount: MoneyAmount,
    ) -> Result<Refund, ClientError> {
        let body = RefundBillRequest { amount };
        self.execute(Method::PUT, &refund_path(bill_id, refund_id)?, Some(&body))
            .await
    }

    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = Url::parse(&self.bills_url)?.join(path)?;
        let body = match body {
            Some(body) => Bytes::from(serde_json::to_vec(body)?),
            None => Bytes::new(),
        };

        let mut authorization = HeaderValue::from_str(&self.authorization)
            .map_err(|_| ClientError::InvalidSecretKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        debug!(method = %method, url = %url, "Sending bills API request");

        let resp = self
            .transport
            .execute(TransportRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        debug!(status = %resp.status, bytes = resp.body.len(), "Received bills API response");

        if resp.status != StatusCode::OK {
            let error: ErrorResponse = serde_json::from_slice(&resp.body)?;
            warn!(
                status = %resp.status,
                error_code = %error.error_code,
                trace_id = %error.trace_id,
                "Bills API returned an error"
            );
            return Err(ClientError::Api(error));
        }

        serde_json::from_slice(&resp.body).map_err(ClientError::Decode)
    }
}

impl std::fmt::Debug for BillPaymentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillPaymentsClient")
            .field("bills_url", &self.bills_url)
            .field("payment_url", &self.payment_url)
            .field("authorization", &"Bearer <redacted>")
            .finish_non_exhaustive()
    }
}

fn bearer(secret_key: &str) -> String {
    format!("Bearer {secret_key}")
}

/// Percent-encode a caller-chosen id for use as one path segment.
///
/// Empty and dot segments cannot be encoded away: URL parsing treats `%2E`
/// like `.`, so `Url::join` would resolve them to another endpoint.
fn encode_segment(segment: &str) -> Result<String, ClientError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ClientError::InvalidId(segment.to_owned()));
    }
    Ok(urlencoding::encode(segment).into_owned())
}

fn refund_path(bill_id: &str, refund_id: &str) -> Result<String, ClientError> {
    Ok(format!(
        "{}/refunds/{}",
        encode_segment(bill_id)?,
        encode_segment(refund_id)?
    ))
}

fn append_success_url(pay_url: &str, success_url: &str) -> String {
    let separator = if pay_url.contains('?') { '&' } else { '?' };
    format!(
        "{pay_url}{separator}successUrl={}",
        urlencoding::encode(success_url)
    )
}
