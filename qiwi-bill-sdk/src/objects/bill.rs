//! Bill (invoice) request and response types.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

use super::amount::MoneyAmount;
use super::datetime;
use crate::{CLIENT_NAME, CLIENT_VERSION};

/// Invoice payment status value.
///
/// The server is the only authority on transitions; the client reflects
/// whatever it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatusValue {
    /// Invoice issued, awaiting payment.
    Waiting,
    Paid,
    /// Rejected by the customer or cancelled by the merchant.
    Rejected,
    /// Expired without being paid.
    Expired,
}

impl BillStatusValue {
    /// Whether the server will no longer change this status.
    pub fn is_final(self) -> bool {
        !matches!(self, BillStatusValue::Waiting)
    }
}

impl std::fmt::Display for BillStatusValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatusValue::Waiting => write!(f, "WAITING"),
            BillStatusValue::Paid => write!(f, "PAID"),
            BillStatusValue::Rejected => write!(f, "REJECTED"),
            BillStatusValue::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Status of a bill together with the time it last changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillStatus {
    pub value: BillStatusValue,
    #[serde(with = "datetime")]
    pub changed_date_time: OffsetDateTime,
}

/// Customer contact details. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The customer's identifier in the merchant's system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.account.is_none() && self.phone.is_none()
    }
}

/// Additional invoice data.
///
/// Besides the client metadata and theme code, the server echoes back any
/// merchant-defined custom field; those are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_client_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_code: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CustomFields {
    /// Custom fields stamped with this library's name and version.
    pub fn stamped(theme_code: Option<String>) -> Self {
        Self {
            api_client: Some(CLIENT_NAME.to_owned()),
            api_client_version: Some(CLIENT_VERSION.to_owned()),
            theme_code,
            extra: BTreeMap::new(),
        }
    }
}

/// A bill as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// The merchant's site identifier in the API.
    pub site_id: String,
    /// The merchant-chosen bill identifier.
    pub bill_id: String,
    pub amount: MoneyAmount,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(with = "datetime")]
    pub creation_date_time: OffsetDateTime,
    #[serde(with = "datetime")]
    pub expiration_date_time: OffsetDateTime,
    /// Link to the hosted pay form.
    pub pay_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: CustomFields,
}

/// The API sends `null` for absent nested objects; treat it as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-supplied data for creating a bill.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBillInfo {
    /// Must be unique per merchant.
    pub bill_id: String,
    pub amount: MoneyAmount,
    pub comment: Option<String>,
    pub expiration_date_time: OffsetDateTime,
    pub customer: Customer,
    /// Where the customer lands after a successful payment. Not part of the
    /// request body; appended to the returned pay form link instead.
    pub success_url: Option<String>,
    pub theme_code: Option<String>,
}

impl CreateBillInfo {
    pub fn new(
        bill_id: impl Into<String>,
        amount: MoneyAmount,
        expiration_date_time: OffsetDateTime,
    ) -> Self {
        Self {
            bill_id: bill_id.into(),
            amount,
            comment: None,
            expiration_date_time,
            customer: Customer::default(),
            success_url: None,
            theme_code: None,
        }
    }

    /// The wire body for `PUT {billId}`.
    pub fn to_request(&self) -> CreateBillRequest {
        CreateBillRequest {
            amount: self.amount.clone(),
            comment: self.comment.clone(),
            expiration_date_time: self.expiration_date_time,
            customer: self.customer.clone(),
            custom_fields: CustomFields::stamped(self.theme_code.clone()),
        }
    }
}

/// Request body for creating a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub amount: MoneyAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(with = "datetime")]
    pub expiration_date_time: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Customer::is_empty")]
    pub customer: Customer,
    pub custom_fields: CustomFields,
}
