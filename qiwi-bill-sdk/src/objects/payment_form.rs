//! Hosted checkout form links.
//!
//! The form is opened by the customer's browser; this module only builds
//! the URL and never fetches it.

use serde::{Deserialize, Serialize};

use super::amount::MoneyAmount;
use crate::{CLIENT_NAME, CLIENT_VERSION};

/// Invoice data placed into the checkout form URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// The merchant's public key.
    pub public_key: String,
    pub amount: MoneyAmount,
    pub bill_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_code: Option<String>,
}

/// Build the checkout form URL on top of `base_url`.
///
/// Parameters keep a fixed order and every value is percent-encoded.
/// Malformed input is not rejected here; the form refuses it when opened.
pub fn payment_form_url(base_url: &str, info: &PaymentInfo) -> String {
    let amount = info.amount.value_string();
    let mut params: Vec<(&str, &str)> = vec![
        ("amount", amount.as_str()),
        ("publicKey", info.public_key.as_str()),
        ("billId", info.bill_id.as_str()),
    ];
    if let Some(success_url) = &info.success_url {
        params.push(("successUrl", success_url.as_str()));
    }
    params.push(("customFields[apiClient]", CLIENT_NAME));
    params.push(("customFields[apiClientVersion]", CLIENT_VERSION));
    if let Some(theme_code) = &info.theme_code {
        params.push(("customFields[themeCode]", theme_code.as_str()));
    }

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAYMENT_URL;

    fn info() -> PaymentInfo {
        PaymentInfo {
            public_key: "pk".to_owned(),
            amount: MoneyAmount::from_str_value("100.00", "RUB").unwrap(),
            bill_id: "b1".to_owned(),
            success_url: None,
            theme_code: None,
        }
    }

    #[test]
    fn test_minimal_form_url() {
        let url = payment_form_url(PAYMENT_URL, &info());
        assert_eq!(
            url,
            format!(
                "https://oplata.qiwi.com/create?amount=100.00&publicKey=pk&billId=b1\
                 &customFields%5BapiClient%5D={CLIENT_NAME}\
                 &customFields%5BapiClientVersion%5D={CLIENT_VERSION}"
            )
        );
        assert!(!url.contains("themeCode"));
        assert!(!url.contains("successUrl"));
    }

    #[test]
    fn test_optional_parameters() {
        let mut info = info();
        info.success_url = Some("https://x/y?a=1".to_owned());
        info.theme_code = Some("Yvan-YKaSh".to_owned());

        let url = payment_form_url(PAYMENT_URL, &info);
        assert!(url.contains("&billId=b1&successUrl=https%3A%2F%2Fx%2Fy%3Fa%3D1&customFields"));
        assert!(url.ends_with("&customFields%5BthemeCode%5D=Yvan-YKaSh"));
    }

    #[test]
    fn test_base_url_with_query() {
        let url = payment_form_url("https://pay.example/create?lang=ru", &info());
        assert!(url.starts_with("https://pay.example/create?lang=ru&amount=100.00&publicKey=pk"));
        assert_eq!(url.matches('?').count(), 1);
    }

    #[test]
    fn test_values_are_escaped() {
        let mut info = info();
        info.bill_id = "order #7/a&b".to_owned();

        let url = payment_form_url(PAYMENT_URL, &info);
        assert!(url.contains("&billId=order%20%237%2Fa%26b&"));
    }
}
