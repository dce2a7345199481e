//! Inbound payment notification payload.
//!
//! Provided for merchants running their own notification endpoint. Nothing
//! in this crate receives notifications or checks their authenticity.

use serde::{Deserialize, Serialize};

use super::bill::Bill;

/// A payment notification: the bill fields plus a version marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(flatten)]
    pub bill: Bill,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::BillStatusValue;
    use serde_json::json;

    #[test]
    fn test_flattened_payload() {
        let notification: Notification = serde_json::from_value(json!({
            "siteId": "site-1",
            "billId": "bill-9",
            "amount": { "value": "12.30", "currency": "RUB" },
            "status": { "value": "PAID", "changedDateTime": "2021-03-01T10:00:00+03:00" },
            "customer": { "phone": "79000000000" },
            "creationDateTime": "2021-03-01T09:00:00+03:00",
            "expirationDateTime": "2021-03-02T09:00:00+03:00",
            "payUrl": "https://oplata.qiwi.com/form/?invoice_uid=def",
            "version": "1"
        }))
        .unwrap();

        assert_eq!(notification.version, "1");
        assert_eq!(notification.bill.bill_id, "bill-9");
        assert_eq!(notification.bill.status.value, BillStatusValue::Paid);
        assert_eq!(notification.bill.customer.phone.as_deref(), Some("79000000000"));
    }
}
