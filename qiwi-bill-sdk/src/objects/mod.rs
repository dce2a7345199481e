//! Request and response types of the bills API.

pub mod amount;
pub mod bill;
pub mod datetime;
pub mod error;
pub mod notification;
pub mod payment_form;
pub mod refund;

pub use amount::{AmountError, MoneyAmount};
pub use bill::{
    Bill, BillStatus, BillStatusValue, CreateBillInfo, CreateBillRequest, CustomFields, Customer,
};
pub use error::ErrorResponse;
pub use notification::Notification;
pub use payment_form::{PaymentInfo, payment_form_url};
pub use refund::{Refund, RefundBillRequest, RefundStatus};
