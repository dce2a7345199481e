//! Subcommands, one per bills API operation.

use clap::{Args, Subcommand};
use qiwi_bill_sdk::objects::{CreateBillInfo, Customer, MoneyAmount, PaymentInfo};
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::config::LoadedConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a bill
    Get { bill_id: String },

    /// Create a bill and print it with its pay form link
    Create(CreateArgs),

    /// Cancel an unpaid bill
    Cancel { bill_id: String },

    /// Refund part or all of a paid bill
    Refund {
        bill_id: String,
        refund_id: String,
        #[command(flatten)]
        amount: AmountArgs,
    },

    /// Show a refund
    RefundStatus { bill_id: String, refund_id: String },

    /// Print a checkout form link without creating a bill
    Form {
        bill_id: String,
        #[command(flatten)]
        amount: AmountArgs,
        #[arg(long)]
        success_url: Option<String>,
        #[arg(long)]
        theme_code: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AmountArgs {
    /// Amount, e.g. 100 or 99.95
    #[arg(long)]
    amount: String,

    /// ISO currency code
    #[arg(long, default_value = "RUB")]
    currency: String,
}

impl AmountArgs {
    fn money(&self) -> anyhow::Result<MoneyAmount> {
        Ok(MoneyAmount::from_str_value(
            &self.amount,
            self.currency.as_str(),
        )?)
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    bill_id: String,

    #[command(flatten)]
    amount: AmountArgs,

    #[arg(long)]
    comment: Option<String>,

    /// Minutes until the bill expires
    #[arg(long, default_value_t = 24 * 60, value_parser = clap::value_parser!(i64).range(1..))]
    expires_in_minutes: i64,

    #[arg(long)]
    email: Option<String>,

    /// Customer identifier in the merchant's system
    #[arg(long)]
    account: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    success_url: Option<String>,

    #[arg(long)]
    theme_code: Option<String>,
}

impl CreateArgs {
    fn into_info(self) -> anyhow::Result<CreateBillInfo> {
        let amount = self.amount.money()?;
        let expires_at = self
            .expires_in_minutes
            .checked_mul(60)
            .and_then(|seconds| OffsetDateTime::now_utc().checked_add(Duration::seconds(seconds)))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "--expires-in-minutes {} is too far in the future",
                    self.expires_in_minutes
                )
            })?;

        let mut info = CreateBillInfo::new(self.bill_id, amount, expires_at);
        info.comment = self.comment;
        info.customer = Customer {
            email: self.email,
            account: self.account,
            phone: self.phone,
        };
        info.success_url = self.success_url;
        info.theme_code = self.theme_code;
        Ok(info)
    }
}

/// Run `command` and print its result on stdout.
pub async fn run(command: Command, config: &LoadedConfig) -> anyhow::Result<()> {
    let client = config.client();

    match command {
        Command::Get { bill_id } => {
            let bill = client.get_bill_info(&bill_id).await?;
            tracing::info!(bill_id = %bill.bill_id, status = %bill.status.value, "Fetched bill");
            print_json(&bill)
        }
        Command::Create(args) => {
            let info = args.into_info()?;
            let bill = client.create_bill(&info).await?;
            tracing::info!(bill_id = %bill.bill_id, "Bill created");
            print_json(&bill)
        }
        Command::Cancel { bill_id } => {
            let bill = client.cancel_bill(&bill_id).await?;
            tracing::info!(bill_id = %bill.bill_id, status = %bill.status.value, "Bill cancelled");
            print_json(&bill)
        }
        Command::Refund {
            bill_id,
            refund_id,
            amount,
        } => {
            let refund = client.refund(&bill_id, &refund_id, amount.money()?).await?;
            tracing::info!(refund_id = %refund.refund_id, status = %refund.status, "Refund issued");
            print_json(&refund)
        }
        Command::RefundStatus { bill_id, refund_id } => {
            let refund = client.get_refund_info(&bill_id, &refund_id).await?;
            print_json(&refund)
        }
        Command::Form {
            bill_id,
            amount,
            success_url,
            theme_code,
        } => {
            let info = PaymentInfo {
                public_key: config.public_key()?.to_owned(),
                amount: amount.money()?,
                bill_id,
                success_url,
                theme_code,
            };
            println!("{}", client.create_payment_form(&info));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
