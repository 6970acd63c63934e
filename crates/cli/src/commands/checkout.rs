use chrono::{Local, NaiveDate};
use clap::Args;
use homeserv_core::config::AppConfig;
use homeserv_core::domain::booking::DEFAULT_CITY;
use homeserv_core::{
    submit_order, AddressType, BookingRequest, CheckoutPolicy, ContactDetails, PaymentMethod,
    ServiceAddress, TimeSlot,
};

use crate::commands::{cart, money, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, help = "Street address")]
    pub address: String,
    #[arg(long, default_value = DEFAULT_CITY)]
    pub city: String,
    #[arg(long, default_value = "home", help = "home|office|other")]
    pub address_type: AddressType,
    #[arg(long, default_value = "")]
    pub instructions: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
    #[arg(long, value_name = "HH:MM AM|PM", help = "Hourly slot between 08:00 AM and 08:00 PM")]
    pub time: Option<TimeSlot>,
    #[arg(long, default_value = "online", help = "online|cash")]
    pub payment: PaymentMethod,
}

impl CheckoutArgs {
    fn booking_request(&self) -> BookingRequest {
        BookingRequest {
            contact: ContactDetails {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
            address: ServiceAddress {
                street: self.address.clone(),
                city: self.city.clone(),
                address_type: self.address_type,
                instructions: self.instructions.clone(),
            },
            date: self.date,
            time_slot: self.time,
            payment_method: self.payment,
        }
    }
}

pub fn run(config: &AppConfig, args: &CheckoutArgs) -> CommandResult {
    let mut cart = cart::open(config);
    let policy = CheckoutPolicy::from(&config.checkout);
    let today = Local::now().date_naive();

    let confirmation = match submit_order(&mut cart, &args.booking_request(), &policy, today) {
        Ok(confirmation) => confirmation,
        Err(error) => return CommandResult::from_error("checkout", error),
    };

    let currency = &confirmation.currency;
    let lines = [
        format!(
            "order {} confirmed for {} at {}",
            confirmation.order_id, confirmation.date, confirmation.time_slot
        ),
        format!("lines: {}", confirmation.items.len()),
        format!("subtotal: {} {currency}", money(confirmation.summary.subtotal)),
        format!("taxes & fees: {} {currency}", money(confirmation.summary.taxes)),
        format!("delivery: {} {currency}", money(confirmation.summary.delivery_charge)),
        format!("total: {} {currency}", money(confirmation.summary.total)),
        format!("payment: {:?}", confirmation.payment_method).to_lowercase(),
    ];

    CommandResult::success("checkout", lines.join("\n"))
}
