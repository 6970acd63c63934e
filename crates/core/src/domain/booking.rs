use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const DEFAULT_CITY: &str = "Mumbai";

const FIRST_SLOT_HOUR: u32 = 8;
const LAST_SLOT_HOUR: u32 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    #[default]
    Home,
    Office,
    Other,
}

impl std::str::FromStr for AddressType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "office" => Ok(Self::Office),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported address type `{other}` (expected home|office|other)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Online,
    Cash,
}

impl std::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "cash" => Ok(Self::Cash),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported payment method `{other}` (expected online|cash)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAddress {
    pub street: String,
    pub city: String,
    pub address_type: AddressType,
    #[serde(default)]
    pub instructions: String,
}

impl Default for ServiceAddress {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: DEFAULT_CITY.to_owned(),
            address_type: AddressType::Home,
            instructions: String::new(),
        }
    }
}

/// Hourly booking slot between 08:00 AM and 08:00 PM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn all() -> Vec<TimeSlot> {
        (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
            .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
            .map(TimeSlot)
            .collect()
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%I:%M %p"))
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| DomainError::InvalidBookingSlot(format!("unrecognized time `{trimmed}`")))?;

        if time.minute() != 0 || !(FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).contains(&time.hour()) {
            return Err(DomainError::InvalidBookingSlot(format!(
                "`{trimmed}` is not an hourly slot between 08:00 AM and 08:00 PM"
            )));
        }

        Ok(Self(time))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub contact: ContactDetails,
    pub address: ServiceAddress,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub payment_method: PaymentMethod,
}

impl BookingRequest {
    /// Checks the fields the checkout form marks as required. `today` bounds the service date.
    pub fn validate(&self, today: NaiveDate) -> Result<(NaiveDate, TimeSlot), DomainError> {
        let contact_fields = [
            ("name", self.contact.name.as_str()),
            ("phone", self.contact.phone.as_str()),
            ("email", self.contact.email.as_str()),
            ("address", self.address.street.as_str()),
        ];
        for (field, value) in contact_fields {
            if value.trim().is_empty() {
                return Err(DomainError::MissingContactField(field.to_owned()));
            }
        }
        if !self.contact.email.contains('@') {
            return Err(DomainError::InvalidEmail(self.contact.email.trim().to_owned()));
        }

        let (Some(date), Some(slot)) = (self.date, self.time_slot) else {
            return Err(DomainError::MissingBookingSlot);
        };

        if date < today {
            return Err(DomainError::InvalidBookingSlot(format!("{date} is in the past")));
        }

        Ok((date, slot))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{BookingRequest, ContactDetails, ServiceAddress, TimeSlot};
    use crate::errors::DomainError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 15).expect("valid date")
    }

    fn request() -> BookingRequest {
        BookingRequest {
            contact: ContactDetails {
                name: "Priya S.".to_owned(),
                email: "priya@example.com".to_owned(),
                phone: "+91 98765 43210".to_owned(),
            },
            address: ServiceAddress { street: "12 Marine Drive".to_owned(), ..ServiceAddress::default() },
            date: Some(today()),
            time_slot: Some("10:00 AM".parse().expect("valid slot")),
            ..BookingRequest::default()
        }
    }

    #[test]
    fn thirteen_hourly_slots_are_offered() {
        let slots = TimeSlot::all();

        assert_eq!(slots.len(), 13);
        assert_eq!(slots[0].to_string(), "08:00 AM");
        assert_eq!(slots[12].to_string(), "08:00 PM");
    }

    #[test]
    fn slots_parse_from_twelve_and_twenty_four_hour_forms() {
        let twelve: TimeSlot = "01:00 PM".parse().expect("12h slot");
        let twenty_four: TimeSlot = "13:00".parse().expect("24h slot");

        assert_eq!(twelve, twenty_four);
        assert!(matches!("07:00 AM".parse::<TimeSlot>(), Err(DomainError::InvalidBookingSlot(_))));
        assert!(matches!("10:30 AM".parse::<TimeSlot>(), Err(DomainError::InvalidBookingSlot(_))));
    }

    #[test]
    fn missing_date_or_time_is_rejected() {
        let mut without_time = request();
        without_time.time_slot = None;
        let mut without_date = request();
        without_date.date = None;

        assert_eq!(without_time.validate(today()), Err(DomainError::MissingBookingSlot));
        assert_eq!(without_date.validate(today()), Err(DomainError::MissingBookingSlot));
    }

    #[test]
    fn past_dates_and_blank_contact_fields_are_rejected() {
        let mut past = request();
        past.date = today().pred_opt();
        let mut blank_phone = request();
        blank_phone.contact.phone = "  ".to_owned();

        assert!(matches!(past.validate(today()), Err(DomainError::InvalidBookingSlot(_))));
        assert_eq!(
            blank_phone.validate(today()),
            Err(DomainError::MissingContactField("phone".to_owned()))
        );
    }

    #[test]
    fn malformed_email_is_not_reported_as_missing() {
        let mut malformed = request();
        malformed.contact.email = "asha.example.com".to_owned();
        let mut blank = request();
        blank.contact.email = String::new();

        assert_eq!(
            malformed.validate(today()),
            Err(DomainError::InvalidEmail("asha.example.com".to_owned()))
        );
        assert_eq!(blank.validate(today()), Err(DomainError::MissingContactField("email".to_owned())));
    }

    #[test]
    fn complete_request_validates() {
        let (date, slot) = request().validate(today()).expect("valid request");

        assert_eq!(date, today());
        assert_eq!(slot.to_string(), "10:00 AM");
    }
}
