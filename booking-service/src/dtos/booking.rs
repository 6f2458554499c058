use crate::error::ValidationError;
use crate::models::{Booking, NewBooking};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub const SUBMITTED_MESSAGE: &str = "Booking successfully submitted!";

/// Body of `POST /submit-form`.
///
/// Every field is optional at the decode step so a missing field surfaces as
/// a validation failure instead of a body rejection. Scalar JSON values are
/// read as text; `null`, `""`, `false` and `0` count as absent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingRequest {
    #[serde(default, deserialize_with = "scalar_as_text")]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    #[validate(required, length(min = 1))]
    pub appointment_date: Option<String>,
}

impl SubmitBookingRequest {
    pub fn into_new_booking(self, received_at: DateTime<Utc>) -> Result<NewBooking, ValidationError> {
        self.validate()?;

        let (Some(name), Some(email), Some(phone), Some(appointment_date)) =
            (self.name, self.email, self.phone, self.appointment_date)
        else {
            return Err(ValidationError::MissingFields { fields: Vec::new() });
        };

        let appointment_date = parse_appointment_date(&appointment_date)
            .ok_or(ValidationError::InvalidAppointmentDate(appointment_date))?;

        Ok(NewBooking::new(
            name,
            email,
            phone,
            appointment_date,
            received_at,
        ))
    }
}

const SCALAR: &str = "a string, number or boolean";

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) if number.as_f64() == Some(0.0) => Ok(None),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Array(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &SCALAR)),
        Value::Object(_) => Err(de::Error::invalid_type(de::Unexpected::Map, &SCALAR)),
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339 (`T` or space separated), RFC 2822, an offset-less
/// date-time, a bare date, or milliseconds since the Unix epoch.
/// Offset-less inputs are taken as UTC.
pub fn parse_appointment_date(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(millis) = value.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&with_t_separator(value)) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// "2025-01-01 10:00:00Z" -> "2025-01-01T10:00:00Z"
fn with_t_separator(value: &str) -> String {
    match value.split_once(' ') {
        Some((date, time)) if date.len() == 10 => format!("{date}T{time}"),
        _ => value.to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Element of the `GET /admin/bookings` array.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub appointment_date: String,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_hex(),
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            appointment_date: booking
                .appointment_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            created_at: booking
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SubmitBookingRequest {
        SubmitBookingRequest {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@x.com".to_string()),
            phone: Some("555-1234".to_string()),
            appointment_date: Some("2025-01-01T10:00:00Z".to_string()),
        }
    }

    fn missing_fields(result: Result<NewBooking, ValidationError>) -> Vec<String> {
        match result {
            Err(ValidationError::MissingFields { fields }) => fields,
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn complete_request_becomes_new_booking() {
        let received_at = Utc.with_ymd_and_hms(2024, 12, 1, 8, 30, 0).unwrap();
        let booking = complete().into_new_booking(received_at).unwrap();

        assert_eq!(booking.name(), "Jane Doe");
        assert_eq!(booking.email(), "jane@x.com");
        assert_eq!(booking.phone(), "555-1234");
        assert_eq!(
            booking.appointment_date(),
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(booking.created_at(), received_at);
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let cases: [(&str, fn(&mut SubmitBookingRequest)); 4] = [
            ("name", |r| r.name = None),
            ("email", |r| r.email = None),
            ("phone", |r| r.phone = None),
            ("appointmentdate", |r| r.appointment_date = None),
        ];

        for (field, clear) in cases {
            let mut request = complete();
            clear(&mut request);
            let fields = missing_fields(request.into_new_booking(Utc::now()));
            assert_eq!(fields.len(), 1, "{field}");
            assert_eq!(
                fields[0].replace('_', "").to_lowercase(),
                field.replace('_', "")
            );
        }
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let request = SubmitBookingRequest {
            email: Some(String::new()),
            phone: Some(String::new()),
            ..complete()
        };

        assert_eq!(
            missing_fields(request.into_new_booking(Utc::now())),
            vec!["email".to_string(), "phone".to_string()]
        );
    }

    #[test]
    fn no_format_checks_on_contact_fields() {
        let request = SubmitBookingRequest {
            email: Some("not-an-email".to_string()),
            phone: Some("call me".to_string()),
            ..complete()
        };

        assert!(request.into_new_booking(Utc::now()).is_ok());
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let request = SubmitBookingRequest {
            appointment_date: Some("next tuesday".to_string()),
            ..complete()
        };

        match request.into_new_booking(Utc::now()) {
            Err(ValidationError::InvalidAppointmentDate(raw)) => assert_eq!(raw, "next tuesday"),
            other => panic!("expected InvalidAppointmentDate, got {:?}", other),
        }
    }

    #[test]
    fn parses_supported_date_formats() {
        let ten_am = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_appointment_date("2025-01-01T10:00:00Z"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01T12:00:00+02:00"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01T10:00:00.000Z"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01T10:00"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01T10:00:00"), Some(ten_am));
        assert_eq!(
            parse_appointment_date("2025-01-01"),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_appointment_date(" 2025-01-01T10:00:00Z "), Some(ten_am));
    }

    #[test]
    fn parses_space_separated_and_mail_style_dates() {
        let ten_am = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_appointment_date("2025-01-01 10:00:00"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01 10:00"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01 10:00:00.000"), Some(ten_am));
        assert_eq!(parse_appointment_date("2025-01-01 12:00:00+02:00"), Some(ten_am));
        assert_eq!(
            parse_appointment_date("Wed, 01 Jan 2025 10:00:00 GMT"),
            Some(ten_am)
        );
        assert_eq!(
            parse_appointment_date("Wed, 01 Jan 2025 11:00:00 +0100"),
            Some(ten_am)
        );
    }

    #[test]
    fn parses_epoch_milliseconds() {
        assert_eq!(
            parse_appointment_date("1735725600000"),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(
            parse_appointment_date("1735725600123").map(|d| d.timestamp_subsec_millis()),
            Some(123)
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_appointment_date("2025-02-30"), None);
        assert_eq!(parse_appointment_date("2025-13-01T10:00"), None);
        assert_eq!(parse_appointment_date("tomorrow"), None);
    }

    #[test]
    fn decodes_camel_case_body() {
        let request: SubmitBookingRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"j@x.com","phone":"1","appointmentDate":"2025-01-01","extra":true}"#,
        )
        .unwrap();

        assert_eq!(request.appointment_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn scalar_values_are_read_as_text() {
        let request: SubmitBookingRequest = serde_json::from_str(
            r#"{"name":"Jane","email":true,"phone":5551234,"appointmentDate":1735725600000}"#,
        )
        .unwrap();

        assert_eq!(request.email.as_deref(), Some("true"));
        assert_eq!(request.phone.as_deref(), Some("5551234"));
        assert_eq!(request.appointment_date.as_deref(), Some("1735725600000"));
        assert!(request.into_new_booking(Utc::now()).is_ok());
    }

    #[test]
    fn falsy_values_are_absent() {
        let request: SubmitBookingRequest = serde_json::from_str(
            r#"{"name":null,"email":"","phone":0,"appointmentDate":false}"#,
        )
        .unwrap();

        assert_eq!(missing_fields(request.into_new_booking(Utc::now())).len(), 4);
    }

    #[test]
    fn structured_values_are_not_accepted() {
        let result = serde_json::from_str::<SubmitBookingRequest>(
            r#"{"name":["Jane"],"email":"j@x.com","phone":"1","appointmentDate":"2025-01-01"}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<SubmitBookingRequest>(
            r#"{"name":"Jane","email":{"a":1},"phone":"1","appointmentDate":"2025-01-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn response_uses_store_field_names() {
        let booking = NewBooking::new(
            "Jane Doe".to_string(),
            "jane@x.com".to_string(),
            "555-1234".to_string(),
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 1, 8, 30, 0).unwrap(),
        )
        .into_booking(mongodb::bson::oid::ObjectId::new());
        let id = booking.id.to_hex();

        let json = serde_json::to_value(BookingResponse::from(booking)).unwrap();
        assert_eq!(json["_id"], id.as_str());
        assert_eq!(json["appointmentDate"], "2025-01-01T10:00:00.000Z");
        assert_eq!(json["createdAt"], "2024-12-01T08:30:00.000Z");
    }
}
