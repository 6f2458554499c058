use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A validated submission that has not been stored yet.
///
/// Only obtainable through request validation, so every value carries
/// non-empty contact fields and a parsed appointment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    name: String,
    email: String,
    phone: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    appointment_date: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl NewBooking {
    /// Timestamps are truncated to milliseconds, the resolution of a BSON date.
    pub(crate) fn new(
        name: String,
        email: String,
        phone: String,
        appointment_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            appointment_date: appointment_date.trunc_subsecs(3),
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn appointment_date(&self) -> DateTime<Utc> {
        self.appointment_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn into_booking(self, id: ObjectId) -> Booking {
        Booking {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            appointment_date: self.appointment_date,
            created_at: self.created_at,
        }
    }
}

/// A stored booking, as held in the `bookings` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub appointment_date: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}
