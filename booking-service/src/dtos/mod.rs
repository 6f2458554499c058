pub mod booking;

pub use booking::{
    parse_appointment_date, BookingResponse, ErrorResponse, MessageResponse,
    SubmitBookingRequest, SUBMITTED_MESSAGE,
};
