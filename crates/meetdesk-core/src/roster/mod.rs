//! Athlete roster editing: local form validation and the roster controller.

pub mod controller;
pub mod form;

pub use controller::RosterEditor;
pub use form::{parse_grad_year, parse_optional_date, AthleteForm, FormError, GRAD_YEAR_RANGE};
