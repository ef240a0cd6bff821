//! Presentational form widgets rendered server-side with Handlebars.
//!
//! - [`FormField`]: labelled input, optionally paired with a currency selector
//!   whose values go through [`normalize_decimal`]
//! - [`STAKEHOLDERS`]: fixed label/value list rendered as two columns
//! - [`templates`]: the partials for both, registered into any `Handlebars`
//!   registry with [`register_partials`]

mod currency;
mod decimal;
mod error;
mod form_field;
mod stakeholders;
pub mod templates;

pub use currency::Currency;
pub use decimal::normalize_decimal;
pub use error::{WidgetError, WidgetResult};
pub use form_field::{CurrencyOption, FormField, FormFieldView};
pub use stakeholders::{STAKEHOLDERS, Stakeholder};
pub use templates::{register_partials, stakeholders_context};
