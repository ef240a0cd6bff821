use serde::Serialize;

use crate::currency::Currency;
use crate::decimal::normalize_decimal;
use crate::error::WidgetResult;

/// A labelled, controlled input.
///
/// The field never stores what the user types: [`FormField::handle_input`]
/// returns the value the owner should store and pass back in on the next
/// render. With a currency attached the input becomes a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    label: String,
    name: String,
    value: String,
    input_type: String,
    placeholder: Option<String>,
    disabled: bool,
    required: bool,
    currency: Option<Currency>,
}

impl FormField {
    pub fn new(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            value: String::new(),
            input_type: "text".to_string(),
            placeholder: None,
            disabled: false,
            required: false,
            currency: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach a currency selector with `selected` as the current unit.
    pub fn with_currency(mut self, selected: Currency) -> Self {
        self.currency = Some(selected);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    /// Currency inputs are always plain text so the normaliser controls them.
    pub fn effective_type(&self) -> &str {
        if self.currency.is_some() {
            "text"
        } else {
            &self.input_type
        }
    }

    /// Value to forward for raw input: normalised when a currency is attached,
    /// untouched otherwise.
    pub fn handle_input(&self, raw: &str) -> String {
        match self.currency {
            Some(_) => normalize_decimal(raw),
            None => raw.to_string(),
        }
    }

    /// Parse a unit chosen in the selector.
    pub fn handle_currency_change(&self, code: &str) -> WidgetResult<Currency> {
        let currency = code.parse()?;
        tracing::debug!(field = %self.name, currency = %currency, "Currency changed");
        Ok(currency)
    }

    /// Template context for the `form_field` partial.
    pub fn view(&self) -> FormFieldView {
        FormFieldView {
            label: self.label.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            input_type: self.effective_type().to_string(),
            placeholder: self.placeholder.clone(),
            disabled: self.disabled,
            required: self.required,
            currency_options: self
                .currency
                .map(|selected| {
                    Currency::ALL
                        .into_iter()
                        .map(|c| CurrencyOption {
                            code: c.code(),
                            selected: c == selected,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldView {
    pub label: String,
    pub name: String,
    pub value: String,
    pub input_type: String,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub required: bool,
    pub currency_options: Vec<CurrencyOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyOption {
    pub code: &'static str,
    pub selected: bool,
}
