//! Handlebars partials for the widgets.
//!
//! Pages embed them with `{{> form_field}}` (context: a [`FormFieldView`])
//! and `{{> stakeholders}}` (context: an object with a `stakeholders` array).

use handlebars::Handlebars;
use serde_json::json;

use crate::error::WidgetResult;
use crate::stakeholders::STAKEHOLDERS;

pub const FORM_FIELD: &str = "form_field";
pub const STAKEHOLDER_LIST: &str = "stakeholders";

const FORM_FIELD_TEMPLATE: &str = r#"<div class="form-field">
  <div class="form-field__label"><label for="{{name}}">{{label}}</label></div>
  <div class="form-field__control">
    {{#if currencyOptions}}<select name="{{name}}Currency" class="form-field__currency"{{#if disabled}} disabled{{/if}}>
      {{#each currencyOptions}}<option value="{{code}}"{{#if selected}} selected{{/if}}>{{code}}</option>{{/each}}
    </select>{{/if}}
    <input type="{{inputType}}" name="{{name}}" id="{{name}}" value="{{value}}"{{#if placeholder}} placeholder="{{placeholder}}"{{/if}}{{#if required}} required{{/if}}{{#if disabled}} disabled{{/if}}>
  </div>
</div>"#;

const STAKEHOLDERS_TEMPLATE: &str = r#"<div class="stakeholders">
  {{#each stakeholders}}<div class="stakeholders__label">{{label}}</div>
  <div class="stakeholders__value">{{value}}</div>
  {{/each}}
</div>"#;

/// Register the widget partials into an existing registry.
pub fn register_partials(registry: &mut Handlebars<'_>) -> WidgetResult<()> {
    registry.register_partial(FORM_FIELD, FORM_FIELD_TEMPLATE)?;
    registry.register_partial(STAKEHOLDER_LIST, STAKEHOLDERS_TEMPLATE)?;
    Ok(())
}

/// Context for the [`STAKEHOLDER_LIST`] partial.
pub fn stakeholders_context() -> serde_json::Value {
    json!({ "stakeholders": STAKEHOLDERS })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::form_field::FormField;

    /// A page registry embedding each partial on its own.
    fn registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        register_partials(&mut registry).unwrap();
        registry
            .register_template_string("field_page", "{{> form_field}}")
            .unwrap();
        registry
            .register_template_string("list_page", "{{> stakeholders}}")
            .unwrap();
        registry
    }

    fn render_field(field: &FormField) -> String {
        registry().render("field_page", &field.view()).unwrap()
    }

    #[test]
    fn renders_plain_field() {
        let html = render_field(
            &FormField::new("Password", "password")
                .with_type("password")
                .with_placeholder("secret"),
        );

        assert!(html.contains(r#"<label for="password">Password</label>"#));
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains(r#"placeholder="secret""#));
        assert!(!html.contains("<select"));
        assert!(!html.contains("disabled"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn renders_required_flag() {
        let html = render_field(&FormField::new("Name", "name").required(true));
        assert!(html.contains(" required>"));
    }

    #[test]
    fn renders_currency_selector() {
        let html = render_field(
            &FormField::new("Amount", "amount")
                .with_type("number")
                .with_value("12.34")
                .with_currency(Currency::Usd)
                .disabled(true),
        );

        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"<option value="CHF">CHF</option>"#));
        assert!(html.contains(r#"<option value="EUR">EUR</option>"#));
        assert!(html.contains(r#"<option value="USD" selected>USD</option>"#));
        assert!(html.contains(r#"value="12.34""#));
        assert!(html.contains(" disabled>"));
    }

    #[test]
    fn escapes_user_values() {
        let html = render_field(&FormField::new("<b>Name</b>", "name").with_value("\"x\""));

        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;Name&lt;/b&gt;"));
        assert!(html.contains("&quot;x&quot;"));
    }

    #[test]
    fn renders_stakeholders_in_order() {
        let html = registry()
            .render("list_page", &stakeholders_context())
            .unwrap();

        let mut cursor = 0;
        for stakeholder in STAKEHOLDERS {
            let label = html[cursor..]
                .find(&handlebars::html_escape(stakeholder.label))
                .map(|i| i + cursor)
                .unwrap_or_else(|| panic!("missing {}", stakeholder.label));
            cursor = label;
        }
        assert_eq!(html.matches("stakeholders__label").count(), STAKEHOLDERS.len());
        assert!(!html.contains("<input"));
    }

    #[test]
    fn partials_register_into_foreign_registry() {
        let mut registry = Handlebars::new();
        register_partials(&mut registry).unwrap();
        registry
            .register_template_string("page", "<form>{{> form_field}}</form>")
            .unwrap();

        let view = FormField::new("Name", "name").with_value("Ada").view();
        let html = registry.render("page", &view).unwrap();
        assert!(html.starts_with("<form><div class=\"form-field\">"));
        assert!(html.contains(r#"value="Ada""#));
    }
}
