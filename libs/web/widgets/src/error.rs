use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Unknown currency code '{0}'")]
    UnknownCurrency(String),

    #[error("Template registration failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub type WidgetResult<T> = Result<T, WidgetError>;
