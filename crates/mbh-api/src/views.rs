//! Server-rendered pages
//!
//! Templates are compiled into the binary and rendered with handlebars,
//! which HTML-escapes every `{{value}}`.

use axum::response::Html;
use handlebars::{handlebars_helper, Handlebars, RenderError, TemplateError};
use rust_decimal::Decimal;
use serde::Serialize;

use mbh_shared::utils::{capitalize, format_currency, format_date, status_badge_class};

handlebars_helper!(currency: |amount: f64| {
    format_currency(Decimal::from_f64_retain(amount).unwrap_or_default())
});
handlebars_helper!(badge: |status: str| status_badge_class(status));
handlebars_helper!(ucfirst: |s: str| capitalize(&s.replace('_', " ")));
handlebars_helper!(date: |s: str| format_date(s));
handlebars_helper!(initial: |s: str| {
    s.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
});
handlebars_helper!(to_json: |value: Json| value.to_string());

const PARTIALS: [(&str, &str); 4] = [
    ("head", include_str!("../templates/partials/head.hbs")),
    ("sidebar", include_str!("../templates/partials/sidebar.hbs")),
    ("pagination", include_str!("../templates/partials/pagination.hbs")),
    ("foot", include_str!("../templates/partials/foot.hbs")),
];

const PAGES: [(&str, &str); 5] = [
    ("login", include_str!("../templates/login.hbs")),
    ("dashboard", include_str!("../templates/dashboard.hbs")),
    ("landlords", include_str!("../templates/landlords.hbs")),
    ("payments", include_str!("../templates/payments.hbs")),
    ("locator", include_str!("../templates/locator.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("currency", Box::new(currency));
        registry.register_helper("badge", Box::new(badge));
        registry.register_helper("ucfirst", Box::new(ucfirst));
        registry.register_helper("date", Box::new(date));
        registry.register_helper("initial", Box::new(initial));
        registry.register_helper("json", Box::new(to_json));

        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, RenderError> {
        self.registry.render(name, data).map(Html)
    }
}
