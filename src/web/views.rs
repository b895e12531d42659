//! HTML page rendering.
//!
//! Page templates are compiled into the binary and registered under names
//! like `patients/list`. Every page pulls in the `header` and `footer`
//! partials.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/pages/partials/header.hbs")),
    ("footer", include_str!("../../templates/pages/partials/footer.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("patients/list", include_str!("../../templates/pages/patients/list.hbs")),
    ("patients/detail", include_str!("../../templates/pages/patients/detail.hbs")),
    ("patients/edit", include_str!("../../templates/pages/patients/edit.hbs")),
    ("patients/add", include_str!("../../templates/pages/patients/add.hbs")),
    ("employees/list", include_str!("../../templates/pages/employees/list.hbs")),
    ("employees/detail", include_str!("../../templates/pages/employees/detail.hbs")),
    ("employees/edit", include_str!("../../templates/pages/employees/edit.hbs")),
    ("employees/add", include_str!("../../templates/pages/employees/add.hbs")),
    ("services/list", include_str!("../../templates/pages/services/list.hbs")),
    ("services/detail", include_str!("../../templates/pages/services/detail.hbs")),
    ("services/edit", include_str!("../../templates/pages/services/edit.hbs")),
    ("services/add", include_str!("../../templates/pages/services/add.hbs")),
    ("appointments/list", include_str!("../../templates/pages/appointments/list.hbs")),
    ("appointments/detail", include_str!("../../templates/pages/appointments/detail.hbs")),
    ("appointments/edit", include_str!("../../templates/pages/appointments/edit.hbs")),
    ("appointments/add", include_str!("../../templates/pages/appointments/add.hbs")),
    ("payments/list", include_str!("../../templates/pages/payments/list.hbs")),
    ("payments/detail", include_str!("../../templates/pages/payments/detail.hbs")),
    ("payments/edit", include_str!("../../templates/pages/payments/edit.hbs")),
    ("payments/add", include_str!("../../templates/pages/payments/add.hbs")),
    ("reports/workload_form", include_str!("../../templates/pages/reports/workload_form.hbs")),
    ("error_report", include_str!("../../templates/pages/error_report.hbs")),
];

/// Registry of the application's HTML pages
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Register the partials and every page
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    /// Render a registered page with `data` as its context
    pub fn render<T: Serialize>(&self, page: &str, data: &T) -> Result<Html<String>> {
        Ok(Html(self.registry.render(page, data)?))
    }

    #[cfg(test)]
    fn has_page(&self, page: &str) -> bool {
        self.registry.has_template(page)
    }
}
