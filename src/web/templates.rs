use anyhow::Result;
use minijinja::{Environment, Value};
use rust_embed::RustEmbed;

/// Embedded template files
#[derive(RustEmbed)]
#[folder = "web/templates/"]
struct TemplateAssets;

/// Template rendering engine with Minijinja
#[derive(Clone)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        // Load all embedded templates
        for file_path in TemplateAssets::iter() {
            if let Some(template_file) = TemplateAssets::get(&file_path) {
                let template_str = std::str::from_utf8(&template_file.data)?;
                env.add_template_owned(file_path.to_string(), template_str.to_string())?;
            }
        }

        env.add_function("asset_url", asset_url_helper);

        Ok(Self { env })
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(template_name)?;
        template.render(context)
    }
}

/// Template helper function to generate asset URLs
fn asset_url_helper(_state: &minijinja::State, path: String) -> Result<Value, minijinja::Error> {
    Ok(Value::from(format!("/static/{}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_template_renders() {
        let templates = Templates::new().unwrap();
        let html = templates.render("index.html", &json!({})).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("/static/js/viewer.js"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let templates = Templates::new().unwrap();
        assert!(templates.render("missing.html", &json!({})).is_err());
    }
}
