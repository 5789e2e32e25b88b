//! Snippet generator.
//! Turns shortcode parameters into a registered configuration plus the HTML
//! fragment that loads it in the browser. Identifiers are emitted as given:
//! callers embedding untrusted ids must check them with `is_safe_identifier`.

use std::collections::HashMap;

use crate::model::Config;
use crate::overrides::apply_overrides;
use crate::service::ParticlesService;

pub const CONFIG_KEY: &str = "config";
pub const ELEMENT_ID_KEY: &str = "id";

/// Everything a page template needs to embed one particles container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcodeData {
    pub element_id: String,
    /// Config endpoint with the `config` query parameter already attached.
    pub config_url: String,
    pub js_path: String,
}

impl ShortcodeData {
    pub fn render(&self) -> String {
        format!(
            r#"
<div id="{element_id}" style="width: 100%; height: 100%; position: absolute; top: 0; left: 0; z-index: -1;"></div>
<script src="{js_path}"></script>
<script>
document.addEventListener('DOMContentLoaded', function() {{
  particlesJS.load('{element_id}', '{config_url}', function() {{
    console.log('particles.js loaded');
  }});
}});
</script>
"#,
            element_id = self.element_id,
            js_path = self.js_path,
            config_url = self.config_url,
        )
    }
}

impl ParticlesService {
    /// Builds and registers the configuration described by `params`.
    pub fn shortcode_data(&self, params: &HashMap<String, String>) -> ShortcodeData {
        let config_id = match non_empty(params, CONFIG_KEY) {
            Some(id) => id.to_string(),
            None => self.randomizer.synthesize_id(),
        };
        let element_id = match non_empty(params, ELEMENT_ID_KEY) {
            Some(id) => id.to_string(),
            None => format!("particles-{}", config_id),
        };

        let config = apply_overrides(&Config::default(), params);
        self.registry.put(config_id.clone(), config);

        ShortcodeData {
            element_id,
            config_url: format!("{}?{}={}", self.config_endpoint(), CONFIG_KEY, config_id),
            js_path: self.js_path().to_string(),
        }
    }

    /// Renders the HTML fragment for `params`, registering its configuration.
    pub fn shortcode(&self, params: &HashMap<String, String>) -> String {
        self.shortcode_data(params).render()
    }
}

/// True for ids safe to emit into the snippet unescaped: `[A-Za-z0-9_-]+`.
pub fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
