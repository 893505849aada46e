//! URL analyzer.
//!
//! Breaks a URL into its components and flags common security concerns.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::domains::tools::definitions::common::{non_blank, to_json_string};
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const EMPTY_MESSAGE: &str = "Please provide a URL to analyze.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Analysis {
    original: String,
    components: Components,
    parsed: Parsed,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<Validation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security: Option<Security>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Components {
    protocol: String,
    hostname: String,
    port: String,
    pathname: String,
    search: String,
    hash: String,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parsed {
    domain: String,
    subdomain: Option<String>,
    registrable_domain: String,
    path: String,
    query: Map<String, Value>,
    fragment: String,
}

#[derive(Debug, Serialize)]
struct Validation {
    valid: bool,
    errors: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Security {
    https: bool,
    has_credentials: bool,
    suspicious_patterns: Vec<String>,
    recommendations: Vec<String>,
}

/// Parses URLs and reports components, query parameters and security hints.
pub struct UrlAnalyzerTool {
    descriptor: ToolDescriptor,
}

impl UrlAnalyzerTool {
    pub const ID: &'static str = "url-analyzer";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Utility)
            .icon("link")
            .option(OptionSpec::choice("format", &["json", "text"], "json", "Report format"))
            .option(OptionSpec::boolean("includeValidation", true, "Include the validation section"))
            .option(OptionSpec::boolean("includeSecurity", true, "Include the security section"))
            .content(
                Locale::En,
                "URL Analyzer",
                "Analyze URL structure, query parameters and security",
                Some("https://example.com/path?query=value"),
            )
            .content(
                Locale::Zh,
                "URL 分析器",
                "分析 URL 结构、查询参数和安全性",
                Some("https://example.com/path?query=value"),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for UrlAnalyzerTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        non_blank(input).is_none_or(|text| Url::parse(text).is_ok())
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let Some(text) = non_blank(input) else {
            return Ok(EMPTY_MESSAGE.to_string());
        };

        let url = Url::parse(text)
            .map_err(|e| ToolError::transform(format!("invalid URL: {}", e)))?;

        let analysis = Analysis {
            original: text.to_string(),
            components: components(&url),
            parsed: parsed(&url),
            validation: options.bool("includeValidation")?.then(|| Validation {
                valid: true,
                errors: Vec::new(),
            }),
            security: options.bool("includeSecurity")?.then(|| security(&url)),
        };

        match options.str("format")? {
            "text" => Ok(render_text(&analysis)),
            _ => to_json_string(&analysis, 2),
        }
    }
}

fn components(url: &Url) -> Components {
    Components {
        protocol: format!("{}:", url.scheme()),
        hostname: url.host_str().unwrap_or_default().to_string(),
        port: url
            .port_or_known_default()
            .map(|p| p.to_string())
            .unwrap_or_default(),
        pathname: url.path().to_string(),
        search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
        hash: url.fragment().map(|f| format!("#{}", f)).unwrap_or_default(),
        username: Some(url.username())
            .filter(|u| !u.is_empty())
            .map(str::to_string),
        password: url.password().map(str::to_string),
    }
}

fn parsed(url: &Url) -> Parsed {
    let host = url.host_str().unwrap_or_default();
    let labels: Vec<&str> = host.split('.').collect();

    let query = url
        .query()
        .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    Parsed {
        domain: host.to_string(),
        subdomain: (labels.len() > 2).then(|| labels[..labels.len() - 2].join(".")),
        registrable_domain: if labels.len() > 1 {
            labels[labels.len() - 2..].join(".")
        } else {
            host.to_string()
        },
        path: url.path().to_string(),
        query,
        fragment: url.fragment().unwrap_or_default().to_string(),
    }
}

fn security(url: &Url) -> Security {
    let host = url.host_str().unwrap_or_default();
    let https = url.scheme() == "https";
    let has_credentials = !url.username().is_empty() || url.password().is_some();

    let mut suspicious_patterns = Vec::new();
    if host.contains("..") {
        suspicious_patterns.push("Double dots in hostname".to_string());
    }
    if host == "localhost" || host.starts_with("127.") || host == "[::1]" {
        suspicious_patterns.push("Localhost or loopback address".to_string());
    }
    if host.starts_with("xn--") || host.contains(".xn--") {
        suspicious_patterns.push("Internationalized (punycode) hostname".to_string());
    }

    let mut recommendations = Vec::new();
    if !https {
        recommendations.push("Use HTTPS for secure communication".to_string());
    }
    if has_credentials {
        recommendations.push("Avoid including credentials in URLs".to_string());
    }

    Security {
        https,
        has_credentials,
        suspicious_patterns,
        recommendations,
    }
}

fn render_text(analysis: &Analysis) -> String {
    let c = &analysis.components;
    let or_none = |s: &str| if s.is_empty() { "None".to_string() } else { s.to_string() };

    let mut lines = vec![
        "URL Analysis".to_string(),
        "=".repeat(50),
        String::new(),
        format!("Original URL: {}", analysis.original),
        String::new(),
        "Components:".to_string(),
        format!("  Protocol: {}", c.protocol),
        format!("  Hostname: {}", c.hostname),
        format!("  Port: {}", or_none(&c.port)),
        format!("  Path: {}", c.pathname),
        format!("  Query: {}", or_none(&c.search)),
        format!("  Fragment: {}", or_none(&c.hash)),
    ];

    if !analysis.parsed.query.is_empty() {
        lines.push(String::new());
        lines.push("Query Parameters:".to_string());
        for (key, value) in &analysis.parsed.query {
            lines.push(format!("  {} = {}", key, value.as_str().unwrap_or_default()));
        }
    }

    if let Some(validation) = &analysis.validation {
        lines.push(String::new());
        lines.push("Validation:".to_string());
        lines.push(format!("  Valid: {}", yes_no(validation.valid)));
    }

    if let Some(security) = &analysis.security {
        lines.push(String::new());
        lines.push("Security:".to_string());
        lines.push(format!("  HTTPS: {}", yes_no(security.https)));
        lines.push(format!("  Has Credentials: {}", yes_no(security.has_credentials)));
        if !security.suspicious_patterns.is_empty() {
            lines.push(format!(
                "  Suspicious Patterns: {}",
                security.suspicious_patterns.join(", ")
            ));
        }
        if !security.recommendations.is_empty() {
            lines.push(format!(
                "  Recommendations: {}",
                security.recommendations.join(", ")
            ));
        }
    }

    lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::json;

    fn run(input: &str, supplied: Value) -> Result<String, ToolError> {
        let tool = UrlAnalyzerTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )?;
        tool.run(input, &options)
    }

    #[test]
    fn test_json_report() {
        let out = run(
            "https://user:pw@api.shop.example.com/v1/items?q=rust%20lang&page=2#top",
            json!({}),
        )
        .unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(report["components"]["protocol"], "https:");
        assert_eq!(report["components"]["hostname"], "api.shop.example.com");
        assert_eq!(report["components"]["port"], "443");
        assert_eq!(report["components"]["search"], "?q=rust%20lang&page=2");
        assert_eq!(report["components"]["hash"], "#top");
        assert_eq!(report["components"]["username"], "user");
        assert_eq!(report["parsed"]["subdomain"], "api.shop");
        assert_eq!(report["parsed"]["registrableDomain"], "example.com");
        assert_eq!(report["parsed"]["query"], json!({"q": "rust lang", "page": "2"}));
        assert_eq!(report["validation"]["valid"], true);
        assert_eq!(report["security"]["https"], true);
        assert_eq!(report["security"]["hasCredentials"], true);
        assert_eq!(
            report["security"]["recommendations"],
            json!(["Avoid including credentials in URLs"])
        );
    }

    #[test]
    fn test_sections_can_be_omitted() {
        let out = run(
            "http://localhost:8080/",
            json!({"includeValidation": false, "includeSecurity": false}),
        )
        .unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();
        assert!(report.get("validation").is_none());
        assert!(report.get("security").is_none());
        assert_eq!(report["components"]["port"], "8080");
        assert!(report["parsed"]["subdomain"].is_null());
    }

    #[test]
    fn test_text_report() {
        let out = run("http://localhost/a?x=1", json!({"format": "text"})).unwrap();
        assert!(out.starts_with("URL Analysis\n"));
        assert!(out.contains("  HTTPS: No"));
        assert!(out.contains("Localhost or loopback address"));
        assert!(out.contains("  x = 1"));
    }

    #[test]
    fn test_invalid_url_fails() {
        assert!(run("not a url", json!({})).is_err());
        assert_eq!(run(" ", json!({})).unwrap(), EMPTY_MESSAGE);
    }
}
