//! Tool descriptors - static identity and option contract of a transform.
//!
//! A descriptor is built once when the catalog is loaded and never changes
//! afterwards. It carries everything a caller needs to present a tool and to
//! build a valid options bag for it, but no processing logic.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolError;

// ============================================================================
// Category
// ============================================================================

/// Fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Code,
    Data,
    Security,
    Utility,
    Design,
    Text,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Code,
        Category::Data,
        Category::Security,
        Category::Utility,
        Category::Design,
        Category::Text,
    ];

    /// Lowercase wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Data => "data",
            Self::Security => "security",
            Self::Utility => "utility",
            Self::Design => "design",
            Self::Text => "text",
        }
    }

    /// Parse a category name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Locale
// ============================================================================

/// Display locales a descriptor can provide content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Zh,
    Ja,
}

impl Locale {
    /// Locale used when a requested one is not provided by a descriptor.
    pub const DEFAULT: Locale = Locale::En;

    /// Parse a language tag such as `en`, `zh-CN` or `ja_JP`.
    ///
    /// Unknown tags fall back to [`Locale::DEFAULT`].
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "zh" => Self::Zh,
            "ja" => Self::Ja,
            _ => Self::DEFAULT,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Options
// ============================================================================

/// Primitive type of a declared option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "choices", rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Number,
    Boolean,
    /// Single choice among a fixed list of string values.
    Choice(Vec<String>),
}

impl OptionKind {
    /// JSON schema type name for this kind.
    pub fn schema_type(&self) -> &'static str {
        match self {
            Self::String | Self::Choice(_) => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// One named option in a descriptor's schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: OptionKind,
    pub default_value: Value,
    pub description: String,
}

impl OptionSpec {
    pub fn string(name: &str, default: &str, description: &str) -> Self {
        Self::new(name, OptionKind::String, Value::from(default), description)
    }

    /// Integer-valued number option; the default serializes without a fraction.
    pub fn integer(name: &str, default: i64, description: &str) -> Self {
        Self::new(name, OptionKind::Number, Value::from(default), description)
    }

    pub fn boolean(name: &str, default: bool, description: &str) -> Self {
        Self::new(name, OptionKind::Boolean, Value::from(default), description)
    }

    pub fn choice(name: &str, choices: &[&str], default: &str, description: &str) -> Self {
        Self::new(
            name,
            OptionKind::Choice(choices.iter().map(|c| c.to_string()).collect()),
            Value::from(default),
            description,
        )
    }

    fn new(name: &str, kind: OptionKind, default_value: Value, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default_value,
            description: description.to_string(),
        }
    }
}

// ============================================================================
// Localized content
// ============================================================================

/// Display strings of a tool in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedContent {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
}

// ============================================================================
// Descriptor
// ============================================================================

/// Identity and option contract of one transform.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    id: String,
    category: Category,
    icon: String,
    options: Vec<OptionSpec>,
    content: Vec<(Locale, LocalizedContent)>,
}

impl ToolDescriptor {
    /// Start building a descriptor.
    pub fn builder(id: &str, category: Category) -> ToolDescriptorBuilder {
        ToolDescriptorBuilder {
            id: id.to_string(),
            category,
            icon: "wrench".to_string(),
            options: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Look up a declared option by name.
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Display content for `locale`, falling back to the default locale.
    pub fn localized_content(&self, locale: Locale) -> &LocalizedContent {
        self.content
            .iter()
            .find(|(l, _)| *l == locale)
            .or_else(|| self.content.iter().find(|(l, _)| *l == Locale::DEFAULT))
            .map(|(_, c)| c)
            // The builder guarantees default-locale content exists.
            .unwrap_or(&self.content[0].1)
    }

    /// Display name in the default locale.
    pub fn name(&self) -> &str {
        &self.localized_content(Locale::DEFAULT).name
    }

    /// Description in the default locale.
    pub fn description(&self) -> &str {
        &self.localized_content(Locale::DEFAULT).description
    }

    /// Serializable catalog entry for `locale`.
    pub fn info(&self, locale: Locale) -> ToolInfo {
        let content = self.localized_content(locale);
        ToolInfo {
            id: self.id.clone(),
            name: content.name.clone(),
            description: content.description.clone(),
            category: self.category,
            icon: self.icon.clone(),
            input_placeholder: content.input_placeholder.clone(),
            options: self.options.clone(),
        }
    }
}

/// Builder for [`ToolDescriptor`].
pub struct ToolDescriptorBuilder {
    id: String,
    category: Category,
    icon: String,
    options: Vec<OptionSpec>,
    content: Vec<(Locale, LocalizedContent)>,
}

impl ToolDescriptorBuilder {
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Add display content for a locale. Later calls for the same locale win.
    pub fn content(
        mut self,
        locale: Locale,
        name: &str,
        description: &str,
        input_placeholder: Option<&str>,
    ) -> Self {
        self.content.retain(|(l, _)| *l != locale);
        self.content.push((
            locale,
            LocalizedContent {
                name: name.to_string(),
                description: description.to_string(),
                input_placeholder: input_placeholder.map(str::to_string),
            },
        ));
        self
    }

    /// Finish the descriptor.
    ///
    /// Fails when the id is blank, an option name is declared twice, a
    /// declared default does not fit its own option kind, or no content is
    /// given for the default locale.
    pub fn build(self) -> Result<ToolDescriptor, ToolError> {
        if self.id.trim().is_empty() {
            return Err(ToolError::internal("tool id must not be empty"));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.name.as_str()) {
                return Err(ToolError::internal(format!(
                    "tool {} declares option '{}' twice",
                    self.id, option.name
                )));
            }
            if !default_fits(option) {
                return Err(ToolError::internal(format!(
                    "tool {} option '{}' has a default that does not match its type",
                    self.id, option.name
                )));
            }
        }

        if !self.content.iter().any(|(l, _)| *l == Locale::DEFAULT) {
            return Err(ToolError::internal(format!(
                "tool {} has no content for the default locale",
                self.id
            )));
        }

        Ok(ToolDescriptor {
            id: self.id,
            category: self.category,
            icon: self.icon,
            options: self.options,
            content: self.content,
        })
    }
}

fn default_fits(option: &OptionSpec) -> bool {
    match (&option.kind, &option.default_value) {
        (OptionKind::String, Value::String(_)) => true,
        (OptionKind::Number, Value::Number(_)) => true,
        (OptionKind::Boolean, Value::Bool(_)) => true,
        (OptionKind::Choice(choices), Value::String(s)) => choices.contains(s),
        _ => false,
    }
}

/// Catalog entry of a tool as presented to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
    pub options: Vec<OptionSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolDescriptor {
        ToolDescriptor::builder("sample", Category::Text)
            .option(OptionSpec::integer("width", 2, "Width"))
            .option(OptionSpec::choice("mode", &["a", "b"], "a", "Mode"))
            .content(Locale::En, "Sample", "A sample tool", Some("Type here"))
            .content(Locale::Zh, "示例", "示例工具", None)
            .build()
            .unwrap()
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!(Category::parse("CODE"), Some(Category::Code));
        assert_eq!(Category::parse(" text "), Some(Category::Text));
        assert_eq!(Category::parse("music"), None);
        assert_eq!(Category::Security.to_string(), "security");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("zh-CN"), Locale::Zh);
        assert_eq!(Locale::from_tag("ja_JP"), Locale::Ja);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_localized_content_falls_back_to_default() {
        let d = sample();
        assert_eq!(d.localized_content(Locale::Zh).name, "示例");
        assert_eq!(d.localized_content(Locale::Ja).name, "Sample");
        assert_eq!(d.name(), "Sample");
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let result = ToolDescriptor::builder("dup", Category::Code)
            .option(OptionSpec::boolean("x", false, ""))
            .option(OptionSpec::boolean("x", true, ""))
            .content(Locale::En, "Dup", "Dup", None)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_default_locale_rejected() {
        let result = ToolDescriptor::builder("zh-only", Category::Code)
            .content(Locale::Zh, "仅中文", "仅中文", None)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_choice_default_must_be_a_choice() {
        let result = ToolDescriptor::builder("bad", Category::Code)
            .option(OptionSpec::choice("mode", &["a", "b"], "c", ""))
            .content(Locale::En, "Bad", "Bad", None)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_info_serializes_options() {
        let info = sample().info(Locale::En);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], "sample");
        assert_eq!(json["category"], "text");
        assert_eq!(json["inputPlaceholder"], "Type here");
        assert_eq!(json["options"][0]["type"], "number");
        assert_eq!(json["options"][0]["defaultValue"], 2);
        assert_eq!(json["options"][1]["choices"][1], "b");
    }
}
