//! Pin Style - style property registry and vendor prefix resolution.
//!
//! The registry stands in for a browser's computed-style enumeration: the
//! set of style properties the engine understands, some of them only under
//! a vendor prefix. It is built once
//! per process on first use and read-only afterwards, so property
//! resolution is a pure lookup.

use std::sync::OnceLock;

/// Vendor prefix in use by the engine profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Webkit,
    Moz,
    Ms,
    O,
}

impl Vendor {
    /// The token used inside hyphenated property names ("-webkit-...")
    pub fn token(self) -> &'static str {
        match self {
            Self::Webkit => "webkit",
            Self::Moz => "moz",
            Self::Ms => "ms",
            Self::O => "o",
        }
    }

    /// The prefix used in style-object keys. `ms` stays lowercase, the
    /// others are capitalized ("WebkitTransform" vs "msTransform").
    pub fn key(self) -> &'static str {
        match self {
            Self::Webkit => "Webkit",
            Self::Moz => "Moz",
            Self::Ms => "ms",
            Self::O => "O",
        }
    }
}

/// The set of style properties an engine profile supports, plus the vendor
/// prefix detected from it
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    properties: Vec<String>,
    prefix: Option<Vendor>,
}

impl StyleRegistry {
    /// Build a registry from an explicit property list, detecting the
    /// vendor prefix from the prefixed entries
    pub fn with_profile<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: Vec<String> = properties.into_iter().map(Into::into).collect();
        let prefix = detect_prefix(&properties);
        Self { properties, prefix }
    }

    /// Whether the profile supports a property under this exact
    /// hyphenated name
    pub fn supports(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name)
    }

    /// The detected vendor prefix, if any
    pub fn prefix(&self) -> Option<Vendor> {
        self.prefix
    }

    /// Resolve a camelCase-or-hyphenated property name to the style key
    /// actually used by the engine.
    ///
    /// Exact support wins; otherwise the vendor-prefixed form is tried
    /// (with the transform-origin special case); otherwise the hyphenated
    /// name comes back unchanged as a best-effort fallback.
    pub fn resolve(&self, property: &str) -> String {
        let hyphenated = hyphenate(property);
        if self.supports(&hyphenated) {
            return camelize(&hyphenated);
        }
        if let Some(vendor) = self.prefix {
            let prefixed = format!("-{}-{}", vendor.token(), hyphenated);
            let legacy_transform =
                hyphenated.contains("transform") && self.supports("-ms-transform-origin-x");
            if self.supports(&prefixed) || legacy_transform {
                return format!("{}{}", vendor.key(), capitalize(&camelize(&hyphenated)));
            }
        }
        hyphenated
    }
}

/// The process-wide registry, built from the default profile on first use
pub fn registry() -> &'static StyleRegistry {
    static REGISTRY: OnceLock<StyleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = StyleRegistry::with_profile(default_profile());
        tracing::debug!(
            properties = registry.properties.len(),
            prefix = ?registry.prefix,
            "style registry initialized"
        );
        registry
    })
}

/// Resolve a property against the process-wide registry
pub fn resolve(property: &str) -> String {
    registry().resolve(property)
}

fn detect_prefix(properties: &[String]) -> Option<Vendor> {
    for p in properties {
        if p.starts_with("-webkit-") {
            return Some(Vendor::Webkit);
        }
        if p.starts_with("-moz-") {
            return Some(Vendor::Moz);
        }
        if p.starts_with("-ms-") {
            return Some(Vendor::Ms);
        }
        if p.starts_with("-o-") {
            return Some(Vendor::O);
        }
    }
    None
}

/// "margin-top" -> "marginTop"
fn camelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// "marginTop" or "margin-top" -> "margin-top"
fn hyphenate(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The default engine profile. A realistic subset of a rendering engine's
/// property list; the entries that only exist prefixed drive prefix
/// detection and resolution.
fn default_profile() -> Vec<&'static str> {
    vec![
        "display",
        "position",
        "float",
        "clear",
        "visibility",
        "overflow",
        "overflow-x",
        "overflow-y",
        "z-index",
        "width",
        "height",
        "min-width",
        "min-height",
        "max-width",
        "max-height",
        "margin",
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "padding",
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "border",
        "border-width",
        "border-style",
        "border-color",
        "border-radius",
        "top",
        "right",
        "bottom",
        "left",
        "color",
        "background",
        "background-color",
        "background-image",
        "opacity",
        "font-family",
        "font-size",
        "font-weight",
        "font-style",
        "line-height",
        "letter-spacing",
        "text-align",
        "text-decoration",
        "white-space",
        "cursor",
        "transition",
        "animation",
        "transform",
        "transform-origin",
        // Prefixed-only entries
        "-webkit-user-select",
        "-webkit-appearance",
        "-webkit-backdrop-filter",
        "-webkit-line-clamp",
        "-webkit-mask",
        "-webkit-text-stroke",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprefixed_property_camelizes() {
        let reg = StyleRegistry::with_profile(default_profile());
        assert_eq!(reg.resolve("margin-top"), "marginTop");
        assert_eq!(reg.resolve("width"), "width");
        // camelCase input hyphenates first, then resolves the same way.
        assert_eq!(reg.resolve("marginTop"), "marginTop");
    }

    #[test]
    fn test_prefixed_property_gets_vendor_key() {
        let reg = StyleRegistry::with_profile(default_profile());
        assert_eq!(reg.prefix(), Some(Vendor::Webkit));
        assert_eq!(reg.resolve("user-select"), "WebkitUserSelect");
        assert_eq!(reg.resolve("line-clamp"), "WebkitLineClamp");
    }

    #[test]
    fn test_unknown_property_falls_back() {
        let reg = StyleRegistry::with_profile(default_profile());
        assert_eq!(reg.resolve("frob-factor"), "frob-factor");
    }

    #[test]
    fn test_ms_prefix_stays_lowercase() {
        let reg = StyleRegistry::with_profile(vec![
            "width",
            "-ms-flex",
            "-ms-transform-origin-x",
        ]);
        assert_eq!(reg.prefix(), Some(Vendor::Ms));
        assert_eq!(reg.resolve("flex"), "msFlex");
        // transform-origin legacy case: any transform* property prefixes
        // when -ms-transform-origin-x is in the profile.
        assert_eq!(reg.resolve("transform-origin"), "msTransformOrigin");
        assert_eq!(reg.resolve("transform"), "msTransform");
    }

    #[test]
    fn test_no_prefix_profile() {
        let reg = StyleRegistry::with_profile(vec!["width", "height"]);
        assert_eq!(reg.prefix(), None);
        assert_eq!(reg.resolve("user-select"), "user-select");
    }

    #[test]
    fn test_global_registry_is_initialized_once() {
        let a = registry() as *const StyleRegistry;
        let b = registry() as *const StyleRegistry;
        assert_eq!(a, b);
    }
}
