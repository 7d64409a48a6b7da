//! Indicator entity model.

use std::fmt;

use serde::Deserialize;

/// No indicator may declare more than this many inputs, options, or outputs.
///
/// Emitted as `TI_MAXINDPARAMS`; the metadata table sizes its name arrays with it.
pub const MAX_PARAMS: usize = 10;

/// One indicator definition, keyed by its unique `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// Unique lowercase identifier: file-system key and sort key
    pub name: String,
    /// Human-readable label
    pub full_name: String,
    pub category: Category,
    /// Input array names, in positional order
    pub inputs: Vec<String>,
    /// Option names, in positional order
    pub options: Vec<String>,
    /// Output array names, in positional order
    pub outputs: Vec<String>,
    pub capabilities: Capabilities,
}

impl Indicator {
    /// Create an indicator with no inputs, options, outputs or capabilities.
    pub fn new(name: impl Into<String>, full_name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            category,
            inputs: Vec::new(),
            options: Vec::new(),
            outputs: Vec::new(),
            capabilities: Capabilities::NONE,
        }
    }

    pub fn inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities = self.capabilities.with(capability);
        self
    }

    /// Whether this indicator declares the given capability.
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Indicator category. Emitted as a `TI_TYPE_*` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Overlay,
    Indicator,
    Math,
    Simple,
    Comparative,
}

impl Category {
    /// All categories, in tag order.
    pub const ALL: [Category; 5] = [
        Category::Overlay,
        Category::Indicator,
        Category::Math,
        Category::Simple,
        Category::Comparative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Overlay => "overlay",
            Category::Indicator => "indicator",
            Category::Math => "math",
            Category::Simple => "simple",
            Category::Comparative => "comparative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional feature an indicator may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Capability {
    /// A slow, obviously correct implementation used to cross-check the fast one
    #[serde(rename = "ref")]
    Reference,
    /// Incremental computation through a `ti_stream` handle
    #[serde(rename = "stream")]
    Streaming,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Reference, Capability::Streaming];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Reference => "ref",
            Capability::Streaming => "stream",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of capabilities declared by an indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Vec<Capability>")]
pub struct Capabilities {
    reference: bool,
    streaming: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        reference: false,
        streaming: false,
    };

    pub const ALL: Self = Self {
        reference: true,
        streaming: true,
    };

    /// Return a copy of this set with `capability` added.
    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Reference => self.reference = true,
            Capability::Streaming => self.streaming = true,
        }
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Reference => self.reference,
            Capability::Streaming => self.streaming,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.reference && !self.streaming
    }

    /// Declared capabilities in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl From<Vec<Capability>> for Capabilities {
    fn from(list: Vec<Capability>) -> Self {
        list.into_iter()
            .fold(Capabilities::NONE, |set, capability| set.with(capability))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Capabilities::NONE, |set, capability| set.with(capability))
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_from_list() {
        let caps: Capabilities =
            serde_json::from_str(r#"["stream", "ref", "stream"]"#).unwrap();
        assert_eq!(caps, Capabilities::ALL);

        let none: Capabilities = serde_json::from_str("[]").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_capabilities_reject_unknown() {
        assert!(serde_json::from_str::<Capabilities>(r#"["simd"]"#).is_err());
    }

    #[test]
    fn test_capabilities_iter_is_canonical() {
        let caps = Capabilities::NONE
            .with(Capability::Streaming)
            .with(Capability::Reference);
        let listed: Vec<_> = caps.iter().collect();
        assert_eq!(listed, vec![Capability::Reference, Capability::Streaming]);
        assert_eq!(caps.to_string(), "ref, stream");
        assert_eq!(Capabilities::NONE.to_string(), "none");
    }

    #[test]
    fn test_indicator_builder() {
        let ema = Indicator::new("ema", "Exponential Moving Average", Category::Overlay)
            .inputs(["real"])
            .options(["period"])
            .outputs(["ema"])
            .capability(Capability::Reference);

        assert!(ema.has(Capability::Reference));
        assert!(!ema.has(Capability::Streaming));
        assert_eq!(ema.options, vec!["period".to_string()]);
    }

    #[test]
    fn test_category_deserialize() {
        let cat: Category = serde_json::from_str(r#""comparative""#).unwrap();
        assert_eq!(cat, Category::Comparative);
        assert!(serde_json::from_str::<Category>(r#""Overlay""#).is_err());
    }
}
