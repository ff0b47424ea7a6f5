//! Stylesheet construction

use std::fmt;

/// Body of a CSS rule
#[derive(Debug, Clone, PartialEq)]
pub enum Declarations {
    /// Ordered `(property, value)` pairs
    Properties(Vec<(String, String)>),
    /// A declaration block written out verbatim
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Declarations,
}

/// An ordered list of CSS rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule made of `(property, value)` pairs
    pub fn rule<S, I, K, V>(mut self, selector: S, properties: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.rules.push(Rule {
            selector: selector.into(),
            declarations: Declarations::Properties(properties),
        });
        self
    }

    /// Append a rule whose body is given as a raw string, e.g. `"width: 100%;"`
    pub fn raw_rule(mut self, selector: impl Into<String>, body: impl Into<String>) -> Self {
        self.rules.push(Rule {
            selector: selector.into(),
            declarations: Declarations::Raw(body.into()),
        });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        match &self.declarations {
            Declarations::Properties(properties) => {
                for (property, value) in properties {
                    writeln!(f, "    {}: {};", property, value)?;
                }
            }
            Declarations::Raw(body) => writeln!(f, "    {}", body)?,
        }
        f.write_str("}")
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
