//! Reference expressions
//!
//! String values inside argument trees may defer to other values:
//!
//! ```text
//! Resource <name>, <output>->...->output   output of a resource built earlier
//! Secret <name>                            value from the secret store
//! ```
//!
//! Anything else is a literal.

use regex::Regex;
use std::sync::LazyLock;

static RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Resource\s+([^,]+?)\s*,\s*(.+?)\s*$").expect("valid resource regex")
});

static SECRET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Secret\s+(.+?)\s*$").expect("valid secret regex"));

/// Separator between output chain segments
pub const OUTPUT_SEPARATOR: &str = "->";

/// A parsed reference expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceExpression {
    /// Output of a resource cached earlier in the same run
    Resource {
        name: String,
        output_chain: Vec<String>,
    },
    /// Value from the secret store
    Secret { name: String },
}

impl ReferenceExpression {
    /// Parse a string leaf. `Resource` is tried before `Secret`; `None` means
    /// the value is a literal.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(caps) = RESOURCE_RE.captures(value) {
            let output_chain: Vec<String> = caps[2]
                .split(OUTPUT_SEPARATOR)
                .map(|segment| segment.trim().to_string())
                .collect();

            if output_chain.iter().any(String::is_empty) {
                return None;
            }

            return Some(ReferenceExpression::Resource {
                name: caps[1].to_string(),
                output_chain,
            });
        }

        SECRET_RE
            .captures(value)
            .map(|caps| ReferenceExpression::Secret {
                name: caps[1].to_string(),
            })
    }
}

impl std::fmt::Display for ReferenceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceExpression::Resource { name, output_chain } => {
                write!(f, "Resource {}, {}", name, output_chain.join(OUTPUT_SEPARATOR))
            }
            ReferenceExpression::Secret { name } => write!(f, "Secret {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str, chain: &[&str]) -> ReferenceExpression {
        ReferenceExpression::Resource {
            name: name.to_string(),
            output_chain: chain.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_resource_single_segment() {
        assert_eq!(
            ReferenceExpression::parse("Resource core, id"),
            Some(resource("core", &["id"]))
        );
    }

    #[test]
    fn test_parse_resource_chain() {
        assert_eq!(
            ReferenceExpression::parse("Resource core, metadata->name"),
            Some(resource("core", &["metadata", "name"]))
        );
    }

    #[test]
    fn test_parse_resource_without_space_after_comma() {
        assert_eq!(
            ReferenceExpression::parse("Resource core,metadata -> name"),
            Some(resource("core", &["metadata", "name"]))
        );
    }

    #[test]
    fn test_parse_secret() {
        assert_eq!(
            ReferenceExpression::parse("Secret dbPassword"),
            Some(ReferenceExpression::Secret {
                name: "dbPassword".to_string()
            })
        );
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(ReferenceExpression::parse("Opaque"), None);
        assert_eq!(ReferenceExpression::parse(""), None);
        assert_eq!(ReferenceExpression::parse("Resource core"), None);
        assert_eq!(ReferenceExpression::parse("Secret"), None);
        assert_eq!(ReferenceExpression::parse("Resource core, a->"), None);
        assert_eq!(ReferenceExpression::parse("my Secret sauce"), None);
    }

    #[test]
    fn test_name_ends_at_first_comma() {
        // Later commas belong to the output chain
        assert_eq!(
            ReferenceExpression::parse("Resource a, b, c"),
            Some(resource("a", &["b, c"]))
        );
        assert_eq!(
            ReferenceExpression::parse("Resource a, b, c->d"),
            Some(resource("a", &["b, c", "d"]))
        );
    }

    #[test]
    fn test_resource_takes_precedence() {
        // Matches both grammars' keywords, Resource wins
        assert_eq!(
            ReferenceExpression::parse("Resource Secret x, name"),
            Some(resource("Secret x", &["name"]))
        );
    }

    #[test]
    fn test_display_round_trip() {
        let expr = resource("core", &["metadata", "name"]);
        assert_eq!(expr.to_string(), "Resource core, metadata->name");
        assert_eq!(ReferenceExpression::parse(&expr.to_string()), Some(expr));
    }
}
