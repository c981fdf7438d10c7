//! Escaping and validation for values that end up inside SOQL, URL paths or
//! SOAP envelopes.
//!
//! Every user-supplied value has to pass through one of these helpers before
//! it is interpolated into a request:
//!
//! ```rust
//! use forcelink_client::security::{soql, url};
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Contact WHERE LastName = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Contact WHERE LastName = 'O\\'Brien'");
//!
//! let path = format!("sobjects/Contact/{}", url::encode_param("003/../x"));
//! assert_eq!(path, "sobjects/Contact/003%2F..%2Fx");
//! ```

/// SOQL literal escaping and identifier validation.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Like [`escape_string`], and also escapes the `%` and `_` wildcards.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .chars()
            .fold(String::with_capacity(value.len() + 8), |mut out, ch| {
                match ch {
                    '%' => out.push_str("\\%"),
                    '_' => out.push_str("\\_"),
                    _ => out.push(ch),
                }
                out
            })
    }

    /// An API field name: ASCII letter first, then letters, digits or `_`.
    ///
    /// ```rust
    /// use forcelink_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("Custom_Field__c"));
    /// assert!(!soql::is_safe_field_name("Name; DELETE"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// SObject type names follow the field name rules.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL path segment encoding.
pub mod url {
    /// Percent-encode a value so it stays a single path segment or query value.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// `sobjects/{type}` followed by each encoded segment, or `None` when the
    /// type name is not a valid identifier.
    ///
    /// ```rust
    /// use forcelink_client::security::url;
    ///
    /// assert_eq!(
    ///     url::sobject_path("Account", &["Ext_Id__c", "A/1"]).as_deref(),
    ///     Some("sobjects/Account/Ext_Id__c/A%2F1")
    /// );
    /// assert_eq!(url::sobject_path("Bad'--", &[]), None);
    /// ```
    #[must_use]
    pub fn sobject_path(sobject: &str, segments: &[&str]) -> Option<String> {
        if !super::soql::is_safe_sobject_name(sobject) {
            return None;
        }
        let mut path = format!("sobjects/{}", sobject);
        for segment in segments {
            path.push('/');
            path.push_str(&encode_param(segment));
        }
        Some(path)
    }
}

/// XML text escaping for hand-built SOAP envelopes.
pub mod xml {
    /// Escape the five predefined XML entities.
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}
