//! Escaping and validation helpers.
//!
//! User-provided values that end up in URLs, SOQL object names, or SOAP
//! envelopes go through these functions first.

/// SOQL identifier validation.
pub mod soql {
    /// Validate that a name is safe to use as an SObject or field name.
    ///
    /// Names must start with a letter and contain only ASCII alphanumerics
    /// and underscores.
    ///
    /// ```rust
    /// use simpleforce_client::security::soql;
    ///
    /// assert!(soql::is_safe_sobject_name("Account"));
    /// assert!(soql::is_safe_sobject_name("Custom_Object__c"));
    /// assert!(!soql::is_safe_sobject_name("Bad'; DROP TABLE--"));
    /// ```
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }
}

/// URL encoding utilities.
pub mod url {
    /// Percent-encode a value for use as a single path segment or query value.
    ///
    /// ```rust
    /// use simpleforce_client::security::url;
    ///
    /// assert_eq!(url::encode_param("001/../x"), "001%2F..%2Fx");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}

/// XML escaping for SOAP envelopes.
pub mod xml {
    /// Escape the five predefined XML entities.
    ///
    /// ```rust
    /// use simpleforce_client::security::xml;
    ///
    /// assert_eq!(xml::escape("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    /// ```
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
