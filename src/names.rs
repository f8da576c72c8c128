//! XML name validation and utilities
//!
//! This module provides validation for NCNames and QNames according to
//! Namespaces in XML 1.0, using the XML 1.0 (Fifth Edition) name character
//! classes.

use crate::error::ValueError;

/// Check if a character may start an XML name (colon excluded)
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Check if a character may appear inside an XML name (colon excluded)
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => is_valid_ncname(prefix) && is_valid_ncname(local),
        None => is_valid_ncname(name),
    }
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<(), ValueError> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(ValueError::InvalidNcName(name.to_string()))
    }
}

/// Validate a QName and return an error if invalid
pub fn validate_qname(name: &str) -> Result<(), ValueError> {
    if is_valid_qname(name) {
        Ok(())
    } else {
        Err(ValueError::InvalidQName(name.to_string()))
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("element"));
        assert!(is_valid_ncname("my-element"));
        assert!(is_valid_ncname("my_element.v2"));
        assert!(is_valid_ncname("_element"));
        assert!(is_valid_ncname("élément"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("123element"));
        assert!(!is_valid_ncname("-element"));
        assert!(!is_valid_ncname("prefix:element"));
        assert!(!is_valid_ncname("has space"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("element"));
        assert!(is_valid_qname("prefix:element"));
        assert!(is_valid_qname("xs:schema"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":element"));
        assert!(!is_valid_qname("element:"));
        assert!(!is_valid_qname("a:b:c"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
    }

    #[test]
    fn test_validate_errors() {
        assert!(validate_ncname("element").is_ok());
        assert_eq!(
            validate_ncname("1st"),
            Err(ValueError::InvalidNcName("1st".to_string()))
        );
        assert_eq!(
            validate_qname("xs:"),
            Err(ValueError::InvalidQName("xs:".to_string()))
        );
    }
}
