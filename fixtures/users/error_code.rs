// Code generated by errcode. DO NOT EDIT.
//! Error codes for the users service.

#![allow(dead_code, non_upper_case_globals)]

use std::collections::HashMap;
use std::fmt::Display;

pub const PACKAGE_NAME: &str = "error_codes";
pub const SERVICE_NAME: &str = "users";
pub const SERVICE_ABBREVIATION: &str = "USR";

// Common error codes
pub const USR_INTERNAL: &str = "USR_INTERNAL";
pub const USR_INVALID_ARGUMENT: &str = "USR_INVALID_ARGUMENT";

// users service-specific error codes
pub const USR_NOT_FOUND: &str = "USR_NOT_FOUND";
pub const USR_EMAIL_TAKEN: &str = "USR_EMAIL_TAKEN";
pub const USR_QUOTA_EXCEEDED: &str = "USR_QUOTA_EXCEEDED";

/// Error code → message template.
pub static ERROR_MESSAGES: &[(&str, &str)] = &[
    (USR_INTERNAL, "internal server error"),
    (USR_INVALID_ARGUMENT, "invalid value for %s"),
    (USR_NOT_FOUND, "missing %s with id %s"),
    (USR_EMAIL_TAKEN, "email \"%s\" is already registered"),
    (USR_QUOTA_EXCEEDED, "storage at 100%% of %d MB"),
];

/// Error code → category.
pub static ERROR_CATEGORIES: &[(&str, &str)] = &[
    (USR_INTERNAL, "server"),
    (USR_INVALID_ARGUMENT, "client"),
    (USR_NOT_FOUND, "client"),
    (USR_EMAIL_TAKEN, "conflict"),
    (USR_QUOTA_EXCEEDED, "limit"),
];

/// Error code → context fields filling its placeholders, in order.
pub static ERROR_CONTEXT_FIELDS: &[(&str, &[&str])] = &[
    (USR_INTERNAL, &[]),
    (USR_INVALID_ARGUMENT, &["argument"]),
    (USR_NOT_FOUND, &["resource", "id"]),
    (USR_EMAIL_TAKEN, &["email"]),
    (USR_QUOTA_EXCEEDED, &["limit_mb"]),
];

/// Message template for `code`.
pub fn error_message(code: &str) -> Option<&'static str> {
    find_entry(ERROR_MESSAGES, code)
}

/// Category of `code`.
pub fn error_category(code: &str) -> Option<&'static str> {
    find_entry(ERROR_CATEGORIES, code)
}

fn find_entry<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    table.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
}

/// Resolve the message template for `code` and fill its placeholders from
/// `context`. The n-th placeholder takes the value of the n-th declared
/// context field; placeholders without a value are kept as-is. Returns
/// `None` for an unknown code.
pub fn format_message<V: Display>(code: &str, context: &HashMap<&str, V>) -> Option<String> {
    let template = error_message(code)?;
    let fields = find_entry(ERROR_CONTEXT_FIELDS, code).unwrap_or(&[]);

    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(verb @ ('s' | 'd' | 'v')) => {
                match fields.get(next).and_then(|field| context.get(field)) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('%');
                        out.push(verb);
                    }
                }
                next += 1;
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    Some(out)
}
