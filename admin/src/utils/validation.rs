//! Validation utilities for dialog input

use lib_utils::{validate_max_length, validate_not_empty};

use crate::core::error::AppError;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into the error a flow returns before sending anything.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(message) => Self::err(message),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate password strength
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < 8 {
        return ValidationResult::err("Password must be at least 8 characters");
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return ValidationResult::err("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return ValidationResult::err("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return ValidationResult::err("Password must contain at least one number");
    }

    ValidationResult::ok()
}

/// Validate a display name (store, product, variant, hero title)
pub fn validate_name(value: &str, field_name: &str) -> ValidationResult {
    validate_not_empty(value, field_name)
        .and_then(|_| validate_max_length(value.trim(), 120, field_name))
        .into()
}

/// Validate a stock keeping unit
pub fn validate_sku(sku: &str) -> ValidationResult {
    if sku.trim().is_empty() {
        return ValidationResult::err("SKU is required");
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return ValidationResult::err("SKU can only contain letters, numbers, '-', '_' and '.'");
    }

    validate_max_length(sku, 64, "SKU").into()
}

/// Validate a price amount and ISO currency code
pub fn validate_price(amount: f64, currency: &str) -> ValidationResult {
    let amount = validate_amount(amount);
    if !amount.is_valid {
        return amount;
    }
    validate_currency(currency)
}

/// Validate a non-negative, finite amount
pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() || amount < 0.0 {
        return ValidationResult::err("Price must be a non-negative number");
    }

    ValidationResult::ok()
}

/// Validate a three-letter currency code
pub fn validate_currency(currency: &str) -> ValidationResult {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return ValidationResult::err("Currency must be a three-letter code");
    }

    ValidationResult::ok()
}

/// Validate a stock quantity
pub fn validate_quantity(quantity: i64) -> ValidationResult {
    if quantity < 0 {
        return ValidationResult::err("Quantity cannot be negative");
    }

    ValidationResult::ok()
}

/// Validate an absolute http(s) URL
pub fn validate_url(url: &str, field_name: &str) -> ValidationResult {
    match reqwest::Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => ValidationResult::ok(),
        _ => ValidationResult::err(format!("{} must be an http(s) URL", field_name)),
    }
}
