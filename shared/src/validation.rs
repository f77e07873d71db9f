//! Field-level validations shared by the backend handlers.

/// A movement must name an item; everything else about it is optional.
pub fn validate_item_name(item: &str) -> Result<(), &'static str> {
    if item.trim().is_empty() {
        return Err("item is required");
    }
    Ok(())
}

/// Quantities are stored non-negative; direction comes from the status.
pub fn validate_quantity(qty: Option<f64>) -> Result<(), &'static str> {
    match qty {
        Some(q) if !q.is_finite() => Err("quantity must be a finite number"),
        Some(q) if q < 0.0 => Err("quantity cannot be negative"),
        _ => Ok(()),
    }
}

/// Money amounts must be finite when present.
pub fn validate_amount(amount: Option<f64>) -> Result<(), &'static str> {
    match amount {
        Some(a) if !a.is_finite() => Err("amount must be a finite number"),
        _ => Ok(()),
    }
}

/// Validate login name format.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("username is required");
    }
    if username.len() > 64 {
        return Err("username must be at most 64 characters");
    }
    Ok(())
}

/// Validate password strength.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_name_requires_non_whitespace() {
        assert!(validate_item_name("Cement").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name("").is_err());
    }

    #[test]
    fn quantity_rejects_negative_and_nan() {
        assert!(validate_quantity(None).is_ok());
        assert!(validate_quantity(Some(0.0)).is_ok());
        assert!(validate_quantity(Some(10.5)).is_ok());
        assert!(validate_quantity(Some(-1.0)).is_err());
        assert!(validate_quantity(Some(f64::NAN)).is_err());
    }
}
