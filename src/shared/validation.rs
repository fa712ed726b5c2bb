use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest integer part a `NUMERIC(10, 2)` price can hold
const MAX_PRICE_UNITS: i64 = 99_999_999;

/// Rejects names made only of whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Prices carry at most 10 digits, 2 of them after the decimal point
pub fn price_fits(price: &Decimal) -> Result<(), ValidationError> {
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("decimal_places")
            .with_message("must have at most 2 decimal places".into()));
    }
    if price.abs().trunc() > Decimal::from(MAX_PRICE_UNITS) {
        return Err(ValidationError::new("max_digits")
            .with_message("must have at most 10 digits".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Pizzas").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_price_fits() {
        assert!(price_fits(&Decimal::from(3200)).is_ok());
        assert!(price_fits(&Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(price_fits(&Decimal::from_str("19.900").unwrap()).is_ok());
        assert!(price_fits(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(price_fits(&Decimal::from_str("-5").unwrap()).is_ok());

        assert!(price_fits(&Decimal::from_str("19.999").unwrap()).is_err());
        assert!(price_fits(&Decimal::from_str("100000000").unwrap()).is_err());
    }
}
