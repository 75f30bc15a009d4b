use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    match *price >= Decimal::ZERO {
        true => Ok(()),
        false => Err(ValidationError::new("NEGATIVE_PRICE")
            .with_message(Cow::from("Price must be a non-negative amount"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_prices() {
        assert!(validate_price(&Decimal::new(-1, 2)).is_err());
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert!(validate_price(&Decimal::new(75, 1)).is_ok());
    }
}
