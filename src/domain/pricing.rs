use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Discount must be between 0 and 100, got {0}")]
    DiscountOutOfRange(i32),
    #[error("Price must be positive, got {0}")]
    NonPositivePrice(i64),
    #[error("date_end {end} is before date_start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Price after a percentage discount, rounding the discount down.
pub fn discount_price(normal_price: i64, discount: i32) -> Result<i64, PricingError> {
    if normal_price <= 0 {
        return Err(PricingError::NonPositivePrice(normal_price));
    }
    if !(0..=100).contains(&discount) {
        return Err(PricingError::DiscountOutOfRange(discount));
    }
    if discount == 0 {
        return Ok(normal_price);
    }

    Ok(normal_price - normal_price * i64::from(discount) / 100)
}

/// Nights between check-in and check-out. A same-day stay counts as one night.
pub fn number_of_nights(start: NaiveDate, end: NaiveDate) -> Result<i32, PricingError> {
    if end < start {
        return Err(PricingError::EndBeforeStart { start, end });
    }

    let nights = (end - start).num_days().max(1);
    i32::try_from(nights).map_err(|_| PricingError::EndBeforeStart { start, end })
}

pub fn hotel_total(price: i64, nights: i32) -> i64 {
    price * i64::from(nights)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, PricingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PricingError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    #[test]
    fn test_discount_price() {
        assert_eq!(discount_price(500_000, 20), Ok(400_000));
        assert_eq!(discount_price(500_000, 0), Ok(500_000));
        assert_eq!(discount_price(500_000, 100), Ok(0));
    }

    #[test]
    fn test_discount_rounds_down_the_discount() {
        // 333 * 33% = 109.89, floor 109
        assert_eq!(discount_price(333, 33), Ok(224));
    }

    #[test]
    fn test_discount_out_of_range() {
        assert_eq!(
            discount_price(1_000, 101),
            Err(PricingError::DiscountOutOfRange(101))
        );
        assert_eq!(
            discount_price(1_000, -1),
            Err(PricingError::DiscountOutOfRange(-1))
        );
        assert_eq!(
            discount_price(0, 10),
            Err(PricingError::NonPositivePrice(0))
        );
    }

    #[test]
    fn test_nights() {
        assert_eq!(number_of_nights(date("2024-01-10"), date("2024-01-11")), Ok(1));
        assert_eq!(number_of_nights(date("2024-01-10"), date("2024-01-13")), Ok(3));
        assert_eq!(number_of_nights(date("2024-01-10"), date("2024-01-10")), Ok(1));
    }

    #[test]
    fn test_nights_across_month_end() {
        assert_eq!(number_of_nights(date("2024-01-30"), date("2024-02-02")), Ok(3));
    }

    #[test]
    fn test_end_before_start() {
        assert!(number_of_nights(date("2024-01-10"), date("2024-01-09")).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("10/01/2024").is_err());
        assert_eq!(parse_date(" 2024-01-10 "), Ok(date("2024-01-10")));
    }

    #[test]
    fn test_hotel_total() {
        assert_eq!(hotel_total(400_000, 3), 1_200_000);
    }
}
