use dpg_common::Lbp;

use crate::traits::LedgerError;

/// Parses a monetary amount as entered by the administrator. Thousands separators (`,` or `_`) are accepted:
/// `1000000`, `1,000,000` and `1_000_000` all parse to the same value. Negative amounts are allowed, since
/// balance corrections are expressed as negative deltas.
pub fn parse_amount(s: &str) -> Result<Lbp, LedgerError> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned
        .parse::<i64>()
        .map(Lbp::from)
        .map_err(|_| LedgerError::InvalidInput(format!("'{s}' is not a valid amount")))
}

#[cfg(test)]
mod test {
    use dpg_common::Lbp;

    use super::parse_amount;
    use crate::traits::LedgerError;

    #[test]
    fn accepted_formats() {
        assert_eq!(parse_amount("1000000").unwrap(), Lbp::from(1_000_000));
        assert_eq!(parse_amount("1,000,000").unwrap(), Lbp::from(1_000_000));
        assert_eq!(parse_amount("1_000_000").unwrap(), Lbp::from(1_000_000));
        assert_eq!(parse_amount(" 870,000 ").unwrap(), Lbp::from(870_000));
        assert_eq!(parse_amount("-250_000").unwrap(), Lbp::from(-250_000));
    }

    #[test]
    fn rejected_formats() {
        for s in ["", "abc", "12.50", "1,000 LBP"] {
            assert!(matches!(parse_amount(s), Err(LedgerError::InvalidInput(_))), "{s} should be rejected");
        }
    }
}
