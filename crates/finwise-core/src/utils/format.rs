use chrono::NaiveDate;

/// Parse a decimal amount as sent by the backend ("1234.50").
/// Unparseable values are treated as zero.
pub fn parse_amount(amount: &str) -> f64 {
    amount.trim().parse::<f64>().unwrap_or(0.0)
}

/// Format an amount with two decimals and thousands separators, e.g. "-1,234.50"
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

/// Short month label for trend output, e.g. "Mar 2024"
pub fn format_month(month: &NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50"), 12.5);
        assert_eq!(parse_amount(" 3 "), 3.0);
        assert_eq!(parse_amount("-4.25"), -4.25);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(12.5), "12.50");
        assert_eq!(format_currency(1234.5), "1,234.50");
        assert_eq!(format_currency(1234567.891), "1,234,567.89");
        assert_eq!(format_currency(-980.0), "-980.00");
        assert_eq!(format_currency(-1000.0), "-1,000.00");
    }

    #[test]
    fn test_format_month() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_month(&d), "Mar 2024");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }
}
