// src/render/price.rs

//! ARS price formatting.
//!
//! Numbers render the es-AR way: thousands separated with dots, decimal
//! comma, at most three fraction digits, prefixed with the currency marker.
//! String prices are reinterpreted under a fixed "thousands dot, decimal
//! comma" convention; strings that survive neither way are shown verbatim.

use crate::models::Price;

/// Format a price field for the card's price slot.
pub fn format_price(price: &Price) -> String {
    match price {
        Price::Number(value) => format_ars(*value),
        Price::Text(raw) => match reinterpret(raw) {
            Some(value) => format_ars(value),
            None => raw.clone(),
        },
    }
}

/// Format a numeric amount with the currency marker.
pub fn format_ars(value: f64) -> String {
    format!("$ {}", localize_number(value))
}

fn localize_number(value: f64) -> String {
    let negative = value.is_sign_negative() && value != 0.0;
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Reinterpret a string price: strip everything but digits, separators and
/// sign, treat dots as thousands separators and the first comma as the
/// decimal point. Genuinely decimal-dot input misparses on purpose; the
/// live data uses the es-AR convention throughout.
fn reinterpret(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let normalized = cleaned.replace('.', "").replacen(',', ".", 1);
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_decimal_comma() {
        assert_eq!(format_ars(1234.5), "$ 1.234,5");
        assert_eq!(format_ars(1234.0), "$ 1.234");
        assert_eq!(format_ars(123456789.0), "$ 123.456.789");
        assert_eq!(format_ars(0.0), "$ 0");
    }

    #[test]
    fn keeps_up_to_three_fraction_digits() {
        assert_eq!(format_ars(0.125), "$ 0,125");
        assert_eq!(format_ars(10.50), "$ 10,5");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_ars(-1234.5), "$ -1.234,5");
    }

    #[test]
    fn string_prices_reinterpret_es_ar_separators() {
        assert_eq!(
            format_price(&Price::Text("$ 1.234,50".to_string())),
            "$ 1.234,5"
        );
        assert_eq!(format_price(&Price::Text("10,5".to_string())), "$ 10,5");
        assert_eq!(format_price(&Price::Text("1.200".to_string())), "$ 1.200");
    }

    #[test]
    fn unparseable_strings_render_verbatim() {
        assert_eq!(
            format_price(&Price::Text("consultar".to_string())),
            "consultar"
        );
        assert_eq!(format_price(&Price::Text("1,2,3".to_string())), "1,2,3");
    }

    #[test]
    fn numeric_prices_format_directly() {
        assert_eq!(format_price(&Price::Number(1234.5)), "$ 1.234,5");
    }
}
