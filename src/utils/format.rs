/// `$1234.50` style price, always two decimals.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Integer with comma thousands separators, e.g. `12,345`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
