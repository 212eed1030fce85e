//! Display formatting shared by the entity cards.

/// Minutes as `"2h 16min"`, or `"45min"` under an hour.
pub fn format_duration(minutes: i32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{}h {}min", hours, rest)
    } else {
        format!("{}min", rest)
    }
}

/// Dollar amount with thousands grouping and at most three decimals,
/// trailing zeros dropped: `1234.5` becomes `"$1,234.5"`.
pub fn format_price(price: f64) -> String {
    let rounded = (price * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };

    let mut digits = format!("{:.3}", rounded.abs());
    while digits.ends_with('0') {
        digits.pop();
    }
    if digits.ends_with('.') {
        digits.pop();
    }

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), format!(".{}", fraction)),
        None => (digits.clone(), String::new()),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}{}", sign, grouped, fraction)
}
