//! 展示格式化

/// 市值（百万）格式化为带量级后缀的字符串
pub fn format_market_cap(millions: f64) -> String {
    if millions >= 1_000_000.0 {
        format!("PKR {:.2}T", millions / 1_000_000.0)
    } else if millions >= 1_000.0 {
        format!("PKR {:.2}B", millions / 1_000.0)
    } else {
        format!("PKR {:.2}M", millions)
    }
}

/// 带符号的百分比，保留两位小数
pub fn format_percent(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

/// PKR 金额，千分位分隔，保留两位小数
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("PKR {}{}.{}", sign, grouped, frac_part)
}

/// CAPM 结果，保留一位小数
pub fn format_capm_result(expected_return: f64) -> String {
    format!("{:.1}%", expected_return)
}
