//! Display formatting for amounts, durations and the running-cost remark.

const NBSP: char = '\u{a0}';

/// Formats an amount French-Canadian style: `1 200,50 $`.
///
/// Groups of three digits and the symbol are separated by no-break spaces so a
/// printed amount never wraps. An empty symbol prints the number alone.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped},{fraction:02}")
    } else {
        format!("{sign}{grouped},{fraction:02}{NBSP}{symbol}")
    }
}

/// `HH:MM:SS`, fractions of a second dropped. Hours grow past two digits.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// A line of commentary that gets grimmer as the bill grows.
pub fn cost_remark(total_cost: f64) -> &'static str {
    match total_cost {
        c if c < 10.0 => "Off we go...",
        c if c < 50.0 => "The meter is running...",
        c if c < 100.0 => "It's starting to add up.",
        c if c < 500.0 => "Productive, or just chatting?",
        c if c < 1000.0 => "Ouch, there goes the training budget.",
        c if c < 5000.0 => "Someone is going to have to sell a kidney.",
        _ => "Call the banker!",
    }
}
