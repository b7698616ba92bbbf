use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Cad,
    Aud,
    Jpy,
    Chf,
    Sek,
    Nok,
    Dkk,
}

/// Symbol shown when a currency code is unknown.
pub const FALLBACK_SYMBOL: &str = "€";

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Cad,
        Currency::Aud,
        Currency::Jpy,
        Currency::Chf,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            "GBP" => Some(Currency::Gbp),
            "CAD" => Some(Currency::Cad),
            "AUD" => Some(Currency::Aud),
            "JPY" => Some(Currency::Jpy),
            "CHF" => Some(Currency::Chf),
            "SEK" => Some(Currency::Sek),
            "NOK" => Some(Currency::Nok),
            "DKK" => Some(Currency::Dkk),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
            Currency::Jpy => "¥",
            Currency::Chf => "CHF",
            Currency::Sek | Currency::Nok | Currency::Dkk => "kr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Gbp => "British Pound",
            Currency::Cad => "Canadian Dollar",
            Currency::Aud => "Australian Dollar",
            Currency::Jpy => "Japanese Yen",
            Currency::Chf => "Swiss Franc",
            Currency::Sek => "Swedish Krona",
            Currency::Nok => "Norwegian Krone",
            Currency::Dkk => "Danish Krone",
        }
    }
}

/// Symbol for `code`, or for `preferred` when no code is given.
pub fn currency_symbol(code: Option<&str>, preferred: Currency) -> &'static str {
    match code {
        None => preferred.symbol(),
        Some(c) => Currency::parse(c)
            .map(|cur| cur.symbol())
            .unwrap_or(FALLBACK_SYMBOL),
    }
}

/// Formats `amount` as `<symbol><number>`. Whole amounts drop the decimals,
/// everything else gets exactly two. Missing or non-finite amounts render as
/// an empty string.
pub fn format_price(amount: Option<f64>, currency: Currency) -> String {
    match amount {
        Some(a) if a.is_finite() => format!("{}{}", currency.symbol(), format_number(a)),
        _ => String::new(),
    }
}

/// Lenient variant of [`format_price`] for raw API fields, which may hold a
/// number, a numeric string, an empty string or nothing at all.
pub fn format_json_price(value: &serde_json::Value, currency: Currency) -> String {
    format_price(json_number(value), currency)
}

/// Reads a number that may have been sent as a JSON number or a string.
pub fn json_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
        _ => None,
    }
}

fn format_number(amount: f64) -> String {
    let raw = if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    };

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
