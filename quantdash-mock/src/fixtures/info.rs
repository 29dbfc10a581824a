use quantdash_core::Info;
use serde_json::{Value, json};

pub fn by_symbol(s: &str) -> Option<Info> {
    let fields: Vec<(&str, Value)> = match s {
        "AAPL" => vec![
            ("longName", json!("Apple Inc.")),
            ("sector", json!("Technology")),
            ("industry", json!("Consumer Electronics")),
            ("country", json!("United States")),
            ("website", json!("https://www.apple.com")),
            ("fullTimeEmployees", json!(161_000)),
            ("marketCap", json!(3_012_345_678_901_i64)),
            ("trailingPE", json!(29.87)),
            ("forwardPE", json!(27.1)),
            ("pegRatio", json!(2.35)),
            ("priceToBook", json!(45.2)),
            ("returnOnEquity", json!(1.4725)),
            ("currency", json!("USD")),
        ],
        // Sparse on purpose: most dashboard fields render as "N/A".
        "MSFT" => vec![
            ("longName", json!("Microsoft Corporation")),
            ("sector", json!("Technology")),
            ("returnOnEquity", json!(0)),
        ],
        _ => return None,
    };
    Some(
        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}
