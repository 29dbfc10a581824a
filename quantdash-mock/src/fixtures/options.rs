use quantdash_core::{Cell, Frame, OptionChain};

/// 2024-12-27 and 2025-01-03, 00:00 UTC.
const AAPL_EXPIRATIONS: [i64; 2] = [1_735_257_600, 1_735_862_400];

const COLUMNS: [&str; 6] = [
    "contractSymbol",
    "strike",
    "lastPrice",
    "volume",
    "impliedVolatility",
    "inTheMoney",
];

pub fn expirations_by_symbol(s: &str) -> Vec<i64> {
    match s {
        "AAPL" => AAPL_EXPIRATIONS.to_vec(),
        _ => Vec::new(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn contracts(kind: char, expiration: i64, spot: f64) -> Frame {
    let mut f = Frame::new(COLUMNS);
    let tag = chrono::DateTime::from_timestamp(expiration, 0)
        .map(|t| t.format("%y%m%d").to_string())
        .unwrap_or_default();
    for (strike, volume, iv) in [(220.0_f64, 1_000, 0.21), (230.0, 2_000, 0.22), (240.0, 3_000, 0.23)] {
        let itm = if kind == 'C' { strike < spot } else { strike > spot };
        let intrinsic = if kind == 'C' { spot - strike } else { strike - spot };
        f.rows.push(vec![
            Cell::Text(format!("AAPL{tag}{kind}{:05}000", strike as u32)),
            Cell::Number(strike),
            Cell::Number(intrinsic.max(0.0) + 1.25),
            Cell::Integer(volume),
            Cell::Number(iv),
            Cell::Bool(itm),
        ]);
    }
    f
}

/// Chain for `date`, or the nearest listed expiration when `None`.
pub fn chain_by_symbol_and_date(s: &str, date: Option<i64>) -> Option<OptionChain> {
    if s != "AAPL" {
        return None;
    }
    let expiration = match date {
        Some(d) => AAPL_EXPIRATIONS.into_iter().find(|e| *e == d)?,
        None => AAPL_EXPIRATIONS[0],
    };
    Some(OptionChain {
        expiration,
        calls: contracts('C', expiration, 232.5),
        puts: contracts('P', expiration, 232.5),
    })
}
