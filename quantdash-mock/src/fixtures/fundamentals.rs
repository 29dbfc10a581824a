use chrono::NaiveDate;
use quantdash_core::{Cell, Earnings, Frame, Holders, Statements};

fn d(y: i32, m: u32, day: u32) -> Cell {
    NaiveDate::from_ymd_opt(y, m, day).map_or(Cell::Missing, Cell::Date)
}

fn frame<const N: usize>(columns: [&str; N], rows: Vec<[Cell; N]>) -> Frame {
    let mut f = Frame::new(columns);
    f.rows = rows.into_iter().map(Vec::from).collect();
    f
}

fn line_items(periods: &[&str], items: &[(&str, &[i64])]) -> Frame {
    let mut f = Frame::new(std::iter::once("Breakdown").chain(periods.iter().copied()));
    for (label, values) in items {
        let mut row = vec![Cell::from(*label)];
        row.extend(values.iter().map(|v| Cell::Integer(*v)));
        f.rows.push(row);
    }
    f
}

const ANNUAL: &[&str] = &["2024-09-28", "2023-09-30", "2022-09-24"];
const QUARTERLY: &[&str] = &["2024-06-29", "2024-03-30", "2023-12-30"];

pub fn statements_by_symbol(s: &str, quarterly: bool) -> Statements {
    if s != "AAPL" {
        return Statements::default();
    }
    let (periods, scale) = if quarterly { (QUARTERLY, 4) } else { (ANNUAL, 1) };
    let scaled = |v: [i64; 3]| v.map(|x| x / scale);
    let revenue = scaled([391_035_000_000, 383_285_000_000, 394_328_000_000]);
    let net_income = scaled([93_736_000_000, 96_995_000_000, 99_803_000_000]);
    let assets = [364_980_000_000, 352_583_000_000, 352_755_000_000];
    let liabilities = [308_030_000_000, 290_437_000_000, 302_083_000_000];
    let ocf = scaled([118_254_000_000, 110_543_000_000, 122_151_000_000]);
    let capex = scaled([-9_447_000_000, -10_959_000_000, -10_708_000_000]);
    Statements {
        income: line_items(
            periods,
            &[("Total Revenue", &revenue[..]), ("Net Income", &net_income[..])],
        ),
        balance_sheet: line_items(
            periods,
            &[("Total Assets", &assets[..]), ("Total Liabilities", &liabilities[..])],
        ),
        cashflow: line_items(
            periods,
            &[("Operating Cash Flow", &ocf[..]), ("Capital Expenditure", &capex[..])],
        ),
    }
}

pub fn earnings_by_symbol(s: &str) -> Earnings {
    if s != "AAPL" {
        return Earnings::default();
    }
    Earnings {
        annual: frame(
            ["Year", "Revenue", "Earnings"],
            vec![
                [Cell::Integer(2022), Cell::Integer(394_328_000_000), Cell::Integer(99_803_000_000)],
                [Cell::Integer(2023), Cell::Integer(383_285_000_000), Cell::Integer(96_995_000_000)],
                [Cell::Integer(2024), Cell::Integer(391_035_000_000), Cell::Integer(93_736_000_000)],
            ],
        ),
        quarterly: frame(
            ["Quarter", "Revenue", "Earnings"],
            vec![
                [Cell::from("3Q2024"), Cell::Integer(85_777_000_000), Cell::Integer(21_448_000_000)],
                [Cell::from("4Q2024"), Cell::Integer(94_930_000_000), Cell::Integer(14_736_000_000)],
            ],
        ),
    }
}

pub fn holders_by_symbol(s: &str) -> Holders {
    if s != "AAPL" {
        return Holders::default();
    }
    Holders {
        institutional: frame(
            ["Date Reported", "Holder", "pctHeld", "Shares", "Value", "pctChange"],
            vec![
                [
                    d(2024, 6, 30),
                    Cell::from("Vanguard Group Inc"),
                    Cell::Number(0.0876),
                    Cell::Integer(1_332_000_000),
                    Cell::Integer(280_600_000_000),
                    Cell::Number(0.0132),
                ],
                [
                    d(2024, 6, 30),
                    Cell::from("Blackrock Inc."),
                    Cell::Number(0.0673),
                    Cell::Integer(1_023_000_000),
                    Cell::Integer(215_500_000_000),
                    Cell::Missing,
                ],
            ],
        ),
        major: frame(
            ["Breakdown", "Value"],
            vec![
                [Cell::from("% of Shares Held by All Insider"), Cell::from("2.71%")],
                [Cell::from("% of Shares Held by Institutions"), Cell::from("61.23%")],
            ],
        ),
        insider_transactions: frame(
            ["Insider", "Position", "Text", "Start Date", "Shares", "Value"],
            vec![[
                Cell::from("COOK TIMOTHY D"),
                Cell::from("Chief Executive Officer"),
                Cell::from("Sale at price 224.46 - 226.63 per share."),
                d(2024, 10, 2),
                Cell::Integer(223_986),
                Cell::Integer(50_276_920),
            ]],
        ),
    }
}

pub fn recommendations_by_symbol(s: &str) -> Frame {
    if s != "AAPL" {
        return Frame::default();
    }
    let row = |period: &str, counts: [i64; 5]| -> [Cell; 6] {
        let [sb, b, h, se, ss] = counts.map(Cell::Integer);
        [Cell::from(period), sb, b, h, se, ss]
    };
    frame(
        ["period", "strongBuy", "buy", "hold", "sell", "strongSell"],
        vec![row("0m", [8, 24, 12, 1, 2]), row("-1m", [8, 23, 13, 1, 2])],
    )
}

pub fn esg_by_symbol(s: &str) -> Frame {
    if s != "AAPL" {
        return Frame::default();
    }
    frame(
        ["Metric", "Value"],
        vec![
            [Cell::from("totalEsg"), Cell::Number(18.85)],
            [Cell::from("environmentScore"), Cell::Number(0.55)],
            [Cell::from("socialScore"), Cell::Number(7.42)],
            [Cell::from("governanceScore"), Cell::Number(10.88)],
        ],
    )
}

pub fn calendar_by_symbol(s: &str) -> Frame {
    if s != "AAPL" {
        return Frame::default();
    }
    frame(
        ["Event", "Value"],
        vec![
            [Cell::from("Ex-Dividend Date"), d(2024, 11, 8)],
            [Cell::from("Earnings Date"), Cell::from("2025-01-30")],
            [Cell::from("Earnings Average"), Cell::Number(2.35)],
        ],
    )
}
