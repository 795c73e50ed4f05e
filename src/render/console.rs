use std::fmt::Write;

use super::{cell, Cell, Tone};
use crate::state::MarketState;
use crate::window::Window;

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn paint(cell: &Cell) -> String {
    let color = match cell.tone {
        Some(Tone::Positive) => GREEN,
        Some(Tone::Negative) => RED,
        Some(Tone::Neutral) => GRAY,
        None => return cell.text.clone(),
    };
    format!("{color}{}{RESET}", cell.text)
}

/// Grid table with a `Statistic` column and one column per symbol.
pub fn render_table(symbols: &[String], state: &MarketState) -> String {
    let mut header = vec![Cell {
        text: "Statistic".to_string(),
        tone: None,
    }];
    header.extend(symbols.iter().map(|s| Cell {
        text: s.clone(),
        tone: None,
    }));

    let rows: Vec<Vec<Cell>> = Window::ALL
        .into_iter()
        .map(|window| {
            let mut row = vec![Cell {
                text: format!("{}:", window.label()),
                tone: None,
            }];
            row.extend(symbols.iter().map(|s| cell(state, s, window)));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| row[col].text.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for w in &widths {
            line.extend(std::iter::repeat(fill).take(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let line = |row: &[Cell]| {
        let mut out = String::from("|");
        for (c, w) in row.iter().zip(&widths) {
            let pad = w - c.text.chars().count();
            let _ = write!(out, " {}{} |", paint(c), " ".repeat(pad));
        }
        out.push('\n');
        out
    };

    let mut out = rule('-');
    out.push_str(&line(&header));
    out.push_str(&rule('='));
    for row in &rows {
        out.push_str(&line(row));
        out.push_str(&rule('-'));
    }
    out
}
