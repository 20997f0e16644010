use crate::domain::models::{ErrorBody, JsonError, JsonOut};
use prettytable::format::{self, Alignment};
use prettytable::{Attr, Cell, Row, Table};
use serde::Serialize;

const CELL_WIDTH: usize = 128;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Re-indent a backend payload for humans.
pub fn print_json(body: &[u8]) -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        let envelope = JsonError {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&envelope) {
            Ok(s) => println!("{s}"),
            Err(_) => eprintln!("error: {message}"),
        }
    } else {
        eprintln!("error: {message}");
    }
}

pub fn build_table(titles: &[&str], rows: &[Vec<String>]) -> Table {
    let mut tbl = Table::new();
    tbl.set_format(*format::consts::FORMAT_BOX_CHARS);
    tbl.set_titles(Row::new(
        titles
            .iter()
            .map(|t| Cell::new_align(t, Alignment::LEFT).with_style(Attr::Bold))
            .collect(),
    ));
    for r in rows {
        tbl.add_row(Row::new(r.iter().map(|c| Cell::new(&wrap(c, CELL_WIDTH))).collect()));
    }
    tbl
}

pub fn print_table(titles: &[&str], rows: &[Vec<String>]) {
    build_table(titles, rows).printstd();
}

pub fn print_pairs(titles: [&str; 2], pairs: &[(String, String)]) {
    let rows: Vec<Vec<String>> = pairs
        .iter()
        .map(|(k, v)| vec![k.clone(), v.clone()])
        .collect();
    print_table(&titles, &rows);
}

/// Break `text` on whitespace so no line exceeds `width` chars; words
/// longer than `width` (URLs, hashes) are left intact.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
