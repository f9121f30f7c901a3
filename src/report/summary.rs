//! Terminal tables for columns, bins, and comparisons

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{Bin, Col, Comparison, Data, Role, Value};

/// One line of the column summary
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLine {
    pub at: usize,
    pub name: String,
    pub kind: &'static str,
    pub role: &'static str,
    pub n: usize,
    pub mid: Value,
    pub div: f64,
    /// Range of a numeric column
    pub bounds: Option<(f64, f64)>,
}

impl ColumnLine {
    pub fn new(col: &Col) -> Self {
        let bounds = match col {
            Col::Num(num) if num.n > 0 => Some((num.lo, num.hi)),
            _ => None,
        };
        Self {
            at: col.at(),
            name: col.txt().to_string(),
            kind: if col.is_num() { "num" } else { "sym" },
            role: role_label(col.role()),
            n: col.n(),
            mid: col.mid(),
            div: col.div(),
            bounds,
        }
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::X => "x",
        Role::Goal => "goal",
        Role::Klass => "klass",
        Role::Ignore => "ignored",
    }
}

/// Summary of every column of a dataset
#[derive(Debug, Default)]
pub struct ColumnSummary {
    pub rows: usize,
    pub columns: Vec<ColumnLine>,
}

impl ColumnSummary {
    pub fn new(data: &Data) -> Self {
        Self {
            rows: data.rows.len(),
            columns: data.cols.all.iter().map(ColumnLine::new).collect(),
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(
            ["#", "Column", "Kind", "Role", "N", "Mid", "Div", "Lo", "Hi"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

        for line in &self.columns {
            let role_color = match line.role {
                "goal" => Color::Green,
                "klass" => Color::Magenta,
                "ignored" => Color::DarkGrey,
                _ => Color::White,
            };
            let (lo, hi) = line
                .bounds
                .map(|(lo, hi)| (format_num(lo), format_num(hi)))
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(line.at),
                Cell::new(&line.name),
                Cell::new(line.kind),
                Cell::new(line.role).fg(role_color),
                Cell::new(line.n),
                Cell::new(format_value(&line.mid)),
                Cell::new(format!("{:.2}", line.div)),
                Cell::new(lo),
                Cell::new(hi),
            ]);
        }
        table
    }

    pub fn display(&self) {
        print_title("📋", "COLUMN SUMMARY");
        println!("      Rows: {}", style(self.rows).yellow().bold());
        println!();
        print_indented(&self.table());
    }
}

/// Bins with their best-versus-rest scores, highest first
pub fn bins_table(ranked: &[(f64, Bin)], best: &str, rest: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new("Bin").add_attribute(Attribute::Bold),
        Cell::new(best).add_attribute(Attribute::Bold),
        Cell::new(rest).add_attribute(Attribute::Bold),
    ]);
    for (score, bin) in ranked {
        let color = if *score > 0.0 { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(format!("{:.2}", score)).fg(color),
            Cell::new(bin.to_string()),
            Cell::new(bin.ys.get(best).copied().unwrap_or(0)),
            Cell::new(bin.ys.get(rest).copied().unwrap_or(0)),
        ]);
    }
    table
}

pub fn display_bins(ranked: &[(f64, Bin)], best: &str, rest: &str) {
    print_title("🧺", "RANKED BINS");
    print_indented(&bins_table(ranked, best, rest));
}

/// Mean and spread of distance to heaven for each strategy
pub fn comparison_table(cmp: &Comparison) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("Runs").add_attribute(Attribute::Bold),
        Cell::new("Labels").add_attribute(Attribute::Bold),
        Cell::new("d2h mean").add_attribute(Attribute::Bold),
        Cell::new("d2h sd").add_attribute(Attribute::Bold),
    ]);

    let winner = if cmp.smo.mid() <= cmp.guess.mid() {
        "smo"
    } else {
        "guess"
    };
    let lines = [
        ("asIs", &cmp.as_is, cmp.as_is.n),
        ("smo", &cmp.smo, cmp.budget),
        ("guess", &cmp.guess, cmp.budget),
    ];
    for (name, num, labels) in lines {
        let mut mean = Cell::new(format!("{:.3}", num.mid()));
        if name == winner {
            mean = mean.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(name),
            Cell::new(num.n),
            Cell::new(labels),
            mean,
            Cell::new(format!("{:.3}", num.div())),
        ]);
    }
    table
}

pub fn display_comparison(cmp: &Comparison) {
    print_title("⚖️ ", "SMO VS RANDOM GUESSING");
    print_indented(&comparison_table(cmp));
}

fn print_title(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn format_num(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{}", x)
    } else {
        format!("{:.2}", x)
    }
}

fn format_value(v: &Value) -> String {
    match v {
        Value::Num(x) => format_num(*x),
        other => other.to_string(),
    }
}
