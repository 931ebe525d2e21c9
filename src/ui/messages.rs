use std::env;
use std::fmt;
use std::sync::OnceLock;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

/// Colors are dropped when `NO_COLOR` is set.
fn use_color() -> bool {
    static COLOR: OnceLock<bool> = OnceLock::new();
    *COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none())
}

fn render(level: Level, msg: &dyn fmt::Display) -> String {
    if use_color() {
        format!("{}{}{} {}{}", level.color(), BOLD, level.icon(), RESET, msg)
    } else {
        format!("{} {}", level.icon(), msg)
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Level::Info, &msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Level::Success, &msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Level::Warning, &msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Level::Error, &msg));
}

/// Section header above a listing.
pub fn header<T: fmt::Display>(msg: T) {
    if use_color() {
        println!("{}{}== {} =={}", Level::Info.color(), BOLD, msg, RESET);
    } else {
        println!("== {} ==", msg);
    }
}
