use chrono::{Local, Timelike};

/// Saluto in base all'ora del giorno.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}
