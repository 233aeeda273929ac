//! Utilities for printing and everything related to "UI".
//!
//! All of this goes to stderr, so that generated geometry can be piped from
//! stdout.

use term_painter::{Color, Style, ToStyle};

macro_rules! print_msg {
    ($kind:ident: $icon:literal => $fmt:literal $($args:tt)*) => {{
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let icon_style = MsgKind::$kind.icon_style();
        let body_style = MsgKind::$kind.body_style();

        // Split body into lines (rewrapping for terminal size)
        let lines = {
            let line_len = std::cmp::min(
                100,
                term_size::dimensions_stderr().map(|(w, _)| w).unwrap_or(80)
            ).saturating_sub(7);

            let body = format!($fmt $($args)*);
            let mut lines = Vec::new();

            let mut current_line = String::new();
            for word in body.split_whitespace() {
                if !current_line.is_empty()
                    && current_line.chars().count() + word.chars().count() >= line_len
                {
                    lines.push(current_line.clone());
                    current_line.clear();
                }

                current_line.push_str(&word);
                current_line.push(' ');
            }
            lines.push(current_line);

            lines
        };

        for (i, line) in lines.iter().enumerate() {
            let prefix = match i {
                0 => format!("[{}] ", $icon),
                _ if i == lines.len() - 1 => "    └ ".to_string(),
                _ => "    │ ".to_string(),
            };

            eprintln!("{}{}", icon_style.paint(prefix), body_style.paint(line));
        }
    }};
}

macro_rules! progress {
    ([$fmt:literal $($args:tt)*] => $body:tt) => {{
        use std::{
            io::{stderr, Write},
            time::Instant,
        };
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let msg = format!($fmt $($args)*);
        let icon_style = MsgKind::Progress.icon_style();
        let body_style = MsgKind::Progress.body_style();

        eprint!("{} {} ... ", icon_style.paint("[…]"), body_style.paint(&msg));
        let _ = stderr().flush();

        let before = Instant::now();
        let out = $body;
        let time = before.elapsed();

        eprintln!(
            "\r{} {} ... {} (in {:.2?})",
            icon_style.paint("[✓]"),
            body_style.paint(&msg),
            icon_style.paint("done"),
            time,
        );

        out
    }};
}

macro_rules! info {
    () => { info!("") };
    ($($t:tt)*) => {
        print_msg!(Info: 'i' => $($t)*);
    };
}

macro_rules! warn {
    () => { warn!("") };
    ($($t:tt)*) => {
        print_msg!(Warning: 'w' => $($t)*);
    };
}

macro_rules! error {
    () => { error!("") };
    ($($t:tt)*) => {
        print_msg!(Error: '!' => $($t)*);
    };
}

pub enum MsgKind {
    Error,
    Warning,
    Info,
    Progress,
}

impl MsgKind {
    pub fn icon_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::Red.bold(),
            MsgKind::Warning => Color::Yellow.bold(),
            MsgKind::Info => Color::Blue.bold(),
            MsgKind::Progress => Color::Green.bold(),
        }
    }

    pub fn body_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::BrightRed.to_style(),
            MsgKind::Warning => Color::BrightYellow.to_style(),
            MsgKind::Info => Color::NotSet.to_style(),
            MsgKind::Progress => Color::NotSet.to_style(),
        }
    }
}

/// Formats the given integer with `,` as thousand separator.
pub fn fmt_with_thousand_sep(v: u64) -> String {
    if v < 1000 {
        return v.to_string();
    }

    format!("{},{:03}", fmt_with_thousand_sep(v / 1000), v % 1000)
}
