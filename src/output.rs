//! User-facing console lines.
//!
//! Labelled lines (`info:`, `warn:`, `error:`, `ok:`) are colored only when
//! the stream is a TTY. `print_user` carries the primary result lines
//! ("Copied 'a' -> 'b'") that scripts parse, so it never gets a prefix.

use owo_colors::{OwoColorize, Style};

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

fn emit(stream: Stream, label: &str, style: Style, msg: &str) {
    let tty = match stream {
        Stream::Out => atty::is(atty::Stream::Stdout),
        Stream::Err => atty::is(atty::Stream::Stderr),
    };
    let line = if tty {
        format!("{} {}", label.style(style), msg)
    } else {
        format!("{label} {msg}")
    };
    match stream {
        Stream::Out => println!("{line}"),
        Stream::Err => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Stream::Out, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Err, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Err, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Out, "ok:", Style::new().green().bold(), msg);
}

pub fn print_user(msg: &str) {
    println!("{msg}");
}
