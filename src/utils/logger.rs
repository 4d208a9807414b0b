// src/utils/logger.rs

use gtk4::prelude::*;
use gtk4::{glib, TextView};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::fmt;
use std::sync::{Mutex, OnceLock};

static LOG_VIEW: OnceLock<glib::SendWeakRef<TextView>> = OnceLock::new();
static LOGGER: ConsoleLogger = ConsoleLogger;
/// Lines logged before `attach`, replayed into the view when it appears.
static EARLY: Mutex<Vec<ConsoleLine>> = Mutex::new(Vec::new());
const EARLY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
struct ConsoleLine {
  text: String,
  tag: &'static str,
}

/// Writes every record to stderr and, once a console view is attached,
/// appends it to that view with a per-level color tag.
struct ConsoleLogger;

/// Installs the logger. Call once, before the window exists; records logged
/// before `attach` go to stderr and are held for the console.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Adjusts the level after config has been read.
pub fn set_level(level: LevelFilter) {
  log::set_max_level(level);
}

pub fn attach(view: &TextView) {
  let buffer = view.buffer();
  let tag_table = buffer.tag_table();

  for (name, color, bold) in [
    ("error", "#ff4444", true),
    ("warn", "#ffbb33", false),
    ("info", "#33b5e5", false),
    ("debug", "#aaaaaa", false),
  ] {
    if tag_table.lookup(name).is_none() {
      let tag = gtk4::TextTag::new(Some(name));
      tag.set_property("foreground", color);
      if bold {
        tag.set_property("weight", 700);
      }
      tag_table.add(&tag);
    }
  }

  let _ = LOG_VIEW.set(view.downgrade().into());

  let early = EARLY.lock().map(|mut b| std::mem::take(&mut *b)).unwrap_or_default();
  for line in &early {
    append(view, line);
  }
}

fn append(view: &TextView, line: &ConsoleLine) {
  let buffer = view.buffer();
  let mut end = buffer.end_iter();
  buffer.insert_with_tags_by_name(&mut end, &line.text, &[line.tag]);

  let mark = buffer.create_mark(None, &buffer.end_iter(), false);
  view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
  buffer.delete_mark(&mark);
}

fn console_line(level: Level, msg: impl fmt::Display) -> ConsoleLine {
  let (icon, tag) = tag_for(level);
  ConsoleLine {
    text: format!("{}  {}\n", icon, msg),
    tag,
  }
}

/// Keeps at most `EARLY_LIMIT` lines, dropping the oldest.
fn hold_early(held: &mut Vec<ConsoleLine>, line: ConsoleLine) {
  if held.len() >= EARLY_LIMIT {
    held.remove(0);
  }
  held.push(line);
}

fn tag_for(level: Level) -> (&'static str, &'static str) {
  match level {
    Level::Error => ("🔴", "error"),
    Level::Warn => ("🟠", "warn"),
    Level::Info => ("🔵", "info"),
    Level::Debug | Level::Trace => ("⚪", "debug"),
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }
    eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());

    let line = console_line(record.level(), record.args());
    if LOG_VIEW.get().is_none() {
      if let Ok(mut held) = EARLY.lock() {
        hold_early(&mut held, line);
      }
      return;
    }

    glib::MainContext::default().spawn_local(async move {
      if let Some(view) = LOG_VIEW.get().and_then(|w| w.upgrade()) {
        append(&view, &line);
      }
    });
  }

  fn flush(&self) {}
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tag_for_levels() {
    assert_eq!(tag_for(Level::Error).1, "error");
    assert_eq!(tag_for(Level::Warn).1, "warn");
    assert_eq!(tag_for(Level::Trace).1, "debug");
  }

  #[test]
  fn test_console_line_format() {
    let line = console_line(Level::Info, "Loaded 118 elements");
    assert_eq!(line.tag, "info");
    assert!(line.text.ends_with("Loaded 118 elements\n"));
  }

  #[test]
  fn test_early_lines_are_capped_oldest_first() {
    let mut held = Vec::new();
    for i in 0..EARLY_LIMIT + 5 {
      hold_early(&mut held, console_line(Level::Debug, i));
    }
    assert_eq!(held.len(), EARLY_LIMIT);
    assert!(held[0].text.ends_with("  5\n"));
    assert!(held[EARLY_LIMIT - 1].text.ends_with(&format!("  {}\n", EARLY_LIMIT + 4)));
  }
}
