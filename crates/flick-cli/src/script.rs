//! Gesture scripts for `flicktool replay`.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! start "see "          # initial document text (first line only)
//! type teh              # tap each character
//! swipe right           # on the free swipe area
//! swipe left 2          # swipe, then hold for two repeats
//! swipe right on shift  # swipe starting on a key
//! tap shift
//! long-press backspace 3
//! tap emoji:😀
//! cursor -4             # move the cursor, then resync
//! wait 400              # let the clock run (ms)
//! unfocus
//! focus
//! ```

use flick_core::gesture::Direction;
use flick_session::KeyTarget;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Type(String),
    Tap(KeyTarget),
    LongPress {
        target: KeyTarget,
        repeats: u32,
    },
    Swipe {
        direction: Direction,
        target: KeyTarget,
        repeats: u32,
    },
    Cursor(i64),
    Wait(u64),
    Focus(bool),
}

/// A step with the script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub source: String,
    pub step: Step,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub initial_text: String,
    pub steps: Vec<ScriptLine>,
}

pub fn parse_script(input: &str) -> Result<Script, ScriptError> {
    let mut script = Script::default();
    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let source = strip_comment(raw).trim();
        if source.is_empty() {
            continue;
        }
        let (command, rest) = match source.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (source, ""),
        };
        let syntax = |message: &str| ScriptError::Syntax {
            line,
            message: message.to_string(),
        };

        if command == "start" {
            if !script.steps.is_empty() {
                return Err(syntax("'start' must come before any step"));
            }
            script.initial_text = unquote(rest);
            continue;
        }

        let step = match command {
            "type" => {
                let text = unquote(rest);
                if text.is_empty() {
                    return Err(syntax("'type' needs text"));
                }
                Step::Type(text)
            }
            "tap" => Step::Tap(parse_target(rest).ok_or_else(|| syntax("bad target"))?),
            "long-press" => {
                let mut args = rest.split_whitespace();
                let target = args
                    .next()
                    .and_then(parse_target)
                    .ok_or_else(|| syntax("bad target"))?;
                let repeats = parse_count(args.next()).ok_or_else(|| syntax("bad repeat count"))?;
                Step::LongPress { target, repeats }
            }
            "swipe" => {
                let mut args = rest.split_whitespace().peekable();
                let direction = args
                    .next()
                    .and_then(parse_direction)
                    .ok_or_else(|| syntax("expected up, down, left or right"))?;
                let repeats = match args.peek() {
                    Some(n) if n.parse::<u32>().is_ok() => {
                        parse_count(args.next()).ok_or_else(|| syntax("bad repeat count"))?
                    }
                    _ => 0,
                };
                let target = match (args.next(), args.next()) {
                    (None, _) => KeyTarget::Surface,
                    (Some("on"), Some(t)) => {
                        parse_target(t).ok_or_else(|| syntax("bad target"))?
                    }
                    _ => return Err(syntax("expected 'on <target>'")),
                };
                Step::Swipe {
                    direction,
                    target,
                    repeats,
                }
            }
            "cursor" => Step::Cursor(rest.parse().map_err(|_| syntax("bad cursor offset"))?),
            "wait" => Step::Wait(rest.parse().map_err(|_| syntax("bad duration"))?),
            "focus" => Step::Focus(true),
            "unfocus" => Step::Focus(false),
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };
        script.steps.push(ScriptLine {
            line,
            source: source.to_string(),
            step,
        });
    }
    Ok(script)
}

/// Everything before an unquoted `#`.
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Strip surrounding quotes and expand `\n`, `\"` and `\\`.
fn unquote(s: &str) -> String {
    let inner = match s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => inner,
        None => return s.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn parse_count(arg: Option<&str>) -> Option<u32> {
    match arg {
        None => Some(0),
        Some(n) => n.parse().ok(),
    }
}

pub fn parse_direction(s: &str) -> Option<Direction> {
    match s {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

pub fn parse_target(s: &str) -> Option<KeyTarget> {
    let target = match s {
        "shift" => KeyTarget::Shift,
        "backspace" => KeyTarget::Backspace,
        "return" => KeyTarget::Return,
        "globe" => KeyTarget::Globe,
        "emoji-search" => KeyTarget::EmojiSearch,
        "surface" => KeyTarget::Surface,
        "space" => KeyTarget::Char(' '),
        _ => {
            if let Some(emoji) = s.strip_prefix("emoji:") {
                if emoji.is_empty() {
                    return None;
                }
                return Some(KeyTarget::Emoji(emoji.to_string()));
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyTarget::Char(c),
                _ => return None,
            }
        }
    };
    Some(target)
}
