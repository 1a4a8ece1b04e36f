use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use flick_core::buffer::{MemoryDocument, TextDocumentProxy};
use flick_core::dict::Lexicon;
use flick_core::gesture::{Direction, Point, Size};
use flick_core::settings::{parse_settings_toml, Settings};
use flick_core::user_dict::UserDictionary;
use flick_engine::{HostEvent, Sequencer};
use flick_session::{CandidateBar, EditResponse, KeyTarget, KeyboardSession};

use crate::script::{parse_script, Script, Step};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

const KEY: Size = Size {
    width: 40.0,
    height: 60.0,
};
const CENTER: Point = Point { x: 20.0, y: 30.0 };
/// Pause between script steps; short enough that two shift taps lock caps.
const STEP_GAP: Duration = Duration::from_millis(100);
const TAP_HOLD: Duration = Duration::from_millis(40);

/// State after one script step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepReport {
    pub line: usize,
    pub step: String,
    /// Session responses this step produced.
    pub responses: usize,
    pub consumed: bool,
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
    pub capitalization: String,
    pub view: String,
    pub locale: String,
    pub candidates: Option<Vec<String>>,
    pub highlighted: Option<usize>,
    pub notifications: Vec<String>,
}

/// Drives a session through a script by synthesising the touches each step
/// stands for, so the classifier and sequencer are exercised too.
pub struct Replayer {
    sequencer: Sequencer<MemoryDocument>,
    clock: Duration,
    long_press: Duration,
    repeat: Duration,
    bar: Option<(Vec<String>, usize)>,
}

impl Replayer {
    pub fn new(initial_text: &str, settings: Settings, user: Option<UserDictionary>) -> Self {
        let long_press = settings.gesture.long_press();
        let repeat = settings.gesture.repeat();
        let mut lexicon = Lexicon::with_defaults();
        if let Some(user) = user {
            lexicon.set_user(Arc::new(user));
        }
        let session = KeyboardSession::new(MemoryDocument::with_text(initial_text), lexicon, settings);
        Self {
            sequencer: Sequencer::new(session),
            clock: Duration::ZERO,
            long_press,
            repeat,
            bar: None,
        }
    }

    pub fn session(&self) -> &KeyboardSession<MemoryDocument> {
        self.sequencer.session()
    }

    pub fn run(&mut self, script: &Script) -> Vec<StepReport> {
        script
            .steps
            .iter()
            .map(|line| {
                let responses = self.step(&line.step);
                self.report(line.line, &line.source, &responses)
            })
            .collect()
    }

    fn push(&mut self, event: HostEvent, offset: Duration) {
        self.sequencer.push(event, self.clock + offset);
    }

    fn down(&mut self, target: KeyTarget, offset: Duration) {
        self.push(
            HostEvent::TouchDown {
                at: CENTER,
                size: KEY,
                target,
            },
            offset,
        );
    }

    fn step(&mut self, step: &Step) -> Vec<EditResponse> {
        let mut responses = Vec::new();
        let elapsed = match step {
            Step::Type(text) => {
                let mut t = Duration::ZERO;
                for (i, c) in text.chars().enumerate() {
                    if i > 0 {
                        t += STEP_GAP;
                    }
                    self.down(KeyTarget::Char(c), t);
                    t += TAP_HOLD;
                    self.push(HostEvent::TouchUp, t);
                }
                t
            }
            Step::Tap(target) => {
                self.down(target.clone(), Duration::ZERO);
                self.push(HostEvent::TouchUp, TAP_HOLD);
                TAP_HOLD
            }
            Step::LongPress { target, repeats } => {
                self.down(target.clone(), Duration::ZERO);
                let mut t = self.long_press;
                self.push(HostEvent::Tick, t);
                for _ in 0..*repeats {
                    t += self.repeat;
                    self.push(HostEvent::Tick, t);
                }
                t += self.repeat / 2;
                self.push(HostEvent::TouchUp, t);
                t
            }
            Step::Swipe {
                direction,
                target,
                repeats,
            } => {
                self.down(target.clone(), Duration::ZERO);
                let (dx, dy) = match direction {
                    Direction::Up => (0.0, -KEY.height),
                    Direction::Down => (0.0, KEY.height),
                    Direction::Left => (-KEY.width, 0.0),
                    Direction::Right => (KEY.width, 0.0),
                };
                let moved = TAP_HOLD / 2;
                self.push(
                    HostEvent::TouchMoved {
                        at: Point::new(CENTER.x + dx, CENTER.y + dy),
                    },
                    moved,
                );
                let mut t = moved;
                if *repeats > 0 {
                    t += self.long_press;
                    self.push(HostEvent::Tick, t);
                    for _ in 1..*repeats {
                        t += self.repeat;
                        self.push(HostEvent::Tick, t);
                    }
                    t += self.repeat / 2;
                } else {
                    t = TAP_HOLD;
                }
                self.push(HostEvent::TouchUp, t);
                t
            }
            Step::Cursor(offset) => {
                let session = self.sequencer.session_mut();
                session.document_mut().adjust_cursor(*offset);
                responses.push(session.sync());
                Duration::ZERO
            }
            Step::Wait(ms) => Duration::from_millis(*ms),
            Step::Focus(focused) => {
                self.sequencer
                    .session_mut()
                    .document_mut()
                    .set_focused(*focused);
                Duration::ZERO
            }
        };
        responses.extend(self.sequencer.pump());
        self.clock += elapsed + STEP_GAP;
        responses
    }

    fn report(&mut self, line: usize, source: &str, responses: &[EditResponse]) -> StepReport {
        for resp in responses {
            match &resp.candidates {
                CandidateBar::Keep => {}
                CandidateBar::Hide => self.bar = None,
                CandidateBar::Show {
                    candidates,
                    highlighted,
                } => self.bar = Some((candidates.clone(), *highlighted)),
            }
        }
        let session = self.sequencer.session();
        let doc = session.document();
        let cursor = doc.text()[..doc.cursor()].chars().count();
        StepReport {
            line,
            step: source.to_string(),
            responses: responses.len(),
            consumed: responses.iter().all(|r| r.consumed),
            text: doc.text().to_string(),
            cursor,
            capitalization: format!("{:?}", session.capitalization()),
            view: format!("{:?}", session.view()),
            locale: session.locale().to_string(),
            candidates: self.bar.as_ref().map(|(c, _)| c.clone()),
            highlighted: self.bar.as_ref().map(|(_, h)| *h),
            notifications: responses
                .iter()
                .filter_map(|r| r.notification.as_ref())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

pub fn replay_script(script: &Script, settings: Settings, user: Option<UserDictionary>) -> Vec<StepReport> {
    Replayer::new(&script.initial_text, settings, user).run(script)
}

/// Text with a cursor bar, newlines made visible.
fn render_text(text: &str, cursor: usize) -> String {
    let mut out = String::new();
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            out.push('|');
        }
        match c {
            '\n' => out.push('⏎'),
            c => out.push(c),
        }
    }
    if cursor >= text.chars().count() {
        out.push('|');
    }
    out
}

fn render_bar(report: &StepReport) -> String {
    let Some(candidates) = &report.candidates else {
        return String::new();
    };
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let shown = if c == " " { "␣" } else { c.as_str() };
            if Some(i) == report.highlighted {
                format!("[{shown}]")
            } else {
                shown.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

/// Fixed-width table, one row per step.
pub fn format_table(reports: &[StepReport]) -> String {
    let header = ["line", "step", "text", "caps", "candidates", "note"];
    let rows: Vec<[String; 6]> = reports
        .iter()
        .map(|r| {
            let mut note = r.notifications.join("; ");
            if !r.consumed {
                note = if note.is_empty() {
                    "(dropped)".to_string()
                } else {
                    format!("(dropped) {note}")
                };
            }
            [
                r.line.to_string(),
                r.step.clone(),
                render_text(&r.text, r.cursor),
                r.capitalization.clone(),
                render_bar(r),
                note,
            ]
        })
        .collect();

    let mut widths = header.map(UnicodeWidthStr::width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    out.push_str(&line(&header));
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
        out.push('\n');
    }
    out
}

pub fn replay(script_file: &Path, json: bool, settings_file: Option<&Path>, user_dict: Option<&Path>) {
    let content = die!(
        fs::read_to_string(script_file),
        "Error reading {}: {}",
        script_file.display()
    );
    let script = die!(parse_script(&content), "Error: {}");
    let settings = match settings_file {
        Some(path) => {
            let toml = die!(
                fs::read_to_string(path),
                "Error reading {}: {}",
                path.display()
            );
            die!(parse_settings_toml(&toml), "Error: {}")
        }
        None => Settings::default(),
    };
    let user = user_dict
        .map(|path| die!(UserDictionary::open(path), "Error opening user dictionary: {}"));

    let reports = replay_script(&script, settings, user);
    if json {
        for report in &reports {
            let line = die!(serde_json::to_string(report), "Error: {}");
            println!("{line}");
        }
    } else {
        print!("{}", format_table(&reports));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<StepReport> {
        let script = parse_script(source).unwrap();
        replay_script(&script, Settings::default(), None)
    }

    #[test]
    fn test_replay_autocorrect_and_cycle() {
        let reports = run("start \"see \"\ntype teh\nswipe right\nswipe down\n");
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].text, "see teh");
        assert_eq!(reports[0].responses, 3);
        assert_eq!(reports[1].text, "see the ");
        assert_eq!(
            reports[1].candidates.as_deref(),
            Some(&["teh", "the", "tea", "ten", "tee"].map(String::from)[..])
        );
        assert_eq!(reports[1].highlighted, Some(1));
        assert_eq!(reports[2].text, "see tea ");
        assert_eq!(reports[2].highlighted, Some(2));
    }

    #[test]
    fn test_replay_long_press_repeats() {
        let reports = run("start \"abcdef\"\nlong-press backspace 2\n");
        assert_eq!(reports[0].responses, 3);
        assert_eq!(reports[0].text, "abc");
    }

    #[test]
    fn test_replay_swipe_hold() {
        let reports = run("start \"one two three four\"\nswipe left 2\n");
        assert_eq!(reports[0].responses, 3);
        assert_eq!(reports[0].text, "one ");
    }

    #[test]
    fn test_replay_shift_timing() {
        let locked = run("start \"see \"\ntap shift\ntap shift\ntype ab\n");
        assert_eq!(locked[1].capitalization, "Caps");
        assert_eq!(locked[2].text, "see AB");

        let slow = run("start \"see \"\ntap shift\nwait 400\ntap shift\ntype ab\n");
        assert_eq!(slow[2].capitalization, "None");
        assert_eq!(slow[3].text, "see ab");
    }

    #[test]
    fn test_replay_cursor_and_focus() {
        let reports = run(
            "start \"see \"\ntype teh\nswipe right\ntype cat\nswipe right\ncursor -4\nunfocus\nswipe up\n",
        );
        assert_eq!(reports[4].cursor, 8);
        assert_eq!(reports[4].highlighted, Some(1));
        assert!(!reports[6].consumed);
        assert_eq!(reports[6].text, "see the cat ");
    }

    #[test]
    fn test_replay_notifications() {
        let reports = run("long-press return\ntap globe\n");
        assert_eq!(reports[0].notifications, vec!["Autocorrection off"]);
        assert_eq!(reports[1].notifications, vec!["Keyboard: en_US"]);
    }

    #[test]
    fn test_table_layout() {
        let reports = run("start \"see \"\ntype teh\nswipe right\n");
        let table = format_table(&reports);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("line  step"));
        assert!(lines[2].contains("see the |"));
        assert!(lines[2].contains("teh [the] tea ten tee"));
    }

    #[test]
    fn test_render_text_marks_cursor() {
        assert_eq!(render_text("ab\nc", 2), "ab|⏎c");
        assert_eq!(render_text("ab", 2), "ab|");
        assert_eq!(render_text("", 0), "|");
    }
}
