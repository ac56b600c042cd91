use itertools::Itertools;
use log::debug;

/// Section of the rig file currently being read
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Empty,
    Nodes,
    Skeleton,
}

/// What one line of a rig file turned out to be
#[derive(Clone, Debug, PartialEq)]
pub enum Line<'a> {
    Version(i32),
    BadVersion(&'a str),
    SectionStart(State),
    Bone {
        id: i32,
        name: &'a str,
        parent_id: i32,
    },
    Pose {
        id: i32,
        position: [f32; 3],
        rotation: [f32; 3],
    },
    SectionEnd,
    Ignored,
}

/// Line by line state machine for the rig file format:
///
/// ```text
/// version 1
/// nodes
/// <id> <name> <parent_id>
/// end
/// skeleton
/// <id> <x> <y> <z> <rx> <ry> <rz>
/// end
/// ```
///
/// Keywords are matched as whole whitespace separated tokens, so a bone
/// called `hand_end` does not close its section.
#[derive(Clone, Copy, Debug)]
pub struct Parser {
    state: State,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Empty,
        }
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Classifies a line and advances the state.
    ///
    /// A data line that also contains `end` is returned as data, but the
    /// section is still closed. Likewise a version line that names a section
    /// is returned as `Version` and the section is still entered.
    pub fn feed<'a>(&mut self, text: &'a str) -> Line<'a> {
        let (line, next) = classify(self.state, text);
        if next != self.state {
            debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
        line
    }
}

/// Pure per-state classification returning the line and the next state
#[must_use]
pub fn classify(state: State, text: &str) -> (Line<'_>, State) {
    match state {
        State::Empty => {
            // "skeleton" wins if both keywords appear
            let next = if has_token(text, "skeleton") {
                State::Skeleton
            } else if has_token(text, "nodes") {
                State::Nodes
            } else {
                State::Empty
            };
            let line = match parse_version(text) {
                Some(Ok(version)) => Line::Version(version),
                Some(Err(())) => Line::BadVersion(text.trim()),
                None if next == State::Empty => Line::Ignored,
                None => Line::SectionStart(next),
            };
            (line, next)
        }
        State::Nodes => {
            let line = parse_bone(text).unwrap_or(Line::Ignored);
            section_line(state, text, line)
        }
        State::Skeleton => {
            let line = parse_pose(text).unwrap_or(Line::Ignored);
            section_line(state, text, line)
        }
    }
}

fn section_line<'a>(
    state: State,
    text: &str,
    line: Line<'a>,
) -> (Line<'a>, State) {
    if !has_token(text, "end") {
        return (line, state);
    }
    if line == Line::Ignored {
        (Line::SectionEnd, State::Empty)
    } else {
        (line, State::Empty)
    }
}

fn has_token(text: &str, token: &str) -> bool {
    text.split_whitespace().any(|t| t == token)
}

/// Any line whose first token starts with `version`. The number may follow
/// directly (`version2`) or as the next token. Its leading integer is used
/// and anything after it ignored, so `2.0` reads as 2. `Err` if there is no
/// integer or it doesn't fit in an `i32`.
fn parse_version(text: &str) -> Option<Result<i32, ()>> {
    let mut tokens = text.split_whitespace();
    let rest = tokens.next()?.strip_prefix("version")?;
    let number = if rest.is_empty() {
        tokens.next().unwrap_or_default()
    } else {
        rest
    };
    Some(leading_int(number).ok_or(()))
}

/// Optional sign followed by decimal digits at the start of `s`
fn leading_int(s: &str) -> Option<i32> {
    let sign = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// `<id> <name> <parent_id>`
fn parse_bone(text: &str) -> Option<Line<'_>> {
    let (id, name, parent_id) = text.split_whitespace().collect_tuple()?;
    Some(Line::Bone {
        id: id.parse().ok()?,
        name,
        parent_id: parent_id.parse().ok()?,
    })
}

/// `<id> <x> <y> <z> <rx> <ry> <rz>`
fn parse_pose(text: &str) -> Option<Line<'static>> {
    let (id, x, y, z, rx, ry, rz) =
        text.split_whitespace().collect_tuple()?;
    let f = |s: &str| s.parse::<f32>().ok();
    Some(Line::Pose {
        id: id.parse().ok()?,
        position: [f(x)?, f(y)?, f(z)?],
        rotation: [f(rx)?, f(ry)?, f(rz)?],
    })
}
