//! Escape sequence scanner
//!
//! Recognizes the sequences that contribute nothing to the visible width
//! of a line:
//!
//! - An introducer: ESC (0x1B) or the 8-bit CSI (U+009B)
//! - Any number of intermediate characters from `[ ] ( ) # ; ?`
//! - Then either a string body: alphanumerics and `;` terminated by BEL
//! - Or a control body: an optional parameter list (`1234;56;...`, at most
//!   four digits per parameter) followed by one final character
//!
//! Where several readings of the input are possible, the scanner picks the
//! same one as a leftmost-first backtracking matcher would: string bodies
//! before control bodies, and greedy parameters. The intermediate run is
//! always taken whole. A control body cannot start on an intermediate
//! character, and a string body started earlier inside the run ends at the
//! same place as one started after it, so giving intermediates back never
//! produces a match the full run missed. Each candidate sequence is
//! scanned once, so the cost is linear in its length.

/// Maximum digits in a single numeric parameter
const MAX_PARAM_DIGITS: usize = 4;

/// Scanner state while reading a control body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Digits of the leading parameter
    Leading,
    /// A `;` separated parameter
    Separator,
    /// Expecting the final character
    Final,
}

/// Length in characters of the escape sequence starting at `chars[0]`,
/// or `None` if no sequence starts there.
pub fn sequence_len(chars: &[char]) -> Option<usize> {
    if !is_introducer(*chars.first()?) {
        return None;
    }

    let body = 1 + chars[1..]
        .iter()
        .take_while(|&&c| is_intermediate(c))
        .count();

    string_body(chars, body).or_else(|| control_body(chars, body))
}

/// Alphanumerics and `;` terminated by BEL
fn string_body(chars: &[char], start: usize) -> Option<usize> {
    let end = start
        + chars[start..]
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == ';')
            .count();

    (chars.get(end) == Some(&'\x07')).then_some(end + 1)
}

/// Optional parameter list followed by a final character.
///
/// Whenever a parameter has at least one digit, dropping its last digit
/// leaves that digit to act as the final character, so the body can
/// always end there. `fallback` tracks the innermost such position, which
/// is the one backtracking would reach first.
fn control_body(chars: &[char], start: usize) -> Option<usize> {
    let mut state = State::Leading;
    let mut pos = start;
    let mut fallback = None;

    loop {
        match state {
            State::Leading => {
                let digits = digit_run(chars, pos);
                if digits == 0 {
                    state = State::Final;
                    continue;
                }
                pos += digits;
                fallback = Some(pos);
                state = State::Separator;
            },
            State::Separator => {
                if chars.get(pos) != Some(&';') {
                    state = State::Final;
                    continue;
                }
                let digits = digit_run(chars, pos + 1);
                pos += 1 + digits;
                if digits > 0 {
                    fallback = Some(pos);
                }
            },
            State::Final => {
                return match chars.get(pos) {
                    Some(&c) if is_final(c) => Some(pos + 1),
                    _ => fallback,
                };
            },
        }
    }
}

/// Leading ASCII digits at `start`, capped at one parameter's worth
fn digit_run(chars: &[char], start: usize) -> usize {
    chars
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take(MAX_PARAM_DIGITS)
        .take_while(|c| c.is_ascii_digit())
        .count()
}

fn is_introducer(c: char) -> bool {
    c == '\x1b' || c == '\u{9b}'
}

fn is_intermediate(c: char) -> bool {
    matches!(c, '[' | ']' | '(' | ')' | '#' | ';' | '?')
}

fn is_final(c: char) -> bool {
    matches!(
        c,
        '0'..='9'
            | 'A'..='P'
            | 'R'
            | 'Z'
            | 'c'
            | 'f'..='n'
            | 'q'
            | 'r'
            | 't'
            | 'y'
            | '='
            | '>'
            | '<'
            | '~'
    )
}
