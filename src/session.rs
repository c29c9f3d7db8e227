//! The interactive banner/prompt session
//!
//! Drives the console transcript as an explicit state machine:
//!
//! ```text
//! Banner -> WaitEnter -> Header -> ShowValue -> AskContinue
//!                                     ^            |  |  |
//!                                     +--- yes ----+  |  +-- invalid --> AskContinue
//!                                                     +----- no -------> Exit
//! ```
//!
//! The session never exits the process. It returns a [`Termination`] and
//! leaves the exit status to the caller. End of input at any prompt is
//! treated as a negative answer.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::{debug, info, trace, warn};

use crate::derived::DerivedValue;
use crate::error::{Error, Result};
use crate::screen::ClearScreen;

pub const BANNER: &str = "\n\
* * * * * * * * * * * * * * *\n\
*                           *\n\
*    Name: Tulika Thampi    *\n\
*                           *\n\
*    Roll no.: T23066       *\n\
*                           *\n\
* * * * * * * * * * * * * * *\n\
\n";

pub const ENTER_PROMPT: &str = "Press Enter to Continue!!! ";
pub const HEADER: &str = "Splitting A String";
pub const SEPARATOR: &str =
    "* * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *";
pub const CONTINUE_PROMPT: &str = "Would you like to continue? (Yes/No) ";
pub const INVALID_CHOICE: &str = "Invalid choice!!!";
pub const FAREWELL: &str = "Thank you for using this program!!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Banner,
    WaitEnter,
    Header,
    ShowValue,
    AskContinue,
    Exit,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why the session ended; both map to a successful exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The user answered "no"/"n"
    Declined,
    /// Standard input was closed while waiting at a prompt
    EndOfInput,
}

/// A parsed reply to the continue prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Invalid,
}

impl Answer {
    /// Case-insensitive; surrounding whitespace is significant
    pub fn parse(reply: &str) -> Self {
        match reply.to_uppercase().as_str() {
            "YES" | "Y" => Answer::Yes,
            "NO" | "N" => Answer::No,
            _ => Answer::Invalid,
        }
    }
}

/// Runs the transcript against any line source and sink
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    clearer: &'a mut dyn ClearScreen,
    state: SessionState,
    values_shown: u64,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, clearer: &'a mut dyn ClearScreen) -> Self {
        Self {
            input,
            output,
            clearer,
            state: SessionState::Banner,
            values_shown: 0,
        }
    }

    /// How many times the derived value has been displayed so far
    pub fn values_shown(&self) -> u64 {
        self.values_shown
    }

    /// Run until the user declines or input ends
    pub fn run(&mut self) -> Result<Termination> {
        info!(clearer = self.clearer.name(), "Session started");

        loop {
            if let Some(termination) = self.step()? {
                info!(
                    reason = ?termination,
                    values_shown = self.values_shown,
                    "Session finished"
                );
                return Ok(termination);
            }
        }
    }

    /// Advance one state; returns the termination once `Exit` is reached
    fn step(&mut self) -> Result<Option<Termination>> {
        trace!(state = %self.state, "Entering state");

        match self.state {
            SessionState::Banner => {
                self.clear_screen();
                self.write(BANNER)?;
                self.transition(SessionState::WaitEnter);
            }
            SessionState::WaitEnter => {
                self.write(ENTER_PROMPT)?;
                if self.read_line()?.is_none() {
                    return self.finish(Termination::EndOfInput).map(Some);
                }
                self.transition(SessionState::Header);
            }
            SessionState::Header => {
                self.clear_screen();
                self.write(&format!("{}\n\n{}\n\n", HEADER, SEPARATOR))?;
                self.transition(SessionState::ShowValue);
            }
            SessionState::ShowValue => {
                let value = DerivedValue::new();
                self.values_shown += 1;
                debug!(iteration = self.values_shown, sum = value.sum(), "Showing derived value");
                self.write(&format!("\n{}\n", value))?;
                self.transition(SessionState::AskContinue);
            }
            SessionState::AskContinue => {
                self.write(&format!("\n{}", CONTINUE_PROMPT))?;
                let Some(reply) = self.read_line()? else {
                    return self.finish(Termination::EndOfInput).map(Some);
                };

                match Answer::parse(&reply) {
                    Answer::Yes => {
                        self.write("\n")?;
                        self.transition(SessionState::ShowValue);
                    }
                    Answer::No => return self.finish(Termination::Declined).map(Some),
                    Answer::Invalid => {
                        debug!(reply = %reply, "Rejected reply");
                        self.write(&format!("{}\n", INVALID_CHOICE))?;
                    }
                }
            }
            SessionState::Exit => {
                return Err(Error::Internal("session already finished".to_string()));
            }
        }

        Ok(None)
    }

    fn finish(&mut self, termination: Termination) -> Result<Termination> {
        if termination == Termination::EndOfInput {
            debug!(state = %self.state, "End of input, treating as a negative answer");
        }
        self.write(&format!("\n{}\n", FAREWELL))?;
        self.transition(SessionState::Exit);
        Ok(termination)
    }

    fn transition(&mut self, next: SessionState) {
        trace!(from = %self.state, to = %next, "State transition");
        self.state = next;
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(Error::Output)
    }

    /// Read one line without its terminator; `None` at end of input.
    /// Bytes that are not valid UTF-8 are decoded lossily.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self.input.read_until(b'\n', &mut buf).map_err(Error::Input)?;
        if read == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&buf).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn clear_screen(&mut self) {
        if let Err(e) = self.clearer.clear(&mut self.output) {
            warn!(error = %e, clearer = self.clearer.name(), "Failed to clear screen");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::NoopClearer;
    use std::io::{self, Cursor};

    impl<R, W> Session<'_, R, W> {
        fn state(&self) -> SessionState {
            self.state
        }

        fn into_output(self) -> W {
            self.output
        }
    }

    const SENTENCE: &str = "Addition of first number inherited from Base 1 (10) and second \
                            number inherited from Base 2 (20) is 30!!!";

    fn run_with(input: &str) -> (Termination, String, u64) {
        let mut clearer = NoopClearer;
        let mut session = Session::new(Cursor::new(input.to_string()), Vec::new(), &mut clearer);
        let termination = session.run().unwrap();
        assert_eq!(session.state(), SessionState::Exit);
        let shown = session.values_shown();
        let output = String::from_utf8(session.into_output()).unwrap();
        (termination, output, shown)
    }

    /// Counts clear calls and can be told to fail
    struct RecordingClearer {
        calls: usize,
        fail: bool,
    }

    impl ClearScreen for RecordingClearer {
        fn clear(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.calls += 1;
            if self.fail {
                Err(io::Error::new(io::ErrorKind::Other, "no console"))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin gone"))
        }
    }

    #[test]
    fn test_answer_parse() {
        for yes in ["YES", "yes", "Yes", "Y", "y"] {
            assert_eq!(Answer::parse(yes), Answer::Yes, "{}", yes);
        }
        for no in ["NO", "no", "nO", "N", "n"] {
            assert_eq!(Answer::parse(no), Answer::No, "{}", no);
        }
        for other in ["", "maybe", "ye", " yes", "no ", "yess"] {
            assert_eq!(Answer::parse(other), Answer::Invalid, "{:?}", other);
        }
    }

    #[test]
    fn test_full_transcript() {
        let (termination, output, shown) = run_with("\nno\n");
        assert_eq!(termination, Termination::Declined);
        assert_eq!(shown, 1);

        let expected = format!(
            "{}{}{}\n\n{}\n\n\n{}\n\n{}\n{}\n",
            BANNER, ENTER_PROMPT, HEADER, SEPARATOR, SENTENCE, CONTINUE_PROMPT, FAREWELL
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_banner_lines() {
        let (_, output, _) = run_with("\nn\n");
        let content: Vec<&str> = output
            .lines()
            .map(|l| l.trim_matches(|c: char| c == '*' || c.is_whitespace()))
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(content[0], "Name: Tulika Thampi");
        assert_eq!(content[1], "Roll no.: T23066");
    }

    #[test]
    fn test_yes_then_no_shows_value_twice() {
        let (termination, output, shown) = run_with("\nyes\nno\n");
        assert_eq!(termination, Termination::Declined);
        assert_eq!(shown, 2);
        assert_eq!(output.matches(SENTENCE).count(), 2);
        assert!(output.ends_with(&format!("\n{}\n", FAREWELL)));
    }

    #[test]
    fn test_invalid_choice_between_values() {
        let (_, output, _) = run_with("\nmaybe\ny\nn\n");
        assert_eq!(output.matches(INVALID_CHOICE).count(), 1);

        let first = output.find(SENTENCE).unwrap();
        let second = output.rfind(SENTENCE).unwrap();
        let invalid = output.find(INVALID_CHOICE).unwrap();
        assert!(first < invalid && invalid < second);
    }

    #[test]
    fn test_case_insensitive_answers() {
        let (termination, _, shown) = run_with("\nYES\nY\nyes\ny\nNO\n");
        assert_eq!(termination, Termination::Declined);
        assert_eq!(shown, 5);

        for no in ["N", "n", "No"] {
            let (termination, _, shown) = run_with(&format!("\n{}\n", no));
            assert_eq!(termination, Termination::Declined);
            assert_eq!(shown, 1);
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let (termination, _, shown) = run_with("\r\ny\r\nn\r\n");
        assert_eq!(termination, Termination::Declined);
        assert_eq!(shown, 2);
    }

    #[test]
    fn test_no_iteration_limit() {
        let input = format!("\n{}no\n", "y\n".repeat(500));
        let (_, output, shown) = run_with(&input);
        assert_eq!(shown, 501);
        assert_eq!(output.matches(SENTENCE).count(), 501);
    }

    #[test]
    fn test_end_of_input_at_enter_prompt() {
        let (termination, output, shown) = run_with("");
        assert_eq!(termination, Termination::EndOfInput);
        assert_eq!(shown, 0);
        assert!(!output.contains(HEADER));
        assert!(output.ends_with(&format!("\n{}\n", FAREWELL)));
    }

    #[test]
    fn test_end_of_input_at_continue_prompt() {
        let (termination, output, shown) = run_with("\ny\nmaybe");
        // the last line has no terminator but is still a reply
        assert_eq!(termination, Termination::EndOfInput);
        assert_eq!(shown, 2);
        assert_eq!(output.matches(INVALID_CHOICE).count(), 1);
        assert!(output.ends_with(&format!("\n{}\n", FAREWELL)));
    }

    #[test]
    fn test_clear_screen_called_twice() {
        let mut clearer = RecordingClearer { calls: 0, fail: false };
        let mut session = Session::new(Cursor::new("\ny\nn\n"), Vec::new(), &mut clearer);
        session.run().unwrap();
        drop(session);
        assert_eq!(clearer.calls, 2);
    }

    #[test]
    fn test_clear_failure_is_not_fatal() {
        let mut clearer = RecordingClearer { calls: 0, fail: true };
        let mut session = Session::new(Cursor::new("\nn\n"), Vec::new(), &mut clearer);
        assert_eq!(session.run().unwrap(), Termination::Declined);
        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains(SENTENCE));
        assert_eq!(clearer.calls, 2);
    }

    #[test]
    fn test_non_utf8_reply_is_invalid() {
        let mut clearer = NoopClearer;
        let input = Cursor::new(b"\n\xffyes\nn\n".to_vec());
        let mut session = Session::new(input, Vec::new(), &mut clearer);
        assert_eq!(session.run().unwrap(), Termination::Declined);
        assert_eq!(session.values_shown(), 1);

        let output = String::from_utf8(session.into_output()).unwrap();
        assert_eq!(output.matches(INVALID_CHOICE).count(), 1);
        assert!(output.ends_with(&format!("\n{}\n", FAREWELL)));
    }

    #[test]
    fn test_read_error_is_reported() {
        let mut clearer = NoopClearer;
        let reader = io::BufReader::new(FailingReader);
        let mut session = Session::new(reader, Vec::new(), &mut clearer);
        let err = session.run().unwrap_err();
        assert!(matches!(err, Error::Input(_)));
        assert_eq!(session.state(), SessionState::WaitEnter);
    }

    #[test]
    fn test_step_after_exit_is_an_error() {
        let mut clearer = NoopClearer;
        let mut session = Session::new(Cursor::new("\nn\n"), Vec::new(), &mut clearer);
        session.run().unwrap();
        assert!(session.run().is_err());
    }
}
