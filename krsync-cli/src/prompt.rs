//! Line-buffered yes/no confirmation.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Ask on stdout, read from stdin. Repeats until the user answers `y` or
/// `n` (case-insensitive); anything else gets a warning and a re-prompt.
/// EOF counts as decline.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm_with(question, &mut stdin.lock(), &mut stdout.lock())
}

/// `confirm` with injected streams; tests always use this form.
pub fn confirm_with(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    loop {
        write!(output, "{question} [y/n] ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
        writeln!(
            output,
            "{} '{answer}' is not a valid answer; enter 'y' or 'n'",
            "warning:".yellow().bold()
        )?;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let answer = confirm_with("Install?", &mut reader, &mut output).expect("confirm");
        (answer, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn yes_and_no_are_accepted() {
        assert!(ask("y\n").0);
        assert!(ask("Y\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("N\n").0);
    }

    #[test]
    fn invalid_input_warns_and_reprompts() {
        let (answer, output) = ask("x\ny\n");
        assert!(answer);
        assert!(output.contains("not a valid answer"));
        assert_eq!(output.matches("[y/n]").count(), 2);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(ask("  y  \n").0);
    }

    #[test]
    fn eof_counts_as_decline() {
        let (answer, output) = ask("");
        assert!(!answer);
        assert_eq!(output.matches("[y/n]").count(), 1);
    }
}
