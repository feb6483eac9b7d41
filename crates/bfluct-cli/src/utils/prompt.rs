use std::io::{self, BufRead, Write};

/// Upper bound on invalid answers before the prompt gives up.
const MAX_ATTEMPTS: usize = 3;

/// Asks a yes/no question, re-prompting on invalid input at most
/// [`MAX_ATTEMPTS`] times. Exhausted attempts and end-of-input both resolve
/// to `false`, the conservative answer for a destructive follow-up action.
pub fn confirm(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    for _ in 0..MAX_ATTEMPTS {
        write!(output, "{} (y/n): ", question)?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer 'y' or 'n'.")?,
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answers: &str) -> bool {
        let mut output = Vec::new();
        confirm("Delete?", &mut Cursor::new(answers), &mut output).unwrap()
    }

    #[test]
    fn yes_answers_confirm() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
    }

    #[test]
    fn no_answers_decline() {
        assert!(!ask("n\n"));
        assert!(!ask("No\n"));
    }

    #[test]
    fn invalid_answers_are_retried_until_valid() {
        assert!(ask("maybe\n\ny\n"));
    }

    #[test]
    fn three_invalid_answers_resolve_to_no() {
        assert!(!ask("a\nb\nc\ny\n"));
    }

    #[test]
    fn end_of_input_resolves_to_no() {
        assert!(!ask(""));
    }

    #[test]
    fn prompt_text_is_written_before_reading() {
        let mut output = Vec::new();
        confirm("Delete the generated snapshots?", &mut Cursor::new("y\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Delete the generated snapshots? (y/n): "));
    }
}
