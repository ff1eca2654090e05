// src/conflict/prompt.rs

//! User confirmation port.
//!
//! The arbiter blocks on confirmation with no timeout; implementations
//! choose a console reader or an auto-answer stub for batch use.

use std::io::{self, BufRead, Write};

/// Pluggable confirmation source.
pub trait Confirmation {
    /// Ask a yes/no question. With `require_exact_yes`, only the literal
    /// "YES" (case-insensitive) confirms; a bare `y` does not.
    fn confirm(&mut self, prompt: &str, require_exact_yes: bool) -> bool;

    /// Let the user pick one of the given options, or none.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<String>;
}

/// Reads confirmations from standard input.
#[derive(Debug, Clone, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_line(prompt: &str) -> Option<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{prompt} ");
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Confirmation for ConsolePrompt {
    fn confirm(&mut self, prompt: &str, require_exact_yes: bool) -> bool {
        let Some(answer) = Self::read_line(prompt) else {
            return false;
        };
        answer_confirms(&answer, require_exact_yes)
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<String> {
        println!("\n{prompt}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        loop {
            let answer = Self::read_line(&format!("Select option (1-{}):", options.len()))?;
            match answer.parse::<usize>() {
                Ok(index) if index >= 1 && index <= options.len() => {
                    return Some(options[index - 1].clone());
                }
                _ => println!("Please enter a number between 1 and {}", options.len()),
            }
        }
    }
}

/// Answers every confirmation with a fixed response, for batch/CI use.
#[derive(Debug, Clone)]
pub struct AutoConfirm {
    answer: bool,
}

impl AutoConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

impl Confirmation for AutoConfirm {
    fn confirm(&mut self, _prompt: &str, _require_exact_yes: bool) -> bool {
        self.answer
    }

    fn choose(&mut self, _prompt: &str, options: &[String]) -> Option<String> {
        if self.answer {
            options.first().cloned()
        } else {
            None
        }
    }
}

fn answer_confirms(answer: &str, require_exact_yes: bool) -> bool {
    if require_exact_yes {
        answer.eq_ignore_ascii_case("yes")
    } else {
        matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_yes_bar() {
        assert!(answer_confirms("YES", true));
        assert!(answer_confirms("yes", true));
        assert!(answer_confirms("Yes", true));
        // The higher bar rejects the shorthand
        assert!(!answer_confirms("y", true));
        assert!(!answer_confirms("", true));
        assert!(!answer_confirms("no", true));
    }

    #[test]
    fn test_plain_confirmation() {
        assert!(answer_confirms("y", false));
        assert!(answer_confirms("yes", false));
        assert!(answer_confirms("Y", false));
        assert!(!answer_confirms("", false));
        assert!(!answer_confirms("n", false));
        assert!(!answer_confirms("yep", false));
    }

    #[test]
    fn test_auto_confirm() {
        let mut auto = AutoConfirm::new(true);
        assert!(auto.confirm("anything?", true));
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(auto.choose("pick", &options), Some("a".to_string()));

        let mut auto = AutoConfirm::new(false);
        assert!(!auto.confirm("anything?", false));
        assert_eq!(auto.choose("pick", &options), None);
    }
}
