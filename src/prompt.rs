// ABOUTME: Operator prompt capability used by the migration runner
// ABOUTME: Terminal implementation via dialoguer plus a scripted double for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};

/// One-line question/answer interaction with the operator.
///
/// The runner only ever reads free text; yes/no questions are interpreted by
/// the caller as literal `y` versus anything else.
pub trait Prompter {
    fn ask(&self, question: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read operator input")
    }
}

/// Feeds canned answers in order and records every question asked.
///
/// Clones share the same answer queue, so a test can keep a handle for
/// inspection while the runner consumes the other.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<String>>>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(
                answers.into_iter().map(Into::into).collect(),
            )),
            questions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer left for prompt: {}", question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let prompter = ScriptedPrompter::new(["main", "n", "eumw-3.3.0"]);
        assert_eq!(prompter.ask("github branch").unwrap(), "main");
        assert_eq!(prompter.ask("Is this a new branch? (y/n)").unwrap(), "n");
        assert_eq!(prompter.ask("mercurial revision tag").unwrap(), "eumw-3.3.0");
        assert_eq!(prompter.questions().len(), 3);
    }

    #[test]
    fn test_scripted_exhausted_is_an_error() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let result = prompter.ask("github branch");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("github branch"));
    }

    #[test]
    fn test_clones_share_state() {
        let prompter = ScriptedPrompter::new(["y"]);
        let handle = prompter.clone();
        prompter.ask("Delete it? (y/n)").unwrap();
        assert_eq!(handle.questions(), vec!["Delete it? (y/n)".to_string()]);
    }
}
