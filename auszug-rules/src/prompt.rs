//! Operator dialogue seam.
//!
//! The enricher never touches stdin/stdout directly. The CLI plugs in a
//! console implementation, tests plug in [`ScriptedPrompter`].

use std::collections::VecDeque;
use std::io;

pub trait Prompter {
    /// Show `question` and return one trimmed line.
    ///
    /// An empty line is a valid answer. End of input is an error of kind
    /// [`io::ErrorKind::UnexpectedEof`].
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Show a message that needs no answer.
    fn say(&mut self, message: &str);
}

/// Replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
    output: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Messages shown so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted answer left",
            )),
        }
    }

    fn say(&mut self, message: &str) {
        self.output.push(message.to_string());
    }
}
