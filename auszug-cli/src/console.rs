use std::io::{self, BufRead, Write};

use auszug_rules::Prompter;

/// Operator dialogue on stdin/stdout.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(s.trim().to_string())
    }

    fn say(&mut self, message: &str) {
        writeln!(self.output, "\n{}", message).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_reads_trimmed_line() {
        let mut out = Vec::new();
        let mut p = ConsolePrompter::new(&b"  gmbh \n0\n\n"[..], &mut out);
        assert_eq!(p.ask("Marker").unwrap(), "gmbh");
        assert_eq!(p.ask("Shift").unwrap(), "0");
        assert_eq!(p.ask("Name").unwrap(), "");
        drop(p);
        assert_eq!(String::from_utf8(out).unwrap(), "Marker: Shift: Name: ");
    }

    #[test]
    fn test_end_of_input_is_not_an_empty_answer() {
        let mut out = Vec::new();
        let mut p = ConsolePrompter::new(&b"1"[..], &mut out);
        assert_eq!(p.ask("Nummer").unwrap(), "1");
        let err = p.ask("Nummer").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_say_prints_block() {
        let mut out = Vec::new();
        ConsolePrompter::new(&b""[..], &mut out).say("Trennvorschlag");
        assert_eq!(String::from_utf8(out).unwrap(), "\nTrennvorschlag\n");
    }
}
