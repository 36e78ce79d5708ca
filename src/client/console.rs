//! Operator console
//!
//! Interactive prompts and progress output for the client binary. Reader and
//! writer are generic so the prompts can be driven from tests.

use std::io::{self, BufRead, Write};

use crate::client::runner::{ContinuePolicy, RunObserver};
use crate::types::{Case, Outcome};

const MODEL_LABEL_PROMPT: &str = "Nome do modelo sendo testado: ";
const CONTINUE_PROMPT: &str = "\nPressione Enter para continuar ou 'q' para sair: ";

/// Print `prompt` and read one line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask the operator for the model label.
pub fn prompt_model_label<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<String> {
    let label = prompt_line(reader, writer, MODEL_LABEL_PROMPT)?.unwrap_or_default();
    Ok(label.trim().to_string())
}

/// Blocking Enter / `q` prompt between cases.
pub struct ConsolePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ContinuePolicy for ConsolePrompt<R, W> {
    fn should_continue(&mut self, _completed: usize, _next: &Case) -> bool {
        match prompt_line(&mut self.reader, &mut self.writer, CONTINUE_PROMPT) {
            Ok(Some(answer)) => !answer.trim().eq_ignore_ascii_case("q"),
            // Closed stdin: nobody left to confirm
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read operator input: {}", e);
                false
            }
        }
    }
}

/// Prints per-case progress the way the operator expects to read it.
pub struct ConsoleObserver<W> {
    writer: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{}", text) {
            tracing::debug!("Console write failed: {}", e);
        }
    }
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> RunObserver for ConsoleObserver<W> {
    fn case_started(&mut self, case: &Case) {
        self.emit(&format!("\nTestando Caso {}: {}", case.id, case.label));
        self.emit("Enviando dados...");
    }

    fn case_finished(&mut self, _case: &Case, outcome: &Outcome) {
        if outcome.is_success() {
            self.emit(&format!("Resposta recebida em {} segundos", outcome.elapsed_seconds));
            self.emit("\n=== RESPOSTA DO MODELO ===");
            self.emit(&outcome.response_text);
        } else {
            self.emit(&format!("ERRO: {}", outcome.response_text));
        }
    }
}
