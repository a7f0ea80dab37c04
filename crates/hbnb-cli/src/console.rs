//! Line-oriented interactive console.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::session::Session;

pub const PROMPT: &str = "(hbnb) ";

const COMMANDS: &[(&str, &str)] = &[
    ("create <Kind> [name=value ...]", "Create an entity, save it, and print its id"),
    ("show <Kind> <id>", "Print one entity"),
    ("all [Kind]", "Print every entity, optionally of one kind"),
    ("help", "List commands"),
    ("quit", "Exit the console"),
];

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<'a, R: BufRead, W: Write> {
    session: Session<'a, W>,
    input: R,
    interactive: bool,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    /// The prompt is written only when `interactive` is set.
    pub fn new(session: Session<'a, W>, input: R, interactive: bool) -> Self {
        Self {
            session,
            input,
            interactive,
        }
    }

    /// Read and run lines until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if self.interactive {
                write!(self.session.out(), "{PROMPT}")?;
                self.session.out().flush()?;
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                if self.interactive {
                    writeln!(self.session.out())?;
                }
                return Ok(());
            }
            if self.dispatch(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Run one line. Command failures are printed and the console keeps going.
    pub fn dispatch(&mut self, line: &str) -> anyhow::Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        let result = match command {
            "quit" | "EOF" => return Ok(Flow::Quit),
            "help" => self.help(),
            "create" => self.session.create(args.first().copied(), args.get(1..).unwrap_or_default()),
            "show" => self.session.show(args.first().copied(), args.get(1).copied()),
            "all" => self.session.all(args.first().copied()),
            _ => {
                writeln!(self.session.out(), "*** Unknown syntax: {}", line.trim())?;
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, command, "console command failed");
            writeln!(self.session.out(), "** {err:#} **")?;
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> anyhow::Result<()> {
        let out = self.session.out();
        writeln!(out, "{}", "Commands:".bold())?;
        for (usage, summary) in COMMANDS {
            writeln!(out, "  {:<34} {}", usage.cyan(), summary)?;
        }
        Ok(())
    }
}
