//! Interactive numbered menu over a `TernaryTree<i64>`
//!
//! Reads choices, keys and values line by line from any `BufRead` and writes
//! results to any `Write`, so a session can be scripted. All session state
//! lives in the [`Menu`] value.

use std::fmt;
use std::io::{self, BufRead, Write};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::TernaryTree;

const BANNER_RULE: &str = "******************************************************";
const BANNER_TITLE: &str = "*                   TERNARY TREES                    *";

const INVALID_OPTION: &str = "Invalid option. Please try again.";

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Create,
    Insert,
    Find,
    Exists,
    Autocomplete,
    PartialMatch,
    Size,
    Print,
    Exit,
    Layout,
}

impl Choice {
    pub const ALL: [Choice; 10] = [
        Choice::Create,
        Choice::Insert,
        Choice::Find,
        Choice::Exists,
        Choice::Autocomplete,
        Choice::PartialMatch,
        Choice::Size,
        Choice::Print,
        Choice::Exit,
        Choice::Layout,
    ];

    pub fn number(self) -> i64 {
        match self {
            Choice::Create => 1,
            Choice::Insert => 2,
            Choice::Find => 3,
            Choice::Exists => 4,
            Choice::Autocomplete => 5,
            Choice::PartialMatch => 6,
            Choice::Size => 7,
            Choice::Print => 8,
            Choice::Exit => 9,
            Choice::Layout => 10,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Choice::Create => "CREATE A NEW TERNARY TREE",
            Choice::Insert => "INSERT KEY/VALUE",
            Choice::Find => "FIND VALUE",
            Choice::Exists => "SEE IF KEY EXISTS",
            Choice::Autocomplete => "AUTOCOMPLETE FIND KEYS",
            Choice::PartialMatch => "FIND PARTIAL KEY MATCHES",
            Choice::Size => "GET SIZE OF TERNARY TREE",
            Choice::Print => "PRINT TERNARY TREE",
            Choice::Exit => "EXIT PROGRAM",
            Choice::Layout => "SHOW TREE LAYOUT",
        }
    }
}

impl TryFrom<i64> for Choice {
    type Error = i64;

    fn try_from(number: i64) -> Result<Self, Self::Error> {
        Choice::ALL
            .into_iter()
            .find(|c| c.number() == number)
            .ok_or(number)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.number(), self.label())
    }
}

/// Whether the session goes on after a step.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    tree: TernaryTree<i64>,
    settings: Settings,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(settings: Settings, input: R, out: W) -> Self {
        Self {
            tree: TernaryTree::new(),
            settings,
            input,
            out,
        }
    }

    /// Ends the session, handing back the tree and the output.
    pub fn into_parts(self) -> (TernaryTree<i64>, W) {
        (self.tree, self.out)
    }

    /// Runs until the user exits or input ends.
    ///
    /// Tree errors are reported in the session and do not end it; only I/O
    /// failures on input or output are returned.
    pub fn run(&mut self) -> CliResult<()> {
        self.session()
            .map_err(|e| CliError::io("interactive menu", e))
    }

    fn session(&mut self) -> io::Result<()> {
        loop {
            if self.settings.banner {
                self.banner()?;
            }
            let Some(number) = self.read_number()? else {
                debug!("input closed");
                return Ok(());
            };
            writeln!(self.out)?;

            let flow = match Choice::try_from(number) {
                Ok(choice) => self.dispatch(choice)?,
                Err(number) => {
                    debug!(number, "unknown menu choice");
                    output::error(&mut self.out, INVALID_OPTION)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
            writeln!(self.out)?;
        }
    }

    fn banner(&mut self) -> io::Result<()> {
        output::header(&mut self.out, BANNER_RULE)?;
        output::header(&mut self.out, BANNER_TITLE)?;
        output::header(&mut self.out, BANNER_RULE)?;
        for choice in Choice::ALL {
            output::info(&mut self.out, &format!("    {}", choice))?;
        }
        output::header(&mut self.out, BANNER_RULE)?;
        self.out.flush()
    }

    #[instrument(level = "debug", skip(self))]
    fn dispatch(&mut self, choice: Choice) -> io::Result<Flow> {
        match choice {
            Choice::Create => {
                self.tree.make_empty();
                output::success(&mut self.out, "New Ternary Tree created successfully.")?;
            }
            Choice::Insert => {
                output::prompt(&mut self.out, "What key would you like to insert?")?;
                let Some(key) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                output::prompt(&mut self.out, "What value would you like to insert?")?;
                let Some(value) = self.read_number()? else {
                    return Ok(Flow::Exit);
                };
                match self.tree.insert(&key, value) {
                    Ok(true) => output::success(
                        &mut self.out,
                        &format!("Successfully inserted {} & {} into the ternary tree.", key, value),
                    )?,
                    Ok(false) => output::error(
                        &mut self.out,
                        "Insertion unsuccessful (key/value pair already exists).",
                    )?,
                    Err(e) => output::error(&mut self.out, &e)?,
                }
            }
            Choice::Find => {
                output::prompt(&mut self.out, "Which key would you like to find?")?;
                let Some(key) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                match self.tree.get(&key) {
                    Ok(Some(value)) => {
                        output::action(&mut self.out, "Value", &format!("{} = {}", key, value))?
                    }
                    Ok(None) => output::error(&mut self.out, "Key was not found.")?,
                    Err(e) => output::error(&mut self.out, &e)?,
                }
            }
            Choice::Exists => {
                output::prompt(&mut self.out, "Which key would you like to look for?")?;
                let Some(key) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                match self.tree.contains(&key) {
                    Ok(true) => output::success(
                        &mut self.out,
                        &format!("Successfully found {} in the ternary tree.", key),
                    )?,
                    Ok(false) => output::error(&mut self.out, "Key was not found.")?,
                    Err(e) => output::error(&mut self.out, &e)?,
                }
            }
            Choice::Autocomplete => {
                output::prompt(&mut self.out, "What is the prefix you are looking for in keys?")?;
                let Some(prefix) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                let keys = self.tree.autocomplete(&prefix);
                output::action(&mut self.out, "Keys that match prefix", &keys.iter().join(" "))?;
            }
            Choice::PartialMatch => {
                output::prompt(&mut self.out, "What is the pattern you are looking for in keys?")?;
                let Some(pattern) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                match self.settings.pattern_syntax.compile(&pattern) {
                    Ok(matcher) => {
                        let keys = self.tree.partial_match_with(matcher.as_ref());
                        output::action(
                            &mut self.out,
                            "Keys that match pattern",
                            &keys.iter().join(" "),
                        )?;
                    }
                    Err(e) => output::error(&mut self.out, &e)?,
                }
            }
            Choice::Size => {
                output::action(&mut self.out, "Size of Ternary Tree", &self.tree.size())?;
            }
            Choice::Print => {
                if self.tree.is_empty() {
                    output::info(&mut self.out, "Ternary tree is empty.")?;
                } else {
                    self.tree.print(&mut self.out)?;
                }
            }
            Choice::Exit => {
                output::info(&mut self.out, "Exiting program...")?;
                return Ok(Flow::Exit);
            }
            Choice::Layout => {
                output::info(&mut self.out, &self.tree.layout())?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Next input line without its terminator, None at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads lines until one parses as an integer, None at end of input.
    fn read_number(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => {
                    debug!(input = %line, "not a number");
                    output::error(&mut self.out, INVALID_OPTION)?;
                }
            }
        }
    }
}
