//! Menu-driven session over any line-oriented input and output.
//!
//! `exit` (or `EXIT`) at any prompt ends the session at once without saving.
//! `back` abandons the current multi-step operation and returns to the menu.

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::application::services::FamilyService;
use crate::domain::{PersonId, LIVING_SENTINEL};

const RULE: &str = "------------------------------------------";

/// One answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Value(String),
    Back,
    Exit,
}

/// What the menu does after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Saved, then quit
    Saved,
    /// Quit without saving
    Quit,
    /// `exit` typed or input closed
    Exit,
}

/// Digits only, or exactly `-1` for "still alive".
pub fn is_numeric(s: &str) -> bool {
    s == "-1" || (!s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
}

/// Interactive menu bound to a family service.
pub struct MenuSession<'a, R, W> {
    service: &'a mut FamilyService,
    root: PersonId,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    pub fn new(service: &'a mut FamilyService, root: PersonId, input: R, output: W) -> Self {
        Self {
            service,
            root,
            input,
            output,
        }
    }

    /// Run the menu until the user quits.
    #[instrument(level = "debug", skip(self), fields(root = self.root))]
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        loop {
            writeln!(self.output, "{}", RULE)?;
            writeln!(self.output, "Main Menu (type 'exit' to terminate):")?;
            writeln!(self.output, "  1) Add a new Person")?;
            writeln!(self.output, "  2) Print the Family Tree")?;
            writeln!(self.output, "  3) Save & Quit")?;
            writeln!(self.output, "  4) Just Quit")?;
            writeln!(self.output, "  5) Restore to Default")?;
            writeln!(self.output, "{}", RULE)?;

            let choice = match self.prompt("Your choice: ")? {
                Reply::Exit => return Ok(SessionEnd::Exit),
                Reply::Back => String::from("back"),
                Reply::Value(v) => v,
            };
            debug!("menu choice: {:?}", choice);

            match choice.as_str() {
                "1" => {
                    if self.add_person()? == Flow::Exit {
                        return Ok(SessionEnd::Exit);
                    }
                }
                "2" => {
                    writeln!(self.output, "\nCurrent Family Tree")?;
                    self.write_tree()?;
                    writeln!(self.output, "===================\n")?;
                }
                "3" => match self.service.save() {
                    Ok(()) => {
                        writeln!(
                            self.output,
                            "[Data saved to '{}'. Exiting...]",
                            self.service.store().path().display()
                        )?;
                        writeln!(self.output, "\nProgram Finished")?;
                        return Ok(SessionEnd::Saved);
                    }
                    Err(e) => writeln!(self.output, "[Error saving file: {}]", e)?,
                },
                "4" => {
                    writeln!(self.output, "[Exiting without saving changes.]")?;
                    writeln!(self.output, "\nProgram Finished")?;
                    return Ok(SessionEnd::Quit);
                }
                "5" => {
                    writeln!(
                        self.output,
                        "\n[Restoring default data. All custom changes will be LOST unless you save afterward.]"
                    )?;
                    self.service.reset_to_default();
                    writeln!(
                        self.output,
                        "[All custom changes discarded. Restored default data.]"
                    )?;
                }
                _ => writeln!(
                    self.output,
                    "[Invalid option. Please choose 1-5 or type 'exit'.]"
                )?,
            }
        }
    }

    /// Print `message`, read one line and classify it. Closed input counts as `exit`.
    fn prompt(&mut self, message: &str) -> io::Result<Reply> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Exit);
        }
        let line = line.trim_end_matches(['\n', '\r']);
        match line {
            "exit" | "EXIT" => {
                writeln!(self.output, "[Exiting program on user request.]")?;
                Ok(Reply::Exit)
            }
            "back" => Ok(Reply::Back),
            other => Ok(Reply::Value(other.to_string())),
        }
    }

    /// Prompt until a number comes back; `Err(flow)` carries back/exit.
    fn prompt_number(&mut self, message: &str, complaint: &str) -> io::Result<Result<i64, Flow>> {
        loop {
            match self.prompt(message)? {
                Reply::Exit => return Ok(Err(Flow::Exit)),
                Reply::Back => return Ok(Err(Flow::Continue)),
                Reply::Value(v) => match v.parse::<i64>() {
                    Ok(n) if is_numeric(&v) => return Ok(Ok(n)),
                    _ => writeln!(self.output, "{}", complaint)?,
                },
            }
        }
    }

    fn write_tree(&mut self) -> io::Result<()> {
        match self.service.tree().render_family_tree(self.root) {
            Ok(text) => write!(self.output, "{}", text),
            Err(_) => writeln!(self.output, "[Invalid root index: {}]", self.root),
        }
    }

    /// Pick a generation, then a parent in it, then enter the new person.
    fn add_person(&mut self) -> io::Result<Flow> {
        writeln!(
            self.output,
            "\n[Add Person - type 'exit' to quit, 'back' to return.]"
        )?;

        let generations = self.service.tree().generations(self.root);
        if generations.is_empty() {
            writeln!(self.output, "No valid root or empty tree! Cannot add.")?;
            return Ok(Flow::Continue);
        }

        writeln!(
            self.output,
            "We have {} generation(s) under index {}.",
            generations.len(),
            self.root
        )?;
        for (g, members) in generations.iter().enumerate() {
            writeln!(
                self.output,
                "  Generation #{} has {} person(s).",
                g + 1,
                members.len()
            )?;
        }

        let members = loop {
            let message = format!(
                "Which generation is the parent in? (1 to {}, 'back' to menu): ",
                generations.len()
            );
            let choice = match self
                .prompt_number(&message, "[Invalid input: must be a number or 'back'.]")?
            {
                Ok(n) => n,
                Err(flow) => return Ok(flow),
            };
            match usize::try_from(choice - 1).ok().and_then(|g| generations.get(g)) {
                Some(members) => {
                    writeln!(self.output, "\n--- Members in Generation #{} ---", choice)?;
                    break members.clone();
                }
                None => writeln!(self.output, "[Invalid generation index!]")?,
            }
        };

        for (i, &id) in members.iter().enumerate() {
            if let Ok(person) = self.service.tree().get_person(id) {
                writeln!(self.output, "  ({}) {}", i + 1, person)?;
            }
        }
        writeln!(self.output, "{}", RULE)?;

        let parent = loop {
            let message = format!("Pick the parent number (1 to {}, or 'back'): ", members.len());
            let choice =
                match self.prompt_number(&message, "[Please enter a valid number or 'back'.]")? {
                    Ok(n) => n,
                    Err(flow) => return Ok(flow),
                };
            match usize::try_from(choice - 1).ok().and_then(|i| members.get(i)) {
                Some(&id) => break id,
                None => writeln!(self.output, "[Invalid choice.]")?,
            }
        };

        let name = match self.prompt("\nEnter new person's name (or 'exit'/'back'): ")? {
            Reply::Value(name) => name,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Exit => return Ok(Flow::Exit),
        };

        let birth = match self.prompt_number(
            "Enter birth year (or 'exit'/'back'): ",
            "[Please enter a numeric birth year.]",
        )? {
            Ok(n) => n,
            Err(flow) => return Ok(flow),
        };
        let death = match self.prompt_number(
            "Enter death year (-1 if still alive) (or 'exit'/'back'): ",
            "[Please enter a numeric death year or -1.]",
        )? {
            Ok(n) => n,
            Err(flow) => return Ok(flow),
        };

        let (Ok(birth), Ok(death)) = (i32::try_from(birth), i32::try_from(death)) else {
            writeln!(self.output, "[Year out of range.]")?;
            return Ok(Flow::Continue);
        };
        let death = (death != LIVING_SENTINEL).then_some(death);

        let id = match self.service.add_child(parent, &name, birth, death) {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, "[Could not add person: {}]", e)?;
                return Ok(Flow::Continue);
            }
        };

        if let Ok(person) = self.service.tree().get_person(id) {
            writeln!(self.output, "\n[New Person Added]")?;
            writeln!(self.output, "   {}\n", person)?;
        }
        writeln!(self.output, "Updated Family Tree")?;
        self.write_tree()?;
        writeln!(self.output, "===========================\n")?;
        Ok(Flow::Continue)
    }
}
