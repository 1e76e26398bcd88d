use crate::app::render::{render_detail, render_grid, render_sets, render_summary};
use crate::core::catalog::Catalog;
use crate::domain::model::{CardId, Category, DeleteOutcome};
use crate::domain::ports::Confirm;
use crate::utils::error::Result;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::io::Write;
use std::str::FromStr;

const HELP: &str = "\
Commands:
  category <name|All>   show one set (or every set)
  search <text>         filter by name, set or set number
  clear                 reset category and search
  list                  print the current cards
  sets                  print the category list
  summary               print count and total value
  show <id>             print one card in detail
  delete <id>           remove a card (asks first)
  help                  this text
  quit                  leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Category(Category),
    Search(String),
    Clear,
    List,
    Sets,
    Summary,
    Show(CardId),
    Delete(CardId),
    Help,
    Quit,
}

fn required_arg<'a>(
    word: &str,
    rest: &'a str,
    what: &str,
) -> std::result::Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("`{}` needs {}", word, what))
    } else {
        Ok(rest)
    }
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "category" | "cat" => Ok(Self::Category(Category::parse(required_arg(
                word,
                rest,
                "a set name or All",
            )?))),
            // an empty search is allowed and clears the term
            "search" | "find" => Ok(Self::Search(rest.to_string())),
            "clear" | "reset" => Ok(Self::Clear),
            "list" | "ls" => Ok(Self::List),
            "sets" => Ok(Self::Sets),
            "summary" => Ok(Self::Summary),
            "show" => Ok(Self::Show(required_arg(word, rest, "a card id")?.into())),
            "delete" | "rm" => Ok(Self::Delete(required_arg(word, rest, "a card id")?.into())),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command `{}`, try `help`", other)),
        }
    }
}

/// Delete confirmation on the terminal.
pub struct TerminalConfirm {
    theme: ColorfulTheme,
}

impl TerminalConfirm {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Confirmation prompt failed, treating as no: {}", e);
                false
            }
        }
    }
}

/// Where session commands come from. `None` ends the session.
pub trait LineInput {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive line editor with history.
pub struct ReadlineInput {
    editor: DefaultEditor,
}

impl ReadlineInput {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineInput for ReadlineInput {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Pre-recorded commands, read in order.
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineInput for ScriptedInput {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Browse loop. Each command finishes its recompute and output before the
/// next line is read.
pub struct Session<'a, I, C, W> {
    catalog: &'a mut Catalog,
    input: I,
    confirm: C,
    output: W,
    bar_width: usize,
}

impl<'a, I: LineInput, C: Confirm, W: Write> Session<'a, I, C, W> {
    pub fn new(
        catalog: &'a mut Catalog,
        input: I,
        confirm: C,
        output: W,
        bar_width: usize,
    ) -> Self {
        Self {
            catalog,
            input,
            confirm,
            output,
            bar_width,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        write!(self.output, "{}", render_grid(self.catalog.view()))?;
        self.output.flush()?;

        while let Some(line) = self.input.next_line("> ")? {
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<SessionCommand>() {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => self.handle(command)?,
                Err(message) => writeln!(self.output, "{}", message)?,
            }
            self.output.flush()?;
        }

        Ok(())
    }

    fn handle(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Category(category) => {
                self.catalog.select_category(category);
                write!(self.output, "{}", render_grid(self.catalog.view()))?;
            }
            SessionCommand::Search(term) => {
                self.catalog.search(&term);
                write!(self.output, "{}", render_grid(self.catalog.view()))?;
            }
            SessionCommand::Clear => {
                self.catalog.reset_filters();
                write!(self.output, "{}", render_grid(self.catalog.view()))?;
            }
            SessionCommand::List => write!(self.output, "{}", render_grid(self.catalog.view()))?,
            SessionCommand::Sets => write!(self.output, "{}", render_sets(&self.catalog.view().sets))?,
            SessionCommand::Summary => {
                writeln!(self.output, "{}", render_summary(&self.catalog.view().summary))?
            }
            SessionCommand::Show(id) => match self.catalog.card(&id) {
                Some(card) => write!(self.output, "{}", render_detail(card, self.bar_width))?,
                None => writeln!(self.output, "No card with id {}", id)?,
            },
            SessionCommand::Delete(id) => {
                let outcome = self.catalog.delete_card(&id, &mut self.confirm);
                match outcome {
                    DeleteOutcome::Deleted(card) => {
                        writeln!(self.output, "Deleted {}", card.name)?;
                        write!(self.output, "{}", render_grid(self.catalog.view()))?;
                    }
                    DeleteOutcome::Cancelled => writeln!(self.output, "Nothing deleted")?,
                    DeleteOutcome::NotFound => writeln!(self.output, "No card with id {}", id)?,
                }
            }
            SessionCommand::Help => write!(self.output, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Card;
    use crate::domain::ports::AutoConfirm;

    /// Records prompts and answers from a script.
    struct ScriptedConfirm {
        answers: VecDeque<bool>,
        prompts: Vec<String>,
    }

    impl ScriptedConfirm {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            self.answers.pop_front().unwrap_or(false)
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![
            Card::new(1, "Abra", "A", 10.0),
            Card::new(2, "Zed", "B", 5.0),
            Card::new(3, "Kadabra", "A", 7.0),
        ])
    }

    fn run_script(catalog: &mut Catalog, lines: &[&str], confirm: impl Confirm) -> String {
        let mut output = Vec::new();
        Session::new(
            catalog,
            ScriptedInput::new(lines.iter().copied()),
            confirm,
            &mut output,
            10,
        )
        .run()
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "category Base Set".parse::<SessionCommand>().unwrap(),
            SessionCommand::Category(Category::Set("Base Set".to_string()))
        );
        assert_eq!(
            "cat All".parse::<SessionCommand>().unwrap(),
            SessionCommand::Category(Category::All)
        );
        assert_eq!(
            "search   Char ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Search("Char".to_string())
        );
        assert_eq!(
            "search".parse::<SessionCommand>().unwrap(),
            SessionCommand::Search(String::new())
        );
        assert_eq!(
            "DELETE 7".parse::<SessionCommand>().unwrap(),
            SessionCommand::Delete(CardId::from(7))
        );
        assert!("show".parse::<SessionCommand>().is_err());
        assert!("dance".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_scripted_input_drains_then_ends() {
        let mut input = ScriptedInput::new(["list", "quit"]);
        assert_eq!(input.next_line("> ").unwrap().as_deref(), Some("list"));
        assert_eq!(input.next_line("> ").unwrap().as_deref(), Some("quit"));
        assert_eq!(input.next_line("> ").unwrap(), None);
    }

    #[test]
    fn test_session_filters_and_summarizes() {
        let mut catalog = catalog();
        let out = run_script(
            &mut catalog,
            &["category A", "summary", "quit"],
            AutoConfirm(false),
        );
        assert!(out.contains("2 cards · $17.00"));
        assert_eq!(catalog.view().cards.len(), 2);
    }

    #[test]
    fn test_session_stops_at_quit() {
        let mut catalog = catalog();
        run_script(&mut catalog, &["quit", "category A"], AutoConfirm(false));
        assert_eq!(catalog.view().cards.len(), 3);
    }

    #[test]
    fn test_session_delete_confirmed() {
        let mut catalog = catalog();
        let mut confirm = ScriptedConfirm::new(&[true]);
        let out = run_script(&mut catalog, &["delete 2", "sets"], &mut confirm);
        assert!(out.contains("Deleted Zed"));
        assert!(out.ends_with("All\nA\n"));
        assert!(confirm.prompts[0].contains("Zed"));
        assert_eq!(catalog.view().sets, vec!["A"]);
    }

    #[test]
    fn test_session_delete_declined() {
        let mut catalog = catalog();
        let mut confirm = ScriptedConfirm::new(&[false]);
        let out = run_script(&mut catalog, &["delete 2"], &mut confirm);
        assert!(out.contains("Nothing deleted"));
        assert_eq!(confirm.prompts.len(), 1);
        assert_eq!(catalog.store().len(), 3);
    }

    #[test]
    fn test_session_unknown_command_and_missing_card() {
        let mut catalog = catalog();
        let out = run_script(&mut catalog, &["fly", "show 99"], AutoConfirm(true));
        assert!(out.contains("unknown command `fly`"));
        assert!(out.contains("No card with id 99"));
    }
}
