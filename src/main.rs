use std::{
    error::Error,
    io::{self, BufRead, Write},
};

use book_catalog::{ActionLogger, CatalogListing, CatalogService};
use clap::Parser;
use colored::Colorize;

/// Interactive book catalog with single-step undo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every catalog change as it happens
    #[arg(short, long)]
    verbose: bool,

    /// Print the book list as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    /// Add a new book
    Add,
    /// Show all books
    List,
    /// Remove a book by title
    Remove,
    /// Undo the last add or remove
    Undo,
    /// Leave the program
    Exit,
}

impl MenuChoice {
    /// Parse a menu selection typed by the user
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Remove),
            "4" => Some(Self::Undo),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the session should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again
    Continue,
    /// Input is exhausted or the user chose to exit
    Exit,
}

/// Line-oriented console over any reader and writer
#[derive(Debug)]
struct Console<R, W> {
    /// Where user input comes from
    input: R,
    /// Where prompts and results go
    output: W,
    /// Print listings as JSON
    json: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `label` and read one line, or `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print the main menu
    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=== BOOK CATALOG ===".bold())?;
        writeln!(self.output, "1. Add a new book")?;
        writeln!(self.output, "2. List books")?;
        writeln!(self.output, "3. Remove a book")?;
        writeln!(self.output, "4. Undo last action")?;
        writeln!(self.output, "5. Exit")
    }

    /// Drive the catalog until the user exits or input runs out
    fn run(&mut self, catalog: &mut CatalogService) -> Result<(), Box<dyn Error>> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Choice: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_book(catalog)?,
                Some(MenuChoice::List) => self.list_books(catalog)?,
                Some(MenuChoice::Remove) => self.remove_book(catalog)?,
                Some(MenuChoice::Undo) => self.undo(catalog)?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "{}", "Goodbye!".green())?;
                    Flow::Exit
                }
                None => {
                    writeln!(self.output, "{}", "Invalid choice, please try again.".yellow())?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Prompt for a book and add it
    fn add_book(&mut self, catalog: &mut CatalogService) -> Result<Flow, Box<dyn Error>> {
        writeln!(self.output, "\n{}", "=== ADD BOOK ===".bold())?;
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Author: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt("Year: ")? else {
            return Ok(Flow::Exit);
        };

        let Ok(year) = year.trim().parse::<i32>() else {
            writeln!(self.output, "{}", "Year must be a whole number.".red())?;
            return Ok(Flow::Continue);
        };

        match catalog.add_book(title, author, year) {
            Ok(()) => writeln!(self.output, "{}", "Book added.".green())?,
            Err(e) => writeln!(self.output, "{}", e.to_string().red())?,
        }
        Ok(Flow::Continue)
    }

    /// Print every book in title order
    fn list_books(&mut self, catalog: &CatalogService) -> Result<Flow, Box<dyn Error>> {
        if self.json {
            writeln!(self.output, "{}", CatalogListing::json(catalog.list_books())?)?;
        } else {
            writeln!(self.output, "\n{}", "=== BOOKS ===".bold())?;
            write!(self.output, "{}", CatalogListing::table(catalog.list_books()))?;
        }
        Ok(Flow::Continue)
    }

    /// Prompt for a title and remove that book
    fn remove_book(&mut self, catalog: &mut CatalogService) -> Result<Flow, Box<dyn Error>> {
        writeln!(self.output, "\n{}", "=== REMOVE BOOK ===".bold())?;
        let Some(title) = self.prompt("Title of the book to remove: ")? else {
            return Ok(Flow::Exit);
        };

        match catalog.remove_book(&title) {
            Ok(()) => writeln!(self.output, "{}", "Book removed.".green())?,
            Err(e) => writeln!(self.output, "{}", e.to_string().red())?,
        }
        Ok(Flow::Continue)
    }

    /// Undo the most recent add or remove
    fn undo(&mut self, catalog: &mut CatalogService) -> Result<Flow, Box<dyn Error>> {
        match catalog.undo() {
            Ok(summary) => {
                writeln!(self.output, "{}", CatalogListing::undo_message(&summary).cyan())?;
            }
            Err(e) => writeln!(self.output, "{}", e.to_string().yellow())?,
        }
        Ok(Flow::Continue)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut catalog = CatalogService::new();
    if args.verbose {
        catalog.register_observer(Box::new(ActionLogger));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console { input: stdin.lock(), output: stdout.lock(), json: args.json };
    console.run(&mut catalog)
}
