// minicpp: lexer, parser and syntax tree explorer for a small C++ subset

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::{
    execute,
    style::{style, Stylize},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minicpp::parser::diagnostics::render_diagnostic;
use minicpp::parser::{self, Lexer, ParseError};
use minicpp::printer::{dump_tokens, TreePrinter};
use minicpp::ui::App;

/// Parse a minicpp source file and show its tokens or syntax tree
#[derive(clap::Parser, Debug)]
#[command(name = "minicpp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The source file to parse
    file: PathBuf,

    /// Print the token stream grouped by source line
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree
    #[arg(long)]
    tree: bool,

    /// Browse the syntax tree and tokens next to the source
    #[arg(short = 'e', long)]
    explore: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", cli.file.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.tokens {
        match dump_tokens(&source) {
            Ok(listing) => print!("{}", listing),
            Err(e) => return Ok(report(&source, &e)),
        }
    }

    eprintln!("Parsing {}...", cli.file.display());
    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(e) => return Ok(report(&source, &e)),
    };

    eprintln!(
        "Parsed successfully. Found {} import(s), {} global declaration node(s), {}.",
        program.imports.include_nodes.len() + program.imports.using_nodes.len(),
        program.declarations_before.len() + program.declarations_after.len(),
        if program.main_function.is_some() {
            "main function present"
        } else {
            "no main function"
        }
    );

    if cli.tree {
        print!("{}", TreePrinter::render(&program));
    }

    if cli.explore {
        let tokens = match Lexer::new(&source).tokenize() {
            Ok(tokens) => tokens,
            Err(e) => return Ok(report(&source, &e.into())),
        };

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut app = App::new(source, &program, &tokens);
        let res = app.run(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            eprintln!("Error: {:?}", err);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the caret diagnostic for `err` on stderr.
fn report(source: &str, err: &ParseError) -> ExitCode {
    let rendered = render_diagnostic(source, err);
    let mut lines = rendered.lines();
    if let (Some(code), Some(caret)) = (lines.next(), lines.next()) {
        eprintln!();
        eprintln!("{}", code);
        eprintln!("{}", style(caret).red().bold());
    }
    for line in lines {
        eprintln!("{}", style(line).red());
    }
    ExitCode::FAILURE
}
