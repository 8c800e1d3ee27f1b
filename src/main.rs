use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use declc::ast::{Declaration, ParseNode};
use declc::lexer::format_tokens;
use declc::{Analysis, AnalysisOptions, Session};

#[derive(Parser)]
#[command(name = "declc")]
#[command(author, version, about = "Lexer, parser and type checker for C-like declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Source file to read (`-` or omitted for stdin)
    input: Option<PathBuf>,

    /// Analyze each non-empty line as an independent unit
    #[arg(long)]
    per_line: bool,

    /// Treat each unit as a single declaration; tokens after `;` are errors
    #[arg(long)]
    single: bool,

    /// Do not report redeclared variables
    #[arg(long)]
    allow_redeclaration: bool,
}

impl InputArgs {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            single_statement: self.single,
            check_redeclarations: !self.allow_redeclaration,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check source for lexical, syntax and semantic errors
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the token stream
    Tokens {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the parse tree of every declaration
    Tree {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `--verbose` raises the default filter; RUST_LOG still takes precedence
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Check { input } => check(&input),
        Commands::Tokens { input, json } => tokens(&input, json),
        Commands::Tree { input, json } => tree(&input, json),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

/// Read the input and split it into named analysis units
fn read_units(args: &InputArgs) -> Result<Vec<(String, String)>> {
    let (name, source) = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read source file: {:?}", path))?;
            (path.display().to_string(), source)
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            ("<stdin>".to_string(), source)
        }
    };

    if !args.per_line {
        return Ok(vec![(name, source)]);
    }

    Ok(source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (format!("{} line {}", name, i + 1), line.to_string()))
        .collect())
}

/// Analyze every unit, handing each result to `visit`; returns whether all units were error-free
fn for_each_unit(
    args: &InputArgs,
    mut visit: impl FnMut(&Session, usize, &str, &Analysis) -> Result<()>,
) -> Result<bool> {
    let mut session = Session::new(args.options());
    let mut ok = true;

    for (name, source) in read_units(args)? {
        let (file_id, analysis) = session.analyze_unit(name.clone(), &source);
        ok &= !analysis.has_errors();
        visit(&session, file_id, &name, &analysis)?;
    }

    log::debug!("{} units analyzed", session.units_analyzed());
    Ok(ok)
}

fn check(args: &InputArgs) -> Result<bool> {
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let mut errors = 0;
    let mut warnings = 0;

    let ok = for_each_unit(args, |session, file_id, _, analysis| {
        errors += analysis.diagnostics.error_count();
        warnings += analysis.diagnostics.warning_count();
        session
            .report(&mut writer.lock(), file_id, analysis)
            .context("Failed to emit diagnostic")
    })?;

    if ok {
        println!(
            "{}: No errors found ({} warnings)",
            "success".green().bold(),
            warnings
        );
    } else {
        eprintln!(
            "{}: {} errors, {} warnings",
            "failed".red().bold(),
            errors,
            warnings
        );
    }
    Ok(ok)
}

fn tokens(args: &InputArgs, json: bool) -> Result<bool> {
    for_each_unit(args, |_, _, name, analysis| {
        if json {
            println!("{}", serde_json::to_string_pretty(&analysis.tokens)?);
        } else {
            println!("{}", format!("=== Tokens: {} ===", name).blue().bold());
            println!("{}", format_tokens(&analysis.tokens));
        }
        Ok(())
    })
}

fn tree(args: &InputArgs, json: bool) -> Result<bool> {
    for_each_unit(args, |_, _, name, analysis| {
        if json {
            println!("{}", serde_json::to_string_pretty(&analysis.program)?);
            return Ok(());
        }
        println!("{}", format!("=== Parse Tree: {} ===", name).blue().bold());
        for declaration in &analysis.program.declarations {
            print!("{}", render_tree(declaration));
        }
        for diagnostic in analysis.diagnostics.all() {
            println!("{}", diagnostic);
        }
        Ok(())
    })
}

/// Indented text rendering of a declaration tree
fn render_tree(declaration: &Declaration) -> String {
    fn walk(node: ParseNode<'_>, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match node.lexeme() {
            Some(lexeme) => out.push_str(&format!("{}{}: {}\n", indent, node.label(), lexeme)),
            None => out.push_str(&format!("{}{}:\n", indent, node.label())),
        }
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(declaration.as_node(), 0, &mut out);
    out
}
