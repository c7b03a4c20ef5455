use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;
use wit::areas::repository::Repository;
use wit::artifacts::commit_id::CommitId;

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    about = "A tiny snapshot-based version control engine",
    long_about = "wit tracks snapshots of a directory tree through an explicit \
    staging step, records immutable commits and reports differences between \
    the working tree, the staging area and the latest commit. \
    It assumes at most one wit process touches a repository at a time.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Creates the .wit control directory in the current directory \
        or at the specified path. Fails if a repository already exists there."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Copy files into the staging area",
        long_about = "Copies the given files, or every file under the given \
        directories, into the staging area. Paths matched by .witignore are \
        silently skipped; re-adding a file overwrites its staged content."
    )]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record a snapshot of the staging area",
        long_about = "Copies the staging area into a new immutable snapshot \
        identified by a fresh commit id. Prints 'nothing to commit' when the \
        staging area is empty."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show untracked, not staged and to-be-committed files",
        long_about = "Classifies every relevant path by comparing the working \
        tree, the staging area and the latest commit."
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore the working tree from a recorded snapshot",
        long_about = "Overwrites the working tree with the contents of the named \
        snapshot and repoints the last commit. Uncommitted changes at restored \
        paths are lost, so a confirmation is asked for unless --force is given."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit id to restore")]
        commit: String,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        force: bool,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => {
                    std::fs::create_dir_all(path)?;
                    open_repository(Path::new(path))?
                }
                None => open_repository(&std::env::current_dir()?)?,
            };

            repository.init()
        }
        Commands::Add { paths } => {
            let repository = open_repository(&std::env::current_dir()?)?;

            repository.add(paths)
        }
        Commands::Commit { message } => {
            let repository = open_repository(&std::env::current_dir()?)?;

            repository.commit(message).map(|_| ())
        }
        Commands::Status => {
            let repository = open_repository(&std::env::current_dir()?)?;

            repository.print_status()
        }
        Commands::Checkout { commit, force } => {
            let repository = open_repository(&std::env::current_dir()?)?;

            if !*force && !confirm_checkout(commit)? {
                eprintln!("checkout aborted");
                return Ok(());
            }

            repository.checkout(&CommitId::from_raw(commit.as_str()))
        }
    }
}

fn open_repository(path: &Path) -> anyhow::Result<Repository> {
    Repository::new(path, Box::new(std::io::stdout()))
}

// Consent is a front-end concern; the engine itself never prompts.
fn confirm_checkout(commit: &str) -> anyhow::Result<bool> {
    eprint!(
        "{} restoring commit {} overwrites uncommitted changes in the working tree. Continue? [y/N] ",
        "warning:".yellow().bold(),
        commit
    );
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}
