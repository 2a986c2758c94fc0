use anyhow::{Context, Result};
use cairn::areas::config::{DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, RepositoryConfig};
use cairn::areas::repository::Repository;
use cairn::artifacts::objects::commit::Author;
use cairn::commands::plumbing::cat_file::CatFileMode;
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cairn",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressable object store",
    long_about = "Stores files, directory snapshots and commits as git-compatible loose objects \
    under .git/objects, and reads them back by full or abbreviated id.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "CAIRN_WORK_TREE",
        help = "The directory to snapshot (defaults to the current directory)"
    )]
    work_tree: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "CAIRN_DIR",
        help = "The metadata directory (defaults to <work tree>/.git)"
    )]
    git_dir: Option<PathBuf>,
    #[arg(long, global = true, env = "GIT_AUTHOR_NAME", default_value = DEFAULT_AUTHOR_NAME, hide = true)]
    author_name: String,
    #[arg(long, global = true, env = "GIT_AUTHOR_EMAIL", default_value = DEFAULT_AUTHOR_EMAIL, hide = true)]
    author_email: String,
    #[arg(long, global = true, env = "GIT_AUTHOR_DATE", hide = true)]
    author_date: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the objects, refs and logs directories and the HEAD file \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute the blob id of a file and optionally store it",
        long_about = "This command hashes a file as a blob object and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or kind of an object",
        long_about = "This command prints the payload (-p) or the kind (-t) of an object. \
        The object may be named by a unique id prefix."
    )]
    CatFile {
        #[arg(
            short = 'p',
            conflicts_with = "show_type",
            required_unless_present = "show_type",
            help = "Pretty-print the object payload"
        )]
        pretty: bool,
        #[arg(short = 't', help = "Print the object kind")]
        show_type: bool,
        #[arg(index = 1, help = "The object id or id prefix")]
        object: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the entries of a tree object",
        long_about = "This command lists the names recorded in a tree, directories with a trailing slash. \
        A commit id lists the commit's tree."
    )]
    LsTree {
        #[arg(index = 1, help = "The tree id or id prefix")]
        object: String,
    },
    #[command(name = "ls-objects", about = "List every stored object with its kind")]
    LsObjects,
    #[command(
        name = "write-tree",
        about = "Snapshot the work tree as a tree object",
        long_about = "This command stores every non-ignored file of the work tree as a blob \
        and every directory as a tree, then prints the root tree id."
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit of a tree",
        long_about = "This command records a commit of the given tree, or of a fresh snapshot \
        of the work tree when no tree is given."
    )]
    CommitTree {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(index = 1, help = "The tree id or id prefix")]
        tree: Option<String>,
    },
    #[command(name = "log", about = "Show every stored commit")]
    Log,
}

impl Cli {
    fn config(&self, work_dir: &Path) -> Result<RepositoryConfig> {
        let author = match &self.author_date {
            Some(date) => {
                let timestamp = Author::parse_date(date)
                    .with_context(|| format!("Invalid GIT_AUTHOR_DATE: {date}"))?;
                Author::new_with_timestamp(
                    self.author_name.clone(),
                    self.author_email.clone(),
                    timestamp,
                )
            }
            None => Author::new(self.author_name.clone(), self.author_email.clone()),
        };

        let mut config = RepositoryConfig::new(work_dir).with_author(author);
        if let Some(git_dir) = &self.git_dir {
            config = config.with_git_dir(std::path::absolute(git_dir)?);
        }

        Ok(config)
    }

    fn work_dir(&self) -> Result<PathBuf> {
        let work_dir = match (&self.command, &self.work_tree) {
            (Commands::Init { path: Some(path) }, _) => {
                std::fs::create_dir_all(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                path.clone()
            }
            (_, Some(work_tree)) => work_tree.clone(),
            (_, None) => std::env::current_dir()?,
        };

        work_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve work tree {}", work_dir.display()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let work_dir = cli.work_dir()?;
    let repository = Repository::new(cli.config(&work_dir)?, Box::new(std::io::stdout()));

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::HashObject { write, file } => {
            repository.hash_object(&std::path::absolute(file)?, *write)?
        }
        Commands::CatFile {
            show_type, object, ..
        } => {
            let mode = if *show_type {
                CatFileMode::Type
            } else {
                CatFileMode::Pretty
            };
            repository.cat_file(object, mode)?
        }
        Commands::LsTree { object } => repository.ls_tree(object)?,
        Commands::LsObjects => repository.ls_objects()?,
        Commands::WriteTree => repository.write_tree()?,
        Commands::CommitTree { message, tree } => {
            repository.commit_tree(message, tree.as_deref())?
        }
        Commands::Log => repository.log()?,
    }

    repository.writer().flush()?;

    Ok(())
}
