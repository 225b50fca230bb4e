use std::path::{Path, PathBuf};

mod birthday;
mod list;
mod phone;
mod show;
mod terminal;

use birthday::{Birthday, Upcoming};
use clap::ArgAction;
use contacts::{AddressBook, Config, Encoding, Record, Store};
use list::{List, Search};
use phone::Phone;
use show::Show;
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "contacts.toml", global = true)]
    config: PathBuf,

    /// Path to the address book, overriding the configuration
    #[arg(long, global = true)]
    book: Option<PathBuf>,

    /// Storage encoding, overriding the configuration
    #[arg(short, long, global = true)]
    encoding: Option<Encoding>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context::new(&self.config, self.book, self.encoding)?;

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Resolved configuration shared by every command.
#[derive(Debug)]
pub struct Context {
    config_path: PathBuf,
    config: Config,
    store: Store,
}

impl Context {
    fn new(
        config_path: &Path,
        book: Option<PathBuf>,
        encoding: Option<Encoding>,
    ) -> anyhow::Result<Self> {
        let mut config = Config::load_or_default(config_path)
            .map_err(|e| anyhow::anyhow!("{}: {e}", config_path.display()))?;
        if let Some(encoding) = encoding {
            config.encoding = encoding;
        }

        // A book given on the command line is relative to the working
        // directory; one from the configuration is relative to the config file.
        let path = book.unwrap_or_else(|| {
            let root = config_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            config.book_path(root)
        });
        let store = Store::new(path, config.encoding);

        Ok(Self {
            config_path: config_path.to_path_buf(),
            config,
            store,
        })
    }

    /// Loads the book, starting empty if it does not exist yet.
    fn load(&self) -> anyhow::Result<AddressBook> {
        self.store.load_or_default().map_err(|e| {
            anyhow::anyhow!(
                "Failed to load address book {}: {e}",
                self.store.path().display()
            )
        })
    }

    fn save(&self, book: &AddressBook) -> anyhow::Result<()> {
        self.store.save(book).map_err(|e| {
            anyhow::anyhow!(
                "Failed to save address book {}: {e}",
                self.store.path().display()
            )
        })
    }

    /// Loads the book, applies `f` to the named record, and saves.
    fn update<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Record) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut book = self.load()?;
        let Some(record) = book.find_mut(name) else {
            anyhow::bail!("Contact '{name}' not found");
        };
        let output = f(record)?;
        self.save(&book)?;
        Ok(output)
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write a default configuration and an empty address book
    Init,

    /// Add a contact, replacing any contact with the same name
    Add(Add),

    /// Add, edit or remove a contact's phone numbers
    #[command(subcommand)]
    Phone(Phone),

    /// Show, set or clear a contact's birthday
    Birthday(Birthday),

    /// Show one contact
    Show(Show),

    /// List all contacts (default)
    List(List),

    /// Find contacts by name or phone number
    Search(Search),

    /// List birthdays coming up soon
    Upcoming(Upcoming),

    /// Delete a contact
    Delete(Delete),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Init => Init::run(context)?,
            Self::Add(command) => command.run(context)?,
            Self::Phone(command) => command.run(context)?,
            Self::Birthday(command) => command.run(context)?,
            Self::Show(command) => command.run(context)?,
            Self::List(command) => command.run(context)?,
            Self::Search(command) => command.run(context)?,
            Self::Upcoming(command) => command.run(context)?,
            Self::Delete(command) => command.run(context)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument(skip(context))]
    fn run(context: &Context) -> anyhow::Result<()> {
        if context.config_path.exists() {
            println!(
                "{}",
                format!("ℹ️  Keeping existing {}", context.config_path.display()).dim()
            );
        } else {
            context
                .config
                .save(&context.config_path)
                .map_err(|e| anyhow::anyhow!("Failed to create config: {e}"))?;
            println!("  Created: {}", context.config_path.display());
        }

        if context.store.path().exists() {
            println!(
                "{}",
                format!("ℹ️  Keeping existing {}", context.store.path().display()).dim()
            );
        } else {
            context.save(&AddressBook::new())?;
            println!("  Created: {}", context.store.path().display());
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The contact's name
    name: String,

    /// Birthday in YYYY-MM-DD format
    #[arg(long, short)]
    birthday: Option<String>,

    /// Phone numbers (10 digits each)
    #[arg(long, short, value_delimiter = ',')]
    phone: Vec<String>,
}

impl Add {
    #[instrument(skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut record = Record::new(&self.name, self.birthday.as_deref())?;
        for phone in &self.phone {
            record.add_phone(phone)?;
        }

        let mut book = context.load()?;
        let replaced = book.add_record(record);
        context.save(&book)?;

        if replaced.is_some() {
            println!(
                "{}",
                format!("⚠️  Replaced existing contact '{}'", self.name).warning()
            );
        } else {
            println!("{}", format!("✅ Added '{}'", self.name).success());
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// The contact's name
    name: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Delete {
    #[instrument(skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut book = context.load()?;

        let Some(record) = book.find(&self.name) else {
            println!("{}", format!("ℹ️  No contact named '{}'", self.name).dim());
            return Ok(());
        };

        if !self.yes {
            use std::io::{self, BufRead};

            println!("Will delete: {record}");
            eprint!("\nProceed? (y/N) ");
            let stdin = io::stdin();
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
            if !line.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled");
                std::process::exit(130);
            }
        }

        book.delete(&self.name);
        context.save(&book)?;

        println!("{}", format!("✅ Deleted '{}'", self.name).success());
        Ok(())
    }
}
