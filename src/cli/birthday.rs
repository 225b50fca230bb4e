use chrono::Local;
use clap::Parser;
use tracing::instrument;

use super::{terminal::Colorize, Context};

#[derive(Debug, Parser)]
pub struct Birthday {
    /// The contact's name
    name: String,

    /// Set the birthday (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear")]
    set: Option<String>,

    /// Remove the birthday
    #[arg(long)]
    clear: bool,
}

impl Birthday {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        if self.set.is_some() || self.clear {
            let raw = self.set.as_deref();
            context.update(&self.name, |record| Ok(record.set_birthday(raw)?))?;
            let message = raw.map_or_else(
                || format!("✅ Cleared birthday for '{}'", self.name),
                |date| format!("✅ Set birthday for '{}' to {date}", self.name),
            );
            println!("{}", message.success());
            return Ok(());
        }

        let book = context.load()?;
        let Some(record) = book.find(&self.name) else {
            anyhow::bail!("Contact '{}' not found", self.name);
        };

        match record.days_to_next_birthday(Local::now().date_naive()) {
            None => println!("{}", format!("No birthday recorded for '{}'", self.name).dim()),
            Some(0) => println!("🎂 {} has a birthday today", self.name),
            Some(1) => println!("{} has a birthday tomorrow", self.name),
            Some(days) => println!("{} has a birthday in {days} days", self.name),
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Upcoming {
    /// How many days ahead to look (defaults to the configured value)
    #[arg(long, short)]
    within: Option<u32>,
}

impl Upcoming {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let book = context.load()?;
        let within = self.within.unwrap_or(context.config.upcoming_days);
        let upcoming = book.upcoming_birthdays(Local::now().date_naive(), within);

        if upcoming.is_empty() {
            println!(
                "{}",
                format!("No birthdays in the next {within} days").dim()
            );
            return Ok(());
        }

        for (record, days) in upcoming {
            let when = match days {
                0 => "today".success(),
                1 => "tomorrow".warning(),
                n => format!("in {n} days").info(),
            };
            let date = record.birthday().to_raw().unwrap_or_default();
            println!("  • {} ({date}) {when}", record.name());
        }
        Ok(())
    }
}
