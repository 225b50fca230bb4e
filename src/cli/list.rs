use std::num::NonZeroUsize;

use clap::Parser;
use contacts::Record;
use tracing::instrument;

use super::{terminal::Colorize, Context};

#[derive(Debug, Default, Parser)]
pub struct List {
    /// Records per page (defaults to the configured value)
    #[arg(long, short = 'n')]
    page_size: Option<NonZeroUsize>,
}

impl List {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let book = context.load()?;
        if book.is_empty() {
            println!("{}", "No contacts".dim());
            return Ok(());
        }

        let page_size = self.page_size.unwrap_or(context.config.page_size());
        let pages = book.len().div_ceil(page_size.get());

        for (i, page) in book.pages(page_size).enumerate() {
            if pages > 1 {
                println!("{}", format!("Page {}/{pages}", i + 1).dim());
            }
            print_records(page);
        }

        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Search {
    /// Text to look for in names (any case) and phone numbers
    query: String,
}

impl Search {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let book = context.load()?;
        let results = book.search(&self.query);

        if results.is_empty() {
            println!("{}", format!("No contacts match '{}'", self.query).dim());
            return Ok(());
        }

        print_records(results);
        Ok(())
    }
}

fn print_records<'a>(records: impl IntoIterator<Item = &'a Record>) {
    for record in records {
        println!("  • {record}");
    }
}
