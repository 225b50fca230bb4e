use chrono::Local;
use clap::Parser;
use contacts::{storage::StoredContact, Record};
use tracing::instrument;

use super::{terminal::Colorize, Context};

#[derive(Debug, Parser)]
#[command(about = "Display detailed information about a contact")]
pub struct Show {
    /// The contact's name
    name: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let book = context.load()?;

        let Some(record) = book.find(&self.name) else {
            anyhow::bail!("Contact '{}' not found", self.name);
        };

        match self.output {
            OutputFormat::Pretty => output_pretty(record),
            OutputFormat::Json => output_json(record)?,
        }

        Ok(())
    }
}

fn output_pretty(record: &Record) {
    println!("# {}\n", record.name());

    println!("{}", "Birthday".dim());
    let birthday = record.birthday().to_raw().map_or_else(
        || "not recorded".dim(),
        |date| {
            let next = record
                .days_to_next_birthday(Local::now().date_naive())
                .map(|days| format!(" (next in {days} days)"))
                .unwrap_or_default();
            format!("{date}{next}")
        },
    );
    println!("  {birthday}");

    println!("\n{}", "Phones".dim());
    if record.phones().is_empty() {
        println!("  {}", "none".dim());
    }
    for phone in record.phones() {
        println!("  • {phone}");
    }
}

fn output_json(record: &Record) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(&StoredContact::from(record))?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_contact_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let context = Context::new(&tmp.path().join("contacts.toml"), None, None).unwrap();

        let show = Show {
            name: "Nobody".to_string(),
            output: OutputFormat::Pretty,
        };
        let error = show.run(&context).unwrap_err();
        assert_eq!(error.to_string(), "Contact 'Nobody' not found");
    }
}
