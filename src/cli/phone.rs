use tracing::instrument;

use super::{terminal::Colorize, Context};

#[derive(Debug, clap::Subcommand)]
pub enum Phone {
    /// Add a phone number to a contact
    Add {
        /// The contact's name
        name: String,
        /// The phone number (10 digits)
        phone: String,
    },

    /// Replace one of a contact's phone numbers
    Edit {
        /// The contact's name
        name: String,
        /// The number to replace
        old: String,
        /// The new number (10 digits)
        new: String,
    },

    /// Remove a phone number from a contact
    Remove {
        /// The contact's name
        name: String,
        /// The number to remove
        phone: String,
    },
}

impl Phone {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let message = match self {
            Self::Add { name, phone } => {
                context.update(&name, |record| Ok(record.add_phone(&phone)?))?;
                format!("✅ Added {phone} to '{name}'")
            }
            Self::Edit { name, old, new } => {
                context.update(&name, |record| Ok(record.edit_phone(&old, &new)?))?;
                format!("✅ Replaced {old} with {new} for '{name}'")
            }
            Self::Remove { name, phone } => {
                context.update(&name, |record| Ok(record.remove_phone(&phone)?))?;
                format!("✅ Removed {phone} from '{name}'")
            }
        };

        println!("{}", message.success());
        Ok(())
    }
}
