//! Command-line adapter. Parses arguments into exactly one `Operation`.

use crate::usecases::Operation;
use clap::{ArgGroup, Parser};

/// Sales report: aggregate sales, render a PDF and email it; or edit the mailing setup.
#[derive(Debug, Parser)]
#[command(name = "sales-report", version, about)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .multiple(false)
        .args(["add_receiver", "set_sender", "generate_report"]),
))]
pub struct Cli {
    /// Add a recipient address to the configuration
    #[arg(long, value_name = "EMAIL")]
    pub add_receiver: Option<String>,

    /// Replace the sender address and password
    #[arg(long, num_args = 2, value_names = ["EMAIL", "PASSWORD"])]
    pub set_sender: Option<Vec<String>>,

    /// Generate the report and send it to every recipient
    #[arg(long)]
    pub generate_report: bool,
}

impl Cli {
    /// The selected operation. clap guarantees exactly one flag is present.
    pub fn into_operation(self) -> Operation {
        if let Some(address) = self.add_receiver {
            return Operation::AddRecipient(address);
        }
        if let Some(values) = self.set_sender {
            let mut values = values.into_iter();
            let address = values.next().unwrap_or_default();
            let credential = values.next().unwrap_or_default();
            return Operation::SetSender {
                address,
                credential,
            };
        }
        Operation::GenerateReport
    }
}
