use clap::Subcommand;
use taskly_core::clock::{format_ms, now_ms};
use taskly_core::Config;

use super::{local_notifier, print_events, CmdResult};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// List scheduled notifications
    Pending {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fire every notification that is due now
    Deliver,
}

pub fn run(action: NotifyAction) -> CmdResult {
    let config = Config::load()?;
    let notifier = local_notifier(&config)?;

    match action {
        NotifyAction::Pending { json } => {
            let pending = notifier.pending()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pending)?);
            } else if pending.is_empty() {
                println!("No notifications scheduled");
            } else {
                for n in pending {
                    println!("{}  {}  {}", n.id, format_ms(n.fire_at), n.title);
                }
            }
        }
        NotifyAction::Deliver => {
            let delivered = notifier.deliver_due(now_ms())?;
            print_events(&delivered)?;
        }
    }
    Ok(())
}
