pub mod config;
pub mod countdown;
pub mod list;
pub mod notify;

use taskly_core::{Config, Database, Event, LocalNotifier, Permission};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Notifier over its own connection, granted per `notifications.enabled`.
pub fn local_notifier(config: &Config) -> Result<LocalNotifier, Box<dyn std::error::Error>> {
    let permission = if config.notifications.enabled {
        Permission::Granted
    } else {
        Permission::Denied
    };
    Ok(LocalNotifier::new(Database::open()?, permission))
}

pub fn print_events(events: &[Event]) -> CmdResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
