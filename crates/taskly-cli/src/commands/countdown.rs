use clap::Subcommand;
use taskly_core::clock::{format_ms, now_ms};
use taskly_core::{
    Config, CountdownController, CountdownStatus, CountdownTicker, CountdownView, Database, Event,
    LocalNotifier, TracingFeedback,
};

use super::{local_notifier, print_events, CmdResult};

type Controller = CountdownController<Database, LocalNotifier, TracingFeedback>;

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Print the time until (or since) the thing is due
    Status {
        /// Print a JSON snapshot
        #[arg(long)]
        json: bool,
    },
    /// Record that the thing has been done
    Done,
    /// Recompute the countdown every tick until interrupted
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
        /// Print JSON snapshots
        #[arg(long)]
        json: bool,
    },
    /// List past completions, most recent first
    History {
        /// Print timestamps as JSON
        #[arg(long)]
        json: bool,
    },
}

fn open_controller() -> Result<Controller, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let notifier = local_notifier(&config)?;
    let mut ctl = CountdownController::new(Database::open()?, notifier, TracingFeedback, config);
    ctl.load();
    Ok(ctl)
}

fn render(status: &CountdownStatus, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(&status.to_event())?);
    } else {
        let d = status.distance;
        println!(
            "{} {}d {:02}h {:02}m {:02}s",
            status.headline(),
            d.days,
            d.hours,
            d.minutes,
            d.seconds
        );
    }
    Ok(())
}

pub fn run(action: CountdownAction) -> CmdResult {
    match action {
        CountdownAction::Status { json } => {
            let ctl = open_controller()?;
            match ctl.view() {
                CountdownView::Ready(status) => render(&status, json)?,
                CountdownView::Loading => println!("Loading..."),
            }
        }
        CountdownAction::Done => {
            let mut ctl = open_controller()?;
            let events = ctl.complete()?;
            for event in &events {
                if let Event::NotificationPermissionDenied { advisory: true } = event {
                    eprintln!("Unable to schedule notification");
                    eprintln!("Enable the notification permission in the settings.");
                }
            }
            print_events(&events)?;
        }
        CountdownAction::Watch { ticks, json } => {
            let ctl = open_controller()?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(watch(ctl, ticks, json))?;
        }
        CountdownAction::History { json } => {
            let ctl = open_controller()?;
            let history = ctl.history();
            if json {
                println!("{}", serde_json::to_string_pretty(history)?);
            } else if history.is_empty() {
                println!("Not done yet");
            } else {
                for at in history {
                    println!("{}", format_ms(*at));
                }
            }
        }
    }
    Ok(())
}

/// Print a status on every tick and deliver notifications as they fall due.
async fn watch(ctl: Controller, ticks: Option<u64>, json: bool) -> CmdResult {
    let last_completed = ctl.state().and_then(|s| s.last_completed());
    let countdown = &ctl.config().countdown;
    let ticker = CountdownTicker::start(last_completed, countdown.interval(), countdown.tick());
    let mut rx = ticker.subscribe();
    let mut seen = 0u64;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *rx.borrow_and_update();
                render(&status, json)?;

                let delivered = ctl.notifier().deliver_due(now_ms())?;
                print_events(&delivered)?;

                seen += 1;
                if ticks.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    ticker.stop().await;
    Ok(())
}
