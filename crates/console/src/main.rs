use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use dronedeck_client::view::{fmt_metric, grid_view, log_tail};
use dronedeck_client::{parse_task_input, Commander, HttpGateway, Intent, SnapshotStore, SyncLoop};
use dronedeck_protocol::CellLabel;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dronedeck-console",
    about = "Terminal console for the drone delivery simulation"
)]
struct Cli {
    /// Base URL of the simulation service.
    #[arg(long, env = "DRONEDECK_BACKEND", default_value = "http://127.0.0.1:8000")]
    backend: String,

    /// Polling period of the background sync loop, in milliseconds.
    #[arg(long, default_value_t = 120)]
    period_ms: u64,

    /// How many log lines to show, newest first.
    #[arg(long, default_value_t = dronedeck_client::view::LOG_TAIL)]
    log_tail: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = SnapshotStore::new();
    let gateway = HttpGateway::new(&cli.backend);
    let commander = Commander::new(gateway.clone(), store.clone());
    let sync = SyncLoop::new(gateway, store.clone())
        .with_period(Duration::from_millis(cli.period_ms))
        .spawn();

    eprintln!("[dronedeck] syncing with {}", cli.backend);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        match run_command(line.trim(), &commander, &store, cli.log_tail).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }

    sync.shutdown().await;
    Ok(())
}

/// Returns `false` when the user asked to quit. Malformed input is rejected
/// here, before any request goes out.
async fn run_command(
    line: &str,
    commander: &Commander,
    store: &SnapshotStore,
    tail: usize,
) -> anyhow::Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match command {
        "" => {}
        "show" | "s" => render(store, tail),
        "toggle" | "t" => {
            let label: CellLabel = rest.parse()?;
            commander.dispatch(Intent::ToggleObstacle(label)).await?;
            render(store, tail);
        }
        "task" => {
            let (pickup, drop) = parse_task_input(rest)?;
            commander.dispatch(Intent::AssignTask { pickup, drop }).await?;
            render(store, tail);
        }
        "reset" => {
            commander.dispatch(Intent::Reset).await?;
            render(store, tail);
        }
        "refresh" | "r" => {
            commander.dispatch(Intent::Refresh).await?;
            render(store, tail);
        }
        "help" | "h" | "?" => print_help(),
        "quit" | "exit" | "q" => return Ok(false),
        other => eprintln!("unknown command {other:?}; try \"help\""),
    }
    Ok(true)
}

fn print_help() {
    println!("commands:");
    println!("  show               render grid, drones and logs");
    println!("  toggle <LABEL>     flip an obstacle, e.g. toggle C4");
    println!("  task <P> <D>       assign pickup -> drop, e.g. task A1 G8");
    println!("  reset              reinitialize the simulation");
    println!("  refresh            force a snapshot fetch");
    println!("  quit               leave");
}

fn render(store: &SnapshotStore, tail: usize) {
    let Some(snapshot) = store.get() else {
        println!("waiting for first snapshot...");
        return;
    };

    let view = grid_view(&snapshot);
    let mut header = String::from("    ");
    for col in 0..view.size {
        header.push_str(&format!("{:>3}", col + 1));
    }
    println!("{header}");
    for row in 0..view.size {
        let letter = (b'A' + (row % 26) as u8) as char;
        let mut line = format!("  {letter} ");
        for col in 0..view.size {
            let cell = view.cell(row, col);
            if let Some(id) = cell.drone {
                line.push_str(&format!("{:>3}", format!("d{}", id.rem_euclid(10))));
            } else if cell.obstacle {
                line.push_str(" ##");
            } else {
                line.push_str("  .");
            }
        }
        println!("{line}");
    }

    println!("drones:");
    for drone in &snapshot.drones {
        println!(
            "  #{:<3} {:<10} battery {:>6}  reward {:>6} (step {:>6})",
            drone.id,
            drone.state,
            fmt_metric(drone.battery),
            fmt_metric(drone.reward_total),
            fmt_metric(drone.reward_step),
        );
    }

    println!("logs (newest first):");
    let lines = log_tail(&snapshot, tail);
    if lines.is_empty() {
        println!("  no logs yet");
    }
    for line in lines {
        println!("  {line}");
    }
}
