use anyhow::Context;
use herald_bus::{EventBus, EventData, Listener, Notifier};
use herald_core::{init_logging, HeraldConfig};
use std::path::PathBuf;

fn load_config() -> anyhow::Result<HeraldConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => HeraldConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(HeraldConfig::default()),
    }
}

fn printer_listener() -> Listener<String> {
    Listener::new(|event: &EventData<String>| {
        match serde_json::to_string(event) {
            Ok(json) => println!("PRINTER LISTENER : {json}"),
            Err(e) => tracing::warn!(error = %e, "failed to encode event"),
        }
    })
}

fn main() -> anyhow::Result<()> {
    let cfg = load_config()?;
    init_logging(&cfg.logging);

    let bus: EventBus<String> = EventBus::new();
    let printer = Notifier::from_config(bus, &cfg.notifier)?;

    let subscription = printer.on_update(printer_listener());
    tracing::info!(events = ?subscription.events(), "listener attached");

    printer.print("Hello World 1".to_string())?;
    printer.print("Hello World 2".to_string())?;
    printer.print_error("Error 1".to_string())?;

    subscription.dispose();
    tracing::info!("listener detached");

    printer.print("Hello World 3".to_string())?;
    printer.print_error("Error 2".to_string())?;

    Ok(())
}
