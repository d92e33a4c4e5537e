// SPDX-License-Identifier: MPL-2.0

//! Interactive light panel: load the roster and drive lights from stdin.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=lightdeck=debug cargo run --example light_panel -- <host> [port]
//! ```
//!
//! # Commands
//!
//! ```text
//! list                 show every device
//! on <n> / off <n>     switch device n
//! toggle <n>           flip device n
//! dim <n> <0-100>      set brightness
//! rgb <n> <#RRGGBB>    set RGB color
//! tone <n> <0-100>     set white tone
//! refresh              refresh every device
//! reload               reload the roster
//! quit
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use lightdeck::{
    Brightness, ColorTone, DeviceListController, DeviceView, EventBus, HttpClient, HttpConfig,
    RenderEvent, RgbColor, RosterView,
};
use tracing_subscriber::EnvFilter;

fn describe(view: &DeviceView) -> String {
    let state = match view.status {
        None => "unknown".to_string(),
        Some(s) if !s.is_online => "offline".to_string(),
        Some(s) => format!(
            "{} {} {}",
            if s.is_on { "on" } else { "off" },
            s.brightness,
            view.preview.map(|c| c.to_hex_with_hash()).unwrap_or_default()
        ),
    };
    let loading = if view.loading { " ..." } else { "" };
    match &view.error {
        Some(error) => format!("{:<20} {state}{loading}  [{error}]", view.name),
        None => format!("{:<20} {state}{loading}", view.name),
    }
}

fn print_list(list: &DeviceListController<HttpClient>) {
    if let Some(error) = list.error() {
        println!("roster unavailable: {error}");
        return;
    }
    for (index, device) in list.devices().iter().enumerate() {
        println!("{index:>3}  {}", describe(&device.view()));
    }
}

async fn read_line() -> Option<String> {
    tokio::task::spawn_blocking(|| {
        print!("> ");
        let _ = io::stdout().flush();
        io::stdin().lock().lines().next().and_then(Result::ok)
    })
    .await
    .ok()
    .flatten()
}

async fn run(
    list: &mut DeviceListController<HttpClient>,
    words: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let device = |index: &str| -> Result<_, Box<dyn std::error::Error>> {
        let index: usize = index.parse()?;
        list.devices()
            .get(index)
            .ok_or_else(|| format!("no device {index}").into())
    };

    match words {
        ["list"] => print_list(list),
        ["on", n] => println!("{:?}", device(n)?.set_power(true).await?),
        ["off", n] => println!("{:?}", device(n)?.set_power(false).await?),
        ["toggle", n] => println!("{:?}", device(n)?.toggle_power().await?),
        ["dim", n, value] => {
            let brightness = Brightness::new(value.parse()?)?;
            println!("{:?}", device(n)?.set_brightness(brightness).await?);
        }
        ["rgb", n, hex] => {
            let color: RgbColor = hex.parse()?;
            println!("{:?}", device(n)?.set_color_rgb(color).await?);
        }
        ["tone", n, value] => {
            let tone = ColorTone::new(value.parse()?)?;
            println!("{:?}", device(n)?.set_color_tone(tone).await?);
        }
        ["refresh"] => list.refresh_all(),
        ["reload"] => {
            let count = list.load().await?;
            println!("{count} devices");
        }
        _ => println!("unknown command"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <host> [port]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example light_panel -- 192.168.1.20 8080");
        std::process::exit(1);
    }

    let mut config = HttpConfig::new(&args[1]);
    if let Some(port) = args.get(2) {
        config = config.with_port(port.parse()?);
    }
    let api = Arc::new(config.into_client()?);

    let bus = EventBus::new();
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RenderEvent::Roster(RosterView::Loading) => println!("loading roster..."),
                RenderEvent::Roster(RosterView::Failed(error)) => println!("roster failed: {error}"),
                RenderEvent::Roster(RosterView::Loaded(_)) => {}
                RenderEvent::Device(view) => println!("     {}", describe(&view)),
            }
        }
    });

    let mut list = DeviceListController::new(api, Arc::new(bus));
    if let Ok(count) = list.load().await {
        println!("{count} devices");
    }
    print_list(&list);

    while let Some(line) = read_line().await {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if words == ["quit"] {
            break;
        }
        if let Err(e) = run(&mut list, &words).await {
            println!("error: {e}");
        }
    }

    Ok(())
}
