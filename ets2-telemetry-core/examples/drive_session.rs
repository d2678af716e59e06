//! Standalone session simulator
//!
//! Feeds a short scripted session (truck and trailer configuration, a job,
//! some driving, a delivery) through the telemetry engine and prints the
//! resulting document as a dashboard would receive it.
//!
//! Usage:
//!   drive_session [eut2|ats] [--pretty]

use ets2_telemetry_core::registry::ids::{attribute as a, channel, config, gameplay, shifter_type};
use ets2_telemetry_core::{Attribute, EventKind, HostInfo, Telemetry, TelemetryConfig, Value};
use std::env;

fn configure(telemetry: &mut Telemetry) {
    telemetry.event(
        EventKind::Configuration,
        config::CONTROLS,
        &[Attribute::new(a::SHIFTER_TYPE, shifter_type::ARCADE)],
    );

    let mut truck = vec![
        Attribute::new(a::BRAND, "Scania"),
        Attribute::new(a::NAME, "R"),
        Attribute::new(a::FORWARD_GEAR_COUNT, 12i64),
        Attribute::new(a::REVERSE_GEAR_COUNT, 2i64),
        Attribute::new(a::DIFFERENTIAL_RATIO, 2.71),
        Attribute::new(a::WHEEL_COUNT, 6i64),
    ];
    let ratios = [11.32, 9.16, 7.19, 5.82, 4.57, 3.70, 2.93, 2.38, 1.86, 1.50, 1.17, 0.95];
    truck.extend(ratios.iter().enumerate().map(|(i, r)| Attribute::indexed(a::FORWARD_RATIO, i, *r)));
    truck.push(Attribute::indexed(a::REVERSE_RATIO, 0, -11.0));
    truck.push(Attribute::indexed(a::REVERSE_RATIO, 1, -8.0));
    for wheel in 0..6 {
        truck.push(Attribute::indexed(a::WHEEL_RADIUS, wheel, 0.51));
        truck.push(Attribute::indexed(a::WHEEL_POWERED, wheel, wheel >= 4));
    }
    telemetry.event(EventKind::Configuration, config::TRUCK, &truck);

    telemetry.event(
        EventKind::Configuration,
        "trailer.0",
        &[
            Attribute::new(a::ID, "scs.box.curtain"),
            Attribute::new(a::BRAND, "Schmitz"),
            Attribute::new(a::BODY_TYPE, "curtainside"),
        ],
    );
    telemetry.event(
        EventKind::Configuration,
        config::JOB,
        &[
            Attribute::new(a::CARGO, "Apples"),
            Attribute::new(a::CARGO_MASS, 18000.0),
            Attribute::new(a::DESTINATION_CITY, "Berlin"),
            Attribute::new(a::SOURCE_CITY, "Praha"),
            Attribute::new(a::INCOME, 8200i64),
            Attribute::new(a::DELIVERY_TIME, 1300i64),
        ],
    );
}

fn drive(telemetry: &mut Telemetry) {
    telemetry.event(EventKind::Started, "", &[]);
    telemetry.channel_update("trailer.0.connected", None, Value::Bool(true));

    for minute in 0..30i64 {
        let speed = (minute as f64).min(22.0);
        telemetry.channel_update(channel::GAME_TIME, None, Value::Integer(600 + minute));
        telemetry.channel_update(channel::TRUCK_SPEED, None, Value::Float(speed));
        telemetry.channel_update(channel::TRUCK_ENGINE_RPM, None, Value::Float(1200.0 + speed * 20.0));
        telemetry.channel_update(channel::TRUCK_DISPLAYED_GEAR, None, Value::Integer((minute / 3).min(12)));
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let pretty = args.iter().any(|a| a == "--pretty");
    let game_id = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "eut2".to_string());

    let host = HostInfo::new(game_id, "Simulated Session 1.49");
    let mut telemetry = match Telemetry::init(&host, TelemetryConfig::default(), None) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    configure(&mut telemetry);
    drive(&mut telemetry);

    let before_delivery = telemetry.snapshot();
    telemetry.event(
        EventKind::Gameplay,
        gameplay::JOB_DELIVERED,
        &[Attribute::new(a::REVENUE, 8200.0), Attribute::new(a::EARNED_XP, 410i64)],
    );

    println!("=== BEFORE DELIVERY ===");
    println!(
        "Speed {} km/h, gear {} (best {}), remaining {}",
        before_delivery.truck.speed,
        before_delivery.shifter.displayed_gear_name,
        before_delivery.shifter.best_gear_name,
        before_delivery.job.remaining_time
    );

    println!("\n=== DOCUMENT ===");
    let doc = telemetry.snapshot();
    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }

    if let Err(e) = telemetry.shutdown() {
        eprintln!("Error: {}", e);
    }
}
