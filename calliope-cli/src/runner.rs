//! Wires CLI arguments to the speaker and runs the playback session.

use std::error::Error;
use std::thread;
use std::time::Duration;

use clap::ArgMatches;
use log::info;

use calliope_lib::generators::TriangleWave;
use calliope_lib::{PlaybackSettings, SampleRate, Speaker, Streamer};

pub fn run(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let settings = resolve_settings(args)?;
    let rate = SampleRate::new(settings.sample_rate)?;

    let frequencies = args
        .get_many::<String>("frequency")
        .expect("frequency is required")
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| format!("invalid frequency: {raw}"))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    let duration = parse_duration(
        args.get_one::<String>("duration")
            .expect("duration has a default"),
    )?;

    let mut tones: Vec<Box<dyn Streamer>> = Vec::with_capacity(frequencies.len());
    for frequency in &frequencies {
        tones.push(Box::new(TriangleWave::new(rate, *frequency)?));
    }

    let mut speaker = Speaker::from_settings(&settings)?;
    speaker.play(tones);
    info!(
        "playing {} tone(s) at {} Hz for {duration} s",
        frequencies.len(),
        u32::from(speaker.sample_rate())
    );

    thread::sleep(Duration::from_secs_f64(duration));
    speaker.close();

    Ok(0)
}

/// Durations feed `Duration::from_secs_f64`, which panics on non-finite or
/// negative input, so those are rejected here.
fn parse_duration(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(format!("invalid duration: {raw}")),
    }
}


/// Settings file first, then explicit flags on top.
fn resolve_settings(args: &ArgMatches) -> Result<PlaybackSettings, Box<dyn Error>> {
    let mut settings = match args.get_one::<String>("settings") {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        None => PlaybackSettings::default(),
    };

    if let Some(raw) = args.get_one::<String>("sample-rate") {
        settings.sample_rate = raw
            .parse()
            .map_err(|_| format!("invalid sample rate: {raw}"))?;
    }
    if let Some(raw) = args.get_one::<String>("buffer-size") {
        settings.buffer_size = raw
            .parse()
            .map_err(|_| format!("invalid buffer size: {raw}"))?;
    }

    Ok(settings)
}
