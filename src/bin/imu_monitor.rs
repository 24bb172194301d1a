//! Poll a WT61PC and print the latest measurements to stdout.

use std::thread;
use std::time::Duration;

use clap::Parser;

use wt61pc::Wt61Pc;

#[derive(Parser)]
#[command(about = "Stream WT61PC IMU measurements to stdout")]
struct Args {
    /// Serial port path (e.g. /dev/ttyUSB0 or COM6)
    port: String,

    /// Output frequency index to command before streaming (0-11)
    #[arg(long)]
    frequency: Option<u8>,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 10)]
    interval_ms: u64,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut imu = Wt61Pc::open(&args.port);

    if let Some(index) = args.frequency {
        if let Err(e) = imu.set_frequency(index) {
            eprintln!("failed to set frequency: {e}");
            std::process::exit(1);
        }
    }

    loop {
        if imu.available() {
            let a = imu.accel();
            let g = imu.gyro();
            let r = imu.angle();
            println!(
                "accel [{:8.3} {:8.3} {:8.3}] m/s²   gyro [{:8.3} {:8.3} {:8.3}] °/s   angle [{:8.3} {:8.3} {:8.3}] °",
                a.x, a.y, a.z, g.x, g.y, g.z, r.x, r.y, r.z
            );
        }
        thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
