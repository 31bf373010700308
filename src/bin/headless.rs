use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip_8_vm::emulator::{Machine, Quirks};

/// Run a CHIP-8 program without a frontend, then print the screen.
#[derive(StructOpt)]
struct Opt {
    /// Copy VY into VX before shifting (8XY6/8XYE)
    #[structopt(long)]
    shift_quirk: bool,

    /// Wait for the 64 Hz tick before drawing sprites
    #[structopt(long)]
    vblank_wait: bool,

    /// How many steps to run
    #[structopt(short, long, default_value = "1000")]
    steps: u64,

    /// Steps per second
    #[structopt(long, default_value = "500")]
    hz: u64,

    /// How many of the most recent instructions to print at the end
    #[structopt(short, long, default_value = "0")]
    trace: usize,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut machine = Machine::with_quirks(Quirks {
        shift: opt.shift_quirk,
        vblank_wait: opt.vblank_wait,
    });
    machine.load_rom(&program);

    let delay = Duration::from_micros(1_000_000 / opt.hz.max(1));
    let mut outcome = Ok(());
    for _ in 0..opt.steps {
        outcome = machine.step();
        if outcome.is_err() {
            break;
        }
        std::thread::sleep(delay);
    }

    print!("{}", machine.graphics());
    for entry in machine.trace().iter().take(opt.trace) {
        println!("{}", entry);
    }

    outcome.map_err(Into::into)
}
