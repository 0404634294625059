use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use bpaf::Bpaf;
use log::{debug, warn};
use loader64::backend::carts::{CartType, CicType, SaveType};
use loader64::backend::device::Device;
use loader64::backend::ftdi::FtdiDevice;
use loader64::debug::{DebugFile, DebugOutput};
use loader64::filename::{file_modified, milliseconds, LocalClock};
use loader64::progress;
use loader64::session::Session;
use loader64::term::{Color, Console, StdConsole};

const CHUNK_SIZE: usize = 0x10000;

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
struct Args {
    /// Flashcart to use, by name or number (1: 64Drive HW1, 2: 64Drive HW2, 3: EverDrive, 4: SC64)
    #[bpaf(short('c'), long)]
    cart: Option<String>,

    /// CIC to boot with, by name or number (0: 6101 .. 7: 5101). Detected from the ROM if omitted
    #[bpaf(long)]
    cic: Option<String>,

    /// Save type, by name or number (1: EEPROM 4Kbit .. 6: FlashRAM 1Mbit (PokeStdm2))
    #[bpaf(short('s'), long)]
    save: Option<String>,

    /// Serial number of the device to open
    #[bpaf(short('d'), long)]
    device: Option<String>,

    /// ROM to inspect
    #[bpaf(short('r'), long)]
    rom: Option<String>,

    /// Write received debug data to a generated file
    #[bpaf(long("debug-out"))]
    debug_out: bool,

    /// Prefix for generated output filenames
    #[bpaf(long("output-dir"))]
    output_dir: Option<String>,

    /// Render on the alternate screen
    #[bpaf(short('f'), long)]
    fullscreen: bool,

    /// Verbose logging
    #[bpaf(short('v'), long)]
    verbose: bool,
}

fn main() {
    let args = args().run();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let console: Box<dyn Console> = if args.fullscreen {
        match StdConsole::fullscreen() {
            Ok(console) => Box::new(console),
            Err(err) => {
                warn!("Full-screen mode unavailable: {err}");
                Box::new(StdConsole::plain())
            }
        }
    } else {
        Box::new(StdConsole::plain())
    };

    let mut session = Session::new(
        console,
        Box::new(FtdiDevice::new(args.device.clone())),
        Box::new(DebugFile::new(args.output_dir.clone())),
        Box::new(LocalClock),
    );

    if let Some(text) = &args.cart {
        let cart = session.parse::<CartType>(text);
        session.device().request_cart(cart);
    }
    let mut cic = args.cic.as_deref().map(|text| session.parse::<CicType>(text));
    let save = args.save.as_deref().map(|text| session.parse::<SaveType>(text));

    if let Some(path) = &args.rom {
        let start = milliseconds();
        let data = match read_rom(session.console(), Path::new(path)) {
            Ok(data) => data,
            Err(err) => session.terminate(Some(&format!("Unable to read ROM '{path}': {err}"))),
        };
        debug!("Read {} bytes in {} ms", data.len(), milliseconds().saturating_sub(start));

        if let Ok(modified) = file_modified(path) {
            debug!("ROM last modified {modified:?}");
        }

        if cic.is_none() {
            cic = CicType::from_rom(&data);
            if let Some(detected) = cic {
                session.console().log(Color::Info, &format!("CIC set to {detected} automatically."));
            }
        }
    }

    if args.debug_out {
        let name = match session.generate_filename("binaryout", "bin") {
            Ok(name) => name,
            Err(_) => session.terminate(Some("Unable to allocate memory for the debug output filename.")),
        };
        if let Err(err) = session.debug_output().open(Path::new(&name)) {
            session.terminate(Some(&format!("Unable to create debug output '{name}': {err}")));
        }
        session.console().log(Color::Info, &format!("Debug output will be written to '{name}'."));
    }

    if let Err(err) = session.device().open() {
        session.handle_error(err);
    }

    let cart = session.device().requested_cart().map_or("autodetected".to_string(), |cart| cart.to_string());
    session.console().log(Color::Program, &format!("Flashcart: {cart}"));
    if let Some(cic) = cic {
        session.console().log(Color::Program, &format!("CIC: {cic}"));
    }
    if let Some(save) = save {
        session.console().log(Color::Program, &format!("Save type: {save}"));
    }

    if let Err(err) = session.device().close() {
        session.handle_error(err);
    }
    if let Err(err) = session.debug_output().close() {
        warn!("Failed to close debug output: {err}");
    }
    session.console().end();
}

fn read_rom(console: &mut dyn Console, path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len() as usize;

    let mut data = Vec::with_capacity(size);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..read]);

        progress::draw(console, "Reading ROM", Color::Program, data.len() as f32 / size.max(1) as f32);
    }

    Ok(data)
}
