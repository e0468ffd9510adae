// RT73 codeplug tool
// Downloads, uploads, compiles and decompiles Retevis RT73 codeplugs, and
// flashes firmware.

use anyhow::{bail, Context};
use rt73_codeplug::codeplug::{assemble, disassemble};
use rt73_codeplug::diagnostics::{Diagnostics, Verbosity};
use rt73_codeplug::error::CodeplugError;
use rt73_codeplug::formats::{
    decompiled_path, load_document, load_ham_contacts, load_ham_groups, load_image, pack_ham_contacts,
    pack_ham_groups, save_document, save_image, ContactRecordSize, HamError,
};
use rt73_codeplug::memmap::MemoryMap;
use rt73_codeplug::serial::{default_device, list_ports, Rt73Protocol, SerialConfig, SerialPort, TransferError};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

const USAGE: &str = "Usage: rt73 <action> <filename> [--device PATH] [--debuglevel 0-4] [--contactbytes 16|128]

Actions:
  download       Download the radio's codeplug into a JSON file
  upload         Compile a JSON file and upload it to the radio
  download_bin   Download the raw codeplug image
  upload_bin     Upload a raw codeplug image
  decompile_bin  Convert a raw image into JSON next to it
  compile        Convert a JSON file into a raw image, offline
  flash_fw       Flash firmware (power on holding P1 until the screen is grey)
  upload_hamcontacts  Upload a RadioID.net CSV export; needs --contactbytes 16 or 128
  upload_hamgroups    Upload a CSV with GROUP_NAME and GROUP_ID columns";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Download,
    Upload,
    DownloadBin,
    UploadBin,
    DecompileBin,
    Compile,
    FlashFirmware,
    UploadHamContacts,
    UploadHamGroups,
}

impl Action {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "download" => Some(Action::Download),
            "upload" => Some(Action::Upload),
            "download_bin" => Some(Action::DownloadBin),
            "upload_bin" => Some(Action::UploadBin),
            "decompile_bin" => Some(Action::DecompileBin),
            "compile" => Some(Action::Compile),
            "flash_fw" => Some(Action::FlashFirmware),
            "upload_hamcontacts" => Some(Action::UploadHamContacts),
            "upload_hamgroups" => Some(Action::UploadHamGroups),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    action: Action,
    filename: PathBuf,
    device: String,
    verbosity: Verbosity,
    contact_bytes: Option<usize>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut device = default_device().to_string();
    let mut verbosity = Verbosity::Quiet;
    let mut contact_bytes = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--device" => {
                device = iter.next().context("--device needs a path")?.clone();
            }
            "--debuglevel" => {
                let level = iter.next().context("--debuglevel needs a number")?;
                let level: u8 = level
                    .parse()
                    .with_context(|| format!("invalid debug level {:?}", level))?;
                if level > 4 {
                    bail!("debug level {} is outside 0-4", level);
                }
                verbosity = Verbosity::from_level(level);
            }
            "--contactbytes" => {
                let bytes = iter.next().context("--contactbytes needs a number")?;
                let bytes = bytes
                    .parse::<usize>()
                    .with_context(|| format!("invalid record size {:?}", bytes))?;
                contact_bytes = Some(bytes);
            }
            _ => positional.push(arg.as_str()),
        }
    }

    let [action, filename] = positional[..] else {
        bail!("expected an action and a filename");
    };
    let action = Action::parse(action).with_context(|| format!("unknown action {:?}", action))?;
    Ok(Args {
        action,
        filename: PathBuf::from(filename),
        device,
        verbosity,
        contact_bytes,
    })
}

fn init_tracing(verbosity: Verbosity) {
    // Transfer progress is logged at info; keep it visible by default
    let default = verbosity.max(Verbosity::Sections).filter_directive();
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();
}

/// Suffix for a failed open naming the ports that do exist
fn port_hint(ports: &[String]) -> String {
    if ports.is_empty() {
        "no serial ports found".to_string()
    } else {
        format!("available ports: {}", ports.join(", "))
    }
}

fn open_radio(device: &str) -> anyhow::Result<Rt73Protocol<SerialPort>> {
    tracing::info!("Opening {}", device);
    let port = SerialPort::open(device, SerialConfig::default()).map_err(|e| {
        let hint = port_hint(&list_ports().unwrap_or_default());
        anyhow::Error::new(e).context(format!("opening {} ({})", device, hint))
    })?;
    let progress = Arc::new(|done: usize, total: usize, message: &str| {
        tracing::info!("[{}/{}] {}", done, total, message);
    });
    Ok(Rt73Protocol::new(port).with_progress(progress))
}

fn report_warnings(diag: &Diagnostics) {
    if diag.has_warnings() {
        tracing::warn!("{} fields could not be read and were reset", diag.warnings().len());
    }
}

fn compiled_path(document_path: &Path) -> PathBuf {
    document_path.with_extension("bin")
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut diag = Diagnostics::new(args.verbosity);
    let file = args.filename.as_path();

    match args.action {
        Action::Download => {
            let image = open_radio(&args.device)?.download().await?;
            let doc = disassemble(&image, &mut diag)?;
            report_warnings(&diag);
            save_document(file, &doc)?;
            tracing::info!("Saved codeplug to {}", file.display());
        }
        Action::Upload => {
            let doc = load_document(file).with_context(|| format!("reading {}", file.display()))?;
            let image = assemble(&doc, &mut diag)?;
            open_radio(&args.device)?.upload(&image).await?;
        }
        Action::DownloadBin => {
            let image = open_radio(&args.device)?.download().await?;
            save_image(file, &MemoryMap::new(image))?;
            tracing::info!("Saved image to {}", file.display());
        }
        Action::UploadBin => {
            let image = load_image(file).with_context(|| format!("reading {}", file.display()))?;
            open_radio(&args.device)?.upload(image.get_packed()).await?;
        }
        Action::DecompileBin => {
            let image = load_image(file).with_context(|| format!("reading {}", file.display()))?;
            let doc = disassemble(image.get_packed(), &mut diag)?;
            report_warnings(&diag);
            let out = decompiled_path(file);
            save_document(&out, &doc)?;
            tracing::info!("Saved codeplug to {}", out.display());
        }
        Action::Compile => {
            let doc = load_document(file).with_context(|| format!("reading {}", file.display()))?;
            let image = assemble(&doc, &mut diag)?;
            let out = compiled_path(file);
            save_image(&out, &MemoryMap::new(image))?;
            tracing::info!("Saved image to {}", out.display());
        }
        Action::FlashFirmware => {
            let firmware = load_image(file).with_context(|| format!("reading {}", file.display()))?;
            open_radio(&args.device)?
                .flash_firmware(firmware.get_packed())
                .await?;
        }
        Action::UploadHamContacts => {
            let size = ContactRecordSize::from_bytes(args.contact_bytes.unwrap_or(0))?;
            let contacts = load_ham_contacts(file).with_context(|| format!("reading {}", file.display()))?;
            let table = pack_ham_contacts(&contacts, size)?;
            open_radio(&args.device)?
                .upload_ham_contacts(table.get_packed(), contacts.len(), size)
                .await?;
        }
        Action::UploadHamGroups => {
            let groups = load_ham_groups(file).with_context(|| format!("reading {}", file.display()))?;
            let table = pack_ham_groups(&groups)?;
            open_radio(&args.device)?
                .upload_ham_groups(table.get_packed(), groups.len())
                .await?;
        }
    }
    Ok(())
}

/// Exit status for a failed run
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<TransferError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<HamError>() {
        return e.exit_code();
    }
    match err.downcast_ref::<CodeplugError>() {
        Some(CodeplugError::CapacityExceeded { .. }) => 3,
        Some(CodeplugError::SizeMismatch { .. }) => 4,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}\n\n{}", e, USAGE);
            std::process::exit(1);
        }
    };
    init_tracing(args.verbosity);

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}
