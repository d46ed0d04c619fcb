use clap::{Parser, Subcommand, ValueEnum};
use qr_encode::tools::{QUIET_ZONE, save_png, to_svg_string, to_text};
use qr_encode::{ECLevel, EncodeOptions, MaskPattern, Symbol, encode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrgen", version, about = "QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Svg,
    Text,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and write it as PNG, SVG or text
    Encode {
        /// Text to encode
        payload: String,
        /// Minimum error correction level (L, M, Q, H)
        #[arg(long, default_value = "M")]
        level: ECLevel,
        /// Force a version (1-40)
        #[arg(long)]
        version: Option<u8>,
        /// Force a mask pattern (0-7)
        #[arg(long)]
        mask: Option<MaskPattern>,
        /// Raise the level while the chosen version still fits
        #[arg(long)]
        boost: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Output file; text goes to stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
        /// Pixels per module for PNG output
        #[arg(long, default_value_t = 8)]
        scale: u32,
    },
    /// Print version, level, mask and timing for a payload
    Inspect {
        payload: String,
        #[arg(long, default_value = "M")]
        level: ECLevel,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            payload,
            level,
            version,
            mask,
            boost,
            format,
            output,
            scale,
        } => {
            let mut options = EncodeOptions::new().ec_level(level).boost_error_correction(boost);
            if let Some(v) = version {
                options = options.version(v);
            }
            if let Some(m) = mask {
                options = options.mask(m);
            }
            encode_cmd(&payload, &options, format, output.as_deref(), scale)
        }
        Command::Inspect { payload, level } => inspect_cmd(&payload, level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    payload: &str,
    options: &EncodeOptions,
    format: Format,
    output: Option<&Path>,
    scale: u32,
) -> Result<(), String> {
    let symbol = encode(payload, options).map_err(|e| e.to_string())?;
    match (format, output) {
        (Format::Png, Some(path)) => save_png(&symbol, path, scale).map_err(|e| e.to_string()),
        (Format::Png, None) => Err("PNG output needs --output".to_string()),
        (Format::Svg, out) => write_or_print(&to_svg_string(&symbol, QUIET_ZONE), out),
        (Format::Text, out) => write_or_print(&to_text(&symbol, QUIET_ZONE), out),
    }
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|e| format!("{}: {e}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

fn inspect_cmd(payload: &str, level: ECLevel) -> Result<(), String> {
    let start = Instant::now();
    let symbol: Symbol =
        encode(payload, &EncodeOptions::new().ec_level(level)).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();
    println!("Payload: {} bytes", payload.len());
    println!(
        "  version={}, size={}x{}, error_correction={}, mask={}",
        symbol.version(),
        symbol.module_count(),
        symbol.module_count(),
        symbol.error_correction_level(),
        symbol.mask_pattern().bits()
    );
    println!(
        "  dark modules: {} / {}",
        symbol.modules().count_ones(),
        symbol.module_count() * symbol.module_count()
    );
    println!("  encode time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}
