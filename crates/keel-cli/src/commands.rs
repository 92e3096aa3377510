use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use keel_crypto::{compute_crypto_hash, decode_from_b64, encode_to_b64};
use keel_store::{DiskConfig, DiskStore};
use keel_types::{create_utc_timestamp, generate_uuid};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DiskConfig::load(path)?,
        None => DiskConfig::default(),
    };
    let store = DiskStore::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command {
        Command::Hash(args) => {
            let data = read_input(&store, args.file.as_deref())?;
            cmd_hash(&mut out, &data, args.hex, format)
        }
        Command::Uuid(args) => cmd_uuid(&mut out, args.count, format),
        Command::Timestamp => cmd_timestamp(&mut out, format),
        Command::B64(args) => {
            let data = read_input(&store, args.file.as_deref())?;
            cmd_b64(&mut out, &data, args.decode)
        }
        Command::Save(args) => {
            let data = read_input(&store, None)?;
            store.save(&args.file, &data)?;
            cmd_saved(&mut out, &args.file, data.len(), format)
        }
        Command::Cat(args) => {
            let data = store.load(&args.file)?;
            out.write_all(&data)?;
            Ok(())
        }
    }
}

fn read_input(store: &DiskStore, file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => Ok(store.load(path)?),
        None => {
            let mut data = Vec::new();
            io::stdin()
                .read_to_end(&mut data)
                .context("unable to read stdin")?;
            Ok(data)
        }
    }
}

fn cmd_hash(out: &mut dyn Write, data: &[u8], hex: bool, format: OutputFormat) -> anyhow::Result<()> {
    let digest = compute_crypto_hash(data);
    let rendered = if hex {
        digest.to_hex()
    } else {
        encode_to_b64(digest.as_bytes())
    };
    match format {
        OutputFormat::Text => writeln!(out, "{rendered}")?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "algorithm": "shake256-512", "digest": rendered, "input_len": data.len() })
        )?,
    }
    Ok(())
}

fn cmd_uuid(out: &mut dyn Write, count: usize, format: OutputFormat) -> anyhow::Result<()> {
    let ids = (0..count)
        .map(|_| generate_uuid().map(|id| id.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    match format {
        OutputFormat::Text => {
            for id in &ids {
                writeln!(out, "{id}")?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&ids)?)?,
    }
    Ok(())
}

fn cmd_timestamp(out: &mut dyn Write, format: OutputFormat) -> anyhow::Result<()> {
    let ts = create_utc_timestamp();
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", ts.to_rfc3339().bold())?;
            writeln!(out, "  seconds: {}", ts.seconds())?;
            writeln!(out, "  nanos:   {}", ts.nanos())?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&ts)?)?,
    }
    Ok(())
}

fn cmd_b64(out: &mut dyn Write, data: &[u8], decode: bool) -> anyhow::Result<()> {
    if decode {
        let text = std::str::from_utf8(data).context("base64 input is not UTF-8")?;
        out.write_all(&decode_from_b64(text.trim())?)?;
    } else {
        writeln!(out, "{}", encode_to_b64(data))?;
    }
    Ok(())
}

fn cmd_saved(out: &mut dyn Write, path: &Path, len: usize, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "{} Wrote {} bytes to {}",
            "✓".green().bold(),
            len,
            path.display().to_string().bold()
        )?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "path": path.display().to_string(), "bytes": len })
        )?,
    }
    Ok(())
}
