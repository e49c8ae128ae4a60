use bnk::{export_media, BankCodec, FormatVersion, PropertyEmission, SoundBank};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "bnk", about = "Wwise SoundBank (.bnk) codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more banks to JSON
    Decode {
        /// Schema revision declared by the banks (BKHD mismatch is fatal)
        #[arg(short = 'v', long)]
        format_version: u32,
        /// Output JSON path (single input only; default: <input>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also export embedded media as <id>.wem into this directory
        #[arg(short, long)]
        media: Option<PathBuf>,
        #[arg(required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },
    /// Encode a JSON dump back into a bank
    Encode {
        #[arg(short = 'v', long)]
        format_version: u32,
        /// Emit every bound property, not only non-default ones
        #[arg(long)]
        emit_defaults: bool,
        #[arg(short, long)]
        output: PathBuf,
        input: PathBuf,
    },
    /// Show a chunk/object summary
    Info {
        #[arg(short = 'v', long)]
        format_version: u32,
        input: PathBuf,
    },
    /// Export embedded media only
    Extract {
        #[arg(short = 'v', long)]
        format_version: u32,
        #[arg(short = 'C', long, default_value = ".")]
        output_dir: PathBuf,
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();
    match Cli::parse().command {
        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode {
            format_version,
            output,
            media,
            input,
        } => {
            let codec = BankCodec::new(FormatVersion::new(format_version)?);
            if output.is_some() && input.len() > 1 {
                return Err("--output requires a single input".into());
            }
            #[cfg(feature = "parallel")]
            let results: Vec<_> = input
                .par_iter()
                .map(|path| decode_one(path, codec, media.as_deref(), output.as_deref()))
                .collect();
            #[cfg(not(feature = "parallel"))]
            let results: Vec<_> = input
                .iter()
                .map(|path| decode_one(path, codec, media.as_deref(), output.as_deref()))
                .collect();
            for result in results {
                result?;
            }
        }

        // ── Encode ───────────────────────────────────────────────────────────
        Commands::Encode {
            format_version,
            emit_defaults,
            output,
            input,
        } => {
            let emission = if emit_defaults {
                PropertyEmission::Always
            } else {
                PropertyEmission::NonDefault
            };
            let codec = BankCodec::new(FormatVersion::new(format_version)?).with_emission(emission);
            let bank: SoundBank = serde_json::from_slice(&std::fs::read(&input)?)?;
            let bytes = codec.encode(&bank)?;
            std::fs::write(&output, bytes)?;
            println!("Encoded: {}", output.display());
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info {
            format_version,
            input,
        } => {
            let codec = BankCodec::new(FormatVersion::new(format_version)?);
            let bank = codec.decode(&std::fs::read(&input)?)?;
            println!("── SoundBank ───────────────────────────────────────────");
            println!("  Path            {}", input.display());
            println!("  Format version  {}", codec.version());
            println!("  Bank id         {}", hex_id(bank.header.id));
            println!("  Language        {}", hex_id(bank.header.language));
            if !bank.header.expand.is_empty() {
                println!("  Header expand   {} B", bank.header.expand.len());
            }
            if let Some(media) = &bank.media {
                let bytes: usize = media.iter().map(|entry| entry.data.len()).sum();
                println!("  Media           {} entries ({} B)", media.len(), bytes);
            }
            if let Some(setting) = &bank.setting {
                if let Some(plug_in) = &setting.plug_in {
                    println!("  Plug-ins        {}", plug_in.len());
                }
                if let Some(platform) = &setting.platform {
                    println!("  Platform        {platform}");
                }
            }
            if let Some(synchronization) = &bank.game_synchronization {
                println!(
                    "  Game sync       {} state group(s), {} switch group(s), {} parameter(s)",
                    synchronization.state_group.len(),
                    synchronization.switch_group.len(),
                    synchronization.game_parameter.len()
                );
            }
            if let Some(hierarchy) = &bank.hierarchy {
                println!("  Hierarchy       {} object(s)", hierarchy.len());
            }
            if let Some(reference) = &bank.reference {
                for item in reference {
                    println!("  Reference       {} ({})", item.name, hex_id(item.id));
                }
            }
        }

        // ── Extract ──────────────────────────────────────────────────────────
        Commands::Extract {
            format_version,
            output_dir,
            input,
        } => {
            let codec = BankCodec::new(FormatVersion::new(format_version)?);
            let bank = codec.decode(&std::fs::read(&input)?)?;
            let written = export_media(&bank, &output_dir)?;
            println!("Extracted {} media file(s) to {}", written, output_dir.display());
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn decode_one(
    path: &Path,
    codec: BankCodec,
    media: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let bank = codec.decode(&std::fs::read(path)?)?;
    if let Some(directory) = media {
        export_media(&bank, directory)?;
    }
    let json = serde_json::to_string_pretty(&bank)?;
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => path.with_extension("json"),
    };
    std::fs::write(&target, json)?;
    println!("  decoded {} → {}", path.display(), target.display());
    Ok(())
}

fn hex_id(id: bnk::Id) -> String {
    format!("0x{}", hex::encode(id.0.to_be_bytes()))
}
