use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gubuk_trainer::data::flatten::{self, FlattenConfig};
use gubuk_trainer::data::merge;
use gubuk_trainer::quiz::runner::{self, PlayOptions};
use gubuk_trainer::{names, server};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the character-guessing quiz in the terminal.
    Play {
        /// Dataset document: a file path or a URL.
        #[arg(long, env = "GUBUK_DATA", default_value = "public/data/characters-en.json")]
        data: String,

        /// Draw 10 random questions from the 20-question pool each round,
        /// instead of the fixed question set.
        #[arg(long)]
        random: bool,

        /// UI language.
        #[arg(long, env = "GUBUK_LOCALE", default_value = names::DEFAULT_LOCALE)]
        locale: String,

        /// Fix the RNG seed for a reproducible round.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Flatten per-character JSON files into the two quiz datasets.
    Generate {
        /// Directory of per-character JSON files.
        #[arg(long, env = "GUBUK_DATA_DIR", default_value = "data/extracted/with_release_en_without_version")]
        data_dir: PathBuf,

        /// Directory of character portraits.
        #[arg(long, default_value = "public/images/character_hd")]
        image_dir: PathBuf,

        /// Where the dataset documents are written.
        #[arg(long, default_value = "public/data")]
        out_dir: PathBuf,

        /// Prefix for generated image URLs (for deployments under a subpath).
        #[arg(long, default_value = "")]
        base_url: String,
    },

    /// Merge translated character files into the primary data tree, in place.
    Merge {
        /// Directory of translated per-character JSON files.
        #[arg(long, default_value = "data/extracted/id_translated")]
        translated_dir: PathBuf,

        /// Primary data tree, updated in place.
        #[arg(long, default_value = "data/extracted/with_release_en_without_version")]
        target_dir: PathBuf,
    },

    /// Serve the datasets over HTTP.
    Serve {
        /// The address to bind to.
        #[arg(short, long, env, default_value = "127.0.0.1:1414")]
        address: String,

        #[arg(long, env = "GUBUK_DATA_DIR", default_value = "data/extracted/with_release_en_without_version")]
        data_dir: PathBuf,

        #[arg(long, default_value = "public/images/character_hd")]
        image_dir: PathBuf,

        /// Directory served under /data.
        #[arg(long, default_value = "public/data")]
        out_dir: PathBuf,

        #[arg(long, default_value = "")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "gubuk_trainer=info,warp=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Play {
            data,
            random,
            locale,
            seed,
        } => {
            runner::play(PlayOptions {
                data,
                random,
                locale,
                seed,
            })
            .await?;
        }
        Command::Generate {
            data_dir,
            image_dir,
            out_dir,
            base_url,
        } => {
            let presets: [(&'static [&'static str], &str); 2] = [
                (flatten::STANDARD_FIELDS, names::STANDARD_DATASET_FILE),
                (flatten::RANDOM_POOL_FIELDS, names::RANDOM_DATASET_FILE),
            ];
            for (fields, file_name) in presets {
                let config = FlattenConfig {
                    data_dir: data_dir.clone(),
                    image_dir: image_dir.clone(),
                    base_url: base_url.clone(),
                    fields,
                };
                flatten::generate_quiz_data(&config, &out_dir.join(file_name)).await?;
            }
        }
        Command::Merge {
            translated_dir,
            target_dir,
        } => {
            merge::merge_translations(&translated_dir, &target_dir).await?;
        }
        Command::Serve {
            address,
            data_dir,
            image_dir,
            out_dir,
            base_url,
        } => {
            let address = address.parse::<std::net::SocketAddr>()?;
            let config = server::ServerConfig {
                data_dir,
                image_dir,
                output_dir: out_dir,
                base_url,
            };
            server::run(config, address).await?;
        }
    }

    Ok(())
}
