use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use english_review::speech::{
    pcm_to_samples, write_wav, GeminiSpeech, SpeechProvider, SpeechRequest, DEFAULT_VOICE,
    SAMPLE_RATE,
};
use english_review::{load_content_from_json, Quiz};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with the listening passages and question bank
    #[arg(short, long, default_value = "content/grade8_review.json")]
    content: PathBuf,

    /// File that receives log output (the terminal belongs to the quiz)
    #[arg(long, default_value = "english-review.log")]
    log_file: PathBuf,

    /// Seed for reproducible question and choice order
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take the quiz (default)
    Run,
    /// Synthesize a listening passage to a WAV file
    Speak {
        /// Passage number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        passage: usize,

        /// Output WAV file
        #[arg(short, long, default_value = "passage.wav")]
        out: PathBuf,

        /// Voice for single-speaker passages
        #[arg(long, default_value = DEFAULT_VOICE)]
        voice: String,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn init_logging(path: &Path, verbose: bool) -> std::io::Result<()> {
    let file = File::create(path)?;
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn speak(
    content_path: &Path,
    passage: usize,
    out: &Path,
    voice: &str,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_content_from_json(content_path)?;
    let session = passage
        .checked_sub(1)
        .and_then(|index| content.listening.get(index))
        .ok_or_else(|| {
            format!(
                "passage {} does not exist ({} available)",
                passage,
                content.listening.len()
            )
        })?;
    let request = SpeechRequest::for_passage(session, voice)
        .ok_or_else(|| format!("passage {} has no listening script", passage))?;

    let provider = GeminiSpeech::new(api_key, base_url)?;
    let samples = pcm_to_samples(&provider.synthesize(&request)?);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_wav(BufWriter::new(File::create(out)?), &samples, SAMPLE_RATE)?;

    let seconds = samples.len() as f64 / f64::from(SAMPLE_RATE);
    info!("wrote {:.1}s of audio to {}", seconds, out.display());
    println!("Wrote {} ({:.1}s)", out.display(), seconds);
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file, args.verbose) {
        eprintln!("Cannot open log file {}: {}", args.log_file.display(), e);
        std::process::exit(1);
    }

    let command = args.command.unwrap_or(Command::Run);
    let result: Result<(), Box<dyn std::error::Error>> = match command {
        Command::Run => Quiz::from_json(&args.content, args.seed)
            .and_then(|quiz| quiz.run())
            .map_err(Into::into),
        Command::Speak {
            passage,
            out,
            voice,
            api_key,
            base_url,
        } => speak(&args.content, passage, &out, &voice, api_key, base_url),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
