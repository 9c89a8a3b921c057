//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::core::client::Translator;
use crate::core::config::TranslatorConfig;
use crate::core::glossary::Glossary;
use crate::processors::batch::BatchScanner;
use crate::processors::json::JsonProcessor;
use crate::processors::text::TextProcessor;

/// Commands for doctran
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate every eligible file under a documentation tree
    Run {
        /// Root directory to scan
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Target language (default: zh)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Glossary file (default: glossary.json)
        #[arg(short, long)]
        glossary: Option<PathBuf>,
    },

    /// Translate a single text or Markdown file
    File {
        /// Input file (required)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file (defaults to the batch target-path policy)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language (default: zh)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Glossary file (default: glossary.json)
        #[arg(short, long)]
        glossary: Option<PathBuf>,
    },

    /// Translate the description fields of a single JSON file
    Json {
        /// Input file (required)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file (defaults to the batch target-path policy)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language (default: zh)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Glossary file (default: glossary.json)
        #[arg(short, long)]
        glossary: Option<PathBuf>,
    },
}

/// Shared setup: config from env with CLI overrides, glossary, gateway
fn build_pipeline(
    target_lang: Option<String>,
    glossary: Option<PathBuf>,
) -> anyhow::Result<(TranslatorConfig, Glossary, Translator)> {
    let mut config = TranslatorConfig::from_env()?;
    if let Some(lang) = target_lang {
        config.target_language = lang;
    }
    config.validate()?;

    let glossary_path = glossary.unwrap_or_else(|| PathBuf::from(&config.glossary_path));
    let glossary = Glossary::load(&glossary_path);

    let translator = Translator::http(config.clone())?;
    Ok((config, glossary, translator))
}

/// Handle batch translation of a documentation tree
pub async fn handle_run(
    root: PathBuf,
    target_lang: Option<String>,
    glossary: Option<PathBuf>,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::info;

    let start_time = Instant::now();

    let (config, glossary, translator) = build_pipeline(target_lang, glossary)?;

    info!("Starting batch translation");
    info!("Root: {}", root.display());
    info!("Target language: {}", config.target_language);
    info!("Glossary entries: {}", glossary.len());

    let text = TextProcessor::new(translator.clone(), glossary.clone());
    let json = JsonProcessor::new(TextProcessor::new(translator.clone(), glossary));
    let scanner = BatchScanner::new(config);

    let files = scanner.find_files(&root)?;
    if files.is_empty() {
        anyhow::bail!("No translatable files found");
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap()
        .progress_chars("=>-"));

    let mut translated = 0;
    let mut skipped = 0;
    let mut failed = 0;
    let total = files.len();

    for (i, path) in files.iter().enumerate() {
        let target = scanner.target_path(path);

        if !scanner.needs_translation(path, &target) {
            skipped += 1;
            pb.inc(1);
            continue;
        }

        pb.set_message(format!("Processing: {}", path.display()));

        let is_json = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase() == "json")
            .unwrap_or(false);

        let result = if is_json {
            json.translate_file(path, &target).await
        } else {
            text.translate_file(path, &target).await
        };

        match result {
            Ok(_) => {
                translated += 1;
                pb.inc(1);
            }
            Err(e) => {
                failed += 1;
                pb.set_message(format!("Failed: {} - {}", path.display(), e));
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }

        if i + 1 < total {
            translator.pause().await;
        }
    }

    pb.finish_with_message("Completed");

    let duration = start_time.elapsed();
    info!(
        "Completed: {} translated, {} skipped, {} failed in {:?}",
        translated, skipped, failed, duration
    );

    println!("\n✅ Translation completed!");
    println!("   Translated: {}", translated);
    println!("   Skipped: {}", skipped);
    println!("   Failed: {}", failed);
    println!("   Time: {:?}", duration);

    Ok(())
}

/// Handle single text/Markdown file translation
pub async fn handle_file(
    file: PathBuf,
    output: Option<PathBuf>,
    target_lang: Option<String>,
    glossary: Option<PathBuf>,
) -> anyhow::Result<()> {
    use tracing::info;

    let (config, glossary, translator) = build_pipeline(target_lang, glossary)?;
    let scanner = BatchScanner::new(config);

    let output = output.unwrap_or_else(|| scanner.target_path(&file));

    info!("Translating {} -> {}", file.display(), output.display());

    let processor = TextProcessor::new(translator, glossary);
    processor.translate_file(&file, &output).await?;

    println!("✅ Translated: {}", output.display());
    Ok(())
}

/// Handle single JSON file translation
pub async fn handle_json(
    file: PathBuf,
    output: Option<PathBuf>,
    target_lang: Option<String>,
    glossary: Option<PathBuf>,
) -> anyhow::Result<()> {
    use tracing::info;

    let (config, glossary, translator) = build_pipeline(target_lang, glossary)?;
    let scanner = BatchScanner::new(config);

    let output = output.unwrap_or_else(|| scanner.target_path(&file));

    info!("Translating {} -> {}", file.display(), output.display());

    let processor = JsonProcessor::new(TextProcessor::new(translator, glossary));
    processor.translate_file(&file, &output).await?;

    println!("✅ Translated: {}", output.display());
    Ok(())
}
