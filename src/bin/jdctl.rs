use clap::{Parser, Subcommand};
use jobdesc_templates::error::{AppError, AppResult};
use jobdesc_templates::placeholder::{highlight_with, substitute, HighlightMarker, SubstitutionMap};
use jobdesc_templates::{Config, DocumentPipeline, PlaceholderRegistry};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jdctl", about = "CLI for the job description template pipeline", version)]
struct Cli {
    /// Override OPENAI_BASE_URL
    #[arg(global = true, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a job description draft with all required placeholders
    Generate {
        /// Free-text description of the role
        query: String,
        /// Print the raw JSON response instead of the draft
        #[arg(long)]
        json: bool,
    },
    /// Suggest values for every required placeholder
    Suggest {
        /// Free text with hints about the role, company or location
        input: String,
    },
    /// Generate a draft and fill it with suggestions in one go
    Compose {
        query: String,
    },
    /// Substitute values into a template file and highlight what is left
    Render {
        /// Markdown template containing {{placeholders}}
        #[arg(long, value_name = "PATH")]
        template: PathBuf,
        /// Values as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        sets: Vec<String>,
        /// List unresolved tokens on stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the recognized placeholder tokens
    Placeholders,
}

fn parse_set_pairs(items: &[String]) -> AppResult<SubstitutionMap> {
    let mut out = SubstitutionMap::new();
    for s in items {
        let Some((name, value)) = s.split_once('=') else {
            return Err(AppError::InvalidSubstitution(s.clone()));
        };
        out.insert(name.trim().to_string(), value.to_string());
    }
    Ok(out)
}

fn pipeline(conf: &Config) -> DocumentPipeline {
    match conf.build_pipeline() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut conf = Config::new()?;
    if let Some(url) = cli.base_url {
        conf.openai_base_url = url;
    }

    match cli.command {
        Commands::Generate { query, json } => {
            let res = pipeline(&conf).generate_document(&query).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else if let Some(content) = res.content.as_deref().filter(|_| res.success) {
                println!("{}", content);
            } else {
                eprintln!("Error: {}", res.error.as_deref().unwrap_or("unknown failure"));
                for field in res.missing_fields.iter().flatten() {
                    eprintln!("  missing {} ({{{{{}}}}})", field.display_label, field.name);
                }
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Suggest { input } => {
            let res = pipeline(&conf).generate_field_suggestions(&input).await;
            println!("{}", serde_json::to_string_pretty(&res)?);
            if !res.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Compose { query } => match pipeline(&conf).compose_document(&query).await {
            Ok(doc) => {
                if let Some(reason) = &doc.suggestion_error {
                    eprintln!("Warning: suggestions unavailable ({}), placeholders left highlighted", reason);
                }
                println!("{}", doc.rendered.markup);
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Render { template, sets, verbose } => {
            let text = tokio::fs::read_to_string(&template).await?;
            let values = parse_set_pairs(&sets)?;
            let doc = highlight_with(&substitute(&text, &values), &HighlightMarker::default());
            if verbose {
                for name in &doc.unresolved_tokens {
                    eprintln!("[verbose] unresolved: {}", name);
                }
            }
            println!("{}", doc.markup);
            Ok(())
        }
        Commands::Placeholders => {
            let registry = PlaceholderRegistry::job_posting();
            for d in registry.descriptors() {
                let flag = if registry.is_required(&d.name) { "required" } else { "optional" };
                println!("{{{{{}}}}}\t{}\t{}\t{}", d.name, d.display_label, flag, d.description);
            }
            Ok(())
        }
    }
}
