use api_shared::{DiseaseRes, HealthService, PredictionRes};
use clap::{Parser, Subcommand};
use curecast_core::{CoreConfig, PredictionService};

#[derive(Parser)]
#[command(name = "curecast")]
#[command(about = "CureCast disease predictor CLI")]
struct Cli {
    /// Trained model artifact (JSON)
    #[arg(long, global = true, env = "CURECAST_ARTIFACT_PATH")]
    artifact: Option<String>,
    /// Disease reference table (CSV)
    #[arg(long, global = true, env = "CURECAST_DISEASE_CSV_PATH")]
    catalog: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symptom vocabulary
    Symptoms,
    /// List the disease catalog
    Diseases {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Predict diseases for the given symptoms
    Predict {
        /// Symptom names, as listed by `curecast symptoms`
        symptoms: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load the artifact and catalog and report what was found
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'curecast --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::from_env_values(cli.artifact, cli.catalog)?;
    let service = PredictionService::from_config(&cfg)?;

    match command {
        Commands::Symptoms => {
            for symptom in service.vocabulary().iter() {
                println!("{symptom}");
            }
        }
        Commands::Diseases { json } => {
            let rows: Vec<DiseaseRes> =
                service.catalog().entries().iter().map(DiseaseRes::from).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!(
                        "{} (samples: {}, severity: {}, specialist: {})",
                        row.disease, row.sample_count, row.severity, row.specialist
                    );
                }
            }
        }
        Commands::Predict { symptoms, json } => {
            let results: Vec<PredictionRes> = service
                .predict(symptoms.as_slice())?
                .into_iter()
                .map(PredictionRes::from)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No symptoms given.");
            } else {
                for (rank, result) in results.iter().enumerate() {
                    let samples = result
                        .sample_count
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".into());
                    println!(
                        "{}. {} {:.2}% (severity: {}, specialist: {}, samples: {})",
                        rank + 1,
                        result.disease,
                        result.percent,
                        result.severity,
                        result.specialist,
                        samples
                    );
                }
            }
        }
        Commands::Check => {
            let health = HealthService::check_health(&service);
            println!(
                "OK: {} symptoms, {} classes, {} diseases",
                health.symptoms, health.classes, health.diseases
            );
            if let Some(accuracy) = health.accuracy {
                println!("Reported accuracy: {:.4}", accuracy);
            }
        }
    }

    Ok(())
}
