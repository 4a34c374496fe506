use acessly::cli::create_user;
use acessly::cli::seeder::{SeedConfig, clear_seeded_data, seed_database};
use acessly_config::DatabaseConfig;
use acessly_db::init_db_pool;
use acessly_models::UserRole;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "acessly-cli")]
#[command(about = "Acessly CLI - Administrative tools for the Acessly API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Register a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Password (8-255 characters)
        #[arg(short = 'p', long)]
        password: String,

        /// CANDIDATE or COMPANY
        #[arg(short = 'r', long, default_value = "CANDIDATE")]
        role: UserRole,
    },
    /// Seed the database with fake companies, candidates, vacancies and candidacies
    Seed {
        /// Number of company accounts to create
        #[arg(short = 'c', long, default_value = "5")]
        companies: usize,

        /// Number of candidate accounts to create
        #[arg(long, default_value = "20")]
        candidates: usize,

        /// Vacancies published by each company
        #[arg(long, default_value = "3")]
        vacancies: usize,

        /// Applications made by each candidate
        #[arg(long, default_value = "2")]
        applications: usize,
    },
    /// Remove all seeded accounts and everything that belongs to them
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateUser {
            name,
            email,
            password,
            role,
        } => handle_create_user(&pool, &name, &email, &password, role).await,
        Commands::Seed {
            companies,
            candidates,
            vacancies,
            applications,
        } => {
            let config = SeedConfig {
                companies,
                candidates,
                vacancies_per_company: vacancies,
                applications_per_candidate: applications,
            };
            seed_database(&pool, config).await.map(|_| ())
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    Ok(init_db_pool(&config).await?)
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<()> {
    let user = create_user(pool, name, email, password, role).await?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Role: {}", user.role);
    Ok(())
}

async fn handle_clear_seed(pool: &PgPool) -> anyhow::Result<()> {
    let removed = clear_seeded_data(pool).await?;
    println!("🧹 Removed {} seeded users and their data", removed);
    Ok(())
}
