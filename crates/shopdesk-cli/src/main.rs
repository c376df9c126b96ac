//! Shopdesk CLI
//!
//! Admin console for the store API: log in, browse the dashboard, and list,
//! inspect or add products, categories and users.

mod commands;
mod logging;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::App;
use shopdesk_config_file::ShopdeskConfig;
use shopdesk_core::{NewCategory, NewProduct, NewUser, resource::default_role};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(about = "Shopdesk - admin console for the store API", long_about = None)]
struct Cli {
    /// Config file (YAML or TOML); defaults to ~/.shopdesk/config.yaml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON instead of formatted views
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Status,
    /// Show product, category and user counts
    Dashboard,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally filtered by title
    List {
        #[arg(long)]
        title: Option<String>,
    },
    /// Show one product
    Get { id: u64 },
    /// Add a product
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        price: f64,

        #[arg(long)]
        description: String,

        #[arg(long)]
        category_id: u64,

        /// Comma separated image URLs
        #[arg(long)]
        images: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories
    List,
    /// Show one category
    Get { id: u64 },
    /// Add a category
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        image: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List,
    /// Show one user
    Get { id: u64 },
    /// Add a user
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        avatar: String,

        #[arg(long, default_value_t = default_role())]
        role: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ShopdeskConfig::load(cli.config.as_deref()).context("failed to load config")?;
    logging::init_logging(&config.logging)?;

    let app = App::from_config(&config, cli.json)?;

    let output = match cli.command {
        Commands::Login { email, password } => app.login(&email, &password).await?,
        Commands::Logout => app.logout().await,
        Commands::Status => app.status().await,
        Commands::Dashboard => app.dashboard().await?,
        Commands::Products { action } => match action {
            ProductAction::List { title } => app.list_products(title.as_deref()).await?,
            ProductAction::Get { id } => app.get_product(id).await?,
            ProductAction::Create {
                title,
                price,
                description,
                category_id,
                images,
            } => {
                app.create_product(NewProduct {
                    title,
                    price,
                    description,
                    category_id,
                    images: NewProduct::parse_images(&images),
                })
                .await?
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => app.list_categories().await?,
            CategoryAction::Get { id } => app.get_category(id).await?,
            CategoryAction::Create { name, image } => {
                app.create_category(NewCategory { name, image }).await?
            }
        },
        Commands::Users { action } => match action {
            UserAction::List => app.list_users().await?,
            UserAction::Get { id } => app.get_user(id).await?,
            UserAction::Create {
                name,
                email,
                password,
                avatar,
                role,
            } => {
                app.create_user(NewUser {
                    name,
                    email,
                    password,
                    avatar,
                    role,
                })
                .await?
            }
        },
    };

    println!("{}", output);
    Ok(())
}
