/// Viking Server - service-ticket backend
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viking_core::{CreateRole, UserType};
use viking_server::{
    api,
    config::ServerConfig,
    services::{user_directory::UserPayload, AuthService, BcryptPasswordEncoder, UserDirectory},
    state::AppState,
};

#[derive(Parser)]
#[command(name = "viking-server")]
#[command(about = "Viking service-ticket backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VIKING_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a role users can be linked to
    AddRole {
        /// Role name
        #[arg(short, long)]
        name: String,
        /// Permission label granted by the role
        #[arg(short, long)]
        permission: String,
    },
    /// Create a user linked to an existing role, bypassing the API checks
    AddUser {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// National id number
        #[arg(long)]
        dni: i64,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Login password
        #[arg(short, long)]
        password: String,
        /// Name of the role to link
        #[arg(short, long)]
        role: String,
        #[arg(long, default_value = "-")]
        address: String,
        #[arg(long, default_value = "-")]
        phone: String,
        #[arg(long, default_value = "-")]
        secondary_phone: String,
        /// Tax id, for business users
        #[arg(long)]
        cuit: Option<String>,
        /// Register as a business instead of an individual
        #[arg(long)]
        business: bool,
    },
    /// List all users
    ListUsers,
    /// List all roles
    ListRoles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viking_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddRole { name, permission } => {
            add_role(&config, name, permission).await?;
        }
        Commands::AddUser {
            name,
            dni,
            email,
            password,
            role,
            address,
            phone,
            secondary_phone,
            cuit,
            business,
        } => {
            let payload = UserPayload {
                id: None,
                name,
                dni,
                user_type: if business {
                    UserType::Business
                } else {
                    UserType::Individual
                },
                address,
                phone_number: phone,
                secondary_phone_number: secondary_phone,
                email,
                password: Some(password),
                cuit,
                role_id: None,
            };
            add_user(&config, payload, &role).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::ListRoles => {
            list_roles(&config).await?;
        }
    }

    Ok(())
}

async fn connect(config: &ServerConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool = viking_storage::create_pool(&config.storage.database_url).await?;
    viking_storage::run_migrations(&pool).await?;
    Ok(pool)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Viking Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = connect(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));
    let encoder = Arc::new(BcryptPasswordEncoder::new(config.auth.bcrypt_cost));

    let app_state = AppState::new(pool, auth_service, encoder, &config.auth.admin_permission);
    let app = api::create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_role(config: &ServerConfig, name: String, permission: String) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    let role = viking_storage::roles::insert(&pool, &CreateRole { name, permission }).await?;

    println!("Created role {} ({}) with id {}", role.name, role.permission, role.id);

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    mut payload: UserPayload,
    role_name: &str,
) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    let role = viking_storage::roles::get_by_name(&pool, role_name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Role {role_name} does not exist"))?;
    payload.role_id = Some(role.id);

    let encoder = Arc::new(BcryptPasswordEncoder::new(config.auth.bcrypt_cost));
    let users = UserDirectory::new(pool, encoder, config.auth.admin_permission.as_str());
    let view = users.provision(payload).await?;

    println!("Created user {} <{}> with id {}", view.user.name, view.user.email, view.user.id);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    let users = viking_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

async fn list_roles(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    let roles = viking_storage::roles::get_all(&pool).await?;

    println!("Roles:");
    for role in roles {
        println!("  {} - {} [{}]", role.id, role.name, role.permission);
    }

    Ok(())
}
