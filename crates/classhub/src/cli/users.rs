//! the `users` subcommand - manage accounts from the command line.
//!
//! the first admin account has to come from somewhere before anyone can
//! sign in, so account creation is also available here, next to the
//! database, without going through the http api.

use clap::{Args, Subcommand};
use color_eyre::eyre::{bail, Context, Result};
use classhub_db::{ClasshubDb, Database};
use classhub_types::{Config, Role, User, UserId};

/// bcrypt work factor for password hashing.
const BCRYPT_COST: u32 = 10;

/// shared database connection arguments.
#[derive(Args, Debug)]
pub struct DbArgs {
    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "CLASSHUB_DATABASE_URL")]
    database_url: String,
}

impl DbArgs {
    /// connect to the database and run migrations.
    pub async fn connect(&self) -> Result<ClasshubDb> {
        let mut config = Config::default();
        config.database = super::serve::parse_database_url(&self.database_url)?;

        let db = ClasshubDb::new(&config)
            .await
            .context("failed to connect to database")?;
        db.migrate().await.context("failed to run migrations")?;
        Ok(db)
    }
}

/// manage user accounts
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// create a new account
    Create(CreateUserArgs),

    /// list all accounts
    List(ListUsersArgs),

    /// deactivate an account
    Deactivate(DeactivateUserArgs),
}

/// create a new account
#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// username
    username: String,

    /// email address
    #[arg(long)]
    email: String,

    /// plaintext password, hashed before storage
    #[arg(long, env = "CLASSHUB_USER_PASSWORD")]
    password: String,

    /// account role (admin, teacher, student, parent)
    #[arg(long, default_value = "admin")]
    role: Role,

    /// given name
    #[arg(long, default_value = "")]
    first_name: String,

    /// family name
    #[arg(long, default_value = "")]
    last_name: String,
}

/// list accounts
#[derive(Args, Debug)]
pub struct ListUsersArgs {
    #[command(flatten)]
    db: DbArgs,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

/// deactivate an account
#[derive(Args, Debug)]
pub struct DeactivateUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id to deactivate
    user_id: u64,
}

impl UsersCommand {
    /// run the users command
    pub async fn run(self) -> Result<()> {
        match self {
            UsersCommand::Create(args) => create_user(args).await,
            UsersCommand::List(args) => list_users(args).await,
            UsersCommand::Deactivate(args) => deactivate_user(args).await,
        }
    }
}

async fn create_user(args: CreateUserArgs) -> Result<()> {
    let db = args.db.connect().await?;

    // check if a user with this name or email already exists
    if db
        .get_user_by_username_or_email(&args.username, &args.email)
        .await
        .context("failed to check for existing user")?
        .is_some()
    {
        bail!("user '{}' or email '{}' already exists", args.username, args.email);
    }

    let mut user = User::new(UserId(0), args.username.clone(), args.email.clone(), args.role);
    user.first_name = args.first_name;
    user.last_name = args.last_name;
    user.password_hash =
        bcrypt::hash(&args.password, BCRYPT_COST).context("failed to hash password")?;

    let created = db
        .create_user(&user)
        .await
        .context("failed to create user")?;

    println!("Created user:");
    println!("  ID:       {}", created.id);
    println!("  Username: {}", created.username);
    println!("  Email:    {}", created.email);
    println!("  Role:     {}", created.role);

    Ok(())
}

async fn list_users(args: ListUsersArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let users = db.list_users().await.context("failed to list users")?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    // table output
    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<30} {:<10} {:<8}",
        "ID", "USERNAME", "EMAIL", "ROLE", "ACTIVE"
    );
    println!("{}", "-".repeat(78));

    for user in users {
        println!(
            "{:<6} {:<20} {:<30} {:<10} {:<8}",
            user.id.0, user.username, user.email, user.role, user.active,
        );
    }

    Ok(())
}

async fn deactivate_user(args: DeactivateUserArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let user = db
        .get_user(UserId(args.user_id))
        .await
        .context("failed to query user")?;

    let Some(mut user) = user else {
        bail!("user {} not found", args.user_id);
    };

    if !user.active {
        bail!("user {} is already deactivated", args.user_id);
    }

    user.active = false;
    db.update_user(&user)
        .await
        .context("failed to update user")?;

    println!("Deactivated user {} ({})", args.user_id, user.username);

    Ok(())
}
