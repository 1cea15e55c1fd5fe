//! Pressroom — admin command-line entry point.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pressroom_core::TenantContext;
use pressroom_core::models::member::{CreateMember, MemberRole};
use pressroom_core::models::tenant::{CreateTenant, SubscriptionTier};
use pressroom_core::query::{BlogQuery, ListFilter, SortOrder};
use pressroom_core::repository::Pagination;
use pressroom_db::repository::{
    SurrealBlogRepository, SurrealMemberRepository, SurrealTenantRepository,
};
use pressroom_db::{DbConfig, DbManager};
use pressroom_editor::{BlogService, EditorConfig, TenantService};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "pressroom",
    version,
    about = "Pressroom tenant and content administration"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations and exit.
    Migrate,
    /// Manage tenants.
    #[command(subcommand)]
    Tenant(TenantCommand),
    /// Manage tenant memberships.
    #[command(subcommand)]
    Member(MemberCommand),
    /// Manage blog posts.
    #[command(subcommand)]
    Blog(BlogCommand),
}

#[derive(Subcommand)]
enum TenantCommand {
    /// Create a tenant.
    Create {
        name: String,
        domain: String,
        #[arg(long, value_enum, default_value_t = TierArg::Free)]
        tier: TierArg,
    },
    /// List tenants.
    List {
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 50)]
        limit: u64,
    },
    /// Show one tenant by id.
    Show { id: Uuid },
    /// Look a tenant up by its public domain.
    Resolve { domain: String },
}

#[derive(Subcommand)]
enum MemberCommand {
    /// Add a member to a tenant.
    Add {
        #[arg(long)]
        tenant: Uuid,
        user_uid: String,
        name: String,
        email: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Viewer)]
        role: RoleArg,
    },
    /// Remove a member from a tenant.
    Remove {
        #[arg(long)]
        tenant: Uuid,
        user_uid: String,
    },
    /// List the members of a tenant.
    List {
        #[arg(long)]
        tenant: Uuid,
    },
}

#[derive(Subcommand)]
enum BlogCommand {
    /// List posts with the admin view's search, filter, and sort.
    List {
        #[arg(long)]
        tenant: Uuid,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        #[arg(long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,
    },
    /// Show one post by id.
    Show {
        #[arg(long)]
        tenant: Uuid,
        id: Uuid,
    },
    /// Delete one or more posts, reporting each id individually.
    Delete {
        #[arg(long)]
        tenant: Uuid,
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Free,
    Starter,
    Pro,
    Enterprise,
}

impl From<TierArg> for SubscriptionTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Free => SubscriptionTier::Free,
            TierArg::Starter => SubscriptionTier::Starter,
            TierArg::Pro => SubscriptionTier::Pro,
            TierArg::Enterprise => SubscriptionTier::Enterprise,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Viewer,
    Editor,
    Admin,
    SuperAdmin,
}

impl From<RoleArg> for MemberRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Viewer => MemberRole::Viewer,
            RoleArg::Editor => MemberRole::Editor,
            RoleArg::Admin => MemberRole::Admin,
            RoleArg::SuperAdmin => MemberRole::SuperAdmin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Recent,
    Drafts,
    Published,
}

impl From<FilterArg> for ListFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => ListFilter::All,
            FilterArg::Recent => ListFilter::Recent,
            FilterArg::Drafts => ListFilter::Drafts,
            FilterArg::Published => ListFilter::Published,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    Title,
    Author,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Oldest => SortOrder::Oldest,
            SortArg::Title => SortOrder::Title,
            SortArg::Author => SortOrder::Author,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pressroom=info".parse()?))
        .json()
        .init();

    let cli = Cli::parse();

    let config = DbConfig::from_env();
    let manager = DbManager::connect(&config)
        .await
        .context("failed to connect to SurrealDB")?;
    let db = manager.client().clone();
    pressroom_db::run_migrations(&db)
        .await
        .context("failed to apply migrations")?;

    let tenants = TenantService::new(
        SurrealTenantRepository::new(db.clone()),
        SurrealMemberRepository::new(db.clone()),
    );
    let blogs = BlogService::new(SurrealBlogRepository::new(db), EditorConfig::default());

    match cli.command {
        Command::Migrate => {
            println!("migrations up to date");
        }
        Command::Tenant(cmd) => match cmd {
            TenantCommand::Create { name, domain, tier } => {
                let tenant = tenants
                    .create_tenant(CreateTenant {
                        name,
                        domain,
                        tier: tier.into(),
                        settings: None,
                    })
                    .await?;
                println!("{}", serde_json::to_string_pretty(&tenant)?);
            }
            TenantCommand::List { offset, limit } => {
                let page = tenants
                    .list_tenants(Pagination { offset, limit })
                    .await?;
                println!("{}", serde_json::to_string_pretty(&page.items)?);
                tracing::info!(total = page.total, "tenants listed");
            }
            TenantCommand::Show { id } => {
                let tenant = tenants.get_tenant(id).await?;
                println!("{}", serde_json::to_string_pretty(&tenant)?);
            }
            TenantCommand::Resolve { domain } => {
                let tenant = tenants.resolve_domain(&domain).await?;
                println!("{}", serde_json::to_string_pretty(&tenant)?);
            }
        },
        Command::Member(cmd) => match cmd {
            MemberCommand::Add {
                tenant,
                user_uid,
                name,
                email,
                role,
            } => {
                let ctx = TenantContext::new(tenant);
                let member = tenants
                    .add_member(
                        ctx,
                        CreateMember {
                            tenant_id: tenant,
                            user_uid,
                            name,
                            email,
                            role: role.into(),
                        },
                    )
                    .await?;
                println!("{}", serde_json::to_string_pretty(&member)?);
            }
            MemberCommand::Remove { tenant, user_uid } => {
                let ctx = TenantContext::new(tenant);
                tenants.remove_member(ctx, &user_uid).await?;
                println!("removed {user_uid}");
            }
            MemberCommand::List { tenant } => {
                let ctx = TenantContext::new(tenant);
                let page = tenants.members(ctx, Pagination::default()).await?;
                println!("{}", serde_json::to_string_pretty(&page.items)?);
            }
        },
        Command::Blog(cmd) => match cmd {
            BlogCommand::List {
                tenant,
                search,
                filter,
                sort,
            } => {
                let ctx = TenantContext::new(tenant);
                let view = blogs
                    .list(
                        ctx,
                        &BlogQuery {
                            search,
                            filter: filter.into(),
                            sort: sort.into(),
                        },
                    )
                    .await?;
                for blog in &view {
                    println!(
                        "{}  {:<9}  {}  {}",
                        blog.id,
                        format!("{:?}", blog.status),
                        blog.created_at.format("%Y-%m-%d"),
                        blog.title
                    );
                }
            }
            BlogCommand::Show { tenant, id } => {
                let ctx = TenantContext::new(tenant);
                let blog = blogs.get(ctx, id).await?;
                println!("{}", serde_json::to_string_pretty(&blog)?);
            }
            BlogCommand::Delete { tenant, ids } => {
                let ctx = TenantContext::new(tenant);
                let report = blogs.bulk_delete(ctx, &ids).await;
                for id in &report.deleted {
                    println!("OK {id}");
                }
                for (id, reason) in &report.failed {
                    println!("FAILED {id}: {reason}");
                }
                if !report.all_succeeded() {
                    anyhow::bail!(
                        "{} of {} deletes failed",
                        report.failed.len(),
                        ids.len()
                    );
                }
            }
        },
    }

    Ok(())
}
