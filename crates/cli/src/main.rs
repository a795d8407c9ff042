use anyhow::{anyhow, Context, Result};
use board::{BoardConfig, InternshipBoard, Navigation, Routed};
use catalog::{Catalog, InternshipId, InternshipRecord};
use clap::{Parser, Subcommand};
use colored::Colorize;
use filter_engine::FilterUpdate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use saved_state::{FileStorage, ProfileUpdate, ToggleOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Intern Board - browse, filter and save internship listings
#[derive(Parser)]
#[command(name = "intern-board")]
#[command(about = "Browse, filter and save internship listings", long_about = None)]
struct Cli {
    /// Path to the internship catalog (JSON)
    #[arg(short, long, env = "INTERN_BOARD_CATALOG", default_value = "data/internships.json")]
    catalog: PathBuf,

    /// Path to the local storage file (session, bookmarks, favorites)
    #[arg(short, long, env = "INTERN_BOARD_STORAGE", default_value = ".intern-board/storage.json")]
    storage: PathBuf,

    /// Seed for featured and similar picks
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List internships matching the given filters
    List {
        /// Case-insensitive text matched against title, company and description
        #[arg(long)]
        search: Option<String>,

        /// Minimum hourly salary in dollars
        #[arg(long, allow_negative_numbers = true)]
        min_salary: Option<i64>,

        /// Accepted location (repeatable)
        #[arg(long)]
        location: Vec<String>,

        /// Accepted category (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Only remote internships
        #[arg(long)]
        remote: bool,

        /// Entry query string, e.g. "search=design&category=Marketing"
        #[arg(long)]
        query: Option<String>,
    },

    /// Show one internship with similar postings
    Show {
        id: InternshipId,
    },

    /// Random picks from the whole catalog
    Featured,

    /// Sign in (any email, password of at least 6 characters)
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show who is signed in
    Whoami,

    /// Edit the signed-in profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        bio: Option<String>,
    },

    /// Toggle the bookmark on an internship
    Bookmark {
        id: InternshipId,
    },

    /// Toggle the favorite on an internship
    Favorite {
        id: InternshipId,
    },

    /// List bookmarked and favorited internships
    Saved,

    /// Show location and category facets with counts
    Facets,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.catalog)
            .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?,
    );
    let storage = Arc::new(
        FileStorage::open(&cli.storage)
            .with_context(|| format!("Failed to open storage at {}", cli.storage.display()))?,
    );
    debug!("Loaded {} internships in {:?}", catalog.len(), start.elapsed());

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut board = InternshipBoard::new(catalog, storage, rng, BoardConfig::default());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List {
            search,
            min_salary,
            location,
            category,
            remote,
            query,
        } => {
            if let Some(query) = query {
                board.enter_listing(&query);
            }
            let mut update = FilterUpdate::new();
            if let Some(search) = search {
                update = update.with_search(search);
            }
            if let Some(min_salary) = min_salary {
                update = update.with_min_salary(min_salary);
            }
            if !location.is_empty() {
                update = update.with_locations(location);
            }
            if !category.is_empty() {
                update = update.with_categories(category);
            }
            if remote {
                update = update.with_remote_only(true);
            }
            board.update_filter(update);
            handle_list(&board);
        }
        Commands::Show { id } => handle_show(&mut board, id),
        Commands::Featured => handle_featured(&mut board),
        Commands::Login { email, password } => {
            let identity = board.login(&email, &password).context("Sign-in failed")?;
            println!("{} Signed in as {} ({})", "✓".green(), identity.name.bold(), identity.email);
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let identity = board
                .register(&name, &email, &password)
                .context("Registration failed")?;
            println!("{} Welcome, {}!", "✓".green(), identity.name.bold());
        }
        Commands::Logout => {
            board.logout().context("Sign-out failed")?;
            println!("{} Signed out", "✓".green());
        }
        Commands::Whoami => handle_whoami(&board),
        Commands::Profile {
            name,
            email,
            location,
            bio,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                location,
                bio,
            };
            match board.update_profile(update).context("Profile update failed")? {
                Routed::Show(_) => {
                    println!("{} Profile updated", "✓".green());
                    handle_whoami(&board);
                }
                Routed::Redirect(nav) => print_redirect(&nav),
            }
        }
        Commands::Bookmark { id } => {
            let title = title_of(board.catalog(), id)?;
            match board.toggle_bookmark(id).context("Failed to save bookmark")? {
                Routed::Show(ToggleOutcome::Added) => println!("{} Bookmarked {}", "✓".green(), title),
                Routed::Show(_) => println!("{} Removed bookmark from {}", "✓".green(), title),
                Routed::Redirect(nav) => print_redirect(&nav),
            }
        }
        Commands::Favorite { id } => {
            let title = title_of(board.catalog(), id)?;
            match board.toggle_favorite(id).context("Failed to save favorite")? {
                Routed::Show(ToggleOutcome::Added) => println!("{} Favorited {}", "✓".green(), title),
                Routed::Show(_) => println!("{} Removed favorite from {}", "✓".green(), title),
                Routed::Redirect(nav) => print_redirect(&nav),
            }
        }
        Commands::Saved => handle_saved(&board),
        Commands::Facets => handle_facets(&board),
    }

    Ok(())
}

/// Handle the 'list' command
fn handle_list(board: &InternshipBoard) {
    let results = board.filtered_results();

    let chips = board.active_filters();
    if !chips.is_empty() {
        let labels = chips.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ");
        println!("{} {}", "Applied filters:".bold(), labels);
    }
    let query = board.query_string();
    if !query.is_empty() {
        println!("{} ?{}", "Query:".bold(), query);
    }

    if results.is_empty() {
        println!("{}", "No internships match these filters.".yellow());
        println!("Try fewer filters, or run `intern-board list` to see everything.");
        return;
    }

    println!(
        "{}",
        format!("{} of {} internships", results.len(), board.catalog().len()).bold().blue()
    );
    for record in results {
        print_record(board, record);
    }
}

/// Handle the 'show' command
fn handle_show(board: &mut InternshipBoard, id: InternshipId) {
    let detail = match board.internship_detail(id) {
        Routed::Show(detail) => detail,
        Routed::Redirect(_) => {
            println!("{}", format!("Internship {} not found.", id).yellow());
            handle_list(board);
            return;
        }
    };

    let record = &detail.record;
    println!("{}", record.title.bold().blue());
    println!("{}Company: {}", "• ".green(), record.company);
    println!("{}Location: {}{}", "• ".green(), record.location, remote_tag(record));
    println!("{}Category: {}", "• ".green(), record.category);
    println!("{}Salary: {}", "• ".green(), record.salary_display);
    if let Some(duration) = &record.duration {
        println!("{}Duration: {}", "• ".green(), duration);
    }
    println!("{}Posted: {}", "• ".green(), record.posted_date.format("%b %-d, %Y"));
    println!("{}Bookmarked: {}", "• ".cyan(), yes_no(detail.is_bookmarked));
    println!("{}Favorite: {}", "• ".cyan(), yes_no(detail.is_favorite));
    println!();
    println!("{}", record.description);

    if !record.requirements.is_empty() {
        println!();
        println!("{}", "Requirements:".bold());
        for requirement in &record.requirements {
            println!("  - {}", requirement);
        }
    }

    if !detail.similar.is_empty() {
        println!();
        println!("{}", "Similar internships:".bold());
        for similar in &detail.similar {
            println!("  {}. {} at {} ({})", similar.id, similar.title, similar.company, similar.salary_display);
        }
    }
}

/// Handle the 'featured' command
fn handle_featured(board: &mut InternshipBoard) {
    let featured = board.featured();
    println!("{}", "Featured internships:".bold().blue());
    for record in &featured {
        print_record(board, record);
    }
}

/// Handle the 'whoami' command
fn handle_whoami(board: &InternshipBoard) {
    let Some(identity) = board.current_identity() else {
        println!("Not signed in");
        return;
    };
    println!("{}", identity.name.bold().blue());
    println!("{}Email: {}", "• ".green(), identity.email);
    println!("{}Id: {}", "• ".green(), identity.id);
    println!("{}Member since: {}", "• ".green(), identity.created_at.format("%Y-%m-%d"));
    if let Some(location) = &identity.location {
        println!("{}Location: {}", "• ".green(), location);
    }
    if let Some(bio) = &identity.bio {
        println!("{}Bio: {}", "• ".green(), bio);
    }
}

/// Handle the 'saved' command
fn handle_saved(board: &InternshipBoard) {
    let saved = match board.saved_items() {
        Routed::Show(saved) => saved,
        Routed::Redirect(nav) => {
            print_redirect(&nav);
            return;
        }
    };

    println!("{}", format!("Bookmarked ({}):", saved.bookmarked.len()).bold().blue());
    for record in &saved.bookmarked {
        print_record(board, record);
    }
    println!("{}", format!("Favorites ({}):", saved.favorited.len()).bold().blue());
    for record in &saved.favorited {
        print_record(board, record);
    }
}

/// Handle the 'facets' command
fn handle_facets(board: &InternshipBoard) {
    let facets = board.facets();
    println!("{}", "Locations:".bold().blue());
    for (location, count) in &facets.locations {
        println!("  {} ({})", location, count);
    }
    println!("{}", "Categories:".bold().blue());
    for (category, count) in &facets.categories {
        println!("  {} ({})", category, count);
    }
    println!(
        "{} $0 - ${}/hr",
        "Salary range:".bold().blue(),
        board.config().salary_slider_max
    );
}

fn title_of(catalog: &Catalog, id: InternshipId) -> Result<String> {
    catalog
        .get_internship(id)
        .map(|record| record.title.clone())
        .ok_or_else(|| anyhow!("Internship {} not found", id))
}

fn print_record(board: &InternshipBoard, record: &InternshipRecord) {
    let mut marks = String::new();
    if board.is_bookmarked(record.id) {
        marks.push_str(" [bookmarked]");
    }
    if board.is_favorite(record.id) {
        marks.push_str(" [favorite]");
    }
    println!(
        "{}. {} at {} - {}{} | {} | {}{}",
        record.id.to_string().green(),
        record.title.bold(),
        record.company,
        record.location,
        remote_tag(record),
        record.category,
        record.salary_display,
        marks.cyan()
    );
}

fn print_redirect(nav: &Navigation) {
    match nav {
        Navigation::SignIn { return_to } => {
            println!("{}", "Please sign in first.".yellow());
            println!("Run `intern-board login --email <email> --password <password>`, then return to {}", return_to);
        }
        Navigation::Listing => println!("Back to the listing: `intern-board list`"),
    }
}

fn remote_tag(record: &InternshipRecord) -> &'static str {
    if record.is_remote {
        " (remote)"
    } else {
        ""
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
