use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::controller::ActionKind;
use crate::model::{BookingFilter, PAGE_SIZE_OPTIONS};

#[derive(Parser)]
#[command(name = "command-centre")]
#[command(about = "Operations console for home-care bookings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with an operations account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Work with bookings
    #[command(visible_alias = "b")]
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },

    /// Work with customers
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },

    /// Browse the payments ledger
    Payments {
        #[command(subcommand)]
        action: PaymentsAction,
    },

    /// Browse the service catalog
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },

    /// Browse tags and tag categories
    Tags {
        #[command(subcommand)]
        action: TagsAction,
    },

    /// Work with staff members
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum BookingsAction {
    /// List one page of bookings
    Ls {
        /// Filter: all, new, approved
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: BookingFilter,

        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Rows per page: 10, 25, 50, 100 (default: config page_size)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one booking in full
    Show {
        /// Booking ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a booking as completed
    Complete {
        /// Booking ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a booking as cancelled
    Cancel {
        /// Booking ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a booking to a staff member
    Assign {
        /// Booking ID
        id: String,

        /// Staff member ID (see `staff ls`)
        #[arg(short, long)]
        staff: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve a staff member's accepted invitation
    Approve {
        /// Booking ID
        id: String,

        /// Staff member ID of the invitation
        #[arg(short, long)]
        staff: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a booking as read
    MarkRead {
        /// Booking ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse bookings interactively
    Browse {
        /// Initial filter: all, new, approved
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: BookingFilter,

        /// Start with auto-refresh off
        #[arg(long)]
        no_auto_refresh: bool,
    },
}

#[derive(Subcommand)]
pub enum CustomersAction {
    /// List one page of customers
    Ls {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Rows per page: 10, 25, 50, 100 (default: config page_size)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one customer
    Show {
        /// Customer ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PaymentsAction {
    /// List one page of payments
    Ls {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Rows per page: 10, 25, 50, 100 (default: config page_size)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ServicesAction {
    /// List all services
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// List all tags
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tag categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum StaffAction {
    /// List the staff roster
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Key: api_base_url, request_timeout, poll_interval, page_size, auto_refresh
        key: String,
        /// Value to set
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Key: api_base_url, request_timeout, poll_interval, page_size, auto_refresh
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Whether this command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Commands::Bookings {
                action: BookingsAction::Browse { .. }
            }
        )
    }

    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            BookingsLsOptions, cmd_bookings_approve, cmd_bookings_assign, cmd_bookings_browse,
            cmd_bookings_ls, cmd_bookings_mark_read, cmd_bookings_show, cmd_bookings_status,
            cmd_config_get, cmd_config_set, cmd_config_show, cmd_customers_ls,
            cmd_customers_show, cmd_login, cmd_logout, cmd_payments_ls, cmd_services_ls,
            cmd_staff_ls, cmd_tag_categories_ls, cmd_tags_ls,
        };

        match self {
            Commands::Login {
                email,
                password,
                json,
            } => cmd_login(&email, password, json).await,
            Commands::Logout { json } => cmd_logout(json),

            Commands::Bookings { action } => match action {
                BookingsAction::Ls {
                    filter,
                    page,
                    page_size,
                    json,
                } => {
                    cmd_bookings_ls(BookingsLsOptions {
                        filter,
                        page,
                        page_size,
                        json,
                    })
                    .await
                }
                BookingsAction::Show { id, json } => cmd_bookings_show(&id, json).await,
                BookingsAction::Complete { id, yes, json } => {
                    cmd_bookings_status(ActionKind::MarkComplete, &id, yes, json).await
                }
                BookingsAction::Cancel { id, yes, json } => {
                    cmd_bookings_status(ActionKind::MarkCancel, &id, yes, json).await
                }
                BookingsAction::Assign { id, staff, json } => {
                    cmd_bookings_assign(&id, &staff, json).await
                }
                BookingsAction::Approve { id, staff, json } => {
                    cmd_bookings_approve(&id, &staff, json).await
                }
                BookingsAction::MarkRead { id, json } => cmd_bookings_mark_read(&id, json).await,
                BookingsAction::Browse {
                    filter,
                    no_auto_refresh,
                } => cmd_bookings_browse(filter, no_auto_refresh).await,
            },

            Commands::Customers { action } => match action {
                CustomersAction::Ls {
                    page,
                    page_size,
                    json,
                } => cmd_customers_ls(page, page_size, json).await,
                CustomersAction::Show { id, json } => cmd_customers_show(&id, json).await,
            },

            Commands::Payments { action } => match action {
                PaymentsAction::Ls {
                    page,
                    page_size,
                    json,
                } => cmd_payments_ls(page, page_size, json).await,
            },

            Commands::Services { action } => match action {
                ServicesAction::Ls { json } => cmd_services_ls(json).await,
            },

            Commands::Tags { action } => match action {
                TagsAction::Ls { json } => cmd_tags_ls(json).await,
                TagsAction::Categories { json } => cmd_tag_categories_ls(json).await,
            },

            Commands::Staff { action } => match action {
                StaffAction::Ls { json } => cmd_staff_ls(json).await,
            },

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_filter(s: &str) -> Result<BookingFilter, String> {
    s.parse().map_err(|e: crate::error::CentreError| e.to_string())
}

fn parse_page_size(s: &str) -> Result<u32, String> {
    let options = PAGE_SIZE_OPTIONS
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    match s.trim().parse::<u32>() {
        Ok(n) if PAGE_SIZE_OPTIONS.contains(&n) => Ok(n),
        _ => Err(format!("Invalid page size. Must be one of: {options}")),
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "command-centre", &mut io::stdout());
}
