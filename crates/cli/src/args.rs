//! Command-line arguments

use std::path::PathBuf;

use cadence_core::{
    CountRequest, ListFilters, MailingState, QueryParams, StepStatus, UserFilter, UserRef,
};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cadence-desk")]
#[command(version, about = "Calls, mailings and cadence contacts from the command line")]
pub struct Cli {
    /// TOML file with base_url, token and page_size
    #[arg(long, global = true, env = "CADENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend URL, e.g. http://127.0.0.1:8080
    #[arg(long, global = true, env = "CADENCE_API_URL")]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "CADENCE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log requests at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Call tasks
    Calls {
        #[command(subcommand)]
        action: MessageCommand,
    },
    /// Mailings
    Mailings {
        #[command(subcommand)]
        action: MessageCommand,
    },
    /// Contacts enrolled in a cadence
    Contacts {
        #[command(subcommand)]
        action: ContactsCommand,
    },
    /// Cadence settings
    Cadences {
        #[command(subcommand)]
        action: CadencesCommand,
    },
    /// Users
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
}

/// Shared by calls and mailings
#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Show one page of rows
    List(ListArgs),
    /// Print the total number of matching rows
    Count(FilterArgs),
    /// Print the delivery counters
    Stats,
    /// Send now
    Send { id: String },
    /// Create a new one
    Create(CreateArgs),
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// Show one page of contacts in a cadence
    List {
        #[arg(long)]
        cadence: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filters: SearchArgs,
    },
    /// Preview the row menu for a status (no request is made)
    Actions { status: StepStatus },
    /// Move a step to a new status
    SetStatus { step_id: String, status: StepStatus },
    /// Remove a step from its cadence
    Remove { step_id: String },
}

#[derive(Debug, Subcommand)]
pub enum CadencesCommand {
    Show {
        id: String,
    },
    /// Change name and/or owner
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
}

// ============================================================================
// Shared Argument Groups
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub search: Option<String>,

    /// Repeat for several users
    #[arg(long = "from-user")]
    pub from_user: Vec<String>,

    /// Extra query parameter as key=value; repeatable
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

impl SearchArgs {
    pub fn user_filter(&self) -> UserFilter {
        match self.from_user.as_slice() {
            [] => UserFilter::None,
            [one] => UserFilter::One(UserRef::from_id(one)),
            many => UserFilter::Many(many.iter().map(UserRef::from_id).collect()),
        }
    }

    pub fn query_params(&self) -> QueryParams {
        self.params.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub campaign: Option<String>,

    #[arg(long)]
    pub cadence: Option<String>,

    #[command(flatten)]
    pub search: SearchArgs,
}

impl FilterArgs {
    /// Campaign/cadence scope only
    pub fn scope(&self) -> ListFilters {
        ListFilters {
            campaign_id: self.campaign.clone(),
            cadence_id: self.cadence.clone(),
            ..ListFilters::default()
        }
    }

    pub fn count_request(&self) -> CountRequest {
        let mut filters = self.scope().from_user(self.search.user_filter());
        filters.search = self.search.search.clone();
        CountRequest::new(filters, self.search.query_params())
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub lead: String,
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub from: String,
    #[arg(long)]
    pub to: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long)]
    pub html: Option<String>,
    /// RFC 3339 timestamp, e.g. 2024-08-26T09:30:00Z
    #[arg(long, value_parser = parse_timestamp)]
    pub schedule_at: Option<DateTime<Utc>>,
    #[arg(long)]
    pub template: Option<String>,
    /// drafted, scheduled, delivered, not_sent, bounced or not_opened
    #[arg(long, value_parser = parse_mailing_state)]
    pub status: Option<MailingState>,
}

// ============================================================================
// Value Parsers
// ============================================================================

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

fn parse_mailing_state(raw: &str) -> Result<MailingState, String> {
    match serde_json::from_value(serde_json::Value::String(raw.to_lowercase())) {
        Ok(MailingState::Unknown) | Err(_) => Err(format!("unknown status '{raw}'")),
        Ok(state) => Ok(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cadence-desk").chain(args.iter().copied()))
    }

    #[test]
    fn test_mailings_list_arguments() {
        let cli = parse(&[
            "mailings", "list", "--cadence", "cad1", "--page", "3", "--from-user", "u1",
            "--from-user", "u2", "--param", "status=scheduled",
        ])
        .unwrap();
        let Command::Mailings {
            action: MessageCommand::List(args),
        } = cli.command
        else {
            panic!("expected mailings list");
        };
        assert_eq!(args.page.page, 3);
        assert_eq!(args.filters.scope().cadence_id.as_deref(), Some("cad1"));
        assert_eq!(args.filters.search.user_filter().ids(), vec!["u1", "u2"]);
        assert_eq!(
            args.filters.search.query_params().get("status").map(String::as_str),
            Some("scheduled")
        );
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(parse(&["calls", "list", "--page", "0"]).is_err());
        assert!(parse(&["calls", "list", "--page-size", "0"]).is_err());
    }

    #[test]
    fn test_status_argument() {
        let cli = parse(&["contacts", "set-status", "s1", "Paused"]).unwrap();
        let Command::Contacts {
            action: ContactsCommand::SetStatus { step_id, status },
        } = cli.command
        else {
            panic!("expected set-status");
        };
        assert_eq!(step_id, "s1");
        assert_eq!(status, StepStatus::Paused);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["users", "list", "--base-url", "https://desk", "-v"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://desk"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_param("a=b=c"), Ok(("a".into(), "b=c".into())));
        assert!(parse_param("novalue").is_err());
        assert_eq!(parse_mailing_state("NOT_SENT"), Ok(MailingState::NotSent));
        assert!(parse_mailing_state("archived").is_err());
        assert!(parse_timestamp("2024-08-26T09:30:00+02:00").is_ok());
        assert!(parse_timestamp("tomorrow").is_err());
    }

    #[test]
    fn test_count_request_has_no_paging_terms() {
        let args = FilterArgs {
            campaign: Some("camp".into()),
            search: SearchArgs {
                search: Some("acme".into()),
                ..SearchArgs::default()
            },
            ..FilterArgs::default()
        };
        let request = args.count_request();
        assert_eq!(request.filters.campaign_id.as_deref(), Some("camp"));
        assert_eq!(request.filters.search.as_deref(), Some("acme"));
    }
}
